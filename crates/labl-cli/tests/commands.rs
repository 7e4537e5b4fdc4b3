use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;

use labl_cli::cli::{Cli, MappingArgs, SaveArgs, SuggestArgs};
use labl_cli::commands::{
    request_json, run, run_profile_delete, run_profile_save, run_profile_show, run_suggest,
};
use labl_cli::config::AppConfig;
use labl_map::{AssignmentMode, ProfileError};
use labl_model::CanonicalField;

struct Workspace {
    dir: TempDir,
    config: AppConfig,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::default().with_profiles_dir(Some(dir.path().join("profiles")));
        Self { dir, config }
    }

    fn csv(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write csv");
        path
    }

    fn config_file(&self) -> PathBuf {
        let path = self.dir.path().join("labl.json");
        let json = serde_json::json!({ "profilesDir": self.config.profiles_dir });
        fs::write(&path, json.to_string()).expect("write config");
        path
    }
}

fn mapping_args(file: &Path, set: &[(CanonicalField, &str)]) -> MappingArgs {
    MappingArgs {
        file: file.to_path_buf(),
        set: set
            .iter()
            .map(|(field, header)| (*field, (*header).to_string()))
            .collect(),
        exclusive: false,
    }
}

fn suggest_args(file: &Path, profile: Option<&str>) -> SuggestArgs {
    SuggestArgs {
        mapping: mapping_args(file, &[]),
        profile: profile.map(str::to_string),
        json: false,
    }
}

fn save_args(name: &str, file: &Path) -> SaveArgs {
    SaveArgs {
        name: name.to_string(),
        mapping: mapping_args(file, &[]),
        description: None,
    }
}

#[test]
fn suggest_exit_code_follows_required_fields() {
    let ws = Workspace::new();
    let complete = ws.csv("complete.csv", "Weight,Carrier Fee,Zone\n1,2,3\n");
    let incomplete = ws.csv("incomplete.csv", "Weight,Zone\n1,3\n");

    let result = run_suggest(&suggest_args(&complete, None), &ws.config).unwrap();
    assert_eq!(result.exit_code(), 0);

    let result = run_suggest(&suggest_args(&incomplete, None), &ws.config).unwrap();
    assert_eq!(result.exit_code(), 1);
    assert_eq!(result.state.validate().missing(), &[CanonicalField::Rate]);
}

#[test]
fn run_returns_exit_code_for_parsed_command_line() {
    let ws = Workspace::new();
    let config = ws.config_file();
    let incomplete = ws.csv("incomplete.csv", "Weight,Zone\n1,3\n");
    let complete = ws.csv("complete.csv", "Weight,Cost\n1,2\n");

    for (file, expected) in [(&incomplete, 1), (&complete, 0)] {
        let args: Vec<OsString> = vec![
            "labl".into(),
            "--config".into(),
            config.clone().into(),
            "suggest".into(),
            "--json".into(),
            file.clone().into(),
        ];
        let cli = Cli::try_parse_from(args).expect("parse args");
        assert_eq!(run(cli).unwrap(), expected);
    }
}

#[test]
fn manual_assignment_overrides_suggestion() {
    let ws = Workspace::new();
    let file = ws.csv("manifest.csv", "Weight,Total Cost,Net Charge\n1,2,3\n");

    let mut args = suggest_args(&file, None);
    args.mapping = mapping_args(&file, &[(CanonicalField::Rate, "Net Charge")]);
    let result = run_suggest(&args, &ws.config).unwrap();
    assert_eq!(
        result.state.mapping().get(CanonicalField::Rate),
        Some("Net Charge")
    );

    args.mapping = mapping_args(&file, &[(CanonicalField::Rate, "Net Charges")]);
    let err = run_suggest(&args, &ws.config).unwrap_err();
    assert!(format!("{err:#}").contains("did you mean 'Net Charge'"));
}

#[test]
fn json_body_is_sanitized_mapping() {
    let ws = Workspace::new();
    let file = ws.csv("manifest.csv", "Weight,Carrier Fee,Notes\n1,2,x\n");

    let result = run_suggest(&suggest_args(&file, None), &ws.config).unwrap();
    let body: serde_json::Value = serde_json::from_str(&request_json(&result).unwrap()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "weight": "Weight", "rate": "Carrier Fee" })
    );
}

#[test]
fn profile_fields_missing_from_file_are_reported() {
    let ws = Workspace::new();
    let original = ws.csv("original.csv", "Weight,Cost,Zone\n1,2,3\n");
    let later = ws.csv("later.csv", "Cost,Weight\n2,1\n");

    run_profile_save(&save_args("Warehouse", &original), &ws.config).unwrap();
    let result = run_suggest(&suggest_args(&later, Some("warehouse")), &ws.config).unwrap();

    assert_eq!(result.dropped, vec![CanonicalField::Zone]);
    assert_eq!(
        result.profile.as_ref().map(|p| p.name.as_str()),
        Some("Warehouse")
    );
    assert_eq!(result.state.mapping().get(CanonicalField::Rate), Some("Cost"));
    assert_eq!(result.exit_code(), 0);
}

#[test]
fn exclusive_flag_beats_config() {
    let ws = Workspace::new();
    let file = ws.csv("manifest.csv", "Ship Zone Cost,Weight\n1,2\n");

    let mut args = suggest_args(&file, None);
    let shared = run_suggest(&args, &ws.config).unwrap();
    assert_eq!(
        shared.state.mapping().get(CanonicalField::Rate),
        Some("Ship Zone Cost")
    );

    args.mapping.exclusive = true;
    let exclusive = run_suggest(&args, &ws.config).unwrap();
    assert_eq!(exclusive.state.mapping().get(CanonicalField::Rate), None);
    assert_eq!(ws.config.assignment, AssignmentMode::Independent);
}

#[test]
fn profile_save_show_delete_round_trip() {
    let ws = Workspace::new();
    let file = ws.csv("manifest.csv", "Weight,Cost\n1,2\n");

    let saved = run_profile_save(&save_args("Daily", &file), &ws.config).unwrap();
    assert_eq!(run_profile_show("daily", &ws.config).unwrap(), saved);
    assert_eq!(run_profile_show(&saved.id, &ws.config).unwrap().name, "Daily");

    let err = run_profile_save(&save_args("DAILY", &file), &ws.config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProfileError>(),
        Some(ProfileError::DuplicateName(_))
    ));

    assert_eq!(run_profile_delete("Daily", &ws.config).unwrap().id, saved.id);
    let err = run_profile_delete("Daily", &ws.config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProfileError>(),
        Some(ProfileError::NotFound(_))
    ));
}

#[test]
fn delete_removes_profile_stored_under_other_file_name() {
    let ws = Workspace::new();
    let profiles = &ws.config.profiles_dir;
    fs::create_dir_all(profiles).unwrap();
    fs::write(
        profiles.join("export.json"),
        r#"{"id":"p1","name":"Api","mapping":{"weight":"W"},"createdAt":"2024-03-01T12:00:00Z","updatedAt":"2024-03-01T12:00:00Z"}"#,
    )
    .unwrap();

    assert_eq!(run_profile_delete("Api", &ws.config).unwrap().id, "p1");
    assert!(!profiles.join("export.json").exists());
}
