//! Command bodies for the `labl` binary.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::{info_span, warn};

use labl_ingest::read_headers;
use labl_map::{ColumnMapper, MappingState, ProfileRepository};
use labl_model::{CanonicalField, MappingProfile};

use crate::cli::{Cli, Command, MappingArgs, ProfileCommand, SaveArgs, SuggestArgs};
use crate::config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::summary::{
    apply_table_style, dim_cell, header_cell, print_profile, print_suggestion, print_validation,
    required_cell,
};
use crate::types::SuggestResult;

/// Runs a parsed command line and returns the process exit code.
///
/// `suggest` exits with 1 while a required field is unmapped.
pub fn run(cli: Cli) -> Result<i32> {
    let config = AppConfig::load(cli.config.as_deref(), Path::new(DEFAULT_CONFIG_FILE))?
        .with_profiles_dir(cli.profiles_dir);
    match cli.command {
        Command::Suggest(args) => {
            let result = run_suggest(&args, &config)?;
            if args.json {
                println!("{}", request_json(&result)?);
                let outcome = result.state.validate();
                if !outcome.is_ok() {
                    print_validation(&outcome);
                }
            } else {
                print_suggestion(&result);
            }
            Ok(result.exit_code())
        }
        Command::Fields => {
            run_fields();
            Ok(0)
        }
        Command::Profile(ProfileCommand::Save(args)) => {
            let profile = run_profile_save(&args, &config)?;
            println!(
                "Saved profile '{}' ({} fields) as {}",
                profile.name,
                profile.mapping.len(),
                profile.id
            );
            Ok(0)
        }
        Command::Profile(ProfileCommand::List) => {
            run_profile_list(&config)?;
            Ok(0)
        }
        Command::Profile(ProfileCommand::Show { profile }) => {
            print_profile(&run_profile_show(&profile, &config)?);
            Ok(0)
        }
        Command::Profile(ProfileCommand::Delete { profile }) => {
            let deleted = run_profile_delete(&profile, &config)?;
            println!("Deleted profile '{}'", deleted.name);
            Ok(0)
        }
    }
}

/// Pretty JSON request body for the map-columns endpoint.
pub fn request_json(result: &SuggestResult) -> Result<String> {
    serde_json::to_string_pretty(&result.state.request_body()).context("serialize mapping")
}

pub fn run_fields() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Label"),
        header_cell("Required"),
        header_cell("Hint"),
    ]);
    apply_table_style(&mut table);
    for field in CanonicalField::ALL {
        table.add_row(vec![
            Cell::new(field.as_str()),
            Cell::new(field.label()),
            required_cell(field.is_required()),
            dim_cell(field.placeholder()),
        ]);
    }
    println!("{table}");
}

pub fn run_suggest(args: &SuggestArgs, config: &AppConfig) -> Result<SuggestResult> {
    let span = info_span!("suggest", file = %args.mapping.file.display());
    let _guard = span.enter();

    let mut state = load_state(&args.mapping, config)?;
    let mut profile = None;
    let mut dropped = Vec::new();
    if let Some(name) = &args.profile {
        let repository = ProfileRepository::new(&config.profiles_dir)?;
        let saved = repository.resolve(name)?;
        dropped = state.apply_profile(&saved);
        if !dropped.is_empty() {
            warn!(
                profile = %saved.name,
                dropped = ?dropped,
                "profile columns missing from this file"
            );
        }
        profile = Some(saved);
    }
    apply_overrides(&mut state, &args.mapping)?;

    Ok(SuggestResult {
        file: args.mapping.file.clone(),
        state,
        profile,
        dropped,
    })
}

pub fn run_profile_save(args: &SaveArgs, config: &AppConfig) -> Result<MappingProfile> {
    let mut state = load_state(&args.mapping, config)?;
    apply_overrides(&mut state, &args.mapping)?;
    if let Some(message) = state.validate().message() {
        warn!(name = %args.name, "saving incomplete profile: {message}");
    }
    let repository = ProfileRepository::new(&config.profiles_dir)?;
    repository.create(&args.name, args.description.clone(), &state.request_body())
}

pub fn run_profile_list(config: &AppConfig) -> Result<()> {
    let repository = ProfileRepository::new(&config.profiles_dir)?;
    let profiles = repository.list()?;
    if profiles.is_empty() {
        println!("No saved profiles in {}", repository.base_dir().display());
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Fields"),
        header_cell("Created"),
        header_cell("Id"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for profile in &profiles {
        table.add_row(vec![
            Cell::new(&profile.name),
            Cell::new(profile.mapping.len()),
            Cell::new(profile.created_at.format("%Y-%m-%d %H:%M")),
            dim_cell(&profile.id),
            dim_cell(profile.description.as_deref().unwrap_or("-")),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_profile_show(id_or_name: &str, config: &AppConfig) -> Result<MappingProfile> {
    let repository = ProfileRepository::new(&config.profiles_dir)?;
    repository.resolve(id_or_name)
}

/// Deletes the profile `id_or_name` resolves to; fails if nothing was removed.
pub fn run_profile_delete(id_or_name: &str, config: &AppConfig) -> Result<MappingProfile> {
    let repository = ProfileRepository::new(&config.profiles_dir)?;
    repository
        .delete_resolved(id_or_name)
        .with_context(|| format!("delete profile {id_or_name}"))
}

fn load_state(args: &MappingArgs, config: &AppConfig) -> Result<MappingState> {
    let headers = read_headers(&args.file)
        .with_context(|| format!("read headers from {}", args.file.display()))?;
    let mode = config.assignment_for(args.exclusive);
    Ok(MappingState::new(headers, ColumnMapper::new().with_mode(mode)))
}

fn apply_overrides(state: &mut MappingState, args: &MappingArgs) -> Result<()> {
    for (field, header) in &args.set {
        state
            .assign(*field, header)
            .with_context(|| format!("set {field}"))?;
    }
    Ok(())
}
