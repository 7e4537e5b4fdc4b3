//! Profile repository for persisting and reusing column mappings.
//!
//! Each [`MappingProfile`] is stored as a pretty-printed JSON file inside the
//! repository directory, in the same camelCase shape the profiles API
//! exchanges. Profiles this repository writes are named `{id}.json`, but any
//! `.json` file in the directory is read, so lookups keep track of the file a
//! profile came from. Profiles are created, listed, fetched and deleted;
//! there is no in-place update.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use labl_model::{CanonicalField, ColumnMapping, MappingProfile};

use crate::error::ProfileError;

/// Directory-backed store of mapping profiles.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    base_dir: PathBuf,
}

/// A profile together with the file it was read from.
#[derive(Debug, Clone)]
struct StoredProfile {
    path: PathBuf,
    profile: MappingProfile,
}

impl ProfileRepository {
    /// Opens a repository at the given directory, creating it if needed.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir).with_context(|| {
            format!(
                "Failed to create profile repository: {}",
                base_dir.display()
            )
        })?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Saves a new profile from `mapping`.
    ///
    /// The mapping is sanitized first. A blank name, a name already used by
    /// another profile, or a mapping with no fields left is rejected.
    pub fn create(
        &self,
        name: &str,
        description: Option<String>,
        mapping: &ColumnMapping,
    ) -> Result<MappingProfile> {
        let mapping = mapping.clone().sanitize();
        if mapping.is_empty() {
            return Err(ProfileError::EmptyMapping(name.trim().to_string()).into());
        }
        let id = Uuid::new_v4().to_string();
        let profile = MappingProfile::new(id, name, description, mapping, Utc::now())
            .map_err(ProfileError::from)?;
        if !self.named(&profile.name)?.is_empty() {
            return Err(ProfileError::DuplicateName(profile.name).into());
        }
        let path = self.profile_path(&profile.id);
        let json = serde_json::to_string_pretty(&profile)
            .with_context(|| format!("Failed to serialize profile {}", profile.name))?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write profile to {}", path.display()))?;
        info!(
            profile_id = %profile.id,
            profile = %profile.name,
            fields = profile.mapping.len(),
            "saved mapping profile"
        );
        Ok(profile)
    }

    /// Loads a profile by id. Returns `None` if it does not exist.
    pub fn get(&self, id: &str) -> Result<Option<MappingProfile>> {
        Ok(self.stored_by_id(id)?.map(|stored| stored.profile))
    }

    /// Finds a profile by name, ignoring case and surrounding whitespace.
    ///
    /// Fails with [`ProfileError::AmbiguousName`] when several profiles share
    /// the name.
    pub fn find_by_name(&self, name: &str) -> Result<Option<MappingProfile>> {
        Ok(self.stored_by_name(name)?.map(|stored| stored.profile))
    }

    /// Resolves a profile by id first, then by name.
    pub fn resolve(&self, id_or_name: &str) -> Result<MappingProfile> {
        Ok(self.locate(id_or_name)?.profile)
    }

    /// Lists all profiles, oldest first.
    ///
    /// Files that cannot be parsed are skipped with a warning.
    pub fn list(&self) -> Result<Vec<MappingProfile>> {
        Ok(self
            .entries()?
            .into_iter()
            .map(|stored| stored.profile)
            .collect())
    }

    /// Deletes a profile by id. Returns false if it did not exist.
    pub fn delete(&self, id: &str) -> Result<bool> {
        match self.stored_by_id(id)? {
            Some(stored) => {
                remove(&stored)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Deletes the profile [`resolve`](Self::resolve) would return and
    /// hands it back.
    pub fn delete_resolved(&self, id_or_name: &str) -> Result<MappingProfile> {
        let stored = self.locate(id_or_name)?;
        remove(&stored)?;
        Ok(stored.profile)
    }

    fn locate(&self, id_or_name: &str) -> Result<StoredProfile> {
        if let Some(stored) = self.stored_by_id(id_or_name)? {
            return Ok(stored);
        }
        self.stored_by_name(id_or_name)?
            .ok_or_else(|| ProfileError::NotFound(id_or_name.trim().to_string()).into())
    }

    fn stored_by_id(&self, id: &str) -> Result<Option<StoredProfile>> {
        let id = id.trim();
        Ok(self
            .entries()?
            .into_iter()
            .find(|stored| stored.profile.id == id))
    }

    fn stored_by_name(&self, name: &str) -> Result<Option<StoredProfile>> {
        let mut matches = self.named(name)?;
        if matches.len() > 1 {
            return Err(ProfileError::AmbiguousName {
                name: name.trim().to_string(),
                count: matches.len(),
            }
            .into());
        }
        Ok(matches.pop())
    }

    fn named(&self, name: &str) -> Result<Vec<StoredProfile>> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .entries()?
            .into_iter()
            .filter(|stored| stored.profile.name.to_lowercase() == wanted)
            .collect())
    }

    fn entries(&self) -> Result<Vec<StoredProfile>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.base_dir)
            .with_context(|| format!("Failed to read repository: {}", self.base_dir.display()))?
        {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match read_profile(&path) {
                Ok(profile) => entries.push(StoredProfile { path, profile }),
                Err(error) => warn!(path = %path.display(), %error, "skipping unreadable profile"),
            }
        }
        entries.sort_by(|a, b| {
            a.profile
                .created_at
                .cmp(&b.profile.created_at)
                .then_with(|| a.profile.name.cmp(&b.profile.name))
        });
        Ok(entries)
    }

    fn profile_path(&self, id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", normalize_id(id)))
    }
}

fn remove(stored: &StoredProfile) -> Result<()> {
    fs::remove_file(&stored.path)
        .with_context(|| format!("Failed to delete profile: {}", stored.path.display()))?;
    info!(
        profile_id = %stored.profile.id,
        profile = %stored.profile.name,
        "deleted mapping profile"
    );
    Ok(())
}

/// Reads a profile file. Mapping keys that name no field are dropped with a
/// warning instead of rejecting the whole profile.
fn read_profile(path: &Path) -> Result<MappingProfile> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile from {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse profile from {}", path.display()))?;
    let unknown = unknown_mapping_keys(&value);
    if !unknown.is_empty() {
        warn!(
            path = %path.display(),
            keys = ?unknown,
            "ignoring unknown fields in profile mapping"
        );
    }
    serde_json::from_value(value)
        .with_context(|| format!("Failed to parse profile from {}", path.display()))
}

fn unknown_mapping_keys(value: &Value) -> Vec<String> {
    value
        .get("mapping")
        .and_then(Value::as_object)
        .map(|mapping| {
            mapping
                .keys()
                .filter(|key| key.parse::<CanonicalField>().is_err())
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Keeps ids safe for use as file names.
fn normalize_id(id: &str) -> String {
    id.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
