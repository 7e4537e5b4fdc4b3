//! Application configuration.
//!
//! Loaded once at start-up and passed to each command. Values come from an
//! optional JSON file; command-line flags override them.
//!
//! ```json
//! { "profilesDir": "/srv/labl/profiles", "assignment": "exclusive" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use labl_map::AssignmentMode;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "labl.json";

/// Where profiles are stored unless configured otherwise.
pub const DEFAULT_PROFILES_DIR: &str = ".labl/profiles";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct AppConfig {
    /// Directory holding saved mapping profiles.
    pub profiles_dir: PathBuf,
    /// Default assignment mode for auto-mapping.
    pub assignment: AssignmentMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profiles_dir: PathBuf::from(DEFAULT_PROFILES_DIR),
            assignment: AssignmentMode::Independent,
        }
    }
}

impl AppConfig {
    /// Loads configuration.
    ///
    /// An explicit path must exist. Without one, `fallback` is read if it
    /// exists and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>, fallback: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if fallback.is_file() => Self::from_file(fallback),
            None => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Applies the global `--profiles-dir` override.
    pub fn with_profiles_dir(mut self, profiles_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = profiles_dir {
            self.profiles_dir = dir;
        }
        self
    }

    /// Assignment mode for one command; `--exclusive` beats the file value.
    pub fn assignment_for(&self, exclusive: bool) -> AssignmentMode {
        if exclusive {
            AssignmentMode::Exclusive
        } else {
            self.assignment
        }
    }
}
