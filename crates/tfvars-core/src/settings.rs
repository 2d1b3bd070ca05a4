//! Per-directory settings
//!
//! Read from the first of `.tfvarsrc.toml`, `.tfvarsrc.json` and
//! `.tfvarsrc.yaml` found in the working directory. Every field is
//! optional.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tfvars_fs::ConfigStore;

use crate::context::DEFAULT_ENV_PREFIX;
use crate::error::Result;

pub const SETTINGS_FILES: [&str; 3] = [".tfvarsrc.toml", ".tfvarsrc.json", ".tfvarsrc.yaml"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix of environment variables that carry values.
    pub env_prefix: String,
    /// Patterns of files produced by generation, removed by `clean`.
    pub generated_patterns: Vec<String>,
    /// File name patterns never mirrored into the working directory.
    pub mirror_exclude: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            generated_patterns: vec!["*.tf.json".into(), "*.tfvars.json".into()],
            mirror_exclude: vec![".*".into(), "_*".into()],
        }
    }
}

impl Settings {
    /// Load settings for `dir`, falling back to defaults when no settings
    /// file exists.
    pub fn load(dir: &Path) -> Result<Self> {
        match ConfigStore::new().load_first(dir, &SETTINGS_FILES)? {
            Some((path, settings)) => {
                tracing::debug!(?path, "Loaded settings");
                Ok(settings)
            }
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Settings::load(dir.path()).unwrap(), Settings::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".tfvarsrc.toml"), "env_prefix = \"APP_\"\n").unwrap();

        let settings = Settings::load(dir.path()).unwrap();

        assert_eq!(settings.env_prefix, "APP_");
        assert_eq!(settings.mirror_exclude, vec![".*", "_*"]);
    }

    #[test]
    fn toml_wins_over_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".tfvarsrc.toml"), "generated_patterns = [\"*.gen\"]\n").unwrap();
        fs::write(dir.path().join(".tfvarsrc.json"), r#"{"generated_patterns": ["*.x"]}"#).unwrap();

        let settings = Settings::load(dir.path()).unwrap();

        assert_eq!(settings.generated_patterns, vec!["*.gen"]);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".tfvarsrc.json"), "{").unwrap();

        assert!(Settings::load(dir.path()).is_err());
    }
}
