//! Process inputs for a variable load
//!
//! Everything the resolver would otherwise read from the running process
//! is captured here, so tests and embedders can supply their own.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Environment variable prefix Terraform reads values from.
pub const DEFAULT_ENV_PREFIX: &str = "TF_VAR_";

/// Working directory, environment and command line of one load.
#[derive(Debug, Clone)]
pub struct LoadContext {
    pub working_dir: PathBuf,
    pub environment: Vec<(String, String)>,
    /// Terraform arguments, without the program name.
    pub args: Vec<String>,
    pub env_prefix: String,
}

impl LoadContext {
    /// An empty context rooted at `working_dir`.
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            environment: Vec::new(),
            args: Vec::new(),
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// Capture the current directory, environment and arguments.
    pub fn from_process() -> Result<Self> {
        let working_dir = std::env::current_dir().map_err(|e| Error::Fs(tfvars_fs::Error::io(".", e)))?;
        Ok(Self::new(working_dir)
            .with_environment(process_environment())
            .with_args(utf8_args(std::env::args_os().skip(1))?))
    }

    pub fn with_environment<K, V>(mut self, environment: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = environment
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self
    }

    pub fn with_args<S: Into<String>>(mut self, args: impl IntoIterator<Item = S>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// `(name, raw key, value)` for every prefixed environment variable,
    /// in environment order. Keys that are only the prefix are skipped.
    pub fn env_values(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.environment.iter().filter_map(|(key, value)| {
            let name = key.strip_prefix(self.env_prefix.as_str())?;
            (!name.is_empty()).then_some((name, key.as_str(), value.as_str()))
        })
    }
}

/// The process environment, without entries that are not valid UTF-8.
pub fn process_environment() -> Vec<(String, String)> {
    utf8_environment(std::env::vars_os())
}

/// Keep the UTF-8 entries of an environment; the rest cannot name a
/// Terraform variable or carry its value.
pub fn utf8_environment(
    environment: impl IntoIterator<Item = (OsString, OsString)>,
) -> Vec<(String, String)> {
    environment
        .into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (Ok(key), Err(_)) => {
                tracing::debug!(%key, "Skipping environment variable with non UTF-8 value");
                None
            }
            (Err(key), _) => {
                tracing::debug!(key = %key.to_string_lossy(), "Skipping non UTF-8 environment variable");
                None
            }
        })
        .collect()
}

/// Convert command line arguments, rejecting any that are not UTF-8.
pub fn utf8_args(args: impl IntoIterator<Item = OsString>) -> Result<Vec<String>> {
    args.into_iter()
        .map(|arg| {
            arg.into_string().map_err(|arg| {
                Error::invalid_argument(arg.to_string_lossy(), "not valid UTF-8")
            })
        })
        .collect()
}
