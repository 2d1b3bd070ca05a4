//! Error types for tfvars-cli

use tfvars_core::VariableErrors;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from tfvars-core
    #[error(transparent)]
    Core(#[from] tfvars_core::Error),

    /// Error from tfvars-fs
    #[error(transparent)]
    Fs(#[from] tfvars_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Every variable that failed to resolve during `check`
    #[error("{} variable(s) cannot be resolved:{errors}", .errors.len())]
    Variables { errors: VariableErrors },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

impl From<VariableErrors> for CliError {
    fn from(errors: VariableErrors) -> Self {
        Self::Variables { errors }
    }
}
