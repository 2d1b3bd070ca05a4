//! Error types for tfvars-parse

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Hcl(#[from] hcl::Error),

    #[error("{name} must be a literal value: {message}")]
    NotLiteral { name: String, message: String },

    #[error("Unexpected structure: {message}")]
    Shape { message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn shape(message: impl Into<String>) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }
}
