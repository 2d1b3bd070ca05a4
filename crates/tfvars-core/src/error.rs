//! Error types for tfvars-core

use std::fmt;
use std::path::PathBuf;

use crate::variable::{VariableDefinition, VariableValue};

/// Result type for tfvars-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or resolving variables
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A second declaration for a name that is already declared
    #[error(
        "{} cannot define var.{} because {} already defined it",
        .new.source(), .new.name(), .old.source()
    )]
    AlreadyDefined {
        old: Box<VariableDefinition>,
        new: Box<VariableDefinition>,
    },

    /// A protected value was changed to something different
    #[error(
        "{} cannot set var.{}={} because {} set var.{}={}",
        .new.source(), .new.name(), .new.value(), .old.source(), .old.name(), .old.value()
    )]
    NotConsistent {
        old: Box<VariableValue>,
        new: Box<VariableValue>,
    },

    /// Read of a name nobody declared or assigned
    #[error("{consumer} cannot access var.{name} because it has not been defined")]
    NotDefined { name: String, consumer: String },

    /// Read of a declared name with no usable value, often only until
    /// more generation has run
    #[error("{consumer} cannot access var.{name} because it has no value")]
    NotPopulated { name: String, consumer: String },

    /// A declaration or value file could not be read
    #[error("Cannot read variables from {}: {source}", .path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The file is neither a declaration file nor a value file
    #[error("Unsupported variables file: {}", .path.display())]
    UnsupportedFile { path: PathBuf },

    /// A malformed `-var` or `-var-file` argument
    #[error("Invalid argument {arg}: {message}")]
    InvalidArgument { arg: String, message: String },

    /// A job driver failed for reasons of its own
    #[error("Generating {output} failed: {message}")]
    Generation { output: String, message: String },

    /// An earlier load of the same resolver failed with `message`
    #[error("Variables are unavailable because loading them failed: {message}")]
    LoadFailed { message: String },

    /// Filesystem error from tfvars-fs
    #[error(transparent)]
    Fs(#[from] tfvars_fs::Error),
}

impl Error {
    pub fn extract(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Extract {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn invalid_argument(arg: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg: arg.into(),
            message: message.into(),
        }
    }

    /// The variable name a read or write failed on, if any.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Self::AlreadyDefined { new, .. } => Some(new.name()),
            Self::NotConsistent { new, .. } => Some(new.name()),
            Self::NotDefined { name, .. } | Self::NotPopulated { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Whether retrying after more generation has run may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NotPopulated { .. })
    }
}

/// A batch of errors, for callers that report every problem at once
/// instead of stopping at the first.
#[derive(Debug, Default)]
pub struct VariableErrors {
    errors: Vec<Error>,
}

impl VariableErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: Error) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was collected, otherwise the whole batch.
    pub fn into_result(self) -> std::result::Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for VariableErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for VariableErrors {}

impl Extend<Error> for VariableErrors {
    fn extend<I: IntoIterator<Item = Error>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for VariableErrors {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a VariableErrors {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
