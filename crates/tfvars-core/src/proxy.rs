//! Read-only, consumer-labelled access to variables

use serde_json::Value;

use crate::error::Result;

/// Anything variables can be read from.
pub trait VariableSource {
    /// Whether a read of `name` would currently succeed.
    fn contains(&self, name: &str) -> Result<bool>;

    /// Resolve `name`, attributing failures to `consumer`.
    fn get(&self, name: &str, consumer: &str) -> Result<Value>;
}

/// A view over a [`VariableSource`] that remembers who is reading.
///
/// Handed to generation scripts so that an error names the script that
/// asked for the variable rather than the resolver.
#[derive(Debug)]
pub struct VariableProxy<'a, S: VariableSource + ?Sized> {
    source: &'a S,
    consumer: String,
}

impl<'a, S: VariableSource + ?Sized> VariableProxy<'a, S> {
    pub fn new(source: &'a S, consumer: impl Into<String>) -> Self {
        Self {
            source,
            consumer: consumer.into(),
        }
    }

    pub fn consumer(&self) -> &str {
        &self.consumer
    }

    pub fn contains(&self, name: &str) -> Result<bool> {
        self.source.contains(name)
    }

    pub fn get(&self, name: &str) -> Result<Value> {
        self.source.get(name, &self.consumer)
    }
}

impl<S: VariableSource + ?Sized> Clone for VariableProxy<'_, S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            consumer: self.consumer.clone(),
        }
    }
}
