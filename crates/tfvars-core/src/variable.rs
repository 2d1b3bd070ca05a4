//! Variable definitions and values
//!
//! Both are immutable once created; the store rejects or replaces them
//! as a whole, never edits them in place.

use serde::Serialize;
use serde_json::Value;

/// A declared variable, with an optional default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDefinition {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    source: String,
}

impl VariableDefinition {
    /// A definition without a default.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            source: source.into(),
        }
    }

    /// A definition with a default. `Value::Null` is still a default.
    pub fn with_default(
        name: impl Into<String>,
        default: Value,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            default: Some(default),
            source: source.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Where the declaration came from, usually a file name.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// A concrete value assigned to a variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableValue {
    name: String,
    value: Value,
    source: String,
}

impl VariableValue {
    pub fn new(name: impl Into<String>, value: impl Into<Value>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            source: source.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Where the value came from: a file name, an environment key or a
    /// command line argument.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Anything that can be added to a store.
#[derive(Debug, Clone, PartialEq)]
pub enum Variable {
    Definition(VariableDefinition),
    Value(VariableValue),
}

impl Variable {
    pub fn name(&self) -> &str {
        match self {
            Self::Definition(definition) => definition.name(),
            Self::Value(value) => value.name(),
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Self::Definition(definition) => definition.source(),
            Self::Value(value) => value.source(),
        }
    }
}

impl From<VariableDefinition> for Variable {
    fn from(definition: VariableDefinition) -> Self {
        Self::Definition(definition)
    }
}

impl From<VariableValue> for Variable {
    fn from(value: VariableValue) -> Self {
        Self::Value(value)
    }
}
