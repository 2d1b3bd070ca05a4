//! In-memory variable store
//!
//! Holds at most one definition and one value per name. Values always
//! win over defaults; defaults only count while the store allows them.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::proxy::{VariableProxy, VariableSource};
use crate::variable::{Variable, VariableDefinition, VariableValue};

/// Name to definition/value map with a global defaults gate.
#[derive(Debug)]
pub struct VariableStore {
    definitions: BTreeMap<String, VariableDefinition>,
    values: BTreeMap<String, VariableValue>,
    defaults_allowed: bool,
}

impl Default for VariableStore {
    fn default() -> Self {
        Self {
            definitions: BTreeMap::new(),
            values: BTreeMap::new(),
            defaults_allowed: true,
        }
    }
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition or a value.
    ///
    /// A second definition for the same name is rejected. A value replaces
    /// any earlier value for the name.
    pub fn add(&mut self, variable: impl Into<Variable>) -> Result<()> {
        match variable.into() {
            Variable::Definition(definition) => {
                if let Some(old) = self.definitions.get(definition.name()) {
                    return Err(Error::AlreadyDefined {
                        old: Box::new(old.clone()),
                        new: Box::new(definition),
                    });
                }
                tracing::trace!(name = definition.name(), source = definition.source(), "Defined");
                self.definitions
                    .insert(definition.name().to_string(), definition);
            }
            Variable::Value(value) => {
                tracing::trace!(name = value.name(), source = value.source(), "Assigned");
                self.values.insert(value.name().to_string(), value);
            }
        }
        Ok(())
    }

    pub fn definition(&self, name: &str) -> Option<&VariableDefinition> {
        self.definitions.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&VariableValue> {
        self.values.get(name)
    }

    pub fn defaults_allowed(&self) -> bool {
        self.defaults_allowed
    }

    pub fn enable_defaults(&mut self) {
        self.defaults_allowed = true;
    }

    pub fn disable_defaults(&mut self) {
        self.defaults_allowed = false;
    }

    /// Whether `get` would currently succeed for `name`.
    pub fn contains(&self, name: &str) -> bool {
        if self.values.contains_key(name) {
            return true;
        }
        self.defaults_allowed
            && self
                .definitions
                .get(name)
                .is_some_and(VariableDefinition::has_default)
    }

    /// Resolve `name` on behalf of `consumer`.
    pub fn get(&self, name: &str, consumer: &str) -> Result<Value> {
        if let Some(value) = self.values.get(name) {
            return Ok(value.value().clone());
        }
        match self.definitions.get(name) {
            None => Err(Error::NotDefined {
                name: name.to_string(),
                consumer: consumer.to_string(),
            }),
            Some(definition) => match definition.default() {
                Some(default) if self.defaults_allowed => Ok(default.clone()),
                _ => Err(Error::NotPopulated {
                    name: name.to_string(),
                    consumer: consumer.to_string(),
                }),
            },
        }
    }

    /// Every name that has a definition or a value, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .definitions
            .keys()
            .chain(self.values.keys())
            .cloned()
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// A read-only view that labels every error with `consumer`.
    pub fn proxy(&self, consumer: impl Into<String>) -> VariableProxy<'_, Self> {
        VariableProxy::new(self, consumer)
    }
}

impl VariableSource for VariableStore {
    fn contains(&self, name: &str) -> Result<bool> {
        Ok(VariableStore::contains(self, name))
    }

    fn get(&self, name: &str, consumer: &str) -> Result<Value> {
        VariableStore::get(self, name, consumer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn value_beats_default() {
        let mut store = VariableStore::new();
        store
            .add(VariableDefinition::with_default("x", json!("d"), "main.tf"))
            .unwrap();
        store.add(VariableValue::new("x", "v", "TF_VAR_x")).unwrap();

        assert_eq!(store.get("x", "test").unwrap(), json!("v"));
    }

    #[test]
    fn later_value_replaces_earlier() {
        let mut store = VariableStore::new();
        store.add(VariableValue::new("x", "1", "a")).unwrap();
        store.add(VariableValue::new("x", "2", "b")).unwrap();

        assert_eq!(store.value("x").unwrap().source(), "b");
        assert_eq!(store.get("x", "test").unwrap(), json!("2"));
    }

    #[test]
    fn second_definition_is_rejected_and_first_kept() {
        let mut store = VariableStore::new();
        store.add(VariableDefinition::new("x", "a.tf")).unwrap();
        let err = store.add(VariableDefinition::new("x", "b.tf")).unwrap_err();

        assert!(matches!(err, Error::AlreadyDefined { .. }));
        assert_eq!(store.definition("x").unwrap().source(), "a.tf");
    }

    #[test]
    fn defaults_gate_controls_reads() {
        let mut store = VariableStore::new();
        store
            .add(VariableDefinition::with_default("x", json!(1), "main.tf"))
            .unwrap();
        store.disable_defaults();

        assert!(!store.contains("x"));
        assert!(matches!(
            store.get("x", "test"),
            Err(Error::NotPopulated { .. })
        ));

        store.enable_defaults();
        assert!(store.contains("x"));
        assert_eq!(store.get("x", "test").unwrap(), json!(1));
    }

    #[test]
    fn missing_name_is_not_defined() {
        let store = VariableStore::new();
        let err = store.get("nope", "reader").unwrap_err();
        assert_eq!(
            err.to_string(),
            "reader cannot access var.nope because it has not been defined"
        );
    }

    #[test]
    fn value_without_definition_is_readable() {
        let mut store = VariableStore::new();
        store.add(VariableValue::new("x", "v", "-var=x=v")).unwrap();

        assert!(store.contains("x"));
        assert_eq!(store.get("x", "test").unwrap(), json!("v"));
    }

    #[test]
    fn names_merge_definitions_and_values() {
        let mut store = VariableStore::new();
        store.add(VariableDefinition::new("b", "main.tf")).unwrap();
        store.add(VariableValue::new("a", "1", "TF_VAR_a")).unwrap();
        store.add(VariableValue::new("b", "2", "TF_VAR_b")).unwrap();

        assert_eq!(store.names(), vec!["a", "b"]);
    }
}
