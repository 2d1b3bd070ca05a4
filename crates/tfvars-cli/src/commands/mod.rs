//! Command implementations for tfvars-cli

pub mod check;
pub mod files;
pub mod get;
pub mod list;

pub use check::run_check;
pub use files::{run_clean, run_mirror};
pub use get::run_get;
pub use list::run_list;

use serde_json::Value;

/// Strings print bare, everything else as compact JSON.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
