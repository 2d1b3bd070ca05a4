//! Readers for Terraform variable declaration and value files.
//!
//! This crate is purely syntactic. It turns the text of a file into
//! [`VariableBlock`]s (from `*.tf` / `*.tf.json`) or [`Assignment`]s (from
//! `*.tfvars` / `*.tfvars.json`) and leaves precedence and bookkeeping to
//! `tfvars-core`.
//!
//! Native files are parsed with `hcl-rs`. Only the expressions whose value
//! is needed (a `default`, a tfvars assignment) are evaluated, so attributes
//! such as `type = string` or `condition = length(var.x) > 0` are ignored.
//!
//! # Example
//!
//! ```
//! use tfvars_parse::{Format, parse_variable_blocks};
//!
//! let source = r#"
//! variable "region" {
//!   type    = string
//!   default = "eu-west-1"
//! }
//! "#;
//!
//! let blocks = parse_variable_blocks(source, Format::Native).unwrap();
//! assert_eq!(blocks[0].name, "region");
//! assert_eq!(blocks[0].default, Some(serde_json::json!("eu-west-1")));
//! ```

pub mod error;
mod json;
mod native;

pub use error::{Error, Result};

use serde_json::Value;

/// Encoding of a declaration or value file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// HCL native syntax (`.tf`, `.tfvars`)
    Native,
    /// JSON syntax (`.tf.json`, `.tfvars.json`)
    Json,
}

impl Format {
    /// Detect the format from a file name.
    pub fn from_file_name(name: &str) -> Self {
        if name.ends_with(".json") {
            Self::Json
        } else {
            Self::Native
        }
    }
}

/// A `variable` block found in a declaration file.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableBlock {
    pub name: String,
    /// `Some` when the block has a `default` attribute, even `default = null`.
    pub default: Option<Value>,
}

/// A `name = value` pair found in a value file.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: String,
    pub value: Value,
}

/// Extract every `variable` block from a declaration file.
pub fn parse_variable_blocks(source: &str, format: Format) -> Result<Vec<VariableBlock>> {
    match format {
        Format::Native => native::variable_blocks(source),
        Format::Json => json::variable_blocks(source),
    }
}

/// Extract every assignment from a value file, in file order.
pub fn parse_assignments(source: &str, format: Format) -> Result<Vec<Assignment>> {
    match format {
        Format::Native => native::assignments(source),
        Format::Json => json::assignments(source),
    }
}
