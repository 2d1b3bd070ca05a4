//! `tfvars list`

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use tfvars_core::{NoJobs, Resolver};

use crate::commands::display_value;
use crate::context::Workspace;
use crate::error::Result;

const CONSUMER: &str = "tfvars list";

/// One row of `tfvars list` output.
#[derive(Debug, Serialize)]
pub struct ListEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Where the value came from, or the declaring file for defaults.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Resolve every known name.
pub fn collect_entries(resolver: &Resolver<'_>) -> Result<Vec<ListEntry>> {
    let mut entries = Vec::new();
    for name in resolver.names()? {
        let source = match resolver.value(&name)? {
            Some(value) => Some(value.source().to_string()),
            None => resolver
                .definition(&name)?
                .map(|definition| definition.source().to_string()),
        };
        let entry = match resolver.get(&name, CONSUMER) {
            Ok(value) => ListEntry {
                name,
                value: Some(value),
                source,
                error: None,
            },
            Err(e) => ListEntry {
                name,
                value: None,
                source,
                error: Some(e.to_string()),
            },
        };
        entries.push(entry);
    }
    Ok(entries)
}

pub fn run_list(workspace: &Workspace, json: bool) -> Result<()> {
    let resolver = Resolver::new(workspace.load_context(), &NoJobs);
    let entries = collect_entries(&resolver)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("{}", "No variables found".dimmed());
        return Ok(());
    }

    for entry in &entries {
        let source = entry.source.as_deref().unwrap_or("");
        match (&entry.value, &entry.error) {
            (Some(value), _) => println!(
                "{} = {} {}",
                entry.name.green(),
                display_value(value),
                format!("({source})").dimmed()
            ),
            (None, Some(error)) => println!("{} {}", entry.name.yellow(), error.dimmed()),
            (None, None) => println!("{}", entry.name.yellow()),
        }
    }
    Ok(())
}
