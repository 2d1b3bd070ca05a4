//! Plain text I/O and directory listing

use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// List the names of all entries directly inside `dir`, sorted.
///
/// Entries whose names are not valid UTF-8 are skipped; they can never
/// match any of the suffixes tfvars cares about.
pub fn list_names(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::debug!(?raw, "Skipping non UTF-8 entry"),
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn list_names_is_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.tf"), "").unwrap();
        fs::write(temp.path().join("a.tf"), "").unwrap();
        fs::create_dir(temp.path().join("modules")).unwrap();

        let names = list_names(temp.path()).unwrap();
        assert_eq!(names, vec!["a.tf", "b.tf", "modules"]);
    }

    #[test]
    fn read_text_reports_missing_path() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.tfvars");

        let err = read_text(&missing).unwrap_err();
        assert!(matches!(err, Error::Io { ref path, .. } if path == &missing));
    }
}
