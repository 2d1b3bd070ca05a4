//! Reading variables out of files
//!
//! The resolver only decides which files to read and in what order. What
//! a file contains is the business of an [`Extractor`].

use std::path::Path;

use tfvars_parse::Format;

use crate::error::{Error, Result};
use crate::variable::{Variable, VariableDefinition, VariableValue};

/// Turns declaration and value files into variables.
pub trait Extractor {
    /// Every declared variable in a `*.tf` / `*.tf.json` file.
    fn definitions(&self, path: &Path) -> Result<Vec<VariableDefinition>>;

    /// Every assignment in a `*.tfvars` / `*.tfvars.json` file, in file order.
    fn values(&self, path: &Path) -> Result<Vec<VariableValue>>;

    /// Dispatch on the file suffix.
    fn extract(&self, path: &Path) -> Result<Vec<Variable>> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        if name.ends_with(".tf") || name.ends_with(".tf.json") {
            Ok(self.definitions(path)?.into_iter().map(Into::into).collect())
        } else if name.ends_with(".tfvars") || name.ends_with(".tfvars.json") {
            Ok(self.values(path)?.into_iter().map(Into::into).collect())
        } else {
            Err(Error::UnsupportedFile {
                path: path.to_path_buf(),
            })
        }
    }
}

impl<E: Extractor + ?Sized> Extractor for &E {
    fn definitions(&self, path: &Path) -> Result<Vec<VariableDefinition>> {
        (**self).definitions(path)
    }

    fn values(&self, path: &Path) -> Result<Vec<VariableValue>> {
        (**self).values(path)
    }
}

/// Reads files from disk with `tfvars-parse`.
///
/// The source label of every variable is the file name, not the full path.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileExtractor;

impl FileExtractor {
    fn read(path: &Path) -> Result<(String, String, Format)> {
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let text = tfvars_fs::io::read_text(path)?;
        let format = Format::from_file_name(&label);
        Ok((label, text, format))
    }
}

impl Extractor for FileExtractor {
    fn definitions(&self, path: &Path) -> Result<Vec<VariableDefinition>> {
        let (label, text, format) = Self::read(path)?;
        let blocks =
            tfvars_parse::parse_variable_blocks(&text, format).map_err(|e| Error::extract(path, e))?;

        tracing::debug!(file = %label, count = blocks.len(), "Read declarations");
        Ok(blocks
            .into_iter()
            .map(|block| match block.default {
                Some(default) => VariableDefinition::with_default(block.name, default, &label),
                None => VariableDefinition::new(block.name, &label),
            })
            .collect())
    }

    fn values(&self, path: &Path) -> Result<Vec<VariableValue>> {
        let (label, text, format) = Self::read(path)?;
        let assignments =
            tfvars_parse::parse_assignments(&text, format).map_err(|e| Error::extract(path, e))?;

        tracing::debug!(file = %label, count = assignments.len(), "Read values");
        Ok(assignments
            .into_iter()
            .map(|assignment| VariableValue::new(assignment.name, assignment.value, &label))
            .collect())
    }
}
