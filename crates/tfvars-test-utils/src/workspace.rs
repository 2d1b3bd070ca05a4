//! [`TestWorkspace`] builder for resolver test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tfvars_core::LoadContext;

/// A temporary working directory with helpers for writing Terraform files.
///
/// # Example
///
/// ```rust,no_run
/// use tfvars_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write("main.tf", "variable \"region\" {}\n")
///     .write("terraform.tfvars", "region = \"eu\"\n");
/// let context = ws.context().with_args(["plan"]);
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `name` inside the workspace.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write `content` to `name`, creating parent directories.
    pub fn write(&self, name: &str, content: &str) -> &Self {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        self
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    /// A load context rooted here, with an empty environment and no arguments.
    pub fn context(&self) -> LoadContext {
        LoadContext::new(self.root())
    }
}
