//! Working directory detection
//!
//! `-C DIR` wins. Otherwise the configuration directory named on the
//! Terraform command line is used, the way Terraform itself would, and
//! failing that the current directory.

use std::path::{Path, PathBuf};

use tfvars_core::{LoadContext, Settings, TerraformArgs};

use crate::error::{CliError, Result};

/// Where a command runs and what it was given.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub dir: PathBuf,
    pub settings: Settings,
    pub terraform_args: Vec<String>,
}

impl Workspace {
    /// Detect the workspace for the running process.
    pub fn detect(directory: Option<&Path>, terraform_args: Vec<String>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::detect_from(&cwd, directory, terraform_args)
    }

    pub fn detect_from(
        cwd: &Path,
        directory: Option<&Path>,
        terraform_args: Vec<String>,
    ) -> Result<Self> {
        let dir = match directory {
            Some(directory) => cwd.join(directory),
            None => {
                let parsed = TerraformArgs::parse(terraform_args.as_slice(), |arg| {
                    cwd.join(arg).is_dir()
                });
                match parsed.config_dir {
                    Some(config_dir) => cwd.join(config_dir),
                    None => cwd.to_path_buf(),
                }
            }
        };

        if !dir.is_dir() {
            return Err(CliError::user(format!(
                "{} is not a directory",
                dir.display()
            )));
        }

        let settings = Settings::load(&dir)?;
        tracing::debug!(dir = %dir.display(), "Using working directory");

        Ok(Self {
            dir,
            settings,
            terraform_args,
        })
    }

    /// Load context with the process environment and the Terraform arguments.
    pub fn load_context(&self) -> LoadContext {
        self.load_context_with(tfvars_core::context::process_environment())
    }

    pub fn load_context_with(
        &self,
        environment: impl IntoIterator<Item = (String, String)>,
    ) -> LoadContext {
        LoadContext::new(&self.dir)
            .with_env_prefix(&self.settings.env_prefix)
            .with_environment(environment)
            .with_args(self.terraform_args.iter().cloned())
    }
}
