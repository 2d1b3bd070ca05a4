//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// tfvars - Resolve Terraform variables in Terraform's own load order
#[derive(Parser, Debug)]
#[command(name = "tfvars")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run as if started in DIR
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// A Terraform command line given after `--`.
///
/// Its `-var` and `-var-file` flags are applied last, and its configuration
/// directory is used when `-C` is not given.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct TerraformLine {
    #[arg(last = true, value_name = "TERRAFORM_ARGS")]
    pub args: Vec<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the resolved value of one variable
    ///
    /// Examples:
    ///   tfvars get region
    ///   tfvars get tags --json
    ///   tfvars get region -- plan -var=region=us-east-1
    Get {
        /// Variable name, without the `var.` prefix
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        terraform: TerraformLine,
    },

    /// List every declared or assigned variable
    List {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        terraform: TerraformLine,
    },

    /// Check that every declared variable resolves
    Check {
        #[command(flatten)]
        terraform: TerraformLine,
    },

    /// Delete generated files
    Clean,

    /// Symlink files matching PATTERN into the working directory
    ///
    /// Examples:
    ///   tfvars mirror '../modules/*.tf'
    ///   tfvars -C stacks/dev mirror '../../common/*'
    Mirror {
        /// Glob patterns, relative to the working directory
        #[arg(required = true)]
        patterns: Vec<String>,
    },
}
