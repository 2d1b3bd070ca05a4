//! tfvars CLI
//!
//! Resolves Terraform variables from a working directory, its environment
//! and a Terraform command line, and manages generated files.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use context::Workspace;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!(command = ?cli.command, "Starting");

    execute_command(cli.directory.as_deref(), cli.command)
}

fn execute_command(directory: Option<&std::path::Path>, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Get {
            name,
            json,
            terraform,
        } => {
            let workspace = Workspace::detect(directory, terraform.args)?;
            commands::run_get(&workspace, &name, json)
        }
        Commands::List { json, terraform } => {
            let workspace = Workspace::detect(directory, terraform.args)?;
            commands::run_list(&workspace, json)
        }
        Commands::Check { terraform } => {
            let workspace = Workspace::detect(directory, terraform.args)?;
            commands::run_check(&workspace)
        }
        Commands::Clean => {
            let workspace = Workspace::detect(directory, Vec::new())?;
            commands::run_clean(&workspace)
        }
        Commands::Mirror { patterns } => {
            let workspace = Workspace::detect(directory, Vec::new())?;
            commands::run_mirror(&workspace, &patterns)
        }
    }
}
