//! `tfvars clean` and `tfvars mirror`

use colored::Colorize;

use crate::context::Workspace;
use crate::error::Result;

pub fn run_clean(workspace: &Workspace) -> Result<()> {
    let no_excludes: &[&str] = &[];
    let deleted = tfvars_fs::delete_files(
        &workspace.dir,
        workspace.settings.generated_patterns.as_slice(),
        no_excludes,
    )?;

    if deleted.is_empty() {
        println!("{}", "Nothing to clean".dimmed());
    }
    for path in deleted {
        println!("{} {}", "removed".red(), path.display());
    }
    Ok(())
}

pub fn run_mirror(workspace: &Workspace, patterns: &[String]) -> Result<()> {
    let created = tfvars_fs::mirror_files(
        &workspace.dir,
        patterns,
        workspace.settings.mirror_exclude.as_slice(),
    )?;

    if created.is_empty() {
        println!("{}", "No files matched".dimmed());
    }
    for path in created {
        println!("{} {}", "linked".green(), path.display());
    }
    Ok(())
}
