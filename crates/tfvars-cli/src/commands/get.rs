//! `tfvars get`

use tfvars_core::{NoJobs, Resolver};

use crate::commands::display_value;
use crate::context::Workspace;
use crate::error::Result;

/// Consumer label for reads made on behalf of the command line.
pub const CONSUMER: &str = "tfvars get";

pub fn run_get(workspace: &Workspace, name: &str, json: bool) -> Result<()> {
    let resolver = Resolver::new(workspace.load_context(), &NoJobs);
    let vars = resolver.proxy(CONSUMER);
    let value = vars.get(name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", display_value(&value));
    }
    Ok(())
}
