//! `tfvars check`

use colored::Colorize;
use tfvars_core::{NoJobs, Resolver, VariableErrors};

use crate::context::Workspace;
use crate::error::Result;

const CONSUMER: &str = "tfvars check";

/// Resolve every declared variable, collecting all failures.
///
/// Returns the number of declared variables checked.
pub fn check_declared(resolver: &Resolver<'_>) -> Result<usize> {
    let mut errors = VariableErrors::new();
    let mut checked = 0;
    for name in resolver.names()? {
        if resolver.definition(&name)?.is_none() {
            continue;
        }
        checked += 1;
        if let Err(e) = resolver.get(&name, CONSUMER) {
            errors.add(e);
        }
    }
    errors.into_result()?;
    Ok(checked)
}

pub fn run_check(workspace: &Workspace) -> Result<()> {
    let resolver = Resolver::new(workspace.load_context(), &NoJobs);
    let checked = check_declared(&resolver)?;
    println!(
        "{} {checked} variable(s) resolved",
        "OK".green().bold()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use tfvars_test_utils::TestWorkspace;

    #[test]
    fn reports_every_failure() {
        let ws = TestWorkspace::new();
        ws.write(
            "main.tf",
            "variable \"a\" {}\nvariable \"b\" {}\nvariable \"c\" {\n  default = 1\n}\n",
        );
        let resolver = Resolver::new(ws.context(), &NoJobs);

        let err = check_declared(&resolver).unwrap_err();

        match err {
            CliError::Variables { errors } => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn undeclared_values_are_not_checked() {
        let ws = TestWorkspace::new();
        ws.write("main.tf", "variable \"a\" {}\n")
            .write("terraform.tfvars", "a = 1\nextra = 2\n");
        let resolver = Resolver::new(ws.context(), &NoJobs);

        assert_eq!(check_declared(&resolver).unwrap(), 1);
    }
}
