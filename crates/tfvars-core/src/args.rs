//! Terraform command line parsing
//!
//! Only what variable loading needs: the command, where the configuration
//! lives, and the `-var` / `-var-file` flags in order.

use std::path::PathBuf;

use crate::error::{Error, Result};

const HELP_FLAGS: [&str; 3] = ["-h", "-help", "--help"];
const VERSION_FLAGS: [&str; 3] = ["-v", "-version", "--version"];

/// Commands whose last positional argument is the configuration directory.
const DIR_LAST_COMMANDS: [&str; 8] = [
    "console", "destroy", "get", "graph", "init", "plan", "refresh", "validate",
];

/// A `-var` or `-var-file` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarFlag {
    /// `-var=NAME=VALUE`; `raw` is the whole argument.
    Var {
        name: String,
        value: String,
        raw: String,
    },
    /// `-var-file=PATH`, as written.
    VarFile(PathBuf),
}

impl VarFlag {
    /// Parse one argument. `Ok(None)` for anything that is not a variable flag.
    ///
    /// The text after `-var=` is split like a shell word first, so
    /// `-var='motd=hello world'` gives `motd` = `hello world`.
    pub fn parse(arg: &str) -> Result<Option<Self>> {
        if let Some(rest) = arg.strip_prefix("-var=") {
            let words = shell_words::split(rest)
                .map_err(|e| Error::invalid_argument(arg, e.to_string()))?;
            let first = words
                .into_iter()
                .next()
                .ok_or_else(|| Error::invalid_argument(arg, "expected NAME=VALUE"))?;
            let (name, value) = first
                .split_once('=')
                .ok_or_else(|| Error::invalid_argument(arg, "expected NAME=VALUE"))?;
            return Ok(Some(Self::Var {
                name: name.to_string(),
                value: value.to_string(),
                raw: arg.to_string(),
            }));
        }
        if let Some(path) = arg.strip_prefix("-var-file=") {
            if path.is_empty() {
                return Err(Error::invalid_argument(arg, "expected a file path"));
            }
            return Ok(Some(Self::VarFile(PathBuf::from(path))));
        }
        Ok(None)
    }
}

/// A Terraform command line split into its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerraformArgs {
    /// First positional argument, or `help` / `version` when asked for
    /// before any command.
    pub command: Option<String>,
    /// Positional arguments after the command.
    pub args: Vec<String>,
    /// Everything starting with `-`, in order.
    pub flags: Vec<String>,
    /// Configuration directory named on the command line, if any.
    pub config_dir: Option<String>,
}

impl TerraformArgs {
    /// Split `argv` (without the program name). `is_dir` decides whether the
    /// first argument of `apply` is a directory or a plan file.
    pub fn parse<S: AsRef<str>>(argv: &[S], is_dir: impl Fn(&str) -> bool) -> Self {
        let mut parsed = Self::default();

        for arg in argv.iter().map(AsRef::as_ref) {
            let first = parsed.command.is_none();
            if arg.starts_with('-') {
                if first && HELP_FLAGS.contains(&arg) {
                    parsed.command = Some("help".into());
                } else if first && VERSION_FLAGS.contains(&arg) {
                    parsed.command = Some("version".into());
                } else {
                    parsed.flags.push(arg.to_string());
                }
            } else if first {
                parsed.command = Some(arg.to_string());
            } else {
                parsed.args.push(arg.to_string());
            }
        }

        parsed.config_dir = match parsed.command.as_deref() {
            Some("apply") => parsed.args.first().filter(|arg| is_dir(arg)).cloned(),
            Some("force-unlock") if parsed.args.len() == 2 => Some(parsed.args[1].clone()),
            Some(command) if DIR_LAST_COMMANDS.contains(&command) => parsed.args.last().cloned(),
            _ => None,
        };

        parsed
    }

    /// The `-var` and `-var-file` flags, in command line order.
    pub fn var_flags(&self) -> Result<Vec<VarFlag>> {
        let mut result = Vec::new();
        for flag in &self.flags {
            if let Some(var_flag) = VarFlag::parse(flag)? {
                result.push(var_flag);
            }
        }
        Ok(result)
    }
}
