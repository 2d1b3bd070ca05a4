//! Source-ordered Terraform variable resolution
//!
//! This crate resolves variables the way Terraform does, from several
//! competing sources loaded in a fixed precedence order, while allowing
//! some of those sources to be files that a generation step has not
//! written yet.
//!
//! - **Entities**: [`VariableDefinition`] (declared name, optional default)
//!   and [`VariableValue`] (concrete assignment)
//! - **Store**: [`VariableStore`], name to definition/value with a global
//!   gate on whether defaults may satisfy a read
//! - **Resolver**: [`Resolver`], the store plus the precedence load and
//!   the wait mechanism for files that are still to be generated
//! - **Proxy**: [`VariableProxy`], a read-only view labelled with the
//!   consumer for error attribution
//!
//! # Precedence
//!
//! Lowest to highest, later sources override earlier ones:
//!
//! ```text
//! *.tf, *.tf.json                  declarations and defaults
//! TF_VAR_* environment variables
//! terraform.tfvars, terraform.tfvars.json
//! *.auto.tfvars, *.auto.tfvars.json   (lexical order)
//! -var / -var-file                    (command line order)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use tfvars_core::{LoadContext, NoJobs, Resolver};
//!
//! fn example() -> tfvars_core::Result<()> {
//!     let context = LoadContext::from_process()?;
//!     let resolver = Resolver::new(context, &NoJobs);
//!     let vars = resolver.proxy("example");
//!     if vars.contains("region")? {
//!         println!("region = {}", vars.get("region")?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod args;
pub mod classify;
pub mod context;
pub mod error;
pub mod extract;
pub mod job;
pub mod proxy;
pub mod resolver;
pub mod settings;
pub mod store;
pub mod variable;

pub use args::{TerraformArgs, VarFlag};
pub use classify::FileKind;
pub use context::LoadContext;
pub use error::{Error, Result, VariableErrors};
pub use extract::{Extractor, FileExtractor};
pub use job::{JobDriver, NoJobs};
pub use proxy::{VariableProxy, VariableSource};
pub use resolver::Resolver;
pub use settings::Settings;
pub use store::VariableStore;
pub use variable::{Variable, VariableDefinition, VariableValue};
