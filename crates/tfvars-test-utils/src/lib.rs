//! Shared test utilities for the tfvars workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`workspace`]: [`TestWorkspace`], a temporary Terraform directory
//! - [`driver`]: [`ScriptedDriver`], a job driver that replays canned jobs

pub mod driver;
pub mod workspace;

pub use driver::{ScriptedDriver, ScriptedJob};
pub use workspace::TestWorkspace;
