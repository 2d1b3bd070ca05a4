//! Filesystem helpers for tfvars
//!
//! Provides text I/O, format-agnostic settings loading and the glob-based
//! housekeeping used to clean up and mirror generated files.

pub mod config;
pub mod error;
pub mod files;
pub mod io;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use files::{delete_files, find_paths, mirror_files};
