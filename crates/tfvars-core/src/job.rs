//! Hook for running generation jobs on demand

use crate::error::Result;
use crate::resolver::Resolver;

/// Runs whatever pending generation jobs are needed before a variable
/// can be read.
///
/// The resolver calls [`process_jobs`](JobDriver::process_jobs) once per
/// [`Resolver::get`], before the store is consulted. A driver may call
/// back into the same resolver while it runs: reading variables, adding
/// values and reporting finished files with [`Resolver::file_created`].
pub trait JobDriver {
    fn process_jobs(&self, until: &str, resolver: &Resolver<'_>) -> Result<()>;
}

/// A driver with nothing to run.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoJobs;

impl JobDriver for NoJobs {
    fn process_jobs(&self, _until: &str, _resolver: &Resolver<'_>) -> Result<()> {
        Ok(())
    }
}
