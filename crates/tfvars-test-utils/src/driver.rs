//! [`ScriptedDriver`], a [`JobDriver`] that replays canned generation jobs.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::Value;
use tfvars_core::{Error, JobDriver, Resolver, Result, Variable, VariableDefinition, VariableValue};

/// One generation job: the file it writes, the variables it reads while
/// running and the variables the written file provides.
#[derive(Debug, Clone, Default)]
pub struct ScriptedJob {
    pub output: String,
    pub reads: Vec<String>,
    pub provides: Vec<Variable>,
    pub failure: Option<String>,
}

impl ScriptedJob {
    pub fn new(output: &str) -> Self {
        Self {
            output: output.to_string(),
            ..Self::default()
        }
    }

    /// Read `name` through the resolver before writing the output.
    pub fn reads(mut self, name: &str) -> Self {
        self.reads.push(name.to_string());
        self
    }

    /// The output assigns `name`.
    pub fn value(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.provides
            .push(VariableValue::new(name, value, &self.output).into());
        self
    }

    /// The output declares `name`.
    pub fn define(mut self, name: &str, default: Option<Value>) -> Self {
        let definition = match default {
            Some(default) => VariableDefinition::with_default(name, default, &self.output),
            None => VariableDefinition::new(name, &self.output),
        };
        self.provides.push(definition.into());
        self
    }

    /// The job fails with `message` instead of writing its output.
    pub fn fails(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    fn provides_name(&self, name: &str) -> bool {
        self.provides.iter().any(|variable| variable.name() == name)
    }
}

/// Runs queued jobs, in queue order, until no remaining job provides the
/// requested variable.
///
/// Values are added with `allow_change = false`, so a generated value that
/// disagrees with the command line fails with `NotConsistent`.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    jobs: RefCell<VecDeque<ScriptedJob>>,
    calls: RefCell<Vec<String>>,
    observed: RefCell<Vec<(String, String, Value)>>,
}

impl ScriptedDriver {
    pub fn new(jobs: impl IntoIterator<Item = ScriptedJob>) -> Self {
        Self {
            jobs: RefCell::new(jobs.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Files the queued jobs will write, for `Resolver::with_files_to_create`.
    pub fn files_to_create(&self) -> Vec<(String, String)> {
        self.jobs
            .borrow()
            .iter()
            .map(|job| (job.output.clone(), format!("{}.py", job.output)))
            .collect()
    }

    /// Every `until` argument seen, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// `(job output, name, value)` for every successful read made by a job.
    pub fn observed(&self) -> Vec<(String, String, Value)> {
        self.observed.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.jobs.borrow().len()
    }

    fn next_job_for(&self, until: &str) -> Option<ScriptedJob> {
        let mut jobs = self.jobs.borrow_mut();
        if jobs.iter().any(|job| job.provides_name(until)) {
            jobs.pop_front()
        } else {
            None
        }
    }

    fn run(&self, job: ScriptedJob, resolver: &Resolver<'_>) -> Result<()> {
        for name in &job.reads {
            let value = resolver.get(name, &job.output)?;
            self.observed
                .borrow_mut()
                .push((job.output.clone(), name.clone(), value));
        }
        if let Some(message) = job.failure {
            return Err(Error::Generation {
                output: job.output,
                message,
            });
        }
        for variable in job.provides {
            resolver.add(variable, false)?;
        }
        resolver.file_created(job.output);
        Ok(())
    }
}

impl JobDriver for ScriptedDriver {
    fn process_jobs(&self, until: &str, resolver: &Resolver<'_>) -> Result<()> {
        self.calls.borrow_mut().push(until.to_string());
        while let Some(job) = self.next_job_for(until) {
            self.run(job, resolver)?;
        }
        Ok(())
    }
}
