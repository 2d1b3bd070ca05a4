//! End-to-end generation scenarios
//!
//! A driver renders value files to disk while the resolver is being read,
//! the way a generation tool would. Afterwards a fresh resolver that knows
//! nothing about generation must see the same values from the files alone.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value, json};
use tfvars_core::{
    Error, JobDriver, NoJobs, Resolver, Result, VariableProxy, VariableValue,
};
use tfvars_test_utils::TestWorkspace;

type Render = fn(&VariableProxy<'_, Resolver<'_>>) -> Result<Map<String, Value>>;

/// Writes `output` into `dir` from the object returned by `render`.
struct RenderJob {
    output: &'static str,
    provides: &'static [&'static str],
    render: Render,
}

struct RenderingDriver {
    dir: PathBuf,
    jobs: RefCell<VecDeque<RenderJob>>,
}

impl RenderingDriver {
    fn new(dir: PathBuf, jobs: Vec<RenderJob>) -> Self {
        Self {
            dir,
            jobs: RefCell::new(jobs.into()),
        }
    }

    fn files_to_create(&self) -> Vec<(String, String)> {
        self.jobs
            .borrow()
            .iter()
            .map(|job| (job.output.to_string(), format!("{}.py", job.output)))
            .collect()
    }

    fn next_job_for(&self, until: &str) -> Option<RenderJob> {
        let mut jobs = self.jobs.borrow_mut();
        let index = jobs.iter().position(|job| job.provides.contains(&until))?;
        jobs.remove(index)
    }
}

impl JobDriver for RenderingDriver {
    fn process_jobs(&self, until: &str, resolver: &Resolver<'_>) -> Result<()> {
        while let Some(job) = self.next_job_for(until) {
            let vars = resolver.proxy(format!("{}.py", job.output));
            let values = (job.render)(&vars)?;

            let path = self.dir.join(job.output);
            let text = serde_json::to_string_pretty(&values).map_err(|e| Error::Generation {
                output: job.output.to_string(),
                message: e.to_string(),
            })?;
            fs::write(&path, text).map_err(|e| Error::Generation {
                output: job.output.to_string(),
                message: e.to_string(),
            })?;

            for (name, value) in values {
                resolver.add(VariableValue::new(name, value, job.output), false)?;
            }
            resolver.file_created(job.output);
        }
        Ok(())
    }
}

fn stack() -> TestWorkspace {
    let ws = TestWorkspace::new();
    ws.write(
        "variables.tf",
        r#"
variable "environment" {
  type = string
}

variable "region" {
  type    = string
  default = "eu-west-1"
}

variable "bucket" {
  type = string
}

variable "tags" {
  type    = map(string)
  default = {}
}
"#,
    );
    ws
}

fn render_defaults(vars: &VariableProxy<'_, Resolver<'_>>) -> Result<Map<String, Value>> {
    let environment = vars.get("environment")?;
    let mut values = Map::new();
    values.insert(
        "tags".into(),
        json!({ "env": environment, "managed_by": "tfvars" }),
    );
    Ok(values)
}

/// Names the bucket after another generated value.
fn render_bucket(vars: &VariableProxy<'_, Resolver<'_>>) -> Result<Map<String, Value>> {
    let environment = vars.get("environment")?;
    let tags = vars.get("tags")?;
    let name = format!(
        "{}-{}-state",
        environment.as_str().unwrap_or_default(),
        tags["managed_by"].as_str().unwrap_or_default()
    );
    let mut values = Map::new();
    values.insert("bucket".into(), Value::String(name));
    Ok(values)
}

/// Reads a variable that only has a default.
fn render_regional_bucket(vars: &VariableProxy<'_, Resolver<'_>>) -> Result<Map<String, Value>> {
    let region = vars.get("region")?;
    let mut values = Map::new();
    values.insert("bucket".into(), json!(format!("state-{}", region)));
    Ok(values)
}

fn render_env_bucket(vars: &VariableProxy<'_, Resolver<'_>>) -> Result<Map<String, Value>> {
    let environment = vars.get("environment")?;
    let mut values = Map::new();
    values.insert(
        "bucket".into(),
        json!(format!("{}-state", environment.as_str().unwrap_or_default())),
    );
    Ok(values)
}

#[test]
fn test_generated_values_match_files_on_disk() {
    let ws = stack();
    let driver = RenderingDriver::new(
        ws.root().to_path_buf(),
        vec![
            RenderJob {
                output: "bucket.auto.tfvars.json",
                provides: &["bucket"],
                render: render_bucket,
            },
            RenderJob {
                output: "terraform.tfvars.json",
                provides: &["tags"],
                render: render_defaults,
            },
        ],
    );
    let context = ws
        .context()
        .with_environment([("TF_VAR_environment", "staging")]);
    let resolver =
        Resolver::new(context.clone(), &driver).with_files_to_create(driver.files_to_create());

    assert!(resolver.waiting_for("terraform.tfvars.json").unwrap());
    assert!(resolver.waiting_for("bucket.auto.tfvars.json").unwrap());
    assert!(!resolver.defaults_allowed());

    // The bucket job reads `tags`, which runs the other job from inside it.
    assert_eq!(
        resolver.get("bucket", "test").unwrap(),
        json!("staging-tfvars-state")
    );
    assert!(resolver.defaults_allowed());
    assert!(ws.exists("terraform.tfvars.json"));
    assert_eq!(
        resolver.get("tags", "test").unwrap(),
        json!({"env": "staging", "managed_by": "tfvars"})
    );

    let from_disk = Resolver::new(context, &NoJobs);
    for name in ["environment", "region", "bucket", "tags"] {
        assert_eq!(
            from_disk.get(name, "test").unwrap(),
            resolver.get(name, "test").unwrap(),
            "{name} differs between generation and disk"
        );
    }
}

#[test]
fn test_reading_default_before_generation_fails() {
    let ws = stack();
    let driver = RenderingDriver::new(
        ws.root().to_path_buf(),
        vec![RenderJob {
            output: "bucket.auto.tfvars.json",
            provides: &["bucket"],
            render: render_regional_bucket,
        }],
    );
    let resolver = Resolver::new(ws.context(), &driver).with_files_to_create(driver.files_to_create());

    let err = resolver.get("bucket", "test").unwrap_err();

    assert_eq!(
        err.to_string(),
        "bucket.auto.tfvars.json.py cannot access var.region because it has no value"
    );
    assert!(!ws.exists("bucket.auto.tfvars.json"));
}

#[test]
fn test_command_line_value_is_protected_from_generation() {
    let ws = stack();
    let driver = RenderingDriver::new(
        ws.root().to_path_buf(),
        vec![RenderJob {
            output: "bucket.auto.tfvars.json",
            provides: &["bucket"],
            render: render_env_bucket,
        }],
    );
    let context = ws
        .context()
        .with_environment([("TF_VAR_environment", "prod")])
        .with_args(["plan", "-var=bucket=fixed"]);
    let resolver = Resolver::new(context, &driver).with_files_to_create(driver.files_to_create());

    let err = resolver.get("bucket", "test").unwrap_err();

    assert!(matches!(err, Error::NotConsistent { .. }));
    assert!(err.to_string().starts_with("bucket.auto.tfvars.json cannot set var.bucket="));
}

#[test]
fn test_clean_then_reload_forgets_generated_values() {
    let ws = stack();
    ws.write("terraform.tfvars.json", r#"{"bucket": "old"}"#);
    let context = ws
        .context()
        .with_environment([("TF_VAR_environment", "dev")]);

    let before = Resolver::new(context.clone(), &NoJobs);
    assert_eq!(before.get("bucket", "test").unwrap(), json!("old"));

    let deleted = tfvars_fs::delete_files(ws.root(), &["*.tfvars.json"], &[] as &[&str]).unwrap();
    assert_eq!(deleted, vec![ws.path("terraform.tfvars.json")]);

    let after = Resolver::new(context, &NoJobs);
    assert!(matches!(
        after.get("bucket", "test"),
        Err(Error::NotPopulated { .. })
    ));
}
