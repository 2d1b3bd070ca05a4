//! Source-ordered resolver
//!
//! Wraps a [`VariableStore`] with Terraform's load order and with waiting
//! for value files that a generation job has not produced yet.
//!
//! While any such file is outstanding, defaults are switched off: a
//! variable that only has a default might still receive a value from the
//! missing file, so reading the default now could give the wrong answer.
//! Reads fail with [`Error::NotPopulated`] instead until the job driver
//! reports the file with [`Resolver::file_created`].
//!
//! Every method takes `&self`. A [`JobDriver`] runs inside
//! [`Resolver::get`] and may call back into the same resolver, so state
//! lives in cells whose borrows never span a driver call.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde_json::Value;

use crate::args::VarFlag;
use crate::classify::FileKind;
use crate::context::LoadContext;
use crate::error::{Error, Result};
use crate::extract::{Extractor, FileExtractor};
use crate::job::JobDriver;
use crate::proxy::{VariableProxy, VariableSource};
use crate::store::VariableStore;
use crate::variable::{Variable, VariableDefinition, VariableValue};

#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadState {
    NotLoaded,
    Loading,
    Loaded,
    /// Rendered error of the failed load, returned to every later caller.
    Failed(String),
}

#[derive(Debug, Default)]
struct Pending {
    created: BTreeSet<String>,
    waiting: BTreeSet<String>,
}

/// Variable store that loads Terraform's sources in precedence order.
pub struct Resolver<'d> {
    store: RefCell<VariableStore>,
    pending: RefCell<Pending>,
    load_state: RefCell<LoadState>,
    files_to_create: BTreeMap<String, PathBuf>,
    context: LoadContext,
    extractor: Box<dyn Extractor + 'd>,
    driver: &'d dyn JobDriver,
}

impl<'d> Resolver<'d> {
    /// A resolver reading files from disk, with nothing to generate.
    pub fn new(context: LoadContext, driver: &'d dyn JobDriver) -> Self {
        Self {
            store: RefCell::new(VariableStore::new()),
            pending: RefCell::new(Pending::default()),
            load_state: RefCell::new(LoadState::NotLoaded),
            files_to_create: BTreeMap::new(),
            context,
            extractor: Box::new(FileExtractor),
            driver,
        }
    }

    /// Register files that generation jobs will write into the working
    /// directory, keyed by file name, with the job that writes each one.
    pub fn with_files_to_create<I, K, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<PathBuf>,
    {
        self.files_to_create
            .extend(files.into_iter().map(|(name, job)| (name.into(), job.into())));
        self
    }

    pub fn with_extractor(mut self, extractor: impl Extractor + 'd) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn context(&self) -> &LoadContext {
        &self.context
    }

    pub fn files_to_create(&self) -> &BTreeMap<String, PathBuf> {
        &self.files_to_create
    }

    /// Add a definition or value after loading the Terraform sources.
    ///
    /// With `allow_change` false, a value that differs from one already
    /// set fails with [`Error::NotConsistent`] and the store is unchanged.
    pub fn add(&self, variable: impl Into<Variable>, allow_change: bool) -> Result<()> {
        self.load()?;
        let variable = variable.into();

        if !allow_change {
            if let Variable::Value(new) = &variable {
                let conflict = self
                    .store
                    .borrow()
                    .value(new.name())
                    .filter(|old| old.value() != new.value())
                    .cloned();
                if let Some(old) = conflict {
                    return Err(Error::NotConsistent {
                        old: Box::new(old),
                        new: Box::new(new.clone()),
                    });
                }
            }
        }

        self.insert(variable)
    }

    /// Resolve `name`, first letting the job driver run whatever it needs
    /// to run for it.
    pub fn get(&self, name: &str, consumer: &str) -> Result<Value> {
        self.load()?;
        self.driver.process_jobs(name, self)?;
        self.store.borrow().get(name, consumer)
    }

    /// Whether `name` can be read right now. Does not run jobs.
    pub fn contains(&self, name: &str) -> Result<bool> {
        self.load()?;
        Ok(self.store.borrow().contains(name))
    }

    /// Record that a generated file now exists.
    pub fn file_created(&self, name: impl Into<String>) {
        let name = name.into();
        let mut pending = self.pending.borrow_mut();
        pending.waiting.remove(&name);
        tracing::debug!(file = %name, "Generated file created");
        pending.created.insert(name);
        if pending.waiting.is_empty() {
            self.store.borrow_mut().enable_defaults();
        }
    }

    /// Whether loading is still waiting on the generated file `name`.
    pub fn waiting_for(&self, name: &str) -> Result<bool> {
        self.load()?;
        Ok(self.pending.borrow().waiting.contains(name))
    }

    pub fn defaults_allowed(&self) -> bool {
        self.store.borrow().defaults_allowed()
    }

    /// Every name that has a definition or a value, sorted.
    pub fn names(&self) -> Result<Vec<String>> {
        self.load()?;
        Ok(self.store.borrow().names())
    }

    pub fn definition(&self, name: &str) -> Result<Option<VariableDefinition>> {
        self.load()?;
        Ok(self.store.borrow().definition(name).cloned())
    }

    pub fn value(&self, name: &str) -> Result<Option<VariableValue>> {
        self.load()?;
        Ok(self.store.borrow().value(name).cloned())
    }

    /// A read-only view that labels every error with `consumer`.
    pub fn proxy(&self, consumer: impl Into<String>) -> VariableProxy<'_, Self> {
        VariableProxy::new(self, consumer)
    }

    /// Load every Terraform source, lowest precedence first.
    ///
    /// Runs at most once. Calls made while the load is running return
    /// immediately. If the load fails, the first caller gets the error and
    /// every later call fails with [`Error::LoadFailed`].
    pub fn load(&self) -> Result<()> {
        let state = self.load_state.replace(LoadState::Loading);
        match state {
            LoadState::NotLoaded => {}
            LoadState::Loading | LoadState::Loaded => {
                *self.load_state.borrow_mut() = state;
                return Ok(());
            }
            LoadState::Failed(message) => {
                *self.load_state.borrow_mut() = LoadState::Failed(message.clone());
                return Err(Error::LoadFailed { message });
            }
        }

        match self.load_sources() {
            Ok(()) => {
                *self.load_state.borrow_mut() = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "Loading variables failed");
                *self.load_state.borrow_mut() = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    fn load_sources(&self) -> Result<()> {
        let working_dir = self.context.working_dir.as_path();
        let mut candidates: BTreeSet<String> =
            tfvars_fs::io::list_names(working_dir)?.into_iter().collect();
        candidates.extend(self.files_to_create.keys().cloned());

        let mut declarations = Vec::new();
        let mut default_files = Vec::new();
        let mut auto_files = Vec::new();
        for name in &candidates {
            match FileKind::of(name) {
                FileKind::Declaration => declarations.push(name.as_str()),
                FileKind::DefaultValues => default_files.push(name.as_str()),
                FileKind::Auto => auto_files.push(name.as_str()),
                FileKind::Other => {}
            }
        }

        tracing::debug!(count = declarations.len(), "Loading declarations");
        for name in declarations {
            if self.files_to_create.contains_key(name) {
                continue;
            }
            for definition in self.extractor.definitions(&working_dir.join(name))? {
                self.insert(definition)?;
            }
        }

        tracing::debug!(prefix = %self.context.env_prefix, "Loading environment values");
        for (name, key, value) in self.context.env_values() {
            self.insert(VariableValue::new(name, value, key))?;
        }

        tracing::debug!(count = default_files.len(), "Loading default value files");
        for name in default_files {
            self.read_or_wait(name)?;
        }

        tracing::debug!(count = auto_files.len(), "Loading auto value files");
        for name in auto_files {
            self.read_or_wait(name)?;
        }

        tracing::debug!("Loading command line values");
        for arg in &self.context.args {
            match VarFlag::parse(arg)? {
                Some(VarFlag::Var { name, value, raw }) => {
                    self.insert(VariableValue::new(name, value, raw))?;
                }
                Some(VarFlag::VarFile(file)) => self.load_var_file(&file)?,
                None => {}
            }
        }

        Ok(())
    }

    fn read_or_wait(&self, name: &str) -> Result<()> {
        if self.files_to_create.contains_key(name) {
            self.wait_for(name);
            return Ok(());
        }
        for value in self
            .extractor
            .values(&self.context.working_dir.join(name))?
        {
            self.insert(value)?;
        }
        Ok(())
    }

    fn load_var_file(&self, file: &Path) -> Result<()> {
        let working_dir = normalize(&self.context.working_dir);
        let path = normalize(&working_dir.join(file));

        let in_working_dir = path.parent() == Some(working_dir.as_path());
        let generated = path
            .file_name()
            .and_then(|name| name.to_str())
            .filter(|name| in_working_dir && self.files_to_create.contains_key(*name));
        if let Some(name) = generated {
            self.wait_for(name);
            return Ok(());
        }

        for variable in self.extractor.extract(&path)? {
            self.insert(variable)?;
        }
        Ok(())
    }

    fn wait_for(&self, name: &str) {
        let mut pending = self.pending.borrow_mut();
        if pending.created.contains(name) {
            return;
        }
        tracing::debug!(file = name, "Waiting for generated file, defaults disabled");
        pending.waiting.insert(name.to_string());
        self.store.borrow_mut().disable_defaults();
    }

    fn insert(&self, variable: impl Into<Variable>) -> Result<()> {
        self.store.borrow_mut().add(variable)
    }
}

impl VariableSource for Resolver<'_> {
    fn contains(&self, name: &str) -> Result<bool> {
        Resolver::contains(self, name)
    }

    fn get(&self, name: &str, consumer: &str) -> Result<Value> {
        Resolver::get(self, name, consumer)
    }
}

impl fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("store", &self.store)
            .field("pending", &self.pending)
            .field("load_state", &self.load_state.borrow())
            .field("files_to_create", &self.files_to_create)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(Component::ParentDir),
            },
            other => normalized.push(other),
        }
    }
    normalized
}
