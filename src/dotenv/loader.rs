use std::path::{Path, PathBuf};

use log::{debug, trace};

use super::file::{self, ResolvedLocation};
use super::parse::is_valid_name;
use super::store::{EnvStore, ProcessEnv};
use super::vars::VariableSet;
use super::{DotenvError, SyntaxError};

/// Default variable naming the active application environment.
pub const DEFAULT_APP_ENV_NAME: &str = "APP_ENV";

/// Loads layered env files into an environment table.
///
/// Files are read in this order, later files overriding earlier ones
/// (`F` is the base file name, `.env` for a directory path):
///
/// 1. `F`
/// 2. `F.local`
/// 3. `F-<env>`
/// 4. `F-<env>.local`
///
/// `<env>` is the value of the application environment variable
/// (`APP_ENV` unless changed with [`with_app_env_name`](Self::with_app_env_name)),
/// taken from the environment table or from the base files. Layers 3 and 4 are
/// skipped when no value is found. Missing files are never an error.
///
/// Variables already defined in the environment are kept unless overwrite
/// mode is enabled.
///
/// ## Example
///
/// ```no_run
/// use dotenv_layers::{get_var, Dotenv};
///
/// Dotenv::from_path("config")
///     .with_app_env_name("APPLICATION_ENVIRONMENT")?
///     .with_overwrite(true)
///     .load()?;
///
/// let host = get_var("DB_HOST");
/// # Ok::<(), dotenv_layers::DotenvError>(())
/// ```
#[derive(Debug)]
#[must_use = "a loader does nothing until .load() is called"]
pub struct Dotenv<E: EnvStore = ProcessEnv> {
    path: Option<PathBuf>,
    app_env_name: String,
    overwrite: bool,
    store: E,
}

impl Dotenv<ProcessEnv> {
    /// Creates a loader with no base path, writing to the process environment.
    pub fn new() -> Self {
        Self::with_store(ProcessEnv)
    }

    /// Creates a loader for a base file or directory.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let mut loader = Self::new();
        loader.path = Some(path.as_ref().to_path_buf());
        loader
    }
}

impl Default for Dotenv<ProcessEnv> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EnvStore> Dotenv<E> {
    /// Creates a loader with no base path that reads and writes `store`.
    pub fn with_store(store: E) -> Self {
        Self {
            path: None,
            app_env_name: DEFAULT_APP_ENV_NAME.to_string(),
            overwrite: false,
            store,
        }
    }

    /// Sets the base path. It can be set only once.
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Result<Self, DotenvError> {
        if self.path.is_some() {
            return Err(DotenvError::PathAlreadySet);
        }
        self.path = Some(path.as_ref().to_path_buf());
        Ok(self)
    }

    /// Sets the variable that names the application environment.
    pub fn with_app_env_name(mut self, name: impl Into<String>) -> Result<Self, DotenvError> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(DotenvError::InvalidAppEnvName(SyntaxError::InvalidName(name)));
        }
        self.app_env_name = name;
        Ok(self)
    }

    /// Lets file values replace variables already present in the environment.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn app_env_name(&self) -> &str {
        &self.app_env_name
    }

    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn store(&self) -> &E {
        &self.store
    }

    pub fn into_store(self) -> E {
        self.store
    }

    /// Resolves the configured base path into a directory and base file name.
    pub fn resolve_location(&self) -> Result<ResolvedLocation, DotenvError> {
        let path = self.path.as_deref().ok_or(DotenvError::PathNotSet)?;
        ResolvedLocation::resolve(path)
    }

    /// Reads every layer and writes the merged result to the environment.
    ///
    /// Nothing is written unless all files resolve and parse.
    pub fn load(&mut self) -> Result<(), DotenvError> {
        let location = self.resolve_location()?;
        debug!(
            "loading env files '{}' from {}",
            location.file_name.to_string_lossy(),
            location.dir.display()
        );

        let mut vars = self.process_file_list(location.candidate_files(""))?;

        if let Some(app_env) = self.detect_app_env(&vars) {
            debug!("application environment '{}' = '{}'", self.app_env_name, app_env);
            let overlay = self.process_file_list(location.candidate_files(&app_env))?;
            vars.merge(overlay);
        } else {
            debug!("application environment '{}' not set", self.app_env_name);
        }

        self.write_vars(&vars);
        Ok(())
    }

    /// Picks the application environment from the base files or the table.
    ///
    /// The base files decide when the table has no value or overwrite is on.
    fn detect_app_env(&self, base: &VariableSet) -> Option<String> {
        let from_store = self
            .store
            .get(&self.app_env_name)
            .filter(|value| !value.is_empty());
        let from_files = base
            .get(&self.app_env_name)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        if from_store.is_none() || self.overwrite {
            from_files.or(from_store)
        } else {
            from_store
        }
    }

    /// Parses a single env file.
    pub fn process_file(&self, path: impl AsRef<Path>) -> Result<VariableSet, DotenvError> {
        file::process_file(path)
    }

    /// Parses env files in order and merges them, later files winning.
    pub fn process_file_list<I>(&self, paths: I) -> Result<VariableSet, DotenvError>
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        file::process_file_list(paths)
    }

    /// Writes `vars` to the environment table, honoring the overwrite flag.
    pub fn write_vars(&mut self, vars: &VariableSet) {
        for (name, value) in vars.iter() {
            if self.overwrite || !self.store.contains(name) {
                trace!("setting {name}");
                self.store.set(name, value);
            } else {
                trace!("keeping existing {name}");
            }
        }
    }

    /// Current value of `name` in the environment table, or `""`.
    pub fn var(&self, name: &str) -> String {
        self.store.get(name).unwrap_or_default()
    }
}
