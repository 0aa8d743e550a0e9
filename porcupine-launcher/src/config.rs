use std::ffi::CStr;
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

use strum::Display;
use strum::EnumString;
use tracing_subscriber::EnvFilter;

/// Shared library of the embedded runtime, found through the standard search order
pub const RUNTIME_LIBRARY: &str = "python3.dll";
/// Embedding entry point exported by [`RUNTIME_LIBRARY`]
pub const ENTRY_SYMBOL: &CStr = c"Py_Main";
/// Entry script, two directory levels above the launcher
pub const SCRIPT_NAME: &str = "launch.pyw";
/// Interpreter executable, next to the launcher
pub const INTERPRETER_NAME: &str = "python.exe";

pub const IDENTITY_VAR: &str = "PORCUPINE_LAUNCHER_IDENTITY";
pub const LOG_DIR_VAR: &str = "PORCUPINE_LAUNCHER_LOG_DIR";
pub const LOG_FILTER_VAR: &str = "PORCUPINE_LAUNCHER_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

/// Which path goes into slot 0 of the argument vector, i.e. what the embedded
/// runtime reports as `sys.executable`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IdentityPolicy {
    /// The launcher's own path
    Launcher,
    /// The sibling `python.exe`, so subprocesses started from `sys.executable`
    /// get a real interpreter
    #[default]
    Interpreter,
}

#[derive(Clone, Debug)]
pub struct LauncherConfig {
    pub identity: IdentityPolicy,
    pub log_directory: Option<PathBuf>,
    pub log_filter: String,
    warnings: Vec<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            identity: IdentityPolicy::default(),
            log_directory: None,
            log_filter: String::from(DEFAULT_LOG_FILTER),
            warnings: vec![],
        }
    }
}

impl LauncherConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Builds the configuration from `lookup`, which maps a variable name to
    /// its value. Invalid values never fail: they fall back to the default and
    /// leave a warning behind, because logging is not set up yet at this point.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(IDENTITY_VAR) {
            let value = value.to_string_lossy();
            match IdentityPolicy::from_str(value.trim()) {
                Ok(identity) => config.identity = identity,
                Err(_) => config.warnings.push(format!(
                    "${IDENTITY_VAR} is set to '{value}', which is not one of 'launcher' or 'interpreter', using '{}'",
                    config.identity
                )),
            }
        }

        if let Some(value) = lookup(LOG_DIR_VAR) {
            let directory = PathBuf::from(&value);
            if directory.is_dir() {
                config.log_directory = Some(directory);
            } else {
                config.warnings.push(format!(
                    "${LOG_DIR_VAR} is set to '{}', which is not a valid directory",
                    directory.display()
                ));
            }
        }

        if let Some(value) = lookup(LOG_FILTER_VAR) {
            let value = value.to_string_lossy();
            match EnvFilter::try_new(&*value) {
                Ok(_) => config.log_filter = value.into_owned(),
                Err(error) => config.warnings.push(format!(
                    "${LOG_FILTER_VAR} is set to '{value}', which is not a valid filter ({error}), using '{DEFAULT_LOG_FILTER}'"
                )),
            }
        }

        config
    }

    /// Directory the log file goes into
    #[must_use]
    pub fn log_directory(&self) -> PathBuf {
        self.log_directory
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
