use std::ffi::OsString;
use std::os::raw::c_int;

use widestring::U16CString;
use widestring::U16Str;

use crate::argument_vector::ArgumentVector;
use crate::config::LauncherConfig;
use crate::config::ENTRY_SYMBOL;
use crate::config::RUNTIME_LIBRARY;
use crate::error::LaunchError;
use crate::paths::LaunchPaths;
use crate::runtime::RuntimeLoader;

pub struct Launcher {
    config: LauncherConfig,
}

impl Launcher {
    #[must_use]
    pub const fn new(config: LauncherConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Runs the embedded runtime on the entry script next to `own_path`.
    ///
    /// `args` is the launcher's own argument list, slot 0 included. On success
    /// the return value is whatever the entry point returned, unmodified.
    #[tracing::instrument(skip_all)]
    pub fn launch<L, I>(&self, loader: &L, own_path: &U16Str, args: I) -> Result<c_int, LaunchError>
    where
        L: RuntimeLoader,
        I: IntoIterator<Item = OsString>,
    {
        let paths = LaunchPaths::derive(own_path)?;
        tracing::info!(
            own = %paths.own.to_string_lossy(),
            script = %paths.script.to_string_lossy(),
            interpreter = %paths.interpreter.to_string_lossy(),
            identity = %self.config.identity,
            "derived launch paths"
        );

        let library_name = U16CString::from_str_truncate(RUNTIME_LIBRARY);
        let library =
            loader
                .load_library(&library_name)
                .map_err(|source| LaunchError::LibraryLoad {
                    library: String::from(RUNTIME_LIBRARY),
                    source,
                })?;
        tracing::info!("loaded {RUNTIME_LIBRARY}");

        let entry_point = loader.entry_point(&library, ENTRY_SYMBOL).ok_or_else(|| {
            LaunchError::SymbolResolution {
                symbol: ENTRY_SYMBOL.to_string_lossy().into_owned(),
                library: String::from(RUNTIME_LIBRARY),
            }
        })?;

        let mut argv = ArgumentVector::new(
            paths.identity(self.config.identity),
            &paths.script,
            args.into_iter().skip(1),
        )?;
        tracing::trace!(?argv, "argument vector");

        // SAFETY: argv is a null-terminated table of argc valid wide strings
        // that outlives the call
        let status = unsafe { entry_point(argv.argc(), argv.as_mut_ptr()) };
        tracing::info!("{} returned {status}", ENTRY_SYMBOL.to_string_lossy());

        Ok(status)
    }
}
