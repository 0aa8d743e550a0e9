use std::collections::TryReserveError;

use strum::IntoStaticStr;
use thiserror::Error;

/// Title of the alert shown for every fatal launch error
pub const ERROR_TITLE: &str = "Porcupine cannot start";

/// Exit status used for every fatal launch error
pub const EXIT_FAILURE: i32 = 1;

/// Everything that can stop the launcher before the runtime takes over.
///
/// None of these are recoverable: the caller reports the error and exits
/// with [`EXIT_FAILURE`].
#[derive(Debug, Error, IntoStaticStr)]
pub enum LaunchError {
    #[error("GetModuleFileNameW(NULL, ...) failed: {0}")]
    OwnPathResolution(String),
    #[error("allocating memory failed")]
    Allocation(#[from] TryReserveError),
    #[error("can't find {target}: {path} is not nested {required} directories deep")]
    PathMalformed {
        path: String,
        required: usize,
        target: &'static str,
    },
    #[error("Can't load {library}: {source}")]
    LibraryLoad {
        library: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Can't find {symbol}() in {library}")]
    SymbolResolution { symbol: String, library: String },
    /// `index` is the slot in the argument vector handed to the runtime, so
    /// the first pass-through argument is slot 2
    #[error("argument vector slot {index} contains a NUL character")]
    ArgumentEncoding { index: usize },
    #[error("{count} arguments do not fit in an argument vector")]
    ArgumentCount { count: usize },
    #[error("Porcupine's launcher only runs on Windows, not {0}")]
    UnsupportedPlatform(&'static str),
}

impl LaunchError {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}
