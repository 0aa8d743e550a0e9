#![warn(clippy::all, clippy::nursery, clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

//! Native launcher for Porcupine.
//!
//! Given `<root>\Python\Porcupine.exe`, loads `python3.dll` and runs
//! `<root>\launch.pyw` through its `Py_Main`, reporting
//! `<root>\Python\python.exe` as the running executable.

pub mod argument_vector;
pub mod config;
pub mod error;
pub mod launcher;
pub mod paths;
pub mod runtime;
#[cfg(windows)]
pub mod windows_api;

pub use argument_vector::ArgumentVector;
pub use config::IdentityPolicy;
pub use config::LauncherConfig;
pub use error::LaunchError;
pub use error::ERROR_TITLE;
pub use error::EXIT_FAILURE;
pub use launcher::Launcher;
pub use paths::LaunchPaths;
pub use runtime::EntryPoint;
pub use runtime::RuntimeLoader;
#[cfg(windows)]
pub use windows_api::WindowsApi;
