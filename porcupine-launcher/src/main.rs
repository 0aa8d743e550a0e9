#![warn(clippy::all, clippy::nursery, clippy::pedantic)]
#![windows_subsystem = "windows"]

use color_eyre::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use porcupine_launcher::LaunchError;
use porcupine_launcher::LauncherConfig;
use porcupine_launcher::ERROR_TITLE;
use porcupine_launcher::EXIT_FAILURE;

const LOG_FILE: &str = "porcupine-launcher.log";

fn setup(config: &LauncherConfig) -> Result<WorkerGuard> {
    color_eyre::install()?;

    // rolling::never panics when the file can't be created
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(config.log_directory())?;
    let (non_blocking, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_new(&config.log_filter)?;

    tracing::subscriber::set_global_default(
        tracing_subscriber::registry().with(filter).with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking)
                .with_ansi(false),
        ),
    )?;

    // https://github.com/tokio-rs/tracing/blob/master/examples/examples/panic_hook.rs
    // Record panics as `tracing` events at the `ERROR` verbosity level
    std::panic::set_hook(Box::new(|panic| {
        if let Some(location) = panic.location() {
            tracing::error!(
                message = %panic,
                panic.file = location.file(),
                panic.line = location.line(),
                panic.column = location.column(),
            );
        } else {
            tracing::error!(message = %panic);
        }
    }));

    Ok(guard)
}

#[cfg(windows)]
fn run(config: LauncherConfig) -> Result<i32, LaunchError> {
    use porcupine_launcher::Launcher;
    use porcupine_launcher::WindowsApi;

    let own_path = WindowsApi::module_file_name()?;
    Launcher::new(config).launch(&WindowsApi, &own_path, std::env::args_os())
}

#[cfg(not(windows))]
fn run(_config: LauncherConfig) -> Result<i32, LaunchError> {
    Err(LaunchError::UnsupportedPlatform(std::env::consts::OS))
}

#[cfg(windows)]
fn alert(message: &str) {
    porcupine_launcher::WindowsApi::error_message_box(ERROR_TITLE, message);
}

#[cfg(not(windows))]
fn alert(message: &str) {
    eprintln!("{ERROR_TITLE}: {message}");
}

/// Reports a fatal error to the user
fn report(error: &LaunchError) {
    tracing::error!(kind = error.kind(), "{error}");
    alert(&error.to_string());
}

/// Process exit status for the outcome of a launch, handing errors to `report`
fn exit_status(outcome: Result<i32, LaunchError>, report: impl FnOnce(&LaunchError)) -> i32 {
    match outcome {
        Ok(status) => status,
        Err(error) => {
            report(&error);
            EXIT_FAILURE
        }
    }
}

fn main() {
    let config = LauncherConfig::from_env();

    // the launcher still runs when the log file can't be set up
    let guard = setup(&config).ok();

    tracing::info!("porcupine-launcher {}", env!("CARGO_PKG_VERSION"));
    for warning in config.warnings() {
        tracing::warn!("{warning}");
    }

    let status = exit_status(run(config), report);

    // File logging worker guard has to be flushed before exiting
    drop(guard);
    std::process::exit(status);
}
