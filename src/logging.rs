//! File logging
//!
//! The terminal belongs to the spinner and the styled messages, so log events
//! go to a daily JSON file in the data directory. `RUST_LOG` overrides the
//! verbosity flags.

use std::path::Path;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::output;

/// Install the global subscriber. Keep the guard alive until exit so buffered
/// events are flushed.
pub fn init(verbose: u8, quiet: bool, dir: &Path) -> WorkerGuard {
    let (writer, guard) = log_writer(dir);

    tracing_subscriber::registry()
        .with(fmt::layer().json().with_writer(writer).with_target(false))
        .with(env_filter(verbose, quiet))
        .init();

    guard
}

fn env_filter(verbose: u8, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level(verbose, quiet)))
}

fn level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

fn file_appender(dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("scaffold")
        .filename_suffix("log")
        .build(dir)
}

/// Daily log file writer. An unwritable log directory disables file logging
/// instead of aborting the command.
fn log_writer(dir: &Path) -> (NonBlocking, WorkerGuard) {
    match file_appender(dir) {
        Ok(appender) => tracing_appender::non_blocking(appender),
        Err(e) => {
            output::warning(&format!(
                "Logging disabled, cannot write to {}: {}",
                dir.display(),
                e
            ));
            tracing_appender::non_blocking(std::io::sink())
        }
    }
}
