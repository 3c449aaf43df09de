//! File logging for fidx.
//!
//! The terminal is in raw mode while fidx runs, so log output goes to
//! `<cache dir>/fidx/fidx.log` through a non-blocking writer. The filter is read from
//! the `FIDX_LOG` environment variable (same syntax as `RUST_LOG`) and defaults to `info`.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use std::fs;
use std::path::PathBuf;

pub const LOG_ENV: &str = "FIDX_LOG";
pub const LOG_FILE: &str = "fidx.log";

/// Directory the log file is written to.
pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("fidx")
}

/// Installs the global subscriber.
///
/// Returns the guard that flushes the writer on drop; keep it alive for the whole run.
/// Any failure leaves fidx running without logs.
pub fn init() -> Option<WorkerGuard> {
    let dir = log_dir();
    if let Err(e) = fs::create_dir_all(&dir) {
        eprintln!("[fidx] logging disabled: {}", e);
        return None;
    }
    let appender = match RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(LOG_FILE)
        .build(&dir)
    {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("[fidx] logging disabled: {}", e);
            return None;
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .ok()?;

    Some(guard)
}
