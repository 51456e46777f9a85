//! Tracing setup
//!
//! The TUI owns the terminal, so interactive sessions log to a daily
//! rotated file under the data dir. CLI commands log to stderr.

use anyhow::Result;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter from the verbosity count, unless RUST_LOG is set
fn filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "warn",
        1 => "info,hyper=warn,reqwest=warn",
        2 => "debug,hyper=warn",
        _ => "trace",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Log to stderr (CLI mode)
pub fn init_stderr(verbose: u8) -> Result<()> {
    let layer = fmt::layer().with_writer(io::stderr).with_target(false);
    Registry::default()
        .with(filter(verbose))
        .with(layer)
        .try_init()?;
    Ok(())
}

/// Log to `<dir>/cinetui.log.<date>` (TUI mode)
///
/// The returned guard flushes the writer when dropped; keep it alive for the
/// whole session.
pub fn init_file(dir: &Path, verbose: u8) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::new(Rotation::DAILY, dir, "cinetui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer().with_writer(writer).with_ansi(false);
    Registry::default()
        .with(filter(verbose.max(1)))
        .with(layer)
        .try_init()?;
    Ok(guard)
}
