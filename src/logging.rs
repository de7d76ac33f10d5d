//! Logging setup.
//!
//! The terminal belongs to the UI while it runs, so events go to a log file
//! in the data directory instead of stderr.

use std::{
    fs::{self, File, OpenOptions},
    path::Path,
    sync::Mutex,
};

use tracing::{debug, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

pub const LOG_FILE: &str = "flashcards.log";

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Info and above.
    #[default]
    Normal,
    /// Debug and above.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// `-q` wins over any number of `-v`.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Trace,
        }
    }

    pub fn to_level(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

fn open_log(dir: &Path) -> Result<File> {
    fs::create_dir_all(dir).map_err(|e| Error::storage(dir, e))?;
    let path = dir.join(LOG_FILE);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| Error::storage(path, e))
}

/// Send log events to `<dir>/flashcards.log`. `RUST_LOG` overrides the
/// verbosity-derived filter. If a global subscriber is already installed
/// it stays in place and the new one is dropped.
pub fn init_logging(dir: &Path, verbosity: Verbosity) -> Result<()> {
    let file = open_log(dir)?;
    let default_filter = format!("flashcards={}", verbosity.to_level());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true),
    );
    if let Err(e) = subscriber.try_init() {
        debug!(error = %e, "subscriber already installed, keeping it");
    }
    Ok(())
}

/// Stderr logging for non-interactive commands.
pub fn init_stderr_logging(verbosity: Verbosity) {
    let default_filter = format!("flashcards={}", verbosity.to_level());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));
    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if let Err(e) = installed {
        debug!(error = %e, "subscriber already installed, keeping it");
    }
}
