//! Tracing setup.
//!
//! The terminal UI owns stdout, so log output goes to a file. `RUST_LOG`
//! overrides the default level.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::constants::LOG_FILE_NAME;

/// Default log file: `<config_dir>/aacboard.log`.
pub fn default_log_path() -> Result<PathBuf> {
    Ok(Config::config_dir()?.join(LOG_FILE_NAME))
}

/// Installs the global subscriber and returns the log file path.
///
/// Level is `info`, or `debug` with `verbose`, unless `RUST_LOG` is set.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<PathBuf> {
    let path = match log_file {
        Some(path) => path.to_path_buf(),
        None => default_log_path()?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context(format!(
            "Failed to create log directory: {}",
            parent.display()
        ))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context(format!("Failed to open log file: {}", path.display()))?;

    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(path)
}
