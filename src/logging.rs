//! # Logging
//!
//! The terminal belongs to the calculator, so logs go to the file named by
//! `CALCLINE_LOG_FILE`. Without it no subscriber is installed.

use crate::config::{LOG_FILE_ENV_VAR, LOG_LEVEL_ENV_VAR};
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

/// Crates that are too chatty below warn
const QUIET_CRATES: [&str; 5] = ["hyper", "hyper_util", "reqwest", "rustls", "h2"];

/// Level used when `CALCLINE_LOG_LEVEL` is not set
fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "error"
    }
}

/// Build the filter from `CALCLINE_LOG_LEVEL`, falling back to the default level
pub fn build_env_filter(verbose: bool) -> Result<EnvFilter> {
    let mut filter = EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    for name in QUIET_CRATES {
        filter = filter.add_directive(format!("{name}=warn").parse()?);
    }
    Ok(filter)
}

/// Log file requested through the environment, if any
pub fn log_file_path() -> Option<PathBuf> {
    std::env::var_os(LOG_FILE_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(|value| PathBuf::from(shellexpand::tilde(&value.to_string_lossy()).into_owned()))
}

/// Install the tracing subscriber; returns whether logging is enabled
pub fn init_tracing_subscriber(verbose: bool) -> Result<bool> {
    let Some(path) = log_file_path() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file '{}'", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(verbose)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    tracing::info!("Logging to {}", path.display());
    Ok(true)
}
