//! Tracing subscriber setup.
//!
//! CLI subcommands log to stderr. The TUI owns the terminal, so it logs to
//! `logs/dash.log` instead. The level comes from `RUST_LOG` (default `info`).

use std::fs::{OpenOptions, create_dir_all};
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::AppError;

const DEFAULT_FILTER: &str = "info";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    pub fn tui_default() -> Self {
        LogTarget::File(PathBuf::from("logs").join("dash.log"))
    }
}

pub fn init(target: &LogTarget) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    let result = match target {
        LogTarget::Stderr => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogTarget::File(path) => {
            if let Some(dir) = path.parent() {
                create_dir_all(dir).map_err(|e| {
                    AppError::runtime(format!("Cannot create log directory '{}': {e}", dir.display()))
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AppError::runtime(format!("Cannot open log file '{}': {e}", path.display())))?;
            registry
                .with(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
                .try_init()
        }
    };

    result.map_err(|e| AppError::runtime(format!("Failed to initialize logging: {e}")))
}
