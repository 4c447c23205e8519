//! Logging setup
//!
//! `RUST_LOG` wins when set. Otherwise the configured level applies to this
//! crate and dependencies are held at `warn`.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {error}")]
    Filter { filter: String, error: String },

    #[error("Failed to open log file {path:?}: {error}")]
    File { path: PathBuf, error: String },

    #[error("Logger already initialised: {0}")]
    Init(String),
}

/// Directive string for a configured level
///
/// A bare level such as `debug` is scoped to this crate; anything that
/// already looks like a directive list is used as is.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("booping={},warn", level)
    }
}

/// Install the global subscriber. Logs go to stderr unless a file is set,
/// keeping stdout for the client's own output.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = filter_directives(&config.level);
            EnvFilter::try_new(&directives).map_err(|e| LoggingError::Filter {
                filter: directives,
                error: e.to_string(),
            })?
        }
    };

    let (writer, ansi) = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LoggingError::File {
                    path: PathBuf::from(path),
                    error: e.to_string(),
                })?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init()
    };

    result.map_err(|e| LoggingError::Init(e.to_string()))
}
