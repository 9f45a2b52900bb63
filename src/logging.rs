//! Tracing setup.
//!
//! The terminal belongs to the user interface while the game runs, so log records only ever go to
//! the file named in the [`Config`]. The subscriber also carries an [`ErrorLayer`] so that error
//! reports include the span trace active when they were created.

use std::path::Path;

use color_eyre::eyre::{OptionExt as _, Result};
use tracing::info;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

use crate::config::Config;

/// Installs the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set and from [`Config::log_level`] otherwise.
///
/// # Errors
///
/// Fails when the log filter cannot be parsed, when the log file cannot be opened, or when a
/// global subscriber is already installed.
pub fn init(config: &Config) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let file_layer = match config.log_file.as_deref() {
        Some(path) => Some(
            fmt::layer()
                .with_writer(file_appender(path)?)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        log_file = ?config.log_file,
        "logging initialised"
    );

    Ok(())
}

/// Opens `path` for appending log records, creating missing parent directories.
fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_eyre("log file path has no valid file name")?;

    Ok(RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)?)
}
