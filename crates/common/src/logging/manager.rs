//! Logging initialization.

use std::io;

use thiserror::Error;
use tracing::{info, Level};
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{
    fmt::{layer, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use super::types::LoggerConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log file appender: {0}")]
    FileAppender(#[from] tracing_appender::rolling::InitError),

    #[error("global subscriber already set: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Builds the level filter, honoring `RUST_LOG` over `default_level`.
fn build_filter(default_level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy()
}

/// Initializes the global subscriber with the provided config.
pub fn init(config: LoggerConfig) -> Result<(), LoggingError> {
    let filt = build_filter(config.default_level);

    let console = &config.console_config;
    let writer = if console.use_stderr {
        BoxMakeWriter::new(io::stderr)
    } else {
        BoxMakeWriter::new(io::stdout)
    };

    // Configure console logging with JSON or compact format
    let console_sub = if console.json_format {
        layer()
            .json()
            .with_writer(writer)
            .with_span_events(console.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed()
    } else {
        layer()
            .compact()
            .with_writer(writer)
            .with_span_events(console.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed()
    };

    let file_layer = config
        .file_logging_config
        .as_ref()
        .map(|file_config| {
            let file_appender = RollingFileAppender::builder()
                .rotation(file_config.rotation.clone())
                .filename_prefix(&file_config.file_name_prefix)
                .build(&file_config.directory)?;

            let layer = if file_config.json_format {
                layer()
                    .json()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_filter(filt.clone())
                    .boxed()
            } else {
                layer()
                    .compact()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_filter(filt.clone())
                    .boxed()
            };
            Ok::<_, LoggingError>(layer)
        })
        .transpose()?;

    tracing_subscriber::registry()
        .with(console_sub)
        .with(file_layer)
        .try_init()?;

    info!(
        service_name = %config.service_name,
        json = config.console_config.json_format,
        file = ?config.file_logging_config.as_ref().map(|f| &f.directory),
        "logging initialized"
    );
    Ok(())
}

