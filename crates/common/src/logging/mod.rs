//! Logging subsystem built on `tracing-subscriber`.

mod manager;
mod types;

pub use manager::{init, LoggingError};
pub use types::{ConsoleConfig, FileLoggingConfig, LoggerConfig};

// Re-export tracing-appender types for convenience
pub use tracing_appender::rolling::Rotation;
