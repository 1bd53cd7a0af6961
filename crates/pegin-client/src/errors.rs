use std::fmt::Display;

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{operation} failed: {message}")]
    Upstream {
        operation: &'static str,
        message: String,
    },

    #[error("malformed {operation} response: {message}")]
    Malformed {
        operation: &'static str,
        message: String,
    },

    #[error("{0} backend is not configured")]
    MissingConfig(&'static str),

    #[error("invalid {backend} endpoint: {message}")]
    InvalidEndpoint {
        backend: &'static str,
        message: String,
    },
}

impl ClientError {
    /// Wraps a transport or RPC failure of `operation`, logging it.
    pub fn upstream(operation: &'static str, err: impl Display) -> Self {
        let message = err.to_string();
        warn!(%operation, %message, "upstream call failed");
        Self::Upstream { operation, message }
    }

    /// Wraps an undecodable response to `operation`, logging it.
    pub fn malformed(operation: &'static str, err: impl Display) -> Self {
        let message = err.to_string();
        warn!(%operation, %message, "malformed upstream response");
        Self::Malformed { operation, message }
    }

    pub fn invalid_endpoint(backend: &'static str, err: impl Display) -> Self {
        Self::InvalidEndpoint {
            backend,
            message: err.to_string(),
        }
    }
}
