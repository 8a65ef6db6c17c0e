//! Transport-level failures.

use thiserror::Error;

/// Errors that can occur while talking to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response was received (connection failure, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request could not be constructed or its response not decoded.
    #[error("Request error: {0}")]
    RequestConfig(String),
}

impl TransportError {
    /// The message supplied by the backend, if this is a server error.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TransportError::Server { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, TransportError::Network(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() || err.is_decode() {
            TransportError::RequestConfig(err.to_string())
        } else {
            // Timeouts, refused connections, and bodies cut off mid-transfer
            // all mean no usable response arrived.
            TransportError::Network(err.to_string())
        }
    }
}
