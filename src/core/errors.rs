//! Custom error types for LibreTranslate operations

use thiserror::Error;

/// LibreTranslate-related errors
#[derive(Error, Debug)]
pub enum LibreTranslateError {
    /// Invalid or missing configuration, or the client was never registered
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What is wrong with the configuration
        message: String,
    },

    /// The remote service answered with a non-200 status
    #[error("{message} (Error Code: {code})")]
    ApiError {
        /// Error message reported by the remote service
        message: String,
        /// HTTP status code of the response
        code: u16,
    },

    /// Connection, DNS or timeout failure, passed through from reqwest
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    /// Caller input rejected before anything was sent
    #[error("Invalid request: {message}")]
    InvalidRequestError {
        /// Why the input was rejected
        message: String,
    },

    /// A 200 response whose body could not be parsed
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// Parser error
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl LibreTranslateError {
    /// Shorthand for a [`LibreTranslateError::ConfigError`]
    pub fn config(message: impl Into<String>) -> Self {
        LibreTranslateError::ConfigError {
            message: message.into(),
        }
    }

    /// Shorthand for a [`LibreTranslateError::InvalidRequestError`]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        LibreTranslateError::InvalidRequestError {
            message: message.into(),
        }
    }

    /// Status code reported by the remote service, if this is an API error
    pub fn code(&self) -> Option<u16> {
        match self {
            LibreTranslateError::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether the request failed because the configured timeout elapsed
    pub fn is_timeout(&self) -> bool {
        matches!(self, LibreTranslateError::TransportError(e) if e.is_timeout())
    }
}

impl From<config::ConfigError> for LibreTranslateError {
    fn from(err: config::ConfigError) -> Self {
        LibreTranslateError::config(err.to_string())
    }
}

/// Result type for LibreTranslate operations
pub type Result<T> = std::result::Result<T, LibreTranslateError>;
