//! Unified error type for the crate.
//!
//! `InsightsError` wraps the two failure kinds a feature can hit (network or
//! decoding, and a missing session) plus configuration problems raised by
//! the binary.

use std::fmt;

use super::category::ErrorCategory;
use super::network::NetworkError;
use super::session::SessionError;

#[derive(Debug, Clone)]
pub enum InsightsError {
    /// Network or decoding errors from the REST API.
    Network(NetworkError),

    /// Missing account, site or token.
    Session(SessionError),

    /// Invalid configuration value.
    Config { key: String, message: String },
}

impl InsightsError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            InsightsError::Network(err) => match err {
                NetworkError::HttpStatus { status, .. } if *status >= 500 => ErrorCategory::Server,
                NetworkError::HttpStatus { status: 401, .. } => ErrorCategory::Session,
                NetworkError::InvalidResponse { .. } => ErrorCategory::Server,
                NetworkError::InvalidUrl { .. } => ErrorCategory::Configuration,
                _ => ErrorCategory::Network,
            },
            InsightsError::Session(_) => ErrorCategory::Session,
            InsightsError::Config { .. } => ErrorCategory::Configuration,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            InsightsError::Network(err) => err.is_retryable(),
            InsightsError::Session(_) | InsightsError::Config { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            InsightsError::Network(err) => err.user_message(),
            InsightsError::Session(err) => err.user_message(),
            InsightsError::Config { key, message } => {
                format!("Invalid setting {}: {}", key, message)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            InsightsError::Network(err) => err.error_code(),
            InsightsError::Session(err) => err.error_code(),
            InsightsError::Config { .. } => "E_CONFIG",
        }
    }

    /// Shorthand for a configuration error.
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        InsightsError::Config {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for InsightsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightsError::Network(err) => write!(f, "{}", err),
            InsightsError::Session(err) => write!(f, "{}", err),
            InsightsError::Config { key, message } => write!(f, "invalid {}: {}", key, message),
        }
    }
}

impl std::error::Error for InsightsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InsightsError::Network(err) => Some(err),
            InsightsError::Session(err) => Some(err),
            InsightsError::Config { .. } => None,
        }
    }
}

impl From<NetworkError> for InsightsError {
    fn from(err: NetworkError) -> Self {
        InsightsError::Network(err)
    }
}

impl From<SessionError> for InsightsError {
    fn from(err: SessionError) -> Self {
        InsightsError::Session(err)
    }
}

impl From<serde_json::Error> for InsightsError {
    fn from(err: serde_json::Error) -> Self {
        InsightsError::Network(err.into())
    }
}
