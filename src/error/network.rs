//! Network-related error types.
//!
//! Errors raised while talking to the REST API: transport failures,
//! non-2xx statuses and payloads that do not decode.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { url: String },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// The response body could not be decoded.
    InvalidResponse { message: String },

    /// The request URL could not be built.
    InvalidUrl { url: String },

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Check if this error is likely transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::InvalidResponse { .. } => false,
            NetworkError::InvalidUrl { .. } => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Check if the server rejected the request as unauthenticated.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, NetworkError::HttpStatus { status: 401, .. })
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to connect to the server. Please check your internet connection."
                    .to_string()
            }
            NetworkError::Timeout { .. } => {
                "The request timed out. The server may be slow or unreachable.".to_string()
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                401 => "Authentication required. Please sign in again.".to_string(),
                403 => "You don't have permission to view stats for this site.".to_string(),
                404 => "The requested site was not found.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => {
                    "The server is experiencing issues. Please try again later.".to_string()
                }
                _ => format!("The server returned an error (HTTP {}).", status),
            },
            NetworkError::InvalidResponse { .. } => {
                "Received an invalid response from the server.".to_string()
            }
            NetworkError::InvalidUrl { url } => format!("Invalid request URL '{}'.", url),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::InvalidUrl { .. } => "E_NET_URL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }

    /// Attach the request URL to a transport-level error.
    pub fn from_http(err: HttpError, url: &str) -> Self {
        match err {
            HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
                url: url.to_string(),
                message,
            },
            HttpError::Timeout(_) => NetworkError::Timeout {
                url: url.to_string(),
            },
            HttpError::ServerError { status, message } => {
                NetworkError::HttpStatus { status, message }
            }
            HttpError::InvalidUrl(_) => NetworkError::InvalidUrl {
                url: url.to_string(),
            },
            HttpError::Io(message) | HttpError::Other(message) => NetworkError::Other { message },
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { url } => write!(f, "Request to '{}' timed out", url),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            NetworkError::InvalidUrl { url } => write!(f, "Invalid URL: {}", url),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        NetworkError::InvalidResponse {
            message: err.to_string(),
        }
    }
}
