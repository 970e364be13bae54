//! Error handling for site insights.
//!
//! - **Error Categories**: coarse classification for handling decisions
//! - **Domain errors**: [`NetworkError`] for REST calls, [`SessionError`] for
//!   a missing account or site
//! - **Unified Error Type**: [`InsightsError`] with [`InsightsResult<T>`]
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout | Yes |
//! | Server | 5xx, undecodable payload | Yes |
//! | Session | No account / site / token | No |
//! | Configuration | Bad setting | No |

mod category;
mod insights_error;
mod network;
mod result;
mod session;

pub use category::ErrorCategory;
pub use insights_error::InsightsError;
pub use network::NetworkError;
pub use result::InsightsResult;
pub use session::SessionError;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_error_unification() {
        let net_err: InsightsError = NetworkError::Timeout {
            url: "https://example.com".to_string(),
        }
        .into();
        let session_err: InsightsError = SessionError::NoDefaultAccount.into();
        let config_err = InsightsError::config("SITE_INSIGHTS_CARDS", "unknown card");

        assert_eq!(net_err.category(), ErrorCategory::Network);
        assert_eq!(session_err.category(), ErrorCategory::Session);
        assert_eq!(config_err.category(), ErrorCategory::Configuration);

        for err in [&net_err, &session_err, &config_err] {
            assert!(!err.error_code().is_empty());
            assert!(!err.user_message().is_empty());
        }
    }

    #[test]
    fn test_http_status_categories() {
        let server: InsightsError = NetworkError::HttpStatus {
            status: 503,
            message: "unavailable".to_string(),
        }
        .into();
        assert_eq!(server.category(), ErrorCategory::Server);
        assert!(server.is_retryable());

        let unauthorized: InsightsError = NetworkError::HttpStatus {
            status: 401,
            message: "unauthorized".to_string(),
        }
        .into();
        assert_eq!(unauthorized.category(), ErrorCategory::Session);
        assert!(!unauthorized.is_retryable());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: InsightsError = json_err.into();
        assert!(matches!(
            err,
            InsightsError::Network(NetworkError::InvalidResponse { .. })
        ));
        assert_eq!(err.category(), ErrorCategory::Server);
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;
        let err: InsightsError = SessionError::NoSiteId.into();
        assert!(err.source().is_some());
        assert!(InsightsError::config("k", "v").source().is_none());
    }
}
