//! Session errors: the account or site a feature needs is not available.

use thiserror::Error;

use crate::traits::AccountStoreError;

#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// No default WordPress.com account is signed in.
    #[error("no default WordPress.com account")]
    NoDefaultAccount,

    /// The account has no primary blog and no blog was given.
    #[error("no site id available for the current account")]
    NoSiteId,

    /// The account has no usable API token.
    #[error("account has no auth token")]
    MissingToken,

    /// The account store could not be read or written.
    #[error("account store error: {0}")]
    Store(#[from] AccountStoreError),
}

impl SessionError {
    pub fn user_message(&self) -> String {
        match self {
            SessionError::NoDefaultAccount | SessionError::MissingToken => {
                "You need to sign in to a WordPress.com account.".to_string()
            }
            SessionError::NoSiteId => "No site selected for this account.".to_string(),
            SessionError::Store(err) => format!("Could not read saved accounts: {}", err),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::NoDefaultAccount => "E_SESSION_NO_ACCOUNT",
            SessionError::NoSiteId => "E_SESSION_NO_SITE",
            SessionError::MissingToken => "E_SESSION_NO_TOKEN",
            SessionError::Store(_) => "E_SESSION_STORE",
        }
    }
}
