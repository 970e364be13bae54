//! Account and blog records persisted on the device.

use serde::{Deserialize, Serialize};

/// A signed-in platform account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub user_id: i64,
    pub username: String,
    pub primary_blog_id: Option<i64>,
    /// OAuth bearer token for the REST API
    pub auth_token: Option<String>,
}

impl Account {
    /// One-line description for diagnostics. Never includes the token.
    pub fn log_description(&self) -> String {
        format!("<Account username: {} ID: {}>", self.username, self.user_id)
    }
}

/// A site known to the app, either owned by an account or self-hosted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub url: String,
    pub name: String,
    /// Remote site id on the hosted platform, absent for plain self-hosted sites
    pub dotcom_id: Option<i64>,
    /// Owning account, `None` for self-hosted sites
    pub account_user_id: Option<i64>,
    #[serde(default)]
    pub is_jetpack: bool,
}

impl Blog {
    pub fn is_self_hosted(&self) -> bool {
        self.account_user_id.is_none()
    }

    pub fn log_description(&self) -> String {
        let kind = if self.is_jetpack {
            "jetpack"
        } else if self.is_self_hosted() {
            "self-hosted"
        } else {
            "hosted"
        };
        match self.dotcom_id {
            Some(id) => format!("<Blog Name: {} URL: {} ID: {} ({})>", self.name, self.url, id, kind),
            None => format!("<Blog Name: {} URL: {} ({})>", self.name, self.url, kind),
        }
    }
}

/// Everything the account store persists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    /// The default hosted account, if signed in
    pub default_account: Option<Account>,
    #[serde(default)]
    pub other_accounts: Vec<Account>,
    #[serde(default)]
    pub blogs: Vec<Blog>,
}

impl AccountSnapshot {
    pub fn number_of_accounts(&self) -> usize {
        self.other_accounts.len() + usize::from(self.default_account.is_some())
    }

    pub fn blog_count_self_hosted(&self) -> usize {
        self.blogs.iter().filter(|b| b.is_self_hosted() && !b.is_jetpack).count()
    }

    pub fn has_any_jetpack_blogs(&self) -> bool {
        self.blogs.iter().any(|b| b.is_jetpack)
    }

    pub fn blogs_for_account(&self, user_id: i64) -> impl Iterator<Item = &Blog> {
        self.blogs
            .iter()
            .filter(move |b| b.account_user_id == Some(user_id))
    }
}
