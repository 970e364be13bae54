//! Account predicates, the diagnostic account tree, and sign-out.

use tracing::info;

use crate::error::SessionError;
use crate::models::{Account, AccountSnapshot, Blog};
use crate::traits::{AccountStore, LogoutHooks};

const NO_BLOGS: &str = "No account/blogs configured on device";
const SELF_HOSTED: &str = "<Self-Hosted>";

/// Helpers over the accounts and blogs saved on the device.
///
/// Every call reads the store afresh; nothing is cached between calls.
pub struct AccountHelper<S> {
    store: S,
}

impl<S: AccountStore> AccountHelper<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn snapshot(&self) -> Result<AccountSnapshot, SessionError> {
        Ok(self.store.load().await?)
    }

    /// A default WordPress.com account is signed in.
    pub async fn is_dotcom_available(&self) -> Result<bool, SessionError> {
        Ok(is_dotcom_available(&self.snapshot().await?))
    }

    /// Signed in to WordPress.com, or at least one self-hosted site is set up.
    pub async fn is_logged_in(&self) -> Result<bool, SessionError> {
        Ok(is_logged_in(&self.snapshot().await?))
    }

    /// Neither self-hosted nor Jetpack sites are set up.
    pub async fn no_self_hosted_blogs(&self) -> Result<bool, SessionError> {
        Ok(no_self_hosted_blogs(&self.snapshot().await?))
    }

    pub async fn has_blogs(&self) -> Result<bool, SessionError> {
        Ok(has_blogs(&self.snapshot().await?))
    }

    /// Log the account/blog tree at info level and return it.
    pub async fn log_blogs_and_accounts(&self) -> Result<String, SessionError> {
        let description = describe_blogs_and_accounts(&self.snapshot().await?);
        info!("{}", description);
        Ok(description)
    }

    /// Remove the default account and the blogs it owns.
    ///
    /// Reminders are unscheduled only for the removed blogs, then every other
    /// hook runs. Returns the removed account, `None` when nobody was signed
    /// in (the hooks still run).
    pub async fn log_out_default_account(
        &self,
        hooks: &dyn LogoutHooks,
    ) -> Result<Option<Account>, SessionError> {
        let mut snapshot = self.snapshot().await?;
        let removed = snapshot.default_account.take();

        if let Some(account) = &removed {
            let (owned, kept): (Vec<Blog>, Vec<Blog>) = snapshot
                .blogs
                .into_iter()
                .partition(|blog| blog.account_user_id == Some(account.user_id));
            snapshot.blogs = kept;

            hooks.unschedule_reminders(&owned);
            self.store.save(&snapshot).await?;
            info!(
                "Signed out {} and removed {} blog(s)",
                account.log_description(),
                owned.len()
            );
        }

        hooks.reset_dashboard_state();
        hooks.delete_pending_notifications();
        hooks.clear_search_index();
        hooks.clear_widget_data();

        Ok(removed)
    }
}

pub fn is_dotcom_available(snapshot: &AccountSnapshot) -> bool {
    snapshot.default_account.is_some()
}

pub fn no_self_hosted_blogs(snapshot: &AccountSnapshot) -> bool {
    snapshot.blog_count_self_hosted() == 0 && !snapshot.has_any_jetpack_blogs()
}

pub fn is_logged_in(snapshot: &AccountSnapshot) -> bool {
    !(no_self_hosted_blogs(snapshot) && !is_dotcom_available(snapshot))
}

pub fn has_blogs(snapshot: &AccountSnapshot) -> bool {
    !snapshot.blogs.is_empty()
}

/// Render the diagnostic account tree.
///
/// ```text
/// wp.com account: <Account username: sam ID: 1> + 1 others
/// All accounts and blogs:
/// <Account username: sam ID: 1> (default)
/// └─ <Blog Name: ... >
/// ```
///
/// Groups appear default account first, then the other accounts in order,
/// then self-hosted sites. Accounts without blogs are left out.
pub fn describe_blogs_and_accounts(snapshot: &AccountSnapshot) -> String {
    let account_count = snapshot.number_of_accounts();
    let others = if account_count > 1 {
        format!(" + {} others", account_count - 1)
    } else {
        String::new()
    };
    let default_description = snapshot
        .default_account
        .as_ref()
        .map_or_else(|| "<none>".to_string(), Account::log_description);

    let mut groups = Vec::new();
    let accounts = snapshot
        .default_account
        .iter()
        .map(|account| (account, true))
        .chain(snapshot.other_accounts.iter().map(|account| (account, false)));
    for (account, is_default) in accounts {
        let blogs: Vec<&Blog> = snapshot.blogs_for_account(account.user_id).collect();
        if blogs.is_empty() {
            continue;
        }
        let heading = if is_default {
            format!("{} (default)", account.log_description())
        } else {
            account.log_description()
        };
        groups.push(blog_group(heading, &blogs));
    }

    // Blogs owned by an account that is not saved anymore count as self-hosted.
    let orphaned: Vec<&Blog> = snapshot
        .blogs
        .iter()
        .filter(|blog| match blog.account_user_id {
            None => true,
            Some(owner) => !account_is_known(snapshot, owner),
        })
        .collect();
    if !orphaned.is_empty() {
        groups.push(blog_group(SELF_HOSTED.to_string(), &orphaned));
    }

    let tree = if groups.is_empty() {
        NO_BLOGS.to_string()
    } else {
        groups.join("\n")
    };

    format!(
        "wp.com account: {}{}\nAll accounts and blogs:\n{}",
        default_description, others, tree
    )
}

fn account_is_known(snapshot: &AccountSnapshot, user_id: i64) -> bool {
    snapshot
        .default_account
        .iter()
        .chain(snapshot.other_accounts.iter())
        .any(|account| account.user_id == user_id)
}

fn blog_group(heading: String, blogs: &[&Blog]) -> String {
    let lines: Vec<String> = blogs
        .iter()
        .map(|blog| format!("└─ {}", blog.log_description()))
        .collect();
    format!("{}\n{}", heading, lines.join("\n"))
}
