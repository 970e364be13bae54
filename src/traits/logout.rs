//! Hooks run when the default account signs out.

use crate::models::Blog;

/// Host state that depends on the signed-in account.
///
/// Every hook defaults to doing nothing so hosts implement only what they keep.
pub trait LogoutHooks: Send + Sync {
    /// Cancel blogging reminders scheduled for the account's blogs.
    ///
    /// Only the removed account's blogs are passed; reminders for
    /// self-hosted sites stay scheduled.
    fn unschedule_reminders(&self, _blogs: &[Blog]) {}

    /// Forget saved dashboard card states.
    fn reset_dashboard_state(&self) {}

    /// Delete pending local notifications.
    fn delete_pending_notifications(&self) {}

    /// Clear search index entries and shortcut donations.
    fn clear_search_index(&self) {}

    /// Drop statistics cached for home screen widgets.
    fn clear_widget_data(&self) {}
}

/// Hooks that do nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogoutHooks;

impl LogoutHooks for NoopLogoutHooks {}
