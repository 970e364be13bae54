//! Pinned dashboard item storage.
//!
//! The grow-audience card cycles through a few nudges. Which one is shown,
//! and which ones the user already dismissed, is owned by the host.

use serde::{Deserialize, Serialize};

/// Nudge shown on the grow-audience card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowAudienceHint {
    Social,
    BloggingReminders,
    ReaderDiscover,
}

impl GrowAudienceHint {
    /// Display order of the nudges
    pub const ALL: [GrowAudienceHint; 3] = [
        GrowAudienceHint::Social,
        GrowAudienceHint::BloggingReminders,
        GrowAudienceHint::ReaderDiscover,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            GrowAudienceHint::Social => "Share your posts on social media",
            GrowAudienceHint::BloggingReminders => "Set up blogging reminders",
            GrowAudienceHint::ReaderDiscover => "Follow topics to connect with readers",
        }
    }
}

/// Storage for dismissed dashboard nudges.
pub trait PinnedItemStore: Send + Sync {
    /// The nudge to show for a site with the given all-time view count.
    fn item_to_display(&self, all_time_views: i64) -> Option<GrowAudienceHint>;

    /// Whether a nudge has not been dismissed yet.
    fn should_show(&self, item: GrowAudienceHint) -> bool;

    /// Dismiss a nudge.
    fn mark_pinned_item_as_hidden(&self, item: GrowAudienceHint);
}
