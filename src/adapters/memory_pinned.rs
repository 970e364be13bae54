//! In-memory pinned item store.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::traits::{GrowAudienceHint, PinnedItemStore};

/// Sites under this many all-time views get grow-audience nudges
pub const LOW_VIEWS_THRESHOLD: i64 = 30;

/// Keeps dismissed nudges for the lifetime of the process.
///
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPinnedItemStore {
    hidden: Arc<Mutex<HashSet<GrowAudienceHint>>>,
}

impl InMemoryPinnedItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_hidden(&self, item: GrowAudienceHint) -> bool {
        self.hidden
            .lock()
            .map(|hidden| hidden.contains(&item))
            .unwrap_or(false)
    }
}

impl PinnedItemStore for InMemoryPinnedItemStore {
    fn item_to_display(&self, all_time_views: i64) -> Option<GrowAudienceHint> {
        if all_time_views >= LOW_VIEWS_THRESHOLD {
            return None;
        }
        GrowAudienceHint::ALL
            .into_iter()
            .find(|hint| self.should_show(*hint))
    }

    fn should_show(&self, item: GrowAudienceHint) -> bool {
        !self.is_hidden(item)
    }

    fn mark_pinned_item_as_hidden(&self, item: GrowAudienceHint) {
        if let Ok(mut hidden) = self.hidden.lock() {
            hidden.insert(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_traffic_site_gets_first_nudge() {
        let store = InMemoryPinnedItemStore::new();
        assert_eq!(store.item_to_display(0), Some(GrowAudienceHint::Social));
    }

    #[test]
    fn test_busy_site_gets_no_nudge() {
        let store = InMemoryPinnedItemStore::new();
        assert_eq!(store.item_to_display(LOW_VIEWS_THRESHOLD), None);
    }

    #[test]
    fn test_hidden_nudges_are_skipped() {
        let store = InMemoryPinnedItemStore::new();
        store.mark_pinned_item_as_hidden(GrowAudienceHint::Social);
        assert!(!store.should_show(GrowAudienceHint::Social));
        assert_eq!(
            store.item_to_display(5),
            Some(GrowAudienceHint::BloggingReminders)
        );

        store.mark_pinned_item_as_hidden(GrowAudienceHint::BloggingReminders);
        store.mark_pinned_item_as_hidden(GrowAudienceHint::ReaderDiscover);
        assert_eq!(store.item_to_display(5), None);
    }

    #[test]
    fn test_clones_share_dismissals() {
        let store = InMemoryPinnedItemStore::new();
        let clone = store.clone();
        clone.mark_pinned_item_as_hidden(GrowAudienceHint::Social);
        assert!(!store.should_show(GrowAudienceHint::Social));
    }
}
