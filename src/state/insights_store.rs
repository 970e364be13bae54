//! Insights statistics store
//!
//! Caches the fetched statistics snapshot per slice together with the fetch
//! status of each slice. The store is only mutated through
//! [`InsightsAction`]s; readers subscribe to a revision counter that bumps on
//! every applied action.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use std::sync::{Arc, RwLock, RwLockReadGuard};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::models::{
    AllTimeStats, AnnualAndMostPopularTime, DotComFollowers, EmailFollowers, InsightType,
    LastPostInsight, PostStats, PostingStreakEvent, Publicize, TodaysStats, TopCommentsInsight,
    TopTagsAndCategories,
};

/// Minimum age of the last completed refresh before a non-forced refresh runs
pub const REFRESH_INTERVAL_MINUTES: i64 = 5;

// ============================================================================
// Status
// ============================================================================

/// Fetch state of one store slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// A separately fetched part of the insights snapshot.
///
/// Several cards can read from one slice: all-time stats and grow audience
/// both read [`StoreSlice::AllTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreSlice {
    AllTime,
    LastPostSummary,
    FollowersTotals,
    AnnualAndMostPopularTime,
    TagsAndCategories,
    Comments,
    TodaysStats,
    PostingActivity,
    Publicize,
}

impl StoreSlice {
    pub const ALL: [StoreSlice; 9] = [
        StoreSlice::AllTime,
        StoreSlice::LastPostSummary,
        StoreSlice::FollowersTotals,
        StoreSlice::AnnualAndMostPopularTime,
        StoreSlice::TagsAndCategories,
        StoreSlice::Comments,
        StoreSlice::TodaysStats,
        StoreSlice::PostingActivity,
        StoreSlice::Publicize,
    ];

    /// The slice a card reads from. `Custom` cards read nothing.
    pub fn for_insight(insight: InsightType) -> Option<StoreSlice> {
        match insight {
            InsightType::GrowAudience | InsightType::AllTimeStats => Some(StoreSlice::AllTime),
            InsightType::LatestPostSummary => Some(StoreSlice::LastPostSummary),
            InsightType::FollowersTotals | InsightType::Followers => {
                Some(StoreSlice::FollowersTotals)
            }
            InsightType::MostPopularTime | InsightType::AnnualSiteStats => {
                Some(StoreSlice::AnnualAndMostPopularTime)
            }
            InsightType::TagsAndCategories => Some(StoreSlice::TagsAndCategories),
            InsightType::Comments => Some(StoreSlice::Comments),
            InsightType::TodaysStats => Some(StoreSlice::TodaysStats),
            InsightType::PostingActivity => Some(StoreSlice::PostingActivity),
            InsightType::Publicize => Some(StoreSlice::Publicize),
            InsightType::Custom => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Every mutation the store accepts
#[derive(Debug, Clone)]
pub enum InsightsAction {
    /// Mark every slice as loading, subject to throttling unless forced
    RefreshInsights { force: bool },
    ReceivedAllTimeStats(AllTimeStats),
    ReceivedLastPostInsight {
        insight: Option<LastPostInsight>,
        post_stats: Option<PostStats>,
    },
    ReceivedFollowers {
        dot_com: DotComFollowers,
        email: EmailFollowers,
    },
    ReceivedAnnualAndMostPopularTime(AnnualAndMostPopularTime),
    ReceivedTagsAndCategories(TopTagsAndCategories),
    ReceivedComments(TopCommentsInsight),
    ReceivedTodaysStats(TodaysStats),
    ReceivedPostingActivity(Vec<PostingStreakEvent>),
    ReceivedPublicize(Publicize),
    Failed(StoreSlice),
}

// ============================================================================
// InsightsStore
// ============================================================================

#[derive(Debug, Default)]
struct CachedInsights {
    all_time: Option<AllTimeStats>,
    last_post_insight: Option<LastPostInsight>,
    post_stats: Option<PostStats>,
    dot_com_followers: Option<DotComFollowers>,
    email_followers: Option<EmailFollowers>,
    annual_and_most_popular_time: Option<AnnualAndMostPopularTime>,
    tags_and_categories: Option<TopTagsAndCategories>,
    comments: Option<TopCommentsInsight>,
    todays_stats: Option<TodaysStats>,
    posting_activity: Option<Vec<PostingStreakEvent>>,
    publicize: Option<Publicize>,
}

/// Cached statistics and per-slice fetch status
#[derive(Debug)]
pub struct InsightsStore {
    statuses: [FetchStatus; 9],
    cache: CachedInsights,
    refreshing: bool,
    last_refreshed: Option<DateTime<Utc>>,
    revision: watch::Sender<u64>,
}

impl Default for InsightsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightsStore {
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            statuses: [FetchStatus::Idle; 9],
            cache: CachedInsights::default(),
            refreshing: false,
            last_refreshed: None,
            revision,
        }
    }

    /// Receiver that changes whenever an action is applied
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Apply an action. Returns `false` when a refresh was throttled.
    pub fn dispatch(&mut self, action: InsightsAction) -> bool {
        self.dispatch_at(action, Utc::now())
    }

    /// Apply an action as of `now`.
    pub fn dispatch_at(&mut self, action: InsightsAction, now: DateTime<Utc>) -> bool {
        match action {
            InsightsAction::RefreshInsights { force } => {
                if !force && !self.should_refresh(now) {
                    debug!("Skipping insights refresh; last refresh is recent or in flight");
                    return false;
                }
                info!(force, "Refreshing insights");
                self.refreshing = true;
                self.statuses = [FetchStatus::Loading; 9];
            }
            InsightsAction::ReceivedAllTimeStats(stats) => {
                self.cache.all_time = Some(stats);
                self.finish(StoreSlice::AllTime, now);
            }
            InsightsAction::ReceivedLastPostInsight {
                insight,
                post_stats,
            } => {
                self.cache.last_post_insight = insight;
                self.cache.post_stats = post_stats;
                self.finish(StoreSlice::LastPostSummary, now);
            }
            InsightsAction::ReceivedFollowers { dot_com, email } => {
                self.cache.dot_com_followers = Some(dot_com);
                self.cache.email_followers = Some(email);
                self.finish(StoreSlice::FollowersTotals, now);
            }
            InsightsAction::ReceivedAnnualAndMostPopularTime(stats) => {
                self.cache.annual_and_most_popular_time = Some(stats);
                self.finish(StoreSlice::AnnualAndMostPopularTime, now);
            }
            InsightsAction::ReceivedTagsAndCategories(tags) => {
                self.cache.tags_and_categories = Some(tags);
                self.finish(StoreSlice::TagsAndCategories, now);
            }
            InsightsAction::ReceivedComments(comments) => {
                self.cache.comments = Some(comments);
                self.finish(StoreSlice::Comments, now);
            }
            InsightsAction::ReceivedTodaysStats(stats) => {
                self.cache.todays_stats = Some(stats);
                self.finish(StoreSlice::TodaysStats, now);
            }
            InsightsAction::ReceivedPostingActivity(events) => {
                self.cache.posting_activity = Some(events);
                self.finish(StoreSlice::PostingActivity, now);
            }
            InsightsAction::ReceivedPublicize(publicize) => {
                self.cache.publicize = Some(publicize);
                self.finish(StoreSlice::Publicize, now);
            }
            InsightsAction::Failed(slice) => {
                warn!(?slice, "Insights fetch failed");
                self.statuses[slice.index()] = FetchStatus::Error;
                self.complete_refresh_if_settled(now);
            }
        }

        self.revision.send_modify(|revision| *revision += 1);
        true
    }

    fn finish(&mut self, slice: StoreSlice, now: DateTime<Utc>) {
        self.statuses[slice.index()] = FetchStatus::Success;
        self.complete_refresh_if_settled(now);
    }

    fn complete_refresh_if_settled(&mut self, now: DateTime<Utc>) {
        if self.refreshing && !self.statuses.contains(&FetchStatus::Loading) {
            self.refreshing = false;
            self.last_refreshed = Some(now);
        }
    }

    /// Whether a non-forced refresh would run at `now`
    pub fn should_refresh(&self, now: DateTime<Utc>) -> bool {
        if self.refreshing {
            return false;
        }
        match self.last_refreshed {
            Some(last) => now - last >= Duration::minutes(REFRESH_INTERVAL_MINUTES),
            None => true,
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    // ========================================================================
    // Status queries
    // ========================================================================

    pub fn status(&self, slice: StoreSlice) -> FetchStatus {
        self.statuses[slice.index()]
    }

    /// Status of the slice a card reads from (`Idle` for custom cards)
    pub fn status_for(&self, insight: InsightType) -> FetchStatus {
        StoreSlice::for_insight(insight)
            .map(|slice| self.status(slice))
            .unwrap_or_default()
    }

    pub fn has_cached_data(&self, slice: StoreSlice) -> bool {
        let cache = &self.cache;
        match slice {
            StoreSlice::AllTime => cache.all_time.is_some(),
            StoreSlice::LastPostSummary => {
                cache.last_post_insight.is_some() || cache.post_stats.is_some()
            }
            StoreSlice::FollowersTotals => {
                cache.dot_com_followers.is_some() || cache.email_followers.is_some()
            }
            StoreSlice::AnnualAndMostPopularTime => cache.annual_and_most_popular_time.is_some(),
            StoreSlice::TagsAndCategories => cache.tags_and_categories.is_some(),
            StoreSlice::Comments => cache.comments.is_some(),
            StoreSlice::TodaysStats => cache.todays_stats.is_some(),
            StoreSlice::PostingActivity => cache.posting_activity.is_some(),
            StoreSlice::Publicize => cache.publicize.is_some(),
        }
    }

    /// Cached data exists for this card's slice
    pub fn has_cached_data_for(&self, insight: InsightType) -> bool {
        StoreSlice::for_insight(insight)
            .map(|slice| self.has_cached_data(slice))
            .unwrap_or(false)
    }

    /// Any of the given cards has cached data
    pub fn contains_cached_data(&self, insights: &[InsightType]) -> bool {
        insights
            .iter()
            .any(|insight| self.has_cached_data_for(*insight))
    }

    /// Every slice ended in `Error`.
    ///
    /// An `Idle` slice has not failed, so a single failure while the rest
    /// are untouched is not a failed fetch.
    pub fn fetching_failed(&self) -> bool {
        self.statuses
            .iter()
            .all(|status| *status == FetchStatus::Error)
    }

    // ========================================================================
    // Data accessors
    // ========================================================================

    pub fn all_time_stats(&self) -> Option<&AllTimeStats> {
        self.cache.all_time.as_ref()
    }

    pub fn last_post_insight(&self) -> Option<&LastPostInsight> {
        self.cache.last_post_insight.as_ref()
    }

    pub fn post_stats(&self) -> Option<&PostStats> {
        self.cache.post_stats.as_ref()
    }

    pub fn dot_com_followers(&self) -> Option<&DotComFollowers> {
        self.cache.dot_com_followers.as_ref()
    }

    pub fn email_followers(&self) -> Option<&EmailFollowers> {
        self.cache.email_followers.as_ref()
    }

    pub fn publicize(&self) -> Option<&Publicize> {
        self.cache.publicize.as_ref()
    }

    pub fn annual_and_most_popular_time(&self) -> Option<&AnnualAndMostPopularTime> {
        self.cache.annual_and_most_popular_time.as_ref()
    }

    pub fn top_tags_and_categories(&self) -> Option<&TopTagsAndCategories> {
        self.cache.tags_and_categories.as_ref()
    }

    pub fn top_comments_insight(&self) -> Option<&TopCommentsInsight> {
        self.cache.comments.as_ref()
    }

    pub fn todays_stats(&self) -> Option<&TodaysStats> {
        self.cache.todays_stats.as_ref()
    }

    pub fn posting_activity(&self) -> &[PostingStreakEvent] {
        self.cache.posting_activity.as_deref().unwrap_or(&[])
    }

    /// WordPress.com, email and social followers combined
    pub fn total_follower_count(&self) -> i64 {
        let dot_com = self
            .cache
            .dot_com_followers
            .as_ref()
            .map_or(0, |f| f.dot_com_followers_count);
        let email = self
            .cache
            .email_followers
            .as_ref()
            .map_or(0, |f| f.email_followers_count);
        let social = self.cache.publicize.as_ref().map_or(0, Publicize::total_followers);
        dot_com + email + social
    }

    /// Posting events in the month containing `date`, oldest first
    pub fn monthly_posting_activity(&self, date: NaiveDate) -> Vec<PostingStreakEvent> {
        let mut events: Vec<PostingStreakEvent> = self
            .posting_activity()
            .iter()
            .filter(|event| event.date.year() == date.year() && event.date.month() == date.month())
            .copied()
            .collect();
        events.sort_by_key(|event| event.date);
        events
    }

    /// Twelve months of posting events ending with the month of `from`,
    /// oldest month first
    pub fn yearly_posting_activity(&self, from: NaiveDate) -> Vec<Vec<PostingStreakEvent>> {
        (0..12u32)
            .rev()
            .filter_map(|back| from.checked_sub_months(Months::new(back)))
            .map(|month| self.monthly_posting_activity(month))
            .collect()
    }
}

// ============================================================================
// SharedInsightsStore
// ============================================================================

/// Cloneable handle to a store shared between the fetcher and view models
#[derive(Debug, Clone, Default)]
pub struct SharedInsightsStore {
    inner: Arc<RwLock<InsightsStore>>,
}

impl SharedInsightsStore {
    pub fn new(store: InsightsStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Read access for projections. A poisoned lock still yields the data.
    pub fn read(&self) -> RwLockReadGuard<'_, InsightsStore> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn dispatch(&self, action: InsightsAction) -> bool {
        self.dispatch_at(action, Utc::now())
    }

    pub fn dispatch_at(&self, action: InsightsAction, now: DateTime<Utc>) -> bool {
        let mut store = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        store.dispatch_at(action, now)
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.read().subscribe()
    }
}
