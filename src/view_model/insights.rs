//! Insights screen view model
//!
//! Projects the insights store into an ordered [`InsightsTable`]. Each
//! requested card contributes an optional header and exactly one terminal
//! row: content when data is cached or the fetch succeeded, a ghost while
//! idle or loading, an error row when the fetch failed.

use chrono::{DateTime, Months, NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::watch;

use crate::config::FeatureFlags;
use crate::models::{InsightType, PostingStreakEvent, StatSection, TagOrCategory};
use crate::state::{FetchStatus, InsightsAction, InsightsStore, SharedInsightsStore};
use crate::traits::{GrowAudienceHint, PinnedItemStore};

use super::format::{abbreviated, relative_in_past};
use super::rows::{
    strip_structural_rows, GhostKind, GrowAudienceData, InsightsTable, MostPopularTimeData, Row,
    TabData, TotalInsightsData, TotalRowData, TwoColumnRowData,
};

/// Most rows a list card shows before it would need "View more"
pub const MAX_ROWS_TO_DISPLAY: usize = 6;

const ADD_INSIGHT_ICON: &str = "+";

/// View model for the Insights screen.
///
/// Built per presentation. It reads the shared store, never writes cached
/// data itself, and keeps a change subscription so the caller knows when to
/// project again.
pub struct SiteStatsInsightsViewModel {
    store: SharedInsightsStore,
    insights_to_show: Vec<InsightType>,
    pinned_item_store: Option<Arc<dyn PinnedItemStore>>,
    item_to_display: Option<GrowAudienceHint>,
    features: FeatureFlags,
    changes: watch::Receiver<u64>,
}

impl SiteStatsInsightsViewModel {
    pub fn new(
        insights_to_show: Vec<InsightType>,
        store: SharedInsightsStore,
        pinned_item_store: Option<Arc<dyn PinnedItemStore>>,
        features: FeatureFlags,
    ) -> Self {
        let views_count = store
            .read()
            .all_time_stats()
            .map_or(0, |stats| stats.views_count);
        let item_to_display = pinned_item_store
            .as_ref()
            .and_then(|pinned| pinned.item_to_display(views_count));
        let changes = store.subscribe();

        Self {
            store,
            insights_to_show,
            pinned_item_store,
            item_to_display,
            features,
            changes,
        }
    }

    // ========================================================================
    // Change notifications
    // ========================================================================

    /// The store changed since the last projection or `changed` call
    pub fn has_changes(&self) -> bool {
        self.changes.has_changed().unwrap_or(false)
    }

    /// Wait for the next store change. Returns `false` if the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.changes.changed().await.is_ok()
    }

    // ========================================================================
    // Refresh
    // ========================================================================

    /// Start loading insights unless a recent load makes it unnecessary.
    ///
    /// Returns whether the caller should fetch.
    pub fn fetch_insights(&self) -> bool {
        self.refresh_insights(false)
    }

    /// Request a refresh. A non-forced refresh is skipped while one is in
    /// flight or when the last one finished under five minutes ago.
    ///
    /// Returns whether the caller should fetch.
    pub fn refresh_insights(&self, force: bool) -> bool {
        self.store
            .dispatch(InsightsAction::RefreshInsights { force })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn insights_to_show(&self) -> &[InsightType] {
        &self.insights_to_show
    }

    pub fn update_insights_to_show(&mut self, insights: Vec<InsightType>) {
        self.insights_to_show = insights;
    }

    pub fn is_fetching_overview(&self) -> bool {
        self.store.read().is_refreshing()
    }

    pub fn fetching_failed(&self) -> bool {
        self.store.read().fetching_failed()
    }

    pub fn contains_cached_data(&self) -> bool {
        self.store.read().contains_cached_data(&self.insights_to_show)
    }

    pub fn yearly_posting_activity(&self, from: NaiveDate) -> Vec<Vec<PostingStreakEvent>> {
        self.store.read().yearly_posting_activity(from)
    }

    pub fn annual_insights_year(&self) -> Option<i32> {
        self.store
            .read()
            .annual_and_most_popular_time()
            .map(|annual| annual.annual_insights_year)
    }

    /// Dismiss the nudge currently shown on the grow-audience card
    pub fn mark_empty_stats_nudge_as_completed(&self) {
        if let (Some(pinned), Some(item)) = (&self.pinned_item_store, self.item_to_display) {
            pinned.mark_pinned_item_as_hidden(item);
        }
    }

    fn is_nudge_completed(&self) -> bool {
        match (&self.pinned_item_store, self.item_to_display) {
            (Some(pinned), Some(item)) => !pinned.should_show(item),
            _ => false,
        }
    }

    // ========================================================================
    // Table
    // ========================================================================

    pub fn table_view_model(&mut self) -> InsightsTable {
        self.table_view_model_at(Utc::now())
    }

    /// Project the store as of `now`.
    pub fn table_view_model_at(&mut self, now: DateTime<Utc>) -> InsightsTable {
        let _ = self.changes.borrow_and_update();
        let store = self.store.read();

        if self.insights_to_show.is_empty()
            || (store.fetching_failed() && !store.contains_cached_data(&self.insights_to_show))
        {
            return InsightsTable::Empty;
        }

        let projection = Projection {
            store: &store,
            features: self.features,
            item_to_display: self.item_to_display,
            is_nudge_completed: self.is_nudge_completed(),
            now,
        };

        let mut rows = Vec::new();
        for insight in &self.insights_to_show {
            let Some(terminal) = projection.block_for(*insight) else {
                continue;
            };
            if let Some(section) = insight.header_section() {
                rows.push(Row::Header(section));
            }
            rows.push(terminal);
        }

        rows.push(Row::TableFooter);
        rows.push(Row::AddInsight(add_insight_row()));
        rows.push(Row::TableFooter);

        if self.features.stats_new_appearance {
            let sections = strip_structural_rows(rows)
                .into_iter()
                .map(|row| vec![row])
                .collect();
            return InsightsTable::Sectioned(sections);
        }

        InsightsTable::Single(rows)
    }
}

// ============================================================================
// Block selection
// ============================================================================

/// Choose the terminal row for a card from its fetch state.
///
/// Cached data wins over any status so a failed refresh keeps showing the
/// last good numbers.
pub fn select_block<F>(has_cached_data: bool, status: FetchStatus, content: F, loading: Row) -> Row
where
    F: FnOnce() -> Row,
{
    if has_cached_data || status == FetchStatus::Success {
        return content();
    }
    match status {
        FetchStatus::Idle | FetchStatus::Loading => loading,
        FetchStatus::Error | FetchStatus::Success => Row::Error,
    }
}

struct Projection<'a> {
    store: &'a InsightsStore,
    features: FeatureFlags,
    item_to_display: Option<GrowAudienceHint>,
    is_nudge_completed: bool,
    now: DateTime<Utc>,
}

impl Projection<'_> {
    /// Terminal row for a card; `None` for cards this client cannot draw.
    fn block_for(&self, insight: InsightType) -> Option<Row> {
        let ghost = match insight {
            InsightType::GrowAudience => GhostKind::GrowAudience,
            InsightType::LatestPostSummary => GhostKind::Chart,
            InsightType::AllTimeStats
            | InsightType::FollowersTotals
            | InsightType::MostPopularTime
            | InsightType::AnnualSiteStats
            | InsightType::TodaysStats => GhostKind::TwoColumn,
            InsightType::TagsAndCategories | InsightType::Publicize => GhostKind::Top,
            InsightType::Comments | InsightType::Followers => GhostKind::Tabbed,
            InsightType::PostingActivity => GhostKind::PostingActivity,
            InsightType::Custom => return None,
        };

        Some(select_block(
            self.store.has_cached_data_for(insight),
            self.store.status_for(insight),
            || self.content_for(insight),
            Row::Ghost(ghost),
        ))
    }

    fn content_for(&self, insight: InsightType) -> Row {
        match insight {
            InsightType::GrowAudience => Row::GrowAudience(GrowAudienceData {
                hint: self.item_to_display.unwrap_or(GrowAudienceHint::Social),
                all_time_views_count: self.all_time_views(),
                is_nudge_completed: self.is_nudge_completed,
            }),
            InsightType::LatestPostSummary => Row::LatestPostSummary {
                summary: self.store.last_post_insight().cloned(),
                chart: self.store.post_stats().cloned(),
            },
            InsightType::AllTimeStats => Row::TwoColumnStats {
                section: StatSection::InsightsAllTime,
                data_rows: self.all_time_rows(),
            },
            InsightType::FollowersTotals if self.features.stats_new_insights => Row::TotalInsight {
                section: StatSection::InsightsFollowerTotals,
                data: TotalInsightsData {
                    count: abbreviated(self.store.total_follower_count()),
                },
            },
            InsightType::FollowersTotals => Row::TwoColumnStats {
                section: StatSection::InsightsFollowerTotals,
                data_rows: self.follower_totals_rows(),
            },
            InsightType::MostPopularTime if self.features.stats_new_insights => {
                Row::MostPopularTime(self.most_popular_time_data())
            }
            InsightType::MostPopularTime => Row::TwoColumnStats {
                section: StatSection::InsightsMostPopularTime,
                data_rows: self.most_popular_time_rows(),
            },
            InsightType::TagsAndCategories => Row::TopTotals {
                section: StatSection::InsightsTagsAndCategories,
                item_subtitle: StatSection::InsightsTagsAndCategories.item_subtitle().to_string(),
                data_subtitle: StatSection::InsightsTagsAndCategories.data_subtitle().to_string(),
                data_rows: self.tags_and_categories_rows(),
            },
            InsightType::AnnualSiteStats => Row::TwoColumnStats {
                section: StatSection::InsightsAnnualSiteStats,
                data_rows: self.annual_rows(),
            },
            InsightType::Comments => Row::TabbedTotals {
                section: StatSection::InsightsCommentsAuthors,
                tabs: vec![
                    self.comments_tab(StatSection::InsightsCommentsAuthors),
                    self.comments_tab(StatSection::InsightsCommentsPosts),
                ],
                show_total_count: false,
            },
            InsightType::Followers => Row::TabbedTotals {
                section: StatSection::InsightsFollowersWordPress,
                tabs: vec![
                    self.followers_tab(StatSection::InsightsFollowersWordPress),
                    self.followers_tab(StatSection::InsightsFollowersEmail),
                ],
                show_total_count: true,
            },
            InsightType::TodaysStats => Row::TwoColumnStats {
                section: StatSection::InsightsTodaysStats,
                data_rows: self.todays_rows(),
            },
            InsightType::PostingActivity => Row::PostingActivity {
                months: self.posting_activity_months(),
            },
            InsightType::Publicize => Row::TopTotals {
                section: StatSection::InsightsPublicize,
                item_subtitle: StatSection::InsightsPublicize.item_subtitle().to_string(),
                data_subtitle: StatSection::InsightsPublicize.data_subtitle().to_string(),
                data_rows: self.publicize_rows(),
            },
            InsightType::Custom => Row::Error,
        }
    }

    fn all_time_views(&self) -> i64 {
        self.store
            .all_time_stats()
            .map_or(0, |stats| stats.views_count)
    }

    // ------------------------------------------------------------------------
    // Two column cards
    // ------------------------------------------------------------------------

    fn all_time_rows(&self) -> Vec<TwoColumnRowData> {
        let Some(stats) = self.store.all_time_stats() else {
            return Vec::new();
        };
        let total = stats.views_count
            + stats.visitors_count
            + stats.posts_count
            + stats.best_views_per_day_count;
        if total <= 0 {
            return Vec::new();
        }

        vec![
            TwoColumnRowData::new(
                "Views",
                abbreviated(stats.views_count),
                "Visitors",
                abbreviated(stats.visitors_count),
            ),
            TwoColumnRowData::new(
                "Posts",
                abbreviated(stats.posts_count),
                "Best views ever",
                abbreviated(stats.best_views_per_day_count),
            ),
        ]
    }

    fn todays_rows(&self) -> Vec<TwoColumnRowData> {
        let Some(stats) = self.store.todays_stats() else {
            return Vec::new();
        };
        let total =
            stats.views_count + stats.visitors_count + stats.likes_count + stats.comments_count;
        if total <= 0 {
            return Vec::new();
        }

        vec![
            TwoColumnRowData::new(
                "Views",
                abbreviated(stats.views_count),
                "Visitors",
                abbreviated(stats.visitors_count),
            ),
            TwoColumnRowData::new(
                "Likes",
                abbreviated(stats.likes_count),
                "Comments",
                abbreviated(stats.comments_count),
            ),
        ]
    }

    fn follower_totals_rows(&self) -> Vec<TwoColumnRowData> {
        let total = self.store.total_follower_count();
        if total <= 0 {
            return Vec::new();
        }

        let dot_com = self
            .store
            .dot_com_followers()
            .map_or(0, |f| f.dot_com_followers_count);
        let email = self
            .store
            .email_followers()
            .map_or(0, |f| f.email_followers_count);
        let social = self.store.publicize().map_or(0, |p| p.total_followers());

        vec![
            TwoColumnRowData::new(
                "Total",
                abbreviated(total),
                "WordPress.com",
                abbreviated(dot_com),
            ),
            TwoColumnRowData::new("Email", abbreviated(email), "Social", abbreviated(social)),
        ]
    }

    fn annual_rows(&self) -> Vec<TwoColumnRowData> {
        let Some(annual) = self.store.annual_and_most_popular_time() else {
            return Vec::new();
        };
        if annual.annual_insights_total_posts_count <= 0 {
            return Vec::new();
        }

        let rounded = |average: f64| abbreviated(average.round() as i64);

        vec![
            TwoColumnRowData::new(
                "Year",
                annual.annual_insights_year.to_string(),
                "Total Posts",
                abbreviated(annual.annual_insights_total_posts_count),
            ),
            TwoColumnRowData::new(
                "Total Comments",
                abbreviated(annual.annual_insights_total_comments_count),
                "Comments Per Post",
                rounded(annual.annual_insights_average_comments_count),
            ),
            TwoColumnRowData::new(
                "Total Likes",
                abbreviated(annual.annual_insights_total_likes_count),
                "Likes Per Post",
                rounded(annual.annual_insights_average_likes_count),
            ),
            TwoColumnRowData::new(
                "Total Words",
                abbreviated(annual.annual_insights_total_words_count),
                "Words Per Post",
                rounded(annual.annual_insights_average_words_count),
            ),
        ]
    }

    // ------------------------------------------------------------------------
    // Most popular time
    // ------------------------------------------------------------------------

    /// Day and hour strings, when the day has a positive share of views
    fn most_popular_day_and_time(&self) -> Option<(String, String, i64, i64)> {
        let stats = self.store.annual_and_most_popular_time()?;
        let day = stats.formatted_most_popular_day()?;
        let time = stats.formatted_most_popular_time()?;
        if stats.most_popular_day_of_week_percentage <= 0 {
            return None;
        }
        Some((
            day,
            time,
            stats.most_popular_day_of_week_percentage,
            stats.most_popular_hour_percentage,
        ))
    }

    fn most_popular_time_rows(&self) -> Vec<TwoColumnRowData> {
        self.most_popular_day_and_time()
            .map(|(day, time, _, _)| vec![TwoColumnRowData::new("Best Day", day, "Best Hour", time)])
            .unwrap_or_default()
    }

    fn most_popular_time_data(&self) -> Option<MostPopularTimeData> {
        let (day, time, day_percentage, hour_percentage) = self.most_popular_day_and_time()?;
        Some(MostPopularTimeData {
            most_popular_day_title: "Best Day".to_string(),
            most_popular_time_title: "Best Hour".to_string(),
            most_popular_day: day,
            most_popular_time: time.to_uppercase(),
            day_percentage: format!("{}% of views", day_percentage),
            time_percentage: format!("{}% of views", hour_percentage),
        })
    }

    // ------------------------------------------------------------------------
    // List cards
    // ------------------------------------------------------------------------

    fn tags_and_categories_rows(&self) -> Vec<TotalRowData> {
        let Some(tags) = self.store.top_tags_and_categories() else {
            return Vec::new();
        };
        let items = &tags.top_tags_and_categories;
        let first_views = items.first().and_then(|t| t.views_count).unwrap_or(1);

        items
            .iter()
            .map(|item| {
                let views = item.views_count.unwrap_or(0);
                let mut row = TotalRowData::new(
                    item.name.clone(),
                    abbreviated(views),
                    StatSection::InsightsTagsAndCategories,
                );
                row.data_bar_percent = Some(bar_percent(views, first_views));
                row.icon = Some(item.kind.icon().to_string());
                row.show_disclosure = true;
                row.disclosure_url = item.url.clone();
                row.child_rows = child_rows(&item.children);
                row
            })
            .collect()
    }

    fn publicize_rows(&self) -> Vec<TotalRowData> {
        let Some(publicize) = self.store.publicize() else {
            return Vec::new();
        };

        publicize
            .publicize_services
            .iter()
            .map(|service| {
                let mut row = TotalRowData::new(
                    service.name.clone(),
                    abbreviated(service.followers),
                    StatSection::InsightsPublicize,
                );
                row.icon_url = service.icon_url.clone();
                row
            })
            .collect()
    }

    fn comments_tab(&self, section: StatSection) -> TabData {
        let comments = self.store.top_comments_insight();

        let data_rows = match section {
            StatSection::InsightsCommentsAuthors => comments
                .map(|c| c.top_authors.as_slice())
                .unwrap_or_default()
                .iter()
                .take(MAX_ROWS_TO_DISPLAY)
                .map(|author| {
                    let mut row =
                        TotalRowData::new(author.name.clone(), abbreviated(author.comment_count), section);
                    row.icon_url = author.icon_url.clone();
                    row
                })
                .collect(),
            StatSection::InsightsCommentsPosts => comments
                .map(|c| c.top_posts.as_slice())
                .unwrap_or_default()
                .iter()
                .take(MAX_ROWS_TO_DISPLAY)
                .map(|post| {
                    let mut row =
                        TotalRowData::new(post.name.clone(), abbreviated(post.comment_count), section);
                    row.show_disclosure = true;
                    row.disclosure_url = post.post_url.clone();
                    row
                })
                .collect(),
            _ => Vec::new(),
        };

        TabData {
            tab_title: section.tab_title().to_string(),
            item_subtitle: section.item_subtitle().to_string(),
            data_subtitle: section.data_subtitle().to_string(),
            total_count: None,
            data_rows,
        }
    }

    fn followers_tab(&self, section: StatSection) -> TabData {
        let (followers, total) = match section {
            StatSection::InsightsFollowersWordPress => self
                .store
                .dot_com_followers()
                .map(|f| (f.top_dot_com_followers.as_slice(), f.dot_com_followers_count))
                .unwrap_or_default(),
            StatSection::InsightsFollowersEmail => self
                .store
                .email_followers()
                .map(|f| (f.top_email_followers.as_slice(), f.email_followers_count))
                .unwrap_or_default(),
            _ => (&[][..], 0),
        };

        let data_rows = followers
            .iter()
            .map(|follower| {
                let mut row = TotalRowData::new(
                    follower.name.clone(),
                    relative_in_past(follower.subscribed_date, self.now),
                    section,
                );
                row.icon_url = follower.avatar_url.clone();
                row
            })
            .collect();

        TabData {
            tab_title: section.tab_title().to_string(),
            item_subtitle: section.item_subtitle().to_string(),
            data_subtitle: section.data_subtitle().to_string(),
            total_count: section.total_followers(&abbreviated(total)),
            data_rows,
        }
    }

    /// Two months ago, last month and this month
    fn posting_activity_months(&self) -> Vec<Vec<PostingStreakEvent>> {
        let today = self.now.date_naive();
        [2, 1, 0]
            .into_iter()
            .filter_map(|back| today.checked_sub_months(Months::new(back)))
            .map(|month| self.store.monthly_posting_activity(month))
            .collect()
    }
}

fn bar_percent(views: i64, first_views: i64) -> f32 {
    if first_views == 0 {
        return 0.0;
    }
    views as f32 / first_views as f32
}

fn child_rows(children: &[TagOrCategory]) -> Vec<TotalRowData> {
    children
        .iter()
        .map(|child| {
            let mut row = TotalRowData::new(
                child.name.clone(),
                abbreviated(child.views_count.unwrap_or(0)),
                StatSection::InsightsTagsAndCategories,
            );
            row.icon = Some(child.kind.icon().to_string());
            row.show_disclosure = true;
            row.disclosure_url = child.url.clone();
            row
        })
        .collect()
}

fn add_insight_row() -> TotalRowData {
    let mut row = TotalRowData::new(
        StatSection::InsightsAddInsight.title(),
        "",
        StatSection::InsightsAddInsight,
    );
    row.icon = Some(ADD_INSIGHT_ICON.to_string());
    row
}
