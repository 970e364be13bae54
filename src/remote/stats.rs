//! Insights statistics client.
//!
//! Fetches every insights endpoint for one site and feeds the results into
//! the store as [`InsightsAction`]s. A failed endpoint marks its slice as
//! failed; the others still land.

use chrono::{DateTime, Datelike, Duration, Local, Months, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::error::{InsightsResult, SessionError};
use crate::models::{
    deserialize_numeric_id, AccountSnapshot, AllTimeStats, AnnualAndMostPopularTime,
    CommentAuthor, CommentedPost, DailyViews, DotComFollowers, EmailFollowers, Follower,
    LastPostInsight, PostStats, PostingStreakEvent, Publicize, PublicizeService, TagKind,
    TagOrCategory, TodaysStats, TopCommentsInsight, TopTagsAndCategories,
};
use crate::state::{InsightsAction, SharedInsightsStore, StoreSlice};
use crate::traits::HttpClient;

use super::get_json;

/// Followers requested per follower tab
const FOLLOWERS_PAGE_SIZE: usize = 7;
/// Tags and categories requested for the card
const TAGS_PAGE_SIZE: usize = 10;

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct StatsResponse {
    stats: RemoteAllTime,
}

#[derive(Debug, Deserialize)]
struct RemoteAllTime {
    #[serde(default)]
    posts: i64,
    #[serde(default)]
    views: i64,
    #[serde(default)]
    visitors: i64,
    #[serde(default)]
    views_best_day: Option<String>,
    #[serde(default)]
    views_best_day_total: i64,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    #[serde(default)]
    views: i64,
    #[serde(default)]
    visitors: i64,
    #[serde(default)]
    likes: i64,
    #[serde(default)]
    comments: i64,
}

#[derive(Debug, Deserialize)]
struct InsightsResponse {
    #[serde(default)]
    highest_hour: u32,
    #[serde(default)]
    highest_hour_percent: f64,
    #[serde(default)]
    highest_day_of_week: u32,
    #[serde(default)]
    highest_day_percent: f64,
    #[serde(default)]
    years: Vec<RemoteYear>,
}

#[derive(Debug, Deserialize)]
struct RemoteYear {
    #[serde(deserialize_with = "deserialize_numeric_id")]
    year: i64,
    #[serde(default)]
    total_posts: i64,
    #[serde(default)]
    total_comments: i64,
    #[serde(default)]
    avg_comments: Option<f64>,
    #[serde(default)]
    total_likes: i64,
    #[serde(default)]
    avg_likes: Option<f64>,
    #[serde(default)]
    total_words: i64,
    #[serde(default)]
    avg_words: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct FollowersResponse {
    #[serde(default)]
    total: i64,
    #[serde(default)]
    subscribers: Vec<RemoteFollower>,
}

#[derive(Debug, Deserialize)]
struct RemoteFollower {
    label: String,
    #[serde(default)]
    avatar: Option<String>,
    date_subscribed: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct PublicizeResponse {
    #[serde(default)]
    services: Vec<RemotePublicizeService>,
}

#[derive(Debug, Deserialize)]
struct RemotePublicizeService {
    service: String,
    #[serde(default)]
    followers: i64,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    tags: Vec<RemoteTagGroup>,
}

#[derive(Debug, Deserialize)]
struct RemoteTagGroup {
    #[serde(default)]
    tags: Vec<RemoteTag>,
    #[serde(default)]
    views: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RemoteTag {
    #[serde(rename = "type", default)]
    kind: String,
    name: String,
    #[serde(default)]
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CommentsResponse {
    #[serde(default)]
    authors: Vec<RemoteCommentAuthor>,
    #[serde(default)]
    posts: Vec<RemoteCommentedPost>,
}

#[derive(Debug, Deserialize)]
struct RemoteCommentAuthor {
    name: String,
    #[serde(deserialize_with = "deserialize_numeric_id")]
    comments: i64,
    #[serde(default)]
    gravatar: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteCommentedPost {
    name: String,
    #[serde(deserialize_with = "deserialize_numeric_id")]
    comments: i64,
    #[serde(default)]
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StreakResponse {
    /// Unix timestamp of each post mapped to a post count
    #[serde(default)]
    data: BTreeMap<String, i64>,
}

#[derive(Debug, Deserialize)]
struct PostsResponse {
    #[serde(default)]
    posts: Vec<RemotePost>,
}

#[derive(Debug, Deserialize)]
struct RemotePost {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(rename = "URL", default)]
    url: Option<String>,
    date: DateTime<Utc>,
    #[serde(default)]
    like_count: i64,
    #[serde(default)]
    discussion: Option<RemoteDiscussion>,
}

#[derive(Debug, Deserialize)]
struct RemoteDiscussion {
    #[serde(default)]
    comment_count: i64,
}

#[derive(Debug, Deserialize)]
struct PostStatsResponse {
    #[serde(default)]
    views: i64,
    #[serde(default)]
    data: Vec<(NaiveDate, i64)>,
}

// ============================================================================
// Conversions
// ============================================================================

impl From<RemoteAllTime> for AllTimeStats {
    fn from(remote: RemoteAllTime) -> Self {
        Self {
            posts_count: remote.posts,
            views_count: remote.views,
            visitors_count: remote.visitors,
            best_views_per_day_count: remote.views_best_day_total,
            best_views_day: remote
                .views_best_day
                .and_then(|day| NaiveDate::parse_from_str(&day, "%Y-%m-%d").ok()),
        }
    }
}

impl From<SummaryResponse> for TodaysStats {
    fn from(remote: SummaryResponse) -> Self {
        Self {
            views_count: remote.views,
            visitors_count: remote.visitors,
            likes_count: remote.likes,
            comments_count: remote.comments,
        }
    }
}

impl From<InsightsResponse> for AnnualAndMostPopularTime {
    fn from(remote: InsightsResponse) -> Self {
        let mut stats = Self {
            most_popular_day_of_week: remote.highest_day_of_week,
            most_popular_day_of_week_percentage: remote.highest_day_percent.round() as i64,
            most_popular_hour: remote.highest_hour,
            most_popular_hour_percentage: remote.highest_hour_percent.round() as i64,
            ..Default::default()
        };

        if let Some(year) = remote.years.into_iter().max_by_key(|y| y.year) {
            stats.annual_insights_year = year.year as i32;
            stats.annual_insights_total_posts_count = year.total_posts;
            stats.annual_insights_total_comments_count = year.total_comments;
            stats.annual_insights_average_comments_count = year.avg_comments.unwrap_or(0.0);
            stats.annual_insights_total_likes_count = year.total_likes;
            stats.annual_insights_average_likes_count = year.avg_likes.unwrap_or(0.0);
            stats.annual_insights_total_words_count = year.total_words;
            stats.annual_insights_average_words_count = year.avg_words.unwrap_or(0.0);
        }
        stats
    }
}

impl From<RemoteFollower> for Follower {
    fn from(remote: RemoteFollower) -> Self {
        Self {
            name: remote.label,
            subscribed_date: remote.date_subscribed,
            avatar_url: remote.avatar.filter(|a| !a.is_empty()),
        }
    }
}

impl RemoteTag {
    fn tag_kind(&self) -> TagKind {
        match self.kind.as_str() {
            "category" => TagKind::Category,
            _ => TagKind::Tag,
        }
    }

    fn into_item(self, views_count: Option<i64>) -> TagOrCategory {
        TagOrCategory {
            kind: self.tag_kind(),
            name: self.name,
            url: self.link,
            views_count,
            children: Vec::new(),
        }
    }
}

impl RemoteTagGroup {
    /// A single tag stays itself; several tags viewed together become a folder
    fn into_item(mut self) -> Option<TagOrCategory> {
        if self.tags.len() == 1 {
            return self.tags.pop().map(|tag| tag.into_item(self.views));
        }
        if self.tags.is_empty() {
            return None;
        }

        let name = self
            .tags
            .iter()
            .map(|tag| tag.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Some(TagOrCategory {
            name,
            kind: TagKind::Folder,
            url: None,
            views_count: self.views,
            children: self
                .tags
                .into_iter()
                .map(|tag| tag.into_item(None))
                .collect(),
        })
    }
}

impl From<CommentsResponse> for TopCommentsInsight {
    fn from(remote: CommentsResponse) -> Self {
        Self {
            top_authors: remote
                .authors
                .into_iter()
                .map(|author| CommentAuthor {
                    name: author.name,
                    comment_count: author.comments,
                    icon_url: author.gravatar,
                })
                .collect(),
            top_posts: remote
                .posts
                .into_iter()
                .map(|post| CommentedPost {
                    name: post.name,
                    comment_count: post.comments,
                    post_url: post.link,
                })
                .collect(),
        }
    }
}

/// Collapse per-post timestamps into one event per day, oldest first
fn posting_events(data: BTreeMap<String, i64>) -> Vec<PostingStreakEvent> {
    let mut per_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for (timestamp, count) in data {
        let Some(date) = timestamp
            .parse::<i64>()
            .ok()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .map(|moment| moment.date_naive())
        else {
            continue;
        };
        *per_day.entry(date).or_default() += count;
    }

    per_day
        .into_iter()
        .map(|(date, post_count)| PostingStreakEvent { date, post_count })
        .collect()
}

// ============================================================================
// StatsRemote
// ============================================================================

/// Client for the `{base}/rest/v1.1/sites/{id}/...` stats endpoints.
pub struct StatsRemote<C> {
    client: C,
    base_url: String,
    site_id: i64,
    token: String,
}

impl<C: HttpClient> StatsRemote<C> {
    pub fn new(client: C, base_url: &str, site_id: i64, token: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            site_id,
            token: token.into(),
        }
    }

    /// Client for `site_id`, or the default account's primary blog.
    pub fn for_account(
        accounts: &AccountSnapshot,
        site_id: Option<i64>,
        client: C,
        base_url: &str,
    ) -> Result<Self, SessionError> {
        let account = accounts
            .default_account
            .as_ref()
            .ok_or(SessionError::NoDefaultAccount)?;
        let site_id = site_id
            .or(account.primary_blog_id)
            .ok_or(SessionError::NoSiteId)?;
        let token = account
            .auth_token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or(SessionError::MissingToken)?;
        Ok(Self::new(client, base_url, site_id, token))
    }

    pub fn site_id(&self) -> i64 {
        self.site_id
    }

    fn site_url(&self, path: &str) -> String {
        format!("{}/rest/v1.1/sites/{}/{}", self.base_url, self.site_id, path)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> InsightsResult<T> {
        get_json(&self.client, &self.site_url(path), Some(&self.token)).await
    }

    // ========================================================================
    // Endpoints
    // ========================================================================

    pub async fn fetch_all_time_stats(&self) -> InsightsResult<AllTimeStats> {
        let response: StatsResponse = self.get("stats").await?;
        Ok(response.stats.into())
    }

    pub async fn fetch_todays_stats(&self) -> InsightsResult<TodaysStats> {
        let response: SummaryResponse = self.get("stats/summary").await?;
        Ok(response.into())
    }

    pub async fn fetch_annual_and_most_popular_time(
        &self,
    ) -> InsightsResult<AnnualAndMostPopularTime> {
        let response: InsightsResponse = self.get("stats/insights").await?;
        Ok(response.into())
    }

    pub async fn fetch_dot_com_followers(&self) -> InsightsResult<DotComFollowers> {
        let response: FollowersResponse = self
            .get(&format!("stats/followers?type=wpcom&max={}", FOLLOWERS_PAGE_SIZE))
            .await?;
        Ok(DotComFollowers {
            dot_com_followers_count: response.total,
            top_dot_com_followers: response.subscribers.into_iter().map(Follower::from).collect(),
        })
    }

    pub async fn fetch_email_followers(&self) -> InsightsResult<EmailFollowers> {
        let response: FollowersResponse = self
            .get(&format!("stats/followers?type=email&max={}", FOLLOWERS_PAGE_SIZE))
            .await?;
        Ok(EmailFollowers {
            email_followers_count: response.total,
            top_email_followers: response.subscribers.into_iter().map(Follower::from).collect(),
        })
    }

    pub async fn fetch_publicize(&self) -> InsightsResult<Publicize> {
        let response: PublicizeResponse = self.get("stats/publicize").await?;
        Ok(Publicize {
            publicize_services: response
                .services
                .into_iter()
                .map(|service| PublicizeService {
                    name: service.service,
                    followers: service.followers,
                    icon_url: None,
                })
                .collect(),
        })
    }

    pub async fn fetch_tags_and_categories(&self) -> InsightsResult<TopTagsAndCategories> {
        let response: TagsResponse = self
            .get(&format!("stats/tags?max={}", TAGS_PAGE_SIZE))
            .await?;
        Ok(TopTagsAndCategories {
            top_tags_and_categories: response
                .tags
                .into_iter()
                .filter_map(RemoteTagGroup::into_item)
                .collect(),
        })
    }

    pub async fn fetch_comments(&self) -> InsightsResult<TopCommentsInsight> {
        let response: CommentsResponse = self.get("stats/comments").await?;
        Ok(response.into())
    }

    /// Posting events between `start` and `end`, inclusive
    pub async fn fetch_posting_activity(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> InsightsResult<Vec<PostingStreakEvent>> {
        let response: StreakResponse = self
            .get(&format!(
                "stats/streak?startDate={}&endDate={}&max=5000",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ))
            .await?;
        Ok(posting_events(response.data))
    }

    /// The latest published post and its view history
    pub async fn fetch_last_post_insight(
        &self,
    ) -> InsightsResult<(Option<LastPostInsight>, Option<PostStats>)> {
        let response: PostsResponse = self
            .get("posts?order_by=date&number=1&type=post")
            .await?;
        let Some(post) = response.posts.into_iter().next() else {
            return Ok((None, None));
        };

        let history: PostStatsResponse = self.get(&format!("stats/post/{}", post.id)).await?;
        let insight = LastPostInsight {
            post_id: post.id,
            title: post.title,
            url: post.url,
            published_date: post.date,
            likes_count: post.like_count,
            comments_count: post.discussion.map_or(0, |d| d.comment_count),
            views_count: history.views,
        };
        let post_stats = PostStats {
            total_views: history.views,
            daily_views: history
                .data
                .into_iter()
                .map(|(date, views)| DailyViews { date, views })
                .collect(),
        };
        Ok((Some(insight), Some(post_stats)))
    }

    // ========================================================================
    // Store integration
    // ========================================================================

    /// Ask the store for a refresh and, if it accepts, load everything.
    ///
    /// Returns whether a load ran.
    pub async fn refresh(&self, store: &SharedInsightsStore, force: bool) -> bool {
        if !store.dispatch(InsightsAction::RefreshInsights { force }) {
            return false;
        }
        self.load_insights(store).await;
        true
    }

    /// Fetch every slice concurrently and dispatch each result.
    pub async fn load_insights(&self, store: &SharedInsightsStore) {
        let today = Local::now().date_naive();
        let year_ago = today
            .checked_sub_months(Months::new(12))
            .map(|d| d.with_day(1).unwrap_or(d))
            .unwrap_or(today - Duration::days(365));

        let (all_time, todays, annual, dot_com, email, publicize, tags, comments, streak, last_post) = tokio::join!(
            self.fetch_all_time_stats(),
            self.fetch_todays_stats(),
            self.fetch_annual_and_most_popular_time(),
            self.fetch_dot_com_followers(),
            self.fetch_email_followers(),
            self.fetch_publicize(),
            self.fetch_tags_and_categories(),
            self.fetch_comments(),
            self.fetch_posting_activity(year_ago, today),
            self.fetch_last_post_insight(),
        );

        dispatch_result(store, StoreSlice::AllTime, all_time, InsightsAction::ReceivedAllTimeStats);
        dispatch_result(store, StoreSlice::TodaysStats, todays, InsightsAction::ReceivedTodaysStats);
        dispatch_result(
            store,
            StoreSlice::AnnualAndMostPopularTime,
            annual,
            InsightsAction::ReceivedAnnualAndMostPopularTime,
        );
        let followers = dot_com.and_then(|dot_com| email.map(|email| (dot_com, email)));
        dispatch_result(store, StoreSlice::FollowersTotals, followers, |(dot_com, email)| {
            InsightsAction::ReceivedFollowers { dot_com, email }
        });
        dispatch_result(store, StoreSlice::Publicize, publicize, InsightsAction::ReceivedPublicize);
        dispatch_result(
            store,
            StoreSlice::TagsAndCategories,
            tags,
            InsightsAction::ReceivedTagsAndCategories,
        );
        dispatch_result(store, StoreSlice::Comments, comments, InsightsAction::ReceivedComments);
        dispatch_result(
            store,
            StoreSlice::PostingActivity,
            streak,
            InsightsAction::ReceivedPostingActivity,
        );
        dispatch_result(store, StoreSlice::LastPostSummary, last_post, |(insight, post_stats)| {
            InsightsAction::ReceivedLastPostInsight {
                insight,
                post_stats,
            }
        });

        info!(site_id = self.site_id, "Insights loaded");
    }
}

fn dispatch_result<T, F>(
    store: &SharedInsightsStore,
    slice: StoreSlice,
    result: InsightsResult<T>,
    received: F,
) where
    F: FnOnce(T) -> InsightsAction,
{
    let action = match result {
        Ok(value) => received(value),
        Err(err) => {
            warn!(?slice, code = err.error_code(), "Stats request failed: {}", err);
            InsightsAction::Failed(slice)
        }
    };
    store.dispatch(action);
}
