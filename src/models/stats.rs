//! Statistics snapshot types
//!
//! Plain data fetched from the stats API and cached by the insights store.
//! Nothing here knows how it is displayed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Totals
// ============================================================================

/// All-time totals for a site
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllTimeStats {
    pub posts_count: i64,
    pub views_count: i64,
    pub visitors_count: i64,
    pub best_views_per_day_count: i64,
    pub best_views_day: Option<NaiveDate>,
}

/// Totals for the current day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodaysStats {
    pub views_count: i64,
    pub visitors_count: i64,
    pub likes_count: i64,
    pub comments_count: i64,
}

// ============================================================================
// Annual / Most Popular Time
// ============================================================================

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Yearly totals plus the most popular weekday and hour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnualAndMostPopularTime {
    /// 0 = Monday ... 6 = Sunday
    pub most_popular_day_of_week: u32,
    pub most_popular_day_of_week_percentage: i64,
    /// 0 ..= 23
    pub most_popular_hour: u32,
    pub most_popular_hour_percentage: i64,

    pub annual_insights_year: i32,
    pub annual_insights_total_posts_count: i64,
    pub annual_insights_total_comments_count: i64,
    pub annual_insights_average_comments_count: f64,
    pub annual_insights_total_likes_count: i64,
    pub annual_insights_average_likes_count: f64,
    pub annual_insights_total_words_count: i64,
    pub annual_insights_average_words_count: f64,
}

impl AnnualAndMostPopularTime {
    /// Name of the most popular weekday, `None` when out of range
    pub fn formatted_most_popular_day(&self) -> Option<String> {
        WEEKDAY_NAMES
            .get(self.most_popular_day_of_week as usize)
            .map(|name| name.to_string())
    }

    /// Most popular hour on a 12-hour clock, e.g. `"2 PM"`
    pub fn formatted_most_popular_time(&self) -> Option<String> {
        let hour = self.most_popular_hour;
        if hour > 23 {
            return None;
        }
        let suffix = if hour < 12 { "AM" } else { "PM" };
        let display = match hour % 12 {
            0 => 12,
            h => h,
        };
        Some(format!("{} {}", display, suffix))
    }
}

// ============================================================================
// Latest Post
// ============================================================================

/// Summary of the most recently published post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastPostInsight {
    pub post_id: i64,
    pub title: String,
    pub url: Option<String>,
    pub published_date: DateTime<Utc>,
    pub likes_count: i64,
    pub comments_count: i64,
    pub views_count: i64,
}

/// Views for one day of a post's life
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyViews {
    pub date: NaiveDate,
    pub views: i64,
}

/// Per-post view history used for the latest post chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostStats {
    pub total_views: i64,
    pub daily_views: Vec<DailyViews>,
}

// ============================================================================
// Followers
// ============================================================================

/// A single follower shown in a follower tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Follower {
    pub name: String,
    pub subscribed_date: DateTime<Utc>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DotComFollowers {
    pub dot_com_followers_count: i64,
    pub top_dot_com_followers: Vec<Follower>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailFollowers {
    pub email_followers_count: i64,
    pub top_email_followers: Vec<Follower>,
}

/// A connected social service and its follower count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicizeService {
    pub name: String,
    pub followers: i64,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Publicize {
    pub publicize_services: Vec<PublicizeService>,
}

impl Publicize {
    /// Followers across all connected services
    pub fn total_followers(&self) -> i64 {
        self.publicize_services.iter().map(|s| s.followers).sum()
    }
}

// ============================================================================
// Tags and Categories
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    #[default]
    Tag,
    Category,
    /// A group of tags and categories viewed together
    Folder,
}

impl TagKind {
    /// Glyph used in place of the platform icon
    pub fn icon(&self) -> &'static str {
        match self {
            TagKind::Tag => "#",
            TagKind::Category => "▤",
            TagKind::Folder => "▸",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagOrCategory {
    pub name: String,
    pub kind: TagKind,
    pub url: Option<String>,
    pub views_count: Option<i64>,
    #[serde(default)]
    pub children: Vec<TagOrCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopTagsAndCategories {
    pub top_tags_and_categories: Vec<TagOrCategory>,
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub name: String,
    pub comment_count: i64,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentedPost {
    pub name: String,
    pub comment_count: i64,
    pub post_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopCommentsInsight {
    pub top_authors: Vec<CommentAuthor>,
    pub top_posts: Vec<CommentedPost>,
}

// ============================================================================
// Posting Activity
// ============================================================================

/// Number of posts published on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingStreakEvent {
    pub date: NaiveDate,
    pub post_count: i64,
}
