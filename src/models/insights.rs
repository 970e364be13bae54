//! Insight card tags and stat section identities
//!
//! An [`InsightType`] names one dashboard card. A [`StatSection`] names the
//! header, tab or data kind a row belongs to and carries its display labels.

use serde::{Deserialize, Serialize};

// ============================================================================
// Insight Type
// ============================================================================

/// A statistics card the user can add to the Insights dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    GrowAudience,
    LatestPostSummary,
    AllTimeStats,
    FollowersTotals,
    MostPopularTime,
    TagsAndCategories,
    AnnualSiteStats,
    Comments,
    Followers,
    TodaysStats,
    PostingActivity,
    Publicize,
    /// Any card this client does not know how to draw
    #[serde(other)]
    Custom,
}

impl InsightType {
    /// Every card that produces rows, in catalogue order
    pub const ALL: [InsightType; 12] = [
        InsightType::GrowAudience,
        InsightType::LatestPostSummary,
        InsightType::AllTimeStats,
        InsightType::FollowersTotals,
        InsightType::MostPopularTime,
        InsightType::TagsAndCategories,
        InsightType::AnnualSiteStats,
        InsightType::Comments,
        InsightType::Followers,
        InsightType::TodaysStats,
        InsightType::PostingActivity,
        InsightType::Publicize,
    ];

    /// Cards shown to a user who never customised the dashboard
    pub fn default_cards() -> Vec<InsightType> {
        vec![
            InsightType::GrowAudience,
            InsightType::LatestPostSummary,
            InsightType::TodaysStats,
            InsightType::AllTimeStats,
            InsightType::MostPopularTime,
            InsightType::Comments,
        ]
    }

    /// Parse a card name as it appears in configuration (`snake_case`).
    ///
    /// Returns `None` for unknown names instead of mapping them to `Custom`,
    /// so configuration typos are reported.
    pub fn from_name(name: &str) -> Option<InsightType> {
        let name = name.trim();
        InsightType::ALL.into_iter().find(|t| t.name() == name)
    }

    /// The configuration name of this card
    pub fn name(&self) -> &'static str {
        match self {
            InsightType::GrowAudience => "grow_audience",
            InsightType::LatestPostSummary => "latest_post_summary",
            InsightType::AllTimeStats => "all_time_stats",
            InsightType::FollowersTotals => "followers_totals",
            InsightType::MostPopularTime => "most_popular_time",
            InsightType::TagsAndCategories => "tags_and_categories",
            InsightType::AnnualSiteStats => "annual_site_stats",
            InsightType::Comments => "comments",
            InsightType::Followers => "followers",
            InsightType::TodaysStats => "todays_stats",
            InsightType::PostingActivity => "posting_activity",
            InsightType::Publicize => "publicize",
            InsightType::Custom => "custom",
        }
    }

    /// The header section drawn above this card, if it has one.
    ///
    /// Grow audience is a nudge card and has no header.
    pub fn header_section(&self) -> Option<StatSection> {
        match self {
            InsightType::GrowAudience | InsightType::Custom => None,
            InsightType::LatestPostSummary => Some(StatSection::InsightsLatestPostSummary),
            InsightType::AllTimeStats => Some(StatSection::InsightsAllTime),
            InsightType::FollowersTotals => Some(StatSection::InsightsFollowerTotals),
            InsightType::MostPopularTime => Some(StatSection::InsightsMostPopularTime),
            InsightType::TagsAndCategories => Some(StatSection::InsightsTagsAndCategories),
            InsightType::AnnualSiteStats => Some(StatSection::InsightsAnnualSiteStats),
            InsightType::Comments => Some(StatSection::InsightsCommentsPosts),
            InsightType::Followers => Some(StatSection::InsightsFollowersWordPress),
            InsightType::TodaysStats => Some(StatSection::InsightsTodaysStats),
            InsightType::PostingActivity => Some(StatSection::InsightsPostingActivity),
            InsightType::Publicize => Some(StatSection::InsightsPublicize),
        }
    }
}

// ============================================================================
// Stat Section
// ============================================================================

/// Identity of a header, tab or data row on the Insights screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatSection {
    InsightsLatestPostSummary,
    InsightsAllTime,
    InsightsFollowerTotals,
    InsightsMostPopularTime,
    InsightsTagsAndCategories,
    InsightsAnnualSiteStats,
    InsightsCommentsAuthors,
    InsightsCommentsPosts,
    InsightsFollowersWordPress,
    InsightsFollowersEmail,
    InsightsTodaysStats,
    InsightsPostingActivity,
    InsightsPublicize,
    InsightsAddInsight,
}

impl StatSection {
    /// Card title shown in the header row
    pub fn title(&self) -> &'static str {
        match self {
            StatSection::InsightsLatestPostSummary => "Latest Post Summary",
            StatSection::InsightsAllTime => "All-Time",
            StatSection::InsightsFollowerTotals => "Total Followers",
            StatSection::InsightsMostPopularTime => "Most Popular Time",
            StatSection::InsightsTagsAndCategories => "Tags and Categories",
            StatSection::InsightsAnnualSiteStats => "This Year",
            StatSection::InsightsCommentsAuthors | StatSection::InsightsCommentsPosts => {
                "Comments"
            }
            StatSection::InsightsFollowersWordPress | StatSection::InsightsFollowersEmail => {
                "Followers"
            }
            StatSection::InsightsTodaysStats => "Today",
            StatSection::InsightsPostingActivity => "Posting Activity",
            StatSection::InsightsPublicize => "Publicize",
            StatSection::InsightsAddInsight => "Add stats card",
        }
    }

    /// Title of the tab this section occupies in a tabbed card
    pub fn tab_title(&self) -> &'static str {
        match self {
            StatSection::InsightsCommentsAuthors => "Authors",
            StatSection::InsightsCommentsPosts => "Posts and Pages",
            StatSection::InsightsFollowersWordPress => "WordPress.com",
            StatSection::InsightsFollowersEmail => "Email",
            _ => "",
        }
    }

    /// Column label for the item names
    pub fn item_subtitle(&self) -> &'static str {
        match self {
            StatSection::InsightsCommentsAuthors => "Author",
            StatSection::InsightsCommentsPosts => "Title",
            StatSection::InsightsTagsAndCategories => "Title",
            StatSection::InsightsFollowersWordPress | StatSection::InsightsFollowersEmail => {
                "Follower"
            }
            StatSection::InsightsPublicize => "Service",
            _ => "",
        }
    }

    /// Column label for the item values
    pub fn data_subtitle(&self) -> &'static str {
        match self {
            StatSection::InsightsCommentsAuthors | StatSection::InsightsCommentsPosts => {
                "Comments"
            }
            StatSection::InsightsTagsAndCategories => "Views",
            StatSection::InsightsFollowersWordPress | StatSection::InsightsFollowersEmail => {
                "Since"
            }
            StatSection::InsightsPublicize => "Followers",
            _ => "",
        }
    }

    /// Total-followers caption for a follower tab, `None` for other sections
    pub fn total_followers(&self, count: &str) -> Option<String> {
        match self {
            StatSection::InsightsFollowersWordPress => {
                Some(format!("Total WordPress.com Followers: {}", count))
            }
            StatSection::InsightsFollowersEmail => {
                Some(format!("Total Email Followers: {}", count))
            }
            _ => None,
        }
    }
}
