//! Common test utilities for integration tests.
//!
//! This module provides reusable account fixtures, a fully loaded insights
//! store, and wiremock helpers for the stats and prompts endpoints.
//!
//! # Example
//!
//! ```ignore
//! use common::{loaded_store, signed_in_snapshot};
//!
//! let store = loaded_store();
//! let accounts = signed_in_snapshot();
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use chrono::{NaiveDate, TimeZone, Utc};
use site_insights::models::{
    Account, AccountSnapshot, AllTimeStats, AnnualAndMostPopularTime, Blog, CommentAuthor,
    CommentedPost, DotComFollowers, EmailFollowers, Follower, LastPostInsight, PostStats,
    PostingStreakEvent, Publicize, PublicizeService, TagKind, TagOrCategory, TodaysStats,
    TopCommentsInsight, TopTagsAndCategories,
};
use site_insights::state::{InsightsAction, SharedInsightsStore};

pub const TEST_SITE_ID: i64 = 1001;
pub const TEST_TOKEN: &str = "test-auth-token";

/// The signed-in WordPress.com account used across tests.
pub fn test_account() -> Account {
    Account {
        user_id: 7,
        username: "tester".to_string(),
        primary_blog_id: Some(TEST_SITE_ID),
        auth_token: Some(TEST_TOKEN.to_string()),
    }
}

pub fn hosted_blog(name: &str) -> Blog {
    Blog {
        url: format!("https://{}.example.com", name),
        name: name.to_string(),
        dotcom_id: Some(TEST_SITE_ID),
        account_user_id: Some(7),
        is_jetpack: false,
    }
}

pub fn self_hosted_blog(name: &str) -> Blog {
    Blog {
        url: format!("https://{}.example.org", name),
        name: name.to_string(),
        dotcom_id: None,
        account_user_id: None,
        is_jetpack: false,
    }
}

/// A device signed in to [`test_account`] with one hosted blog.
pub fn signed_in_snapshot() -> AccountSnapshot {
    AccountSnapshot {
        default_account: Some(test_account()),
        other_accounts: Vec::new(),
        blogs: vec![hosted_blog("tester")],
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

fn follower(name: &str) -> Follower {
    Follower {
        name: name.to_string(),
        subscribed_date: Utc
            .with_ymd_and_hms(2024, 1, 15, 9, 0, 0)
            .single()
            .expect("valid test timestamp"),
        avatar_url: None,
    }
}

/// Every action that fills one slice, each with non-trivial data.
pub fn received_actions() -> Vec<InsightsAction> {
    vec![
        InsightsAction::ReceivedAllTimeStats(AllTimeStats {
            posts_count: 42,
            views_count: 12_345,
            visitors_count: 6_789,
            best_views_per_day_count: 512,
            best_views_day: Some(date(2023, 11, 2)),
        }),
        InsightsAction::ReceivedLastPostInsight {
            insight: Some(LastPostInsight {
                post_id: 9,
                title: "Hello again".to_string(),
                url: Some("https://tester.example.com/hello-again".to_string()),
                published_date: Utc
                    .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
                    .single()
                    .expect("valid test timestamp"),
                likes_count: 3,
                comments_count: 2,
                views_count: 40,
            }),
            post_stats: Some(PostStats {
                total_views: 40,
                daily_views: Vec::new(),
            }),
        },
        InsightsAction::ReceivedFollowers {
            dot_com: DotComFollowers {
                dot_com_followers_count: 12,
                top_dot_com_followers: vec![follower("ann"), follower("bo")],
            },
            email: EmailFollowers {
                email_followers_count: 5,
                top_email_followers: vec![follower("cy")],
            },
        },
        InsightsAction::ReceivedAnnualAndMostPopularTime(AnnualAndMostPopularTime {
            most_popular_day_of_week: 2,
            most_popular_day_of_week_percentage: 30,
            most_popular_hour: 14,
            most_popular_hour_percentage: 12,
            annual_insights_year: 2024,
            annual_insights_total_posts_count: 10,
            ..Default::default()
        }),
        InsightsAction::ReceivedTagsAndCategories(TopTagsAndCategories {
            top_tags_and_categories: vec![TagOrCategory {
                name: "News".to_string(),
                kind: TagKind::Category,
                url: None,
                views_count: Some(50),
                children: Vec::new(),
            }],
        }),
        InsightsAction::ReceivedComments(TopCommentsInsight {
            top_authors: vec![CommentAuthor {
                name: "ann".to_string(),
                comment_count: 4,
                icon_url: None,
            }],
            top_posts: vec![CommentedPost {
                name: "Hello again".to_string(),
                comment_count: 2,
                post_url: None,
            }],
        }),
        InsightsAction::ReceivedTodaysStats(TodaysStats {
            views_count: 20,
            visitors_count: 8,
            likes_count: 1,
            comments_count: 0,
        }),
        InsightsAction::ReceivedPostingActivity(vec![PostingStreakEvent {
            date: date(2024, 4, 20),
            post_count: 2,
        }]),
        InsightsAction::ReceivedPublicize(Publicize {
            publicize_services: vec![PublicizeService {
                name: "Tumblr".to_string(),
                followers: 10,
                icon_url: None,
            }],
        }),
    ]
}

/// A store where every slice finished successfully.
pub fn loaded_store() -> SharedInsightsStore {
    let store = SharedInsightsStore::default();
    store.dispatch(InsightsAction::RefreshInsights { force: true });
    for action in received_actions() {
        store.dispatch(action);
    }
    store
}
