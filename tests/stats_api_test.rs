//! Stats endpoint tests using wiremock.
//!
//! A full refresh goes through the reqwest adapter, lands every slice in the
//! store and projects into a table with no ghosts or errors.

mod common;

use common::{mount_stats_endpoints, signed_in_snapshot, TEST_SITE_ID};
use site_insights::adapters::ReqwestHttpClient;
use site_insights::config::FeatureFlags;
use site_insights::models::{InsightType, TagKind};
use site_insights::remote::StatsRemote;
use site_insights::state::{FetchStatus, SharedInsightsStore, StoreSlice};
use site_insights::view_model::{Row, SiteStatsInsightsViewModel};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn remote(server: &MockServer) -> StatsRemote<ReqwestHttpClient> {
    StatsRemote::for_account(
        &signed_in_snapshot(),
        None,
        ReqwestHttpClient::new(),
        &server.uri(),
    )
    .expect("signed-in snapshot has a token and site")
}

#[tokio::test]
async fn test_refresh_loads_every_slice() {
    let server = MockServer::start().await;
    mount_stats_endpoints(&server).await;

    let store = SharedInsightsStore::default();
    assert!(remote(&server).refresh(&store, false).await);

    let snapshot = store.read();
    for slice in StoreSlice::ALL {
        assert_eq!(snapshot.status(slice), FetchStatus::Success, "{:?}", slice);
    }
    assert!(!snapshot.is_refreshing());
    assert!(snapshot.last_refreshed().is_some());

    assert_eq!(snapshot.all_time_stats().map(|s| s.views_count), Some(12_345));
    assert_eq!(snapshot.total_follower_count(), 27);
    assert_eq!(
        snapshot
            .annual_and_most_popular_time()
            .map(|a| (a.most_popular_hour_percentage, a.annual_insights_year)),
        Some((12, 2024))
    );
    assert_eq!(
        snapshot
            .top_tags_and_categories()
            .map(|t| t.top_tags_and_categories[0].kind),
        Some(TagKind::Category)
    );
    assert_eq!(
        snapshot.top_comments_insight().map(|c| c.top_authors[0].comment_count),
        Some(4)
    );
    assert_eq!(snapshot.posting_activity().len(), 1);
    assert_eq!(snapshot.post_stats().map(|p| p.daily_views.len()), Some(2));
    assert_eq!(
        snapshot.last_post_insight().map(|p| p.views_count),
        Some(40)
    );
}

#[tokio::test]
async fn test_second_refresh_is_throttled() {
    let server = MockServer::start().await;
    mount_stats_endpoints(&server).await;
    let store = SharedInsightsStore::default();
    let remote = remote(&server);

    assert!(remote.refresh(&store, false).await);
    let first = server.received_requests().await.unwrap_or_default().len();

    assert!(!remote.refresh(&store, false).await);
    assert_eq!(server.received_requests().await.unwrap_or_default().len(), first);

    assert!(remote.refresh(&store, true).await);
    assert!(server.received_requests().await.unwrap_or_default().len() > first);
}

#[tokio::test]
async fn test_failed_endpoint_only_fails_its_slice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/rest/v1.1/sites/{}/stats/comments", TEST_SITE_ID)))
        .respond_with(ResponseTemplate::new(503))
        .with_priority(1)
        .mount(&server)
        .await;
    mount_stats_endpoints(&server).await;

    let store = SharedInsightsStore::default();
    remote(&server).refresh(&store, true).await;

    {
        let snapshot = store.read();
        assert_eq!(snapshot.status(StoreSlice::Comments), FetchStatus::Error);
        assert_eq!(snapshot.status(StoreSlice::AllTime), FetchStatus::Success);
        assert!(!snapshot.fetching_failed());
    }

    let mut view_model = SiteStatsInsightsViewModel::new(
        vec![InsightType::AllTimeStats, InsightType::Comments],
        store.clone(),
        None,
        FeatureFlags::default(),
    );
    let table = view_model.table_view_model();
    let terminals: Vec<&Row> = table
        .rows()
        .into_iter()
        .filter(|row| row.is_terminal())
        .collect();
    assert!(matches!(terminals[0], Row::TwoColumnStats { .. }));
    assert_eq!(terminals[1], &Row::Error);
}

#[tokio::test]
async fn test_everything_failing_marks_fetch_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = SharedInsightsStore::default();
    remote(&server).refresh(&store, true).await;

    assert!(store.read().fetching_failed());
    let mut view_model = SiteStatsInsightsViewModel::new(
        InsightType::default_cards(),
        store.clone(),
        None,
        FeatureFlags::default(),
    );
    assert!(view_model.table_view_model().is_empty());
}
