//! Mock servers and clients for test fixtures.
//!
//! Re-exports the in-crate mocks and mounts canned stats and prompts
//! responses on a wiremock server.

pub use site_insights::adapters::mock::{
    InMemoryAccountStore, MockHttpClient, MockResponse, RecordingExperimentPlatform,
};

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{TEST_SITE_ID, TEST_TOKEN};

fn site_path(suffix: &str) -> String {
    format!("/rest/v1.1/sites/{}/{}", TEST_SITE_ID, suffix)
}

async fn mount_json(server: &MockServer, route: String, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("Authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mount a successful response on every stats endpoint.
pub async fn mount_stats_endpoints(server: &MockServer) {
    mount_json(
        server,
        site_path("stats"),
        json!({"stats": {"posts": 42, "views": 12345, "visitors": 6789,
            "views_best_day": "2023-11-02", "views_best_day_total": 512}}),
    )
    .await;
    mount_json(
        server,
        site_path("stats/summary"),
        json!({"views": 20, "visitors": 8, "likes": 1, "comments": 0}),
    )
    .await;
    mount_json(
        server,
        site_path("stats/insights"),
        json!({"highest_hour": 14, "highest_hour_percent": 12.4, "highest_day_of_week": 2,
            "highest_day_percent": 30.2, "years": [{"year": "2024", "total_posts": 10}]}),
    )
    .await;

    Mock::given(method("GET"))
        .and(path(site_path("stats/followers")))
        .and(query_param("type", "wpcom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 12,
            "subscribers": [{"label": "ann", "avatar": "https://gravatar.example/ann",
                "date_subscribed": "2024-01-15T09:00:00+00:00"}]
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(site_path("stats/followers")))
        .and(query_param("type", "email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 5,
            "subscribers": [{"label": "cy@example.com",
                "date_subscribed": "2024-02-01T10:30:00+02:00"}]
        })))
        .mount(server)
        .await;

    mount_json(
        server,
        site_path("stats/publicize"),
        json!({"services": [{"service": "tumblr", "followers": 10}]}),
    )
    .await;
    mount_json(
        server,
        site_path("stats/tags"),
        json!({"tags": [{"views": 50, "tags": [{"type": "category", "name": "News"}]}]}),
    )
    .await;
    mount_json(
        server,
        site_path("stats/comments"),
        json!({"authors": [{"name": "ann", "comments": "4"}],
            "posts": [{"name": "Hello again", "comments": 2}]}),
    )
    .await;
    mount_json(
        server,
        site_path("stats/streak"),
        json!({"data": {"1713607200": 2}}),
    )
    .await;
    mount_json(
        server,
        site_path("posts"),
        json!({"found": 1, "posts": [{"ID": 9, "title": "Hello again",
            "URL": "https://tester.example.com/hello-again", "date": "2024-05-01T12:00:00+00:00",
            "like_count": 3, "discussion": {"comment_count": 2}}]}),
    )
    .await;
    mount_json(
        server,
        site_path("stats/post/9"),
        json!({"views": 40, "data": [["2024-05-01", 25], ["2024-05-02", 15]]}),
    )
    .await;
}

/// One prompt dated `date` in the prompts envelope.
pub fn prompt_body(id: i64, date: &str, answered: bool) -> serde_json::Value {
    json!({"prompts": [{
        "id": id,
        "text": "What&#8217;s on your mind?",
        "title": format!("Prompt number {}", id),
        "content": "",
        "date": date,
        "answered": answered,
        "answered_users_count": 2,
        "answered_users_sample": [{"avatar": "https://gravatar.example/1"}],
        "attribution": "dayone"
    }]})
}
