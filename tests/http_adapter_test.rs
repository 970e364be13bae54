//! ReqwestHttpClient tests using wiremock.

use site_insights::adapters::reqwest_http::USER_AGENT;
use site_insights::adapters::ReqwestHttpClient;
use site_insights::traits::{bearer_headers, Headers, HttpClient};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_get_sends_headers_and_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("Authorization", "Bearer abc"))
        .and(header("Accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Request-Id", "r-1")
                .set_body_string(r#"{"ok": true}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ReqwestHttpClient::new();
    let response = client
        .get(&format!("{}/ping", server.uri()), &bearer_headers("abc"))
        .await
        .expect("request succeeds");

    assert!(response.is_success());
    assert_eq!(response.headers.get("x-request-id"), Some(&"r-1".to_string()));
    let body: serde_json::Value = response.json().expect("json body");
    assert_eq!(body["ok"], true);

    let requests = server.received_requests().await.unwrap_or_default();
    let user_agent = requests[0]
        .headers
        .get("user-agent")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(user_agent.starts_with("site-insights/"));
}

#[tokio::test]
async fn test_wrapped_client_sends_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("User-Agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let response = ReqwestHttpClient::with_client(reqwest::Client::new())
        .get(&format!("{}/ping", server.uri()), &Headers::new())
        .await
        .expect("request succeeds");
    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn test_error_status_is_a_response_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"error": "unknown_blog", "message": "Unknown blog"}"#,
        ))
        .mount(&server)
        .await;

    let response = ReqwestHttpClient::new()
        .get(&format!("{}/missing", server.uri()), &Headers::new())
        .await
        .expect("transport succeeds");
    assert_eq!(response.status, 404);
    assert_eq!(response.api_error_message(), "Unknown blog");
    assert!(response.error_for_status().is_err());
}

#[tokio::test]
async fn test_invalid_url_is_an_error() {
    let result = ReqwestHttpClient::new()
        .get("not a url", &Headers::new())
        .await;
    assert!(result.is_err());
}
