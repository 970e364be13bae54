//! Mock HTTP client for testing.
//!
//! Responses are keyed by URL. A key matches exactly, or as a prefix of the
//! requested URL; the longest matching prefix wins so `/stats` and
//! `/stats/insights` can be mocked side by side.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Headers,
}

impl RecordedRequest {
    /// Value of a query parameter in the recorded URL
    pub fn query_param(&self, name: &str) -> Option<String> {
        let (_, query) = self.url.split_once('?')?;
        query.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.to_string())
        })
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Return a transport error
    Error(HttpError),
}

impl MockResponse {
    /// A response with a JSON body
    pub fn json(status: u16, body: &str) -> Self {
        MockResponse::Success(Response::new(status, Bytes::from(body.to_string())))
    }
}

/// Mock HTTP client for testing.
///
/// Clones share configured responses and recorded requests.
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a URL or URL prefix.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, url: &str, headers: &Headers) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        let longest_prefix = responses
            .iter()
            .filter(|(pattern, _)| url.starts_with(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, response)| response.clone());
        if longest_prefix.is_some() {
            return longest_prefix;
        }

        self.default_response.lock().unwrap().clone()
    }

    fn respond(&self, url: &str) -> Result<Response, HttpError> {
        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record_request(url, headers);
        self.respond(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_with_response() {
        let client = MockHttpClient::new();
        client.set_response("https://example.com/test", MockResponse::json(200, "Hello"));

        let response = client
            .get("https://example.com/test", &Headers::new())
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, Bytes::from("Hello"));

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://example.com/test");
    }

    #[tokio::test]
    async fn test_get_with_error() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://example.com/error",
            MockResponse::Error(HttpError::Timeout("30s".to_string())),
        );

        let result = client.get("https://example.com/error", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_no_response_configured() {
        let client = MockHttpClient::new();
        let result = client.get("https://example.com/missing", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_default_response() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::json(404, "Not Found"));

        let response = client
            .get("https://example.com/anything", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let client = MockHttpClient::new();
        client.set_response("https://example.com/stats", MockResponse::json(200, "summary"));
        client.set_response(
            "https://example.com/stats/insights",
            MockResponse::json(200, "insights"),
        );

        let insights = client
            .get("https://example.com/stats/insights?x=1", &Headers::new())
            .await
            .unwrap();
        assert_eq!(insights.body, Bytes::from("insights"));

        let summary = client
            .get("https://example.com/stats?y=2", &Headers::new())
            .await
            .unwrap();
        assert_eq!(summary.body, Bytes::from("summary"));
    }

    #[test]
    fn test_query_param() {
        let request = RecordedRequest {
            url: "https://example.com/p?number=1&from=2022-05-03".to_string(),
            headers: Headers::new(),
        };
        assert_eq!(request.query_param("number"), Some("1".to_string()));
        assert_eq!(request.query_param("from"), Some("2022-05-03".to_string()));
        assert_eq!(request.query_param("missing"), None);
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let client = MockHttpClient::new();
        client.set_response("https://example.com", MockResponse::json(200, "Hello"));

        let cloned = client.clone();
        cloned.get("https://example.com", &Headers::new()).await.unwrap();

        assert_eq!(client.get_requests().len(), 1);
        client.clear_requests();
        assert!(cloned.get_requests().is_empty());
    }
}
