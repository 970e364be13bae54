//! Reqwest-based HTTP client adapter.
//!
//! Production implementation of [`HttpClient`]. Non-2xx statuses are
//! returned as responses; callers decide with [`Response::error_for_status`].
//!
//! [`Response::error_for_status`]: crate::traits::Response::error_for_status

use async_trait::async_trait;

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("site-insights/", env!("CARGO_PKG_VERSION"));

/// HTTP client implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use site_insights::adapters::ReqwestHttpClient;
/// use site_insights::traits::{Headers, HttpClient};
///
/// let client = ReqwestHttpClient::new();
/// let response = client.get("https://public-api.wordpress.com/rest/v1.1/me", &Headers::new()).await?;
/// println!("Status: {}", response.status);
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a client with default settings.
    ///
    /// [`USER_AGENT`] is sent per request, so clients passed to
    /// [`with_client`](Self::with_client) send it too.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Wrap a preconfigured reqwest::Client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    fn convert_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_connect() {
            HttpError::ConnectionFailed(err.to_string())
        } else if err.is_builder() {
            HttpError::InvalidUrl(err.to_string())
        } else if err.is_body() || err.is_decode() {
            HttpError::Io(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }

    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    fn apply_headers(
        builder: reqwest::RequestBuilder,
        headers: &Headers,
    ) -> reqwest::RequestBuilder {
        headers.iter().fold(
            builder.header(reqwest::header::USER_AGENT, USER_AGENT),
            |builder, (key, value)| builder.header(key, value),
        )
    }

    async fn send(builder: reqwest::RequestBuilder) -> Result<Response, HttpError> {
        let response = builder.send().await.map_err(Self::convert_error)?;

        let status = response.status().as_u16();
        let headers = Self::convert_headers(response.headers());
        let body = response.bytes().await.map_err(Self::convert_error)?;

        Ok(Response::with_headers(status, headers, body))
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        let builder = Self::apply_headers(self.client.get(url), headers);
        Self::send(builder).await
    }
}
