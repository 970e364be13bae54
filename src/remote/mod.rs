//! REST clients
//!
//! - [`BloggingPromptsService`]: date-ranged blogging prompt fetches
//! - [`StatsRemote`]: insights statistics, dispatched into the store
//!
//! Requests are sent once. There are no retries, timeouts or backoff beyond
//! what the [`HttpClient`] itself does.

pub mod prompts;
pub mod stats;

pub use prompts::{BloggingPromptsService, DEFAULT_PROMPT_COUNT};
pub use stats::StatsRemote;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{InsightsResult, NetworkError};
use crate::traits::{bearer_headers, Headers, HttpClient};

/// GET `url` and decode a JSON body.
///
/// Non-2xx statuses become [`NetworkError::HttpStatus`] and undecodable
/// bodies become [`NetworkError::InvalidResponse`].
pub(crate) async fn get_json<C, T>(client: &C, url: &str, token: Option<&str>) -> InsightsResult<T>
where
    C: HttpClient + ?Sized,
    T: DeserializeOwned,
{
    let headers = match token {
        Some(token) => bearer_headers(token),
        None => {
            let mut headers = Headers::new();
            headers.insert("Accept".to_string(), "application/json".to_string());
            headers
        }
    };

    debug!(url, "GET");
    let response = client
        .get(url, &headers)
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|err| NetworkError::from_http(err, url))?;

    Ok(response.json::<T>().map_err(NetworkError::from)?)
}
