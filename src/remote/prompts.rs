//! Blogging prompts service.
//!
//! Fetches prompts for one site from
//! `{base}/wpcom/v2/sites/{site_id}/blogging-prompts`. Prompts are not cached;
//! every call goes to the network.

use chrono::{Duration, Local, NaiveDate};
use tracing::{error, warn};

use crate::error::{InsightsResult, SessionError};
use crate::models::{AccountSnapshot, Blog, BloggingPrompt, RemotePromptsEnvelope};
use crate::traits::HttpClient;

use super::get_json;

/// Prompts fetched when no count is given
pub const DEFAULT_PROMPT_COUNT: usize = 24;
/// Days back from today when no start date is given
pub const DEFAULT_DAYS_BACK: i64 = 10;
/// The prompts list shows today and this many previous days
pub const LIST_DAYS_BACK: i64 = 9;
pub const LIST_PROMPT_COUNT: usize = 11;

pub struct BloggingPromptsService<C> {
    client: C,
    base_url: String,
    site_id: i64,
    token: Option<String>,
    today: Option<NaiveDate>,
}

impl<C: HttpClient> BloggingPromptsService<C> {
    /// Service for `blog`, or the default account's primary blog.
    ///
    /// Returns `None`, after logging why, when there is no default
    /// WordPress.com account or no site id can be resolved.
    pub fn new(
        accounts: &AccountSnapshot,
        blog: Option<&Blog>,
        client: C,
        base_url: &str,
    ) -> Option<Self> {
        match Self::try_new(accounts, blog, client, base_url) {
            Ok(service) => Some(service),
            Err(err) => {
                error!(code = err.error_code(), "Blogging prompts unavailable: {}", err);
                None
            }
        }
    }

    pub fn try_new(
        accounts: &AccountSnapshot,
        blog: Option<&Blog>,
        client: C,
        base_url: &str,
    ) -> Result<Self, SessionError> {
        let account = accounts
            .default_account
            .as_ref()
            .ok_or(SessionError::NoDefaultAccount)?;
        let site_id = blog
            .and_then(|b| b.dotcom_id)
            .or(account.primary_blog_id)
            .ok_or(SessionError::NoSiteId)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            site_id,
            token: account.auth_token.clone(),
            today: None,
        })
    }

    /// Pin "today" instead of reading the local clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn site_id(&self) -> i64 {
        self.site_id
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn prompts_url(&self, from: NaiveDate, number: usize) -> String {
        format!(
            "{}/wpcom/v2/sites/{}/blogging-prompts?number={}&from={}",
            self.base_url,
            self.site_id,
            number,
            from.format("%Y-%m-%d")
        )
    }

    /// Fetch `number` prompts starting at `from`.
    ///
    /// Defaults to 24 prompts starting ten days ago.
    pub async fn fetch_prompts(
        &self,
        from: Option<NaiveDate>,
        number: Option<usize>,
    ) -> InsightsResult<Vec<BloggingPrompt>> {
        let from = from.unwrap_or_else(|| self.today() - Duration::days(DEFAULT_DAYS_BACK));
        let number = number.unwrap_or(DEFAULT_PROMPT_COUNT);
        let url = self.prompts_url(from, number);

        let envelope: RemotePromptsEnvelope = get_json(&self.client, &url, self.token.as_deref())
            .await
            .map_err(|err| {
                warn!(site_id = self.site_id, code = err.error_code(), "Failed to fetch prompts: {}", err);
                err
            })?;

        Ok(envelope
            .prompts
            .into_iter()
            .map(BloggingPrompt::from)
            .collect())
    }

    /// The prompt for the current day, if the server has one.
    ///
    /// A prompt dated any other day is dropped.
    pub async fn fetch_todays_prompt(&self) -> InsightsResult<Option<BloggingPrompt>> {
        let today = self.today();
        let prompts = self.fetch_prompts(Some(today), Some(1)).await?;
        let prompt = prompts.into_iter().next();
        if let Some(other) = prompt.as_ref().filter(|p| p.date != today) {
            warn!(site_id = self.site_id, date = %other.date, "Ignoring prompt not dated today");
        }
        Ok(prompt.filter(|p| p.date == today))
    }

    /// Prompts for the list screen: today and the nine days before
    pub async fn fetch_list_prompts(&self) -> InsightsResult<Vec<BloggingPrompt>> {
        let from = self.today() - Duration::days(LIST_DAYS_BACK);
        self.fetch_prompts(Some(from), Some(LIST_PROMPT_COUNT)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::error::{InsightsError, NetworkError};
    use crate::models::Account;
    use crate::traits::HttpError;

    const BASE: &str = "https://api.example.com";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 13).unwrap()
    }

    fn accounts(primary_blog_id: Option<i64>) -> AccountSnapshot {
        AccountSnapshot {
            default_account: Some(Account {
                user_id: 1,
                username: "writer".to_string(),
                primary_blog_id,
                auth_token: Some("secret".to_string()),
            }),
            ..Default::default()
        }
    }

    fn blog(dotcom_id: Option<i64>) -> Blog {
        Blog {
            url: "https://blog.example.com".to_string(),
            name: "Blog".to_string(),
            dotcom_id,
            account_user_id: Some(1),
            is_jetpack: false,
        }
    }

    fn service(client: MockHttpClient) -> BloggingPromptsService<MockHttpClient> {
        BloggingPromptsService::new(&accounts(Some(77)), None, client, BASE)
            .unwrap()
            .with_today(today())
    }

    fn prompt_json(id: i64, date: &str) -> String {
        format!(
            r#"{{"id": {}, "text": "Prompt {}", "title": "", "content": "", "date": "{}",
                "answered": false, "answered_users_count": 0, "answered_users_sample": [],
                "attribution": ""}}"#,
            id, id, date
        )
    }

    #[test]
    fn test_no_default_account() {
        let result = BloggingPromptsService::try_new(
            &AccountSnapshot::default(),
            None,
            MockHttpClient::new(),
            BASE,
        );
        assert!(matches!(result, Err(SessionError::NoDefaultAccount)));
        assert!(
            BloggingPromptsService::new(&AccountSnapshot::default(), None, MockHttpClient::new(), BASE)
                .is_none()
        );
    }

    #[test]
    fn test_no_site_id() {
        let result = BloggingPromptsService::try_new(
            &accounts(None),
            Some(&blog(None)),
            MockHttpClient::new(),
            BASE,
        );
        assert!(matches!(result, Err(SessionError::NoSiteId)));
    }

    #[test]
    fn test_blog_site_id_preferred_over_primary_blog() {
        let service =
            BloggingPromptsService::new(&accounts(Some(77)), Some(&blog(Some(5))), MockHttpClient::new(), BASE)
                .unwrap();
        assert_eq!(service.site_id(), 5);

        let service =
            BloggingPromptsService::new(&accounts(Some(77)), Some(&blog(None)), MockHttpClient::new(), BASE)
                .unwrap();
        assert_eq!(service.site_id(), 77);
    }

    #[tokio::test]
    async fn test_fetch_prompts_defaults() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::json(
            200,
            &format!(r#"{{"prompts": [{}]}}"#, prompt_json(1, "2024-05-03")),
        ));

        let prompts = service(client.clone()).fetch_prompts(None, None).await.unwrap();
        assert_eq!(prompts.len(), 1);

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0]
            .url
            .starts_with("https://api.example.com/wpcom/v2/sites/77/blogging-prompts?"));
        assert_eq!(requests[0].query_param("number"), Some("24".to_string()));
        assert_eq!(requests[0].query_param("from"), Some("2024-05-03".to_string()));
        assert_eq!(
            requests[0].headers.get("Authorization"),
            Some(&"Bearer secret".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_todays_prompt() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::json(
            200,
            &format!(r#"{{"prompts": [{}]}}"#, prompt_json(9, "2024-05-13")),
        ));

        let prompt = service(client.clone())
            .fetch_todays_prompt()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(prompt.prompt_id, 9);
        assert_eq!(prompt.date, today());

        let request = &client.get_requests()[0];
        assert_eq!(request.query_param("number"), Some("1".to_string()));
        assert_eq!(request.query_param("from"), Some("2024-05-13".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_todays_prompt_when_none() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::json(200, r#"{"prompts": []}"#));
        assert_eq!(service(client).fetch_todays_prompt().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fetch_todays_prompt_ignores_other_days() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::json(
            200,
            &format!(r#"{{"prompts": [{}]}}"#, prompt_json(8, "2024-05-12")),
        ));
        assert_eq!(service(client).fetch_todays_prompt().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fetch_list_prompts_range() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::json(200, r#"{"prompts": []}"#));
        service(client.clone()).fetch_list_prompts().await.unwrap();

        let request = &client.get_requests()[0];
        assert_eq!(request.query_param("number"), Some("11".to_string()));
        assert_eq!(request.query_param("from"), Some("2024-05-04".to_string()));
    }

    #[tokio::test]
    async fn test_http_failure_maps_to_network_error() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::json(
            403,
            r#"{"error": "unauthorized", "message": "Not allowed"}"#,
        ));

        let err = service(client).fetch_prompts(None, None).await.unwrap_err();
        assert!(matches!(
            err,
            InsightsError::Network(NetworkError::HttpStatus { status: 403, ref message }) if message == "Not allowed"
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Error(HttpError::Timeout("slow".to_string())));

        let err = service(client.clone()).fetch_todays_prompt().await.unwrap_err();
        assert!(matches!(err, InsightsError::Network(NetworkError::Timeout { .. })));
        assert_eq!(client.get_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::json(200, "<html>"));
        let err = service(client).fetch_prompts(None, None).await.unwrap_err();
        assert!(matches!(
            err,
            InsightsError::Network(NetworkError::InvalidResponse { .. })
        ));
    }
}
