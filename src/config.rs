//! Application configuration.
//!
//! Defaults suit the public WordPress.com API. Every setting can be
//! overridden from the environment with [`AppConfig::from_env`].
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `SITE_INSIGHTS_API_URL` | REST API base URL |
//! | `SITE_INSIGHTS_APP` | `wordpress` or `jetpack` |
//! | `SITE_INSIGHTS_FEATURES` | Comma list of enabled feature flags |
//! | `SITE_INSIGHTS_CARDS` | Comma list of insight cards, in display order |
//! | `SITE_INSIGHTS_SITE_ID` | WordPress.com site id to show |
//! | `SITE_INSIGHTS_ACCOUNT_FILE` | Path of the account JSON file |

use std::path::PathBuf;

use crate::adapters::FileAccountStore;
use crate::error::{InsightsError, InsightsResult};
use crate::models::InsightType;

pub const DEFAULT_API_URL: &str = "https://public-api.wordpress.com";

pub const ENV_API_URL: &str = "SITE_INSIGHTS_API_URL";
pub const ENV_APP: &str = "SITE_INSIGHTS_APP";
pub const ENV_FEATURES: &str = "SITE_INSIGHTS_FEATURES";
pub const ENV_CARDS: &str = "SITE_INSIGHTS_CARDS";
pub const ENV_SITE_ID: &str = "SITE_INSIGHTS_SITE_ID";
pub const ENV_ACCOUNT_FILE: &str = "SITE_INSIGHTS_ACCOUNT_FILE";

/// Which app build this is; some experiments only run in one of them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppFlavor {
    #[default]
    WordPress,
    Jetpack,
}

impl AppFlavor {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wordpress" => Some(AppFlavor::WordPress),
            "jetpack" => Some(AppFlavor::Jetpack),
            _ => None,
        }
    }
}

/// Runtime feature flags for the Insights screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureFlags {
    /// Followers totals and most popular time use the redesigned cards
    pub stats_new_insights: bool,
    /// Cards drop headers and footers and get a section each
    pub stats_new_appearance: bool,
}

impl FeatureFlags {
    /// Parse a comma separated list of flag names.
    pub fn parse_list(list: &str) -> InsightsResult<Self> {
        let mut flags = FeatureFlags::default();
        for name in list.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            match name {
                "stats_new_insights" => flags.stats_new_insights = true,
                "stats_new_appearance" => flags.stats_new_appearance = true,
                other => {
                    return Err(InsightsError::config(
                        ENV_FEATURES,
                        format!("unknown feature flag '{}'", other),
                    ))
                }
            }
        }
        Ok(flags)
    }
}

/// Parse a comma separated list of insight card names.
pub fn parse_cards(list: &str) -> InsightsResult<Vec<InsightType>> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            InsightType::from_name(name).ok_or_else(|| {
                InsightsError::config(ENV_CARDS, format!("unknown insight card '{}'", name))
            })
        })
        .collect()
}

/// Configuration for the site insights client.
///
/// # Example
///
/// ```ignore
/// use site_insights::config::{AppConfig, AppFlavor};
///
/// let config = AppConfig::default()
///     .with_api_url("http://localhost:8080")
///     .with_flavor(AppFlavor::Jetpack);
/// ```
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// REST API base URL, without a trailing slash
    pub api_url: String,
    pub flavor: AppFlavor,
    pub features: FeatureFlags,
    /// Insight cards in display order
    pub cards: Vec<InsightType>,
    /// Site to show; the account's primary blog when unset
    pub site_id: Option<i64>,
    /// Account file; `~/.site-insights/account.json` when unset
    pub account_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            flavor: AppFlavor::default(),
            features: FeatureFlags::default(),
            cards: InsightType::default_cards(),
            site_id: None,
            account_path: None,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_flavor(mut self, flavor: AppFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    pub fn with_features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    pub fn with_cards(mut self, cards: Vec<InsightType>) -> Self {
        self.cards = cards;
        self
    }

    pub fn with_site_id(mut self, site_id: i64) -> Self {
        self.site_id = Some(site_id);
        self
    }

    pub fn with_account_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.account_path = Some(path.into());
        self
    }

    /// The account store this configuration points at.
    pub fn account_store(&self) -> InsightsResult<FileAccountStore> {
        match &self.account_path {
            Some(path) => Ok(FileAccountStore::at(path)),
            None => FileAccountStore::new().ok_or_else(|| {
                InsightsError::config(ENV_ACCOUNT_FILE, "cannot determine home directory")
            }),
        }
    }

    /// Read overrides from the process environment.
    pub fn from_env() -> InsightsResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup`, which returns a variable's value.
    pub fn from_lookup<F>(lookup: F) -> InsightsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_api_url(url.trim());
        }

        if let Some(app) = lookup(ENV_APP) {
            let flavor = AppFlavor::parse(&app).ok_or_else(|| {
                InsightsError::config(ENV_APP, format!("expected wordpress or jetpack, got '{}'", app))
            })?;
            config = config.with_flavor(flavor);
        }

        if let Some(features) = lookup(ENV_FEATURES) {
            config = config.with_features(FeatureFlags::parse_list(&features)?);
        }

        if let Some(cards) = lookup(ENV_CARDS) {
            config = config.with_cards(parse_cards(&cards)?);
        }

        if let Some(site_id) = lookup(ENV_SITE_ID) {
            let site_id = site_id.trim().parse::<i64>().map_err(|_| {
                InsightsError::config(ENV_SITE_ID, format!("not a site id: '{}'", site_id))
            })?;
            config = config.with_site_id(site_id);
        }

        if let Some(path) = lookup(ENV_ACCOUNT_FILE).filter(|v| !v.trim().is_empty()) {
            config = config.with_account_path(path);
        }

        Ok(config)
    }
}
