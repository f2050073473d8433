//! Configuration for stock report operations

use crate::error::{Result, StockError};
use crate::profile::ProfileMapping;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

/// Environment variable holding the Finnhub API key
pub const FINNHUB_API_KEY_ENV: &str = "FINNHUB_API_KEY";

/// Accepted per-request timeouts
pub const REQUEST_TIMEOUT_RANGE: RangeInclusive<Duration> = Duration::from_secs(10)..=Duration::from_secs(20);

/// Configuration for stock report operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Finnhub API key; checked before any provider call
    pub finnhub_api_key: Option<String>,

    /// Finnhub REST base URL
    pub finnhub_base_url: String,

    /// Finnhub requests per minute (free tier: 60)
    pub finnhub_rate_limit: u32,

    /// Stooq base URL
    pub stooq_base_url: String,

    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,

    /// Trailing price history window
    pub price_history_days: u32,

    /// Trailing news window
    pub news_lookback_days: u32,

    /// Maximum news articles per report
    pub news_limit: usize,

    /// Where each profile field comes from
    pub profile_mapping: ProfileMapping,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            finnhub_api_key: None,
            finnhub_base_url: "https://finnhub.io/api/v1".to_string(),
            finnhub_rate_limit: 60,
            stooq_base_url: "https://stooq.com".to_string(),
            request_timeout: Duration::from_secs(15),
            price_history_days: 365,
            news_lookback_days: 14,
            news_limit: 12,
            profile_mapping: ProfileMapping::default(),
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Load the Finnhub API key from environment
    pub fn with_env_api_key(mut self) -> Self {
        if let Some(key) = env_api_key() {
            self.finnhub_api_key = Some(key);
        }
        self
    }

    /// The Finnhub key, if set and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.finnhub_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Validate the configuration
    ///
    /// A missing API key is not an error here; providers report it when a
    /// report is requested.
    pub fn validate(&self) -> Result<()> {
        if !REQUEST_TIMEOUT_RANGE.contains(&self.request_timeout) {
            return Err(StockError::Config(format!(
                "request_timeout must be between {}s and {}s, got {:?}",
                REQUEST_TIMEOUT_RANGE.start().as_secs(),
                REQUEST_TIMEOUT_RANGE.end().as_secs(),
                self.request_timeout
            )));
        }

        if self.finnhub_rate_limit == 0 {
            return Err(StockError::Config(
                "finnhub_rate_limit must be greater than 0".to_string(),
            ));
        }

        if self.price_history_days == 0 || self.news_lookback_days == 0 {
            return Err(StockError::Config(
                "history windows must span at least one day".to_string(),
            ));
        }

        if self.news_limit == 0 {
            return Err(StockError::Config(
                "news_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_api_key() -> Option<String> {
    std::env::var(FINNHUB_API_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    finnhub_api_key: Option<String>,
    finnhub_base_url: Option<String>,
    finnhub_rate_limit: Option<u32>,
    stooq_base_url: Option<String>,
    request_timeout: Option<Duration>,
    price_history_days: Option<u32>,
    news_lookback_days: Option<u32>,
    news_limit: Option<usize>,
    profile_mapping: Option<ProfileMapping>,
}

impl StockConfigBuilder {
    /// Set the Finnhub API key
    pub fn finnhub_api_key(mut self, key: impl Into<String>) -> Self {
        self.finnhub_api_key = Some(key.into());
        self
    }

    /// Load the Finnhub API key from environment
    pub fn with_env_api_key(mut self) -> Self {
        if let Some(key) = env_api_key() {
            self.finnhub_api_key = Some(key);
        }
        self
    }

    pub fn finnhub_base_url(mut self, url: impl Into<String>) -> Self {
        self.finnhub_base_url = Some(url.into());
        self
    }

    pub fn finnhub_rate_limit(mut self, per_minute: u32) -> Self {
        self.finnhub_rate_limit = Some(per_minute);
        self
    }

    pub fn stooq_base_url(mut self, url: impl Into<String>) -> Self {
        self.stooq_base_url = Some(url.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    pub fn price_history_days(mut self, days: u32) -> Self {
        self.price_history_days = Some(days);
        self
    }

    pub fn news_lookback_days(mut self, days: u32) -> Self {
        self.news_lookback_days = Some(days);
        self
    }

    pub fn news_limit(mut self, limit: usize) -> Self {
        self.news_limit = Some(limit);
        self
    }

    /// Replace the profile field precedence table
    pub fn profile_mapping(mut self, mapping: ProfileMapping) -> Self {
        self.profile_mapping = Some(mapping);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            finnhub_api_key: self.finnhub_api_key,
            finnhub_base_url: self.finnhub_base_url.unwrap_or(defaults.finnhub_base_url),
            finnhub_rate_limit: self.finnhub_rate_limit.unwrap_or(defaults.finnhub_rate_limit),
            stooq_base_url: self.stooq_base_url.unwrap_or(defaults.stooq_base_url),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            price_history_days: self.price_history_days.unwrap_or(defaults.price_history_days),
            news_lookback_days: self.news_lookback_days.unwrap_or(defaults.news_lookback_days),
            news_limit: self.news_limit.unwrap_or(defaults.news_limit),
            profile_mapping: self.profile_mapping.unwrap_or(defaults.profile_mapping),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StockConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.price_history_days, 365);
        assert_eq!(config.news_lookback_days, 14);
        assert_eq!(config.news_limit, 12);
        assert!(config.api_key().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = StockConfig::builder()
            .finnhub_api_key("test_key")
            .request_timeout(Duration::from_secs(20))
            .news_limit(5)
            .build()
            .unwrap();

        assert_eq!(config.api_key(), Some("test_key"));
        assert_eq!(config.request_timeout, Duration::from_secs(20));
        assert_eq!(config.news_limit, 5);
    }

    #[test]
    fn test_timeout_outside_range_rejected() {
        for secs in [5, 9, 21, 60] {
            let result = StockConfig::builder()
                .request_timeout(Duration::from_secs(secs))
                .build();
            assert!(matches!(result, Err(StockError::Config(_))), "{secs}s accepted");
        }
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        let config = StockConfig {
            finnhub_api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_zero_news_limit_rejected() {
        let config = StockConfig {
            news_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
