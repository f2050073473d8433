//! Finnhub client for company profiles, basic financials and news

use crate::api::{NewsProvider, ProfileProvider};
use crate::config::{FINNHUB_API_KEY_ENV, StockConfig};
use crate::error::{Result, StockError};
use crate::profile::RawProfile;
use crate::report::NewsItem;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;

const PROVIDER: &str = "Finnhub";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Finnhub news article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinnhubNewsArticle {
    /// Article category
    pub category: String,
    /// Publish time (UNIX timestamp)
    pub datetime: i64,
    /// News headline
    pub headline: String,
    /// Unique article ID
    pub id: i64,
    /// Thumbnail image URL
    pub image: String,
    /// Related symbols
    pub related: String,
    /// News source
    pub source: String,
    /// Article summary
    pub summary: String,
    /// Article URL
    pub url: String,
}

impl FinnhubNewsArticle {
    /// Convert to a report item; articles without headline or URL are dropped
    pub fn into_news_item(self) -> Option<NewsItem> {
        if self.headline.trim().is_empty() || self.url.trim().is_empty() {
            return None;
        }

        let published_at = if self.datetime > 0 {
            DateTime::from_timestamp(self.datetime, 0)
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_default()
        } else {
            String::new()
        };

        Some(NewsItem {
            title: self.headline,
            link: self.url,
            summary: self.summary,
            source: self.source,
            published_at,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct MetricResponse {
    #[serde(default)]
    metric: Value,
}

/// Finnhub REST client with rate limiting
pub struct FinnhubClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    rate_limiter: SharedRateLimiter,
}

impl FinnhubClient {
    /// Create a client from configuration
    ///
    /// A missing API key is accepted here and reported by
    /// [`ensure_configured`](ProfileProvider::ensure_configured).
    pub fn new(config: &StockConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| StockError::Config(format!("Failed to build HTTP client: {e}")))?;

        let quota = Quota::per_minute(NonZeroU32::new(config.finnhub_rate_limit).unwrap_or(NonZeroU32::MIN));

        Ok(Self {
            client,
            base_url: config.finnhub_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key().map(str::to_string),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| StockError::Config(format!("{FINNHUB_API_KEY_ENV} is not set")))
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T> {
        let token = self.api_key()?;
        self.rate_limiter.until_ready().await;

        let url = format!("{}{endpoint}", self.base_url);
        debug!(endpoint, "Finnhub request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("token", token)])
            .send()
            .await
            .map_err(|e| StockError::provider(PROVIDER, format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StockError::provider(PROVIDER, format!("API error {status}: {body}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StockError::provider(PROVIDER, format!("failed to parse response: {e}")))
    }

    /// Get the company profile payload
    pub async fn get_profile(&self, symbol: &str) -> Result<Value> {
        self.get_json("/stock/profile2", &[("symbol", symbol)]).await
    }

    /// Get the basic financials `metric` object
    pub async fn get_metrics(&self, symbol: &str) -> Result<Value> {
        let response: MetricResponse = self
            .get_json("/stock/metric", &[("symbol", symbol), ("metric", "all")])
            .await?;
        Ok(response.metric)
    }

    /// Get company news for a specific symbol
    pub async fn get_company_news(&self, symbol: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<FinnhubNewsArticle>> {
        let from = from.format("%Y-%m-%d").to_string();
        let to = to.format("%Y-%m-%d").to_string();
        self.get_json("/company-news", &[("symbol", symbol), ("from", from.as_str()), ("to", to.as_str())])
            .await
    }
}

#[async_trait]
impl ProfileProvider for FinnhubClient {
    fn ensure_configured(&self) -> Result<()> {
        self.api_key().map(|_| ())
    }

    async fn company_profile(&self, ticker: &str) -> Result<RawProfile> {
        let profile = self.get_profile(ticker).await?;
        let metric = self.get_metrics(ticker).await?;
        Ok(RawProfile { profile, metric })
    }
}

#[async_trait]
impl NewsProvider for FinnhubClient {
    fn ensure_configured(&self) -> Result<()> {
        self.api_key().map(|_| ())
    }

    async fn company_news(&self, ticker: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<NewsItem>> {
        let articles = self.get_company_news(ticker, from, to).await?;
        let total = articles.len();
        let items: Vec<NewsItem> = articles
            .into_iter()
            .filter_map(FinnhubNewsArticle::into_news_item)
            .collect();

        debug!(ticker, total, kept = items.len(), "Finnhub news filtered");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, key: Option<&str>) -> FinnhubClient {
        let config = StockConfig {
            finnhub_api_key: key.map(str::to_string),
            finnhub_base_url: server.uri(),
            ..Default::default()
        };
        FinnhubClient::new(&config).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_article_conversion() {
        let article = FinnhubNewsArticle {
            datetime: 1_700_000_000,
            headline: "Apple unveils new chips".to_string(),
            url: "https://example.com/chips".to_string(),
            source: "Reuters".to_string(),
            summary: "The M4 family".to_string(),
            ..Default::default()
        };

        let item = article.into_news_item().unwrap();
        assert_eq!(item.title, "Apple unveils new chips");
        assert_eq!(item.published_at, "2023-11-14T22:13:20Z");
    }

    #[test]
    fn test_article_without_url_dropped() {
        let article = FinnhubNewsArticle {
            headline: "Orphan headline".to_string(),
            ..Default::default()
        };
        assert!(article.into_news_item().is_none());
    }

    #[test]
    fn test_article_without_timestamp() {
        let article = FinnhubNewsArticle {
            headline: "Undated".to_string(),
            url: "https://example.com/u".to_string(),
            ..Default::default()
        };
        assert_eq!(article.into_news_item().unwrap().published_at, "");
    }

    #[tokio::test]
    async fn test_missing_key_is_config_error() {
        let server = MockServer::start().await;
        let client = client_for(&server, None);

        assert!(matches!(ProfileProvider::ensure_configured(&client), Err(StockError::Config(_))));
        assert!(matches!(client.company_profile("AAPL").await, Err(StockError::Config(_))));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_company_profile_fetches_both_payloads() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock/profile2"))
            .and(query_param("symbol", "AAPL"))
            .and(query_param("token", "test_key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Apple Inc", "weburl": "https://apple.com"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/stock/metric"))
            .and(query_param("metric", "all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"metric": {"epsTTM": 6.1}, "series": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let raw = client_for(&server, Some("test_key")).company_profile("AAPL").await.unwrap();
        assert_eq!(raw.profile["name"], "Apple Inc");
        assert_eq!(raw.metric["epsTTM"], 6.1);
    }

    #[tokio::test]
    async fn test_company_news_filters_incomplete_articles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/company-news"))
            .and(query_param("from", "2024-05-01"))
            .and(query_param("to", "2024-05-15"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"headline": "Complete", "url": "https://example.com/1", "summary": "s", "source": "Yahoo", "datetime": 1_715_000_000},
                {"headline": "", "url": "https://example.com/2"},
                {"headline": "No link", "url": ""}
            ])))
            .mount(&server)
            .await;

        let items = client_for(&server, Some("k"))
            .company_news("AAPL", day("2024-05-01"), day("2024-05-15"))
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Complete");
        assert_eq!(items[0].source, "Yahoo");
    }

    #[tokio::test]
    async fn test_http_error_is_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stock/profile2"))
            .respond_with(ResponseTemplate::new(429).set_body_string("API limit reached"))
            .mount(&server)
            .await;

        let err = client_for(&server, Some("k")).get_profile("AAPL").await.unwrap_err();
        match err {
            StockError::Provider { provider, message } => {
                assert_eq!(provider, "Finnhub");
                assert!(message.contains("429"));
                assert!(message.contains("API limit reached"));
            },
            other => panic!("Expected Provider variant, got {other:?}"),
        }
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_live_profile() {
        let config = StockConfig::default().with_env_api_key();
        let client = FinnhubClient::new(&config).unwrap();
        let raw = client.company_profile("AAPL").await.unwrap();
        assert!(raw.profile.get("name").is_some());
    }
}
