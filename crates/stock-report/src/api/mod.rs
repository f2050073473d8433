//! Provider seams and their production clients

pub mod finnhub;
pub mod stooq;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;
use crate::profile::RawProfile;
use crate::report::{NewsItem, PriceHistory};

pub use finnhub::{FinnhubClient, FinnhubNewsArticle};
pub use stooq::StooqClient;

/// Source of company profile and financial metrics
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Fail with a configuration error if the provider cannot be called
    fn ensure_configured(&self) -> Result<()>;

    /// Raw profile and metric payloads for `ticker`
    async fn company_profile(&self, ticker: &str) -> Result<RawProfile>;
}

/// Source of daily prices
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    fn ensure_configured(&self) -> Result<()>;

    /// Opening prices from `since` onwards, ascending
    async fn price_history(&self, ticker: &str, since: NaiveDate) -> Result<PriceHistory>;
}

/// Source of company news
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsProvider: Send + Sync {
    fn ensure_configured(&self) -> Result<()>;

    /// Articles published between `from` and `to` inclusive, each with a title and link
    async fn company_news(&self, ticker: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<NewsItem>>;
}
