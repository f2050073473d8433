//! Stock report aggregation
//!
//! One report is a linear chain of provider calls awaited one after another:
//! profile, price history, news, then analysis of the news text on the
//! blocking pool. The first failure aborts the chain.

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};
use text_analysis::{AnalysisReport, TextAnalyzer};
use tracing::{debug, info};

use crate::api::{FinnhubClient, NewsProvider, PriceHistoryProvider, ProfileProvider, StooqClient};
use crate::config::StockConfig;
use crate::error::{Result, StockError};
use crate::report::{NewsItem, StockReport};

/// Builds [`StockReport`]s from a profile, a price and a news provider
pub struct MarketDataAggregator {
    config: StockConfig,
    profiles: Arc<dyn ProfileProvider>,
    prices: Arc<dyn PriceHistoryProvider>,
    news: Arc<dyn NewsProvider>,
    analyzer: Arc<TextAnalyzer>,
}

impl MarketDataAggregator {
    /// Finnhub for profile and news, Stooq for prices
    pub fn new(config: StockConfig, analyzer: Arc<TextAnalyzer>) -> Result<Self> {
        config.validate()?;
        let finnhub = Arc::new(FinnhubClient::new(&config)?);
        let stooq = Arc::new(StooqClient::new(&config)?);
        Ok(Self::with_providers(config, finnhub.clone(), stooq, finnhub, analyzer))
    }

    pub fn with_providers(
        config: StockConfig,
        profiles: Arc<dyn ProfileProvider>,
        prices: Arc<dyn PriceHistoryProvider>,
        news: Arc<dyn NewsProvider>,
        analyzer: Arc<TextAnalyzer>,
    ) -> Self {
        Self {
            config,
            profiles,
            prices,
            news,
            analyzer,
        }
    }

    pub fn config(&self) -> &StockConfig {
        &self.config
    }

    /// Build the report for `ticker`
    pub async fn fetch(&self, ticker: &str) -> Result<StockReport> {
        self.ensure_configured()?;
        let today = Utc::now().date_naive();
        info!(ticker, "building stock report");

        let raw = self.profiles.company_profile(ticker).await?;
        let basic_info = self.config.profile_mapping.resolve(&raw);
        if basic_info.is_unnamed() {
            return Err(StockError::NotFound(ticker.to_string()));
        }

        let since = days_before(today, self.config.price_history_days);
        let price_history = self.prices.price_history(ticker, since).await?;

        let from = days_before(today, self.config.news_lookback_days);
        let mut news_articles = self.news.company_news(ticker, from, today).await?;
        news_articles.truncate(self.config.news_limit);

        let future_earnings_dates = self.future_earnings_dates(ticker);
        let news_text_analysis = self.analyze_news(&news_articles).await?;

        info!(
            ticker,
            prices = price_history.len(),
            articles = news_articles.len(),
            "stock report ready"
        );

        Ok(StockReport {
            basic_info,
            price_history,
            future_earnings_dates,
            news_articles,
            news_text_analysis,
        })
    }

    /// Text analysis is CPU bound; it runs on the blocking pool
    async fn analyze_news(&self, articles: &[NewsItem]) -> Result<AnalysisReport> {
        let analyzer = Arc::clone(&self.analyzer);
        let text = news_text(articles);
        tokio::task::spawn_blocking(move || analyzer.analyze(&text))
            .await
            .map_err(|e| StockError::provider("analysis", format!("news analysis task failed: {e}")))
    }

    fn ensure_configured(&self) -> Result<()> {
        self.profiles.ensure_configured()?;
        self.prices.ensure_configured()?;
        self.news.ensure_configured()
    }

    /// No earnings calendar source is wired in yet
    fn future_earnings_dates(&self, ticker: &str) -> Vec<String> {
        debug!(ticker, "earnings calendar unavailable");
        Vec::new()
    }
}

fn days_before(today: NaiveDate, days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// `"{title}. {summary}"` per article, one per line
fn news_text(articles: &[NewsItem]) -> String {
    articles
        .iter()
        .map(NewsItem::analysis_text)
        .collect::<Vec<_>>()
        .join("\n")
}
