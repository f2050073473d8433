//! Stooq daily price history client
//!
//! Stooq serves unauthenticated CSV with a `Date,Open,High,Low,Close,Volume`
//! header. Rows with a missing or unparseable date or open are skipped; a body
//! without that header (`No data`, quota messages) is a provider error.

use crate::api::PriceHistoryProvider;
use crate::config::StockConfig;
use crate::error::{Result, StockError};
use crate::report::PriceHistory;
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::StringRecord;
use reqwest::Client;
use tracing::debug;

const PROVIDER: &str = "Stooq";

/// Stooq CSV client
pub struct StooqClient {
    client: Client,
    base_url: String,
}

impl StooqClient {
    pub fn new(config: &StockConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| StockError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.stooq_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Download the raw daily CSV for a US ticker
    pub async fn get_daily_csv(&self, ticker: &str) -> Result<String> {
        let symbol = format!("{}.us", ticker.to_lowercase());
        let url = format!("{}/q/d/l/", self.base_url);
        debug!(symbol, "Stooq request");

        let response = self
            .client
            .get(&url)
            .query(&[("s", symbol.as_str()), ("i", "d")])
            .send()
            .await
            .map_err(|e| StockError::provider(PROVIDER, format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(StockError::provider(PROVIDER, format!("API error {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| StockError::provider(PROVIDER, format!("failed to read response: {e}")))
    }
}

#[async_trait]
impl PriceHistoryProvider for StooqClient {
    fn ensure_configured(&self) -> Result<()> {
        Ok(())
    }

    async fn price_history(&self, ticker: &str, since: NaiveDate) -> Result<PriceHistory> {
        let body = self.get_daily_csv(ticker).await?;
        let history = parse_daily_csv(&body, since)?;
        debug!(ticker, points = history.len(), "Stooq history parsed");
        Ok(history)
    }
}

/// Opening prices on or after `since`, ascending
pub fn parse_daily_csv(body: &str, since: NaiveDate) -> Result<PriceHistory> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let columns = reader.headers().ok().and_then(|headers| {
        let date = headers.iter().position(|h| h.eq_ignore_ascii_case("date"))?;
        let open = headers.iter().position(|h| h.eq_ignore_ascii_case("open"))?;
        Some((date, open))
    });

    let Some((date_col, open_col)) = columns else {
        let preview: String = body.trim().chars().take(80).collect();
        return Err(StockError::provider(
            PROVIDER,
            format!("unexpected response, no Date/Open header: {preview:?}"),
        ));
    };

    let mut points = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let parsed = record
            .map_err(|e| StockError::Parse(e.to_string()))
            .and_then(|record| parse_row(&record, date_col, open_col));

        match parsed {
            Ok((date, open)) if date >= since => points.push((date, open)),
            Ok(_) => {},
            Err(e) => debug!(row = line + 1, error = %e, "skipping price row"),
        }
    }

    Ok(PriceHistory::from_points(points))
}

fn parse_row(record: &StringRecord, date_col: usize, open_col: usize) -> Result<(NaiveDate, f64)> {
    let date = record.get(date_col).unwrap_or_default();
    let open = record.get(open_col).unwrap_or_default();

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| StockError::Parse(format!("date {date:?}: {e}")))?;
    let open: f64 = open
        .parse()
        .map_err(|e| StockError::Parse(format!("open {open:?}: {e}")))?;

    if !open.is_finite() {
        return Err(StockError::Parse(format!("open {open} is not finite")));
    }

    Ok((date, open))
}
