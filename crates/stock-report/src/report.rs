//! Composite stock report types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use text_analysis::AnalysisReport;

use crate::profile::CompanyProfile;

/// One news article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub source: String,
    /// RFC 3339 UTC timestamp, `""` when unknown
    pub published_at: String,
}

impl NewsItem {
    /// Text handed to the analyzer for this article
    pub fn analysis_text(&self) -> String {
        format!("{}. {}", self.title, self.summary)
    }
}

/// Daily opening prices, ascending by date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    /// `YYYY-MM-DD`
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
}

impl PriceHistory {
    /// Build from (date, open) points in any order
    pub fn from_points(mut points: Vec<(NaiveDate, f64)>) -> Self {
        points.sort_by_key(|(date, _)| *date);
        let (dates, prices) = points
            .into_iter()
            .map(|(date, open)| (date.format("%Y-%m-%d").to_string(), open))
            .unzip();
        Self { dates, prices }
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Everything known about one ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockReport {
    pub basic_info: CompanyProfile,
    pub price_history: PriceHistory,
    pub future_earnings_dates: Vec<String>,
    pub news_articles: Vec<NewsItem>,
    pub news_text_analysis: AnalysisReport,
}
