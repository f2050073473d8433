//! Stock report aggregation
//!
//! This crate assembles one report per ticker from external providers:
//!
//! - Company profile and basic financials from Finnhub, merged through a
//!   configurable field precedence table
//! - Daily opening prices from Stooq CSV
//! - Recent company news from Finnhub
//! - Text analysis of the harvested headlines and summaries
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stock_report::{MarketDataAggregator, StockConfig};
//! use text_analysis::TextAnalyzer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = StockConfig::default().with_env_api_key();
//!     let aggregator = MarketDataAggregator::new(config, Arc::new(TextAnalyzer::english()?))?;
//!
//!     let report = aggregator.fetch("AAPL").await?;
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod api;
pub mod config;
pub mod error;
pub mod profile;
pub mod report;
pub mod ticker;

pub use aggregator::MarketDataAggregator;
pub use config::StockConfig;
pub use error::{Result, StockError};
pub use profile::{CompanyProfile, ProfileMapping};
pub use report::{NewsItem, PriceHistory, StockReport};
pub use ticker::is_valid_ticker;
