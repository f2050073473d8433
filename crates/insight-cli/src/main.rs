//! Command-line interface for text analysis and stock reports

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use insight_utils::{Settings, init_tracing};
use serde::Serialize;
use serde_json::Value;
use stock_report::{MarketDataAggregator, StockConfig, StockReport, is_valid_ticker};
use text_analysis::TextAnalyzer;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "insight")]
#[command(version, about = "Analyze text or build a stock report", long_about = None)]
struct Args {
    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a text file, or stdin when no file is given
    Text {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Build the report for a ticker (needs FINNHUB_API_KEY)
    Stock {
        ticker: String,

        /// Print a profile table instead of JSON
        #[arg(long)]
        summary: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = Settings::from_env()?;
    init_tracing(settings.log_format);

    let analyzer = Arc::new(TextAnalyzer::english()?);

    match args.command {
        Command::Text { file } => {
            let text = read_input(file.as_deref())?;
            info!(chars = text.len(), "analyzing text");
            let report = analyzer.analyze(&text);
            println!("{}", to_json(&report, args.compact)?);
        },
        Command::Stock { ticker, summary } => {
            if !is_valid_ticker(&ticker) {
                bail!("Invalid ticker: {ticker:?}");
            }
            let ticker = ticker.to_ascii_uppercase();

            let config = StockConfig::default().with_env_api_key();
            let aggregator = MarketDataAggregator::new(config, analyzer)?;
            let report = aggregator
                .fetch(&ticker)
                .await
                .with_context(|| format!("Failed to build report for {ticker}"))?;

            if summary {
                println!("{}", summary_table(&report));
            } else {
                println!("{}", to_json(&report, args.compact)?);
            }
        },
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        },
    }
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

fn summary_table(report: &StockReport) -> Table {
    let info = &report.basic_info;
    let analysis = &report.news_text_analysis;

    let mut table = Table::new();
    table.set_header(vec!["Field", "Value"]);
    for (field, value) in [
        ("Name", &info.name),
        ("Website", &info.website),
        ("Sector", &info.sector),
        ("Employees", &info.employee_count),
        ("Market cap", &info.market_cap),
        ("Revenue", &info.total_revenue),
        ("Trailing EPS", &info.trailing_eps),
    ] {
        table.add_row(vec![field.to_string(), display_value(value)]);
    }

    let last_open = report
        .price_history
        .prices
        .last()
        .map_or_else(|| "-".to_string(), |p| format!("{p:.2}"));
    table.add_row(vec!["Last open".to_string(), last_open]);
    table.add_row(vec!["News articles".to_string(), report.news_articles.len().to_string()]);
    table.add_row(vec!["News sentiment".to_string(), format!("{:+.3}", analysis.sentiment.compound)]);
    table
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.is_empty() => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
