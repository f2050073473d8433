//! Ticker symbol rules

const MAX_TICKER_LEN: usize = 5;

/// 1 to 5 ASCII letters or digits, starting with a letter
pub fn is_valid_ticker(ticker: &str) -> bool {
    ticker.len() <= MAX_TICKER_LEN
        && ticker.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && ticker.chars().all(|c| c.is_ascii_alphanumeric())
}
