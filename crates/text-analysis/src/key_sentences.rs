//! Pattern based key-sentence extraction

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use crate::error::Result;

/// Matches any decimal digit, surfacing sentences with quantitative claims
pub const DEFAULT_KEY_PATTERN: &str = r"\d";

/// Selects sentences matching a case-insensitive regular expression
#[derive(Debug, Clone)]
pub struct KeySentenceExtractor {
    pattern: Regex,
}

impl KeySentenceExtractor {
    /// Compile `pattern` case-insensitively
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { pattern })
    }

    /// Extractor using [`DEFAULT_KEY_PATTERN`]
    pub fn digits() -> Result<Self> {
        Self::new(DEFAULT_KEY_PATTERN)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Matching sentences in input order, each at most once
    pub fn extract(&self, sentences: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        sentences
            .iter()
            .filter(|sentence| self.pattern.is_match(sentence))
            .filter(|sentence| seen.insert(*sentence))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_default_pattern_keeps_numeric_sentences() {
        let extractor = KeySentenceExtractor::digits().unwrap();
        let sentences = owned(&["Revenue grew 5%.", "Outlook is strong."]);
        assert_eq!(extractor.extract(&sentences), owned(&["Revenue grew 5%."]));
    }

    #[test]
    fn test_preserves_order_and_deduplicates() {
        let extractor = KeySentenceExtractor::digits().unwrap();
        let sentences = owned(&["Q2 was flat.", "No numbers here.", "EPS hit $1.20.", "Q2 was flat."]);
        assert_eq!(extractor.extract(&sentences), owned(&["Q2 was flat.", "EPS hit $1.20."]));
    }

    #[test]
    fn test_custom_pattern_is_case_insensitive() {
        let extractor = KeySentenceExtractor::new("dividend").unwrap();
        let sentences = owned(&["DIVIDEND raised.", "Buyback announced."]);
        assert_eq!(extractor.extract(&sentences), owned(&["DIVIDEND raised."]));
    }

    #[test]
    fn test_no_match_is_empty() {
        let extractor = KeySentenceExtractor::digits().unwrap();
        assert!(extractor.extract(&owned(&["Nothing to see."])).is_empty());
        assert!(extractor.extract(&[]).is_empty());
    }

    #[test]
    fn test_invalid_pattern_rejected_at_construction() {
        assert!(KeySentenceExtractor::new("([unclosed").is_err());
    }
}
