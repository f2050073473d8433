//! Lexicon and rule based sentiment scoring using VADER
//!
//! VADER (Valence Aware Dictionary and sEntiment Reasoner) is tuned for short,
//! informal text such as headlines. It relies on punctuation, capitalization
//! and negation cues, so it always runs on the original text rather than on
//! the normalized word list.

use serde::{Deserialize, Serialize};
use vader_sentiment::SentimentIntensityAnalyzer;

/// Polarity decomposition of a text
///
/// `negative + neutral + positive` is always 1.0; `compound` is the
/// normalized overall valence in `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub compound: f64,
}

impl SentimentScore {
    /// The score of text that carries no sentiment at all
    pub const NEUTRAL: Self = Self {
        negative: 0.0,
        neutral: 1.0,
        positive: 0.0,
        compound: 0.0,
    };

    fn from_parts(negative: f64, neutral: f64, positive: f64, compound: f64) -> Self {
        let negative = negative.max(0.0);
        let neutral = neutral.max(0.0);
        let positive = positive.max(0.0);
        let total = negative + neutral + positive;

        if total <= f64::EPSILON {
            return Self::NEUTRAL;
        }

        Self {
            negative: negative / total,
            neutral: neutral / total,
            positive: positive / total,
            compound: compound.clamp(-1.0, 1.0),
        }
    }
}

impl Default for SentimentScore {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Deterministic sentiment scorer
pub struct SentimentScorer {
    analyzer: SentimentIntensityAnalyzer<'static>,
}

impl SentimentScorer {
    /// Create a scorer; loading the lexicon happens here, once
    pub fn new() -> Self {
        Self {
            analyzer: SentimentIntensityAnalyzer::new(),
        }
    }

    /// Score the original, unnormalized text
    pub fn score(&self, text: &str) -> SentimentScore {
        if text.trim().is_empty() {
            return SentimentScore::NEUTRAL;
        }

        let scores = self.analyzer.polarity_scores(text);
        let get = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        SentimentScore::from_parts(get("neg"), get("neu"), get("pos"), get("compound"))
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentScorer").finish_non_exhaustive()
    }
}
