//! Text analysis report

use serde::{Deserialize, Serialize};

use crate::sentiment::SentimentScore;
use crate::wordcloud::WordCloudImage;

/// Result of analyzing one piece of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Sentences matching the key pattern, in document order
    pub key_sentences: Vec<String>,
    /// Average whitespace separated words per sentence, one decimal
    pub words_per_sentence: f64,
    pub sentiment: SentimentScore,
    /// Base64 PNG, `null` when there was nothing to draw
    pub word_cloud_image: Option<WordCloudImage>,
    pub sentences_analyzed: usize,
    /// Length of the normalized lemma list
    pub words_analyzed: usize,
}

impl AnalysisReport {
    /// Report for input with no content
    pub fn empty() -> Self {
        Self {
            key_sentences: Vec::new(),
            words_per_sentence: 0.0,
            sentiment: SentimentScore::NEUTRAL,
            word_cloud_image: None,
            sentences_analyzed: 0,
            words_analyzed: 0,
        }
    }
}

impl Default for AnalysisReport {
    fn default() -> Self {
        Self::empty()
    }
}
