//! English text analysis
//!
//! This crate turns raw text into a structured [`AnalysisReport`]:
//!
//! - Sentence and word segmentation with part-of-speech tagging
//! - Lexical normalization into a lemma list (stopwords removed)
//! - Key-sentence extraction by regular expression (sentences with numbers by default)
//! - VADER sentiment scoring
//! - Frequency weighted word clouds, encoded as base64 PNG
//!
//! # Example
//!
//! ```rust,ignore
//! use text_analysis::TextAnalyzer;
//!
//! let analyzer = TextAnalyzer::english()?;
//! let report = analyzer.analyze("Revenue grew 5% in the quarter. Margins held.");
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

pub mod analyzer;
pub mod error;
pub mod key_sentences;
pub mod lemmatizer;
pub mod lexicon;
pub mod normalizer;
pub mod report;
pub mod sentiment;
pub mod stopwords;
pub mod tagger;
pub mod tokenize;
pub mod wordcloud;

pub use analyzer::TextAnalyzer;
pub use error::{Result, TextAnalysisError};
pub use key_sentences::{DEFAULT_KEY_PATTERN, KeySentenceExtractor};
pub use lexicon::LexicalContext;
pub use normalizer::LexicalNormalizer;
pub use report::AnalysisReport;
pub use sentiment::{SentimentScore, SentimentScorer};
pub use stopwords::Stopwords;
pub use wordcloud::{CloudRenderer, WordCloud, WordCloudConfig, WordCloudImage};
