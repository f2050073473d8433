//! Shared, read-only lexical resources

use crate::error::Result;
use crate::lemmatizer::Lemmatizer;
use crate::stopwords::Stopwords;
use crate::tagger::PosTagger;
use crate::tokenize::Tokenizer;

/// Immutable bundle of everything the normalizer needs
///
/// Build it once at startup and share it behind an `Arc`; nothing in it is
/// mutated after construction, so concurrent readers need no locking.
#[derive(Debug, Clone)]
pub struct LexicalContext {
    pub tokenizer: Tokenizer,
    pub tagger: PosTagger,
    pub lemmatizer: Lemmatizer,
    pub stopwords: Stopwords,
}

impl LexicalContext {
    /// English resources with the standard stopword list
    pub fn english() -> Result<Self> {
        Self::with_stopwords(Stopwords::english())
    }

    /// English resources with a caller supplied stopword set
    pub fn with_stopwords(stopwords: Stopwords) -> Result<Self> {
        Ok(Self {
            tokenizer: Tokenizer::new()?,
            tagger: PosTagger::new(),
            lemmatizer: Lemmatizer::new(),
            stopwords,
        })
    }
}
