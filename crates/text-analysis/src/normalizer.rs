//! Lexical normalization: tokens to a canonical lemma list

use std::sync::Arc;

use crate::lexicon::LexicalContext;
use crate::tagger::{TaggedWord, WordCategory};

/// Turns raw text into an ordered list of lowercase lemmas
///
/// Lemmas keep document order and duplicates. A token survives only if, after
/// trailing periods are stripped and it is lowercased, it consists of
/// `a-z`, `-` and `+`, is longer than one character, and is not a stopword.
#[derive(Debug, Clone)]
pub struct LexicalNormalizer {
    context: Arc<LexicalContext>,
}

impl LexicalNormalizer {
    pub fn new(context: Arc<LexicalContext>) -> Self {
        Self { context }
    }

    /// Sentence segmentation, exposed for callers that need the sentence list
    pub fn sentences(&self, text: &str) -> Vec<String> {
        self.context.tokenizer.sentences(text)
    }

    /// Word tokens of all sentences, concatenated in document order
    pub fn tokens(&self, sentences: &[String]) -> Vec<String> {
        sentences
            .iter()
            .flat_map(|sentence| self.context.tokenizer.words(sentence))
            .collect()
    }

    /// Normalize raw text
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let sentences = self.sentences(text);
        self.normalize_sentences(&sentences)
    }

    /// Normalize an already segmented sentence list
    pub fn normalize_sentences(&self, sentences: &[String]) -> Vec<String> {
        let tokens = self.tokens(sentences);
        let tagged = self.context.tagger.tag(&tokens);
        self.normalize_tagged(&tagged)
    }

    fn normalize_tagged(&self, tagged: &[TaggedWord]) -> Vec<String> {
        tagged
            .iter()
            .filter_map(|tw| self.normalize_word(&tw.word, WordCategory::from_penn_tag(tw.tag)))
            .collect()
    }

    fn normalize_word(&self, word: &str, category: WordCategory) -> Option<String> {
        let word = word.trim_end_matches('.').to_lowercase();

        if !word.chars().all(|c| c.is_ascii_lowercase() || c == '-' || c == '+') {
            return None;
        }
        if word.chars().count() <= 1 || self.context.stopwords.contains(&word) {
            return None;
        }

        let lemma = self.context.lemmatizer.lemmatize(&word, category);
        if self.context.stopwords.contains(&lemma) {
            return None;
        }
        Some(lemma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stopwords::Stopwords;

    fn normalizer() -> LexicalNormalizer {
        LexicalNormalizer::new(Arc::new(LexicalContext::english().unwrap()))
    }

    fn is_valid_lemma(word: &str) -> bool {
        word.len() >= 2 && word.chars().all(|c| c.is_ascii_lowercase() || c == '-' || c == '+')
    }

    #[test]
    fn test_normalizes_in_document_order() {
        let words = normalizer().normalize("Apple reported record revenues. Shares rose 5% after the report.");
        assert_eq!(
            words,
            vec!["apple", "report", "record", "revenue", "share", "rise", "report"]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let words = normalizer().normalize("Growth, growth and more growth.");
        assert_eq!(words, vec!["growth", "growth", "growth"]);
    }

    #[test]
    fn test_filters_digits_punctuation_and_short_tokens() {
        let words = normalizer().normalize("Q3 EPS was $2.10, a 7% beat (x).");
        assert!(words.iter().all(|w| is_valid_lemma(w)));
        assert_eq!(words, vec!["eps", "beat"]);
    }

    #[test]
    fn test_hyphen_and_plus_survive() {
        let words = normalizer().normalize("The year-over-year gains at Disney+ impressed.");
        assert!(words.contains(&"year-over-year".to_string()));
        assert!(words.contains(&"disney+".to_string()));
    }

    #[test]
    fn test_stopwords_removed() {
        let context = LexicalContext::english().unwrap();
        let words = normalizer().normalize("It is what it is, and they were there.");
        assert!(words.is_empty());
        assert!(words.iter().all(|w| !context.stopwords.contains(w)));
    }

    #[test]
    fn test_lemmas_that_are_stopwords_dropped() {
        let context = LexicalContext::english().unwrap();
        let words = normalizer().normalize("The deal was done. Their wills were read. Recycled cans sold.");
        assert!(!words.contains(&"will".to_string()));
        assert!(!words.contains(&"can".to_string()));
        assert!(words.contains(&"deal".to_string()));
        assert!(words.iter().all(|w| !context.stopwords.contains(w)));
    }

    #[test]
    fn test_accented_words_dropped_whole() {
        let words = normalizer().normalize("The café served a naïve résumé.");
        assert_eq!(words, vec!["serve"]);

        let words = normalizer().normalize("Nestlé and Société Générale rallied.");
        assert_eq!(words, vec!["rally"]);
    }

    #[test]
    fn test_custom_stopwords() {
        let context = LexicalContext::with_stopwords(Stopwords::english().with_extra(["apple"])).unwrap();
        let words = LexicalNormalizer::new(Arc::new(context)).normalize("Apple rallied.");
        assert_eq!(words, vec!["rally"]);
    }

    #[test]
    fn test_empty_and_non_english_input() {
        assert!(normalizer().normalize("").is_empty());
        assert!(normalizer().normalize("株価は上昇した。").is_empty());
    }
}
