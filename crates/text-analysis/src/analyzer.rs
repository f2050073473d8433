//! Text analysis orchestration

use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::key_sentences::KeySentenceExtractor;
use crate::lexicon::LexicalContext;
use crate::normalizer::LexicalNormalizer;
use crate::report::AnalysisReport;
use crate::sentiment::SentimentScorer;
use crate::wordcloud::{CloudRenderer, WordCloud};

/// Runs segmentation, key-sentence extraction, normalization, word-cloud
/// rendering and sentiment scoring over one text
///
/// All components are read-only after construction; one analyzer can be
/// shared across tasks behind an `Arc`.
#[derive(Clone)]
pub struct TextAnalyzer {
    normalizer: LexicalNormalizer,
    scorer: Arc<SentimentScorer>,
    extractor: KeySentenceExtractor,
    renderer: Arc<dyn CloudRenderer>,
}

impl TextAnalyzer {
    pub fn new(
        context: Arc<LexicalContext>,
        scorer: Arc<SentimentScorer>,
        extractor: KeySentenceExtractor,
        renderer: Arc<dyn CloudRenderer>,
    ) -> Self {
        Self {
            normalizer: LexicalNormalizer::new(context),
            scorer,
            extractor,
            renderer,
        }
    }

    /// English resources, digit key pattern and the default word cloud
    pub fn english() -> Result<Self> {
        Ok(Self::new(
            Arc::new(LexicalContext::english()?),
            Arc::new(SentimentScorer::new()),
            KeySentenceExtractor::digits()?,
            Arc::new(WordCloud::default()),
        ))
    }

    /// Replace the word-cloud renderer
    pub fn with_renderer(mut self, renderer: Arc<dyn CloudRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replace the key-sentence extractor
    pub fn with_extractor(mut self, extractor: KeySentenceExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Analyze `text`; never fails, empty input yields [`AnalysisReport::empty`]
    pub fn analyze(&self, text: &str) -> AnalysisReport {
        let sentences = self.normalizer.sentences(text);
        let key_sentences = self.extractor.extract(&sentences);
        let words_per_sentence = words_per_sentence(&sentences);

        let words = self.normalizer.normalize_sentences(&sentences);
        let word_cloud_image = if words.is_empty() {
            None
        } else {
            self.renderer.render(&words)
        };

        let sentiment = self.scorer.score(text);

        debug!(
            sentences = sentences.len(),
            words = words.len(),
            key_sentences = key_sentences.len(),
            "text analyzed"
        );

        AnalysisReport {
            key_sentences,
            words_per_sentence,
            sentiment,
            word_cloud_image,
            sentences_analyzed: sentences.len(),
            words_analyzed: words.len(),
        }
    }
}

impl std::fmt::Debug for TextAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextAnalyzer")
            .field("key_pattern", &self.extractor.pattern())
            .finish_non_exhaustive()
    }
}

/// Mean whitespace separated word count, rounded to one decimal
fn words_per_sentence(sentences: &[String]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }
    let words: usize = sentences.iter().map(|s| s.split_whitespace().count()).sum();
    let mean = words as f64 / sentences.len() as f64;
    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::sentiment::SentimentScore;
    use crate::wordcloud::{WordCloudConfig, WordCloudImage};

    #[derive(Default)]
    struct CountingRenderer {
        calls: AtomicUsize,
    }

    impl CloudRenderer for CountingRenderer {
        fn render(&self, _words: &[String]) -> Option<WordCloudImage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            None
        }
    }

    fn seeded_analyzer() -> TextAnalyzer {
        TextAnalyzer::english().unwrap().with_renderer(Arc::new(WordCloud::new(WordCloudConfig {
            width: 300,
            height: 150,
            seed: Some(42),
            ..Default::default()
        })))
    }

    #[test]
    fn test_empty_input() {
        let report = seeded_analyzer().analyze("");
        assert_eq!(report, AnalysisReport::empty());

        let report = seeded_analyzer().analyze("   \n\t  ");
        assert_eq!(report.sentences_analyzed, 0);
        assert_eq!(report.words_analyzed, 0);
        assert!(report.word_cloud_image.is_none());
        assert_eq!(report.sentiment, SentimentScore::NEUTRAL);
    }

    #[test]
    fn test_words_per_sentence() {
        let sentences = vec!["a b c".to_string(), "d e".to_string()];
        assert!((words_per_sentence(&sentences) - 2.5).abs() < 1e-9);

        let sentences = vec!["one two".to_string(), "three".to_string(), "four".to_string()];
        assert!((words_per_sentence(&sentences) - 1.3).abs() < 1e-9);

        assert!(words_per_sentence(&[]).abs() < f64::EPSILON);
    }

    #[test]
    fn test_renderer_skipped_for_stopword_only_text() {
        let renderer = Arc::new(CountingRenderer::default());
        let analyzer = TextAnalyzer::english().unwrap().with_renderer(renderer.clone());

        let report = analyzer.analyze("It is what it is. And so on.");

        assert_eq!(report.sentences_analyzed, 2);
        assert_eq!(report.words_analyzed, 0);
        assert!(report.word_cloud_image.is_none());
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_renderer_invoked_once_with_content() {
        let renderer = Arc::new(CountingRenderer::default());
        let analyzer = TextAnalyzer::english().unwrap().with_renderer(renderer.clone());

        analyzer.analyze("Revenue climbed sharply.");

        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_report_counts_and_key_sentences() {
        let analyzer = seeded_analyzer();
        let text = "Apple reported record revenues. Shares rose 5% after the report.";
        let report = analyzer.analyze(text);

        assert_eq!(report.sentences_analyzed, 2);
        assert_eq!(report.words_analyzed, 7);
        assert_eq!(report.key_sentences, vec!["Shares rose 5% after the report."]);
        assert!((report.words_per_sentence - 5.0).abs() < 1e-9);
        assert!(report.word_cloud_image.is_some());

        let sum = report.sentiment.negative + report.sentiment.neutral + report.sentiment.positive;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_key_pattern() {
        let analyzer = TextAnalyzer::english()
            .unwrap()
            .with_renderer(Arc::new(CountingRenderer::default()))
            .with_extractor(KeySentenceExtractor::new("guidance").unwrap());

        let report = analyzer.analyze("The firm raised GUIDANCE. Nothing else changed.");
        assert_eq!(report.key_sentences, vec!["The firm raised GUIDANCE."]);
    }
}
