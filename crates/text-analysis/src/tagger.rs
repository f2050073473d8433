//! Part-of-speech tagging with Penn Treebank tags
//!
//! The tagger looks words up in a closed-class and common-word lexicon, falls
//! back to suffix heuristics for unknown words, and then applies a few
//! contextual corrections (base verbs after *to* and modals, participles after
//! auxiliaries, third-person verbs after subject pronouns).

use std::collections::HashMap;

/// Coarse grammatical category used to drive lemmatization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordCategory {
    Noun,
    Verb,
    Adjective,
    Adverb,
}

impl WordCategory {
    /// Map a Penn Treebank tag to its coarse category, defaulting to noun
    pub fn from_penn_tag(tag: &str) -> Self {
        match tag.chars().next() {
            Some('J') => Self::Adjective,
            Some('V') => Self::Verb,
            Some('R') => Self::Adverb,
            _ => Self::Noun,
        }
    }
}

/// A token paired with its Penn Treebank tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedWord {
    pub word: String,
    pub tag: &'static str,
}

const LEXICON: &[(&str, &str)] = &[
    // determiners
    ("the", "DT"), ("a", "DT"), ("an", "DT"), ("this", "DT"), ("that", "DT"), ("these", "DT"),
    ("those", "DT"), ("every", "DT"), ("each", "DT"), ("some", "DT"), ("any", "DT"),
    ("no", "DT"), ("all", "DT"), ("both", "DT"), ("either", "DT"), ("neither", "DT"),
    ("another", "DT"),
    // prepositions and subordinators
    ("of", "IN"), ("in", "IN"), ("on", "IN"), ("at", "IN"), ("by", "IN"), ("for", "IN"),
    ("with", "IN"), ("about", "IN"), ("against", "IN"), ("between", "IN"), ("into", "IN"),
    ("through", "IN"), ("during", "IN"), ("before", "IN"), ("after", "IN"), ("above", "IN"),
    ("below", "IN"), ("from", "IN"), ("over", "IN"), ("under", "IN"), ("since", "IN"),
    ("until", "IN"), ("while", "IN"), ("because", "IN"), ("although", "IN"), ("though", "IN"),
    ("if", "IN"), ("than", "IN"), ("as", "IN"), ("via", "IN"), ("per", "IN"), ("upon", "IN"),
    ("within", "IN"), ("without", "IN"), ("among", "IN"), ("across", "IN"), ("toward", "IN"),
    ("towards", "IN"), ("despite", "IN"), ("amid", "IN"), ("whether", "IN"),
    ("up", "RP"), ("down", "RP"), ("out", "RP"), ("off", "RP"),
    // conjunctions
    ("and", "CC"), ("but", "CC"), ("or", "CC"), ("nor", "CC"), ("yet", "CC"), ("plus", "CC"),
    // pronouns
    ("i", "PRP"), ("you", "PRP"), ("he", "PRP"), ("she", "PRP"), ("it", "PRP"), ("we", "PRP"),
    ("they", "PRP"), ("me", "PRP"), ("him", "PRP"), ("us", "PRP"), ("them", "PRP"),
    ("my", "PRP$"), ("your", "PRP$"), ("his", "PRP$"), ("its", "PRP$"), ("our", "PRP$"),
    ("their", "PRP$"), ("her", "PRP$"),
    ("who", "WP"), ("whom", "WP"), ("what", "WP"), ("which", "WDT"), ("whose", "WP$"),
    ("when", "WRB"), ("where", "WRB"), ("why", "WRB"), ("how", "WRB"),
    ("there", "EX"), ("to", "TO"),
    // modals
    ("can", "MD"), ("could", "MD"), ("will", "MD"), ("would", "MD"), ("shall", "MD"),
    ("should", "MD"), ("may", "MD"), ("might", "MD"), ("must", "MD"), ("wo", "MD"),
    ("ca", "MD"),
    // adverbs
    ("not", "RB"), ("n't", "RB"), ("very", "RB"), ("too", "RB"), ("also", "RB"), ("just", "RB"),
    ("only", "RB"), ("still", "RB"), ("even", "RB"), ("now", "RB"), ("then", "RB"),
    ("here", "RB"), ("again", "RB"), ("never", "RB"), ("always", "RB"), ("often", "RB"),
    ("already", "RB"), ("soon", "RB"), ("quite", "RB"), ("rather", "RB"), ("almost", "RB"),
    ("so", "RB"), ("once", "RB"), ("further", "RB"), ("ago", "RB"), ("yesterday", "RB"),
    ("today", "NN"), ("tomorrow", "NN"), ("well", "RB"), ("however", "RB"), ("instead", "RB"),
    ("more", "JJR"), ("most", "JJS"), ("less", "JJR"), ("least", "JJS"),
    // auxiliaries
    ("be", "VB"), ("is", "VBZ"), ("are", "VBP"), ("am", "VBP"), ("was", "VBD"), ("were", "VBD"),
    ("been", "VBN"), ("being", "VBG"), ("have", "VBP"), ("has", "VBZ"), ("had", "VBD"),
    ("having", "VBG"), ("do", "VBP"), ("does", "VBZ"), ("did", "VBD"), ("doing", "VBG"),
    // common irregular verbs
    ("said", "VBD"), ("says", "VBZ"), ("say", "VBP"), ("grew", "VBD"), ("grown", "VBN"),
    ("rose", "VBD"), ("risen", "VBN"), ("fell", "VBD"), ("fallen", "VBN"), ("took", "VBD"),
    ("taken", "VBN"), ("made", "VBD"), ("went", "VBD"), ("gone", "VBN"), ("came", "VBD"),
    ("saw", "VBD"), ("seen", "VBN"), ("gave", "VBD"), ("given", "VBN"), ("got", "VBD"),
    ("gotten", "VBN"), ("sold", "VBD"), ("bought", "VBD"), ("paid", "VBD"), ("hit", "VBD"),
    ("led", "VBD"), ("left", "VBD"), ("lost", "VBD"), ("kept", "VBD"), ("beat", "VBD"),
    ("beaten", "VBN"), ("met", "VBD"), ("spent", "VBD"), ("won", "VBD"), ("wrote", "VBD"),
    ("written", "VBN"), ("told", "VBD"), ("thought", "VBD"), ("brought", "VBD"),
    ("began", "VBD"), ("begun", "VBN"), ("became", "VBD"), ("held", "VBD"), ("ran", "VBD"),
    ("stood", "VBD"), ("sent", "VBD"), ("built", "VBD"), ("found", "VBD"), ("known", "VBN"),
    ("knew", "VBD"), ("shown", "VBN"), ("showed", "VBD"), ("drove", "VBD"), ("driven", "VBN"),
    ("sank", "VBD"), ("sunk", "VBN"), ("soared", "VBD"), ("expects", "VBZ"),
    // common adjectives
    ("good", "JJ"), ("bad", "JJ"), ("new", "JJ"), ("old", "JJ"), ("high", "JJ"), ("low", "JJ"),
    ("big", "JJ"), ("small", "JJ"), ("strong", "JJ"), ("weak", "JJ"), ("large", "JJ"),
    ("great", "JJ"), ("major", "JJ"), ("key", "JJ"), ("top", "JJ"), ("early", "JJ"),
    ("late", "JJ"), ("recent", "JJ"), ("next", "JJ"), ("last", "JJ"), ("first", "JJ"),
    ("few", "JJ"), ("many", "JJ"), ("much", "JJ"), ("several", "JJ"), ("other", "JJ"),
    ("same", "JJ"), ("such", "JJ"), ("own", "JJ"), ("full", "JJ"), ("long", "JJ"),
    ("short", "JJ"), ("better", "JJR"), ("best", "JJS"), ("worse", "JJR"), ("worst", "JJS"),
    ("higher", "JJR"), ("lower", "JJR"), ("bigger", "JJR"), ("larger", "JJR"),
    ("stronger", "JJR"), ("weaker", "JJR"), ("greater", "JJR"), ("smaller", "JJR"),
    ("earlier", "JJR"), ("later", "JJR"), ("wider", "JJR"), ("faster", "JJR"),
    // number words
    ("one", "CD"), ("two", "CD"), ("three", "CD"), ("four", "CD"), ("five", "CD"),
    ("six", "CD"), ("seven", "CD"), ("eight", "CD"), ("nine", "CD"), ("ten", "CD"),
    ("hundred", "CD"), ("thousand", "CD"), ("million", "CD"), ("billion", "CD"),
    ("trillion", "CD"),
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "able", "ible", "ive", "ical", "less", "ish", "ic", "ary",
];

/// Lexicon and rule based Penn Treebank tagger
#[derive(Debug, Clone)]
pub struct PosTagger {
    lexicon: HashMap<&'static str, &'static str>,
}

impl PosTagger {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
        }
    }

    /// Tag a token sequence; the output has one entry per input token
    pub fn tag(&self, tokens: &[String]) -> Vec<TaggedWord> {
        let mut tagged: Vec<TaggedWord> = Vec::with_capacity(tokens.len());

        for token in tokens {
            let lower = token.to_lowercase();
            let sentence_start = tagged
                .last()
                .is_none_or(|prev| matches!(prev.word.as_str(), "." | "!" | "?"));
            let mut tag = self
                .lexicon
                .get(lower.as_str())
                .copied()
                .unwrap_or_else(|| guess_tag(token, &lower, sentence_start));

            if let Some(prev) = tagged.last() {
                tag = apply_context(prev, tag, &lower);
            }

            tagged.push(TaggedWord {
                word: token.clone(),
                tag,
            });
        }

        tagged
    }
}

impl Default for PosTagger {
    fn default() -> Self {
        Self::new()
    }
}

fn guess_tag(token: &str, lower: &str, sentence_start: bool) -> &'static str {
    let first = token.chars().next().unwrap_or(' ');

    if !token.chars().any(char::is_alphanumeric) {
        return "SYM";
    }
    if first.is_ascii_digit() {
        return "CD";
    }
    if first.is_uppercase() && !sentence_start {
        return if lower.ends_with('s') && token.len() > 3 { "NNPS" } else { "NNP" };
    }

    let len = lower.len();
    if len > 4 && lower.ends_with("ly") {
        "RB"
    } else if len > 4 && lower.ends_with("ing") {
        "VBG"
    } else if len > 3 && lower.ends_with("ed") {
        "VBD"
    } else if len > 5 && lower.ends_with("est") {
        "JJS"
    } else if len > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        "JJ"
    } else if len > 3
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
    {
        "NNS"
    } else {
        "NN"
    }
}

fn apply_context(prev: &TaggedWord, tag: &'static str, lower: &str) -> &'static str {
    let prev_lower = prev.word.to_lowercase();

    match (prev.tag, tag) {
        ("TO" | "MD", "NN" | "NNS" | "VBP" | "VBZ") => "VB",
        ("PRP", "NNS") if matches!(prev_lower.as_str(), "he" | "she" | "it") => "VBZ",
        ("PRP", "NN") if matches!(prev_lower.as_str(), "i" | "we" | "you" | "they") => "VBP",
        (_, "VBD") if is_auxiliary(&prev_lower) => "VBN",
        ("DT" | "PRP$", "VBD") if lower.ends_with("ed") => "JJ",
        _ => tag,
    }
}

fn is_auxiliary(word: &str) -> bool {
    matches!(
        word,
        "be" | "is" | "are" | "am" | "was" | "were" | "been" | "being" | "have" | "has" | "had"
            | "having" | "'s" | "'ve" | "'re"
    )
}
