//! Rule based English lemmatizer
//!
//! Irregular forms are resolved through exception tables. Regular forms go
//! through suffix detachment rules per word category, followed by a small
//! amount of orthographic repair (undoubling `stopp` to `stop`, restoring a
//! silent `e` in `mak` to `make`).

use std::collections::HashMap;

use crate::tagger::WordCategory;

const NOUN_EXCEPTIONS: &[(&str, &str)] = &[
    ("men", "man"), ("women", "woman"), ("children", "child"), ("feet", "foot"),
    ("teeth", "tooth"), ("mice", "mouse"), ("geese", "goose"), ("indices", "index"),
    ("analyses", "analysis"), ("crises", "crisis"), ("theses", "thesis"),
    ("criteria", "criterion"), ("phenomena", "phenomenon"), ("lives", "life"),
    ("wives", "wife"), ("knives", "knife"), ("leaves", "leaf"), ("halves", "half"),
    ("shelves", "shelf"), ("thieves", "thief"), ("heroes", "hero"), ("echoes", "echo"),
];

/// Nouns that end in `s` in their base form
const INVARIANT_NOUNS: &[&str] = &[
    "news", "series", "species", "means", "headquarters", "economics", "politics", "physics",
    "earnings", "sales", "savings", "proceeds", "diabetes", "lens", "chaos", "canvas",
];

const VERB_EXCEPTIONS: &[(&str, &str)] = &[
    ("is", "be"), ("are", "be"), ("am", "be"), ("was", "be"), ("were", "be"), ("been", "be"),
    ("being", "be"), ("has", "have"), ("had", "have"), ("having", "have"), ("does", "do"),
    ("did", "do"), ("done", "do"), ("said", "say"), ("says", "say"), ("grew", "grow"),
    ("grown", "grow"), ("rose", "rise"), ("risen", "rise"), ("fell", "fall"),
    ("fallen", "fall"), ("took", "take"), ("taken", "take"), ("made", "make"),
    ("went", "go"), ("gone", "go"), ("goes", "go"), ("came", "come"), ("saw", "see"),
    ("seen", "see"), ("gave", "give"), ("given", "give"), ("got", "get"),
    ("gotten", "get"), ("sold", "sell"), ("bought", "buy"), ("paid", "pay"), ("led", "lead"),
    ("left", "leave"), ("lost", "lose"), ("kept", "keep"), ("beaten", "beat"),
    ("met", "meet"), ("spent", "spend"), ("won", "win"), ("wrote", "write"),
    ("written", "write"), ("told", "tell"), ("thought", "think"), ("brought", "bring"),
    ("began", "begin"), ("begun", "begin"), ("became", "become"), ("held", "hold"),
    ("ran", "run"), ("stood", "stand"), ("sent", "send"), ("built", "build"),
    ("found", "find"), ("knew", "know"), ("known", "know"), ("shown", "show"),
    ("drove", "drive"), ("driven", "drive"), ("sank", "sink"), ("sunk", "sink"),
    ("changed", "change"), ("changing", "change"), ("changes", "change"),
    ("created", "create"), ("creating", "create"), ("declined", "decline"),
    ("declining", "decline"), ("caused", "cause"), ("causing", "cause"),
    ("focused", "focus"), ("focusing", "focus"), ("agreed", "agree"),
    ("guaranteed", "guarantee"), ("freed", "free"),
];

const ADJECTIVE_EXCEPTIONS: &[(&str, &str)] = &[
    ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
    ("larger", "large"), ("largest", "large"), ("wider", "wide"), ("widest", "wide"),
    ("later", "late"), ("latest", "late"), ("safer", "safe"), ("safest", "safe"),
    ("closer", "close"), ("closest", "close"), ("nicer", "nice"), ("nicest", "nice"),
];

/// Category aware lemmatizer backed by immutable exception tables
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    nouns: HashMap<&'static str, &'static str>,
    verbs: HashMap<&'static str, &'static str>,
    adjectives: HashMap<&'static str, &'static str>,
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            nouns: NOUN_EXCEPTIONS.iter().copied().collect(),
            verbs: VERB_EXCEPTIONS.iter().copied().collect(),
            adjectives: ADJECTIVE_EXCEPTIONS.iter().copied().collect(),
        }
    }

    /// Reduce a lowercase word to its lemma for the given category
    pub fn lemmatize(&self, word: &str, category: WordCategory) -> String {
        let table = match category {
            WordCategory::Noun => &self.nouns,
            WordCategory::Verb => &self.verbs,
            WordCategory::Adjective => &self.adjectives,
            WordCategory::Adverb => return word.to_string(),
        };

        if let Some(lemma) = table.get(word) {
            return (*lemma).to_string();
        }

        match category {
            WordCategory::Noun => noun_lemma(word),
            WordCategory::Verb => verb_lemma(word),
            WordCategory::Adjective => adjective_lemma(word),
            WordCategory::Adverb => word.to_string(),
        }
    }
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

fn noun_lemma(word: &str) -> String {
    if word.len() <= 3 || INVARIANT_NOUNS.contains(&word) {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["sses", "xes", "zes", "ches", "shes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    word.strip_suffix('s').unwrap_or(word).to_string()
}

fn verb_lemma(word: &str) -> String {
    if word.len() <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies").or_else(|| word.strip_suffix("ied")) {
        return format!("{stem}y");
    }
    for suffix in ["sses", "xes", "zes", "ches", "shes", "oes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with("ss") {
        return word.to_string();
    }
    // exceed, proceed, need
    if word.ends_with("eed") {
        return word.to_string();
    }
    if word.len() > 5 {
        if let Some(stem) = word.strip_suffix("ing") {
            return repair_stem(stem);
        }
    }
    if word.len() > 4 {
        if let Some(stem) = word.strip_suffix("ed") {
            return repair_stem(stem);
        }
    }
    word.strip_suffix('s').unwrap_or(word).to_string()
}

fn adjective_lemma(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("iest").or_else(|| word.strip_suffix("ier")) {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }
    for suffix in ["est", "er"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.len() >= 3 {
                return undouble(stem).unwrap_or_else(|| stem.to_string());
            }
        }
    }
    word.to_string()
}

fn is_vowel(c: u8) -> bool {
    matches!(c, b'a' | b'e' | b'i' | b'o' | b'u')
}

/// `stopp` -> `stop`, leaving `ll`, `ss` and `zz` alone
fn undouble(stem: &str) -> Option<String> {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 3 && bytes[n - 1] == bytes[n - 2] && !is_vowel(bytes[n - 1]) && !matches!(bytes[n - 1], b'l' | b's' | b'z') {
        return Some(stem[..n - 1].to_string());
    }
    None
}

fn repair_stem(stem: &str) -> String {
    if let Some(undoubled) = undouble(stem) {
        return undoubled;
    }
    if needs_silent_e(stem) {
        return format!("{stem}e");
    }
    stem.to_string()
}

fn needs_silent_e(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n < 2 {
        return false;
    }
    let last = bytes[n - 1];
    let prev = bytes[n - 2];

    // receiv, produc, realiz, continu
    if matches!(last, b'v' | b'c' | b'z' | b'u') {
        return true;
    }
    // rais, releas, purchas, clos, us
    if last == b's' && is_vowel(prev) && prev != b'u' {
        return true;
    }
    // requir, secur, measur
    if last == b'r' && matches!(prev, b'i' | b'u') && (n < 3 || !is_vowel(bytes[n - 3])) {
        return true;
    }
    // estimat, indicat, operat
    if last == b't' && prev == b'a' && n >= 5 && !is_vowel(bytes[n - 3]) {
        return true;
    }
    // mak, tak, hop, vot: one short syllable ending consonant-vowel-consonant
    let vowel_groups = bytes
        .iter()
        .zip(std::iter::once(&b'x').chain(bytes.iter()))
        .filter(|(c, before)| is_vowel(**c) && !is_vowel(**before))
        .count();
    n <= 4
        && vowel_groups == 1
        && !is_vowel(last)
        && !matches!(last, b'w' | b'x' | b'y')
        && is_vowel(prev)
        && (n < 3 || !is_vowel(bytes[n - 3]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(word: &str, category: WordCategory) -> String {
        Lemmatizer::new().lemmatize(word, category)
    }

    #[test]
    fn test_noun_plurals() {
        assert_eq!(lemma("companies", WordCategory::Noun), "company");
        assert_eq!(lemma("shares", WordCategory::Noun), "share");
        assert_eq!(lemma("taxes", WordCategory::Noun), "tax");
        assert_eq!(lemma("businesses", WordCategory::Noun), "business");
        assert_eq!(lemma("matches", WordCategory::Noun), "match");
        assert_eq!(lemma("children", WordCategory::Noun), "child");
    }

    #[test]
    fn test_nouns_left_alone() {
        assert_eq!(lemma("news", WordCategory::Noun), "news");
        assert_eq!(lemma("business", WordCategory::Noun), "business");
        assert_eq!(lemma("status", WordCategory::Noun), "status");
        assert_eq!(lemma("analysis", WordCategory::Noun), "analysis");
        assert_eq!(lemma("gas", WordCategory::Noun), "gas");
    }

    #[test]
    fn test_regular_verbs() {
        assert_eq!(lemma("reported", WordCategory::Verb), "report");
        assert_eq!(lemma("stopped", WordCategory::Verb), "stop");
        assert_eq!(lemma("running", WordCategory::Verb), "run");
        assert_eq!(lemma("making", WordCategory::Verb), "make");
        assert_eq!(lemma("produced", WordCategory::Verb), "produce");
        assert_eq!(lemma("raised", WordCategory::Verb), "raise");
        assert_eq!(lemma("estimated", WordCategory::Verb), "estimate");
        assert_eq!(lemma("carried", WordCategory::Verb), "carry");
        assert_eq!(lemma("agreed", WordCategory::Verb), "agree");
        assert_eq!(lemma("expands", WordCategory::Verb), "expand");
        assert_eq!(lemma("passed", WordCategory::Verb), "pass");
        assert_eq!(lemma("opened", WordCategory::Verb), "open");
    }

    #[test]
    fn test_irregular_verbs() {
        assert_eq!(lemma("was", WordCategory::Verb), "be");
        assert_eq!(lemma("grew", WordCategory::Verb), "grow");
        assert_eq!(lemma("sold", WordCategory::Verb), "sell");
    }

    #[test]
    fn test_adjectives() {
        assert_eq!(lemma("better", WordCategory::Adjective), "good");
        assert_eq!(lemma("stronger", WordCategory::Adjective), "strong");
        assert_eq!(lemma("bigger", WordCategory::Adjective), "big");
        assert_eq!(lemma("happiest", WordCategory::Adjective), "happy");
        assert_eq!(lemma("larger", WordCategory::Adjective), "large");
        assert_eq!(lemma("bullish", WordCategory::Adjective), "bullish");
    }

    #[test]
    fn test_adverbs_unchanged() {
        assert_eq!(lemma("quickly", WordCategory::Adverb), "quickly");
    }
}
