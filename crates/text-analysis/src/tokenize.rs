//! Sentence and word segmentation for English text

use regex::Regex;

use crate::error::Result;

/// Abbreviations that end with a period without ending the sentence
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "gen", "gov", "sen", "rep", "rev",
    "inc", "corp", "co", "ltd", "llc", "plc", "bros", "dept", "univ", "assn", "est", "vs", "etc",
    "approx", "no", "vol", "fig", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept",
    "oct", "nov", "dec", "mon", "tue", "wed", "thu", "fri", "sat", "sun", "e.g", "i.e", "u.s",
    "u.k", "u.n", "a.m", "p.m",
];

/// Characters that may trail sentence punctuation and still belong to the sentence
const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '\u{201d}', '\u{2019}'];

/// Contraction suffixes split off the preceding word
const CLITICS: &[&str] = &["'s", "'re", "'ve", "'ll", "'d", "'m"];

/// Splits text into sentences and sentences into word tokens
#[derive(Debug, Clone)]
pub struct Tokenizer {
    word: Regex,
}

impl Tokenizer {
    /// Compile the word pattern
    pub fn new() -> Result<Self> {
        let word = Regex::new(
            r"(?x)
              [\p{Alphabetic}\p{N}]+(?:[-+.'\u{2019}][\p{Alphabetic}\p{N}]+)*\+*   # words, numbers, hyphenation, contractions
            | \.\.\.                                          # ellipsis
            | \S                                              # any other symbol
            ",
        )?;
        Ok(Self { word })
    }

    /// Split text into sentences in document order
    ///
    /// Line breaks always end a sentence. Within a line a sentence ends after
    /// `.`, `!` or `?` (plus closing quotes or brackets) followed by whitespace,
    /// unless the period belongs to an abbreviation, an initial, or the next
    /// word starts in lowercase.
    pub fn sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        for line in text.lines() {
            split_line(line, &mut sentences);
        }
        sentences
    }

    /// Split one sentence into word tokens
    pub fn words(&self, sentence: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for m in self.word.find_iter(sentence) {
            split_clitics(m.as_str(), &mut tokens);
        }
        tokens
    }
}

fn split_line(line: &str, out: &mut Vec<String>) {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (pos, c) = chars[i];
        if !matches!(c, '.' | '!' | '?') {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() && (matches!(chars[j].1, '.' | '!' | '?') || CLOSERS.contains(&chars[j].1)) {
            j += 1;
        }

        let at_end = j == chars.len();
        if at_end || chars[j].1.is_whitespace() {
            let end = if at_end { line.len() } else { chars[j].0 };
            if c != '.' || ends_sentence(&line[start..pos], &line[end..]) {
                push_segment(&line[start..end], out);
                start = end;
            }
        }
        i = j;
    }

    push_segment(&line[start..], out);
}

fn ends_sentence(before: &str, after: &str) -> bool {
    let word = before
        .split_whitespace()
        .next_back()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());

    if word.is_empty() {
        return true;
    }
    if word.chars().count() == 1 && word.chars().all(char::is_alphabetic) {
        return false;
    }
    if ABBREVIATIONS.contains(&word.to_lowercase().as_str()) {
        return false;
    }

    !after
        .trim_start()
        .chars()
        .find(|c| c.is_alphanumeric())
        .is_some_and(char::is_lowercase)
}

fn push_segment(segment: &str, out: &mut Vec<String>) {
    let segment = segment.trim();
    if !segment.is_empty() {
        out.push(segment.to_string());
    }
}

fn split_clitics(token: &str, out: &mut Vec<String>) {
    let normalized = token.replace('\u{2019}', "'");
    let lower = normalized.to_lowercase();

    if lower.len() > 3 && lower.ends_with("n't") {
        let cut = normalized.len() - 3;
        out.push(normalized[..cut].to_string());
        out.push(normalized[cut..].to_string());
        return;
    }

    if let Some(clitic) = CLITICS.iter().find(|c| lower.ends_with(*c) && lower.len() > c.len()) {
        let cut = normalized.len() - clitic.len();
        out.push(normalized[..cut].to_string());
        out.push(normalized[cut..].to_string());
        return;
    }

    out.push(normalized);
}
