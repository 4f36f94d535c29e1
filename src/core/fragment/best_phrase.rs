//! Single best-phrase selection

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Shortest alphabetic run accepted as a phrase
pub const MIN_RUN_WORDS: usize = 4;

/// Phrases are clamped to this many words
pub const MAX_PHRASE_WORDS: usize = 12;

/// Letters-only fallback text shorter than this is abandoned
pub const MIN_FALLBACK_CHARS: usize = 6;

lazy_static! {
    static ref QUOTES: Regex = Regex::new(r#"[“”‘’"']"#).unwrap();
    static ref FANCY_DASHES: Regex = Regex::new(r"[–—]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref ALPHA_WORD: Regex = Regex::new(r"^[a-z]+(?:-[a-z]+)*$").unwrap();
    static ref NON_LETTER: Regex = Regex::new(r"[^a-z ]+").unwrap();
}

fn normalize(mention: &str) -> String {
    let composed: String = mention.nfkc().collect();
    let unquoted = QUOTES.replace_all(&composed, "");
    let dashed = FANCY_DASHES.replace_all(&unquoted, "-");
    WHITESPACE
        .replace_all(&dashed, " ")
        .trim()
        .to_lowercase()
}

fn clamp_words(words: &[&str]) -> String {
    words[..words.len().min(MAX_PHRASE_WORDS)].join(" ")
}

/// Pick the phrase to highlight for a mention.
///
/// Prefers the longest run of purely alphabetic words (hyphenated words
/// count); below [`MIN_RUN_WORDS`] it falls back to the mention with every
/// non-letter removed. `None` when neither yields enough text.
pub fn best_phrase(mention: &str) -> Option<String> {
    let base = normalize(mention);
    if base.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = base.split(' ').collect();
    let (mut best_start, mut best_len) = (0, 0);
    let (mut run_start, mut run_len) = (0, 0);
    for (i, token) in tokens.iter().enumerate() {
        if ALPHA_WORD.is_match(token) {
            if run_len == 0 {
                run_start = i;
            }
            run_len += 1;
            if run_len > best_len {
                best_start = run_start;
                best_len = run_len;
            }
        } else {
            run_len = 0;
        }
    }

    if best_len >= MIN_RUN_WORDS {
        return Some(clamp_words(&tokens[best_start..best_start + best_len]));
    }

    let letters = NON_LETTER.replace_all(&base, " ");
    let collapsed = WHITESPACE.replace_all(&letters, " ");
    let phrase = collapsed.trim();
    if phrase.chars().count() < MIN_FALLBACK_CHARS {
        return None;
    }
    let words: Vec<&str> = phrase.split(' ').collect();
    Some(clamp_words(&words))
}
