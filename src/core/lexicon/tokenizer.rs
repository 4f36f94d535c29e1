//! Mention tokenizer
//!
//! Lowercases, drops quotes and punctuation (hyphens survive), splits on
//! whitespace and discards short tokens, stop words and the excavation
//! vocabulary that would otherwise name every cluster.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

/// Tokens shorter than this are discarded
pub const MIN_TOKEN_LEN: usize = 3;

/// Function words never used as terms
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "of", "in", "on", "at", "to", "for", "from", "with", "by",
    "as", "is", "are", "was", "were", "this", "that", "these", "those", "it", "its", "be", "been",
    "being", "into", "over", "under", "near", "around", "about", "between", "within", "without",
    "through", "during", "per", "via",
];

/// Material, container and site words common to nearly every mention
pub const DOMAIN_WORDS: &[&str] = &[
    "fragment", "fragments", "piece", "pieces", "object", "objects", "model", "models",
    "pottery", "sherd", "sherds", "stone", "limestone", "granite", "sandstone", "alabaster",
    "jar", "jars", "vase", "vases", "bowl", "bowls", "statue", "statues", "inscribed",
    "inscription", "broken", "large", "small", "base", "upper", "lower", "egypt", "giza", "tomb",
    "site", "room", "area", "pit",
];

lazy_static! {
    static ref EXCLUDED: HashSet<&'static str> =
        STOP_WORDS.iter().chain(DOMAIN_WORDS.iter()).copied().collect();
    static ref QUOTES: Regex = Regex::new(r#"[“”‘’'"]"#).unwrap();
    static ref NON_TERM: Regex = Regex::new(r"[^a-z0-9\- ]+").unwrap();
}

/// Distinct terms of one text, in order of first occurrence.
///
/// Order matters: label tie-breaks go to the first-encountered term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenSet {
    terms: Vec<String>,
}

impl TokenSet {
    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    /// Terms in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a TokenSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

/// Tokenize free text into its significant terms.
pub fn tokenize(text: &str) -> TokenSet {
    let lowered = text.to_lowercase();
    let unquoted = QUOTES.replace_all(&lowered, "");
    let cleaned = NON_TERM.replace_all(&unquoted, " ");

    let mut seen = HashSet::new();
    let terms = cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_TOKEN_LEN && !EXCLUDED.contains(w))
        .filter(|w| seen.insert(*w))
        .map(str::to_string)
        .collect();

    TokenSet { terms }
}
