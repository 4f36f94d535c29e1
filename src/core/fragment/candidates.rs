//! Multi-candidate phrasing
//!
//! Generates several renderings of a mention so that at least one has a
//! chance of matching the live page: as written and lowercased, each with the
//! dash spellings a transcription might use, plus word-window slices.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::encode_component;

/// Each candidate is clamped to this many characters
pub const MAX_CANDIDATE_CHARS: usize = 160;

/// Words in the middle slice of a long mention
const MIDDLE_WINDOW: usize = 12;

/// Words kept at each end of the first/last pair
const EDGE_WINDOW: usize = 8;

/// Words in the leading slice
const LEAD_WINDOW: usize = 6;

/// Each half of a range, so that `start,end` stays within the clamp
const MAX_RANGE_EDGE_CHARS: usize = (MAX_CANDIDATE_CHARS - 1) / 2;

const NON_BREAKING_HYPHEN: &str = "\u{2011}";
const EN_DASH: &str = "\u{2013}";
const EM_DASH: &str = "\u{2014}";

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref DOUBLE_QUOTES: Regex = Regex::new(r"[“”]").unwrap();
    static ref SINGLE_QUOTES: Regex = Regex::new(r"[‘’]").unwrap();
    static ref ZERO_WIDTH: Regex = Regex::new(r"[\u{200B}-\u{200D}\u{FEFF}]").unwrap();
    static ref ANY_DASH: Regex = Regex::new(r"[\u{2010}-\u{2014}]").unwrap();
    static ref XPATH_ROOT: Regex = Regex::new(r"^/{1,2}").unwrap();
    static ref XPATH_TEXT: Regex = Regex::new(r"(?i)/text\(\)").unwrap();
    static ref INDEXED_ELEMENT: Regex = Regex::new(r"(?i)\b(div|p|section)\[\d+\]").unwrap();
    static ref SELECTOR_CHARS: Regex = Regex::new(r"[>~+\[\]#.]").unwrap();
}

/// Whether a mention looks like an XPath or CSS selector rather than
/// page text.
pub fn is_selector_like(mention: &str) -> bool {
    let t = mention.trim();
    if t.is_empty() {
        return false;
    }
    XPATH_ROOT.is_match(t)
        || XPATH_TEXT.is_match(t)
        || INDEXED_ELEMENT.is_match(t)
        || SELECTOR_CHARS.is_match(t)
}

fn normalize(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text, " ");
    let doubled = DOUBLE_QUOTES.replace_all(&collapsed, "\"");
    let singled = SINGLE_QUOTES.replace_all(&doubled, "'");
    ZERO_WIDTH.replace_all(&singled, "").trim().to_string()
}

fn push_unique(out: &mut Vec<String>, candidate: String) {
    if !out.contains(&candidate) {
        out.push(candidate);
    }
}

fn hyphen_variants(seed: &str) -> Vec<String> {
    let mut out = Vec::new();
    push_unique(&mut out, seed.to_string());
    push_unique(&mut out, ANY_DASH.replace_all(seed, "-").into_owned());
    push_unique(&mut out, seed.replace('-', NON_BREAKING_HYPHEN));
    push_unique(&mut out, seed.replace('-', EN_DASH));
    push_unique(&mut out, seed.replace('-', EM_DASH));
    push_unique(&mut out, seed.replace('-', ""));
    push_unique(&mut out, seed.replace('-', " "));
    out
}

fn clamp_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// One `text=` directive of a multi-candidate link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextDirective {
    /// Match the phrase exactly
    Exact(String),
    /// Match from `start` through `end`
    Range { start: String, end: String },
}

impl TextDirective {
    /// Encoded `text=` directive. A range keeps its separating comma raw;
    /// commas inside either half are escaped.
    pub fn encode(&self) -> String {
        match self {
            TextDirective::Exact(text) => format!("text={}", encode_component(text)),
            TextDirective::Range { start, end } => {
                format!("text={},{}", encode_component(start), encode_component(end))
            }
        }
    }
}

impl fmt::Display for TextDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextDirective::Exact(text) => write!(f, "{}", text),
            TextDirective::Range { start, end } => write!(f, "{},{}", start, end),
        }
    }
}

fn push_exact(out: &mut Vec<TextDirective>, variant: &str) {
    let normalized = normalize(variant);
    if normalized.is_empty() {
        return;
    }
    let directive = TextDirective::Exact(clamp_chars(&normalized, MAX_CANDIDATE_CHARS));
    if !out.contains(&directive) {
        out.push(directive);
    }
}

/// Candidate directives for a mention, deduplicated, in priority order.
pub fn candidate_directives(mention: &str) -> Vec<TextDirective> {
    let raw = normalize(mention);
    if raw.is_empty() {
        return Vec::new();
    }

    let mut seeds = vec![raw.clone()];
    push_unique(&mut seeds, raw.to_lowercase());

    let mut directives = Vec::new();
    for variant in seeds.iter().flat_map(|s| hyphen_variants(s)) {
        push_exact(&mut directives, &variant);
    }

    let lowered = raw.to_lowercase();
    let words: Vec<&str> = lowered.split(' ').filter(|w| !w.is_empty()).collect();
    if words.len() > MIDDLE_WINDOW {
        let mid = (words.len() / 2).saturating_sub(MIDDLE_WINDOW / 2);
        let end = (mid + MIDDLE_WINDOW).min(words.len());
        push_exact(&mut directives, &words[mid..end].join(" "));
    }
    if words.len() >= EDGE_WINDOW {
        let range = TextDirective::Range {
            start: clamp_chars(&words[..EDGE_WINDOW].join(" "), MAX_RANGE_EDGE_CHARS),
            end: clamp_chars(&words[words.len() - EDGE_WINDOW..].join(" "), MAX_RANGE_EDGE_CHARS),
        };
        if !directives.contains(&range) {
            directives.push(range);
        }
    }
    push_exact(&mut directives, &words[..words.len().min(LEAD_WINDOW)].join(" "));
    directives
}

/// Candidate phrasings for a mention as display text, deduplicated, in
/// priority order. Ranges read as `start,end`.
pub fn candidate_phrases(mention: &str) -> Vec<String> {
    let mut phrases = Vec::new();
    for directive in candidate_directives(mention) {
        push_unique(&mut phrases, directive.to_string());
    }
    phrases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeds_and_lead_slice() {
        assert_eq!(
            candidate_phrases("Seal impression with name"),
            vec!["Seal impression with name", "seal impression with name"]
        );
    }

    #[test]
    fn test_hyphen_variants() {
        let candidates = candidate_phrases("red-ware");
        assert_eq!(
            candidates,
            vec![
                "red-ware",
                "red\u{2011}ware",
                "red\u{2013}ware",
                "red\u{2014}ware",
                "redware",
                "red ware",
            ]
        );
    }

    #[test]
    fn test_fancy_dash_folds_to_ascii() {
        let candidates = candidate_phrases("red\u{2013}ware");
        assert_eq!(candidates[0], "red\u{2013}ware");
        assert_eq!(candidates[1], "red-ware");
    }

    #[test]
    fn test_long_mention_slices() {
        let mention = (1..=20).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let candidates = candidate_phrases(&mention);
        assert!(candidates.contains(&"w5 w6 w7 w8 w9 w10 w11 w12 w13 w14 w15 w16".to_string()));
        assert!(candidates.contains(
            &"w1 w2 w3 w4 w5 w6 w7 w8,w13 w14 w15 w16 w17 w18 w19 w20".to_string()
        ));
        assert!(candidates.contains(&"w1 w2 w3 w4 w5 w6".to_string()));
    }

    #[test]
    fn test_range_directive_encoding() {
        let range = TextDirective::Range {
            start: "seal of khufu".to_string(),
            end: "a, b".to_string(),
        };
        assert_eq!(range.encode(), "text=seal%20of%20khufu,a%2C%20b");
        assert_eq!(range.to_string(), "seal of khufu,a, b");
        assert_eq!(
            TextDirective::Exact("Khufu, seal".to_string()).encode(),
            "text=Khufu%2C%20seal"
        );
    }

    #[test]
    fn test_long_mention_yields_one_range() {
        let mention = (1..=20).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
        let ranges: Vec<_> = candidate_directives(&mention)
            .into_iter()
            .filter(|d| matches!(d, TextDirective::Range { .. }))
            .collect();
        assert_eq!(
            ranges,
            vec![TextDirective::Range {
                start: "w1 w2 w3 w4 w5 w6 w7 w8".to_string(),
                end: "w13 w14 w15 w16 w17 w18 w19 w20".to_string(),
            }]
        );
    }

    #[test]
    fn test_clamp_and_normalize() {
        let long = "a".repeat(400);
        assert!(candidate_phrases(&long).iter().all(|c| c.chars().count() <= MAX_CANDIDATE_CHARS));
        assert_eq!(
            candidate_phrases("  “Khufu”\u{200B}  seal ")[0],
            "\"Khufu\" seal"
        );
    }

    #[test]
    fn test_empty() {
        assert!(candidate_phrases("").is_empty());
        assert!(candidate_phrases("\u{200B} ").is_empty());
    }

    #[test]
    fn test_selector_like() {
        assert!(is_selector_like("//div[2]/p"));
        assert!(is_selector_like("/html/body/text()"));
        assert!(is_selector_like("section[4]"));
        assert!(is_selector_like("#main > p"));
        assert!(!is_selector_like("Seal impression with name"));
        assert!(!is_selector_like(""));
    }
}
