//! Fragment Module - Diary Deep Links
//!
//! Builds text-fragment URLs (`#:~:text=...`) that ask the browser to scroll
//! to and highlight an artifact's mention on its diary scan page. The page
//! is not under our control, so both strategies trade precision for the
//! chance of matching at all.
//!
//! # Strategies
//!
//! - **Best phrase** (default): one short, purely alphabetic phrase. Dashes
//!   and digits are where live pages most often differ from the caption.
//! - **Multi candidate**: several phrasings behind one `#:~:` prefix; the
//!   browser highlights whichever matches.
//!
//! Whatever the strategy, the returned URL carries at most one fragment: an
//! existing `#...` on the base URL is always dropped.

mod best_phrase;
mod candidates;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

pub use best_phrase::{best_phrase, MAX_PHRASE_WORDS, MIN_FALLBACK_CHARS, MIN_RUN_WORDS};
pub use candidates::{
    candidate_directives, candidate_phrases, is_selector_like, TextDirective, MAX_CANDIDATE_CHARS,
};

/// Prefix introducing fragment directives
pub const FRAGMENT_DIRECTIVE: &str = "#:~:";

/// Characters `encodeURIComponent` leaves alone, besides alphanumerics
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// How a text fragment is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentStrategy {
    /// Single alphabetic phrase
    #[default]
    BestPhrase,
    /// Several phrasings joined as `text=a&text=b`
    MultiCandidate,
}

impl FragmentStrategy {
    /// Build a deep link to `base_url` highlighting `mention`.
    pub fn link(self, base_url: &str, mention: &str) -> String {
        match self {
            FragmentStrategy::BestPhrase => text_fragment_url(base_url, mention),
            FragmentStrategy::MultiCandidate => multi_candidate_url(base_url, mention),
        }
    }
}

/// Percent-encode with the rules of JavaScript's `encodeURIComponent`.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// The base URL without any fragment.
pub fn strip_fragment(url: &str) -> &str {
    url.split('#').next().unwrap_or(url)
}

/// Deep link with a single best phrase. Falls back to the bare base URL
/// when the mention yields no usable phrase.
pub fn text_fragment_url(base_url: &str, mention: &str) -> String {
    let base = strip_fragment(base_url);
    match best_phrase(mention) {
        Some(phrase) => format!("{}{}text={}", base, FRAGMENT_DIRECTIVE, encode_component(&phrase)),
        None => base.to_string(),
    }
}

/// Deep link with every candidate phrasing, `#:~:text=a&text=b&...`.
/// Selector-like mentions produce the bare base URL.
pub fn multi_candidate_url(base_url: &str, mention: &str) -> String {
    let base = strip_fragment(base_url);
    if is_selector_like(mention) {
        return base.to_string();
    }
    let directives: Vec<String> = candidate_directives(mention)
        .iter()
        .map(TextDirective::encode)
        .collect();
    if directives.is_empty() {
        return base.to_string();
    }
    format!("{}{}{}", base, FRAGMENT_DIRECTIVE, directives.join("&"))
}
