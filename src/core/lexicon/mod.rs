//! Lexicon Module
//!
//! Turns free-text mentions into significant terms and keeps corpus-wide
//! document frequencies for them.
//!
//! ```text
//! mention → tokenize → TokenSet ─┬→ GlobalTermStats (once per load)
//!                                └→ Cluster Labeler (per recompute)
//! ```

pub mod term_stats;
pub mod tokenizer;

pub use term_stats::GlobalTermStats;
pub use tokenizer::{tokenize, TokenSet, DOMAIN_WORDS, MIN_TOKEN_LEN, STOP_WORDS};
