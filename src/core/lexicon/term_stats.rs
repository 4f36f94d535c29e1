//! Global term statistics
//!
//! Document frequency of every term over the loaded corpus. Built once per
//! artifact-list load and read-only afterwards; a new list means a new
//! `GlobalTermStats`, never an in-place patch.

use std::collections::HashMap;

use super::tokenizer::tokenize;
use crate::core::models::Artifact;

/// Corpus-wide document frequencies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalTermStats {
    doc_freq: HashMap<String, usize>,
    corpus_size: usize,
}

impl GlobalTermStats {
    /// Count, per term, the artifacts whose text contains it.
    pub fn build(artifacts: &[Artifact]) -> Self {
        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for artifact in artifacts {
            // TokenSet is already distinct, so each artifact counts once
            for term in &tokenize(artifact.label_text()) {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
            }
        }
        Self {
            doc_freq,
            corpus_size: artifacts.len(),
        }
    }

    /// Corpus size N.
    pub fn corpus_size(&self) -> usize {
        self.corpus_size
    }

    pub fn is_empty(&self) -> bool {
        self.corpus_size == 0
    }

    /// Number of distinct terms seen.
    pub fn vocabulary_size(&self) -> usize {
        self.doc_freq.len()
    }

    /// Artifacts containing `term` (0 when unseen).
    pub fn doc_freq(&self, term: &str) -> usize {
        self.doc_freq.get(term).copied().unwrap_or(0)
    }

    /// Share of the corpus containing `term`; `None` for an empty corpus.
    pub fn prevalence(&self, term: &str) -> Option<f64> {
        if self.corpus_size == 0 {
            return None;
        }
        Some(self.doc_freq(term) as f64 / self.corpus_size as f64)
    }

    /// Smoothed inverse document frequency, `ln((N+1)/(df+1))`.
    pub fn idf(&self, term: &str) -> f64 {
        ((self.corpus_size as f64 + 1.0) / (self.doc_freq(term) as f64 + 1.0)).ln()
    }
}
