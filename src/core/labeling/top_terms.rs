//! Term ranking for a single focused cell.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::lexicon::tokenize;
use crate::core::models::Artifact;

/// A term and the number of members mentioning it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

/// The `limit` most widely shared terms among `members`, most shared first,
/// ties in alphabetical order.
pub fn top_terms(members: &[&Artifact], limit: usize) -> Vec<TermCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for artifact in members {
        for term in &tokenize(artifact.label_text()) {
            *counts.entry(term.clone()).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<TermCount> = counts
        .into_iter()
        .map(|(term, count)| TermCount { term, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
    rows.truncate(limit);
    rows
}
