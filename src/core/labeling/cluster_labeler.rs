//! Cluster Labeler
//!
//! Derives one human-readable label per cluster. Stages run in order and
//! the first that yields a label wins, so a metadata value shared by every
//! member can never be overridden by token scoring.

use serde::Serialize;

use crate::core::config::{
    AtlasConfig, DEFAULT_MAX_GLOBAL_PREVALENCE, DEFAULT_MIN_CLUSTER_SHARE,
    DEFAULT_PREVALENCE_EPSILON,
};
use crate::core::lexicon::{tokenize, GlobalTermStats, TokenSet};
use crate::core::models::{Artifact, EXPLICIT_FIELDS};

/// Label used when no stage produces a candidate
pub const NO_SHARED_TERM: &str = "(no shared term)";

// =============================================================================
// Cluster Label
// =============================================================================

/// How a cluster label was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStrategy {
    /// Shared explicit metadata value
    ExplicitField,
    /// Term shared by most members and rare in the corpus
    SalientToken,
    /// Best-scoring term anywhere in the cluster
    TopToken,
    /// Nothing qualified
    Fallback,
}

/// A cluster label with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterLabel {
    /// The display text
    pub text: String,
    /// How the label was derived
    pub strategy: LabelStrategy,
    /// Metadata field the label came from (explicit-field stage only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Term score (token stages only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl ClusterLabel {
    fn explicit(field: &str, value: &str) -> Self {
        Self {
            text: value.to_string(),
            strategy: LabelStrategy::ExplicitField,
            field: Some(field.to_string()),
            score: None,
        }
    }

    fn token(term: &str, score: f64, strategy: LabelStrategy) -> Self {
        Self {
            text: term.to_string(),
            strategy,
            field: None,
            score: Some(score),
        }
    }

    /// The sentinel label.
    pub fn fallback() -> Self {
        Self {
            text: NO_SHARED_TERM.to_string(),
            strategy: LabelStrategy::Fallback,
            field: None,
            score: None,
        }
    }
}

// =============================================================================
// Cluster Labeler
// =============================================================================

/// Per-term tally within one cluster, in first-encountered order.
#[derive(Debug)]
struct TermTally<'a> {
    term: &'a str,
    /// Members whose token set contains the term. Token sets are distinct,
    /// so this is also the term's frequency within the cluster.
    members: usize,
}

/// Three-stage cluster labeler.
#[derive(Debug, Clone)]
pub struct ClusterLabeler {
    /// Explicit metadata fields, in priority order
    pub fields: Vec<String>,
    /// Stage-2 gate on the share of members containing a term
    pub min_cluster_share: f64,
    /// Terms at or above this corpus prevalence are never labels
    pub max_global_prevalence: f64,
    /// Floor for the prevalence denominator
    pub prevalence_epsilon: f64,
}

impl Default for ClusterLabeler {
    fn default() -> Self {
        Self {
            fields: EXPLICIT_FIELDS.iter().map(|f| f.to_string()).collect(),
            min_cluster_share: DEFAULT_MIN_CLUSTER_SHARE,
            max_global_prevalence: DEFAULT_MAX_GLOBAL_PREVALENCE,
            prevalence_epsilon: DEFAULT_PREVALENCE_EPSILON,
        }
    }
}

impl ClusterLabeler {
    /// Labeler with the thresholds of `config`.
    pub fn from_config(config: &AtlasConfig) -> Self {
        Self {
            min_cluster_share: config.min_cluster_share,
            max_global_prevalence: config.max_global_prevalence,
            prevalence_epsilon: config.prevalence_epsilon,
            ..Self::default()
        }
    }

    /// Label a cluster.
    pub fn label(&self, members: &[&Artifact], stats: &GlobalTermStats) -> ClusterLabel {
        if members.is_empty() {
            return ClusterLabel::fallback();
        }

        if let Some(label) = self.try_explicit_field(members) {
            return label;
        }

        // Prevalence is undefined without a corpus
        if stats.is_empty() {
            return ClusterLabel::fallback();
        }

        let token_sets: Vec<TokenSet> = members.iter().map(|a| tokenize(a.label_text())).collect();
        let tallies = tally_terms(&token_sets);

        if let Some(label) = self.try_salient_token(&tallies, members.len(), stats) {
            return label;
        }

        if let Some(label) = self.try_top_token(&tallies, members.len(), stats) {
            return label;
        }

        ClusterLabel::fallback()
    }

    /// Stage 1: a field on which every member carries the same value.
    fn try_explicit_field(&self, members: &[&Artifact]) -> Option<ClusterLabel> {
        self.fields.iter().find_map(|field| {
            let first = members.first()?.metadata_value(field)?;
            members
                .iter()
                .all(|a| a.metadata_value(field) == Some(first))
                .then(|| ClusterLabel::explicit(field, first))
        })
    }

    /// Stage 2: best-scoring term present in enough of the members.
    fn try_salient_token(
        &self,
        tallies: &[TermTally<'_>],
        cluster_size: usize,
        stats: &GlobalTermStats,
    ) -> Option<ClusterLabel> {
        let gated = tallies
            .iter()
            .filter(|t| t.members as f64 / cluster_size as f64 >= self.min_cluster_share);
        self.best_scoring(gated, cluster_size, stats)
            .map(|(term, score)| ClusterLabel::token(term, score, LabelStrategy::SalientToken))
    }

    /// Stage 3: best-scoring term overall.
    fn try_top_token(
        &self,
        tallies: &[TermTally<'_>],
        cluster_size: usize,
        stats: &GlobalTermStats,
    ) -> Option<ClusterLabel> {
        self.best_scoring(tallies.iter(), cluster_size, stats)
            .map(|(term, score)| ClusterLabel::token(term, score, LabelStrategy::TopToken))
    }

    /// Highest score wins; the first-encountered term keeps a tie.
    fn best_scoring<'t, 'a: 't, I>(
        &self,
        tallies: I,
        cluster_size: usize,
        stats: &GlobalTermStats,
    ) -> Option<(&'a str, f64)>
    where
        I: Iterator<Item = &'t TermTally<'a>>,
    {
        let mut best: Option<(&'a str, f64)> = None;
        for tally in tallies {
            let Some(score) = self.score(tally, cluster_size, stats) else {
                continue;
            };
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((tally.term, score));
            }
        }
        best
    }

    /// `tf × ln((N+1)/(df+1)) × share / max(prevalence, ε)`, or `None` for
    /// terms too common in the corpus to say anything.
    fn score(&self, tally: &TermTally<'_>, cluster_size: usize, stats: &GlobalTermStats) -> Option<f64> {
        let prevalence = stats.prevalence(tally.term)?;
        if prevalence >= self.max_global_prevalence {
            return None;
        }
        let share = tally.members as f64 / cluster_size as f64;
        let lift = share / prevalence.max(self.prevalence_epsilon);
        let tf = tally.members as f64;
        Some(tf * stats.idf(tally.term) * lift)
    }
}

fn tally_terms(token_sets: &[TokenSet]) -> Vec<TermTally<'_>> {
    let mut tallies: Vec<TermTally<'_>> = Vec::new();
    let mut index: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for set in token_sets {
        for term in set.iter() {
            match index.get(term) {
                Some(&i) => tallies[i].members += 1,
                None => {
                    index.insert(term, tallies.len());
                    tallies.push(TermTally { term, members: 1 });
                }
            }
        }
    }
    tallies
}

// =============================================================================
// Tests
// =============================================================================
