//! Labeling Module
//!
//! Names clusters of co-located artifacts from their metadata and mention
//! text, and ranks the terms of a single focused cell.
//!
//! # Labeling Stages
//!
//! 1. **Explicit field**: every member shares one normalized metadata value
//! 2. **Salient token**: a widely shared, globally rare term (TF-IDF × lift)
//! 3. **Top token**: the same score over every term in the cluster
//!
//! When all three come up empty the label is [`NO_SHARED_TERM`].

pub mod cluster_labeler;
pub mod top_terms;

pub use cluster_labeler::{ClusterLabel, ClusterLabeler, LabelStrategy, NO_SHARED_TERM};
pub use top_terms::{top_terms, TermCount};
