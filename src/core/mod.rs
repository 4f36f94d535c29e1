//! Core module for tomb_atlas
//!
//! Clustering, labeling, date filtering and deep-link synthesis over a
//! loaded artifact list.
//!
//! # Architecture
//!
//! - `models`: Artifact records and per-field decoders
//! - `error`: Error types using thiserror
//! - `config`: `AtlasConfig` and its defaults
//! - `lexicon`: Tokenizer and corpus-wide term statistics
//! - `spatial`: Ground-plane grid binning
//! - `labeling`: Cluster labels and focused-cell term ranking
//! - `temporal`: Date bounds resolution and the date filter
//! - `fragment`: Text-fragment deep links
//! - `atlas`: The context object with `recompute` and `focus`
//! - `presenter`: Display sink trait and console rendering

pub mod models;
pub mod error;
pub mod config;
pub mod lexicon;
pub mod spatial;
pub mod labeling;
pub mod temporal;
pub mod fragment;
pub mod atlas;
pub mod presenter;

// Re-export commonly used types
pub use models::{
    parse_artifact_list, load_artifact_list, Artifact, Position, Placement,
    PositionInput, DateFields, RawDate,
};
pub use error::{AtlasError, FieldDecodeError, Result, ResultExt};
pub use config::{
    AtlasConfig, DEFAULT_CELL_SIZE, DEFAULT_MIN_CLUSTER_SIZE, DEFAULT_MIN_CLUSTER_SHARE,
    DEFAULT_MAX_GLOBAL_PREVALENCE,
};
pub use lexicon::{tokenize, GlobalTermStats, TokenSet};
pub use spatial::{cell_index, CellKey, CellMap, SpatialBinner};
pub use labeling::{
    top_terms, ClusterLabel, ClusterLabeler, LabelStrategy, TermCount, NO_SHARED_TERM,
};
pub use temporal::{parse_date, resolve_bounds, DateBounds, DateRange, TemporalFilter};
pub use fragment::{
    best_phrase, candidate_phrases, multi_candidate_url, text_fragment_url, FragmentStrategy,
};
pub use atlas::{
    Atlas, AtlasView, Cluster, ClusterSummary, FocusView, VisibilityOverrides, NO_CLUSTER_HERE,
};
pub use presenter::{ConsolePresenter, DisplaySink};
