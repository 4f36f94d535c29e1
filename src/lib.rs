//! tomb_atlas - Spatial clustering and diary deep links for excavation artifacts
//!
//! Places 3D-scanned artifacts on a floor-plan grid, names each group of
//! co-located artifacts from its captions, filters the scene by excavation
//! date, and builds text-fragment links back into the scanned diary pages.
//! It is designed to be consumed by:
//! - The CLI binary (src/bin/atlas.rs)
//! - A scene host that owns rendering and the event loop
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **lib.rs** (this file): Pure logic, no CLI concerns
//! - **bin/atlas.rs**: Thin wrapper that calls the library
//!
//! The host drives everything through [`Atlas`]: it applies a transition
//! (date range, hide/show) and then calls [`Atlas::recompute`], publishing
//! the resulting view to its [`DisplaySink`].
//!
//! ```no_run
//! use tomb_atlas::{Atlas, AtlasConfig, ConsolePresenter};
//! use std::path::Path;
//!
//! let atlas = Atlas::load(Path::new("artifacts.json"), AtlasConfig::default())?;
//! let mut console = ConsolePresenter::new();
//! atlas.recompute().publish(&mut console);
//! println!("{}", console.render());
//! # Ok::<(), tomb_atlas::AtlasError>(())
//! ```

pub mod core;

pub use crate::core::{
    best_phrase, candidate_phrases, load_artifact_list, multi_candidate_url, parse_artifact_list,
    text_fragment_url, Artifact, Atlas, AtlasConfig, AtlasError, AtlasView, CellKey, Cluster,
    ClusterLabel, ClusterLabeler, ClusterSummary, ConsolePresenter, DateBounds, DateRange,
    DisplaySink, FocusView, FragmentStrategy, GlobalTermStats, LabelStrategy, Position, Result,
    SpatialBinner, TemporalFilter, NO_SHARED_TERM,
};

/// Returns the version of the tomb_atlas library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
