//! Atlas - the clustering context
//!
//! Owns everything derived from one artifact-list load (global term
//! statistics, resolved date bounds, the temporal filter) together with the
//! host-controlled visibility state. The host calls [`Atlas::recompute`]
//! after every visibility-affecting change and [`Atlas::focus`] on hover;
//! both are pure functions of the current state.

use std::collections::BTreeSet;
use std::path::Path;

use log::{debug, info};
use serde::Serialize;

use super::config::AtlasConfig;
use super::error::Result;
use super::fragment::FragmentStrategy;
use super::labeling::{top_terms, ClusterLabel, ClusterLabeler, NO_SHARED_TERM};
use super::lexicon::GlobalTermStats;
use super::models::{load_artifact_list, Artifact};
use super::presenter::DisplaySink;
use super::spatial::{CellKey, SpatialBinner};
use super::temporal::{resolve_bounds, DateBounds, DateRange, TemporalFilter};

/// Focus row shown when the hovered artifact's cell is too sparse
pub const NO_CLUSTER_HERE: &str = "(no cluster here)";

// =============================================================================
// Visibility Overrides
// =============================================================================

/// Artifacts the host has hidden by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisibilityOverrides {
    hidden: BTreeSet<String>,
}

impl VisibilityOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide an artifact. Returns `false` if it was already hidden.
    pub fn hide(&mut self, id: impl Into<String>) -> bool {
        self.hidden.insert(id.into())
    }

    /// Show a hidden artifact. Returns `false` if it was not hidden.
    pub fn show(&mut self, id: &str) -> bool {
        self.hidden.remove(id)
    }

    pub fn is_hidden(&self, id: &str) -> bool {
        self.hidden.contains(id)
    }

    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }

    pub fn clear(&mut self) {
        self.hidden.clear();
    }
}

// =============================================================================
// Views
// =============================================================================

/// One row of the cluster console.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub label: String,
    pub member_count: usize,
}

impl ClusterSummary {
    pub fn new(label: impl Into<String>, member_count: usize) -> Self {
        Self {
            label: label.into(),
            member_count,
        }
    }
}

/// A labeled group of co-located visible artifacts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    pub key: CellKey,
    pub member_count: usize,
    pub label: ClusterLabel,
    /// Member ids in load order
    pub members: Vec<String>,
}

impl Cluster {
    pub fn summary(&self) -> ClusterSummary {
        ClusterSummary::new(self.label.text.clone(), self.member_count)
    }
}

/// Result of one recompute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtlasView {
    /// Clusters by descending member count, ties in cell-key order
    pub clusters: Vec<Cluster>,
    pub visible_count: usize,
    pub total_count: usize,
    /// Date extent of the corpus; `None` when filtering is disabled
    pub extent: Option<DateRange>,
    pub active_range: Option<DateRange>,
}

impl AtlasView {
    pub fn summaries(&self) -> Vec<ClusterSummary> {
        self.clusters.iter().map(Cluster::summary).collect()
    }

    /// Push the global view to a sink. Clears any focused label, so
    /// publishing again after a hover restores the unfocused display.
    pub fn publish<S: DisplaySink + ?Sized>(&self, sink: &mut S) {
        sink.set_cluster_summary(&self.summaries());
        sink.set_focused_label("");
        sink.set_visible_count(self.visible_count);
    }
}

/// Term breakdown of the cell under a hovered artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusView {
    pub artifact_id: String,
    /// Hover title of the artifact
    pub label: String,
    /// Scene scale the host renders the artifact at
    pub display_scale: f64,
    pub key: CellKey,
    /// Visible artifacts in the cell, the hovered one included
    pub member_count: usize,
    pub rows: Vec<ClusterSummary>,
}

impl FocusView {
    /// Whether the cell is dense enough to count as a cluster.
    pub fn is_cluster(&self) -> bool {
        !(self.rows.len() == 1 && self.rows[0].label == NO_CLUSTER_HERE)
    }

    pub fn publish<S: DisplaySink + ?Sized>(&self, sink: &mut S) {
        sink.set_cluster_summary(&self.rows);
        sink.set_focused_label(&self.label);
    }
}

// =============================================================================
// Atlas
// =============================================================================

/// Clustering context for one loaded artifact list.
#[derive(Debug, Clone)]
pub struct Atlas {
    config: AtlasConfig,
    artifacts: Vec<Artifact>,
    /// Resolved bounds, parallel to `artifacts`
    bounds: Vec<Option<DateBounds>>,
    stats: GlobalTermStats,
    filter: TemporalFilter,
    overrides: VisibilityOverrides,
    binner: SpatialBinner,
    labeler: ClusterLabeler,
}

impl Atlas {
    /// Build the context from decoded artifacts.
    pub fn new(artifacts: Vec<Artifact>, config: AtlasConfig) -> Result<Self> {
        config.validate()?;
        let binner = SpatialBinner::new(config.cell_size)?;
        let labeler = ClusterLabeler::from_config(&config);
        let mut atlas = Self {
            config,
            artifacts: Vec::new(),
            bounds: Vec::new(),
            stats: GlobalTermStats::default(),
            filter: TemporalFilter::default(),
            overrides: VisibilityOverrides::new(),
            binner,
            labeler,
        };
        atlas.reload(artifacts);
        Ok(atlas)
    }

    /// Read an artifact list file and build the context.
    pub fn load(path: &Path, config: AtlasConfig) -> Result<Self> {
        config.validate()?;
        let artifacts = load_artifact_list(path, &config)?;
        Self::new(artifacts, config)
    }

    /// Replace the artifact list. Statistics, bounds and the date filter are
    /// rebuilt from scratch; hidden ids are kept.
    pub fn reload(&mut self, artifacts: Vec<Artifact>) {
        let total = artifacts.len();
        self.artifacts = if self.config.prefer_type_specimens
            && artifacts.iter().any(|a| a.type_specimen)
        {
            artifacts.into_iter().filter(|a| a.type_specimen).collect()
        } else {
            artifacts
        };
        self.stats = GlobalTermStats::build(&self.artifacts);
        self.bounds = self
            .artifacts
            .iter()
            .map(|a| resolve_bounds(&a.dates))
            .collect();
        self.filter = TemporalFilter::from_bounds(self.bounds.iter().map(Option::as_ref));

        let dated = self.bounds.iter().filter(|b| b.is_some()).count();
        info!(
            "atlas holds {} of {} artifacts ({} dated, {} terms)",
            self.artifacts.len(),
            total,
            dated,
            self.stats.vocabulary_size()
        );
    }

    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn stats(&self) -> &GlobalTermStats {
        &self.stats
    }

    pub fn filter(&self) -> &TemporalFilter {
        &self.filter
    }

    pub fn overrides(&self) -> &VisibilityOverrides {
        &self.overrides
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.artifacts.iter().position(|a| a.id == id)
    }

    pub fn artifact(&self, id: &str) -> Option<&Artifact> {
        self.index_of(id).map(|i| &self.artifacts[i])
    }

    /// Resolved date bounds of an artifact.
    pub fn bounds_of(&self, id: &str) -> Option<&DateBounds> {
        self.index_of(id).and_then(|i| self.bounds[i].as_ref())
    }

    // -------------------------------------------------------------------------
    // Host transitions
    // -------------------------------------------------------------------------

    /// Set the active date range. Ignored (returns `false`) when no
    /// artifact is dated.
    pub fn set_date_range(&mut self, range: DateRange) -> bool {
        self.filter.set_range(range)
    }

    pub fn reset_date_range(&mut self) {
        self.filter.reset();
    }

    pub fn hide(&mut self, id: &str) -> bool {
        self.overrides.hide(id)
    }

    pub fn show(&mut self, id: &str) -> bool {
        self.overrides.show(id)
    }

    // -------------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------------

    fn is_visible_at(&self, index: usize) -> bool {
        !self.overrides.is_hidden(&self.artifacts[index].id)
            && self.filter.is_visible(self.bounds[index].as_ref())
    }

    /// Artifacts passing both the hide list and the date filter, in load
    /// order.
    pub fn visible_artifacts(&self) -> Vec<&Artifact> {
        (0..self.artifacts.len())
            .filter(|&i| self.is_visible_at(i))
            .map(|i| &self.artifacts[i])
            .collect()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.index_of(id).is_some_and(|i| self.is_visible_at(i))
    }

    /// Group the visible artifacts into labeled clusters.
    pub fn recompute(&self) -> AtlasView {
        let visible = self.visible_artifacts();
        let cells = self.binner.bin(visible.iter().copied());
        let cell_count = cells.len();

        let mut clusters: Vec<Cluster> = cells
            .into_iter()
            .filter(|(_, members)| members.len() >= self.config.min_cluster_size)
            .map(|(key, members)| Cluster {
                key,
                member_count: members.len(),
                label: self.labeler.label(&members, &self.stats),
                members: members.iter().map(|a| a.id.clone()).collect(),
            })
            .collect();
        // Cells arrive in key order; the stable sort keeps it among equals
        clusters.sort_by(|a, b| b.member_count.cmp(&a.member_count));

        debug!(
            "recompute: {} visible, {} cells, {} clusters",
            visible.len(),
            cell_count,
            clusters.len()
        );

        AtlasView {
            clusters,
            visible_count: visible.len(),
            total_count: self.artifacts.len(),
            extent: self.filter.extent(),
            active_range: self.filter.active(),
        }
    }

    /// Term breakdown of the cell under a visible artifact. `None` for an
    /// unknown or currently invisible artifact.
    pub fn focus(&self, id: &str) -> Option<FocusView> {
        let artifact = self.artifact(id)?;
        if !self.is_visible(id) {
            return None;
        }
        let key = self.binner.cell_of(&artifact.position);
        let members: Vec<&Artifact> = self
            .visible_artifacts()
            .into_iter()
            .filter(|a| self.binner.cell_of(&a.position) == key)
            .collect();

        let rows = if members.len() < self.config.min_cluster_size {
            vec![ClusterSummary::new(NO_CLUSTER_HERE, members.len())]
        } else {
            let terms = top_terms(&members, self.config.focus_top_terms);
            if terms.is_empty() {
                vec![ClusterSummary::new(NO_SHARED_TERM, members.len())]
            } else {
                terms
                    .into_iter()
                    .map(|t| ClusterSummary::new(t.term, t.count))
                    .collect()
            }
        };

        Some(FocusView {
            artifact_id: artifact.id.clone(),
            label: artifact.display_title(self.config.title_max_chars),
            display_scale: self.config.display_scale(artifact.scale),
            key,
            member_count: members.len(),
            rows,
        })
    }

    /// Deep link into the artifact's diary page with the configured
    /// strategy. `None` when the artifact is unknown or has no source page.
    pub fn link(&self, id: &str) -> Option<String> {
        self.link_with(id, self.config.fragment_strategy)
    }

    pub fn link_with(&self, id: &str, strategy: FragmentStrategy) -> Option<String> {
        let artifact = self.artifact(id)?;
        let base = artifact.source_url.as_deref()?;
        Some(strategy.link(base, artifact.mention.as_deref().unwrap_or("")))
    }
}
