//! Presenter Module
//!
//! The core never renders anything itself. Views are pushed through a
//! [`DisplaySink`]; the host decides what a sink is (a scene overlay, a
//! terminal, a test recorder).
//!
//! [`ConsolePresenter`] is the terminal sink used by the `atlas` binary. It
//! keeps the last value of each console and renders them as text.

use serde::Serialize;

use crate::core::atlas::ClusterSummary;
use crate::core::error::Result;

/// Cluster console text when there is nothing to list
pub const NO_CLUSTERS_HINT: &str = "No clusters detected…";

/// Label console text when nothing is focused
pub const HOVER_HINT: &str = "Hover an artifact to preview its title here…";

// =============================================================================
// Display Sink
// =============================================================================

/// Receiver of published views.
pub trait DisplaySink {
    /// Replace the cluster console rows (already sorted).
    fn set_cluster_summary(&mut self, clusters: &[ClusterSummary]);

    /// Replace the hover label. An empty string clears it.
    fn set_focused_label(&mut self, text: &str);

    fn set_visible_count(&mut self, count: usize);
}

/// Render cluster rows as `#1 “label” — 3 items`, one per line.
pub fn format_cluster_rows(rows: &[ClusterSummary]) -> String {
    if rows.is_empty() {
        return NO_CLUSTERS_HINT.to_string();
    }
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            format!(
                "#{} “{}” — {} item{}",
                i + 1,
                row.label,
                row.member_count,
                if row.member_count == 1 { "" } else { "s" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the hover label, or the hint when it is blank.
pub fn format_focused_label(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        HOVER_HINT.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Pretty JSON rendering of any view.
pub fn render_json<T: Serialize>(view: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}

// =============================================================================
// Console Presenter
// =============================================================================

/// Terminal sink holding the latest published state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsolePresenter {
    clusters: Vec<ClusterSummary>,
    focused_label: String,
    visible_count: usize,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clusters(&self) -> &[ClusterSummary] {
        &self.clusters
    }

    pub fn focused_label(&self) -> &str {
        &self.focused_label
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Cluster console text.
    pub fn cluster_console(&self) -> String {
        format_cluster_rows(&self.clusters)
    }

    /// Label console text.
    pub fn label_console(&self) -> String {
        format_focused_label(&self.focused_label)
    }

    /// All three consoles as one report.
    pub fn render(&self) -> String {
        format!(
            "Visible: {}\n{}\n{}\n",
            self.visible_count,
            self.label_console(),
            self.cluster_console()
        )
    }
}

impl DisplaySink for ConsolePresenter {
    fn set_cluster_summary(&mut self, clusters: &[ClusterSummary]) {
        self.clusters = clusters.to_vec();
    }

    fn set_focused_label(&mut self, text: &str) {
        self.focused_label = text.to_string();
    }

    fn set_visible_count(&mut self, count: usize) {
        self.visible_count = count;
    }
}
