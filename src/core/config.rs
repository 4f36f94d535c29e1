//! Atlas configuration
//!
//! Every tunable of the clustering, labeling and presentation pipeline lives
//! here, including the two labeling thresholds. Loaded from a JSON file
//! (all fields optional) and validated before use.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{AtlasError, Result, ResultExt};
use super::fragment::FragmentStrategy;

/// Default ground-plane cell edge, in scene units
pub const DEFAULT_CELL_SIZE: f64 = 2.0;

/// Default minimum members for a cell to count as a cluster
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 2;

/// Share of cluster members a token must appear in for the salient-token stage
pub const DEFAULT_MIN_CLUSTER_SHARE: f64 = 0.6;

/// Corpus prevalence at or above which a token is too generic to label with
pub const DEFAULT_MAX_GLOBAL_PREVALENCE: f64 = 0.35;

/// Floor for the prevalence denominator in the lift term
pub const DEFAULT_PREVALENCE_EPSILON: f64 = 1e-6;

/// Radius of the fallback sphere for artifacts without a usable position
pub const DEFAULT_FALLBACK_RADIUS: f64 = 10.0;

/// Vertical offset of the fallback sphere
pub const DEFAULT_FALLBACK_LIFT: f64 = 1.0;

/// Multiplier applied to every artifact scale
pub const DEFAULT_BASE_SCALE: f64 = 0.4;

/// Scale used when an artifact has none, or a non-positive one
pub const DEFAULT_SCALE: f64 = 1.0;

/// Number of term rows shown for a focused cluster
pub const DEFAULT_FOCUS_TOP_TERMS: usize = 6;

/// Maximum characters of a hover title before truncation
pub const DEFAULT_TITLE_MAX_CHARS: usize = 120;

/// Configuration for the artifact atlas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Edge length of a clustering cell on the ground plane
    pub cell_size: f64,
    /// Minimum members for a cell to be reported as a cluster
    pub min_cluster_size: usize,
    /// Stage-2 gate: minimum share of members containing a token
    pub min_cluster_share: f64,
    /// Tokens at or above this corpus prevalence never become labels
    pub max_global_prevalence: f64,
    /// Lower bound for the prevalence denominator
    pub prevalence_epsilon: f64,
    /// Fallback placement sphere radius
    pub fallback_radius: f64,
    /// Fallback placement vertical offset
    pub fallback_lift: f64,
    /// Scale multiplier for display
    pub base_scale: f64,
    /// Scale used for missing or non-positive artifact scales
    pub default_scale: f64,
    /// Show only type specimens when the list contains any
    pub prefer_type_specimens: bool,
    /// Default text-fragment construction strategy
    pub fragment_strategy: FragmentStrategy,
    /// Term rows reported for a focused cluster
    pub focus_top_terms: usize,
    /// Hover title truncation length
    pub title_max_chars: usize,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
            min_cluster_share: DEFAULT_MIN_CLUSTER_SHARE,
            max_global_prevalence: DEFAULT_MAX_GLOBAL_PREVALENCE,
            prevalence_epsilon: DEFAULT_PREVALENCE_EPSILON,
            fallback_radius: DEFAULT_FALLBACK_RADIUS,
            fallback_lift: DEFAULT_FALLBACK_LIFT,
            base_scale: DEFAULT_BASE_SCALE,
            default_scale: DEFAULT_SCALE,
            prefer_type_specimens: true,
            fragment_strategy: FragmentStrategy::default(),
            focus_top_terms: DEFAULT_FOCUS_TOP_TERMS,
            title_max_chars: DEFAULT_TITLE_MAX_CHARS,
        }
    }
}

impl AtlasConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AtlasError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).context(format!("loading {}", path.display()))
    }

    /// Parse and validate configuration JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the pipeline relies on.
    pub fn validate(&self) -> Result<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(AtlasError::invalid_config(format!(
                "cell_size must be a positive number, got {}",
                self.cell_size
            )));
        }
        if self.min_cluster_size == 0 {
            return Err(AtlasError::invalid_config("min_cluster_size must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.min_cluster_share) {
            return Err(AtlasError::invalid_config(format!(
                "min_cluster_share must be within [0, 1], got {}",
                self.min_cluster_share
            )));
        }
        if !(0.0..=1.0).contains(&self.max_global_prevalence) {
            return Err(AtlasError::invalid_config(format!(
                "max_global_prevalence must be within [0, 1], got {}",
                self.max_global_prevalence
            )));
        }
        if self.prevalence_epsilon.is_nan() || self.prevalence_epsilon <= 0.0 {
            return Err(AtlasError::invalid_config("prevalence_epsilon must be positive"));
        }
        for (name, value) in [
            ("fallback_radius", self.fallback_radius),
            ("base_scale", self.base_scale),
            ("default_scale", self.default_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AtlasError::invalid_config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !self.fallback_lift.is_finite() {
            return Err(AtlasError::invalid_config(format!(
                "fallback_lift must be finite, got {}",
                self.fallback_lift
            )));
        }
        Ok(())
    }

    /// Display scale for an artifact's raw scale value.
    pub fn display_scale(&self, scale: Option<f64>) -> f64 {
        let raw = match scale {
            Some(s) if s > 0.0 => s,
            _ => self.default_scale,
        };
        (raw * self.base_scale).max(0.001)
    }
}
