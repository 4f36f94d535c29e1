//! Spatial binning on the ground plane
//!
//! Positions are quantized to square cells on the x/z plane; height is
//! ignored, so artifacts stacked above one another share a cell.

use std::collections::BTreeMap;

use serde::Serialize;

use super::error::{AtlasError, Result};
use super::models::{Artifact, Position};

/// Grid key of a ground-plane cell. Orders by `ix`, then `iz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CellKey {
    pub ix: i64,
    pub iz: i64,
}

impl std::fmt::Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.ix, self.iz)
    }
}

/// `floor(v / cell_size)` as a grid index.
pub fn cell_index(v: f64, cell_size: f64) -> i64 {
    (v / cell_size).floor() as i64
}

/// Artifacts grouped by cell, cells in key order, members in input order.
pub type CellMap<'a> = BTreeMap<CellKey, Vec<&'a Artifact>>;

/// Quantizes positions into cells.
#[derive(Debug, Clone, Copy)]
pub struct SpatialBinner {
    cell_size: f64,
}

impl SpatialBinner {
    /// Create a binner; the cell size must be finite and positive.
    pub fn new(cell_size: f64) -> Result<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(AtlasError::invalid_config(format!(
                "cell_size must be a positive number, got {}",
                cell_size
            )));
        }
        Ok(Self { cell_size })
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cell containing a position.
    pub fn cell_of(&self, position: &Position) -> CellKey {
        CellKey {
            ix: cell_index(position.x, self.cell_size),
            iz: cell_index(position.z, self.cell_size),
        }
    }

    /// Bucket artifacts by cell.
    pub fn bin<'a, I>(&self, artifacts: I) -> CellMap<'a>
    where
        I: IntoIterator<Item = &'a Artifact>,
    {
        let mut cells: CellMap<'a> = BTreeMap::new();
        for artifact in artifacts {
            cells
                .entry(self.cell_of(&artifact.position))
                .or_default()
                .push(artifact);
        }
        cells
    }

    /// Cells with at least `min_members` artifacts.
    pub fn dense_cells<'a, I>(&self, artifacts: I, min_members: usize) -> CellMap<'a>
    where
        I: IntoIterator<Item = &'a Artifact>,
    {
        let mut cells = self.bin(artifacts);
        cells.retain(|_, members| members.len() >= min_members);
        cells
    }
}
