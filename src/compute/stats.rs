//! Grid statistics for monitoring.

use serde::{Deserialize, Serialize};

use super::{CellKind, GridEngine, Teams};

/// Occupancy summary of a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridStats {
    pub width: usize,
    pub height: usize,
    pub live_cells: usize,
    /// `live_cells / (width * height)`.
    pub live_fraction: f32,
}

impl GridStats {
    /// Compute statistics from a grid.
    pub fn from_grid<K: CellKind>(grid: &GridEngine<K>) -> Self {
        let live_cells = grid.live_count();
        let area = grid.width() * grid.height();
        Self {
            width: grid.width(),
            height: grid.height(),
            live_cells,
            live_fraction: live_cells as f32 / area as f32,
        }
    }
}

impl<K: CellKind> GridEngine<K> {
    pub fn stats(&self) -> GridStats {
        GridStats::from_grid(self)
    }
}

impl GridEngine<Teams> {
    /// Population per team id; index 0 counts empty cells.
    pub fn team_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.kind.count() as usize];
        for &v in &self.cells {
            counts[v as usize] += 1;
        }
        counts
    }
}
