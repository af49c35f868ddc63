//! Seed types for initializing grid content.

use serde::{Deserialize, Serialize};

use crate::compute::{CellKind, GridEngine, GridError};

/// Complete seed specification for grid initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seed {
    /// Pattern to use for seeding.
    pub pattern: Pattern,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            pattern: Pattern::Random {
                density: 8,
                seed: None,
            },
        }
    }
}

/// Predefined patterns for initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// All cells empty.
    Empty,
    /// Each cell live with probability `1 / density`.
    Random {
        density: u32,
        /// Fixed RNG seed for reproducible boards.
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Explicit cells as `(x, y, value)`; for binary grids any non-zero
    /// value is alive. Coordinates outside the grid are skipped.
    Custom { cells: Vec<(usize, usize, u8)> },
}

impl Seed {
    /// Overwrite the grid's content with this seed.
    ///
    /// Custom values are validated before anything is written.
    pub fn apply<K: CellKind>(&self, grid: &mut GridEngine<K>) -> Result<(), GridError> {
        match &self.pattern {
            Pattern::Empty => grid.empty(),
            Pattern::Random { density, seed } => {
                if let Some(seed) = seed {
                    grid.reseed(*seed);
                }
                grid.randomize(*density)?;
            }
            Pattern::Custom { cells } => {
                let values = cells
                    .iter()
                    .map(|&(x, y, raw)| grid.kind().from_raw(raw).map(|v| (x, y, v)))
                    .collect::<Result<Vec<_>, _>>()?;

                grid.empty();
                for (x, y, v) in values {
                    if x < grid.width() && y < grid.height() {
                        grid.set(x, y, v)?;
                    }
                }
            }
        }
        Ok(())
    }
}
