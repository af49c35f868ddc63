//! Scripted pan/resize/brush sequences, replayed against a grid.

use serde::{Deserialize, Serialize};

use crate::compute::{Brush, CellKind, GridEngine, GridError};

/// Ordered list of grid operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanScript {
    pub steps: Vec<ScriptStep>,
}

/// A single scripted operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    /// In-place pan.
    Pan { dx: isize, dy: isize },
    /// Parallel pan using the configured thread count.
    PanParallel { dx: isize, dy: isize },
    /// Offset-preserving resize.
    Resize {
        width: usize,
        height: usize,
        #[serde(default)]
        dx: isize,
        #[serde(default)]
        dy: isize,
    },
    /// Brush write centred on `(x, y)`; `value` is a raw cell value.
    Paint {
        x: isize,
        y: isize,
        brush: (usize, usize),
        value: u8,
    },
    /// Brush erase centred on `(x, y)`.
    Erase {
        x: isize,
        y: isize,
        brush: (usize, usize),
    },
}

impl PanScript {
    /// `steps` diagonal pans of one cell each, alternating in-place and
    /// parallel.
    pub fn diagonal(steps: usize) -> Self {
        Self {
            steps: (0..steps)
                .map(|i| {
                    if i % 2 == 0 {
                        ScriptStep::Pan { dx: 1, dy: 1 }
                    } else {
                        ScriptStep::PanParallel { dx: 1, dy: 1 }
                    }
                })
                .collect(),
        }
    }

    /// Apply every step in order, stopping at the first error.
    pub fn replay<K: CellKind>(
        &self,
        grid: &mut GridEngine<K>,
        threads: usize,
    ) -> Result<(), GridError> {
        for step in &self.steps {
            step.apply(grid, threads)?;
        }
        Ok(())
    }
}

impl ScriptStep {
    /// Apply this step to a grid.
    pub fn apply<K: CellKind>(
        &self,
        grid: &mut GridEngine<K>,
        threads: usize,
    ) -> Result<(), GridError> {
        match *self {
            ScriptStep::Pan { dx, dy } => grid.pan(dx, dy),
            ScriptStep::PanParallel { dx, dy } => grid.pan_parallel(dx, dy, threads)?,
            ScriptStep::Resize {
                width,
                height,
                dx,
                dy,
            } => grid.resize_with_offset(width, height, dx, dy)?,
            ScriptStep::Paint { x, y, brush, value } => {
                let brush = Brush::new(brush.0, brush.1)?;
                let value = grid.kind().from_raw(value)?;
                grid.paint(&brush, x, y, value)?;
            }
            ScriptStep::Erase { x, y, brush } => {
                let brush = Brush::new(brush.0, brush.1)?;
                grid.erase(&brush, x, y);
            }
        }
        Ok(())
    }
}
