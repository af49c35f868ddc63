//! Compute module - Grid storage and the algorithms that move it around.

mod brush;
mod cell;
mod grid;
mod pan;
mod partition;
mod resize;
mod stats;

pub use brush::*;
pub use cell::*;
pub use grid::*;
pub use pan::MAX_WORKERS;
pub use partition::*;
pub use stats::*;

/// Error type for grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Grid dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Could not start worker pool: {0}")]
    WorkerPool(String),

    #[error("Pan worker {worker} failed: {message}")]
    WorkerFailed { worker: usize, message: String },
}
