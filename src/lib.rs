//! Life Grid - Pannable, resizable cellular automaton board storage.
//!
//! This crate provides the grid state engine behind a Game-of-Life style
//! board: storage for alive/dead or team-id cells, in-place and parallel
//! panning, offset-preserving resize and randomized seeding.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, seed and script types for grids
//! - `compute`: Grid storage and algorithms (pan, resize, partitioning)
//!
//! # Example
//!
//! ```rust
//! use life_grid::compute::{BinaryGrid, TeamGrid};
//!
//! let mut grid = BinaryGrid::new(5, 5)?;
//! grid.set(2, 2, true)?;
//! grid.pan(1, 0);
//! assert!(grid.get(3, 2)?);
//!
//! let mut teams = TeamGrid::new(3, 3, 3)?;
//! teams.set(0, 0, 2)?;
//! teams.resize_with_offset(3, 3, 1, 1)?;
//! assert_eq!(teams.get(1, 1)?, 2);
//! # Ok::<(), life_grid::compute::GridError>(())
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::{BinaryGrid, GridEngine, GridError, GridStats, TeamGrid};
pub use schema::{GridConfig, GridMode, PanScript, Seed};
