//! Grid engine - cell storage, indexed access and seeding.
//!
//! Storage is a flat row-major array indexed `y * width + x`. The engine
//! exclusively owns it; `reset`, `resize_with_offset` and `pan_parallel`
//! replace it wholesale.

use rand::prelude::*;

use super::{Binary, CellKind, GridError, Teams};

/// Grid of alive/dead cells.
pub type BinaryGrid = GridEngine<Binary>;

/// Grid of team ids (0 = empty).
pub type TeamGrid = GridEngine<Teams>;

/// Cell storage shared by every grid variant.
#[derive(Debug, Clone)]
pub struct GridEngine<K: CellKind> {
    pub(super) kind: K,
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) cells: Vec<K::Value>,
    rng: StdRng,
}

/// Validate grid dimensions and return the cell count.
pub(super) fn checked_area(width: usize, height: usize) -> Result<usize, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::InvalidDimension { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(GridError::InvalidDimension { width, height })
}

impl<K: CellKind> GridEngine<K> {
    /// Create an empty grid with an entropy-seeded RNG.
    pub fn with_kind(kind: K, width: usize, height: usize) -> Result<Self, GridError> {
        Self::build(kind, width, height, StdRng::from_entropy())
    }

    /// Create an empty grid whose `randomize` output is reproducible.
    pub fn with_kind_and_seed(
        kind: K,
        width: usize,
        height: usize,
        seed: u64,
    ) -> Result<Self, GridError> {
        Self::build(kind, width, height, StdRng::seed_from_u64(seed))
    }

    fn build(kind: K, width: usize, height: usize, rng: StdRng) -> Result<Self, GridError> {
        let area = checked_area(width, height)?;
        Ok(Self {
            kind,
            width,
            height,
            cells: vec![K::EMPTY; area],
            rng,
        })
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell kind configuration.
    #[inline]
    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// Row-major view of every cell.
    #[inline]
    pub fn cells(&self) -> &[K::Value] {
        &self.cells
    }

    /// Whether signed coordinates address a cell of this grid.
    #[inline]
    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Result<usize, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// Read the cell at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<K::Value, GridError> {
        let idx = self.index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Write the cell at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, value: K::Value) -> Result<(), GridError> {
        let idx = self.index(x, y)?;
        self.kind.validate(value)?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Replace storage with an empty grid of the given size.
    pub fn reset(&mut self, width: usize, height: usize) -> Result<(), GridError> {
        let area = checked_area(width, height)?;
        log::debug!(
            "reset grid {}x{} -> {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        self.cells = vec![K::EMPTY; area];
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Clear every cell in place.
    pub fn empty(&mut self) {
        self.cells.fill(K::EMPTY);
    }

    /// Make each cell live with probability `1 / density`, empty otherwise.
    pub fn randomize(&mut self, density: u32) -> Result<(), GridError> {
        if density == 0 {
            return Err(GridError::InvalidArgument(
                "density must be at least 1".to_string(),
            ));
        }

        let kind = &self.kind;
        let rng = &mut self.rng;
        for cell in &mut self.cells {
            *cell = if rng.gen_range(0..density) == 0 {
                kind.live_value(rng)
            } else {
                K::EMPTY
            };
        }
        Ok(())
    }

    /// Reseed the RNG used by `randomize`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Number of occupied cells.
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&v| K::is_live(v)).count()
    }
}

impl GridEngine<Binary> {
    /// Create an empty alive/dead grid.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        Self::with_kind(Binary, width, height)
    }

    /// Create an empty alive/dead grid with a seeded RNG.
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Self, GridError> {
        Self::with_kind_and_seed(Binary, width, height, seed)
    }
}

impl GridEngine<Teams> {
    /// Create an empty team grid. `teams` counts the empty id 0.
    pub fn new(teams: u8, width: usize, height: usize) -> Result<Self, GridError> {
        Self::with_kind(Teams::new(teams)?, width, height)
    }

    /// Create an empty team grid with a seeded RNG.
    pub fn with_seed(teams: u8, width: usize, height: usize, seed: u64) -> Result<Self, GridError> {
        Self::with_kind_and_seed(Teams::new(teams)?, width, height, seed)
    }

    /// Number of team ids, including the empty id 0.
    #[inline]
    pub fn team_count(&self) -> u8 {
        self.kind.count()
    }
}
