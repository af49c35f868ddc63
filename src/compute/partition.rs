//! Tiling of the grid index space for parallel work.
//!
//! A [`Tiling`] cuts the grid into `cols x rows` rectangles using near-equal
//! column and row splits. Regions never overlap and together cover every
//! cell. [`Tiling::split_mut`] hands out one exclusive mutable view per
//! region over a row-major buffer, so workers can write without locking.

use std::ops::Range;

/// A rectangular block of cell coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Column range.
    pub x: Range<usize>,
    /// Row range.
    pub y: Range<usize>,
}

impl Region {
    #[inline]
    pub fn width(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.y.len()
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }
}

/// Column and row boundaries of a grid partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tiling {
    /// `cols + 1` ascending boundaries from 0 to width.
    x_bounds: Vec<usize>,
    /// `rows + 1` ascending boundaries from 0 to height.
    y_bounds: Vec<usize>,
}

/// Partition a `width x height` grid into at most `parts` regions.
///
/// The factor pair `cols * rows == parts` giving the squarest tiles is used,
/// then each axis is capped at its length so no region is empty. `parts == 0`
/// is treated as 1, and `parts` never exceeds the cell count.
pub fn partition(parts: usize, width: usize, height: usize) -> Tiling {
    let cells = width.saturating_mul(height).max(1);
    let (cols, rows) = tile_shape(parts.clamp(1, cells), width, height);
    Tiling {
        x_bounds: split(width, cols),
        y_bounds: split(height, rows),
    }
}

fn tile_shape(parts: usize, width: usize, height: usize) -> (usize, usize) {
    let mut best = (parts, 1);
    let mut best_score = f64::INFINITY;
    let mut consider = |cols: usize, rows: usize| {
        let tile_w = width.max(1) as f64 / cols as f64;
        let tile_h = height.max(1) as f64 / rows as f64;
        let score = (tile_w / tile_h).ln().abs();
        if score < best_score {
            best_score = score;
            best = (cols, rows);
        }
    };

    // Divisor pairs, fewer rows first within each pair
    let mut small = 1;
    while small <= parts / small {
        if parts % small == 0 {
            consider(parts / small, small);
            consider(small, parts / small);
        }
        small += 1;
    }

    (best.0.min(width).max(1), best.1.min(height).max(1))
}

fn split(len: usize, pieces: usize) -> Vec<usize> {
    (0..=pieces).map(|i| i * len / pieces).collect()
}

#[allow(clippy::len_without_is_empty)]
impl Tiling {
    /// Number of column slices.
    #[inline]
    pub fn cols(&self) -> usize {
        self.x_bounds.len() - 1
    }

    /// Number of row slices.
    #[inline]
    pub fn rows(&self) -> usize {
        self.y_bounds.len() - 1
    }

    /// Number of regions.
    #[inline]
    pub fn len(&self) -> usize {
        self.cols() * self.rows()
    }

    /// Width of the partitioned grid.
    #[inline]
    pub fn width(&self) -> usize {
        self.x_bounds[self.cols()]
    }

    /// Height of the partitioned grid.
    #[inline]
    pub fn height(&self) -> usize {
        self.y_bounds[self.rows()]
    }

    /// Regions in row-band-major order: region `band * cols + col`.
    pub fn regions(&self) -> Vec<Region> {
        let mut regions = Vec::with_capacity(self.len());
        for band in self.y_bounds.windows(2) {
            for col in self.x_bounds.windows(2) {
                regions.push(Region {
                    x: col[0]..col[1],
                    y: band[0]..band[1],
                });
            }
        }
        regions
    }

    /// Row band containing row `y`.
    #[inline]
    fn band_of(&self, y: usize) -> usize {
        self.y_bounds.partition_point(|&b| b <= y) - 1
    }

    /// Split a row-major buffer into one exclusive view per region.
    ///
    /// `cells.len()` must equal `width * height` of this tiling.
    pub fn split_mut<'a, T>(&self, cells: &'a mut [T]) -> Vec<TileMut<'a, T>> {
        debug_assert_eq!(cells.len(), self.width() * self.height());

        let cols = self.cols();
        let mut tiles: Vec<TileMut<'a, T>> = self
            .regions()
            .into_iter()
            .enumerate()
            .map(|(index, region)| TileMut {
                index,
                rows: Vec::with_capacity(region.height()),
                region,
            })
            .collect();

        let width = self.width();
        if width == 0 {
            return tiles;
        }

        for (y, row) in cells.chunks_mut(width).enumerate() {
            let band = self.band_of(y);
            let mut rest = row;
            for (col, bounds) in self.x_bounds.windows(2).enumerate() {
                let (segment, tail) = std::mem::take(&mut rest).split_at_mut(bounds[1] - bounds[0]);
                tiles[band * cols + col].rows.push(segment);
                rest = tail;
            }
        }

        tiles
    }
}

/// Exclusive mutable view of one region of a row-major buffer.
#[derive(Debug)]
pub struct TileMut<'a, T> {
    /// Position of this region in [`Tiling::regions`].
    pub index: usize,
    /// Coordinates covered by this view.
    pub region: Region,
    /// One slice per row of the region, top to bottom.
    pub rows: Vec<&'a mut [T]>,
}
