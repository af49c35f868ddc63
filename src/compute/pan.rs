//! Panning - shifting grid content by an integer offset.
//!
//! Content that leaves the grid is dropped and newly exposed cells are empty.
//! `pan` works in place one axis at a time; `pan_parallel` computes the
//! shifted grid out of place across a tiling and swaps it in.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;

use super::{CellKind, GridEngine, GridError, TileMut, partition};

/// Upper bound on pool threads for a single parallel rebuild.
pub const MAX_WORKERS: usize = 256;

impl<K: CellKind> GridEngine<K> {
    /// Shift all content by `(dx, dy)` in place.
    ///
    /// Positive offsets move content towards higher indices.
    pub fn pan(&mut self, dx: isize, dy: isize) {
        log::trace!(
            "pan ({}, {}) on {}x{} grid",
            dx,
            dy,
            self.width,
            self.height
        );
        self.shift_columns(dx);
        self.shift_rows(dy);
    }

    fn shift_columns(&mut self, dx: isize) {
        let width = self.width;
        let shift = dx.unsigned_abs();
        if dx == 0 {
            return;
        }
        if shift >= width {
            self.cells.fill(K::EMPTY);
            return;
        }

        for row in self.cells.chunks_exact_mut(width) {
            if dx > 0 {
                row.copy_within(..width - shift, shift);
                row[..shift].fill(K::EMPTY);
            } else {
                row.copy_within(shift.., 0);
                row[width - shift..].fill(K::EMPTY);
            }
        }
    }

    fn shift_rows(&mut self, dy: isize) {
        let (width, height) = (self.width, self.height);
        let shift = dy.unsigned_abs();
        if dy == 0 {
            return;
        }
        if shift >= height {
            self.cells.fill(K::EMPTY);
            return;
        }

        // Whole rows move as one block; the exposed band is cleared after.
        let band = shift * width;
        let len = self.cells.len();
        if dy > 0 {
            self.cells.copy_within(..len - band, band);
            self.cells[..band].fill(K::EMPTY);
        } else {
            self.cells.copy_within(band.., 0);
            self.cells[len - band..].fill(K::EMPTY);
        }
    }

    /// Shift all content by `(dx, dy)` using up to `threads` workers.
    ///
    /// Produces the same grid as [`pan`](Self::pan). Workers read the
    /// current grid and each fill a disjoint region of a fresh buffer, which
    /// replaces storage only once every worker has succeeded.
    pub fn pan_parallel(&mut self, dx: isize, dy: isize, threads: usize) -> Result<(), GridError> {
        log::debug!(
            "pan_parallel ({}, {}) on {}x{} grid with {} threads",
            dx,
            dy,
            self.width,
            self.height,
            threads
        );
        let (width, height) = (self.width, self.height);
        self.rebuild_parallel(threads, |source, tile| {
            pan_tile(source, width, height, dx, dy, K::EMPTY, tile)
        })
    }

    /// Build new storage out of place, one worker per region of
    /// `partition(threads, ..)`. `threads` is capped at [`MAX_WORKERS`].
    ///
    /// `work` reads the current cells and fills its tile of a fresh buffer.
    /// Storage is replaced only if every worker succeeds.
    pub(super) fn rebuild_parallel<F>(&mut self, threads: usize, work: F) -> Result<(), GridError>
    where
        F: Fn(&[K::Value], &mut TileMut<'_, K::Value>) + Sync,
    {
        if threads == 0 {
            return Err(GridError::InvalidArgument(
                "thread count must be at least 1".to_string(),
            ));
        }

        let tiling = partition(threads.min(MAX_WORKERS), self.width, self.height);
        log::debug!(
            "parallel rebuild: {} regions ({}x{})",
            tiling.len(),
            tiling.cols(),
            tiling.rows()
        );
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(tiling.len())
            .build()
            .map_err(|e| GridError::WorkerPool(e.to_string()))?;

        let mut next = vec![K::EMPTY; self.cells.len()];
        let source = &self.cells;
        let tiles = tiling.split_mut(&mut next);
        pool.install(|| fan_out(tiles, |tile| work(source, tile)))?;

        self.cells = next;
        Ok(())
    }
}

/// Fill one destination tile from the unshifted source.
fn pan_tile<T: Copy>(
    source: &[T],
    width: usize,
    height: usize,
    dx: isize,
    dy: isize,
    empty: T,
    tile: &mut TileMut<'_, T>,
) {
    let columns = tile.region.x.clone();
    for (y, row) in tile.region.y.clone().zip(tile.rows.iter_mut()) {
        let sy = source_coord(y, dy, height);
        for (x, cell) in columns.clone().zip(row.iter_mut()) {
            *cell = match (source_coord(x, dx, width), sy) {
                (Some(sx), Some(sy)) => source[sy * width + sx],
                _ => empty,
            };
        }
    }
}

/// Source index that lands on `dest` after shifting by `offset`, if any.
#[inline]
fn source_coord(dest: usize, offset: isize, len: usize) -> Option<usize> {
    let src = (dest as isize).checked_sub(offset)?;
    (src >= 0 && (src as usize) < len).then_some(src as usize)
}

/// Run `work` on every tile in parallel and join them all.
///
/// A panicking worker does not stop its siblings. Once all have finished,
/// the failure with the lowest tile index is returned.
pub(super) fn fan_out<'a, T, F>(tiles: Vec<TileMut<'a, T>>, work: F) -> Result<(), GridError>
where
    T: Send,
    F: Fn(&mut TileMut<'a, T>) + Sync,
{
    let outcomes: Vec<Result<(), GridError>> = tiles
        .into_par_iter()
        .map(|mut tile| {
            let worker = tile.index;
            panic::catch_unwind(AssertUnwindSafe(|| work(&mut tile))).map_err(|payload| {
                GridError::WorkerFailed {
                    worker,
                    message: panic_message(payload.as_ref()),
                }
            })
        })
        .collect();

    match outcomes.into_iter().find_map(Result::err) {
        Some(err) => {
            log::warn!("parallel pan aborted: {}", err);
            Err(err)
        }
        None => Ok(()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{BinaryGrid, TeamGrid};
    use proptest::prelude::*;
    use std::sync::Mutex;

    fn grid_from_rows(rows: &[&str]) -> BinaryGrid {
        let mut grid = BinaryGrid::new(rows[0].len(), rows.len()).unwrap();
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                grid.set(x, y, c == '#').unwrap();
            }
        }
        grid
    }

    fn rows_of(grid: &BinaryGrid) -> Vec<String> {
        grid.cells()
            .chunks(grid.width())
            .map(|row| row.iter().map(|&v| if v { '#' } else { '.' }).collect())
            .collect()
    }

    #[test]
    fn test_single_cell_pan_right() {
        let mut grid = BinaryGrid::new(5, 5).unwrap();
        grid.set(2, 2, true).unwrap();
        grid.pan(1, 0);

        assert!(grid.get(3, 2).unwrap());
        assert!(!grid.get(2, 2).unwrap());
        assert_eq!(grid.live_count(), 1);
    }

    #[test]
    fn test_pan_zero_is_identity() {
        let mut grid = TeamGrid::with_seed(4, 13, 9, 21).unwrap();
        grid.randomize(3).unwrap();
        let before = grid.cells().to_vec();
        grid.pan(0, 0);
        assert_eq!(grid.cells(), &before[..]);
    }

    #[test]
    fn test_pan_each_direction() {
        let start = ["....", ".##.", ".#..", "...."];

        let mut grid = grid_from_rows(&start);
        grid.pan(1, 0);
        assert_eq!(rows_of(&grid), ["....", "..##", "..#.", "...."]);

        let mut grid = grid_from_rows(&start);
        grid.pan(-1, 0);
        assert_eq!(rows_of(&grid), ["....", "##..", "#...", "...."]);

        let mut grid = grid_from_rows(&start);
        grid.pan(0, 1);
        assert_eq!(rows_of(&grid), ["....", "....", ".##.", ".#.."]);

        let mut grid = grid_from_rows(&start);
        grid.pan(0, -1);
        assert_eq!(rows_of(&grid), [".##.", ".#..", "....", "...."]);
    }

    #[test]
    fn test_pan_drops_edge_content() {
        let mut grid = grid_from_rows(&["#..#", "....", "#..#"]);
        grid.pan(2, -1);
        assert_eq!(rows_of(&grid), ["....", "..#.", "...."]);
    }

    #[test]
    fn test_pan_solid_runs_keep_shape() {
        // A full run catches iteration-order regressions: shifting in the
        // wrong direction smears the first value across the row.
        let mut grid = grid_from_rows(&["#.##.#..", "########"]);
        grid.pan(3, 0);
        assert_eq!(rows_of(&grid), ["...#.##.", "...#####"]);
        grid.pan(-3, 0);
        assert_eq!(rows_of(&grid), ["#.##.", "#####"].map(|r| format!("{}...", r)));
    }

    #[test]
    fn test_pan_by_full_dimension_clears() {
        let mut grid = TeamGrid::with_seed(3, 6, 4, 8).unwrap();
        grid.randomize(1).unwrap();
        grid.pan(6, 0);
        assert_eq!(grid.live_count(), 0);

        grid.randomize(1).unwrap();
        grid.pan(0, -40);
        assert_eq!(grid.live_count(), 0);

        grid.randomize(1).unwrap();
        grid.pan(isize::MIN, isize::MAX);
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn test_pan_past_half_axis_clears_exposed_band() {
        let mut grid = grid_from_rows(&["###", "...", "..."]);
        grid.pan(2, 0);
        assert_eq!(rows_of(&grid), ["..#", "...", "..."]);

        let mut grid = grid_from_rows(&["###", "...", "..."]);
        grid.pan(-2, 0);
        assert_eq!(rows_of(&grid), ["#..", "...", "..."]);

        let mut grid = grid_from_rows(&["#", "#", "#"]);
        grid.pan(0, -2);
        assert_eq!(rows_of(&grid), ["#", ".", "."]);

        let mut grid = grid_from_rows(&["#", "#", "#"]);
        grid.pan(0, 2);
        assert_eq!(rows_of(&grid), [".", ".", "#"]);
    }

    #[test]
    fn test_pan_wide_shift_matches_parallel() {
        let mut serial = TeamGrid::with_seed(5, 18, 2, 4).unwrap();
        serial.randomize(1).unwrap();
        let mut parallel = serial.clone();

        serial.pan(10, 0);
        parallel.pan_parallel(10, 0, 1).unwrap();
        assert_eq!(serial.cells(), parallel.cells());
        assert_eq!(serial.live_count(), 8 * 2);
    }

    #[test]
    fn test_pan_parallel_rejects_zero_threads() {
        let mut grid = BinaryGrid::new(4, 4).unwrap();
        grid.set(1, 1, true).unwrap();
        assert!(matches!(
            grid.pan_parallel(1, 1, 0),
            Err(GridError::InvalidArgument(_))
        ));
        assert!(grid.get(1, 1).unwrap());
    }

    #[test]
    fn test_pan_parallel_single_thread() {
        let mut grid = BinaryGrid::new(5, 5).unwrap();
        grid.set(2, 2, true).unwrap();
        grid.pan_parallel(1, 0, 1).unwrap();
        assert!(grid.get(3, 2).unwrap());
        assert_eq!(grid.live_count(), 1);
    }

    #[test]
    fn test_pan_parallel_extreme_offsets() {
        let mut grid = BinaryGrid::with_seed(8, 8, 2).unwrap();
        grid.randomize(1).unwrap();
        grid.pan_parallel(isize::MIN, isize::MAX, 4).unwrap();
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn test_pan_parallel_huge_thread_count() {
        let mut grid = BinaryGrid::new(4, 4).unwrap();
        grid.set(0, 0, true).unwrap();
        grid.pan_parallel(1, 1, usize::MAX).unwrap();
        assert!(grid.get(1, 1).unwrap());
        assert_eq!(grid.live_count(), 1);
    }

    #[test]
    fn test_huge_thread_count_is_capped() {
        let mut grid = BinaryGrid::new(64, 64).unwrap();
        let regions = Mutex::new(0usize);
        grid.rebuild_parallel(usize::MAX, |_, _| {
            *regions.lock().unwrap() += 1;
            assert_eq!(rayon::current_num_threads(), MAX_WORKERS);
        })
        .unwrap();
        assert_eq!(regions.into_inner().unwrap(), MAX_WORKERS);
    }

    #[test]
    fn test_rebuild_runs_one_worker_per_region() {
        let mut grid = BinaryGrid::new(8, 8).unwrap();
        let pool_sizes = Mutex::new(Vec::new());
        grid.rebuild_parallel(2, |_, _| {
            pool_sizes.lock().unwrap().push(rayon::current_num_threads());
        })
        .unwrap();
        assert_eq!(pool_sizes.into_inner().unwrap(), [2, 2]);
    }

    #[test]
    fn test_failed_rebuild_keeps_storage() {
        let mut grid = TeamGrid::with_seed(4, 6, 6, 11).unwrap();
        grid.randomize(2).unwrap();
        let before = grid.cells().to_vec();

        let result = grid.rebuild_parallel(4, |_, tile| {
            for row in tile.rows.iter_mut() {
                row.fill(3);
            }
            if tile.index == 2 {
                panic!("region {} failed", tile.index);
            }
        });

        assert!(matches!(result, Err(GridError::WorkerFailed { worker: 2, .. })));
        assert_eq!(grid.cells(), &before[..]);
    }

    #[test]
    fn test_fan_out_reports_first_failure_after_join() {
        let tiling = partition(4, 4, 4);
        let mut cells = vec![0u8; 16];
        let result = fan_out(tiling.split_mut(&mut cells), |tile| {
            if tile.index == 1 || tile.index == 3 {
                panic!("tile {} exploded", tile.index);
            }
            for row in tile.rows.iter_mut() {
                row.fill(1);
            }
        });

        match result {
            Err(GridError::WorkerFailed { worker, message }) => {
                assert_eq!(worker, 1);
                assert!(message.contains("tile 1 exploded"));
            }
            other => panic!("expected worker failure, got {:?}", other),
        }
        // Healthy siblings still ran to completion
        assert_eq!(cells.iter().filter(|&&c| c == 1).count(), 8);
    }

    proptest! {
        #[test]
        fn prop_parallel_matches_in_place(
            width in 1usize..24,
            height in 1usize..24,
            dx in -30isize..30,
            dy in -30isize..30,
            threads in 1usize..9,
            seed in any::<u64>(),
        ) {
            let mut serial = TeamGrid::with_seed(5, width, height, seed).unwrap();
            serial.randomize(2).unwrap();
            let mut parallel = serial.clone();

            serial.pan(dx, dy);
            parallel.pan_parallel(dx, dy, threads).unwrap();
            prop_assert_eq!(serial.cells(), parallel.cells());
        }

        #[test]
        fn prop_pan_inverse_restores_interior(
            width in 3usize..20,
            height in 3usize..20,
            dx in -5isize..5,
            dy in -5isize..5,
            seed in any::<u64>(),
        ) {
            let mut grid = BinaryGrid::with_seed(width, height, seed).unwrap();
            grid.randomize(2).unwrap();

            // Keep only content that survives the shift in either direction
            let (mx, my) = (dx.unsigned_abs(), dy.unsigned_abs());
            for y in 0..height {
                for x in 0..width {
                    let interior = x >= mx && x + mx < width && y >= my && y + my < height;
                    if !interior {
                        grid.set(x, y, false).unwrap();
                    }
                }
            }
            let before = grid.cells().to_vec();

            grid.pan(dx, dy);
            grid.pan(-dx, -dy);
            prop_assert_eq!(grid.cells(), &before[..]);
        }
    }
}
