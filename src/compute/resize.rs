//! Offset-preserving resize.

use std::ops::Range;

use super::{CellKind, GridEngine, GridError, grid::checked_area};

/// Source indices `i` in `0..src_len` with `i + offset` in `0..dst_len`,
/// paired with the destination index of the first one.
fn overlap(src_len: usize, dst_len: usize, offset: isize) -> Option<(Range<usize>, usize)> {
    let shift = offset.unsigned_abs();
    let (lo, hi, dst_start) = if offset >= 0 {
        (0, src_len.min(dst_len.saturating_sub(shift)), shift)
    } else {
        (shift, src_len.min(dst_len.saturating_add(shift)), 0)
    };
    (lo < hi).then_some((lo..hi, dst_start))
}

impl<K: CellKind> GridEngine<K> {
    /// Resize to `width x height`, carrying old content over shifted by
    /// `(x_offset, y_offset)`. Cells landing outside the new bounds are
    /// dropped; the rest of the new grid is empty.
    pub fn resize_with_offset(
        &mut self,
        width: usize,
        height: usize,
        x_offset: isize,
        y_offset: isize,
    ) -> Result<(), GridError> {
        let area = checked_area(width, height)?;
        log::debug!(
            "resize {}x{} -> {}x{} with offset ({}, {})",
            self.width,
            self.height,
            width,
            height,
            x_offset,
            y_offset
        );

        let old_width = self.width;
        let old_height = self.height;
        let old = std::mem::replace(&mut self.cells, vec![K::EMPTY; area]);
        self.width = width;
        self.height = height;

        let (Some((xs, dst_x)), Some((ys, dst_y))) = (
            overlap(old_width, width, x_offset),
            overlap(old_height, height, y_offset),
        ) else {
            return Ok(());
        };

        for (i, y) in ys.enumerate() {
            let src = y * old_width;
            let dst = (dst_y + i) * width + dst_x;
            self.cells[dst..dst + xs.len()].copy_from_slice(&old[src + xs.start..src + xs.end]);
        }
        Ok(())
    }
}
