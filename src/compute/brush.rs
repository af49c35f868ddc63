//! Rectangular brush writes for draw/erase.

use super::{CellKind, GridEngine, GridError};

/// Rectangular brush, centred on a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    width: usize,
    height: usize,
}

impl Brush {
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidArgument(format!(
                "brush must be at least 1x1 (got {}x{})",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Top-left cell of the brush when centred on `(cx, cy)`.
    ///
    /// Even sizes lean towards lower indices.
    #[inline]
    pub fn origin(&self, cx: isize, cy: isize) -> (isize, isize) {
        (
            cx.saturating_sub((self.width / 2) as isize),
            cy.saturating_sub((self.height / 2) as isize),
        )
    }
}

/// Clip `start..start + len` to `0..limit`.
fn clip(start: isize, len: usize, limit: usize) -> std::ops::Range<usize> {
    let end = start.saturating_add(len as isize);
    let lo = start.clamp(0, limit as isize) as usize;
    let hi = end.clamp(0, limit as isize) as usize;
    lo..hi.max(lo)
}

impl<K: CellKind> GridEngine<K> {
    /// Write `value` under a brush centred on `(cx, cy)`.
    ///
    /// Cells outside the grid are skipped. Returns how many cells were written.
    pub fn paint(
        &mut self,
        brush: &Brush,
        cx: isize,
        cy: isize,
        value: K::Value,
    ) -> Result<usize, GridError> {
        self.kind.validate(value)?;

        let (ox, oy) = brush.origin(cx, cy);
        let xs = clip(ox, brush.width, self.width);
        let ys = clip(oy, brush.height, self.height);

        for y in ys.clone() {
            let row = y * self.width;
            self.cells[row + xs.start..row + xs.end].fill(value);
        }
        Ok(xs.len() * ys.len())
    }

    /// Clear every cell under a brush centred on `(cx, cy)`.
    pub fn erase(&mut self, brush: &Brush, cx: isize, cy: isize) -> usize {
        let (ox, oy) = brush.origin(cx, cy);
        let xs = clip(ox, brush.width, self.width);
        let ys = clip(oy, brush.height, self.height);

        for y in ys.clone() {
            let row = y * self.width;
            self.cells[row + xs.start..row + xs.end].fill(K::EMPTY);
        }
        xs.len() * ys.len()
    }
}
