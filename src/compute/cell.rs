//! Cell kinds - what a single grid cell can hold.
//!
//! The engine is generic over a [`CellKind`], which supplies the value type,
//! the empty value, write validation and the rule `randomize` uses to pick a
//! live value. [`Binary`] and [`Teams`] are the two kinds in use.

use std::fmt;

use rand::Rng;

use super::GridError;

/// Per-variant cell configuration for [`GridEngine`](super::GridEngine).
pub trait CellKind: Clone + fmt::Debug + Send + Sync {
    /// Value stored in each cell.
    type Value: Copy + PartialEq + fmt::Debug + Send + Sync;

    /// Value of an unoccupied cell.
    const EMPTY: Self::Value;

    /// Check that `value` may be written to a cell.
    fn validate(&self, value: Self::Value) -> Result<(), GridError>;

    /// Draw a live value for `randomize`. Never returns [`Self::EMPTY`].
    fn live_value<R: Rng>(&self, rng: &mut R) -> Self::Value;

    /// Convert a raw byte (seed files, CLI input) into a cell value.
    fn from_raw(&self, raw: u8) -> Result<Self::Value, GridError>;

    /// Whether `value` counts as occupied.
    #[inline]
    fn is_live(value: Self::Value) -> bool {
        value != Self::EMPTY
    }
}

/// Alive/dead cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Binary;

impl CellKind for Binary {
    type Value = bool;

    const EMPTY: bool = false;

    #[inline]
    fn validate(&self, _value: bool) -> Result<(), GridError> {
        Ok(())
    }

    #[inline]
    fn live_value<R: Rng>(&self, _rng: &mut R) -> bool {
        true
    }

    #[inline]
    fn from_raw(&self, raw: u8) -> Result<bool, GridError> {
        Ok(raw != 0)
    }
}

/// Team-id cells. Id 0 is empty; live ids are `1..count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Teams {
    count: u8,
}

impl Teams {
    /// Create a team configuration. `count` includes the empty id 0, so at
    /// least 2 is required.
    pub fn new(count: u8) -> Result<Self, GridError> {
        if count < 2 {
            return Err(GridError::InvalidArgument(format!(
                "team count must be at least 2 (got {})",
                count
            )));
        }
        Ok(Self { count })
    }

    /// Number of team ids, including the empty id 0.
    #[inline]
    pub fn count(&self) -> u8 {
        self.count
    }
}

impl CellKind for Teams {
    type Value = u8;

    const EMPTY: u8 = 0;

    #[inline]
    fn validate(&self, value: u8) -> Result<(), GridError> {
        if value >= self.count {
            return Err(GridError::InvalidArgument(format!(
                "team id {} is outside 0..{}",
                value, self.count
            )));
        }
        Ok(())
    }

    #[inline]
    fn live_value<R: Rng>(&self, rng: &mut R) -> u8 {
        rng.gen_range(1..self.count)
    }

    #[inline]
    fn from_raw(&self, raw: u8) -> Result<u8, GridError> {
        self.validate(raw)?;
        Ok(raw)
    }
}
