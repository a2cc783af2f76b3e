//! Column-major body layout arithmetic
//!
//! Bodies are stored column by column: element `(r, c)` of a matrix with
//! `height` rows sits at flat index `r + c * height`. These are pure
//! functions with no I/O.

use crate::error::{FormatError, Result};

/// Column-major arrangement of a `height x width` matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMajor {
    height: usize,
    width: usize,
}

impl ColumnMajor {
    /// Create the arrangement for the given shape
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Number of rows
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of elements, with overflow protection
    pub const fn count(&self) -> Result<usize> {
        match self.height.checked_mul(self.width) {
            Some(count) => Ok(count),
            None => Err(FormatError::DimensionOverflow),
        }
    }

    /// Flat index of `(row, col)`
    pub const fn flatten(&self, row: usize, col: usize) -> usize {
        row + col * self.height
    }

    /// Iterate `(row, col)` pairs in storage order
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        let height = self.height;
        (0..self.width).flat_map(move |col| (0..height).map(move |row| (row, col)))
    }
}

/// Byte offset of `(row, col)` inside a body that starts at `start`
pub fn element_offset(
    start: u64,
    arrangement: &ColumnMajor,
    row: usize,
    col: usize,
    element_size: usize,
) -> Result<u64> {
    let index = arrangement.flatten(row, col) as u64;
    index
        .checked_mul(element_size as u64)
        .and_then(|relative| start.checked_add(relative))
        .ok_or(FormatError::DimensionOverflow)
}

/// Offset one past the end of a body that starts at `start`
pub fn body_end(start: u64, arrangement: &ColumnMajor, element_size: usize) -> Result<u64> {
    let count = arrangement.count()? as u64;
    count
        .checked_mul(element_size as u64)
        .and_then(|size| start.checked_add(size))
        .ok_or(FormatError::DimensionOverflow)
}
