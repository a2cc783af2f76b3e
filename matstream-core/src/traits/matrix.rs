//! Dense matrix abstraction traits
//!
//! The format only needs a shape and element access by `(row, column)`;
//! any container providing these can be stored or loaded.

use super::element::MatElement;

/// Read access to a dense matrix
pub trait MatrixRef {
    /// The element type stored in this matrix
    type Element: MatElement;

    /// Number of rows
    fn height(&self) -> usize;

    /// Number of columns
    fn width(&self) -> usize;

    /// Get the element at `(row, col)`
    ///
    /// Callers stay within `height() x width()`; implementations may panic
    /// otherwise.
    fn get(&self, row: usize, col: usize) -> Self::Element;

    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    /// Number of stored elements
    fn len(&self) -> usize {
        self.height() * self.width()
    }

    /// Whether the matrix has no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write access to a dense matrix that can be allocated for a given shape
pub trait MatrixMut: MatrixRef + Sized {
    /// Allocate a matrix of the given shape with unspecified contents
    fn with_shape(height: usize, width: usize) -> Self;

    /// Store `value` at `(row, col)`
    fn set(&mut self, row: usize, col: usize, value: Self::Element);
}
