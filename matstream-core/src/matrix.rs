//! Owned dense matrix stored in column-major order

extern crate alloc;
use alloc::vec::Vec;

use crate::error::{FormatError, Result};
use crate::layout::ColumnMajor;
use crate::traits::{MatElement, MatrixMut, MatrixRef};

/// Dense `height x width` matrix backed by a column-major `Vec`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DenseMatrix<T: MatElement> {
    height: usize,
    width: usize,
    data: Vec<T>,
}

impl<T: MatElement> DenseMatrix<T> {
    /// Matrix of the given shape filled with zero bits
    pub fn zeros(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            data: alloc::vec![<T as bytemuck::Zeroable>::zeroed(); height * width],
        }
    }

    /// Build a matrix from column-major data
    pub fn from_column_major(height: usize, width: usize, data: Vec<T>) -> Result<Self> {
        let count = ColumnMajor::new(height, width).count()?;
        if data.len() != count {
            return Err(FormatError::ShapeMismatch);
        }
        Ok(Self {
            height,
            width,
            data,
        })
    }

    /// Build a matrix from row slices; every row must have the same length
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.iter().any(|row| row.as_ref().len() != width) {
            return Err(FormatError::ShapeMismatch);
        }

        let mut matrix = Self::zeros(height, width);
        for (row, values) in rows.iter().enumerate() {
            for (col, value) in values.as_ref().iter().enumerate() {
                matrix.set(row, col, *value);
            }
        }
        Ok(matrix)
    }

    /// Elements in storage (column-major) order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the matrix, returning its column-major elements
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    fn layout(&self) -> ColumnMajor {
        ColumnMajor::new(self.height, self.width)
    }
}

impl<T: MatElement> MatrixRef for DenseMatrix<T> {
    type Element = T;

    fn height(&self) -> usize {
        self.height
    }

    fn width(&self) -> usize {
        self.width
    }

    fn get(&self, row: usize, col: usize) -> T {
        self[(row, col)]
    }
}

impl<T: MatElement> MatrixMut for DenseMatrix<T> {
    fn with_shape(height: usize, width: usize) -> Self {
        Self::zeros(height, width)
    }

    fn set(&mut self, row: usize, col: usize, value: T) {
        self[(row, col)] = value;
    }
}

impl<T: MatElement> core::ops::Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(row < self.height && col < self.width, "matrix index out of bounds");
        &self.data[self.layout().flatten(row, col)]
    }
}

impl<T: MatElement> core::ops::IndexMut<(usize, usize)> for DenseMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(row < self.height && col < self.width, "matrix index out of bounds");
        let index = self.layout().flatten(row, col);
        &mut self.data[index]
    }
}
