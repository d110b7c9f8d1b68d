use std::ops::Range;

use crate::dense::DenseMatrix;
use crate::error::MatrixError;

/// A dense matrix of `f64` stored contiguously in row-major order.
///
/// This is the reference implementation of [`DenseMatrix`]. Besides the trait
/// it gives direct access to the underlying buffer, which the filters do not
/// rely on but callers often want.
///
/// # Examples
///
/// ```
/// use lumen_matrix::{DenseMatrix, Matrix};
///
/// let m = Matrix::from_shape_fn(2, 2, |r, c| (r * 2 + c) as f64);
///
/// assert_eq!(m.as_slice(), &[0.0, 1.0, 2.0, 3.0]);
/// assert_eq!(m.get(1, 0), Some(2.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a new matrix from row-major data.
    ///
    /// # Errors
    ///
    /// If the length of the data does not match `rows * cols`, an error is returned.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        if data.len() != rows * cols {
            return Err(MatrixError::invalid_shape(rows * cols, data.len()));
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a matrix with every element set to `val`.
    pub fn from_shape_val(rows: usize, cols: usize, val: f64) -> Self {
        Self {
            data: vec![val; rows * cols],
            rows,
            cols,
        }
    }

    /// Create a matrix by evaluating `f(row, col)` for every element.
    pub fn from_shape_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { data, rows, cols }
    }

    /// Create a 1xN row vector.
    pub fn row_vector(data: Vec<f64>) -> Self {
        let cols = data.len();
        Self {
            data,
            rows: 1,
            cols,
        }
    }

    /// Create an Nx1 column vector.
    pub fn column_vector(data: Vec<f64>) -> Self {
        let rows = data.len();
        Self {
            data,
            rows,
            cols: 1,
        }
    }

    /// The underlying row-major buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// The underlying row-major buffer, mutable.
    pub fn as_slice_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume the matrix and return its row-major buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Iterate over the elements in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.data.iter()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

impl DenseMatrix for Matrix {
    fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_shape_val(rows, cols, 0.0)
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(self.offset(row, col)).copied()
    }

    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MatrixError> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::index_out_of_bounds(row, col, self.shape()));
        }
        let offset = self.offset(row, col);
        self.data[offset] = value;
        Ok(())
    }

    unsafe fn get_unchecked(&self, row: usize, col: usize) -> f64 {
        *self.data.get_unchecked(self.offset(row, col))
    }

    unsafe fn set_unchecked(&mut self, row: usize, col: usize, value: f64) {
        let offset = self.offset(row, col);
        *self.data.get_unchecked_mut(offset) = value;
    }

    fn from_row_major_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        Self::new(rows, cols, data)
    }

    fn get_linear(&self, index: usize) -> Option<f64> {
        self.data.get(index).copied()
    }

    fn to_row_major_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    fn extract(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Self, MatrixError> {
        if rows.start > rows.end
            || cols.start > cols.end
            || rows.end > self.rows
            || cols.end > self.cols
        {
            return Err(MatrixError::block_out_of_bounds(rows, cols, self.shape()));
        }

        let mut data = Vec::with_capacity(rows.len() * cols.len());
        for r in rows.clone() {
            let start = self.offset(r, cols.start);
            data.extend_from_slice(&self.data[start..start + cols.len()]);
        }

        Ok(Self {
            data,
            rows: rows.len(),
            cols: cols.len(),
        })
    }
}
