use std::ops::Range;

use crate::error::MatrixError;

/// Orientation of a matrix holding a one dimensional signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// A single row, shape (1, N).
    Row,
    /// A single column, shape (N, 1).
    Column,
}

impl Orientation {
    /// Shape of a vector with this orientation and `len` elements.
    pub fn shape(&self, len: usize) -> [usize; 2] {
        match self {
            Orientation::Row => [1, len],
            Orientation::Column => [len, 1],
        }
    }
}

/// Capabilities a dense matrix of `f64` must provide to be filtered.
///
/// The filtering operations only talk to matrices through this trait, so any
/// container that can report its extents, read and write elements and copy
/// rectangular blocks can be plugged in. Only the extents, the element
/// accessors and [`DenseMatrix::zeros`] are required; the remaining methods
/// have default implementations in terms of those, which containers with
/// contiguous storage may override.
///
/// Indices are `(row, col)`; row-major order is used whenever a linear index
/// or a flat buffer is involved, regardless of the container's own layout.
///
/// # Examples
///
/// ```
/// use lumen_matrix::{DenseMatrix, Matrix};
///
/// let mut m = Matrix::zeros(2, 3);
/// m.set(1, 2, 5.0).unwrap();
///
/// assert_eq!(m.shape(), [2, 3]);
/// assert_eq!(m.get(1, 2), Some(5.0));
/// assert_eq!(m.get(2, 0), None);
/// ```
pub trait DenseMatrix: Sized + Send + Sync {
    /// Allocate a matrix of the given shape filled with zeros.
    fn zeros(rows: usize, cols: usize) -> Self;

    /// Number of rows.
    fn rows(&self) -> usize;

    /// Number of columns.
    fn cols(&self) -> usize;

    /// Read the element at `(row, col)`, or `None` when out of bounds.
    fn get(&self, row: usize, col: usize) -> Option<f64>;

    /// Write the element at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfBounds`] when the index is outside the matrix.
    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MatrixError>;

    /// Read the element at `(row, col)` without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must guarantee `row < self.rows()` and `col < self.cols()`.
    unsafe fn get_unchecked(&self, row: usize, col: usize) -> f64;

    /// Write the element at `(row, col)` without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must guarantee `row < self.rows()` and `col < self.cols()`.
    unsafe fn set_unchecked(&mut self, row: usize, col: usize, value: f64);

    /// Shape of the matrix as `[rows, cols]`.
    fn shape(&self) -> [usize; 2] {
        [self.rows(), self.cols()]
    }

    /// Total number of elements.
    fn num_elements(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Build a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidShape`] if `data.len() != rows * cols`.
    fn from_row_major_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        if data.len() != rows * cols {
            return Err(MatrixError::invalid_shape(rows * cols, data.len()));
        }

        let mut matrix = Self::zeros(rows, cols);
        for (offset, &value) in data.iter().enumerate() {
            // SAFETY: offset < rows * cols, so both indices are in bounds.
            unsafe { matrix.set_unchecked(offset / cols, offset % cols, value) };
        }
        Ok(matrix)
    }

    /// Read an element by its row-major linear index.
    fn get_linear(&self, index: usize) -> Option<f64> {
        let cols = self.cols();
        if cols == 0 || index >= self.num_elements() {
            return None;
        }
        self.get(index / cols, index % cols)
    }

    /// Copy the elements into a contiguous row-major buffer.
    fn to_row_major_vec(&self) -> Vec<f64> {
        let (rows, cols) = (self.rows(), self.cols());
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                // SAFETY: r < rows and c < cols.
                data.push(unsafe { self.get_unchecked(r, c) });
            }
        }
        data
    }

    /// Orientation of the matrix when it holds a vector.
    ///
    /// A matrix whose column count equals its element count is a row vector;
    /// otherwise one whose row count equals its element count is a column
    /// vector. The row check comes first, so a 1x1 matrix is a row vector.
    /// Any other shape is not a vector and yields `None`.
    fn orientation(&self) -> Option<Orientation> {
        let len = self.num_elements();
        if self.cols() == len {
            Some(Orientation::Row)
        } else if self.rows() == len {
            Some(Orientation::Column)
        } else {
            None
        }
    }

    /// Copy the block spanning `rows` x `cols` into a new matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::BlockOutOfBounds`] if a range is reversed or
    /// reaches past the matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumen_matrix::{DenseMatrix, Matrix};
    ///
    /// let m = Matrix::from_row_major_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// let col = m.extract(0..2, 1..2).unwrap();
    ///
    /// assert_eq!(col.shape(), [2, 1]);
    /// assert_eq!(col.as_slice(), &[2.0, 5.0]);
    /// ```
    fn extract(&self, rows: Range<usize>, cols: Range<usize>) -> Result<Self, MatrixError> {
        if rows.start > rows.end
            || cols.start > cols.end
            || rows.end > self.rows()
            || cols.end > self.cols()
        {
            return Err(MatrixError::block_out_of_bounds(rows, cols, self.shape()));
        }

        let mut block = Self::zeros(rows.len(), cols.len());
        for (dst_r, src_r) in rows.clone().enumerate() {
            for (dst_c, src_c) in cols.clone().enumerate() {
                // SAFETY: the ranges were validated against both shapes above.
                unsafe {
                    block.set_unchecked(dst_r, dst_c, self.get_unchecked(src_r, src_c));
                }
            }
        }
        Ok(block)
    }

    /// Write `src` into this matrix with its top-left element at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::BlockOutOfBounds`] if `src` does not fit.
    fn insert<S: DenseMatrix>(&mut self, src: &S, row: usize, col: usize) -> Result<(), MatrixError> {
        let row_end = row.saturating_add(src.rows());
        let col_end = col.saturating_add(src.cols());
        if row_end > self.rows() || col_end > self.cols() {
            return Err(MatrixError::block_out_of_bounds(
                row..row_end,
                col..col_end,
                self.shape(),
            ));
        }

        for r in 0..src.rows() {
            for c in 0..src.cols() {
                // SAFETY: the block was checked to fit inside `self`.
                unsafe {
                    self.set_unchecked(row + r, col + c, src.get_unchecked(r, c));
                }
            }
        }
        Ok(())
    }
}
