use thiserror::Error;

/// An error type for dense matrix operations.
#[derive(Error, Debug, PartialEq)]
pub enum MatrixError {
    /// Matrix shape does not match the provided data.
    ///
    /// Raised when building a matrix from a buffer whose length is not
    /// `rows * cols`.
    #[error("Shape mismatch: expected {expected} elements for shape, but got {actual} elements in data")]
    InvalidShape {
        /// Expected number of elements based on shape
        expected: usize,
        /// Actual number of elements in the data
        actual: usize,
    },

    /// Element index exceeds the matrix bounds.
    #[error("Index ({row}, {col}) out of bounds for matrix of shape {rows}x{cols}")]
    IndexOutOfBounds {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Number of rows of the matrix
        rows: usize,
        /// Number of columns of the matrix
        cols: usize,
    },

    /// A rectangular block does not fit inside the matrix.
    ///
    /// Raised by [`crate::DenseMatrix::extract`] and [`crate::DenseMatrix::insert`]
    /// when the requested block is reversed or reaches past the last row or column.
    #[error("Block rows {row_start}..{row_end}, cols {col_start}..{col_end} out of bounds for matrix of shape {rows}x{cols}")]
    BlockOutOfBounds {
        /// First row of the block
        row_start: usize,
        /// One past the last row of the block
        row_end: usize,
        /// First column of the block
        col_start: usize,
        /// One past the last column of the block
        col_end: usize,
        /// Number of rows of the matrix
        rows: usize,
        /// Number of columns of the matrix
        cols: usize,
    },
}

impl MatrixError {
    /// Creates an InvalidShape error with clear context.
    pub fn invalid_shape(expected: usize, actual: usize) -> Self {
        Self::InvalidShape { expected, actual }
    }

    /// Creates an IndexOutOfBounds error for the given index and shape.
    pub fn index_out_of_bounds(row: usize, col: usize, shape: [usize; 2]) -> Self {
        Self::IndexOutOfBounds {
            row,
            col,
            rows: shape[0],
            cols: shape[1],
        }
    }

    /// Creates a BlockOutOfBounds error for the given ranges and shape.
    pub fn block_out_of_bounds(
        rows: std::ops::Range<usize>,
        cols: std::ops::Range<usize>,
        shape: [usize; 2],
    ) -> Self {
        Self::BlockOutOfBounds {
            row_start: rows.start,
            row_end: rows.end,
            col_start: cols.start,
            col_end: cols.end,
            rows: shape[0],
            cols: shape[1],
        }
    }
}
