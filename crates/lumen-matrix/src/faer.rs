use faer::Mat;

use crate::dense::DenseMatrix;
use crate::error::MatrixError;

/// `faer` matrices can be filtered directly, without copying into [`crate::Matrix`].
///
/// faer stores columns contiguously; the trait's row-major helpers are served
/// by the default implementations, which go through the element accessors.
impl DenseMatrix for Mat<f64> {
    fn zeros(rows: usize, cols: usize) -> Self {
        Mat::zeros(rows, cols)
    }

    fn rows(&self) -> usize {
        self.nrows()
    }

    fn cols(&self) -> usize {
        self.ncols()
    }

    fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.nrows() || col >= self.ncols() {
            return None;
        }
        Some(self.read(row, col))
    }

    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MatrixError> {
        if row >= self.nrows() || col >= self.ncols() {
            return Err(MatrixError::index_out_of_bounds(
                row,
                col,
                [self.nrows(), self.ncols()],
            ));
        }
        self.write(row, col, value);
        Ok(())
    }

    unsafe fn get_unchecked(&self, row: usize, col: usize) -> f64 {
        self.read_unchecked(row, col)
    }

    unsafe fn set_unchecked(&mut self, row: usize, col: usize, value: f64) {
        self.write_unchecked(row, col, value)
    }

    fn from_row_major_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        if data.len() != rows * cols {
            return Err(MatrixError::invalid_shape(rows * cols, data.len()));
        }
        Ok(Mat::from_fn(rows, cols, |r, c| data[r * cols + c]))
    }
}
