use lumen_matrix::MatrixError;
use thiserror::Error;

use crate::parallel::ParallelError;

/// An error type for the filtering operations.
#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    /// The input of a 1D convolution is neither a single row nor a single column.
    #[error("Expected a row or column vector, got a matrix of shape {rows}x{cols}")]
    NotAVector {
        /// Number of rows of the offending input
        rows: usize,
        /// Number of columns of the offending input
        cols: usize,
    },

    /// The kernel has no taps.
    #[error("Kernel must have at least one element")]
    EmptyKernel,

    /// The Gaussian variance is not a strictly positive finite number.
    #[error("Gaussian variance must be positive and finite, got {0}")]
    InvalidVariance(f64),

    /// Error raised by the underlying matrix.
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    /// Error raised while setting up parallel execution.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
