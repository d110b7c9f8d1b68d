#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! All operations are generic over [`lumen_matrix::DenseMatrix`], allocate a
//! new output and never modify their inputs. Samples outside the input read
//! as zero, kernels are flipped (true convolution) and anchored at
//! `(len - 1) / 2` along each axis.
//!
//! ```rust
//! use lumen_filter::{convolve_1d, convolve_2d, gaussian_blur};
//! use lumen_matrix::{DenseMatrix, Matrix};
//!
//! let image = Matrix::from_shape_fn(8, 8, |r, c| (r * 8 + c) as f64);
//!
//! let sharpened = convolve_2d(
//!     &image,
//!     &Matrix::new(3, 3, vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0]).unwrap(),
//! )
//! .unwrap();
//! let blurred = gaussian_blur(&image, 2.0, 5).unwrap();
//! let profile = convolve_1d(&image.extract(3..4, 0..8).unwrap(), &Matrix::row_vector(vec![0.5, 0.5])).unwrap();
//!
//! assert_eq!(sharpened.shape(), [8, 8]);
//! assert_eq!(blurred.shape(), [8, 8]);
//! assert_eq!(profile.shape(), [1, 8]);
//! ```

/// Filter kernels.
pub mod kernels;

/// Execution strategies for the filters.
pub mod parallel;

mod blur;
pub use blur::*;

mod convolution;
pub use convolution::*;

mod error;
pub use error::FilterError;

pub use parallel::ExecutionStrategy;
