#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `lumen-matrix` defines [`DenseMatrix`], the small set of capabilities the
//! filtering crate needs from a two dimensional array of `f64`: extents,
//! checked and unchecked element access, and rectangular block copies. Any
//! container implementing it can be filtered.
//!
//! [`Matrix`] is the bundled row-major implementation. With the `faer` feature
//! enabled, `faer::Mat<f64>` implements the trait as well; the `serde` feature
//! adds serialization for [`Matrix`].
//!
//! # Quick Start
//!
//! ```rust
//! use lumen_matrix::{DenseMatrix, Matrix, Orientation};
//!
//! let m = Matrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! let row = m.extract(1..2, 0..3).unwrap();
//!
//! assert_eq!(row.as_slice(), &[4.0, 5.0, 6.0]);
//! assert_eq!(row.orientation(), Some(Orientation::Row));
//! assert_eq!(m.orientation(), None);
//! ```

/// The dense matrix capability trait.
pub mod dense;

/// Error types for the matrix module.
pub mod error;

/// Row-major matrix container.
pub mod matrix;

#[cfg(feature = "faer")]
mod faer;

#[cfg(feature = "serde")]
mod serde;

pub use crate::dense::{DenseMatrix, Orientation};
pub use crate::error::MatrixError;
pub use crate::matrix::Matrix;
