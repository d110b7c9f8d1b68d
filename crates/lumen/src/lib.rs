#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use lumen_matrix as matrix;

#[doc(inline)]
pub use lumen_filter as filter;
