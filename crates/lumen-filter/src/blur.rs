use lumen_matrix::{DenseMatrix, Matrix};

use crate::convolution::convolve_1d;
use crate::error::FilterError;
use crate::kernels;
use crate::parallel::{map_indices, ExecutionStrategy};

/// Blur an image using a gaussian blur filter.
///
/// Uses [`ExecutionStrategy::Auto`]. For explicit control, use
/// [`gaussian_blur_with_strategy`].
///
/// # Arguments
///
/// * `src` - The image with shape (R, C).
/// * `sigma_sq` - The variance of the gaussian.
/// * `kernel_size` - The number of taps of the 1D kernel, odd or even.
///
/// # Returns
///
/// The blurred image with shape (R, C).
///
/// # Errors
///
/// Returns [`FilterError::EmptyKernel`] if `kernel_size` is zero and
/// [`FilterError::InvalidVariance`] if `sigma_sq` is not positive and finite.
///
/// # Examples
///
/// ```
/// use lumen_filter::gaussian_blur;
/// use lumen_matrix::{DenseMatrix, Matrix};
///
/// let image = Matrix::from_shape_val(4, 6, 2.0);
/// let blurred = gaussian_blur(&image, 1.0, 3).unwrap();
///
/// assert_eq!(blurred.shape(), [4, 6]);
/// assert!(blurred.get(0, 0).unwrap() < blurred.get(2, 3).unwrap());
/// ```
pub fn gaussian_blur<M: DenseMatrix>(
    src: &M,
    sigma_sq: f64,
    kernel_size: usize,
) -> Result<M, FilterError> {
    gaussian_blur_with_strategy(src, sigma_sq, kernel_size, ExecutionStrategy::Auto)
}

/// Blur an image using a gaussian blur filter with execution strategy control.
///
/// The kernel from [`kernels::gaussian_kernel_1d`] is applied separably. Each
/// row of `src` is extracted, filtered with [`convolve_1d`] and inserted at the
/// same position of a full size intermediate. Once every row is done, each
/// column of the intermediate is filtered the same way into the output. Both
/// passes zero pad at the borders.
///
/// # Arguments
///
/// * `src` - The image with shape (R, C).
/// * `sigma_sq` - The variance of the gaussian.
/// * `kernel_size` - The number of taps of the 1D kernel.
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, `Auto` or `Fixed`.
pub fn gaussian_blur_with_strategy<M: DenseMatrix>(
    src: &M,
    sigma_sq: f64,
    kernel_size: usize,
    strategy: ExecutionStrategy,
) -> Result<M, FilterError> {
    let kernel = kernels::gaussian_kernel_1d(kernel_size, sigma_sq)?;
    let [rows, cols] = src.shape();

    log::debug!(
        "gaussian_blur: image {}x{}, kernel size {}, variance {}, {:?}",
        rows,
        cols,
        kernel_size,
        sigma_sq,
        strategy
    );

    strategy.run(rows * cols, |parallel| -> Result<M, FilterError> {
        let row_filtered = filter_rows(src, &kernel, parallel)?;
        log::trace!("gaussian_blur: row pass done");
        filter_cols(&row_filtered, &kernel, parallel)
    })?
}

fn filter_rows<M: DenseMatrix>(
    src: &M,
    kernel: &Matrix,
    parallel: bool,
) -> Result<M, FilterError> {
    let [rows, cols] = src.shape();

    let filtered = map_indices(rows, parallel, |r| -> Result<M, FilterError> {
        let row = src.extract(r..r + 1, 0..cols)?;
        convolve_1d(&row, kernel)
    });

    let mut dst = M::zeros(rows, cols);
    for (r, row) in filtered.into_iter().enumerate() {
        dst.insert(&row?, r, 0)?;
    }
    Ok(dst)
}

fn filter_cols<M: DenseMatrix>(
    src: &M,
    kernel: &Matrix,
    parallel: bool,
) -> Result<M, FilterError> {
    let [rows, cols] = src.shape();

    let filtered = map_indices(cols, parallel, |c| -> Result<M, FilterError> {
        let col = src.extract(0..rows, c..c + 1)?;
        convolve_1d(&col, kernel)
    });

    let mut dst = M::zeros(rows, cols);
    for (c, col) in filtered.into_iter().enumerate() {
        dst.insert(&col?, 0, c)?;
    }
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gaussian_blur_impulse() -> Result<(), FilterError> {
        let mut image = Matrix::zeros(5, 5);
        image.set(2, 2, 1.0)?;

        let blurred = gaussian_blur(&image, 1.0, 3)?;
        let k = kernels::gaussian_kernel_1d(3, 1.0)?;
        let k = k.as_slice();

        for r in 0..5 {
            for c in 0..5 {
                let expected = if (1..=3).contains(&r) && (1..=3).contains(&c) {
                    k[r - 1] * k[c - 1]
                } else {
                    0.0
                };
                assert_relative_eq!(blurred.get(r, c).unwrap_or(f64::NAN), expected);
            }
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_rows_then_cols() -> Result<(), FilterError> {
        // with a single row every column pass sees one sample, so the output
        // must be the row pass result scaled by one tap
        let image = Matrix::row_vector(vec![0.0, 0.0, 1.0, 0.0, 0.0]);
        let blurred = gaussian_blur(&image, 0.5, 2)?;

        let k = kernels::gaussian_kernel_1d(2, 0.5)?;
        let k = k.as_slice();
        let row = convolve_1d(&image, &Matrix::row_vector(k.to_vec()))?;

        // even kernel: anchor 0, so a lone sample only meets the last tap
        let scale = k[1];
        for (b, r) in blurred.iter().zip(row.iter()) {
            assert_relative_eq!(*b, r * scale);
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_invalid_args() {
        let image = Matrix::zeros(3, 3);
        assert_eq!(
            gaussian_blur(&image, 1.0, 0),
            Err(FilterError::EmptyKernel)
        );
        assert_eq!(
            gaussian_blur(&image, -2.0, 3),
            Err(FilterError::InvalidVariance(-2.0))
        );
    }

    #[test]
    fn test_gaussian_blur_empty_image() -> Result<(), FilterError> {
        let image = Matrix::zeros(0, 3);
        let blurred = gaussian_blur(&image, 1.0, 3)?;
        assert_eq!(blurred.shape(), [0, 3]);
        Ok(())
    }
}
