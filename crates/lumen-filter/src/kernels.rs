use lumen_matrix::Matrix;

use crate::error::FilterError;

/// Create a normalized 1D gaussian kernel.
///
/// Tap `i` is the normal density `exp(-(i - center)^2 / (2 * sigma_sq)) / sqrt(2 * pi * sigma_sq)`
/// with `center = (kernel_size - 1) / 2` in integer arithmetic, so even sized
/// kernels peak at the lower of the two middle taps. The taps are then divided
/// by their sum, which makes them add up to one whatever the truncation.
///
/// # Arguments
///
/// * `kernel_size` - The number of taps.
/// * `sigma_sq` - The variance of the gaussian.
///
/// # Returns
///
/// The kernel as a 1 x `kernel_size` row vector.
///
/// # Errors
///
/// [`FilterError::EmptyKernel`] if `kernel_size` is zero and
/// [`FilterError::InvalidVariance`] if `sigma_sq` is not positive and finite.
///
/// # Examples
///
/// ```
/// use lumen_filter::kernels::gaussian_kernel_1d;
///
/// let k = gaussian_kernel_1d(5, 1.0).unwrap();
/// assert_eq!(k.as_slice().len(), 5);
/// assert!((k.iter().sum::<f64>() - 1.0).abs() < 1e-12);
/// ```
pub fn gaussian_kernel_1d(kernel_size: usize, sigma_sq: f64) -> Result<Matrix, FilterError> {
    if kernel_size == 0 {
        return Err(FilterError::EmptyKernel);
    }
    if !sigma_sq.is_finite() || sigma_sq <= 0.0 {
        return Err(FilterError::InvalidVariance(sigma_sq));
    }

    let center = ((kernel_size - 1) / 2) as f64;
    let scale = (2.0 * std::f64::consts::PI * sigma_sq).sqrt();

    let mut kernel = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - center;
            (-(x * x) / (2.0 * sigma_sq)).exp() / scale
        })
        .collect::<Vec<_>>();

    // normalize the kernel
    let norm = kernel.iter().fold(0.0, |acc, k| acc + k);
    kernel.iter_mut().for_each(|k| *k /= norm);

    Ok(Matrix::row_vector(kernel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lumen_matrix::{DenseMatrix, Orientation};

    #[test]
    fn test_gaussian_kernel_1d() -> Result<(), FilterError> {
        let kernel = gaussian_kernel_1d(5, 0.25)?;
        assert_eq!(kernel.orientation(), Some(Orientation::Row));

        // sigma = 0.5, the same taps as a gaussian built from the standard deviation
        let expected = [
            0.00026386508,
            0.10645077,
            0.78657067,
            0.10645077,
            0.00026386508,
        ];

        for (&k, &e) in kernel.iter().zip(expected.iter()) {
            assert_relative_eq!(k, e, max_relative = 1e-5);
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_sums_to_one() -> Result<(), FilterError> {
        for kernel_size in [1, 2, 3, 4, 7, 15, 64] {
            for sigma_sq in [1e-3, 0.5, 1.0, 4.0, 100.0, 1e6] {
                let kernel = gaussian_kernel_1d(kernel_size, sigma_sq)?;
                let sum = kernel.iter().sum::<f64>();
                assert!(
                    (sum - 1.0).abs() < 1e-9,
                    "size {kernel_size}, variance {sigma_sq}: sum {sum}"
                );
            }
        }
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_even_size_center() -> Result<(), FilterError> {
        // center = (4 - 1) / 2 = 1, so tap 1 is the peak and taps 0 and 2 match
        let kernel = gaussian_kernel_1d(4, 1.0)?;
        let k = kernel.as_slice();
        assert!(k[1] > k[0] && k[1] > k[2] && k[2] > k[3]);
        assert_relative_eq!(k[0], k[2]);
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_single_tap() -> Result<(), FilterError> {
        let kernel = gaussian_kernel_1d(1, 2.0)?;
        assert_eq!(kernel.as_slice(), &[1.0]);
        Ok(())
    }

    #[test]
    fn test_gaussian_kernel_invalid_args() {
        assert_eq!(gaussian_kernel_1d(0, 1.0), Err(FilterError::EmptyKernel));
        assert_eq!(
            gaussian_kernel_1d(3, 0.0),
            Err(FilterError::InvalidVariance(0.0))
        );
        assert_eq!(
            gaussian_kernel_1d(3, -1.0),
            Err(FilterError::InvalidVariance(-1.0))
        );
        assert!(matches!(
            gaussian_kernel_1d(3, f64::NAN),
            Err(FilterError::InvalidVariance(_))
        ));
        assert!(matches!(
            gaussian_kernel_1d(3, f64::INFINITY),
            Err(FilterError::InvalidVariance(_))
        ));
    }
}
