use lumen_matrix::DenseMatrix;

use crate::error::FilterError;
use crate::parallel::{for_each_chunk, ExecutionStrategy};

/// A 2D kernel flipped on both axes, with its anchor.
///
/// Caches the taps in the order the sliding window visits them so the inner
/// loop of the convolution is a plain correlation.
struct FlippedKernel {
    taps: Vec<f64>,
    rows: usize,
    cols: usize,
    anchor_row: usize,
    anchor_col: usize,
}

impl FlippedKernel {
    fn new<K: DenseMatrix>(kernel: &K) -> Result<Self, FilterError> {
        let [rows, cols] = kernel.shape();
        if rows == 0 || cols == 0 {
            return Err(FilterError::EmptyKernel);
        }

        // reversing the row-major taps flips both axes at once:
        // taps[ki * cols + kj] == kernel[rows - 1 - ki, cols - 1 - kj]
        let mut taps = kernel.to_row_major_vec();
        taps.reverse();

        Ok(Self {
            taps,
            rows,
            cols,
            anchor_row: (rows - 1) / 2,
            anchor_col: (cols - 1) / 2,
        })
    }

    /// Convolve output row `row` of `image` into `dst`.
    fn apply_row<M: DenseMatrix>(&self, image: &M, row: usize, dst: &mut [f64]) {
        let [img_rows, img_cols] = image.shape();
        let (img_rows, img_cols) = (img_rows as isize, img_cols as isize);

        for (col, out) in dst.iter_mut().enumerate() {
            let mut sum = 0.0;
            for ki in 0..self.rows {
                let y = row as isize + ki as isize - self.anchor_row as isize;
                let row_inside = y >= 0 && y < img_rows;
                let kernel_row = &self.taps[ki * self.cols..(ki + 1) * self.cols];

                for (kj, &k) in kernel_row.iter().enumerate() {
                    if k == 0.0 {
                        continue;
                    }
                    let x = col as isize + kj as isize - self.anchor_col as isize;
                    let sample = if row_inside && x >= 0 && x < img_cols {
                        // SAFETY: 0 <= y < rows and 0 <= x < cols were just checked.
                        unsafe { image.get_unchecked(y as usize, x as usize) }
                    } else {
                        0.0
                    };
                    sum += sample * k;
                }
            }
            *out = sum;
        }
    }
}

/// Convolve an image with a 2D kernel.
///
/// Uses [`ExecutionStrategy::Auto`]. For explicit control, use
/// [`convolve_2d_with_strategy`].
///
/// The output has the shape of `image`. The kernel is anchored at
/// `((rows - 1) / 2, (cols - 1) / 2)`, rounding down, so kernels with an even
/// extent are anchored on the lower of the two middle taps. The kernel is
/// flipped on both axes (a true convolution, not a correlation) and samples
/// falling outside the image read as zero. Taps equal to zero are skipped.
///
/// # Arguments
///
/// * `image` - The image with shape (R, C).
/// * `kernel` - The kernel with shape (Kr, Kc).
///
/// # Errors
///
/// Returns [`FilterError::EmptyKernel`] if the kernel has no elements.
///
/// # Examples
///
/// ```
/// use lumen_filter::convolve_2d;
/// use lumen_matrix::Matrix;
///
/// let image = Matrix::from_shape_val(3, 3, 1.0);
/// let kernel = Matrix::from_shape_val(3, 3, 1.0);
///
/// let out = convolve_2d(&image, &kernel).unwrap();
///
/// #[rustfmt::skip]
/// assert_eq!(out.as_slice(), &[
///     4.0, 6.0, 4.0,
///     6.0, 9.0, 6.0,
///     4.0, 6.0, 4.0,
/// ]);
/// ```
pub fn convolve_2d<M, K>(image: &M, kernel: &K) -> Result<M, FilterError>
where
    M: DenseMatrix,
    K: DenseMatrix,
{
    convolve_2d_with_strategy(image, kernel, ExecutionStrategy::Auto)
}

/// Convolve an image with a 2D kernel with execution strategy control.
///
/// Same semantics as [`convolve_2d`]; output rows are distributed according
/// to `strategy`.
///
/// # Arguments
///
/// * `image` - The image with shape (R, C).
/// * `kernel` - The kernel with shape (Kr, Kc).
/// * `strategy` - Execution strategy: `Serial`, `Parallel`, `Auto` or `Fixed`.
pub fn convolve_2d_with_strategy<M, K>(
    image: &M,
    kernel: &K,
    strategy: ExecutionStrategy,
) -> Result<M, FilterError>
where
    M: DenseMatrix,
    K: DenseMatrix,
{
    let kernel = FlippedKernel::new(kernel)?;
    let [rows, cols] = image.shape();

    log::debug!(
        "convolve_2d: image {}x{}, kernel {}x{}, {:?}",
        rows,
        cols,
        kernel.rows,
        kernel.cols,
        strategy
    );

    if rows == 0 || cols == 0 {
        return Ok(M::zeros(rows, cols));
    }

    let data = strategy.run(rows * cols, |parallel| {
        let mut data = vec![0.0; rows * cols];
        for_each_chunk(&mut data, cols, parallel, |row, dst| {
            kernel.apply_row(image, row, dst)
        });
        data
    })?;

    Ok(M::from_row_major_vec(rows, cols, data)?)
}

/// Convolve a row or column vector with a 1D filter.
///
/// Computes the "same" part of the full convolution: the output has as many
/// elements as `input` and keeps its orientation, a 1xN input gives a 1xN
/// output and an Nx1 input an Nx1 output. The input is zero padded with
/// `M / 2` samples on both sides and the filter, anchored at `(M - 1) / 2`,
/// is flipped before the weighted sums.
///
/// The filter taps are read in row-major order, so its own orientation does
/// not matter.
///
/// # Arguments
///
/// * `input` - The signal, a row or column vector with N elements.
/// * `filter` - The filter with M elements.
///
/// # Errors
///
/// Returns [`FilterError::NotAVector`] if `input` is neither a single row nor
/// a single column, and [`FilterError::EmptyKernel`] if `filter` is empty.
///
/// # Examples
///
/// ```
/// use lumen_filter::convolve_1d;
/// use lumen_matrix::{DenseMatrix, Matrix};
///
/// let signal = Matrix::column_vector(vec![1.0, 0.0, 0.0]);
/// let filter = Matrix::row_vector(vec![1.0, 2.0, 3.0]);
///
/// let out = convolve_1d(&signal, &filter).unwrap();
///
/// assert_eq!(out.shape(), [3, 1]);
/// assert_eq!(out.as_slice(), &[2.0, 3.0, 0.0]);
/// ```
pub fn convolve_1d<M, K>(input: &M, filter: &K) -> Result<M, FilterError>
where
    M: DenseMatrix,
    K: DenseMatrix,
{
    let orientation = input.orientation().ok_or(FilterError::NotAVector {
        rows: input.rows(),
        cols: input.cols(),
    })?;

    let filter_size = filter.num_elements();
    if filter_size == 0 {
        return Err(FilterError::EmptyKernel);
    }

    let len = input.num_elements();
    let pad = filter_size / 2;
    let center = (filter_size - 1) / 2;

    log::trace!(
        "convolve_1d: {} samples ({:?}), {} taps",
        len,
        orientation,
        filter_size
    );

    // taps[j] == filter[filter_size - 1 - j]
    let mut taps = filter.to_row_major_vec();
    taps.reverse();

    let mut padded = vec![0.0; len + 2 * pad];
    padded[pad..pad + len].copy_from_slice(&input.to_row_major_vec());

    // the window of output i starts at padded index i + pad - center; pad >= center
    let output = padded
        .windows(filter_size)
        .skip(pad - center)
        .take(len)
        .map(|window| {
            window
                .iter()
                .zip(taps.iter())
                .fold(0.0, |acc, (&sample, &k)| acc + sample * k)
        })
        .collect::<Vec<_>>();

    let [rows, cols] = orientation.shape(len);
    Ok(M::from_row_major_vec(rows, cols, output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_matrix::{Matrix, Orientation};

    #[test]
    fn test_convolve_2d_ones() -> Result<(), FilterError> {
        let image = Matrix::from_shape_val(3, 3, 1.0);
        let kernel = Matrix::from_shape_val(3, 3, 1.0);
        let out = convolve_2d(&image, &kernel)?;

        #[rustfmt::skip]
        assert_eq!(
            out.as_slice(),
            &[
                4.0, 6.0, 4.0,
                6.0, 9.0, 6.0,
                4.0, 6.0, 4.0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_convolve_2d_flips_kernel() -> Result<(), FilterError> {
        // an impulse reproduces the kernel itself around the anchor, which is
        // only true for a convolution; a correlation would mirror it
        #[rustfmt::skip]
        let image = Matrix::new(3, 3, vec![
            0.0, 0.0, 0.0,
            0.0, 1.0, 0.0,
            0.0, 0.0, 0.0,
        ])?;
        #[rustfmt::skip]
        let kernel = Matrix::new(3, 3, vec![
            1.0, 2.0, 3.0,
            4.0, 5.0, 6.0,
            7.0, 8.0, 9.0,
        ])?;

        let out = convolve_2d(&image, &kernel)?;
        assert_eq!(out.as_slice(), kernel.as_slice());
        Ok(())
    }

    #[test]
    fn test_convolve_2d_even_kernel_anchor() -> Result<(), FilterError> {
        // 2x2 kernel anchored at (0, 0): out[i, j] = sum over di, dj in {0, 1}
        // of image[i + di, j + dj] * kernel[1 - di, 1 - dj]
        #[rustfmt::skip]
        let image = Matrix::new(2, 3, vec![
            1.0, 2.0, 3.0,
            4.0, 5.0, 6.0,
        ])?;
        let kernel = Matrix::new(2, 2, vec![1.0, 10.0, 100.0, 1000.0])?;

        let out = convolve_2d(&image, &kernel)?;

        #[rustfmt::skip]
        assert_eq!(
            out.as_slice(),
            &[
                1000.0 + 200.0 + 40.0 + 5.0, 2000.0 + 300.0 + 50.0 + 6.0, 3000.0 + 60.0,
                4000.0 + 500.0,              5000.0 + 600.0,              6000.0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_convolve_2d_kernel_larger_than_image() -> Result<(), FilterError> {
        let image = Matrix::new(1, 2, vec![1.0, 2.0])?;
        let kernel = Matrix::from_shape_val(5, 5, 1.0);
        let out = convolve_2d(&image, &kernel)?;
        assert_eq!(out.as_slice(), &[3.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_convolve_2d_empty_kernel() {
        let image = Matrix::from_shape_val(3, 3, 1.0);
        let kernel = Matrix::zeros(0, 3);
        assert_eq!(convolve_2d(&image, &kernel), Err(FilterError::EmptyKernel));
    }

    #[test]
    fn test_convolve_2d_empty_image() -> Result<(), FilterError> {
        let image = Matrix::zeros(0, 4);
        let kernel = Matrix::from_shape_val(3, 3, 1.0);
        let out = convolve_2d(&image, &kernel)?;
        assert_eq!(out.shape(), [0, 4]);
        Ok(())
    }

    #[test]
    fn test_convolve_2d_fixed_zero_threads() {
        let image = Matrix::from_shape_val(3, 3, 1.0);
        let kernel = Matrix::from_shape_val(1, 1, 1.0);
        let res = convolve_2d_with_strategy(&image, &kernel, ExecutionStrategy::Fixed(0));
        assert!(matches!(res, Err(FilterError::Parallel(_))));
    }

    #[test]
    fn test_convolve_1d_flip() -> Result<(), FilterError> {
        // out[i] = sum_j padded[i + j] * filter[2 - j], padded = [0, 1, 0, 0, 0]
        let signal = Matrix::row_vector(vec![1.0, 0.0, 0.0]);
        let filter = Matrix::row_vector(vec![1.0, 2.0, 3.0]);

        let out = convolve_1d(&signal, &filter)?;
        assert_eq!(out.shape(), [1, 3]);
        assert_eq!(out.as_slice(), &[2.0, 3.0, 0.0]);

        let signal = Matrix::row_vector(vec![0.0, 1.0, 0.0]);
        let out = convolve_1d(&signal, &filter)?;
        assert_eq!(out.as_slice(), &[1.0, 2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_convolve_1d_even_filter() -> Result<(), FilterError> {
        // M = 4: pad 2, center 1
        let signal = Matrix::row_vector(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        let filter = Matrix::row_vector(vec![1.0, 0.0, 0.0, 0.0]);

        // only tap 0 is non zero, it multiplies padded[i + 2 + 3 - 1], i.e. input[i + 2]
        let out = convolve_1d(&signal, &filter)?;
        assert_eq!(out.as_slice(), &[3.0, 4.0, 5.0, 0.0, 0.0]);

        let filter = Matrix::row_vector(vec![0.0, 0.0, 0.0, 1.0]);
        let out = convolve_1d(&signal, &filter)?;
        assert_eq!(out.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
        Ok(())
    }

    #[test]
    fn test_convolve_1d_keeps_orientation() -> Result<(), FilterError> {
        let filter = Matrix::column_vector(vec![0.25, 0.5, 0.25]);

        let row = Matrix::row_vector(vec![4.0, 8.0, 4.0, 0.0]);
        let out = convolve_1d(&row, &filter)?;
        assert_eq!(out.orientation(), Some(Orientation::Row));
        assert_eq!(out.shape(), [1, 4]);

        let col = Matrix::column_vector(vec![4.0, 8.0, 4.0, 0.0]);
        let out_col = convolve_1d(&col, &filter)?;
        assert_eq!(out_col.shape(), [4, 1]);
        assert_eq!(out_col.as_slice(), out.as_slice());
        assert_eq!(out.as_slice(), &[4.0, 6.0, 4.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_convolve_1d_single_sample() -> Result<(), FilterError> {
        let signal = Matrix::row_vector(vec![2.0]);
        let filter = Matrix::row_vector(vec![1.0, 3.0, 5.0]);
        let out = convolve_1d(&signal, &filter)?;
        assert_eq!(out.shape(), [1, 1]);
        assert_eq!(out.as_slice(), &[6.0]);
        Ok(())
    }

    #[test]
    fn test_convolve_1d_not_a_vector() {
        let input = Matrix::zeros(2, 3);
        let filter = Matrix::row_vector(vec![1.0]);
        assert_eq!(
            convolve_1d(&input, &filter),
            Err(FilterError::NotAVector { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn test_convolve_1d_empty_filter() {
        let input = Matrix::row_vector(vec![1.0, 2.0]);
        let filter = Matrix::row_vector(vec![]);
        assert_eq!(convolve_1d(&input, &filter), Err(FilterError::EmptyKernel));
    }

    #[test]
    fn test_convolve_1d_propagates_nan() -> Result<(), FilterError> {
        let signal = Matrix::row_vector(vec![1.0, f64::NAN, 1.0, 1.0, 1.0]);
        let filter = Matrix::row_vector(vec![1.0, 1.0, 1.0]);
        let out = convolve_1d(&signal, &filter)?;
        let v = out.as_slice();
        assert!(v[0].is_nan() && v[1].is_nan() && v[2].is_nan());
        assert_eq!(&v[3..], &[3.0, 2.0]);
        Ok(())
    }
}
