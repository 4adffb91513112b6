//! Border-aware n-dimensional convolution.

use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::strides::compute_strides;
use crate::tensor::Tensor;

/// How indices outside a tensor's extent are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderMode {
    /// Out-of-range positions contribute nothing. The term is skipped
    /// outright rather than multiplied by zero, so NaN or infinite values
    /// in the skipped region can never leak into the sum.
    Zero,
    /// Out-of-range indices are clamped to the nearest valid index
    /// (edge replication).
    Clamp,
    /// Out-of-range indices wrap around modulo the axis size.
    Wrap,
}

/// Resolve a signed index against one axis. `None` means "skip this term"
/// and only occurs under [`BorderMode::Zero`].
#[inline]
fn resolve_axis(idx: isize, size: usize, mode: BorderMode) -> Option<usize> {
    if (0..size as isize).contains(&idx) {
        return Some(idx as usize);
    }
    match mode {
        BorderMode::Zero => None,
        BorderMode::Clamp => Some(if idx < 0 { 0 } else { size - 1 }),
        BorderMode::Wrap => Some(idx.rem_euclid(size as isize) as usize),
    }
}

/// Look up an element at a possibly out-of-range signed index vector.
///
/// Applies the same border policies as [`convolve`]; under
/// [`BorderMode::Zero`] an out-of-range lookup yields the zero element.
///
/// # Errors
///
/// Returns `WrongNumberOfIndices` if the arity differs from the rank.
///
/// # Examples
///
/// ```
/// use tenalg::Tensor;
/// use tenalg::operations::{get_border, BorderMode};
///
/// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
/// assert_eq!(get_border(&t, &[-1], BorderMode::Zero).unwrap(), 0.0);
/// assert_eq!(get_border(&t, &[-1], BorderMode::Clamp).unwrap(), 1.0);
/// assert_eq!(get_border(&t, &[-1], BorderMode::Wrap).unwrap(), 3.0);
/// ```
pub fn get_border<ElT: Scalar>(
    tensor: &Tensor<'_, ElT>,
    indices: &[isize],
    mode: BorderMode,
) -> Result<ElT, TensorError> {
    if indices.len() != tensor.rank() {
        return Err(TensorError::WrongNumberOfIndices {
            expected: tensor.rank(),
            actual: indices.len(),
        });
    }
    let mut linear = 0;
    for ((&idx, &size), &stride) in indices
        .iter()
        .zip(tensor.shape().iter())
        .zip(tensor.strides().iter())
    {
        match resolve_axis(idx, size, mode) {
            Some(i) => linear += i * stride,
            None => return Ok(ElT::zero()),
        }
    }
    Ok(tensor.data()[linear])
}

fn check_kernel<ElT: Scalar>(
    tensor: &Tensor<'_, ElT>,
    kernel: &Tensor<'_, ElT>,
) -> Result<(), TensorError> {
    if kernel.rank() != tensor.rank() {
        return Err(TensorError::RankMismatch {
            expected: tensor.rank(),
            actual: kernel.rank(),
        });
    }
    for (axis, (&k, &s)) in kernel.shape().iter().zip(tensor.shape().iter()).enumerate() {
        if k % 2 == 0 || k > s {
            return Err(TensorError::InvalidKernel {
                axis,
                kernel_size: k,
                source_size: s,
            });
        }
    }
    Ok(())
}

/// Convolve a tensor with a centered kernel, returning a new tensor.
///
/// The kernel must have the same rank as the source and every kernel axis
/// must be odd-sized and no larger than the matching source axis. For each
/// output position `p` the result is
/// `sum over kernel positions k of src[p + offset - k] * kernel[k]` with
/// `offset[a] = kernel.shape[a] / 2`, and out-of-range source positions
/// resolved by `mode`.
///
/// # Examples
///
/// ```
/// use tenalg::Tensor;
/// use tenalg::operations::{convolve, BorderMode};
///
/// // Box filter over all-ones: interior sums count 9 taps.
/// let src: Tensor<f64> = Tensor::ones(&[5, 5]);
/// let kernel: Tensor<f64> = Tensor::ones(&[3, 3]);
/// let out = convolve(&src, &kernel, BorderMode::Zero).unwrap();
/// assert_eq!(out.get(&[2, 2]), Some(&9.0));
/// assert_eq!(out.get(&[0, 0]), Some(&4.0));
/// ```
pub fn convolve<ElT: Scalar>(
    tensor: &Tensor<'_, ElT>,
    kernel: &Tensor<'_, ElT>,
    mode: BorderMode,
) -> Result<Tensor<'static, ElT>, TensorError> {
    let mut result = tensor.to_owned_tensor();
    convolve_inplace(&mut result, kernel, mode)?;
    Ok(result)
}

/// Convolve in place, writing the result back into `tensor`.
///
/// Reads from a copy of the original data, so convolving a tensor with a
/// kernel view into itself is safe. This is the variant to use on views
/// over external buffers (e.g. image pixels filtered without copying out).
pub fn convolve_inplace<ElT: Scalar>(
    tensor: &mut Tensor<'_, ElT>,
    kernel: &Tensor<'_, ElT>,
    mode: BorderMode,
) -> Result<(), TensorError> {
    check_kernel(tensor, kernel)?;

    let src = tensor.data().to_vec();
    let shape: Vec<usize> = tensor.shape().to_vec();
    let strides = compute_strides(&shape);
    let rank = shape.len();
    let offsets: Vec<usize> = kernel.shape().iter().map(|&k| k / 2).collect();
    let kernel_data = kernel.data();

    let mut src_idx = vec![0_isize; rank];
    for pos in crate::strides::positions(&shape) {
        let mut acc = ElT::zero();
        'kernel: for kpos in kernel.positions() {
            for a in 0..rank {
                src_idx[a] =
                    pos.indices[a] as isize + offsets[a] as isize - kpos.indices[a] as isize;
            }
            let mut linear = 0;
            for a in 0..rank {
                match resolve_axis(src_idx[a], shape[a], mode) {
                    Some(i) => linear += i * strides[a],
                    None => continue 'kernel,
                }
            }
            acc += src[linear] * kernel_data[kpos.linear];
        }
        tensor.data_mut()[pos.linear] = acc;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn delta_kernel(shape: &[usize]) -> Tensor<'static, f64> {
        let center: Vec<usize> = shape.iter().map(|&k| k / 2).collect();
        Tensor::from_fn(shape, |ix| if ix == center.as_slice() { 1.0 } else { 0.0 })
    }

    #[test]
    fn test_identity_kernel_reproduces_input() {
        let t = Tensor::from_fn(&[4, 5], |ix| (ix[0] * 5 + ix[1]) as f64);
        let k = delta_kernel(&[3, 3]);
        for mode in [BorderMode::Zero, BorderMode::Clamp, BorderMode::Wrap] {
            let out = convolve(&t, &k, mode).unwrap();
            assert_eq!(out, t, "identity kernel failed under {mode:?}");
        }
    }

    #[test]
    fn test_box_filter_zero_border_counts() {
        let src: Tensor<f64> = Tensor::ones(&[5, 5]);
        let kernel: Tensor<f64> = Tensor::ones(&[3, 3]);
        let out = convolve(&src, &kernel, BorderMode::Zero).unwrap();

        for i in 0..5 {
            for j in 0..5 {
                let edge_i = i == 0 || i == 4;
                let edge_j = j == 0 || j == 4;
                let expected = match (edge_i, edge_j) {
                    (true, true) => 4.0,
                    (true, false) | (false, true) => 6.0,
                    (false, false) => 9.0,
                };
                assert_relative_eq!(*out.get(&[i, j]).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_clamp_border_full_sum() {
        // With edge replication every tap lands on a 1, even at corners.
        let src: Tensor<f64> = Tensor::ones(&[4, 4]);
        let kernel: Tensor<f64> = Tensor::ones(&[3, 3]);
        let out = convolve(&src, &kernel, BorderMode::Clamp).unwrap();
        for pos in out.positions() {
            assert_relative_eq!(out.data()[pos.linear], 9.0);
        }
    }

    #[test]
    fn test_wrap_border_1d() {
        // src[p + 1 - k]: at p = 0, the k = 2 tap wraps to index 2.
        let src = Tensor::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        let kernel = Tensor::from_vec(vec![0.0, 0.0, 1.0], &[3]).unwrap();
        let out = convolve(&src, &kernel, BorderMode::Wrap).unwrap();
        assert_eq!(out.data(), &[3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_zero_border_skips_nonfinite_kernel_tap() {
        // The infinite tap reads src[p + 1] and falls off the right edge at
        // p = 2. Skipping the term keeps out[2] finite; padding with zeros
        // would evaluate 0 * inf = NaN there.
        let src = Tensor::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        let kernel = Tensor::from_vec(vec![f64::INFINITY, 1.0, 0.0], &[3]).unwrap();
        let out = convolve(&src, &kernel, BorderMode::Zero).unwrap();
        assert!(out.data()[2].is_finite());
        assert_relative_eq!(out.data()[2], 3.0);
        // In range the infinite tap is evaluated as usual.
        assert_eq!(out.data()[0], f64::INFINITY);
    }

    #[test]
    fn test_even_kernel_rejected() {
        let src: Tensor<f64> = Tensor::ones(&[5]);
        let kernel: Tensor<f64> = Tensor::ones(&[2]);
        assert!(matches!(
            convolve(&src, &kernel, BorderMode::Zero),
            Err(TensorError::InvalidKernel { .. })
        ));
    }

    #[test]
    fn test_oversized_kernel_rejected() {
        let src: Tensor<f64> = Tensor::ones(&[3]);
        let kernel: Tensor<f64> = Tensor::ones(&[5]);
        assert!(convolve(&src, &kernel, BorderMode::Zero).is_err());
    }

    #[test]
    fn test_rank_mismatch_rejected() {
        let src: Tensor<f64> = Tensor::ones(&[3, 3]);
        let kernel: Tensor<f64> = Tensor::ones(&[3]);
        assert!(matches!(
            convolve(&src, &kernel, BorderMode::Zero),
            Err(TensorError::RankMismatch { .. })
        ));
    }

    #[test]
    fn test_inplace_on_view() {
        let mut pixels: Vec<f64> = vec![1.0; 9];
        {
            let mut view = Tensor::from_slice_mut(&mut pixels, &[3, 3]).unwrap();
            let kernel: Tensor<f64> = Tensor::ones(&[3, 3]);
            convolve_inplace(&mut view, &kernel, BorderMode::Zero).unwrap();
        }
        assert_eq!(pixels[4], 9.0); // interior
        assert_eq!(pixels[0], 4.0); // corner
    }

    #[test]
    fn test_get_border_modes() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        assert_eq!(get_border(&t, &[0, 0], BorderMode::Zero).unwrap(), 1.0);
        assert_eq!(get_border(&t, &[-1, 0], BorderMode::Zero).unwrap(), 0.0);
        assert_eq!(get_border(&t, &[-1, 0], BorderMode::Clamp).unwrap(), 1.0);
        assert_eq!(get_border(&t, &[2, 0], BorderMode::Clamp).unwrap(), 3.0);
        assert_eq!(get_border(&t, &[2, 3], BorderMode::Wrap).unwrap(), 2.0);
    }
}
