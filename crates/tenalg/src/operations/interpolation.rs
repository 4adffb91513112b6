//! Resampling between grids of different sizes.
//!
//! The source and destination grids are aligned at their corners: the first
//! and last sample of every axis map onto each other, and interior
//! destination samples land at fractional source coordinates
//! `dst_index * (src_size - 1) / (dst_size - 1)`.

use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::strides::{compute_strides, positions};
use crate::tensor::Tensor;

/// How fractional source coordinates are turned into values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Truncate the coordinate to an integer index and look it up.
    Nearest,
    /// Multilinear blend of the 2^rank surrounding samples.
    Linear,
    /// Separable Catmull-Rom cubic over 4^rank samples, with edge samples
    /// replicated where the support window leaves the grid.
    Cubic,
}

#[inline]
fn clamp_index(i: isize, size: usize) -> usize {
    i.clamp(0, size as isize - 1) as usize
}

fn sample_nearest<ElT: Scalar>(
    data: &[ElT],
    shape: &[usize],
    strides: &[usize],
    coords: &[f64],
) -> ElT {
    let mut linear = 0;
    for a in 0..coords.len() {
        linear += clamp_index(coords[a] as isize, shape[a]) * strides[a];
    }
    data[linear]
}

fn sample_linear<ElT: Scalar>(
    data: &[ElT],
    shape: &[usize],
    strides: &[usize],
    coords: &[f64],
    axis: usize,
    offset: usize,
) -> ElT {
    if axis == coords.len() {
        return data[offset];
    }
    let floor = coords[axis].floor();
    let t = coords[axis] - floor;
    let i0 = floor as isize;
    let lo = sample_linear(
        data,
        shape,
        strides,
        coords,
        axis + 1,
        offset + clamp_index(i0, shape[axis]) * strides[axis],
    );
    if t == 0.0 {
        return lo;
    }
    let hi = sample_linear(
        data,
        shape,
        strides,
        coords,
        axis + 1,
        offset + clamp_index(i0 + 1, shape[axis]) * strides[axis],
    );
    lo.scale_real(1.0 - t) + hi.scale_real(t)
}

fn sample_cubic<ElT: Scalar>(
    data: &[ElT],
    shape: &[usize],
    strides: &[usize],
    coords: &[f64],
    axis: usize,
    offset: usize,
) -> ElT {
    if axis == coords.len() {
        return data[offset];
    }
    let floor = coords[axis].floor();
    let t = coords[axis] - floor;
    let i1 = floor as isize;

    let mut taps = [ElT::zero(); 4];
    for (k, tap) in taps.iter_mut().enumerate() {
        let i = clamp_index(i1 - 1 + k as isize, shape[axis]);
        *tap = sample_cubic(data, shape, strides, coords, axis + 1, offset + i * strides[axis]);
    }
    let [x0, x1, x2, x3] = taps;

    // Catmull-Rom coefficients, evaluated by Horner's rule.
    let a = x0.scale_real(-0.5) + x1.scale_real(1.5) + x2.scale_real(-1.5) + x3.scale_real(0.5);
    let b = x0 + x1.scale_real(-2.5) + x2.scale_real(2.0) + x3.scale_real(-0.5);
    let c = x0.scale_real(-0.5) + x2.scale_real(0.5);
    let d = x1;
    d + (c + (b + a.scale_real(t)).scale_real(t)).scale_real(t)
}

/// Resample a tensor onto a grid of a different shape.
///
/// The result has shape `dst_shape`, which must have the same rank as the
/// source. Destination axes of size 1 collapse onto source coordinate 0.
///
/// # Errors
///
/// Returns `RankMismatch` if the ranks differ and `ZeroAxis` if any
/// destination axis has size 0.
///
/// # Examples
///
/// ```
/// use tenalg::Tensor;
/// use tenalg::operations::{resample, Interpolation};
///
/// // Upsampling a ramp linearly keeps it a ramp.
/// let src = Tensor::from_vec(vec![0.0, 2.0, 4.0], &[3]).unwrap();
/// let up = resample(&src, &[5], Interpolation::Linear).unwrap();
/// assert_eq!(up.data(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn resample<ElT: Scalar>(
    src: &Tensor<'_, ElT>,
    dst_shape: &[usize],
    method: Interpolation,
) -> Result<Tensor<'static, ElT>, TensorError> {
    if dst_shape.len() != src.rank() {
        return Err(TensorError::RankMismatch {
            expected: src.rank(),
            actual: dst_shape.len(),
        });
    }
    for (axis, &dim) in dst_shape.iter().enumerate() {
        if dim == 0 {
            return Err(TensorError::ZeroAxis { axis });
        }
    }
    let mut dst = Tensor::<ElT>::zeros(dst_shape);
    resample_into(&mut dst, src, method)?;
    Ok(dst)
}

/// Resample into a pre-allocated destination of the desired shape.
///
/// This is the variant to use when the destination is a view over an
/// external buffer.
pub fn resample_into<ElT: Scalar>(
    dst: &mut Tensor<'_, ElT>,
    src: &Tensor<'_, ElT>,
    method: Interpolation,
) -> Result<(), TensorError> {
    let rank = src.rank();
    if dst.rank() != rank {
        return Err(TensorError::RankMismatch {
            expected: rank,
            actual: dst.rank(),
        });
    }

    // Corner-aligned axis ratios; a single-sample destination axis always
    // reads source coordinate 0.
    let ratios: Vec<f64> = src
        .shape()
        .iter()
        .zip(dst.shape().iter())
        .map(|(&s, &d)| {
            if d > 1 {
                (s as f64 - 1.0) / (d as f64 - 1.0)
            } else {
                0.0
            }
        })
        .collect();

    let src_shape: Vec<usize> = src.shape().to_vec();
    let src_strides = compute_strides(&src_shape);
    let dst_shape: Vec<usize> = dst.shape().to_vec();
    let data = src.data();

    let mut coords = vec![0.0; rank];
    for pos in positions(&dst_shape) {
        for a in 0..rank {
            coords[a] = pos.indices[a] as f64 * ratios[a];
        }
        let value = match method {
            Interpolation::Nearest => sample_nearest(data, &src_shape, &src_strides, &coords),
            Interpolation::Linear => {
                sample_linear(data, &src_shape, &src_strides, &coords, 0, 0)
            }
            Interpolation::Cubic => sample_cubic(data, &src_shape, &src_strides, &coords, 0, 0),
        };
        dst.data_mut()[pos.linear] = value;
    }

    Ok(())
}
