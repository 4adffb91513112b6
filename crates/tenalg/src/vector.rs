//! Rank-1 specializations: dot, cross, and matrix-vector products.

use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::tensor::Tensor;

fn vector_len<ElT: Scalar>(t: &Tensor<'_, ElT>) -> Result<usize, TensorError> {
    if t.rank() != 1 {
        return Err(TensorError::RankMismatch {
            expected: 1,
            actual: t.rank(),
        });
    }
    Ok(t.shape()[0])
}

/// Dot product of two equal-length vectors, without conjugation.
///
/// # Examples
///
/// ```
/// use tenalg::vector::dot;
/// use tenalg::Tensor;
///
/// let a = Tensor::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
/// let b = Tensor::from_vec(vec![4.0, 5.0, 6.0], &[3]).unwrap();
/// assert_eq!(dot(&a, &b).unwrap(), 32.0);
/// ```
pub fn dot<ElT: Scalar>(a: &Tensor<'_, ElT>, b: &Tensor<'_, ElT>) -> Result<ElT, TensorError> {
    let la = vector_len(a)?;
    let lb = vector_len(b)?;
    if la != lb {
        return Err(TensorError::IncompatibleShapes {
            left: a.shape().to_vec(),
            right: b.shape().to_vec(),
        });
    }
    let mut acc = ElT::zero();
    for (&x, &y) in a.data().iter().zip(b.data().iter()) {
        acc += x * y;
    }
    Ok(acc)
}

/// Cross product of two 3-vectors.
///
/// # Errors
///
/// Returns `IncompatibleShapes` unless both operands are rank-1 tensors of
/// length exactly 3.
///
/// # Examples
///
/// ```
/// use tenalg::vector::cross;
/// use tenalg::Tensor;
///
/// let x = Tensor::from_vec(vec![1.0, 0.0, 0.0], &[3]).unwrap();
/// let y = Tensor::from_vec(vec![0.0, 1.0, 0.0], &[3]).unwrap();
/// assert_eq!(cross(&x, &y).unwrap().data(), &[0.0, 0.0, 1.0]);
/// ```
pub fn cross<ElT: Scalar>(
    a: &Tensor<'_, ElT>,
    b: &Tensor<'_, ElT>,
) -> Result<Tensor<'static, ElT>, TensorError> {
    let la = vector_len(a)?;
    let lb = vector_len(b)?;
    if la != 3 || lb != 3 {
        return Err(TensorError::IncompatibleShapes {
            left: a.shape().to_vec(),
            right: b.shape().to_vec(),
        });
    }
    let (a, b) = (a.data(), b.data());
    Tensor::from_vec(
        vec![
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ],
        &[3],
    )
}

/// Left product `v^T M` of a row vector with a matrix, yielding a vector of
/// length `M.cols`.
///
/// # Examples
///
/// ```
/// use tenalg::vector::vec_mat;
/// use tenalg::Tensor;
///
/// let v = Tensor::from_vec(vec![1.0, 2.0], &[2]).unwrap();
/// let m = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// assert_eq!(vec_mat(&v, &m).unwrap().data(), &[9.0, 12.0, 15.0]);
/// ```
pub fn vec_mat<ElT: Scalar>(
    v: &Tensor<'_, ElT>,
    m: &Tensor<'_, ElT>,
) -> Result<Tensor<'static, ElT>, TensorError> {
    let len = vector_len(v)?;
    if m.rank() != 2 {
        return Err(TensorError::RankMismatch {
            expected: 2,
            actual: m.rank(),
        });
    }
    let (rows, cols) = (m.shape()[0], m.shape()[1]);
    if len != rows {
        return Err(TensorError::IncompatibleShapes {
            left: v.shape().to_vec(),
            right: m.shape().to_vec(),
        });
    }

    let mut out = vec![ElT::zero(); cols];
    let (vd, md) = (v.data(), m.data());
    for i in 0..rows {
        let vi = vd[i];
        for (j, o) in out.iter_mut().enumerate() {
            *o += vi * md[i * cols + j];
        }
    }
    Tensor::from_vec(out, &[cols])
}

/// Right product `M v` of a matrix with a column vector, yielding a vector
/// of length `M.rows`.
///
/// # Examples
///
/// ```
/// use tenalg::vector::mat_vec;
/// use tenalg::Tensor;
///
/// let m = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// let v = Tensor::from_vec(vec![1.0, 0.0, 1.0], &[3]).unwrap();
/// assert_eq!(mat_vec(&m, &v).unwrap().data(), &[4.0, 10.0]);
/// ```
pub fn mat_vec<ElT: Scalar>(
    m: &Tensor<'_, ElT>,
    v: &Tensor<'_, ElT>,
) -> Result<Tensor<'static, ElT>, TensorError> {
    if m.rank() != 2 {
        return Err(TensorError::RankMismatch {
            expected: 2,
            actual: m.rank(),
        });
    }
    let len = vector_len(v)?;
    let (rows, cols) = (m.shape()[0], m.shape()[1]);
    if len != cols {
        return Err(TensorError::IncompatibleShapes {
            left: m.shape().to_vec(),
            right: v.shape().to_vec(),
        });
    }

    let mut out = vec![ElT::zero(); rows];
    let (vd, md) = (v.data(), m.data());
    for (i, o) in out.iter_mut().enumerate() {
        let row = &md[i * cols..(i + 1) * cols];
        let mut acc = ElT::zero();
        for (&a, &x) in row.iter().zip(vd.iter()) {
            acc += a * x;
        }
        *o = acc;
    }
    Tensor::from_vec(out, &[rows])
}
