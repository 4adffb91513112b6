//! Rank-2 specializations: matrix product, transpose, inverse, determinant.

use faer::linalg::matmul::matmul as faer_matmul;
use faer::{Accum, Par};

use crate::backend::AsFaerMat;
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::tensor::Tensor;

fn matrix_dims<ElT: Scalar>(t: &Tensor<'_, ElT>) -> Result<(usize, usize), TensorError> {
    if t.rank() != 2 {
        return Err(TensorError::RankMismatch {
            expected: 2,
            actual: t.rank(),
        });
    }
    Ok((t.shape()[0], t.shape()[1]))
}

fn square_dim<ElT: Scalar>(t: &Tensor<'_, ElT>) -> Result<usize, TensorError> {
    let (rows, cols) = matrix_dims(t)?;
    if rows != cols {
        return Err(TensorError::NotSquareMatrix { rows, cols });
    }
    Ok(rows)
}

/// The `n x n` identity matrix.
///
/// # Examples
///
/// ```
/// use tenalg::matrix::identity;
/// use tenalg::Tensor;
///
/// let eye: Tensor<f64> = identity(3);
/// assert_eq!(eye.get(&[1, 1]), Some(&1.0));
/// assert_eq!(eye.get(&[1, 2]), Some(&0.0));
/// ```
pub fn identity<ElT: Scalar>(n: usize) -> Tensor<'static, ElT> {
    let mut t = Tensor::zeros(&[n, n]);
    for i in 0..n {
        t.data_mut()[i * n + i] = ElT::one();
    }
    t
}

/// Matrix product of two rank-2 tensors, dispatched to a faer GEMM.
///
/// # Errors
///
/// Returns `RankMismatch` unless both operands have rank 2 and
/// `IncompatibleShapes` unless the inner dimensions agree.
///
/// # Examples
///
/// ```
/// use tenalg::matrix::{identity, matmul};
/// use tenalg::Tensor;
///
/// let m = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
/// let p = matmul(&m, &identity(2)).unwrap();
/// assert_eq!(p, m);
/// ```
pub fn matmul<ElT: Scalar>(
    a: &Tensor<'_, ElT>,
    b: &Tensor<'_, ElT>,
) -> Result<Tensor<'static, ElT>, TensorError> {
    let (m, ka) = matrix_dims(a)?;
    let (kb, n) = matrix_dims(b)?;
    if ka != kb {
        return Err(TensorError::IncompatibleShapes {
            left: a.shape().to_vec(),
            right: b.shape().to_vec(),
        });
    }

    let mut c = Tensor::<ElT>::zeros(&[m, n]);
    let a_mat = a.as_faer_mat(m, ka);
    let b_mat = b.as_faer_mat(kb, n);
    let mut c_mat = c.as_faer_mat_mut(m, n);
    faer_matmul(c_mat.as_mut(), Accum::Replace, a_mat, b_mat, ElT::one(), Par::Seq);
    Ok(c)
}

/// Transpose a rank-2 tensor in place, without allocating a second buffer
/// for the elements.
///
/// Square matrices swap across the diagonal. Rectangular matrices are
/// permuted by following the cycles of the row-major transposition map
/// (element at flat index `n` moves to `(n % cols) * rows + n / cols`),
/// after which the shape becomes `[cols, rows]`. Works on views, so a
/// borrowed buffer is transposed where it lives.
///
/// # Examples
///
/// ```
/// use tenalg::matrix::transpose_inplace;
/// use tenalg::Tensor;
///
/// let mut t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// transpose_inplace(&mut t).unwrap();
/// assert_eq!(t.shape(), &[3, 2]);
/// assert_eq!(t.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
/// ```
pub fn transpose_inplace<ElT: Scalar>(t: &mut Tensor<'_, ElT>) -> Result<(), TensorError> {
    let (rows, cols) = matrix_dims(t)?;

    if rows == cols {
        let n = rows;
        let data = t.data_mut();
        for i in 0..n {
            for j in (i + 1)..n {
                data.swap(i * n + j, j * n + i);
            }
        }
        return Ok(());
    }

    let len = rows * cols;
    let data = t.data_mut();
    let mut visited = vec![false; len];
    for start in 0..len {
        if visited[start] {
            continue;
        }
        let mut cur = start;
        let mut val = data[cur];
        loop {
            let dst = (cur % cols) * rows + cur / cols;
            std::mem::swap(&mut val, &mut data[dst]);
            visited[cur] = true;
            cur = dst;
            if cur == start {
                break;
            }
        }
    }
    t.replace_shape(&[cols, rows]);
    Ok(())
}

/// Invert a square matrix by Gauss-Jordan elimination.
///
/// A zero pivot is repaired by adding a later row with a non-zero entry in
/// the pivot column; if no such row exists the matrix is singular.
///
/// # Errors
///
/// Returns `NotSquareMatrix` for rectangular input and `SingularMatrix`
/// ("the matrix cannot be inverted") when elimination finds no usable
/// pivot.
///
/// # Examples
///
/// ```
/// use tenalg::matrix::{inverse, matmul, identity};
/// use tenalg::Tensor;
///
/// let m = Tensor::from_vec(vec![4.0, 7.0, 2.0, 6.0], &[2, 2]).unwrap();
/// let inv = inverse(&m).unwrap();
/// let prod = matmul(&m, &inv).unwrap();
/// let eye: Tensor<f64> = identity(2);
/// for (a, b) in prod.data().iter().zip(eye.data().iter()) {
///     assert!((a - b).abs() < 1e-12);
/// }
/// ```
pub fn inverse<ElT: Scalar>(t: &Tensor<'_, ElT>) -> Result<Tensor<'static, ElT>, TensorError> {
    let n = square_dim(t)?;
    let mut a = t.data().to_vec();
    let mut inv = identity::<ElT>(n);
    let b = inv.data_mut();

    for k in 0..n {
        if a[k * n + k].is_zero() {
            let repair = ((k + 1)..n).find(|&r| !a[r * n + k].is_zero());
            match repair {
                Some(r) => {
                    for j in 0..n {
                        let (av, bv) = (a[r * n + j], b[r * n + j]);
                        a[k * n + j] += av;
                        b[k * n + j] += bv;
                    }
                }
                None => return Err(TensorError::SingularMatrix),
            }
        }

        let pivot = a[k * n + k];
        for j in 0..n {
            a[k * n + j] /= pivot;
            b[k * n + j] /= pivot;
        }

        for r in 0..n {
            if r == k || a[r * n + k].is_zero() {
                continue;
            }
            let factor = a[r * n + k];
            for j in 0..n {
                let (av, bv) = (a[k * n + j], b[k * n + j]);
                a[r * n + j] -= factor * av;
                b[r * n + j] -= factor * bv;
            }
        }
    }

    Ok(inv)
}

/// Determinant of a square matrix by forward elimination.
///
/// A zero pivot is repaired by adding a later row, which leaves the
/// determinant unchanged; when no repair row exists the matrix is singular
/// and the determinant is exactly zero, reported as a value rather than an
/// error.
///
/// # Errors
///
/// Returns `NotSquareMatrix` for rectangular input.
///
/// # Examples
///
/// ```
/// use tenalg::matrix::determinant;
/// use tenalg::Tensor;
///
/// let m = Tensor::from_vec(vec![3.0, 8.0, 4.0, 6.0], &[2, 2]).unwrap();
/// assert!((determinant(&m).unwrap() - -14.0).abs() < 1e-12);
/// ```
pub fn determinant<ElT: Scalar>(t: &Tensor<'_, ElT>) -> Result<ElT, TensorError> {
    let n = square_dim(t)?;
    let mut a = t.data().to_vec();

    let mut det = ElT::one();
    for k in 0..n {
        if a[k * n + k].is_zero() {
            let repair = ((k + 1)..n).find(|&r| !a[r * n + k].is_zero());
            match repair {
                Some(r) => {
                    for j in k..n {
                        let av = a[r * n + j];
                        a[k * n + j] += av;
                    }
                }
                None => return Ok(ElT::zero()),
            }
        }

        let pivot = a[k * n + k];
        det *= pivot;
        for r in (k + 1)..n {
            if a[r * n + k].is_zero() {
                continue;
            }
            let factor = a[r * n + k] / pivot;
            for j in k..n {
                let av = a[k * n + j];
                a[r * n + j] -= factor * av;
            }
        }
    }

    Ok(det)
}
