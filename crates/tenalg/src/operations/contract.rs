//! Contracted tensor product and axis contraction.

use faer::linalg::matmul::matmul;
use faer::{Accum, Par};
use smallvec::SmallVec;

use crate::backend::AsFaerMat;
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::strides::{cartesian_to_linear, compute_strides, positions, Dims};
use crate::tensor::Tensor;

/// Contracted product of two tensors over A's last axis and B's first axis.
///
/// This is the tensor generalization of matrix multiplication: for A of
/// rank N and B of rank M with `A.shape[N-1] == B.shape[0]`, the result has
/// rank N+M-2, shape `A.shape[..N-1] ++ B.shape[1..]`, and
/// `C[.., ..] = sum_t A[.., t] * B[t, ..]`.
///
/// In row-major order both operands flatten to matrices around the shared
/// axis, so the sum is a single GEMM over zero-copy views. Contracting two
/// rank-1 tensors yields a scalar tensor (empty shape).
///
/// # Errors
///
/// Returns `IncompatibleShapes` if the shared axis sizes differ.
///
/// # Examples
///
/// ```
/// use tenalg::Tensor;
/// use tenalg::operations::contracted;
///
/// // A[i,j,t] * B[t,k] -> C[i,j,k]
/// let a: Tensor<f64> = Tensor::ones(&[2, 3, 4]);
/// let b: Tensor<f64> = Tensor::ones(&[4, 5]);
/// let c = contracted(&a, &b).unwrap();
/// assert_eq!(c.shape(), &[2, 3, 5]);
/// assert_eq!(c.get(&[0, 0, 0]), Some(&4.0));
/// ```
pub fn contracted<ElT: Scalar>(
    a: &Tensor<'_, ElT>,
    b: &Tensor<'_, ElT>,
) -> Result<Tensor<'static, ElT>, TensorError> {
    if a.rank() == 0 || b.rank() == 0 {
        return Err(TensorError::RankMismatch {
            expected: 1,
            actual: 0,
        });
    }
    let shared = a.shape()[a.rank() - 1];
    if shared != b.shape()[0] {
        return Err(TensorError::IncompatibleShapes {
            left: a.shape().to_vec(),
            right: b.shape().to_vec(),
        });
    }

    let mut shape: Vec<usize> = a.shape()[..a.rank() - 1].to_vec();
    shape.extend_from_slice(&b.shape()[1..]);

    let m = a.len() / shared;
    let n = b.len() / shared;

    let mut c = Tensor::<ElT>::zeros(&shape);
    let a_mat = a.as_faer_mat(m, shared);
    let b_mat = b.as_faer_mat(shared, n);
    let mut c_mat = c.as_faer_mat_mut(m, n);
    matmul(c_mat.as_mut(), Accum::Replace, a_mat, b_mat, ElT::one(), Par::Seq);

    Ok(c)
}

/// Contract a tensor over two of its own equal-sized axes.
///
/// Sums the diagonal over axes `i` and `j` (trace-like reduction): for
/// every remaining index vector the result accumulates
/// `self[.. i=k .., j=k ..]` over k. Requires rank > 2, `i != j`, and
/// `shape[i] == shape[j]`; the result's axes are the remaining axes in
/// their original relative order.
///
/// # Examples
///
/// ```
/// use tenalg::Tensor;
/// use tenalg::operations::trace_axes;
///
/// // T[a,i,i] summed over i leaves shape [2].
/// let t = Tensor::from_fn(&[2, 3, 3], |ix| if ix[1] == ix[2] { 1.0 } else { 0.0 });
/// let r = trace_axes(&t, 1, 2).unwrap();
/// assert_eq!(r.shape(), &[2]);
/// assert_eq!(r.get(&[0]), Some(&3.0));
/// ```
pub fn trace_axes<ElT: Scalar>(
    tensor: &Tensor<'_, ElT>,
    i: usize,
    j: usize,
) -> Result<Tensor<'static, ElT>, TensorError> {
    let rank = tensor.rank();
    if rank <= 2 {
        return Err(TensorError::RankMismatch {
            expected: 3,
            actual: rank,
        });
    }
    if i >= rank {
        return Err(TensorError::AxisOutOfBounds { axis: i, rank });
    }
    if j >= rank || i == j {
        return Err(TensorError::AxisOutOfBounds { axis: j, rank });
    }

    // Normalize so i < j before splicing out the two axes.
    let (i, j) = if i < j { (i, j) } else { (j, i) };
    let diag = tensor.shape()[i];
    if diag != tensor.shape()[j] {
        return Err(TensorError::ContractionSizeMismatch {
            i,
            j,
            size_i: diag,
            size_j: tensor.shape()[j],
        });
    }

    let mut out_shape: Vec<usize> = Vec::with_capacity(rank - 2);
    for (axis, &dim) in tensor.shape().iter().enumerate() {
        if axis != i && axis != j {
            out_shape.push(dim);
        }
    }

    let strides = compute_strides(tensor.shape());
    let mut result = Tensor::<ElT>::zeros(&out_shape);
    let data = tensor.data();

    for pos in positions(&out_shape) {
        // Rebuild the full index vector with the two contracted axes
        // spliced back in at positions i and j.
        let mut full: Dims = SmallVec::from_elem(0, rank);
        let mut src = 0;
        for axis in 0..rank {
            if axis != i && axis != j {
                full[axis] = pos.indices[src];
                src += 1;
            }
        }
        let mut sum = ElT::zero();
        for k in 0..diag {
            full[i] = k;
            full[j] = k;
            sum += data[cartesian_to_linear(&full, &strides)];
        }
        result.data_mut()[pos.linear] = sum;
    }

    Ok(result)
}
