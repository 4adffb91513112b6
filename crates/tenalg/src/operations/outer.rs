//! Outer (tensor) product.

use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::tensor::Tensor;

/// Compute the outer product of two tensors.
///
/// For A of rank p and B of rank q the result has rank p+q, its shape is
/// the concatenation of the operand shapes, and
/// `C[i_1..i_p, j_1..j_q] = A[i_1..i_p] * B[j_1..j_q]`.
///
/// In row-major order the result's flat offset decomposes as
/// `ia * b.len() + ib`, so a single pass over C reads A once per block and
/// cycles through B.
///
/// # Examples
///
/// ```
/// use tenalg::Tensor;
/// use tenalg::operations::outer;
///
/// let a = Tensor::from_vec(vec![1.0, 2.0], &[2]).unwrap();
/// let b = Tensor::from_vec(vec![3.0, 4.0, 5.0], &[3]).unwrap();
/// let c = outer(&a, &b);
///
/// assert_eq!(c.shape(), &[2, 3]);
/// assert_eq!(c.get(&[0, 0]), Some(&3.0));
/// assert_eq!(c.get(&[1, 2]), Some(&10.0));
/// ```
pub fn outer<ElT: Scalar>(a: &Tensor<'_, ElT>, b: &Tensor<'_, ElT>) -> Tensor<'static, ElT> {
    let mut shape: Vec<usize> = a.shape().to_vec();
    shape.extend_from_slice(b.shape());

    let mut result = Tensor::zeros(&shape);
    outer_into(&mut result, a, b).expect("outer: result allocated with the concatenated shape");
    result
}

/// Outer product into a pre-allocated result of shape `[a.shape, b.shape]`.
pub fn outer_into<ElT: Scalar>(
    result: &mut Tensor<'_, ElT>,
    a: &Tensor<'_, ElT>,
    b: &Tensor<'_, ElT>,
) -> Result<(), TensorError> {
    let a_len = a.len();
    let b_len = b.len();
    if result.len() != a_len * b_len {
        return Err(TensorError::ShapeMismatch {
            expected: a_len * b_len,
            actual: result.len(),
        });
    }

    let a_data = a.data();
    let b_data = b.data();
    let out = result.data_mut();
    for ia in 0..a_len {
        let a_val = a_data[ia];
        let block = &mut out[ia * b_len..(ia + 1) * b_len];
        for (dst, &b_val) in block.iter_mut().zip(b_data.iter()) {
            *dst = a_val * b_val;
        }
    }
    Ok(())
}
