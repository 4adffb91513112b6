//! Element-wise tensor algebra.
//!
//! Every binary operation requires identical shapes on both operands and
//! reports a mismatch as `IncompatibleShapes`. Each operation comes in an
//! owned form and an in-place form; the in-place forms work on views too.

use faer_traits::math_utils;

use crate::error::TensorError;
use crate::scalar::{RealScalar, Scalar};
use crate::tensor::Tensor;

fn check_same_shape<ElT: Scalar>(
    a: &Tensor<'_, ElT>,
    b: &Tensor<'_, ElT>,
) -> Result<(), TensorError> {
    if a.shape() != b.shape() {
        return Err(TensorError::IncompatibleShapes {
            left: a.shape().to_vec(),
            right: b.shape().to_vec(),
        });
    }
    Ok(())
}

/// Apply a function to each element, returning a new tensor.
///
/// # Examples
///
/// ```
/// use tenalg::Tensor;
/// use tenalg::operations::apply;
///
/// let t = Tensor::from_vec(vec![1.0, -2.0, 3.0], &[3]).unwrap();
/// let u = apply(&t, |x| x * x);
/// assert_eq!(u.data(), &[1.0, 4.0, 9.0]);
/// ```
pub fn apply<ElT: Scalar, F>(tensor: &Tensor<'_, ElT>, f: F) -> Tensor<'static, ElT>
where
    F: Fn(ElT) -> ElT,
{
    let data: Vec<ElT> = tensor.data().iter().map(|&x| f(x)).collect();
    Tensor::from_vec(data, tensor.shape()).expect("apply: shape unchanged")
}

/// Apply a function to each element in place.
pub fn apply_inplace<ElT: Scalar, F>(tensor: &mut Tensor<'_, ElT>, f: F)
where
    F: Fn(ElT) -> ElT,
{
    for x in tensor.data_mut() {
        *x = f(*x);
    }
}

/// Combine two same-shaped tensors element-wise with a binary function.
pub fn apply_binary<ElT: Scalar, F>(
    a: &Tensor<'_, ElT>,
    b: &Tensor<'_, ElT>,
    f: F,
) -> Result<Tensor<'static, ElT>, TensorError>
where
    F: Fn(ElT, ElT) -> ElT,
{
    check_same_shape(a, b)?;
    let data: Vec<ElT> = a
        .data()
        .iter()
        .zip(b.data().iter())
        .map(|(&x, &y)| f(x, y))
        .collect();
    Ok(Tensor::from_vec(data, a.shape()).expect("apply_binary: shape unchanged"))
}

/// Combine in place: `a[i] = f(a[i], b[i])`.
pub fn apply_binary_inplace<ElT: Scalar, F>(
    a: &mut Tensor<'_, ElT>,
    b: &Tensor<'_, ElT>,
    f: F,
) -> Result<(), TensorError>
where
    F: Fn(ElT, ElT) -> ElT,
{
    check_same_shape(a, b)?;
    for (x, &y) in a.data_mut().iter_mut().zip(b.data().iter()) {
        *x = f(*x, y);
    }
    Ok(())
}

/// Element-wise sum of two same-shaped tensors.
///
/// # Examples
///
/// ```
/// use tenalg::Tensor;
/// use tenalg::operations::add;
///
/// let a = Tensor::from_vec(vec![1.0, 2.0], &[2]).unwrap();
/// let b = Tensor::from_vec(vec![10.0, 20.0], &[2]).unwrap();
/// assert_eq!(add(&a, &b).unwrap().data(), &[11.0, 22.0]);
/// ```
pub fn add<ElT: Scalar>(
    a: &Tensor<'_, ElT>,
    b: &Tensor<'_, ElT>,
) -> Result<Tensor<'static, ElT>, TensorError> {
    apply_binary(a, b, |x, y| x + y)
}

/// In-place element-wise sum: `a += b`.
pub fn add_assign<ElT: Scalar>(
    a: &mut Tensor<'_, ElT>,
    b: &Tensor<'_, ElT>,
) -> Result<(), TensorError> {
    apply_binary_inplace(a, b, |x, y| x + y)
}

/// Element-wise difference of two same-shaped tensors.
pub fn sub<ElT: Scalar>(
    a: &Tensor<'_, ElT>,
    b: &Tensor<'_, ElT>,
) -> Result<Tensor<'static, ElT>, TensorError> {
    apply_binary(a, b, |x, y| x - y)
}

/// In-place element-wise difference: `a -= b`.
pub fn sub_assign<ElT: Scalar>(
    a: &mut Tensor<'_, ElT>,
    b: &Tensor<'_, ElT>,
) -> Result<(), TensorError> {
    apply_binary_inplace(a, b, |x, y| x - y)
}

/// Hadamard (element-wise) product.
pub fn hadamard<ElT: Scalar>(
    a: &Tensor<'_, ElT>,
    b: &Tensor<'_, ElT>,
) -> Result<Tensor<'static, ElT>, TensorError> {
    apply_binary(a, b, |x, y| x * y)
}

/// In-place Hadamard product: `a[i] *= b[i]`.
pub fn hadamard_assign<ElT: Scalar>(
    a: &mut Tensor<'_, ElT>,
    b: &Tensor<'_, ElT>,
) -> Result<(), TensorError> {
    apply_binary_inplace(a, b, |x, y| x * y)
}

/// Flip the sign of every element, returning a new tensor.
pub fn neg<ElT: Scalar>(tensor: &Tensor<'_, ElT>) -> Tensor<'static, ElT> {
    apply(tensor, |x| -x)
}

/// Flip the sign of every element in place.
pub fn neg_inplace<ElT: Scalar>(tensor: &mut Tensor<'_, ElT>) {
    apply_inplace(tensor, |x| -x);
}

/// Multiply every element by a scalar, returning a new tensor.
pub fn scale<ElT: Scalar>(tensor: &Tensor<'_, ElT>, alpha: ElT) -> Tensor<'static, ElT> {
    apply(tensor, |x| x * alpha)
}

/// Multiply every element by a scalar in place.
pub fn scale_inplace<ElT: Scalar>(tensor: &mut Tensor<'_, ElT>, alpha: ElT) {
    apply_inplace(tensor, |x| x * alpha);
}

/// Divide every element by a scalar, returning a new tensor.
pub fn scale_div<ElT: Scalar>(tensor: &Tensor<'_, ElT>, alpha: ElT) -> Tensor<'static, ElT> {
    apply(tensor, |x| x / alpha)
}

/// Divide every element by a scalar in place.
pub fn scale_div_inplace<ElT: Scalar>(tensor: &mut Tensor<'_, ElT>, alpha: ElT) {
    apply_inplace(tensor, |x| x / alpha);
}

/// Element-wise complex conjugation; a copy for real tensors.
pub fn conj<ElT: Scalar>(tensor: &Tensor<'_, ElT>) -> Tensor<'static, ElT> {
    apply(tensor, |x| math_utils::conj(&x))
}

/// Squared Frobenius norm, `sum(|x|^2)`.
pub fn norm_sqr<ElT: Scalar>(tensor: &Tensor<'_, ElT>) -> <ElT as Scalar>::Real {
    let mut sum = <ElT as Scalar>::Real::zero();
    for &x in tensor.data() {
        sum += x.abs_sqr();
    }
    sum
}

/// Frobenius norm, `sqrt(sum(|x|^2))`.
///
/// # Examples
///
/// ```
/// use tenalg::Tensor;
/// use tenalg::operations::norm;
///
/// let t = Tensor::from_vec(vec![3.0, 4.0], &[2]).unwrap();
/// assert!((norm(&t) - 5.0).abs() < 1e-12);
/// ```
pub fn norm<ElT: Scalar>(tensor: &Tensor<'_, ElT>) -> <ElT as Scalar>::Real {
    RealScalar::sqrt(norm_sqr(tensor))
}
