//! Zero-copy conversion between tensors and faer matrices.
//!
//! Tensors store data row-major, so any tensor whose length factors as
//! `rows * cols` can be viewed as a row-major faer matrix without copying.
//! This is what backs the GEMM paths of the contracted product and the
//! rank-2 matrix product.

use faer::{MatMut, MatRef};

use crate::scalar::Scalar;
use crate::tensor::Tensor;

/// Extension trait for viewing tensor data as faer matrices (zero-copy).
pub trait AsFaerMat<T: Scalar> {
    /// View the flat buffer as an immutable `rows x cols` row-major matrix.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols != len()`.
    fn as_faer_mat(&self, rows: usize, cols: usize) -> MatRef<'_, T>;

    /// View the flat buffer as a mutable `rows x cols` row-major matrix.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols != len()`.
    fn as_faer_mat_mut(&mut self, rows: usize, cols: usize) -> MatMut<'_, T>;
}

impl<T: Scalar> AsFaerMat<T> for Tensor<'_, T> {
    fn as_faer_mat(&self, rows: usize, cols: usize) -> MatRef<'_, T> {
        assert_eq!(
            rows * cols,
            self.len(),
            "matrix view {rows}x{cols} must match tensor size {}",
            self.len()
        );
        MatRef::from_row_major_slice(self.data(), rows, cols)
    }

    fn as_faer_mat_mut(&mut self, rows: usize, cols: usize) -> MatMut<'_, T> {
        assert_eq!(
            rows * cols,
            self.len(),
            "matrix view {rows}x{cols} must match tensor size {}",
            self.len()
        );
        MatMut::from_row_major_slice_mut(self.data_mut(), rows, cols)
    }
}
