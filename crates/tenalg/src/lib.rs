//! tenalg - dense n-dimensional tensor algebra
//!
//! This crate provides a row-major dense tensor type of runtime rank,
//! together with the algebra built on top of it: element-wise operations,
//! outer and contracted products, border-aware convolution, grid
//! resampling, a mixed-radix FFT for complex tensors, and rank-2/rank-1
//! specializations (matrix product, in-place transpose, inverse,
//! determinant, cross product).
//!
//! # Architecture
//!
//! ```text
//! strides   index math shared by everything else
//! storage   owned buffer or mutable view over caller memory
//! tensor    shape + strides + storage, element access
//! operations, fft, matrix, vector
//!           the algebra, generic over Scalar (f64, c64)
//! backend   zero-copy bridge to faer for the GEMM paths
//! ```
//!
//! # Example
//!
//! ```
//! use tenalg::{operations, Tensor};
//!
//! // Owned tensors allocate; views borrow caller memory in place.
//! let mut t: Tensor<f64> = Tensor::zeros(&[2, 3]);
//! t.set(&[0, 1], 5.0).unwrap();
//! assert_eq!(t.get(&[0, 1]), Some(&5.0));
//!
//! // Data is row-major: the last index varies fastest.
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let t2: Tensor<f64> = Tensor::from_vec(data, &[2, 3]).unwrap();
//! assert_eq!(t2.get(&[1, 0]), Some(&4.0));
//!
//! let sum = operations::add(&t, &t2).unwrap();
//! assert_eq!(sum.get(&[0, 1]), Some(&7.0));
//! ```

pub mod backend;
pub mod error;
pub mod fft;
pub mod matrix;
pub mod operations;
pub mod random;
pub mod scalar;
pub mod storage;
pub mod strides;
pub mod tensor;
pub mod vector;

pub use error::TensorError;
pub use operations::{BorderMode, Interpolation};
pub use random::{RandomNormal, RandomUniform};
pub use scalar::{c64, RealScalar, Scalar};
pub use storage::Storage;
pub use tensor::{Tensor, TensorView};
