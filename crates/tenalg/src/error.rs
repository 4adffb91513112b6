//! Error types for tenalg.

use thiserror::Error;

/// Errors that can occur in tensor operations.
#[derive(Debug, Error)]
pub enum TensorError {
    /// Shape mismatch between data length and expected size.
    #[error("shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Two operands have incompatible per-axis sizes.
    #[error("incompatible shapes: {left:?} vs {right:?}")]
    IncompatibleShapes { left: Vec<usize>, right: Vec<usize> },

    /// A tensor was constructed with a zero-sized axis.
    #[error("axis {axis} has size 0; every axis of a tensor must be non-empty")]
    ZeroAxis { axis: usize },

    /// Index out of bounds.
    #[error("index out of bounds: index {index} is out of range for dimension {dim_size}")]
    IndexOutOfBounds { index: usize, dim_size: usize },

    /// Wrong number of indices provided.
    #[error("wrong number of indices: expected {expected}, got {actual}")]
    WrongNumberOfIndices { expected: usize, actual: usize },

    /// Operation requires specific tensor rank.
    #[error("expected tensor of rank {expected}, got rank {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// Axis argument out of range for the tensor's rank.
    #[error("axis {axis} out of range for tensor of rank {rank}")]
    AxisOutOfBounds { axis: usize, rank: usize },

    /// Axis contraction called with an invalid axis pair.
    #[error("cannot contract axes {i} and {j}: sizes {size_i} and {size_j} differ")]
    ContractionSizeMismatch {
        i: usize,
        j: usize,
        size_i: usize,
        size_j: usize,
    },

    /// Convolution kernel axis is even-sized or larger than the source axis.
    #[error(
        "invalid kernel: axis {axis} has size {kernel_size}, \
         needs an odd size of at most {source_size}"
    )]
    InvalidKernel {
        axis: usize,
        kernel_size: usize,
        source_size: usize,
    },

    /// Matrix must be square.
    #[error("matrix must be square: got {rows}x{cols}")]
    NotSquareMatrix { rows: usize, cols: usize },

    /// Gauss-Jordan inversion found no usable pivot.
    #[error("the matrix cannot be inverted")]
    SingularMatrix,
}
