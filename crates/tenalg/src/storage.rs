//! Backing storage for tensor data.
//!
//! A tensor either owns its buffer outright or borrows caller-owned memory
//! in place (a "view", e.g. a tensor wrapped around an image's pixel
//! buffer). The sum type makes the non-owning case impossible to free and
//! lets the borrow checker enforce that a view never outlives the memory it
//! aliases.

use crate::scalar::Scalar;

/// Contiguous element storage, owned or borrowed.
#[derive(Debug)]
pub enum Storage<'a, T: Scalar> {
    /// Heap-allocated buffer owned by the tensor.
    Owned(Vec<T>),
    /// Externally-owned memory reinterpreted in place.
    Borrowed(&'a mut [T]),
}

impl<T: Scalar> Storage<'_, T> {
    /// Create owned storage with the given length, zero-initialized.
    pub fn zeros(len: usize) -> Storage<'static, T> {
        Storage::Owned(vec![T::zero(); len])
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Storage::Owned(data) => data.len(),
            Storage::Borrowed(data) => data.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this storage borrows external memory.
    #[inline]
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Storage::Borrowed(_))
    }

    /// Get immutable slice of data.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match self {
            Storage::Owned(data) => data,
            Storage::Borrowed(data) => data,
        }
    }

    /// Get mutable slice of data.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            Storage::Owned(data) => data,
            Storage::Borrowed(data) => data,
        }
    }

    /// Copy into owned storage; a deep copy even for the borrowed case.
    pub fn to_owned(&self) -> Storage<'static, T> {
        Storage::Owned(self.as_slice().to_vec())
    }
}
