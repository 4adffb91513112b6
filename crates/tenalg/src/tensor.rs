//! N-dimensional dense tensor with owned or borrowed storage.
//!
//! A `Tensor` is a shape, row-major strides, and a contiguous buffer. The
//! buffer is either owned (`Tensor<'static, T>`, the common case) or a view
//! borrowing caller memory in place, see [`Storage`].

use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::storage::Storage;
use crate::strides::{cartesian_to_linear, compute_strides, positions, Dims, Positions};
use smallvec::SmallVec;

/// A dense n-dimensional tensor in row-major order.
///
/// The rank is a runtime value: `shape().len()`. An empty shape denotes a
/// scalar tensor holding exactly one element.
#[derive(Debug)]
pub struct Tensor<'a, ElT: Scalar> {
    storage: Storage<'a, ElT>,
    shape: Dims,
    strides: Dims,
}

/// A tensor borrowing caller-owned memory; see [`Tensor::from_slice_mut`].
/// Owned tensors are simply `Tensor<'static, ElT>`.
pub type TensorView<'a, ElT> = Tensor<'a, ElT>;

fn checked_dims(shape: &[usize]) -> Result<Dims, TensorError> {
    for (axis, &dim) in shape.iter().enumerate() {
        if dim == 0 {
            return Err(TensorError::ZeroAxis { axis });
        }
    }
    Ok(SmallVec::from_slice(shape))
}

impl<ElT: Scalar> Tensor<'static, ElT> {
    /// Create an owned tensor with the given shape, zero-initialized.
    ///
    /// # Panics
    ///
    /// Panics if any axis has size 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenalg::Tensor;
    ///
    /// let t: Tensor<f64> = Tensor::zeros(&[2, 3, 4]);
    /// assert_eq!(t.shape(), &[2, 3, 4]);
    /// assert_eq!(t.len(), 24);
    /// assert_eq!(t.strides(), &[12, 4, 1]);
    /// ```
    pub fn zeros(shape: &[usize]) -> Self {
        assert!(
            shape.iter().all(|&d| d > 0),
            "every axis of a tensor must be non-empty, got {shape:?}"
        );
        let len: usize = shape.iter().product();
        Self {
            storage: Storage::zeros(len.max(1)), // len 1 for the rank-0 scalar
            shape: SmallVec::from_slice(shape),
            strides: compute_strides(shape),
        }
    }

    /// Create an owned tensor filled with ones.
    pub fn ones(shape: &[usize]) -> Self {
        Self::full(shape, ElT::one())
    }

    /// Create an owned tensor filled with a value.
    ///
    /// # Panics
    ///
    /// Panics if any axis has size 0.
    pub fn full(shape: &[usize], value: ElT) -> Self {
        let mut t = Self::zeros(shape);
        t.fill(value);
        t
    }

    /// Create a tensor from flat data in row-major order.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the data length does not match the shape,
    /// `ZeroAxis` if any axis has size 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenalg::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// assert_eq!(t.get(&[0, 0]), Some(&1.0));
    /// assert_eq!(t.get(&[0, 1]), Some(&2.0)); // row-major: last axis fastest
    /// assert_eq!(t.get(&[1, 0]), Some(&4.0));
    /// ```
    pub fn from_vec(data: Vec<ElT>, shape: &[usize]) -> Result<Self, TensorError> {
        let shape = checked_dims(shape)?;
        let expected: usize = shape.iter().product::<usize>().max(1);
        if data.len() != expected {
            return Err(TensorError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let strides = compute_strides(&shape);
        Ok(Self {
            storage: Storage::Owned(data),
            shape,
            strides,
        })
    }

    /// Create a tensor by evaluating a function at every index vector.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenalg::Tensor;
    ///
    /// let t = Tensor::from_fn(&[2, 2], |ix| (ix[0] * 10 + ix[1]) as f64);
    /// assert_eq!(t.get(&[1, 1]), Some(&11.0));
    /// ```
    pub fn from_fn<F>(shape: &[usize], mut f: F) -> Self
    where
        F: FnMut(&[usize]) -> ElT,
    {
        let mut t = Self::zeros(shape);
        for pos in positions(shape) {
            t.data_mut()[pos.linear] = f(&pos.indices);
        }
        t
    }
}

impl<'a, ElT: Scalar> Tensor<'a, ElT> {
    /// Wrap caller-owned memory as a tensor view, in place.
    ///
    /// No copy is made: reads and writes go straight through to `data`,
    /// which must hold exactly `shape.iter().product()` elements laid out
    /// row-major. The borrow checker keeps the view from outliving the
    /// buffer.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the buffer length does not match the
    /// shape, `ZeroAxis` if any axis has size 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenalg::Tensor;
    ///
    /// let mut pixels = vec![0.0_f64; 6];
    /// {
    ///     let mut view = Tensor::from_slice_mut(&mut pixels, &[2, 3]).unwrap();
    ///     view.set(&[1, 2], 255.0).unwrap();
    /// }
    /// assert_eq!(pixels[5], 255.0);
    /// ```
    pub fn from_slice_mut(data: &'a mut [ElT], shape: &[usize]) -> Result<Self, TensorError> {
        let shape = checked_dims(shape)?;
        let expected: usize = shape.iter().product::<usize>().max(1);
        if data.len() != expected {
            return Err(TensorError::ShapeMismatch {
                expected,
                actual: data.len(),
            });
        }
        let strides = compute_strides(&shape);
        Ok(Self {
            storage: Storage::Borrowed(data),
            shape,
            strides,
        })
    }

    /// Per-axis sizes.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Rank (number of axes).
    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Row-major strides.
    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Whether this tensor borrows external memory.
    #[inline]
    pub fn is_view(&self) -> bool {
        self.storage.is_borrowed()
    }

    /// Flat data in row-major order.
    #[inline]
    pub fn data(&self) -> &[ElT] {
        self.storage.as_slice()
    }

    /// Mutable flat data in row-major order.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [ElT] {
        self.storage.as_mut_slice()
    }

    /// Get element by flat offset.
    #[inline]
    pub fn get_linear(&self, i: usize) -> Option<&ElT> {
        self.storage.as_slice().get(i)
    }

    /// Get mutable element by flat offset.
    #[inline]
    pub fn get_linear_mut(&mut self, i: usize) -> Option<&mut ElT> {
        self.storage.as_mut_slice().get_mut(i)
    }

    fn linear_of(&self, indices: &[usize]) -> Option<usize> {
        if indices.len() != self.rank() {
            return None;
        }
        for (&idx, &dim) in indices.iter().zip(self.shape.iter()) {
            if idx >= dim {
                return None;
            }
        }
        Some(cartesian_to_linear(indices, &self.strides))
    }

    /// Get element by index vector.
    ///
    /// Returns `None` on out-of-bounds or wrong arity.
    pub fn get(&self, indices: &[usize]) -> Option<&ElT> {
        let linear = self.linear_of(indices)?;
        self.get_linear(linear)
    }

    /// Get mutable element by index vector.
    pub fn get_mut(&mut self, indices: &[usize]) -> Option<&mut ElT> {
        let linear = self.linear_of(indices)?;
        self.get_linear_mut(linear)
    }

    /// Set element by index vector.
    ///
    /// # Errors
    ///
    /// Returns an error on out-of-bounds or wrong arity.
    pub fn set(&mut self, indices: &[usize], value: ElT) -> Result<(), TensorError> {
        if indices.len() != self.rank() {
            return Err(TensorError::WrongNumberOfIndices {
                expected: self.rank(),
                actual: indices.len(),
            });
        }
        for (&idx, &dim) in indices.iter().zip(self.shape.iter()) {
            if idx >= dim {
                return Err(TensorError::IndexOutOfBounds {
                    index: idx,
                    dim_size: dim,
                });
            }
        }
        let linear = cartesian_to_linear(indices, &self.strides);
        self.storage.as_mut_slice()[linear] = value;
        Ok(())
    }

    /// Fill every element with a value.
    pub fn fill(&mut self, value: ElT) {
        for x in self.storage.as_mut_slice() {
            *x = value;
        }
    }

    /// Swap in a new shape over the same buffer, recomputing strides.
    /// The element count must be unchanged.
    pub(crate) fn replace_shape(&mut self, shape: &[usize]) {
        debug_assert_eq!(shape.iter().product::<usize>().max(1), self.len());
        self.shape = SmallVec::from_slice(shape);
        self.strides = compute_strides(shape);
    }

    /// Enumerate every index vector of this tensor in row-major order.
    pub fn positions(&self) -> Positions<'_> {
        positions(&self.shape)
    }

    /// Deep copy into an owned tensor, even when `self` is a view.
    pub fn to_owned_tensor(&self) -> Tensor<'static, ElT> {
        Tensor {
            storage: self.storage.to_owned(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        }
    }

    /// Reinterpret the elements under a new shape of equal total size.
    ///
    /// Storage is shape-immutable once constructed, so this allocates a new
    /// owned tensor rather than mutating in place.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the element counts differ, `ZeroAxis` if
    /// any new axis has size 0.
    pub fn reshape(&self, new_shape: &[usize]) -> Result<Tensor<'static, ElT>, TensorError> {
        let new_shape = checked_dims(new_shape)?;
        let new_len: usize = new_shape.iter().product::<usize>().max(1);
        if new_len != self.len() {
            return Err(TensorError::ShapeMismatch {
                expected: self.len(),
                actual: new_len,
            });
        }
        let strides = compute_strides(&new_shape);
        Ok(Tensor {
            storage: self.storage.to_owned(),
            shape: new_shape,
            strides,
        })
    }
}

/// Cloning always deep-copies into owned storage, even from a view.
impl<'a, ElT: Scalar> Clone for Tensor<'a, ElT> {
    fn clone(&self) -> Self {
        Tensor {
            storage: self.storage.to_owned(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        }
    }
}

/// Equal rank, equal per-axis sizes, and element-wise equality.
impl<'a, 'b, ElT: Scalar> PartialEq<Tensor<'b, ElT>> for Tensor<'a, ElT> {
    fn eq(&self, other: &Tensor<'b, ElT>) -> bool {
        self.shape == other.shape && self.data() == other.data()
    }
}

impl<ElT: Scalar> std::ops::Index<&[usize]> for Tensor<'_, ElT> {
    type Output = ElT;

    /// # Panics
    ///
    /// Panics on out-of-bounds or wrong arity; use [`Tensor::get`] for the
    /// checked form.
    fn index(&self, indices: &[usize]) -> &ElT {
        self.get(indices)
            .unwrap_or_else(|| panic!("index {indices:?} out of bounds for shape {:?}", self.shape))
    }
}

impl<ElT: Scalar> std::ops::IndexMut<&[usize]> for Tensor<'_, ElT> {
    fn index_mut(&mut self, indices: &[usize]) -> &mut ElT {
        let shape = self.shape.clone();
        self.get_mut(indices)
            .unwrap_or_else(|| panic!("index {indices:?} out of bounds for shape {shape:?}"))
    }
}
