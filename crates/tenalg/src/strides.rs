//! Stride computation and flat-offset <-> index-vector mapping.
//!
//! Uses row-major (C) order: the last axis varies fastest.

use smallvec::SmallVec;

/// Shape, stride, and index vectors; inline up to rank 4.
pub type Dims = SmallVec<[usize; 4]>;

/// Compute row-major strides from shape.
///
/// For shape [d0, d1, d2], returns strides [d1*d2, d2, 1].
///
/// # Examples
///
/// ```
/// use tenalg::strides::compute_strides;
///
/// assert_eq!(compute_strides(&[3, 4, 5]).as_slice(), &[20, 5, 1]);
/// assert_eq!(compute_strides(&[2, 3]).as_slice(), &[3, 1]);
/// assert_eq!(compute_strides(&[5]).as_slice(), &[1]);
/// assert!(compute_strides(&[]).is_empty());
/// ```
pub fn compute_strides(shape: &[usize]) -> Dims {
    let mut strides: Dims = SmallVec::from_elem(1, shape.len());
    let mut stride = 1;
    for (k, &dim) in shape.iter().enumerate().rev() {
        strides[k] = stride;
        stride *= dim;
    }
    strides
}

/// Convert an index vector to a flat offset using row-major strides.
#[inline]
pub fn cartesian_to_linear(indices: &[usize], strides: &[usize]) -> usize {
    indices
        .iter()
        .zip(strides.iter())
        .map(|(&idx, &stride)| idx * stride)
        .sum()
}

/// Convert a flat offset to an index vector using row-major order.
///
/// Inverse of [`cartesian_to_linear`] for any offset in `[0, len)`.
pub fn linear_to_cartesian(mut linear: usize, shape: &[usize]) -> Dims {
    let mut indices: Dims = SmallVec::from_elem(0, shape.len());
    for (k, &dim) in shape.iter().enumerate().rev() {
        indices[k] = linear % dim;
        linear /= dim;
    }
    indices
}

/// A cursor into a shape: an index vector together with its flat offset.
///
/// Produced by [`positions`]. Two positions are equal only when both the
/// index vector and the flat offset agree, so cursors from differently
/// shaped iterations never compare equal by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub indices: Dims,
    pub linear: usize,
}

/// Row-major enumeration of every index vector of a shape.
///
/// Runs the odometer algorithm: each step increments the last axis and
/// carries into slower axes on overflow, so the flat offset advances by
/// exactly one per step. The iterator is restartable from the start but not
/// resumable mid-stream.
///
/// Iterator equality compares the shape along with the cursor, so iterators
/// over different shapes never compare equal even when their flat offsets
/// happen to coincide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positions<'a> {
    shape: &'a [usize],
    next: Option<Position>,
}

/// Enumerate a shape in row-major order, starting at all-zeros.
///
/// # Examples
///
/// ```
/// use tenalg::strides::positions;
///
/// let all: Vec<_> = positions(&[2, 2]).collect();
/// assert_eq!(all.len(), 4);
/// assert_eq!(all[0].indices.as_slice(), &[0, 0]);
/// assert_eq!(all[3].indices.as_slice(), &[1, 1]);
/// assert_eq!(all[3].linear, 3);
/// ```
pub fn positions(shape: &[usize]) -> Positions<'_> {
    let start = if shape.iter().any(|&d| d == 0) {
        None
    } else {
        Some(Position {
            indices: SmallVec::from_elem(0, shape.len()),
            linear: 0,
        })
    };
    Positions { shape, next: start }
}

impl Iterator for Positions<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let current = self.next.take()?;

        // Advance the odometer; exhaustion leaves indices[0] == shape[0].
        if !self.shape.is_empty() {
            let mut next = current.clone();
            next.linear += 1;
            for axis in (0..self.shape.len()).rev() {
                next.indices[axis] += 1;
                if next.indices[axis] < self.shape[axis] {
                    self.next = Some(next);
                    break;
                }
                if axis == 0 {
                    break;
                }
                next.indices[axis] = 0;
            }
        }

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_strides_3d() {
        assert_eq!(compute_strides(&[3, 4, 5]).as_slice(), &[20, 5, 1]);
    }

    #[test]
    fn test_compute_strides_1d() {
        assert_eq!(compute_strides(&[7]).as_slice(), &[1]);
    }

    #[test]
    fn test_cartesian_to_linear() {
        let strides = compute_strides(&[2, 3, 4]);
        assert_eq!(cartesian_to_linear(&[0, 0, 0], &strides), 0);
        assert_eq!(cartesian_to_linear(&[0, 0, 1], &strides), 1);
        assert_eq!(cartesian_to_linear(&[0, 1, 0], &strides), 4);
        assert_eq!(cartesian_to_linear(&[1, 0, 0], &strides), 12);
        assert_eq!(cartesian_to_linear(&[1, 2, 3], &strides), 23);
    }

    #[test]
    fn test_roundtrip_bijection() {
        let shape = [3, 2, 5];
        let strides = compute_strides(&shape);
        for linear in 0..30 {
            let ix = linear_to_cartesian(linear, &shape);
            assert_eq!(cartesian_to_linear(&ix, &strides), linear);
        }
    }

    #[test]
    fn test_positions_order_and_count() {
        let shape = [2, 3];
        let collected: Vec<_> = positions(&shape).collect();
        assert_eq!(collected.len(), 6);
        for (expected_linear, pos) in collected.iter().enumerate() {
            assert_eq!(pos.linear, expected_linear);
            assert_eq!(
                pos.indices,
                linear_to_cartesian(expected_linear, &shape)
            );
        }
    }

    #[test]
    fn test_positions_last_axis_fastest() {
        let mut it = positions(&[2, 2]);
        assert_eq!(it.next().unwrap().indices.as_slice(), &[0, 0]);
        assert_eq!(it.next().unwrap().indices.as_slice(), &[0, 1]);
        assert_eq!(it.next().unwrap().indices.as_slice(), &[1, 0]);
        assert_eq!(it.next().unwrap().indices.as_slice(), &[1, 1]);
        assert!(it.next().is_none());
    }

    #[test]
    fn test_positions_scalar_shape() {
        // Rank 0: a single position, the empty index vector.
        let collected: Vec<_> = positions(&[]).collect();
        assert_eq!(collected.len(), 1);
        assert!(collected[0].indices.is_empty());
        assert_eq!(collected[0].linear, 0);
    }

    #[test]
    fn test_iterator_equality_includes_shape() {
        // After one step both cursors sit at indices [0, 1], offset 1, but
        // they walk different shapes and must not compare equal.
        let mut narrow = positions(&[2, 2]);
        let mut wide = positions(&[2, 3]);
        narrow.next();
        wide.next();
        assert_ne!(narrow, wide);

        let mut same = positions(&[2, 2]);
        same.next();
        assert_eq!(narrow, same);
    }

    #[test]
    fn test_position_equality_needs_both_fields() {
        let a = Position {
            indices: Dims::from_slice(&[0, 1]),
            linear: 1,
        };
        let b = Position {
            indices: Dims::from_slice(&[0, 1]),
            linear: 3,
        };
        assert_ne!(a, b);
    }
}
