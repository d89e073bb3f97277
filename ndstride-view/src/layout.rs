//! Stride math for row-major layouts.
//!
//! Pure functions mapping between multi-dimensional coordinates and flat buffer
//! offsets, plus the [`MultiIndex`] odometer the kernels iterate with.

use smallvec::SmallVec;

use crate::{ArrayError, Result};

/// Inline storage for dims, strides and coordinates; ranks above 8 spill to the heap.
pub type Coords = SmallVec<[usize; 8]>;

/// Number of elements described by `dims` (the empty product is 1).
///
/// Saturates at `usize::MAX` when the product overflows; no buffer can hold that many
/// elements, so allocating from the result fails instead of silently shrinking.
#[inline]
pub fn numel(dims: &[usize]) -> usize {
    checked_numel(dims).unwrap_or(usize::MAX)
}

/// Number of elements described by `dims`, or `None` if the product overflows `usize`.
pub fn checked_numel(dims: &[usize]) -> Option<usize> {
    if dims.contains(&0) {
        return Some(0);
    }
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

/// Compute row-major strides (C default: last index varies fastest).
pub fn row_major_strides(dims: &[usize]) -> Coords {
    let rank = dims.len();
    if rank == 0 {
        return Coords::new();
    }
    let mut strides: Coords = smallvec::smallvec![1usize; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * dims[i + 1];
    }
    strides
}

/// Map coordinates to a flat offset: `sum(indices[i] * strides[i])`.
///
/// No bounds checking against a shape happens here; that is the caller's job.
pub fn coordinates_to_offset(indices: &[usize], strides: &[usize]) -> Result<usize> {
    if indices.len() != strides.len() {
        return Err(ArrayError::RankMismatch(indices.len(), strides.len()));
    }
    Ok(indices
        .iter()
        .zip(strides.iter())
        .map(|(&i, &s)| i * s)
        .sum())
}

/// Inverse of [`coordinates_to_offset`] for a contiguous row-major shape.
///
/// Axes are peeled from last to first with `offset % extent` and `offset / extent`.
/// An axis of extent 0 has no valid coordinate and reports 0.
pub fn offset_to_coordinates(offset: usize, dims: &[usize]) -> Coords {
    let mut coords: Coords = smallvec::smallvec![0usize; dims.len()];
    let mut rest = offset;
    for axis in (0..dims.len()).rev() {
        coords[axis] = rest.checked_rem(dims[axis]).unwrap_or(0);
        rest = rest.checked_div(dims[axis]).unwrap_or(0);
    }
    coords
}

/// Iterator over multi-dimensional index tuples within given dimensions.
///
/// Iterates in row-major order (last index varies fastest). A rank-0 shape yields one
/// empty index; a shape with a zero extent yields nothing.
#[derive(Debug, Clone)]
pub struct MultiIndex {
    dims: Coords,
    current: Coords,
    total: usize,
    count: usize,
}

impl MultiIndex {
    pub fn new(dims: &[usize]) -> Self {
        Self {
            dims: Coords::from_slice(dims),
            current: smallvec::smallvec![0; dims.len()],
            total: numel(dims),
            count: 0,
        }
    }

    /// Coordinates of the current position.
    #[inline]
    pub fn current(&self) -> &[usize] {
        &self.current
    }

    /// Offset of the current position under `strides`.
    #[inline]
    pub fn offset(&self, strides: &[usize]) -> usize {
        self.current
            .iter()
            .zip(strides.iter())
            .map(|(&i, &s)| i * s)
            .sum()
    }

    /// Reset the iterator to the beginning.
    pub fn reset(&mut self) {
        self.current.fill(0);
        self.count = 0;
    }
}

impl Iterator for MultiIndex {
    type Item = ();

    fn next(&mut self) -> Option<()> {
        if self.count >= self.total {
            return None;
        }
        if self.count > 0 {
            for i in (0..self.dims.len()).rev() {
                self.current[i] += 1;
                if self.current[i] < self.dims[i] {
                    break;
                }
                self.current[i] = 0;
            }
        }
        self.count += 1;
        Some(())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total - self.count;
        (left, Some(left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_numel_overflow() {
        assert_eq!(checked_numel(&[]), Some(1));
        assert_eq!(checked_numel(&[3, 0, 5]), Some(0));
        assert_eq!(checked_numel(&[2, 3, 4]), Some(24));
        assert_eq!(checked_numel(&[usize::MAX, 2]), None);
        assert_eq!(checked_numel(&[1 << 63, 2]), None);
        // a zero extent anywhere wins over an overflowing prefix
        assert_eq!(checked_numel(&[usize::MAX, 2, 0]), Some(0));
        assert_eq!(numel(&[usize::MAX, 2]), usize::MAX);
    }

    #[test]
    fn test_row_major_strides() {
        assert_eq!(row_major_strides(&[]).as_slice(), &[] as &[usize]);
        assert_eq!(row_major_strides(&[7]).as_slice(), &[1]);
        assert_eq!(row_major_strides(&[3, 4]).as_slice(), &[4, 1]);
        assert_eq!(row_major_strides(&[2, 3, 4]).as_slice(), &[12, 4, 1]);
        assert_eq!(row_major_strides(&[2, 0, 4]).as_slice(), &[0, 4, 1]);
    }

    #[test]
    fn test_row_major_strides_recurrence() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let rank = rng.gen_range(2..7);
            let dims: Vec<usize> = (0..rank).map(|_| rng.gen_range(1..6)).collect();
            let strides = row_major_strides(&dims);
            assert_eq!(strides[rank - 1], 1);
            for i in 0..rank - 1 {
                assert_eq!(strides[i], dims[i + 1] * strides[i + 1]);
            }
        }
    }

    #[test]
    fn test_coordinates_to_offset() {
        assert_eq!(coordinates_to_offset(&[3], &[1]).unwrap(), 3);
        assert_eq!(coordinates_to_offset(&[1, 1], &[3, 1]).unwrap(), 4);
        assert_eq!(coordinates_to_offset(&[1, 2, 1], &[6, 2, 1]).unwrap(), 11);
        assert_eq!(
            coordinates_to_offset(&[1, 3, 2, 1], &[24, 8, 2, 1]).unwrap(),
            53
        );
        assert_eq!(coordinates_to_offset(&[0, 0], &[3, 1]).unwrap(), 0);
        assert_eq!(coordinates_to_offset(&[0, 0], &[1, 1]).unwrap(), 0);
        assert_eq!(coordinates_to_offset(&[], &[]).unwrap(), 0);
    }

    #[test]
    fn test_coordinates_to_offset_rank_mismatch() {
        assert_eq!(
            coordinates_to_offset(&[1, 2], &[1]),
            Err(ArrayError::RankMismatch(2, 1))
        );
    }

    #[test]
    fn test_offset_to_coordinates() {
        assert_eq!(offset_to_coordinates(2, &[5]).as_slice(), &[2]);
        assert_eq!(offset_to_coordinates(3, &[3, 4]).as_slice(), &[0, 3]);
        assert_eq!(offset_to_coordinates(4, &[3, 4]).as_slice(), &[1, 0]);
        assert_eq!(offset_to_coordinates(11, &[3, 4]).as_slice(), &[2, 3]);
        assert_eq!(offset_to_coordinates(7, &[2, 3, 2]).as_slice(), &[1, 0, 1]);
        assert_eq!(
            offset_to_coordinates(17, &[2, 2, 3, 2]).as_slice(),
            &[1, 0, 2, 1]
        );
        assert_eq!(
            offset_to_coordinates(0, &[1, 1, 1, 1]).as_slice(),
            &[0, 0, 0, 0]
        );
        assert!(offset_to_coordinates(0, &[]).is_empty());
    }

    #[test]
    fn test_offset_to_coordinates_zero_extent() {
        assert_eq!(offset_to_coordinates(0, &[2, 0]).as_slice(), &[0, 0]);
    }

    #[test]
    fn test_offset_round_trip() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let rank = rng.gen_range(1..6);
            let dims: Vec<usize> = (0..rank).map(|_| rng.gen_range(1..5)).collect();
            let strides = row_major_strides(&dims);
            for p in 0..numel(&dims) {
                let coords = offset_to_coordinates(p, &dims);
                assert_eq!(coordinates_to_offset(&coords, &strides).unwrap(), p);
            }
        }
    }

    #[test]
    fn test_multi_index_2d() {
        let mut iter = MultiIndex::new(&[2, 3]);
        let mut indices = vec![];
        while iter.next().is_some() {
            indices.push(iter.current().to_vec());
        }
        assert_eq!(
            indices,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 1],
                vec![1, 2],
            ]
        );
    }

    #[test]
    fn test_multi_index_offset() {
        let mut iter = MultiIndex::new(&[2, 3]);
        let strides = [1, 2]; // column-major strides
        let mut offsets = vec![];
        while iter.next().is_some() {
            offsets.push(iter.offset(&strides));
        }
        assert_eq!(offsets, vec![0, 2, 4, 1, 3, 5]);
    }

    #[test]
    fn test_multi_index_scalar_and_empty() {
        let mut scalar = MultiIndex::new(&[]);
        assert!(scalar.next().is_some());
        assert!(scalar.next().is_none());

        let mut empty = MultiIndex::new(&[3, 0]);
        assert!(empty.next().is_none());
    }

    #[test]
    fn test_multi_index_reset() {
        let mut iter = MultiIndex::new(&[2, 2]);
        assert_eq!(iter.by_ref().count(), 4);
        iter.reset();
        assert_eq!(iter.size_hint(), (4, Some(4)));
        assert!(iter.next().is_some());
        assert_eq!(iter.current(), &[0, 0]);
    }
}
