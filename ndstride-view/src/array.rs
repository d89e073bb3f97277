//! Owned N-dimensional array.
//!
//! [`NdArray`] owns a flat buffer together with its dims and strides. Arrays built by
//! [`NdArray::new`] are row-major contiguous; [`NdArray::from_parts`] and
//! [`NdArray::permuted`] produce other layouts over an owned buffer.

use std::ops::{Index, IndexMut};

use crate::layout::{checked_numel, numel, row_major_strides, Coords, MultiIndex};
use crate::{ArrayError, Result};

// ============================================================================
// Validation helpers
// ============================================================================

/// Validate that every offset reachable through `(dims, strides)` stays within `[0, len)`.
fn validate_bounds(len: usize, dims: &[usize], strides: &[usize]) -> Result<()> {
    if dims.len() != strides.len() {
        return Err(ArrayError::RankMismatch(strides.len(), dims.len()));
    }
    // Empty array - no access needed
    if dims.iter().any(|&d| d == 0) {
        return Ok(());
    }
    let mut max_offset = 0usize;
    for (&dim, &stride) in dims.iter().zip(strides.iter()) {
        if dim > 1 {
            let end = stride
                .checked_mul(dim - 1)
                .ok_or(ArrayError::OffsetOverflow)?;
            max_offset = max_offset
                .checked_add(end)
                .ok_or(ArrayError::OffsetOverflow)?;
        }
    }
    if max_offset >= len {
        return Err(ArrayError::OffsetOutOfRange {
            offset: max_offset,
            len,
        });
    }
    Ok(())
}

fn validate_len(len: usize, dims: &[usize]) -> Result<()> {
    if checked_numel(dims) != Some(len) {
        return Err(ArrayError::ShapeSizeMismatch {
            dims: dims.to_vec(),
            len,
        });
    }
    Ok(())
}

// ============================================================================
// NdArray
// ============================================================================

/// Owned strided N-dimensional array.
///
/// The buffer is never shared with another array: `clone` copies it and no view type
/// borrows it mutably from elsewhere. Dims and strides are fixed at construction.
#[derive(Clone, PartialEq)]
pub struct NdArray<T = f32> {
    data: Vec<T>,
    dims: Coords,
    strides: Coords,
}

impl<T: std::fmt::Debug> std::fmt::Debug for NdArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NdArray")
            .field("dims", &self.dims.as_slice())
            .field("strides", &self.strides.as_slice())
            .field("data", &self.data)
            .finish()
    }
}

impl<T> NdArray<T> {
    /// Create a row-major array from a flat buffer.
    ///
    /// # Errors
    /// [`ArrayError::ShapeSizeMismatch`] if `dims` does not describe exactly
    /// `data.len()` elements.
    pub fn new(data: Vec<T>, dims: &[usize]) -> Result<Self> {
        validate_len(data.len(), dims)?;
        Ok(Self {
            data,
            dims: Coords::from_slice(dims),
            strides: row_major_strides(dims),
        })
    }

    /// Create from an explicit layout.
    ///
    /// The buffer must hold exactly `numel(dims)` elements and every offset reachable
    /// through `strides` must land inside it.
    pub fn from_parts(data: Vec<T>, dims: &[usize], strides: &[usize]) -> Result<Self> {
        validate_bounds(data.len(), dims, strides)?;
        validate_len(data.len(), dims)?;
        Ok(Self {
            data,
            dims: Coords::from_slice(dims),
            strides: Coords::from_slice(strides),
        })
    }

    /// Create a row-major array with values produced by a function.
    ///
    /// The function is called with indices in row-major iteration order.
    ///
    /// # Panics
    /// If the element count of `dims` overflows `usize`.
    pub fn from_fn(dims: &[usize], mut f: impl FnMut(&[usize]) -> T) -> Self {
        let mut data = Vec::with_capacity(numel(dims));
        let mut idx = MultiIndex::new(dims);
        while idx.next().is_some() {
            data.push(f(idx.current()));
        }
        Self {
            data,
            dims: Coords::from_slice(dims),
            strides: row_major_strides(dims),
        }
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Alias of [`dims`](Self::dims).
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Number of elements in the buffer.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The flat buffer in memory order.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the array and return its buffer in memory order.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Whether the strides are the row-major contiguous strides for the dims.
    ///
    /// Rank 0 and rank 1 arrays are always contiguous.
    pub fn is_contiguous(&self) -> bool {
        if self.ndim() <= 1 {
            return true;
        }
        self.strides == row_major_strides(&self.dims)
    }

    /// Flat offset of `indices` after rank and bounds checks.
    fn checked_offset(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.ndim() {
            return Err(ArrayError::RankMismatch(indices.len(), self.ndim()));
        }
        let mut offset = 0usize;
        for (axis, (&index, (&extent, &stride))) in indices
            .iter()
            .zip(self.dims.iter().zip(self.strides.iter()))
            .enumerate()
        {
            if index >= extent {
                return Err(ArrayError::IndexOutOfBounds {
                    axis,
                    index,
                    extent,
                });
            }
            offset += index * stride;
        }
        Ok(offset)
    }

    /// Element at `indices`.
    ///
    /// # Errors
    /// [`ArrayError::RankMismatch`] when `indices.len() != ndim()`,
    /// [`ArrayError::IndexOutOfBounds`] naming the first axis whose index is too large.
    pub fn get(&self, indices: &[usize]) -> Result<&T> {
        let offset = self.checked_offset(indices)?;
        Ok(&self.data[offset])
    }

    /// Mutable element at `indices`; same checks as [`get`](Self::get).
    pub fn get_mut(&mut self, indices: &[usize]) -> Result<&mut T> {
        let offset = self.checked_offset(indices)?;
        Ok(&mut self.data[offset])
    }

    /// Overwrite the element at `indices`. Nothing is written when the checks fail.
    pub fn set(&mut self, indices: &[usize], value: T) -> Result<()> {
        *self.get_mut(indices)? = value;
        Ok(())
    }

    /// Mutable access to the single element of a rank-0 array.
    pub fn scalar_mut(&mut self) -> Result<&mut T> {
        if self.ndim() != 0 {
            return Err(ArrayError::RankMismatch(0, self.ndim()));
        }
        self.get_mut(&[])
    }

    /// Iterate over all elements in logical row-major order.
    ///
    /// For contiguous arrays this is the buffer order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            array: self,
            index: MultiIndex::new(&self.dims),
        }
    }

    /// Reorder the axes.
    ///
    /// `axes[i]` names the source axis that becomes axis `i`. The buffer is moved, not
    /// copied, so the result is generally not contiguous.
    pub fn permuted(self, axes: &[usize]) -> Result<Self> {
        let rank = self.ndim();
        if axes.len() != rank {
            return Err(ArrayError::RankMismatch(axes.len(), rank));
        }
        let mut seen = vec![false; rank];
        for &p in axes {
            if p >= rank || seen[p] {
                return Err(ArrayError::InvalidAxis { axis: p, rank });
            }
            seen[p] = true;
        }
        let dims: Coords = axes.iter().map(|&p| self.dims[p]).collect();
        let strides: Coords = axes.iter().map(|&p| self.strides[p]).collect();
        Ok(Self {
            data: self.data,
            dims,
            strides,
        })
    }
}

impl<T: Copy> NdArray<T> {
    /// Create a row-major array filled with `value`.
    ///
    /// # Panics
    /// If the element count of `dims` overflows `usize`, like [`NdArray::from_fn`].
    pub fn full(dims: &[usize], value: T) -> Self {
        Self {
            data: vec![value; numel(dims)],
            dims: Coords::from_slice(dims),
            strides: row_major_strides(dims),
        }
    }

    /// Create a rank-0 array holding `value`.
    pub fn scalar(value: T) -> Self {
        Self::full(&[], value)
    }

    /// The single element of a rank-0 array.
    pub fn scalar_value(&self) -> Result<T> {
        if self.ndim() != 0 {
            return Err(ArrayError::RankMismatch(0, self.ndim()));
        }
        self.get(&[]).copied()
    }

    /// Row-major copy of the elements in logical order.
    pub fn to_contiguous(&self) -> Self {
        if self.strides == row_major_strides(&self.dims) {
            return self.clone();
        }
        Self {
            data: self.iter().copied().collect(),
            dims: self.dims.clone(),
            strides: row_major_strides(&self.dims),
        }
    }
}

impl<T: Copy + num_traits::Zero> NdArray<T> {
    /// Create a row-major array of zeros.
    pub fn zeros(dims: &[usize]) -> Self {
        Self::full(dims, T::zero())
    }
}

// ============================================================================
// Iteration
// ============================================================================

/// Logical-order iterator returned by [`NdArray::iter`].
pub struct Iter<'a, T> {
    array: &'a NdArray<T>,
    index: MultiIndex,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.index.next()?;
        let array = self.array;
        Some(&array.data[self.index.offset(&array.strides)])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.index.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

// ============================================================================
// Indexing operators
// ============================================================================

impl<T> Index<&[usize]> for NdArray<T> {
    type Output = T;

    fn index(&self, indices: &[usize]) -> &T {
        match self.get(indices) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> IndexMut<&[usize]> for NdArray<T> {
    fn index_mut(&mut self, indices: &[usize]) -> &mut T {
        match self.get_mut(indices) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T, const N: usize> Index<[usize; N]> for NdArray<T> {
    type Output = T;

    fn index(&self, indices: [usize; N]) -> &T {
        &self[&indices[..]]
    }
}

impl<T, const N: usize> IndexMut<[usize; N]> for NdArray<T> {
    fn index_mut(&mut self, indices: [usize; N]) -> &mut T {
        &mut self[&indices[..]]
    }
}

// ============================================================================
// Tests
// ============================================================================
