//! NumPy-style shape broadcasting.
//!
//! Shapes are aligned on their trailing axes. Missing leading axes count as extent 1,
//! and an extent-1 axis stretches to match the other operand.

use crate::layout::Coords;
use crate::{ArrayError, Result};

/// Compute the broadcast shape of two operands.
///
/// Axes are compared right to left; two extents are compatible when they are equal or
/// one of them is 1, and the output takes the larger. A rank-0 shape broadcasts
/// against anything.
///
/// # Errors
/// [`ArrayError::IncompatibleShapes`] on the first axis where both extents are
/// greater than 1 and differ.
pub fn broadcast_shapes(a: &[usize], b: &[usize]) -> Result<Coords> {
    let max_rank = a.len().max(b.len());
    let mut result: Coords = smallvec::smallvec![0usize; max_rank];

    for i in 0..max_rank {
        let a_dim = if i < a.len() { a[a.len() - 1 - i] } else { 1 };
        let b_dim = if i < b.len() { b[b.len() - 1 - i] } else { 1 };

        result[max_rank - 1 - i] = if a_dim == b_dim || b_dim == 1 {
            a_dim
        } else if a_dim == 1 {
            b_dim
        } else {
            return Err(ArrayError::IncompatibleShapes(a.to_vec(), b.to_vec()));
        };
    }

    Ok(result)
}

/// Strides that read an operand of shape `dims` as if it had shape `target`.
///
/// `target` must have at least the operand's rank. Missing leading axes and stretched
/// extent-1 axes get stride 0, so every position along them reads the same element.
pub fn broadcast_strides(dims: &[usize], strides: &[usize], target: &[usize]) -> Result<Coords> {
    if dims.len() != strides.len() {
        return Err(ArrayError::RankMismatch(strides.len(), dims.len()));
    }
    if dims.len() > target.len() {
        return Err(ArrayError::IncompatibleShapes(
            dims.to_vec(),
            target.to_vec(),
        ));
    }
    let lead = target.len() - dims.len();
    let mut out: Coords = smallvec::smallvec![0usize; target.len()];
    for (i, (&dim, &stride)) in dims.iter().zip(strides.iter()).enumerate() {
        let want = target[lead + i];
        if dim == want {
            out[lead + i] = stride;
        } else if dim != 1 {
            return Err(ArrayError::IncompatibleShapes(
                dims.to_vec(),
                target.to_vec(),
            ));
        }
    }
    Ok(out)
}
