//! Broadcasting batched matrix product.
//!
//! Operands are read through their strides, so permuted (transposed) inputs need no
//! copy. Dimensions are grouped as `[batch..., rows, cols]`; the batch groups of both
//! operands broadcast against each other and stretched batch axes get stride 0.

use ndstride_view::{
    broadcast_shapes, broadcast_strides, numel, ArrayError, Coords, Element, MultiIndex,
    NdArray, Result,
};

/// An operand reshaped to at least two axes, with strides to match.
struct Operand<'a, T> {
    data: &'a [T],
    dims: Coords,
    strides: Coords,
}

impl<T> Operand<'_, T> {
    fn batch_dims(&self) -> &[usize] {
        &self.dims[..self.dims.len() - 2]
    }

    fn batch_strides(&self) -> &[usize] {
        &self.strides[..self.strides.len() - 2]
    }

    fn row_stride(&self) -> usize {
        self.strides[self.strides.len() - 2]
    }

    fn col_stride(&self) -> usize {
        self.strides[self.strides.len() - 1]
    }
}

/// Promote a rank-1 operand to a matrix by inserting a unit axis at `unit_axis`
/// (0 for a row vector on the left, 1 for a column vector on the right).
fn promote<T>(array: &NdArray<T>, unit_axis: usize) -> Operand<'_, T> {
    let mut dims = Coords::from_slice(array.dims());
    let mut strides = Coords::from_slice(array.strides());
    if dims.len() == 1 {
        dims.insert(unit_axis, 1);
        strides.insert(unit_axis, 0);
    }
    Operand {
        data: array.data(),
        dims,
        strides,
    }
}

/// Matrix product of `a` and `b`.
///
/// - Rank-2 operands multiply as matrices: `[m, k] x [k, n] -> [m, n]`.
/// - A rank-1 left operand is treated as a `[1, k]` row and a rank-1 right operand as a
///   `[k, 1]` column; the unit axis is removed from the result.
/// - Axes before the last two are batch axes and broadcast like elementwise ops.
///
/// The result is contiguous with dims `batch + [m, n]` (minus promoted axes).
///
/// # Errors
/// - [`ArrayError::RankMismatch`] when either operand is rank 0.
/// - [`ArrayError::IncompatibleShapes`] when the inner dimensions differ or the batch
///   dimensions do not broadcast. The error carries the full operand shapes.
///
/// # Example
/// ```rust
/// use ndstride_kernel::matmul;
/// use ndstride_view::NdArray;
///
/// let a = NdArray::new(vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// let b = NdArray::new(vec![7.0f64, 8.0, 9.0, 10.0, 11.0, 12.0], &[3, 2]).unwrap();
/// let c = matmul(&a, &b).unwrap();
/// assert_eq!(c.dims(), &[2, 2]);
/// assert_eq!(c.data(), &[58.0, 64.0, 139.0, 154.0]);
/// ```
pub fn matmul<T: Element>(a: &NdArray<T>, b: &NdArray<T>) -> Result<NdArray<T>> {
    if a.ndim() == 0 {
        return Err(ArrayError::RankMismatch(0, 1));
    }
    if b.ndim() == 0 {
        return Err(ArrayError::RankMismatch(0, 1));
    }
    let incompatible = || ArrayError::IncompatibleShapes(a.dims().to_vec(), b.dims().to_vec());

    let lhs = promote(a, 0);
    let rhs = promote(b, 1);
    let m = lhs.dims[lhs.dims.len() - 2];
    let k = lhs.dims[lhs.dims.len() - 1];
    let n = rhs.dims[rhs.dims.len() - 1];
    if rhs.dims[rhs.dims.len() - 2] != k {
        return Err(incompatible());
    }

    let batch =
        broadcast_shapes(lhs.batch_dims(), rhs.batch_dims()).map_err(|_| incompatible())?;
    let a_batch_strides = broadcast_strides(lhs.batch_dims(), lhs.batch_strides(), &batch)?;
    let b_batch_strides = broadcast_strides(rhs.batch_dims(), rhs.batch_strides(), &batch)?;
    log::debug!(
        "matmul {:?} x {:?}: batch={:?} m={} k={} n={}",
        a.dims(),
        b.dims(),
        batch.as_slice(),
        m,
        k,
        n
    );

    let (a_rs, a_cs) = (lhs.row_stride(), lhs.col_stride());
    let (b_rs, b_cs) = (rhs.row_stride(), rhs.col_stride());
    let mut out = Vec::with_capacity(numel(&batch).saturating_mul(m).saturating_mul(n));
    let mut batch_iter = MultiIndex::new(&batch);
    while batch_iter.next().is_some() {
        let a_batch_off = batch_iter.offset(&a_batch_strides);
        let b_batch_off = batch_iter.offset(&b_batch_strides);
        for i in 0..m {
            let a_row = a_batch_off + i * a_rs;
            for j in 0..n {
                let b_col = b_batch_off + j * b_cs;
                let mut acc = T::zero();
                for p in 0..k {
                    acc = acc + lhs.data[a_row + p * a_cs] * rhs.data[b_col + p * b_rs];
                }
                out.push(acc);
            }
        }
    }

    let mut out_dims = batch;
    if a.ndim() > 1 {
        out_dims.push(m);
    }
    if b.ndim() > 1 {
        out_dims.push(n);
    }
    NdArray::new(out, &out_dims)
}
