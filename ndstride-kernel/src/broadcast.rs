//! Elementwise operations with NumPy-style broadcasting.
//!
//! The output shape is [`broadcast_shapes`] of the operands. Each operand is read
//! through [`broadcast_strides`], which pins stretched and missing axes to stride 0,
//! so no operand is ever materialized at the output size.

use ndstride_view::{broadcast_shapes, broadcast_strides, Element, MultiIndex, NdArray, Result};

use crate::kernel::{is_row_major, zip_slices};

/// Combine `a` and `b` elementwise after broadcasting them to a common shape.
///
/// # Errors
/// [`ArrayError::IncompatibleShapes`](ndstride_view::ArrayError::IncompatibleShapes)
/// when the shapes do not broadcast.
///
/// # Example
/// ```rust
/// use ndstride_kernel::zip_broadcast;
/// use ndstride_view::NdArray;
///
/// let col = NdArray::new(vec![1.0f64, 2.0], &[2, 1]).unwrap();
/// let row = NdArray::new(vec![10.0f64, 20.0, 30.0], &[3]).unwrap();
/// let out = zip_broadcast(&col, &row, |x, y| x + y).unwrap();
/// assert_eq!(out.dims(), &[2, 3]);
/// assert_eq!(out.data(), &[11.0, 21.0, 31.0, 12.0, 22.0, 32.0]);
/// ```
pub fn zip_broadcast<T, F>(a: &NdArray<T>, b: &NdArray<T>, f: F) -> Result<NdArray<T>>
where
    T: Element,
    F: Fn(T, T) -> T + Send + Sync,
{
    let out_dims = broadcast_shapes(a.dims(), b.dims())?;

    // Same shapes and row-major layouts need no index arithmetic.
    if a.dims() == b.dims() && is_row_major(a) && is_row_major(b) {
        return NdArray::new(zip_slices(a.data(), b.data(), f), &out_dims);
    }

    let a_strides = broadcast_strides(a.dims(), a.strides(), &out_dims)?;
    let b_strides = broadcast_strides(b.dims(), b.strides(), &out_dims)?;
    log::trace!(
        "broadcast zip {:?} x {:?} -> {:?} with strides {:?} / {:?}",
        a.dims(),
        b.dims(),
        out_dims.as_slice(),
        a_strides.as_slice(),
        b_strides.as_slice()
    );

    let (a_data, b_data) = (a.data(), b.data());
    let mut data = Vec::with_capacity(ndstride_view::numel(&out_dims));
    let mut idx = MultiIndex::new(&out_dims);
    while idx.next().is_some() {
        data.push(f(
            a_data[idx.offset(&a_strides)],
            b_data[idx.offset(&b_strides)],
        ));
    }
    NdArray::new(data, &out_dims)
}

/// Broadcasting `a + b`.
pub fn broadcast_add<T: Element>(a: &NdArray<T>, b: &NdArray<T>) -> Result<NdArray<T>> {
    zip_broadcast(a, b, |x, y| x + y)
}

/// Broadcasting `a * b`.
pub fn broadcast_multiply<T: Element>(a: &NdArray<T>, b: &NdArray<T>) -> Result<NdArray<T>> {
    zip_broadcast(a, b, |x, y| x * y)
}
