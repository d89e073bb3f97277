//! Elementwise arithmetic on same-sized arrays.
//!
//! [`add`] and [`multiply`] only require both operands to hold the same number of
//! elements; they do not broadcast and they do not compare shapes. The result takes
//! the left operand's shape. Use [`broadcast_add`](crate::broadcast_add) and
//! [`broadcast_multiply`](crate::broadcast_multiply) for NumPy broadcasting.

use ndstride_view::{ArrayError, Element, NdArray, Result};

use crate::kernel::{logical_data, zip_slices};
use crate::DEFAULT_TOLERANCE;

/// Combine two equally sized arrays elementwise, pairing elements in each operand's
/// logical row-major order. The output is row-major with `a`'s dims.
fn zip_map<T, F>(a: &NdArray<T>, b: &NdArray<T>, f: F) -> Result<NdArray<T>>
where
    T: Element,
    F: Fn(T, T) -> T + Send + Sync,
{
    if a.size() != b.size() {
        return Err(ArrayError::SizeMismatch(a.size(), b.size()));
    }
    if a.dims() != b.dims() {
        log::debug!(
            "elementwise op on differently shaped operands {:?} and {:?}",
            a.dims(),
            b.dims()
        );
    }
    let lhs = logical_data(a);
    let rhs = logical_data(b);
    NdArray::new(zip_slices(&lhs, &rhs, f), a.dims())
}

/// Elementwise `a + b`.
///
/// # Errors
/// [`ArrayError::SizeMismatch`] when the operands hold different element counts.
///
/// # Example
/// ```rust
/// use ndstride_kernel::add;
/// use ndstride_view::NdArray;
///
/// let a = NdArray::new(vec![1.0f32, 2.0], &[2]).unwrap();
/// let b = NdArray::new(vec![10.0f32, 20.0], &[2]).unwrap();
/// assert_eq!(add(&a, &b).unwrap().data(), &[11.0, 22.0]);
/// ```
pub fn add<T: Element>(a: &NdArray<T>, b: &NdArray<T>) -> Result<NdArray<T>> {
    zip_map(a, b, |x, y| x + y)
}

/// Elementwise `a * b`.
///
/// # Errors
/// [`ArrayError::SizeMismatch`] when the operands hold different element counts.
pub fn multiply<T: Element>(a: &NdArray<T>, b: &NdArray<T>) -> Result<NdArray<T>> {
    zip_map(a, b, |x, y| x * y)
}

/// Whether `a` and `b` have the same shape and all elements within [`DEFAULT_TOLERANCE`].
pub fn approximately_equal<T: Element>(a: &NdArray<T>, b: &NdArray<T>) -> bool {
    match <T as num_traits::NumCast>::from(DEFAULT_TOLERANCE) {
        Some(tol) => approximately_equal_with(a, b, tol),
        None => false,
    }
}

/// Whether `a` and `b` have the same shape and `|a[i] - b[i]| <= tolerance` everywhere.
///
/// Unlike [`add`], this compares full shapes, not just element counts. A NaN on either
/// side makes the arrays unequal.
pub fn approximately_equal_with<T: Element>(
    a: &NdArray<T>,
    b: &NdArray<T>,
    tolerance: T,
) -> bool {
    if a.dims() != b.dims() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .all(|(&x, &y)| (x - y).abs() <= tolerance)
}
