//! Shared helpers for kernel entry points.

use std::borrow::Cow;

use ndstride_view::{row_major_strides, NdArray};

/// Whether the buffer order of `array` is its logical row-major order.
///
/// Stricter than [`NdArray::is_contiguous`], which accepts any rank-1 stride. Axes of
/// extent 1 never move the offset, so their strides are ignored.
pub(crate) fn is_row_major<T>(array: &NdArray<T>) -> bool {
    let expected = row_major_strides(array.dims());
    array
        .dims()
        .iter()
        .zip(array.strides().iter().zip(expected.iter()))
        .all(|(&d, (&s, &e))| d <= 1 || s == e)
}

/// Elements of `array` in logical row-major order as one slice.
///
/// Row-major arrays are borrowed; other layouts are gathered into a new buffer.
pub(crate) fn logical_data<T: Copy>(array: &NdArray<T>) -> Cow<'_, [T]> {
    if is_row_major(array) {
        Cow::Borrowed(array.data())
    } else {
        log::trace!(
            "gathering non-contiguous operand dims={:?} strides={:?}",
            array.dims(),
            array.strides()
        );
        Cow::Owned(array.iter().copied().collect())
    }
}

/// Whether `total` elements are too few to split across the rayon pool.
#[cfg(feature = "parallel")]
#[inline]
pub(crate) fn use_sequential_path(total: usize) -> bool {
    total <= crate::MIN_THREAD_LENGTH
}

/// `out[i] = f(a[i], b[i])` over two equally long slices.
///
/// With the `parallel` feature, buffers above [`MIN_THREAD_LENGTH`](crate::MIN_THREAD_LENGTH)
/// elements are split across the rayon pool.
pub(crate) fn zip_slices<T, F>(a: &[T], b: &[T], f: F) -> Vec<T>
where
    T: Copy + Send + Sync,
    F: Fn(T, T) -> T + Send + Sync,
{
    debug_assert_eq!(a.len(), b.len());
    #[cfg(feature = "parallel")]
    {
        if use_sequential_path(a.len()) {
            zip_sequential(a, b, f)
        } else {
            crate::threading::par_zip_slices(a, b, f)
        }
    }
    #[cfg(not(feature = "parallel"))]
    {
        zip_sequential(a, b, f)
    }
}

fn zip_sequential<T: Copy, F: Fn(T, T) -> T>(a: &[T], b: &[T], f: F) -> Vec<T> {
    a.iter().zip(b.iter()).map(|(&x, &y)| f(x, y)).collect()
}
