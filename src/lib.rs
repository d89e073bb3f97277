//! Owned N-dimensional arrays with row-major strides.
//!
//! `ndstride` bundles the workspace crates behind one import:
//!
//! - [`ndstride_view`]: the [`NdArray`] container, stride math, shape broadcasting and
//!   the [`Tensor`] wrapper
//! - [`ndstride_kernel`]: elementwise arithmetic, broadcasting kernels and [`matmul`]
//!
//! # Example
//!
//! ```rust
//! use ndstride::{add, approximately_equal, multiply, NdArray, Tensor};
//!
//! let a = NdArray::new(vec![0.2f32, 0.5, 46.0, -5.1], &[4]).unwrap();
//! assert_eq!(a.to_string(), "[0.200, 0.500, 46.000, -5.100]");
//!
//! let doubled = add(&a, &a).unwrap();
//! let squared = multiply(&a, &a).unwrap();
//! let expected = NdArray::new(vec![0.04f32, 0.25, 2116.0, 26.01], &[4]).unwrap();
//! assert!(approximately_equal(&squared, &expected));
//! assert_eq!(doubled[[2]], 92.0);
//!
//! // Tensors dereference to arrays, so every kernel accepts them.
//! let t = Tensor::new(vec![1.0f32, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
//! assert_eq!(add(&t, &t).unwrap().data(), &[2.0, 4.0, 6.0, 8.0]);
//! ```
//!
//! # Features
//!
//! - `parallel`: run large elementwise kernels on the rayon thread pool

pub use ndstride_kernel::{
    add, approximately_equal, approximately_equal_with, broadcast_add, broadcast_multiply,
    matmul, multiply, zip_broadcast, DEFAULT_TOLERANCE, MIN_THREAD_LENGTH,
};
pub use ndstride_view::{
    broadcast_shapes, broadcast_strides, checked_numel, coordinates_to_offset, numel,
    offset_to_coordinates, row_major_strides, ArrayError, Coords, Element, MultiIndex, NdArray,
    Result, Tensor, DISPLAY_PRECISION,
};

pub use ndstride_kernel;
pub use ndstride_view;
