//! Arithmetic kernels for [`NdArray`].
//!
//! # Operations
//!
//! ## Elementwise
//!
//! - [`add`], [`multiply`]: pair elements in logical row-major order; operands need the
//!   same element count, and the result takes the left operand's shape
//! - [`approximately_equal`], [`approximately_equal_with`]: shape and tolerance comparison
//!
//! ## Broadcasting
//!
//! - [`zip_broadcast`]: combine two arrays under NumPy broadcasting rules
//! - [`broadcast_add`], [`broadcast_multiply`]
//!
//! ## Linear algebra
//!
//! - [`matmul`]: batched matrix product with broadcast batch axes
//!
//! # Example
//!
//! ```rust
//! use ndstride_kernel::{add, approximately_equal, matmul};
//! use ndstride_view::NdArray;
//!
//! let a = NdArray::new(vec![0.2f32, 0.5, 46.0, -5.1], &[4]).unwrap();
//! let sum = add(&a, &a).unwrap();
//! let expected = NdArray::new(vec![0.4f32, 1.0, 92.0, -10.2], &[4]).unwrap();
//! assert!(approximately_equal(&sum, &expected));
//!
//! let x = NdArray::new(vec![1.0f32, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
//! let id = NdArray::new(vec![1.0f32, 0.0, 0.0, 1.0], &[2, 2]).unwrap();
//! assert_eq!(matmul(&x, &id).unwrap(), x);
//! ```
//!
//! # Parallelism
//!
//! With the `parallel` feature, elementwise kernels over more than
//! [`MIN_THREAD_LENGTH`] elements run on the rayon thread pool.
//!
//! # Logging
//!
//! Kernels emit `debug`/`trace` records through the [`log`] facade: layout fallbacks,
//! parallel dispatch and matmul shapes. No logger is installed by this crate.

mod broadcast;
mod kernel;
mod matmul;
mod ops;
#[cfg(feature = "parallel")]
mod threading;

pub use broadcast::{broadcast_add, broadcast_multiply, zip_broadcast};
pub use matmul::matmul;
pub use ops::{add, approximately_equal, approximately_equal_with, multiply};

pub use ndstride_view::{ArrayError, Element, NdArray, Result};

/// Minimum number of elements before an elementwise kernel is split across threads.
pub const MIN_THREAD_LENGTH: usize = 1 << 15;

/// Absolute tolerance used by [`approximately_equal`].
pub const DEFAULT_TOLERANCE: f64 = 1e-5;
