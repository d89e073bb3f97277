//! Element type bounds for arrays and kernels.

use std::fmt::{Debug, Display};

/// Shared trait bounds for all element types stored in an [`NdArray`](crate::NdArray).
///
/// Kernels need arithmetic, an absolute value for tolerance checks and fixed-point
/// formatting, so the bound is `num_traits::Float` plus `Display`. It is blanket
/// implemented; `f32` and `f64` qualify.
pub trait Element: num_traits::Float + Display + Debug + Send + Sync + 'static {}

impl<T> Element for T where T: num_traits::Float + Display + Debug + Send + Sync + 'static {}
