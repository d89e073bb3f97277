//! Owned N-dimensional arrays with row-major strides.
//!
//! This crate holds the data model of the ndstride workspace: the stride math that maps
//! multi-dimensional coordinates to flat buffer offsets, the owned [`NdArray`] container,
//! NumPy-style shape broadcasting and the [`Tensor`] wrapper.
//!
//! # Core Types
//!
//! - [`NdArray`]: Owned array with a flat buffer, dims and derived strides
//! - [`Tensor`]: Newtype over [`NdArray`] for APIs that want a distinct type
//! - [`MultiIndex`]: Row-major odometer over a shape
//! - [`Element`]: Bound on element types (`f32` by default, `f64` supported)
//!
//! # Stride Math
//!
//! - [`row_major_strides`]: Contiguous C-order strides for a shape
//! - [`coordinates_to_offset`] / [`offset_to_coordinates`]: Index <-> offset conversion
//! - [`broadcast_shapes`]: Output shape for two broadcast operands
//!
//! # Example
//!
//! ```rust
//! use ndstride_view::NdArray;
//!
//! let arr = NdArray::new(vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
//! assert_eq!(arr.strides(), &[3, 1]);
//! assert_eq!(*arr.get(&[1, 2]).unwrap(), 6.0);
//! assert_eq!(arr.to_string(), "[[1.000, 2.000, 3.000],\n [4.000, 5.000, 6.000]]");
//! ```

pub mod array;
pub mod broadcast;
mod format;
pub mod layout;
mod scalar;
pub mod tensor;

pub use array::NdArray;
pub use broadcast::{broadcast_shapes, broadcast_strides};
pub use format::DISPLAY_PRECISION;
pub use layout::{
    checked_numel, coordinates_to_offset, numel, offset_to_coordinates, row_major_strides, Coords,
    MultiIndex,
};
pub use scalar::Element;
pub use tensor::Tensor;

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur during array construction, indexing and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArrayError {
    /// Number of indices, strides or axes does not match the array rank.
    #[error("rank mismatch: {0} vs {1}")]
    RankMismatch(usize, usize),

    /// A coordinate is past the extent of its axis.
    #[error("index {index} out of bounds for axis {axis} with extent {extent}")]
    IndexOutOfBounds {
        axis: usize,
        index: usize,
        extent: usize,
    },

    /// Elementwise operands hold a different number of elements.
    #[error("size mismatch: {0} vs {1}")]
    SizeMismatch(usize, usize),

    /// Shapes cannot be reconciled by broadcasting or by a matrix product.
    #[error("incompatible shapes: {0:?} vs {1:?}")]
    IncompatibleShapes(Vec<usize>, Vec<usize>),

    /// The element count implied by the dims differs from the buffer length.
    #[error("shape {dims:?} holds {} elements but the buffer has {len}", element_count(.dims))]
    ShapeSizeMismatch { dims: Vec<usize>, len: usize },

    /// Invalid axis index for the given array rank.
    #[error("invalid axis {axis} for rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    /// An explicit layout reaches past the end of the buffer.
    #[error("layout reaches offset {offset} in a buffer of length {len}")]
    OffsetOutOfRange { offset: usize, len: usize },

    /// Integer overflow while computing the largest offset of a layout.
    #[error("offset overflow while computing layout extent")]
    OffsetOverflow,
}

fn element_count(dims: &[usize]) -> String {
    match checked_numel(dims) {
        Some(n) => n.to_string(),
        None => "more than usize::MAX".to_string(),
    }
}

/// Result type for array operations.
pub type Result<T> = std::result::Result<T, ArrayError>;
