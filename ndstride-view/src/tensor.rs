//! `Tensor`: a distinct public type over [`NdArray`].
//!
//! A tensor carries no data or invariants beyond its array. It dereferences to the
//! array, so every function taking `&NdArray` accepts `&Tensor` as well.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::array::NdArray;
use crate::Result;

#[derive(Clone, PartialEq)]
pub struct Tensor<T = f32>(NdArray<T>);

impl<T> Tensor<T> {
    /// Create a row-major tensor; see [`NdArray::new`].
    pub fn new(data: Vec<T>, dims: &[usize]) -> Result<Self> {
        NdArray::new(data, dims).map(Self)
    }

    pub fn into_inner(self) -> NdArray<T> {
        self.0
    }
}

impl<T> Deref for Tensor<T> {
    type Target = NdArray<T>;

    fn deref(&self) -> &NdArray<T> {
        &self.0
    }
}

impl<T> DerefMut for Tensor<T> {
    fn deref_mut(&mut self) -> &mut NdArray<T> {
        &mut self.0
    }
}

impl<T> From<NdArray<T>> for Tensor<T> {
    fn from(array: NdArray<T>) -> Self {
        Self(array)
    }
}

impl<T> From<Tensor<T>> for NdArray<T> {
    fn from(tensor: Tensor<T>) -> Self {
        tensor.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tensor").field(&self.0).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
