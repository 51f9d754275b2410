//! Owned dense vector storage.

use std::ops::{Index, IndexMut};

use dilated_traits::{Orientation, Scalar};

use crate::axis::AxisRange;
use crate::operand::{
    IntoVectorWindow, IntoVectorWindowMut, Operand, OperandMut,
};
use crate::traits::{Clear, IsSame, Vector, VectorMut};

/// Dense vector with heap storage and a runtime orientation.
///
/// Orientation only matters to the expression layer, where it decides
/// which products are well formed. Element access ignores it.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicVector<T> {
    data: Vec<T>,
    orientation: Orientation,
}

impl<T: Scalar> DynamicVector<T> {
    /// Create a column vector of `len` zeros.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![T::zero(); len],
            orientation: Orientation::Column,
        }
    }

    /// Create a column vector with values produced by a function of the index.
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Self {
        Self {
            data: (0..len).map(f).collect(),
            orientation: Orientation::Column,
        }
    }

    /// Create a column vector owning `data`.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self {
            data,
            orientation: Orientation::Column,
        }
    }

    /// The same vector with the given orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// The same vector with the opposite orientation.
    pub fn transposed(mut self) -> Self {
        self.orientation = self.orientation.flipped();
        self
    }

    /// The backing element slice.
    pub fn data(&self) -> &[T] {
        &self.data
    }
}

impl<T: Scalar> Vector for DynamicVector<T> {
    type Elem = T;

    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn get(&self, index: usize) -> T {
        self.data[index]
    }

    fn orientation(&self) -> Orientation {
        self.orientation
    }
}

impl<T: Scalar> VectorMut for DynamicVector<T> {
    #[inline]
    fn set(&mut self, index: usize, value: T) {
        self.data[index] = value;
    }
}

impl<T> Clear for DynamicVector<T> {
    fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T: Scalar> IsSame for DynamicVector<T> {
    fn is_same(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<T: Scalar> Index<usize> for DynamicVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T: Scalar> IndexMut<usize> for DynamicVector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<'a, T: Scalar> IntoVectorWindow<'a> for &'a DynamicVector<T> {
    type Target = DynamicVector<T>;

    fn into_window(self) -> (Operand<'a, DynamicVector<T>>, AxisRange) {
        let range = AxisRange::identity(self.data.len());
        (Operand::Borrowed(self), range)
    }
}

impl<'a, T: Scalar> IntoVectorWindowMut<'a> for &'a mut DynamicVector<T> {
    type Target = DynamicVector<T>;

    fn into_window_mut(self) -> (OperandMut<'a, DynamicVector<T>>, AxisRange) {
        let range = AxisRange::identity(self.data.len());
        (OperandMut::Borrowed(self), range)
    }
}
