//! Owned dense rank-3 tensor storage.

use std::ops::{Index, IndexMut};

use dilated_traits::Scalar;

use crate::axis::AxisRange;
use crate::operand::{
    IntoTensorWindow, IntoTensorWindowMut, Operand, OperandMut,
};
use crate::traits::{Clear, IsSame, Tensor, TensorMut};

/// Dense page-by-row-by-column tensor with heap storage.
///
/// Elements are laid out page-major, rows within a page, columns within a
/// row, so page `p` is a contiguous row-major matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicTensor<T> {
    data: Vec<T>,
    pages: usize,
    rows: usize,
    columns: usize,
}

impl<T: Scalar> DynamicTensor<T> {
    /// Create a `pages` by `rows` by `columns` tensor of zeros.
    pub fn zeros(pages: usize, rows: usize, columns: usize) -> Self {
        Self {
            data: vec![T::zero(); pages * rows * columns],
            pages,
            rows,
            columns,
        }
    }

    /// Create a tensor with values produced by a function of
    /// `(page, row, column)`, called in storage order.
    pub fn from_fn(
        pages: usize,
        rows: usize,
        columns: usize,
        mut f: impl FnMut(usize, usize, usize) -> T,
    ) -> Self {
        let mut data = Vec::with_capacity(pages * rows * columns);
        for p in 0..pages {
            for i in 0..rows {
                for j in 0..columns {
                    data.push(f(p, i, j));
                }
            }
        }
        Self {
            data,
            pages,
            rows,
            columns,
        }
    }

    /// Create a tensor from an array of pages, each an array of rows.
    pub fn from_pages<const P: usize, const R: usize, const C: usize>(
        pages: [[[T; C]; R]; P],
    ) -> Self {
        Self {
            data: pages.into_iter().flatten().flatten().collect(),
            pages: P,
            rows: R,
            columns: C,
        }
    }

    /// The backing element slice in storage order.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn idx(&self, page: usize, row: usize, column: usize) -> usize {
        (page * self.rows + row) * self.columns + column
    }
}

impl<T: Scalar> Tensor for DynamicTensor<T> {
    type Elem = T;

    fn pages(&self) -> usize {
        self.pages
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn get(&self, page: usize, row: usize, column: usize) -> T {
        debug_assert!(page < self.pages && row < self.rows && column < self.columns);
        self.data[self.idx(page, row, column)]
    }
}

impl<T: Scalar> TensorMut for DynamicTensor<T> {
    #[inline]
    fn set(&mut self, page: usize, row: usize, column: usize, value: T) {
        debug_assert!(page < self.pages && row < self.rows && column < self.columns);
        let i = self.idx(page, row, column);
        self.data[i] = value;
    }
}

impl<T> Clear for DynamicTensor<T> {
    fn clear(&mut self) {
        self.data.clear();
        self.pages = 0;
        self.rows = 0;
        self.columns = 0;
    }
}

impl<T: Scalar> IsSame for DynamicTensor<T> {
    fn is_same(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<T: Scalar> Index<(usize, usize, usize)> for DynamicTensor<T> {
    type Output = T;

    fn index(&self, (page, row, column): (usize, usize, usize)) -> &T {
        &self.data[(page * self.rows + row) * self.columns + column]
    }
}

impl<T: Scalar> IndexMut<(usize, usize, usize)> for DynamicTensor<T> {
    fn index_mut(&mut self, (page, row, column): (usize, usize, usize)) -> &mut T {
        &mut self.data[(page * self.rows + row) * self.columns + column]
    }
}

impl<'a, T: Scalar> IntoTensorWindow<'a> for &'a DynamicTensor<T> {
    type Target = DynamicTensor<T>;

    fn into_window(self) -> (Operand<'a, DynamicTensor<T>>, AxisRange, AxisRange, AxisRange) {
        let pages = AxisRange::identity(self.pages);
        let rows = AxisRange::identity(self.rows);
        let columns = AxisRange::identity(self.columns);
        (Operand::Borrowed(self), pages, rows, columns)
    }
}

impl<'a, T: Scalar> IntoTensorWindowMut<'a> for &'a mut DynamicTensor<T> {
    type Target = DynamicTensor<T>;

    fn into_window_mut(
        self,
    ) -> (OperandMut<'a, DynamicTensor<T>>, AxisRange, AxisRange, AxisRange) {
        let pages = AxisRange::identity(self.pages);
        let rows = AxisRange::identity(self.rows);
        let columns = AxisRange::identity(self.columns);
        (OperandMut::Borrowed(self), pages, rows, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let z = DynamicTensor::<f64>::zeros(2, 2, 2);
        assert_eq!((z.pages(), z.rows(), z.columns()), (2, 2, 2));
        assert!(z.is_default());

        let t = DynamicTensor::from_fn(2, 2, 2, |p, i, j| (4 * p + 2 * i + j) as f64);
        assert_eq!(t.data(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);

        let u = DynamicTensor::from_pages([
            [[0.0, 1.0], [2.0, 3.0]],
            [[4.0, 5.0], [6.0, 7.0]],
        ]);
        assert_eq!(t, u);
    }

    #[test]
    fn test_storage_order() {
        let t = DynamicTensor::from_pages([[[1, 2, 3], [4, 5, 6]]]);
        assert_eq!(t.get(0, 1, 2), 6);
        assert_eq!(t[(0, 1, 0)], 4);
    }

    #[test]
    fn test_set_and_clear() {
        let mut t = DynamicTensor::<i32>::zeros(1, 2, 2);
        t.set(0, 1, 1, 5);
        t[(0, 0, 0)] = 3;
        assert_eq!(t.data(), &[3, 0, 0, 5]);
        t.clear();
        assert_eq!((t.pages(), t.rows(), t.columns()), (0, 0, 0));
    }

    #[test]
    fn test_identity_window() {
        let t = DynamicTensor::<f64>::zeros(2, 3, 4);
        let (op, pages, rows, columns) = (&t).into_window();
        assert_eq!(op.as_ref().pages(), 2);
        assert!(pages.is_full(2) && rows.is_full(3) && columns.is_full(4));
    }
}
