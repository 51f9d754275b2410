//! Owned dense matrix storage.

use std::ops::{Index, IndexMut};

use dilated_traits::Scalar;

use crate::axis::AxisRange;
use crate::operand::{
    IntoMatrixWindow, IntoMatrixWindowMut, Operand, OperandMut,
};
use crate::traits::{Clear, IsSame, Matrix, MatrixMut, Restrictable};

/// Row-major dense matrix with heap storage.
///
/// This is the plain unrestricted container: every mutation predicate
/// answers yes and `structure` reports no guarantees.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMatrix<T> {
    data: Vec<T>,
    rows: usize,
    columns: usize,
}

impl<T: Scalar> DynamicMatrix<T> {
    /// Create a `rows` by `columns` matrix of zeros.
    pub fn zeros(rows: usize, columns: usize) -> Self {
        Self {
            data: vec![T::zero(); rows * columns],
            rows,
            columns,
        }
    }

    /// Create a matrix with values produced by a function of `(row, column)`.
    ///
    /// The function is called in row-major iteration order.
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * columns);
        for i in 0..rows {
            for j in 0..columns {
                data.push(f(i, j));
            }
        }
        Self {
            data,
            rows,
            columns,
        }
    }

    /// Create a matrix from an array of rows.
    pub fn from_rows<const R: usize, const C: usize>(rows: [[T; C]; R]) -> Self {
        Self {
            data: rows.into_iter().flatten().collect(),
            rows: R,
            columns: C,
        }
    }

    /// The backing row-major element slice.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn idx(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }
}

impl<T: Scalar> Matrix for DynamicMatrix<T> {
    type Elem = T;

    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn get(&self, row: usize, column: usize) -> T {
        debug_assert!(row < self.rows && column < self.columns);
        self.data[self.idx(row, column)]
    }
}

impl<T: Scalar> MatrixMut for DynamicMatrix<T> {
    #[inline]
    fn set(&mut self, row: usize, column: usize, value: T) {
        debug_assert!(row < self.rows && column < self.columns);
        let i = self.idx(row, column);
        self.data[i] = value;
    }
}

impl<T: Scalar> Restrictable for DynamicMatrix<T> {
    type Unrestricted = Self;

    fn unrestricted_mut(&mut self) -> &mut Self {
        self
    }

    fn into_unrestricted(self) -> Self {
        self
    }
}

impl<T> Clear for DynamicMatrix<T> {
    fn clear(&mut self) {
        self.data.clear();
        self.rows = 0;
        self.columns = 0;
    }
}

impl<T: Scalar> IsSame for DynamicMatrix<T> {
    fn is_same(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<T: Scalar> Index<(usize, usize)> for DynamicMatrix<T> {
    type Output = T;

    fn index(&self, (row, column): (usize, usize)) -> &T {
        &self.data[row * self.columns + column]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for DynamicMatrix<T> {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut T {
        &mut self.data[row * self.columns + column]
    }
}

impl<'a, T: Scalar> IntoMatrixWindow<'a> for &'a DynamicMatrix<T> {
    type Target = DynamicMatrix<T>;

    fn into_window(self) -> (Operand<'a, DynamicMatrix<T>>, AxisRange, AxisRange) {
        let rows = AxisRange::identity(self.rows);
        let columns = AxisRange::identity(self.columns);
        (Operand::Borrowed(self), rows, columns)
    }
}

impl<'a, T: Scalar> IntoMatrixWindowMut<'a> for &'a mut DynamicMatrix<T> {
    type Target = DynamicMatrix<T>;

    fn into_window_mut(self) -> (OperandMut<'a, DynamicMatrix<T>>, AxisRange, AxisRange) {
        let rows = AxisRange::identity(self.rows);
        let columns = AxisRange::identity(self.columns);
        (OperandMut::Borrowed(self), rows, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let z = DynamicMatrix::<f64>::zeros(2, 3);
        assert_eq!((z.rows(), z.columns()), (2, 3));
        assert!(z.is_default());

        let m = DynamicMatrix::from_fn(2, 2, |i, j| (2 * i + j) as f64);
        assert_eq!(m.data(), &[0.0, 1.0, 2.0, 3.0]);

        let r = DynamicMatrix::from_rows([[0.0, 1.0], [2.0, 3.0]]);
        assert_eq!(m, r);
    }

    #[test]
    fn test_get_set_index() {
        let mut m = DynamicMatrix::from_rows([[1, 2], [3, 4]]);
        assert_eq!(m.get(1, 0), 3);
        assert_eq!(m[(0, 1)], 2);
        m.set(0, 0, 9);
        m[(1, 1)] = 8;
        assert_eq!(m.data(), &[9, 2, 3, 8]);
    }

    #[test]
    fn test_clear_and_identity() {
        let mut m = DynamicMatrix::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let n = m.clone();
        assert!(m.is_same(&m));
        assert!(!m.is_same(&n));
        m.clear();
        assert_eq!((m.rows(), m.columns()), (0, 0));
    }

    #[test]
    fn test_identity_window() {
        let m = DynamicMatrix::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let (op, rows, columns) = (&m).into_window();
        assert_eq!(op.as_ref().get(1, 2), 6.0);
        assert!(rows.is_full(2) && columns.is_full(3));
    }
}
