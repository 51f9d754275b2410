//! Triangular adaptors over matrix operands.
//!
//! An adaptor wraps a square matrix and enforces a value pattern: writes
//! into the implicit region are refused through the mutation predicates,
//! and `structure` reports the corresponding guarantee so views and the
//! expression layer can narrow their work. The wrapped matrix always holds
//! the literal value pattern, so stripping the adaptor with
//! [`Restrictable`] exposes exactly the values the adaptor showed.

use std::marker::PhantomData;

use dilated_traits::{Scalar, StructureFlags};
use num_traits::{One, Zero};

use crate::axis::AxisRange;
use crate::operand::{
    IntoMatrixWindow, IntoMatrixWindowMut, Operand, OperandMut,
};
use crate::traits::{Clear, IsSame, Matrix, MatrixMut, Restrictable};
use crate::{DilatedError, Result};

/// The value pattern of a triangular adaptor.
///
/// `stored(row, column)` tells which positions live in the wrapped matrix;
/// everything else is implicitly zero, or implicitly one on the diagonal
/// when `UNIT_DIAGONAL` is set.
pub trait TriangularKind: Copy + Default + 'static {
    /// The structural guarantee this kind declares.
    const FLAGS: StructureFlags;

    /// Whether the diagonal is an implicit one.
    const UNIT_DIAGONAL: bool = false;

    /// Whether `(row, column)` is an explicitly stored position.
    fn stored(row: usize, column: usize) -> bool;
}

/// Lower triangular: the diagonal and below are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lower;

/// Upper triangular: the diagonal and above are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Upper;

/// Strictly lower triangular: below the diagonal is stored, the rest is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrictlyLower;

/// Strictly upper triangular: above the diagonal is stored, the rest is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrictlyUpper;

/// Lower unitriangular: below the diagonal is stored, the diagonal is one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniLower;

/// Upper unitriangular: above the diagonal is stored, the diagonal is one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UniUpper;

impl TriangularKind for Lower {
    const FLAGS: StructureFlags = StructureFlags::LOWER;

    #[inline(always)]
    fn stored(row: usize, column: usize) -> bool {
        column <= row
    }
}

impl TriangularKind for Upper {
    const FLAGS: StructureFlags = StructureFlags::UPPER;

    #[inline(always)]
    fn stored(row: usize, column: usize) -> bool {
        column >= row
    }
}

impl TriangularKind for StrictlyLower {
    const FLAGS: StructureFlags = StructureFlags::STRICTLY_LOWER;

    #[inline(always)]
    fn stored(row: usize, column: usize) -> bool {
        column < row
    }
}

impl TriangularKind for StrictlyUpper {
    const FLAGS: StructureFlags = StructureFlags::STRICTLY_UPPER;

    #[inline(always)]
    fn stored(row: usize, column: usize) -> bool {
        column > row
    }
}

impl TriangularKind for UniLower {
    const FLAGS: StructureFlags = StructureFlags::UNI_LOWER;
    const UNIT_DIAGONAL: bool = true;

    #[inline(always)]
    fn stored(row: usize, column: usize) -> bool {
        column < row
    }
}

impl TriangularKind for UniUpper {
    const FLAGS: StructureFlags = StructureFlags::UNI_UPPER;
    const UNIT_DIAGONAL: bool = true;

    #[inline(always)]
    fn stored(row: usize, column: usize) -> bool {
        column > row
    }
}

/// A matrix adaptor enforcing the pattern of [`TriangularKind`] `K`.
#[derive(Debug, Clone)]
pub struct Triangular<M, K> {
    inner: M,
    _kind: PhantomData<K>,
}

pub type LowerMatrix<M> = Triangular<M, Lower>;
pub type UpperMatrix<M> = Triangular<M, Upper>;
pub type StrictlyLowerMatrix<M> = Triangular<M, StrictlyLower>;
pub type StrictlyUpperMatrix<M> = Triangular<M, StrictlyUpper>;
pub type UniLowerMatrix<M> = Triangular<M, UniLower>;
pub type UniUpperMatrix<M> = Triangular<M, UniUpper>;

impl<M: Matrix, K: TriangularKind> Triangular<M, K> {
    /// The implicit value at a non-stored position.
    #[inline]
    fn implicit(row: usize, column: usize) -> M::Elem {
        if row == column && K::UNIT_DIAGONAL {
            M::Elem::one()
        } else {
            M::Elem::zero()
        }
    }

    /// Wrap `inner`, checking that it is square and already holds the
    /// kind's value pattern outside the stored region.
    pub fn new(inner: M) -> Result<Self> {
        if inner.rows() != inner.columns() {
            return Err(DilatedError::DimensionMismatch(format!(
                "triangular adaptor requires a square matrix, got {}x{}",
                inner.rows(),
                inner.columns()
            )));
        }
        for i in 0..inner.rows() {
            for j in 0..inner.columns() {
                if !K::stored(i, j) && inner.get(i, j) != Self::implicit(i, j) {
                    return Err(DilatedError::Restricted(format!(
                        "matrix value at ({i}, {j}) violates the triangular pattern"
                    )));
                }
            }
        }
        Ok(Self {
            inner,
            _kind: PhantomData,
        })
    }

    /// The wrapped matrix.
    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: Matrix, K: TriangularKind> Matrix for Triangular<M, K> {
    type Elem = M::Elem;

    fn rows(&self) -> usize {
        self.inner.rows()
    }

    fn columns(&self) -> usize {
        self.inner.columns()
    }

    #[inline]
    fn get(&self, row: usize, column: usize) -> M::Elem {
        self.inner.get(row, column)
    }

    fn structure(&self) -> StructureFlags {
        K::FLAGS
    }

    /// True while the wrapped matrix still holds the kind's value pattern.
    /// Writes through [`Restrictable`] can break this.
    fn is_intact(&self) -> bool {
        self.inner.is_intact()
            && (0..self.rows()).all(|i| {
                (0..self.columns())
                    .all(|j| K::stored(i, j) || self.inner.get(i, j) == Self::implicit(i, j))
            })
    }

    fn try_set(&self, row: usize, column: usize, value: M::Elem) -> bool {
        if K::stored(row, column) {
            self.inner.try_set(row, column, value)
        } else {
            value == Self::implicit(row, column)
        }
    }

    fn try_add(&self, row: usize, column: usize, value: M::Elem) -> bool {
        if K::stored(row, column) {
            self.inner.try_add(row, column, value)
        } else {
            value == M::Elem::zero()
        }
    }

    fn try_sub(&self, row: usize, column: usize, value: M::Elem) -> bool {
        if K::stored(row, column) {
            self.inner.try_sub(row, column, value)
        } else {
            value == M::Elem::zero()
        }
    }

    fn try_mult(&self, row: usize, column: usize, value: M::Elem) -> bool {
        if K::stored(row, column) {
            self.inner.try_mult(row, column, value)
        } else if row == column && K::UNIT_DIAGONAL {
            value == M::Elem::one()
        } else {
            true
        }
    }

    fn try_div(&self, row: usize, column: usize, value: M::Elem) -> bool {
        if K::stored(row, column) {
            self.inner.try_div(row, column, value)
        } else if row == column && K::UNIT_DIAGONAL {
            value == M::Elem::one()
        } else {
            true
        }
    }
}

impl<M: MatrixMut, K: TriangularKind> MatrixMut for Triangular<M, K> {
    /// Writes pass through to the wrapped matrix. Callers must have
    /// established through `try_set` that a write into the implicit region
    /// carries the implicit value.
    fn set(&mut self, row: usize, column: usize, value: M::Elem) {
        debug_assert!(K::stored(row, column) || value == Self::implicit(row, column));
        self.inner.set(row, column, value);
    }

    fn reset(&mut self) {
        for i in 0..self.rows() {
            for j in 0..self.columns() {
                if K::stored(i, j) {
                    self.inner.set(i, j, M::Elem::zero());
                }
            }
        }
    }
}

impl<M: MatrixMut, K: TriangularKind> Restrictable for Triangular<M, K> {
    type Unrestricted = M;

    fn unrestricted_mut(&mut self) -> &mut M {
        &mut self.inner
    }

    fn into_unrestricted(self) -> M {
        self.inner
    }
}

impl<M: Clear, K> Clear for Triangular<M, K> {
    fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<M: Matrix, K: TriangularKind> IsSame for Triangular<M, K> {
    fn is_same(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<'a, M: Matrix, K: TriangularKind> IntoMatrixWindow<'a> for &'a Triangular<M, K> {
    type Target = Triangular<M, K>;

    fn into_window(self) -> (Operand<'a, Triangular<M, K>>, AxisRange, AxisRange) {
        let rows = AxisRange::identity(self.rows());
        let columns = AxisRange::identity(self.columns());
        (Operand::Borrowed(self), rows, columns)
    }
}

impl<'a, M: MatrixMut, K: TriangularKind> IntoMatrixWindowMut<'a> for &'a mut Triangular<M, K> {
    type Target = Triangular<M, K>;

    fn into_window_mut(self) -> (OperandMut<'a, Triangular<M, K>>, AxisRange, AxisRange) {
        let rows = AxisRange::identity(self.rows());
        let columns = AxisRange::identity(self.columns());
        (OperandMut::Borrowed(self), rows, columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::DynamicMatrix;

    #[test]
    fn test_construction_validates_pattern() {
        let ok = DynamicMatrix::from_rows([[1.0, 0.0], [2.0, 3.0]]);
        assert!(LowerMatrix::new(ok).is_ok());

        let bad = DynamicMatrix::from_rows([[1.0, 5.0], [2.0, 3.0]]);
        assert!(matches!(
            LowerMatrix::new(bad),
            Err(DilatedError::Restricted(_))
        ));

        let rect = DynamicMatrix::<f64>::zeros(2, 3);
        assert!(matches!(
            LowerMatrix::new(rect),
            Err(DilatedError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_unit_diagonal_pattern() {
        let inner = DynamicMatrix::from_rows([[1.0, 0.0], [4.0, 1.0]]);
        let u = UniLowerMatrix::new(inner).unwrap();
        assert_eq!(u.get(0, 0), 1.0);
        assert_eq!(u.get(1, 0), 4.0);
        assert_eq!(u.get(0, 1), 0.0);
        assert!(u.structure().uni_lower);

        let off = DynamicMatrix::from_rows([[2.0, 0.0], [4.0, 1.0]]);
        assert!(UniLowerMatrix::new(off).is_err());
    }

    #[test]
    fn test_mutation_predicates() {
        let l = LowerMatrix::new(DynamicMatrix::from_rows([[1.0, 0.0], [2.0, 3.0]])).unwrap();
        assert!(l.try_set(1, 0, 7.0));
        assert!(l.try_set(0, 1, 0.0));
        assert!(!l.try_set(0, 1, 7.0));
        assert!(!l.try_add(0, 1, 1.0));
        assert!(l.try_mult(0, 1, 9.0));

        let u = UniUpperMatrix::new(DynamicMatrix::from_rows([[1.0, 5.0], [0.0, 1.0]])).unwrap();
        assert!(!u.try_set(0, 0, 2.0));
        assert!(u.try_set(0, 0, 1.0));
        assert!(!u.try_mult(1, 1, 3.0));
        assert!(u.try_div(1, 1, 1.0));
    }

    #[test]
    fn test_assign_is_all_or_nothing() {
        let mut l =
            LowerMatrix::new(DynamicMatrix::from_rows([[1.0, 0.0], [2.0, 3.0]])).unwrap();
        let bad = DynamicMatrix::from_rows([[9.0, 9.0], [9.0, 9.0]]);
        assert!(matches!(
            l.assign_from(&bad),
            Err(DilatedError::Restricted(_))
        ));
        // refused assignment left everything in place
        assert_eq!(l.get(0, 0), 1.0);
        assert_eq!(l.get(1, 1), 3.0);

        let good = DynamicMatrix::from_rows([[9.0, 0.0], [8.0, 7.0]]);
        l.assign_from(&good).unwrap();
        assert_eq!(l.get(1, 0), 8.0);
    }

    #[test]
    fn test_reset_keeps_unit_diagonal() {
        let mut u =
            UniLowerMatrix::new(DynamicMatrix::from_rows([[1.0, 0.0], [4.0, 1.0]])).unwrap();
        u.reset();
        assert_eq!(u.get(1, 0), 0.0);
        assert_eq!(u.get(0, 0), 1.0);
    }

    #[test]
    fn test_derestrict_exposes_inner() {
        let mut l =
            LowerMatrix::new(DynamicMatrix::from_rows([[1.0, 0.0], [2.0, 3.0]])).unwrap();
        assert!(l.is_intact());
        l.unrestricted_mut().set(0, 1, 9.0);
        assert_eq!(l.get(0, 1), 9.0);
        assert!(!l.is_intact());
        let raw = l.into_unrestricted();
        assert_eq!(raw.get(0, 1), 9.0);
    }
}
