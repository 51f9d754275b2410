//! Symmetric and Hermitian adaptors over matrix operands.
//!
//! Unlike the triangular adaptors, these do not refuse off-diagonal writes:
//! a single-element write is mirrored across the diagonal so the invariant
//! survives. Whole-block assignment is still policed, because a block that
//! straddles the diagonal must itself be consistent with its mirror image
//! or the element-wise writer would leave the two halves disagreeing.

use dilated_traits::{Conjugate, Scalar, StructureFlags};

use crate::axis::AxisRange;
use crate::operand::{
    IntoMatrixWindow, IntoMatrixWindowMut, Operand, OperandMut,
};
use crate::traits::{Clear, IsSame, Matrix, MatrixMut, Restrictable};
use crate::{DilatedError, Result};

/// The mirror of block position `(i, j)` under transposition, if it falls
/// inside the same assigned block.
fn mirror_in_block(
    row: usize,
    column: usize,
    block_rows: usize,
    block_columns: usize,
    i: usize,
    j: usize,
) -> Option<(usize, usize)> {
    let (a, b) = (row + i, column + j);
    if b >= row && b < row + block_rows && a >= column && a < column + block_columns {
        Some((b - row, a - column))
    } else {
        None
    }
}

/// A matrix adaptor maintaining `a[i][j] == a[j][i]`.
#[derive(Debug, Clone)]
pub struct SymmetricMatrix<M> {
    inner: M,
}

/// A matrix adaptor maintaining `a[i][j] == conj(a[j][i])`.
#[derive(Debug, Clone)]
pub struct HermitianMatrix<M> {
    inner: M,
}

// ==================== symmetric ====================

impl<M: Matrix> SymmetricMatrix<M> {
    /// Wrap `inner`, checking that it is square and symmetric.
    pub fn new(inner: M) -> Result<Self> {
        if inner.rows() != inner.columns() {
            return Err(DilatedError::DimensionMismatch(format!(
                "symmetric adaptor requires a square matrix, got {}x{}",
                inner.rows(),
                inner.columns()
            )));
        }
        for i in 0..inner.rows() {
            for j in 0..i {
                if inner.get(i, j) != inner.get(j, i) {
                    return Err(DilatedError::Restricted(format!(
                        "matrix values at ({i}, {j}) and ({j}, {i}) are not symmetric"
                    )));
                }
            }
        }
        Ok(Self { inner })
    }

    /// The wrapped matrix.
    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: Matrix> Matrix for SymmetricMatrix<M> {
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
        StructureFlags::SYMMETRIC
    }

    fn is_intact(&self) -> bool {
        self.inner.is_intact()
            && (0..self.rows())
                .all(|i| (0..i).all(|j| self.inner.get(i, j) == self.inner.get(j, i)))
    }

    fn try_set(&self, row: usize, column: usize, value: M::Elem) -> bool {
        self.inner.try_set(row, column, value) && self.inner.try_set(column, row, value)
    }

    fn try_add(&self, row: usize, column: usize, value: M::Elem) -> bool {
        self.inner.try_add(row, column, value) && self.inner.try_add(column, row, value)
    }

    fn try_sub(&self, row: usize, column: usize, value: M::Elem) -> bool {
        self.inner.try_sub(row, column, value) && self.inner.try_sub(column, row, value)
    }

    fn try_mult(&self, row: usize, column: usize, value: M::Elem) -> bool {
        self.inner.try_mult(row, column, value) && self.inner.try_mult(column, row, value)
    }

    fn try_div(&self, row: usize, column: usize, value: M::Elem) -> bool {
        self.inner.try_div(row, column, value) && self.inner.try_div(column, row, value)
    }

    fn try_assign_from(
        &self,
        row: usize,
        column: usize,
        rhs: &dyn Matrix<Elem = M::Elem>,
    ) -> bool {
        for i in 0..rhs.rows() {
            for j in 0..rhs.columns() {
                if !self.try_set(row + i, column + j, rhs.get(i, j)) {
                    return false;
                }
                if let Some((mi, mj)) =
                    mirror_in_block(row, column, rhs.rows(), rhs.columns(), i, j)
                {
                    if rhs.get(i, j) != rhs.get(mi, mj) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

impl<M: MatrixMut> MatrixMut for SymmetricMatrix<M> {
    /// A write is mirrored across the diagonal.
    fn set(&mut self, row: usize, column: usize, value: M::Elem) {
        self.inner.set(row, column, value);
        if row != column {
            self.inner.set(column, row, value);
        }
    }
}

impl<M: MatrixMut> Restrictable for SymmetricMatrix<M> {
    type Unrestricted = M;

    fn unrestricted_mut(&mut self) -> &mut M {
        &mut self.inner
    }

    fn into_unrestricted(self) -> M {
        self.inner
    }
}

impl<M: Clear> Clear for SymmetricMatrix<M> {
    fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<M: Matrix> IsSame for SymmetricMatrix<M> {
    fn is_same(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<'a, M: Matrix> IntoMatrixWindow<'a> for &'a SymmetricMatrix<M> {
    type Target = SymmetricMatrix<M>;

    fn into_window(self) -> (Operand<'a, SymmetricMatrix<M>>, AxisRange, AxisRange) {
        let rows = AxisRange::identity(self.rows());
        let columns = AxisRange::identity(self.columns());
        (Operand::Borrowed(self), rows, columns)
    }
}

impl<'a, M: MatrixMut> IntoMatrixWindowMut<'a> for &'a mut SymmetricMatrix<M> {
    type Target = SymmetricMatrix<M>;

    fn into_window_mut(self) -> (OperandMut<'a, SymmetricMatrix<M>>, AxisRange, AxisRange) {
        let rows = AxisRange::identity(self.rows());
        let columns = AxisRange::identity(self.columns());
        (OperandMut::Borrowed(self), rows, columns)
    }
}

// ==================== hermitian ====================

impl<M: Matrix> HermitianMatrix<M> {
    /// Wrap `inner`, checking that it is square and Hermitian. The diagonal
    /// must equal its own conjugate.
    pub fn new(inner: M) -> Result<Self> {
        if inner.rows() != inner.columns() {
            return Err(DilatedError::DimensionMismatch(format!(
                "Hermitian adaptor requires a square matrix, got {}x{}",
                inner.rows(),
                inner.columns()
            )));
        }
        for i in 0..inner.rows() {
            for j in 0..=i {
                if inner.get(i, j) != inner.get(j, i).conj() {
                    return Err(DilatedError::Restricted(format!(
                        "matrix values at ({i}, {j}) and ({j}, {i}) are not conjugate"
                    )));
                }
            }
        }
        Ok(Self { inner })
    }

    /// The wrapped matrix.
    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: Matrix> Matrix for HermitianMatrix<M> {
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
        StructureFlags::HERMITIAN
    }

    fn is_intact(&self) -> bool {
        self.inner.is_intact()
            && (0..self.rows())
                .all(|i| (0..=i).all(|j| self.inner.get(i, j) == self.inner.get(j, i).conj()))
    }

    fn try_set(&self, row: usize, column: usize, value: M::Elem) -> bool {
        if row == column && value != value.conj() {
            return false;
        }
        self.inner.try_set(row, column, value)
            && self.inner.try_set(column, row, value.conj())
    }

    fn try_add(&self, row: usize, column: usize, value: M::Elem) -> bool {
        if row == column && value != value.conj() {
            return false;
        }
        self.inner.try_add(row, column, value)
            && self.inner.try_add(column, row, value.conj())
    }

    fn try_sub(&self, row: usize, column: usize, value: M::Elem) -> bool {
        if row == column && value != value.conj() {
            return false;
        }
        self.inner.try_sub(row, column, value)
            && self.inner.try_sub(column, row, value.conj())
    }

    fn try_mult(&self, row: usize, column: usize, value: M::Elem) -> bool {
        if row == column && value != value.conj() {
            return false;
        }
        self.inner.try_mult(row, column, value)
            && self.inner.try_mult(column, row, value.conj())
    }

    fn try_div(&self, row: usize, column: usize, value: M::Elem) -> bool {
        if row == column && value != value.conj() {
            return false;
        }
        self.inner.try_div(row, column, value)
            && self.inner.try_div(column, row, value.conj())
    }

    fn try_assign_from(
        &self,
        row: usize,
        column: usize,
        rhs: &dyn Matrix<Elem = M::Elem>,
    ) -> bool {
        for i in 0..rhs.rows() {
            for j in 0..rhs.columns() {
                if !self.try_set(row + i, column + j, rhs.get(i, j)) {
                    return false;
                }
                if let Some((mi, mj)) =
                    mirror_in_block(row, column, rhs.rows(), rhs.columns(), i, j)
                {
                    if rhs.get(i, j) != rhs.get(mi, mj).conj() {
                        return false;
                    }
                }
            }
        }
        true
    }
}

impl<M: MatrixMut> MatrixMut for HermitianMatrix<M> {
    /// A write is mirrored across the diagonal with conjugation.
    fn set(&mut self, row: usize, column: usize, value: M::Elem) {
        debug_assert!(row != column || value == value.conj());
        self.inner.set(row, column, value);
        if row != column {
            self.inner.set(column, row, value.conj());
        }
    }
}

impl<M: MatrixMut> Restrictable for HermitianMatrix<M> {
    type Unrestricted = M;

    fn unrestricted_mut(&mut self) -> &mut M {
        &mut self.inner
    }

    fn into_unrestricted(self) -> M {
        self.inner
    }
}

impl<M: Clear> Clear for HermitianMatrix<M> {
    fn clear(&mut self) {
        self.inner.clear();
    }
}

impl<M: Matrix> IsSame for HermitianMatrix<M> {
    fn is_same(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl<'a, M: Matrix> IntoMatrixWindow<'a> for &'a HermitianMatrix<M> {
    type Target = HermitianMatrix<M>;

    fn into_window(self) -> (Operand<'a, HermitianMatrix<M>>, AxisRange, AxisRange) {
        let rows = AxisRange::identity(self.rows());
        let columns = AxisRange::identity(self.columns());
        (Operand::Borrowed(self), rows, columns)
    }
}

impl<'a, M: MatrixMut> IntoMatrixWindowMut<'a> for &'a mut HermitianMatrix<M> {
    type Target = HermitianMatrix<M>;

    fn into_window_mut(self) -> (OperandMut<'a, HermitianMatrix<M>>, AxisRange, AxisRange) {
        let rows = AxisRange::identity(self.rows());
        let columns = AxisRange::identity(self.columns());
        (OperandMut::Borrowed(self), rows, columns)
    }
}
