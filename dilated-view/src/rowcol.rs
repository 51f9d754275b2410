//! Row and column accessors.
//!
//! `row` and `column` expose one line of a matrix-shaped operand as a
//! vector view. The result is a [`DilatedSubvector`] over a fixed-index
//! adapter bound to the innermost operand, so taking a row of a
//! dilated-submatrix yields the operand's row narrowed to the view's
//! column range rather than a stack of wrappers, and subvectors of the
//! result keep collapsing through the ordinary window protocol.

use dilated_traits::Orientation;

use crate::axis::{Axis, AxisRange};
use crate::operand::{
    IntoMatrixWindow, IntoMatrixWindowMut, IntoVectorWindow, IntoVectorWindowMut, Operand,
    OperandMut,
};
use crate::subvector::{
    dilated_subvector_mut_unchecked, dilated_subvector_unchecked, DilatedSubvector,
    DilatedSubvectorMut,
};
use crate::traits::{IsSame, Matrix, MatrixMut, Vector, VectorMut};
use crate::{DilatedError, Result};

/// One row of a matrix operand, seen as a vector.
#[derive(Debug, Clone)]
pub struct RowView<'a, M> {
    op: Operand<'a, M>,
    row: usize,
}

/// Mutable counterpart of [`RowView`].
#[derive(Debug)]
pub struct RowViewMut<'a, M> {
    op: OperandMut<'a, M>,
    row: usize,
}

/// One column of a matrix operand, seen as a vector.
#[derive(Debug, Clone)]
pub struct ColumnView<'a, M> {
    op: Operand<'a, M>,
    column: usize,
}

/// Mutable counterpart of [`ColumnView`].
#[derive(Debug)]
pub struct ColumnViewMut<'a, M> {
    op: OperandMut<'a, M>,
    column: usize,
}

// ==================== accessors ====================

/// Row `index` of `operand` as a read-only vector view.
///
/// For a dilated-submatrix operand the result covers the view's column
/// range of the underlying operand's row.
pub fn row<'a, W>(
    operand: W,
    index: usize,
) -> Result<DilatedSubvector<'a, RowView<'a, W::Target>>>
where
    W: IntoMatrixWindow<'a>,
{
    let (op, rows, columns) = operand.into_window();
    if index >= rows.extent {
        return Err(DilatedError::IndexOutOfBounds {
            axis: Axis::Row,
            index,
            extent: rows.extent,
        });
    }
    let line = RowView {
        op,
        row: rows.translate(index),
    };
    Ok(dilated_subvector_unchecked(
        line,
        columns.offset,
        columns.extent,
        columns.dilation,
    ))
}

/// Row `index` of `operand` as a mutable vector view.
pub fn row_mut<'a, W>(
    operand: W,
    index: usize,
) -> Result<DilatedSubvectorMut<'a, RowViewMut<'a, W::Target>>>
where
    W: IntoMatrixWindowMut<'a>,
{
    let (op, rows, columns) = operand.into_window_mut();
    if index >= rows.extent {
        return Err(DilatedError::IndexOutOfBounds {
            axis: Axis::Row,
            index,
            extent: rows.extent,
        });
    }
    let line = RowViewMut {
        op,
        row: rows.translate(index),
    };
    Ok(dilated_subvector_mut_unchecked(
        line,
        columns.offset,
        columns.extent,
        columns.dilation,
    ))
}

/// Column `index` of `operand` as a read-only vector view.
pub fn column<'a, W>(
    operand: W,
    index: usize,
) -> Result<DilatedSubvector<'a, ColumnView<'a, W::Target>>>
where
    W: IntoMatrixWindow<'a>,
{
    let (op, rows, columns) = operand.into_window();
    if index >= columns.extent {
        return Err(DilatedError::IndexOutOfBounds {
            axis: Axis::Column,
            index,
            extent: columns.extent,
        });
    }
    let line = ColumnView {
        op,
        column: columns.translate(index),
    };
    Ok(dilated_subvector_unchecked(
        line,
        rows.offset,
        rows.extent,
        rows.dilation,
    ))
}

/// Column `index` of `operand` as a mutable vector view.
pub fn column_mut<'a, W>(
    operand: W,
    index: usize,
) -> Result<DilatedSubvectorMut<'a, ColumnViewMut<'a, W::Target>>>
where
    W: IntoMatrixWindowMut<'a>,
{
    let (op, rows, columns) = operand.into_window_mut();
    if index >= columns.extent {
        return Err(DilatedError::IndexOutOfBounds {
            axis: Axis::Column,
            index,
            extent: columns.extent,
        });
    }
    let line = ColumnViewMut {
        op,
        column: columns.translate(index),
    };
    Ok(dilated_subvector_mut_unchecked(
        line,
        rows.offset,
        rows.extent,
        rows.dilation,
    ))
}

// ==================== row adapters ====================

impl<'a, M: Matrix> Vector for RowView<'a, M> {
    type Elem = M::Elem;

    fn len(&self) -> usize {
        self.op.as_ref().columns()
    }

    #[inline]
    fn get(&self, index: usize) -> M::Elem {
        self.op.as_ref().get(self.row, index)
    }

    fn orientation(&self) -> Orientation {
        Orientation::Row
    }

    fn is_intact(&self) -> bool {
        self.op.as_ref().is_intact()
    }

    fn try_set(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_set(self.row, index, value)
    }

    fn try_add(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_add(self.row, index, value)
    }

    fn try_sub(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_sub(self.row, index, value)
    }

    fn try_mult(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_mult(self.row, index, value)
    }

    fn try_div(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_div(self.row, index, value)
    }
}

impl<'a, M: Matrix + IsSame> IsSame for RowView<'a, M> {
    fn is_same(&self, other: &Self) -> bool {
        self.op.as_ref().is_same(other.op.as_ref()) && self.row == other.row
    }
}

impl<'a, M: Matrix> IntoVectorWindow<'a> for RowView<'a, M> {
    type Target = Self;

    fn into_window(self) -> (Operand<'a, Self>, AxisRange) {
        let len = self.len();
        (Operand::Owned(self), AxisRange::identity(len))
    }
}

impl<'a, M: Matrix> Vector for RowViewMut<'a, M> {
    type Elem = M::Elem;

    fn len(&self) -> usize {
        self.op.as_ref().columns()
    }

    #[inline]
    fn get(&self, index: usize) -> M::Elem {
        self.op.as_ref().get(self.row, index)
    }

    fn orientation(&self) -> Orientation {
        Orientation::Row
    }

    fn is_intact(&self) -> bool {
        self.op.as_ref().is_intact()
    }

    fn try_set(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_set(self.row, index, value)
    }

    fn try_add(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_add(self.row, index, value)
    }

    fn try_sub(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_sub(self.row, index, value)
    }

    fn try_mult(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_mult(self.row, index, value)
    }

    fn try_div(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_div(self.row, index, value)
    }
}

impl<'a, M: MatrixMut> VectorMut for RowViewMut<'a, M> {
    #[inline]
    fn set(&mut self, index: usize, value: M::Elem) {
        let row = self.row;
        self.op.as_mut().set(row, index, value);
    }
}

impl<'a, M: Matrix + IsSame> IsSame for RowViewMut<'a, M> {
    fn is_same(&self, other: &Self) -> bool {
        self.op.as_ref().is_same(other.op.as_ref()) && self.row == other.row
    }
}

impl<'a, M: MatrixMut> IntoVectorWindowMut<'a> for RowViewMut<'a, M> {
    type Target = Self;

    fn into_window_mut(self) -> (OperandMut<'a, Self>, AxisRange) {
        let len = self.len();
        (OperandMut::Owned(self), AxisRange::identity(len))
    }
}

// ==================== column adapters ====================

impl<'a, M: Matrix> Vector for ColumnView<'a, M> {
    type Elem = M::Elem;

    fn len(&self) -> usize {
        self.op.as_ref().rows()
    }

    #[inline]
    fn get(&self, index: usize) -> M::Elem {
        self.op.as_ref().get(index, self.column)
    }

    fn is_intact(&self) -> bool {
        self.op.as_ref().is_intact()
    }

    fn try_set(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_set(index, self.column, value)
    }

    fn try_add(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_add(index, self.column, value)
    }

    fn try_sub(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_sub(index, self.column, value)
    }

    fn try_mult(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_mult(index, self.column, value)
    }

    fn try_div(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_div(index, self.column, value)
    }
}

impl<'a, M: Matrix + IsSame> IsSame for ColumnView<'a, M> {
    fn is_same(&self, other: &Self) -> bool {
        self.op.as_ref().is_same(other.op.as_ref()) && self.column == other.column
    }
}

impl<'a, M: Matrix> IntoVectorWindow<'a> for ColumnView<'a, M> {
    type Target = Self;

    fn into_window(self) -> (Operand<'a, Self>, AxisRange) {
        let len = self.len();
        (Operand::Owned(self), AxisRange::identity(len))
    }
}

impl<'a, M: Matrix> Vector for ColumnViewMut<'a, M> {
    type Elem = M::Elem;

    fn len(&self) -> usize {
        self.op.as_ref().rows()
    }

    #[inline]
    fn get(&self, index: usize) -> M::Elem {
        self.op.as_ref().get(index, self.column)
    }

    fn is_intact(&self) -> bool {
        self.op.as_ref().is_intact()
    }

    fn try_set(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_set(index, self.column, value)
    }

    fn try_add(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_add(index, self.column, value)
    }

    fn try_sub(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_sub(index, self.column, value)
    }

    fn try_mult(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_mult(index, self.column, value)
    }

    fn try_div(&self, index: usize, value: M::Elem) -> bool {
        self.op.as_ref().try_div(index, self.column, value)
    }
}

impl<'a, M: MatrixMut> VectorMut for ColumnViewMut<'a, M> {
    #[inline]
    fn set(&mut self, index: usize, value: M::Elem) {
        let column = self.column;
        self.op.as_mut().set(index, column, value);
    }
}

impl<'a, M: Matrix + IsSame> IsSame for ColumnViewMut<'a, M> {
    fn is_same(&self, other: &Self) -> bool {
        self.op.as_ref().is_same(other.op.as_ref()) && self.column == other.column
    }
}

impl<'a, M: MatrixMut> IntoVectorWindowMut<'a> for ColumnViewMut<'a, M> {
    type Target = Self;

    fn into_window_mut(self) -> (OperandMut<'a, Self>, AxisRange) {
        let len = self.len();
        (OperandMut::Owned(self), AxisRange::identity(len))
    }
}
