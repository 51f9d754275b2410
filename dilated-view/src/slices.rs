//! Page, row, and column slices of tensor operands.
//!
//! Each slice fixes one tensor axis and exposes the remaining two as a
//! matrix: a page slice is rows by columns, a row slice is pages by
//! columns, a column slice is pages by rows. The accessors return a
//! [`DilatedSubmatrix`] over a fixed-index adapter bound to the innermost
//! operand, mirroring how `row` and `column` work for matrices, so slices
//! of subtensor views collapse instead of stacking wrappers.

use crate::axis::{Axis, AxisRange};
use crate::operand::{
    IntoMatrixWindow, IntoMatrixWindowMut, IntoTensorWindow, IntoTensorWindowMut, Operand,
    OperandMut,
};
use crate::submatrix::{
    dilated_submatrix_mut_unchecked, dilated_submatrix_unchecked, DilatedSubmatrix,
    DilatedSubmatrixMut,
};
use crate::traits::{IsSame, Matrix, MatrixMut, Tensor, TensorMut};
use crate::{DilatedError, Result};

/// One page of a tensor operand, seen as a rows-by-columns matrix.
#[derive(Debug, Clone)]
pub struct PageSlice<'a, T> {
    op: Operand<'a, T>,
    page: usize,
}

/// Mutable counterpart of [`PageSlice`].
#[derive(Debug)]
pub struct PageSliceMut<'a, T> {
    op: OperandMut<'a, T>,
    page: usize,
}

/// One row plane of a tensor operand, seen as a pages-by-columns matrix.
#[derive(Debug, Clone)]
pub struct RowSlice<'a, T> {
    op: Operand<'a, T>,
    row: usize,
}

/// Mutable counterpart of [`RowSlice`].
#[derive(Debug)]
pub struct RowSliceMut<'a, T> {
    op: OperandMut<'a, T>,
    row: usize,
}

/// One column plane of a tensor operand, seen as a pages-by-rows matrix.
#[derive(Debug, Clone)]
pub struct ColumnSlice<'a, T> {
    op: Operand<'a, T>,
    column: usize,
}

/// Mutable counterpart of [`ColumnSlice`].
#[derive(Debug)]
pub struct ColumnSliceMut<'a, T> {
    op: OperandMut<'a, T>,
    column: usize,
}

// ==================== accessors ====================

/// Page `index` of `operand` as a read-only matrix view.
pub fn page<'a, W>(
    operand: W,
    index: usize,
) -> Result<DilatedSubmatrix<'a, PageSlice<'a, W::Target>>>
where
    W: IntoTensorWindow<'a>,
{
    let (op, pages, rows, columns) = operand.into_window();
    if index >= pages.extent {
        return Err(DilatedError::IndexOutOfBounds {
            axis: Axis::Page,
            index,
            extent: pages.extent,
        });
    }
    let slice = PageSlice {
        op,
        page: pages.translate(index),
    };
    Ok(dilated_submatrix_unchecked(
        slice,
        rows.offset,
        columns.offset,
        rows.extent,
        columns.extent,
        rows.dilation,
        columns.dilation,
    ))
}

/// Page `index` of `operand` as a mutable matrix view.
pub fn page_mut<'a, W>(
    operand: W,
    index: usize,
) -> Result<DilatedSubmatrixMut<'a, PageSliceMut<'a, W::Target>>>
where
    W: IntoTensorWindowMut<'a>,
{
    let (op, pages, rows, columns) = operand.into_window_mut();
    if index >= pages.extent {
        return Err(DilatedError::IndexOutOfBounds {
            axis: Axis::Page,
            index,
            extent: pages.extent,
        });
    }
    let slice = PageSliceMut {
        op,
        page: pages.translate(index),
    };
    Ok(dilated_submatrix_mut_unchecked(
        slice,
        rows.offset,
        columns.offset,
        rows.extent,
        columns.extent,
        rows.dilation,
        columns.dilation,
    ))
}

/// Row plane `index` of `operand` as a read-only pages-by-columns view.
pub fn row_slice<'a, W>(
    operand: W,
    index: usize,
) -> Result<DilatedSubmatrix<'a, RowSlice<'a, W::Target>>>
where
    W: IntoTensorWindow<'a>,
{
    let (op, pages, rows, columns) = operand.into_window();
    if index >= rows.extent {
        return Err(DilatedError::IndexOutOfBounds {
            axis: Axis::Row,
            index,
            extent: rows.extent,
        });
    }
    let slice = RowSlice {
        op,
        row: rows.translate(index),
    };
    Ok(dilated_submatrix_unchecked(
        slice,
        pages.offset,
        columns.offset,
        pages.extent,
        columns.extent,
        pages.dilation,
        columns.dilation,
    ))
}

/// Row plane `index` of `operand` as a mutable view.
pub fn row_slice_mut<'a, W>(
    operand: W,
    index: usize,
) -> Result<DilatedSubmatrixMut<'a, RowSliceMut<'a, W::Target>>>
where
    W: IntoTensorWindowMut<'a>,
{
    let (op, pages, rows, columns) = operand.into_window_mut();
    if index >= rows.extent {
        return Err(DilatedError::IndexOutOfBounds {
            axis: Axis::Row,
            index,
            extent: rows.extent,
        });
    }
    let slice = RowSliceMut {
        op,
        row: rows.translate(index),
    };
    Ok(dilated_submatrix_mut_unchecked(
        slice,
        pages.offset,
        columns.offset,
        pages.extent,
        columns.extent,
        pages.dilation,
        columns.dilation,
    ))
}

/// Column plane `index` of `operand` as a read-only pages-by-rows view.
pub fn column_slice<'a, W>(
    operand: W,
    index: usize,
) -> Result<DilatedSubmatrix<'a, ColumnSlice<'a, W::Target>>>
where
    W: IntoTensorWindow<'a>,
{
    let (op, pages, rows, columns) = operand.into_window();
    if index >= columns.extent {
        return Err(DilatedError::IndexOutOfBounds {
            axis: Axis::Column,
            index,
            extent: columns.extent,
        });
    }
    let slice = ColumnSlice {
        op,
        column: columns.translate(index),
    };
    Ok(dilated_submatrix_unchecked(
        slice,
        pages.offset,
        rows.offset,
        pages.extent,
        rows.extent,
        pages.dilation,
        rows.dilation,
    ))
}

/// Column plane `index` of `operand` as a mutable view.
pub fn column_slice_mut<'a, W>(
    operand: W,
    index: usize,
) -> Result<DilatedSubmatrixMut<'a, ColumnSliceMut<'a, W::Target>>>
where
    W: IntoTensorWindowMut<'a>,
{
    let (op, pages, rows, columns) = operand.into_window_mut();
    if index >= columns.extent {
        return Err(DilatedError::IndexOutOfBounds {
            axis: Axis::Column,
            index,
            extent: columns.extent,
        });
    }
    let slice = ColumnSliceMut {
        op,
        column: columns.translate(index),
    };
    Ok(dilated_submatrix_mut_unchecked(
        slice,
        pages.offset,
        rows.offset,
        pages.extent,
        rows.extent,
        pages.dilation,
        rows.dilation,
    ))
}

// ==================== adapter impls ====================

macro_rules! impl_slice_matrix {
    ($view:ident, $rows:ident, $columns:ident, $field:ident,
     ($self:ident, $i:ident, $j:ident) => ($p:expr, $r:expr, $c:expr)) => {
        impl<'a, T: Tensor> Matrix for $view<'a, T> {
            type Elem = T::Elem;

            fn rows(&self) -> usize {
                self.op.as_ref().$rows()
            }

            fn columns(&self) -> usize {
                self.op.as_ref().$columns()
            }

            #[inline]
            fn get(&$self, $i: usize, $j: usize) -> T::Elem {
                $self.op.as_ref().get($p, $r, $c)
            }

            fn is_intact(&self) -> bool {
                self.op.as_ref().is_intact()
            }

            fn try_set(&$self, $i: usize, $j: usize, value: T::Elem) -> bool {
                $self.op.as_ref().try_set($p, $r, $c, value)
            }

            fn try_add(&$self, $i: usize, $j: usize, value: T::Elem) -> bool {
                $self.op.as_ref().try_add($p, $r, $c, value)
            }

            fn try_sub(&$self, $i: usize, $j: usize, value: T::Elem) -> bool {
                $self.op.as_ref().try_sub($p, $r, $c, value)
            }

            fn try_mult(&$self, $i: usize, $j: usize, value: T::Elem) -> bool {
                $self.op.as_ref().try_mult($p, $r, $c, value)
            }

            fn try_div(&$self, $i: usize, $j: usize, value: T::Elem) -> bool {
                $self.op.as_ref().try_div($p, $r, $c, value)
            }
        }

        impl<'a, T: Tensor + IsSame> IsSame for $view<'a, T> {
            fn is_same(&self, other: &Self) -> bool {
                self.op.as_ref().is_same(other.op.as_ref()) && self.$field == other.$field
            }
        }
    };
}

impl_slice_matrix!(PageSlice, rows, columns, page, (self, i, j) => (self.page, i, j));
impl_slice_matrix!(PageSliceMut, rows, columns, page, (self, i, j) => (self.page, i, j));
impl_slice_matrix!(RowSlice, pages, columns, row, (self, i, j) => (i, self.row, j));
impl_slice_matrix!(RowSliceMut, pages, columns, row, (self, i, j) => (i, self.row, j));
impl_slice_matrix!(ColumnSlice, pages, rows, column, (self, i, j) => (i, j, self.column));
impl_slice_matrix!(ColumnSliceMut, pages, rows, column, (self, i, j) => (i, j, self.column));

impl<'a, T: TensorMut> MatrixMut for PageSliceMut<'a, T> {
    #[inline]
    fn set(&mut self, row: usize, column: usize, value: T::Elem) {
        let page = self.page;
        self.op.as_mut().set(page, row, column, value);
    }
}

impl<'a, T: TensorMut> MatrixMut for RowSliceMut<'a, T> {
    #[inline]
    fn set(&mut self, page: usize, column: usize, value: T::Elem) {
        let row = self.row;
        self.op.as_mut().set(page, row, column, value);
    }
}

impl<'a, T: TensorMut> MatrixMut for ColumnSliceMut<'a, T> {
    #[inline]
    fn set(&mut self, page: usize, row: usize, value: T::Elem) {
        let column = self.column;
        self.op.as_mut().set(page, row, column, value);
    }
}

macro_rules! impl_slice_window {
    ($view:ident) => {
        impl<'a, T: Tensor> IntoMatrixWindow<'a> for $view<'a, T> {
            type Target = Self;

            fn into_window(self) -> (Operand<'a, Self>, AxisRange, AxisRange) {
                let rows = AxisRange::identity(self.rows());
                let columns = AxisRange::identity(self.columns());
                (Operand::Owned(self), rows, columns)
            }
        }
    };
}

macro_rules! impl_slice_window_mut {
    ($view:ident) => {
        impl<'a, T: TensorMut> IntoMatrixWindowMut<'a> for $view<'a, T> {
            type Target = Self;

            fn into_window_mut(self) -> (OperandMut<'a, Self>, AxisRange, AxisRange) {
                let rows = AxisRange::identity(self.rows());
                let columns = AxisRange::identity(self.columns());
                (OperandMut::Owned(self), rows, columns)
            }
        }
    };
}

impl_slice_window!(PageSlice);
impl_slice_window!(RowSlice);
impl_slice_window!(ColumnSlice);
impl_slice_window_mut!(PageSliceMut);
impl_slice_window_mut!(RowSliceMut);
impl_slice_window_mut!(ColumnSliceMut);
