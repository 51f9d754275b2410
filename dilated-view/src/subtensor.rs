//! Dilated subtensor views.

use crate::axis::{Axis, AxisRange};
use crate::operand::{
    debug_validate_range, validate_range, IntoTensorWindow, IntoTensorWindowMut, Operand,
    OperandMut,
};
use crate::traits::{Clear, IsSame, Tensor, TensorMut};
use crate::Result;

/// A read-only dilated box selection of a tensor operand.
#[derive(Debug, Clone)]
pub struct DilatedSubtensor<'a, T> {
    op: Operand<'a, T>,
    pages: AxisRange,
    rows: AxisRange,
    columns: AxisRange,
}

/// A mutable dilated box selection of a tensor operand.
#[derive(Debug)]
pub struct DilatedSubtensorMut<'a, T> {
    op: OperandMut<'a, T>,
    pages: AxisRange,
    rows: AxisRange,
    columns: AxisRange,
}

// ==================== factories ====================

/// A dilated subtensor of `operand`, one `(offset, extent, dilation)`
/// triple per axis in page, row, column order.
#[allow(clippy::too_many_arguments)]
pub fn dilated_subtensor<'a, W>(
    operand: W,
    page: usize,
    row: usize,
    column: usize,
    pages: usize,
    rows: usize,
    columns: usize,
    page_dilation: usize,
    row_dilation: usize,
    column_dilation: usize,
) -> Result<DilatedSubtensor<'a, W::Target>>
where
    W: IntoTensorWindow<'a>,
{
    let (op, page_window, row_window, column_window) = operand.into_window();
    let page_request = AxisRange::new(page, pages, page_dilation);
    let row_request = AxisRange::new(row, rows, row_dilation);
    let column_request = AxisRange::new(column, columns, column_dilation);
    validate_range(Axis::Page, page_request, page_window.extent)?;
    validate_range(Axis::Row, row_request, row_window.extent)?;
    validate_range(Axis::Column, column_request, column_window.extent)?;
    Ok(DilatedSubtensor {
        op,
        pages: page_window.compose(page_request),
        rows: row_window.compose(row_request),
        columns: column_window.compose(column_request),
    })
}

/// Like [`dilated_subtensor`] but skips the range checks. The caller must
/// uphold them; debug builds assert.
#[allow(clippy::too_many_arguments)]
pub fn dilated_subtensor_unchecked<'a, W>(
    operand: W,
    page: usize,
    row: usize,
    column: usize,
    pages: usize,
    rows: usize,
    columns: usize,
    page_dilation: usize,
    row_dilation: usize,
    column_dilation: usize,
) -> DilatedSubtensor<'a, W::Target>
where
    W: IntoTensorWindow<'a>,
{
    let (op, page_window, row_window, column_window) = operand.into_window();
    let page_request = AxisRange::new(page, pages, page_dilation);
    let row_request = AxisRange::new(row, rows, row_dilation);
    let column_request = AxisRange::new(column, columns, column_dilation);
    debug_validate_range(Axis::Page, page_request, page_window.extent);
    debug_validate_range(Axis::Row, row_request, row_window.extent);
    debug_validate_range(Axis::Column, column_request, column_window.extent);
    DilatedSubtensor {
        op,
        pages: page_window.compose(page_request),
        rows: row_window.compose(row_request),
        columns: column_window.compose(column_request),
    }
}

/// A contiguous subtensor, i.e. dilation 1 on every axis.
pub fn subtensor<'a, W>(
    operand: W,
    page: usize,
    row: usize,
    column: usize,
    pages: usize,
    rows: usize,
    columns: usize,
) -> Result<DilatedSubtensor<'a, W::Target>>
where
    W: IntoTensorWindow<'a>,
{
    dilated_subtensor(operand, page, row, column, pages, rows, columns, 1, 1, 1)
}

/// Mutable counterpart of [`dilated_subtensor`].
#[allow(clippy::too_many_arguments)]
pub fn dilated_subtensor_mut<'a, W>(
    operand: W,
    page: usize,
    row: usize,
    column: usize,
    pages: usize,
    rows: usize,
    columns: usize,
    page_dilation: usize,
    row_dilation: usize,
    column_dilation: usize,
) -> Result<DilatedSubtensorMut<'a, W::Target>>
where
    W: IntoTensorWindowMut<'a>,
{
    let (op, page_window, row_window, column_window) = operand.into_window_mut();
    let page_request = AxisRange::new(page, pages, page_dilation);
    let row_request = AxisRange::new(row, rows, row_dilation);
    let column_request = AxisRange::new(column, columns, column_dilation);
    validate_range(Axis::Page, page_request, page_window.extent)?;
    validate_range(Axis::Row, row_request, row_window.extent)?;
    validate_range(Axis::Column, column_request, column_window.extent)?;
    Ok(DilatedSubtensorMut {
        op,
        pages: page_window.compose(page_request),
        rows: row_window.compose(row_request),
        columns: column_window.compose(column_request),
    })
}

/// Like [`dilated_subtensor_mut`] but skips the range checks. The caller
/// must uphold them; debug builds assert.
#[allow(clippy::too_many_arguments)]
pub fn dilated_subtensor_mut_unchecked<'a, W>(
    operand: W,
    page: usize,
    row: usize,
    column: usize,
    pages: usize,
    rows: usize,
    columns: usize,
    page_dilation: usize,
    row_dilation: usize,
    column_dilation: usize,
) -> DilatedSubtensorMut<'a, W::Target>
where
    W: IntoTensorWindowMut<'a>,
{
    let (op, page_window, row_window, column_window) = operand.into_window_mut();
    let page_request = AxisRange::new(page, pages, page_dilation);
    let row_request = AxisRange::new(row, rows, row_dilation);
    let column_request = AxisRange::new(column, columns, column_dilation);
    debug_validate_range(Axis::Page, page_request, page_window.extent);
    debug_validate_range(Axis::Row, row_request, row_window.extent);
    debug_validate_range(Axis::Column, column_request, column_window.extent);
    DilatedSubtensorMut {
        op,
        pages: page_window.compose(page_request),
        rows: row_window.compose(row_request),
        columns: column_window.compose(column_request),
    }
}

/// Mutable contiguous subtensor.
pub fn subtensor_mut<'a, W>(
    operand: W,
    page: usize,
    row: usize,
    column: usize,
    pages: usize,
    rows: usize,
    columns: usize,
) -> Result<DilatedSubtensorMut<'a, W::Target>>
where
    W: IntoTensorWindowMut<'a>,
{
    dilated_subtensor_mut(operand, page, row, column, pages, rows, columns, 1, 1, 1)
}

/// The contiguous band of `extent` pages starting at `offset`, spanning
/// the operand's full row and column windows.
pub fn pages<'a, W>(operand: W, offset: usize, extent: usize) -> Result<DilatedSubtensor<'a, W::Target>>
where
    W: IntoTensorWindow<'a>,
{
    let (op, page_window, row_window, column_window) = operand.into_window();
    let request = AxisRange::contiguous(offset, extent);
    validate_range(Axis::Page, request, page_window.extent)?;
    Ok(DilatedSubtensor {
        op,
        pages: page_window.compose(request),
        rows: row_window,
        columns: column_window,
    })
}

/// Mutable counterpart of [`pages`].
pub fn pages_mut<'a, W>(
    operand: W,
    offset: usize,
    extent: usize,
) -> Result<DilatedSubtensorMut<'a, W::Target>>
where
    W: IntoTensorWindowMut<'a>,
{
    let (op, page_window, row_window, column_window) = operand.into_window_mut();
    let request = AxisRange::contiguous(offset, extent);
    validate_range(Axis::Page, request, page_window.extent)?;
    Ok(DilatedSubtensorMut {
        op,
        pages: page_window.compose(request),
        rows: row_window,
        columns: column_window,
    })
}

// ==================== shared translation logic ====================

macro_rules! impl_tensor_for_view {
    ($view:ident) => {
        impl<'a, T: Tensor> Tensor for $view<'a, T> {
            type Elem = T::Elem;

            fn pages(&self) -> usize {
                self.pages.extent
            }

            fn rows(&self) -> usize {
                self.rows.extent
            }

            fn columns(&self) -> usize {
                self.columns.extent
            }

            #[inline]
            fn get(&self, page: usize, row: usize, column: usize) -> T::Elem {
                debug_assert!(
                    page < self.pages.extent
                        && row < self.rows.extent
                        && column < self.columns.extent
                );
                self.op.as_ref().get(
                    self.pages.translate(page),
                    self.rows.translate(row),
                    self.columns.translate(column),
                )
            }

            fn is_intact(&self) -> bool {
                self.op.as_ref().is_intact()
            }

            fn try_set(&self, page: usize, row: usize, column: usize, value: T::Elem) -> bool {
                self.op.as_ref().try_set(
                    self.pages.translate(page),
                    self.rows.translate(row),
                    self.columns.translate(column),
                    value,
                )
            }

            fn try_add(&self, page: usize, row: usize, column: usize, value: T::Elem) -> bool {
                self.op.as_ref().try_add(
                    self.pages.translate(page),
                    self.rows.translate(row),
                    self.columns.translate(column),
                    value,
                )
            }

            fn try_sub(&self, page: usize, row: usize, column: usize, value: T::Elem) -> bool {
                self.op.as_ref().try_sub(
                    self.pages.translate(page),
                    self.rows.translate(row),
                    self.columns.translate(column),
                    value,
                )
            }

            fn try_mult(&self, page: usize, row: usize, column: usize, value: T::Elem) -> bool {
                self.op.as_ref().try_mult(
                    self.pages.translate(page),
                    self.rows.translate(row),
                    self.columns.translate(column),
                    value,
                )
            }

            fn try_div(&self, page: usize, row: usize, column: usize, value: T::Elem) -> bool {
                self.op.as_ref().try_div(
                    self.pages.translate(page),
                    self.rows.translate(row),
                    self.columns.translate(column),
                    value,
                )
            }

            fn try_assign_from(
                &self,
                page: usize,
                row: usize,
                column: usize,
                rhs: &dyn Tensor<Elem = T::Elem>,
            ) -> bool {
                if self.pages.dilation == 1 && self.rows.dilation == 1 && self.columns.dilation == 1
                {
                    self.op.as_ref().try_assign_from(
                        self.pages.translate(page),
                        self.rows.translate(row),
                        self.columns.translate(column),
                        rhs,
                    )
                } else {
                    (0..rhs.pages()).all(|p| {
                        (0..rhs.rows()).all(|i| {
                            (0..rhs.columns()).all(|j| {
                                self.try_set(page + p, row + i, column + j, rhs.get(p, i, j))
                            })
                        })
                    })
                }
            }
        }

        impl<'a, T: Tensor> $view<'a, T> {
            /// Page offset of the window in operand coordinates.
            pub fn page_offset(&self) -> usize {
                self.pages.offset
            }

            /// Row offset of the window in operand coordinates.
            pub fn row_offset(&self) -> usize {
                self.rows.offset
            }

            /// Column offset of the window in operand coordinates.
            pub fn column_offset(&self) -> usize {
                self.columns.offset
            }

            /// Page step of the window in operand coordinates.
            pub fn page_dilation(&self) -> usize {
                self.pages.dilation
            }

            /// Row step of the window in operand coordinates.
            pub fn row_dilation(&self) -> usize {
                self.rows.dilation
            }

            /// Column step of the window in operand coordinates.
            pub fn column_dilation(&self) -> usize {
                self.columns.dilation
            }

            /// The viewed operand.
            pub fn operand(&self) -> &T {
                self.op.as_ref()
            }
        }
    };
}

impl_tensor_for_view!(DilatedSubtensor);
impl_tensor_for_view!(DilatedSubtensorMut);

// ==================== read view ====================

impl<'a, T: Tensor + IsSame> IsSame for DilatedSubtensor<'a, T> {
    fn is_same(&self, other: &Self) -> bool {
        self.operand().is_same(other.operand())
            && self.pages == other.pages
            && self.rows == other.rows
            && self.columns == other.columns
    }
}

impl<'a, T: Tensor + IsSame> IsSame<T> for DilatedSubtensor<'a, T> {
    fn is_same(&self, other: &T) -> bool {
        self.operand().is_same(other)
            && self.pages.is_full(self.operand().pages())
            && self.rows.is_full(self.operand().rows())
            && self.columns.is_full(self.operand().columns())
    }
}

impl<'a, 'b, T: Tensor> IntoTensorWindow<'b> for &'b DilatedSubtensor<'a, T> {
    type Target = T;

    fn into_window(self) -> (Operand<'b, T>, AxisRange, AxisRange, AxisRange) {
        (
            Operand::Borrowed(self.op.as_ref()),
            self.pages,
            self.rows,
            self.columns,
        )
    }
}

impl<'a, T: Tensor> IntoTensorWindow<'a> for DilatedSubtensor<'a, T> {
    type Target = T;

    fn into_window(self) -> (Operand<'a, T>, AxisRange, AxisRange, AxisRange) {
        (self.op, self.pages, self.rows, self.columns)
    }
}

// ==================== mutable view ====================

impl<'a, T: TensorMut> TensorMut for DilatedSubtensorMut<'a, T> {
    #[inline]
    fn set(&mut self, page: usize, row: usize, column: usize, value: T::Elem) {
        debug_assert!(
            page < self.pages.extent && row < self.rows.extent && column < self.columns.extent
        );
        let p = self.pages.translate(page);
        let r = self.rows.translate(row);
        let c = self.columns.translate(column);
        self.op.as_mut().set(p, r, c, value);
    }
}

impl<'a, T: TensorMut> Clear for DilatedSubtensorMut<'a, T> {
    /// Zeroes the covered elements; the rest of the operand is untouched.
    fn clear(&mut self) {
        self.reset();
    }
}

impl<'a, T: Tensor + IsSame> IsSame for DilatedSubtensorMut<'a, T> {
    fn is_same(&self, other: &Self) -> bool {
        self.operand().is_same(other.operand())
            && self.pages == other.pages
            && self.rows == other.rows
            && self.columns == other.columns
    }
}

impl<'a, T: Tensor + IsSame> IsSame<T> for DilatedSubtensorMut<'a, T> {
    fn is_same(&self, other: &T) -> bool {
        self.operand().is_same(other)
            && self.pages.is_full(self.operand().pages())
            && self.rows.is_full(self.operand().rows())
            && self.columns.is_full(self.operand().columns())
    }
}

impl<'a, 'b, T: Tensor> IntoTensorWindow<'b> for &'b DilatedSubtensorMut<'a, T> {
    type Target = T;

    fn into_window(self) -> (Operand<'b, T>, AxisRange, AxisRange, AxisRange) {
        (
            Operand::Borrowed(self.op.as_ref()),
            self.pages,
            self.rows,
            self.columns,
        )
    }
}

impl<'a, 'b, T: TensorMut> IntoTensorWindowMut<'b> for &'b mut DilatedSubtensorMut<'a, T> {
    type Target = T;

    fn into_window_mut(self) -> (OperandMut<'b, T>, AxisRange, AxisRange, AxisRange) {
        (
            OperandMut::Borrowed(self.op.as_mut()),
            self.pages,
            self.rows,
            self.columns,
        )
    }
}

impl<'a, T: TensorMut> IntoTensorWindowMut<'a> for DilatedSubtensorMut<'a, T> {
    type Target = T;

    fn into_window_mut(self) -> (OperandMut<'a, T>, AxisRange, AxisRange, AxisRange) {
        (self.op, self.pages, self.rows, self.columns)
    }
}
