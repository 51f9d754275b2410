//! Dilated submatrix views.
//!
//! The two-axis counterpart of [`crate::subvector`]: a view selects a
//! rectangle of its operand through one [`AxisRange`] per axis. Structural
//! guarantees of the operand survive only through diagonally aligned
//! square windows with equal dilation on both axes; everything else breaks
//! the geometry of the diagonal and reports no structure.

use dilated_traits::StructureFlags;

use crate::axis::{Axis, AxisRange};
use crate::operand::{
    debug_validate_range, validate_range, IntoMatrixWindow, IntoMatrixWindowMut, Operand,
    OperandMut,
};
use crate::traits::{Clear, IsSame, Matrix, MatrixMut, Restrictable, Vector};
use crate::Result;

/// A read-only dilated rectangular selection of a matrix operand.
#[derive(Debug, Clone)]
pub struct DilatedSubmatrix<'a, M> {
    op: Operand<'a, M>,
    rows: AxisRange,
    columns: AxisRange,
}

/// A mutable dilated rectangular selection of a matrix operand.
#[derive(Debug)]
pub struct DilatedSubmatrixMut<'a, M> {
    op: OperandMut<'a, M>,
    rows: AxisRange,
    columns: AxisRange,
}

// ==================== factories ====================

/// A dilated submatrix of `operand`: rows `row`, `row + row_dilation`, and
/// so on, crossed with the analogous column selection.
///
/// Fails if either dilation is zero or the last touched index on either
/// axis would fall outside the operand. Nested requests validate against
/// the window of the given view.
pub fn dilated_submatrix<'a, W>(
    operand: W,
    row: usize,
    column: usize,
    rows: usize,
    columns: usize,
    row_dilation: usize,
    column_dilation: usize,
) -> Result<DilatedSubmatrix<'a, W::Target>>
where
    W: IntoMatrixWindow<'a>,
{
    let (op, row_window, column_window) = operand.into_window();
    let row_request = AxisRange::new(row, rows, row_dilation);
    let column_request = AxisRange::new(column, columns, column_dilation);
    validate_range(Axis::Row, row_request, row_window.extent)?;
    validate_range(Axis::Column, column_request, column_window.extent)?;
    Ok(DilatedSubmatrix {
        op,
        rows: row_window.compose(row_request),
        columns: column_window.compose(column_request),
    })
}

/// Like [`dilated_submatrix`] but skips the range checks. The caller must
/// uphold them; debug builds assert.
pub fn dilated_submatrix_unchecked<'a, W>(
    operand: W,
    row: usize,
    column: usize,
    rows: usize,
    columns: usize,
    row_dilation: usize,
    column_dilation: usize,
) -> DilatedSubmatrix<'a, W::Target>
where
    W: IntoMatrixWindow<'a>,
{
    let (op, row_window, column_window) = operand.into_window();
    let row_request = AxisRange::new(row, rows, row_dilation);
    let column_request = AxisRange::new(column, columns, column_dilation);
    debug_validate_range(Axis::Row, row_request, row_window.extent);
    debug_validate_range(Axis::Column, column_request, column_window.extent);
    DilatedSubmatrix {
        op,
        rows: row_window.compose(row_request),
        columns: column_window.compose(column_request),
    }
}

/// A contiguous submatrix, i.e. dilation 1 on both axes.
pub fn submatrix<'a, W>(
    operand: W,
    row: usize,
    column: usize,
    rows: usize,
    columns: usize,
) -> Result<DilatedSubmatrix<'a, W::Target>>
where
    W: IntoMatrixWindow<'a>,
{
    dilated_submatrix(operand, row, column, rows, columns, 1, 1)
}

/// Mutable counterpart of [`dilated_submatrix`].
pub fn dilated_submatrix_mut<'a, W>(
    operand: W,
    row: usize,
    column: usize,
    rows: usize,
    columns: usize,
    row_dilation: usize,
    column_dilation: usize,
) -> Result<DilatedSubmatrixMut<'a, W::Target>>
where
    W: IntoMatrixWindowMut<'a>,
{
    let (op, row_window, column_window) = operand.into_window_mut();
    let row_request = AxisRange::new(row, rows, row_dilation);
    let column_request = AxisRange::new(column, columns, column_dilation);
    validate_range(Axis::Row, row_request, row_window.extent)?;
    validate_range(Axis::Column, column_request, column_window.extent)?;
    Ok(DilatedSubmatrixMut {
        op,
        rows: row_window.compose(row_request),
        columns: column_window.compose(column_request),
    })
}

/// Like [`dilated_submatrix_mut`] but skips the range checks.
pub fn dilated_submatrix_mut_unchecked<'a, W>(
    operand: W,
    row: usize,
    column: usize,
    rows: usize,
    columns: usize,
    row_dilation: usize,
    column_dilation: usize,
) -> DilatedSubmatrixMut<'a, W::Target>
where
    W: IntoMatrixWindowMut<'a>,
{
    let (op, row_window, column_window) = operand.into_window_mut();
    let row_request = AxisRange::new(row, rows, row_dilation);
    let column_request = AxisRange::new(column, columns, column_dilation);
    debug_validate_range(Axis::Row, row_request, row_window.extent);
    debug_validate_range(Axis::Column, column_request, column_window.extent);
    DilatedSubmatrixMut {
        op,
        rows: row_window.compose(row_request),
        columns: column_window.compose(column_request),
    }
}

/// Mutable contiguous submatrix.
pub fn submatrix_mut<'a, W>(
    operand: W,
    row: usize,
    column: usize,
    rows: usize,
    columns: usize,
) -> Result<DilatedSubmatrixMut<'a, W::Target>>
where
    W: IntoMatrixWindowMut<'a>,
{
    dilated_submatrix_mut(operand, row, column, rows, columns, 1, 1)
}

/// The contiguous band of `extent` rows starting at `offset`, spanning all
/// of the operand's columns.
pub fn rows<'a, W>(operand: W, offset: usize, extent: usize) -> Result<DilatedSubmatrix<'a, W::Target>>
where
    W: IntoMatrixWindow<'a>,
{
    let (op, row_window, column_window) = operand.into_window();
    let request = AxisRange::contiguous(offset, extent);
    validate_range(Axis::Row, request, row_window.extent)?;
    Ok(DilatedSubmatrix {
        op,
        rows: row_window.compose(request),
        columns: column_window,
    })
}

/// Mutable counterpart of [`rows`].
pub fn rows_mut<'a, W>(
    operand: W,
    offset: usize,
    extent: usize,
) -> Result<DilatedSubmatrixMut<'a, W::Target>>
where
    W: IntoMatrixWindowMut<'a>,
{
    let (op, row_window, column_window) = operand.into_window_mut();
    let request = AxisRange::contiguous(offset, extent);
    validate_range(Axis::Row, request, row_window.extent)?;
    Ok(DilatedSubmatrixMut {
        op,
        rows: row_window.compose(request),
        columns: column_window,
    })
}

/// The contiguous band of `extent` columns starting at `offset`, spanning
/// all of the operand's rows.
pub fn columns<'a, W>(
    operand: W,
    offset: usize,
    extent: usize,
) -> Result<DilatedSubmatrix<'a, W::Target>>
where
    W: IntoMatrixWindow<'a>,
{
    let (op, row_window, column_window) = operand.into_window();
    let request = AxisRange::contiguous(offset, extent);
    validate_range(Axis::Column, request, column_window.extent)?;
    Ok(DilatedSubmatrix {
        op,
        rows: row_window,
        columns: column_window.compose(request),
    })
}

/// Mutable counterpart of [`columns`].
pub fn columns_mut<'a, W>(
    operand: W,
    offset: usize,
    extent: usize,
) -> Result<DilatedSubmatrixMut<'a, W::Target>>
where
    W: IntoMatrixWindowMut<'a>,
{
    let (op, row_window, column_window) = operand.into_window_mut();
    let request = AxisRange::contiguous(offset, extent);
    validate_range(Axis::Column, request, column_window.extent)?;
    Ok(DilatedSubmatrixMut {
        op,
        rows: row_window,
        columns: column_window.compose(request),
    })
}

/// Strips the restriction wrapper from a mutable view's operand, keeping
/// every offset, extent, and dilation. Writes through the result bypass
/// the operand's policy; keeping its invariants intact becomes the
/// caller's responsibility.
pub fn derestrict<'a, M>(view: DilatedSubmatrixMut<'a, M>) -> DilatedSubmatrixMut<'a, M::Unrestricted>
where
    M: Restrictable,
{
    DilatedSubmatrixMut {
        op: match view.op {
            OperandMut::Borrowed(m) => OperandMut::Borrowed(m.unrestricted_mut()),
            OperandMut::Owned(m) => OperandMut::Owned(m.into_unrestricted()),
        },
        rows: view.rows,
        columns: view.columns,
    }
}

// ==================== shared translation logic ====================

/// Structural flags of a view with the given window over an operand with
/// flags `operand`. Only a diagonally aligned square window with equal
/// dilation keeps the operand's guarantees.
pub fn view_structure(operand: StructureFlags, rows: AxisRange, columns: AxisRange) -> StructureFlags {
    if rows == columns {
        operand
    } else {
        StructureFlags::NONE
    }
}

macro_rules! impl_matrix_for_view {
    ($view:ident) => {
        impl<'a, M: Matrix> Matrix for $view<'a, M> {
            type Elem = M::Elem;

            fn rows(&self) -> usize {
                self.rows.extent
            }

            fn columns(&self) -> usize {
                self.columns.extent
            }

            #[inline]
            fn get(&self, row: usize, column: usize) -> M::Elem {
                debug_assert!(row < self.rows.extent && column < self.columns.extent);
                self.op
                    .as_ref()
                    .get(self.rows.translate(row), self.columns.translate(column))
            }

            fn structure(&self) -> StructureFlags {
                view_structure(self.op.as_ref().structure(), self.rows, self.columns)
            }

            fn is_intact(&self) -> bool {
                self.op.as_ref().is_intact()
            }

            fn try_set(&self, row: usize, column: usize, value: M::Elem) -> bool {
                self.op.as_ref().try_set(
                    self.rows.translate(row),
                    self.columns.translate(column),
                    value,
                )
            }

            fn try_add(&self, row: usize, column: usize, value: M::Elem) -> bool {
                self.op.as_ref().try_add(
                    self.rows.translate(row),
                    self.columns.translate(column),
                    value,
                )
            }

            fn try_sub(&self, row: usize, column: usize, value: M::Elem) -> bool {
                self.op.as_ref().try_sub(
                    self.rows.translate(row),
                    self.columns.translate(column),
                    value,
                )
            }

            fn try_mult(&self, row: usize, column: usize, value: M::Elem) -> bool {
                self.op.as_ref().try_mult(
                    self.rows.translate(row),
                    self.columns.translate(column),
                    value,
                )
            }

            fn try_div(&self, row: usize, column: usize, value: M::Elem) -> bool {
                self.op.as_ref().try_div(
                    self.rows.translate(row),
                    self.columns.translate(column),
                    value,
                )
            }

            fn try_assign_from(
                &self,
                row: usize,
                column: usize,
                rhs: &dyn Matrix<Elem = M::Elem>,
            ) -> bool {
                if self.rows.dilation == 1 && self.columns.dilation == 1 {
                    self.op.as_ref().try_assign_from(
                        self.rows.translate(row),
                        self.columns.translate(column),
                        rhs,
                    )
                } else {
                    (0..rhs.rows()).all(|i| {
                        (0..rhs.columns())
                            .all(|j| self.try_set(row + i, column + j, rhs.get(i, j)))
                    })
                }
            }

            fn try_add_assign_from(
                &self,
                row: usize,
                column: usize,
                rhs: &dyn Matrix<Elem = M::Elem>,
            ) -> bool {
                if self.rows.dilation == 1 && self.columns.dilation == 1 {
                    self.op.as_ref().try_add_assign_from(
                        self.rows.translate(row),
                        self.columns.translate(column),
                        rhs,
                    )
                } else {
                    (0..rhs.rows()).all(|i| {
                        (0..rhs.columns())
                            .all(|j| self.try_add(row + i, column + j, rhs.get(i, j)))
                    })
                }
            }

            fn try_sub_assign_from(
                &self,
                row: usize,
                column: usize,
                rhs: &dyn Matrix<Elem = M::Elem>,
            ) -> bool {
                if self.rows.dilation == 1 && self.columns.dilation == 1 {
                    self.op.as_ref().try_sub_assign_from(
                        self.rows.translate(row),
                        self.columns.translate(column),
                        rhs,
                    )
                } else {
                    (0..rhs.rows()).all(|i| {
                        (0..rhs.columns())
                            .all(|j| self.try_sub(row + i, column + j, rhs.get(i, j)))
                    })
                }
            }

            fn try_schur_assign_from(
                &self,
                row: usize,
                column: usize,
                rhs: &dyn Matrix<Elem = M::Elem>,
            ) -> bool {
                if self.rows.dilation == 1 && self.columns.dilation == 1 {
                    self.op.as_ref().try_schur_assign_from(
                        self.rows.translate(row),
                        self.columns.translate(column),
                        rhs,
                    )
                } else {
                    (0..rhs.rows()).all(|i| {
                        (0..rhs.columns())
                            .all(|j| self.try_mult(row + i, column + j, rhs.get(i, j)))
                    })
                }
            }

            /// A unit-step diagonal in the view stays a unit-step diagonal
            /// in the operand only when both dilations are 1; otherwise the
            /// query walks element for element.
            fn try_assign_band(
                &self,
                band: isize,
                row: usize,
                column: usize,
                rhs: &dyn Vector<Elem = M::Elem>,
            ) -> bool {
                let _ = band;
                if self.rows.dilation == 1 && self.columns.dilation == 1 {
                    let r = self.rows.translate(row);
                    let c = self.columns.translate(column);
                    self.op
                        .as_ref()
                        .try_assign_band(c as isize - r as isize, r, c, rhs)
                } else {
                    (0..rhs.len()).all(|k| self.try_set(row + k, column + k, rhs.get(k)))
                }
            }

            fn try_add_assign_band(
                &self,
                band: isize,
                row: usize,
                column: usize,
                rhs: &dyn Vector<Elem = M::Elem>,
            ) -> bool {
                let _ = band;
                if self.rows.dilation == 1 && self.columns.dilation == 1 {
                    let r = self.rows.translate(row);
                    let c = self.columns.translate(column);
                    self.op
                        .as_ref()
                        .try_add_assign_band(c as isize - r as isize, r, c, rhs)
                } else {
                    (0..rhs.len()).all(|k| self.try_add(row + k, column + k, rhs.get(k)))
                }
            }
        }

        impl<'a, M: Matrix> $view<'a, M> {
            /// Row offset of the window in operand coordinates.
            pub fn row_offset(&self) -> usize {
                self.rows.offset
            }

            /// Column offset of the window in operand coordinates.
            pub fn column_offset(&self) -> usize {
                self.columns.offset
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
            pub fn operand(&self) -> &M {
                self.op.as_ref()
            }
        }
    };
}

impl_matrix_for_view!(DilatedSubmatrix);
impl_matrix_for_view!(DilatedSubmatrixMut);

// ==================== read view ====================

impl<'a, M: Matrix + IsSame> IsSame for DilatedSubmatrix<'a, M> {
    fn is_same(&self, other: &Self) -> bool {
        self.operand().is_same(other.operand())
            && self.rows == other.rows
            && self.columns == other.columns
    }
}

impl<'a, M: Matrix + IsSame> IsSame<M> for DilatedSubmatrix<'a, M> {
    /// A view equals its un-viewed operand only when it covers all of it
    /// with dilation 1 on both axes.
    fn is_same(&self, other: &M) -> bool {
        self.operand().is_same(other)
            && self.rows.is_full(self.operand().rows())
            && self.columns.is_full(self.operand().columns())
    }
}

impl<'a, 'b, M: Matrix> IntoMatrixWindow<'b> for &'b DilatedSubmatrix<'a, M> {
    type Target = M;

    fn into_window(self) -> (Operand<'b, M>, AxisRange, AxisRange) {
        (Operand::Borrowed(self.op.as_ref()), self.rows, self.columns)
    }
}

impl<'a, M: Matrix> IntoMatrixWindow<'a> for DilatedSubmatrix<'a, M> {
    type Target = M;

    fn into_window(self) -> (Operand<'a, M>, AxisRange, AxisRange) {
        (self.op, self.rows, self.columns)
    }
}

// ==================== mutable view ====================

impl<'a, M: MatrixMut> MatrixMut for DilatedSubmatrixMut<'a, M> {
    #[inline]
    fn set(&mut self, row: usize, column: usize, value: M::Elem) {
        debug_assert!(row < self.rows.extent && column < self.columns.extent);
        let r = self.rows.translate(row);
        let c = self.columns.translate(column);
        self.op.as_mut().set(r, c, value);
    }
}

impl<'a, M: MatrixMut> Clear for DilatedSubmatrixMut<'a, M> {
    /// Zeroes the covered elements; the rest of the operand is untouched.
    fn clear(&mut self) {
        self.reset();
    }
}

impl<'a, M: Matrix + IsSame> IsSame for DilatedSubmatrixMut<'a, M> {
    fn is_same(&self, other: &Self) -> bool {
        self.operand().is_same(other.operand())
            && self.rows == other.rows
            && self.columns == other.columns
    }
}

impl<'a, M: Matrix + IsSame> IsSame<M> for DilatedSubmatrixMut<'a, M> {
    fn is_same(&self, other: &M) -> bool {
        self.operand().is_same(other)
            && self.rows.is_full(self.operand().rows())
            && self.columns.is_full(self.operand().columns())
    }
}

impl<'a, 'b, M: Matrix> IntoMatrixWindow<'b> for &'b DilatedSubmatrixMut<'a, M> {
    type Target = M;

    fn into_window(self) -> (Operand<'b, M>, AxisRange, AxisRange) {
        (Operand::Borrowed(self.op.as_ref()), self.rows, self.columns)
    }
}

impl<'a, 'b, M: MatrixMut> IntoMatrixWindowMut<'b> for &'b mut DilatedSubmatrixMut<'a, M> {
    type Target = M;

    fn into_window_mut(self) -> (OperandMut<'b, M>, AxisRange, AxisRange) {
        (OperandMut::Borrowed(self.op.as_mut()), self.rows, self.columns)
    }
}

impl<'a, M: MatrixMut> IntoMatrixWindowMut<'a> for DilatedSubmatrixMut<'a, M> {
    type Target = M;

    fn into_window_mut(self) -> (OperandMut<'a, M>, AxisRange, AxisRange) {
        (self.op, self.rows, self.columns)
    }
}
