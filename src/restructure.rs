//! View factories over expressions: the algebraic push-down rules.
//!
//! Taking a dilated view of a compound expression never builds a
//! "view of expression" node. Each factory matches on the node shape and
//! rewrites the request into an equivalent expression over views of the
//! operands: component-wise nodes distribute, scalar and map nodes push
//! through, transposition swaps the axis roles, declaration wrappers are
//! transparent, and products narrow the contracted range to the span the
//! requested window can actually touch, driven by the operands'
//! [`StructureFlags`](dilated_view::StructureFlags). Views of views
//! compose into a single window bound to the innermost operand.

use dilated_view::{
    validate_range, Axis, AxisRange, DynamicVector, Matrix, Orientation, Scalar, Tensor, Vector,
};

use crate::matexpr::MatExpr;
use crate::tensexpr::TensExpr;
use crate::vecexpr::VecExpr;
use crate::Result;

// ============================================================================
// Matrix push-down
// ============================================================================

/// Rewrites `expr` restricted to the dilated window
/// `(row, column, rows, columns, row_dilation, column_dilation)`.
///
/// Bounds are checked where the request reaches a leaf or an existing
/// window; a violation reports the offending axis and leaves no partial
/// rewrite behind.
pub fn dilated_submatrix_expr<'a, T: Scalar>(
    expr: MatExpr<'a, T>,
    row: usize,
    column: usize,
    rows: usize,
    columns: usize,
    row_dilation: usize,
    column_dilation: usize,
) -> Result<MatExpr<'a, T>> {
    let row_request = AxisRange::new(row, rows, row_dilation);
    let column_request = AxisRange::new(column, columns, column_dilation);
    match expr {
        MatExpr::Leaf(base) => {
            validate_range(Axis::Row, row_request, base.rows())?;
            validate_range(Axis::Column, column_request, base.columns())?;
            Ok(MatExpr::View {
                base,
                rows: row_request,
                columns: column_request,
            })
        }
        MatExpr::View {
            base,
            rows: outer_rows,
            columns: outer_columns,
        } => {
            validate_range(Axis::Row, row_request, outer_rows.extent)?;
            validate_range(Axis::Column, column_request, outer_columns.extent)?;
            Ok(MatExpr::View {
                base,
                rows: outer_rows.compose(row_request),
                columns: outer_columns.compose(column_request),
            })
        }
        MatExpr::Add(l, r) => Ok(MatExpr::Add(
            Box::new(dilated_submatrix_expr(
                *l,
                row,
                column,
                rows,
                columns,
                row_dilation,
                column_dilation,
            )?),
            Box::new(dilated_submatrix_expr(
                *r,
                row,
                column,
                rows,
                columns,
                row_dilation,
                column_dilation,
            )?),
        )),
        MatExpr::Sub(l, r) => Ok(MatExpr::Sub(
            Box::new(dilated_submatrix_expr(
                *l,
                row,
                column,
                rows,
                columns,
                row_dilation,
                column_dilation,
            )?),
            Box::new(dilated_submatrix_expr(
                *r,
                row,
                column,
                rows,
                columns,
                row_dilation,
                column_dilation,
            )?),
        )),
        MatExpr::Schur(l, r) => Ok(MatExpr::Schur(
            Box::new(dilated_submatrix_expr(
                *l,
                row,
                column,
                rows,
                columns,
                row_dilation,
                column_dilation,
            )?),
            Box::new(dilated_submatrix_expr(
                *r,
                row,
                column,
                rows,
                columns,
                row_dilation,
                column_dilation,
            )?),
        )),
        MatExpr::Mult(l, r) => {
            let lf = l.structure();
            let rf = r.structure();
            let mut begin = narrow_begin(0, lf.upper, lf.strictly_upper, row);
            begin = narrow_begin(begin, rf.lower, rf.strictly_lower, column);
            let mut end = narrow_end(
                l.columns(),
                lf.lower,
                lf.strictly_lower,
                row,
                rows,
                row_dilation,
            );
            end = narrow_end(
                end,
                rf.upper,
                rf.strictly_upper,
                column,
                columns,
                column_dilation,
            );
            let count = end.saturating_sub(begin);
            let left = dilated_submatrix_expr(*l, row, begin, rows, count, row_dilation, 1)?;
            let right = dilated_submatrix_expr(*r, begin, column, count, columns, 1, column_dilation)?;
            Ok(MatExpr::Mult(Box::new(left), Box::new(right)))
        }
        MatExpr::Outer(u, v) => Ok(MatExpr::Outer(
            Box::new(dilated_subvector_expr(*u, row, rows, row_dilation)?),
            Box::new(dilated_subvector_expr(*v, column, columns, column_dilation)?),
        )),
        MatExpr::ScalarMul(m, s) => Ok(MatExpr::ScalarMul(
            Box::new(dilated_submatrix_expr(
                *m,
                row,
                column,
                rows,
                columns,
                row_dilation,
                column_dilation,
            )?),
            s,
        )),
        MatExpr::ScalarDiv(m, s) => Ok(MatExpr::ScalarDiv(
            Box::new(dilated_submatrix_expr(
                *m,
                row,
                column,
                rows,
                columns,
                row_dilation,
                column_dilation,
            )?),
            s,
        )),
        MatExpr::Map(m, f) => Ok(MatExpr::Map(
            Box::new(dilated_submatrix_expr(
                *m,
                row,
                column,
                rows,
                columns,
                row_dilation,
                column_dilation,
            )?),
            f,
        )),
        MatExpr::Map2(l, r, f) => Ok(MatExpr::Map2(
            Box::new(dilated_submatrix_expr(
                *l,
                row,
                column,
                rows,
                columns,
                row_dilation,
                column_dilation,
            )?),
            Box::new(dilated_submatrix_expr(
                *r,
                row,
                column,
                rows,
                columns,
                row_dilation,
                column_dilation,
            )?),
            f,
        )),
        MatExpr::Eval(m) => Ok(MatExpr::Eval(Box::new(dilated_submatrix_expr(
            *m,
            row,
            column,
            rows,
            columns,
            row_dilation,
            column_dilation,
        )?))),
        MatExpr::Serial(m) => Ok(MatExpr::Serial(Box::new(dilated_submatrix_expr(
            *m,
            row,
            column,
            rows,
            columns,
            row_dilation,
            column_dilation,
        )?))),
        // the declaration applies to the whole operand, not to a window of it
        MatExpr::Decl(m, _) => dilated_submatrix_expr(
            *m,
            row,
            column,
            rows,
            columns,
            row_dilation,
            column_dilation,
        ),
        MatExpr::Trans(m) => Ok(MatExpr::Trans(Box::new(dilated_submatrix_expr(
            *m,
            column,
            row,
            columns,
            rows,
            column_dilation,
            row_dilation,
        )?))),
        MatExpr::Expand(v, count) => match v.orientation() {
            Orientation::Column => {
                validate_range(Axis::Column, column_request, count)?;
                let surviving = dilated_subvector_expr(*v, row, rows, row_dilation)?;
                Ok(MatExpr::Expand(Box::new(surviving), columns))
            }
            Orientation::Row => {
                validate_range(Axis::Row, row_request, count)?;
                let surviving = dilated_subvector_expr(*v, column, columns, column_dilation)?;
                Ok(MatExpr::Expand(Box::new(surviving), rows))
            }
        },
    }
}

/// Contiguous shorthand of [`dilated_submatrix_expr`].
pub fn submatrix_expr<'a, T: Scalar>(
    expr: MatExpr<'a, T>,
    row: usize,
    column: usize,
    rows: usize,
    columns: usize,
) -> Result<MatExpr<'a, T>> {
    dilated_submatrix_expr(expr, row, column, rows, columns, 1, 1)
}

/// Raises the start of a contracted range when a triangular factor
/// contributes nothing before the window's first touched index. Strict
/// variants shave one more.
fn narrow_begin(begin: usize, bound: bool, strict: bool, offset: usize) -> usize {
    if bound {
        begin.max(offset + usize::from(strict))
    } else {
        begin
    }
}

/// Lowers the end of a contracted range when a triangular factor
/// contributes nothing past the window's last touched index. The narrowed
/// range may come out empty; a zero-extent product is still valid.
fn narrow_end(end: usize, bound: bool, strict: bool, offset: usize, extent: usize, dilation: usize) -> usize {
    if !bound {
        return end;
    }
    let last = if extent > 0 {
        offset
            .saturating_add((extent - 1).saturating_mul(dilation))
            .saturating_add(usize::from(!strict))
    } else {
        offset
    };
    end.min(last)
}

// ============================================================================
// Vector push-down
// ============================================================================

/// Rewrites `expr` restricted to the dilated range
/// `(offset, extent, dilation)`.
pub fn dilated_subvector_expr<'a, T: Scalar>(
    expr: VecExpr<'a, T>,
    offset: usize,
    extent: usize,
    dilation: usize,
) -> Result<VecExpr<'a, T>> {
    let request = AxisRange::new(offset, extent, dilation);
    match expr {
        VecExpr::Leaf(base) => {
            validate_range(Axis::Element, request, base.len())?;
            Ok(VecExpr::View {
                base,
                range: request,
            })
        }
        VecExpr::View { base, range: outer } => {
            validate_range(Axis::Element, request, outer.extent)?;
            Ok(VecExpr::View {
                base,
                range: outer.compose(request),
            })
        }
        VecExpr::Add(l, r) => Ok(VecExpr::Add(
            Box::new(dilated_subvector_expr(*l, offset, extent, dilation)?),
            Box::new(dilated_subvector_expr(*r, offset, extent, dilation)?),
        )),
        VecExpr::Sub(l, r) => Ok(VecExpr::Sub(
            Box::new(dilated_subvector_expr(*l, offset, extent, dilation)?),
            Box::new(dilated_subvector_expr(*r, offset, extent, dilation)?),
        )),
        VecExpr::Mult(l, r) => Ok(VecExpr::Mult(
            Box::new(dilated_subvector_expr(*l, offset, extent, dilation)?),
            Box::new(dilated_subvector_expr(*r, offset, extent, dilation)?),
        )),
        VecExpr::ScalarMul(v, s) => Ok(VecExpr::ScalarMul(
            Box::new(dilated_subvector_expr(*v, offset, extent, dilation)?),
            s,
        )),
        VecExpr::ScalarDiv(v, s) => Ok(VecExpr::ScalarDiv(
            Box::new(dilated_subvector_expr(*v, offset, extent, dilation)?),
            s,
        )),
        VecExpr::Map(v, f) => Ok(VecExpr::Map(
            Box::new(dilated_subvector_expr(*v, offset, extent, dilation)?),
            f,
        )),
        VecExpr::Map2(l, r, f) => Ok(VecExpr::Map2(
            Box::new(dilated_subvector_expr(*l, offset, extent, dilation)?),
            Box::new(dilated_subvector_expr(*r, offset, extent, dilation)?),
            f,
        )),
        VecExpr::Eval(v) => Ok(VecExpr::Eval(Box::new(dilated_subvector_expr(
            *v, offset, extent, dilation,
        )?))),
        VecExpr::Serial(v) => Ok(VecExpr::Serial(Box::new(dilated_subvector_expr(
            *v, offset, extent, dilation,
        )?))),
        VecExpr::Trans(v) => Ok(VecExpr::Trans(Box::new(dilated_subvector_expr(
            *v, offset, extent, dilation,
        )?))),
        VecExpr::MatVec(m, v) => {
            let f = m.structure();
            let begin = narrow_begin(0, f.upper, f.strictly_upper, offset);
            let end = narrow_end(m.columns(), f.lower, f.strictly_lower, offset, extent, dilation);
            let count = end.saturating_sub(begin);
            let matrix = dilated_submatrix_expr(*m, offset, begin, extent, count, dilation, 1)?;
            let vector = dilated_subvector_expr(*v, begin, count, 1)?;
            Ok(VecExpr::MatVec(Box::new(matrix), Box::new(vector)))
        }
        VecExpr::VecMat(v, m) => {
            // the contracted axis is the matrix's row axis, so its lower
            // flag bounds the start and its upper flag bounds the end
            let f = m.structure();
            let begin = narrow_begin(0, f.lower, f.strictly_lower, offset);
            let end = narrow_end(m.rows(), f.upper, f.strictly_upper, offset, extent, dilation);
            let count = end.saturating_sub(begin);
            let vector = dilated_subvector_expr(*v, begin, count, 1)?;
            let matrix = dilated_submatrix_expr(*m, begin, offset, count, extent, 1, dilation)?;
            Ok(VecExpr::VecMat(Box::new(vector), Box::new(matrix)))
        }
        VecExpr::ReduceColumns(m, op) => {
            let full_rows = m.rows();
            Ok(VecExpr::ReduceColumns(
                Box::new(dilated_submatrix_expr(
                    *m, 0, offset, full_rows, extent, 1, dilation,
                )?),
                op,
            ))
        }
        VecExpr::ReduceRows(m, op) => {
            let full_columns = m.columns();
            Ok(VecExpr::ReduceRows(
                Box::new(dilated_submatrix_expr(
                    *m, offset, 0, extent, full_columns, dilation, 1,
                )?),
                op,
            ))
        }
    }
}

/// Contiguous shorthand of [`dilated_subvector_expr`].
pub fn subvector_expr<'a, T: Scalar>(
    expr: VecExpr<'a, T>,
    offset: usize,
    extent: usize,
) -> Result<VecExpr<'a, T>> {
    dilated_subvector_expr(expr, offset, extent, 1)
}

// ============================================================================
// Tensor push-down
// ============================================================================

/// Rewrites `expr` restricted to the dilated window over all three axes.
#[allow(clippy::too_many_arguments)]
pub fn dilated_subtensor_expr<'a, T: Scalar>(
    expr: TensExpr<'a, T>,
    page: usize,
    row: usize,
    column: usize,
    pages: usize,
    rows: usize,
    columns: usize,
    page_dilation: usize,
    row_dilation: usize,
    column_dilation: usize,
) -> Result<TensExpr<'a, T>> {
    let page_request = AxisRange::new(page, pages, page_dilation);
    let row_request = AxisRange::new(row, rows, row_dilation);
    let column_request = AxisRange::new(column, columns, column_dilation);
    match expr {
        TensExpr::Leaf(base) => {
            validate_range(Axis::Page, page_request, base.pages())?;
            validate_range(Axis::Row, row_request, base.rows())?;
            validate_range(Axis::Column, column_request, base.columns())?;
            Ok(TensExpr::View {
                base,
                pages: page_request,
                rows: row_request,
                columns: column_request,
            })
        }
        TensExpr::View {
            base,
            pages: outer_pages,
            rows: outer_rows,
            columns: outer_columns,
        } => {
            validate_range(Axis::Page, page_request, outer_pages.extent)?;
            validate_range(Axis::Row, row_request, outer_rows.extent)?;
            validate_range(Axis::Column, column_request, outer_columns.extent)?;
            Ok(TensExpr::View {
                base,
                pages: outer_pages.compose(page_request),
                rows: outer_rows.compose(row_request),
                columns: outer_columns.compose(column_request),
            })
        }
        TensExpr::Add(l, r) => Ok(TensExpr::Add(
            Box::new(dilated_subtensor_expr(
                *l,
                page,
                row,
                column,
                pages,
                rows,
                columns,
                page_dilation,
                row_dilation,
                column_dilation,
            )?),
            Box::new(dilated_subtensor_expr(
                *r,
                page,
                row,
                column,
                pages,
                rows,
                columns,
                page_dilation,
                row_dilation,
                column_dilation,
            )?),
        )),
        TensExpr::Sub(l, r) => Ok(TensExpr::Sub(
            Box::new(dilated_subtensor_expr(
                *l,
                page,
                row,
                column,
                pages,
                rows,
                columns,
                page_dilation,
                row_dilation,
                column_dilation,
            )?),
            Box::new(dilated_subtensor_expr(
                *r,
                page,
                row,
                column,
                pages,
                rows,
                columns,
                page_dilation,
                row_dilation,
                column_dilation,
            )?),
        )),
        TensExpr::Schur(l, r) => Ok(TensExpr::Schur(
            Box::new(dilated_subtensor_expr(
                *l,
                page,
                row,
                column,
                pages,
                rows,
                columns,
                page_dilation,
                row_dilation,
                column_dilation,
            )?),
            Box::new(dilated_subtensor_expr(
                *r,
                page,
                row,
                column,
                pages,
                rows,
                columns,
                page_dilation,
                row_dilation,
                column_dilation,
            )?),
        )),
        TensExpr::ScalarMul(t, s) => Ok(TensExpr::ScalarMul(
            Box::new(dilated_subtensor_expr(
                *t,
                page,
                row,
                column,
                pages,
                rows,
                columns,
                page_dilation,
                row_dilation,
                column_dilation,
            )?),
            s,
        )),
        TensExpr::ScalarDiv(t, s) => Ok(TensExpr::ScalarDiv(
            Box::new(dilated_subtensor_expr(
                *t,
                page,
                row,
                column,
                pages,
                rows,
                columns,
                page_dilation,
                row_dilation,
                column_dilation,
            )?),
            s,
        )),
        TensExpr::Map(t, f) => Ok(TensExpr::Map(
            Box::new(dilated_subtensor_expr(
                *t,
                page,
                row,
                column,
                pages,
                rows,
                columns,
                page_dilation,
                row_dilation,
                column_dilation,
            )?),
            f,
        )),
        TensExpr::Map2(l, r, f) => Ok(TensExpr::Map2(
            Box::new(dilated_subtensor_expr(
                *l,
                page,
                row,
                column,
                pages,
                rows,
                columns,
                page_dilation,
                row_dilation,
                column_dilation,
            )?),
            Box::new(dilated_subtensor_expr(
                *r,
                page,
                row,
                column,
                pages,
                rows,
                columns,
                page_dilation,
                row_dilation,
                column_dilation,
            )?),
            f,
        )),
        TensExpr::Eval(t) => Ok(TensExpr::Eval(Box::new(dilated_subtensor_expr(
            *t,
            page,
            row,
            column,
            pages,
            rows,
            columns,
            page_dilation,
            row_dilation,
            column_dilation,
        )?))),
        TensExpr::Serial(t) => Ok(TensExpr::Serial(Box::new(dilated_subtensor_expr(
            *t,
            page,
            row,
            column,
            pages,
            rows,
            columns,
            page_dilation,
            row_dilation,
            column_dilation,
        )?))),
    }
}

/// Contiguous shorthand of [`dilated_subtensor_expr`].
#[allow(clippy::too_many_arguments)]
pub fn subtensor_expr<'a, T: Scalar>(
    expr: TensExpr<'a, T>,
    page: usize,
    row: usize,
    column: usize,
    pages: usize,
    rows: usize,
    columns: usize,
) -> Result<TensExpr<'a, T>> {
    dilated_subtensor_expr(expr, page, row, column, pages, rows, columns, 1, 1, 1)
}

// ============================================================================
// Eager restructuring
// ============================================================================

/// Flattens a matrix-shaped operand into a row vector in row-major element
/// order.
pub fn ravel<M>(operand: &M) -> DynamicVector<M::Elem>
where
    M: Matrix + ?Sized,
{
    let columns = operand.columns();
    let data = DynamicVector::from_fn(operand.rows() * columns, |i| {
        operand.get(i / columns, i % columns)
    });
    data.with_orientation(Orientation::Row)
}

/// Flattens a tensor-shaped operand into a row vector, pages outermost.
pub fn ravel_tensor<G>(operand: &G) -> DynamicVector<G::Elem>
where
    G: Tensor + ?Sized,
{
    let rows = operand.rows();
    let columns = operand.columns();
    let plane = rows * columns;
    let data = DynamicVector::from_fn(operand.pages() * plane, |i| {
        operand.get(i / plane, (i % plane) / columns, i % columns)
    });
    data.with_orientation(Orientation::Row)
}
