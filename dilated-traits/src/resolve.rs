//! Result-shape resolution for views, restructuring operations, and
//! products.
//!
//! Every ladder here is a `const fn` over the descriptors in
//! [`crate::shape`], so result shapes can be pinned down in constant
//! context. Ladders that can receive a structurally impossible request
//! return `Option`; forcing the `None` arm in a `const` item fails the
//! build:
//!
//! ```
//! use dilated_traits::resolve::{require_matrix, tensor_vector_mult_desc};
//! use dilated_traits::shape::*;
//!
//! const T: TensorDesc = TensorDesc::dense(
//!     SizeClass::Static(2),
//!     SizeClass::Static(3),
//!     SizeClass::Static(4),
//! );
//! const V: VectorDesc = VectorDesc::dense(Orientation::Column, SizeClass::Static(4));
//! const R: MatrixDesc = require_matrix(tensor_vector_mult_desc(T, V));
//! assert_eq!(R.rows, SizeClass::Static(2));
//! ```

use crate::shape::{
    AnyDesc, Density, MatrixDesc, Orientation, Param, SizeClass, StorageOrder, TensorDesc,
    VectorDesc,
};

/// Size class of one view axis, given the class of the operand axis and
/// the requested extent.
///
/// The arms are ordered most specific first: a compile-time extent over a
/// statically sized axis pins the result, a bounded axis keeps a bound,
/// and everything else degrades to dynamic.
pub const fn view_axis(container: SizeClass, extent: Param) -> SizeClass {
    match (container, extent) {
        (SizeClass::Static(_), Param::Known(m)) => SizeClass::Static(m),
        (SizeClass::Bounded(_), Param::Known(m)) => SizeClass::Bounded(m),
        (SizeClass::Bounded(b), Param::Unknown) => SizeClass::Bounded(b),
        _ => SizeClass::Dynamic,
    }
}

/// True unless both classes are static and disagree.
const fn compatible(a: SizeClass, b: SizeClass) -> bool {
    match (a, b) {
        (SizeClass::Static(x), SizeClass::Static(y)) => x == y,
        _ => true,
    }
}

// ==================== views ====================

/// Result shape of a dilated subvector.
pub const fn dilated_subvector_desc(v: VectorDesc, len: Param) -> VectorDesc {
    VectorDesc {
        density: v.density,
        orientation: v.orientation,
        len: view_axis(v.len, len),
    }
}

/// Result shape of a dilated submatrix.
pub const fn dilated_submatrix_desc(m: MatrixDesc, rows: Param, columns: Param) -> MatrixDesc {
    MatrixDesc {
        density: m.density,
        order: m.order,
        rows: view_axis(m.rows, rows),
        columns: view_axis(m.columns, columns),
    }
}

/// Result shape of a (dilated) subtensor.
pub const fn subtensor_desc(t: TensorDesc, pages: Param, rows: Param, columns: Param) -> TensorDesc {
    TensorDesc {
        density: t.density,
        pages: view_axis(t.pages, pages),
        rows: view_axis(t.rows, rows),
        columns: view_axis(t.columns, columns),
    }
}

// The `_of` variants take an operand of unknown rank and reject the wrong
// one instead of resolving to a nonsense shape.

pub const fn dilated_subvector_of(d: AnyDesc, len: Param) -> Option<VectorDesc> {
    match d {
        AnyDesc::Vector(v) => Some(dilated_subvector_desc(v, len)),
        _ => None,
    }
}

pub const fn dilated_submatrix_of(d: AnyDesc, rows: Param, columns: Param) -> Option<MatrixDesc> {
    match d {
        AnyDesc::Matrix(m) => Some(dilated_submatrix_desc(m, rows, columns)),
        _ => None,
    }
}

pub const fn subtensor_of(
    d: AnyDesc,
    pages: Param,
    rows: Param,
    columns: Param,
) -> Option<TensorDesc> {
    match d {
        AnyDesc::Tensor(t) => Some(subtensor_desc(t, pages, rows, columns)),
        _ => None,
    }
}

// ==================== slices ====================

/// Shape of one page of a tensor.
pub const fn page_slice_desc(t: TensorDesc) -> MatrixDesc {
    MatrixDesc {
        density: t.density,
        order: StorageOrder::RowMajor,
        rows: t.rows,
        columns: t.columns,
    }
}

/// Shape of one row fiber plane of a tensor, pages by columns.
pub const fn row_slice_desc(t: TensorDesc) -> MatrixDesc {
    MatrixDesc {
        density: t.density,
        order: StorageOrder::RowMajor,
        rows: t.pages,
        columns: t.columns,
    }
}

/// Shape of one column fiber plane of a tensor, pages by rows.
pub const fn column_slice_desc(t: TensorDesc) -> MatrixDesc {
    MatrixDesc {
        density: t.density,
        order: StorageOrder::RowMajor,
        rows: t.pages,
        columns: t.rows,
    }
}

/// Shape of one matrix row.
pub const fn row_desc(m: MatrixDesc) -> VectorDesc {
    VectorDesc {
        density: m.density,
        orientation: Orientation::Row,
        len: m.columns,
    }
}

/// Shape of one matrix column.
pub const fn column_desc(m: MatrixDesc) -> VectorDesc {
    VectorDesc {
        density: m.density,
        orientation: Orientation::Column,
        len: m.rows,
    }
}

// ==================== restructuring ====================

/// Shape of a flattened matrix. The result reads in row-major element
/// order and is always a row vector.
pub const fn ravel_desc(m: MatrixDesc) -> VectorDesc {
    VectorDesc {
        density: m.density,
        orientation: Orientation::Row,
        len: m.rows.product(m.columns),
    }
}

/// Shape of a flattened tensor.
pub const fn ravel_tensor_desc(t: TensorDesc) -> VectorDesc {
    VectorDesc {
        density: t.density,
        orientation: Orientation::Row,
        len: t.pages.product(t.rows).product(t.columns),
    }
}

/// Shape of a vector replicated into a matrix. A column vector becomes the
/// columns of the result, a row vector becomes its rows.
pub const fn expand_desc(v: VectorDesc, count: Param) -> MatrixDesc {
    let repeated = match count {
        Param::Known(n) => SizeClass::Static(n),
        Param::Unknown => SizeClass::Dynamic,
    };
    match v.orientation {
        Orientation::Column => MatrixDesc {
            density: v.density,
            order: StorageOrder::RowMajor,
            rows: v.len,
            columns: repeated,
        },
        Orientation::Row => MatrixDesc {
            density: v.density,
            order: StorageOrder::RowMajor,
            rows: repeated,
            columns: v.len,
        },
    }
}

/// Shape of a matrix replicated into the pages of a tensor.
pub const fn expand_matrix_desc(m: MatrixDesc, pages: Param) -> TensorDesc {
    TensorDesc {
        density: m.density,
        pages: match pages {
            Param::Known(n) => SizeClass::Static(n),
            Param::Unknown => SizeClass::Dynamic,
        },
        rows: m.rows,
        columns: m.columns,
    }
}

// ==================== products ====================

/// Shape of a matrix times a column vector. `None` when the orientation is
/// wrong or statically known contraction sizes disagree.
pub const fn mat_vec_mult_desc(m: MatrixDesc, v: VectorDesc) -> Option<VectorDesc> {
    if !matches!(v.orientation, Orientation::Column) || !compatible(m.columns, v.len) {
        return None;
    }
    Some(VectorDesc {
        density: m.density.combine(v.density),
        orientation: Orientation::Column,
        len: m.rows,
    })
}

/// Shape of a row vector times a matrix.
pub const fn vec_mat_mult_desc(v: VectorDesc, m: MatrixDesc) -> Option<VectorDesc> {
    if !matches!(v.orientation, Orientation::Row) || !compatible(v.len, m.rows) {
        return None;
    }
    Some(VectorDesc {
        density: m.density.combine(v.density),
        orientation: Orientation::Row,
        len: m.columns,
    })
}

/// Shape of a matrix times a matrix.
pub const fn mat_mat_mult_desc(a: MatrixDesc, b: MatrixDesc) -> Option<MatrixDesc> {
    if !compatible(a.columns, b.rows) {
        return None;
    }
    Some(MatrixDesc {
        density: a.density.combine(b.density),
        order: a.order,
        rows: a.rows,
        columns: b.columns,
    })
}

/// Shape of a tensor contracted with a column vector over the column axis.
/// The result is a pages-by-rows matrix.
pub const fn tensor_vector_mult_desc(t: TensorDesc, v: VectorDesc) -> Option<MatrixDesc> {
    if !matches!(v.orientation, Orientation::Column) || !compatible(t.columns, v.len) {
        return None;
    }
    Some(MatrixDesc {
        density: t.density.combine(v.density),
        order: StorageOrder::RowMajor,
        rows: t.pages,
        columns: t.rows,
    })
}

/// Shape of an outer product of a column vector and a row vector.
pub const fn outer_product_desc(col: VectorDesc, row: VectorDesc) -> Option<MatrixDesc> {
    if !matches!(col.orientation, Orientation::Column) || !matches!(row.orientation, Orientation::Row)
    {
        return None;
    }
    Some(MatrixDesc {
        density: col.density.combine(row.density),
        order: StorageOrder::RowMajor,
        rows: col.len,
        columns: row.len,
    })
}

// ==================== build-time enforcement ====================

/// Unwraps a resolved vector shape, failing the build in constant context
/// when the request was invalid.
pub const fn require_vector(d: Option<VectorDesc>) -> VectorDesc {
    match d {
        Some(v) => v,
        None => panic!("operand shapes do not admit a vector result"),
    }
}

/// Unwraps a resolved matrix shape, failing the build in constant context
/// when the request was invalid.
pub const fn require_matrix(d: Option<MatrixDesc>) -> MatrixDesc {
    match d {
        Some(m) => m,
        None => panic!("operand shapes do not admit a matrix result"),
    }
}

/// Unwraps a resolved tensor shape, failing the build in constant context
/// when the request was invalid.
pub const fn require_tensor(d: Option<TensorDesc>) -> TensorDesc {
    match d {
        Some(t) => t,
        None => panic!("operand shapes do not admit a tensor result"),
    }
}
