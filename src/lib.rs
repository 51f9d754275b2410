//! Dilated views and lazy expression restructuring for dense vector,
//! matrix, and third-order tensor operands.
//!
//! Every view is described per axis by an offset, an extent, and a
//! dilation: local index `i` on that axis maps to
//! `offset + i * dilation` in the underlying operand. Views are
//! zero-copy, nest to arbitrary depth (nested windows collapse into a
//! single composed window over the innermost operand), and write through
//! to the viewed data. Views over structure adaptors keep the adaptor's
//! invariant enforced on every write.
//!
//! # Core Types
//!
//! - [`DynamicVector`] / [`DynamicMatrix`] / [`DynamicTensor`]: dense
//!   row-major containers
//! - [`DilatedSubvector`] / [`DilatedSubmatrix`] / [`DilatedSubtensor`]
//!   (and their `Mut` forms): windows with per-axis offset, extent, and
//!   dilation, built by the [`dilated_subvector`], [`dilated_submatrix`],
//!   and [`dilated_subtensor`] factories
//! - [`SymmetricMatrix`], [`HermitianMatrix`], [`Triangular`]: adaptors
//!   that restrict writes to keep their structural invariant
//! - [`MatExpr`] / [`VecExpr`] / [`TensExpr`]: lazy expression nodes;
//!   taking a view of an expression pushes the window down to the
//!   operands instead of materializing anything
//!
//! # Views
//!
//! ```rust
//! use dilated_rs::{dilated_submatrix_mut, DynamicMatrix, Matrix, MatrixMut};
//!
//! let mut grid = DynamicMatrix::from_fn(4, 4, |i, j| (i * 4 + j) as i64);
//! {
//!     // every second row and column, starting at (0, 1)
//!     let mut window = dilated_submatrix_mut(&mut grid, 0, 1, 2, 2, 2, 2).unwrap();
//!     assert_eq!(window.get(1, 1), 11);
//!     window.set(0, 0, -1);
//! }
//! assert_eq!(grid.get(0, 1), -1);
//! ```
//!
//! # Expressions
//!
//! ```rust
//! use dilated_rs::{dilated_submatrix_expr, DynamicMatrix, MatExpr, Matrix};
//!
//! let a = DynamicMatrix::from_fn(4, 4, |i, j| (i + j) as f64);
//! let b = DynamicMatrix::from_fn(4, 4, |i, j| (i * j) as f64);
//!
//! // nothing is evaluated here; the view request is rewritten into
//! // views of `a` and `b`
//! let sum = MatExpr::leaf(&a) + MatExpr::leaf(&b);
//! let window = dilated_submatrix_expr(sum, 0, 1, 2, 2, 2, 2).unwrap();
//! assert_eq!(window.get(1, 1), a.get(2, 3) + b.get(2, 3));
//! ```

pub mod matexpr;
mod ops;
mod restructure;
pub mod tensexpr;
pub mod vecexpr;

// ============================================================================
// Scalar and structure primitives
// ============================================================================
pub use dilated_view::{Orientation, Scalar, StructureFlags};

// ============================================================================
// Axis windows
// ============================================================================
pub use dilated_view::{validate_range, Axis, AxisRange};

// ============================================================================
// Element access traits
// ============================================================================
pub use dilated_view::{
    is_same, Clear, IsSame, Matrix, MatrixMut, Restrictable, Tensor, TensorMut, Vector, VectorMut,
};

// ============================================================================
// Dense containers and structure adaptors
// ============================================================================
pub use dilated_view::{DynamicMatrix, DynamicTensor, DynamicVector};
pub use dilated_view::{HermitianMatrix, SymmetricMatrix};
pub use dilated_view::{
    Lower, LowerMatrix, StrictlyLower, StrictlyLowerMatrix, StrictlyUpper, StrictlyUpperMatrix,
    Triangular, TriangularKind, UniLower, UniLowerMatrix, UniUpper, UniUpperMatrix, Upper,
    UpperMatrix,
};

// ============================================================================
// Views and factories
// ============================================================================
pub use dilated_view::{
    column, column_mut, row, row_mut, ColumnView, ColumnViewMut, RowView, RowViewMut,
};
pub use dilated_view::{
    column_slice, column_slice_mut, page, page_mut, row_slice, row_slice_mut, ColumnSlice,
    ColumnSliceMut, PageSlice, PageSliceMut, RowSlice, RowSliceMut,
};
pub use dilated_view::{
    columns, columns_mut, derestrict, dilated_submatrix, dilated_submatrix_mut,
    dilated_submatrix_mut_unchecked, dilated_submatrix_unchecked, rows, rows_mut, submatrix,
    submatrix_mut, view_structure, DilatedSubmatrix, DilatedSubmatrixMut,
};
pub use dilated_view::{
    dilated_subtensor, dilated_subtensor_mut, dilated_subtensor_mut_unchecked,
    dilated_subtensor_unchecked, pages, pages_mut, subtensor, subtensor_mut, DilatedSubtensor,
    DilatedSubtensorMut,
};
pub use dilated_view::{
    dilated_subvector, dilated_subvector_mut, dilated_subvector_mut_unchecked,
    dilated_subvector_unchecked, subvector, subvector_mut, DilatedSubvector, DilatedSubvectorMut,
};

// ============================================================================
// Operand windows
// ============================================================================
pub use dilated_view::{
    IntoMatrixWindow, IntoMatrixWindowMut, IntoTensorWindow, IntoTensorWindowMut,
    IntoVectorWindow, IntoVectorWindowMut, Operand, OperandMut,
};

// ============================================================================
// Properties and free functions
// ============================================================================
pub use dilated_view::{
    clear, invert, is_hermitian, is_lower, is_strictly_lower, is_strictly_upper, is_symmetric,
    is_uni_lower, is_uni_upper, is_upper,
};

// ============================================================================
// Expression nodes and builders
// ============================================================================
pub use matexpr::{declherm, decllow, declsym, declupp, BinaryFn, MatExpr, UnaryFn};
pub use tensexpr::TensExpr;
pub use vecexpr::VecExpr;

// ============================================================================
// Expression restructuring
// ============================================================================
pub use restructure::{
    dilated_submatrix_expr, dilated_subtensor_expr, dilated_subvector_expr, ravel, ravel_tensor,
    submatrix_expr, subtensor_expr, subvector_expr,
};

// ============================================================================
// Error types
// ============================================================================

pub use dilated_view::DilatedError;

/// Errors produced when building or restructuring expressions.
#[derive(Debug, thiserror::Error)]
pub enum ExprError {
    /// Operand shapes or orientations do not conform.
    #[error("incompatible operands: {0}")]
    Incompatible(String),

    /// A view request on the expression was rejected.
    #[error(transparent)]
    View(#[from] DilatedError),
}

/// Convenience alias for expression-layer results.
pub type Result<T> = std::result::Result<T, ExprError>;
