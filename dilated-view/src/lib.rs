//! Dilated views over dense vectors, matrices and third-order tensors.
//!
//! A dilated view selects, along each axis of its operand, the elements
//! `offset + k * dilation` for `k < extent`. Views carry no data: reads and
//! writes go straight through to the operand, and a view over another view
//! composes the two descriptors so the result binds directly to the
//! innermost operand.
//!
//! # Core Types
//!
//! - [`DynamicVector`] / [`DynamicMatrix`] / [`DynamicTensor`]: Dense owning containers
//! - [`DilatedSubvector`] / [`DilatedSubmatrix`] / [`DilatedSubtensor`] (and their `Mut`
//!   forms): Zero-copy views selecting every `dilation`-th element per axis
//! - [`Triangular`], [`SymmetricMatrix`], [`HermitianMatrix`]: Structure adaptors that
//!   police writes and declare [`StructureFlags`]
//! - [`Vector`] / [`Matrix`] / [`Tensor`] traits (and `Mut` forms): Element access plus
//!   the mutation predicate protocol restricted operands answer through
//!
//! # View Factories
//!
//! - [`dilated_subvector`], [`dilated_submatrix`], [`dilated_subtensor`]: Checked
//!   construction from `(offset, extent, dilation)` per axis
//! - [`subvector`], [`submatrix`], [`subtensor`]: Contiguous shorthands (dilation 1)
//! - [`row`], [`column`], [`rows`], [`columns`]: Single matrix lines and contiguous slabs
//! - [`page`], [`row_slice`], [`column_slice`], [`pages`]: Tensor slices and slabs
//!
//! # Example
//!
//! ```rust
//! use dilated_view::{dilated_submatrix, DynamicMatrix, Matrix};
//!
//! let a = DynamicMatrix::from_fn(4, 4, |i, j| (4 * i + j) as f64);
//! // rows 0 and 2, columns 1 and 3
//! let v = dilated_submatrix(&a, 0, 1, 2, 2, 2, 2).unwrap();
//! assert_eq!(v.get(0, 0), 1.0);
//! assert_eq!(v.get(1, 1), 11.0);
//! ```
//!
//! Mutable views write through to the operand:
//!
//! ```rust
//! use dilated_view::{dilated_subvector_mut, DynamicVector, VectorMut};
//!
//! let mut x = DynamicVector::from_vec(vec![0.0; 6]);
//! let mut v = dilated_subvector_mut(&mut x, 1, 2, 3).unwrap();
//! v.set(0, 5.0);
//! v.set(1, 9.0);
//! assert_eq!(x[1], 5.0);
//! assert_eq!(x[4], 9.0);
//! ```

pub mod axis;
mod invert;
pub mod matrix;
pub mod operand;
mod properties;
pub mod rowcol;
pub mod slices;
pub mod submatrix;
pub mod subtensor;
pub mod subvector;
pub mod symmetric;
pub mod tensor;
pub mod traits;
pub mod triangular;
pub mod vector;

// ============================================================================
// Trait-layer re-exports
// ============================================================================
pub use dilated_traits::{Orientation, Scalar, StructureFlags};

// ============================================================================
// Axis primitives
// ============================================================================
pub use axis::{Axis, AxisRange};

// ============================================================================
// Element access traits
// ============================================================================
pub use traits::{
    is_same, Clear, IsSame, Matrix, MatrixMut, Restrictable, Tensor, TensorMut, Vector, VectorMut,
};

// ============================================================================
// Dense containers
// ============================================================================
pub use matrix::DynamicMatrix;
pub use tensor::DynamicTensor;
pub use vector::DynamicVector;

// ============================================================================
// Structure adaptors
// ============================================================================
pub use symmetric::{HermitianMatrix, SymmetricMatrix};
pub use triangular::{
    Lower, LowerMatrix, StrictlyLower, StrictlyLowerMatrix, StrictlyUpper, StrictlyUpperMatrix,
    Triangular, TriangularKind, UniLower, UniLowerMatrix, UniUpper, UniUpperMatrix, Upper,
    UpperMatrix,
};

// ============================================================================
// Operand windows
// ============================================================================
pub use operand::{
    validate_range, IntoMatrixWindow, IntoMatrixWindowMut, IntoTensorWindow, IntoTensorWindowMut,
    IntoVectorWindow, IntoVectorWindowMut, Operand, OperandMut,
};

// ============================================================================
// Views and factories
// ============================================================================
pub use rowcol::{column, column_mut, row, row_mut, ColumnView, ColumnViewMut, RowView, RowViewMut};
pub use slices::{
    column_slice, column_slice_mut, page, page_mut, row_slice, row_slice_mut, ColumnSlice,
    ColumnSliceMut, PageSlice, PageSliceMut, RowSlice, RowSliceMut,
};
pub use submatrix::{
    columns, columns_mut, derestrict, dilated_submatrix, dilated_submatrix_mut,
    dilated_submatrix_mut_unchecked, dilated_submatrix_unchecked, rows, rows_mut, submatrix,
    submatrix_mut, view_structure, DilatedSubmatrix, DilatedSubmatrixMut,
};
pub use subtensor::{
    dilated_subtensor, dilated_subtensor_mut, dilated_subtensor_mut_unchecked,
    dilated_subtensor_unchecked, pages, pages_mut, subtensor, subtensor_mut, DilatedSubtensor,
    DilatedSubtensorMut,
};
pub use subvector::{
    dilated_subvector, dilated_subvector_mut, dilated_subvector_mut_unchecked,
    dilated_subvector_unchecked, subvector, subvector_mut, DilatedSubvector, DilatedSubvectorMut,
};

// ============================================================================
// Properties and free functions
// ============================================================================
pub use invert::invert;
pub use properties::{
    clear, is_hermitian, is_lower, is_strictly_lower, is_strictly_upper, is_symmetric,
    is_uni_lower, is_uni_upper, is_upper,
};

// ============================================================================
// Error types
// ============================================================================

/// Errors produced by view construction and operand mutation.
#[derive(Debug, thiserror::Error)]
pub enum DilatedError {
    /// A view was requested with dilation zero on some axis.
    #[error("zero dilation on {axis} axis")]
    ZeroDilation { axis: Axis },

    /// A view request does not fit inside its operand.
    #[error(
        "invalid {axis} range: offset {offset}, extent {extent}, dilation {dilation} \
         does not fit extent {bound}"
    )]
    InvalidView {
        axis: Axis,
        offset: usize,
        extent: usize,
        dilation: usize,
        bound: usize,
    },

    /// An element index is outside the operand's extent on one axis.
    #[error("{axis} index {index} out of bounds for extent {extent}")]
    IndexOutOfBounds {
        axis: Axis,
        index: usize,
        extent: usize,
    },

    /// Operand shapes are incompatible for the requested operation.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A write was refused by the operand's restriction policy.
    #[error("restricted write: {0}")]
    Restricted(String),

    /// The operand is singular and cannot be inverted.
    #[error("matrix is singular")]
    Singular,
}

/// Result type for dilated view operations.
pub type Result<T> = std::result::Result<T, DilatedError>;
