//! Operand ownership and the window protocol behind the view factories.
//!
//! A view holds its operand either by reference or by value. The borrowed
//! variant is the ordinary case; the owned variant is selected when a view
//! is built over a temporary, such as the slice adapters produced by the
//! `row`/`column`/`page` accessors, so the result never dangles.
//!
//! The `Into*Window` traits decompose a factory argument into an operand
//! plus one window range per axis. Containers and adaptors contribute an
//! identity window over their full extent; a view of the same kind
//! contributes its own ranges and its inner operand, which is what makes
//! nested requests collapse onto the innermost operand instead of
//! stacking wrapper types.

use crate::axis::{Axis, AxisRange};
use crate::traits::{Matrix, MatrixMut, Tensor, TensorMut, Vector, VectorMut};
use crate::{DilatedError, Result};

/// A read operand held by reference or by value.
#[derive(Debug, Clone)]
pub enum Operand<'a, M> {
    Borrowed(&'a M),
    Owned(M),
}

impl<'a, M> Operand<'a, M> {
    #[inline]
    pub fn as_ref(&self) -> &M {
        match self {
            Operand::Borrowed(m) => m,
            Operand::Owned(m) => m,
        }
    }

    /// A borrowed handle to the same operand, usable while `self` lives.
    #[inline]
    pub fn reborrow(&self) -> Operand<'_, M> {
        Operand::Borrowed(self.as_ref())
    }
}

/// A write operand held by unique reference or by value.
#[derive(Debug)]
pub enum OperandMut<'a, M> {
    Borrowed(&'a mut M),
    Owned(M),
}

impl<'a, M> OperandMut<'a, M> {
    #[inline]
    pub fn as_ref(&self) -> &M {
        match self {
            OperandMut::Borrowed(m) => m,
            OperandMut::Owned(m) => m,
        }
    }

    #[inline]
    pub fn as_mut(&mut self) -> &mut M {
        match self {
            OperandMut::Borrowed(m) => m,
            OperandMut::Owned(m) => m,
        }
    }

    #[inline]
    pub fn reborrow_mut(&mut self) -> OperandMut<'_, M> {
        OperandMut::Borrowed(self.as_mut())
    }
}

// ==================== window protocol ====================

/// Decomposition of a factory argument into a matrix operand and one
/// window range per axis.
pub trait IntoMatrixWindow<'a> {
    type Target: Matrix;

    fn into_window(self) -> (Operand<'a, Self::Target>, AxisRange, AxisRange);
}

/// Mutable counterpart of [`IntoMatrixWindow`].
pub trait IntoMatrixWindowMut<'a> {
    type Target: MatrixMut;

    fn into_window_mut(self) -> (OperandMut<'a, Self::Target>, AxisRange, AxisRange);
}

/// Decomposition of a factory argument into a vector operand and its
/// window range.
pub trait IntoVectorWindow<'a> {
    type Target: Vector;

    fn into_window(self) -> (Operand<'a, Self::Target>, AxisRange);
}

/// Mutable counterpart of [`IntoVectorWindow`].
pub trait IntoVectorWindowMut<'a> {
    type Target: VectorMut;

    fn into_window_mut(self) -> (OperandMut<'a, Self::Target>, AxisRange);
}

/// Decomposition of a factory argument into a tensor operand and page,
/// row, and column window ranges.
pub trait IntoTensorWindow<'a> {
    type Target: Tensor;

    fn into_window(self) -> (Operand<'a, Self::Target>, AxisRange, AxisRange, AxisRange);
}

/// Mutable counterpart of [`IntoTensorWindow`].
pub trait IntoTensorWindowMut<'a> {
    type Target: TensorMut;

    fn into_window_mut(self) -> (OperandMut<'a, Self::Target>, AxisRange, AxisRange, AxisRange);
}

// ==================== validation ====================

/// Checks one requested axis range against the raw extent of the window it
/// indexes into. Zero dilation and out-of-range selections are reported
/// with the offending axis and values; nothing is bound on failure.
pub fn validate_range(axis: Axis, range: AxisRange, window_extent: usize) -> Result<()> {
    if range.dilation == 0 {
        return Err(DilatedError::ZeroDilation { axis });
    }
    if !range.fits(window_extent) {
        return Err(DilatedError::InvalidView {
            axis,
            offset: range.offset,
            extent: range.extent,
            dilation: range.dilation,
            bound: window_extent,
        });
    }
    Ok(())
}

/// Debug-build companion of [`validate_range`] for the unchecked factory
/// paths.
pub(crate) fn debug_validate_range(axis: Axis, range: AxisRange, window_extent: usize) {
    debug_assert!(
        range.dilation >= 1 && range.fits(window_extent),
        "invalid {axis} axis range (offset {}, extent {}, dilation {}) for bound {window_extent}",
        range.offset,
        range.extent,
        range.dilation,
    );
}
