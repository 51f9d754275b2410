//! Dilated subvector views.
//!
//! A view selects `extent` elements of its operand starting at `offset`,
//! stepping by `dilation`. Views implement the same access traits as
//! containers, so they nest; a nested request is collapsed onto the
//! innermost operand at construction time through the window protocol, so
//! element access always costs a single coordinate translation.

use dilated_traits::Orientation;

use crate::axis::{Axis, AxisRange};
use crate::operand::{
    debug_validate_range, validate_range, IntoVectorWindow, IntoVectorWindowMut, Operand,
    OperandMut,
};
use crate::traits::{Clear, IsSame, Vector, VectorMut};
use crate::Result;

/// A read-only dilated selection of elements of a vector operand.
#[derive(Debug, Clone)]
pub struct DilatedSubvector<'a, V> {
    op: Operand<'a, V>,
    range: AxisRange,
}

/// A mutable dilated selection of elements of a vector operand.
#[derive(Debug)]
pub struct DilatedSubvectorMut<'a, V> {
    op: OperandMut<'a, V>,
    range: AxisRange,
}

// ==================== factories ====================

/// A dilated subvector of `operand`: elements `offset`, `offset + dilation`,
/// and so on, `extent` of them.
///
/// Fails if `dilation` is zero or the last touched element would fall
/// outside the operand. Nested requests validate against the window of the
/// given view, not against the innermost operand.
pub fn dilated_subvector<'a, W>(
    operand: W,
    offset: usize,
    extent: usize,
    dilation: usize,
) -> Result<DilatedSubvector<'a, W::Target>>
where
    W: IntoVectorWindow<'a>,
{
    let (op, window) = operand.into_window();
    let request = AxisRange::new(offset, extent, dilation);
    validate_range(Axis::Element, request, window.extent)?;
    Ok(DilatedSubvector {
        op,
        range: window.compose(request),
    })
}

/// Like [`dilated_subvector`] but skips the range check. The caller must
/// uphold it; debug builds assert.
pub fn dilated_subvector_unchecked<'a, W>(
    operand: W,
    offset: usize,
    extent: usize,
    dilation: usize,
) -> DilatedSubvector<'a, W::Target>
where
    W: IntoVectorWindow<'a>,
{
    let (op, window) = operand.into_window();
    let request = AxisRange::new(offset, extent, dilation);
    debug_validate_range(Axis::Element, request, window.extent);
    DilatedSubvector {
        op,
        range: window.compose(request),
    }
}

/// A contiguous subvector, i.e. dilation 1.
pub fn subvector<'a, W>(operand: W, offset: usize, extent: usize) -> Result<DilatedSubvector<'a, W::Target>>
where
    W: IntoVectorWindow<'a>,
{
    dilated_subvector(operand, offset, extent, 1)
}

/// Mutable counterpart of [`dilated_subvector`].
pub fn dilated_subvector_mut<'a, W>(
    operand: W,
    offset: usize,
    extent: usize,
    dilation: usize,
) -> Result<DilatedSubvectorMut<'a, W::Target>>
where
    W: IntoVectorWindowMut<'a>,
{
    let (op, window) = operand.into_window_mut();
    let request = AxisRange::new(offset, extent, dilation);
    validate_range(Axis::Element, request, window.extent)?;
    Ok(DilatedSubvectorMut {
        op,
        range: window.compose(request),
    })
}

/// Like [`dilated_subvector_mut`] but skips the range check.
pub fn dilated_subvector_mut_unchecked<'a, W>(
    operand: W,
    offset: usize,
    extent: usize,
    dilation: usize,
) -> DilatedSubvectorMut<'a, W::Target>
where
    W: IntoVectorWindowMut<'a>,
{
    let (op, window) = operand.into_window_mut();
    let request = AxisRange::new(offset, extent, dilation);
    debug_validate_range(Axis::Element, request, window.extent);
    DilatedSubvectorMut {
        op,
        range: window.compose(request),
    }
}

/// Mutable contiguous subvector.
pub fn subvector_mut<'a, W>(
    operand: W,
    offset: usize,
    extent: usize,
) -> Result<DilatedSubvectorMut<'a, W::Target>>
where
    W: IntoVectorWindowMut<'a>,
{
    dilated_subvector_mut(operand, offset, extent, 1)
}

// ==================== read view ====================

impl<'a, V: Vector> DilatedSubvector<'a, V> {
    /// Offset of the first selected element in the operand.
    pub fn offset(&self) -> usize {
        self.range.offset
    }

    /// Step between selected elements in the operand.
    pub fn dilation(&self) -> usize {
        self.range.dilation
    }

    /// The viewed operand.
    pub fn operand(&self) -> &V {
        self.op.as_ref()
    }
}

impl<'a, V: Vector> Vector for DilatedSubvector<'a, V> {
    type Elem = V::Elem;

    fn len(&self) -> usize {
        self.range.extent
    }

    #[inline]
    fn get(&self, index: usize) -> V::Elem {
        debug_assert!(index < self.range.extent);
        self.operand().get(self.range.translate(index))
    }

    fn orientation(&self) -> Orientation {
        self.operand().orientation()
    }

    fn is_intact(&self) -> bool {
        self.operand().is_intact()
    }

    fn try_set(&self, index: usize, value: V::Elem) -> bool {
        self.operand().try_set(self.range.translate(index), value)
    }

    fn try_add(&self, index: usize, value: V::Elem) -> bool {
        self.operand().try_add(self.range.translate(index), value)
    }

    fn try_sub(&self, index: usize, value: V::Elem) -> bool {
        self.operand().try_sub(self.range.translate(index), value)
    }

    fn try_mult(&self, index: usize, value: V::Elem) -> bool {
        self.operand().try_mult(self.range.translate(index), value)
    }

    fn try_div(&self, index: usize, value: V::Elem) -> bool {
        self.operand().try_div(self.range.translate(index), value)
    }

    fn try_assign_from(&self, offset: usize, rhs: &dyn Vector<Elem = V::Elem>) -> bool {
        if self.range.dilation == 1 {
            self.operand().try_assign_from(self.range.translate(offset), rhs)
        } else {
            (0..rhs.len()).all(|i| self.try_set(offset + i, rhs.get(i)))
        }
    }

    fn try_add_assign_from(&self, offset: usize, rhs: &dyn Vector<Elem = V::Elem>) -> bool {
        if self.range.dilation == 1 {
            self.operand().try_add_assign_from(self.range.translate(offset), rhs)
        } else {
            (0..rhs.len()).all(|i| self.try_add(offset + i, rhs.get(i)))
        }
    }

    fn try_sub_assign_from(&self, offset: usize, rhs: &dyn Vector<Elem = V::Elem>) -> bool {
        if self.range.dilation == 1 {
            self.operand().try_sub_assign_from(self.range.translate(offset), rhs)
        } else {
            (0..rhs.len()).all(|i| self.try_sub(offset + i, rhs.get(i)))
        }
    }

    fn try_mult_assign_from(&self, offset: usize, rhs: &dyn Vector<Elem = V::Elem>) -> bool {
        if self.range.dilation == 1 {
            self.operand().try_mult_assign_from(self.range.translate(offset), rhs)
        } else {
            (0..rhs.len()).all(|i| self.try_mult(offset + i, rhs.get(i)))
        }
    }
}

impl<'a, V: Vector + IsSame> IsSame for DilatedSubvector<'a, V> {
    fn is_same(&self, other: &Self) -> bool {
        self.operand().is_same(other.operand()) && self.range == other.range
    }
}

impl<'a, V: Vector + IsSame> IsSame<V> for DilatedSubvector<'a, V> {
    /// A view equals its un-viewed operand only when it covers all of it
    /// with dilation 1.
    fn is_same(&self, other: &V) -> bool {
        self.operand().is_same(other) && self.range.is_full(self.operand().len())
    }
}

impl<'a, 'b, V: Vector> IntoVectorWindow<'b> for &'b DilatedSubvector<'a, V> {
    type Target = V;

    fn into_window(self) -> (Operand<'b, V>, AxisRange) {
        (Operand::Borrowed(self.op.as_ref()), self.range)
    }
}

impl<'a, V: Vector> IntoVectorWindow<'a> for DilatedSubvector<'a, V> {
    type Target = V;

    fn into_window(self) -> (Operand<'a, V>, AxisRange) {
        (self.op, self.range)
    }
}

// ==================== mutable view ====================

impl<'a, V: Vector> DilatedSubvectorMut<'a, V> {
    pub fn offset(&self) -> usize {
        self.range.offset
    }

    pub fn dilation(&self) -> usize {
        self.range.dilation
    }

    pub fn operand(&self) -> &V {
        self.op.as_ref()
    }
}

impl<'a, V: Vector> Vector for DilatedSubvectorMut<'a, V> {
    type Elem = V::Elem;

    fn len(&self) -> usize {
        self.range.extent
    }

    #[inline]
    fn get(&self, index: usize) -> V::Elem {
        debug_assert!(index < self.range.extent);
        self.operand().get(self.range.translate(index))
    }

    fn orientation(&self) -> Orientation {
        self.operand().orientation()
    }

    fn is_intact(&self) -> bool {
        self.operand().is_intact()
    }

    fn try_set(&self, index: usize, value: V::Elem) -> bool {
        self.operand().try_set(self.range.translate(index), value)
    }

    fn try_add(&self, index: usize, value: V::Elem) -> bool {
        self.operand().try_add(self.range.translate(index), value)
    }

    fn try_sub(&self, index: usize, value: V::Elem) -> bool {
        self.operand().try_sub(self.range.translate(index), value)
    }

    fn try_mult(&self, index: usize, value: V::Elem) -> bool {
        self.operand().try_mult(self.range.translate(index), value)
    }

    fn try_div(&self, index: usize, value: V::Elem) -> bool {
        self.operand().try_div(self.range.translate(index), value)
    }

    fn try_assign_from(&self, offset: usize, rhs: &dyn Vector<Elem = V::Elem>) -> bool {
        if self.range.dilation == 1 {
            self.operand().try_assign_from(self.range.translate(offset), rhs)
        } else {
            (0..rhs.len()).all(|i| self.try_set(offset + i, rhs.get(i)))
        }
    }

    fn try_add_assign_from(&self, offset: usize, rhs: &dyn Vector<Elem = V::Elem>) -> bool {
        if self.range.dilation == 1 {
            self.operand().try_add_assign_from(self.range.translate(offset), rhs)
        } else {
            (0..rhs.len()).all(|i| self.try_add(offset + i, rhs.get(i)))
        }
    }

    fn try_sub_assign_from(&self, offset: usize, rhs: &dyn Vector<Elem = V::Elem>) -> bool {
        if self.range.dilation == 1 {
            self.operand().try_sub_assign_from(self.range.translate(offset), rhs)
        } else {
            (0..rhs.len()).all(|i| self.try_sub(offset + i, rhs.get(i)))
        }
    }

    fn try_mult_assign_from(&self, offset: usize, rhs: &dyn Vector<Elem = V::Elem>) -> bool {
        if self.range.dilation == 1 {
            self.operand().try_mult_assign_from(self.range.translate(offset), rhs)
        } else {
            (0..rhs.len()).all(|i| self.try_mult(offset + i, rhs.get(i)))
        }
    }
}

impl<'a, V: VectorMut> VectorMut for DilatedSubvectorMut<'a, V> {
    #[inline]
    fn set(&mut self, index: usize, value: V::Elem) {
        debug_assert!(index < self.range.extent);
        let i = self.range.translate(index);
        self.op.as_mut().set(i, value);
    }
}

impl<'a, V: VectorMut> Clear for DilatedSubvectorMut<'a, V> {
    /// Zeroes the covered elements; the rest of the operand is untouched.
    fn clear(&mut self) {
        self.reset();
    }
}

impl<'a, V: Vector + IsSame> IsSame for DilatedSubvectorMut<'a, V> {
    fn is_same(&self, other: &Self) -> bool {
        self.operand().is_same(other.operand()) && self.range == other.range
    }
}

impl<'a, V: Vector + IsSame> IsSame<V> for DilatedSubvectorMut<'a, V> {
    fn is_same(&self, other: &V) -> bool {
        self.operand().is_same(other) && self.range.is_full(self.operand().len())
    }
}

impl<'a, 'b, V: Vector> IntoVectorWindow<'b> for &'b DilatedSubvectorMut<'a, V> {
    type Target = V;

    fn into_window(self) -> (Operand<'b, V>, AxisRange) {
        (Operand::Borrowed(self.op.as_ref()), self.range)
    }
}

impl<'a, 'b, V: VectorMut> IntoVectorWindowMut<'b> for &'b mut DilatedSubvectorMut<'a, V> {
    type Target = V;

    fn into_window_mut(self) -> (OperandMut<'b, V>, AxisRange) {
        (OperandMut::Borrowed(self.op.as_mut()), self.range)
    }
}

impl<'a, V: VectorMut> IntoVectorWindowMut<'a> for DilatedSubvectorMut<'a, V> {
    type Target = V;

    fn into_window_mut(self) -> (OperandMut<'a, V>, AxisRange) {
        (self.op, self.range)
    }
}
