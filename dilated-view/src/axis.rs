//! Per-axis offset, extent, and dilation primitives.
//!
//! An [`AxisRange`] is the value every view carries once per axis. It has
//! no behavior beyond index translation, the bounds predicate, and range
//! composition; ownership and validation live with the view types.

use std::fmt;

/// Axis labels, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Element,
    Page,
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Element => f.write_str("element"),
            Axis::Page => f.write_str("page"),
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// One axis of a view descriptor.
///
/// `dilation` is the stride multiplier; dilation 1 is an ordinary
/// contiguous slice, dilation k selects every k-th index. The range
/// selects `offset + i * dilation` for `i < extent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRange {
    pub offset: usize,
    pub extent: usize,
    pub dilation: usize,
}

impl AxisRange {
    pub const fn new(offset: usize, extent: usize, dilation: usize) -> Self {
        Self {
            offset,
            extent,
            dilation,
        }
    }

    /// The whole parent axis: offset 0, dilation 1.
    pub const fn identity(extent: usize) -> Self {
        Self {
            offset: 0,
            extent,
            dilation: 1,
        }
    }

    /// A contiguous sub-range, dilation 1.
    pub const fn contiguous(offset: usize, extent: usize) -> Self {
        Self {
            offset,
            extent,
            dilation: 1,
        }
    }

    /// Maps a range-local index to a parent-local index.
    #[inline]
    pub const fn translate(self, local: usize) -> usize {
        self.offset + local * self.dilation
    }

    /// True if every selected index lies inside a parent axis of
    /// `parent_extent` elements. Empty ranges always fit; arithmetic
    /// overflow counts as not fitting.
    pub const fn fits(self, parent_extent: usize) -> bool {
        if self.extent == 0 {
            return true;
        }
        let reach = match (self.extent - 1).checked_mul(self.dilation) {
            Some(r) => r,
            None => return false,
        };
        match self.offset.checked_add(reach) {
            Some(last) => last < parent_extent,
            None => false,
        }
    }

    /// Folds a range expressed in `self`-local coordinates into a range in
    /// the parent's coordinates. `self` is the outer range.
    ///
    /// The extent is the inner extent, unchanged; offsets and dilations
    /// combine so that `compose(outer, inner).translate(i) ==
    /// outer.translate(inner.translate(i))` for every `i`.
    pub const fn compose(self, inner: AxisRange) -> AxisRange {
        AxisRange {
            offset: self.offset + inner.offset * self.dilation,
            extent: inner.extent,
            dilation: inner.dilation * self.dilation,
        }
    }

    /// True if the range is exactly the whole of a parent axis.
    pub const fn is_full(self, parent_extent: usize) -> bool {
        self.offset == 0 && self.dilation == 1 && self.extent == parent_extent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate() {
        let r = AxisRange::new(3, 4, 2);
        assert_eq!(r.translate(0), 3);
        assert_eq!(r.translate(1), 5);
        assert_eq!(r.translate(3), 9);
        assert_eq!(AxisRange::identity(5).translate(4), 4);
    }

    #[test]
    fn test_fits_last_selected_index() {
        // selects rows 0 and 2 of a 3-row parent
        assert!(AxisRange::new(0, 2, 2).fits(3));
        // selects rows 3 and 5 of a 4-row parent: 5 is out
        assert!(!AxisRange::new(3, 2, 2).fits(4));
        // exact full span
        assert!(AxisRange::identity(4).fits(4));
        assert!(!AxisRange::new(0, 5, 1).fits(4));
        // empty ranges fit anywhere
        assert!(AxisRange::new(99, 0, 7).fits(1));
        assert!(AxisRange::new(0, 0, 1).fits(0));
    }

    #[test]
    fn test_fits_overflow() {
        assert!(!AxisRange::new(1, usize::MAX, 2).fits(usize::MAX));
        assert!(!AxisRange::new(usize::MAX, 2, usize::MAX).fits(usize::MAX));
    }

    #[test]
    fn test_compose_translation_identity() {
        let outer = AxisRange::new(1, 4, 3);
        let inner = AxisRange::new(2, 2, 2);
        let folded = outer.compose(inner);
        assert_eq!(folded, AxisRange::new(7, 2, 6));
        for i in 0..inner.extent {
            assert_eq!(folded.translate(i), outer.translate(inner.translate(i)));
        }
    }

    #[test]
    fn test_compose_keeps_extent() {
        let folded = AxisRange::new(0, 8, 2).compose(AxisRange::new(0, 3, 1));
        assert_eq!(folded.extent, 3);
        assert_eq!(folded.dilation, 2);
    }

    #[test]
    fn test_nested_fits_is_subset() {
        // any inner range fitting the outer extent collapses to a range
        // fitting the outer's own parent
        let parent = 10;
        let outer = AxisRange::new(1, 4, 2);
        assert!(outer.fits(parent));
        let inner = AxisRange::new(1, 2, 2);
        assert!(inner.fits(outer.extent));
        let folded = outer.compose(inner);
        assert!(folded.fits(parent));
        // an inner range overrunning the outer extent is rejected even
        // though the folded range would land inside the parent
        let too_far = AxisRange::new(3, 1, 1);
        assert!(outer.compose(too_far).fits(parent));
        assert!(!too_far.fits(outer.extent));
    }

    #[test]
    fn test_is_full() {
        assert!(AxisRange::identity(6).is_full(6));
        assert!(!AxisRange::identity(5).is_full(6));
        assert!(!AxisRange::new(0, 6, 2).is_full(6));
        assert!(!AxisRange::new(1, 5, 1).is_full(6));
    }
}
