//! Structural guarantees carried by adaptors and derived for views and
//! expressions.
//!
//! A flag set records what an operand promises about its matrix-shaped
//! value: symmetry, Hermitian symmetry, and the triangular family. The
//! free predicates consult these flags before falling back to an
//! element-wise scan, and the expression layer combines them node by node
//! with the algebra below.

/// The structural guarantees a matrix-shaped operand declares.
///
/// `lower`/`upper` are the inclusive triangular properties. The `uni_*`
/// and `strictly_*` refinements always imply the matching inclusive flag;
/// the constants and combinators in this module maintain that invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StructureFlags {
    pub symmetric: bool,
    pub hermitian: bool,
    pub lower: bool,
    pub upper: bool,
    pub uni_lower: bool,
    pub uni_upper: bool,
    pub strictly_lower: bool,
    pub strictly_upper: bool,
}

impl StructureFlags {
    /// No guarantee. The default for plain containers and generic views.
    pub const NONE: Self = Self {
        symmetric: false,
        hermitian: false,
        lower: false,
        upper: false,
        uni_lower: false,
        uni_upper: false,
        strictly_lower: false,
        strictly_upper: false,
    };

    pub const SYMMETRIC: Self = Self {
        symmetric: true,
        ..Self::NONE
    };

    pub const HERMITIAN: Self = Self {
        hermitian: true,
        ..Self::NONE
    };

    pub const LOWER: Self = Self {
        lower: true,
        ..Self::NONE
    };

    pub const UPPER: Self = Self {
        upper: true,
        ..Self::NONE
    };

    pub const UNI_LOWER: Self = Self {
        lower: true,
        uni_lower: true,
        ..Self::NONE
    };

    pub const UNI_UPPER: Self = Self {
        upper: true,
        uni_upper: true,
        ..Self::NONE
    };

    pub const STRICTLY_LOWER: Self = Self {
        lower: true,
        strictly_lower: true,
        ..Self::NONE
    };

    pub const STRICTLY_UPPER: Self = Self {
        upper: true,
        strictly_upper: true,
        ..Self::NONE
    };

    /// True if any guarantee is set.
    pub const fn any(self) -> bool {
        self.symmetric
            || self.hermitian
            || self.lower
            || self.upper
            || self.uni_lower
            || self.uni_upper
            || self.strictly_lower
            || self.strictly_upper
    }

    /// Lower and upper at once, i.e. a diagonal operand.
    pub const fn is_diagonal(self) -> bool {
        self.lower && self.upper
    }

    /// Field-wise or. Used when an operand declares several guarantees.
    pub const fn union(self, other: Self) -> Self {
        Self {
            symmetric: self.symmetric || other.symmetric,
            hermitian: self.hermitian || other.hermitian,
            lower: self.lower || other.lower,
            upper: self.upper || other.upper,
            uni_lower: self.uni_lower || other.uni_lower,
            uni_upper: self.uni_upper || other.uni_upper,
            strictly_lower: self.strictly_lower || other.strictly_lower,
            strictly_upper: self.strictly_upper || other.strictly_upper,
        }
    }

    /// Flags of the transpose: the lower and upper families swap, the
    /// symmetry flags stay.
    pub const fn transposed(self) -> Self {
        Self {
            symmetric: self.symmetric,
            hermitian: self.hermitian,
            lower: self.upper,
            upper: self.lower,
            uni_lower: self.uni_upper,
            uni_upper: self.uni_lower,
            strictly_lower: self.strictly_upper,
            strictly_upper: self.strictly_lower,
        }
    }

    /// Flags of an element-wise sum or difference.
    ///
    /// Triangular shape survives only when both sides share it. A unit
    /// diagonal survives only against a strictly triangular other side,
    /// since `1 + 0 = 1`.
    pub const fn sum(self, other: Self) -> Self {
        Self {
            symmetric: self.symmetric && other.symmetric,
            hermitian: self.hermitian && other.hermitian,
            lower: self.lower && other.lower,
            upper: self.upper && other.upper,
            uni_lower: (self.uni_lower && other.strictly_lower)
                || (self.strictly_lower && other.uni_lower),
            uni_upper: (self.uni_upper && other.strictly_upper)
                || (self.strictly_upper && other.uni_upper),
            strictly_lower: self.strictly_lower && other.strictly_lower,
            strictly_upper: self.strictly_upper && other.strictly_upper,
        }
    }

    /// Flags of an element-wise difference.
    ///
    /// Like [`sum`](Self::sum) except that the unit diagonal is not
    /// symmetric in the operands: `1 - 0 = 1`, but `0 - 1 = -1`.
    pub const fn difference(self, other: Self) -> Self {
        Self {
            symmetric: self.symmetric && other.symmetric,
            hermitian: self.hermitian && other.hermitian,
            lower: self.lower && other.lower,
            upper: self.upper && other.upper,
            uni_lower: self.uni_lower && other.strictly_lower,
            uni_upper: self.uni_upper && other.strictly_upper,
            strictly_lower: self.strictly_lower && other.strictly_lower,
            strictly_upper: self.strictly_upper && other.strictly_upper,
        }
    }

    /// Flags of an element-wise (Schur) product.
    ///
    /// A zero on either side wins, so triangular shape survives when either
    /// side has it. The unit diagonal needs it on both sides.
    pub const fn schur(self, other: Self) -> Self {
        Self {
            symmetric: self.symmetric && other.symmetric,
            hermitian: self.hermitian && other.hermitian,
            lower: self.lower || other.lower,
            upper: self.upper || other.upper,
            uni_lower: self.uni_lower && other.uni_lower,
            uni_upper: self.uni_upper && other.uni_upper,
            strictly_lower: self.strictly_lower || other.strictly_lower,
            strictly_upper: self.strictly_upper || other.strictly_upper,
        }
    }

    /// Flags of a matrix product.
    ///
    /// Products of triangular matrices of the same kind stay triangular;
    /// symmetry does not survive a general product.
    pub const fn product(self, other: Self) -> Self {
        Self {
            symmetric: false,
            hermitian: false,
            lower: self.lower && other.lower,
            upper: self.upper && other.upper,
            uni_lower: self.uni_lower && other.uni_lower,
            uni_upper: self.uni_upper && other.uni_upper,
            strictly_lower: (self.strictly_lower && other.lower)
                || (self.lower && other.strictly_lower),
            strictly_upper: (self.strictly_upper && other.upper)
                || (self.upper && other.strictly_upper),
        }
    }

    /// Flags after multiplication by a runtime scalar.
    ///
    /// The zero pattern is unchanged but the unit diagonal is lost, and a
    /// possibly complex factor breaks the Hermitian guarantee.
    pub const fn scaled(self) -> Self {
        Self {
            symmetric: self.symmetric,
            hermitian: false,
            lower: self.lower,
            upper: self.upper,
            uni_lower: false,
            uni_upper: false,
            strictly_lower: self.strictly_lower,
            strictly_upper: self.strictly_upper,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refinements_imply_inclusive() {
        assert!(StructureFlags::UNI_LOWER.lower);
        assert!(StructureFlags::STRICTLY_LOWER.lower);
        assert!(StructureFlags::UNI_UPPER.upper);
        assert!(StructureFlags::STRICTLY_UPPER.upper);
    }

    #[test]
    fn test_none_and_any() {
        assert!(!StructureFlags::NONE.any());
        assert!(StructureFlags::SYMMETRIC.any());
        assert!(StructureFlags::LOWER.union(StructureFlags::UPPER).is_diagonal());
    }

    #[test]
    fn test_transposed_swaps_triangular() {
        let t = StructureFlags::STRICTLY_LOWER.transposed();
        assert_eq!(t, StructureFlags::STRICTLY_UPPER);
        assert_eq!(StructureFlags::SYMMETRIC.transposed(), StructureFlags::SYMMETRIC);
    }

    #[test]
    fn test_sum_algebra() {
        // lower + lower stays lower
        let s = StructureFlags::LOWER.sum(StructureFlags::LOWER);
        assert!(s.lower && !s.upper);
        // uni + strictly keeps the unit diagonal
        let s = StructureFlags::UNI_LOWER.sum(StructureFlags::STRICTLY_LOWER);
        assert!(s.uni_lower);
        // uni + uni has a diagonal of twos
        let s = StructureFlags::UNI_LOWER.sum(StructureFlags::UNI_LOWER);
        assert!(s.lower && !s.uni_lower);
        // lower + upper is unstructured
        let s = StructureFlags::LOWER.sum(StructureFlags::UPPER);
        assert!(!s.any());
    }

    #[test]
    fn test_difference_is_asymmetric() {
        // uni - strictly keeps the unit diagonal
        let d = StructureFlags::UNI_LOWER.difference(StructureFlags::STRICTLY_LOWER);
        assert!(d.uni_lower);
        // strictly - uni has a diagonal of minus ones
        let d = StructureFlags::STRICTLY_LOWER.difference(StructureFlags::UNI_LOWER);
        assert!(d.lower && !d.uni_lower && !d.strictly_lower);
    }

    #[test]
    fn test_schur_algebra() {
        // a zero pattern on either side wins
        let s = StructureFlags::STRICTLY_LOWER.schur(StructureFlags::NONE);
        assert!(s.strictly_lower);
        // lower times upper is diagonal
        let s = StructureFlags::LOWER.schur(StructureFlags::UPPER);
        assert!(s.is_diagonal());
    }

    #[test]
    fn test_product_algebra() {
        let s = StructureFlags::LOWER.product(StructureFlags::LOWER);
        assert!(s.lower && !s.symmetric);
        let s = StructureFlags::UNI_LOWER.product(StructureFlags::UNI_LOWER);
        assert!(s.uni_lower);
        let s = StructureFlags::STRICTLY_LOWER.product(StructureFlags::LOWER);
        assert!(s.strictly_lower);
        let s = StructureFlags::SYMMETRIC.product(StructureFlags::SYMMETRIC);
        assert!(!s.any());
    }

    #[test]
    fn test_scaled_drops_unit_diagonal() {
        let s = StructureFlags::UNI_UPPER.scaled();
        assert!(s.upper && !s.uni_upper);
        assert!(!StructureFlags::HERMITIAN.scaled().hermitian);
        assert!(StructureFlags::SYMMETRIC.scaled().symmetric);
    }
}
