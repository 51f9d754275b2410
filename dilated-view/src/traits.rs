//! Element-access traits and the mutation-predicate protocol.
//!
//! Containers, adaptors, and views all implement the same small access
//! traits, so views nest freely and the expression layer can hold any
//! operand behind `&dyn`. Mutation goes through a two-step protocol: the
//! `try_*` family are pure queries ("would this write succeed against the
//! operand's restriction policy"), and the actual `*_assign_from` writers
//! query the whole request first and only then touch storage, so a refused
//! assignment never leaves a partial write behind.
//!
//! Restricted operands (the triangular and symmetry adaptors) override the
//! queries; views override them to translate view-local coordinates into
//! operand coordinates and forward. Plain containers accept everything.

use dilated_traits::{Orientation, Scalar, StructureFlags};
use num_traits::Zero;

use crate::axis::Axis;
use crate::{DilatedError, Result};

// ==================== vector access ====================

/// Read access to a vector-shaped operand.
///
/// `get` is the unchecked accessor: callers must keep `index` below
/// `len()`, and implementations are only required to catch violations with
/// debug assertions. `at` is the checked companion.
pub trait Vector {
    type Elem: Scalar;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Self::Elem;

    fn orientation(&self) -> Orientation {
        Orientation::Column
    }

    /// Bounds-checked element read.
    fn at(&self, index: usize) -> Result<Self::Elem> {
        if index < self.len() {
            Ok(self.get(index))
        } else {
            Err(DilatedError::IndexOutOfBounds {
                axis: Axis::Element,
                index,
                extent: self.len(),
            })
        }
    }

    /// True if every covered element is zero.
    fn is_default(&self) -> bool {
        (0..self.len()).all(|i| self.get(i) == Self::Elem::zero())
    }

    /// True if the operand's internal invariants hold.
    fn is_intact(&self) -> bool {
        true
    }

    // ---- mutation predicates ----
    //
    // Pure queries with the same index preconditions as `get`. The default
    // answers are "yes": plain storage accepts any write.

    fn try_set(&self, _index: usize, _value: Self::Elem) -> bool {
        true
    }

    fn try_add(&self, _index: usize, _value: Self::Elem) -> bool {
        true
    }

    fn try_sub(&self, _index: usize, _value: Self::Elem) -> bool {
        true
    }

    fn try_mult(&self, _index: usize, _value: Self::Elem) -> bool {
        true
    }

    fn try_div(&self, _index: usize, _value: Self::Elem) -> bool {
        true
    }

    /// Whole-range query: would assigning `rhs` starting at `offset`
    /// succeed element for element.
    fn try_assign_from(&self, offset: usize, rhs: &dyn Vector<Elem = Self::Elem>) -> bool {
        (0..rhs.len()).all(|i| self.try_set(offset + i, rhs.get(i)))
    }

    fn try_add_assign_from(&self, offset: usize, rhs: &dyn Vector<Elem = Self::Elem>) -> bool {
        (0..rhs.len()).all(|i| self.try_add(offset + i, rhs.get(i)))
    }

    fn try_sub_assign_from(&self, offset: usize, rhs: &dyn Vector<Elem = Self::Elem>) -> bool {
        (0..rhs.len()).all(|i| self.try_sub(offset + i, rhs.get(i)))
    }

    fn try_mult_assign_from(&self, offset: usize, rhs: &dyn Vector<Elem = Self::Elem>) -> bool {
        (0..rhs.len()).all(|i| self.try_mult(offset + i, rhs.get(i)))
    }
}

/// Write access to a vector-shaped operand.
pub trait VectorMut: Vector {
    /// Unchecked element write; same index precondition as `get`.
    fn set(&mut self, index: usize, value: Self::Elem);

    /// Bounds-checked element write.
    fn set_at(&mut self, index: usize, value: Self::Elem) -> Result<()> {
        if index < self.len() {
            self.set(index, value);
            Ok(())
        } else {
            Err(DilatedError::IndexOutOfBounds {
                axis: Axis::Element,
                index,
                extent: self.len(),
            })
        }
    }

    /// Zeroes every covered element.
    fn reset(&mut self) {
        for i in 0..self.len() {
            self.set(i, Self::Elem::zero());
        }
    }

    /// Assigns `rhs` element for element. The whole request is queried
    /// through the mutation predicates before the first write.
    fn assign_from(&mut self, rhs: &dyn Vector<Elem = Self::Elem>) -> Result<()> {
        if self.len() != rhs.len() {
            return Err(DilatedError::DimensionMismatch(format!(
                "cannot assign a length {} vector to a length {} target",
                rhs.len(),
                self.len()
            )));
        }
        if !self.try_assign_from(0, rhs) {
            return Err(DilatedError::Restricted(
                "vector assignment refused by the operand's restriction policy".into(),
            ));
        }
        for i in 0..rhs.len() {
            self.set(i, rhs.get(i));
        }
        Ok(())
    }

    fn add_assign_from(&mut self, rhs: &dyn Vector<Elem = Self::Elem>) -> Result<()> {
        if self.len() != rhs.len() {
            return Err(DilatedError::DimensionMismatch(format!(
                "cannot add a length {} vector to a length {} target",
                rhs.len(),
                self.len()
            )));
        }
        if !self.try_add_assign_from(0, rhs) {
            return Err(DilatedError::Restricted(
                "vector addition refused by the operand's restriction policy".into(),
            ));
        }
        for i in 0..rhs.len() {
            let v = self.get(i) + rhs.get(i);
            self.set(i, v);
        }
        Ok(())
    }

    fn sub_assign_from(&mut self, rhs: &dyn Vector<Elem = Self::Elem>) -> Result<()> {
        if self.len() != rhs.len() {
            return Err(DilatedError::DimensionMismatch(format!(
                "cannot subtract a length {} vector from a length {} target",
                rhs.len(),
                self.len()
            )));
        }
        if !self.try_sub_assign_from(0, rhs) {
            return Err(DilatedError::Restricted(
                "vector subtraction refused by the operand's restriction policy".into(),
            ));
        }
        for i in 0..rhs.len() {
            let v = self.get(i) - rhs.get(i);
            self.set(i, v);
        }
        Ok(())
    }
}

// ==================== matrix access ====================

/// Read access to a matrix-shaped operand.
pub trait Matrix {
    type Elem: Scalar;

    fn rows(&self) -> usize;

    fn columns(&self) -> usize;

    fn get(&self, row: usize, column: usize) -> Self::Elem;

    /// Structural guarantees the operand declares. Views report their
    /// operand's flags only for diagonally aligned, square, equal-dilation
    /// windows; everything else reports none.
    fn structure(&self) -> StructureFlags {
        StructureFlags::NONE
    }

    fn at(&self, row: usize, column: usize) -> Result<Self::Elem> {
        if row >= self.rows() {
            return Err(DilatedError::IndexOutOfBounds {
                axis: Axis::Row,
                index: row,
                extent: self.rows(),
            });
        }
        if column >= self.columns() {
            return Err(DilatedError::IndexOutOfBounds {
                axis: Axis::Column,
                index: column,
                extent: self.columns(),
            });
        }
        Ok(self.get(row, column))
    }

    fn is_default(&self) -> bool {
        (0..self.rows())
            .all(|i| (0..self.columns()).all(|j| self.get(i, j) == Self::Elem::zero()))
    }

    fn is_intact(&self) -> bool {
        true
    }

    // ---- mutation predicates ----

    fn try_set(&self, _row: usize, _column: usize, _value: Self::Elem) -> bool {
        true
    }

    fn try_add(&self, _row: usize, _column: usize, _value: Self::Elem) -> bool {
        true
    }

    fn try_sub(&self, _row: usize, _column: usize, _value: Self::Elem) -> bool {
        true
    }

    fn try_mult(&self, _row: usize, _column: usize, _value: Self::Elem) -> bool {
        true
    }

    fn try_div(&self, _row: usize, _column: usize, _value: Self::Elem) -> bool {
        true
    }

    /// Whole-rectangle query: would assigning `rhs` with its upper-left
    /// corner at `(row, column)` succeed.
    fn try_assign_from(
        &self,
        row: usize,
        column: usize,
        rhs: &dyn Matrix<Elem = Self::Elem>,
    ) -> bool {
        (0..rhs.rows()).all(|i| {
            (0..rhs.columns()).all(|j| self.try_set(row + i, column + j, rhs.get(i, j)))
        })
    }

    fn try_add_assign_from(
        &self,
        row: usize,
        column: usize,
        rhs: &dyn Matrix<Elem = Self::Elem>,
    ) -> bool {
        (0..rhs.rows()).all(|i| {
            (0..rhs.columns()).all(|j| self.try_add(row + i, column + j, rhs.get(i, j)))
        })
    }

    fn try_sub_assign_from(
        &self,
        row: usize,
        column: usize,
        rhs: &dyn Matrix<Elem = Self::Elem>,
    ) -> bool {
        (0..rhs.rows()).all(|i| {
            (0..rhs.columns()).all(|j| self.try_sub(row + i, column + j, rhs.get(i, j)))
        })
    }

    fn try_schur_assign_from(
        &self,
        row: usize,
        column: usize,
        rhs: &dyn Matrix<Elem = Self::Elem>,
    ) -> bool {
        (0..rhs.rows()).all(|i| {
            (0..rhs.columns()).all(|j| self.try_mult(row + i, column + j, rhs.get(i, j)))
        })
    }

    /// Diagonal-offset query: would assigning `rhs` along the unit-step
    /// diagonal starting at `(row, column)` succeed. `band` is the
    /// column-minus-row offset of that diagonal, passed so restricted
    /// operands can answer without walking.
    fn try_assign_band(
        &self,
        band: isize,
        row: usize,
        column: usize,
        rhs: &dyn Vector<Elem = Self::Elem>,
    ) -> bool {
        let _ = band;
        (0..rhs.len()).all(|k| self.try_set(row + k, column + k, rhs.get(k)))
    }

    fn try_add_assign_band(
        &self,
        band: isize,
        row: usize,
        column: usize,
        rhs: &dyn Vector<Elem = Self::Elem>,
    ) -> bool {
        let _ = band;
        (0..rhs.len()).all(|k| self.try_add(row + k, column + k, rhs.get(k)))
    }
}

/// Write access to a matrix-shaped operand.
pub trait MatrixMut: Matrix {
    fn set(&mut self, row: usize, column: usize, value: Self::Elem);

    fn set_at(&mut self, row: usize, column: usize, value: Self::Elem) -> Result<()> {
        if row >= self.rows() {
            return Err(DilatedError::IndexOutOfBounds {
                axis: Axis::Row,
                index: row,
                extent: self.rows(),
            });
        }
        if column >= self.columns() {
            return Err(DilatedError::IndexOutOfBounds {
                axis: Axis::Column,
                index: column,
                extent: self.columns(),
            });
        }
        self.set(row, column, value);
        Ok(())
    }

    /// Zeroes every covered element, rows outer and columns inner.
    fn reset(&mut self) {
        for i in 0..self.rows() {
            for j in 0..self.columns() {
                self.set(i, j, Self::Elem::zero());
            }
        }
    }

    fn assign_from(&mut self, rhs: &dyn Matrix<Elem = Self::Elem>) -> Result<()> {
        if self.rows() != rhs.rows() || self.columns() != rhs.columns() {
            return Err(DilatedError::DimensionMismatch(format!(
                "cannot assign a {}x{} matrix to a {}x{} target",
                rhs.rows(),
                rhs.columns(),
                self.rows(),
                self.columns()
            )));
        }
        if !self.try_assign_from(0, 0, rhs) {
            return Err(DilatedError::Restricted(
                "matrix assignment refused by the operand's restriction policy".into(),
            ));
        }
        for i in 0..rhs.rows() {
            for j in 0..rhs.columns() {
                self.set(i, j, rhs.get(i, j));
            }
        }
        Ok(())
    }

    fn add_assign_from(&mut self, rhs: &dyn Matrix<Elem = Self::Elem>) -> Result<()> {
        if self.rows() != rhs.rows() || self.columns() != rhs.columns() {
            return Err(DilatedError::DimensionMismatch(format!(
                "cannot add a {}x{} matrix to a {}x{} target",
                rhs.rows(),
                rhs.columns(),
                self.rows(),
                self.columns()
            )));
        }
        if !self.try_add_assign_from(0, 0, rhs) {
            return Err(DilatedError::Restricted(
                "matrix addition refused by the operand's restriction policy".into(),
            ));
        }
        for i in 0..rhs.rows() {
            for j in 0..rhs.columns() {
                let v = self.get(i, j) + rhs.get(i, j);
                self.set(i, j, v);
            }
        }
        Ok(())
    }

    fn sub_assign_from(&mut self, rhs: &dyn Matrix<Elem = Self::Elem>) -> Result<()> {
        if self.rows() != rhs.rows() || self.columns() != rhs.columns() {
            return Err(DilatedError::DimensionMismatch(format!(
                "cannot subtract a {}x{} matrix from a {}x{} target",
                rhs.rows(),
                rhs.columns(),
                self.rows(),
                self.columns()
            )));
        }
        if !self.try_sub_assign_from(0, 0, rhs) {
            return Err(DilatedError::Restricted(
                "matrix subtraction refused by the operand's restriction policy".into(),
            ));
        }
        for i in 0..rhs.rows() {
            for j in 0..rhs.columns() {
                let v = self.get(i, j) - rhs.get(i, j);
                self.set(i, j, v);
            }
        }
        Ok(())
    }

    fn schur_assign_from(&mut self, rhs: &dyn Matrix<Elem = Self::Elem>) -> Result<()> {
        if self.rows() != rhs.rows() || self.columns() != rhs.columns() {
            return Err(DilatedError::DimensionMismatch(format!(
                "cannot Schur-multiply a {}x{} target by a {}x{} matrix",
                self.rows(),
                self.columns(),
                rhs.rows(),
                rhs.columns()
            )));
        }
        if !self.try_schur_assign_from(0, 0, rhs) {
            return Err(DilatedError::Restricted(
                "Schur assignment refused by the operand's restriction policy".into(),
            ));
        }
        for i in 0..rhs.rows() {
            for j in 0..rhs.columns() {
                let v = self.get(i, j) * rhs.get(i, j);
                self.set(i, j, v);
            }
        }
        Ok(())
    }
}

// ==================== tensor access ====================

/// Read access to a page-by-row-by-column tensor operand.
pub trait Tensor {
    type Elem: Scalar;

    fn pages(&self) -> usize;

    fn rows(&self) -> usize;

    fn columns(&self) -> usize;

    fn get(&self, page: usize, row: usize, column: usize) -> Self::Elem;

    fn at(&self, page: usize, row: usize, column: usize) -> Result<Self::Elem> {
        if page >= self.pages() {
            return Err(DilatedError::IndexOutOfBounds {
                axis: Axis::Page,
                index: page,
                extent: self.pages(),
            });
        }
        if row >= self.rows() {
            return Err(DilatedError::IndexOutOfBounds {
                axis: Axis::Row,
                index: row,
                extent: self.rows(),
            });
        }
        if column >= self.columns() {
            return Err(DilatedError::IndexOutOfBounds {
                axis: Axis::Column,
                index: column,
                extent: self.columns(),
            });
        }
        Ok(self.get(page, row, column))
    }

    fn is_default(&self) -> bool {
        (0..self.pages()).all(|p| {
            (0..self.rows())
                .all(|i| (0..self.columns()).all(|j| self.get(p, i, j) == Self::Elem::zero()))
        })
    }

    fn is_intact(&self) -> bool {
        true
    }

    fn try_set(&self, _page: usize, _row: usize, _column: usize, _value: Self::Elem) -> bool {
        true
    }

    fn try_add(&self, _page: usize, _row: usize, _column: usize, _value: Self::Elem) -> bool {
        true
    }

    fn try_sub(&self, _page: usize, _row: usize, _column: usize, _value: Self::Elem) -> bool {
        true
    }

    fn try_mult(&self, _page: usize, _row: usize, _column: usize, _value: Self::Elem) -> bool {
        true
    }

    fn try_div(&self, _page: usize, _row: usize, _column: usize, _value: Self::Elem) -> bool {
        true
    }

    fn try_assign_from(
        &self,
        page: usize,
        row: usize,
        column: usize,
        rhs: &dyn Tensor<Elem = Self::Elem>,
    ) -> bool {
        (0..rhs.pages()).all(|p| {
            (0..rhs.rows()).all(|i| {
                (0..rhs.columns())
                    .all(|j| self.try_set(page + p, row + i, column + j, rhs.get(p, i, j)))
            })
        })
    }
}

/// Write access to a tensor operand.
pub trait TensorMut: Tensor {
    fn set(&mut self, page: usize, row: usize, column: usize, value: Self::Elem);

    fn set_at(&mut self, page: usize, row: usize, column: usize, value: Self::Elem) -> Result<()> {
        if page >= self.pages() {
            return Err(DilatedError::IndexOutOfBounds {
                axis: Axis::Page,
                index: page,
                extent: self.pages(),
            });
        }
        if row >= self.rows() {
            return Err(DilatedError::IndexOutOfBounds {
                axis: Axis::Row,
                index: row,
                extent: self.rows(),
            });
        }
        if column >= self.columns() {
            return Err(DilatedError::IndexOutOfBounds {
                axis: Axis::Column,
                index: column,
                extent: self.columns(),
            });
        }
        self.set(page, row, column, value);
        Ok(())
    }

    /// Zeroes every covered element, pages outer, then rows, then columns.
    fn reset(&mut self) {
        for p in 0..self.pages() {
            for i in 0..self.rows() {
                for j in 0..self.columns() {
                    self.set(p, i, j, Self::Elem::zero());
                }
            }
        }
    }

    fn assign_from(&mut self, rhs: &dyn Tensor<Elem = Self::Elem>) -> Result<()> {
        if self.pages() != rhs.pages() || self.rows() != rhs.rows() || self.columns() != rhs.columns()
        {
            return Err(DilatedError::DimensionMismatch(format!(
                "cannot assign a {}x{}x{} tensor to a {}x{}x{} target",
                rhs.pages(),
                rhs.rows(),
                rhs.columns(),
                self.pages(),
                self.rows(),
                self.columns()
            )));
        }
        if !self.try_assign_from(0, 0, 0, rhs) {
            return Err(DilatedError::Restricted(
                "tensor assignment refused by the operand's restriction policy".into(),
            ));
        }
        for p in 0..rhs.pages() {
            for i in 0..rhs.rows() {
                for j in 0..rhs.columns() {
                    self.set(p, i, j, rhs.get(p, i, j));
                }
            }
        }
        Ok(())
    }
}

// ==================== restriction, clearing, aliasing ====================

/// Operands whose restriction wrapper can be stripped.
///
/// Plain containers are their own unrestricted form; the adaptors hand out
/// the wrapped matrix. `derestrict` on a view maps its operand through
/// this trait while keeping every offset, extent, and dilation.
pub trait Restrictable: MatrixMut + Sized {
    type Unrestricted: MatrixMut<Elem = Self::Elem>;

    fn unrestricted_mut(&mut self) -> &mut Self::Unrestricted;

    fn into_unrestricted(self) -> Self::Unrestricted;
}

/// Clearing: containers drop their storage, views zero what they cover.
pub trait Clear {
    fn clear(&mut self);
}

/// Observable-data identity.
///
/// Two handles are the same iff they denote the same underlying elements:
/// same operand object and pairwise equal offsets, extents, and dilations.
/// A view equals its un-viewed operand only when it spans the whole
/// operand with dilation 1 on every axis.
pub trait IsSame<Rhs = Self> {
    fn is_same(&self, other: &Rhs) -> bool;
}

/// Free-function spelling of [`IsSame::is_same`].
pub fn is_same<A, B>(a: &A, b: &B) -> bool
where
    A: IsSame<B>,
{
    a.is_same(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    // A minimal fixture exercising the provided defaults.
    struct Pair([f64; 2]);

    impl Vector for Pair {
        type Elem = f64;

        fn len(&self) -> usize {
            2
        }

        fn get(&self, index: usize) -> f64 {
            self.0[index]
        }
    }

    impl VectorMut for Pair {
        fn set(&mut self, index: usize, value: f64) {
            self.0[index] = value;
        }
    }

    #[test]
    fn test_vector_defaults() {
        let p = Pair([0.0, 0.0]);
        assert!(p.is_default());
        assert!(p.is_intact());
        assert!(p.try_set(0, 3.0));
        assert!(p.try_assign_from(0, &Pair([1.0, 2.0])));
        assert_eq!(p.at(1).unwrap(), 0.0);
        assert!(matches!(
            p.at(2),
            Err(DilatedError::IndexOutOfBounds { index: 2, .. })
        ));
    }

    #[test]
    fn test_vector_assign_and_reset() {
        let mut p = Pair([0.0, 0.0]);
        p.assign_from(&Pair([1.5, -2.0])).unwrap();
        assert_eq!(p.0, [1.5, -2.0]);
        p.add_assign_from(&Pair([0.5, 2.0])).unwrap();
        assert_eq!(p.0, [2.0, 0.0]);
        p.reset();
        assert!(p.is_default());
    }

    #[test]
    fn test_assign_shape_mismatch() {
        struct One([f64; 1]);
        impl Vector for One {
            type Elem = f64;
            fn len(&self) -> usize {
                1
            }
            fn get(&self, i: usize) -> f64 {
                self.0[i]
            }
        }
        let mut p = Pair([0.0, 0.0]);
        assert!(matches!(
            p.assign_from(&One([1.0])),
            Err(DilatedError::DimensionMismatch(_))
        ));
    }
}
