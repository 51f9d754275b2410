//! Free structural predicates over matrix-shaped operands.
//!
//! Each predicate first consults the operand's declared [`StructureFlags`],
//! which adaptors set and views propagate through aligned windows. When the
//! flags promise nothing the predicate falls back to an element-wise scan,
//! so a plain matrix that happens to be, say, lower triangular by value is
//! still recognized.

use dilated_traits::Conjugate;
use num_traits::{One, Zero};

use crate::traits::{Clear, Matrix};

/// True if the operand is square and equal to its transpose.
pub fn is_symmetric<M>(operand: &M) -> bool
where
    M: Matrix + ?Sized,
{
    if operand.structure().symmetric {
        return true;
    }
    let n = operand.rows();
    if n != operand.columns() {
        return false;
    }
    (0..n).all(|i| (0..i).all(|j| operand.get(i, j) == operand.get(j, i)))
}

/// True if the operand is square and equal to its conjugate transpose.
pub fn is_hermitian<M>(operand: &M) -> bool
where
    M: Matrix + ?Sized,
{
    if operand.structure().hermitian {
        return true;
    }
    let n = operand.rows();
    if n != operand.columns() {
        return false;
    }
    (0..n).all(|i| (0..=i).all(|j| operand.get(i, j) == operand.get(j, i).conj()))
}

/// True if the operand is square and zero above the diagonal.
pub fn is_lower<M>(operand: &M) -> bool
where
    M: Matrix + ?Sized,
{
    if operand.structure().lower {
        return true;
    }
    let n = operand.rows();
    if n != operand.columns() {
        return false;
    }
    (0..n).all(|i| (i + 1..n).all(|j| operand.get(i, j) == M::Elem::zero()))
}

/// True if the operand is square and zero below the diagonal.
pub fn is_upper<M>(operand: &M) -> bool
where
    M: Matrix + ?Sized,
{
    if operand.structure().upper {
        return true;
    }
    let n = operand.rows();
    if n != operand.columns() {
        return false;
    }
    (0..n).all(|i| (0..i).all(|j| operand.get(i, j) == M::Elem::zero()))
}

/// True if the operand is square and zero on and above the diagonal.
pub fn is_strictly_lower<M>(operand: &M) -> bool
where
    M: Matrix + ?Sized,
{
    if operand.structure().strictly_lower {
        return true;
    }
    let n = operand.rows();
    if n != operand.columns() {
        return false;
    }
    (0..n).all(|i| (i..n).all(|j| operand.get(i, j) == M::Elem::zero()))
}

/// True if the operand is square and zero on and below the diagonal.
pub fn is_strictly_upper<M>(operand: &M) -> bool
where
    M: Matrix + ?Sized,
{
    if operand.structure().strictly_upper {
        return true;
    }
    let n = operand.rows();
    if n != operand.columns() {
        return false;
    }
    (0..n).all(|i| (0..=i).all(|j| operand.get(i, j) == M::Elem::zero()))
}

/// True if the operand is lower triangular with a diagonal of ones.
pub fn is_uni_lower<M>(operand: &M) -> bool
where
    M: Matrix + ?Sized,
{
    if operand.structure().uni_lower {
        return true;
    }
    let n = operand.rows();
    if n != operand.columns() {
        return false;
    }
    (0..n).all(|i| {
        operand.get(i, i) == M::Elem::one()
            && (i + 1..n).all(|j| operand.get(i, j) == M::Elem::zero())
    })
}

/// True if the operand is upper triangular with a diagonal of ones.
pub fn is_uni_upper<M>(operand: &M) -> bool
where
    M: Matrix + ?Sized,
{
    if operand.structure().uni_upper {
        return true;
    }
    let n = operand.rows();
    if n != operand.columns() {
        return false;
    }
    (0..n).all(|i| {
        operand.get(i, i) == M::Elem::one() && (0..i).all(|j| operand.get(i, j) == M::Elem::zero())
    })
}

/// Free-function spelling of [`Clear::clear`].
pub fn clear<C>(operand: &mut C)
where
    C: Clear + ?Sized,
{
    operand.clear();
}
