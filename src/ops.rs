//! Operator sugar over the expression node types.
//!
//! The operators delegate to the checked builder functions and panic on a
//! shape or orientation mismatch, mirroring the panic-on-misuse contract
//! of indexing. Code that wants to handle conformance errors calls the
//! builders directly.
//!
//! `*` is the algebraic product: matrix times matrix, matrix times
//! column vector, row vector times matrix, and component-wise for a pair
//! of vectors. `%` is the Schur (element-wise) product for matrices and
//! tensors. Scalars multiply and divide from the right.

use std::ops::{Add, Div, Mul, Rem, Sub};

use dilated_view::Scalar;

use crate::matexpr::MatExpr;
use crate::tensexpr::TensExpr;
use crate::vecexpr::VecExpr;
use crate::Result;

fn checked<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => panic!("{e}"),
    }
}

// ============================================================================
// Matrix expressions
// ============================================================================

impl<'a, T: Scalar> Add for MatExpr<'a, T> {
    type Output = MatExpr<'a, T>;

    fn add(self, rhs: Self) -> Self::Output {
        checked(MatExpr::add(self, rhs))
    }
}

impl<'a, T: Scalar> Sub for MatExpr<'a, T> {
    type Output = MatExpr<'a, T>;

    fn sub(self, rhs: Self) -> Self::Output {
        checked(MatExpr::sub(self, rhs))
    }
}

impl<'a, T: Scalar> Rem for MatExpr<'a, T> {
    type Output = MatExpr<'a, T>;

    fn rem(self, rhs: Self) -> Self::Output {
        checked(MatExpr::schur(self, rhs))
    }
}

impl<'a, T: Scalar> Mul for MatExpr<'a, T> {
    type Output = MatExpr<'a, T>;

    fn mul(self, rhs: Self) -> Self::Output {
        checked(MatExpr::mult(self, rhs))
    }
}

impl<'a, T: Scalar> Mul<VecExpr<'a, T>> for MatExpr<'a, T> {
    type Output = VecExpr<'a, T>;

    fn mul(self, rhs: VecExpr<'a, T>) -> Self::Output {
        checked(VecExpr::mat_vec(self, rhs))
    }
}

impl<'a, T: Scalar> Mul<T> for MatExpr<'a, T> {
    type Output = MatExpr<'a, T>;

    fn mul(self, rhs: T) -> Self::Output {
        MatExpr::scalar_mul(self, rhs)
    }
}

impl<'a, T: Scalar> Div<T> for MatExpr<'a, T> {
    type Output = MatExpr<'a, T>;

    fn div(self, rhs: T) -> Self::Output {
        MatExpr::scalar_div(self, rhs)
    }
}

// ============================================================================
// Vector expressions
// ============================================================================

impl<'a, T: Scalar> Add for VecExpr<'a, T> {
    type Output = VecExpr<'a, T>;

    fn add(self, rhs: Self) -> Self::Output {
        checked(VecExpr::add(self, rhs))
    }
}

impl<'a, T: Scalar> Sub for VecExpr<'a, T> {
    type Output = VecExpr<'a, T>;

    fn sub(self, rhs: Self) -> Self::Output {
        checked(VecExpr::sub(self, rhs))
    }
}

impl<'a, T: Scalar> Mul for VecExpr<'a, T> {
    type Output = VecExpr<'a, T>;

    fn mul(self, rhs: Self) -> Self::Output {
        checked(VecExpr::mult(self, rhs))
    }
}

impl<'a, T: Scalar> Mul<MatExpr<'a, T>> for VecExpr<'a, T> {
    type Output = VecExpr<'a, T>;

    fn mul(self, rhs: MatExpr<'a, T>) -> Self::Output {
        checked(VecExpr::vec_mat(self, rhs))
    }
}

impl<'a, T: Scalar> Mul<T> for VecExpr<'a, T> {
    type Output = VecExpr<'a, T>;

    fn mul(self, rhs: T) -> Self::Output {
        VecExpr::scalar_mul(self, rhs)
    }
}

impl<'a, T: Scalar> Div<T> for VecExpr<'a, T> {
    type Output = VecExpr<'a, T>;

    fn div(self, rhs: T) -> Self::Output {
        VecExpr::scalar_div(self, rhs)
    }
}

// ============================================================================
// Tensor expressions
// ============================================================================

impl<'a, T: Scalar> Add for TensExpr<'a, T> {
    type Output = TensExpr<'a, T>;

    fn add(self, rhs: Self) -> Self::Output {
        checked(TensExpr::add(self, rhs))
    }
}

impl<'a, T: Scalar> Sub for TensExpr<'a, T> {
    type Output = TensExpr<'a, T>;

    fn sub(self, rhs: Self) -> Self::Output {
        checked(TensExpr::sub(self, rhs))
    }
}

impl<'a, T: Scalar> Rem for TensExpr<'a, T> {
    type Output = TensExpr<'a, T>;

    fn rem(self, rhs: Self) -> Self::Output {
        checked(TensExpr::schur(self, rhs))
    }
}

impl<'a, T: Scalar> Mul<T> for TensExpr<'a, T> {
    type Output = TensExpr<'a, T>;

    fn mul(self, rhs: T) -> Self::Output {
        TensExpr::scalar_mul(self, rhs)
    }
}

impl<'a, T: Scalar> Div<T> for TensExpr<'a, T> {
    type Output = TensExpr<'a, T>;

    fn div(self, rhs: T) -> Self::Output {
        TensExpr::scalar_div(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dilated_view::{DynamicMatrix, DynamicTensor, DynamicVector, Matrix, Tensor, Vector};

    #[test]
    fn test_matrix_operator_chain() {
        let a = DynamicMatrix::from_fn(3, 3, |i, j| (i + j) as f64);
        let b = DynamicMatrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
        let e = (MatExpr::leaf(&a) + MatExpr::leaf(&b)) * 2.0;
        assert_eq!(e.get(1, 2), (3.0 + 5.0) * 2.0);

        let s = MatExpr::leaf(&a) % MatExpr::leaf(&b);
        assert_eq!(s.get(2, 1), 3.0 * 7.0);
    }

    #[test]
    fn test_product_operators() {
        let a = DynamicMatrix::from_fn(2, 3, |i, j| (i * 3 + j + 1) as f64);
        let b = DynamicMatrix::from_fn(3, 2, |i, j| (i * 2 + j + 1) as f64);
        let p = MatExpr::leaf(&a) * MatExpr::leaf(&b);
        assert_eq!((p.rows(), p.columns()), (2, 2));
        assert_eq!(p.get(0, 0), 1.0 * 1.0 + 2.0 * 3.0 + 3.0 * 5.0);

        let x = DynamicVector::from_fn(3, |i| (i + 1) as f64);
        let mv = MatExpr::leaf(&a) * VecExpr::leaf(&x);
        assert_eq!(mv.get(1), 4.0 + 10.0 + 18.0);

        let y = DynamicVector::from_fn(2, |i| (i + 1) as f64).transposed();
        let vm = VecExpr::leaf(&y) * MatExpr::leaf(&a);
        assert_eq!(vm.get(0), 1.0 + 2.0 * 4.0);
    }

    #[test]
    #[should_panic(expected = "incompatible operands")]
    fn test_operator_shape_panic() {
        let a = DynamicMatrix::from_fn(2, 2, |_, _| 1.0);
        let b = DynamicMatrix::from_fn(3, 3, |_, _| 1.0);
        let _ = MatExpr::leaf(&a) + MatExpr::leaf(&b);
    }

    #[test]
    fn test_vector_and_tensor_operators() {
        let u = DynamicVector::from_fn(4, |i| i as f64);
        let v = DynamicVector::from_fn(4, |i| (2 * i) as f64);
        let w = (VecExpr::leaf(&u) - VecExpr::leaf(&v)) * 3.0;
        assert_eq!(w.get(3), (3.0 - 6.0) * 3.0);

        let c = VecExpr::leaf(&u) * VecExpr::leaf(&v);
        assert_eq!(c.get(2), 2.0 * 4.0);

        let s = DynamicTensor::from_fn(2, 2, 2, |p, r, c| (p + r + c) as f64);
        let t = TensExpr::leaf(&s) % TensExpr::leaf(&s);
        assert_eq!(t.get(1, 1, 1), 9.0);
        let h = TensExpr::leaf(&s) / 2.0;
        assert_eq!(h.get(1, 0, 1), 1.0);
    }
}
