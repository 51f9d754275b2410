//! Dense in-place inversion through the mutation protocol.

use num_complex::ComplexFloat;
use num_traits::{One, Zero};

use crate::matrix::DynamicMatrix;
use crate::traits::{Matrix, MatrixMut};
use crate::{DilatedError, Result};

/// Inverts a square operand in place by Gauss-Jordan elimination with
/// partial pivoting.
///
/// Elimination runs on a dense scratch copy, so a singular operand is
/// reported as [`DilatedError::Singular`] before anything is written back.
/// The write-back goes through [`MatrixMut::assign_from`] and thereby
/// honors the operand's restriction policy: a refused write leaves the
/// operand untouched and surfaces as [`DilatedError::Restricted`].
pub fn invert<M>(operand: &mut M) -> Result<()>
where
    M: MatrixMut + ?Sized,
    M::Elem: ComplexFloat,
{
    let n = operand.rows();
    if n != operand.columns() {
        return Err(DilatedError::DimensionMismatch(format!(
            "cannot invert a {}x{} operand",
            n,
            operand.columns()
        )));
    }

    let mut work = DynamicMatrix::from_fn(n, n, |i, j| operand.get(i, j));
    let mut inverse = DynamicMatrix::from_fn(n, n, |i, j| {
        if i == j {
            M::Elem::one()
        } else {
            M::Elem::zero()
        }
    });

    for k in 0..n {
        let mut pivot_row = k;
        let mut pivot_abs = work[(k, k)].abs();
        for i in k + 1..n {
            let abs = work[(i, k)].abs();
            if abs > pivot_abs {
                pivot_row = i;
                pivot_abs = abs;
            }
        }
        if pivot_abs == <M::Elem as ComplexFloat>::Real::zero() {
            return Err(DilatedError::Singular);
        }
        if pivot_row != k {
            for j in 0..n {
                let t = work[(k, j)];
                work[(k, j)] = work[(pivot_row, j)];
                work[(pivot_row, j)] = t;
                let t = inverse[(k, j)];
                inverse[(k, j)] = inverse[(pivot_row, j)];
                inverse[(pivot_row, j)] = t;
            }
        }

        let pivot = work[(k, k)];
        for j in 0..n {
            work[(k, j)] = work[(k, j)] / pivot;
            inverse[(k, j)] = inverse[(k, j)] / pivot;
        }
        for i in 0..n {
            if i == k {
                continue;
            }
            let factor = work[(i, k)];
            if factor == M::Elem::zero() {
                continue;
            }
            for j in 0..n {
                work[(i, j)] = work[(i, j)] - factor * work[(k, j)];
                inverse[(i, j)] = inverse[(i, j)] - factor * inverse[(k, j)];
            }
        }
    }

    operand.assign_from(&inverse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submatrix::dilated_submatrix_mut;
    use approx::assert_abs_diff_eq;
    use num_complex::Complex64;

    #[test]
    fn test_invert_2x2() {
        let mut m = DynamicMatrix::from_rows([[4.0, 7.0], [2.0, 6.0]]);
        invert(&mut m).unwrap();
        assert_abs_diff_eq!(m.get(0, 0), 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(m.get(0, 1), -0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(m.get(1, 0), -0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(m.get(1, 1), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_invert_roundtrip() {
        let a = DynamicMatrix::from_rows([[2.0, 1.0, 1.0], [1.0, 3.0, 2.0], [1.0, 0.0, 0.0]]);
        let mut inv = a.clone();
        invert(&mut inv).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let mut acc = 0.0;
                for k in 0..3 {
                    acc += a.get(i, k) * inv.get(k, j);
                }
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(acc, expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_singular_leaves_operand_unchanged() {
        let mut m = DynamicMatrix::from_rows([[1.0, 2.0], [2.0, 4.0]]);
        assert!(matches!(invert(&mut m), Err(DilatedError::Singular)));
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(0, 1), 2.0);
        assert_eq!(m.get(1, 0), 2.0);
        assert_eq!(m.get(1, 1), 4.0);
    }

    #[test]
    fn test_non_square_rejected() {
        let mut m = DynamicMatrix::<f64>::zeros(2, 3);
        assert!(matches!(
            invert(&mut m),
            Err(DilatedError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn test_invert_through_dilated_view() {
        let mut z = DynamicMatrix::from_fn(4, 4, |i, j| if i == j { 1.0 } else { 0.0 });
        {
            let mut v = dilated_submatrix_mut(&mut z, 0, 0, 2, 2, 2, 2).unwrap();
            v.set(0, 0, 4.0);
            v.set(0, 1, 7.0);
            v.set(1, 0, 2.0);
            v.set(1, 1, 6.0);
            invert(&mut v).unwrap();
        }
        assert_abs_diff_eq!(z.get(0, 0), 0.6, epsilon = 1e-12);
        assert_abs_diff_eq!(z.get(0, 2), -0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(z.get(2, 0), -0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(z.get(2, 2), 0.4, epsilon = 1e-12);
        // elements outside the dilated window stay put
        assert_eq!(z.get(1, 1), 1.0);
        assert_eq!(z.get(3, 3), 1.0);
        assert_eq!(z.get(0, 1), 0.0);
    }

    #[test]
    fn test_invert_complex() {
        let mut m = DynamicMatrix::from_rows([
            [Complex64::new(1.0, 1.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(2.0, 0.0)],
        ]);
        invert(&mut m).unwrap();
        assert!((m.get(0, 0) - Complex64::new(0.5, -0.5)).norm() < 1e-12);
        assert!((m.get(1, 1) - Complex64::new(0.5, 0.0)).norm() < 1e-12);
        assert!(m.get(0, 1).norm() < 1e-12);
    }
}
