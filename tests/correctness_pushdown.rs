use approx::assert_relative_eq;
use dilated_rs::{
    decllow, declsym, declupp, dilated_submatrix, dilated_submatrix_expr, dilated_subtensor,
    dilated_subtensor_expr, dilated_subvector, dilated_subvector_expr, ravel, DilatedError,
    DynamicMatrix, DynamicTensor, DynamicVector, ExprError, MatExpr, Matrix, Orientation,
    TensExpr, Tensor, VecExpr, Vector,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn mat(rows: usize, cols: usize, f: impl Fn(usize, usize) -> f64) -> DynamicMatrix<f64> {
    DynamicMatrix::from_fn(rows, cols, f)
}

fn vect(len: usize, f: impl Fn(usize) -> f64) -> DynamicVector<f64> {
    DynamicVector::from_fn(len, f)
}

/// Compares a pushed-down window elementwise against the same window taken
/// from the materialized expression.
fn assert_matches_oracle(pushed: &MatExpr<'_, f64>, full: &DynamicMatrix<f64>, w: [usize; 6]) {
    let oracle = dilated_submatrix(full, w[0], w[1], w[2], w[3], w[4], w[5]).unwrap();
    assert_eq!((pushed.rows(), pushed.columns()), (w[2], w[3]));
    for i in 0..w[2] {
        for j in 0..w[3] {
            assert_relative_eq!(pushed.get(i, j), oracle.get(i, j), epsilon = 1e-10);
        }
    }
}

fn assert_matches_vector_oracle(pushed: &VecExpr<'_, f64>, full: &DynamicVector<f64>, w: [usize; 3]) {
    let oracle = dilated_subvector(full, w[0], w[1], w[2]).unwrap();
    assert_eq!(pushed.len(), w[1]);
    for i in 0..w[1] {
        assert_relative_eq!(pushed.get(i), oracle.get(i), epsilon = 1e-10);
    }
}

#[test]
fn test_componentwise_rows_distribute() {
    let a = mat(6, 7, |i, j| (i * 7 + j) as f64);
    let b = mat(6, 7, |i, j| ((i + 2) * (j + 1)) as f64);
    let w = [1, 0, 2, 3, 2, 2];

    let e = MatExpr::leaf(&a) + MatExpr::leaf(&b);
    let full = e.to_dynamic();
    assert_matches_oracle(&dilated_submatrix_expr(e, 1, 0, 2, 3, 2, 2).unwrap(), &full, w);

    let e = MatExpr::leaf(&a) - MatExpr::leaf(&b);
    let full = e.to_dynamic();
    assert_matches_oracle(&dilated_submatrix_expr(e, 1, 0, 2, 3, 2, 2).unwrap(), &full, w);

    let e = MatExpr::leaf(&a) % MatExpr::leaf(&b);
    let full = e.to_dynamic();
    assert_matches_oracle(&dilated_submatrix_expr(e, 1, 0, 2, 3, 2, 2).unwrap(), &full, w);
}

#[test]
fn test_scalar_and_map_rows_push_through() {
    let a = mat(6, 6, |i, j| (i * 6 + j) as f64);
    let b = mat(6, 6, |i, j| (i + j) as f64);
    let w = [0, 1, 3, 2, 2, 2];

    let e = MatExpr::leaf(&a) * 3.0 - MatExpr::leaf(&b) / 2.0;
    let full = e.to_dynamic();
    assert_matches_oracle(&dilated_submatrix_expr(e, 0, 1, 3, 2, 2, 2).unwrap(), &full, w);

    let e = MatExpr::map(MatExpr::leaf(&a), |x| x * x + 1.0);
    let full = e.to_dynamic();
    assert_matches_oracle(&dilated_submatrix_expr(e, 0, 1, 3, 2, 2, 2).unwrap(), &full, w);

    let e = MatExpr::map2(MatExpr::leaf(&a), MatExpr::leaf(&b), |x, y| x.max(y)).unwrap();
    let full = e.to_dynamic();
    assert_matches_oracle(&dilated_submatrix_expr(e, 0, 1, 3, 2, 2, 2).unwrap(), &full, w);
}

#[test]
fn test_wrappers_are_transparent() {
    let a = mat(5, 5, |i, j| (i * 5 + j) as f64);
    let w = [0, 1, 2, 2, 2, 2];

    let e = MatExpr::eval(MatExpr::leaf(&a));
    let full = e.to_dynamic();
    assert_matches_oracle(&dilated_submatrix_expr(e, 0, 1, 2, 2, 2, 2).unwrap(), &full, w);

    let e = MatExpr::serial(MatExpr::leaf(&a));
    let full = e.to_dynamic();
    assert_matches_oracle(&dilated_submatrix_expr(e, 0, 1, 2, 2, 2, 2).unwrap(), &full, w);

    // a declaration applies to the declared operand, not to its windows;
    // the window result is plain
    let sym = mat(5, 5, |i, j| ((i + 1) * (j + 1)) as f64);
    let e = declsym(MatExpr::leaf(&sym));
    let full = e.to_dynamic();
    let pushed = dilated_submatrix_expr(e, 0, 1, 2, 2, 2, 2).unwrap();
    assert!(!pushed.structure().any());
    assert_matches_oracle(&pushed, &full, w);
}

#[test]
fn test_transpose_swaps_axes() {
    let a = mat(7, 5, |i, j| (i * 5 + j) as f64);
    let e = MatExpr::trans(MatExpr::leaf(&a));
    let full = e.to_dynamic();
    let pushed = dilated_submatrix_expr(e, 1, 0, 2, 3, 2, 2).unwrap();
    assert_matches_oracle(&pushed, &full, [1, 0, 2, 3, 2, 2]);
}

#[test]
fn test_plain_product_window() {
    let a = mat(6, 4, |i, j| (i + j + 1) as f64);
    let b = mat(4, 6, |i, j| (2 * i + j) as f64);
    let e = MatExpr::leaf(&a) * MatExpr::leaf(&b);
    let full = e.to_dynamic();
    let pushed = dilated_submatrix_expr(e, 1, 0, 3, 2, 2, 3).unwrap();
    assert_matches_oracle(&pushed, &full, [1, 0, 3, 2, 2, 3]);
}

#[test]
fn test_triangular_product_narrows_contraction() {
    let lo = mat(8, 8, |i, j| if j <= i { (i + j + 1) as f64 } else { 0.0 });
    let up = mat(8, 8, |i, j| if j >= i { (i * 8 + j + 1) as f64 } else { 0.0 });
    let plain = mat(8, 8, |i, j| (i * 2 + j) as f64);

    // lower · plain: the contracted range ends after the last window row
    let e = MatExpr::mult(decllow(MatExpr::leaf(&lo)), MatExpr::leaf(&plain)).unwrap();
    let full = (MatExpr::leaf(&lo) * MatExpr::leaf(&plain)).to_dynamic();
    let pushed = dilated_submatrix_expr(e, 1, 2, 2, 3, 2, 2).unwrap();
    match &pushed {
        MatExpr::Mult(l, _) => assert_eq!(l.columns(), 4),
        _ => panic!("expected a product"),
    }
    assert_matches_oracle(&pushed, &full, [1, 2, 2, 3, 2, 2]);

    // plain · upper: the contracted range ends after the last window column
    let e = MatExpr::mult(MatExpr::leaf(&plain), declupp(MatExpr::leaf(&up))).unwrap();
    let full = (MatExpr::leaf(&plain) * MatExpr::leaf(&up)).to_dynamic();
    let pushed = dilated_submatrix_expr(e, 1, 2, 2, 3, 2, 2).unwrap();
    match &pushed {
        MatExpr::Mult(l, _) => assert_eq!(l.columns(), 7),
        _ => panic!("expected a product"),
    }
    assert_matches_oracle(&pushed, &full, [1, 2, 2, 3, 2, 2]);

    // upper · lower: both ends move in
    let e = MatExpr::mult(declupp(MatExpr::leaf(&up)), decllow(MatExpr::leaf(&lo))).unwrap();
    let full = (MatExpr::leaf(&up) * MatExpr::leaf(&lo)).to_dynamic();
    let pushed = dilated_submatrix_expr(e, 2, 1, 3, 2, 2, 3).unwrap();
    match &pushed {
        // begin = max(2, 1) = 2, end = min(8, 8, 8) = 8
        MatExpr::Mult(l, _) => assert_eq!(l.columns(), 6),
        _ => panic!("expected a product"),
    }
    assert_matches_oracle(&pushed, &full, [2, 1, 3, 2, 2, 3]);
}

#[test]
fn test_outer_product_window() {
    let u = vect(7, |i| (i + 1) as f64);
    let r = vect(6, |i| (10 * i + 3) as f64).transposed();
    let e = MatExpr::outer(VecExpr::leaf(&u), VecExpr::leaf(&r)).unwrap();
    let full = e.to_dynamic();
    let pushed = dilated_submatrix_expr(e, 2, 1, 2, 2, 2, 3).unwrap();
    assert_matches_oracle(&pushed, &full, [2, 1, 2, 2, 2, 3]);
}

#[test]
fn test_expand_windows_both_orientations() {
    let u = vect(6, |i| (i * i) as f64);
    let e = MatExpr::expand(VecExpr::leaf(&u), 5);
    let full = e.to_dynamic();
    let pushed = dilated_submatrix_expr(e, 1, 0, 2, 2, 2, 2).unwrap();
    assert_matches_oracle(&pushed, &full, [1, 0, 2, 2, 2, 2]);

    let r = vect(6, |i| (i + 4) as f64).transposed();
    let e = MatExpr::expand(VecExpr::leaf(&r), 5);
    let full = e.to_dynamic();
    let pushed = dilated_submatrix_expr(e, 1, 0, 2, 2, 2, 2).unwrap();
    assert_matches_oracle(&pushed, &full, [1, 0, 2, 2, 2, 2]);
}

#[test]
fn test_vector_componentwise_windows() {
    let u = vect(9, |i| (i * 2) as f64);
    let v = vect(9, |i| (i * i) as f64);
    let w = [1, 3, 2];

    let e = VecExpr::leaf(&u) + VecExpr::leaf(&v);
    let full = e.to_dynamic();
    assert_matches_vector_oracle(&dilated_subvector_expr(e, 1, 3, 2).unwrap(), &full, w);

    let e = (VecExpr::leaf(&u) - VecExpr::leaf(&v)) * 2.0;
    let full = e.to_dynamic();
    assert_matches_vector_oracle(&dilated_subvector_expr(e, 1, 3, 2).unwrap(), &full, w);

    let e = VecExpr::leaf(&u) * VecExpr::leaf(&v);
    let full = e.to_dynamic();
    assert_matches_vector_oracle(&dilated_subvector_expr(e, 1, 3, 2).unwrap(), &full, w);

    let e = VecExpr::map(VecExpr::leaf(&u), |x| 1.0 / (x + 1.0));
    let full = e.to_dynamic();
    assert_matches_vector_oracle(&dilated_subvector_expr(e, 1, 3, 2).unwrap(), &full, w);
}

#[test]
fn test_transposed_vector_window() {
    let u = vect(8, |i| (3 * i + 1) as f64);
    let e = VecExpr::trans(VecExpr::leaf(&u));
    let pushed = dilated_subvector_expr(e, 1, 3, 2).unwrap();
    assert_eq!(pushed.orientation(), Orientation::Row);
    for i in 0..3 {
        assert_relative_eq!(pushed.get(i), u.get(1 + 2 * i), epsilon = 1e-10);
    }
}

#[test]
fn test_matvec_window_narrows() {
    let lo = mat(7, 7, |i, j| if j <= i { (i + 2 * j + 1) as f64 } else { 0.0 });
    let x = vect(7, |i| (i + 1) as f64);

    let e = VecExpr::mat_vec(decllow(MatExpr::leaf(&lo)), VecExpr::leaf(&x)).unwrap();
    let full = (MatExpr::leaf(&lo) * VecExpr::leaf(&x)).to_dynamic();
    let pushed = dilated_subvector_expr(e, 1, 3, 2).unwrap();
    match &pushed {
        // last selected row is 5, so the contraction stops at 6
        VecExpr::MatVec(m, _) => assert_eq!(m.columns(), 6),
        _ => panic!("expected a matrix-vector product"),
    }
    assert_matches_vector_oracle(&pushed, &full, [1, 3, 2]);
}

#[test]
fn test_vecmat_window_narrows() {
    let up = mat(7, 7, |i, j| if j >= i { (i * 7 + j + 1) as f64 } else { 0.0 });
    let y = vect(7, |i| (2 * i + 1) as f64).transposed();

    let e = VecExpr::vec_mat(VecExpr::leaf(&y), declupp(MatExpr::leaf(&up))).unwrap();
    let full = (VecExpr::leaf(&y) * MatExpr::leaf(&up)).to_dynamic();
    let pushed = dilated_subvector_expr(e, 1, 3, 2).unwrap();
    match &pushed {
        // an upper matrix contributes rows up to the last selected column
        VecExpr::VecMat(_, m) => assert_eq!(m.rows(), 6),
        _ => panic!("expected a vector-matrix product"),
    }
    assert_matches_vector_oracle(&pushed, &full, [1, 3, 2]);
}

#[test]
fn test_reduction_windows() {
    let a = mat(5, 9, |i, j| ((i + 1) * (j + 2)) as f64);

    let e = VecExpr::reduce_columns(MatExpr::leaf(&a), |x, y| x + y);
    let full = e.to_dynamic();
    assert_matches_vector_oracle(
        &dilated_subvector_expr(e, 2, 3, 3).unwrap(),
        &full,
        [2, 3, 3],
    );

    let e = VecExpr::reduce_rows(MatExpr::leaf(&a), |x, y| if y > x { y } else { x });
    let full = e.to_dynamic();
    assert_matches_vector_oracle(
        &dilated_subvector_expr(e, 1, 2, 3).unwrap(),
        &full,
        [1, 2, 3],
    );
}

#[test]
fn test_tensor_componentwise_windows() {
    let s = DynamicTensor::from_fn(4, 5, 5, |p, r, c| (p * 25 + r * 5 + c) as f64);
    let t = DynamicTensor::from_fn(4, 5, 5, |p, r, c| ((p + r) * (c + 1)) as f64);

    let e = (TensExpr::leaf(&s) + TensExpr::leaf(&t)) * 2.0;
    let full = e.to_dynamic();
    let pushed = dilated_subtensor_expr(e, 1, 0, 1, 2, 3, 2, 2, 2, 3).unwrap();
    let oracle = dilated_subtensor(&full, 1, 0, 1, 2, 3, 2, 2, 2, 3).unwrap();
    for p in 0..2 {
        for r in 0..3 {
            for c in 0..2 {
                assert_relative_eq!(pushed.get(p, r, c), oracle.get(p, r, c), epsilon = 1e-10);
            }
        }
    }

    let e = TensExpr::leaf(&s) % TensExpr::leaf(&t);
    let full = e.to_dynamic();
    let pushed = dilated_subtensor_expr(e, 0, 1, 0, 2, 2, 2, 3, 2, 2).unwrap();
    let oracle = dilated_subtensor(&full, 0, 1, 0, 2, 2, 2, 3, 2, 2).unwrap();
    for p in 0..2 {
        for r in 0..2 {
            for c in 0..2 {
                assert_relative_eq!(pushed.get(p, r, c), oracle.get(p, r, c), epsilon = 1e-10);
            }
        }
    }
}

#[test]
fn test_nested_expression_windows_collapse() {
    let a = mat(10, 10, |i, j| (i * 10 + j) as f64);
    let b = mat(10, 10, |i, j| (i + 3 * j) as f64);

    let e = MatExpr::leaf(&a) + MatExpr::leaf(&b);
    let full = e.to_dynamic();
    let outer = dilated_submatrix_expr(e, 1, 1, 4, 4, 2, 2).unwrap();
    let inner = dilated_submatrix_expr(outer, 0, 1, 2, 2, 2, 1).unwrap();
    // composed window: rows (1, 2, 4), columns (3, 2, 2)
    let oracle = dilated_submatrix(&full, 1, 3, 2, 2, 4, 2).unwrap();
    for i in 0..2 {
        for j in 0..2 {
            assert_relative_eq!(inner.get(i, j), oracle.get(i, j), epsilon = 1e-10);
        }
    }
}

#[test]
fn test_window_error_surfaces_through_compound() {
    let a = mat(4, 4, |i, j| (i + j) as f64);
    let b = mat(4, 4, |i, j| (i * j) as f64);
    let e = MatExpr::leaf(&a) + MatExpr::leaf(&b);
    let err = dilated_submatrix_expr(e, 2, 0, 2, 2, 2, 1).unwrap_err();
    assert!(matches!(
        err,
        ExprError::View(DilatedError::InvalidView { .. })
    ));
}

#[test]
fn test_narrowing_matches_oracle_randomized() {
    let k = 8usize;
    let mut rng = StdRng::seed_from_u64(17);
    let random_window = |rng: &mut StdRng| {
        let offset = rng.gen_range(0..k);
        let dilation = rng.gen_range(1..4usize);
        let max_extent = 1 + (k - 1 - offset) / dilation;
        let extent = rng.gen_range(0..=max_extent.min(4));
        (offset, extent, dilation)
    };

    for _ in 0..25 {
        let lo = DynamicMatrix::from_fn(k, k, |i, j| {
            if j <= i {
                rng.gen_range(-4..5) as f64
            } else {
                0.0
            }
        });
        let up = DynamicMatrix::from_fn(k, k, |i, j| {
            if j >= i {
                rng.gen_range(-4..5) as f64
            } else {
                0.0
            }
        });

        let (row, rows, rd) = random_window(&mut rng);
        let (col, cols, cd) = random_window(&mut rng);

        let full = (MatExpr::leaf(&up) * MatExpr::leaf(&lo)).to_dynamic();
        let e = MatExpr::mult(declupp(MatExpr::leaf(&up)), decllow(MatExpr::leaf(&lo))).unwrap();
        let pushed = dilated_submatrix_expr(e, row, col, rows, cols, rd, cd).unwrap();
        let oracle = dilated_submatrix(&full, row, col, rows, cols, rd, cd).unwrap();
        for i in 0..rows {
            for j in 0..cols {
                assert_relative_eq!(pushed.get(i, j), oracle.get(i, j), epsilon = 1e-10);
            }
        }
    }
}

#[test]
fn test_ravel_row_major_order() {
    let a = mat(3, 4, |i, j| (i * 4 + j) as f64);
    let r = ravel(&a);
    assert_eq!(r.len(), 12);
    assert_eq!(r.orientation(), Orientation::Row);
    for k in 0..12 {
        assert_relative_eq!(r.get(k), k as f64, epsilon = 1e-10);
    }

    // raveling a window flattens the selected elements only
    let window = dilated_submatrix(&a, 0, 1, 2, 2, 2, 2).unwrap();
    let rw = ravel(&window);
    assert_eq!(rw.len(), 4);
    assert_relative_eq!(rw.get(0), a.get(0, 1), epsilon = 1e-10);
    assert_relative_eq!(rw.get(3), a.get(2, 3), epsilon = 1e-10);
}

#[test]
fn test_complex_elements_push_through() {
    use num_complex::Complex64;

    let a = DynamicMatrix::from_fn(6, 6, |i, j| Complex64::new(i as f64, j as f64));
    let b = DynamicMatrix::from_fn(6, 6, |i, j| Complex64::new(j as f64 + 1.0, -(i as f64)));

    let e = (MatExpr::leaf(&a) + MatExpr::leaf(&b)) * Complex64::new(0.0, 2.0);
    let full = e.to_dynamic();
    let pushed = dilated_submatrix_expr(e, 1, 0, 2, 3, 2, 2).unwrap();
    let oracle = dilated_submatrix(&full, 1, 0, 2, 3, 2, 2).unwrap();
    for i in 0..2 {
        for j in 0..3 {
            let diff = pushed.get(i, j) - oracle.get(i, j);
            assert!(diff.norm() < 1e-12);
        }
    }
}
