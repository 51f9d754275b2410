use dilated_rs::{
    clear, column, derestrict, dilated_submatrix, dilated_submatrix_mut, dilated_subtensor,
    dilated_subvector, dilated_subvector_mut, invert, is_same, is_symmetric, page, row_mut,
    Axis, DilatedError, DynamicMatrix, DynamicTensor, DynamicVector, LowerMatrix, Matrix,
    MatrixMut, SymmetricMatrix, Tensor, Vector, VectorMut,
};

fn numbered_matrix(rows: usize, cols: usize) -> DynamicMatrix<i64> {
    DynamicMatrix::from_fn(rows, cols, |i, j| (i * cols + j) as i64)
}

fn numbered_tensor(pages: usize, rows: usize, cols: usize) -> DynamicTensor<i64> {
    DynamicTensor::from_fn(pages, rows, cols, |p, r, c| {
        (p * rows * cols + r * cols + c) as i64
    })
}

#[test]
fn test_page_then_dilated_window() {
    let t = numbered_tensor(3, 3, 3);
    let plane = page(&t, 0).unwrap();
    let window = dilated_submatrix(plane, 0, 0, 2, 2, 2, 1).unwrap();
    assert_eq!(window.get(0, 0), 0);
    assert_eq!(window.get(0, 1), 1);
    assert_eq!(window.get(1, 0), 6);
    assert_eq!(window.get(1, 1), 7);
}

#[test]
fn test_dilated_row_write_through() {
    let mut z = DynamicMatrix::from_fn(4, 4, |_, _| 0i64);
    {
        let line = row_mut(&mut z, 1).unwrap();
        let mut spread = dilated_subvector_mut(line, 0, 2, 2).unwrap();
        spread.set(0, 5);
        spread.set(1, 9);
    }
    assert_eq!(z.get(1, 0), 5);
    assert_eq!(z.get(1, 1), 0);
    assert_eq!(z.get(1, 2), 9);
    assert_eq!(z.get(1, 3), 0);
    for j in 0..4 {
        assert_eq!(z.get(0, j), 0);
        assert_eq!(z.get(2, j), 0);
    }
}

#[test]
fn test_rejects_window_outside_operand() {
    let a = numbered_matrix(4, 4);
    // last touched row would be 3 + 1 * 2 = 5
    let err = dilated_submatrix(&a, 3, 0, 2, 2, 2, 1).unwrap_err();
    assert!(matches!(
        err,
        DilatedError::InvalidView {
            axis: Axis::Row,
            offset: 3,
            extent: 2,
            dilation: 2,
            bound: 4,
        }
    ));

    let v = DynamicVector::from_fn(5, |i| i as i64);
    assert!(matches!(
        dilated_subvector(&v, 0, 3, 0).unwrap_err(),
        DilatedError::ZeroDilation { axis: Axis::Element }
    ));

    // an empty window is valid anywhere
    let empty = dilated_subvector(&v, 100, 0, 3).unwrap();
    assert_eq!(empty.len(), 0);
    assert!(empty.is_empty());
}

#[test]
fn test_nested_windows_collapse() {
    let a = numbered_matrix(12, 12);
    let outer = dilated_submatrix(&a, 1, 2, 5, 4, 2, 2).unwrap();
    let inner = dilated_submatrix(&outer, 1, 0, 2, 2, 2, 3).unwrap();
    let flat = dilated_submatrix(&a, 3, 2, 2, 2, 4, 6).unwrap();
    for i in 0..2 {
        for j in 0..2 {
            assert_eq!(inner.get(i, j), flat.get(i, j));
            assert_eq!(inner.get(i, j), a.get(3 + 4 * i, 2 + 6 * j));
        }
    }
    assert!(is_same(&inner, &flat));

    // the nested request is judged against the outer window, not the
    // operand: 5 rows are visible even though the operand has 12
    assert!(matches!(
        dilated_submatrix(&outer, 1, 0, 3, 1, 2, 1).unwrap_err(),
        DilatedError::InvalidView { axis: Axis::Row, bound: 5, .. }
    ));
}

#[test]
fn test_write_through_symmetric_window_mirrors() {
    let base = DynamicMatrix::from_fn(5, 5, |i, j| (i * j) as i64);
    let mut sym = SymmetricMatrix::new(base).unwrap();
    {
        let mut window = dilated_submatrix_mut(&mut sym, 0, 1, 2, 2, 2, 2).unwrap();
        window.set(1, 0, 77);
    }
    assert_eq!(sym.get(2, 1), 77);
    assert_eq!(sym.get(1, 2), 77);
    assert!(sym.is_intact());
}

#[test]
fn test_restricted_assignment_is_atomic() {
    let base = DynamicMatrix::from_fn(4, 4, |i, j| if j <= i { ((i + 1) * (j + 1)) as i64 } else { 0 });
    let mut lower = LowerMatrix::new(base).unwrap();
    let before = DynamicMatrix::from_fn(4, 4, |i, j| lower.get(i, j));

    // the (0, 1) element of this window lands at (1, 2), above the
    // diagonal; a nonzero value there must be refused
    let bad = DynamicMatrix::from_fn(2, 2, |_, _| 3i64);
    {
        let mut window = dilated_submatrix_mut(&mut lower, 1, 0, 2, 2, 2, 2).unwrap();
        let err = window.assign_from(&bad).unwrap_err();
        assert!(matches!(err, DilatedError::Restricted(_)));
    }
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(lower.get(i, j), before.get(i, j));
        }
    }

    // zeros in the implicit region are acceptable
    let good = DynamicMatrix::from_fn(2, 2, |i, j| if (1 + 2 * i) >= 2 * j { 8 } else { 0 });
    {
        let mut window = dilated_submatrix_mut(&mut lower, 1, 0, 2, 2, 2, 2).unwrap();
        window.assign_from(&good).unwrap();
    }
    assert_eq!(lower.get(1, 0), 8);
    assert_eq!(lower.get(3, 2), 8);
    assert_eq!(lower.get(1, 2), 0);
    assert!(lower.is_intact());
}

#[test]
fn test_derestrict_bypasses_policy() {
    let base = DynamicMatrix::from_fn(4, 4, |i, j| if j <= i { 1i64 } else { 0 });
    let mut lower = LowerMatrix::new(base).unwrap();
    {
        let window = dilated_submatrix_mut(&mut lower, 0, 0, 2, 2, 2, 2).unwrap();
        let mut raw = derestrict(window);
        raw.set(0, 1, 42);
    }
    assert_eq!(lower.get(0, 2), 42);
    assert!(!lower.is_intact());
}

#[test]
fn test_structure_propagates_to_aligned_windows() {
    let base = DynamicMatrix::from_fn(6, 6, |i, j| if j <= i { (i + j + 1) as i64 } else { 0 });
    let lower = LowerMatrix::new(base).unwrap();

    let aligned = dilated_submatrix(&lower, 1, 1, 2, 2, 2, 2).unwrap();
    assert!(aligned.structure().lower);

    let off_diagonal = dilated_submatrix(&lower, 1, 0, 2, 2, 2, 2).unwrap();
    assert!(!off_diagonal.structure().any());

    let uneven = dilated_submatrix(&lower, 1, 1, 2, 2, 2, 1).unwrap();
    assert!(!uneven.structure().any());
}

#[test]
fn test_predicates_scan_values() {
    // not an adaptor, but the selected elements happen to be symmetric
    let a = DynamicMatrix::from_fn(5, 5, |i, j| {
        if i % 2 == 0 && j % 2 == 0 {
            (i + j) as i64
        } else {
            (10 * i + j) as i64
        }
    });
    let window = dilated_submatrix(&a, 0, 0, 3, 3, 2, 2).unwrap();
    assert!(is_symmetric(&window));
    assert!(!is_symmetric(&a));
}

#[test]
fn test_invert_through_window() {
    let mut z = DynamicMatrix::<f64>::from_fn(4, 4, |i, j| {
        if i % 2 == 0 && j % 2 == 0 {
            if i == j { 2.0 } else { 0.0 }
        } else {
            7.0
        }
    });
    {
        let mut window = dilated_submatrix_mut(&mut z, 0, 0, 2, 2, 2, 2).unwrap();
        invert(&mut window).unwrap();
    }
    assert!((z.get(0, 0) - 0.5).abs() < 1e-12);
    assert!((z.get(2, 2) - 0.5).abs() < 1e-12);
    assert_eq!(z.get(0, 2), 0.0);
    assert_eq!(z.get(1, 1), 7.0);
}

#[test]
fn test_reset_touches_only_covered_elements() {
    let mut a = numbered_matrix(4, 4);
    {
        let mut window = dilated_submatrix_mut(&mut a, 0, 1, 2, 2, 2, 2).unwrap();
        window.reset();
    }
    assert_eq!(a.get(0, 1), 0);
    assert_eq!(a.get(0, 3), 0);
    assert_eq!(a.get(2, 1), 0);
    assert_eq!(a.get(2, 3), 0);
    assert_eq!(a.get(1, 1), 5);
    assert_eq!(a.get(2, 2), 10);
    assert_eq!(a.get(3, 3), 15);

    let mut v = DynamicVector::from_fn(6, |i| (i + 1) as i64);
    clear(&mut v);
    assert_eq!(v.len(), 0);
}

#[test]
fn test_is_same_identity() {
    let a = numbered_matrix(6, 6);
    let v1 = dilated_submatrix(&a, 0, 0, 3, 3, 2, 2).unwrap();
    let v2 = dilated_submatrix(&a, 0, 0, 3, 3, 2, 2).unwrap();
    let v3 = dilated_submatrix(&a, 0, 0, 3, 3, 1, 1).unwrap();
    assert!(is_same(&v1, &v2));
    assert!(!is_same(&v1, &v3));

    let full = dilated_submatrix(&a, 0, 0, 6, 6, 1, 1).unwrap();
    assert!(is_same(&full, &a));
    assert!(!is_same(&v1, &a));

    let b = numbered_matrix(6, 6);
    let w = dilated_submatrix(&b, 0, 0, 3, 3, 2, 2).unwrap();
    assert!(!is_same(&v1, &w));
}

#[test]
fn test_tensor_window_composes_with_slices() {
    let t = numbered_tensor(4, 4, 4);
    let block = dilated_subtensor(&t, 1, 0, 1, 2, 2, 2, 2, 2, 2).unwrap();
    assert_eq!(block.get(1, 1, 1), t.get(3, 2, 3));

    let plane = page(&block, 1).unwrap();
    assert_eq!(plane.get(0, 1), t.get(3, 0, 3));

    let mut expected = Vec::new();
    for r in 0..2 {
        for c in 0..2 {
            expected.push(t.get(3, 2 * r, 1 + 2 * c));
        }
    }
    for r in 0..2 {
        for c in 0..2 {
            assert_eq!(plane.get(r, c), expected[r * 2 + c]);
        }
    }
}

#[test]
fn test_column_of_dilated_window() {
    let a = numbered_matrix(6, 6);
    let window = dilated_submatrix(&a, 1, 0, 2, 3, 2, 2).unwrap();
    let col = column(window, 2).unwrap();
    assert_eq!(col.len(), 2);
    assert_eq!(col.get(0), a.get(1, 4));
    assert_eq!(col.get(1), a.get(3, 4));
}
