use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dilated_rs::{
    decllow, dilated_submatrix, dilated_submatrix_expr, dilated_submatrix_unchecked, DynamicMatrix,
    MatExpr, Matrix,
};

// Traversal through a dilated window against hand-written index
// arithmetic on the underlying container.
fn bench_dilated_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("dilated_traversal");
    for size in [64usize, 256, 1024] {
        let half = size / 2;
        group.throughput(Throughput::Elements((half * half) as u64));

        let a = DynamicMatrix::from_fn(size, size, |i, j| (i * size + j) as f64);

        group.bench_with_input(BenchmarkId::new("direct", size), &size, |b, _| {
            b.iter(|| {
                let mut acc = 0.0f64;
                for i in 0..half {
                    for j in 0..half {
                        acc += a.get(2 * i, 1 + 2 * j);
                    }
                }
                acc
            })
        });

        group.bench_with_input(BenchmarkId::new("view", size), &size, |b, _| {
            let window = dilated_submatrix(&a, 0, 1, half, half, 2, 2).unwrap();
            b.iter(|| {
                let mut acc = 0.0f64;
                for i in 0..half {
                    for j in 0..half {
                        acc += window.get(i, j);
                    }
                }
                acc
            })
        });
    }
    group.finish();
}

// Cost of the bounds check in the checked factory.
fn bench_view_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_construction");
    let a = DynamicMatrix::from_fn(1024, 1024, |i, j| (i + j) as f64);

    group.bench_function("checked", |b| {
        b.iter(|| dilated_submatrix(&a, 1, 1, 100, 100, 3, 3).unwrap().rows())
    });
    group.bench_function("unchecked", |b| {
        b.iter(|| dilated_submatrix_unchecked(&a, 1, 1, 100, 100, 3, 3).rows())
    });
    group.finish();
}

// Element access through three nested windows against the equivalent
// composed window.
fn bench_nested_collapse(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_collapse");
    let a = DynamicMatrix::from_fn(4096, 4096, |i, j| (i ^ j) as f64);

    let outer = dilated_submatrix(&a, 0, 0, 2048, 2048, 2, 2).unwrap();
    let middle = dilated_submatrix(&outer, 1, 1, 512, 512, 2, 2).unwrap();
    let inner = dilated_submatrix(&middle, 0, 0, 256, 256, 2, 2).unwrap();
    let flat = dilated_submatrix(&a, 2, 2, 256, 256, 8, 8).unwrap();
    group.throughput(Throughput::Elements((256 * 256) as u64));

    group.bench_function("nested", |b| {
        b.iter(|| {
            let mut acc = 0.0f64;
            for i in 0..256 {
                for j in 0..256 {
                    acc += inner.get(i, j);
                }
            }
            acc
        })
    });
    group.bench_function("flat", |b| {
        b.iter(|| {
            let mut acc = 0.0f64;
            for i in 0..256 {
                for j in 0..256 {
                    acc += flat.get(i, j);
                }
            }
            acc
        })
    });
    group.finish();
}

// Windowed evaluation of a sum expression: materializing the whole sum
// first against pushing the window down to the operands.
fn bench_pushdown_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("pushdown_sum");
    for size in [256usize, 1024] {
        let window = size / 8;
        group.throughput(Throughput::Elements((window * window) as u64));

        let a = DynamicMatrix::from_fn(size, size, |i, j| (i * size + j) as f64);
        let b_m = DynamicMatrix::from_fn(size, size, |i, j| (i + 2 * j) as f64);

        group.bench_with_input(BenchmarkId::new("materialize", size), &size, |b, _| {
            b.iter(|| {
                let full = (MatExpr::leaf(&a) + MatExpr::leaf(&b_m)).to_dynamic();
                let view = dilated_submatrix(&full, 1, 1, window, window, 4, 4).unwrap();
                let mut acc = 0.0f64;
                for i in 0..window {
                    for j in 0..window {
                        acc += view.get(i, j);
                    }
                }
                acc
            })
        });

        group.bench_with_input(BenchmarkId::new("pushdown", size), &size, |b, _| {
            b.iter(|| {
                let e = MatExpr::leaf(&a) + MatExpr::leaf(&b_m);
                let view = dilated_submatrix_expr(e, 1, 1, window, window, 4, 4).unwrap();
                let mut acc = 0.0f64;
                for i in 0..window {
                    for j in 0..window {
                        acc += view.get(i, j);
                    }
                }
                acc
            })
        });
    }
    group.finish();
}

// Triangular product with a small window: the declared structure lets the
// contracted range shrink to the rows the window can reach.
fn bench_product_narrowing(c: &mut Criterion) {
    let mut group = c.benchmark_group("product_narrowing");
    for size in [128usize, 512] {
        let lo = DynamicMatrix::from_fn(size, size, |i, j| {
            if j <= i {
                (i + j + 1) as f64
            } else {
                0.0
            }
        });
        let rhs = DynamicMatrix::from_fn(size, size, |i, j| (i * 2 + j) as f64);

        group.bench_with_input(BenchmarkId::new("full", size), &size, |b, _| {
            b.iter(|| {
                let e = MatExpr::leaf(&lo) * MatExpr::leaf(&rhs);
                let view = dilated_submatrix_expr(e, 0, 0, 4, 4, 2, 2).unwrap();
                let mut acc = 0.0f64;
                for i in 0..4 {
                    for j in 0..4 {
                        acc += view.get(i, j);
                    }
                }
                acc
            })
        });

        group.bench_with_input(BenchmarkId::new("narrowed", size), &size, |b, _| {
            b.iter(|| {
                let e = MatExpr::mult(decllow(MatExpr::leaf(&lo)), MatExpr::leaf(&rhs)).unwrap();
                let view = dilated_submatrix_expr(e, 0, 0, 4, 4, 2, 2).unwrap();
                let mut acc = 0.0f64;
                for i in 0..4 {
                    for j in 0..4 {
                        acc += view.get(i, j);
                    }
                }
                acc
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_dilated_traversal,
    bench_view_construction,
    bench_nested_collapse,
    bench_pushdown_sum,
    bench_product_narrowing
);
criterion_main!(benches);
