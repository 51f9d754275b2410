//! Lazily evaluated matrix expressions.
//!
//! [`MatExpr`] is the closed set of matrix-shaped expression nodes the view
//! factories in [`crate::restructure`] know how to rewrite. Nodes borrow
//! their leaf operands and evaluate element by element on demand;
//! [`MatExpr::to_dynamic`] materializes the result. Every node derives its
//! [`StructureFlags`] from its operands, so structural guarantees survive
//! composition without being re-verified per element.

use dilated_view::{
    view_structure, AxisRange, DynamicMatrix, Matrix, Orientation, Scalar, StructureFlags, Vector,
};

use crate::vecexpr::VecExpr;
use crate::{ExprError, Result};

/// Element-wise operation stored by unary map nodes.
pub type UnaryFn<'a, T> = Box<dyn Fn(T) -> T + 'a>;

/// Element-wise operation stored by binary map nodes and reductions.
pub type BinaryFn<'a, T> = Box<dyn Fn(T, T) -> T + 'a>;

/// A matrix-shaped expression node.
///
/// The set of shapes is closed on purpose: the push-down factories match on
/// it exhaustively, so adding a node here forces the rewrite rules to say
/// what a view of it means.
pub enum MatExpr<'a, T> {
    /// A concrete operand borrowed from the caller.
    Leaf(&'a dyn Matrix<Elem = T>),
    /// A dilated window over a leaf operand.
    View {
        base: &'a dyn Matrix<Elem = T>,
        rows: AxisRange,
        columns: AxisRange,
    },
    Add(Box<MatExpr<'a, T>>, Box<MatExpr<'a, T>>),
    Sub(Box<MatExpr<'a, T>>, Box<MatExpr<'a, T>>),
    /// Element-wise (Schur) product.
    Schur(Box<MatExpr<'a, T>>, Box<MatExpr<'a, T>>),
    /// Matrix product.
    Mult(Box<MatExpr<'a, T>>, Box<MatExpr<'a, T>>),
    /// Outer product of a column vector and a row vector.
    Outer(Box<VecExpr<'a, T>>, Box<VecExpr<'a, T>>),
    ScalarMul(Box<MatExpr<'a, T>>, T),
    ScalarDiv(Box<MatExpr<'a, T>>, T),
    Map(Box<MatExpr<'a, T>>, UnaryFn<'a, T>),
    Map2(Box<MatExpr<'a, T>>, Box<MatExpr<'a, T>>, BinaryFn<'a, T>),
    /// Evaluation marker. Evaluation here stays element-wise; the marker
    /// survives rewrites so a later materialization pass can honor it.
    Eval(Box<MatExpr<'a, T>>),
    /// Serial-execution marker, transparent to element access.
    Serial(Box<MatExpr<'a, T>>),
    /// Structural claim the caller vouches for; unions into `structure()`.
    Decl(Box<MatExpr<'a, T>>, StructureFlags),
    Trans(Box<MatExpr<'a, T>>),
    /// A vector replicated along a new axis, `count` copies.
    Expand(Box<VecExpr<'a, T>>, usize),
}

// Leaves and map nodes hold trait objects and closures, so `Debug` cannot
// be derived; the impl reports the variant name only.
impl<'a, T> std::fmt::Debug for MatExpr<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MatExpr::Leaf(..) => "MatExpr::Leaf",
            MatExpr::View { .. } => "MatExpr::View",
            MatExpr::Add(..) => "MatExpr::Add",
            MatExpr::Sub(..) => "MatExpr::Sub",
            MatExpr::Schur(..) => "MatExpr::Schur",
            MatExpr::Mult(..) => "MatExpr::Mult",
            MatExpr::Outer(..) => "MatExpr::Outer",
            MatExpr::ScalarMul(..) => "MatExpr::ScalarMul",
            MatExpr::ScalarDiv(..) => "MatExpr::ScalarDiv",
            MatExpr::Map(..) => "MatExpr::Map",
            MatExpr::Map2(..) => "MatExpr::Map2",
            MatExpr::Eval(..) => "MatExpr::Eval",
            MatExpr::Serial(..) => "MatExpr::Serial",
            MatExpr::Decl(..) => "MatExpr::Decl",
            MatExpr::Trans(..) => "MatExpr::Trans",
            MatExpr::Expand(..) => "MatExpr::Expand",
        };
        f.write_str(name)
    }
}

impl<'a, T: Scalar> Matrix for MatExpr<'a, T> {
    type Elem = T;

    fn rows(&self) -> usize {
        match self {
            MatExpr::Leaf(m) => m.rows(),
            MatExpr::View { rows, .. } => rows.extent,
            MatExpr::Add(l, _)
            | MatExpr::Sub(l, _)
            | MatExpr::Schur(l, _)
            | MatExpr::Mult(l, _)
            | MatExpr::Map2(l, _, _) => l.rows(),
            MatExpr::Outer(u, _) => u.len(),
            MatExpr::ScalarMul(m, _)
            | MatExpr::ScalarDiv(m, _)
            | MatExpr::Map(m, _)
            | MatExpr::Eval(m)
            | MatExpr::Serial(m)
            | MatExpr::Decl(m, _) => m.rows(),
            MatExpr::Trans(m) => m.columns(),
            MatExpr::Expand(v, count) => match v.orientation() {
                Orientation::Column => v.len(),
                Orientation::Row => *count,
            },
        }
    }

    fn columns(&self) -> usize {
        match self {
            MatExpr::Leaf(m) => m.columns(),
            MatExpr::View { columns, .. } => columns.extent,
            MatExpr::Add(l, _)
            | MatExpr::Sub(l, _)
            | MatExpr::Schur(l, _)
            | MatExpr::Map2(l, _, _) => l.columns(),
            MatExpr::Mult(_, r) => r.columns(),
            MatExpr::Outer(_, v) => v.len(),
            MatExpr::ScalarMul(m, _)
            | MatExpr::ScalarDiv(m, _)
            | MatExpr::Map(m, _)
            | MatExpr::Eval(m)
            | MatExpr::Serial(m)
            | MatExpr::Decl(m, _) => m.columns(),
            MatExpr::Trans(m) => m.rows(),
            MatExpr::Expand(v, count) => match v.orientation() {
                Orientation::Column => *count,
                Orientation::Row => v.len(),
            },
        }
    }

    fn get(&self, row: usize, column: usize) -> T {
        match self {
            MatExpr::Leaf(m) => m.get(row, column),
            MatExpr::View { base, rows, columns } => {
                base.get(rows.translate(row), columns.translate(column))
            }
            MatExpr::Add(l, r) => l.get(row, column) + r.get(row, column),
            MatExpr::Sub(l, r) => l.get(row, column) - r.get(row, column),
            MatExpr::Schur(l, r) => l.get(row, column) * r.get(row, column),
            MatExpr::Mult(l, r) => {
                let mut acc = T::zero();
                for k in 0..l.columns() {
                    acc = acc + l.get(row, k) * r.get(k, column);
                }
                acc
            }
            MatExpr::Outer(u, v) => u.get(row) * v.get(column),
            MatExpr::ScalarMul(m, s) => m.get(row, column) * *s,
            MatExpr::ScalarDiv(m, s) => m.get(row, column) / *s,
            MatExpr::Map(m, f) => f(m.get(row, column)),
            MatExpr::Map2(l, r, f) => f(l.get(row, column), r.get(row, column)),
            MatExpr::Eval(m) | MatExpr::Serial(m) | MatExpr::Decl(m, _) => m.get(row, column),
            MatExpr::Trans(m) => m.get(column, row),
            MatExpr::Expand(v, _) => match v.orientation() {
                Orientation::Column => v.get(row),
                Orientation::Row => v.get(column),
            },
        }
    }

    fn structure(&self) -> StructureFlags {
        match self {
            MatExpr::Leaf(m) => m.structure(),
            MatExpr::View { base, rows, columns } => {
                view_structure(base.structure(), *rows, *columns)
            }
            MatExpr::Add(l, r) => l.structure().sum(r.structure()),
            MatExpr::Sub(l, r) => l.structure().difference(r.structure()),
            MatExpr::Schur(l, r) => l.structure().schur(r.structure()),
            MatExpr::Mult(l, r) => l.structure().product(r.structure()),
            MatExpr::Outer(..) | MatExpr::Map(..) | MatExpr::Map2(..) | MatExpr::Expand(..) => {
                StructureFlags::NONE
            }
            MatExpr::ScalarMul(m, _) | MatExpr::ScalarDiv(m, _) => m.structure().scaled(),
            MatExpr::Eval(m) | MatExpr::Serial(m) => m.structure(),
            MatExpr::Decl(m, claim) => m.structure().union(*claim),
            MatExpr::Trans(m) => m.structure().transposed(),
        }
    }
}

impl<'a, T: Scalar> MatExpr<'a, T> {
    /// Wraps a borrowed operand as an expression leaf.
    pub fn leaf(operand: &'a dyn Matrix<Elem = T>) -> Self {
        MatExpr::Leaf(operand)
    }

    /// Element-wise sum. The operands must agree in shape.
    pub fn add(left: Self, right: Self) -> Result<Self> {
        require_same_shape("add", &left, &right)?;
        Ok(MatExpr::Add(Box::new(left), Box::new(right)))
    }

    /// Element-wise difference. The operands must agree in shape.
    pub fn sub(left: Self, right: Self) -> Result<Self> {
        require_same_shape("subtract", &left, &right)?;
        Ok(MatExpr::Sub(Box::new(left), Box::new(right)))
    }

    /// Element-wise (Schur) product. The operands must agree in shape.
    pub fn schur(left: Self, right: Self) -> Result<Self> {
        require_same_shape("schur-multiply", &left, &right)?;
        Ok(MatExpr::Schur(Box::new(left), Box::new(right)))
    }

    /// Matrix product. The contracted extents must agree.
    pub fn mult(left: Self, right: Self) -> Result<Self> {
        if left.columns() != right.rows() {
            return Err(ExprError::Incompatible(format!(
                "cannot multiply a {}x{} by a {}x{} operand",
                left.rows(),
                left.columns(),
                right.rows(),
                right.columns()
            )));
        }
        Ok(MatExpr::Mult(Box::new(left), Box::new(right)))
    }

    /// Outer product of a column vector and a row vector.
    pub fn outer(column: VecExpr<'a, T>, row: VecExpr<'a, T>) -> Result<Self> {
        if column.orientation() != Orientation::Column || row.orientation() != Orientation::Row {
            return Err(ExprError::Incompatible(
                "outer product takes a column vector and a row vector".into(),
            ));
        }
        Ok(MatExpr::Outer(Box::new(column), Box::new(row)))
    }

    pub fn scalar_mul(operand: Self, factor: T) -> Self {
        MatExpr::ScalarMul(Box::new(operand), factor)
    }

    pub fn scalar_div(operand: Self, divisor: T) -> Self {
        MatExpr::ScalarDiv(Box::new(operand), divisor)
    }

    /// Applies `op` to every element.
    pub fn map(operand: Self, op: impl Fn(T) -> T + 'a) -> Self {
        MatExpr::Map(Box::new(operand), Box::new(op))
    }

    /// Applies `op` to element pairs. The operands must agree in shape.
    pub fn map2(left: Self, right: Self, op: impl Fn(T, T) -> T + 'a) -> Result<Self> {
        require_same_shape("zip", &left, &right)?;
        Ok(MatExpr::Map2(Box::new(left), Box::new(right), Box::new(op)))
    }

    pub fn eval(operand: Self) -> Self {
        MatExpr::Eval(Box::new(operand))
    }

    pub fn serial(operand: Self) -> Self {
        MatExpr::Serial(Box::new(operand))
    }

    pub fn trans(operand: Self) -> Self {
        MatExpr::Trans(Box::new(operand))
    }

    /// Replicates `vector` along a new axis, `count` copies. A column
    /// vector becomes the columns of the result, a row vector its rows.
    pub fn expand(vector: VecExpr<'a, T>, count: usize) -> Self {
        MatExpr::Expand(Box::new(vector), count)
    }

    /// Materializes the expression into a dense matrix.
    pub fn to_dynamic(&self) -> DynamicMatrix<T> {
        DynamicMatrix::from_fn(self.rows(), self.columns(), |i, j| self.get(i, j))
    }
}

fn require_same_shape<'a, T: Scalar>(
    verb: &str,
    left: &MatExpr<'a, T>,
    right: &MatExpr<'a, T>,
) -> Result<()> {
    if left.rows() != right.rows() || left.columns() != right.columns() {
        return Err(ExprError::Incompatible(format!(
            "cannot {verb} a {}x{} and a {}x{} operand",
            left.rows(),
            left.columns(),
            right.rows(),
            right.columns()
        )));
    }
    Ok(())
}

/// Declares the operand symmetric. The claim is not checked; it feeds the
/// structure algebra and the product-narrowing rules.
pub fn declsym<'a, T: Scalar>(operand: MatExpr<'a, T>) -> MatExpr<'a, T> {
    MatExpr::Decl(Box::new(operand), StructureFlags::SYMMETRIC)
}

/// Declares the operand Hermitian. The claim is not checked.
pub fn declherm<'a, T: Scalar>(operand: MatExpr<'a, T>) -> MatExpr<'a, T> {
    MatExpr::Decl(Box::new(operand), StructureFlags::HERMITIAN)
}

/// Declares the operand lower triangular. The claim is not checked.
pub fn decllow<'a, T: Scalar>(operand: MatExpr<'a, T>) -> MatExpr<'a, T> {
    MatExpr::Decl(Box::new(operand), StructureFlags::LOWER)
}

/// Declares the operand upper triangular. The claim is not checked.
pub fn declupp<'a, T: Scalar>(operand: MatExpr<'a, T>) -> MatExpr<'a, T> {
    MatExpr::Decl(Box::new(operand), StructureFlags::UPPER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vecexpr::VecExpr;
    use dilated_view::DynamicVector;

    #[test]
    fn test_lazy_arithmetic() {
        let a = DynamicMatrix::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let b = DynamicMatrix::from_rows([[10.0, 20.0], [30.0, 40.0]]);
        let sum = MatExpr::add(MatExpr::leaf(&a), MatExpr::leaf(&b)).unwrap();
        assert_eq!(sum.get(0, 1), 22.0);
        assert_eq!(sum.rows(), 2);

        let prod = MatExpr::mult(MatExpr::leaf(&a), MatExpr::leaf(&b)).unwrap();
        // (1,2)·(10,30) and (3,4)·(20,40)
        assert_eq!(prod.get(0, 0), 70.0);
        assert_eq!(prod.get(1, 1), 220.0);
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let a = DynamicMatrix::<f64>::zeros(2, 2);
        let b = DynamicMatrix::<f64>::zeros(2, 3);
        assert!(MatExpr::add(MatExpr::leaf(&a), MatExpr::leaf(&b)).is_err());
        assert!(MatExpr::mult(MatExpr::leaf(&b), MatExpr::leaf(&b)).is_err());
    }

    #[test]
    fn test_trans_and_map() {
        let a = DynamicMatrix::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let e = MatExpr::map(MatExpr::trans(MatExpr::leaf(&a)), |x| x * 10.0);
        assert_eq!(e.get(0, 1), 30.0);
        let m = e.to_dynamic();
        assert_eq!(m.get(1, 0), 20.0);
    }

    #[test]
    fn test_structure_through_nodes() {
        let a = DynamicMatrix::from_rows([[1.0, 0.0], [5.0, 2.0]]);
        let lo = decllow(MatExpr::leaf(&a));
        assert!(lo.structure().lower);
        assert!(MatExpr::trans(decllow(MatExpr::leaf(&a))).structure().upper);

        let scaled = MatExpr::scalar_mul(decllow(MatExpr::leaf(&a)), 2.0);
        assert!(scaled.structure().lower);

        let mapped = MatExpr::map(decllow(MatExpr::leaf(&a)), |x| x + 1.0);
        assert!(!mapped.structure().any());
    }

    #[test]
    fn test_outer_and_expand() {
        let u = DynamicVector::from_vec(vec![1.0, 2.0]);
        let v = DynamicVector::from_vec(vec![10.0, 20.0, 30.0]).transposed();
        let o = MatExpr::outer(VecExpr::leaf(&u), VecExpr::leaf(&v)).unwrap();
        assert_eq!((o.rows(), o.columns()), (2, 3));
        assert_eq!(o.get(1, 2), 60.0);
        // row ⊗ column is the wrong way around
        assert!(MatExpr::outer(VecExpr::leaf(&v), VecExpr::leaf(&u)).is_err());

        let e = MatExpr::expand(VecExpr::leaf(&u), 3);
        assert_eq!((e.rows(), e.columns()), (2, 3));
        assert_eq!(e.get(1, 0), 2.0);
        assert_eq!(e.get(1, 2), 2.0);
    }
}
