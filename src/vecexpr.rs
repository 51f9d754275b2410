//! Lazily evaluated vector expressions.
//!
//! [`VecExpr`] mirrors [`MatExpr`](crate::matexpr::MatExpr) for
//! vector-shaped results, including the matrix/vector contractions and the
//! row- and column-wise matrix reductions whose views narrow onto the
//! surviving axis.

use dilated_view::{AxisRange, DynamicVector, Matrix, Orientation, Scalar, Vector};

use crate::matexpr::{BinaryFn, MatExpr, UnaryFn};
use crate::{ExprError, Result};

/// A vector-shaped expression node.
pub enum VecExpr<'a, T> {
    /// A concrete operand borrowed from the caller.
    Leaf(&'a dyn Vector<Elem = T>),
    /// A dilated window over a leaf operand.
    View {
        base: &'a dyn Vector<Elem = T>,
        range: AxisRange,
    },
    Add(Box<VecExpr<'a, T>>, Box<VecExpr<'a, T>>),
    Sub(Box<VecExpr<'a, T>>, Box<VecExpr<'a, T>>),
    /// Component-wise product of two vectors of the same orientation.
    Mult(Box<VecExpr<'a, T>>, Box<VecExpr<'a, T>>),
    ScalarMul(Box<VecExpr<'a, T>>, T),
    ScalarDiv(Box<VecExpr<'a, T>>, T),
    Map(Box<VecExpr<'a, T>>, UnaryFn<'a, T>),
    Map2(Box<VecExpr<'a, T>>, Box<VecExpr<'a, T>>, BinaryFn<'a, T>),
    /// Evaluation marker, transparent to element access.
    Eval(Box<VecExpr<'a, T>>),
    /// Serial-execution marker, transparent to element access.
    Serial(Box<VecExpr<'a, T>>),
    /// Orientation flip. Indexing is unchanged.
    Trans(Box<VecExpr<'a, T>>),
    /// Matrix times column vector; a column vector.
    MatVec(Box<MatExpr<'a, T>>, Box<VecExpr<'a, T>>),
    /// Row vector times matrix; a row vector.
    VecMat(Box<VecExpr<'a, T>>, Box<MatExpr<'a, T>>),
    /// Column-wise reduction: element `j` folds column `j`. A row vector.
    ReduceColumns(Box<MatExpr<'a, T>>, BinaryFn<'a, T>),
    /// Row-wise reduction: element `i` folds row `i`. A column vector.
    ReduceRows(Box<MatExpr<'a, T>>, BinaryFn<'a, T>),
}

impl<'a, T: Scalar> Vector for VecExpr<'a, T> {
    type Elem = T;

    fn len(&self) -> usize {
        match self {
            VecExpr::Leaf(v) => v.len(),
            VecExpr::View { range, .. } => range.extent,
            VecExpr::Add(l, _) | VecExpr::Sub(l, _) | VecExpr::Mult(l, _) | VecExpr::Map2(l, _, _) => {
                l.len()
            }
            VecExpr::ScalarMul(v, _)
            | VecExpr::ScalarDiv(v, _)
            | VecExpr::Map(v, _)
            | VecExpr::Eval(v)
            | VecExpr::Serial(v)
            | VecExpr::Trans(v) => v.len(),
            VecExpr::MatVec(m, _) => m.rows(),
            VecExpr::VecMat(_, m) => m.columns(),
            VecExpr::ReduceColumns(m, _) => m.columns(),
            VecExpr::ReduceRows(m, _) => m.rows(),
        }
    }

    fn get(&self, index: usize) -> T {
        match self {
            VecExpr::Leaf(v) => v.get(index),
            VecExpr::View { base, range } => base.get(range.translate(index)),
            VecExpr::Add(l, r) => l.get(index) + r.get(index),
            VecExpr::Sub(l, r) => l.get(index) - r.get(index),
            VecExpr::Mult(l, r) => l.get(index) * r.get(index),
            VecExpr::ScalarMul(v, s) => v.get(index) * *s,
            VecExpr::ScalarDiv(v, s) => v.get(index) / *s,
            VecExpr::Map(v, f) => f(v.get(index)),
            VecExpr::Map2(l, r, f) => f(l.get(index), r.get(index)),
            VecExpr::Eval(v) | VecExpr::Serial(v) | VecExpr::Trans(v) => v.get(index),
            VecExpr::MatVec(m, v) => {
                let mut acc = T::zero();
                for k in 0..m.columns() {
                    acc = acc + m.get(index, k) * v.get(k);
                }
                acc
            }
            VecExpr::VecMat(v, m) => {
                let mut acc = T::zero();
                for k in 0..m.rows() {
                    acc = acc + v.get(k) * m.get(k, index);
                }
                acc
            }
            VecExpr::ReduceColumns(m, op) => fold_axis(m.rows(), op, |i| m.get(i, index)),
            VecExpr::ReduceRows(m, op) => fold_axis(m.columns(), op, |j| m.get(index, j)),
        }
    }

    fn orientation(&self) -> Orientation {
        match self {
            VecExpr::Leaf(v) => v.orientation(),
            VecExpr::View { base, .. } => base.orientation(),
            VecExpr::Add(l, _) | VecExpr::Sub(l, _) | VecExpr::Mult(l, _) | VecExpr::Map2(l, _, _) => {
                l.orientation()
            }
            VecExpr::ScalarMul(v, _)
            | VecExpr::ScalarDiv(v, _)
            | VecExpr::Map(v, _)
            | VecExpr::Eval(v)
            | VecExpr::Serial(v) => v.orientation(),
            VecExpr::Trans(v) => v.orientation().flipped(),
            VecExpr::MatVec(..) | VecExpr::ReduceRows(..) => Orientation::Column,
            VecExpr::VecMat(..) | VecExpr::ReduceColumns(..) => Orientation::Row,
        }
    }
}

/// Folds `extent` elements with `op`, first element as the seed. An empty
/// axis folds to zero.
fn fold_axis<T: Scalar>(extent: usize, op: &BinaryFn<'_, T>, at: impl Fn(usize) -> T) -> T {
    if extent == 0 {
        return T::zero();
    }
    let mut acc = at(0);
    for i in 1..extent {
        acc = op(acc, at(i));
    }
    acc
}

impl<'a, T: Scalar> VecExpr<'a, T> {
    /// Wraps a borrowed operand as an expression leaf.
    pub fn leaf(operand: &'a dyn Vector<Elem = T>) -> Self {
        VecExpr::Leaf(operand)
    }

    /// Component-wise sum. Lengths and orientations must agree.
    pub fn add(left: Self, right: Self) -> Result<Self> {
        require_conforming("add", &left, &right)?;
        Ok(VecExpr::Add(Box::new(left), Box::new(right)))
    }

    /// Component-wise difference. Lengths and orientations must agree.
    pub fn sub(left: Self, right: Self) -> Result<Self> {
        require_conforming("subtract", &left, &right)?;
        Ok(VecExpr::Sub(Box::new(left), Box::new(right)))
    }

    /// Component-wise product. Lengths and orientations must agree.
    pub fn mult(left: Self, right: Self) -> Result<Self> {
        require_conforming("multiply", &left, &right)?;
        Ok(VecExpr::Mult(Box::new(left), Box::new(right)))
    }

    pub fn scalar_mul(operand: Self, factor: T) -> Self {
        VecExpr::ScalarMul(Box::new(operand), factor)
    }

    pub fn scalar_div(operand: Self, divisor: T) -> Self {
        VecExpr::ScalarDiv(Box::new(operand), divisor)
    }

    /// Applies `op` to every element.
    pub fn map(operand: Self, op: impl Fn(T) -> T + 'a) -> Self {
        VecExpr::Map(Box::new(operand), Box::new(op))
    }

    /// Applies `op` to element pairs. Lengths and orientations must agree.
    pub fn map2(left: Self, right: Self, op: impl Fn(T, T) -> T + 'a) -> Result<Self> {
        require_conforming("zip", &left, &right)?;
        Ok(VecExpr::Map2(Box::new(left), Box::new(right), Box::new(op)))
    }

    pub fn eval(operand: Self) -> Self {
        VecExpr::Eval(Box::new(operand))
    }

    pub fn serial(operand: Self) -> Self {
        VecExpr::Serial(Box::new(operand))
    }

    pub fn trans(operand: Self) -> Self {
        VecExpr::Trans(Box::new(operand))
    }

    /// Matrix times column vector.
    pub fn mat_vec(matrix: MatExpr<'a, T>, vector: Self) -> Result<Self> {
        if vector.orientation() != Orientation::Column {
            return Err(ExprError::Incompatible(
                "matrix-vector product takes a column vector".into(),
            ));
        }
        if matrix.columns() != vector.len() {
            return Err(ExprError::Incompatible(format!(
                "cannot contract a {}x{} matrix with a length {} vector",
                matrix.rows(),
                matrix.columns(),
                vector.len()
            )));
        }
        Ok(VecExpr::MatVec(Box::new(matrix), Box::new(vector)))
    }

    /// Row vector times matrix.
    pub fn vec_mat(vector: Self, matrix: MatExpr<'a, T>) -> Result<Self> {
        if vector.orientation() != Orientation::Row {
            return Err(ExprError::Incompatible(
                "vector-matrix product takes a row vector".into(),
            ));
        }
        if vector.len() != matrix.rows() {
            return Err(ExprError::Incompatible(format!(
                "cannot contract a length {} vector with a {}x{} matrix",
                vector.len(),
                matrix.rows(),
                matrix.columns()
            )));
        }
        Ok(VecExpr::VecMat(Box::new(vector), Box::new(matrix)))
    }

    /// Column-wise reduction of a matrix with `op`; a row vector.
    pub fn reduce_columns(matrix: MatExpr<'a, T>, op: impl Fn(T, T) -> T + 'a) -> Self {
        VecExpr::ReduceColumns(Box::new(matrix), Box::new(op))
    }

    /// Row-wise reduction of a matrix with `op`; a column vector.
    pub fn reduce_rows(matrix: MatExpr<'a, T>, op: impl Fn(T, T) -> T + 'a) -> Self {
        VecExpr::ReduceRows(Box::new(matrix), Box::new(op))
    }

    /// Materializes the expression into a dense vector.
    pub fn to_dynamic(&self) -> DynamicVector<T> {
        let v = DynamicVector::from_fn(self.len(), |i| self.get(i));
        v.with_orientation(self.orientation())
    }
}

fn require_conforming<'a, T: Scalar>(
    verb: &str,
    left: &VecExpr<'a, T>,
    right: &VecExpr<'a, T>,
) -> Result<()> {
    if left.len() != right.len() {
        return Err(ExprError::Incompatible(format!(
            "cannot {verb} a length {} and a length {} vector",
            left.len(),
            right.len()
        )));
    }
    if left.orientation() != right.orientation() {
        return Err(ExprError::Incompatible(format!(
            "cannot {verb} a {} and a {} vector",
            left.orientation(),
            right.orientation()
        )));
    }
    Ok(())
}
