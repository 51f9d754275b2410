//! Lazily evaluated rank-3 tensor expressions.
//!
//! The tensor node set is smaller than the matrix one: tensors compose
//! element-wise and by scalar only, so every view rewrite is a plain
//! recursion with no contraction narrowing.

use dilated_view::{AxisRange, DynamicTensor, Scalar, Tensor};

use crate::matexpr::{BinaryFn, UnaryFn};
use crate::{ExprError, Result};

/// A tensor-shaped expression node.
pub enum TensExpr<'a, T> {
    /// A concrete operand borrowed from the caller.
    Leaf(&'a dyn Tensor<Elem = T>),
    /// A dilated window over a leaf operand.
    View {
        base: &'a dyn Tensor<Elem = T>,
        pages: AxisRange,
        rows: AxisRange,
        columns: AxisRange,
    },
    Add(Box<TensExpr<'a, T>>, Box<TensExpr<'a, T>>),
    Sub(Box<TensExpr<'a, T>>, Box<TensExpr<'a, T>>),
    /// Element-wise product.
    Schur(Box<TensExpr<'a, T>>, Box<TensExpr<'a, T>>),
    ScalarMul(Box<TensExpr<'a, T>>, T),
    ScalarDiv(Box<TensExpr<'a, T>>, T),
    Map(Box<TensExpr<'a, T>>, UnaryFn<'a, T>),
    Map2(Box<TensExpr<'a, T>>, Box<TensExpr<'a, T>>, BinaryFn<'a, T>),
    /// Evaluation marker, transparent to element access.
    Eval(Box<TensExpr<'a, T>>),
    /// Serial-execution marker, transparent to element access.
    Serial(Box<TensExpr<'a, T>>),
}

impl<'a, T: Scalar> Tensor for TensExpr<'a, T> {
    type Elem = T;

    fn pages(&self) -> usize {
        match self {
            TensExpr::Leaf(t) => t.pages(),
            TensExpr::View { pages, .. } => pages.extent,
            TensExpr::Add(l, _)
            | TensExpr::Sub(l, _)
            | TensExpr::Schur(l, _)
            | TensExpr::Map2(l, _, _) => l.pages(),
            TensExpr::ScalarMul(t, _)
            | TensExpr::ScalarDiv(t, _)
            | TensExpr::Map(t, _)
            | TensExpr::Eval(t)
            | TensExpr::Serial(t) => t.pages(),
        }
    }

    fn rows(&self) -> usize {
        match self {
            TensExpr::Leaf(t) => t.rows(),
            TensExpr::View { rows, .. } => rows.extent,
            TensExpr::Add(l, _)
            | TensExpr::Sub(l, _)
            | TensExpr::Schur(l, _)
            | TensExpr::Map2(l, _, _) => l.rows(),
            TensExpr::ScalarMul(t, _)
            | TensExpr::ScalarDiv(t, _)
            | TensExpr::Map(t, _)
            | TensExpr::Eval(t)
            | TensExpr::Serial(t) => t.rows(),
        }
    }

    fn columns(&self) -> usize {
        match self {
            TensExpr::Leaf(t) => t.columns(),
            TensExpr::View { columns, .. } => columns.extent,
            TensExpr::Add(l, _)
            | TensExpr::Sub(l, _)
            | TensExpr::Schur(l, _)
            | TensExpr::Map2(l, _, _) => l.columns(),
            TensExpr::ScalarMul(t, _)
            | TensExpr::ScalarDiv(t, _)
            | TensExpr::Map(t, _)
            | TensExpr::Eval(t)
            | TensExpr::Serial(t) => t.columns(),
        }
    }

    fn get(&self, page: usize, row: usize, column: usize) -> T {
        match self {
            TensExpr::Leaf(t) => t.get(page, row, column),
            TensExpr::View {
                base,
                pages,
                rows,
                columns,
            } => base.get(
                pages.translate(page),
                rows.translate(row),
                columns.translate(column),
            ),
            TensExpr::Add(l, r) => l.get(page, row, column) + r.get(page, row, column),
            TensExpr::Sub(l, r) => l.get(page, row, column) - r.get(page, row, column),
            TensExpr::Schur(l, r) => l.get(page, row, column) * r.get(page, row, column),
            TensExpr::ScalarMul(t, s) => t.get(page, row, column) * *s,
            TensExpr::ScalarDiv(t, s) => t.get(page, row, column) / *s,
            TensExpr::Map(t, f) => f(t.get(page, row, column)),
            TensExpr::Map2(l, r, f) => f(l.get(page, row, column), r.get(page, row, column)),
            TensExpr::Eval(t) | TensExpr::Serial(t) => t.get(page, row, column),
        }
    }
}

impl<'a, T: Scalar> TensExpr<'a, T> {
    /// Wraps a borrowed operand as an expression leaf.
    pub fn leaf(operand: &'a dyn Tensor<Elem = T>) -> Self {
        TensExpr::Leaf(operand)
    }

    /// Element-wise sum. The operands must agree in shape.
    pub fn add(left: Self, right: Self) -> Result<Self> {
        require_same_shape("add", &left, &right)?;
        Ok(TensExpr::Add(Box::new(left), Box::new(right)))
    }

    /// Element-wise difference. The operands must agree in shape.
    pub fn sub(left: Self, right: Self) -> Result<Self> {
        require_same_shape("subtract", &left, &right)?;
        Ok(TensExpr::Sub(Box::new(left), Box::new(right)))
    }

    /// Element-wise product. The operands must agree in shape.
    pub fn schur(left: Self, right: Self) -> Result<Self> {
        require_same_shape("schur-multiply", &left, &right)?;
        Ok(TensExpr::Schur(Box::new(left), Box::new(right)))
    }

    pub fn scalar_mul(operand: Self, factor: T) -> Self {
        TensExpr::ScalarMul(Box::new(operand), factor)
    }

    pub fn scalar_div(operand: Self, divisor: T) -> Self {
        TensExpr::ScalarDiv(Box::new(operand), divisor)
    }

    /// Applies `op` to every element.
    pub fn map(operand: Self, op: impl Fn(T) -> T + 'a) -> Self {
        TensExpr::Map(Box::new(operand), Box::new(op))
    }

    /// Applies `op` to element pairs. The operands must agree in shape.
    pub fn map2(left: Self, right: Self, op: impl Fn(T, T) -> T + 'a) -> Result<Self> {
        require_same_shape("zip", &left, &right)?;
        Ok(TensExpr::Map2(Box::new(left), Box::new(right), Box::new(op)))
    }

    pub fn eval(operand: Self) -> Self {
        TensExpr::Eval(Box::new(operand))
    }

    pub fn serial(operand: Self) -> Self {
        TensExpr::Serial(Box::new(operand))
    }

    /// Materializes the expression into a dense tensor.
    pub fn to_dynamic(&self) -> DynamicTensor<T> {
        DynamicTensor::from_fn(self.pages(), self.rows(), self.columns(), |p, r, c| {
            self.get(p, r, c)
        })
    }
}

fn require_same_shape<'a, T: Scalar>(
    verb: &str,
    left: &TensExpr<'a, T>,
    right: &TensExpr<'a, T>,
) -> Result<()> {
    if left.pages() != right.pages()
        || left.rows() != right.rows()
        || left.columns() != right.columns()
    {
        return Err(ExprError::Incompatible(format!(
            "cannot {verb} a {}x{}x{} and a {}x{}x{} operand",
            left.pages(),
            left.rows(),
            left.columns(),
            right.pages(),
            right.rows(),
            right.columns()
        )));
    }
    Ok(())
}
