//! Compile-time descriptors for operand shapes.
//!
//! The resolution ladders in [`crate::resolve`] work on small `const`-friendly
//! records instead of on the container types themselves. A descriptor states
//! everything the ladders need: how much of the size is known at compile
//! time, whether storage is dense or sparse, and the storage order or
//! orientation.

/// How much of one axis extent is known at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    /// The extent is fixed.
    Static(usize),
    /// Only an upper bound is fixed; the runtime extent may be smaller.
    Bounded(usize),
    /// Nothing is known before runtime.
    Dynamic,
}

impl SizeClass {
    pub const fn is_static(self) -> bool {
        matches!(self, SizeClass::Static(_))
    }

    pub const fn is_dynamic(self) -> bool {
        matches!(self, SizeClass::Dynamic)
    }

    /// The compile-time bound, if one exists.
    pub const fn bound(self) -> Option<usize> {
        match self {
            SizeClass::Static(n) | SizeClass::Bounded(n) => Some(n),
            SizeClass::Dynamic => None,
        }
    }

    /// Class of a flattened pair of axes.
    ///
    /// Static sizes multiply to a static size, bounds multiply to a bound,
    /// and anything touching a dynamic axis is dynamic. Overflowing bounds
    /// degrade to dynamic.
    pub const fn product(self, other: Self) -> Self {
        match (self, other) {
            (SizeClass::Static(a), SizeClass::Static(b)) => match a.checked_mul(b) {
                Some(n) => SizeClass::Static(n),
                None => SizeClass::Dynamic,
            },
            (SizeClass::Static(a), SizeClass::Bounded(b))
            | (SizeClass::Bounded(a), SizeClass::Static(b))
            | (SizeClass::Bounded(a), SizeClass::Bounded(b)) => match a.checked_mul(b) {
                Some(n) => SizeClass::Bounded(n),
                None => SizeClass::Dynamic,
            },
            _ => SizeClass::Dynamic,
        }
    }
}

/// Whether an extent handed to a view factory is a compile-time or a
/// runtime quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Known(usize),
    Unknown,
}

/// Storage backing of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    Dense,
    Sparse,
}

impl Density {
    /// Density of a result combining two operands. Dense wins: mixed
    /// products and sums are evaluated densely.
    pub const fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Density::Sparse, Density::Sparse) => Density::Sparse,
            _ => Density::Dense,
        }
    }
}

/// Element layout of a matrix-shaped operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOrder {
    RowMajor,
    ColumnMajor,
}

impl StorageOrder {
    pub const fn flipped(self) -> Self {
        match self {
            StorageOrder::RowMajor => StorageOrder::ColumnMajor,
            StorageOrder::ColumnMajor => StorageOrder::RowMajor,
        }
    }
}

/// Orientation of a vector-shaped operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Row,
    Column,
}

impl Orientation {
    pub const fn flipped(self) -> Self {
        match self {
            Orientation::Row => Orientation::Column,
            Orientation::Column => Orientation::Row,
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Orientation::Row => f.write_str("row"),
            Orientation::Column => f.write_str("column"),
        }
    }
}

/// Descriptor of a vector-shaped operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorDesc {
    pub density: Density,
    pub orientation: Orientation,
    pub len: SizeClass,
}

impl VectorDesc {
    pub const fn dense(orientation: Orientation, len: SizeClass) -> Self {
        Self {
            density: Density::Dense,
            orientation,
            len,
        }
    }

    pub const fn sparse(orientation: Orientation, len: SizeClass) -> Self {
        Self {
            density: Density::Sparse,
            orientation,
            len,
        }
    }
}

/// Descriptor of a matrix-shaped operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixDesc {
    pub density: Density,
    pub order: StorageOrder,
    pub rows: SizeClass,
    pub columns: SizeClass,
}

impl MatrixDesc {
    pub const fn dense(rows: SizeClass, columns: SizeClass) -> Self {
        Self {
            density: Density::Dense,
            order: StorageOrder::RowMajor,
            rows,
            columns,
        }
    }

    pub const fn sparse(rows: SizeClass, columns: SizeClass) -> Self {
        Self {
            density: Density::Sparse,
            order: StorageOrder::RowMajor,
            rows,
            columns,
        }
    }

    pub const fn with_order(self, order: StorageOrder) -> Self {
        Self { order, ..self }
    }
}

/// Descriptor of a tensor-shaped (page, row, column) operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TensorDesc {
    pub density: Density,
    pub pages: SizeClass,
    pub rows: SizeClass,
    pub columns: SizeClass,
}

impl TensorDesc {
    pub const fn dense(pages: SizeClass, rows: SizeClass, columns: SizeClass) -> Self {
        Self {
            density: Density::Dense,
            pages,
            rows,
            columns,
        }
    }
}

/// A descriptor of unknown shape, for ladders that must reject operands of
/// the wrong rank instead of relying on the argument type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyDesc {
    Vector(VectorDesc),
    Matrix(MatrixDesc),
    Tensor(TensorDesc),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_class_product() {
        assert_eq!(
            SizeClass::Static(3).product(SizeClass::Static(4)),
            SizeClass::Static(12)
        );
        assert_eq!(
            SizeClass::Static(3).product(SizeClass::Bounded(4)),
            SizeClass::Bounded(12)
        );
        assert_eq!(
            SizeClass::Bounded(3).product(SizeClass::Dynamic),
            SizeClass::Dynamic
        );
        assert_eq!(
            SizeClass::Static(usize::MAX).product(SizeClass::Static(2)),
            SizeClass::Dynamic
        );
    }

    #[test]
    fn test_density_combine() {
        assert_eq!(Density::Dense.combine(Density::Sparse), Density::Dense);
        assert_eq!(Density::Sparse.combine(Density::Sparse), Density::Sparse);
    }

    #[test]
    fn test_flips() {
        assert_eq!(StorageOrder::RowMajor.flipped(), StorageOrder::ColumnMajor);
        assert_eq!(Orientation::Column.flipped(), Orientation::Row);
    }
}
