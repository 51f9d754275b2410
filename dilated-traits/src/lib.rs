//! Shared traits and compile-time shape machinery for the dilated-rs
//! ecosystem.
//!
//! This crate provides the scalar bounds, structural flag algebra, and
//! `const fn` result-shape resolution that are shared between
//! `dilated-view` and the expression layer in `dilated-rs`.
//!
//! External crates can depend on `dilated-traits` to implement the access
//! traits for their own container types without orphan rule violations.

pub mod flags;
pub mod resolve;
pub mod scalar;
pub mod shape;

pub use flags::StructureFlags;
pub use scalar::{Conjugate, Scalar, ScalarBase};
pub use shape::{
    AnyDesc, Density, MatrixDesc, Orientation, Param, SizeClass, StorageOrder, TensorDesc,
    VectorDesc,
};
