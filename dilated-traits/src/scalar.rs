//! Scalar type bounds shared by the dilated view and expression crates.

/// Shared arithmetic bounds for element types stored in dense containers
/// and moved through views and expressions.
///
/// Blanket-implemented: any `Copy` type with ring arithmetic, division, and
/// `Zero`/`One` qualifies. Custom numeric types do not need to opt in.
pub trait ScalarBase:
    Copy
    + Send
    + Sync
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Div<Output = Self>
    + num_traits::Zero
    + num_traits::One
    + PartialEq
{
}

impl<T> ScalarBase for T where
    T: Copy
        + Send
        + Sync
        + std::ops::Add<Output = T>
        + std::ops::Sub<Output = T>
        + std::ops::Mul<Output = T>
        + std::ops::Div<Output = T>
        + num_traits::Zero
        + num_traits::One
        + PartialEq
{
}

/// Complex conjugation with an identity fallback for real scalars.
///
/// Hermitian checks and conjugating write-mirrors go through this trait so
/// the same code path serves real and complex element types.
pub trait Conjugate {
    fn conj(self) -> Self;
}

macro_rules! impl_conjugate_real {
    ($($t:ty),* $(,)?) => {
        $(
            impl Conjugate for $t {
                #[inline]
                fn conj(self) -> Self {
                    self
                }
            }
        )*
    };
}

impl_conjugate_real!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T> Conjugate for num_complex::Complex<T>
where
    T: Clone + std::ops::Neg<Output = T> + num_traits::Num,
{
    #[inline]
    fn conj(self) -> Self {
        num_complex::Complex::conj(&self)
    }
}

/// Element bound used throughout the container, view, and expression
/// layers.
pub trait Scalar: ScalarBase + Conjugate {}

impl<T: ScalarBase + Conjugate> Scalar for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn assert_scalar<T: Scalar>() {}

    #[test]
    fn test_standard_types() {
        assert_scalar::<f32>();
        assert_scalar::<f64>();
        assert_scalar::<i32>();
        assert_scalar::<i64>();
        assert_scalar::<Complex64>();
    }

    #[test]
    fn test_real_conj_is_identity() {
        assert_eq!(3.5_f64.conj(), 3.5);
        assert_eq!((-7_i32).conj(), -7);
    }

    #[test]
    fn test_complex_conj() {
        let z = Complex64::new(1.0, -2.0);
        assert_eq!(z.conj(), Complex64::new(1.0, 2.0));
    }
}
