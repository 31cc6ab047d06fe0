use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for numeric element types.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for real floating-point types.
///
/// Required by the special functions, which need `ln`, `exp`, `sqrt`, etc.
/// Implemented for `f32` and `f64`.
pub trait FloatScalar: Scalar + Float {
    /// Convert an `f64` literal or table coefficient into `Self`.
    ///
    /// Values outside the range of `Self` saturate to ±infinity and values
    /// below its resolution flush toward zero, matching an `as` cast.
    fn lit(v: f64) -> Self;
}

impl FloatScalar for f32 {
    #[inline]
    fn lit(v: f64) -> f32 {
        v as f32
    }
}

impl FloatScalar for f64 {
    #[inline]
    fn lit(v: f64) -> f64 {
        v
    }
}
