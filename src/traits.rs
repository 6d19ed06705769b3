use core::fmt::{Debug, Display};
use num_traits::Float;

/// Trait for the floating-point types the special functions work in.
///
/// Implemented for `f32` and `f64`. On top of [`Float`] it provides lossless
/// access to the `f64` coefficient tables and the exponent range of the type,
/// which the evaluators need to keep `exp` from overflowing or underflowing.
pub trait FloatScalar: Float + Debug + Display {
    /// Convert an `f64` literal or table entry into `Self`.
    ///
    /// Rounds to nearest for `f32`; exact for `f64`.
    fn cst(v: f64) -> Self;

    /// Convert a small integer (loop counter, shift count) into `Self`.
    fn from_int(n: i32) -> Self;

    /// Truncate toward zero into an `i32`, saturating at the `i32` range.
    fn trunc_int(self) -> i32;

    /// Largest `w` such that `exp(w)` is finite (with a small safety margin).
    fn exp_arg_max() -> Self;

    /// Smallest `w` such that `exp(w)` is a normal, non-zero value
    /// (with a small safety margin).
    fn exp_arg_min() -> Self;
}

/// Concrete impls for the IEEE binary floats.
macro_rules! impl_float_scalar {
    ($($t:ty),*) => {
        $(
            impl FloatScalar for $t {
                #[inline] fn cst(v: f64) -> $t { v as $t }
                #[inline] fn from_int(n: i32) -> $t { n as $t }
                #[inline] fn trunc_int(self) -> i32 { self as i32 }

                #[inline]
                fn exp_arg_max() -> $t {
                    (<$t>::MAX_EXP as $t) * core::f64::consts::LN_2 as $t * 0.99999
                }

                #[inline]
                fn exp_arg_min() -> $t {
                    ((<$t>::MIN_EXP - 1) as $t) * core::f64::consts::LN_2 as $t * 0.99999
                }
            }
        )*
    };
}

impl_float_scalar!(f32, f64);
