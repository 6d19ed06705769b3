//! Logarithm and exponential kernels that stay accurate near zero or near
//! the edge of the exponent range.

use crate::FloatScalar;
use super::horner;

/// Numerator of the ln(1+x) rational approximation in t² with t = x/(x+2).
const LN1P_P: [f64; 4] = [
    1.0,
    -0.129418923021993e+01,
    0.405303492862024e+00,
    -0.178874546012214e-01,
];

/// Denominator of the ln(1+x) rational approximation.
const LN1P_Q: [f64; 4] = [
    1.0,
    -0.162752256355323e+01,
    0.747811014037616e+00,
    -0.845104217945565e-01,
];

const RLOG1_P: [f64; 3] = [0.333333333333333, -0.224696413112536, 0.00620886815375787];
const RLOG1_Q: [f64; 3] = [1.0, -0.127408923933623e+01, 0.354508718369557];

const EXPM1_P: [f64; 3] = [1.0, 9.14041914819518e-10, 0.0238082361044469];
const EXPM1_Q: [f64; 5] = [
    1.0,
    -0.499999999085958,
    0.107141568980644,
    -0.0119041179760821,
    5.95130811860248e-4,
];

/// ln(1 + x), accurate for small |x|.
///
/// Uses a rational approximation in t = x/(x+2) for |x| ≤ 0.375 and the
/// direct logarithm otherwise. Requires x > −1.
///
/// # Example
///
/// ```
/// use incbeta::special::ln1p;
///
/// let x = 1e-12_f64;
/// assert!((ln1p(x) - x).abs() < 1e-24);
/// assert!((ln1p(1.0_f64) - 2.0_f64.ln()).abs() < 1e-15);
/// ```
pub fn ln1p<T: FloatScalar>(x: T) -> T {
    if x.abs() > T::cst(0.375) {
        return (T::one() + x).ln();
    }
    let two = T::cst(2.0);
    let t = x / (x + two);
    let t2 = t * t;
    let w = horner(&LN1P_P, t2) / horner(&LN1P_Q, t2);
    two * t * w
}

/// x − ln(1 + x), accurate near x = 0 where both terms nearly cancel.
///
/// Requires x > −1.
///
/// # Example
///
/// ```
/// use incbeta::special::rlog1;
///
/// // x − ln(1+x) ≈ x²/2 for small x
/// let x = 1e-6_f64;
/// assert!((rlog1(x) - 0.5 * x * x).abs() < 1e-18);
/// ```
pub fn rlog1<T: FloatScalar>(x: T) -> T {
    let one = T::one();
    if x < T::cst(-0.39) || x > T::cst(0.57) {
        return x - (x + one).ln();
    }

    // Shift the argument so the rational approximation only ever sees
    // |h| ≤ 0.18; w1 restores the difference.
    let (h, w1) = if x < T::cst(-0.18) {
        let h = (x + T::cst(0.3)) / T::cst(0.7);
        (h, T::cst(0.0566749439387324) - h * T::cst(0.3))
    } else if x > T::cst(0.18) {
        let h = T::cst(0.75) * x - T::cst(0.25);
        (h, T::cst(0.0456512608815524) + h / T::cst(3.0))
    } else {
        (x, T::zero())
    };

    let r = h / (h + T::cst(2.0));
    let t = r * r;
    let w = horner(&RLOG1_P, t) / horner(&RLOG1_Q, t);
    T::cst(2.0) * t * (one / (one - r) - r * w) + w1
}

/// eˣ − 1, accurate for small |x|.
///
/// # Example
///
/// ```
/// use incbeta::special::exp_m1;
///
/// let x = 1e-10_f64;
/// assert!((exp_m1(x) - x).abs() < 1e-19);
/// assert!((exp_m1(1.0_f64) - (1.0_f64.exp() - 1.0)).abs() < 1e-15);
/// ```
pub fn exp_m1<T: FloatScalar>(x: T) -> T {
    let half = T::cst(0.5);
    if x.abs() <= T::cst(0.15) {
        return x * (horner(&EXPM1_P, x) / horner(&EXPM1_Q, x));
    }
    let w = x.exp();
    if x > T::zero() {
        w * (half + (half - T::one() / w))
    } else {
        (w - half) - half
    }
}

/// exp(μ + x) for an integer shift μ.
///
/// When μ and x have opposite signs the sum is formed first, so a large
/// positive μ can cancel a large negative x (or vice versa) without either
/// factor overflowing or underflowing on its own.
///
/// # Example
///
/// ```
/// use incbeta::special::exp_shifted;
///
/// // e^{700} · e^{-705} = e^{-5}, although e^{-705} alone is subnormal
/// assert!((exp_shifted(700, -705.0_f64) - (-5.0_f64).exp()).abs() < 1e-15);
/// ```
pub fn exp_shifted<T: FloatScalar>(mu: i32, x: T) -> T {
    let zero = T::zero();
    let m = T::from_int(mu);
    let w = m + x;
    let opposite = if x > zero {
        mu <= 0 && w >= zero
    } else {
        mu >= 0 && w <= zero
    };
    if opposite {
        w.exp()
    } else {
        m.exp() * x.exp()
    }
}
