//! Power series for Ix(a, b) when a parameter is tiny or x is small.

use crate::FloatScalar;
use super::{SpecialError, EULER_GAMMA, MAX_SERIES_ITER};
use super::beta_fn::lbeta;
use super::digamma_fn::digamma;
use super::gamma_fn::{gam1, gamma_ln1, lgamma_ratio};

/// Ix(a, b) for b < min(eps, eps·a) and x ≤ 0.5.
///
/// With b this small 1/B(a, b) ≈ b, so Ix(a, b) ≈ (b/a)·x^a·(1 + a·Σ xʲ/(a+j)).
/// Returns zero when x^a underflows.
pub(crate) fn fpser<T: FloatScalar>(a: T, b: T, x: T, eps: T) -> Result<T, SpecialError> {
    let one = T::one();

    let mut result = one;
    if a > T::cst(1e-3) * eps {
        let t = a * x.ln();
        if t < T::exp_arg_min() {
            return Ok(T::zero());
        }
        result = t.exp();
    }

    result = b / a * result;
    let tol = eps / a;
    let mut an = a + one;
    let mut t = x;
    let mut s = t / an;
    for _ in 0..MAX_SERIES_ITER {
        an = an + one;
        t = x * t;
        let c = t / an;
        s = s + c;
        if c.abs() <= tol {
            return Ok(result * (one + a * s));
        }
    }
    Err(SpecialError::ConvergenceFailure)
}

/// 1 − Ix(a, b) for a ≤ min(eps, eps·b), b·x ≤ 1 and x ≤ 0.5.
///
/// Linear in a: 1 − Ix(a, b) ≈ −a·(ln x + ψ(b) + γ + Σ ...). For b·eps
/// above 0.02 the digamma term is replaced by ln b.
pub(crate) fn apser<T: FloatScalar>(a: T, b: T, x: T, eps: T) -> Result<T, SpecialError> {
    let one = T::one();
    let g = T::cst(EULER_GAMMA);

    let bx = b * x;
    let mut t = x - bx;
    let c = if b * eps <= T::cst(2e-2) {
        x.ln() + digamma(b) + g + t
    } else {
        bx.ln() + g + t
    };

    let tol = T::cst(5.0) * eps * c.abs();
    let mut j = one;
    let mut s = T::zero();
    for _ in 0..MAX_SERIES_ITER {
        j = j + one;
        t = t * (x - bx / j);
        let aj = t / j;
        s = s + aj;
        if aj.abs() <= tol {
            return Ok(-(a * (c + s)));
        }
    }
    Err(SpecialError::ConvergenceFailure)
}

/// Ix(a, b) by the power series in x, for b ≤ 1 or b·x ≤ 0.7.
///
/// Ix(a, b) = x^a / (a·B(a, b)) · (1 + a·Σⱼ (1−b)ⱼ·xʲ / (j!·(a+j))).
/// The prefactor x^a/B(a, b) is assembled without forming B(a, b) when a
/// parameter is below 1.
pub(crate) fn bpser<T: FloatScalar>(a: T, b: T, x: T, eps: T) -> Result<T, SpecialError> {
    let zero = T::zero();
    let one = T::one();
    let half = T::cst(0.5);
    let eight = T::cst(8.0);

    if x == zero {
        return Ok(zero);
    }

    let a0 = a.min(b);
    let result = if a0 >= one {
        let z = a * x.ln() - lbeta(a, b);
        z.exp() / a
    } else {
        let b0 = a.max(b);
        if b0 >= eight {
            let u = gamma_ln1(a0) + lgamma_ratio(a0, b0);
            let z = a * x.ln() - u;
            a0 / a * z.exp()
        } else if b0 > one {
            let mut u = gamma_ln1(a0);
            let mut b0 = b0;
            let m = (b0 - one).trunc_int();
            if m >= 1 {
                let mut c = one;
                for _ in 0..m {
                    b0 = b0 - one;
                    c = c * (b0 / (a0 + b0));
                }
                u = c.ln() + u;
            }
            let z = a * x.ln() - u;
            b0 = b0 - one;
            let apb = a0 + b0;
            let t = if apb > one {
                (one + gam1(apb - one)) / apb
            } else {
                one + gam1(apb)
            };
            z.exp() * (a0 / a) * (one + gam1(b0)) / t
        } else {
            let xa = x.powf(a);
            if xa == zero {
                return Ok(xa);
            }
            let apb = a + b;
            let z = if apb > one {
                (one + gam1(apb - one)) / apb
            } else {
                one + gam1(apb)
            };
            let c = (one + gam1(a)) * (one + gam1(b)) / z;
            xa * c * (b / apb)
        }
    };

    if result == zero || a <= T::cst(0.1) * eps {
        return Ok(result);
    }

    let tol = eps / a;
    let mut n = zero;
    let mut sum = zero;
    let mut c = one;
    for _ in 0..MAX_SERIES_ITER {
        n = n + one;
        c = c * (half + (half - b / n)) * x;
        let w = c / (a + n);
        sum = sum + w;
        if w.abs() <= tol {
            return Ok(result * (one + a * sum));
        }
    }
    Err(SpecialError::ConvergenceFailure)
}
