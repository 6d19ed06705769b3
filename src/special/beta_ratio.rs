//! The beta density factor x^a·y^b / B(a, b) and the finite shift sum
//! Ix(a, b) − Ix(a+n, b) built from it.

use crate::FloatScalar;
use super::beta_fn::lbeta;
use super::gamma_fn::{gam1, gamma_ln1, lbeta_correction, lgamma_ratio};
use super::log_fn::{exp_shifted, ln1p, rlog1};

/// 1/√(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398942280401433;

/// exp(μ)·x^a·y^b / B(a, b) for a, b > 0 and y = 1 − x.
///
/// The factor exp(μ) lets [`shift_sum`] carry a density that would
/// otherwise underflow. For min(a, b) ≥ 8 the exponent is formed around
/// the mode with [`rlog1`] so that large a and b do not cancel; below that
/// the ln B(a, b) term is taken apart into the pieces that stay accurate
/// for small parameters. Zero when x or y is zero.
pub(crate) fn scaled_density<T: FloatScalar>(mu: i32, a: T, b: T, x: T, y: T) -> T {
    let zero = T::zero();
    let one = T::one();
    let eight = T::cst(8.0);

    if x == zero || y == zero {
        return zero;
    }

    let a0 = a.min(b);
    if a0 >= eight {
        return saddle_density(mu, a, b, x, y);
    }

    let threshold = T::cst(0.375);
    let (lnx, lny) = if x <= threshold {
        (x.ln(), ln1p(-x))
    } else if y <= threshold {
        (ln1p(-y), y.ln())
    } else {
        (x.ln(), y.ln())
    };

    let mut z = a * lnx + b * lny;
    if a0 >= one {
        z = z - lbeta(a, b);
        return exp_shifted(mu, z);
    }

    // a0 < 1
    let mut b0 = a.max(b);
    if b0 >= eight {
        let u = gamma_ln1(a0) + lgamma_ratio(a0, b0);
        return a0 * exp_shifted(mu, z - u);
    }

    if b0 <= one {
        let e = exp_shifted(mu, z);
        if e == zero {
            return e;
        }
        let c = (one + gam1(a)) * (one + gam1(b)) / inv_gamma_sum(a + b);
        return e * (a0 * c) / (one + a0 / b0);
    }

    // 1 < b0 < 8: pull b0 down into (0, 1] so Γ(b0) goes through gam1
    let mut u = gamma_ln1(a0);
    let n = (b0 - one).trunc_int();
    if n >= 1 {
        let mut c = one;
        for _ in 0..n {
            b0 = b0 - one;
            c = c * (b0 / (a0 + b0));
        }
        u = c.ln() + u;
    }
    z = z - u;
    b0 = b0 - one;
    let t = inv_gamma_sum(a0 + b0);
    a0 * exp_shifted(mu, z) * (one + gam1(b0)) / t
}

/// x^a·y^b / B(a, b).
#[inline]
pub(crate) fn density<T: FloatScalar>(a: T, b: T, x: T, y: T) -> T {
    scaled_density(0, a, b, x, y)
}

/// 1/Γ(s) expressed through [`gam1`] for 0 < s ≤ 2.
fn inv_gamma_sum<T: FloatScalar>(apb: T) -> T {
    let one = T::one();
    if apb > one {
        let u = apb - one;
        (one + gam1(u)) / apb
    } else {
        one + gam1(apb)
    }
}

fn saddle_density<T: FloatScalar>(mu: i32, a: T, b: T, x: T, y: T) -> T {
    let one = T::one();
    let limit = T::cst(0.6);

    let (x0, y0, lambda) = if a <= b {
        let h = a / b;
        (h / (one + h), one / (one + h), a - (a + b) * x)
    } else {
        let h = b / a;
        (one / (one + h), h / (one + h), (a + b) * y - b)
    };

    let e = -(lambda / a);
    let u = if e.abs() > limit {
        e - (x / x0).ln()
    } else {
        rlog1(e)
    };

    let e = lambda / b;
    let v = if e.abs() > limit {
        e - (y / y0).ln()
    } else {
        rlog1(e)
    };

    let z = exp_shifted(mu, -(a * u + b * v));
    T::cst(FRAC_1_SQRT_2PI) * (b * x0).sqrt() * z * (-lbeta_correction(a, b)).exp()
}

/// Ix(a, b) − Ix(a+n, b) for a positive integer `n`.
///
/// Sums the n terms of the recurrence Ix(a, b) − Ix(a+1, b) =
/// x^a·y^b / (a·B(a, b)). Terms increase up to the index of the largest
/// one and are then summed until they drop below `eps` relative to the
/// total. When a ≥ 1 and a + b is large the density is carried with a
/// factor exp(μ) and the sum with exp(−μ), so neither underflows on its own.
pub(crate) fn shift_sum<T: FloatScalar>(a: T, b: T, x: T, y: T, n: i32, eps: T) -> T {
    let zero = T::zero();
    let one = T::one();

    let apb = a + b;
    let ap1 = a + one;

    let mut mu = 0;
    let mut d = one;
    if n != 1 && a >= one && apb >= T::cst(1.1) * ap1 {
        mu = T::exp_arg_min()
            .abs()
            .trunc_int()
            .min(T::exp_arg_max().trunc_int());
        d = (-T::from_int(mu)).exp();
    }

    let head = scaled_density(mu, a, b, x, y) / a;
    if n == 1 || head == zero {
        return head;
    }

    let nm1 = n - 1;
    let mut w = d;

    // Index of the largest term
    let mut k = 0;
    if b > one {
        if y > T::cst(1e-4) {
            let r = (b - one) * x / y - a;
            if r >= one {
                k = if r < T::from_int(nm1) { r.trunc_int() } else { nm1 };
            }
        } else {
            k = nm1;
        }
    }

    for i in 0..k {
        let l = T::from_int(i);
        d = (apb + l) / (ap1 + l) * x * d;
        w = w + d;
    }

    for i in k..nm1 {
        let l = T::from_int(i);
        d = (apb + l) / (ap1 + l) * x * d;
        w = w + d;
        if d <= eps * w {
            break;
        }
    }

    head * w
}
