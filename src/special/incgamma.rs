//! Regularized incomplete gamma ratios P(a, x) and Q(a, x) for a ≤ 1.
//!
//! Only used as the leading term of the asymptotic incomplete beta
//! expansion, which needs Q(b, z) with b ≤ 1 and already has the factor
//! r = e^{−x}·x^a/Γ(a) at hand.

use crate::FloatScalar;
use super::{complement, SpecialError, MAX_SERIES_ITER};
use super::erf_fn::{erf, erfc};
use super::gamma_fn::gam1;
use super::log_fn::exp_m1;

/// P(a, x) and Q(a, x) = 1 − P(a, x) for 0 ≤ a ≤ 1, x ≥ 0.
///
/// `r` must be e^{−x}·x^a/Γ(a); it scales the continued fraction used for
/// x ≥ 1.1. Below that a Taylor series in x is used, and a = ½ goes through
/// the error function directly.
///
/// Returns [`SpecialError::ConvergenceFailure`] when neither the series nor
/// the continued fraction settles within the iteration cap.
pub(crate) fn gamma_ratio<T: FloatScalar>(
    a: T,
    x: T,
    r: T,
    eps: T,
) -> Result<(T, T), SpecialError> {
    let zero = T::zero();
    let one = T::one();
    let half = T::cst(0.5);

    if a * x == zero {
        return Ok(if x <= a { (zero, one) } else { (one, zero) });
    }

    if a == half {
        let rx = x.sqrt();
        if x < T::cst(0.25) {
            let p = erf(rx);
            return Ok((p, complement(p)));
        }
        let q = erfc(rx);
        return Ok((complement(q), q));
    }

    if x < T::cst(1.1) {
        return taylor(a, x, eps);
    }

    let q = r * continued_fraction(a, x, eps)?;
    Ok((complement(q), q))
}

/// Taylor series of γ(a, x) about x = 0, combined with 1/Γ(a+1) − 1 so
/// that neither P nor Q loses digits to cancellation.
fn taylor<T: FloatScalar>(a: T, x: T, eps: T) -> Result<(T, T), SpecialError> {
    let zero = T::zero();
    let one = T::one();
    let half = T::cst(0.5);
    let two = T::cst(2.0);

    let mut an = T::cst(3.0);
    let mut c = x;
    let mut sum = x / (a + an);
    let tol = T::cst(0.1) * eps / (a + one);

    let mut converged = false;
    for _ in 0..MAX_SERIES_ITER {
        an = an + one;
        c = -(c * (x / an));
        let t = c / (a + an);
        sum = sum + t;
        if t.abs() <= tol {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(SpecialError::ConvergenceFailure);
    }

    let j = a * x * ((sum / T::cst(6.0) - half / (a + two)) * x + one / (a + one));
    let z = a * x.ln();
    let h = gam1(a);
    let g = one + h;

    let use_q = if x < T::cst(0.25) {
        z > T::cst(-0.13394)
    } else {
        a < x / T::cst(2.59)
    };

    if use_q {
        let l = exp_m1(z);
        let w = half + (half + l);
        let q = (w * j - l) * g - h;
        if q < zero {
            return Ok((one, zero));
        }
        return Ok((complement(q), q));
    }

    let p = z.exp() * g * complement(j);
    Ok((p, complement(p)))
}

/// Legendre continued fraction for Q(a, x)/r, evaluated by its even and
/// odd convergents until two consecutive ones agree to `eps`.
fn continued_fraction<T: FloatScalar>(a: T, x: T, eps: T) -> Result<T, SpecialError> {
    let one = T::one();

    let mut a2nm1 = one;
    let mut a2n = one;
    let mut b2nm1 = x;
    let mut b2n = x + (one - a);
    let mut c = one;

    for _ in 0..MAX_SERIES_ITER {
        a2nm1 = x * a2n + c * a2nm1;
        b2nm1 = x * b2n + c * b2nm1;
        let am0 = a2nm1 / b2nm1;
        c = c + one;
        let cma = c - a;
        a2n = a2nm1 + cma * a2n;
        b2n = b2nm1 + cma * b2n;
        let an0 = a2n / b2n;
        if (an0 - am0).abs() < eps * an0 {
            return Ok(an0);
        }
    }
    Err(SpecialError::ConvergenceFailure)
}
