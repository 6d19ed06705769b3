//! Continued fraction expansion of Ix(a, b) for a, b > 1.

use crate::FloatScalar;
use super::SpecialError;
use super::beta_ratio::density;

/// Ix(a, b) by continued fraction, for a, b > 1 and
/// λ = (a+b)·y − b ≥ 0 (equivalently x ≤ a/(a+b)).
///
/// Forward recurrence on numerators and denominators, rescaled after every
/// step so neither overflows. Stops when consecutive convergents agree to
/// `eps` relative; after `max_iter` steps without that, or once a
/// convergent turns non-finite, gives up with
/// [`SpecialError::ConvergenceFailure`].
pub(crate) fn bfrac<T: FloatScalar>(
    a: T,
    b: T,
    x: T,
    y: T,
    lambda: T,
    eps: T,
    max_iter: usize,
) -> Result<T, SpecialError> {
    let zero = T::zero();
    let one = T::one();
    let two = T::cst(2.0);

    let prefactor = density(a, b, x, y);
    if prefactor == zero {
        return Ok(zero);
    }

    let c = one + lambda;
    let c0 = b / a;
    let c1 = one + one / a;
    let yp1 = y + one;

    let mut n = zero;
    let mut p = one;
    let mut s = a + one;
    let mut an = zero;
    let mut bn = one;
    let mut anp1 = one;
    let mut bnp1 = c / c1;
    let mut r = c1 / c;

    for _ in 0..max_iter {
        n = n + one;
        let t = n / a;
        let w = n * (b - n) * x;
        let e = a / s;
        let alpha = p * (p + c0) * e * e * (w * x);
        let e = (one + t) / (c1 + t + t);
        let beta = n + w / s + e * (c + n * yp1);
        p = one + t;
        s = s + two;

        let t = alpha * an + beta * anp1;
        an = anp1;
        anp1 = t;
        let t = alpha * bn + beta * bnp1;
        bn = bnp1;
        bnp1 = t;

        let r0 = r;
        r = anp1 / bnp1;
        if !r.is_finite() {
            return Err(SpecialError::ConvergenceFailure);
        }
        if (r - r0).abs() <= eps * r {
            return Ok(prefactor * r);
        }

        an = an / bnp1;
        bn = bn / bnp1;
        anp1 = r;
        bnp1 = one;
    }
    Err(SpecialError::ConvergenceFailure)
}
