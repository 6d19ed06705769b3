//! Asymptotic expansions of Ix(a, b) for one or both parameters large.

use crate::FloatScalar;
use super::SpecialError;
use super::erf_fn::erfc_scaled;
use super::gamma_fn::{gam1, lbeta_correction, lgamma_ratio};
use super::incgamma::gamma_ratio;
use super::log_fn::{ln1p, rlog1};

/// Terms of the expansion in [`bgrat`].
const GRAT_TERMS: usize = 30;

/// Terms of the expansion in [`basym`] (taken in even/odd pairs).
const ASYM_TERMS: usize = 20;

/// 2/√π
const E0: f64 = 1.12837916709551;
/// 2^(−3/2)
const E1: f64 = 0.353553390593274;

/// w + Ix(a, b) for a ≥ 15 and b ≤ 1.
///
/// Expands around the incomplete gamma ratio Q(b, z) with z = −ν·ln x and
/// ν = a + (b−1)/2. `w` is the part of the result already accumulated by
/// the caller; it only enters the stopping rule. Fails when b·z or the
/// scale factor underflows to zero, or when a partial sum turns
/// non-positive.
pub(crate) fn bgrat<T: FloatScalar>(
    a: T,
    b: T,
    x: T,
    y: T,
    w: T,
    eps: T,
) -> Result<T, SpecialError> {
    let zero = T::zero();
    let one = T::one();
    let half = T::cst(0.5);
    let two = T::cst(2.0);

    let bm1 = (b - half) - half;
    let nu = a + half * bm1;
    let lnx = if y > T::cst(0.375) { x.ln() } else { ln1p(-y) };
    let z = -(nu * lnx);
    if b * z == zero {
        return Err(SpecialError::ConvergenceFailure);
    }

    // r = e^{−z}·z^b / Γ(b)
    let r = b * (one + gam1(b)) * (b * z.ln()).exp();
    let r = r * (a * lnx).exp() * (half * bm1 * lnx).exp();
    let u = lgamma_ratio(b, a) + b * nu.ln();
    let u = r * (-u).exp();
    if u == zero {
        return Err(SpecialError::ConvergenceFailure);
    }

    let (_, q) = gamma_ratio(b, z, r, eps)?;

    let v = T::cst(0.25) * (one / nu).powi(2);
    let t2 = T::cst(0.25) * lnx * lnx;
    let l = w / u;
    let mut j = q / r;
    let mut sum = j;
    let mut t = one;
    let mut cn = one;
    let mut n2 = zero;

    let mut c = [zero; GRAT_TERMS];
    let mut d = [zero; GRAT_TERMS];
    for n in 1..=GRAT_TERMS {
        let bp2n = b + n2;
        j = (bp2n * (bp2n + one) * j + (z + bp2n + one) * t) * v;
        n2 = n2 + two;
        t = t * t2;
        cn = cn / (n2 * (n2 + one));
        c[n - 1] = cn;

        let mut s = zero;
        let mut coef = b - T::from_int(n as i32);
        for i in 1..n {
            s = s + coef * c[i - 1] * d[n - i - 1];
            coef = coef + b;
        }
        d[n - 1] = bm1 * cn + s / T::from_int(n as i32);

        let dj = d[n - 1] * j;
        sum = sum + dj;
        if sum <= zero {
            return Err(SpecialError::ConvergenceFailure);
        }
        if dj.abs() <= eps * (sum + l) {
            break;
        }
    }

    Ok(w + u * sum)
}

/// Ix(a, b) for a, b ≥ 100 with λ = (a+b)·y − b small relative to the
/// smaller parameter.
///
/// Large-deviation expansion around the mode: the leading factor is
/// e^{−f} with f = a·rlog1(−λ/a) + b·rlog1(λ/b), and the correction series
/// is driven by exp(z²)·erfc(z) at z = √f. Returns zero when e^{−f}
/// underflows. The series is truncated after its fixed number of terms.
pub(crate) fn basym<T: FloatScalar>(a: T, b: T, lambda: T, eps: T) -> T {
    let zero = T::zero();
    let one = T::one();
    let half = T::cst(0.5);
    let two = T::cst(2.0);
    let e0 = T::cst(E0);
    let e1 = T::cst(E1);

    let f = a * rlog1(-lambda / a) + b * rlog1(lambda / b);
    let t = (-f).exp();
    if t == zero {
        return zero;
    }

    let z0 = f.sqrt();
    let z = half * (z0 / e1);
    let z2 = f + f;

    let (h, r0, r1, w0) = if a < b {
        let h = a / b;
        (h, one / (one + h), (b - a) / b, one / (a * (one + h)).sqrt())
    } else {
        let h = b / a;
        (h, one / (one + h), (b - a) / a, one / (b * (one + h)).sqrt())
    };

    let mut a0 = [zero; ASYM_TERMS + 1];
    let mut b0 = [zero; ASYM_TERMS + 1];
    let mut c = [zero; ASYM_TERMS + 1];
    let mut d = [zero; ASYM_TERMS + 1];

    a0[0] = T::cst(2.0 / 3.0) * r1;
    c[0] = -(half * a0[0]);
    d[0] = -c[0];
    let mut j0 = half / e0 * erfc_scaled(z0);
    let mut j1 = e1;
    let mut sum = j0 + d[0] * w0 * j1;

    let mut s = one;
    let h2 = h * h;
    let mut hn = one;
    let mut w = w0;
    let mut znm1 = z;
    let mut zn = z2;

    for n in (2..=ASYM_TERMS).step_by(2) {
        let nf = T::from_int(n as i32);
        hn = h2 * hn;
        a0[n - 1] = two * r0 * (one + h * hn) / (nf + two);
        let np1 = n + 1;
        s = s + hn;
        a0[np1 - 1] = two * r1 * s / (nf + T::cst(3.0));

        for i in n..=np1 {
            let r = -half * (T::from_int(i as i32) + one);
            b0[0] = r * a0[0];
            for m in 2..=i {
                let mut bsum = zero;
                for jj in 1..m {
                    let mmj = m - jj;
                    bsum = bsum
                        + (T::from_int(jj as i32) * r - T::from_int(mmj as i32))
                            * a0[jj - 1]
                            * b0[mmj - 1];
                }
                b0[m - 1] = r * a0[m - 1] + bsum / T::from_int(m as i32);
            }
            c[i - 1] = b0[i - 1] / (T::from_int(i as i32) + one);

            let mut dsum = zero;
            for jj in 1..i {
                dsum = dsum + d[i - jj - 1] * c[jj - 1];
            }
            d[i - 1] = -(dsum + c[i - 1]);
        }

        j0 = e1 * znm1 + (nf - one) * j0;
        j1 = e1 * zn + nf * j1;
        znm1 = z2 * znm1;
        zn = z2 * zn;
        w = w0 * w;
        let t0 = d[n - 1] * w * j0;
        w = w0 * w;
        let t1 = d[np1 - 1] * w * j1;
        sum = sum + (t0 + t1);
        if t0.abs() + t1.abs() <= eps * sum {
            break;
        }
    }

    let u = (-lbeta_correction(a, b)).exp();
    e0 * t * u * sum
}
