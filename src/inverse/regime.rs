//! Initial approximations to x with P(a, x) = p, Q(a, x) = q.
//!
//! Each branch is a guarded pure function returning `None` when its condition
//! does not hold; [`select`] tries them in a fixed order and takes the first
//! seed produced. The asymptotic branch at the end always applies.

use core::cmp::Ordering;

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::special::{erfc_inv, gamma, gamma_star, lgamma, LARGEST_F32, SQRT_2PI};

use super::lambdaeta::{eps1, eps2, eps3, lambdaeta};

/// Initial-approximation strategy that seeded the root.
///
/// Listed in the order the selector tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    /// q < 1e-30 and a < ½: logarithmic seed deep in the upper tail.
    DeepUpperTail,
    /// 1 < a < 500 and p < 1e-80: fixed-point seed deep in the lower tail.
    DeepLowerTail,
    /// |a − 1| < 1e-4: the exponential distribution's closed form.
    NearUnitShape,
    /// r = (p Γ(a+1))^{1/a} < 0.2(1 + a): fifth-order series in r.
    SmallRatio,
    /// a < 10 with q below a shape-dependent threshold: expansion through λ(η).
    SmallShapeUpperTail,
    /// min(p, q) within 1e-5 of ½: expansion of the median in 1/a.
    NearMedian,
    /// a < 1 otherwise: power of the probability.
    SmallShape,
    /// Everything else: uniform asymptotic expansion around erfc⁻¹.
    Asymptotic,
}

/// How the Newton iteration forms its step from the residual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Step {
    /// The seed is the exact root; no refinement.
    Exact,
    /// Multiplier exp((1 − a) ln x + x + ln Γ(a)), i.e. 1/(density at x).
    LogGamma { lgama: f64 },
    /// Multiplier −x / fp with fp precomputed at the seed.
    Derivative { inv_fp: f64 },
}

/// Seed produced by the selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Seed {
    pub x0: f64,
    pub regime: Regime,
    pub step: Step,
}

impl Seed {
    fn refined(x0: f64, regime: Regime, a: f64) -> Self {
        Self {
            x0,
            regime,
            step: Step::LogGamma { lgama: lgamma(a) },
        }
    }
}

/// The seed of the asymptotic branch overflowed: erfc⁻¹(2 min(p, q)) is not
/// below the largest `f32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SeedOverflow;

/// Which probability drives the seed and the sign of η.
#[derive(Debug, Clone, Copy)]
struct Tails {
    p: f64,
    q: f64,
    /// p < ½: invert the lower tail.
    lower: bool,
    porq: f64,
    s: f64,
}

impl Tails {
    fn new(p: f64, q: f64) -> Self {
        if p < 0.5 {
            Self { p, q, lower: true, porq: p, s: -1.0 }
        } else {
            Self { p, q, lower: false, porq: q, s: 1.0 }
        }
    }
}

/// Pick the initial approximation for P(a, x) = p, Q(a, x) = q, p + q = 1.
pub(crate) fn select(a: f64, p: f64, q: f64) -> Result<Seed, SeedOverflow> {
    let t = Tails::new(p, q);
    let seed = deep_upper_tail(a, &t)
        .or_else(|| deep_lower_tail(a, &t))
        .or_else(|| near_unit_shape(a, &t))
        .or_else(|| small_ratio(a, &t))
        .or_else(|| small_shape_upper_tail(a, &t))
        .or_else(|| near_median(a, &t))
        .or_else(|| small_shape(a, &t));
    match seed {
        Some(seed) => Ok(seed),
        None => asymptotic(a, &t),
    }
}

fn deep_upper_tail(a: f64, t: &Tails) -> Option<Seed> {
    if !(t.q < 1e-30 && a < 0.5) {
        return None;
    }
    let qg = t.q * gamma(a);
    let x0 = -qg.ln() + (a - 1.0) * (-qg.ln()).ln();
    Some(Seed::refined(x0, Regime::DeepUpperTail, a))
}

fn deep_lower_tail(a: f64, t: &Tails) -> Option<Seed> {
    if !(a > 1.0 && a < 500.0 && t.p < 1e-80) {
        return None;
    }
    let ainv = 1.0 / a;
    let ap1inv = 1.0 / (a + 1.0);
    let xini = ((lgamma(a + 1.0) + t.p.ln()) * ainv).exp();
    let mut x0 = xini;
    for _ in 0..10 {
        x0 = xini * (x0 * ainv).exp() * (1.0 - x0 * ap1inv).powf(ainv);
    }
    Some(Seed::refined(x0, Regime::DeepLowerTail, a))
}

fn near_unit_shape(a: f64, t: &Tails) -> Option<Seed> {
    if (a - 1.0).abs() >= 1e-4 {
        return None;
    }
    let x0 = if t.lower {
        let p = t.p;
        if p < 1e-3 {
            let p2 = p * p;
            let p3 = p2 * p;
            let p4 = p3 * p;
            let p5 = p4 * p;
            let p6 = p5 * p;
            p + p2 * 0.5 + p3 / 3.0 + p4 * 0.25 + p5 * 0.2 + p6 / 6.0
        } else {
            -(1.0 - p).ln()
        }
    } else {
        -t.q.ln()
    };
    if a == 1.0 {
        return Some(Seed {
            x0,
            regime: Regime::NearUnitShape,
            step: Step::Exact,
        });
    }
    Some(Seed::refined(x0, Regime::NearUnitShape, a))
}

fn small_ratio(a: f64, t: &Tails) -> Option<Seed> {
    let logr = (t.p.ln() + lgamma(a + 1.0)) / a;
    // a NaN ratio fails the bound too
    if logr.partial_cmp(&(0.2 * (1.0 + a)).ln()) != Some(Ordering::Less) {
        return None;
    }
    let r = logr.exp();
    let a2 = a * a;
    let a3 = a2 * a;
    let a4 = a3 * a;
    let ap1 = a + 1.0;
    let ap12 = ap1 * ap1;
    let ap13 = ap1 * ap12;
    let ap14 = ap12 * ap12;
    let ap2 = a + 2.0;
    let ap22 = ap2 * ap2;
    let ap3 = a + 3.0;
    let ck1 = 1.0 / ap1;
    let ck2 = 0.5 * (3.0 * a + 5.0) / (ap12 * ap2);
    let ck3 = (31.0 + 8.0 * a2 + 33.0 * a) / (3.0 * ap13 * ap2 * ap3);
    let ck4 = (2888.0 + 1179.0 * a3 + 125.0 * a4 + 3971.0 * a2 + 5661.0 * a)
        / (24.0 * ap14 * ap22 * ap3 * (a + 4.0));
    let x0 = r * (1.0 + r * (ck1 + r * (ck2 + r * (ck3 + r * ck4))));
    Some(Seed::refined(x0, Regime::SmallRatio, a))
}

fn small_shape_upper_tail(a: f64, t: &Tails) -> Option<Seed> {
    if a >= 10.0 {
        return None;
    }
    let vgam = a.sqrt() / (gamma_star(a) * SQRT_2PI);
    let vmin = vgam.min(0.02);
    if t.q.partial_cmp(&vmin) != Some(Ordering::Less) {
        return None;
    }

    let b = 1.0 - a;
    let b2 = b * b;
    let b3 = b2 * b;
    let eta = (-2.0 / a * (t.q / vgam).ln()).sqrt();
    let mut x0 = a * lambdaeta(eta);
    let l = x0.ln();
    let r = 1.0 / x0;
    if x0 > 5.0 {
        let l2 = l * l;
        let l3 = l2 * l;
        let l4 = l3 * l;
        let ck0 = l - 1.0;
        let ck1 = (3.0 * b - 2.0 * b * l + l2 - 2.0 * l + 2.0) * 0.5;
        let ck2 = (24.0 * b * l - 11.0 * b2 - 24.0 * b - 6.0 * l2 + 12.0 * l - 12.0
            - 9.0 * b * l2
            + 6.0 * b2 * l
            + 2.0 * l3)
            / 6.0;
        let ck3 = (-12.0 * b3 * l + 84.0 * b * l2 - 114.0 * b2 * l + 72.0 + 36.0 * l2
            + 3.0 * l4
            - 72.0 * l
            + 162.0 * b
            - 168.0 * b * l
            - 12.0 * l3
            + 25.0 * b3
            - 22.0 * b * l3
            + 36.0 * b2 * l2
            + 120.0 * b2)
            / 12.0;
        x0 = x0 - l + b * r * (ck0 + r * (ck1 + r * (ck2 + r * ck3)));
    } else {
        // first-order correction, skipped if it would overshoot below zero
        let ck0 = l - 1.0;
        if l - b * r * ck0 < x0 {
            x0 = x0 - l + b * r * ck0;
        }
    }
    Some(Seed::refined(x0, Regime::SmallShapeUpperTail, a))
}

fn near_median(a: f64, t: &Tails) -> Option<Seed> {
    if (t.porq - 0.5).abs() >= 1e-5 {
        return None;
    }
    let ainv = 1.0 / a;
    let x0 = a - 1.0 / 3.0
        + (0.0197530864197530864197530864198 + 0.00721144424848128551832255535959 * ainv) * ainv;
    Some(Seed::refined(x0, Regime::NearMedian, a))
}

fn small_shape(a: f64, t: &Tails) -> Option<Seed> {
    if a >= 1.0 {
        return None;
    }
    // p in both tails: min(p, q) when p < ½, 1 − min(p, q) otherwise
    let x0 = ((t.p.ln() + lgamma(a + 1.0)) / a).exp();
    Some(Seed::refined(x0, Regime::SmallShape, a))
}

fn asymptotic(a: f64, t: &Tails) -> Result<Seed, SeedOverflow> {
    let r = erfc_inv(2.0 * t.porq);
    if r.partial_cmp(&LARGEST_F32) != Some(Ordering::Less) {
        return Err(SeedOverflow);
    }
    let ainv = 1.0 / a;
    let mut eta = t.s * r / (a * 0.5).sqrt();
    eta += (eps1(eta) + (eps2(eta) + eps3(eta) * ainv) * ainv) * ainv;
    let x0 = a * lambdaeta(eta);

    let fp = -a.sqrt() / SQRT_2PI * (-0.5 * a * eta * eta).exp() / gamma_star(a);
    let inv_fp = 1.0 / fp;
    if !inv_fp.is_finite() {
        // density underflowed at the seed
        return Ok(Seed::refined(x0, Regime::Asymptotic, a));
    }
    Ok(Seed {
        x0,
        regime: Regime::Asymptotic,
        step: Step::Derivative { inv_fp },
    })
}
