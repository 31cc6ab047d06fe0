//! High-order Newton refinement of the seed.
//!
//! With r the first-order Newton step, the update
//! x ← x + r(1 + r(c₁ + r c₂)) is third-order convergent; c₁ and c₂ come from
//! the derivatives of the density x^{a−1} e^{−x} / Γ(a).

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::special::{gamma_inc, gamma_inc_upper, LARGEST_F32};

use super::regime::{Seed, Step};
use super::{Exit, InverseSettings};

#[cfg(feature = "tracing")]
use tracing::debug;

/// Below this target probability the first step is plain Newton.
const HIGH_ORDER_MIN_P: f64 = 1e-120;

/// Outcome of the refinement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Refined {
    pub x: f64,
    pub iterations: usize,
    pub exit: Exit,
}

/// Refine `seed` towards the root of P(a, x) = p (p < ½) or Q(a, x) = q.
pub(crate) fn refine(a: f64, p: f64, q: f64, seed: &Seed, settings: &InverseSettings) -> Refined {
    let (lgama, inv_fp) = match seed.step {
        Step::Exact => {
            return Refined {
                x: seed.x0,
                iterations: 0,
                exit: Exit::Exact,
            }
        }
        Step::LogGamma { lgama } => (Some(lgama), 0.0),
        Step::Derivative { inv_fp } => (None, inv_fp),
    };

    let lower = p < 0.5;
    let ln_largest = LARGEST_F32.ln();
    let a2 = a * a;
    let xini = seed.x0;
    let mut x0 = xini;
    let mut n = 1usize;

    loop {
        let x = x0;
        let x2 = x * x;

        let scale = match lgama {
            Some(lgama) => {
                let dlnr = (1.0 - a) * x.ln() + x + lgama;
                if dlnr > ln_largest {
                    #[cfg(feature = "tracing")]
                    debug!(a, p, q, x = xini, dlnr, "step exponent overflows; returning the seed");
                    return Refined {
                        x: xini,
                        iterations: n - 1,
                        exit: Exit::ExponentOverflow,
                    };
                }
                dlnr.exp()
            }
            None => -inv_fp * x,
        };

        let forward = if lower {
            gamma_inc(a, x).map(|px| -scale * (px - p))
        } else {
            gamma_inc_upper(a, x).map(|qx| scale * (qx - q))
        };
        let r = match forward {
            Ok(r) => r,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                debug!(a, p, q, x, error = %_err, "forward incomplete gamma failed");
                return Refined {
                    x,
                    iterations: n - 1,
                    exit: Exit::NonFinite,
                };
            }
        };

        x0 = if p > HIGH_ORDER_MIN_P || n > 1 {
            let ck1 = 0.5 * (x - a + 1.0) / x;
            let ck2 = (2.0 * x2 - 4.0 * x * a + 4.0 * x + 2.0 * a2 - 3.0 * a + 1.0) / (6.0 * x2);
            let step = r * (1.0 + r * (ck1 + r * ck2));
            // x² underflows for roots near the bottom of the f64 range
            if step.is_finite() {
                x + step
            } else {
                x + r
            }
        } else {
            x + r
        };

        // an unmoved iterate is a fixed point, including a root that underflowed to 0
        let t = if x0 == x { 0.0 } else { (x / x0 - 1.0).abs() };
        n += 1;

        if x0.is_nan() {
            #[cfg(feature = "tracing")]
            debug!(a, p, q, x, iterations = n - 1, "iterate is not a number");
            return Refined {
                x: x0,
                iterations: n - 1,
                exit: Exit::NonFinite,
            };
        }
        if x0 < 0.0 {
            #[cfg(feature = "tracing")]
            debug!(a, p, q, x = xini, iterations = n - 1, "iterate went negative; returning the seed");
            return Refined {
                x: xini,
                iterations: n - 1,
                exit: Exit::NegativeIterate,
            };
        }
        if t <= settings.tol {
            return Refined {
                x: x0,
                iterations: n - 1,
                exit: Exit::Converged,
            };
        }
        if n >= settings.max_iter {
            #[cfg(feature = "tracing")]
            debug!(a, p, q, x = x0, iterations = n - 1, t, "iteration cap reached; returning last estimate");
            return Refined {
                x: x0,
                iterations: n - 1,
                exit: Exit::MaxIterations,
            };
        }
    }
}
