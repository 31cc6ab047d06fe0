//! Forward functions the inversion is built on.
//!
//! Everything here is generic over [`FloatScalar`] and allocation free:
//!
//! - [`gamma`], [`lgamma`]: Γ(x) and ln |Γ(x)|
//! - [`gamma_star`]: Γ\*(x) = Γ(x) / (√(2π) x^{x−½} e^{−x}), which tends to 1
//! - [`gamma_inc`], [`gamma_inc_upper`]: the regularized ratios P(a, x) and Q(a, x)
//! - [`erf`], [`erfc`], [`erfc_inv`]: error function family, the last one
//!   seeding the uniform asymptotic inversion
//!
//! ```
//! use gammaincinv::special::{erfc_inv, gamma_inc, gamma_star};
//!
//! // Γ*(x) → 1 as x → ∞
//! assert!((gamma_star(1.0e6_f64) - 1.0).abs() < 1e-6);
//!
//! // erfc(erfc⁻¹(y)) = y
//! let y = 0.25_f64;
//! let x = erfc_inv(y);
//! assert!((gammaincinv::special::erfc(x) - y).abs() < 1e-14);
//!
//! // P(a, 0) = 0
//! assert_eq!(gamma_inc(3.0_f64, 0.0), Ok(0.0));
//! ```

use core::fmt;

mod erf_fn;
mod gamma_fn;
mod incgamma;
mod stirling;


pub use erf_fn::{erf, erfc, erfc_inv};
pub use gamma_fn::{gamma, lgamma};
pub use incgamma::{gamma_inc, gamma_inc_upper};
pub use stirling::gamma_star;

pub(crate) use stirling::stirling;

/// `f32::MIN_POSITIVE` widened; inputs below it are treated as zero.
pub(crate) const SMALLEST_F32: f64 = f32::MIN_POSITIVE as f64;

/// `f32::MAX` widened; returned in place of an overflowing result.
pub(crate) const LARGEST_F32: f64 = f32::MAX as f64;

/// √(2π)
pub(crate) const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// ln √(2π)
pub(crate) const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;

/// Failure of a forward evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialError {
    /// The expansion ran out of its term budget.
    ConvergenceFailure,
    /// An argument lies outside the domain, such as a shape a ≤ 0 or x < 0.
    DomainError,
}

impl fmt::Display for SpecialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConvergenceFailure => f.write_str("expansion did not converge"),
            Self::DomainError => f.write_str("argument out of domain"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SpecialError {}
