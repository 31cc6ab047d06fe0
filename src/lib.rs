//! # gammaincinv
//!
//! Inverse of the regularized incomplete gamma functions, pure Rust and
//! no-std compatible (no heap allocation).
//!
//! ## Quick start
//!
//! ```
//! use gammaincinv::{lower, upper};
//! use gammaincinv::special::{gamma_inc, gamma_inc_upper};
//!
//! // x with P(10, x) = 0.3
//! let x = lower(0.3, 10.0);
//! assert!((x - 8.13293).abs() < 1e-3);
//! assert!((gamma_inc(10.0, x).unwrap() - 0.3).abs() < 1e-13);
//!
//! // x with Q(2, x) = 1e-4
//! let x = upper(1e-4, 2.0);
//! assert!((gamma_inc_upper(2.0, x).unwrap() / 1e-4 - 1.0).abs() < 1e-10);
//! ```
//!
//! ## Modules
//!
//! - [`inverse`] — The solver: [`lower`] / [`upper`] for bare values,
//!   [`inverse::solve_with`] for the value plus its diagnostic (seeding
//!   [`inverse::Regime`], Newton step count, [`inverse::Exit`] reason).
//!   [`inverse::Tail`] selects the ratio and parses from `"lower"`/`"upper"`.
//!
//! - [`special`] — The special functions the solver is built on: gamma,
//!   log-gamma, the regulated gamma Γ\*, the regularized incomplete gamma
//!   ratios P and Q, erf/erfc and erfc⁻¹. Generic over [`FloatScalar`].
//!
//! - [`traits`] — Element traits:
//!   - [`Scalar`] — numeric elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`] — real floats (`Scalar + Float`)
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Hardware FPU via system libm, `std::error::Error` impls |
//! | `libm`    | baseline | Pure-Rust software float fallback |
//! | `tracing` | yes      | `debug` events for non-converged or overflowing inversions |

#![cfg_attr(not(feature = "std"), no_std)]

pub mod inverse;
pub mod special;
pub mod traits;

pub use inverse::{lower, solve, upper, Tail};
pub use traits::{FloatScalar, Scalar};
