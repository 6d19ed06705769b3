//! # incbeta
//!
//! Regularized incomplete beta function Ix(a, b) to near machine precision,
//! no-std compatible. Suitable for statistical distribution code (binomial,
//! F, Student-t CDFs) on embedded targets: no heap allocation, generic over
//! `f32` and `f64`.
//!
//! ## Quick start
//!
//! ```
//! use incbeta::special::{beta_inc, betainc};
//!
//! // Ix(a, b) together with its complement
//! let (w, w1) = beta_inc(20.0_f64, 10.0, 0.8, 0.2).unwrap();
//! assert!((w - 0.9507365).abs() < 1e-7);
//! assert!((w + w1 - 1.0).abs() < 1e-15);
//!
//! // Lower tail only, y = 1 − x implied
//! let p = betainc(2.0_f64, 2.0, 0.3).unwrap(); // 3x² − 2x³
//! assert!((p - 0.216).abs() < 1e-14);
//! ```
//!
//! ## Modules
//!
//! - [`special`]: The incomplete beta function and the kernels it is built
//!   on: log-gamma and its corrections, log-beta, ln(1+x), erf/erfc and
//!   digamma. [`special::classify`] exposes the evaluation regime chosen for
//!   an input and [`special::validate`] the argument checks.
//!
//! - [`traits`]: [`FloatScalar`], the float trait every function is generic
//!   over.
//!
//! ## Cargo features
//!
//! | Feature | Default  | Description |
//! |---------|----------|-------------|
//! | `std`   | yes      | Hardware FPU via system libm |
//! | `libm`  | baseline | Pure-Rust software float fallback |
//!
//! Evaluation events are reported through `tracing`: the chosen regime at
//! `TRACE`, continued fraction retries at `DEBUG` and unrecoverable
//! convergence failures at `WARN`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("incbeta needs either the `std` or the `libm` feature for float math");

pub mod special;
pub mod traits;

pub use traits::FloatScalar;
