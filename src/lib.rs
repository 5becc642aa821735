#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(missing_docs)]
//! Library entry for linear supply and demand.
//!
//! This crate models straight-line demand and supply curves in price-quantity
//! space, shifts them, solves for equilibria and surplus, and draws the
//! textbook diagrams.
//!
//! # Modules
//! - [`curves`]: Curve kernel, points and market roles
//! - [`error`]: Kernel error taxonomy
//! - [`surplus`]: Consumer/producer surplus and market welfare
//! - [`verifier`]: Analytic vs numeric checks
//! - [`plot`]: Diagrams on plotters charts and PNG output

/// Linear curves, points and market roles
pub mod curves;

/// Errors raised by the curve kernel
pub mod error;

/// Consumer and producer surplus
pub mod surplus;

/// Verification tools for equilibrium and surplus accuracy
pub mod verifier;

/// Supply/demand diagrams
pub mod plot;

pub use curves::{Curve, MarketCurve, Point, Role};
pub use error::{CurveError, CurveResult};
