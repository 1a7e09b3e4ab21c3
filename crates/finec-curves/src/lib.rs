//! # Finec Curves
//!
//! The Moscow Exchange zero-coupon yield curve (G-curve).
//!
//! This crate provides:
//!
//! - **Parameters**: [`CurveParameters`], one intraday snapshot of the
//!   exchange-published coefficients
//! - **Formula**: the [`gcurve`] module with the fixed bump tables and the
//!   closed-form yield
//! - **Evaluator**: [`YieldCurveEvaluator`], yield/discount accessors over a
//!   snapshot
//! - **Sources**: the [`CurveParameterSource`] trait and an in-memory
//!   implementation; the ISS and file sources live in `finec-ext-iss`
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use finec_curves::prelude::*;
//!
//! let params = CurveParameters::new(
//!     [1054.712544, -259.871694, -358.166406],
//!     0.9689,
//!     [-0.059222, 3.069814, -2.954618, -3.687879, 8.935729, 0.733885, 0.658087, 0.0, 0.0],
//! )
//! .unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2022, 9, 28).unwrap();
//! let source = StaticCurveSource::new().with_snapshots(date, [params]);
//!
//! let curve = YieldCurveEvaluator::fetch(&source, "2022-09-28").unwrap();
//! let y = curve.rate(1.0).unwrap();
//! assert!((y - 830.24).abs() < 0.005);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::unreadable_literal)]

pub mod error;
pub mod evaluator;
pub mod gcurve;
pub mod parameters;
pub mod source;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::evaluator::{fetch_parameters, yield_curve, YieldCurveEvaluator};
    pub use crate::parameters::CurveParameters;
    pub use crate::source::{parse_trade_date, CurveParameterSource, StaticCurveSource};
}

pub use error::{CurveError, CurveResult};
pub use evaluator::{fetch_parameters, yield_curve, YieldCurveEvaluator};
pub use parameters::CurveParameters;
pub use source::{parse_trade_date, CurveParameterSource, StaticCurveSource};
