//! # Finec Ext ISS
//!
//! Curve parameter sources for the Moscow Exchange G-curve:
//!
//! - [`IssCurveSource`]: live data from the ISS `zcyc` endpoint
//! - [`JsonFileCurveSource`]: saved ISS responses or plain parameter records
//!
//! Both implement [`finec_curves::CurveParameterSource`], so either can be
//! handed to [`finec_curves::YieldCurveEvaluator::fetch`].

#![warn(missing_docs)]
#![warn(clippy::all)]

mod file;
mod http;
pub mod payload;

pub use file::JsonFileCurveSource;
pub use http::{IssCurveSource, ZCYC_ENDPOINT};
pub use payload::{parse_zcyc_payload, parse_zcyc_value};
