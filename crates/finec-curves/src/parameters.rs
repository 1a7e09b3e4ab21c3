//! Exchange-published G-curve coefficients.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};
use crate::gcurve::TERM_COUNT;

/// One intraday estimate of the G-curve coefficients.
///
/// The exchange publishes several snapshots per trading day, each tagged with
/// `tradedate` and `tradetime`. The timestamp is informational only; the
/// curve depends on the coefficients alone.
///
/// Instances are immutable. The only way in is [`CurveParameters::new`] (or
/// deserialisation, which goes through the same checks), so `t1` is always
/// finite and non-zero.
///
/// # Example
///
/// ```rust
/// use finec_curves::CurveParameters;
///
/// let params = CurveParameters::new(
///     [1054.712544, -259.871694, -358.166406],
///     0.9689,
///     [-0.059222, 3.069814, -2.954618, -3.687879, 8.935729, 0.733885, 0.658087, 0.0, 0.0],
/// )
/// .unwrap();
/// assert_eq!(params.t1(), 0.9689);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParameterRecord", into = "ParameterRecord")]
pub struct CurveParameters {
    tradedate: Option<NaiveDate>,
    tradetime: Option<NaiveTime>,
    b1: f64,
    b2: f64,
    b3: f64,
    t1: f64,
    g: [f64; TERM_COUNT],
}

impl CurveParameters {
    /// Creates a parameter set from the level/slope/curvature coefficients
    /// `[b1, b2, b3]`, the decay constant `t1` and the spline weights `g1..g9`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidArgument`] if `t1` is zero or any
    /// coefficient is NaN or infinite.
    pub fn new(b: [f64; 3], t1: f64, g: [f64; TERM_COUNT]) -> CurveResult<Self> {
        let mut coefficients = b.iter().chain(g.iter()).chain(std::iter::once(&t1));
        if let Some(bad) = coefficients.find(|v| !v.is_finite()) {
            return Err(CurveError::invalid_argument(format!(
                "curve coefficients must be finite, got {bad}"
            )));
        }
        if t1 == 0.0 {
            return Err(CurveError::invalid_argument("t1 must be non-zero"));
        }

        Ok(Self {
            tradedate: None,
            tradetime: None,
            b1: b[0],
            b2: b[1],
            b3: b[2],
            t1,
            g,
        })
    }

    /// Tags the snapshot with its observation date and time.
    #[must_use]
    pub fn with_observation(mut self, date: NaiveDate, time: Option<NaiveTime>) -> Self {
        self.tradedate = Some(date);
        self.tradetime = time;
        self
    }

    /// Level coefficient.
    pub fn b1(&self) -> f64 {
        self.b1
    }

    /// Slope coefficient.
    pub fn b2(&self) -> f64 {
        self.b2
    }

    /// Curvature coefficient.
    pub fn b3(&self) -> f64 {
        self.b3
    }

    /// Decay time constant, in years.
    pub fn t1(&self) -> f64 {
        self.t1
    }

    /// Spline weights `g1..g9`.
    pub fn spline_weights(&self) -> &[f64; TERM_COUNT] {
        &self.g
    }

    /// Trading date of the snapshot, if known.
    pub fn tradedate(&self) -> Option<NaiveDate> {
        self.tradedate
    }

    /// Time of day of the snapshot, if known.
    pub fn tradetime(&self) -> Option<NaiveTime> {
        self.tradetime
    }

    /// Combined observation timestamp. Missing time counts as midnight.
    pub fn observed_at(&self) -> Option<NaiveDateTime> {
        self.tradedate
            .map(|d| d.and_time(self.tradetime.unwrap_or(NaiveTime::MIN)))
    }
}

/// Flat wire form using the exchange's field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ParameterRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tradedate: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tradetime: Option<NaiveTime>,
    b1: f64,
    b2: f64,
    b3: f64,
    t1: f64,
    g1: f64,
    g2: f64,
    g3: f64,
    g4: f64,
    g5: f64,
    g6: f64,
    g7: f64,
    g8: f64,
    g9: f64,
}

impl TryFrom<ParameterRecord> for CurveParameters {
    type Error = CurveError;

    fn try_from(r: ParameterRecord) -> CurveResult<Self> {
        let params = Self::new(
            [r.b1, r.b2, r.b3],
            r.t1,
            [r.g1, r.g2, r.g3, r.g4, r.g5, r.g6, r.g7, r.g8, r.g9],
        )?;
        Ok(Self {
            tradedate: r.tradedate,
            tradetime: r.tradetime,
            ..params
        })
    }
}

impl From<CurveParameters> for ParameterRecord {
    fn from(p: CurveParameters) -> Self {
        let [g1, g2, g3, g4, g5, g6, g7, g8, g9] = p.g;
        Self {
            tradedate: p.tradedate,
            tradetime: p.tradetime,
            b1: p.b1,
            b2: p.b2,
            b3: p.b3,
            t1: p.t1,
            g1,
            g2,
            g3,
            g4,
            g5,
            g6,
            g7,
            g8,
            g9,
        }
    }
}
