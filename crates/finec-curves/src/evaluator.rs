//! G-curve evaluation over a single parameter snapshot.

use log::debug;

use crate::error::{CurveError, CurveResult};
use crate::gcurve;
use crate::parameters::CurveParameters;
use crate::source::{parse_trade_date, CurveParameterSource};

/// Evaluates the exchange zero-coupon yield curve for one parameter snapshot.
///
/// The evaluator is a pure function of its parameters: it holds no other
/// state, never touches the network after construction and returns
/// bit-identical results for identical inputs.
///
/// # Example
///
/// ```rust
/// use finec_curves::{CurveParameters, YieldCurveEvaluator};
///
/// let params = CurveParameters::new(
///     [1054.712544, -259.871694, -358.166406],
///     0.9689,
///     [-0.059222, 3.069814, -2.954618, -3.687879, 8.935729, 0.733885, 0.658087, 0.0, 0.0],
/// )
/// .unwrap();
///
/// let curve = YieldCurveEvaluator::new(params);
/// let one_year = curve.rate(1.0).unwrap();
/// assert_eq!((one_year * 100.0).round() / 100.0, 830.24);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YieldCurveEvaluator {
    parameters: CurveParameters,
}

impl YieldCurveEvaluator {
    /// Wraps an already-fetched parameter snapshot.
    pub fn new(parameters: CurveParameters) -> Self {
        Self { parameters }
    }

    /// Fetches the parameters for `date` from `source` and wraps the most
    /// recent snapshot.
    ///
    /// # Errors
    ///
    /// See [`fetch_parameters`].
    pub fn fetch<S>(source: &S, date: &str) -> CurveResult<Self>
    where
        S: CurveParameterSource + ?Sized,
    {
        fetch_parameters(source, date).map(Self::new)
    }

    /// The wrapped snapshot.
    pub fn parameters(&self) -> &CurveParameters {
        &self.parameters
    }

    /// Annually compounded zero-coupon yield at maturity `t` years, in basis
    /// points (830.24 means 8.3024 % p.a.).
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidArgument`] unless `t` is finite and
    /// strictly positive.
    pub fn rate(&self, t: f64) -> CurveResult<f64> {
        validate_maturity(t)?;
        Ok(gcurve::annual_yield(&self.parameters, t))
    }

    /// [`rate`](Self::rate) expressed in percent.
    pub fn rate_percent(&self, t: f64) -> CurveResult<f64> {
        self.rate(t).map(|y| y / 100.0)
    }

    /// Continuously compounded yield `G(t)` in basis points.
    pub fn continuous_rate(&self, t: f64) -> CurveResult<f64> {
        validate_maturity(t)?;
        Ok(gcurve::continuous_yield(&self.parameters, t))
    }

    /// Discount factor `exp(-G(t) * t)` with `G` converted from basis points.
    pub fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        let g = self.continuous_rate(t)?;
        Ok((-g / 10_000.0 * t).exp())
    }

    /// [`rate`](Self::rate) over a set of maturities.
    ///
    /// Stops at the first invalid maturity.
    pub fn rates(&self, maturities: &[f64]) -> CurveResult<Vec<f64>> {
        maturities.iter().map(|&t| self.rate(t)).collect()
    }
}

impl From<CurveParameters> for YieldCurveEvaluator {
    fn from(parameters: CurveParameters) -> Self {
        Self::new(parameters)
    }
}

/// Fetches the snapshots for `date` (`YYYY-MM-DD`) and returns the last one,
/// i.e. the most recent intraday estimate.
///
/// # Errors
///
/// - [`CurveError::InvalidArgument`] if `date` does not parse.
/// - [`CurveError::NotFound`] if the source has no snapshot for the date.
/// - Any error raised by the source, unchanged.
pub fn fetch_parameters<S>(source: &S, date: &str) -> CurveResult<CurveParameters>
where
    S: CurveParameterSource + ?Sized,
{
    let trade_date = parse_trade_date(date)?;
    let snapshots = source.fetch(trade_date)?;
    debug!(
        "{} returned {} snapshot(s) for {}",
        source.describe(),
        snapshots.len(),
        trade_date
    );

    snapshots
        .last()
        .copied()
        .ok_or_else(|| CurveError::not_found(trade_date))
}

/// Yield at maturity `t` on `date`, in basis points.
///
/// Shorthand for [`YieldCurveEvaluator::fetch`] followed by
/// [`YieldCurveEvaluator::rate`].
pub fn yield_curve<S>(source: &S, date: &str, t: f64) -> CurveResult<f64>
where
    S: CurveParameterSource + ?Sized,
{
    YieldCurveEvaluator::fetch(source, date)?.rate(t)
}

fn validate_maturity(t: f64) -> CurveResult<()> {
    if !t.is_finite() || t <= 0.0 {
        return Err(CurveError::invalid_argument(format!(
            "maturity must be a positive number of years, got {t}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcurve::TERM_COUNT;
    use crate::source::StaticCurveSource;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn flat(level: f64) -> CurveParameters {
        CurveParameters::new([level, 0.0, 0.0], 1.0, [0.0; TERM_COUNT]).unwrap()
    }

    #[test]
    fn test_rate_rejects_non_positive() {
        let curve = YieldCurveEvaluator::new(flat(800.0));
        for t in [0.0, -0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(
                matches!(curve.rate(t), Err(CurveError::InvalidArgument { .. })),
                "t = {t}"
            );
        }
    }

    #[test]
    fn test_derived_accessors() {
        let curve = YieldCurveEvaluator::new(flat(800.0));
        let y = curve.rate(2.0).unwrap();

        assert_relative_eq!(curve.rate_percent(2.0).unwrap(), y / 100.0);
        assert_relative_eq!(curve.continuous_rate(2.0).unwrap(), 800.0);
        assert_relative_eq!(curve.discount_factor(2.0).unwrap(), (-0.16_f64).exp());
        // Both compounding conventions give the same discount factor.
        assert_relative_eq!(
            curve.discount_factor(2.0).unwrap(),
            (1.0 + y / 10_000.0).powf(-2.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_rates_stops_on_invalid() {
        let curve = YieldCurveEvaluator::new(flat(800.0));
        assert_eq!(curve.rates(&[1.0, 2.0]).unwrap().len(), 2);
        assert!(curve.rates(&[1.0, 0.0, 2.0]).is_err());
    }

    #[test]
    fn test_fetch_takes_last_snapshot() {
        let date = NaiveDate::from_ymd_opt(2022, 9, 28).unwrap();
        let source = StaticCurveSource::new().with_snapshots(date, [flat(700.0), flat(800.0)]);

        let curve = YieldCurveEvaluator::fetch(&source, "2022-09-28").unwrap();
        assert_eq!(curve.parameters().b1(), 800.0);
    }

    #[test]
    fn test_fetch_missing_date() {
        let source = StaticCurveSource::new();
        let err = fetch_parameters(&source, "2022-10-01").unwrap_err();
        assert_eq!(err, CurveError::not_found("2022-10-01"));
    }

    #[test]
    fn test_fetch_bad_date() {
        let source = StaticCurveSource::new();
        assert!(matches!(
            fetch_parameters(&source, "01/10/2022"),
            Err(CurveError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_source_errors_propagate() {
        struct Down;
        impl CurveParameterSource for Down {
            fn fetch(&self, _date: NaiveDate) -> CurveResult<Vec<CurveParameters>> {
                Err(CurveError::source_unavailable("connection refused"))
            }
        }

        let err = yield_curve(&Down, "2022-09-28", 1.0).unwrap_err();
        assert_eq!(err, CurveError::source_unavailable("connection refused"));
    }

    #[test]
    fn test_dyn_source() {
        let date = NaiveDate::from_ymd_opt(2022, 9, 28).unwrap();
        let source: Box<dyn CurveParameterSource> =
            Box::new(StaticCurveSource::new().with_snapshots(date, [flat(800.0)]));
        assert!(yield_curve(source.as_ref(), "2022-09-28", 1.0).is_ok());
    }
}
