//! Curve parameter sources.
//!
//! A [`CurveParameterSource`] answers one question: which G-curve snapshots
//! did the exchange publish on a given trading date? Implementations live
//! here ([`StaticCurveSource`]) and in extension crates (the ISS HTTP and
//! file sources in `finec-ext-iss`).

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::{CurveError, CurveResult};
use crate::parameters::CurveParameters;

/// ISO-8601 calendar date format accepted by [`parse_trade_date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of exchange-published curve parameters.
pub trait CurveParameterSource: Send + Sync {
    /// Returns every snapshot published on `date`, oldest first.
    ///
    /// An empty vector means nothing was published for that date.
    /// Transport and payload failures are [`CurveError::SourceUnavailable`].
    fn fetch(&self, date: NaiveDate) -> CurveResult<Vec<CurveParameters>>;

    /// Short human-readable description used in log output.
    fn describe(&self) -> String {
        "curve parameter source".to_string()
    }
}

/// Parses a `YYYY-MM-DD` trading date.
///
/// # Errors
///
/// Returns [`CurveError::InvalidArgument`] for anything else.
pub fn parse_trade_date(s: &str) -> CurveResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| {
        CurveError::invalid_argument(format!("invalid date '{s}', expected YYYY-MM-DD"))
    })
}

/// In-memory source keyed by trading date.
///
/// Useful for tests and for callers that already hold parameter sets.
#[derive(Debug, Clone, Default)]
pub struct StaticCurveSource {
    snapshots: BTreeMap<NaiveDate, Vec<CurveParameters>>,
}

impl StaticCurveSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot for `date`. Snapshots are kept in insertion order.
    pub fn insert(&mut self, date: NaiveDate, params: CurveParameters) {
        self.snapshots.entry(date).or_default().push(params);
    }

    /// Builder form of [`insert`](Self::insert) for a whole day.
    #[must_use]
    pub fn with_snapshots(
        mut self,
        date: NaiveDate,
        snapshots: impl IntoIterator<Item = CurveParameters>,
    ) -> Self {
        self.snapshots.entry(date).or_default().extend(snapshots);
        self
    }

    /// Dates with at least one snapshot.
    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.snapshots.keys()
    }
}

impl CurveParameterSource for StaticCurveSource {
    fn fetch(&self, date: NaiveDate) -> CurveResult<Vec<CurveParameters>> {
        Ok(self.snapshots.get(&date).cloned().unwrap_or_default())
    }

    fn describe(&self) -> String {
        format!("static source ({} dates)", self.snapshots.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcurve::TERM_COUNT;

    fn params(level: f64) -> CurveParameters {
        CurveParameters::new([level, 0.0, 0.0], 1.0, [0.0; TERM_COUNT]).unwrap()
    }

    #[test]
    fn test_parse_trade_date() {
        assert_eq!(
            parse_trade_date("2022-09-28").unwrap(),
            NaiveDate::from_ymd_opt(2022, 9, 28).unwrap()
        );
        assert_eq!(
            parse_trade_date(" 2022-09-28 ").unwrap(),
            NaiveDate::from_ymd_opt(2022, 9, 28).unwrap()
        );
    }

    #[test]
    fn test_parse_trade_date_rejects_garbage() {
        for bad in ["", "28.09.2022", "2022-13-01", "2022-02-30", "yesterday"] {
            let err = parse_trade_date(bad).unwrap_err();
            assert!(matches!(err, CurveError::InvalidArgument { .. }), "{bad}");
        }
    }

    #[test]
    fn test_static_source_keeps_order() {
        let date = NaiveDate::from_ymd_opt(2022, 9, 28).unwrap();
        let mut source = StaticCurveSource::new();
        source.insert(date, params(1.0));
        source.insert(date, params(2.0));

        let fetched = source.fetch(date).unwrap();
        assert_eq!(fetched.len(), 2);
        assert_eq!(fetched[0].b1(), 1.0);
        assert_eq!(fetched[1].b1(), 2.0);
    }

    #[test]
    fn test_static_source_unknown_date_is_empty() {
        let date = NaiveDate::from_ymd_opt(2022, 9, 28).unwrap();
        let other = NaiveDate::from_ymd_opt(2022, 10, 1).unwrap();
        let source = StaticCurveSource::new().with_snapshots(date, [params(1.0)]);

        assert!(source.fetch(other).unwrap().is_empty());
        assert_eq!(source.dates().count(), 1);
    }
}
