//! Integration test: the G-curve published for September 28, 2022.
//!
//! Snapshot of 18:39:57 as returned by the exchange:
//!
//! | Coefficient | Value        |
//! |-------------|--------------|
//! | b1          | 1054.712544  |
//! | b2          | -259.871694  |
//! | b3          | -358.166406  |
//! | t1          | 0.9689       |
//! | g1..g4      | -0.059222, 3.069814, -2.954618, -3.687879 |
//! | g5..g9      | 8.935729, 0.733885, 0.658087, 0, 0        |
//!
//! The exchange quotes the 1Y point at 830.24 bp.

use approx::assert_relative_eq;
use chrono::{NaiveDate, NaiveTime};
use finec_curves::prelude::*;
use proptest::prelude::*;

fn reference_parameters() -> CurveParameters {
    CurveParameters::new(
        [1054.712544, -259.871694, -358.166406],
        0.9689,
        [
            -0.059222, 3.069814, -2.954618, -3.687879, 8.935729, 0.733885, 0.658087, 0.0, 0.0,
        ],
    )
    .unwrap()
    .with_observation(
        NaiveDate::from_ymd_opt(2022, 9, 28).unwrap(),
        NaiveTime::from_hms_opt(18, 39, 57),
    )
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[test]
fn test_one_year_matches_exchange() {
    let curve = YieldCurveEvaluator::new(reference_parameters());
    assert_eq!(round2(curve.rate(1.0).unwrap()), 830.24);
}

#[test]
fn test_curve_shape() {
    let curve = YieldCurveEvaluator::new(reference_parameters());

    // Values computed independently from the published formula.
    let expected = [
        (0.25, 820.445128571865),
        (0.5, 819.3741057839899),
        (1.0, 830.2383903307176),
        (2.0, 873.6927589848764),
        (5.0, 991.1572918392153),
        (10.0, 1050.0884885938633),
        (30.0, 1090.2820218364395),
    ];

    for (t, y) in expected {
        assert_relative_eq!(curve.rate(t).unwrap(), y, epsilon = 1e-6);
    }
}

#[test]
fn test_fetch_then_rate() {
    let date = NaiveDate::from_ymd_opt(2022, 9, 28).unwrap();
    let stale = CurveParameters::new([900.0, 0.0, 0.0], 1.0, [0.0; 9]).unwrap();
    let source = StaticCurveSource::new().with_snapshots(date, [stale, reference_parameters()]);

    let y = yield_curve(&source, "2022-09-28", 1.0).unwrap();
    assert_eq!(round2(y), 830.24);
}

#[test]
fn test_missing_date_is_not_found() {
    let date = NaiveDate::from_ymd_opt(2022, 9, 28).unwrap();
    let source = StaticCurveSource::new().with_snapshots(date, [reference_parameters()]);

    // Saturday: nothing published, nothing substituted.
    let err = YieldCurveEvaluator::fetch(&source, "2022-10-01").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_non_positive_maturity() {
    let curve = YieldCurveEvaluator::new(reference_parameters());
    assert!(matches!(curve.rate(0.0), Err(CurveError::InvalidArgument { .. })));
    assert!(matches!(curve.rate(-0.5), Err(CurveError::InvalidArgument { .. })));
}

proptest! {
    #[test]
    fn prop_rate_is_deterministic(t in 0.01f64..30.0) {
        let curve = YieldCurveEvaluator::new(reference_parameters());
        let first = curve.rate(t).unwrap();
        let second = curve.rate(t).unwrap();
        prop_assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn prop_rate_is_continuous(t in 0.01f64..30.0) {
        let curve = YieldCurveEvaluator::new(reference_parameters());
        let y = curve.rate(t).unwrap();

        // Slope stays well under 1000 bp per year on (0, 30].
        for eps in [1e-2, 1e-4, 1e-6, 1e-8] {
            let diff = (curve.rate(t + eps).unwrap() - y).abs();
            prop_assert!(diff <= 1e3 * eps + 1e-9, "eps {} diff {}", eps, diff);
        }
    }

    #[test]
    fn prop_rate_rejects_non_positive(t in -30.0f64..=0.0) {
        let curve = YieldCurveEvaluator::new(reference_parameters());
        prop_assert!(curve.rate(t).is_err());
    }

    #[test]
    fn prop_discount_factor_in_unit_interval(t in 0.01f64..30.0) {
        let curve = YieldCurveEvaluator::new(reference_parameters());
        let df = curve.discount_factor(t).unwrap();
        prop_assert!(df > 0.0 && df < 1.0);
    }
}
