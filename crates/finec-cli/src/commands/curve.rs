//! Curve command implementation.
//!
//! Fetches the G-curve parameters for a trading date and evaluates yields.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use finec_curves::source::DATE_FORMAT;
use finec_curves::{parse_trade_date, CurveError, CurveParameters, YieldCurveEvaluator};

use crate::cli::OutputFormat;
use crate::commands::{open_source, parse_maturities, tenor_grid};
use crate::output::{format_bps, print_header, print_json, print_minimal, print_output};

/// Arguments for the curve command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    #[command(subcommand)]
    pub command: CurveCommand,
}

/// Curve subcommands.
#[derive(Subcommand, Debug)]
pub enum CurveCommand {
    /// Yield at one or more maturities
    Rate(RateArgs),

    /// Show the published curve parameters
    Params(ParamsArgs),

    /// Tabulate the curve over a tenor grid
    Show(ShowArgs),
}

/// Where to read parameters from, shared by every curve subcommand.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Trading date (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub date: Option<String>,

    /// Read parameters from a JSON file instead of the ISS
    #[arg(short, long, value_name = "FILE")]
    pub params_file: Option<PathBuf>,
}

/// Arguments for the rate subcommand.
#[derive(Args, Debug)]
pub struct RateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Maturities in years (comma-separated, e.g. "0.5,1,5")
    #[arg(short, long)]
    pub maturity: String,
}

/// Arguments for the params subcommand.
#[derive(Args, Debug)]
pub struct ParamsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Show every intraday snapshot, not just the last
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Number of points to display
    #[arg(long, default_value = "20")]
    pub points: usize,

    /// Longest maturity in years
    #[arg(long, default_value = "30")]
    pub max_tenor: f64,
}

/// One evaluated point of the curve.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CurvePoint {
    #[tabled(rename = "Maturity (Y)")]
    pub maturity: f64,
    #[tabled(rename = "Yield (bp)", display_with = "fixed2")]
    pub yield_bp: f64,
    #[tabled(rename = "Yield (%)", display_with = "fixed4")]
    pub yield_percent: f64,
    #[tabled(rename = "Continuous (bp)", display_with = "fixed2")]
    pub continuous_bp: f64,
    #[tabled(rename = "Discount Factor", display_with = "fixed6")]
    pub discount_factor: f64,
}

impl CurvePoint {
    fn evaluate(curve: &YieldCurveEvaluator, t: f64) -> Result<Self, CurveError> {
        Ok(Self {
            maturity: t,
            yield_bp: curve.rate(t)?,
            yield_percent: curve.rate_percent(t)?,
            continuous_bp: curve.continuous_rate(t)?,
            discount_factor: curve.discount_factor(t)?,
        })
    }
}

fn fixed2(v: &f64) -> String {
    format!("{v:.2}")
}

fn fixed4(v: &f64) -> String {
    format!("{v:.4}")
}

fn fixed6(v: &f64) -> String {
    format!("{v:.6}")
}

/// One snapshot as a table row.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct SnapshotRow {
    #[tabled(rename = "Time")]
    pub tradetime: String,
    #[tabled(rename = "B1")]
    pub b1: f64,
    #[tabled(rename = "B2")]
    pub b2: f64,
    #[tabled(rename = "B3")]
    pub b3: f64,
    #[tabled(rename = "T1")]
    pub t1: f64,
    #[tabled(rename = "G1")]
    pub g1: f64,
    #[tabled(rename = "G2")]
    pub g2: f64,
    #[tabled(rename = "G3")]
    pub g3: f64,
    #[tabled(rename = "G4")]
    pub g4: f64,
    #[tabled(rename = "G5")]
    pub g5: f64,
    #[tabled(rename = "G6")]
    pub g6: f64,
    #[tabled(rename = "G7")]
    pub g7: f64,
    #[tabled(rename = "G8")]
    pub g8: f64,
    #[tabled(rename = "G9")]
    pub g9: f64,
}

impl From<&CurveParameters> for SnapshotRow {
    fn from(p: &CurveParameters) -> Self {
        let [g1, g2, g3, g4, g5, g6, g7, g8, g9] = *p.spline_weights();
        Self {
            tradetime: p
                .tradetime()
                .map_or_else(|| "-".to_string(), |t| t.to_string()),
            b1: p.b1(),
            b2: p.b2(),
            b3: p.b3(),
            t1: p.t1(),
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

/// Execute the curve command.
pub fn execute(args: CurveArgs, format: OutputFormat, config: Option<&Path>) -> Result<()> {
    match args.command {
        CurveCommand::Rate(rate_args) => execute_rate(rate_args, format, config),
        CurveCommand::Params(params_args) => execute_params(params_args, format, config),
        CurveCommand::Show(show_args) => execute_show(show_args, format, config),
    }
}

/// Execute the rate subcommand.
fn execute_rate(args: RateArgs, format: OutputFormat, config: Option<&Path>) -> Result<()> {
    let maturities = parse_maturities(&args.maturity)?;
    let (date, curve) = load_curve(&args.source, config)?;

    let points = maturities
        .iter()
        .map(|&t| CurvePoint::evaluate(&curve, t))
        .collect::<Result<Vec<_>, _>>()?;

    match format {
        OutputFormat::Table => {
            print_header(&format!("G-curve {date}"));
            if let [only] = points.as_slice() {
                println!("{:.2}Y: {}", only.maturity, format_bps(only.yield_bp));
            } else {
                print_output(&points, format)?;
            }
        }
        OutputFormat::Minimal => {
            for point in &points {
                println!("{:.2}", point.yield_bp);
            }
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&points, format)?,
    }

    Ok(())
}

/// Execute the params subcommand.
fn execute_params(args: ParamsArgs, format: OutputFormat, config: Option<&Path>) -> Result<()> {
    let snapshots = if args.all {
        let date = resolve_date(args.source.date.as_deref())?;
        let source = open_source(args.source.params_file.as_deref(), config)?;
        let all = source.fetch(date)?;
        if all.is_empty() {
            return Err(CurveError::not_found(date).into());
        }
        all
    } else {
        let (_, curve) = load_curve(&args.source, config)?;
        vec![*curve.parameters()]
    };

    match format {
        OutputFormat::Json => print_json(&snapshots)?,
        OutputFormat::Minimal => print_minimal(&snapshots)?,
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<SnapshotRow> = snapshots.iter().map(SnapshotRow::from).collect();
            if format == OutputFormat::Table {
                let date = snapshots
                    .first()
                    .and_then(CurveParameters::tradedate)
                    .map(|d| d.to_string())
                    .unwrap_or_default();
                print_header(&format!("G-curve parameters {date}"));
            }
            print_output(&rows, format)?;
        }
    }

    Ok(())
}

/// Execute the show subcommand.
fn execute_show(args: ShowArgs, format: OutputFormat, config: Option<&Path>) -> Result<()> {
    let grid = tenor_grid(args.max_tenor, args.points)?;
    let (date, curve) = load_curve(&args.source, config)?;

    let points = grid
        .iter()
        .map(|&t| CurvePoint::evaluate(&curve, t))
        .collect::<Result<Vec<_>, _>>()?;

    match format {
        OutputFormat::Table => {
            print_header("G-curve");
            println!("Trading Date: {date}");
            if let Some(time) = curve.parameters().tradetime() {
                println!("Snapshot: {time}");
            }
            println!();
            print_output(&points, format)?;
        }
        OutputFormat::Minimal => {
            for point in &points {
                println!("{:.4} {:.2}", point.maturity, point.yield_bp);
            }
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&points, format)?,
    }

    Ok(())
}

/// Moscow time, in which ISS trading dates are stamped.
const MOSCOW_UTC_OFFSET_SECS: i32 = 3 * 3600;

/// Resolves the trading date, defaulting to today in Moscow.
fn resolve_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => Ok(parse_trade_date(s)?),
        None => Ok(moscow_date(Utc::now())),
    }
}

fn moscow_date(now: DateTime<Utc>) -> NaiveDate {
    FixedOffset::east_opt(MOSCOW_UTC_OFFSET_SECS)
        .map_or_else(|| now.date_naive(), |msk| now.with_timezone(&msk).date_naive())
}

/// Opens the source and fetches the last snapshot for the date.
fn load_curve(args: &SourceArgs, config: Option<&Path>) -> Result<(NaiveDate, YieldCurveEvaluator)> {
    let date = resolve_date(args.date.as_deref())?;
    let source = open_source(args.params_file.as_deref(), config)?;
    let curve = YieldCurveEvaluator::fetch(source.as_ref(), &date.format(DATE_FORMAT).to_string())?;
    Ok((date, curve))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_curve() -> YieldCurveEvaluator {
        YieldCurveEvaluator::new(
            CurveParameters::new(
                [1054.712544, -259.871694, -358.166406],
                0.9689,
                [-0.059222, 3.069814, -2.954618, -3.687879, 8.935729, 0.733885, 0.658087, 0.0, 0.0],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_curve_point() {
        let point = CurvePoint::evaluate(&reference_curve(), 1.0).unwrap();
        assert_eq!(fixed2(&point.yield_bp), "830.24");
        assert_eq!(fixed4(&point.yield_percent), "8.3024");
        assert!(point.continuous_bp < point.yield_bp);
        assert!(point.discount_factor > 0.9 && point.discount_factor < 1.0);
    }

    #[test]
    fn test_snapshot_row() {
        let row = SnapshotRow::from(reference_curve().parameters());
        assert_eq!(row.tradetime, "-");
        assert_eq!(row.g2, 3.069814);
        assert_eq!(row.g9, 0.0);
    }

    #[test]
    fn test_resolve_date() {
        assert_eq!(
            resolve_date(Some("2022-09-28")).unwrap(),
            NaiveDate::from_ymd_opt(2022, 9, 28).unwrap()
        );
        assert!(resolve_date(Some("yesterday")).is_err());
        assert!(resolve_date(None).is_ok());
    }

    #[test]
    fn test_default_date_is_moscow_day() {
        let late_utc = DateTime::parse_from_rfc3339("2022-09-27T22:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(moscow_date(late_utc), NaiveDate::from_ymd_opt(2022, 9, 28).unwrap());

        let early_utc = DateTime::parse_from_rfc3339("2022-09-28T20:59:59Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(moscow_date(early_utc), NaiveDate::from_ymd_opt(2022, 9, 28).unwrap());
    }
}
