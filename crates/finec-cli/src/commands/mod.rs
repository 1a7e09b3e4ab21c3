//! CLI command implementations.

pub mod config;
pub mod curve;

pub use config::ConfigArgs;
pub use curve::CurveArgs;

use std::path::Path;

use finec_curves::CurveParameterSource;
use finec_ext_iss::{IssCurveSource, JsonFileCurveSource};

use crate::error::{CliError, CliResult};

/// Opens the file source if one was given, otherwise the live ISS with the
/// effective configuration.
pub fn open_source(
    params_file: Option<&Path>,
    config_path: Option<&Path>,
) -> CliResult<Box<dyn CurveParameterSource>> {
    let source: Box<dyn CurveParameterSource> = match params_file {
        Some(path) => Box::new(JsonFileCurveSource::new(path)?),
        None => {
            let config = finec_config::load_effective(config_path)?;
            Box::new(IssCurveSource::new(&config)?)
        }
    };
    tracing::debug!("using {}", source.describe());
    Ok(source)
}

/// Parses a comma-separated list of maturities in years.
pub fn parse_maturities(s: &str) -> CliResult<Vec<f64>> {
    s.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .ok()
                .filter(|t| t.is_finite() && *t > 0.0)
                .ok_or_else(|| CliError::InvalidMaturity(part.to_string()))
        })
        .collect()
}

/// Evenly spaced maturities `max/points, 2*max/points, ..., max`.
pub fn tenor_grid(max_tenor: f64, points: usize) -> CliResult<Vec<f64>> {
    if !(max_tenor.is_finite() && max_tenor > 0.0) {
        return Err(CliError::InvalidGrid(format!(
            "max tenor must be positive, got {max_tenor}"
        )));
    }
    if points == 0 {
        return Err(CliError::InvalidGrid("need at least one point".to_string()));
    }
    let step = max_tenor / points as f64;
    Ok((1..=points).map(|i| step * i as f64).collect())
}
