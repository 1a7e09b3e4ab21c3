//! File-backed curve parameters.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use dashmap::DashMap;
use serde_json::Value;

use finec_curves::{CurveError, CurveParameterSource, CurveParameters, CurveResult};

use crate::payload::{is_zcyc_payload, parse_zcyc_rows};

/// JSON file source for offline use and tests.
///
/// Accepts either a saved ISS `zcyc` response (table or extended form) or a
/// plain list of parameter records:
///
/// ```json
/// [{"tradedate": "2022-09-28", "tradetime": "18:39:57",
///   "b1": 1054.712544, "b2": -259.871694, "b3": -358.166406, "t1": 0.9689,
///   "g1": -0.059222, "g2": 3.069814, "g3": -2.954618, "g4": -3.687879,
///   "g5": 8.935729, "g6": 0.733885, "g7": 0.658087, "g8": 0, "g9": 0}]
/// ```
///
/// Every record must carry a `tradedate`. The file is read on construction
/// and again on [`reload`](Self::reload).
#[derive(Debug)]
pub struct JsonFileCurveSource {
    file_path: PathBuf,
    snapshots: DashMap<NaiveDate, Vec<CurveParameters>>,
}

impl JsonFileCurveSource {
    /// Opens and decodes `file_path`.
    ///
    /// # Errors
    ///
    /// [`CurveError::SourceUnavailable`] if the file cannot be read or decoded.
    pub fn new(file_path: impl AsRef<Path>) -> CurveResult<Self> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            snapshots: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Path the source reads from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Re-reads the file, replacing everything held in memory.
    pub fn reload(&self) -> CurveResult<()> {
        let content = std::fs::read_to_string(&self.file_path).map_err(|e| {
            CurveError::source_unavailable(format!("{}: {e}", self.file_path.display()))
        })?;
        let records = decode_records(&content).map_err(|e| match e {
            CurveError::SourceUnavailable { reason } => CurveError::source_unavailable(format!(
                "{}: {reason}",
                self.file_path.display()
            )),
            other => other,
        })?;

        let mut by_date: BTreeMap<NaiveDate, Vec<CurveParameters>> = BTreeMap::new();
        for params in records {
            let date = params.tradedate().ok_or_else(|| {
                CurveError::source_unavailable(format!(
                    "{}: record without tradedate",
                    self.file_path.display()
                ))
            })?;
            by_date.entry(date).or_default().push(params);
        }

        // Never clear: a concurrent fetch must not see a date still in the
        // file as empty.
        self.snapshots.retain(|date, _| by_date.contains_key(date));
        for (date, mut day) in by_date {
            day.sort_by_key(CurveParameters::tradetime);
            self.snapshots.insert(date, day);
        }

        log::debug!(
            "loaded {} trading day(s) from {}",
            self.snapshots.len(),
            self.file_path.display()
        );
        Ok(())
    }

    /// Dates present in the file, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.snapshots.iter().map(|e| *e.key()).collect();
        dates.sort_unstable();
        dates
    }
}

fn decode_records(content: &str) -> CurveResult<Vec<CurveParameters>> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| CurveError::source_unavailable(format!("invalid JSON: {e}")))?;

    if is_zcyc_payload(&value) {
        return parse_zcyc_rows(&value);
    }
    serde_json::from_value(value)
        .map_err(|e| CurveError::source_unavailable(format!("bad parameter records: {e}")))
}

impl CurveParameterSource for JsonFileCurveSource {
    fn fetch(&self, date: NaiveDate) -> CurveResult<Vec<CurveParameters>> {
        Ok(self
            .snapshots
            .get(&date)
            .map(|v| v.clone())
            .unwrap_or_default())
    }

    fn describe(&self) -> String {
        format!("file {}", self.file_path.display())
    }
}
