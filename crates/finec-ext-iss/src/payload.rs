//! Decoding of ISS `zcyc` responses.
//!
//! ISS answers in one of two JSON shapes. The default "table" shape:
//!
//! ```json
//! {"params": {"columns": ["tradedate", "tradetime", "B1", ...],
//!             "data": [["2022-09-28", "18:39:57", 1054.71, ...]]}}
//! ```
//!
//! and the `iss.json=extended` shape, a list of blocks holding row objects:
//!
//! ```json
//! [{"charsetinfo": {"name": "utf-8"}},
//!  {"params": [{"tradedate": "2022-09-28", "b1": 1054.71, ...}]}]
//! ```
//!
//! Both are reduced to row objects with lower-case keys before being handed
//! to serde.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use finec_curves::{CurveError, CurveParameters, CurveResult};

/// Name of the ISS block carrying the curve coefficients.
pub const PARAMS_BLOCK: &str = "params";

/// Decodes a raw response body.
pub fn parse_zcyc_payload(body: &str, date: NaiveDate) -> CurveResult<Vec<CurveParameters>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| CurveError::source_unavailable(format!("malformed ISS payload: {e}")))?;
    parse_zcyc_value(&value, date)
}

/// Decodes an already-parsed response.
///
/// Rows stamped with a different `tradedate` are discarded: ISS answers a
/// non-trading day with the last curve before it. Survivors are returned in
/// `tradetime` order.
pub fn parse_zcyc_value(value: &Value, date: NaiveDate) -> CurveResult<Vec<CurveParameters>> {
    let mut snapshots: Vec<CurveParameters> = parse_zcyc_rows(value)?
        .into_iter()
        .enumerate()
        .filter_map(|(index, params)| match params.tradedate() {
            Some(d) if d != date => {
                log::warn!("dropping {PARAMS_BLOCK} row {index}: published for {d}, requested {date}");
                None
            }
            _ => Some(params),
        })
        .collect();

    snapshots.sort_by_key(CurveParameters::tradetime);
    Ok(snapshots)
}

/// Decodes every row of the `params` block, in payload order.
pub fn parse_zcyc_rows(value: &Value) -> CurveResult<Vec<CurveParameters>> {
    block_rows(value, PARAMS_BLOCK)?
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            serde_json::from_value(Value::Object(row)).map_err(|e| {
                CurveError::source_unavailable(format!("bad {PARAMS_BLOCK} row {index}: {e}"))
            })
        })
        .collect()
}

/// True if `value` looks like an ISS response carrying a `params` block.
pub fn is_zcyc_payload(value: &Value) -> bool {
    match value {
        Value::Object(blocks) => blocks.contains_key(PARAMS_BLOCK),
        Value::Array(blocks) => blocks.iter().any(|b| b.get(PARAMS_BLOCK).is_some()),
        _ => false,
    }
}

/// Extracts a named block as row objects with lower-cased keys.
fn block_rows(value: &Value, block: &str) -> CurveResult<Vec<Map<String, Value>>> {
    match value {
        Value::Object(blocks) => {
            let table = blocks.get(block).ok_or_else(|| missing_block(block))?;
            table_rows(table, block)
        }
        Value::Array(blocks) => {
            let rows = blocks
                .iter()
                .find_map(|b| b.get(block))
                .and_then(Value::as_array)
                .ok_or_else(|| missing_block(block))?;
            rows.iter()
                .map(|row| {
                    row.as_object()
                        .map(lowercase_keys)
                        .ok_or_else(|| malformed(block, "row is not an object"))
                })
                .collect()
        }
        _ => Err(malformed(block, "top level is neither an object nor a list")),
    }
}

fn table_rows(table: &Value, block: &str) -> CurveResult<Vec<Map<String, Value>>> {
    let columns: Vec<String> = table
        .get("columns")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed(block, "missing columns"))?
        .iter()
        .map(|c| {
            c.as_str()
                .map(str::to_lowercase)
                .ok_or_else(|| malformed(block, "column name is not a string"))
        })
        .collect::<CurveResult<_>>()?;

    let data = table
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed(block, "missing data"))?;

    data.iter()
        .map(|row| {
            let cells = row
                .as_array()
                .ok_or_else(|| malformed(block, "row is not a list"))?;
            if cells.len() != columns.len() {
                return Err(malformed(
                    block,
                    &format!("row has {} cells for {} columns", cells.len(), columns.len()),
                ));
            }
            Ok(columns.iter().cloned().zip(cells.iter().cloned()).collect())
        })
        .collect()
}

fn lowercase_keys(row: &Map<String, Value>) -> Map<String, Value> {
    row.iter()
        .map(|(k, v)| (k.to_lowercase(), v.clone()))
        .collect()
}

fn missing_block(block: &str) -> CurveError {
    CurveError::source_unavailable(format!("ISS payload has no '{block}' block"))
}

fn malformed(block: &str, what: &str) -> CurveError {
    CurveError::source_unavailable(format!("malformed ISS '{block}' block: {what}"))
}
