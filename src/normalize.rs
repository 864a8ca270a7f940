//! Row normalization: turn all-string API rows into typed observations.
//!
//! - `year` must parse as an integer, otherwise the row is dropped
//! - `value` and both confidence limits become `Option<f64>`, rounded to one decimal
//! - empty, whitespace-only, non-numeric and non-finite inputs become `None`

use crate::models::{NormalizedRow, RawRow, WindowConfig};
use log::debug;

/// Normalize a batch of raw rows, keeping input order.
pub fn normalize(raw_rows: &[RawRow]) -> Vec<NormalizedRow> {
    let out: Vec<NormalizedRow> = raw_rows.iter().filter_map(normalize_row).collect();
    if out.len() < raw_rows.len() {
        debug!(
            "dropped {} of {} rows with an unparseable year",
            raw_rows.len() - out.len(),
            raw_rows.len()
        );
    }
    out
}

/// Normalize one row; `None` when its year cannot be parsed.
pub fn normalize_row(raw: &RawRow) -> Option<NormalizedRow> {
    let year = parse_year(&raw.year)?;
    Some(NormalizedRow {
        location: raw.location.clone(),
        location_abbreviation: raw.location_abbreviation.clone(),
        breakout: raw.breakout.clone(),
        breakout_id: raw.breakout_id.clone(),
        year,
        value: parse_measure(&raw.value),
        low_confidence_limit: parse_measure(&raw.low_confidence_limit),
        high_confidence_limit: parse_measure(&raw.high_confidence_limit),
        value_type: raw.value_type.clone(),
        value_unit: raw.value_unit.clone(),
        topic: raw.topic.clone(),
        question: raw.question.clone(),
    })
}

/// Parse a year such as `"2014"`.
pub fn parse_year(s: &str) -> Option<i32> {
    s.trim().parse::<i32>().ok()
}

/// Parse a measurement and round it to one decimal.
pub fn parse_measure(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let v = s.parse::<f64>().ok()?;
    if !v.is_finite() {
        return None;
    }
    round1(v)
}

/// Round half away from zero at one decimal.
///
/// The shift is done on the shortest decimal representation of `v`, so `12.35`
/// rounds to `12.4` even though its binary value is slightly below the tie.
pub fn round1(v: f64) -> Option<f64> {
    if !v.is_finite() {
        return None;
    }
    // no fractional digits left at this magnitude
    if v.abs() >= 1e15 {
        return Some(v);
    }
    let shifted: f64 = format!("{v}e1").parse().ok()?;
    let rounded = shifted.round();
    let back: f64 = format!("{rounded}e-1").parse().ok()?;
    // -0.04 rounds to -0; report it as plain zero
    let back = if back == 0.0 { 0.0 } else { back };
    back.is_finite().then_some(back)
}

/// Latest year present in `rows`.
pub fn latest_year(rows: &[NormalizedRow]) -> Option<i32> {
    rows.iter().map(|r| r.year).max()
}

/// Keep the rows of the trailing `window.data_points` years ending at `latest_year`.
pub fn recent_window(
    rows: &[NormalizedRow],
    latest_year: i32,
    window: WindowConfig,
) -> Vec<NormalizedRow> {
    let from = window.from_year(latest_year);
    rows.iter()
        .filter(|r| r.year >= from && r.year <= latest_year)
        .cloned()
        .collect()
}
