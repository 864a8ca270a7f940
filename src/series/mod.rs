//! Series building: reshape normalized rows into chart-ready columns.
//!
//! - `trend`: one line per `"{location} - {breakout}"`, years on the x axis
//! - `latest`: one column per location, sorted breakout labels on the x axis
//! - `pie`: one slice per breakout id for a single (state or national) location
//!
//! Every mode is a pure function of its input rows. Missing rows and null
//! values both come out as `None`.

mod latest;
mod pie;
mod trend;

pub use pie::select_location;

use crate::error::{ChartError, Result};
use crate::models::{ChartSeries, NormalizedRow, PresentationMode};
use crate::normalize::latest_year;
use log::debug;

/// Build the series for `mode`.
///
/// `reference_year` is ignored for `trend`; for `latest` and `pie` it defaults
/// to the latest year present in `rows`.
///
/// ### Errors
/// `InvalidReferenceYear` when an explicit reference year is not a positive year.
pub fn build(
    rows: &[NormalizedRow],
    mode: PresentationMode,
    reference_year: Option<i32>,
) -> Result<ChartSeries> {
    if let Some(y) = reference_year
        && y <= 0
    {
        return Err(ChartError::InvalidReferenceYear(y));
    }
    if rows.is_empty() {
        return Ok(ChartSeries::empty());
    }

    let series = match mode {
        PresentationMode::Trend => trend::build(rows),
        PresentationMode::Latest => latest::build(rows, resolve_year(rows, reference_year)),
        PresentationMode::Pie => pie::build(rows, resolve_year(rows, reference_year)),
    };
    Ok(series)
}

/// Builder-style entry point for callers that assemble the request piecemeal.
#[derive(Debug, Clone, Copy)]
pub struct SeriesBuilder {
    mode: PresentationMode,
    reference_year: Option<i32>,
}

impl SeriesBuilder {
    pub fn new(mode: PresentationMode) -> Self {
        Self {
            mode,
            reference_year: None,
        }
    }

    pub fn reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn build(&self, rows: &[NormalizedRow]) -> Result<ChartSeries> {
        build(rows, self.mode, self.reference_year)
    }
}

fn resolve_year(rows: &[NormalizedRow], reference_year: Option<i32>) -> i32 {
    match reference_year {
        Some(y) => y,
        None => {
            // rows is non-empty here
            let y = latest_year(rows).unwrap_or_default();
            debug!("no reference year given, using latest year {y}");
            y
        }
    }
}

/// First row of `rows` observed in `year`.
fn row_for_year<'a>(rows: &[&'a NormalizedRow], year: i32) -> Option<&'a NormalizedRow> {
    rows.iter().copied().find(|r| r.year == year)
}
