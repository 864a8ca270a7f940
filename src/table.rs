//! Accessible table projections of chart data.
//!
//! Screen readers get the same numbers as the chart: either restated from a
//! `ChartSeries` (one row per column) or listed row by row from the
//! normalized observations. Missing values read as `N/A`; zero is a value.

use crate::models::{ChartSeries, NormalizedRow};
use serde::{Deserialize, Serialize};

pub const MISSING: &str = "N/A";

/// One body row: a row-header cell followed by data cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub header: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    /// Caption lines (topic, question, value type).
    pub caption: Vec<String>,
    pub summary: String,
    pub header: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// Render an optional measurement as a table cell.
pub fn format_cell(v: Option<f64>) -> String {
    match v {
        Some(x) => x.to_string(),
        None => MISSING.to_string(),
    }
}

fn text_cell(s: &str) -> String {
    if s.is_empty() {
        MISSING.to_string()
    } else {
        s.to_string()
    }
}

fn with_unit(header: &str, unit: &str) -> String {
    if unit.is_empty() {
        header.to_string()
    } else {
        format!("{header} ({unit})")
    }
}

fn summary_for(caption: &[String], body: &str) -> String {
    let content = caption
        .iter()
        .filter(|c| !c.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ");
    [
        format!("This table displays {content}."),
        "The columns in the header row show labels of data values shown in the table.".to_string(),
        format!("The table contains rows of data values for {body}."),
    ]
    .join(" ")
}

impl DataTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Restate a series as a table: header = `dimension_label` + categories,
    /// one row per column.
    pub fn from_series(series: &ChartSeries, dimension_label: &str) -> Self {
        if series.is_empty() {
            return Self::default();
        }
        let mut header = Vec::with_capacity(series.categories.len() + 1);
        header.push(dimension_label.to_string());
        header.extend(series.categories.iter().map(ToString::to_string));

        let rows = series
            .columns
            .iter()
            .map(|c| TableRow {
                header: c.label.clone(),
                cells: c.values.iter().copied().map(format_cell).collect(),
            })
            .collect();

        let caption = series
            .meta
            .as_ref()
            .map(|m| vec![m.axis_label()])
            .unwrap_or_default();
        let summary = summary_for(&caption, &dimension_label.to_lowercase());
        Self {
            caption,
            summary,
            header,
            rows,
        }
    }

    /// List observations as Year / Location / Breakout / Value / limits.
    ///
    /// `only_year` keeps a single year (single-year charts); the caption always
    /// comes from the first input row.
    pub fn from_rows(rows: &[NormalizedRow], only_year: Option<i32>) -> Self {
        let Some(first) = rows.first() else {
            return Self::default();
        };
        let shown: Vec<&NormalizedRow> = rows
            .iter()
            .filter(|r| only_year.is_none_or(|y| r.year == y))
            .collect();
        let unit = shown.first().map(|r| r.value_unit.as_str()).unwrap_or("");

        let header = vec![
            "Year".to_string(),
            "Location".to_string(),
            "Breakout".to_string(),
            with_unit("Value", unit),
            with_unit("Low Confidence Limit", unit),
            with_unit("High Confidence Limit", unit),
        ];

        let body = shown
            .iter()
            .map(|r| TableRow {
                header: r.year.to_string(),
                cells: vec![
                    text_cell(&r.location),
                    text_cell(&r.breakout),
                    format_cell(r.value),
                    format_cell(r.low_confidence_limit),
                    format_cell(r.high_confidence_limit),
                ],
            })
            .collect();

        let caption = vec![
            first.topic.clone(),
            first.question.clone(),
            first.value_type.clone(),
        ];
        let summary = summary_for(&caption, "year, location and breakout categories");
        Self {
            caption,
            summary,
            header,
            rows: body,
        }
    }

    /// Header followed by body rows, each flattened to plain cells.
    pub fn to_records(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(self.header.clone());
        for r in &self.rows {
            let mut rec = Vec::with_capacity(r.cells.len() + 1);
            rec.push(r.header.clone());
            rec.extend(r.cells.iter().cloned());
            out.push(rec);
        }
        out
    }
}
