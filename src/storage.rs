use crate::models::{ChartSeries, RawRow};
use crate::table::DataTable;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Load raw rows from a JSON array as returned by the data API.
pub fn load_rows_json<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let rows: Vec<RawRow> = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse rows from {}", path.display()))?;
    Ok(rows)
}

/// Load raw rows from a CSV export with a header line.
pub fn load_rows_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let mut out = Vec::new();
    for (i, rec) in rdr.deserialize::<RawRow>().enumerate() {
        out.push(rec.with_context(|| format!("parse CSV record {}", i + 1))?);
    }
    Ok(out)
}

/// Save a chart series as pretty JSON.
pub fn save_series_json<P: AsRef<Path>>(series: &ChartSeries, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(series)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Prefix text cells that a spreadsheet would evaluate as a formula.
fn neutralize(cell: &str) -> String {
    let risky = cell.starts_with(['=', '+', '-', '@']);
    if risky && cell.parse::<f64>().is_err() {
        format!("'{cell}")
    } else {
        cell.to_string()
    }
}

/// Save a table (header + rows) as CSV.
pub fn save_table_csv<P: AsRef<Path>>(table: &DataTable, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().flexible(true).from_path(path)?;
    for rec in table.to_records() {
        wtr.write_record(rec.iter().map(|c| neutralize(c)))?;
    }
    wtr.flush()?;
    Ok(())
}
