//! healthdash
//!
//! A lightweight Rust library for reshaping public-health survey rows (as served
//! by a tabular-data API) into chart-ready series and accessible tables. Pairs
//! with the `healthdash` CLI.
//!
//! ### Features
//! - Normalize all-string API rows into typed observations (one decimal, no NaN)
//! - Three presentation modes: `trend`, `latest`, `pie`
//! - Confidence bounds aligned with every series
//! - Table projections for screen readers, grouped summary statistics, map values
//!
//! ### Example
//! ```no_run
//! use healthdash::{PresentationMode, normalize, series};
//!
//! let raw = healthdash::storage::load_rows_json("rows.json")?;
//! let rows = normalize::normalize(&raw);
//! let chart = series::build(&rows, PresentationMode::Latest, None)?;
//! let table = healthdash::table::DataTable::from_series(&chart, "Location");
//! println!("{}", chart.title("Obesity among adults"));
//! # let _ = table;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod choropleth;
pub mod error;
pub mod models;
pub mod normalize;
pub mod series;
pub mod stats;
pub mod storage;
pub mod table;

pub use error::ChartError;
pub use models::{
    Bounds, Category, ChartConfig, ChartKind, ChartSeries, Column, NormalizedRow,
    PresentationMode, RawRow, SeriesMeta, WindowConfig,
};
pub use series::SeriesBuilder;
