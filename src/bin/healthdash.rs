use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use healthdash::models::{ChartConfig, ChartKind, WindowConfig};
use healthdash::table::{DataTable, format_cell};
use healthdash::{normalize, series, stats, storage};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "healthdash",
    version,
    about = "Reshape public-health survey rows into chart series & accessible tables"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a chart series from exported rows (and optionally save a table and print stats).
    Chart(ChartArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Bar,
    Column,
    Line,
    Pie,
}

impl From<KindArg> for ChartKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Bar => ChartKind::Bar,
            KindArg::Column => ChartKind::Column,
            KindArg::Line => ChartKind::Line,
            KindArg::Pie => ChartKind::Pie,
        }
    }
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Rows exported from the data API (.json array or .csv with header).
    #[arg(short, long)]
    input: PathBuf,
    /// Chart type; pie charts always use the pie presentation.
    #[arg(long = "chart-type", value_enum, default_value = "column")]
    chart_type: KindArg,
    /// Presentation for non-pie charts: trend or latest (default trend).
    #[arg(long)]
    data: Option<String>,
    /// Reference year for latest/pie (default: latest year in the data).
    #[arg(short, long)]
    year: Option<i32>,
    /// Keep only the trailing N years of data.
    #[arg(long)]
    window: Option<u32>,
    /// Chart title used for the heading line.
    #[arg(long)]
    title: Option<String>,
    /// Save the series as JSON instead of printing it.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Save an accessible table of the series as CSV.
    #[arg(long)]
    table: Option<PathBuf>,
    /// Print grouped statistics to stderr.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

/// Stats render like table cells: one decimal, `N/A` when missing.
fn fmt_opt(v: Option<f64>) -> String {
    format_cell(v.and_then(normalize::round1))
}

fn load_rows(path: &Path) -> Result<Vec<healthdash::RawRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("json")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => storage::load_rows_csv(path),
        _ => storage::load_rows_json(path),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Chart(args) => cmd_chart(args),
    }
}

fn cmd_chart(args: ChartArgs) -> Result<()> {
    let config = ChartConfig {
        kind: args.chart_type.into(),
        data: args.data.clone(),
        title: args.title.clone(),
        footnote: None,
    };
    let mode = config.presentation_mode()?;

    let raw = load_rows(&args.input)?;
    let mut rows = normalize::normalize(&raw);
    log::info!("loaded {} rows ({} usable)", raw.len(), rows.len());

    if let (Some(n), Some(latest)) = (args.window, normalize::latest_year(&rows)) {
        rows = normalize::recent_window(&rows, latest, WindowConfig { data_points: n });
    }

    let chart = series::build(&rows, mode, args.year).context("build series")?;
    if chart.is_empty() {
        eprintln!("No data available");
    } else if let Some(title) = config.title.as_deref() {
        eprintln!("{}", chart.title(title));
    }

    match args.out.as_ref() {
        Some(path) => {
            storage::save_series_json(&chart, path)?;
            eprintln!("Saved {} series to {}", chart.columns.len(), path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&chart)?),
    }

    if let Some(path) = args.table.as_ref() {
        let dimension = match mode {
            healthdash::PresentationMode::Trend => "Series",
            healthdash::PresentationMode::Latest => "Location",
            healthdash::PresentationMode::Pie => "Breakout",
        };
        storage::save_table_csv(&DataTable::from_series(&chart, dimension), path)?;
        eprintln!("Wrote table to {}", path.display());
    }

    if args.stats {
        for s in stats::grouped_summary(&rows) {
            eprintln!(
                "{} • {}  count={} missing={}  min={} max={} mean={} median={}",
                s.key.location,
                s.key.breakout,
                s.count,
                s.missing,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }

    Ok(())
}
