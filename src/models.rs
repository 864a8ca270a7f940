use crate::error::ChartError;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Location abbreviation used by the data API for national rows.
pub const NATIONAL_ABBR: &str = "US";

/// How a dataset is reshaped for a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    /// One line per location × breakout, years on the x axis.
    Trend,
    /// One column per location, breakouts on the x axis, at the reference year.
    Latest,
    /// One location, one slice per breakout, at the reference year.
    Pie,
}

impl PresentationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresentationMode::Trend => "trend",
            PresentationMode::Latest => "latest",
            PresentationMode::Pie => "pie",
        }
    }

    /// `latest` and `pie` slice the data down to a single year.
    pub fn requires_reference_year(&self) -> bool {
        !matches!(self, PresentationMode::Trend)
    }
}

impl fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresentationMode {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trend" => Ok(PresentationMode::Trend),
            "latest" => Ok(PresentationMode::Latest),
            "pie" => Ok(PresentationMode::Pie),
            _ => Err(ChartError::UnknownMode(s.to_string())),
        }
    }
}

/// Chart types offered by the dashboard's chart configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Column,
    Line,
    Pie,
}

impl ChartKind {
    /// Bar charts are column charts drawn with swapped axes.
    pub fn rotated(&self) -> bool {
        matches!(self, ChartKind::Bar)
    }
}

impl FromStr for ChartKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartKind::Bar),
            "column" => Ok(ChartKind::Column),
            "line" => Ok(ChartKind::Line),
            "pie" => Ok(ChartKind::Pie),
            _ => Err(ChartError::UnknownChartKind(s.to_string())),
        }
    }
}

/// One entry of the chart-configuration dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    /// `"trend"` or `"latest"`; ignored for pie charts.
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub footnote: Option<String>,
}

impl ChartConfig {
    /// Resolve the presentation mode: pie charts are always `pie`, everything
    /// else follows `data` and defaults to `trend`.
    pub fn presentation_mode(&self) -> Result<PresentationMode, ChartError> {
        if self.kind == ChartKind::Pie {
            return Ok(PresentationMode::Pie);
        }
        match self.data.as_deref() {
            None => Ok(PresentationMode::Trend),
            Some(s) if s.trim().is_empty() => Ok(PresentationMode::Trend),
            Some(s) => s.parse(),
        }
    }
}

/// How many trailing years of data a dashboard keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub data_points: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { data_points: 10 }
    }
}

impl WindowConfig {
    /// First year inside the window ending at `latest_year`.
    ///
    /// Saturates at `i32::MIN` when the window reaches past the representable years.
    pub fn from_year(&self, latest_year: i32) -> i32 {
        i32::try_from(self.data_points)
            .ok()
            .and_then(|n| latest_year.checked_sub(n))
            .map_or(i32::MIN, |y| y.saturating_add(1))
    }
}

/// Serde helper: accept a string, number, bool or null and restate it as a string.
///
/// The data API sends every field as a string, but hand-made exports and CSV
/// type inference may hand us numbers instead.
fn de_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct LenientVisitor;

    impl<'de> Visitor<'de> for LenientVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a string, number or null")
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(s.to_string())
        }

        fn visit_string<E>(self, s: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(s)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(LenientVisitor)
        }
    }

    deserializer.deserialize_any(LenientVisitor)
}

/// Serde helper: a label field that may be `null`.
fn de_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Raw row from the data API: one observation, every field a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRow {
    #[serde(default, alias = "locationdesc", deserialize_with = "de_string_or_null")]
    pub location: String,
    #[serde(default, alias = "locationabbr", deserialize_with = "de_string_or_null")]
    pub location_abbreviation: String,
    #[serde(default, alias = "break_out", deserialize_with = "de_string_or_null")]
    pub breakout: String,
    #[serde(default, alias = "breakoutid", deserialize_with = "de_string_or_null")]
    pub breakout_id: String,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub year: String,
    #[serde(default, alias = "data_value", deserialize_with = "de_lenient_string")]
    pub value: String,
    #[serde(
        default,
        alias = "low_confidence_limit",
        deserialize_with = "de_lenient_string"
    )]
    pub low_confidence_limit: String,
    #[serde(
        default,
        alias = "high_confidence_limit",
        deserialize_with = "de_lenient_string"
    )]
    pub high_confidence_limit: String,
    #[serde(default, alias = "data_value_type", deserialize_with = "de_string_or_null")]
    pub value_type: String,
    #[serde(default, alias = "data_value_unit", deserialize_with = "de_string_or_null")]
    pub value_unit: String,
    #[serde(default, deserialize_with = "de_string_or_null")]
    pub topic: String,
    #[serde(default, deserialize_with = "de_string_or_null")]
    pub question: String,
}

/// Typed observation (one row = one location × breakout × year).
///
/// Numeric fields are either a finite number rounded to one decimal or `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub location: String,
    pub location_abbreviation: String,
    pub breakout: String,
    pub breakout_id: String,
    pub year: i32,
    pub value: Option<f64>,
    pub low_confidence_limit: Option<f64>,
    pub high_confidence_limit: Option<f64>,
    pub value_type: String,
    pub value_unit: String,
    pub topic: String,
    pub question: String,
}

impl NormalizedRow {
    /// Bounds for this observation.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            high: self.high_confidence_limit,
            low: self.low_confidence_limit,
        }
    }

    /// Key used by trend mode and by grouped statistics.
    pub fn series_label(&self) -> String {
        format!("{} - {}", self.location, self.breakout)
    }
}

fn opt_to_string(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

impl From<&NormalizedRow> for RawRow {
    fn from(r: &NormalizedRow) -> Self {
        Self {
            location: r.location.clone(),
            location_abbreviation: r.location_abbreviation.clone(),
            breakout: r.breakout.clone(),
            breakout_id: r.breakout_id.clone(),
            year: r.year.to_string(),
            value: opt_to_string(r.value),
            low_confidence_limit: opt_to_string(r.low_confidence_limit),
            high_confidence_limit: opt_to_string(r.high_confidence_limit),
            value_type: r.value_type.clone(),
            value_unit: r.value_unit.clone(),
            topic: r.topic.clone(),
            question: r.question.clone(),
        }
    }
}

/// Confidence interval for one measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub high: Option<f64>,
    pub low: Option<f64>,
}

impl Bounds {
    /// `high - low` when both limits are present.
    pub fn width(&self) -> Option<f64> {
        match (self.high, self.low) {
            (Some(h), Some(l)) => Some(h - l),
            _ => None,
        }
    }
}

/// X-axis category: a year (trend, pie) or a breakout label (latest).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Year(i32),
    Label(String),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Year(y) => write!(f, "{y}"),
            Category::Label(s) => f.write_str(s),
        }
    }
}

/// One labeled column of values aligned with `ChartSeries::categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

/// Series-level metadata used for axis labels and titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesMeta {
    pub mode: PresentationMode,
    pub value_type: String,
    pub unit: String,
    /// Set for `latest` and `pie`.
    pub reference_year: Option<i32>,
}

impl SeriesMeta {
    /// Y-axis label; pie charts have no axis.
    pub fn axis_label(&self) -> String {
        match (self.mode, self.reference_year) {
            (PresentationMode::Trend, _) => self.value_type.clone(),
            (PresentationMode::Latest, Some(y)) => format!("{} (in year {y})", self.value_type),
            (PresentationMode::Latest, None) => self.value_type.clone(),
            (PresentationMode::Pie, _) => String::new(),
        }
    }
}

/// Chart-ready structure: columns aligned with a shared category axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub columns: Vec<Column>,
    pub categories: Vec<Category>,
    /// Confidence bounds keyed by column label, aligned with `categories`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<IndexMap<String, Vec<Bounds>>>,
    /// `None` only for the empty series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<SeriesMeta>,
}

impl ChartSeries {
    /// The "no data available" series.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.categories.is_empty()
    }

    pub fn column(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.label == label)
    }

    pub fn limits_for(&self, label: &str) -> Option<&[Bounds]> {
        self.limits.as_ref()?.get(label).map(Vec::as_slice)
    }

    /// Chart heading: `"{base} ({year} Data)"` for single-year views,
    /// `"{base} ({first} - {last} Data)"` for trends.
    pub fn title(&self, base: &str) -> String {
        let Some(meta) = &self.meta else {
            return base.to_string();
        };
        if let Some(y) = meta.reference_year {
            return format!("{base} ({y} Data)");
        }
        let years: Vec<i32> = self
            .categories
            .iter()
            .filter_map(|c| match c {
                Category::Year(y) => Some(*y),
                Category::Label(_) => None,
            })
            .collect();
        match (years.first(), years.last()) {
            (Some(first), Some(last)) if first != last => {
                format!("{base} ({first} - {last} Data)")
            }
            (Some(only), _) => format!("{base} ({only} Data)"),
            _ => base.to_string(),
        }
    }
}
