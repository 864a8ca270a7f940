use super::row_for_year;
use crate::models::{Category, ChartSeries, Column, NATIONAL_ABBR, NormalizedRow, PresentationMode, SeriesMeta};
use log::warn;
use std::collections::{BTreeMap, BTreeSet};

/// One pie slice before it becomes a column.
struct Slice<'a> {
    label: &'a str,
    rows: Vec<&'a NormalizedRow>,
}

/// Slices keyed by breakout id, plus the unit seen while grouping.
struct Grouped<'a> {
    slices: BTreeMap<&'a str, Slice<'a>>,
    unit: String,
}

/// Pick the location abbreviation a pie chart shows.
///
/// A state query also pulls the national rows, so when `US` and exactly one
/// other location are present the state wins. Otherwise `US` is used. Without
/// `US`, a single location is used as is and several fall back to the
/// alphabetically first abbreviation.
pub fn select_location(rows: &[NormalizedRow]) -> Option<&str> {
    let abbrs: BTreeSet<&str> = rows.iter().map(|r| r.location_abbreviation.as_str()).collect();
    let has_national = abbrs.contains(NATIONAL_ABBR);
    let others: Vec<&str> = abbrs
        .into_iter()
        .filter(|a| *a != NATIONAL_ABBR)
        .collect();

    match (has_national, others.as_slice()) {
        (true, [state]) => Some(*state),
        (true, _) => Some(NATIONAL_ABBR),
        (false, []) => None,
        (false, [only]) => Some(*only),
        (false, [first, ..]) => {
            warn!(
                "pie chart: {} locations and no national rows, using {first}",
                others.len()
            );
            Some(*first)
        }
    }
}

fn group_by_breakout<'a>(rows: impl Iterator<Item = &'a NormalizedRow>) -> Grouped<'a> {
    let mut slices: BTreeMap<&'a str, Slice<'a>> = BTreeMap::new();
    let mut unit = String::new();
    for r in rows {
        if !r.value_unit.is_empty() {
            unit = r.value_unit.clone();
        }
        slices
            .entry(r.breakout_id.as_str())
            .or_insert_with(|| Slice {
                label: r.breakout.as_str(),
                rows: Vec::new(),
            })
            .rows
            .push(r);
    }
    Grouped { slices, unit }
}

pub(super) fn build(rows: &[NormalizedRow], year: i32) -> ChartSeries {
    let Some(abbr) = select_location(rows) else {
        return ChartSeries::empty();
    };
    let selected: Vec<&NormalizedRow> = rows
        .iter()
        .filter(|r| r.location_abbreviation == abbr)
        .collect();

    let Grouped { slices, unit } = group_by_breakout(selected.iter().copied());

    // BTreeMap iteration is the id order
    let columns = slices
        .values()
        .map(|slice| Column {
            label: slice.label.to_string(),
            values: vec![row_for_year(&slice.rows, year).and_then(|r| r.value)],
        })
        .collect();

    ChartSeries {
        columns,
        categories: vec![Category::Year(year)],
        limits: None,
        meta: Some(SeriesMeta {
            mode: PresentationMode::Pie,
            value_type: selected
                .first()
                .map(|r| r.value_type.clone())
                .unwrap_or_default(),
            unit,
            reference_year: Some(year),
        }),
    }
}
