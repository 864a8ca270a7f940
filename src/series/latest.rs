use super::row_for_year;
use crate::models::{Bounds, Category, ChartSeries, Column, NormalizedRow, PresentationMode, SeriesMeta};
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap};

pub(super) fn build(rows: &[NormalizedRow], year: i32) -> ChartSeries {
    let categories: Vec<String> = rows
        .iter()
        .map(|r| r.breakout.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    // location -> breakout -> rows, locations in first-seen order
    let mut by_location: IndexMap<&str, HashMap<&str, Vec<&NormalizedRow>>> = IndexMap::new();
    for r in rows {
        by_location
            .entry(r.location.as_str())
            .or_default()
            .entry(r.breakout.as_str())
            .or_default()
            .push(r);
    }

    let mut columns = Vec::with_capacity(by_location.len());
    let mut limits = IndexMap::with_capacity(by_location.len());
    for (location, by_breakout) in &by_location {
        let picked: Vec<Option<&NormalizedRow>> = categories
            .iter()
            .map(|b| {
                by_breakout
                    .get(b.as_str())
                    .and_then(|group| row_for_year(group, year))
            })
            .collect();
        columns.push(Column {
            label: location.to_string(),
            values: picked.iter().map(|r| r.and_then(|r| r.value)).collect(),
        });
        limits.insert(
            location.to_string(),
            picked
                .iter()
                .map(|r| r.map(NormalizedRow::bounds).unwrap_or_default())
                .collect::<Vec<Bounds>>(),
        );
    }

    ChartSeries {
        columns,
        categories: categories.into_iter().map(Category::Label).collect(),
        limits: Some(limits),
        meta: Some(SeriesMeta {
            mode: PresentationMode::Latest,
            value_type: rows[0].value_type.clone(),
            unit: rows[0].value_unit.clone(),
            reference_year: Some(year),
        }),
    }
}
