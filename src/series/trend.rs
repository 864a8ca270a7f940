use crate::models::{Bounds, Category, ChartSeries, Column, NormalizedRow, PresentationMode, SeriesMeta};
use indexmap::IndexMap;
use std::collections::{BTreeMap, BTreeSet};

pub(super) fn build(rows: &[NormalizedRow]) -> ChartSeries {
    // Group by "{location} - {breakout}", first-seen order, then index by year.
    let mut groups: IndexMap<String, BTreeMap<i32, &NormalizedRow>> = IndexMap::new();
    for r in rows {
        groups
            .entry(r.series_label())
            .or_default()
            .entry(r.year)
            // duplicate (group, year) rows: first one wins
            .or_insert(r);
    }

    let years: Vec<i32> = rows
        .iter()
        .map(|r| r.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut columns = Vec::with_capacity(groups.len());
    let mut limits = IndexMap::with_capacity(groups.len());
    for (label, by_year) in &groups {
        let values = years
            .iter()
            .map(|y| by_year.get(y).and_then(|r| r.value))
            .collect();
        let bounds = years
            .iter()
            .map(|y| by_year.get(y).map(|r| r.bounds()).unwrap_or_default())
            .collect::<Vec<Bounds>>();
        columns.push(Column {
            label: label.clone(),
            values,
        });
        limits.insert(label.clone(), bounds);
    }

    ChartSeries {
        columns,
        categories: years.into_iter().map(Category::Year).collect(),
        limits: Some(limits),
        meta: Some(SeriesMeta {
            mode: PresentationMode::Trend,
            value_type: rows[0].value_type.clone(),
            unit: rows[0].value_unit.clone(),
            reference_year: None,
        }),
    }
}
