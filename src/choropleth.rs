use crate::models::{NATIONAL_ABBR, NormalizedRow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Value shown for one state on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    pub location: String,
    pub value: Option<f64>,
}

/// State values for a single year, keyed by location abbreviation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    pub year: i32,
    pub values: BTreeMap<String, MapValue>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Collect per-state values at `year`. National rows are skipped and the first
/// row seen for a state wins.
pub fn map_values(rows: &[NormalizedRow], year: i32) -> MapData {
    let mut values: BTreeMap<String, MapValue> = BTreeMap::new();
    for r in rows
        .iter()
        .filter(|r| r.year == year && r.location_abbreviation != NATIONAL_ABBR)
    {
        values
            .entry(r.location_abbreviation.clone())
            .or_insert_with(|| MapValue {
                location: r.location.clone(),
                value: r.value,
            });
    }

    let present = values.values().filter_map(|v| v.value);
    let (min, max) = present.fold((None, None), |(lo, hi): (Option<f64>, Option<f64>), v| {
        (
            Some(lo.map_or(v, |l| l.min(v))),
            Some(hi.map_or(v, |h| h.max(v))),
        )
    });

    MapData {
        year,
        values,
        min,
        max,
    }
}

impl MapData {
    /// Equal-interval shading class of a state in `0..classes`.
    pub fn class_of(&self, abbr: &str, classes: usize) -> Option<usize> {
        if classes == 0 {
            return None;
        }
        let v = self.values.get(abbr)?.value?;
        let (lo, hi) = (self.min?, self.max?);
        if hi <= lo {
            return Some(0);
        }
        let idx = ((v - lo) / (hi - lo) * classes as f64).floor() as usize;
        Some(idx.min(classes - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(abbr: &str, year: i32, value: Option<f64>) -> NormalizedRow {
        NormalizedRow {
            location: format!("{abbr} name"),
            location_abbreviation: abbr.into(),
            breakout: "Overall".into(),
            breakout_id: "OVR".into(),
            year,
            value,
            low_confidence_limit: None,
            high_confidence_limit: None,
            value_type: "Crude Prevalence".into(),
            value_unit: "%".into(),
            topic: String::new(),
            question: String::new(),
        }
    }

    #[test]
    fn skips_national_and_other_years() {
        let rows = vec![
            row("US", 2014, Some(20.0)),
            row("TX", 2014, Some(10.0)),
            row("CA", 2014, Some(30.0)),
            row("CA", 2013, Some(99.0)),
            row("NY", 2014, None),
        ];
        let m = map_values(&rows, 2014);
        assert_eq!(m.values.len(), 3);
        assert!(!m.values.contains_key("US"));
        assert_eq!(m.values["CA"].value, Some(30.0));
        assert_eq!(m.min, Some(10.0));
        assert_eq!(m.max, Some(30.0));
    }

    #[test]
    fn classes_cover_the_range() {
        let rows = vec![
            row("TX", 2014, Some(10.0)),
            row("CA", 2014, Some(30.0)),
            row("NY", 2014, Some(20.0)),
            row("WA", 2014, None),
        ];
        let m = map_values(&rows, 2014);
        assert_eq!(m.class_of("TX", 4), Some(0));
        assert_eq!(m.class_of("NY", 4), Some(2));
        assert_eq!(m.class_of("CA", 4), Some(3));
        assert_eq!(m.class_of("WA", 4), None);
        assert_eq!(m.class_of("TX", 0), None);
    }
}
