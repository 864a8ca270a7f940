use crate::models::{ChartSeries, NormalizedRow};
use crate::normalize::round1;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grouping key used in stats: one location × breakout series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub location: String,
    pub breakout: String,
}

/// Summary statistics for a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub key: GroupKey,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Compute grouped statistics by (location, breakout), sorted by key.
pub fn grouped_summary(rows: &[NormalizedRow]) -> Vec<Summary> {
    let mut groups: BTreeMap<GroupKey, (Vec<f64>, usize)> = BTreeMap::new();
    for r in rows {
        let key = GroupKey {
            location: r.location.clone(),
            breakout: r.breakout.clone(),
        };
        let entry = groups.entry(key).or_default();
        match r.value {
            Some(v) => entry.0.push(v),
            None => entry.1 += 1,
        }
    }

    let mut out = Vec::with_capacity(groups.len());
    for (key, (mut vals, missing)) in groups {
        vals.sort_by(f64::total_cmp);
        let count = vals.len();
        let min = vals.first().copied();
        let max = vals.last().copied();
        let mean = (count > 0).then(|| vals.iter().sum::<f64>() / count as f64);
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2])
        } else {
            Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
        };
        out.push(Summary {
            key,
            count,
            missing,
            min,
            max,
            mean,
            median,
        });
    }
    out
}

/// Each pie slice as a percentage of the non-null total, rounded to one decimal.
///
/// Reads the first value of every column, so it suits `pie` series.
pub fn pie_shares(series: &ChartSeries) -> Vec<(String, Option<f64>)> {
    let first = |i: usize| series.columns[i].values.first().copied().flatten();
    let total: f64 = (0..series.columns.len()).filter_map(first).sum();
    series
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let share = match first(i) {
                Some(v) if total != 0.0 => round1(v / total * 100.0),
                _ => None,
            };
            (c.label.clone(), share)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Column;

    fn pie(values: &[(&str, Option<f64>)]) -> ChartSeries {
        ChartSeries {
            columns: values
                .iter()
                .map(|(l, v)| Column {
                    label: l.to_string(),
                    values: vec![*v],
                })
                .collect(),
            ..ChartSeries::default()
        }
    }

    #[test]
    fn shares_skip_null_slices() {
        let s = pie(&[("A", Some(30.0)), ("B", None), ("C", Some(10.0))]);
        let got = pie_shares(&s);
        assert_eq!(got[0], ("A".to_string(), Some(75.0)));
        assert_eq!(got[1], ("B".to_string(), None));
        assert_eq!(got[2], ("C".to_string(), Some(25.0)));
    }

    #[test]
    fn shares_of_zero_total_are_none() {
        let s = pie(&[("A", Some(0.0)), ("B", Some(0.0))]);
        assert!(pie_shares(&s).iter().all(|(_, v)| v.is_none()));
    }
}
