use healthdash::models::{NormalizedRow, RawRow, WindowConfig};
use healthdash::normalize::{latest_year, normalize, recent_window};

fn raw(location: &str, year: &str, value: &str) -> RawRow {
    RawRow {
        location: location.into(),
        location_abbreviation: "XX".into(),
        breakout: "Overall".into(),
        breakout_id: "OVR".into(),
        year: year.into(),
        value: value.into(),
        low_confidence_limit: String::new(),
        high_confidence_limit: String::new(),
        value_type: "Crude Prevalence".into(),
        value_unit: "%".into(),
        ..RawRow::default()
    }
}

fn assert_clean(rows: &[NormalizedRow]) {
    for r in rows {
        for v in [r.value, r.low_confidence_limit, r.high_confidence_limit]
            .into_iter()
            .flatten()
        {
            assert!(v.is_finite(), "non-finite value in {r:?}");
            let tenths = v * 10.0;
            assert!((tenths - tenths.round()).abs() < 1e-6, "not one decimal: {v}");
        }
    }
}

#[test]
fn rounding_ties_go_away_from_zero() {
    let rows = normalize(&[
        raw("A", "2014", "12.345"),
        raw("A", "2015", "12.35"),
        raw("A", "2016", "-12.35"),
        raw("A", "2017", "0.25"),
    ]);
    let values: Vec<_> = rows.iter().map(|r| r.value).collect();
    assert_eq!(values, vec![Some(12.3), Some(12.4), Some(-12.4), Some(0.3)]);
}

#[test]
fn junk_measures_become_none_never_nan() {
    let mut junk = raw("A", "2014", "NaN");
    junk.low_confidence_limit = "  ".into();
    junk.high_confidence_limit = "n/a".into();
    let rows = normalize(&[junk, raw("A", "2015", "Infinity"), raw("A", "2016", "")]);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.value.is_none()));
    assert!(rows[0].low_confidence_limit.is_none());
    assert!(rows[0].high_confidence_limit.is_none());
    assert_clean(&rows);
}

#[test]
fn zero_is_a_measurement() {
    let rows = normalize(&[raw("A", "2014", "0"), raw("A", "2015", "0.0")]);
    assert_eq!(rows[0].value, Some(0.0));
    assert_eq!(rows[1].value, Some(0.0));
}

#[test]
fn bad_years_are_dropped_and_order_kept() {
    let rows = normalize(&[
        raw("C", "2016", "3"),
        raw("X", "", "9"),
        raw("A", "2014", "1"),
        raw("Y", "twenty", "9"),
        raw("B", "2015", "2"),
    ]);
    let locs: Vec<&str> = rows.iter().map(|r| r.location.as_str()).collect();
    assert_eq!(locs, ["C", "A", "B"]);
    assert_eq!(rows[0].year, 2016);
}

#[test]
fn normalizing_twice_is_a_no_op() {
    let mut first = raw("A", "2014", "12.35");
    first.low_confidence_limit = "10.04".into();
    first.high_confidence_limit = "14.96".into();
    let once = normalize(&[first, raw("B", "2015", ""), raw("C", "2016", "-0.05")]);
    assert_clean(&once);

    let restated: Vec<RawRow> = once.iter().map(RawRow::from).collect();
    let twice = normalize(&restated);
    assert_eq!(once, twice);
}

#[test]
fn window_keeps_trailing_years() {
    let rows = normalize(&[
        raw("A", "2010", "1"),
        raw("A", "2012", "2"),
        raw("A", "2013", "3"),
        raw("A", "2014", "4"),
    ]);
    let latest = latest_year(&rows).unwrap();
    assert_eq!(latest, 2014);

    let window = WindowConfig { data_points: 3 };
    assert_eq!(window.from_year(latest), 2012);
    let kept = recent_window(&rows, latest, window);
    let years: Vec<i32> = kept.iter().map(|r| r.year).collect();
    assert_eq!(years, [2012, 2013, 2014]);

    assert_eq!(WindowConfig::default().data_points, 10);
    assert_eq!(latest_year(&[]), None);
}

#[test]
fn oversized_window_keeps_every_row() {
    let rows = normalize(&[raw("A", "1990", "1"), raw("A", "2014", "2")]);

    let huge = WindowConfig { data_points: u32::MAX };
    assert_eq!(huge.from_year(2014), i32::MIN);
    assert_eq!(recent_window(&rows, 2014, huge).len(), 2);

    let wide = WindowConfig { data_points: 3_000_000_000 };
    assert_eq!(recent_window(&rows, 2014, wide).len(), 2);

    let past_range = WindowConfig { data_points: 100 };
    assert_eq!(past_range.from_year(2014), 1915);
    assert_eq!(recent_window(&rows, 2014, past_range).len(), 2);
}

#[test]
fn window_near_the_smallest_year_does_not_overflow() {
    let window = WindowConfig::default();
    assert_eq!(window.from_year(i32::MIN), i32::MIN);
    assert_eq!(window.from_year(i32::MIN + 5), i32::MIN);
    assert!(recent_window(&[], i32::MIN, window).is_empty());
}

#[test]
fn huge_finite_values_pass_through() {
    let rows = normalize(&[raw("A", "2014", "1.7e308"), raw("A", "2015", "-2.5e15")]);
    assert_eq!(rows[0].value, Some(1.7e308));
    assert_eq!(rows[1].value, Some(-2.5e15));
}
