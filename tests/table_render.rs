use healthdash::models::{NormalizedRow, PresentationMode};
use healthdash::series;
use healthdash::table::{DataTable, MISSING};

fn nr(location: &str, breakout: &str, year: i32, v: Option<f64>) -> NormalizedRow {
    NormalizedRow {
        location: location.into(),
        location_abbreviation: "XX".into(),
        breakout: breakout.into(),
        breakout_id: breakout.to_ascii_uppercase(),
        year,
        value: v,
        low_confidence_limit: v.map(|x| x - 2.0),
        high_confidence_limit: None,
        value_type: "Crude Prevalence".into(),
        value_unit: "%".into(),
        topic: "Obesity".into(),
        question: "Obesity among adults".into(),
    }
}

#[test]
fn series_table_restates_columns() {
    let rows = vec![
        nr("Texas", "Male", 2014, Some(31.5)),
        nr("Texas", "Female", 2014, Some(0.0)),
        nr("Ohio", "Male", 2014, None),
    ];
    let s = series::build(&rows, PresentationMode::Latest, None).unwrap();
    let t = DataTable::from_series(&s, "Location");

    assert_eq!(t.header, ["Location", "Female", "Male"]);
    assert_eq!(t.rows.len(), 2);
    assert_eq!(t.rows[0].header, "Texas");
    assert_eq!(t.rows[0].cells, ["0", "31.5"]);
    assert_eq!(t.rows[1].header, "Ohio");
    assert_eq!(t.rows[1].cells, [MISSING, MISSING]);
    assert_eq!(t.caption, ["Crude Prevalence (in year 2014)"]);
    assert!(t.summary.starts_with("This table displays Crude Prevalence (in year 2014)."));
}

#[test]
fn trend_table_has_year_headers() {
    let rows = vec![
        nr("Texas", "Male", 2013, Some(30.0)),
        nr("Texas", "Male", 2014, Some(31.5)),
    ];
    let s = series::build(&rows, PresentationMode::Trend, None).unwrap();
    let t = DataTable::from_series(&s, "Series");
    assert_eq!(t.header, ["Series", "2013", "2014"]);
    assert_eq!(t.to_records()[1], ["Texas - Male", "30", "31.5"]);
}

#[test]
fn empty_series_gives_empty_table() {
    let s = series::build(&[], PresentationMode::Pie, None).unwrap();
    let t = DataTable::from_series(&s, "Breakout");
    assert!(t.is_empty());
    assert!(t.header.is_empty());
    assert!(DataTable::from_rows(&[], None).is_empty());
}

#[test]
fn row_table_lists_observations_with_units() {
    let rows = vec![
        nr("Texas", "Male", 2013, Some(30.0)),
        nr("Texas", "Male", 2014, Some(31.5)),
        nr("", "Female", 2014, None),
    ];
    let all = DataTable::from_rows(&rows, None);
    assert_eq!(
        all.header,
        [
            "Year",
            "Location",
            "Breakout",
            "Value (%)",
            "Low Confidence Limit (%)",
            "High Confidence Limit (%)"
        ]
    );
    assert_eq!(all.rows.len(), 3);
    assert_eq!(all.rows[0].header, "2013");
    assert_eq!(all.rows[0].cells, ["Texas", "Male", "30", "28", MISSING]);
    assert_eq!(all.rows[2].cells[0], MISSING);
    assert_eq!(all.caption, ["Obesity", "Obesity among adults", "Crude Prevalence"]);
    assert!(all.summary.contains("year, location and breakout categories"));

    let latest = DataTable::from_rows(&rows, Some(2014));
    assert_eq!(latest.rows.len(), 2);
    assert!(latest.rows.iter().all(|r| r.header == "2014"));
}

#[test]
fn headers_drop_unit_when_blank() {
    let mut r = nr("Texas", "Male", 2014, Some(1.0));
    r.value_unit = String::new();
    let t = DataTable::from_rows(&[r], None);
    assert_eq!(t.header[3], "Value");
}
