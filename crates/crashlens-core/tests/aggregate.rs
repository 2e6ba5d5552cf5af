use std::collections::BTreeMap;

use polars::df;
use polars::prelude::*;

use crashlens_core::aggregate::{counts_by_month, counts_by_severity, counts_by_year};
use crashlens_core::severity::Severity;
use crashlens_core::temporal::{enrich_dates, DateErrorPolicy};

fn enriched(severity: Column, dates: &[&str]) -> DataFrame {
    let len = dates.len();
    let df = DataFrame::new(vec![
        Series::new("Latitude".into(), vec![0.0f64; len]).into(),
        Series::new("Longitude".into(), vec![0.0f64; len]).into(),
        severity,
        Series::new("Date".into(), dates.to_vec()).into(),
        Series::new("Time".into(), vec!["00:00"; len]).into(),
    ])
    .expect("frame");
    enrich_dates(&df, DateErrorPolicy::Reject).expect("enrich")
}

#[test]
fn year_counts_cover_each_observed_year() {
    let dates = [
        "2018-05-01",
        "2020-01-01",
        "2020-06-15",
        "2018-07-04",
        "2021-03-10",
        "2020-12-31",
    ];
    let df = enriched(
        Series::new("Severity".into(), vec![1i64; dates.len()]).into(),
        &dates,
    );

    let by_year = counts_by_year(&df).unwrap();
    assert_eq!(by_year, BTreeMap::from([(2018, 2), (2020, 3), (2021, 1)]));
    assert_eq!(
        by_year.keys().copied().collect::<Vec<_>>(),
        vec![2018, 2020, 2021]
    );
    assert_eq!(by_year.values().sum::<u64>(), df.height() as u64);
}

#[test]
fn month_counts_stay_within_calendar_range() {
    let dates = ["2020-01-01", "2021-01-20", "2020-06-15", "2020-12-31"];
    let df = enriched(
        Series::new("Severity".into(), vec![1i64; dates.len()]).into(),
        &dates,
    );

    let by_month = counts_by_month(&df).unwrap();
    assert_eq!(by_month, BTreeMap::from([(1, 2), (6, 1), (12, 1)]));
    assert_eq!(by_month.values().sum::<u64>(), df.height() as u64);
}

#[test]
fn severity_counts_conserve_rows_including_blanks() {
    let dates = ["2020-01-01", "2020-01-02", "2020-01-03", "2020-01-04", "2020-01-05"];
    let severity = Series::new(
        "Severity".into(),
        [Some("Slight"), None, Some("Fatal"), Some("Slight"), Some("")],
    );
    let df = enriched(severity.into(), &dates);

    let by_severity = counts_by_severity(&df).unwrap();
    assert_eq!(
        by_severity,
        BTreeMap::from([
            (Severity::Unspecified, 2),
            (Severity::from("Fatal"), 1),
            (Severity::from("Slight"), 2),
        ])
    );
    assert_eq!(by_severity.values().sum::<u64>(), df.height() as u64);
}

#[test]
fn float_severities_are_grouped_by_text() {
    let dates = ["2020-01-01", "2020-01-02", "2020-01-03"];
    let df = enriched(
        Series::new("Severity".into(), [1.5f64, 2.0, 1.5]).into(),
        &dates,
    );

    let by_severity = counts_by_severity(&df).unwrap();
    assert_eq!(by_severity.len(), 2);
    assert_eq!(by_severity.get(&Severity::from("1.5")), Some(&2));
}

#[test]
fn empty_table_has_no_groups() {
    let df = enriched(Series::new("Severity".into(), Vec::<i64>::new()).into(), &[]);

    assert!(counts_by_year(&df).unwrap().is_empty());
    assert!(counts_by_month(&df).unwrap().is_empty());
    assert!(counts_by_severity(&df).unwrap().is_empty());
}

#[test]
fn aggregation_requires_enriched_table() {
    let df = df!(
        "Severity" => [1i64, 2],
        "Date" => ["2020-01-01", "2020-01-02"]
    )
    .unwrap();
    assert!(counts_by_year(&df).is_err());
    assert!(counts_by_month(&df).is_err());
}

#[test]
fn aggregation_leaves_input_unchanged() {
    let dates = ["2020-01-01", "2021-01-01"];
    let df = enriched(Series::new("Severity".into(), [3i64, 4]).into(), &dates);
    let before = df.clone();

    counts_by_year(&df).unwrap();
    counts_by_month(&df).unwrap();
    counts_by_severity(&df).unwrap();

    assert!(df.equals(&before));
}
