use std::collections::BTreeMap;
use std::fmt::Display;

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use crashlens_core::geo::MapView;
use crashlens_core::{DashboardViews, Severity};
use polars::prelude::*;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
struct GroupCount<K> {
    key: K,
    count: u64,
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    source_hash: &'a str,
    row_count: usize,
    severity_options: &'a [Severity],
    selected_severity: Option<&'a Severity>,
    filtered_row_count: usize,
    accidents_by_year: Vec<GroupCount<i32>>,
    accidents_by_month: Vec<GroupCount<u32>>,
    severity_distribution: Vec<GroupCount<&'a Severity>>,
    map: &'a MapView,
    raw_preview: Value,
    filtered_preview: Value,
}

// serde_json only accepts string map keys, and a blank severity serializes as null.
fn group_counts<K: Clone>(counts: &BTreeMap<K, u64>) -> Vec<GroupCount<K>> {
    counts
        .iter()
        .map(|(key, count)| GroupCount {
            key: key.clone(),
            count: *count,
        })
        .collect()
}

fn frame_to_json(df: &DataFrame) -> Result<Value> {
    let mut buffer = Vec::new();
    let mut frame = df.clone();
    JsonWriter::new(&mut buffer)
        .with_json_format(JsonFormat::Json)
        .finish(&mut frame)?;
    Ok(serde_json::from_slice(&buffer)?)
}

pub fn json_report<'a>(source_hash: &'a str, views: &'a DashboardViews) -> Result<JsonReport<'a>> {
    Ok(JsonReport {
        source_hash,
        row_count: views.row_count,
        severity_options: &views.severity_options,
        selected_severity: views.selected_severity.as_ref(),
        filtered_row_count: views.filtered.height(),
        accidents_by_year: group_counts(&views.accidents_by_year),
        accidents_by_month: group_counts(&views.accidents_by_month),
        severity_distribution: views
            .severity_distribution
            .iter()
            .map(|(key, count)| GroupCount { key, count: *count })
            .collect(),
        map: &views.map,
        raw_preview: frame_to_json(&views.raw_preview)?,
        filtered_preview: frame_to_json(&views.filtered_preview)?,
    })
}

fn count_table<K: Display>(label: &str, counts: &BTreeMap<K, u64>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![label, "Number of Accidents"]);
    for (key, count) in counts {
        table.add_row(vec![key.to_string(), count.to_string()]);
    }
    table
}

fn map_table(map: &MapView) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Map", "Value"]);
    match map.center {
        Some(center) => {
            table.add_row(vec!["Center latitude".to_string(), format!("{:.6}", center.latitude)]);
            table.add_row(vec!["Center longitude".to_string(), format!("{:.6}", center.longitude)]);
        }
        None => {
            table.add_row(vec!["Center".to_string(), "n/a (no coordinates)".to_string()]);
        }
    }
    table.add_row(vec!["Zoom".to_string(), map.zoom.to_string()]);
    table.add_row(vec!["Hotspots".to_string(), map.hotspots.len().to_string()]);
    table
}

pub fn print_text_report(views: &DashboardViews) {
    println!("### Raw Data Preview ({} rows total)", views.row_count);
    println!("{}", views.raw_preview);

    match &views.selected_severity {
        Some(severity) => {
            println!(
                "\n### Filtered Data by Severity {severity} ({} rows)",
                views.filtered.height()
            );
            println!("{}", views.filtered_preview);
        }
        None => println!("\n### Filtered Data: no severities to select"),
    }

    println!("\n### Accident Trends Over Time");
    println!("{}", count_table("Year", &views.accidents_by_year));

    println!("\n### Accidents by Month");
    println!("{}", count_table("Month", &views.accidents_by_month));

    println!("\n### Accident Hotspot Map");
    println!("{}", map_table(&views.map));

    println!("\n### Severity Distribution");
    println!("{}", count_table("Severity Level", &views.severity_distribution));
}

#[cfg(test)]
mod tests {
    use crashlens_core::{render, DashboardConfig, RenderRequest};
    use crashlens_parser::parse_accident_csv;
    use serde_json::json;

    use super::*;

    const SCENARIO: &str = "Latitude,Longitude,Severity,Date,Time\n\
        40.0,-74.0,1,2020-01-01,08:15\n\
        41.0,-73.0,1,2020-06-15,17:40\n\
        42.0,-72.0,,2021-03-10,23:05\n";

    #[test]
    fn json_report_lists_counts_as_pairs() {
        let table = parse_accident_csv(SCENARIO).unwrap();
        let views = render(&table.df, &RenderRequest::default(), &DashboardConfig::default()).unwrap();

        let report = json_report(&table.source_hash, &views).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["row_count"], json!(3));
        assert_eq!(value["selected_severity"], json!(1));
        assert_eq!(value["filtered_row_count"], json!(2));
        assert_eq!(
            value["accidents_by_year"],
            json!([{"key": 2020, "count": 2}, {"key": 2021, "count": 1}])
        );
        assert_eq!(
            value["severity_distribution"],
            json!([{"key": null, "count": 1}, {"key": 1, "count": 2}])
        );
        assert_eq!(value["map"]["zoom"], json!(10));
        assert_eq!(value["map"]["hotspots"].as_array().unwrap().len(), 3);
        assert_eq!(value["raw_preview"].as_array().unwrap().len(), 3);
        assert_eq!(value["filtered_preview"][1]["Time"], json!("17:40"));
    }

    #[test]
    fn count_table_has_one_row_per_group() {
        let counts = BTreeMap::from([(2020, 2u64), (2021, 1u64)]);
        let table = count_table("Year", &counts);
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("2020"));
        assert!(rendered.contains("Number of Accidents"));
    }
}
