use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DashboardError, Result};
use crate::schema::{DATE, MONTH, YEAR};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

// NaiveDate::num_days_from_ce() of 1970-01-01; polars stores Date as days since the epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// What enrichment does with a `Date` cell it cannot read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateErrorPolicy {
    /// Fail the whole table on the first bad value.
    #[default]
    Reject,
    /// Drop rows whose date cannot be read and keep going.
    DropRows,
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Re-types `Date` as a calendar date and appends `Year` and `Month`, one value per row.
///
/// Under [`DateErrorPolicy::Reject`] a single unreadable or empty date fails the call and no
/// frame is returned. Under [`DateErrorPolicy::DropRows`] those rows are left out instead, so
/// every row of the result still carries a date, a year and a month. The input is not touched.
pub fn enrich_dates(df: &DataFrame, policy: DateErrorPolicy) -> Result<DataFrame> {
    let column = df.column(DATE)?;
    let text = match column.dtype() {
        DataType::String => column.clone(),
        _ => column.cast(&DataType::String)?,
    };
    let values = text.str()?;

    let mut dates = Vec::with_capacity(df.height());
    let mut keep = Vec::with_capacity(df.height());
    let mut rejected = 0usize;

    for (row, value) in values.into_iter().enumerate() {
        match value.and_then(parse_date) {
            Some(date) => {
                dates.push(date);
                keep.push(true);
            }
            None => match policy {
                DateErrorPolicy::Reject => {
                    return Err(DashboardError::DateParse {
                        row,
                        value: value.unwrap_or_default().to_string(),
                    });
                }
                DateErrorPolicy::DropRows => {
                    keep.push(false);
                    rejected += 1;
                }
            },
        }
    }

    let mut output = if rejected > 0 {
        warn!(rejected, kept = dates.len(), "dropping rows with unreadable dates");
        df.filter(&BooleanChunked::new("keep".into(), keep))?
    } else {
        df.clone()
    };

    let days: Vec<i32> = dates
        .iter()
        .map(|date| date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
        .collect();
    let years: Vec<i32> = dates.iter().map(|date| date.year()).collect();
    let months: Vec<i32> = dates.iter().map(|date| date.month() as i32).collect();

    let date_series = Series::new(DATE.into(), days).cast(&DataType::Date)?;
    output.with_column(date_series)?;
    output.with_column(Series::new(YEAR.into(), years))?;
    output.with_column(Series::new(MONTH.into(), months))?;

    debug!(rows = output.height(), "derived Year and Month columns");
    Ok(output)
}
