use std::collections::BTreeMap;

use polars::prelude::*;

use crate::error::{DashboardError, Result};
use crate::schema::{MONTH, YEAR};
use crate::severity::{severity_values, Severity};

/// Accidents per calendar year, ascending. Requires an enriched table.
pub fn counts_by_year(df: &DataFrame) -> Result<BTreeMap<i32, u64>> {
    count_derived(df, YEAR)
}

/// Accidents per calendar month (1-12). Requires an enriched table.
pub fn counts_by_month(df: &DataFrame) -> Result<BTreeMap<u32, u64>> {
    let by_month = count_derived(df, MONTH)?;
    let mut counts = BTreeMap::new();
    for (month, count) in by_month {
        let month = u32::try_from(month)
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| DashboardError::Processing(format!("month value {month} out of range")))?;
        counts.insert(month, count);
    }
    Ok(counts)
}

/// Accidents per distinct severity. Empty cells are counted under [`Severity::Unspecified`].
pub fn counts_by_severity(df: &DataFrame) -> Result<BTreeMap<Severity, u64>> {
    let mut counts = BTreeMap::new();
    for severity in severity_values(df)? {
        *counts.entry(severity).or_insert(0) += 1;
    }
    Ok(counts)
}

fn count_derived(df: &DataFrame, column: &str) -> Result<BTreeMap<i32, u64>> {
    let values = df.column(column)?.i32()?;
    let mut counts = BTreeMap::new();
    for (row, value) in values.into_iter().enumerate() {
        let value = value.ok_or_else(|| {
            DashboardError::Processing(format!("{column} missing in row {row}; was the table enriched?"))
        })?;
        *counts.entry(value).or_insert(0) += 1;
    }
    Ok(counts)
}
