use std::collections::HashSet;

use polars::prelude::*;
use tracing::{debug, warn};

use crate::error::Result;
use crate::schema::SEVERITY;
use crate::severity::{severity_values, Severity};

/// Distinct severities in order of first appearance. This is the list a selection is drawn from.
pub fn distinct_severities(df: &DataFrame) -> Result<Vec<Severity>> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for value in severity_values(df)? {
        if seen.insert(value.clone()) {
            ordered.push(value);
        }
    }
    Ok(ordered)
}

/// Turns a requested severity into the value used for filtering.
///
/// With no request the first observed severity is used, and an empty table yields `None`. A
/// request is matched against the observed values by its text. A request that matches nothing
/// is still returned, so the filtered view is simply empty.
pub fn resolve_severity(df: &DataFrame, requested: Option<&str>) -> Result<Option<Severity>> {
    let options = distinct_severities(df)?;
    let Some(raw) = requested else {
        return Ok(options.into_iter().next());
    };

    let raw = raw.trim();
    if let Some(found) = options.into_iter().find(|option| option.to_string() == raw) {
        return Ok(Some(found));
    }

    warn!(severity = raw, "requested severity does not occur in the table");
    Ok(Some(Severity::from_raw(raw)))
}

/// Rows whose `Severity` equals `severity`, in their original order.
///
/// Values are compared by their text form so a numeric column can be matched by a label request
/// and vice versa. The source frame is left as is.
pub fn filter_by_severity(df: &DataFrame, severity: &Severity) -> Result<DataFrame> {
    let predicate = match severity {
        Severity::Unspecified => col(SEVERITY)
            .is_null()
            .or(col(SEVERITY).cast(DataType::String).eq(lit(""))),
        other => col(SEVERITY)
            .cast(DataType::String)
            .eq(lit(other.to_string())),
    };

    let filtered = df.clone().lazy().filter(predicate).collect()?;

    if filtered.height() == 0 && df.height() > 0 {
        warn!(severity = %severity, "no rows matched the selected severity");
    } else {
        debug!(severity = %severity, rows = filtered.height(), "filtered by severity");
    }
    Ok(filtered)
}
