use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::schema::REQUIRED_COLUMNS;

/// Required field names absent from `df`, in [`REQUIRED_COLUMNS`] order. Row content plays no
/// part: an empty table with the right header has nothing missing.
pub fn missing_columns(df: &DataFrame) -> Vec<&'static str> {
    let present = df.get_column_names();
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|required| !present.iter().any(|name| name.as_str() == *required))
        .collect()
}

pub fn is_valid(df: &DataFrame) -> bool {
    missing_columns(df).is_empty()
}

pub fn validate_schema(df: &DataFrame) -> Result<()> {
    let missing = missing_columns(df);
    if missing.is_empty() {
        debug!(rows = df.height(), "schema validation passed");
        Ok(())
    } else {
        Err(DashboardError::MissingColumns { missing })
    }
}
