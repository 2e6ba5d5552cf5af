use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use tracing::info;

use crate::aggregate::{counts_by_month, counts_by_severity, counts_by_year};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::filter::{distinct_severities, filter_by_severity, resolve_severity};
use crate::geo::{map_view, MapView};
use crate::severity::Severity;
use crate::temporal::enrich_dates;
use crate::validation::validate_schema;

/// The user's current choices. Each interaction builds a new one and calls [`render`] again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderRequest {
    /// Text of the selected severity; `None` picks the first one in the table.
    pub severity: Option<String>,
}

impl RenderRequest {
    pub fn with_severity(severity: impl Into<String>) -> Self {
        Self {
            severity: Some(severity.into()),
        }
    }
}

/// Everything the presentation layer needs for one pass.
#[derive(Debug, Clone)]
pub struct DashboardViews {
    pub row_count: usize,
    pub raw_preview: DataFrame,
    pub enriched: DataFrame,
    pub severity_options: Vec<Severity>,
    pub selected_severity: Option<Severity>,
    pub filtered: DataFrame,
    pub filtered_preview: DataFrame,
    pub accidents_by_year: BTreeMap<i32, u64>,
    pub accidents_by_month: BTreeMap<u32, u64>,
    pub severity_distribution: BTreeMap<Severity, u64>,
    pub map: MapView,
}

/// Runs validation, enrichment, aggregation, filtering and the map summary over `table`.
///
/// Nothing is kept between calls. The first failing stage ends the pass and its error is
/// returned; later stages do not run.
pub fn render(
    table: &DataFrame,
    request: &RenderRequest,
    config: &DashboardConfig,
) -> Result<DashboardViews> {
    config.validate()?;
    info!(rows = table.height(), "rendering accident dashboard");

    validate_schema(table)?;
    let enriched = enrich_dates(table, config.date_errors)?;

    let accidents_by_year = counts_by_year(&enriched)?;
    let accidents_by_month = counts_by_month(&enriched)?;
    let severity_distribution = counts_by_severity(&enriched)?;

    let severity_options = distinct_severities(&enriched)?;
    let selected_severity = resolve_severity(&enriched, request.severity.as_deref())?;
    let filtered = match &selected_severity {
        Some(severity) => filter_by_severity(&enriched, severity)?,
        None => enriched.clear(),
    };

    let map = map_view(&enriched, config.map_zoom)?;

    info!(
        rows = enriched.height(),
        filtered_rows = filtered.height(),
        years = accidents_by_year.len(),
        severities = severity_options.len(),
        hotspots = map.hotspots.len(),
        "dashboard views ready"
    );

    Ok(DashboardViews {
        row_count: enriched.height(),
        raw_preview: table.head(Some(config.preview_rows)),
        filtered_preview: filtered.head(Some(config.preview_rows)),
        enriched,
        severity_options,
        selected_severity,
        filtered,
        accidents_by_year,
        accidents_by_month,
        severity_distribution,
        map,
    })
}
