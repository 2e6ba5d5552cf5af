use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::geo::DEFAULT_MAP_ZOOM;
use crate::temporal::DateErrorPolicy;

pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Knobs for one render pass. Every field has a default, so an empty TOML file is valid.
///
/// ```toml
/// preview_rows = 10
/// map_zoom = 12
/// date_errors = "drop_rows"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub preview_rows: usize,
    pub map_zoom: u8,
    pub date_errors: DateErrorPolicy,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            map_zoom: DEFAULT_MAP_ZOOM,
            date_errors: DateErrorPolicy::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|err| DashboardError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|err| {
            DashboardError::Config(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.preview_rows == 0 {
            return Err(DashboardError::Config(
                "preview_rows must be at least 1".to_string(),
            ));
        }
        if !(1..=20).contains(&self.map_zoom) {
            return Err(DashboardError::Config(format!(
                "map_zoom must be between 1 and 20, got {}",
                self.map_zoom
            )));
        }
        Ok(())
    }
}
