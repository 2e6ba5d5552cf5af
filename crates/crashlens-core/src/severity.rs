use std::fmt;

use polars::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::schema::SEVERITY;

/// One severity category as it appears in the `Severity` column.
///
/// Integer columns produce [`Severity::Level`], anything else is compared by its text. Empty
/// cells become [`Severity::Unspecified`] so that every row lands in some group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Severity {
    Unspecified,
    Level(i64),
    Label(String),
}

impl Severity {
    /// Interprets free text (for example a command-line selection) the way the loader would.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Severity::Unspecified
        } else if let Ok(level) = trimmed.parse::<i64>() {
            Severity::Level(level)
        } else {
            Severity::Label(trimmed.to_string())
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Unspecified => f.write_str("(unspecified)"),
            Severity::Level(level) => write!(f, "{level}"),
            Severity::Label(label) => f.write_str(label),
        }
    }
}

impl From<&str> for Severity {
    fn from(label: &str) -> Self {
        Severity::Label(label.to_string())
    }
}

/// Reads the `Severity` column row by row.
pub fn severity_values(df: &DataFrame) -> Result<Vec<Severity>> {
    let column = df.column(SEVERITY)?;
    let values: Vec<Severity> = match column.dtype() {
        DataType::Int64 => column
            .i64()?
            .into_iter()
            .map(|value| value.map_or(Severity::Unspecified, Severity::Level))
            .collect(),
        DataType::String => column.str()?.into_iter().map(label_or_unspecified).collect(),
        _ => {
            let text = column.cast(&DataType::String)?;
            text.str()?.into_iter().map(label_or_unspecified).collect()
        }
    };
    Ok(values)
}

fn label_or_unspecified(value: Option<&str>) -> Severity {
    match value {
        Some(label) if !label.is_empty() => Severity::Label(label.to_string()),
        _ => Severity::Unspecified,
    }
}
