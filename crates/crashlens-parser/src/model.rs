use std::fmt;

use polars::prelude::DataFrame;

/// Columns that always load as text, whatever their cells look like. Date parsing is left to
/// the enrichment stage so that values such as `20200101` are never read as integers.
pub const TEXT_COLUMNS: [&str; 2] = ["Date", "Time"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Text => "text",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded upload: the typed frame plus the digest of the bytes it came from.
#[derive(Debug, Clone)]
pub struct AccidentTable {
    pub df: DataFrame,
    pub source_hash: String,
}

impl AccidentTable {
    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn into_frame(self) -> DataFrame {
        self.df
    }
}
