// crates/crashlens-core/src/error.rs

use crashlens_parser::ParserError;
use polars::prelude::PolarsError;
use thiserror::Error;

use crate::schema::REQUIRED_COLUMNS;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(
        "the dataset must contain the following columns: {}; missing: {}",
        REQUIRED_COLUMNS.join(", "),
        .missing.join(", ")
    )]
    MissingColumns { missing: Vec<&'static str> },

    #[error("Date value {value:?} in data row {} is not a calendar date", .row + 1)]
    DateParse { row: usize, value: String },

    #[error("column {column} must be numeric: {reason}")]
    InvalidCoordinate { column: &'static str, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("data processing error: {0}")]
    Processing(String),

    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error("polars operation failed: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
