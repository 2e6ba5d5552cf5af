use std::collections::HashSet;
use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use polars::prelude::*;
use tracing::debug;

use crate::cells::{build_column, clean_cell, infer_kind};
use crate::errors::ParserError;
use crate::model::{AccidentTable, ColumnKind, TEXT_COLUMNS};

/// Reads a delimited accident file whose first row names the fields.
///
/// Every data row must have as many fields as the header. Column types are inferred from the
/// cells, except for [`TEXT_COLUMNS`], which stay text.
pub fn parse_accident_csv(content: &str) -> Result<AccidentTable, ParserError> {
    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(ParserError::EmptyInput);
    }

    let mut seen = HashSet::with_capacity(headers.len());
    for name in headers.iter() {
        if !seen.insert(name) {
            return Err(ParserError::DuplicateColumn {
                column: name.to_string(),
            });
        }
    }

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record?;
        for (column, value) in cells.iter_mut().zip(record.iter()) {
            column.push(clean_cell(value));
        }
    }

    let mut columns = Vec::with_capacity(headers.len());
    for (name, values) in headers.iter().zip(&cells) {
        let kind = if TEXT_COLUMNS.contains(&name) {
            ColumnKind::Text
        } else {
            infer_kind(values)
        };
        debug!(column = name, kind = %kind, "inferred column type");
        columns.push(build_column(name, kind, values));
    }

    let df = DataFrame::new(columns)?;
    debug!(
        rows = df.height(),
        columns = df.width(),
        source_hash = %source_hash,
        "parsed accident table"
    );

    Ok(AccidentTable { df, source_hash })
}

pub fn load_accident_file(path: impl AsRef<Path>) -> Result<AccidentTable, ParserError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ParserError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_accident_csv(&content)
}
