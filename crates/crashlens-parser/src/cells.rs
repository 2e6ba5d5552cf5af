use polars::prelude::*;

use crate::model::ColumnKind;

const NULL_TOKENS: [&str; 5] = ["", "NA", "NaN", "nan", "null"];

pub(crate) fn clean_cell(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if NULL_TOKENS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Picks the narrowest kind every non-null cell fits. A column with no values stays text.
pub(crate) fn infer_kind(values: &[Option<String>]) -> ColumnKind {
    let mut present = values.iter().flatten().peekable();
    if present.peek().is_none() {
        return ColumnKind::Text;
    }

    let mut kind = ColumnKind::Integer;
    for value in present {
        if kind == ColumnKind::Integer && value.parse::<i64>().is_ok() {
            continue;
        }
        if value.parse::<f64>().is_ok() {
            kind = ColumnKind::Float;
            continue;
        }
        return ColumnKind::Text;
    }
    kind
}

pub(crate) fn build_column(name: &str, kind: ColumnKind, values: &[Option<String>]) -> Column {
    match kind {
        ColumnKind::Integer => {
            let parsed: Vec<Option<i64>> = values
                .iter()
                .map(|v| v.as_deref().and_then(|s| s.parse().ok()))
                .collect();
            Series::new(name.into(), parsed).into()
        }
        ColumnKind::Float => {
            let parsed: Vec<Option<f64>> = values
                .iter()
                .map(|v| v.as_deref().and_then(|s| s.parse().ok()))
                .collect();
            Series::new(name.into(), parsed).into()
        }
        ColumnKind::Text => {
            let utf8: Vec<Option<&str>> = values.iter().map(|v| v.as_deref()).collect();
            Series::new(name.into(), utf8).into()
        }
    }
}
