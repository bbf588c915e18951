//! Delimited-text loading.

use super::Dataset;
use crate::config::CleanerConfig;
use crate::error::{CleaningError, Result};
use crate::profiler::{build_column_series, infer_column_kind};
use crate::utils::is_missing_cell;
use polars::prelude::*;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

pub(crate) fn read_csv_path(path: &Path, config: &CleanerConfig) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CleaningError::FileNotFound(path.to_path_buf()),
        _ => CleaningError::Io(e),
    })?;
    read_csv(file, path, config)
}

pub(crate) fn read_csv<R: Read>(input: R, source: &Path, config: &CleanerConfig) -> Result<Dataset> {
    let parse_error = |reason: String| CleaningError::ParseError {
        path: source.to_path_buf(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(config.delimiter)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| parse_error(e.to_string()))?
        .clone();
    if headers.is_empty() {
        return Err(CleaningError::EmptyInput(source.to_path_buf()));
    }

    let mut seen = HashSet::with_capacity(headers.len());
    for name in headers.iter() {
        if !seen.insert(name) {
            return Err(parse_error(format!("duplicate column name '{}'", name)));
        }
    }

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| parse_error(e.to_string()))?;
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(if is_missing_cell(field, &config.missing_markers) {
                None
            } else {
                Some(field.to_string())
            });
        }
    }

    if cells.first().map_or(true, Vec::is_empty) {
        return Err(CleaningError::EmptyInput(source.to_path_buf()));
    }

    let mut columns = Vec::with_capacity(headers.len());
    let mut kinds = Vec::with_capacity(headers.len());
    for (name, column_cells) in headers.iter().zip(cells) {
        let kind = infer_column_kind(&column_cells, config.temporal_threshold);
        let series = build_column_series(name, column_cells, kind)
            .map_err(|e| parse_error(format!("column '{}': {}", name, e)))?;
        debug!("Column '{}' typed as {} ({})", name, kind, series.dtype());
        columns.push(Column::from(series));
        kinds.push(kind);
    }

    let frame = DataFrame::new(columns)?;
    Ok(Dataset::with_kinds(frame, kinds))
}
