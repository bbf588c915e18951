//! Data profiling module for dataset analysis.
//!
//! This module provides functionality for:
//! - Deciding each column's kind when a file is loaded
//! - Summarizing columns and describing numeric ones
//! - Counting missing cells per column

mod statistics;
mod type_inference;

use crate::dataset::Dataset;
use crate::types::{ColumnSummary, DatasetSummary, MissingColumn, MissingReport};
use anyhow::Result;

pub(crate) use type_inference::{build_column_series, infer_column_kind};

/// Read-only analysis of a [`Dataset`].
pub struct DataProfiler;

impl DataProfiler {
    /// Column kinds, dtypes, non-null counts and numeric statistics.
    pub fn summarize(dataset: &Dataset) -> Result<DatasetSummary> {
        let height = dataset.height();
        let mut column_summaries = Vec::with_capacity(dataset.width());
        let mut numeric_stats = Vec::new();

        for (column, kind) in dataset.frame().get_columns().iter().zip(dataset.kinds()) {
            let series = column.as_materialized_series();
            let missing_count = series.null_count();

            column_summaries.push(ColumnSummary {
                name: series.name().to_string(),
                kind: *kind,
                dtype: series.dtype().to_string(),
                non_null_count: height - missing_count,
                missing_count,
            });

            if *kind == crate::types::ColumnKind::Numeric {
                numeric_stats.push(statistics::describe_numeric(series)?);
            }
        }

        Ok(DatasetSummary {
            rows: height,
            columns: dataset.width(),
            column_summaries,
            numeric_stats,
        })
    }

    /// Columns holding at least one missing cell, with their counts.
    pub fn identify_missing(dataset: &Dataset) -> MissingReport {
        let columns = dataset
            .frame()
            .get_columns()
            .iter()
            .filter(|c| c.null_count() > 0)
            .map(|c| MissingColumn {
                column: c.name().to_string(),
                missing_count: c.null_count(),
            })
            .collect();

        MissingReport { columns }
    }
}
