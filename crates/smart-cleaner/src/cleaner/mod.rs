//! Data cleaning module for repairing datasets.
//!
//! This module provides functionality for:
//! - Removing exact duplicate rows
//! - Parsing date-like columns into temporal dtypes
//! - Title-casing text columns

mod converters;
mod formatters;

pub(crate) use converters::coerce_temporal;

use crate::dataset::Dataset;
use crate::types::{ColumnKind, FormatReport, TemporalFix};
use anyhow::Result;
use polars::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Row and cell repairs applied after imputation.
pub struct DataCleaner;

impl DataCleaner {
    /// Drop every row identical to an earlier one across all columns.
    ///
    /// The first occurrence is kept and row order is preserved. Missing
    /// cells compare equal to each other. Returns the filtered frame and
    /// the number of rows removed.
    pub fn remove_duplicates(df: &DataFrame) -> Result<(DataFrame, usize)> {
        let rendered: Vec<Series> = df
            .get_columns()
            .iter()
            .map(|c| c.as_materialized_series().cast(&DataType::String))
            .collect::<PolarsResult<_>>()?;
        let columns: Vec<&StringChunked> = rendered
            .iter()
            .map(|s| s.str())
            .collect::<PolarsResult<_>>()?;

        let mut seen: HashSet<Vec<Option<&str>>> = HashSet::with_capacity(df.height());
        let keep: Vec<bool> = (0..df.height())
            .map(|row| seen.insert(columns.iter().map(|c| c.get(row)).collect()))
            .collect();

        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        let deduped = df.filter(&mask)?;
        let removed = df.height() - deduped.height();

        debug!("Removed {} duplicate rows", removed);
        Ok((deduped, removed))
    }

    /// Normalize formats in place.
    ///
    /// Temporal columns are parsed, with unparsable cells becoming missing.
    /// Text columns are title-cased, except where the result would match one
    /// of `missing_markers`. Numeric columns are left alone. Running this
    /// twice changes nothing the second time.
    pub fn fix_formats(dataset: &mut Dataset, missing_markers: &[String]) -> Result<FormatReport> {
        let mut report = FormatReport::default();

        for (name, kind) in dataset.schema() {
            let series = dataset
                .frame()
                .column(&name)?
                .as_materialized_series()
                .clone();

            match kind {
                ColumnKind::Temporal => {
                    let (typed, coerced_to_missing) = coerce_temporal(&series)?;
                    if coerced_to_missing > 0 {
                        debug!(
                            "Column '{}': {} unparsable date(s) set to missing",
                            name, coerced_to_missing
                        );
                    }
                    dataset.frame_mut().replace(&name, typed)?;
                    report.temporal.push(TemporalFix {
                        column: name,
                        coerced_to_missing,
                    });
                }
                ColumnKind::Text if series.dtype() == &DataType::String => {
                    let cased = formatters::title_case_series(&series, missing_markers)?;
                    dataset.frame_mut().replace(&name, cased)?;
                    report.title_cased.push(name);
                }
                ColumnKind::Text | ColumnKind::Numeric => {}
            }
        }

        Ok(report)
    }
}
