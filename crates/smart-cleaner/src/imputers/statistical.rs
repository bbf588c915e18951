//! Statistical imputation methods.
//!
//! Provides mean and mode imputation over a whole [`Dataset`].

use crate::dataset::Dataset;
use crate::error::CleaningError;
use crate::types::{ColumnKind, ImputationMethod, ImputationReport, ImputedColumn};
use crate::utils::{fill_nulls_from_row, fill_numeric_nulls, series_mode};
use anyhow::Result;
use polars::prelude::*;
use tracing::{debug, warn};

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill every missing cell of the dataset.
    ///
    /// Numeric columns get the mean of their present values, text and
    /// temporal columns their mode. Columns without gaps are not touched.
    /// A column with no present value at all is skipped and listed in
    /// [`ImputationReport::skipped`].
    pub fn impute_dataset(dataset: &mut Dataset) -> Result<ImputationReport> {
        let mut report = ImputationReport::default();
        let height = dataset.height();

        for (name, kind) in dataset.schema() {
            let missing = dataset.frame().column(&name)?.null_count();
            if missing == 0 {
                continue;
            }
            if missing == height {
                warn!("{}, skipping", CleaningError::NoImputableValue(name.clone()));
                report.skipped.push(name);
                continue;
            }

            let imputed = match kind {
                ColumnKind::Numeric => Self::apply_numeric_mean(dataset.frame_mut(), &name)?,
                ColumnKind::Text | ColumnKind::Temporal => {
                    Self::apply_mode_imputation(dataset.frame_mut(), &name)?
                }
            };

            if let Some(imputed) = imputed {
                debug!(
                    "Filled {} cell(s) in '{}' with {}",
                    imputed.cells_filled, imputed.column, imputed.value
                );
                report.imputed.push(imputed);
            }
        }

        Ok(report)
    }

    /// Apply mean imputation for a numeric column.
    ///
    /// The column becomes `Float64`. Returns `None` when there is no mean.
    pub fn apply_numeric_mean(df: &mut DataFrame, col_name: &str) -> Result<Option<ImputedColumn>> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let Some(mean_val) = series.mean() else {
            return Ok(None);
        };

        let cells_filled = series.null_count();
        let filled = fill_numeric_nulls(&series, mean_val)?;
        df.replace(col_name, filled)?;

        Ok(Some(ImputedColumn {
            column: col_name.to_string(),
            method: ImputationMethod::Mean,
            value: mean_val.to_string(),
            cells_filled,
        }))
    }

    /// Apply mode imputation for a non-numeric column.
    ///
    /// Ties go to the value that appears first. The column keeps its dtype.
    pub fn apply_mode_imputation(
        df: &mut DataFrame,
        col_name: &str,
    ) -> Result<Option<ImputedColumn>> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let Some((mode_val, row)) = series_mode(&series)? else {
            return Ok(None);
        };

        let cells_filled = series.null_count();
        let filled = fill_nulls_from_row(&series, row)?;
        df.replace(col_name, filled)?;

        Ok(Some(ImputedColumn {
            column: col_name.to_string(),
            method: ImputationMethod::Mode,
            value: mode_val,
            cells_filled,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn floats(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn test_numeric_mean() {
        let mut df = df!["n" => [Some(1i64), None, Some(3)]].unwrap();
        let imputed = StatisticalImputer::apply_numeric_mean(&mut df, "n")
            .unwrap()
            .unwrap();

        assert_eq!(floats(&df, "n"), vec![Some(1.0), Some(2.0), Some(3.0)]);
        assert_eq!(imputed.method, ImputationMethod::Mean);
        assert_eq!(imputed.value, "2");
        assert_eq!(imputed.cells_filled, 1);
    }

    #[test]
    fn test_text_mode() {
        let mut df = df!["t" => [Some("a"), Some("a"), None, Some("b")]].unwrap();
        let imputed = StatisticalImputer::apply_mode_imputation(&mut df, "t")
            .unwrap()
            .unwrap();

        assert_eq!(imputed.value, "a");
        assert_eq!(strings(&df, "t")[2], Some("a".to_string()));
    }

    #[test]
    fn test_mode_tie_goes_to_first_value() {
        let mut df = df!["t" => [Some("b"), Some("a"), None, Some("a"), Some("b")]].unwrap();
        let imputed = StatisticalImputer::apply_mode_imputation(&mut df, "t")
            .unwrap()
            .unwrap();
        assert_eq!(imputed.value, "b");
    }

    #[test]
    fn test_impute_dataset_mixed_columns() {
        let mut dataset = Dataset::from_frame(
            df![
                "n" => [Some(1.0), None, Some(3.0)],
                "t" => [Some("x"), None, Some("x")],
                "full" => [1i64, 2, 3],
            ]
            .unwrap(),
        );

        let report = StatisticalImputer::impute_dataset(&mut dataset).unwrap();

        assert_eq!(dataset.missing_count(), 0);
        assert_eq!(report.cells_filled(), 2);
        assert!(report.skipped.is_empty());
        let columns: Vec<&str> = report.imputed.iter().map(|c| c.column.as_str()).collect();
        assert_eq!(columns, vec!["n", "t"]);
        // Untouched columns keep their dtype.
        assert_eq!(
            dataset.frame().column("full").unwrap().dtype(),
            &DataType::Int64
        );
    }

    #[test]
    fn test_all_missing_column_is_skipped() {
        let mut dataset = Dataset::from_frame(
            df![
                "empty" => [None::<f64>, None],
                "n" => [Some(4.0), None],
            ]
            .unwrap(),
        );

        let report = StatisticalImputer::impute_dataset(&mut dataset).unwrap();

        assert_eq!(report.skipped, vec!["empty".to_string()]);
        assert_eq!(report.imputed.len(), 1);
        assert_eq!(dataset.frame().column("empty").unwrap().null_count(), 2);
        assert_eq!(floats(dataset.frame(), "n"), vec![Some(4.0), Some(4.0)]);
    }

    #[test]
    fn test_temporal_column_uses_mode() {
        let dates = Series::new("d".into(), &[Some(19_737i32), None, Some(19_737), Some(19_738)])
            .cast(&DataType::Date)
            .unwrap();
        let mut dataset = Dataset::from_frame(DataFrame::new(vec![Column::from(dates)]).unwrap());

        let report = StatisticalImputer::impute_dataset(&mut dataset).unwrap();

        assert_eq!(report.imputed[0].method, ImputationMethod::Mode);
        assert_eq!(report.imputed[0].value, "2024-01-15");
        let column = dataset.frame().column("d").unwrap();
        assert_eq!(column.dtype(), &DataType::Date);
        assert_eq!(column.null_count(), 0);
    }
}
