//! In-memory dataset owned by the pipeline.
//!
//! A [`Dataset`] is a Polars `DataFrame` plus one [`ColumnKind`] per column.
//! The kind is decided once when the data is loaded and drives every later
//! step, so no step has to guess a column's meaning from its storage dtype.

mod loader;
mod writer;

use crate::config::CleanerConfig;
use crate::error::Result;
use crate::types::{ColumnKind, SaveReport};
use crate::utils::{is_numeric_dtype, is_temporal_dtype};
use polars::prelude::*;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    kinds: Vec<ColumnKind>,
}

impl Dataset {
    /// Load and type a delimited file.
    ///
    /// # Errors
    ///
    /// `FileNotFound`, `EmptyInput` or `ParseError` depending on what is
    /// wrong with the file.
    pub fn from_csv_path(path: impl AsRef<Path>, config: &CleanerConfig) -> Result<Self> {
        loader::read_csv_path(path.as_ref(), config)
    }

    /// Load delimited data from any reader. `source` is only used in
    /// diagnostics.
    pub fn from_csv_reader<R: Read>(
        input: R,
        source: impl AsRef<Path>,
        config: &CleanerConfig,
    ) -> Result<Self> {
        loader::read_csv(input, source.as_ref(), config)
    }

    /// Wrap an existing frame, deriving each column's kind from its dtype.
    pub fn from_frame(frame: DataFrame) -> Self {
        let kinds = frame
            .get_columns()
            .iter()
            .map(|c| kind_for_dtype(c.dtype()))
            .collect();
        Self { frame, kinds }
    }

    pub(crate) fn with_kinds(frame: DataFrame, kinds: Vec<ColumnKind>) -> Self {
        debug_assert_eq!(frame.width(), kinds.len());
        Self { frame, kinds }
    }

    /// Write the dataset as delimited text, header first, no index column.
    ///
    /// # Errors
    ///
    /// `SaveError` wrapping the underlying reason.
    pub fn to_csv_path(&self, path: impl AsRef<Path>, delimiter: u8) -> Result<SaveReport> {
        writer::write_csv(self, path.as_ref(), delimiter)
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub(crate) fn frame_mut(&mut self) -> &mut DataFrame {
        &mut self.frame
    }

    /// Swap in a frame with the same columns (e.g. after dropping rows).
    pub(crate) fn set_frame(&mut self, frame: DataFrame) {
        debug_assert_eq!(frame.width(), self.kinds.len());
        self.frame = frame;
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn kinds(&self) -> &[ColumnKind] {
        &self.kinds
    }

    pub fn kind_of(&self, column: &str) -> Option<ColumnKind> {
        self.frame
            .get_column_index(column)
            .and_then(|idx| self.kinds.get(idx).copied())
    }

    /// Column names paired with their kinds, in column order.
    pub fn schema(&self) -> Vec<(String, ColumnKind)> {
        self.column_names()
            .into_iter()
            .zip(self.kinds.iter().copied())
            .collect()
    }

    /// Total number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.frame.get_columns().iter().map(|c| c.null_count()).sum()
    }
}

fn kind_for_dtype(dtype: &DataType) -> ColumnKind {
    if is_numeric_dtype(dtype) {
        ColumnKind::Numeric
    } else if is_temporal_dtype(dtype) {
        ColumnKind::Temporal
    } else {
        ColumnKind::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_frame_derives_kinds() {
        let df = df![
            "id" => [1i64, 2, 3],
            "name" => ["a", "b", "c"],
            "score" => [Some(1.5), None, Some(2.5)],
        ]
        .unwrap();

        let dataset = Dataset::from_frame(df);
        assert_eq!(
            dataset.kinds(),
            &[ColumnKind::Numeric, ColumnKind::Text, ColumnKind::Numeric]
        );
        assert_eq!(dataset.kind_of("name"), Some(ColumnKind::Text));
        assert_eq!(dataset.kind_of("nope"), None);
        assert_eq!(dataset.missing_count(), 1);
    }

    #[test]
    fn test_from_frame_temporal_dtype() {
        let dates = Series::new("when".into(), &[19_000i32, 19_001])
            .cast(&DataType::Date)
            .unwrap();
        let df = DataFrame::new(vec![Column::from(dates)]).unwrap();

        let dataset = Dataset::from_frame(df);
        assert_eq!(dataset.kinds(), &[ColumnKind::Temporal]);
    }

    #[test]
    fn test_schema_pairs_names_and_kinds() {
        let df = df!["x" => [1.0, 2.0], "y" => ["p", "q"]].unwrap();
        let dataset = Dataset::from_frame(df);
        assert_eq!(
            dataset.schema(),
            vec![
                ("x".to_string(), ColumnKind::Numeric),
                ("y".to_string(), ColumnKind::Text)
            ]
        );
    }
}
