//! Delimited-text output.

use super::Dataset;
use crate::error::{CleaningError, Result};
use crate::types::SaveReport;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::info;

pub(crate) fn write_csv(dataset: &Dataset, path: &Path, delimiter: u8) -> Result<SaveReport> {
    let save_error = |reason: String| CleaningError::SaveError {
        path: path.to_path_buf(),
        reason,
    };

    let mut file = File::create(path).map_err(|e| save_error(e.to_string()))?;
    let mut frame = dataset.frame().clone();

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(delimiter)
        .with_quote_char(b'"')
        .finish(&mut frame)
        .map_err(|e| save_error(e.to_string()))?;

    info!("Dataset saved: {}", path.display());

    Ok(SaveReport {
        path: path.to_path_buf(),
        rows: frame.height(),
        columns: frame.width(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_has_header_and_no_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let dataset = Dataset::from_frame(df!["a" => [1i64, 2], "b" => ["x", "y"]].unwrap());

        let report = write_csv(&dataset, &path, b',').unwrap();
        assert_eq!(report.rows, 2);
        assert_eq!(report.columns, 2);

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("a,b"));
        assert_eq!(lines.next(), Some("1,x"));
        assert_eq!(lines.next(), Some("2,y"));
    }

    #[test]
    fn test_write_to_missing_directory_is_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.csv");
        let dataset = Dataset::from_frame(df!["a" => [1i64]].unwrap());

        let err = write_csv(&dataset, &path, b',').unwrap_err();
        assert!(matches!(err, CleaningError::SaveError { .. }));
        assert!(err.to_string().contains("out.csv"));
    }
}
