//! Column kind inference at load time.

use crate::cleaner::coerce_temporal;
use crate::types::ColumnKind;
use crate::utils::{parse_integer_cell, parse_numeric_cell, parse_temporal_cell};
use anyhow::Result;
use polars::prelude::*;

/// Decide a column's kind from all of its present cells.
///
/// Numeric wins when every present cell is a number (a column with no
/// present cells counts as numeric). Otherwise the column is temporal when
/// at least `temporal_threshold` of its present cells parse as dates, and
/// text in every other case.
pub(crate) fn infer_column_kind(cells: &[Option<String>], temporal_threshold: f64) -> ColumnKind {
    let present: Vec<&str> = cells.iter().flatten().map(String::as_str).collect();

    if present.iter().all(|c| parse_numeric_cell(c).is_some()) {
        return ColumnKind::Numeric;
    }

    let date_like = present
        .iter()
        .filter(|c| parse_temporal_cell(c).is_some())
        .count();
    if date_like as f64 / present.len() as f64 >= temporal_threshold {
        ColumnKind::Temporal
    } else {
        ColumnKind::Text
    }
}

/// Build the typed Series for a column of the given kind.
///
/// Integer columns without gaps stay `Int64`; any other numeric column is
/// `Float64`. A temporal column is only typed when every present cell
/// parses, otherwise its raw text is kept for the format-fixing step.
pub(crate) fn build_column_series(
    name: &str,
    cells: Vec<Option<String>>,
    kind: ColumnKind,
) -> Result<Series> {
    match kind {
        ColumnKind::Numeric => Ok(numeric_series(name, &cells)),
        ColumnKind::Text => Ok(Series::new(name.into(), cells)),
        ColumnKind::Temporal => {
            let raw = Series::new(name.into(), cells);
            let (typed, unparsable) = coerce_temporal(&raw)?;
            Ok(if unparsable == 0 { typed } else { raw })
        }
    }
}

fn numeric_series(name: &str, cells: &[Option<String>]) -> Series {
    let integers: Option<Vec<i64>> = cells
        .iter()
        .map(|c| c.as_deref().and_then(parse_integer_cell))
        .collect();

    match integers {
        Some(values) if !values.is_empty() => Series::new(name.into(), values),
        _ => {
            let floats: Vec<Option<f64>> = cells
                .iter()
                .map(|c| c.as_deref().and_then(parse_numeric_cell))
                .collect();
            Series::new(name.into(), floats)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_infer_numeric() {
        let c = cells(&[Some("1"), Some("2.5"), None, Some("-3")]);
        assert_eq!(infer_column_kind(&c, 0.7), ColumnKind::Numeric);
    }

    #[test]
    fn test_infer_all_missing_is_numeric() {
        let c = cells(&[None, None]);
        assert_eq!(infer_column_kind(&c, 0.7), ColumnKind::Numeric);
    }

    #[test]
    fn test_infer_temporal() {
        let c = cells(&[Some("2024-01-15"), Some("2024-02-20"), Some("2024-03-25")]);
        assert_eq!(infer_column_kind(&c, 0.7), ColumnKind::Temporal);
    }

    #[test]
    fn test_infer_temporal_respects_threshold() {
        let c = cells(&[Some("2024-01-15"), Some("2024-02-20"), Some("oops")]);
        assert_eq!(infer_column_kind(&c, 0.7), ColumnKind::Text);
        assert_eq!(infer_column_kind(&c, 0.6), ColumnKind::Temporal);
    }

    #[test]
    fn test_infer_text() {
        let c = cells(&[Some("red"), Some("12"), Some("blue")]);
        assert_eq!(infer_column_kind(&c, 0.7), ColumnKind::Text);
    }

    #[test]
    fn test_build_integer_series() {
        let s = build_column_series("n", cells(&[Some("1"), Some("2")]), ColumnKind::Numeric)
            .unwrap();
        assert_eq!(s.dtype(), &DataType::Int64);
    }

    #[test]
    fn test_build_float_series_with_gap() {
        let s = build_column_series("n", cells(&[Some("1"), None]), ColumnKind::Numeric)
            .unwrap();
        assert_eq!(s.dtype(), &DataType::Float64);
        assert_eq!(s.null_count(), 1);
    }

    #[test]
    fn test_build_text_keeps_raw_value() {
        let s = build_column_series("t", cells(&[Some(" padded ")]), ColumnKind::Text)
            .unwrap();
        assert_eq!(s.str().unwrap().get(0), Some(" padded "));
    }
}
