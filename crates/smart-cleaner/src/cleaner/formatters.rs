//! String normalization for text columns.

use crate::utils::{is_missing_cell, to_title_case};
use anyhow::Result;
use polars::prelude::*;

/// Title-case every present cell of a text column. Nulls stay null.
///
/// A cell whose title-cased form would read back as a missing marker keeps
/// its original text.
pub(crate) fn title_case_series(series: &Series, missing_markers: &[String]) -> Result<Series> {
    let values: Vec<Option<String>> = series
        .str()?
        .into_iter()
        .map(|cell| {
            cell.map(|raw| {
                let cased = to_title_case(raw);
                if is_missing_cell(&cased, missing_markers) {
                    raw.to_string()
                } else {
                    cased
                }
            })
        })
        .collect();

    Ok(Series::new(series.name().clone(), values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CleanerConfig;

    fn markers() -> Vec<String> {
        CleanerConfig::default().missing_markers
    }

    #[test]
    fn test_title_case_series() {
        let series = Series::new("city".into(), &[Some("hello world"), None, Some("NEW york")]);
        let cased = title_case_series(&series, &markers()).unwrap();

        let values: Vec<Option<&str>> = cased.str().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some("Hello World"), None, Some("New York")]);
        assert_eq!(cased.name().as_str(), "city");
    }

    #[test]
    fn test_title_case_never_produces_a_missing_marker() {
        let series = Series::new("word".into(), &["none", "-NAN", "NONE", "apple"]);
        let cased = title_case_series(&series, &markers()).unwrap();

        let values: Vec<Option<&str>> = cased.str().unwrap().into_iter().collect();
        assert_eq!(
            values,
            vec![Some("none"), Some("-NAN"), Some("NONE"), Some("Apple")]
        );
    }

    #[test]
    fn test_title_case_series_rejects_non_text() {
        let series = Series::new("n".into(), &[1i64, 2]);
        assert!(title_case_series(&series, &markers()).is_err());
    }
}
