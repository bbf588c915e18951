//! Shared utilities for the cleaning pipeline.
//!
//! Cell-level parsing (missing markers, numbers, dates), string
//! normalization and small Series helpers used by several modules.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use std::collections::HashMap;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a date or datetime type.
#[inline]
pub fn is_temporal_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Datetime(_, _) | DataType::Date)
}

// =============================================================================
// Cell Parsing Utilities
// =============================================================================

/// Check whether a raw cell stands for a missing value.
pub fn is_missing_cell(raw: &str, markers: &[String]) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || markers.iter().any(|m| m == trimmed)
}

/// Parse a cell as a finite number.
pub fn parse_numeric_cell(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a cell as a whole number.
pub fn parse_integer_cell(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

// Cheap shape check before trying every chrono format.
static TEMPORAL_SHAPES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}[-/.]\d{1,2}[-/.]\d{1,2}").expect("Invalid regex: YYYY-MM-DD"),
        Regex::new(r"^\d{1,2}[-/.]\d{1,2}[-/.]\d{4}").expect("Invalid regex: MM/DD/YYYY"),
        Regex::new(r"^[A-Za-z]{3,9}\.? \d{1,2},? \d{4}$").expect("Invalid regex: Mon DD, YYYY"),
        Regex::new(r"^\d{1,2} [A-Za-z]{3,9}\.? \d{4}$").expect("Invalid regex: DD Mon YYYY"),
    ]
});

const DATETIME_FORMATS: [&str; 10] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 11] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Parse a cell as a date or datetime.
///
/// Date-only values resolve to midnight. Zoned timestamps (RFC 3339) are
/// converted to UTC.
pub fn parse_temporal_cell(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if !TEMPORAL_SHAPES.iter().any(|re| re.is_match(trimmed)) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

// =============================================================================
// String Normalization
// =============================================================================

/// Capitalize the first letter of each whitespace-delimited word and
/// lowercase the rest. Whitespace is kept as-is.
pub fn to_title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }

    out
}

// =============================================================================
// Series Utilities
// =============================================================================

/// Most frequent present value of a Series, with the row of its first
/// occurrence.
///
/// Values are compared by their text rendering. Ties go to the value seen
/// first in row order.
pub fn series_mode(series: &Series) -> PolarsResult<Option<(String, usize)>> {
    let text = series.cast(&DataType::String)?;
    let text = text.str()?;

    // value -> (count, first row)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (row, val) in text.into_iter().enumerate() {
        if let Some(val) = val {
            counts.entry(val).or_insert((0, row)).0 += 1;
        }
    }

    let mode = counts
        .into_iter()
        .max_by(|(_, (count_a, row_a)), (_, (count_b, row_b))| {
            count_a.cmp(count_b).then(row_b.cmp(row_a))
        })
        .map(|(val, (_, row))| (val.to_string(), row));

    Ok(mode)
}

/// Fill null values in a numeric Series with a specific value.
///
/// The result is always `Float64`.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let floats = series.cast(&DataType::Float64)?;
    let values: Vec<f64> = floats
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(fill_value))
        .collect();

    Ok(Series::new(series.name().clone(), values))
}

/// Fill null values with the value found at `row` of the same Series.
///
/// Works for any dtype, the result keeps the dtype of `series`.
pub fn fill_nulls_from_row(series: &Series, row: usize) -> PolarsResult<Series> {
    let filler = series.new_from_index(row, series.len());
    series.zip_with(&series.is_not_null(), &filler)
}

// =============================================================================
// Tests
// =============================================================================
