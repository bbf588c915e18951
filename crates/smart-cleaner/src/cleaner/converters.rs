//! Temporal conversion for date-like columns.

use crate::utils::{is_temporal_dtype, parse_temporal_cell};
use anyhow::Result;
use chrono::{NaiveDateTime, NaiveTime};
use polars::prelude::*;

const SECONDS_PER_DAY: i64 = 86_400;

/// Build a typed temporal Series from parsed values.
///
/// `Date` when every value falls on midnight, `Datetime(ms)` otherwise.
pub(crate) fn temporal_series(
    name: PlSmallStr,
    values: &[Option<NaiveDateTime>],
) -> Result<Series> {
    let date_only = values
        .iter()
        .flatten()
        .all(|dt| dt.time() == NaiveTime::MIN);

    if date_only {
        let days: Vec<Option<i32>> = values
            .iter()
            .map(|v| v.map(|dt| dt.and_utc().timestamp().div_euclid(SECONDS_PER_DAY) as i32))
            .collect();
        Ok(Series::new(name, days).cast(&DataType::Date)?)
    } else {
        let millis: Vec<Option<i64>> = values
            .iter()
            .map(|v| v.map(|dt| dt.and_utc().timestamp_millis()))
            .collect();
        Ok(Series::new(name, millis).cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?)
    }
}

/// Parse every cell of a column as a date or datetime.
///
/// Returns the typed Series and how many present cells could not be parsed
/// (those become null). Already-typed columns come back unchanged.
pub(crate) fn coerce_temporal(series: &Series) -> Result<(Series, usize)> {
    if is_temporal_dtype(series.dtype()) {
        return Ok((series.clone(), 0));
    }

    let text = series.cast(&DataType::String)?;
    let mut unparsable = 0;
    let parsed: Vec<Option<NaiveDateTime>> = text
        .str()?
        .into_iter()
        .map(|cell| {
            let cell = cell?;
            let value = parse_temporal_cell(cell);
            if value.is_none() {
                unparsable += 1;
            }
            value
        })
        .collect();

    let typed = temporal_series(series.name().clone(), &parsed)?;
    Ok((typed, unparsable))
}
