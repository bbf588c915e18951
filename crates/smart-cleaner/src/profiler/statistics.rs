//! Descriptive statistics for numeric columns.

use crate::types::NumericStats;
use anyhow::Result;
use polars::prelude::*;

/// Describe a numeric column: count, mean, std, min, quartiles, max.
///
/// A column with no present values gets count 0 and NaN everywhere else.
pub(crate) fn describe_numeric(series: &Series) -> Result<NumericStats> {
    let floats = series.cast(&DataType::Float64)?;
    let mut values: Vec<f64> = floats.f64()?.into_iter().flatten().collect();
    if values.is_empty() {
        return Ok(NumericStats {
            column: series.name().to_string(),
            count: 0,
            mean: f64::NAN,
            std: None,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        });
    }
    values.sort_by(f64::total_cmp);

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;

    Ok(NumericStats {
        column: series.name().to_string(),
        count,
        mean,
        std: calculate_std(&values, mean),
        min: values[0],
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values[count - 1],
    })
}

/// Sample standard deviation (n - 1 denominator).
pub(crate) fn calculate_std(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len() as f64;
    if n <= 1.0 {
        return None;
    }

    let variance: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}

/// Quantile of sorted values with linear interpolation between ranks.
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_numeric_basic() {
        let series = Series::new("x".into(), &[4.0, 1.0, 3.0, 2.0]);
        let stats = describe_numeric(&series).unwrap();

        assert_eq!(stats.column, "x");
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q25, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q75, 3.25);
        assert_eq!(stats.max, 4.0);
        let std = stats.std.unwrap();
        assert!((std - 1.290_994_448_7).abs() < 1e-9);
    }

    #[test]
    fn test_describe_numeric_ignores_nulls() {
        let series = Series::new("x".into(), &[Some(1i64), None, Some(3)]);
        let stats = describe_numeric(&series).unwrap();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.mean, 2.0);
    }

    #[test]
    fn test_describe_numeric_single_value_has_no_std() {
        let series = Series::new("x".into(), &[7.0]);
        let stats = describe_numeric(&series).unwrap();
        assert_eq!(stats.std, None);
        assert_eq!(stats.q25, 7.0);
    }

    #[test]
    fn test_describe_numeric_all_null_has_zero_count() {
        let series = Series::new("x".into(), &[None::<f64>, None]);
        let stats = describe_numeric(&series).unwrap();

        assert_eq!(stats.column, "x");
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
        assert!(stats.median.is_nan());
        assert_eq!(stats.std, None);
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [10.0, 20.0];
        assert_eq!(quantile(&sorted, 0.5), 15.0);
        assert_eq!(quantile(&sorted, 0.0), 10.0);
        assert_eq!(quantile(&sorted, 1.0), 20.0);
    }
}
