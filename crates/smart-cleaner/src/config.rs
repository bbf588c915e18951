//! Configuration for the cleaning pipeline.
//!
//! The pipeline itself has no tunable cleaning strategies. What can be
//! configured is where the data comes from and goes to, and how the
//! delimited input is read.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input path used when none is given.
pub const DEFAULT_INPUT_PATH: &str = "path_to_dirty_dataset.csv";

/// Output path used when none is given.
pub const DEFAULT_OUTPUT_PATH: &str = "path_to_clean_dataset.csv";

/// Tokens read as a missing cell (compared after trimming, case-sensitive).
pub const DEFAULT_MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Configuration for the cleaning pipeline.
///
/// Use [`CleanerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use smart_cleaner::CleanerConfig;
///
/// let config = CleanerConfig::builder()
///     .input_path("data/raw.csv")
///     .output_path("data/clean.csv")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanerConfig {
    /// Delimited file to load.
    /// Default: "path_to_dirty_dataset.csv"
    pub input_path: PathBuf,

    /// Where the driver sequence saves the cleaned dataset.
    /// Default: "path_to_clean_dataset.csv"
    pub output_path: PathBuf,

    /// Field delimiter of the input file.
    /// Default: b','
    pub delimiter: u8,

    /// Cell values treated as missing in addition to empty cells.
    /// Default: [`DEFAULT_MISSING_MARKERS`]
    pub missing_markers: Vec<String>,

    /// Minimum share (0.0 - 1.0] of present cells that must parse as
    /// dates for a column to be classified as temporal.
    /// Default: 0.7
    pub temporal_threshold: f64,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            delimiter: b',',
            missing_markers: default_missing_markers(),
            temporal_threshold: 0.7,
        }
    }
}

fn default_missing_markers() -> Vec<String> {
    DEFAULT_MISSING_MARKERS
        .iter()
        .map(|m| m.to_string())
        .collect()
}

impl CleanerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleanerConfigBuilder {
        CleanerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(self.temporal_threshold > 0.0 && self.temporal_threshold <= 1.0) {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "temporal_threshold".to_string(),
                value: self.temporal_threshold,
            });
        }

        if matches!(self.delimiter, b'"' | b'\n' | b'\r') {
            return Err(ConfigValidationError::InvalidDelimiter(
                self.delimiter as char,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be in (0.0, 1.0])")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid delimiter {0:?} (quotes and line breaks are reserved)")]
    InvalidDelimiter(char),
}

/// Builder for [`CleanerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleanerConfigBuilder {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    delimiter: Option<u8>,
    missing_markers: Option<Vec<String>>,
    temporal_threshold: Option<f64>,
}

impl CleanerConfigBuilder {
    /// Set the file to load.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the file the driver sequence saves to.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Set the field delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Replace the list of missing-value markers.
    pub fn missing_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    /// Set the share of parsable dates needed to call a column temporal.
    ///
    /// # Arguments
    /// * `threshold` - Value in (0.0, 1.0] (e.g., 0.7 = 70%)
    pub fn temporal_threshold(mut self, threshold: f64) -> Self {
        self.temporal_threshold = Some(threshold);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleanerConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleanerConfig, ConfigValidationError> {
        let config = CleanerConfig {
            input_path: self
                .input_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH)),
            output_path: self
                .output_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            delimiter: self.delimiter.unwrap_or(b','),
            missing_markers: self.missing_markers.unwrap_or_else(default_missing_markers),
            temporal_threshold: self.temporal_threshold.unwrap_or(0.7),
        };

        config.validate()?;
        Ok(config)
    }
}
