//! Error types for the cleaning pipeline.
//!
//! Every step of the pipeline reports failures through [`CleaningError`].
//! None of them are fatal: the pipeline converts them into diagnostics and
//! keeps going, so the variants double as the vocabulary of those
//! diagnostics.

use crate::config::ConfigValidationError;
use crate::pipeline::CleaningStage;
use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// No file exists at the input path.
    #[error("File not found at {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file exists but holds no header or no data rows.
    #[error("The file {} is empty", .0.display())]
    EmptyInput(PathBuf),

    /// The file contents do not conform to the delimited format.
    #[error("Could not parse {}: {reason}", path.display())]
    ParseError { path: PathBuf, reason: String },

    /// A column has no present values, so neither a mean nor a mode exists.
    #[error("Column '{0}' has no present values to impute from")]
    NoImputableValue(String),

    /// Writing the cleaned dataset failed.
    #[error("Error when saving data to {}: {reason}", path.display())]
    SaveError { path: PathBuf, reason: String },

    /// An operation was invoked while no dataset is loaded.
    #[error("{}", .0.advisory())]
    NoDataLoaded(CleaningStage),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// A column transform failed inside a step.
    #[error("{} failed: {reason}", stage.display_name())]
    StepFailed { stage: CleaningStage, reason: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl CleaningError {
    /// Wrap a column-level failure as a failure of `stage`.
    pub fn step_failed(stage: CleaningStage, err: impl std::fmt::Display) -> Self {
        Self::StepFailed {
            stage,
            reason: err.to_string(),
        }
    }

    /// Stable code for callers that branch on the kind of failure.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::EmptyInput(_) => "EMPTY_INPUT",
            Self::ParseError { .. } => "PARSE_ERROR",
            Self::NoImputableValue(_) => "NO_IMPUTABLE_VALUE",
            Self::SaveError { .. } => "SAVE_ERROR",
            Self::NoDataLoaded(_) => "NO_DATA_LOADED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::StepFailed { .. } => "STEP_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
        }
    }

    /// Whether this is the "nothing loaded" advisory rather than a real failure.
    pub fn is_advisory(&self) -> bool {
        matches!(self, Self::NoDataLoaded(_))
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;
