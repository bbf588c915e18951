//! Progress reporting for the cleaning pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! use smart_cleaner::CleaningPipeline;
//!
//! let mut pipeline = CleaningPipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?;
//! pipeline.run();
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stages of the cleaning pipeline, in driver order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStage {
    /// Reading and typing the input file
    Loading,
    /// Reporting column types and descriptive statistics
    Summarizing,
    /// Counting missing cells per column
    IdentifyingMissing,
    /// Filling missing cells with mean/mode
    Imputing,
    /// Dropping repeated rows
    Deduplicating,
    /// Normalizing dates and text casing
    FixingFormats,
    /// Writing the cleaned file
    Saving,
    /// Every step has run
    Complete,
}

impl CleaningStage {
    /// The steps run by the driver, in order.
    pub const STEPS: [CleaningStage; 6] = [
        Self::Summarizing,
        Self::IdentifyingMissing,
        Self::Imputing,
        Self::Deduplicating,
        Self::FixingFormats,
        Self::Saving,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Data",
            Self::Summarizing => "Summarizing Dataset",
            Self::IdentifyingMissing => "Identifying Missing Values",
            Self::Imputing => "Imputing Missing Values",
            Self::Deduplicating => "Removing Duplicates",
            Self::FixingFormats => "Fixing Formats",
            Self::Saving => "Saving Cleaned Data",
            Self::Complete => "Complete",
        }
    }

    /// Message shown when the stage runs without a loaded dataset.
    pub fn advisory(&self) -> &'static str {
        match self {
            Self::Loading => "No data loaded.",
            Self::Summarizing => "No data to summarize.",
            Self::IdentifyingMissing => "No data to analyze for missing values.",
            Self::Imputing => "No data to handle missing values.",
            Self::Deduplicating => "No data from which to remove duplicates.",
            Self::FixingFormats => "No data to fix formats.",
            Self::Saving => "No data to save.",
            Self::Complete => "No data was processed.",
        }
    }

    /// Cumulative progress (0.0 - 1.0) at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Loading => 0.0,
            Self::Complete => 1.0,
            step => {
                let idx = Self::STEPS.iter().position(|s| s == step).unwrap_or(0);
                (idx + 1) as f32 / (Self::STEPS.len() + 1) as f32
            }
        }
    }
}

impl fmt::Display for CleaningStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A progress notification emitted when a stage starts or the run ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current pipeline stage
    pub stage: CleaningStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Human-readable message describing current activity
    pub message: String,
}

impl ProgressUpdate {
    pub fn new(stage: CleaningStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            progress: stage.base_progress().clamp(0.0, 1.0),
            message: message.into(),
        }
    }

    /// Creates a completion progress update.
    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(CleaningStage::Complete, message)
    }
}

/// Trait for receiving progress updates from the pipeline.
///
/// Implementations must be `Send + Sync` so a pipeline can be handed to
/// another thread together with its reporter.
pub trait ProgressReporter: Send + Sync {
    /// Called once per stage, before the stage does any work.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;

    #[test]
    fn test_base_progress_increases_in_driver_order() {
        let mut last = CleaningStage::Loading.base_progress();
        for stage in CleaningStage::STEPS {
            let p = stage.base_progress();
            assert!(p > last, "{stage:?} should be past {last}");
            last = p;
        }
        assert!(CleaningStage::Complete.base_progress() > last);
    }

    #[test]
    fn test_complete_update() {
        let update = ProgressUpdate::complete("done");
        assert_eq!(update.stage, CleaningStage::Complete);
        assert_eq!(update.progress, 1.0);
        assert_eq!(update.message, "done");
    }

    #[test]
    fn test_closure_reporter_receives_updates() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reporter = ClosureProgressReporter::new(move |u: ProgressUpdate| {
            sink.lock().unwrap().push(u.stage);
        });

        reporter.report(ProgressUpdate::new(CleaningStage::Imputing, "imputing"));
        reporter.report(ProgressUpdate::complete("done"));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![CleaningStage::Imputing, CleaningStage::Complete]
        );
    }

    #[test]
    fn test_stage_serialization() {
        let json = serde_json::to_string(&CleaningStage::FixingFormats).unwrap();
        assert_eq!(json, "\"fixing_formats\"");
    }
}
