//! Smart Cleaner Library
//!
//! A small dataset-cleaning pipeline built with Rust and Polars.
//!
//! # Overview
//!
//! Given a delimited text file, the pipeline:
//!
//! - **Loads** it, deciding once per column whether it is numeric, text or temporal
//! - **Summarizes** column types, non-null counts and numeric statistics
//! - **Identifies** columns with missing cells
//! - **Imputes** missing cells with the column mean (numeric) or mode (others)
//! - **Removes** exact duplicate rows, keeping the first occurrence
//! - **Fixes formats** by parsing dates and title-casing text
//! - **Saves** the result as delimited text
//!
//! Every step returns its own `Result`. When no data could be loaded, each
//! step reports a [`CleaningError::NoDataLoaded`] advisory and the run goes
//! on.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use smart_cleaner::{CleanerConfig, CleaningPipeline};
//!
//! let config = CleanerConfig::builder()
//!     .input_path("dirty.csv")
//!     .output_path("clean.csv")
//!     .build()?;
//!
//! let mut pipeline = CleaningPipeline::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?;
//!
//! for outcome in pipeline.run() {
//!     if let Ok(report) = outcome.result {
//!         println!("{report}");
//!     }
//! }
//! ```
//!
//! Individual steps can also be called directly:
//!
//! ```rust,ignore
//! let mut pipeline = CleaningPipeline::open("dirty.csv")?;
//! let missing = pipeline.identify_missing()?;
//! pipeline.impute_missing()?;
//! pipeline.save("clean.csv")?;
//! ```

pub mod cleaner;
pub mod config;
pub mod dataset;
pub mod error;
pub mod imputers;
pub mod pipeline;
pub mod profiler;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::DataCleaner;
pub use config::{CleanerConfig, CleanerConfigBuilder, ConfigValidationError};
pub use dataset::Dataset;
pub use error::{CleaningError, Result as CleaningResult};
pub use imputers::StatisticalImputer;
pub use pipeline::{
    CleaningPipeline, CleaningPipelineBuilder, CleaningStage, ClosureProgressReporter,
    ProgressReporter, ProgressUpdate, StepOutcome,
};
pub use profiler::DataProfiler;
pub use types::{
    ColumnKind, ColumnSummary, DatasetSummary, DuplicateReport, FormatReport, ImputationMethod,
    ImputationReport, ImputedColumn, MissingColumn, MissingReport, NumericStats, SaveReport,
    StepReport, TemporalFix,
};
pub use utils::{is_missing_cell, parse_temporal_cell, to_title_case};
