//! The cleaning pipeline and its builder.
//!
//! A [`CleaningPipeline`] owns at most one [`Dataset`]. Every operation
//! returns its own `Result`; a missing dataset turns each of them into a
//! `NoDataLoaded` advisory instead of a failure of the whole run.

use crate::cleaner::DataCleaner;
use crate::config::CleanerConfig;
use crate::dataset::Dataset;
use crate::error::{CleaningError, Result};
use crate::imputers::StatisticalImputer;
use crate::pipeline::progress::{
    CleaningStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::profiler::DataProfiler;
use crate::types::{
    DatasetSummary, DuplicateReport, FormatReport, ImputationReport, MissingReport, SaveReport,
    StepReport,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Load, inspect, repair and persist one tabular dataset.
///
/// Use [`CleaningPipeline::builder()`] to create a pipeline with custom
/// configuration.
///
/// # Example
///
/// ```rust,ignore
/// use smart_cleaner::{CleanerConfig, CleaningPipeline};
///
/// let config = CleanerConfig::builder()
///     .input_path("dirty.csv")
///     .output_path("clean.csv")
///     .build()?;
///
/// let mut pipeline = CleaningPipeline::builder().config(config).build()?;
/// for outcome in pipeline.run() {
///     match outcome.result {
///         Ok(report) => println!("{report}"),
///         Err(e) => eprintln!("{}: {e}", outcome.stage),
///     }
/// }
/// ```
pub struct CleaningPipeline {
    config: CleanerConfig,
    dataset: Option<Dataset>,
    load_error: Option<CleaningError>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

// A pipeline can be handed to a worker thread.
static_assertions::assert_impl_all!(CleaningPipeline: Send);

/// The result of one driver step.
#[derive(Debug)]
pub struct StepOutcome {
    pub stage: CleaningStage,
    pub result: Result<StepReport>,
}

impl StepOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl CleaningPipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> CleaningPipelineBuilder {
        CleaningPipelineBuilder::default()
    }

    /// Build a pipeline with default settings reading from `path`.
    ///
    /// # Errors
    ///
    /// Only configuration errors are returned. A file that cannot be loaded
    /// leaves the pipeline empty, see [`load_error`](Self::load_error).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let config = CleanerConfig::builder().input_path(path).build()?;
        Self::builder().config(config).build()
    }

    /// Load a file, replacing any dataset already held.
    ///
    /// Returns whether data is now loaded. On failure the diagnostic is
    /// logged and kept in [`load_error`](Self::load_error).
    pub fn load(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Loading,
            format!("Loading {}", path.display()),
        ));

        match Dataset::from_csv_path(path, &self.config) {
            Ok(dataset) => {
                info!(
                    "Data loaded successfully from {} ({} rows, {} columns)",
                    path.display(),
                    dataset.height(),
                    dataset.width()
                );
                self.dataset = Some(dataset);
                self.load_error = None;
                true
            }
            Err(e) => {
                error!("{}", e);
                self.dataset = None;
                self.load_error = Some(e);
                false
            }
        }
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn into_dataset(self) -> Option<Dataset> {
        self.dataset
    }

    /// Why the last load failed, if it did.
    pub fn load_error(&self) -> Option<&CleaningError> {
        self.load_error.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.dataset.is_some()
    }

    /// Column kinds, non-null counts and numeric statistics.
    pub fn summarize(&self) -> Result<DatasetSummary> {
        let stage = CleaningStage::Summarizing;
        self.begin(stage);
        let dataset = self.loaded(stage)?;

        DataProfiler::summarize(dataset).map_err(|e| CleaningError::step_failed(stage, e))
    }

    /// Columns that hold missing cells, with their counts.
    pub fn identify_missing(&self) -> Result<MissingReport> {
        let stage = CleaningStage::IdentifyingMissing;
        self.begin(stage);
        let dataset = self.loaded(stage)?;

        let report = DataProfiler::identify_missing(dataset);
        debug!("{} missing cell(s) found", report.total_missing());
        Ok(report)
    }

    /// Fill missing cells with the column mean (numeric) or mode (others).
    pub fn impute_missing(&mut self) -> Result<ImputationReport> {
        let stage = CleaningStage::Imputing;
        self.begin(stage);
        let dataset = self.loaded_mut(stage)?;

        let report = StatisticalImputer::impute_dataset(dataset)
            .map_err(|e| CleaningError::step_failed(stage, e))?;
        info!("Missing values handled by mean/mode imputation.");
        Ok(report)
    }

    /// Drop rows that repeat an earlier row.
    pub fn remove_duplicates(&mut self) -> Result<DuplicateReport> {
        let stage = CleaningStage::Deduplicating;
        self.begin(stage);
        let dataset = self.loaded_mut(stage)?;

        let rows_before = dataset.height();
        let (deduped, removed) = DataCleaner::remove_duplicates(dataset.frame())
            .map_err(|e| CleaningError::step_failed(stage, e))?;
        dataset.set_frame(deduped);

        info!("Duplicates removed: {}", removed);
        Ok(DuplicateReport {
            rows_before,
            rows_after: dataset.height(),
            removed,
        })
    }

    /// Parse temporal columns and title-case text columns.
    pub fn fix_formats(&mut self) -> Result<FormatReport> {
        let stage = CleaningStage::FixingFormats;
        self.begin(stage);
        let markers = self.config.missing_markers.clone();
        let dataset = self.loaded_mut(stage)?;

        let report = DataCleaner::fix_formats(dataset, &markers)
            .map_err(|e| CleaningError::step_failed(stage, e))?;
        info!("Inconsistent formats fixed where applicable.");
        Ok(report)
    }

    /// Write the current dataset to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<SaveReport> {
        let stage = CleaningStage::Saving;
        self.begin(stage);
        let dataset = self.loaded(stage)?;

        dataset.to_csv_path(path, self.config.delimiter)
    }

    /// Run every step in driver order, writing to the configured output
    /// path.
    ///
    /// Never stops early: each step's outcome is logged and collected.
    pub fn run(&mut self) -> Vec<StepOutcome> {
        let mut outcomes = Vec::with_capacity(CleaningStage::STEPS.len());

        for stage in CleaningStage::STEPS {
            let result = self.run_step(stage);
            if let Err(e) = &result
                && !e.is_advisory()
            {
                error!("{}", e);
            }
            outcomes.push(StepOutcome { stage, result });
        }

        let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
        self.report_progress(ProgressUpdate::complete(format!(
            "Cleaning finished: {} of {} steps succeeded",
            outcomes.len() - failed,
            outcomes.len()
        )));
        outcomes
    }

    fn run_step(&mut self, stage: CleaningStage) -> Result<StepReport> {
        match stage {
            CleaningStage::Summarizing => self.summarize().map(StepReport::Summary),
            CleaningStage::IdentifyingMissing => self.identify_missing().map(StepReport::Missing),
            CleaningStage::Imputing => self.impute_missing().map(StepReport::Imputation),
            CleaningStage::Deduplicating => self.remove_duplicates().map(StepReport::Duplicates),
            CleaningStage::FixingFormats => self.fix_formats().map(StepReport::Formats),
            CleaningStage::Saving => {
                let output = self.config.output_path.clone();
                self.save(output).map(StepReport::Saved)
            }
            CleaningStage::Loading | CleaningStage::Complete => {
                Err(CleaningError::step_failed(stage, "not a driver step"))
            }
        }
    }

    fn begin(&self, stage: CleaningStage) {
        debug!("Starting: {}", stage);
        self.report_progress(ProgressUpdate::new(stage, stage.display_name()));
    }

    fn loaded(&self, stage: CleaningStage) -> Result<&Dataset> {
        self.dataset.as_ref().ok_or_else(|| no_data(stage))
    }

    fn loaded_mut(&mut self, stage: CleaningStage) -> Result<&mut Dataset> {
        self.dataset.as_mut().ok_or_else(|| no_data(stage))
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }
}

fn no_data(stage: CleaningStage) -> CleaningError {
    let advisory = CleaningError::NoDataLoaded(stage);
    warn!("{}", advisory);
    advisory
}

/// Builder for creating a [`CleaningPipeline`].
#[derive(Default)]
pub struct CleaningPipelineBuilder {
    config: Option<CleanerConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(CleaningPipelineBuilder: Send);

impl CleaningPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: CleanerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set a progress reporter for receiving stage updates.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// Convenience over [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Validate the configuration and load the input file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a bad configuration. Load failures are
    /// not errors here: the pipeline is returned without data.
    pub fn build(self) -> Result<CleaningPipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let input = config.input_path.clone();
        let mut pipeline = CleaningPipeline {
            config,
            dataset: None,
            load_error: None,
            progress_reporter: self.progress_reporter,
        };
        pipeline.load(&input);

        Ok(pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::sync::Mutex;

    fn pipeline_for(content: &str) -> (tempfile::TempDir, CleaningPipeline) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("dirty.csv");
        fs::write(&input, content).unwrap();
        let config = CleanerConfig::builder()
            .input_path(&input)
            .output_path(dir.path().join("clean.csv"))
            .build()
            .unwrap();
        let pipeline = CleaningPipeline::builder().config(config).build().unwrap();
        (dir, pipeline)
    }

    #[test]
    fn test_build_loads_input() {
        let (_dir, pipeline) = pipeline_for("a,b\n1,x\n2,y\n");
        assert!(pipeline.is_loaded());
        assert!(pipeline.load_error().is_none());
        assert_eq!(pipeline.dataset().unwrap().height(), 2);
    }

    #[test]
    fn test_missing_input_makes_every_step_an_advisory() {
        let mut pipeline = CleaningPipeline::open("no/such/file.csv").unwrap();

        assert!(!pipeline.is_loaded());
        assert!(matches!(
            pipeline.load_error(),
            Some(CleaningError::FileNotFound(_))
        ));

        let outcomes = pipeline.run();
        assert_eq!(outcomes.len(), CleaningStage::STEPS.len());
        for outcome in &outcomes {
            let err = outcome.result.as_ref().unwrap_err();
            assert!(err.is_advisory(), "{:?} was {:?}", outcome.stage, err);
        }
        assert_eq!(
            outcomes[0].result.as_ref().unwrap_err().to_string(),
            "No data to summarize."
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = CleanerConfig {
            temporal_threshold: 0.0,
            ..CleanerConfig::default()
        };
        let err = CleaningPipeline::builder().config(config).build().err().unwrap();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_remove_duplicates_reports_counts() {
        let (_dir, mut pipeline) = pipeline_for("id,tag\n1,x\n2,y\n1,x\n");

        let report = pipeline.remove_duplicates().unwrap();
        assert_eq!(
            report,
            DuplicateReport {
                rows_before: 3,
                rows_after: 2,
                removed: 1
            }
        );
        assert_eq!(pipeline.remove_duplicates().unwrap().removed, 0);
    }

    #[test]
    fn test_load_replaces_dataset() {
        let (dir, mut pipeline) = pipeline_for("a\n1\n");
        let other = dir.path().join("other.csv");
        fs::write(&other, "x,y\n1,2\n3,4\n").unwrap();

        assert!(pipeline.load(&other));
        assert_eq!(pipeline.dataset().unwrap().column_names(), vec!["x", "y"]);

        assert!(!pipeline.load(dir.path().join("gone.csv")));
        assert!(!pipeline.is_loaded());
    }

    #[test]
    fn test_run_writes_output_and_reports_progress() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&stages);

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("dirty.csv");
        let output = dir.path().join("clean.csv");
        fs::write(&input, "n,name\n1,ann\n,bob\n3,ann\n3,ann\n").unwrap();
        let config = CleanerConfig::builder()
            .input_path(&input)
            .output_path(&output)
            .build()
            .unwrap();

        let mut pipeline = CleaningPipeline::builder()
            .config(config)
            .on_progress(move |u| sink.lock().unwrap().push(u.stage))
            .build()
            .unwrap();
        let outcomes = pipeline.run();

        assert!(outcomes.iter().all(StepOutcome::is_ok));
        assert!(output.exists());

        let mut expected = vec![CleaningStage::Loading];
        expected.extend(CleaningStage::STEPS);
        expected.push(CleaningStage::Complete);
        assert_eq!(*stages.lock().unwrap(), expected);
    }
}
