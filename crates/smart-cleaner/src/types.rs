use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

const RULE_WIDTH: usize = 80;

/// Semantic type of a column, fixed once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Text,
    Temporal,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
            Self::Temporal => "temporal",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Summary
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
    /// Storage dtype, e.g. "f64" or "str".
    pub dtype: String,
    pub non_null_count: usize,
    pub missing_count: usize,
}

/// Descriptive statistics of one numeric column.
///
/// Quantiles use linear interpolation between the closest ranks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; absent with fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: usize,
    pub column_summaries: Vec<ColumnSummary>,
    pub numeric_stats: Vec<NumericStats>,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset Summary:")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "Rows: {}  Columns: {}", self.rows, self.columns)?;
        writeln!(
            f,
            "{:<24} {:<10} {:<16} {:>10} {:>10}",
            "Column", "Kind", "Dtype", "Non-Null", "Missing"
        )?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        for col in &self.column_summaries {
            writeln!(
                f,
                "{:<24} {:<10} {:<16} {:>10} {:>10}",
                truncate_str(&col.name, 23),
                col.kind,
                truncate_str(&col.dtype, 15),
                col.non_null_count,
                col.missing_count
            )?;
        }

        if self.numeric_stats.is_empty() {
            return writeln!(f, "No numeric columns to describe.");
        }

        writeln!(f)?;
        writeln!(f, "Descriptive Statistics:")?;
        writeln!(
            f,
            "{:<16} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            "Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        )?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH + 16))?;
        for stats in &self.numeric_stats {
            let std = stats
                .std
                .map(|s| format!("{s:.3}"))
                .unwrap_or_else(|| "NaN".to_string());
            writeln!(
                f,
                "{:<16} {:>7} {:>10.3} {:>10} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
                truncate_str(&stats.column, 15),
                stats.count,
                stats.mean,
                std,
                stats.min,
                stats.q25,
                stats.median,
                stats.q75,
                stats.max
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Missing values
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingColumn {
    pub column: String,
    pub missing_count: usize,
}

/// Columns with at least one missing cell, in column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissingReport {
    pub columns: Vec<MissingColumn>,
}

impl MissingReport {
    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|c| c.missing_count).sum()
    }
}

impl fmt::Display for MissingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Missing Values Summary:")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        if self.columns.is_empty() {
            return writeln!(f, "No missing values found.");
        }
        for col in &self.columns {
            writeln!(f, "{:<40} {:>10}", col.column, col.missing_count)?;
        }
        Ok(())
    }
}

// ============================================================================
// Imputation
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputationMethod {
    Mean,
    Mode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImputedColumn {
    pub column: String,
    pub method: ImputationMethod,
    /// Fill value as text.
    pub value: String,
    pub cells_filled: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImputationReport {
    pub imputed: Vec<ImputedColumn>,
    /// Columns left untouched because every cell is missing.
    pub skipped: Vec<String>,
}

impl ImputationReport {
    pub fn cells_filled(&self) -> usize {
        self.imputed.iter().map(|c| c.cells_filled).sum()
    }
}

impl fmt::Display for ImputationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Missing values handled by mean/mode imputation.")?;
        for col in &self.imputed {
            let method = match col.method {
                ImputationMethod::Mean => "mean",
                ImputationMethod::Mode => "mode",
            };
            writeln!(
                f,
                "  - Filled {} cell(s) in '{}' with {}: {}",
                col.cells_filled, col.column, method, col.value
            )?;
        }
        for col in &self.skipped {
            writeln!(f, "  ! Skipped '{}': no present values", col)?;
        }
        Ok(())
    }
}

// ============================================================================
// Duplicates, formats, save
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub removed: usize,
}

impl fmt::Display for DuplicateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Duplicates removed: {}", self.removed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalFix {
    pub column: String,
    /// Present cells that failed to parse and became missing.
    pub coerced_to_missing: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatReport {
    pub temporal: Vec<TemporalFix>,
    pub title_cased: Vec<String>,
}

impl fmt::Display for FormatReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Inconsistent formats fixed where applicable.")?;
        for fix in &self.temporal {
            writeln!(
                f,
                "  - Parsed '{}' as dates ({} unparsable cell(s) set to missing)",
                fix.column, fix.coerced_to_missing
            )?;
        }
        if !self.title_cased.is_empty() {
            writeln!(f, "  - Title-cased: {}", self.title_cased.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveReport {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

impl fmt::Display for SaveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cleaned data saved to {}", self.path.display())
    }
}

/// Result of any single pipeline step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepReport {
    Summary(DatasetSummary),
    Missing(MissingReport),
    Imputation(ImputationReport),
    Duplicates(DuplicateReport),
    Formats(FormatReport),
    Saved(SaveReport),
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Summary(r) => r.fmt(f),
            Self::Missing(r) => r.fmt(f),
            Self::Imputation(r) => r.fmt(f),
            Self::Duplicates(r) => r.fmt(f),
            Self::Formats(r) => r.fmt(f),
            Self::Saved(r) => r.fmt(f),
        }
    }
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
