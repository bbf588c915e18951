//! Imputation module for handling missing values.
//!
//! Numeric columns are filled with their mean, every other column with its
//! most frequent value.

mod statistical;

pub use statistical::StatisticalImputer;
