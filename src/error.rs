//! Error types for the Circuit Lab calculators.
//!
//! This module provides a unified error type [`LabError`]. The calculators
//! themselves only ever fail with [`LabError::Input`]; the remaining variants
//! belong to the sweep configuration and the chart/export boundary.

use thiserror::Error;

/// Result type alias using [`LabError`].
pub type Result<T> = std::result::Result<T, LabError>;

/// Unified error type for all Circuit Lab operations.
#[derive(Error, Debug)]
pub enum LabError {
    // ============ Calculator Errors ============
    /// A required value is missing, non-numeric, non-finite or not positive
    #[error("{message}")]
    Input { message: String },

    // ============ Configuration Errors ============
    /// Invalid frequency sweep configuration
    #[error("Invalid sweep configuration: {message}")]
    InvalidSweepConfig { message: String },

    // ============ Chart Errors ============
    /// Export requested before any filter was analyzed
    #[error("Please analyze a filter first to generate a graph.")]
    NoChart,

    /// Error writing an exported chart image
    #[error("Failed to write chart image '{path}': {source}")]
    ChartWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl LabError {
    /// Create an input error
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Create a sweep configuration error
    pub fn sweep_config(message: impl Into<String>) -> Self {
        Self::InvalidSweepConfig {
            message: message.into(),
        }
    }

    /// Check whether this is the user-facing input error.
    pub fn is_input_error(&self) -> bool {
        matches!(self, LabError::Input { .. })
    }
}
