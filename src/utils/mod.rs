//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error types and CLI diagnostics
//! - JSON conversion reports

pub mod error;
pub mod report;

// Re-export commonly used items
pub use error::{CliDiagnostic, ConversionError, ConversionResult, DiagnosticSeverity};
pub use report::ConversionReport;
