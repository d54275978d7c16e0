//! Machine-readable conversion report.

use serde::Serialize;

use crate::core::md2latex::{ConversionResult, ConversionStats, ConversionWarning};
use crate::preamble::Engine;

#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub source: Option<String>,
    pub engine: Engine,
    pub stats: ConversionStats,
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionReport {
    pub fn new(source: Option<String>, engine: Engine, result: &ConversionResult) -> Self {
        Self {
            source,
            engine,
            stats: result.stats,
            warnings: result.warnings.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
