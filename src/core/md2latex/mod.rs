//! Markdown to LaTeX converter
//!
//! A single-pass, line-oriented scanner over Markdown. Block structure
//! (code, display math, tables, nested lists, headings) is tracked by
//! [`BlockScanner`]; text inside blocks goes through the inline
//! processor in [`inline`], which escapes LaTeX specials while leaving math,
//! code, bold and link spans intact.

pub mod escape;
pub mod inline;
pub mod matchers;
mod scanner;
pub mod state;
pub mod table;

use serde::Serialize;

use crate::preamble::{wrap_document, Engine};

pub use escape::{escape_code, escape_latex, strip_pictographs};
pub use inline::{clean_heading_text, process_inline, process_table_cell, InlineSpan};
pub use scanner::{wrap_code_line, BlockScanner, ScanOutput};
pub use state::{BlockState, ListDepth, ListKind};

// =============================================================================
// Warning System
// =============================================================================

/// Kind of warning generated during conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// A fenced code block was still open at end of input
    UnterminatedCodeBlock,
    /// A `$$` or `[` display-math block was still open at end of input
    UnterminatedMathBlock,
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningKind::UnterminatedCodeBlock => write!(f, "unterminated code block"),
            WarningKind::UnterminatedMathBlock => write!(f, "unterminated math block"),
        }
    }
}

/// A warning generated during Markdown to LaTeX conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionWarning {
    /// The kind of warning
    pub kind: WarningKind,
    /// Human-readable message
    pub message: String,
    /// Location context (e.g. "line 42")
    pub location: Option<String>,
}

impl ConversionWarning {
    /// Create a new warning
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        ConversionWarning {
            kind,
            message: message.into(),
            location: None,
        }
    }

    /// Add location context to the warning
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Warning for a block still open at end of input.
    pub fn unterminated(block: &BlockState, line: usize) -> Self {
        let kind = match block {
            BlockState::InCode(_) => WarningKind::UnterminatedCodeBlock,
            _ => WarningKind::UnterminatedMathBlock,
        };
        ConversionWarning::new(
            kind,
            format!("{} was never closed; closed at end of input", block.describe()),
        )
        .with_location(format!("line {}", line))
    }
}

impl std::fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref loc) = self.location {
            write!(f, "[{}] {}: {}", self.kind, loc, self.message)
        } else {
            write!(f, "[{}] {}", self.kind, self.message)
        }
    }
}

impl From<ConversionWarning> for crate::utils::error::CliDiagnostic {
    fn from(warning: ConversionWarning) -> Self {
        use crate::utils::error::{CliDiagnostic, DiagnosticSeverity};

        let mut diag = CliDiagnostic::new(
            DiagnosticSeverity::Warning,
            warning.kind.to_string(),
            warning.message,
        );
        if let Some(loc) = warning.location {
            diag = diag.with_location(loc);
        }
        diag
    }
}

/// Block counts collected while scanning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub headings: usize,
    pub tables: usize,
    pub table_rows: usize,
    pub list_items: usize,
    pub code_blocks: usize,
    pub math_blocks: usize,
    pub rules: usize,
}

/// Result of conversion with diagnostics
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// The complete LaTeX document
    pub output: String,
    /// Warnings generated during conversion
    pub warnings: Vec<ConversionWarning>,
    /// Block counts
    pub stats: ConversionStats,
}

impl ConversionResult {
    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get warnings as formatted strings
    pub fn format_warnings(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.to_string()).collect()
    }
}

/// Convert Markdown to the LaTeX body only (no preamble, no `document`).
pub fn markdown_to_latex_body(input: &str) -> String {
    BlockScanner::new(input).run().body()
}

/// Convert Markdown to a complete LaTeX document for `engine`.
pub fn markdown_to_latex(input: &str, engine: Engine) -> String {
    markdown_to_latex_with_diagnostics(input, engine).output
}

/// Convert Markdown to a complete LaTeX document, keeping warnings and stats.
///
/// # Example
///
/// ```
/// use mdlatex::{markdown_to_latex_with_diagnostics, Engine};
///
/// let result = markdown_to_latex_with_diagnostics("# Intro\n\nHello", Engine::PdfLatex);
/// assert!(result.output.contains("\\section{Intro}"));
/// assert_eq!(result.stats.headings, 1);
/// ```
pub fn markdown_to_latex_with_diagnostics(input: &str, engine: Engine) -> ConversionResult {
    let scanned = BlockScanner::new(input).run();
    let output = wrap_document(&scanned.body(), engine);
    ConversionResult {
        output,
        warnings: scanned.warnings,
        stats: scanned.stats,
    }
}
