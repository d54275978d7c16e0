//! Error handling for mdlatex
//!
//! The converter itself is total; errors come from the surrounding glue:
//! reading and writing files, finding a LaTeX engine and running it.

use std::fmt;

/// Conversion error type
#[derive(Debug, Clone)]
pub enum ConversionError {
    /// Invalid input (bad engine name, unreadable configuration, ...)
    InvalidInput { message: String },
    /// IO error (for file operations)
    IoError { message: String },
    /// No LaTeX engine could be located
    EngineNotFound { tried: Vec<String> },
    /// The engine ran but no PDF was produced
    CompileFailed {
        engine: String,
        message: String,
        hint: Option<String>,
    },
    /// Internal error
    InternalError { message: String },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::InvalidInput { message } => {
                write!(f, "Invalid input: {}", message)
            }
            ConversionError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
            ConversionError::EngineNotFound { tried } => {
                write!(
                    f,
                    "No LaTeX engine found (tried {}). Please install MiKTeX or TeX Live.",
                    tried.join(", ")
                )
            }
            ConversionError::CompileFailed {
                engine,
                message,
                hint,
            } => {
                if let Some(hint) = hint {
                    write!(f, "{} failed: {}. {}", engine, message, hint)
                } else {
                    write!(f, "{} failed: {}", engine, message)
                }
            }
            ConversionError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ConversionError {
    fn from(err: serde_json::Error) -> Self {
        ConversionError::internal(err.to_string())
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

// =============================================================================
// Unified CLI Diagnostic System
// =============================================================================

/// Severity level for CLI diagnostics (determines coloring and behavior).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    /// Failures (red) - e.g., engine missing, compilation failed
    Error,
    /// Warnings (yellow) - e.g., unterminated blocks closed at end of input
    Warning,
    /// Informational (cyan) - e.g., selected engine, written files
    Info,
}

/// Unified diagnostic type for CLI output.
#[derive(Debug, Clone)]
pub struct CliDiagnostic {
    /// Severity level (for coloring)
    pub severity: DiagnosticSeverity,
    /// Diagnostic kind as string (e.g., "unterminated code block")
    pub kind: String,
    /// Human-readable message
    pub message: String,
    /// Location context (e.g., "line 10", a file path)
    pub location: Option<String>,
}

impl CliDiagnostic {
    /// Create a new diagnostic.
    pub fn new(
        severity: DiagnosticSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind: kind.into(),
            message: message.into(),
            location: None,
        }
    }

    /// Add location context.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Get ANSI color code for this diagnostic's severity.
    pub fn color_code(&self) -> &'static str {
        match self.severity {
            DiagnosticSeverity::Error => "\x1b[31m",   // red
            DiagnosticSeverity::Warning => "\x1b[33m", // yellow
            DiagnosticSeverity::Info => "\x1b[36m",    // cyan
        }
    }

    /// Render for a terminal, optionally colored.
    pub fn render(&self, color: bool) -> String {
        if color {
            format!("{}{}\x1b[0m", self.color_code(), self)
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for CliDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref loc) = self.location {
            write!(f, "[{}] {}: {}", self.kind, loc, self.message)
        } else {
            write!(f, "[{}] {}", self.kind, self.message)
        }
    }
}

impl From<&ConversionError> for CliDiagnostic {
    fn from(err: &ConversionError) -> Self {
        let kind = match err {
            ConversionError::InvalidInput { .. } => "invalid input",
            ConversionError::IoError { .. } => "io",
            ConversionError::EngineNotFound { .. } => "engine not found",
            ConversionError::CompileFailed { .. } => "compile failed",
            ConversionError::InternalError { .. } => "internal",
        };
        CliDiagnostic::new(DiagnosticSeverity::Error, kind, err.to_string())
    }
}

// Convenience constructors for errors
impl ConversionError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ConversionError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ConversionError::InternalError {
            message: message.into(),
        }
    }

    pub fn compile_failed(
        engine: impl Into<String>,
        message: impl Into<String>,
        hint: Option<String>,
    ) -> Self {
        ConversionError::CompileFailed {
            engine: engine.into(),
            message: message.into(),
            hint,
        }
    }
}
