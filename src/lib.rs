//! # mdlatex
//!
//! Markdown → LaTeX transpiler with optional PDF compilation.
//!
//! The converter is a single-pass block scanner (code, display math, tables,
//! nested lists, headings) feeding an inline processor that escapes text while
//! preserving math, code, bold and link spans. The generated document carries
//! a preamble tailored to the target engine.
//!
//! ## Features
//!
//! - **Total conversion**: every input produces a document; unterminated
//!   blocks are closed and reported as warnings
//! - **Engine-aware preamble**: `fontspec` for XeLaTeX/LuaLaTeX, `inputenc`
//!   for pdfLaTeX
//! - **Compiler driver**: engine discovery, non-stop compilation and
//!   auxiliary file clean-up
//! - **WASM Support**: text conversion in the browser
//!
//! ## Example
//!
//! ```rust
//! use mdlatex::{markdown_to_latex, markdown_to_latex_body, Engine};
//!
//! let body = markdown_to_latex_body("Price: $x^2$ & 50%");
//! assert!(body.contains("$x^2$ \\& 50\\%"));
//!
//! let doc = markdown_to_latex("# Intro", Engine::XeLatex);
//! assert!(doc.contains("\\usepackage{fontspec}"));
//! assert!(doc.contains("\\section{Intro}"));
//! ```

pub mod compile;
pub mod core;
pub mod data;
pub mod preamble;
pub mod utils;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use crate::core::md2latex::{
    clean_heading_text, escape_code, escape_latex, markdown_to_latex, markdown_to_latex_body,
    markdown_to_latex_with_diagnostics, process_inline, process_table_cell, strip_pictographs,
    ConversionResult, ConversionStats, ConversionWarning, WarningKind,
};
pub use crate::compile::{
    compile_document, convert_file, convert_source, CompileConfig, CompileOutcome,
    ConvertFileOptions, FileConversion, LocatedEngine,
};
pub use crate::preamble::{render_preamble, wrap_document, Engine};
pub use crate::utils::error::{CliDiagnostic, ConversionError, DiagnosticSeverity};
pub use crate::utils::report::ConversionReport;
