//! WASM bindings for mdlatex
//!
//! This module provides JavaScript-accessible functions for Markdown → LaTeX conversion.
//! Engine invocation is not available in the browser; only text conversion is exposed.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::core::md2latex::{BlockScanner, ConversionStats};
#[cfg(feature = "wasm")]
use crate::preamble::{wrap_document, Engine};

/// Markdown to LaTeX conversion options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize, Default)]
pub struct ConvertOptions {
    /// Target engine: "pdflatex", "xelatex" or "lualatex"
    #[serde(default)]
    pub engine: Option<String>,
    /// Return only the body, without preamble and `document` environment
    #[serde(default)]
    pub body_only: bool,
}

/// Conversion result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize)]
pub struct ConvertResult {
    /// The converted output
    pub output: String,
    /// Whether the conversion was successful
    pub success: bool,
    /// Error message if conversion failed
    pub error: Option<String>,
    /// Warnings during conversion
    pub warnings: Vec<String>,
    /// Block counts, absent on failure
    pub stats: Option<ConversionStats>,
}

#[cfg(feature = "wasm")]
impl ConvertResult {
    fn failure(message: String) -> Self {
        ConvertResult {
            output: String::new(),
            success: false,
            error: Some(message),
            warnings: vec![],
            stats: None,
        }
    }
}

/// Safely serialize a value to JsValue, returning an error object on failure.
#[cfg(feature = "wasm")]
fn to_js_value<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|e| {
        let error_obj = ConvertResult::failure(format!("Serialization error: {}", e));
        serde_wasm_bindgen::to_value(&error_obj).unwrap_or(JsValue::NULL)
    })
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Convert Markdown to a complete pdfLaTeX document
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "markdownToLatex")]
pub fn markdown_to_latex_wasm(input: &str) -> String {
    crate::markdown_to_latex(input, Engine::PdfLatex)
}

/// Convert Markdown to a LaTeX body without preamble
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "markdownToLatexBody")]
pub fn markdown_to_latex_body_wasm(input: &str) -> String {
    crate::markdown_to_latex_body(input)
}

/// Escape plain text for LaTeX
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "escapeLatex")]
pub fn escape_latex_wasm(input: &str) -> String {
    crate::escape_latex(input)
}

/// Convert with parsed options; the Markdown is scanned once.
#[cfg(feature = "wasm")]
fn convert_with_options(input: &str, opts: &ConvertOptions) -> ConvertResult {
    let engine = match opts.engine.as_deref() {
        Some(name) => match name.parse::<Engine>() {
            Ok(engine) => engine,
            Err(e) => return ConvertResult::failure(e.to_string()),
        },
        None => Engine::default(),
    };

    let scanned = BlockScanner::new(input).run();
    let body = scanned.body();
    let output = if opts.body_only {
        body
    } else {
        wrap_document(&body, engine)
    };

    ConvertResult {
        output,
        success: true,
        error: None,
        warnings: scanned.warnings.iter().map(|w| w.to_string()).collect(),
        stats: Some(scanned.stats),
    }
}

/// Convert Markdown to LaTeX with options
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "markdownToLatexWithOptions")]
pub fn markdown_to_latex_with_options_wasm(input: &str, options: JsValue) -> JsValue {
    let opts: ConvertOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();
    to_js_value(&convert_with_options(input, &opts))
}

/// Get the mdlatex version
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
