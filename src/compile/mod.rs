//! Compilation of converted documents with a local LaTeX engine.
//!
//! Everything here is glue around the converter: choosing and locating an
//! engine, writing the `.tex` file, running the engine as a blocking
//! subprocess and tidying up afterwards. A missing engine is not an error
//! for [`convert_file`]; the `.tex` file is still written.

pub mod cleanup;
pub mod discovery;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::md2latex::{markdown_to_latex_with_diagnostics, ConversionResult};
use crate::preamble::Engine;
use crate::utils::error::{ConversionError, ConversionResult as Result};

pub use cleanup::{aux_paths, cleanup_aux_files, AUX_EXTENSIONS};
pub use discovery::{
    candidate_engines, fallback_paths, find_engine, needs_unicode_engine, preferred_engine,
    LocatedEngine,
};

/// Environment variable naming the engine to use.
pub const ENGINE_ENV: &str = "MD2TEX_ENGINE";
/// Environment variable with extra directories to search for engines.
pub const TEXBIN_ENV: &str = "MD2TEX_TEXBIN";

/// Engine selection and clean-up settings.
#[derive(Debug, Clone, Default)]
pub struct CompileConfig {
    /// Use this engine instead of detecting one from the document.
    pub engine: Option<Engine>,
    /// Directories searched after `PATH`.
    pub extra_search_dirs: Vec<PathBuf>,
    /// Leave `.aux`, `.log`, ... next to the output.
    pub keep_aux: bool,
}

impl CompileConfig {
    /// Read `MD2TEX_ENGINE` and `MD2TEX_TEXBIN`.
    pub fn from_env() -> Self {
        let engine = env::var(ENGINE_ENV)
            .ok()
            .and_then(|name| match name.parse::<Engine>() {
                Ok(engine) => Some(engine),
                Err(err) => {
                    log::warn!("ignoring {}: {}", ENGINE_ENV, err);
                    None
                }
            });
        let extra_search_dirs = env::var_os(TEXBIN_ENV)
            .map(|dirs| env::split_paths(&dirs).collect())
            .unwrap_or_default();
        Self {
            engine,
            extra_search_dirs,
            keep_aux: false,
        }
    }

    /// Override values with those set on `other`.
    pub fn merge(mut self, other: CompileConfig) -> Self {
        if other.engine.is_some() {
            self.engine = other.engine;
        }
        self.extra_search_dirs.extend(other.extra_search_dirs);
        self.keep_aux |= other.keep_aux;
        self
    }
}

/// Default `.tex` path for a Markdown input.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("tex")
}

/// Run `engine` on `tex_path` and return the produced PDF.
///
/// The engine runs in the file's directory in non-stop mode. Success is the
/// existence of `<stem>.pdf`; the engine's exit status is not trusted since
/// LaTeX often exits non-zero after recoverable errors. A PDF left over
/// from an earlier run is deleted first.
pub fn compile_document(tex_path: &Path, engine: &LocatedEngine) -> Result<PathBuf> {
    let file_name = tex_path
        .file_name()
        .ok_or_else(|| ConversionError::invalid(format!("not a file: {}", tex_path.display())))?;
    let work_dir = match tex_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let pdf = tex_path.with_extension("pdf");
    if pdf.exists() {
        log::debug!("removing previous {}", pdf.display());
        fs::remove_file(&pdf)?;
    }

    log::info!("compiling {} with {}", tex_path.display(), engine.path.display());
    let output = Command::new(&engine.path)
        .arg("-interaction=nonstopmode")
        .arg(file_name)
        .current_dir(work_dir)
        .output()?;

    if pdf.exists() {
        return Ok(pdf);
    }

    let stdout = String::from_utf8_lossy(&output.stdout).to_lowercase();
    let stderr = String::from_utf8_lossy(&output.stderr).to_lowercase();
    let hint = (stdout.contains("error") || stderr.contains("error"))
        .then(|| "Errors found in compilation output".to_string());
    log::warn!("{} produced no PDF ({})", engine.engine, output.status);
    Err(ConversionError::compile_failed(
        engine.engine.binary_name(),
        format!("no PDF produced ({})", output.status),
        hint,
    ))
}

/// Result of the compilation step of [`convert_file`].
#[derive(Debug, Clone)]
pub enum CompileOutcome {
    /// Compilation was not requested.
    Skipped,
    /// No engine binary was found; the `.tex` file is still written.
    EngineNotFound { tried: Vec<Engine> },
    /// The engine produced this PDF.
    Compiled(PathBuf),
    /// The engine ran but no PDF appeared.
    Failed(ConversionError),
}

impl CompileOutcome {
    pub fn pdf_path(&self) -> Option<&Path> {
        match self {
            CompileOutcome::Compiled(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CompileOutcome::Failed(_))
    }

    /// The condition to report, if compilation did not produce a PDF.
    pub fn to_error(&self) -> Option<ConversionError> {
        match self {
            CompileOutcome::EngineNotFound { tried } => Some(ConversionError::EngineNotFound {
                tried: tried.iter().map(|e| e.binary_name().to_string()).collect(),
            }),
            CompileOutcome::Failed(err) => Some(err.clone()),
            CompileOutcome::Skipped | CompileOutcome::Compiled(_) => None,
        }
    }
}

/// What [`convert_file`] did.
#[derive(Debug, Clone)]
pub struct FileConversion {
    pub tex_path: PathBuf,
    /// Engine the document was generated for.
    pub engine: Engine,
    /// Engine binary used, if one was found and compilation was requested.
    pub located: Option<LocatedEngine>,
    pub compile: CompileOutcome,
    pub conversion: ConversionResult,
}

/// Options for [`convert_file`].
#[derive(Debug, Clone, Default)]
pub struct ConvertFileOptions {
    /// Target `.tex` path; defaults to the input with a `.tex` extension.
    pub output: Option<PathBuf>,
    /// Run the engine after writing the `.tex` file.
    pub compile: bool,
    pub config: CompileConfig,
}

/// Convert a Markdown file, write the `.tex` file and optionally compile it.
pub fn convert_file(input: &Path, options: &ConvertFileOptions) -> Result<FileConversion> {
    let markdown = fs::read_to_string(input)?;
    let tex_path = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input));
    convert_source(&markdown, tex_path, options)
}

/// Convert Markdown text into `tex_path` and optionally compile it.
///
/// The engine is located before conversion so the preamble matches the
/// binary that will run. If none is found the document is generated for the
/// preferred engine and written without compiling. Only I/O errors while
/// writing the `.tex` file are returned as `Err`.
pub fn convert_source(
    markdown: &str,
    tex_path: PathBuf,
    options: &ConvertFileOptions,
) -> Result<FileConversion> {
    let candidates = candidate_engines(needs_unicode_engine(markdown));
    let located = if options.compile {
        find_engine(&candidates, &options.config)
    } else {
        None
    };
    let engine = located
        .as_ref()
        .map(|l| l.engine)
        .unwrap_or_else(|| preferred_engine(markdown, &options.config));

    let conversion = markdown_to_latex_with_diagnostics(markdown, engine);
    fs::write(&tex_path, &conversion.output)?;
    log::info!("wrote {}", tex_path.display());

    let compile = match (options.compile, located.as_ref()) {
        (false, _) => CompileOutcome::Skipped,
        (true, None) => CompileOutcome::EngineNotFound {
            tried: match options.config.engine {
                Some(engine) => vec![engine],
                None => candidates,
            },
        },
        (true, Some(located)) => match compile_document(&tex_path, located) {
            Ok(pdf) => {
                if !options.config.keep_aux {
                    let removed = cleanup_aux_files(&tex_path);
                    log::debug!("removed {} auxiliary files", removed);
                }
                CompileOutcome::Compiled(pdf)
            }
            Err(err) => CompileOutcome::Failed(err),
        },
    };

    Ok(FileConversion {
        tex_path,
        engine,
        located,
        compile,
        conversion,
    })
}
