//! md2tex CLI - Markdown → LaTeX converter with optional PDF compilation

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use mdlatex::{
    compile::{candidate_engines, find_engine, needs_unicode_engine, preferred_engine},
    convert_file, convert_source, markdown_to_latex_with_diagnostics, CliDiagnostic,
    CompileConfig, CompileOutcome, ConversionReport, ConversionWarning, ConvertFileOptions,
    DiagnosticSeverity, Engine,
};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "md2tex")]
#[command(version)]
#[command(about = "md2tex - Convert Markdown to LaTeX and compile it to PDF", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input Markdown file (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output .tex path (default: input with .tex extension, stdout for stdin)
    #[arg(short, long)]
    output: Option<String>,

    /// LaTeX engine (overrides detection and MD2TEX_ENGINE)
    #[arg(short, long, value_enum)]
    engine: Option<EngineArg>,

    /// Only write the .tex file, do not run the engine
    #[arg(long)]
    no_compile: bool,

    /// Keep auxiliary files (.aux, .log, ...) after compiling
    #[arg(long)]
    keep_aux: bool,

    /// Write a JSON conversion report to this path
    #[arg(long)]
    report: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Print the engine that would be used for a file
    Detect {
        /// Input Markdown file
        input: String,

        /// LaTeX engine to look for instead of detecting one
        #[arg(short, long, value_enum)]
        engine: Option<EngineArg>,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum EngineArg {
    /// pdfLaTeX (ASCII source, inputenc)
    Pdflatex,
    /// XeLaTeX (Unicode, fontspec)
    Xelatex,
    /// LuaLaTeX (Unicode, fontspec)
    Lualatex,
}

#[cfg(feature = "cli")]
impl From<EngineArg> for Engine {
    fn from(arg: EngineArg) -> Self {
        match arg {
            EngineArg::Pdflatex => Engine::PdfLatex,
            EngineArg::Xelatex => Engine::XeLatex,
            EngineArg::Lualatex => Engine::LuaLatex,
        }
    }
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let color = !cli.no_color;

    // Handle subcommands first
    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd);
    }

    let config = CompileConfig::from_env().merge(CompileConfig {
        engine: cli.engine.map(Engine::from),
        extra_search_dirs: Vec::new(),
        keep_aux: cli.keep_aux,
    });

    let options = ConvertFileOptions {
        output: cli.output.as_ref().map(PathBuf::from),
        compile: !cli.no_compile,
        config,
    };

    let result = match cli.input_file {
        Some(ref path) => convert_file(Path::new(path), &options),
        None => {
            let mut markdown = String::new();
            io::stdin().read_to_string(&mut markdown)?;

            match options.output.clone() {
                Some(tex_path) => convert_source(&markdown, tex_path, &options),
                None => {
                    // No file to compile: print the document and stop.
                    let engine = preferred_engine(&markdown, &options.config);
                    let result = markdown_to_latex_with_diagnostics(&markdown, engine);
                    report_warnings(&result.warnings, None, color);
                    io::stdout().write_all(result.output.as_bytes())?;
                    io::stdout().write_all(b"\n")?;
                    if let Some(ref report) = cli.report {
                        write_report(report, None, engine, &result)?;
                    }
                    return Ok(());
                }
            }
        }
    };

    let converted = match result {
        Ok(converted) => converted,
        Err(err) => {
            eprintln!("{}", CliDiagnostic::from(&err).render(color));
            std::process::exit(1);
        }
    };

    report_warnings(
        &converted.conversion.warnings,
        cli.input_file.as_deref(),
        color,
    );
    eprintln!("✓ Output written to: {}", converted.tex_path.display());

    if let Some(ref report) = cli.report {
        write_report(
            report,
            cli.input_file.clone(),
            converted.engine,
            &converted.conversion,
        )?;
    }

    match &converted.compile {
        CompileOutcome::Skipped => {}
        CompileOutcome::Compiled(pdf) => {
            eprintln!("✓ PDF written to: {}", pdf.display());
        }
        CompileOutcome::EngineNotFound { .. } => {
            if let Some(err) = converted.compile.to_error() {
                let diag = CliDiagnostic::from(&err);
                let diag = CliDiagnostic::new(DiagnosticSeverity::Warning, diag.kind, diag.message);
                eprintln!("{}", diag.render(color));
            }
            eprintln!("  The .tex file was written; compile it manually or install an engine:");
            eprintln!("  - Windows: MiKTeX from https://miktex.org/download");
            eprintln!("  - Linux:   sudo apt-get install texlive-xetex texlive-latex-extra");
            eprintln!("  - macOS:   MacTeX from https://tug.org/mactex/");
            eprintln!("  Set MD2TEX_TEXBIN to search additional directories.");
        }
        CompileOutcome::Failed(err) => {
            eprintln!("{}", CliDiagnostic::from(err).render(color));
            if let Some(ref located) = converted.located {
                eprintln!(
                    "  Check the log next to {} ({} at {})",
                    converted.tex_path.display(),
                    located.engine,
                    located.path.display()
                );
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands) -> io::Result<()> {
    match cmd {
        Commands::Detect { input, engine } => {
            let markdown = fs::read_to_string(&input)?;
            let config = CompileConfig::from_env().merge(CompileConfig {
                engine: engine.map(Engine::from),
                ..CompileConfig::default()
            });

            let candidates = candidate_engines(needs_unicode_engine(&markdown));
            match find_engine(&candidates, &config) {
                Some(located) => {
                    println!("{}", located.engine);
                    eprintln!("found at {}", located.path.display());
                }
                None => {
                    println!("{}", preferred_engine(&markdown, &config));
                    eprintln!("not installed");
                }
            }
        }

        Commands::Info => {
            println!("md2tex - Markdown → LaTeX converter");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Supported Markdown:");
            println!("  ✓ Headings (# to ####), bold, inline code, links");
            println!("  ✓ Inline math ($...$) and display math ($$ and [ ] blocks)");
            println!("  ✓ Fenced code blocks (``` and ~~~)");
            println!("  ✓ Pipe tables with inline formatting in cells");
            println!("  ✓ Nested ordered and unordered lists");
            println!();
            println!("Engines:");
            for engine in Engine::ALL {
                let kind = if engine.is_unicode() {
                    "Unicode, fontspec"
                } else {
                    "inputenc"
                };
                println!("  - {} ({})", engine, kind);
            }
            println!();
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn report_warnings(warnings: &[ConversionWarning], source: Option<&str>, color: bool) {
    for warning in warnings {
        let mut diag = CliDiagnostic::from(warning.clone());
        if let (Some(source), Some(location)) = (source, diag.location.take()) {
            diag = diag.with_location(format!("{}, {}", source, location));
        } else if let Some(source) = source {
            diag = diag.with_location(source);
        }
        eprintln!("{}", diag.render(color));
    }
}

#[cfg(feature = "cli")]
fn write_report(
    path: &str,
    source: Option<String>,
    engine: Engine,
    result: &mdlatex::ConversionResult,
) -> io::Result<()> {
    let report = ConversionReport::new(source, engine, result);
    let json = report.to_json().map_err(io::Error::other)?;
    fs::write(path, json)?;
    eprintln!("✓ Report written to: {}", path);
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install mdlatex --features cli");
    eprintln!("  md2tex [OPTIONS] [INPUT_FILE]");
}
