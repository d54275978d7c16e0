//! LaTeX engines and the document preamble emitted for each.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::error::ConversionError;

/// Monospace fonts tried in order on Unicode engines; missing ones are skipped.
const MONO_FONTS: [&str; 4] = ["Consolas", "DejaVu Sans Mono", "Fira Code", "Courier New"];

/// The LaTeX engine the output targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// ASCII-oriented; needs `inputenc` for UTF-8 prose.
    #[default]
    PdfLatex,
    /// Unicode engine with system fonts via `fontspec`.
    XeLatex,
    /// Unicode engine with system fonts via `fontspec`.
    LuaLatex,
}

impl Engine {
    pub const ALL: [Engine; 3] = [Engine::PdfLatex, Engine::XeLatex, Engine::LuaLatex];

    /// Executable name, without platform extension.
    pub fn binary_name(self) -> &'static str {
        match self {
            Engine::PdfLatex => "pdflatex",
            Engine::XeLatex => "xelatex",
            Engine::LuaLatex => "lualatex",
        }
    }

    /// Whether the engine can load system fonts and read Unicode natively.
    pub fn is_unicode(self) -> bool {
        matches!(self, Engine::XeLatex | Engine::LuaLatex)
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary_name())
    }
}

impl FromStr for Engine {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Engine::ALL
            .into_iter()
            .find(|engine| engine.binary_name() == name)
            .ok_or_else(|| {
                ConversionError::invalid(format!(
                    "unknown engine '{}' (expected pdflatex, xelatex or lualatex)",
                    s
                ))
            })
    }
}

/// Engine-specific part of the preamble.
fn render_engine_preamble(engine: Engine) -> String {
    let mut out = String::new();
    if engine.is_unicode() {
        out.push_str("\\usepackage{fontspec}\n");
        out.push_str(
            "\\newcommand{\\TrySetMono}[1]{\\IfFontExistsTF{#1}{\\setmonofont{#1}}{}}\n",
        );
        for font in MONO_FONTS {
            out.push_str(&format!("\\TrySetMono{{{}}}\n", font));
        }
    } else {
        out.push_str("\\usepackage[utf8]{inputenc}\n");
    }
    out
}

/// Full preamble up to (not including) `\begin{document}`.
pub fn render_preamble(engine: Engine) -> String {
    let mut out = String::new();
    out.push_str("\\documentclass{article}\n");
    out.push_str("\\usepackage[margin=0.6in]{geometry}\n");
    out.push_str("\\usepackage{amsmath}\n");
    out.push_str("\\usepackage{amssymb}\n");
    out.push_str("\\usepackage{textcomp}\n");
    out.push_str("\\usepackage[official]{eurosym}\n");
    out.push_str("\\usepackage{hyperref}\n");
    out.push_str("\\usepackage{longtable}\n");
    out.push_str("\\usepackage{array}\n");
    out.push_str("\\usepackage{adjustbox}\n");
    out.push_str("\\usepackage{enumitem}\n");
    out.push_str("\\setlength{\\parindent}{0pt}\n");
    out.push_str("\\setlist[itemize]{leftmargin=2em}\n");
    out.push_str("\\setlist[enumerate]{leftmargin=2.5em}\n");
    out.push_str("% Number subsubsections as 1, 2, 3 (no parent prefixes like 0.0.1)\n");
    out.push_str("\\setcounter{secnumdepth}{3}\n");
    out.push_str("\\renewcommand\\thesubsubsection{\\arabic{subsubsection}}\n");
    out.push_str(&render_engine_preamble(engine));
    out
}

/// Wrap a converted body into a compilable document.
pub fn wrap_document(body: &str, engine: Engine) -> String {
    format!(
        "{}\n\\begin{{document}}\n\n{}\n\n\\end{{document}}",
        render_preamble(engine),
        body
    )
}
