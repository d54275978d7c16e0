//! Character escaping for LaTeX text.
//!
//! Escaping is a single pass over the characters, so a replacement is never
//! itself re-escaped (`\` becomes `\textbackslash{}` and its braces stay raw).

use lazy_static::lazy_static;
use regex::Regex;

use crate::data::symbols::symbol_for;

lazy_static! {
    /// Pictographs dropped from all text: flags, emoticons, pictographs,
    /// dingbats, skin tone modifiers, ZWJ and VS-16.
    static ref PICTOGRAPH_RE: Regex = Regex::new(concat!(
        "[",
        r"\x{1F1E6}-\x{1F1FF}",
        r"\x{1F300}-\x{1F5FF}",
        r"\x{1F600}-\x{1F64F}",
        r"\x{1F680}-\x{1F6FF}",
        r"\x{1F700}-\x{1F77F}",
        r"\x{1F780}-\x{1F7FF}",
        r"\x{1F800}-\x{1F8FF}",
        r"\x{1F900}-\x{1F9FF}",
        r"\x{1FA00}-\x{1FA6F}",
        r"\x{1FA70}-\x{1FAFF}",
        r"\x{2600}-\x{26FF}",
        r"\x{2700}-\x{27BF}",
        r"\x{1F3FB}-\x{1F3FF}",
        r"\x{200D}",
        r"\x{FE0F}",
        "]",
    ))
    .expect("pictograph pattern is valid");
}

/// Remove emoji and other decorative pictographs.
pub fn strip_pictographs(text: &str) -> String {
    PICTOGRAPH_RE.replace_all(text, "").into_owned()
}

/// Escape prose text for LaTeX and apply the Unicode symbol table.
pub fn escape_latex(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = strip_pictographs(text);
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' => out.push_str("\\&"),
            '%' => out.push_str("\\%"),
            '$' => out.push_str("\\$"),
            '#' => out.push_str("\\#"),
            '_' => out.push_str("\\_"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            _ => match symbol_for(ch) {
                Some(latex) => out.push_str(latex),
                None => out.push(ch),
            },
        }
    }
    out
}

/// Escape the body of an inline code span.
///
/// Same reserved set as [`escape_latex`] except `~`, and no symbol table:
/// code keeps its Unicode characters as written.
pub fn escape_code(text: &str) -> String {
    let text = strip_pictographs(text);
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\textbackslash{}"),
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '_' => out.push_str("\\_"),
            '^' => out.push_str("\\textasciicircum{}"),
            '#' => out.push_str("\\#"),
            '&' => out.push_str("\\&"),
            '%' => out.push_str("\\%"),
            '$' => out.push_str("\\$"),
            _ => out.push(ch),
        }
    }
    out
}
