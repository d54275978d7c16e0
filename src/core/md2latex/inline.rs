//! Inline text processing: escaping plus math, code, bold and link spans.
//!
//! Spans never nest. The first span that matches wins and its interior is not
//! scanned again, with one exception: `$$...$$` literals are pulled out before
//! any other scanning and restored at the very end.

use std::ops::Range;

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::escape::{escape_code, escape_latex};

lazy_static! {
    static ref DOUBLE_DOLLAR_RE: Regex =
        Regex::new(r"\$\$([^$]+)\$\$").expect("double dollar pattern is valid");
    static ref MATH_SPAN_RE: Regex =
        Regex::new(r"\$[^$]+\$").expect("math span pattern is valid");
    /// Spans recognized in paragraph, list and heading text outside math.
    static ref FORMAT_SPAN_RE: Regex = Regex::new(
        r"`(?P<code>[^`]+)`|\*\*(?P<bold>[^*]+)\*\*|\[(?P<text>[^\]]+)\]\((?P<url>[^)]+)\)"
    )
    .expect("format span pattern is valid");
    /// Spans recognized in table cells (no links).
    static ref CELL_SPAN_RE: Regex =
        Regex::new(r"\$(?P<math>[^$]+)\$|`(?P<code>[^`]+)`|\*\*(?P<bold>[^*]+)\*\*")
            .expect("cell span pattern is valid");
    static ref HEADING_SYMBOLS_RE: Regex =
        Regex::new(r"^[^\w\d]+\s*").expect("heading symbol pattern is valid");
    static ref HEADING_NUMBER_RE: Regex =
        Regex::new(r"^\d+[.)]\s+").expect("heading number pattern is valid");
}

/// Delimiters of the private placeholder standing in for a `$$...$$` literal.
const LITERAL_OPEN: char = '\u{E000}';
const LITERAL_CLOSE: char = '\u{E001}';

/// A recognized inline construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan<'a> {
    /// `$...$`, copied through as LaTeX math.
    Math(&'a str),
    /// `` `...` ``, rendered in typewriter face.
    Code(&'a str),
    /// `**...**`
    Bold(&'a str),
    /// `[text](url)`; the URL is emitted unescaped.
    Link { text: &'a str, url: &'a str },
}

impl<'a> InlineSpan<'a> {
    fn from_captures(caps: &Captures<'a>) -> Option<Self> {
        if let Some(m) = caps.name("math") {
            return Some(InlineSpan::Math(m.as_str()));
        }
        if let Some(m) = caps.name("code") {
            return Some(InlineSpan::Code(m.as_str()));
        }
        if let Some(m) = caps.name("bold") {
            return Some(InlineSpan::Bold(m.as_str()));
        }
        match (caps.name("text"), caps.name("url")) {
            (Some(text), Some(url)) => Some(InlineSpan::Link {
                text: text.as_str(),
                url: url.as_str(),
            }),
            _ => None,
        }
    }

    /// Render the span as LaTeX.
    pub fn render(&self) -> String {
        match self {
            InlineSpan::Math(body) => format!("${}$", body),
            InlineSpan::Code(body) => format!("\\texttt{{{}}}", escape_code(body)),
            InlineSpan::Bold(body) => format!("\\textbf{{{}}}", escape_latex(body)),
            InlineSpan::Link { text, url } => {
                format!("\\href{{{}}}{{{}}}", url, escape_latex(text))
            }
        }
    }
}

/// Find spans in `text` with their byte ranges.
fn scan_spans<'a>(
    text: &'a str,
    pattern: &'static Regex,
) -> impl Iterator<Item = (Range<usize>, InlineSpan<'a>)> + 'a {
    pattern.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let span = InlineSpan::from_captures(&caps)?;
        Some((whole.range(), span))
    })
}

/// Render spans and escape the gaps between them.
fn render_spans(text: &str, pattern: &'static Regex) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut pos = 0;
    for (range, span) in scan_spans(text, pattern) {
        out.push_str(&escape_latex(&text[pos..range.start]));
        out.push_str(&span.render());
        pos = range.end;
    }
    out.push_str(&escape_latex(&text[pos..]));
    out
}

/// Code, bold and link spans in text known to contain no math.
fn process_formats(text: &str) -> String {
    render_spans(text, &FORMAT_SPAN_RE)
}

fn literal_placeholder(index: usize) -> String {
    format!("{}{}{}", LITERAL_OPEN, index, LITERAL_CLOSE)
}

/// Process paragraph, list item or heading text.
pub fn process_inline(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut literals: Vec<String> = Vec::new();
    let protected = DOUBLE_DOLLAR_RE.replace_all(text, |caps: &Captures| {
        literals.push(caps[1].to_string());
        literal_placeholder(literals.len() - 1)
    });

    let mut out = String::with_capacity(protected.len() + 16);
    let mut pos = 0;
    for m in MATH_SPAN_RE.find_iter(&protected) {
        out.push_str(&process_formats(&protected[pos..m.start()]));
        out.push_str(m.as_str());
        pos = m.end();
    }
    out.push_str(&process_formats(&protected[pos..]));

    for (index, body) in literals.iter().enumerate() {
        let rendered = format!("\\$\\${}\\$\\$", escape_latex(body));
        out = out.replace(&literal_placeholder(index), &rendered);
    }
    out
}

/// Process one table cell: math, code and bold spans, everything else escaped.
pub fn process_table_cell(cell: &str) -> String {
    if cell.is_empty() {
        return String::new();
    }
    render_spans(cell, &CELL_SPAN_RE)
}

/// Drop decorative leading symbols and a `1.` / `2)` numbering prefix.
pub fn clean_heading_text(text: &str) -> String {
    let trimmed = text.trim();
    let without_symbols = HEADING_SYMBOLS_RE.replace(trimmed, "");
    HEADING_NUMBER_RE
        .replace(&without_symbols, "")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text_is_escaped() {
        assert_eq!(process_inline("50% off & more"), "50\\% off \\& more");
    }

    #[test]
    fn test_math_span_is_verbatim() {
        assert_eq!(
            process_inline("Area is $\\pi r^2$ units_2"),
            "Area is $\\pi r^2$ units\\_2"
        );
    }

    #[test]
    fn test_mixed_spans() {
        assert_eq!(
            process_inline("Use `code` and **bold** with $\\alpha^2$"),
            "Use \\texttt{code} and \\textbf{bold} with $\\alpha^2$"
        );
    }

    #[test]
    fn test_double_dollar_literal() {
        assert_eq!(
            process_inline("Cost is $$5 and 10%$$ today"),
            "Cost is \\$\\$5 and 10\\%\\$\\$ today"
        );
    }

    #[test]
    fn test_many_double_dollar_literals() {
        let input = (0..12)
            .map(|i| format!("$${}$$", i))
            .collect::<Vec<_>>()
            .join(" ");
        let out = process_inline(&input);
        assert!(out.starts_with("\\$\\$0\\$\\$ \\$\\$1\\$\\$"));
        assert!(out.ends_with("\\$\\$11\\$\\$"));
        assert!(!out.contains(LITERAL_OPEN));
    }

    #[test]
    fn test_link_url_unescaped() {
        assert_eq!(
            process_inline("See [the_docs](https://example.com/a_b?x=1%20)"),
            "See \\href{https://example.com/a_b?x=1%20}{the\\_docs}"
        );
    }

    #[test]
    fn test_code_span_keeps_symbols() {
        assert_eq!(process_inline("`a → b`"), "\\texttt{a → b}");
        assert_eq!(process_inline("a → b"), "a $\\rightarrow$ b");
    }

    #[test]
    fn test_math_span_keeps_symbols() {
        assert_eq!(process_inline("$x ≤ y$ or x ≤ y"), "$x ≤ y$ or x $\\leq$ y");
    }

    #[test]
    fn test_unmatched_delimiters_are_escaped() {
        assert_eq!(process_inline("costs $5"), "costs \\$5");
        assert_eq!(process_inline("a **b"), "a **b");
    }

    #[test]
    fn test_table_cell_ignores_links() {
        assert_eq!(
            process_table_cell("[x](http://a_b)"),
            "[x](http://a\\_b)"
        );
        assert_eq!(
            process_table_cell("$n^2$ `O(n)` **fast** 100%"),
            "$n^2$ \\texttt{O(n)} \\textbf{fast} 100\\%"
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(process_inline(""), "");
        assert_eq!(process_table_cell(""), "");
    }

    #[test]
    fn test_clean_heading_text() {
        assert_eq!(clean_heading_text("2) Setup Steps"), "Setup Steps");
        assert_eq!(clean_heading_text("1. Intro"), "Intro");
        assert_eq!(clean_heading_text("🚀 Launch"), "Launch");
        assert_eq!(clean_heading_text("  Overview  "), "Overview");
        assert_eq!(clean_heading_text("2024 Roadmap"), "2024 Roadmap");
    }
}
