//! Pipe table recognition and rendering.
//!
//! A table is a header line containing `|` followed by a separator line such
//! as `|---|:--:|`. Data rows are taken while they keep the header's cell
//! count; the first row that does not is left for normal block dispatch.

use lazy_static::lazy_static;
use regex::Regex;

use super::escape::escape_latex;
use super::inline::process_table_cell;

lazy_static! {
    static ref SEPARATOR_RE: Regex =
        Regex::new(r"^\|[\s\-:|]+\|").expect("table separator pattern is valid");
}

/// Split a table line on `|`, trimming cells and dropping empty ones.
pub fn split_cells(line: &str) -> Vec<&str> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect()
}

/// Whether `line` is a header/body separator row.
pub fn is_separator(line: &str) -> bool {
    SEPARATOR_RE.is_match(line)
}

/// Whether `line` starts a table, given the line after it.
pub fn is_table_start(line: &str, next: Option<&str>) -> bool {
    line.contains('|') && next.is_some_and(is_separator) && !split_cells(line).is_empty()
}

/// Column width as a fraction of `\textwidth`.
pub fn column_width(columns: usize) -> f64 {
    match columns {
        1 => 0.85,
        2 => 0.42,
        3 => 0.28,
        4 => 0.20,
        n => 0.85 / n.max(1) as f64,
    }
}

/// Format a width fraction with at most four decimals and no trailing zeros.
fn format_width(width: f64) -> String {
    let fixed = format!("{:.4}", width);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// A parsed pipe table borrowing its cells from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table<'a> {
    pub headers: Vec<&'a str>,
    pub rows: Vec<Vec<&'a str>>,
}

impl<'a> Table<'a> {
    /// Parse a table starting at `lines[0]`.
    ///
    /// Returns the table and the number of lines consumed (header, separator
    /// and accepted rows), or `None` when `lines` does not start a table.
    pub fn parse(lines: &[&'a str]) -> Option<(Table<'a>, usize)> {
        let header = *lines.first()?;
        if !is_table_start(header, lines.get(1).copied()) {
            return None;
        }
        let headers = split_cells(header);
        let mut rows = Vec::new();
        let mut consumed = 2;

        for &line in &lines[2..] {
            if !line.contains('|') || line.trim().is_empty() {
                break;
            }
            let cells = split_cells(line);
            if cells.len() != headers.len() {
                log::debug!(
                    "table row has {} cells, header has {}; ending table",
                    cells.len(),
                    headers.len()
                );
                break;
            }
            rows.push(cells);
            consumed += 1;
        }

        Some((Table { headers, rows }, consumed))
    }

    pub fn columns(&self) -> usize {
        self.headers.len()
    }

    /// Column spec such as `|p{0.42\textwidth}|p{0.42\textwidth}|`.
    pub fn column_spec(&self) -> String {
        let width = format_width(column_width(self.columns()));
        let mut spec = String::from("|");
        for _ in 0..self.columns() {
            spec.push_str(&format!("p{{{}\\textwidth}}|", width));
        }
        spec
    }

    /// Render as output lines, ending with an empty line.
    pub fn render(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.rows.len() * 2 + 8);
        out.push("\\begin{adjustbox}{max width=\\textwidth}".to_string());
        out.push(format!("\\begin{{tabular}}{{{}}}", self.column_spec()));
        out.push("\\hline".to_string());

        let header: Vec<String> = self.headers.iter().map(|h| escape_latex(h)).collect();
        out.push(format!("{} \\\\", header.join(" & ")));
        out.push("\\hline".to_string());

        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|c| process_table_cell(c)).collect();
            out.push(format!("{} \\\\", cells.join(" & ")));
            out.push("\\hline".to_string());
        }

        out.push("\\end{tabular}".to_string());
        out.push("\\end{adjustbox}".to_string());
        out.push(String::new());
        out
    }
}
