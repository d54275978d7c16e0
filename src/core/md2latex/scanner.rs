//! Line-oriented block scanner.
//!
//! One pass over the input lines. Each line is classified against the
//! current [`BlockState`] and the resulting LaTeX lines are appended to the
//! output buffer. Tables consume more than one line at a time.

use super::inline::{clean_heading_text, process_inline};
use super::matchers::{classify, LineContext, LineKind};
use super::state::{BlockState, ListDepth, ListKind};
use super::table::Table;
use super::{ConversionStats, ConversionWarning};

/// Code lines longer than this are hard-wrapped inside `verbatim`.
const WRAP_THRESHOLD: usize = 80;
/// Chunk width for wrapped code lines, leaving room for verbatim indentation.
const WRAP_WIDTH: usize = 75;

const RULE: &str = "\\noindent\\rule{\\linewidth}{0.4pt}";
const LINE_BREAK: &str = "\\newline";

/// Output of one scanner run.
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    pub lines: Vec<String>,
    pub warnings: Vec<ConversionWarning>,
    pub stats: ConversionStats,
}

impl ScanOutput {
    /// The document body as a single string.
    pub fn body(&self) -> String {
        self.lines.join("\n")
    }
}

pub struct BlockScanner<'a> {
    lines: Vec<&'a str>,
    state: BlockState,
    lists: ListDepth,
    /// 1-based line number where the open code/math block started.
    block_start: usize,
    out: Vec<String>,
    warnings: Vec<ConversionWarning>,
    stats: ConversionStats,
}

impl<'a> BlockScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        let lines = input
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        Self {
            lines,
            state: BlockState::Normal,
            lists: ListDepth::default(),
            block_start: 0,
            out: Vec::new(),
            warnings: Vec::new(),
            stats: ConversionStats::default(),
        }
    }

    /// Scan every line and return the emitted body.
    pub fn run(mut self) -> ScanOutput {
        let mut idx = 0usize;
        while idx < self.lines.len() {
            let ctx = LineContext {
                line: self.lines[idx],
                next: self.lines.get(idx + 1).copied(),
            };
            let kind = classify(&ctx, &self.state);
            idx += self.apply(idx, ctx.line, kind);
        }
        self.finish()
    }

    /// Act on one classified line, returning how many lines were consumed.
    fn apply(&mut self, idx: usize, line: &'a str, kind: LineKind<'a>) -> usize {
        match kind {
            LineKind::DollarFence => match self.state.take() {
                BlockState::InDollarMath(lines) => self.emit_display_math(lines),
                _ => {
                    self.close_lists();
                    self.open_block(BlockState::InDollarMath(Vec::new()), idx);
                }
            },
            LineKind::BracketOpen => {
                self.close_lists();
                self.open_block(BlockState::InBracketMath(Vec::new()), idx);
            }
            LineKind::BracketClose => {
                if let BlockState::InBracketMath(lines) = self.state.take() {
                    self.emit_display_math(lines);
                }
            }
            LineKind::CodeFence => match self.state.take() {
                BlockState::InCode(lines) => self.emit_verbatim(lines),
                _ => self.open_block(BlockState::InCode(Vec::new()), idx),
            },
            LineKind::BlockContent => {
                if let Some(buffer) = self.state.buffer_mut() {
                    buffer.push(line.to_string());
                }
            }
            LineKind::Rule => {
                self.close_lists();
                self.out.push(RULE.to_string());
                self.stats.rules += 1;
            }
            LineKind::TableStart => {
                if let Some((table, consumed)) = Table::parse(&self.lines[idx..]) {
                    self.close_lists();
                    self.stats.tables += 1;
                    self.stats.table_rows += table.rows.len();
                    self.out.extend(table.render());
                    return consumed;
                }
                self.emit_text(line);
            }
            LineKind::ListItem {
                kind,
                level,
                content,
            } => self.emit_list_item(kind, level, content),
            LineKind::Heading { level, text } => {
                self.close_lists();
                let command = match level {
                    1 => "section",
                    2 => "subsection",
                    3 => "subsubsection",
                    _ => "paragraph",
                };
                let text = process_inline(&clean_heading_text(text));
                self.out.push(format!("\\{}{{{}}}", command, text));
                self.stats.headings += 1;
            }
            LineKind::Blank => {
                self.close_lists();
                self.out.push(String::new());
            }
            LineKind::Text => self.emit_text(line),
        }
        1
    }

    fn open_block(&mut self, state: BlockState, idx: usize) {
        log::debug!("line {}: opening {}", idx + 1, state.describe());
        self.state = state;
        self.block_start = idx + 1;
    }

    fn emit_display_math(&mut self, lines: Vec<String>) {
        self.out.push("\\[".to_string());
        self.out.extend(lines);
        self.out.push("\\]".to_string());
        self.stats.math_blocks += 1;
    }

    fn emit_verbatim(&mut self, lines: Vec<String>) {
        self.out.push("\\begin{verbatim}".to_string());
        for line in &lines {
            self.out.extend(wrap_code_line(line));
        }
        self.out.push("\\end{verbatim}".to_string());
        self.stats.code_blocks += 1;
    }

    fn emit_text(&mut self, line: &str) {
        self.close_lists();
        let mut processed = process_inline(line);
        let tail = processed.trim_end();
        if !tail.ends_with('\\') && !tail.ends_with(LINE_BREAK) {
            processed.push(' ');
            processed.push_str(LINE_BREAK);
        }
        self.out.push(processed);
    }

    fn emit_list_item(&mut self, kind: ListKind, level: usize, content: &str) {
        let other = match kind {
            ListKind::Unordered => ListKind::Ordered,
            ListKind::Ordered => ListKind::Unordered,
        };
        self.close_lists_of(other);

        let desired = level + 1;
        while self.lists.get(kind) < desired {
            self.out.push(format!("\\begin{{{}}}", kind.environment()));
            *self.lists.get_mut(kind) += 1;
        }
        while self.lists.get(kind) > desired {
            self.out.push(format!("\\end{{{}}}", kind.environment()));
            *self.lists.get_mut(kind) -= 1;
        }

        self.out.push(format!("\\item {}", process_inline(content)));
        self.stats.list_items += 1;
    }

    fn close_lists_of(&mut self, kind: ListKind) {
        while self.lists.get(kind) > 0 {
            self.out.push(format!("\\end{{{}}}", kind.environment()));
            *self.lists.get_mut(kind) -= 1;
        }
    }

    fn close_lists(&mut self) {
        self.close_lists_of(ListKind::Unordered);
        self.close_lists_of(ListKind::Ordered);
    }

    /// Force-close an unterminated block and any open lists.
    fn finish(mut self) -> ScanOutput {
        let open = self.state.take();
        if !open.is_normal() {
            log::warn!(
                "{} opened at line {} is not terminated; closing it at end of input",
                open.describe(),
                self.block_start
            );
            self.warnings
                .push(ConversionWarning::unterminated(&open, self.block_start));
            match open {
                BlockState::InCode(lines) => self.emit_verbatim(lines),
                BlockState::InDollarMath(lines) | BlockState::InBracketMath(lines) => {
                    self.emit_display_math(lines)
                }
                BlockState::Normal => {}
            }
        }
        self.close_lists();
        debug_assert!(self.lists.is_empty());

        ScanOutput {
            lines: self.out,
            warnings: self.warnings,
            stats: self.stats,
        }
    }
}

/// Split a code line longer than the threshold into fixed-width chunks.
pub fn wrap_code_line(line: &str) -> Vec<String> {
    if line.chars().count() <= WRAP_THRESHOLD {
        return vec![line.to_string()];
    }
    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(WRAP_WIDTH)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
