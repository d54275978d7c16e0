//! Line classification.
//!
//! Inside a code or display-math block only that block's closing marker is
//! recognized. Otherwise the matchers in [`NORMAL_MATCHERS`] are tried in
//! priority order and the first hit wins; a line nothing claims is plain text.

use lazy_static::lazy_static;
use regex::Regex;

use super::state::{BlockState, ListKind};
use super::table;

lazy_static! {
    static ref UNORDERED_ITEM_RE: Regex =
        Regex::new(r"^(\s*)[-*]\s+(.*)$").expect("unordered item pattern is valid");
    static ref ORDERED_ITEM_RE: Regex =
        Regex::new(r"^(\s*)\d+\.\s+(.*)$").expect("ordered item pattern is valid");
}

const DOLLAR_FENCE: &str = "$$";
const RULE_MARKERS: [&str; 3] = ["---", "***", "___"];

/// What a single input line means to the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Line starting with `$$`; toggles a display block. Text after the
    /// marker is dropped.
    DollarFence,
    BracketOpen,
    BracketClose,
    CodeFence,
    /// A line stored verbatim in the open code or math block.
    BlockContent,
    Rule,
    /// Header line of a table whose separator is the next line.
    TableStart,
    ListItem {
        kind: ListKind,
        level: usize,
        content: &'a str,
    },
    Heading { level: u8, text: &'a str },
    Blank,
    Text,
}

/// The line being classified plus one line of lookahead.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub line: &'a str,
    pub next: Option<&'a str>,
}

type Matcher = for<'a> fn(&LineContext<'a>) -> Option<LineKind<'a>>;

/// Block recognizers for lines outside any verbatim block, highest priority first.
pub const NORMAL_MATCHERS: [Matcher; 9] = [
    match_dollar_fence,
    match_bracket_open,
    match_code_fence,
    match_rule,
    match_table_start,
    match_unordered_item,
    match_ordered_item,
    match_heading,
    match_blank,
];

/// Classify `ctx.line` given the block the scanner is in.
pub fn classify<'a>(ctx: &LineContext<'a>, state: &BlockState) -> LineKind<'a> {
    match state {
        BlockState::InDollarMath(_) => {
            if ctx.line.trim().starts_with(DOLLAR_FENCE) {
                LineKind::DollarFence
            } else {
                LineKind::BlockContent
            }
        }
        BlockState::InBracketMath(_) => {
            if ctx.line.trim() == "]" {
                LineKind::BracketClose
            } else {
                LineKind::BlockContent
            }
        }
        BlockState::InCode(_) => {
            if is_code_fence(ctx.line) {
                LineKind::CodeFence
            } else {
                LineKind::BlockContent
            }
        }
        BlockState::Normal => NORMAL_MATCHERS
            .iter()
            .find_map(|matcher| matcher(ctx))
            .unwrap_or(LineKind::Text),
    }
}

fn is_code_fence(line: &str) -> bool {
    line.starts_with("```") || line.starts_with("~~~")
}

fn match_dollar_fence<'a>(ctx: &LineContext<'a>) -> Option<LineKind<'a>> {
    ctx.line
        .trim()
        .starts_with(DOLLAR_FENCE)
        .then_some(LineKind::DollarFence)
}

fn match_bracket_open<'a>(ctx: &LineContext<'a>) -> Option<LineKind<'a>> {
    (ctx.line.trim() == "[").then_some(LineKind::BracketOpen)
}

fn match_code_fence<'a>(ctx: &LineContext<'a>) -> Option<LineKind<'a>> {
    is_code_fence(ctx.line).then_some(LineKind::CodeFence)
}

fn match_rule<'a>(ctx: &LineContext<'a>) -> Option<LineKind<'a>> {
    RULE_MARKERS
        .contains(&ctx.line.trim())
        .then_some(LineKind::Rule)
}

fn match_table_start<'a>(ctx: &LineContext<'a>) -> Option<LineKind<'a>> {
    table::is_table_start(ctx.line, ctx.next).then_some(LineKind::TableStart)
}

fn match_list_item<'a>(line: &'a str, re: &Regex, kind: ListKind) -> Option<LineKind<'a>> {
    let caps = re.captures(line)?;
    let indent = caps.get(1).map_or(0, |m| m.as_str().chars().count());
    let content = caps.get(2).map_or("", |m| m.as_str());
    Some(LineKind::ListItem {
        kind,
        level: indent / 2,
        content,
    })
}

fn match_unordered_item<'a>(ctx: &LineContext<'a>) -> Option<LineKind<'a>> {
    match_list_item(ctx.line, &UNORDERED_ITEM_RE, ListKind::Unordered)
}

fn match_ordered_item<'a>(ctx: &LineContext<'a>) -> Option<LineKind<'a>> {
    match_list_item(ctx.line, &ORDERED_ITEM_RE, ListKind::Ordered)
}

fn match_heading<'a>(ctx: &LineContext<'a>) -> Option<LineKind<'a>> {
    let hashes = ctx.line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=4).contains(&hashes) {
        return None;
    }
    let text = ctx.line[hashes..].strip_prefix(' ')?;
    Some(LineKind::Heading {
        level: hashes as u8,
        text,
    })
}

fn match_blank<'a>(ctx: &LineContext<'a>) -> Option<LineKind<'a>> {
    ctx.line.trim().is_empty().then_some(LineKind::Blank)
}
