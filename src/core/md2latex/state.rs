//! Block state for the line scanner.

/// The block the scanner is currently inside.
///
/// Code and display-math blocks own the lines collected so far; the buffer
/// is handed back exactly once when the block closes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BlockState {
    #[default]
    Normal,
    /// Inside a ```` ``` ```` or `~~~` fence.
    InCode(Vec<String>),
    /// Inside a `$$` ... `$$` display block.
    InDollarMath(Vec<String>),
    /// Inside a `[` ... `]` display block.
    InBracketMath(Vec<String>),
}

impl BlockState {
    pub fn is_normal(&self) -> bool {
        matches!(self, BlockState::Normal)
    }

    /// Buffer of the open verbatim block, if any.
    pub fn buffer_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            BlockState::Normal => None,
            BlockState::InCode(lines)
            | BlockState::InDollarMath(lines)
            | BlockState::InBracketMath(lines) => Some(lines),
        }
    }

    /// Leave the current block, returning it with its buffer.
    pub fn take(&mut self) -> BlockState {
        std::mem::take(self)
    }

    /// Human readable name used in warnings.
    pub fn describe(&self) -> &'static str {
        match self {
            BlockState::Normal => "text",
            BlockState::InCode(_) => "code block",
            BlockState::InDollarMath(_) => "$$ math block",
            BlockState::InBracketMath(_) => "[ ] math block",
        }
    }
}

/// Which list environment an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    pub fn environment(self) -> &'static str {
        match self {
            ListKind::Unordered => "itemize",
            ListKind::Ordered => "enumerate",
        }
    }
}

/// Open list environments, one counter per kind.
///
/// Only one kind is open at a time in practice, but both are tracked so a
/// switch can close the other kind completely before opening.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListDepth {
    pub unordered: usize,
    pub ordered: usize,
}

impl ListDepth {
    pub fn get(&self, kind: ListKind) -> usize {
        match kind {
            ListKind::Unordered => self.unordered,
            ListKind::Ordered => self.ordered,
        }
    }

    pub fn get_mut(&mut self, kind: ListKind) -> &mut usize {
        match kind {
            ListKind::Unordered => &mut self.unordered,
            ListKind::Ordered => &mut self.ordered,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.unordered == 0 && self.ordered == 0
    }
}
