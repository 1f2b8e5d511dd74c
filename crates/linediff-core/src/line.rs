//! Line records produced by the diff engine

use serde::{Deserialize, Serialize};

/// How a line was classified by the diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Present only on the right (modified) side
    Added,
    /// Present only on the left (original) side
    Removed,
    /// Present on both sides
    Unchanged,
}

impl LineKind {
    /// Single-character marker used by unified output
    pub fn marker(self) -> char {
        match self {
            LineKind::Added => '+',
            LineKind::Removed => '-',
            LineKind::Unchanged => ' ',
        }
    }
}

/// One classified line of text with its position in its own side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRecord {
    pub kind: LineKind,
    /// The original, unnormalized line text
    pub content: String,
    /// 1-based index into the side's split-by-newline lines
    pub line_number: usize,
}

impl LineRecord {
    pub fn new(kind: LineKind, content: impl Into<String>, line_number: usize) -> Self {
        Self {
            kind,
            content: content.into(),
            line_number,
        }
    }

    pub fn added(content: impl Into<String>, line_number: usize) -> Self {
        Self::new(LineKind::Added, content, line_number)
    }

    pub fn removed(content: impl Into<String>, line_number: usize) -> Self {
        Self::new(LineKind::Removed, content, line_number)
    }

    pub fn unchanged(content: impl Into<String>, line_number: usize) -> Self {
        Self::new(LineKind::Unchanged, content, line_number)
    }

    /// Check if this is an actual change (not just context)
    pub fn is_change(&self) -> bool {
        self.kind != LineKind::Unchanged
    }
}
