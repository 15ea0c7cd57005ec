//! Modes: Insert carries the live edit session, Normal carries nothing.

use crate::notebook::CellId;
use crate::widget::EditBuffer;

/// What an Insert session writes to on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertTarget {
    /// Fresh top-level entry: commit appends a new shell cell.
    NewEntry,
    /// Editing an existing cell: commit overwrites and reruns it.
    Editing(CellId),
    /// Committed and awaiting the result for this cell. Delivery of that
    /// result ends the edit and returns the session to [`Self::NewEntry`].
    Running(CellId),
}

impl InsertTarget {
    /// The targeted cell, if any.
    pub const fn cell(self) -> Option<CellId> {
        match self {
            Self::NewEntry => None,
            Self::Editing(id) | Self::Running(id) => Some(id),
        }
    }
}

/// The live state of Insert mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertSession {
    /// Text being composed.
    pub buffer: EditBuffer,
    /// Where a commit goes.
    pub target: InsertTarget,
}

impl InsertSession {
    /// An empty session for a new top-level entry.
    pub const fn new_entry() -> Self {
        Self {
            buffer: EditBuffer::new(),
            target: InsertTarget::NewEntry,
        }
    }

    /// A session editing `cell`, starting from `content`.
    pub fn editing(cell: CellId, content: &str) -> Self {
        Self {
            buffer: EditBuffer::with_content(content),
            target: InsertTarget::Editing(cell),
        }
    }

    /// Drop the buffer and go back to a fresh entry.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.target = InsertTarget::NewEntry;
    }
}

/// Controller mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Composing text.
    Insert(InsertSession),
    /// Navigating and issuing single-key commands.
    Normal,
}

impl Mode {
    /// Display name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Insert(_) => "INSERT",
            Self::Normal => "NORMAL",
        }
    }

    /// Check if in Insert mode.
    pub const fn is_insert(&self) -> bool {
        matches!(self, Self::Insert(_))
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::Insert(InsertSession::new_entry())
    }
}
