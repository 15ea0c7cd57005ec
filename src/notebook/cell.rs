//! Cell: The unit of notebook content.
//!
//! A cell pairs user-authored `content` with the result of its last
//! execution. Its [`CellKind`] and [`CellId`] are fixed at creation and
//! have no setters.

use crate::exec::ExecutionError;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of fresh cell identities for the whole process.
static NEXT_CELL_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a cell.
///
/// Identities are never reused, so a completion addressed to a cell can be
/// routed to it no matter how many cells were inserted in front of it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(u64);

impl CellId {
    /// Allocate a new, never-before-seen identity.
    pub fn fresh() -> Self {
        Self(NEXT_CELL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value (for logging).
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Debug for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CellId({})", self.0)
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a cell's content is run through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Content is a command line for the configured shell.
    Shell,
    /// Content is markdown source for the configured renderer.
    Markdown,
}

impl CellKind {
    /// Short lowercase name (for logging and the status line).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shell => "shell",
            Self::Markdown => "markdown",
        }
    }
}

/// One notebook entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    id: CellId,
    kind: CellKind,
    /// Raw text authored by the user.
    pub content: String,
    /// Trimmed output of the last execution.
    pub output: String,
    /// Hidden cells are skipped by the renderer but stay selectable.
    pub visible: bool,
    /// True while the content is being composed.
    pub editing: bool,
    /// Failure from the last execution, shown instead of `output`.
    pub error: Option<ExecutionError>,
}

impl Cell {
    /// Create a visible, non-editing cell with a fresh identity.
    pub fn new(kind: CellKind, content: impl Into<String>) -> Self {
        Self {
            id: CellId::fresh(),
            kind,
            content: content.into(),
            output: String::new(),
            visible: true,
            editing: false,
            error: None,
        }
    }

    /// Create a shell cell.
    pub fn shell(content: impl Into<String>) -> Self {
        Self::new(CellKind::Shell, content)
    }

    /// Create a markdown cell.
    pub fn markdown(content: impl Into<String>) -> Self {
        Self::new(CellKind::Markdown, content)
    }

    /// Builder: set the editing flag.
    #[must_use]
    pub const fn with_editing(mut self, editing: bool) -> Self {
        self.editing = editing;
        self
    }

    /// Builder: set visibility.
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// The cell's identity.
    #[inline]
    pub const fn id(&self) -> CellId {
        self.id
    }

    /// The cell's kind.
    #[inline]
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    /// Flip visibility. Returns the new value.
    pub const fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    /// Text to show in the result area: the error when present, else the output.
    pub fn display_output(&self) -> String {
        self.error
            .as_ref()
            .map_or_else(|| self.output.clone(), ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_ids_are_unique() {
        let a = Cell::shell("ls");
        let b = Cell::shell("ls");
        assert_ne!(a.id(), b.id());
        assert!(b.id() > a.id());
    }

    #[test]
    fn test_cell_defaults() {
        let cell = Cell::markdown("# Title");
        assert_eq!(cell.kind(), CellKind::Markdown);
        assert_eq!(cell.content, "# Title");
        assert!(cell.output.is_empty());
        assert!(cell.visible);
        assert!(!cell.editing);
        assert!(cell.error.is_none());
    }

    #[test]
    fn test_toggle_visible() {
        let mut cell = Cell::shell("echo hi");
        assert!(!cell.toggle_visible());
        assert!(cell.toggle_visible());
        assert_eq!(cell.content, "echo hi");
        assert_eq!(cell.kind(), CellKind::Shell);
    }

    #[test]
    fn test_display_output_prefers_error() {
        let mut cell = Cell::shell("false");
        cell.output = "partial".to_string();
        assert_eq!(cell.display_output(), "partial");

        cell.error = Some(ExecutionError::Exit { code: 1 });
        assert_eq!(cell.display_output(), "exit status 1");
    }

    #[test]
    fn test_clone_keeps_identity() {
        let cell = Cell::shell("pwd");
        let copy = cell.clone();
        assert_eq!(cell.id(), copy.id());
    }
}
