//! Key bindings.
//!
//! The mapping is fixed for the session. Bindings are resolved against the
//! current mode because the same key means different things in each.

use crate::actor::{InputEvent, KeyCode};

/// A command the controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Commit the edit buffer and execute (Insert).
    Commit,
    /// Switch to Normal mode.
    EnterNormal,
    /// Select the previous cell (Normal).
    NavigateUp,
    /// Select the next cell (Normal).
    NavigateDown,
    /// Edit the selected cell (Normal).
    EnterInsert,
    /// Hide or show the selected cell (Normal).
    ToggleVisibility,
    /// Insert a markdown cell after the selection (Normal).
    NewMarkdownCell,
    /// Exit the program (any mode).
    Quit,
}

/// Key bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    /// Commit/execute.
    pub execute: KeyCode,
    /// Enter Normal mode.
    pub normal_mode: KeyCode,
    /// Enter Insert mode on the selection.
    pub insert_mode: char,
    /// Navigate up.
    pub navigate_up: KeyCode,
    /// Navigate down.
    pub navigate_down: KeyCode,
    /// Toggle visibility.
    pub toggle_visibility: char,
    /// New markdown cell.
    pub new_markdown_cell: char,
    /// Quit (pressed with Control).
    pub quit: char,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            execute: KeyCode::Enter,
            normal_mode: KeyCode::Esc,
            insert_mode: 'i',
            navigate_up: KeyCode::Up,
            navigate_down: KeyCode::Down,
            toggle_visibility: 's',
            new_markdown_cell: 'm',
            quit: 'c',
        }
    }
}

impl KeyMap {
    /// Resolve `event` to an action for the given mode.
    ///
    /// Returns `None` for keys that are not bindings in this mode; in Insert
    /// mode those go to the edit buffer.
    pub fn resolve(&self, event: &InputEvent, insert: bool) -> Option<Action> {
        let InputEvent::Key { code, modifiers } = event else {
            return None;
        };
        let code = *code;

        if modifiers.control {
            return (code == KeyCode::Char(self.quit)).then_some(Action::Quit);
        }
        if code == self.normal_mode {
            return Some(Action::EnterNormal);
        }
        if insert {
            return (code == self.execute).then_some(Action::Commit);
        }

        match code {
            c if c == self.navigate_up => Some(Action::NavigateUp),
            c if c == self.navigate_down => Some(Action::NavigateDown),
            KeyCode::Char(ch) if !modifiers.alt => self.resolve_char(ch),
            _ => None,
        }
    }

    fn resolve_char(&self, ch: char) -> Option<Action> {
        if ch == self.insert_mode {
            Some(Action::EnterInsert)
        } else if ch == self.toggle_visibility {
            Some(Action::ToggleVisibility)
        } else if ch == self.new_markdown_cell {
            Some(Action::NewMarkdownCell)
        } else {
            None
        }
    }
}
