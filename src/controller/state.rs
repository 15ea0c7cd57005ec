//! Controller: the notebook's editing/execution state machine.
//!
//! The controller owns the cell store, the mode and the selection. Every
//! mutation goes through [`Controller::handle_event`] or
//! [`Controller::apply_completion`], both of which maintain the selection
//! invariant: `selected` is either `None` or a valid index into the store.

use super::keymap::{Action, KeyMap};
use super::mode::{InsertSession, InsertTarget, Mode};
use crate::actor::InputEvent;
use crate::exec::{Completion, ExecutionRequest};
use crate::notebook::{Cell, CellStore};
use crate::widget::EditBuffer;

/// Placeholder content for new markdown cells.
pub const MARKDOWN_PLACEHOLDER: &str = "Type your markdown here...";

/// What the event loop must do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing changed.
    Ignored,
    /// State changed; redraw.
    Updated,
    /// State changed and a cell must be executed.
    Execute(ExecutionRequest),
    /// Exit the program.
    Quit,
}

/// Input Mode Controller.
#[derive(Debug, Clone)]
pub struct Controller {
    cells: CellStore,
    mode: Mode,
    selected: Option<usize>,
    keys: KeyMap,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(KeyMap::default())
    }
}

impl Controller {
    /// Create an empty notebook in Insert mode, ready for a first command.
    pub fn new(keys: KeyMap) -> Self {
        Self {
            cells: CellStore::new(),
            mode: Mode::default(),
            selected: None,
            keys,
        }
    }

    /// The cells, in display order.
    pub const fn cells(&self) -> &CellStore {
        &self.cells
    }

    /// The current mode.
    pub const fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Index of the selected cell.
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The selected cell.
    pub fn selected_cell(&self) -> Option<&Cell> {
        self.selected.and_then(|i| self.cells.get(i).ok())
    }

    /// The live edit buffer (Insert mode only).
    pub const fn edit_buffer(&self) -> Option<&EditBuffer> {
        match &self.mode {
            Mode::Insert(session) => Some(&session.buffer),
            Mode::Normal => None,
        }
    }

    fn selected_cell_mut(&mut self) -> Option<&mut Cell> {
        self.selected.and_then(|i| self.cells.get_mut(i).ok())
    }

    /// Interpret one input event against the current mode.
    pub fn handle_event(&mut self, event: &InputEvent) -> Effect {
        match self.keys.resolve(event, self.mode.is_insert()) {
            Some(Action::Quit) => Effect::Quit,
            Some(Action::EnterNormal) => self.enter_normal(),
            Some(Action::Commit) => self.commit(),
            Some(Action::NavigateUp) => self.navigate_up(),
            Some(Action::NavigateDown) => self.navigate_down(),
            Some(Action::EnterInsert) => self.enter_insert(),
            Some(Action::ToggleVisibility) => self.toggle_visibility(),
            Some(Action::NewMarkdownCell) => self.new_markdown_cell(),
            None => self.edit(event),
        }
    }

    /// Pass a non-binding event to the edit buffer.
    fn edit(&mut self, event: &InputEvent) -> Effect {
        let Mode::Insert(session) = &mut self.mode else {
            return Effect::Ignored;
        };
        if !session.buffer.handle_input(event) {
            return Effect::Ignored;
        }
        // Typing after a commit resumes editing the same cell, so the pending
        // result must not wipe the buffer.
        if let InsertTarget::Running(id) = session.target {
            session.target = InsertTarget::Editing(id);
        }
        Effect::Updated
    }

    fn commit(&mut self) -> Effect {
        let Mode::Insert(session) = &mut self.mode else {
            return Effect::Ignored;
        };
        if session.buffer.is_empty() {
            return Effect::Ignored;
        }
        let content = session.buffer.content().to_string();

        let existing = session
            .target
            .cell()
            .filter(|id| self.cells.position_of(*id).is_some());
        let id = if let Some(id) = existing {
            id
        } else {
            let cell = Cell::shell(content.clone());
            let id = cell.id();
            self.selected = Some(self.cells.append(cell));
            id
        };
        session.target = InsertTarget::Running(id);

        let Some(cell) = self.cells.find_mut(id) else {
            return Effect::Ignored;
        };
        cell.content.clone_from(&content);
        cell.editing = false;

        tracing::info!(cell = %id, kind = cell.kind().as_str(), "commit");
        Effect::Execute(ExecutionRequest {
            cell: id,
            kind: cell.kind(),
            content,
        })
    }

    fn enter_normal(&mut self) -> Effect {
        if self.mode.is_insert() {
            tracing::debug!("entering normal mode");
        }
        self.mode = Mode::Normal;
        if self.selected.is_none() {
            self.selected = self.cells.last_index();
        }
        Effect::Updated
    }

    fn navigate_up(&mut self) -> Effect {
        match self.selected {
            Some(i) if i > 0 => {
                self.selected = Some(i - 1);
                Effect::Updated
            }
            _ => Effect::Ignored,
        }
    }

    fn navigate_down(&mut self) -> Effect {
        match self.selected {
            Some(i) if i + 1 < self.cells.len() => {
                self.selected = Some(i + 1);
                Effect::Updated
            }
            _ => Effect::Ignored,
        }
    }

    fn enter_insert(&mut self) -> Effect {
        let Some(cell) = self.selected_cell_mut() else {
            return Effect::Ignored;
        };
        cell.editing = true;
        let session = InsertSession::editing(cell.id(), &cell.content);
        tracing::debug!(cell = %cell.id(), "editing cell");
        self.mode = Mode::Insert(session);
        Effect::Updated
    }

    fn toggle_visibility(&mut self) -> Effect {
        match self.selected_cell_mut() {
            Some(cell) => {
                cell.toggle_visible();
                Effect::Updated
            }
            None => Effect::Ignored,
        }
    }

    fn new_markdown_cell(&mut self) -> Effect {
        let cell = Cell::markdown(MARKDOWN_PLACEHOLDER).with_editing(true);
        let session = InsertSession::editing(cell.id(), &cell.content);
        tracing::debug!(cell = %cell.id(), after = ?self.selected, "new markdown cell");
        self.selected = Some(self.cells.insert_after(self.selected, cell));
        self.mode = Mode::Insert(session);
        Effect::Updated
    }

    /// Write an execution result into the cell it was dispatched for.
    ///
    /// Routing is by identity, so insertions since dispatch do not matter.
    /// Returns `false` if no cell carries that identity.
    pub fn apply_completion(&mut self, completion: Completion) -> bool {
        let Completion { cell: id, outcome } = completion;
        let Some(cell) = self.cells.find_mut(id) else {
            tracing::warn!(cell = %id, "dropping completion for unknown cell");
            return false;
        };

        tracing::info!(cell = %id, success = outcome.is_success(), "execution finished");
        cell.output = outcome.output;
        cell.error = outcome.error;

        if let Mode::Insert(session) = &mut self.mode {
            if session.target == InsertTarget::Running(id) {
                session.reset();
            }
        }
        true
    }
}
