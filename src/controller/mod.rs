//! Input Mode Controller: turns key events into notebook changes.
//!
//! The controller is a two-state machine:
//!
//! ```text
//!            Esc                          i / m
//!  ┌────────┐ ──────────────────────▶ ┌────────┐ ─────────┐
//!  │ Insert │                         │ Normal │          │
//!  └────────┘ ◀────────────────────── └────────┘ ◀────────┘
//!    │ Enter: commit + Execute            Up/Down/s: selection commands
//! ```
//!
//! It never runs anything itself. A commit yields an
//! [`Effect::Execute`] that the event loop hands to the
//! [`ExecutionDispatcher`](crate::exec::ExecutionDispatcher), and the result
//! comes back through [`Controller::apply_completion`].

mod keymap;
mod mode;
mod state;

pub use keymap::{Action, KeyMap};
pub use mode::{InsertSession, InsertTarget, Mode};
pub use state::{Controller, Effect, MARKDOWN_PLACEHOLDER};
