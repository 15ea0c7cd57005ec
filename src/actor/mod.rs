//! Actor Model: Message-passing concurrency for the notebook.
//!
//! - **Input Actor**: Polls terminal events, forwards to the event loop
//! - **Execution workers**: One thread per dispatched cell (see [`crate::exec`])
//! - **Event Loop**: Owns all notebook state and applies every message
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │  Event Loop  │
//!                                      │              │
//! ┌──────────────┐     Completion      │              │
//! │ Exec Threads │ ─────────────────▶  │              │
//! └──────────────┘                     └──────────────┘
//! ```

mod input;
mod messages;

pub use input::{convert_event, InputActor};
pub use messages::{InputEvent, KeyCode, KeyModifiers, LoopEvent};
