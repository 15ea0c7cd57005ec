//! # Grappler
//!
//! A modal terminal notebook of shell and markdown cells.
//!
//! Type a command in Insert mode and press Enter to run it; the cell is
//! appended to the notebook and its output arrives asynchronously. Esc
//! switches to Normal mode, where cells can be navigated, hidden, edited
//! again, or interleaved with markdown notes.
//!
//! ## Core Concepts
//!
//! - **Cell store**: an ordered list of cells addressed by position, each
//!   carrying a stable identity
//! - **Controller**: the Insert/Normal state machine that owns the store
//! - **Execution gateway**: runs cell content through an external
//!   interpreter off the main loop and reports back by identity
//! - **Actor model**: input and executions run on their own threads and talk
//!   to the main loop over channels
//!
//! ## Example
//!
//! ```rust,no_run
//! use grappler::{Config, app};
//!
//! app::run(Config::default()).expect("notebook failed");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod app;
pub mod config;
pub mod controller;
pub mod exec;
pub mod notebook;
pub mod terminal;
pub mod view;
pub mod widget;

// Re-exports for convenience
pub use actor::{InputEvent, KeyCode, KeyModifiers, LoopEvent};
pub use app::{AppError, Flow, Session};
pub use config::{Config, ConfigError};
pub use controller::{Controller, Effect, KeyMap, Mode};
pub use exec::{Completion, ExecutionDispatcher, ExecutionError, ExecutionRequest, Executor, ProcessExecutor};
pub use notebook::{Cell, CellId, CellKind, CellStore, StoreError};
