//! Execution Gateway: runs cell content through external interpreters.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  ExecutionRequest   ┌────────────────────┐
//! │ Event Loop │ ──────────────────▶ │ ExecutionDispatcher│
//! └────────────┘                     └────────────────────┘
//!       ▲                                     │ one thread per request
//!       │           Completion                ▼
//!       └──────────────────────────── ┌────────────────────┐
//!                                     │ Executor (process) │
//!                                     └────────────────────┘
//! ```
//!
//! The event loop never waits on a process. Each request runs on its own
//! thread and the result comes back as a [`Completion`] addressed by
//! [`CellId`](crate::notebook::CellId).

mod dispatcher;
mod error;
mod gateway;

pub use dispatcher::{Completion, ExecutionDispatcher, ExecutionRequest};
pub use error::ExecutionError;
pub use gateway::{Command, ExecutionOutcome, Executor, InterpreterConfig, ProcessExecutor};
