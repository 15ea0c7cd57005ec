//! Notebook module: the cell data model and the ordered cell store.
//!
//! This module contains:
//! - [`Cell`]: One notebook entry (shell command or markdown block)
//! - [`CellId`]: Stable identity, independent of the cell's position
//! - [`CellStore`]: Ordered sequence of cells with insertion and lookup
//! - [`StoreError`]: Bounds and identity violations on the store

mod cell;
mod store;

pub use cell::{Cell, CellId, CellKind};
pub use store::{CellStore, StoreError};
