//! Presentation Adapter: turns notebook state into styled terminal rows.
//!
//! [`render`] reads the controller and produces a [`Frame`]; the
//! [`Terminal`](crate::terminal::Terminal) writes frames out. Neither ever
//! mutates notebook state.

mod frame;
mod render;
mod theme;

pub use frame::{fit, sanitize, wrap, Frame, Line, Span, Style};
pub use render::render;
pub use theme::{hex, Theme};
