//! Widgets: stateful input components used by the controller.
//!
//! Widgets here hold state only; drawing them is the job of [`crate::view`].

mod edit_buffer;

pub use edit_buffer::EditBuffer;
