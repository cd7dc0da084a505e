//! Data types for the board editor.

mod library;
mod widget;

pub use library::*;
pub use widget::*;
