//! Canvas 2D rendering for the board.

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
pub(crate) mod colors;

#[cfg(target_arch = "wasm32")]
pub(crate) use canvas::{field_rect, widget_pixel_rect, BoardRenderer, DELETE_SIZE, HANDLE_SIZE};
