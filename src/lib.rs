//! gridboard - drag-and-drop score board for the web
//!
//! A fixed 8×10 grid rendered via WebAssembly and Canvas 2D where the user
//! places, moves, resizes, and deletes two kinds of widget:
//! - Score trackers: a named value in [0, 100], contributing a variable
//! - Calculators: an arithmetic formula evaluated over the score variables
//!
//! No server, no persistence; all state is ephemeral and lost on reload.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridBoard } from 'gridboard';
//! await init();
//! const board = new GridBoard(canvas, devicePixelRatio);
//! board.setRenderCallback(() => board.render());
//! board.render();
//! ```

// Domain modules
pub mod error;
pub mod formula;
pub mod gesture;
pub mod grid;
pub mod naming;
pub mod store;
pub mod types;

// Controller and rendering (Canvas 2D)
pub mod board;
pub mod render;

use std::collections::BTreeMap;

use wasm_bindgen::prelude::*;

// Re-export the main board struct
pub use board::GridBoard;

pub use types::*;

/// Evaluate a formula string against a `{name: score}` map.
///
/// Standalone entry point for host pages that want formula evaluation
/// without a live board. Returns the formatted result or the inline error
/// marker; never throws.
#[wasm_bindgen]
pub fn evaluate_formula(text: &str, scores: JsValue) -> String {
    let vars: BTreeMap<String, i32> = serde_wasm_bindgen::from_value(scores).unwrap_or_default();
    formula::evaluate(text, &vars)
}

/// Install the console panic hook (better error messages in the browser).
#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
