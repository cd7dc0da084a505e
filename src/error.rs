//! Structured error types for gridboard.
//!
//! User-facing failures never travel through these types: rejected
//! placements are dropped silently and formula errors render inline as the
//! error marker. `BoardError` covers programmer-facing failures at the wasm
//! boundary.

/// All errors that can occur in the board controller.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// A widget id that does not exist in the store.
    #[error("Unknown widget id: {0}")]
    UnknownWidget(u32),

    /// Board snapshot serialization failure.
    #[error("Serialization: {0}")]
    Serialize(#[from] serde_json::Error),

    /// DOM or canvas setup failure.
    #[error("Render error: {0}")]
    Render(String),

    /// Catch-all for string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BoardError>;

impl From<String> for BoardError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for BoardError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<BoardError> for wasm_bindgen::JsValue {
    fn from(e: BoardError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
