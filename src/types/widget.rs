use serde::{Deserialize, Serialize};

use crate::grid::CellRect;

/// The two kinds of widget that can live on the board.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// A named numeric tracker contributing a variable to formulas.
    Score,
    /// A formula evaluated against all named score widgets.
    Calculator,
}

/// A widget placed on the board grid.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    /// Unique, stable id allocated by the store.
    pub id: u32,
    /// Left cell (0-based).
    pub x: i32,
    /// Top cell (0-based).
    pub y: i32,
    /// Cell span, ≥ 2 for score widgets.
    pub width: i32,
    /// Cell span, ≥ 1.
    pub height: i32,
    pub kind: WidgetKind,
    pub title: String,
    /// Lowercase a-z variable name, unique among score widgets. Empty names
    /// are exempt from uniqueness. Always empty for calculators.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub name: String,
    /// Tracked value in [0, 100]. Unused by calculators.
    pub score: i32,
    /// Formula text. Unused by score widgets.
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub formula: String,
}

impl Widget {
    /// The widget's footprint in grid cells.
    pub fn rect(&self) -> CellRect {
        CellRect::new(self.x, self.y, self.width, self.height)
    }

    /// Whether this widget contributes a formula variable.
    pub fn is_named_score(&self) -> bool {
        self.kind == WidgetKind::Score && !self.name.is_empty()
    }
}

/// What a drag gesture is carrying.
#[derive(Debug, Clone)]
pub enum DragSource {
    /// A library item being dragged onto the board; no widget exists yet.
    New(super::LibraryItem),
    /// An already-placed widget, by id.
    Existing(u32),
}

/// The single in-flight drag gesture.
///
/// Owned by the controller, populated on drag start and cleared on
/// drop/cancel. For new items no widget has been inserted into the store
/// yet; `last_cell` tracks the preview position instead.
#[derive(Debug, Clone)]
pub struct DragGesture {
    pub source: DragSource,
    /// Cell spans of the dragged item, used for clamping.
    pub width: i32,
    pub height: i32,
    /// Pointer offset inside the dragged element at drag start, in pixels.
    pub grab: (f32, f32),
    /// Last clamped candidate cell (the preview position for new items).
    pub last_cell: (i32, i32),
}

impl DragGesture {
    pub fn is_new(&self) -> bool {
        matches!(self.source, DragSource::New(_))
    }
}

/// The single in-flight resize gesture.
///
/// Exists only between handle mouse-down and mouse-up; the document-level
/// listener pair lives exactly as long as this value.
#[derive(Debug, Clone, Copy)]
pub struct ResizeGesture {
    pub id: u32,
    pub start_width: i32,
    pub start_height: i32,
    /// Pointer position at gesture start, in pixels.
    pub start_px: (f32, f32),
}
