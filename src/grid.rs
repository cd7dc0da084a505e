//! Grid geometry for the placement engine.
//!
//! The board is a fixed 8×10 grid of 100-pixel cells. All pointer math
//! happens here: converting pointer positions to candidate cells, clamping
//! candidates to the grid, and axis-aligned overlap between widget
//! rectangles.

/// Number of columns in the board grid.
pub const GRID_COLS: i32 = 8;
/// Number of rows in the board grid.
pub const GRID_ROWS: i32 = 10;
/// Size of one grid cell in logical pixels.
pub const CELL_SIZE: f32 = 100.0;

/// A widget's footprint in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl CellRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Standard AABB strict-overlap test. Rectangles that merely touch
    /// edges do not overlap.
    pub fn overlaps(&self, other: &CellRect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Whether the rectangle lies fully inside the board grid.
    pub fn in_bounds(&self) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x + self.width <= GRID_COLS
            && self.y + self.height <= GRID_ROWS
    }
}

/// Convert a pointer position to the candidate cell for a dragged item.
///
/// `pointer` is the pointer position in logical pixels, `origin` the grid's
/// on-screen origin, and `grab` the pointer offset inside the dragged
/// element captured at drag start. The raw cell is the floor of the
/// adjusted position divided by the cell size; no clamping happens here.
#[allow(clippy::cast_possible_truncation)]
pub fn cell_at_pointer(pointer: (f32, f32), origin: (f32, f32), grab: (f32, f32)) -> (i32, i32) {
    let cx = ((pointer.0 - origin.0 - grab.0) / CELL_SIZE).floor() as i32;
    let cy = ((pointer.1 - origin.1 - grab.1) / CELL_SIZE).floor() as i32;
    (cx, cy)
}

/// Clamp a candidate cell so a `width`×`height` widget stays on the board.
pub fn clamp_cell(cell: (i32, i32), width: i32, height: i32) -> (i32, i32) {
    (
        cell.0.clamp(0, (GRID_COLS - width).max(0)),
        cell.1.clamp(0, (GRID_ROWS - height).max(0)),
    )
}

/// Convert a pixel delta to a whole-cell delta (floor semantics).
#[allow(clippy::cast_possible_truncation)]
pub fn cells_from_pixels(delta_px: f32) -> i32 {
    (delta_px / CELL_SIZE).floor() as i32
}
