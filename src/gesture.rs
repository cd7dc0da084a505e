//! Drag and resize state machines.
//!
//! Pure pixel-space logic shared by the wasm event layer and the native
//! test suite. One gesture of each kind can be in flight at a time; the
//! controller owns the optional gesture values and clears them when the
//! gesture ends.
//!
//! Rules (matching the live board behavior):
//! - drag-over commits a live move only for existing widgets and only when
//!   the candidate cell is collision-free; new items track a preview cell
//!   and never touch the store before drop
//! - drop of a new item is silently discarded when the final candidate
//!   collides; drop of an existing widget finalizes wherever the live move
//!   last left it
//! - resize clamps to the grid and the minimum spans but deliberately skips
//!   sibling collision checks, so resized widgets can overlap

use crate::grid::{self, GRID_COLS, GRID_ROWS};
use crate::store::{WidgetStore, MIN_HEIGHT, MIN_WIDTH};
use crate::types::{DragGesture, DragSource, LibraryItem, ResizeGesture, WidgetKind};

/// Begin dragging a library item onto the board.
pub fn start_library_drag(item: &LibraryItem, grab: (f32, f32)) -> DragGesture {
    DragGesture {
        width: item.width,
        height: item.height,
        source: DragSource::New(item.clone()),
        grab,
        last_cell: (0, 0),
    }
}

/// Begin dragging an already-placed widget. `None` for unknown ids.
pub fn start_widget_drag(store: &WidgetStore, id: u32, grab: (f32, f32)) -> Option<DragGesture> {
    let w = store.get(id)?;
    Some(DragGesture {
        width: w.width,
        height: w.height,
        source: DragSource::Existing(id),
        grab,
        last_cell: (w.x, w.y),
    })
}

/// Advance a drag gesture to a new pointer position.
///
/// Computes the clamped candidate cell and, for existing widgets, commits
/// the live move when the target is free. Collisions leave the widget at
/// its previous position.
pub fn drag_over(
    store: &mut WidgetStore,
    gesture: &mut DragGesture,
    pointer: (f32, f32),
    origin: (f32, f32),
) {
    let raw = grid::cell_at_pointer(pointer, origin, gesture.grab);
    let cell = grid::clamp_cell(raw, gesture.width, gesture.height);

    match gesture.source {
        DragSource::New(_) => {
            // Preview only; the store is untouched until drop.
            gesture.last_cell = cell;
        }
        DragSource::Existing(id) => {
            if store.try_move(id, cell) {
                gesture.last_cell = cell;
            }
        }
    }
}

/// Finish a drag gesture at the drop pointer position.
///
/// Returns the id of the dropped widget, or `None` when a new item's final
/// candidate collided and the drop was discarded.
pub fn drop_gesture(
    store: &mut WidgetStore,
    gesture: DragGesture,
    pointer: (f32, f32),
    origin: (f32, f32),
) -> Option<u32> {
    let raw = grid::cell_at_pointer(pointer, origin, gesture.grab);
    let cell = grid::clamp_cell(raw, gesture.width, gesture.height);

    match gesture.source {
        DragSource::New(item) => store.spawn(&item, cell.0, cell.1),
        DragSource::Existing(id) => {
            // Live move already enforced no-overlap; the widget rests at
            // its last committed cell regardless of the final pointer.
            store.try_move(id, cell);
            Some(id)
        }
    }
}

/// Begin a resize gesture on a widget's corner handle.
///
/// `None` for calculators (never resizable) and unknown ids.
pub fn start_resize(store: &WidgetStore, id: u32, pointer: (f32, f32)) -> Option<ResizeGesture> {
    let w = store.get(id)?;
    if w.kind == WidgetKind::Calculator {
        return None;
    }
    Some(ResizeGesture {
        id,
        start_width: w.width,
        start_height: w.height,
        start_px: pointer,
    })
}

/// Advance a resize gesture to a new pointer position.
///
/// Spans grow by whole cells of pointer travel and clamp to the minimum
/// spans and the grid edge. No sibling collision check.
pub fn resize_update(store: &mut WidgetStore, gesture: &ResizeGesture, pointer: (f32, f32)) {
    let Some(w) = store.get(gesture.id) else {
        return;
    };
    let (x, y) = (w.x, w.y);
    let dx = grid::cells_from_pixels(pointer.0 - gesture.start_px.0);
    let dy = grid::cells_from_pixels(pointer.1 - gesture.start_px.1);
    let width = (gesture.start_width + dx).clamp(MIN_WIDTH, (GRID_COLS - x).max(MIN_WIDTH));
    let height = (gesture.start_height + dy).clamp(MIN_HEIGHT, (GRID_ROWS - y).max(MIN_HEIGHT));
    let _ = store.set_size(gesture.id, width, height);
}
