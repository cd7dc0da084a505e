//! Main `GridBoard` struct - the primary entry point for the board editor.
//!
//! This module provides the WASM-exported `GridBoard` struct that handles:
//! - The widget store and the in-flight drag/resize gestures
//! - Mouse interaction on the board canvas (drag, drop, resize, delete)
//! - Field editing through a DOM input overlay (name, score, formula)
//! - Coordinating Canvas 2D rendering
//!
//! Event handlers are registered automatically when the board is created -
//! no manual JavaScript wiring required. Library items are dragged in from
//! the host page via [`GridBoard::begin_library_drag`].

#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod inputs;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use web_sys::{HtmlCanvasElement, MouseEvent};

#[cfg(target_arch = "wasm32")]
use crate::render::BoardRenderer;
use crate::store::WidgetStore;
use crate::types::{builtin_library, LibraryItem};
#[cfg(not(target_arch = "wasm32"))]
use crate::types::{DragGesture, ResizeGesture, Widget};
use crate::{formula, gesture};

#[cfg(target_arch = "wasm32")]
use events::ResizeListeners;
#[cfg(target_arch = "wasm32")]
use inputs::FieldOverlay;

/// Which widget field the input overlay is editing.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EditField {
    Name,
    Score,
    Formula,
}

/// Target of a hit test (what the pointer is over).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HitTarget {
    /// A widget's body, by id.
    Widget(u32),
    /// A widget's delete button.
    DeleteButton(u32),
    /// A widget's resize handle (score widgets only).
    ResizeHandle(u32),
    /// An empty board cell.
    Empty(i32, i32),
    /// Outside the board.
    None,
}

// Timing helper for WASM metrics.
#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

#[cfg(target_arch = "wasm32")]
#[derive(serde::Serialize)]
struct RenderMetrics {
    draw_ms: f64,
    widgets: u32,
}

/// Shared state that can be accessed by event handlers (wasm32 only).
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    pub(crate) store: WidgetStore,
    pub(crate) library: Vec<LibraryItem>,
    pub(crate) drag: Option<crate::types::DragGesture>,
    pub(crate) resize: Option<crate::types::ResizeGesture>,
    pub(crate) editing: Option<(u32, EditField)>,
    pub(crate) needs_render: bool,
    pub(crate) render_callback: Option<Function>,
    /// Listener pair for the in-flight resize gesture. Present exactly
    /// while a gesture is active.
    pub(crate) resize_listeners: Option<ResizeListeners>,
    /// Detached listener pairs awaiting destruction. A closure must not be
    /// freed while it is executing, so the mouseup handler parks its own
    /// pair here; the next gesture start clears it.
    pub(crate) retired_listeners: Vec<ResizeListeners>,
}

/// The main board struct exported to JavaScript.
#[wasm_bindgen]
pub struct GridBoard {
    #[cfg(target_arch = "wasm32")]
    state: Rc<RefCell<SharedState>>,
    #[cfg(target_arch = "wasm32")]
    renderer: BoardRenderer,
    #[cfg(target_arch = "wasm32")]
    canvas: HtmlCanvasElement,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
    #[cfg(target_arch = "wasm32")]
    overlay: FieldOverlay,

    // Non-wasm32 fields (for tests)
    #[cfg(not(target_arch = "wasm32"))]
    store: WidgetStore,
    #[cfg(not(target_arch = "wasm32"))]
    library: Vec<LibraryItem>,
    #[cfg(not(target_arch = "wasm32"))]
    drag: Option<DragGesture>,
    #[cfg(not(target_arch = "wasm32"))]
    resize: Option<ResizeGesture>,
    #[cfg(not(target_arch = "wasm32"))]
    #[allow(dead_code)]
    editing: Option<(u32, EditField)>,
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridBoard {
    /// Create a new board bound to a canvas.
    ///
    /// Registers mousedown/mousemove/mouseup handlers on the canvas; drag,
    /// drop, resize, and delete work out of the box.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, dpr: f32) -> Result<GridBoard, JsValue> {
        console_error_panic_hook::set_once();

        let physical_width = canvas.width().max(1);
        let physical_height = canvas.height().max(1);

        let mut renderer =
            BoardRenderer::new(canvas.clone()).map_err(|e| JsValue::from_str(&e.to_string()))?;
        renderer.resize(physical_width, physical_height, dpr);

        let state = Rc::new(RefCell::new(SharedState {
            store: WidgetStore::new(),
            library: builtin_library(),
            drag: None,
            resize: None,
            editing: None,
            needs_render: true,
            render_callback: None,
            resize_listeners: None,
            retired_listeners: Vec::new(),
        }));

        let mut closures: Vec<Closure<dyn FnMut(MouseEvent)>> = Vec::new();

        // Mouse down (drag start, delete, resize start)
        {
            let state = Rc::clone(&state);
            let canvas_ref = canvas.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let rect = canvas_ref.get_bounding_client_rect();
                #[allow(clippy::cast_possible_truncation)]
                let x = event.client_x() as f32 - rect.left() as f32;
                #[allow(clippy::cast_possible_truncation)]
                let y = event.client_y() as f32 - rect.top() as f32;
                Self::internal_mouse_down(&state, &canvas_ref, x, y);
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Mouse move (live drag)
        {
            let state = Rc::clone(&state);
            let canvas_ref = canvas.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let rect = canvas_ref.get_bounding_client_rect();
                #[allow(clippy::cast_possible_truncation)]
                let x = event.client_x() as f32 - rect.left() as f32;
                #[allow(clippy::cast_possible_truncation)]
                let y = event.client_y() as f32 - rect.top() as f32;
                Self::internal_mouse_move(&state, x, y);
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        // Mouse up (drop)
        {
            let state = Rc::clone(&state);
            let canvas_ref = canvas.clone();
            let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
                let rect = canvas_ref.get_bounding_client_rect();
                #[allow(clippy::cast_possible_truncation)]
                let x = event.client_x() as f32 - rect.left() as f32;
                #[allow(clippy::cast_possible_truncation)]
                let y = event.client_y() as f32 - rect.top() as f32;
                Self::internal_mouse_up(&state, x, y);
            }) as Box<dyn FnMut(MouseEvent)>);
            canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())
                .ok();
            closures.push(closure);
        }

        Ok(GridBoard {
            state,
            renderer,
            canvas,
            closures,
            overlay: FieldOverlay::new(),
        })
    }

    /// Begin dragging a library item onto the board.
    ///
    /// The host page calls this when the pointer enters the canvas with a
    /// library item held; `grab_dx`/`grab_dy` is the pointer offset inside
    /// the dragged element. Returns false for an unknown item id.
    #[wasm_bindgen(js_name = "beginLibraryDrag")]
    pub fn begin_library_drag(&self, item_id: u32, grab_dx: f32, grab_dy: f32) -> bool {
        let mut s = self.state.borrow_mut();
        let Some(item) = s.library.iter().find(|i| i.id == item_id).cloned() else {
            return false;
        };
        s.drag = Some(gesture::start_library_drag(&item, (grab_dx, grab_dy)));
        true
    }

    /// Render the current board state. Returns timing metrics for the host.
    pub fn render(&mut self) -> Result<JsValue, JsValue> {
        let start = now_ms();
        let mut s = self.state.borrow_mut();
        let preview = s
            .drag
            .as_ref()
            .filter(|g| g.is_new())
            .map(|g| crate::grid::CellRect::new(g.last_cell.0, g.last_cell.1, g.width, g.height));
        self.renderer.draw(&s.store, preview);
        s.needs_render = false;

        let metrics = RenderMetrics {
            draw_ms: now_ms() - start,
            widgets: u32::try_from(s.store.len()).unwrap_or(u32::MAX),
        };
        serde_wasm_bindgen::to_value(&metrics)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Resize the canvas backing store.
    pub fn resize(&mut self, physical_width: u32, physical_height: u32, dpr: f32) {
        self.renderer.resize(physical_width, physical_height, dpr);
        self.state.borrow_mut().needs_render = true;
    }

    /// Register a callback invoked whenever the board needs a re-render.
    #[wasm_bindgen(js_name = "setRenderCallback")]
    pub fn set_render_callback(&mut self, callback: Option<Function>) {
        self.state.borrow_mut().render_callback = callback;
    }

    /// Delete a widget.
    #[wasm_bindgen(js_name = "deleteWidget")]
    pub fn delete_widget(&mut self, id: u32) -> Result<(), JsValue> {
        {
            let mut s = self.state.borrow_mut();
            s.store.delete(id).map_err(JsValue::from)?;
            if s.editing.map(|(eid, _)| eid) == Some(id) {
                s.editing = None;
            }
            s.needs_render = true;
        }
        self.overlay_hide_if_done();
        self.request_render();
        Ok(())
    }

    /// Rename a score widget from raw user input.
    ///
    /// Returns false when the sanitized name collides with another widget's
    /// name; the widget is left unchanged in that case.
    #[wasm_bindgen(js_name = "renameWidget")]
    pub fn rename_widget(&mut self, id: u32, raw: &str) -> Result<bool, JsValue> {
        let applied = {
            let mut s = self.state.borrow_mut();
            let applied = s.store.rename(id, raw).map_err(JsValue::from)?;
            s.needs_render = true;
            applied
        };
        self.request_render();
        Ok(applied)
    }

    /// Set a widget's score from raw input text.
    ///
    /// Malformed numbers are ignored; valid values are clamped to [0, 100].
    #[wasm_bindgen(js_name = "setScore")]
    pub fn set_score(&mut self, id: u32, raw: &str) -> Result<(), JsValue> {
        if let Ok(score) = raw.trim().parse::<i32>() {
            let mut s = self.state.borrow_mut();
            s.store.set_score(id, score).map_err(JsValue::from)?;
            s.needs_render = true;
        }
        self.request_render();
        Ok(())
    }

    /// Reassign a fresh random score without changing the name.
    #[wasm_bindgen(js_name = "randomizeScore")]
    pub fn randomize_score(&mut self, id: u32) -> Result<(), JsValue> {
        {
            let mut s = self.state.borrow_mut();
            s.store.randomize_score(id).map_err(JsValue::from)?;
            s.needs_render = true;
        }
        self.request_render();
        Ok(())
    }

    /// Set a calculator's formula text.
    #[wasm_bindgen(js_name = "setFormula")]
    pub fn set_formula(&mut self, id: u32, text: &str) -> Result<(), JsValue> {
        {
            let mut s = self.state.borrow_mut();
            s.store.set_formula(id, text).map_err(JsValue::from)?;
            s.needs_render = true;
        }
        self.request_render();
        Ok(())
    }

    /// Splice a variable name into a calculator's formula at the cursor.
    ///
    /// Updates the store and, when the formula is being edited, the overlay
    /// input (restoring focus and caret). Returns the new cursor position.
    #[wasm_bindgen(js_name = "insertVariable")]
    pub fn insert_variable(&mut self, id: u32, name: &str, cursor: u32) -> Result<u32, JsValue> {
        let (text, caret, editing_formula) = {
            let mut s = self.state.borrow_mut();
            let current = s
                .store
                .get(id)
                .map(|w| w.formula.clone())
                .ok_or(crate::error::BoardError::UnknownWidget(id))
                .map_err(JsValue::from)?;
            let (text, caret) = formula::insert_variable(&current, name, cursor as usize);
            s.store.set_formula(id, &text).map_err(JsValue::from)?;
            s.needs_render = true;
            let editing_formula = s.editing == Some((id, EditField::Formula));
            (text, caret, editing_formula)
        };
        if editing_formula {
            self.overlay.set_value_and_caret(&text, caret);
        }
        self.request_render();
        Ok(u32::try_from(caret).unwrap_or(u32::MAX))
    }

    /// Names available for insertion into formulas.
    #[wasm_bindgen(js_name = "variableNames")]
    pub fn variable_names(&self) -> Vec<String> {
        self.state.borrow().store.variable_names()
    }

    /// Evaluate a widget's formula against the current board.
    #[wasm_bindgen(js_name = "evaluateWidget")]
    pub fn evaluate_widget(&self, id: u32) -> String {
        let s = self.state.borrow();
        match s.store.get(id) {
            Some(w) => formula::evaluate(&w.formula, &s.store.variables()),
            None => formula::ERROR_MARKER.to_string(),
        }
    }

    /// Number of widgets on the board.
    #[wasm_bindgen(js_name = "widgetCount")]
    pub fn widget_count(&self) -> u32 {
        u32::try_from(self.state.borrow().store.len()).unwrap_or(u32::MAX)
    }

    /// The board as a JSON string (widgets only; state is ephemeral).
    #[wasm_bindgen(js_name = "boardJson")]
    pub fn board_json(&self) -> Result<String, JsValue> {
        let s = self.state.borrow();
        serde_json::to_string(s.store.widgets())
            .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
    }

    /// The board state as a `JsValue` for direct host consumption.
    #[wasm_bindgen(js_name = "boardState")]
    pub fn board_state(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        serde_wasm_bindgen::to_value(s.store.widgets())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// The library items as a `JsValue` (for the host's palette panel).
    #[wasm_bindgen(js_name = "libraryItems")]
    pub fn library_items(&self) -> Result<JsValue, JsValue> {
        let s = self.state.borrow();
        serde_wasm_bindgen::to_value(&s.library)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Which widget is at the given canvas point, if any.
    #[wasm_bindgen(js_name = "widgetAtPoint")]
    pub fn widget_at_point(&self, x: f32, y: f32) -> Option<u32> {
        let s = self.state.borrow();
        match Self::hit_test(&s, x, y) {
            HitTarget::Widget(id) | HitTarget::DeleteButton(id) | HitTarget::ResizeHandle(id) => {
                Some(id)
            }
            _ => None,
        }
    }

    /// Begin editing a score widget's name in the input overlay.
    #[wasm_bindgen(js_name = "beginEditName")]
    pub fn begin_edit_name(&mut self, id: u32) {
        self.begin_edit(id, EditField::Name);
    }

    /// Begin editing a score widget's score in the input overlay.
    #[wasm_bindgen(js_name = "beginEditScore")]
    pub fn begin_edit_score(&mut self, id: u32) {
        self.begin_edit(id, EditField::Score);
    }

    /// Begin editing a calculator's formula in the input overlay.
    #[wasm_bindgen(js_name = "beginEditFormula")]
    pub fn begin_edit_formula(&mut self, id: u32) {
        self.begin_edit(id, EditField::Formula);
    }

    /// Commit the current overlay edit with the given value.
    #[wasm_bindgen(js_name = "commitEdit")]
    pub fn commit_edit(&mut self, value: &str) -> Result<(), JsValue> {
        let editing = self.state.borrow().editing;
        let Some((id, field)) = editing else {
            return Ok(());
        };
        match field {
            EditField::Name => {
                self.rename_widget(id, value)?;
            }
            EditField::Score => self.set_score(id, value)?,
            EditField::Formula => self.set_formula(id, value)?,
        }
        self.state.borrow_mut().editing = None;
        self.overlay.hide();
        Ok(())
    }

    /// Cancel the current overlay edit.
    #[wasm_bindgen(js_name = "cancelEdit")]
    pub fn cancel_edit(&mut self) {
        self.state.borrow_mut().editing = None;
        self.overlay.hide();
    }

    /// Get the current value from the input overlay.
    #[wasm_bindgen(js_name = "inputValue")]
    pub fn input_value(&self) -> Option<String> {
        self.overlay.value()
    }

    /// Invoke the host print facility.
    pub fn print(&self) {
        if let Some(window) = web_sys::window() {
            let _ = window.print();
        }
    }

    fn begin_edit(&mut self, id: u32, field: EditField) {
        let (rect, value) = {
            let s = self.state.borrow();
            let Some(w) = s.store.get(id) else {
                return;
            };
            let value = match field {
                EditField::Name => w.name.clone(),
                EditField::Score => w.score.to_string(),
                EditField::Formula => w.formula.clone(),
            };
            (crate::render::field_rect(w, field), value)
        };
        self.state.borrow_mut().editing = Some((id, field));
        self.overlay.show(&self.canvas, rect, &value);
    }

    fn overlay_hide_if_done(&mut self) {
        if self.state.borrow().editing.is_none() {
            self.overlay.hide();
        }
    }

    fn request_render(&self) {
        let callback = self.state.borrow().render_callback.clone();
        Self::invoke_render_callback(callback);
    }
}

// ============================================================================
// Non-WASM32 Implementation (for tests)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl GridBoard {
    /// Create a new board (non-WASM, for testing).
    #[must_use]
    pub fn new_test() -> Self {
        GridBoard {
            store: WidgetStore::new(),
            library: builtin_library(),
            drag: None,
            resize: None,
            editing: None,
        }
    }

    /// The widget store (read-only).
    pub fn store(&self) -> &WidgetStore {
        &self.store
    }

    /// Look up a widget by id.
    pub fn widget(&self, id: u32) -> Option<&Widget> {
        self.store.get(id)
    }

    /// Begin dragging a library item onto the board.
    pub fn begin_library_drag(&mut self, item_id: u32, grab: (f32, f32)) -> bool {
        let Some(item) = self.library.iter().find(|i| i.id == item_id).cloned() else {
            return false;
        };
        self.drag = Some(gesture::start_library_drag(&item, grab));
        true
    }

    /// Begin dragging an existing widget.
    pub fn begin_widget_drag(&mut self, id: u32, grab: (f32, f32)) -> bool {
        match gesture::start_widget_drag(&self.store, id, grab) {
            Some(g) => {
                self.drag = Some(g);
                true
            }
            None => false,
        }
    }

    /// Advance the in-flight drag to a pointer position.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some(mut g) = self.drag.take() {
            gesture::drag_over(&mut self.store, &mut g, (x, y), (0.0, 0.0));
            self.drag = Some(g);
        }
        if let Some(g) = self.resize {
            gesture::resize_update(&mut self.store, &g, (x, y));
        }
    }

    /// Drop the in-flight drag at a pointer position.
    ///
    /// Returns the dropped widget's id, or `None` when a new item's drop
    /// was discarded (or no drag was active).
    pub fn pointer_up(&mut self, x: f32, y: f32) -> Option<u32> {
        let result = self
            .drag
            .take()
            .and_then(|g| gesture::drop_gesture(&mut self.store, g, (x, y), (0.0, 0.0)));
        self.end_resize();
        result
    }

    /// Begin a resize gesture on a widget's corner handle.
    pub fn begin_resize(&mut self, id: u32, x: f32, y: f32) -> bool {
        match gesture::start_resize(&self.store, id, (x, y)) {
            Some(g) => {
                self.resize = Some(g);
                true
            }
            None => false,
        }
    }

    /// Finish the in-flight resize gesture.
    pub fn end_resize(&mut self) {
        self.resize = None;
    }

    pub fn delete_widget(&mut self, id: u32) -> crate::error::Result<()> {
        self.store.delete(id)
    }

    pub fn rename_widget(&mut self, id: u32, raw: &str) -> crate::error::Result<bool> {
        self.store.rename(id, raw)
    }

    /// Set a widget's score from raw input text; malformed input is ignored.
    pub fn set_score_text(&mut self, id: u32, raw: &str) -> crate::error::Result<()> {
        match raw.trim().parse::<i32>() {
            Ok(score) => self.store.set_score(id, score),
            Err(_) => Ok(()),
        }
    }

    pub fn randomize_score(&mut self, id: u32) -> crate::error::Result<()> {
        self.store.randomize_score(id)
    }

    pub fn set_formula(&mut self, id: u32, text: &str) -> crate::error::Result<()> {
        self.store.set_formula(id, text)
    }

    /// Splice a variable into a widget's formula; returns the new cursor.
    pub fn insert_variable(
        &mut self,
        id: u32,
        name: &str,
        cursor: usize,
    ) -> crate::error::Result<usize> {
        let current = self
            .store
            .get(id)
            .map(|w| w.formula.clone())
            .ok_or(crate::error::BoardError::UnknownWidget(id))?;
        let (text, caret) = formula::insert_variable(&current, name, cursor);
        self.store.set_formula(id, &text)?;
        Ok(caret)
    }

    /// Evaluate a widget's formula against the current board.
    pub fn evaluate_widget(&self, id: u32) -> String {
        match self.store.get(id) {
            Some(w) => formula::evaluate(&w.formula, &self.store.variables()),
            None => formula::ERROR_MARKER.to_string(),
        }
    }

    /// Names available for insertion into formulas.
    pub fn variable_names(&self) -> Vec<String> {
        self.store.variable_names()
    }

    /// The board as a JSON string.
    pub fn board_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self.store.widgets())?)
    }

    /// The library items.
    pub fn library(&self) -> &[LibraryItem] {
        &self.library
    }
}
