//! Mouse event handlers for `GridBoard`.
//!
//! All methods here are `pub(crate)` helpers called from the closures
//! registered in `mod.rs`, plus the document-level listener pair that lives
//! for the duration of one resize gesture.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, MouseEvent};

use super::{GridBoard, HitTarget, SharedState};
use crate::gesture;
use crate::grid::{self, GRID_COLS, GRID_ROWS};
use crate::render::{widget_pixel_rect, DELETE_SIZE, HANDLE_SIZE};
use crate::types::WidgetKind;

/// Extra pixels of slop around the delete button and resize handle.
const HIT_SLOP: f64 = 4.0;

/// Document-level mousemove/mouseup pair for one resize gesture.
///
/// Attached on handle mouse-down, detached on mouse-up; detaching in `Drop`
/// guarantees release even when the board itself is torn down mid-gesture.
pub(crate) struct ResizeListeners {
    document: Document,
    move_closure: Closure<dyn FnMut(MouseEvent)>,
    up_closure: Closure<dyn FnMut(MouseEvent)>,
    attached: bool,
}

impl ResizeListeners {
    fn attach(
        document: Document,
        move_closure: Closure<dyn FnMut(MouseEvent)>,
        up_closure: Closure<dyn FnMut(MouseEvent)>,
    ) -> Self {
        document
            .add_event_listener_with_callback("mousemove", move_closure.as_ref().unchecked_ref())
            .ok();
        document
            .add_event_listener_with_callback("mouseup", up_closure.as_ref().unchecked_ref())
            .ok();
        Self {
            document,
            move_closure,
            up_closure,
            attached: true,
        }
    }

    /// Remove both listeners. Idempotent.
    pub(crate) fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        let _ = self.document.remove_event_listener_with_callback(
            "mousemove",
            self.move_closure.as_ref().unchecked_ref(),
        );
        let _ = self.document.remove_event_listener_with_callback(
            "mouseup",
            self.up_closure.as_ref().unchecked_ref(),
        );
    }
}

impl Drop for ResizeListeners {
    fn drop(&mut self) {
        self.detach();
    }
}

impl GridBoard {
    pub(crate) fn internal_mouse_down(
        state: &Rc<RefCell<SharedState>>,
        canvas: &HtmlCanvasElement,
        x: f32,
        y: f32,
    ) {
        let hit = {
            let s = state.borrow();
            Self::hit_test(&s, x, y)
        };

        match hit {
            HitTarget::DeleteButton(id) => {
                let callback = {
                    let mut s = state.borrow_mut();
                    if s.store.delete(id).is_ok() {
                        if s.editing.map(|(eid, _)| eid) == Some(id) {
                            s.editing = None;
                        }
                        s.needs_render = true;
                        s.render_callback.clone()
                    } else {
                        None
                    }
                };
                Self::invoke_render_callback(callback);
            }
            HitTarget::ResizeHandle(id) => {
                let started = {
                    let mut s = state.borrow_mut();
                    // A previous gesture's listeners are no longer running;
                    // safe to free them now.
                    s.retired_listeners.clear();
                    let g = gesture::start_resize(&s.store, id, (x, y));
                    s.resize = g;
                    g.is_some()
                };
                if started {
                    Self::attach_resize_listeners(state, canvas);
                }
            }
            HitTarget::Widget(id) => {
                let mut s = state.borrow_mut();
                let grab = s.store.get(id).map(|w| {
                    let (px, py, _, _) = widget_pixel_rect(w);
                    #[allow(clippy::cast_possible_truncation)]
                    (x - px as f32, y - py as f32)
                });
                if let Some(grab) = grab {
                    let g = gesture::start_widget_drag(&s.store, id, grab);
                    s.drag = g;
                }
            }
            HitTarget::Empty(_, _) | HitTarget::None => {}
        }
    }

    pub(crate) fn internal_mouse_move(state: &Rc<RefCell<SharedState>>, x: f32, y: f32) {
        let callback = {
            let mut s = state.borrow_mut();
            let Some(mut g) = s.drag.take() else {
                return;
            };
            gesture::drag_over(&mut s.store, &mut g, (x, y), (0.0, 0.0));
            s.drag = Some(g);
            s.needs_render = true;
            s.render_callback.clone()
        };
        Self::invoke_render_callback(callback);
    }

    pub(crate) fn internal_mouse_up(state: &Rc<RefCell<SharedState>>, x: f32, y: f32) {
        let callback = {
            let mut s = state.borrow_mut();
            let Some(g) = s.drag.take() else {
                return;
            };
            // A colliding new-item drop is silently discarded here.
            let _ = gesture::drop_gesture(&mut s.store, g, (x, y), (0.0, 0.0));
            s.needs_render = true;
            s.render_callback.clone()
        };
        Self::invoke_render_callback(callback);
    }

    fn internal_resize_move(state: &Rc<RefCell<SharedState>>, x: f32, y: f32) {
        let callback = {
            let mut s = state.borrow_mut();
            let Some(g) = s.resize else {
                return;
            };
            gesture::resize_update(&mut s.store, &g, (x, y));
            s.needs_render = true;
            s.render_callback.clone()
        };
        Self::invoke_render_callback(callback);
    }

    fn internal_resize_end(state: &Rc<RefCell<SharedState>>) {
        let callback = {
            let mut s = state.borrow_mut();
            s.resize = None;
            // Detach now; destruction is deferred because this very closure
            // is the one executing.
            if let Some(mut listeners) = s.resize_listeners.take() {
                listeners.detach();
                s.retired_listeners.push(listeners);
            }
            s.needs_render = true;
            s.render_callback.clone()
        };
        Self::invoke_render_callback(callback);
    }

    fn attach_resize_listeners(state: &Rc<RefCell<SharedState>>, canvas: &HtmlCanvasElement) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let move_closure = {
            let state = Rc::clone(state);
            let canvas = canvas.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let rect = canvas.get_bounding_client_rect();
                #[allow(clippy::cast_possible_truncation)]
                let x = event.client_x() as f32 - rect.left() as f32;
                #[allow(clippy::cast_possible_truncation)]
                let y = event.client_y() as f32 - rect.top() as f32;
                Self::internal_resize_move(&state, x, y);
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        let up_closure = {
            let state = Rc::clone(state);
            Closure::wrap(Box::new(move |_event: MouseEvent| {
                Self::internal_resize_end(&state);
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        let listeners = ResizeListeners::attach(document, move_closure, up_closure);
        state.borrow_mut().resize_listeners = Some(listeners);
    }

    /// Determine what the pointer is over. Later widgets draw on top, so
    /// iteration runs back to front.
    pub(crate) fn hit_test(s: &SharedState, x: f32, y: f32) -> HitTarget {
        let (fx, fy) = (f64::from(x), f64::from(y));
        for w in s.store.widgets().iter().rev() {
            let (px, py, pw, ph) = widget_pixel_rect(w);
            if fx < px || fx >= px + pw || fy < py || fy >= py + ph {
                continue;
            }
            if fx >= px + pw - DELETE_SIZE - HIT_SLOP && fy < py + DELETE_SIZE + HIT_SLOP {
                return HitTarget::DeleteButton(w.id);
            }
            if w.kind == WidgetKind::Score
                && fx >= px + pw - HANDLE_SIZE - HIT_SLOP
                && fy >= py + ph - HANDLE_SIZE - HIT_SLOP
            {
                return HitTarget::ResizeHandle(w.id);
            }
            return HitTarget::Widget(w.id);
        }

        let (cx, cy) = grid::cell_at_pointer((x, y), (0.0, 0.0), (0.0, 0.0));
        if (0..GRID_COLS).contains(&cx) && (0..GRID_ROWS).contains(&cy) && x >= 0.0 && y >= 0.0 {
            HitTarget::Empty(cx, cy)
        } else {
            HitTarget::None
        }
    }

    pub(crate) fn invoke_render_callback(callback: Option<Function>) {
        if let Some(callback) = callback {
            let _ = callback.call0(&JsValue::NULL);
        }
    }
}
