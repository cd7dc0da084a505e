//! DOM input overlay for widget field editing.
//!
//! Creates an `<input>` element positioned over the field being edited.
//! Keyboard handling (Enter/Escape) is done on the JS side via the host
//! page's wrapper.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlInputElement};

/// Input overlay for name/score/formula editing.
pub(crate) struct FieldOverlay {
    input: Option<HtmlInputElement>,
}

impl FieldOverlay {
    pub(crate) fn new() -> Self {
        FieldOverlay { input: None }
    }

    /// Show the input overlay at the given rectangle.
    ///
    /// `rect` is `[x, y, w, h]` in logical (CSS) pixels relative to the
    /// board canvas; the input is positioned against the canvas's offset
    /// parent.
    pub(crate) fn show(&mut self, canvas: &HtmlCanvasElement, rect: [f32; 4], current_value: &str) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let [x, y, w, h] = rect;
        let left = f64::from(canvas.offset_left()) + f64::from(x);
        let top = f64::from(canvas.offset_top()) + f64::from(y);

        let input = self.get_or_create_input(&document, canvas);
        let style = input.style();

        let _ = style.set_property("display", "block");
        let _ = style.set_property("left", &format!("{left}px"));
        let _ = style.set_property("top", &format!("{top}px"));
        let _ = style.set_property("width", &format!("{w}px"));
        let _ = style.set_property("height", &format!("{h}px"));

        input.set_value(current_value);

        // Focus and select all text
        let _ = input.focus();
        input.select();
    }

    /// Hide the input overlay.
    pub(crate) fn hide(&mut self) {
        if let Some(ref input) = self.input {
            let _ = input.style().set_property("display", "none");
            let _ = input.blur();
        }
    }

    /// Get current input value.
    pub(crate) fn value(&self) -> Option<String> {
        self.input.as_ref().map(|i| i.value())
    }

    /// Replace the value and restore focus with the caret at `pos`.
    ///
    /// Used after a variable insertion so the user keeps typing where the
    /// splice ended.
    pub(crate) fn set_value_and_caret(&self, value: &str, pos: usize) {
        let Some(ref input) = self.input else {
            return;
        };
        input.set_value(value);
        let _ = input.focus();
        let caret = u32::try_from(pos).unwrap_or(u32::MAX);
        let _ = input.set_selection_range(caret, caret);
    }

    /// Get or create the `<input>` element.
    fn get_or_create_input(
        &mut self,
        document: &Document,
        canvas: &HtmlCanvasElement,
    ) -> &HtmlInputElement {
        if self.input.is_none() {
            if let Ok(el) = document.create_element("input") {
                if let Ok(input) = el.dyn_into::<HtmlInputElement>() {
                    input.set_type("text");
                    let style = input.style();
                    let _ = style.set_property("position", "absolute");
                    let _ = style.set_property("z-index", "1000");
                    let _ = style.set_property("box-sizing", "border-box");
                    let _ = style.set_property("border", "2px solid #4285f4");
                    let _ = style.set_property("outline", "none");
                    let _ = style.set_property("padding", "0 4px");
                    let _ = style.set_property("font-family", "inherit");
                    let _ = style.set_property("font-size", "13px");
                    let _ = style.set_property("background", "#fff");
                    let _ = style.set_property("display", "none");

                    // Append next to the canvas, or to the body as a fallback
                    if let Some(parent) = canvas.parent_element() {
                        let _ = parent.append_child(&input);
                    } else if let Some(body) = document.body() {
                        let _ = body.append_child(&input);
                    }

                    self.input = Some(input);
                }
            }
        }

        // Safe: we just created it above if it was None
        // If creation somehow failed, we'll get the previous one or this will be unreachable
        #[allow(clippy::expect_used)]
        self.input.as_ref().expect("input element must exist")
    }
}

impl Drop for FieldOverlay {
    fn drop(&mut self) {
        if let Some(ref input) = self.input {
            if let Some(parent) = input.parent_node() {
                let _ = parent.remove_child(input);
            }
        }
    }
}
