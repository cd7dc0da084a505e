//! Canvas 2D rendering backend for the board.
//!
//! Draws the grid, the placed widgets, their delete buttons and resize
//! handles, and the drag preview outline via the HTML Canvas 2D API.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::{BoardError, Result};
use crate::formula;
use crate::grid::{CellRect, CELL_SIZE, GRID_COLS, GRID_ROWS};
use crate::store::WidgetStore;
use crate::types::{Widget, WidgetKind};

use super::colors;

/// Side length of the delete button square, logical pixels.
pub(crate) const DELETE_SIZE: f64 = 18.0;
/// Side length of the resize handle square, logical pixels.
pub(crate) const HANDLE_SIZE: f64 = 12.0;

const CARD_INSET: f64 = 3.0;
const CARD_PADDING: f64 = 10.0;

pub(crate) struct BoardRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    dpr: f32,
}

impl BoardRenderer {
    pub(crate) fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| BoardError::Render("failed to get 2d context".into()))?
            .ok_or_else(|| BoardError::Render("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| BoardError::Render("not a 2d context".into()))?;
        Ok(Self {
            canvas,
            ctx,
            dpr: 1.0,
        })
    }

    pub(crate) fn resize(&mut self, physical_width: u32, physical_height: u32, dpr: f32) {
        self.canvas.set_width(physical_width.max(1));
        self.canvas.set_height(physical_height.max(1));
        self.dpr = dpr;
    }

    /// Draw the whole board: grid, widgets, and the drag preview for a
    /// not-yet-placed library item.
    pub(crate) fn draw(&self, store: &WidgetStore, drag_preview: Option<CellRect>) {
        let ctx = &self.ctx;
        let _ = ctx.reset_transform();
        let dpr = f64::from(self.dpr);
        let _ = ctx.scale(dpr, dpr);

        let board_w = f64::from(GRID_COLS) * f64::from(CELL_SIZE);
        let board_h = f64::from(GRID_ROWS) * f64::from(CELL_SIZE);

        ctx.set_fill_style_str(colors::BOARD_BACKGROUND);
        ctx.fill_rect(0.0, 0.0, board_w, board_h);

        self.draw_grid_lines(board_w, board_h);

        let vars = store.variables();
        for widget in store.widgets() {
            let result = (widget.kind == WidgetKind::Calculator)
                .then(|| formula::evaluate(&widget.formula, &vars));
            self.draw_widget(widget, result.as_deref());
        }

        if let Some(rect) = drag_preview {
            self.draw_preview(rect);
        }
    }

    fn draw_grid_lines(&self, board_w: f64, board_h: f64) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(colors::GRID_LINE);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        for col in 0..=GRID_COLS {
            let x = f64::from(col) * f64::from(CELL_SIZE) + 0.5;
            ctx.move_to(x, 0.0);
            ctx.line_to(x, board_h);
        }
        for row in 0..=GRID_ROWS {
            let y = f64::from(row) * f64::from(CELL_SIZE) + 0.5;
            ctx.move_to(0.0, y);
            ctx.line_to(board_w, y);
        }
        ctx.stroke();
    }

    fn draw_widget(&self, widget: &Widget, formula_result: Option<&str>) {
        let ctx = &self.ctx;
        let (px, py, pw, ph) = widget_pixel_rect(widget);
        let (x, y, w, h) = (
            px + CARD_INSET,
            py + CARD_INSET,
            pw - 2.0 * CARD_INSET,
            ph - 2.0 * CARD_INSET,
        );

        let (fill, border) = match widget.kind {
            WidgetKind::Score => (colors::SCORE_FILL, colors::SCORE_BORDER),
            WidgetKind::Calculator => (colors::CALC_FILL, colors::CALC_BORDER),
        };
        ctx.set_fill_style_str(fill);
        ctx.fill_rect(x, y, w, h);
        ctx.set_stroke_style_str(border);
        ctx.set_line_width(2.0);
        ctx.stroke_rect(x, y, w, h);

        ctx.set_text_align("left");
        ctx.set_text_baseline("top");
        ctx.set_font("600 12px -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif");
        ctx.set_fill_style_str(colors::TITLE_TEXT);
        let _ = ctx.fill_text(&widget.title, x + CARD_PADDING, y + CARD_PADDING);

        match widget.kind {
            WidgetKind::Score => {
                ctx.set_font(
                    "400 13px -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif",
                );
                ctx.set_fill_style_str(colors::VALUE_TEXT);
                let name = if widget.name.is_empty() {
                    "(unnamed)"
                } else {
                    &widget.name
                };
                let _ = ctx.fill_text(name, x + CARD_PADDING, y + CARD_PADDING + 20.0);

                ctx.set_font(
                    "700 28px -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif",
                );
                let _ = ctx.fill_text(
                    &widget.score.to_string(),
                    x + CARD_PADDING,
                    y + CARD_PADDING + 40.0,
                );
            }
            WidgetKind::Calculator => {
                ctx.set_font(
                    "400 13px ui-monospace, SFMono-Regular, Menlo, Consolas, monospace",
                );
                ctx.set_fill_style_str(colors::VALUE_TEXT);
                let _ = ctx.fill_text(&widget.formula, x + CARD_PADDING, y + CARD_PADDING + 20.0);

                if let Some(result) = formula_result {
                    ctx.set_font(
                        "700 24px -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif",
                    );
                    let color = if result == formula::ERROR_MARKER {
                        colors::ERROR_TEXT
                    } else {
                        colors::VALUE_TEXT
                    };
                    ctx.set_fill_style_str(color);
                    let _ = ctx.fill_text(result, x + CARD_PADDING, y + CARD_PADDING + 44.0);
                }
            }
        }

        // Delete button, top-right corner of the card.
        ctx.set_fill_style_str(colors::DELETE_BUTTON);
        ctx.set_font("400 14px sans-serif");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        let _ = ctx.fill_text(
            "\u{00d7}",
            x + w - DELETE_SIZE / 2.0,
            y + DELETE_SIZE / 2.0 + 1.0,
        );
        ctx.set_text_align("left");
        ctx.set_text_baseline("top");

        // Resize handle, bottom-right corner. Calculators are fixed-size.
        if widget.kind == WidgetKind::Score {
            ctx.set_fill_style_str(colors::RESIZE_HANDLE);
            ctx.fill_rect(x + w - HANDLE_SIZE, y + h - HANDLE_SIZE, HANDLE_SIZE, HANDLE_SIZE);
        }
    }

    fn draw_preview(&self, rect: CellRect) {
        let ctx = &self.ctx;
        let x = f64::from(rect.x) * f64::from(CELL_SIZE) + CARD_INSET;
        let y = f64::from(rect.y) * f64::from(CELL_SIZE) + CARD_INSET;
        let w = f64::from(rect.width) * f64::from(CELL_SIZE) - 2.0 * CARD_INSET;
        let h = f64::from(rect.height) * f64::from(CELL_SIZE) - 2.0 * CARD_INSET;

        let dash = js_sys::Array::of2(&6.0.into(), &4.0.into());
        let _ = ctx.set_line_dash(&dash);
        ctx.set_stroke_style_str(colors::DRAG_PREVIEW);
        ctx.set_line_width(2.0);
        ctx.stroke_rect(x, y, w, h);
        let _ = ctx.set_line_dash(&js_sys::Array::new());
    }
}

/// A widget's on-canvas rectangle in logical pixels.
pub(crate) fn widget_pixel_rect(widget: &Widget) -> (f64, f64, f64, f64) {
    (
        f64::from(widget.x) * f64::from(CELL_SIZE),
        f64::from(widget.y) * f64::from(CELL_SIZE),
        f64::from(widget.width) * f64::from(CELL_SIZE),
        f64::from(widget.height) * f64::from(CELL_SIZE),
    )
}

/// Overlay rectangle `[x, y, w, h]` for editing one widget field, matching
/// where [`BoardRenderer::draw_widget`] paints that field.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn field_rect(widget: &Widget, field: crate::board::EditField) -> [f32; 4] {
    let (px, py, pw, _) = widget_pixel_rect(widget);
    let x = px + CARD_INSET + CARD_PADDING;
    let w = pw - 2.0 * (CARD_INSET + CARD_PADDING) - DELETE_SIZE;
    let y = match field {
        crate::board::EditField::Name | crate::board::EditField::Formula => {
            py + CARD_INSET + CARD_PADDING + 18.0
        }
        crate::board::EditField::Score => py + CARD_INSET + CARD_PADDING + 38.0,
    };
    [x as f32, y as f32, w.max(40.0) as f32, 24.0]
}
