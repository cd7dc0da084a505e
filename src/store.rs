//! The widget store: the sole mutable collection of placed widgets.
//!
//! Applies user mutations to the in-memory board model. Placement-related
//! mutations enforce the board invariants (bounds, no overlap at rest,
//! unique names); operations that would break an invariant leave the store
//! unchanged.

use std::collections::BTreeMap;

use crate::error::{BoardError, Result};
use crate::grid::CellRect;
use crate::naming;
use crate::types::{LibraryItem, Widget, WidgetKind};

/// Minimum cell spans for a resizable widget.
pub const MIN_WIDTH: i32 = 2;
pub const MIN_HEIGHT: i32 = 1;

/// Ordered collection of placed widgets.
#[derive(Debug, Default)]
pub struct WidgetStore {
    widgets: Vec<Widget>,
    next_id: u32,
}

impl WidgetStore {
    pub fn new() -> Self {
        Self {
            widgets: Vec::new(),
            next_id: 1,
        }
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: u32) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }

    /// Whether a candidate rectangle collides with any widget other than
    /// `exclude`.
    pub fn collides(&self, rect: CellRect, exclude: Option<u32>) -> bool {
        self.widgets
            .iter()
            .filter(|w| Some(w.id) != exclude)
            .any(|w| rect.overlaps(&w.rect()))
    }

    /// Whether `name` is already used by a widget other than `exclude`.
    /// Empty names never count as taken.
    pub fn name_taken(&self, name: &str, exclude: Option<u32>) -> bool {
        !name.is_empty()
            && self
                .widgets
                .iter()
                .filter(|w| Some(w.id) != exclude)
                .any(|w| w.name == name)
    }

    /// Seed a new widget from a library item at an already-validated cell.
    ///
    /// Returns `None` (store unchanged) when the rectangle is out of bounds
    /// or collides with an existing widget; otherwise the new widget's id.
    /// Score widgets receive a random unused name and a random score.
    pub fn spawn(&mut self, item: &LibraryItem, x: i32, y: i32) -> Option<u32> {
        let rect = CellRect::new(x, y, item.width, item.height);
        if !rect.in_bounds() || self.collides(rect, None) {
            return None;
        }

        let (name, score) = match item.kind {
            WidgetKind::Score => (
                naming::random_unused_name(|w| self.name_taken(w, None)),
                naming::random_score(),
            ),
            WidgetKind::Calculator => (String::new(), 0),
        };

        let id = self.next_id;
        self.next_id += 1;
        self.widgets.push(Widget {
            id,
            x,
            y,
            width: item.width,
            height: item.height,
            kind: item.kind,
            title: item.title.clone(),
            name,
            score,
            formula: String::new(),
        });
        Some(id)
    }

    /// Move an existing widget to `cell` if the target is free.
    ///
    /// Returns true when the move was committed. A colliding or out-of-bounds
    /// target leaves the widget where it was.
    pub fn try_move(&mut self, id: u32, cell: (i32, i32)) -> bool {
        let Some(w) = self.get(id) else {
            return false;
        };
        let rect = CellRect::new(cell.0, cell.1, w.width, w.height);
        if !rect.in_bounds() || self.collides(rect, Some(id)) {
            return false;
        }
        if let Some(w) = self.get_mut(id) {
            w.x = cell.0;
            w.y = cell.1;
            true
        } else {
            false
        }
    }

    /// Set a widget's spans directly.
    ///
    /// Callers are expected to have clamped the spans already (the resize
    /// gesture does); this only refuses calculators, which are never
    /// resizable. No sibling collision check happens here.
    pub fn set_size(&mut self, id: u32, width: i32, height: i32) -> Result<()> {
        let w = self.get_mut(id).ok_or(BoardError::UnknownWidget(id))?;
        if w.kind == WidgetKind::Calculator {
            return Ok(());
        }
        w.width = width;
        w.height = height;
        Ok(())
    }

    pub fn delete(&mut self, id: u32) -> Result<()> {
        let before = self.widgets.len();
        self.widgets.retain(|w| w.id != id);
        if self.widgets.len() == before {
            return Err(BoardError::UnknownWidget(id));
        }
        Ok(())
    }

    /// Rename a widget from raw user input.
    ///
    /// The input is lowercased, stripped of non-`a-z` characters, and
    /// truncated to 10 chars. Returns true when the name was applied; a
    /// collision with another widget's name rejects the edit and leaves the
    /// widget unchanged.
    pub fn rename(&mut self, id: u32, raw: &str) -> Result<bool> {
        let name = naming::sanitize_name(raw);
        if self.name_taken(&name, Some(id)) {
            return Ok(false);
        }
        let w = self.get_mut(id).ok_or(BoardError::UnknownWidget(id))?;
        w.name = name;
        Ok(true)
    }

    /// Set a widget's score, clamped to `[0, 100]`.
    pub fn set_score(&mut self, id: u32, score: i32) -> Result<()> {
        let w = self.get_mut(id).ok_or(BoardError::UnknownWidget(id))?;
        w.score = score.clamp(0, 100);
        Ok(())
    }

    /// Reassign a fresh random score without touching the name.
    pub fn randomize_score(&mut self, id: u32) -> Result<()> {
        let w = self.get_mut(id).ok_or(BoardError::UnknownWidget(id))?;
        w.score = naming::random_score();
        Ok(())
    }

    pub fn set_formula(&mut self, id: u32, formula: &str) -> Result<()> {
        let w = self.get_mut(id).ok_or(BoardError::UnknownWidget(id))?;
        w.formula = formula.to_string();
        Ok(())
    }

    /// Name→score map of the named score widgets, the variable scope for
    /// formula evaluation.
    pub fn variables(&self) -> BTreeMap<String, i32> {
        self.widgets
            .iter()
            .filter(|w| w.is_named_score())
            .map(|w| (w.name.clone(), w.score))
            .collect()
    }

    /// Names available for insertion into a formula.
    pub fn variable_names(&self) -> Vec<String> {
        self.widgets
            .iter()
            .filter(|w| w.is_named_score())
            .map(|w| w.name.clone())
            .collect()
    }
}
