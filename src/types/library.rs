use serde::{Deserialize, Serialize};

use super::WidgetKind;

/// An immutable widget template in the library panel.
///
/// Library items are only drag sources: dropping one seeds a new `Widget`,
/// and the item itself never changes.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    pub id: u32,
    pub kind: WidgetKind,
    pub title: String,
    pub width: i32,
    pub height: i32,
}

/// The built-in library: one score tracker and one calculator.
pub fn builtin_library() -> Vec<LibraryItem> {
    vec![
        LibraryItem {
            id: 1,
            kind: WidgetKind::Score,
            title: "Score".to_string(),
            width: 3,
            height: 2,
        },
        LibraryItem {
            id: 2,
            kind: WidgetKind::Calculator,
            title: "Calculator".to_string(),
            width: 4,
            height: 3,
        },
    ]
}
