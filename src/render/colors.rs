//! Board color palette.

pub(crate) const BOARD_BACKGROUND: &str = "#FFFFFF";
pub(crate) const GRID_LINE: &str = "#E8E8E8";

pub(crate) const SCORE_FILL: &str = "#E8F0FE";
pub(crate) const SCORE_BORDER: &str = "#4285F4";
pub(crate) const CALC_FILL: &str = "#FEF7E0";
pub(crate) const CALC_BORDER: &str = "#F9AB00";

pub(crate) const TITLE_TEXT: &str = "#5F6368";
pub(crate) const VALUE_TEXT: &str = "#202124";
pub(crate) const ERROR_TEXT: &str = "#D93025";

pub(crate) const DELETE_BUTTON: &str = "#9AA0A6";
pub(crate) const RESIZE_HANDLE: &str = "#4285F4";
pub(crate) const DRAG_PREVIEW: &str = "#34A853";
