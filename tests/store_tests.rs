//! Tests for widget field editing and board serialization.

#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use gridboard::board::GridBoard;
    use gridboard::grid::GRID_COLS;
    use gridboard::WidgetKind;

    const SCORE_ITEM: u32 = 1;
    const CALC_ITEM: u32 = 2;

    fn drop_item(board: &mut GridBoard, item: u32, px: f32, py: f32) -> u32 {
        assert!(board.begin_library_drag(item, (0.0, 0.0)));
        board.pointer_move(px, py);
        board.pointer_up(px, py).unwrap()
    }

    // ================================================================
    // Rename
    // ================================================================

    #[test]
    fn test_rename_sanitizes_raw_input() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, SCORE_ITEM, 0.0, 0.0);
        assert!(board.rename_widget(id, "Team Red 1!").unwrap());
        assert_eq!(board.widget(id).unwrap().name, "teamred");
    }

    #[test]
    fn test_rename_truncates_to_ten_chars() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, SCORE_ITEM, 0.0, 0.0);
        assert!(board.rename_widget(id, "abcdefghijklmnop").unwrap());
        assert_eq!(board.widget(id).unwrap().name, "abcdefghij");
    }

    #[test]
    fn test_rename_collision_leaves_widget_unchanged() {
        let mut board = GridBoard::new_test();
        let a = drop_item(&mut board, SCORE_ITEM, 0.0, 0.0);
        let b = drop_item(&mut board, SCORE_ITEM, 400.0, 0.0);
        assert!(board.rename_widget(a, "red").unwrap());
        let before = board.widget(b).unwrap().name.clone();
        assert!(!board.rename_widget(b, "red").unwrap());
        assert_eq!(board.widget(b).unwrap().name, before);
    }

    #[test]
    fn test_rename_unknown_widget_errors() {
        let mut board = GridBoard::new_test();
        assert!(board.rename_widget(42, "x").is_err());
    }

    // ================================================================
    // Score
    // ================================================================

    #[test]
    fn test_set_score_clamps() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, SCORE_ITEM, 0.0, 0.0);
        board.set_score_text(id, "250").unwrap();
        assert_eq!(board.widget(id).unwrap().score, 100);
        board.set_score_text(id, "-7").unwrap();
        assert_eq!(board.widget(id).unwrap().score, 0);
    }

    #[test]
    fn test_set_score_ignores_malformed_input() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, SCORE_ITEM, 0.0, 0.0);
        board.set_score_text(id, "55").unwrap();
        board.set_score_text(id, "fifty").unwrap();
        board.set_score_text(id, "").unwrap();
        assert_eq!(board.widget(id).unwrap().score, 55);
    }

    #[test]
    fn test_set_score_trims_whitespace() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, SCORE_ITEM, 0.0, 0.0);
        board.set_score_text(id, "  42  ").unwrap();
        assert_eq!(board.widget(id).unwrap().score, 42);
    }

    #[test]
    fn test_randomize_score_keeps_name() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, SCORE_ITEM, 0.0, 0.0);
        board.rename_widget(id, "kept").unwrap();
        board.randomize_score(id).unwrap();
        let w = board.widget(id).unwrap();
        assert_eq!(w.name, "kept");
        assert!((0..=100).contains(&w.score));
    }

    // ================================================================
    // Serialization
    // ================================================================

    #[test]
    fn test_board_json_shape() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, SCORE_ITEM, 100.0, 200.0);
        board.rename_widget(id, "solo").unwrap();
        board.set_score_text(id, "33").unwrap();

        let json = board.board_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let w = &parsed.as_array().unwrap()[0];
        assert_eq!(w["kind"], "score");
        assert_eq!(w["x"], 1);
        assert_eq!(w["y"], 2);
        assert_eq!(w["width"], 3);
        assert_eq!(w["height"], 2);
        assert_eq!(w["name"], "solo");
        assert_eq!(w["score"], 33);
        // Calculators keep their formula; score widgets omit the empty field.
        assert!(w.get("formula").is_none());
    }

    #[test]
    fn test_board_json_calculator_formula() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, CALC_ITEM, 0.0, 0.0);
        board.set_formula(id, "1 + 2").unwrap();

        let json = board.board_json().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let w = &parsed.as_array().unwrap()[0];
        assert_eq!(w["kind"], "calculator");
        assert_eq!(w["formula"], "1 + 2");
        assert!(w.get("name").is_none());
    }

    #[test]
    fn test_empty_board_serializes_to_empty_array() {
        let board = GridBoard::new_test();
        assert_eq!(board.board_json().unwrap(), "[]");
    }

    // ================================================================
    // Library
    // ================================================================

    #[test]
    fn test_builtin_library_items() {
        let board = GridBoard::new_test();
        let items = board.library();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind, WidgetKind::Score);
        assert_eq!((items[0].width, items[0].height), (3, 2));
        assert_eq!(items[1].kind, WidgetKind::Calculator);
        assert_eq!((items[1].width, items[1].height), (4, 3));
        assert!(items.iter().all(|i| i.width <= GRID_COLS));
    }

    #[test]
    fn test_unknown_library_item_refused() {
        let mut board = GridBoard::new_test();
        assert!(!board.begin_library_drag(99, (0.0, 0.0)));
        board.pointer_move(0.0, 0.0);
        assert!(board.pointer_up(0.0, 0.0).is_none());
        assert!(board.store().is_empty());
    }
}
