//! Tests for drag/drop placement and resize behavior.

#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use gridboard::board::GridBoard;
    use gridboard::grid::{GRID_COLS, GRID_ROWS};

    const SCORE_ITEM: u32 = 1;
    const CALC_ITEM: u32 = 2;

    /// Drop a new library item at the given pixel position.
    fn drop_item(board: &mut GridBoard, item: u32, px: f32, py: f32) -> Option<u32> {
        assert!(board.begin_library_drag(item, (0.0, 0.0)));
        board.pointer_move(px, py);
        board.pointer_up(px, py)
    }

    /// Assert that no two widgets at rest overlap.
    fn assert_no_overlaps(board: &GridBoard) {
        let widgets = board.store().widgets();
        for (i, a) in widgets.iter().enumerate() {
            for b in widgets.iter().skip(i + 1) {
                assert!(
                    !a.rect().overlaps(&b.rect()),
                    "widgets {} and {} overlap",
                    a.id,
                    b.id
                );
            }
        }
    }

    // ================================================================
    // Drop
    // ================================================================

    #[test]
    fn test_drop_on_empty_grid_creates_one_widget() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, SCORE_ITEM, 100.0, 100.0).unwrap();
        assert_eq!(board.store().len(), 1);

        let w = board.widget(id).unwrap();
        assert_eq!((w.x, w.y), (1, 1));
        assert!(!w.name.is_empty());
        assert!((0..=100).contains(&w.score));
    }

    #[test]
    fn test_drop_new_names_are_unused() {
        let mut board = GridBoard::new_test();
        let a = drop_item(&mut board, SCORE_ITEM, 0.0, 0.0).unwrap();
        let b = drop_item(&mut board, SCORE_ITEM, 0.0, 300.0).unwrap();
        let c = drop_item(&mut board, SCORE_ITEM, 0.0, 600.0).unwrap();
        let names: Vec<&str> = [a, b, c]
            .iter()
            .map(|id| board.widget(*id).unwrap().name.as_str())
            .collect();
        assert_ne!(names[0], names[1]);
        assert_ne!(names[1], names[2]);
        assert_ne!(names[0], names[2]);
    }

    #[test]
    fn test_drop_onto_occupied_cells_discarded() {
        let mut board = GridBoard::new_test();
        drop_item(&mut board, SCORE_ITEM, 200.0, 200.0).unwrap();
        // Same spot: silently discarded, no widget added.
        assert!(drop_item(&mut board, SCORE_ITEM, 250.0, 250.0).is_none());
        assert_eq!(board.store().len(), 1);
        assert_no_overlaps(&board);
    }

    #[test]
    fn test_drop_clamps_to_grid_bounds() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, SCORE_ITEM, 10_000.0, 10_000.0).unwrap();
        let w = board.widget(id).unwrap();
        assert!(w.x + w.width <= GRID_COLS);
        assert!(w.y + w.height <= GRID_ROWS);
        // 3×2 item clamps to the bottom-right corner.
        assert_eq!((w.x, w.y), (5, 8));
    }

    #[test]
    fn test_drop_negative_position_clamps_to_origin() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, SCORE_ITEM, -500.0, -500.0).unwrap();
        let w = board.widget(id).unwrap();
        assert_eq!((w.x, w.y), (0, 0));
    }

    #[test]
    fn test_new_item_not_created_before_drop() {
        let mut board = GridBoard::new_test();
        assert!(board.begin_library_drag(SCORE_ITEM, (0.0, 0.0)));
        board.pointer_move(100.0, 100.0);
        board.pointer_move(300.0, 300.0);
        assert!(board.store().is_empty());
    }

    #[test]
    fn test_grab_offset_shifts_candidate_cell() {
        let mut board = GridBoard::new_test();
        // Pointer at 250px but grabbed 60px into the element: cell floor((250-60)/100) = 1.
        assert!(board.begin_library_drag(SCORE_ITEM, (60.0, 60.0)));
        board.pointer_move(250.0, 250.0);
        let id = board.pointer_up(250.0, 250.0).unwrap();
        let w = board.widget(id).unwrap();
        assert_eq!((w.x, w.y), (1, 1));
    }

    // ================================================================
    // Live move
    // ================================================================

    #[test]
    fn test_existing_widget_moves_live_when_free() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, SCORE_ITEM, 0.0, 0.0).unwrap();

        assert!(board.begin_widget_drag(id, (0.0, 0.0)));
        board.pointer_move(200.0, 400.0);
        let w = board.widget(id).unwrap();
        assert_eq!((w.x, w.y), (2, 4));
    }

    #[test]
    fn test_existing_widget_refuses_colliding_move() {
        let mut board = GridBoard::new_test();
        let blocker = drop_item(&mut board, SCORE_ITEM, 400.0, 0.0).unwrap();
        let id = drop_item(&mut board, SCORE_ITEM, 0.0, 400.0).unwrap();
        let _ = blocker;

        assert!(board.begin_widget_drag(id, (0.0, 0.0)));
        // Over the blocker: refused, position unchanged.
        board.pointer_move(400.0, 0.0);
        let w = board.widget(id).unwrap();
        assert_eq!((w.x, w.y), (0, 4));
        assert_no_overlaps(&board);
    }

    #[test]
    fn test_existing_widget_drop_finalizes_last_valid_cell() {
        let mut board = GridBoard::new_test();
        let blocker = drop_item(&mut board, SCORE_ITEM, 400.0, 0.0).unwrap();
        let id = drop_item(&mut board, SCORE_ITEM, 0.0, 400.0).unwrap();
        let _ = blocker;

        assert!(board.begin_widget_drag(id, (0.0, 0.0)));
        board.pointer_move(0.0, 700.0); // free: committed
        let dropped = board.pointer_up(400.0, 0.0); // colliding drop point
        assert_eq!(dropped, Some(id));
        let w = board.widget(id).unwrap();
        assert_eq!((w.x, w.y), (0, 7));
        assert_no_overlaps(&board);
    }

    // ================================================================
    // Resize
    // ================================================================

    #[test]
    fn test_resize_below_minimum_clamps() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, SCORE_ITEM, 300.0, 300.0).unwrap();

        assert!(board.begin_resize(id, 600.0, 500.0));
        board.pointer_move(-1000.0, -1000.0);
        board.end_resize();

        let w = board.widget(id).unwrap();
        assert_eq!((w.width, w.height), (2, 1));
    }

    #[test]
    fn test_resize_clamps_to_grid_edge() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, SCORE_ITEM, 300.0, 300.0).unwrap();

        assert!(board.begin_resize(id, 600.0, 500.0));
        board.pointer_move(5000.0, 5000.0);
        board.end_resize();

        let w = board.widget(id).unwrap();
        assert!(w.x + w.width <= GRID_COLS);
        assert!(w.y + w.height <= GRID_ROWS);
        assert_eq!((w.width, w.height), (GRID_COLS - 3, GRID_ROWS - 3));
    }

    #[test]
    fn test_resize_grows_by_whole_cells() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, SCORE_ITEM, 0.0, 0.0).unwrap();

        assert!(board.begin_resize(id, 300.0, 200.0));
        // 99px of travel is no cells; 100px is one.
        board.pointer_move(399.0, 299.0);
        assert_eq!(board.widget(id).unwrap().width, 3);
        board.pointer_move(400.0, 300.0);
        board.end_resize();
        let w = board.widget(id).unwrap();
        assert_eq!((w.width, w.height), (4, 3));
    }

    #[test]
    fn test_resize_can_overlap_siblings() {
        // Resize deliberately performs no collision check; overlap is the
        // specified behavior here, not a bug.
        let mut board = GridBoard::new_test();
        let a = drop_item(&mut board, SCORE_ITEM, 0.0, 0.0).unwrap();
        let b = drop_item(&mut board, SCORE_ITEM, 400.0, 0.0).unwrap();

        assert!(board.begin_resize(a, 300.0, 200.0));
        board.pointer_move(700.0, 200.0);
        board.end_resize();

        let ra = board.widget(a).unwrap().rect();
        let rb = board.widget(b).unwrap().rect();
        assert!(ra.overlaps(&rb));
    }

    #[test]
    fn test_calculator_resize_refused() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, CALC_ITEM, 0.0, 0.0).unwrap();
        assert!(!board.begin_resize(id, 0.0, 0.0));
        let w = board.widget(id).unwrap();
        assert_eq!((w.width, w.height), (4, 3));
    }

    // ================================================================
    // Delete
    // ================================================================

    #[test]
    fn test_delete_frees_cells() {
        let mut board = GridBoard::new_test();
        let id = drop_item(&mut board, SCORE_ITEM, 0.0, 0.0).unwrap();
        board.delete_widget(id).unwrap();
        assert!(board.store().is_empty());

        // The freed cells accept a new drop.
        assert!(drop_item(&mut board, SCORE_ITEM, 0.0, 0.0).is_some());
    }

    #[test]
    fn test_invariants_hold_after_mixed_gestures() {
        let mut board = GridBoard::new_test();
        let a = drop_item(&mut board, SCORE_ITEM, 0.0, 0.0).unwrap();
        let b = drop_item(&mut board, CALC_ITEM, 0.0, 300.0).unwrap();
        let _ = drop_item(&mut board, SCORE_ITEM, 500.0, 700.0).unwrap();

        assert!(board.begin_widget_drag(a, (0.0, 0.0)));
        board.pointer_move(450.0, 50.0);
        let _ = board.pointer_up(450.0, 50.0);

        board.delete_widget(b).unwrap();
        let _ = drop_item(&mut board, SCORE_ITEM, 0.0, 300.0);

        for w in board.store().widgets() {
            assert!(w.rect().in_bounds());
        }
        assert_no_overlaps(&board);
    }
}
