use keyforge_core::layout::{Position, RowWidths};
use keyforge_core::pins::PinGrid;

#[test]
fn test_free_grid_has_no_pins() {
    let grid = PinGrid::free(RowWidths::standard());
    for pos in RowWidths::standard().positions() {
        assert!(!grid.is_pinned(pos));
    }
}

#[test]
fn test_set_pins_and_unpins_a_single_cell() {
    let mut grid = PinGrid::free(RowWidths::standard());
    let pos = Position::new(3, 1);

    grid.set(pos, true);
    assert!(grid.is_pinned(pos));

    grid.set(pos, false);
    assert!(!grid.is_pinned(pos));
}

#[test]
fn test_wide_grid_matches_wide_row_widths() {
    let grid = PinGrid::free(RowWidths::wide());
    assert_eq!(grid.0[0].len(), 12);
    assert_eq!(grid.0[1].len(), 11);
    assert_eq!(grid.0[2].len(), 10);
}
