use space_invaders::entities::Rect;
use space_invaders::view::*;

fn view() -> Viewport {
    // 10 world units per column, 30 per row
    Viewport::new(128, 24, 1280, 720)
}

#[test]
fn points_map_to_cells() {
    let v = view();
    assert_eq!(v.cell(0, 0), Some((0, 0)));
    assert_eq!(v.cell(1279, 719), Some((127, 23)));
    assert_eq!(v.cell(655, 95), Some((65, 3)));
}

#[test]
fn off_screen_points_have_no_cell() {
    let v = view();
    assert_eq!(v.cell(1280, 10), None);
    assert_eq!(v.cell(10, 720), None);
    assert_eq!(v.cell(-1, 10), None);
}

#[test]
fn negative_coordinates_round_down() {
    let v = view();
    assert_eq!(v.to_col(-1), -1);
    assert_eq!(v.to_row(-31), -2);
}

#[test]
fn rect_projects_to_cell_span() {
    let v = view();
    let cells = v.project(&Rect::new(188, 100, 64, 48));
    // 188..252 → cols 18..25, 100..148 → rows 3..4
    assert_eq!(cells, CellRect { col: 18, row: 3, cols: 7, rows: 1 });
}

#[test]
fn thin_rect_still_covers_one_cell() {
    let v = view();
    let cells = v.project(&Rect::new(638, 680, 4, 10));
    assert_eq!((cells.cols, cells.rows), (1, 1));
    assert_eq!(cells.cells().collect::<Vec<_>>(), vec![(63, 22)]);
}

#[test]
fn cells_iterate_row_major() {
    let cells = CellRect { col: 2, row: 5, cols: 2, rows: 2 };
    assert_eq!(
        cells.cells().collect::<Vec<_>>(),
        vec![(2, 5), (3, 5), (2, 6), (3, 6)]
    );
}

#[test]
fn contains_checks_bounds() {
    let v = view();
    assert!(v.contains(0, 0));
    assert!(v.contains(127, 23));
    assert!(!v.contains(128, 0));
    assert!(!v.contains(0, -1));
}

#[test]
fn degenerate_world_is_clamped() {
    let v = Viewport::new(80, 24, 0, -5);
    assert_eq!((v.world_width, v.world_height), (1, 1));
}
