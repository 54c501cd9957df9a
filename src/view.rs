//! Projection from world units onto the terminal's character grid.

use crate::entities::Rect;

/// A rectangle of terminal cells.  Not clipped: `col`/`row` may lie off
/// screen, check individual cells with [`Viewport::contains`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub col: i32,
    pub row: i32,
    pub cols: usize,
    pub rows: usize,
}

impl CellRect {
    /// Every cell of the rectangle, row-major.
    pub fn cells(self) -> impl Iterator<Item = (i32, i32)> {
        (0..self.rows as i32)
            .flat_map(move |r| (0..self.cols as i32).map(move |c| (self.col + c, self.row + r)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub world_width: i32,
    pub world_height: i32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, world_width: i32, world_height: i32) -> Self {
        Viewport {
            cols,
            rows,
            world_width: world_width.max(1),
            world_height: world_height.max(1),
        }
    }

    pub fn to_col(&self, x: i32) -> i32 {
        (i64::from(x) * i64::from(self.cols)).div_euclid(i64::from(self.world_width)) as i32
    }

    pub fn to_row(&self, y: i32) -> i32 {
        (i64::from(y) * i64::from(self.rows)).div_euclid(i64::from(self.world_height)) as i32
    }

    pub fn contains(&self, col: i32, row: i32) -> bool {
        (0..i32::from(self.cols)).contains(&col) && (0..i32::from(self.rows)).contains(&row)
    }

    /// Cell holding world point `(x, y)`, or `None` when it is off screen.
    pub fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let (col, row) = (self.to_col(x), self.to_row(y));
        self.contains(col, row).then_some((col as u16, row as u16))
    }

    /// Cells covered by `rect`; never smaller than one cell each way so thin
    /// objects such as bullets stay visible.
    pub fn project(&self, rect: &Rect) -> CellRect {
        let col = self.to_col(rect.left());
        let row = self.to_row(rect.top());
        let cols = (self.to_col(rect.right()) - col).max(1);
        let rows = (self.to_row(rect.bottom()) - row).max(1);
        CellRect {
            col,
            row,
            cols: cols as usize,
            rows: rows as usize,
        }
    }
}
