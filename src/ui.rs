//! Menu and shop layout
//!
//! Button and grid rectangles shared by the renderer (to draw them) and the
//! session (to turn pointer clicks into actions).

use glam::IVec2;

/// Axis-aligned screen rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    /// Point-in-rect, right and bottom edges exclusive
    pub fn contains(&self, point: IVec2) -> bool {
        point.x >= self.pos.x
            && point.y >= self.pos.y
            && point.x < self.pos.x + self.size.x
            && point.y < self.pos.y + self.size.y
    }

    pub fn center(&self) -> IVec2 {
        self.pos + self.size / 2
    }
}

/// Ships shown on the shop grid
pub const SHOP_GRID_SLOTS: usize = 6;
const SHOP_GRID_COLUMNS: usize = 3;
const SHOP_GRID_ORIGIN: IVec2 = IVec2::new(65, 220);
const SHOP_GRID_PITCH: i32 = 100;
const SHOP_CELL_SIZE: i32 = 70;

/// Start button on the main menu
pub fn start_button(screen_width: i32) -> Rect {
    Rect::new(screen_width / 2 - 70, 360, 140, 55)
}

/// Shop button on the main menu
pub fn shop_button(screen_width: i32) -> Rect {
    Rect::new(screen_width / 2 - 70, 430, 140, 55)
}

/// Back button in the shop
pub fn back_button() -> Rect {
    Rect::new(10, 10, 85, 50)
}

/// Buy button in the shop
pub fn buy_button(screen_width: i32) -> Rect {
    Rect::new(screen_width / 2 - 60, 500, 120, 40)
}

/// Cell of the `index`th ship on the shop grid
pub fn shop_cell(index: usize) -> Rect {
    let col = (index % SHOP_GRID_COLUMNS) as i32;
    let row = (index / SHOP_GRID_COLUMNS) as i32;
    let pos = SHOP_GRID_ORIGIN + IVec2::new(col, row) * SHOP_GRID_PITCH;
    Rect::new(pos.x, pos.y, SHOP_CELL_SIZE, SHOP_CELL_SIZE)
}

/// Which of the first `ships` grid cells is under the pointer
pub fn shop_cell_at(point: IVec2, ships: usize) -> Option<usize> {
    (0..ships.min(SHOP_GRID_SLOTS)).find(|&i| shop_cell(i).contains(point))
}
