//! Placement of the format menu on screen.

use crate::config::MenuConfig;
use crate::format::ColorFormat;
use crate::util::{Point, Rect, Size};

/// Screen rectangle and row metrics of an open menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuGeometry {
    /// On-screen rectangle of the popup
    pub rect: Rect,
    /// Height of one row
    pub item_height: u32,
    /// Number of rows
    pub count: usize,
}

impl MenuGeometry {
    /// Places the menu at `anchor`, pulled back on screen when needed.
    ///
    /// - If the menu would cross the right screen edge it moves to
    ///   `screen_width - menu_width - dock_width`, i.e. left of the dock.
    /// - If it would extend below the safe line (see [`safe_line`]) it moves
    ///   up so its bottom edge sits on that line.
    pub fn place(anchor: Point, screen: Size, dock: Size, style: &MenuConfig) -> Self {
        let count = ColorFormat::COUNT;
        let width = style.width as i32;
        let height = (style.item_height as usize * count) as i32;

        let mut x = anchor.x;
        if x + width > screen.width as i32 {
            x = screen.width as i32 - width - dock.width as i32;
        }

        let mut y = anchor.y;
        let safe = safe_line(screen, dock);
        if y + height > safe {
            y = safe - height;
        }

        Self {
            rect: Rect::new(x, y, width, height),
            item_height: style.item_height,
            count,
        }
    }

    /// Menu height in pixels.
    pub fn height(&self) -> i32 {
        self.rect.height
    }

    /// Row under a popup-local `y`, or `None` when `y` is outside the rows.
    pub fn row_at(&self, y: i32) -> Option<usize> {
        if y < 0 || self.item_height == 0 {
            return None;
        }
        let row = (y / self.item_height as i32) as usize;
        (row < self.count).then_some(row)
    }
}

/// Lowest screen row the menu may reach: the bottom edge of the vertically
/// centered dock, `dock_height + (screen_height - dock_height) / 2`.
pub fn safe_line(screen: Size, dock: Size) -> i32 {
    let screen_height = screen.height as i64;
    let dock_height = dock.height as i64;
    (dock_height + (screen_height - dock_height).max(0) / 2) as i32
}
