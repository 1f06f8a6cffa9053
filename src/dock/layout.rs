//! Swatch placement and hit-testing.

use crate::config::DockConfig;
use crate::palette::{CatalogEntry, PALETTE_LENGTH};
use crate::util::{Point, Rect, Size};

/// How much smaller a pressed swatch is drawn, in pixels.
const PRESSED_SHRINK: i32 = 5;
/// Offset of a pressed swatch from its resting corner, in pixels.
const PRESSED_OFFSET: i32 = 2;

/// One selectable color square in the dock.
///
/// Every swatch is a square of the dock's shared `box_size`; the size is not
/// stored per swatch, and [`hit_test`] relies on all swatches being identical.
/// A layout with differently sized swatches needs a per-swatch size first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    /// Position in the palette
    pub index: usize,
    /// Top-left corner in dock-local coordinates
    pub position: Point,
    /// Packed `0xRRGGBB` color
    pub color: u32,
    /// Palette label
    pub label: &'static str,
    /// Drawn in the pressed style while the primary button is held on it
    pub pressed: bool,
}

impl Swatch {
    /// Area occupied by the swatch, pressed or not.
    pub fn bounds(&self, box_size: u32) -> Rect {
        let size = box_size as i32;
        Rect::new(self.position.x, self.position.y, size, size)
    }

    /// Area actually filled with the color; pressed swatches shrink inward.
    pub fn fill_bounds(&self, box_size: u32) -> Rect {
        let bounds = self.bounds(box_size);
        if !self.pressed {
            return bounds;
        }
        Rect::new(
            bounds.x + PRESSED_OFFSET,
            bounds.y + PRESSED_OFFSET,
            (bounds.width - PRESSED_SHRINK).max(1),
            (bounds.height - PRESSED_SHRINK).max(1),
        )
    }
}

/// Lays the catalog out as a single column.
///
/// Swatch `i` sits at `(padding, padding + i * (box_size + padding))`.
pub fn layout(box_size: u32, padding: u32, entries: &[CatalogEntry]) -> Vec<Swatch> {
    let step = (box_size + padding) as i32;
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| Swatch {
            index,
            position: Point::new(padding as i32, padding as i32 + index as i32 * step),
            color: entry.color,
            label: entry.label,
            pressed: false,
        })
        .collect()
}

/// Returns true if `point` lies on or inside the swatch's square.
///
/// Both edges count as inside: `x` in `[swatch.x, swatch.x + box_size]`,
/// same for `y`.
pub fn hit_test(point: Point, swatch: &Swatch, box_size: u32) -> bool {
    let (px, py) = (point.x as i64, point.y as i64);
    let (sx, sy) = (swatch.position.x as i64, swatch.position.y as i64);
    let size = box_size as i64;
    px >= sx && px <= sx + size && py >= sy && py <= sy + size
}

/// Index of the first swatch containing `point`.
pub fn find_at(point: Point, swatches: &[Swatch], box_size: u32) -> Option<usize> {
    swatches
        .iter()
        .position(|swatch| hit_test(point, swatch, box_size))
}

/// Dock dimensions derived from the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockGeometry {
    /// Edge length of every swatch
    pub box_size: u32,
    /// Gap around and between swatches
    pub padding: u32,
    /// Dock window size
    pub size: Size,
}

impl DockGeometry {
    /// Sizes the dock so the palette fills the screen height minus the
    /// configured margin.
    pub fn from_screen(screen_height: u32, config: &DockConfig) -> Self {
        let height = screen_height as f64;
        let usable = height - config.height_margin * height;
        let box_size = ((usable / PALETTE_LENGTH as f64) as u32).max(1);
        Self::new(box_size, config.padding)
    }

    /// Geometry for an explicit swatch size.
    pub fn new(box_size: u32, padding: u32) -> Self {
        let width = 2 * padding + box_size;
        let height = PALETTE_LENGTH as u32 * (box_size + padding) + padding;
        Self {
            box_size,
            padding,
            size: Size::new(width, height),
        }
    }

    /// Top-left corner of the dock window: flush right, vertically centered.
    pub fn origin_on_screen(&self, screen: Size) -> Point {
        let x = screen.width as i64 - self.size.width as i64;
        let y = (screen.height as i64 - self.size.height as i64) / 2;
        Point::new(x as i32, y as i32)
    }
}
