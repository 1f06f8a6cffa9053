//! RGBA color type and the fixed colors used by the dock and menu.

use crate::palette::{NORD6, normalized};

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use arctic_dock::draw::Color;
/// let frost = Color::from_packed(0x88C0D0);
/// assert_eq!(frost.a, 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Opaque color from a packed `0xRRGGBB` value.
    pub fn from_packed(color: u32) -> Self {
        let (r, g, b) = normalized(color);
        Self { r, g, b, a: 1.0 }
    }

    /// Makes this color the cairo source.
    pub fn apply(&self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

/// Dock background and swatch label boxes
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Text of plain and current menu rows
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Background of the hovered menu row (0xCCCCCC)
pub const MENU_HOVER: Color = Color {
    r: 0.8,
    g: 0.8,
    b: 0.8,
    a: 1.0,
};

/// Background of the menu row of the format in use (0x555555)
pub const MENU_CURRENT: Color = Color {
    r: 0x55 as f64 / 255.0,
    g: 0x55 as f64 / 255.0,
    b: 0x55 as f64 / 255.0,
    a: 1.0,
};

/// Swatch label text
pub fn label_text() -> Color {
    Color::from_packed(NORD6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_colors_normalize_channels() {
        let color = Color::from_packed(0xFF0080);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert!((color.b - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn menu_greys_match_packed_values() {
        assert_eq!(Color::from_packed(0xCCCCCC), MENU_HOVER);
        assert_eq!(Color::from_packed(0x555555), MENU_CURRENT);
        assert_eq!(Color::from_packed(0x000000), BLACK);
        assert_eq!(Color::from_packed(0xFFFFFF), WHITE);
    }
}
