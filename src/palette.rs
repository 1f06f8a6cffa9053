//! The fixed Nord color catalog shown by the dock.
//!
//! Sixteen `(color, label)` pairs in the order they appear from top to bottom.
//! Colors are packed 24-bit RGB values (`0xRRGGBB`).

/// Number of swatches in the dock.
pub const PALETTE_LENGTH: usize = 16;

// ============================================================================
// Nord palette (https://www.nordtheme.com)
// ============================================================================

pub const NORD0: u32 = 0x2E3440;
pub const NORD1: u32 = 0x3B4252;
pub const NORD2: u32 = 0x434C5E;
pub const NORD3: u32 = 0x4C566A;
pub const NORD4: u32 = 0xD8DEE9;
pub const NORD5: u32 = 0xE5E9F0;
/// Also used for swatch label text.
pub const NORD6: u32 = 0xECEFF4;
pub const NORD7: u32 = 0x8FBCBB;
pub const NORD8: u32 = 0x88C0D0;
pub const NORD9: u32 = 0x81A1C1;
pub const NORD10: u32 = 0x5E81AC;
pub const NORD11: u32 = 0xBF616A;
pub const NORD12: u32 = 0xD08770;
pub const NORD13: u32 = 0xEBCB8B;
pub const NORD14: u32 = 0xA3BE8C;
pub const NORD15: u32 = 0xB48EAD;

/// One immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Packed `0xRRGGBB` color
    pub color: u32,
    /// Short label drawn on the swatch
    pub label: &'static str,
}

const fn entry(color: u32, label: &'static str) -> CatalogEntry {
    CatalogEntry { color, label }
}

/// The dock palette, top to bottom.
pub const PALETTE: [CatalogEntry; PALETTE_LENGTH] = [
    entry(NORD0, "nord0"),
    entry(NORD1, "nord1"),
    entry(NORD2, "nord2"),
    entry(NORD3, "nord3"),
    entry(NORD4, "nord4"),
    entry(NORD5, "nord5"),
    entry(NORD6, "nord6"),
    entry(NORD7, "nord7"),
    entry(NORD8, "nord8"),
    entry(NORD9, "nord9"),
    entry(NORD10, "nord10"),
    entry(NORD11, "nord11"),
    entry(NORD12, "nord12"),
    entry(NORD13, "nord13"),
    entry(NORD14, "nord14"),
    entry(NORD15, "nord15"),
];

/// Splits a packed color into its 8-bit channels.
pub fn channels(color: u32) -> (u8, u8, u8) {
    (
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    )
}

/// Splits a packed color into channels normalized to 0.0-1.0.
pub fn normalized(color: u32) -> (f64, f64, f64) {
    let (r, g, b) = channels(color);
    (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_labels_follow_index() {
        for (i, entry) in PALETTE.iter().enumerate() {
            assert_eq!(entry.label, format!("nord{i}"));
        }
    }

    #[test]
    fn channels_extract_red_green_blue_bytes() {
        assert_eq!(channels(NORD10), (0x5E, 0x81, 0xAC));
        assert_eq!(channels(0xFF_000000 | NORD0), (0x2E, 0x34, 0x40));
    }

    #[test]
    fn normalized_channels_span_unit_range() {
        assert_eq!(normalized(0xFFFFFF), (1.0, 1.0, 1.0));
        assert_eq!(normalized(0x000000), (0.0, 0.0, 0.0));
    }
}
