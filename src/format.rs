//! Textual color encodings offered by the context menu.
//!
//! [`format_color`] is a pure function from a packed `0xRRGGBB` color and a
//! [`ColorFormat`] to the text placed on the clipboard. The CSS and HSL
//! encodings end in a semicolon; existing users paste them straight into
//! stylesheets, so the exact output is kept as is.

use crate::palette;
use crate::util::truncate_to_capacity;
use std::fmt;
use std::str::FromStr;

/// Supported output formats, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorFormat {
    /// `#RRGGBB`
    #[default]
    HtmlHex,
    /// `0xrrggbb`
    RawHex,
    /// `rgb(R, G, B);`
    CssRgb,
    /// `rgba(R, G, B, 1);`
    CssRgba,
    /// `hsl(H, S%, L%);`
    Hsl,
    /// `0.54f, 0.22f, 0.44f`
    Float,
    /// `vec3(0.54f, 0.22f, 0.44f)`
    Vec3,
    /// `vec4(0.54f, 0.22f, 0.44f, 1.00f)`
    Vec4,
}

impl ColorFormat {
    /// Every format, in the order the menu lists them.
    pub const ALL: [ColorFormat; 8] = [
        ColorFormat::HtmlHex,
        ColorFormat::RawHex,
        ColorFormat::CssRgb,
        ColorFormat::CssRgba,
        ColorFormat::Hsl,
        ColorFormat::Float,
        ColorFormat::Vec3,
        ColorFormat::Vec4,
    ];

    /// Number of formats (and menu rows).
    pub const COUNT: usize = Self::ALL.len();

    /// Looks up a format by its menu row. Out-of-range rows have no format.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Menu row of this format.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label shown in the context menu.
    pub fn label(self) -> &'static str {
        match self {
            ColorFormat::HtmlHex => "HTML HEX",
            ColorFormat::RawHex => "Raw HEX",
            ColorFormat::CssRgb => "CSS RGB",
            ColorFormat::CssRgba => "CSS RGBA",
            ColorFormat::Hsl => "HSL",
            ColorFormat::Float => "Float",
            ColorFormat::Vec3 => "Vec3",
            ColorFormat::Vec4 => "Vec4",
        }
    }

    /// Kebab-case name accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ColorFormat::HtmlHex => "html-hex",
            ColorFormat::RawHex => "raw-hex",
            ColorFormat::CssRgb => "css-rgb",
            ColorFormat::CssRgba => "css-rgba",
            ColorFormat::Hsl => "hsl",
            ColorFormat::Float => "float",
            ColorFormat::Vec3 => "vec3",
            ColorFormat::Vec4 => "vec4",
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|f| f.name()).collect();
                format!(
                    "unknown color format '{}' (expected one of: {})",
                    s,
                    names.join(", ")
                )
            })
    }
}

/// Renders `color` in the requested format.
pub fn format_color(color: u32, format: ColorFormat) -> String {
    let (r, g, b) = palette::channels(color);
    let (rn, gn, bn) = palette::normalized(color);

    match format {
        ColorFormat::HtmlHex => format!("#{r:02X}{g:02X}{b:02X}"),
        ColorFormat::RawHex => format!("0x{r:02x}{g:02x}{b:02x}"),
        ColorFormat::CssRgb => format!("rgb({r}, {g}, {b});"),
        ColorFormat::CssRgba => format!("rgba({r}, {g}, {b}, 1);"),
        ColorFormat::Hsl => {
            let (h, s, l) = rgb_to_hsl(color);
            format!(
                "hsl({}, {}%, {}%);",
                h.round() as i32,
                s.round() as i32,
                l.round() as i32
            )
        }
        ColorFormat::Float => format!("{rn:.2}f, {gn:.2}f, {bn:.2}f"),
        ColorFormat::Vec3 => format!("vec3({rn:.2}f, {gn:.2}f, {bn:.2}f)"),
        ColorFormat::Vec4 => format!("vec4({rn:.2}f, {gn:.2}f, {bn:.2}f, 1.00f)"),
    }
}

/// Renders `color` in the format of menu row `row` for a fixed-capacity
/// buffer of `capacity` bytes (including the terminator slot), truncating on
/// a character boundary. Rows outside the format list yield an empty string.
pub fn format_color_bounded(color: u32, row: usize, capacity: usize) -> String {
    let text = format_color_index(color, row);
    truncate_to_capacity(&text, capacity).to_string()
}

/// Renders `color` using a raw menu row. Rows outside the format list yield an
/// empty string.
pub fn format_color_index(color: u32, index: usize) -> String {
    match ColorFormat::from_index(index) {
        Some(format) => format_color(color, format),
        None => String::new(),
    }
}

/// Converts a packed color to `(hue°, saturation%, lightness%)`.
///
/// Hue lies in `[0, 360)`; saturation and lightness in `[0, 100]`.
/// Achromatic colors have hue and saturation 0.
pub fn rgb_to_hsl(color: u32) -> (f64, f64, f64) {
    let (r, g, b) = palette::normalized(color);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return (0.0, 0.0, l * 100.0);
    }

    let s = if l < 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    let mut h = if max == r {
        (g - b) / delta
    } else if max == g {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };
    h *= 60.0;
    if h < 0.0 {
        h += 360.0;
    }

    (h, s * 100.0, l * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{NORD0, NORD10, NORD11, PALETTE};

    #[test]
    fn html_hex_is_uppercase_with_hash() {
        assert_eq!(format_color(NORD0, ColorFormat::HtmlHex), "#2E3440");
    }

    #[test]
    fn raw_hex_is_lowercase_with_prefix() {
        assert_eq!(format_color(NORD10, ColorFormat::RawHex), "0x5e81ac");
    }

    #[test]
    fn css_formats_keep_trailing_semicolon() {
        assert_eq!(
            format_color(NORD10, ColorFormat::CssRgb),
            "rgb(94, 129, 172);"
        );
        assert_eq!(
            format_color(NORD10, ColorFormat::CssRgba),
            "rgba(94, 129, 172, 1);"
        );
    }

    #[test]
    fn hsl_matches_reference_values() {
        assert_eq!(format_color(NORD0, ColorFormat::Hsl), "hsl(220, 16%, 22%);");
        assert_eq!(format_color(NORD11, ColorFormat::Hsl), "hsl(354, 42%, 56%);");
        assert_eq!(format_color(0xFF0000, ColorFormat::Hsl), "hsl(0, 100%, 50%);");
        assert_eq!(format_color(0x00FF00, ColorFormat::Hsl), "hsl(120, 100%, 50%);");
        assert_eq!(format_color(0x0000FF, ColorFormat::Hsl), "hsl(240, 100%, 50%);");
    }

    #[test]
    fn float_and_vector_formats_use_two_decimals() {
        assert_eq!(
            format_color(0xFF8000, ColorFormat::Float),
            "1.00f, 0.50f, 0.00f"
        );
        assert_eq!(
            format_color(0xFF8000, ColorFormat::Vec3),
            "vec3(1.00f, 0.50f, 0.00f)"
        );
        assert_eq!(
            format_color(0xFF8000, ColorFormat::Vec4),
            "vec4(1.00f, 0.50f, 0.00f, 1.00f)"
        );
    }

    #[test]
    fn every_catalog_color_formats_deterministically() {
        for entry in PALETTE {
            for format in ColorFormat::ALL {
                let first = format_color(entry.color, format);
                assert!(!first.is_empty(), "{} / {format}", entry.label);
                assert_eq!(first, format_color(entry.color, format));
            }
        }
    }

    #[test]
    fn hsl_components_stay_in_range() {
        for color in (0..=0xFFFFFFu32).step_by(0x010307) {
            let (h, s, l) = rgb_to_hsl(color);
            assert!((0.0..360.0).contains(&h), "hue {h} for {color:06x}");
            assert!((0.0..=100.0).contains(&s), "saturation {s} for {color:06x}");
            assert!((0.0..=100.0).contains(&l), "lightness {l} for {color:06x}");
        }
    }

    #[test]
    fn achromatic_colors_have_no_saturation() {
        for v in [0u32, 0x11, 0x80, 0xFF] {
            let gray = (v << 16) | (v << 8) | v;
            let (_, s, _) = rgb_to_hsl(gray);
            assert_eq!(s, 0.0);
        }
    }

    #[test]
    fn out_of_range_index_yields_empty_string() {
        assert_eq!(format_color_index(NORD0, 0), "#2E3440");
        assert_eq!(format_color_index(NORD0, ColorFormat::COUNT), "");
        assert_eq!(format_color_index(NORD0, usize::MAX), "");
    }

    #[test]
    fn bounded_formatting_truncates() {
        let row = ColorFormat::HtmlHex.index();
        assert_eq!(format_color_bounded(NORD0, row, 4), "#2E");
        assert_eq!(format_color_bounded(NORD0, row, 64), "#2E3440");
        assert_eq!(format_color_bounded(NORD0, row, 0), "");
        assert_eq!(format_color_bounded(NORD0, ColorFormat::COUNT, 64), "");
    }

    #[test]
    fn format_names_parse_case_insensitively() {
        assert_eq!("CSS-RGB".parse::<ColorFormat>(), Ok(ColorFormat::CssRgb));
        for format in ColorFormat::ALL {
            assert_eq!(format.name().parse::<ColorFormat>(), Ok(format));
            assert_eq!(ColorFormat::from_index(format.index()), Some(format));
        }
        assert!("cmyk".parse::<ColorFormat>().is_err());
    }
}
