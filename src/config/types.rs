//! Configuration type definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Dock window settings.
///
/// The swatch size is derived from the screen height: the dock fills the
/// screen height minus `height_margin`, split evenly across the palette.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DockConfig {
    /// Fraction of the screen height left free (valid range: 0.0 - 0.9)
    #[serde(default = "default_height_margin")]
    pub height_margin: f64,

    /// Gap around and between swatches in pixels (valid range: 0 - 50)
    #[serde(default = "default_padding")]
    pub padding: u32,

    /// Pango font description for swatch labels (e.g. "Monospace 8")
    #[serde(default = "default_label_font")]
    pub label_font: String,

    /// Draw the palette label on each swatch
    #[serde(default = "default_show_labels")]
    pub show_labels: bool,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            height_margin: default_height_margin(),
            padding: default_padding(),
            label_font: default_label_font(),
            show_labels: default_show_labels(),
        }
    }
}

/// Format menu settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MenuConfig {
    /// Height of one menu row in pixels (valid range: 12 - 64)
    #[serde(default = "default_item_height")]
    pub item_height: u32,

    /// Menu width in pixels (valid range: 40 - 400)
    #[serde(default = "default_menu_width")]
    pub width: u32,

    /// Text inset from the left edge and the row bottom (at most half a row)
    #[serde(default = "default_item_padding")]
    pub item_padding: u32,

    /// Pango font description for menu labels
    #[serde(default = "default_menu_font")]
    pub font: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            item_height: default_item_height(),
            width: default_menu_width(),
            item_padding: default_item_padding(),
            font: default_menu_font(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_height_margin() -> f64 {
    0.20 // dock covers 80% of the screen height
}

fn default_padding() -> u32 {
    5
}

fn default_label_font() -> String {
    "Monospace 8".to_string()
}

fn default_show_labels() -> bool {
    true
}

fn default_item_height() -> u32 {
    20
}

fn default_menu_width() -> u32 {
    80
}

fn default_item_padding() -> u32 {
    5
}

fn default_menu_font() -> String {
    "Monospace 9".to_string()
}
