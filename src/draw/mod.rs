//! Cairo/Pango rendering of the dock and its menu.
//!
//! Everything here draws into a plain [`cairo::Context`], so the same code
//! paints the X11 windows and the headless surfaces used in tests.

pub mod color;
pub mod render;
pub mod text;

pub use color::Color;
pub use render::{render_menu, render_swatch};
pub use text::{show_at_baseline, text_layout, text_size};
