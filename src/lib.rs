//! Arctic Nord palette dock.
//!
//! A narrow always-on-top window at the right screen edge shows the sixteen
//! Nord colors. Clicking a swatch copies its value to the X11 clipboard in
//! the current format; right-clicking opens a menu to pick another format.
//!
//! The library exposes the windowing-independent pieces (palette, formats,
//! layout, menu and dock state machines, rendering) so they can be driven by
//! tests and by the schema tool as well as by the binary.

pub mod backend;
pub mod clipboard;
pub mod config;
pub mod dock;
pub mod draw;
pub mod format;
pub mod input;
pub mod menu;
pub mod palette;
pub mod util;

pub use config::Config;
