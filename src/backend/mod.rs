//! Windowing-system seam.
//!
//! The dock logic only talks to a [`Backend`]: a blocking event source plus
//! the handful of drawing, popup, and selection calls the dispatcher and the
//! context menu need. [`x11::X11Backend`] is the production implementation.

mod error;
pub mod x11;

pub use error::BackendError;

use crate::clipboard::SelectionPort;
use crate::dock::Swatch;
use crate::input::{DockEvent, PopupId};
use crate::menu::MenuView;
use crate::util::{Point, Rect, Size};

/// Everything the dock needs from the windowing system.
///
/// All calls happen on the single UI thread; `next_event` blocks until the
/// next event arrives and is the only suspension point.
pub trait Backend: SelectionPort {
    /// Waits for the next event.
    fn next_event(&mut self) -> Result<DockEvent, BackendError>;

    /// Dimensions of the screen the dock lives on.
    fn screen_size(&self) -> Size;

    /// Translates a dock-local point to screen coordinates.
    fn to_screen(&mut self, local: Point) -> Result<Point, BackendError>;

    /// Repaints one swatch (including its label and pressed state).
    fn draw_swatch(&mut self, swatch: &Swatch, box_size: u32) -> Result<(), BackendError>;

    /// Creates and maps a popup surface at the given screen rectangle.
    fn open_popup(&mut self, rect: Rect) -> Result<PopupId, BackendError>;

    /// Repaints a popup with the given menu state.
    fn draw_popup(&mut self, popup: PopupId, view: &MenuView<'_>) -> Result<(), BackendError>;

    /// Unmaps and destroys a popup. Must not fail; errors are logged.
    fn close_popup(&mut self, popup: PopupId);
}

/// Connect to the X server and run the dock until the window is closed.
///
/// # Arguments
/// * `config` - Loaded user configuration
pub fn run_x11(config: crate::Config) -> anyhow::Result<()> {
    use anyhow::Context;

    let mut backend = x11::X11Backend::connect(&config).context("Failed to start dock")?;
    let mut state = crate::dock::DockState::new(backend.geometry(), config.menu.clone());
    crate::dock::run(&mut backend, &mut state).context("Dock event loop failed")?;
    log::info!("Dock closed");
    Ok(())
}
