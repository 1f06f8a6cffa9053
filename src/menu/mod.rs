//! Right-click format menu.
//!
//! [`show`] opens a popup next to the clicked swatch and runs a nested event
//! loop on the same backend until the user picks a row or clicks elsewhere.
//! While it runs, the dock's own dispatcher is suspended; dock exposures,
//! selection requests, and close requests that arrive meanwhile are returned
//! in [`MenuOutcome::deferred`] so the dispatcher can replay them.

mod geometry;
mod session;

pub use geometry::{MenuGeometry, safe_line};
pub use session::{ItemHighlight, MenuSession, MenuStep, MenuView, item_highlight};

use crate::backend::{Backend, BackendError};
use crate::config::MenuConfig;
use crate::format::ColorFormat;
use crate::input::{DockEvent, PopupId};
use crate::util::{Point, Rect, Size};
use log::debug;

/// Result of a closed menu.
#[derive(Debug, Default)]
pub struct MenuOutcome {
    /// Selected row, or `None` if the menu was dismissed
    pub selected: Option<usize>,
    /// Dock events received while the menu was open, in arrival order
    pub deferred: Vec<DockEvent>,
}

/// Popup surface that is closed when dropped, whichever way the menu ends.
struct Popup<'a, B: Backend + ?Sized> {
    backend: &'a mut B,
    id: PopupId,
}

impl<'a, B: Backend + ?Sized> Popup<'a, B> {
    fn open(backend: &'a mut B, rect: Rect) -> Result<Self, BackendError> {
        let id = backend.open_popup(rect)?;
        debug!("Opened menu popup {:?} at {:?}", id, rect);
        Ok(Self { backend, id })
    }

    fn next_event(&mut self) -> Result<DockEvent, BackendError> {
        self.backend.next_event()
    }

    fn draw(&mut self, view: &MenuView<'_>) -> Result<(), BackendError> {
        self.backend.draw_popup(self.id, view)
    }
}

impl<B: Backend + ?Sized> Drop for Popup<'_, B> {
    fn drop(&mut self) {
        self.backend.close_popup(self.id);
        debug!("Closed menu popup {:?}", self.id);
    }
}

/// Shows the format menu anchored at a screen point and blocks until it
/// closes.
///
/// # Arguments
/// * `backend` - Event source and drawing target
/// * `anchor` - Screen position of the right-click
/// * `current` - Format currently in use (highlighted)
/// * `dock` - Dock window size, used to keep the menu on screen
/// * `style` - Row metrics and font
pub fn show<B: Backend + ?Sized>(
    backend: &mut B,
    anchor: Point,
    current: ColorFormat,
    dock: Size,
    style: &MenuConfig,
) -> Result<MenuOutcome, BackendError> {
    let geometry = MenuGeometry::place(anchor, backend.screen_size(), dock, style);
    let mut popup = Popup::open(backend, geometry.rect)?;
    let mut session = MenuSession::new(popup.id, geometry);
    let mut deferred = Vec::new();

    popup.draw(&session.view(current, style))?;

    loop {
        let event = popup.next_event()?;
        match session.handle(&event) {
            MenuStep::Idle => {}
            MenuStep::Redraw => popup.draw(&session.view(current, style))?,
            MenuStep::Defer => deferred.push(event),
            MenuStep::Close(selected) => {
                return Ok(MenuOutcome { selected, deferred });
            }
        }
    }
}
