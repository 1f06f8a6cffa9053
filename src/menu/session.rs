//! Event-by-event state machine of an open format menu.

use super::geometry::MenuGeometry;
use crate::config::MenuConfig;
use crate::format::ColorFormat;
use crate::input::{DockEvent, PopupId, Surface};
use crate::util::Size;
use log::debug;

/// How a menu row is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemHighlight {
    /// Row under the pointer
    Hover,
    /// Row of the format currently in use
    Current,
    /// Any other row
    Plain,
}

/// Highlight for row `index`. Hover wins over the current-format marker.
pub fn item_highlight(index: usize, hover: Option<usize>, current: ColorFormat) -> ItemHighlight {
    if hover == Some(index) {
        ItemHighlight::Hover
    } else if current.index() == index {
        ItemHighlight::Current
    } else {
        ItemHighlight::Plain
    }
}

/// What the caller should do after feeding one event to a [`MenuSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuStep {
    /// Nothing changed
    Idle,
    /// Hover changed or the popup was exposed; repaint it
    Redraw,
    /// Event belongs to the dock; hand it back once the menu is closed
    Defer,
    /// Menu is finished, with the selected row if any
    Close(Option<usize>),
}

/// State of an open menu: which popup it lives in and which row is hovered.
#[derive(Debug)]
pub struct MenuSession {
    popup: PopupId,
    geometry: MenuGeometry,
    hover: Option<usize>,
}

impl MenuSession {
    pub fn new(popup: PopupId, geometry: MenuGeometry) -> Self {
        Self {
            popup,
            geometry,
            hover: None,
        }
    }

    pub fn hover(&self) -> Option<usize> {
        self.hover
    }

    /// Advances the state machine by one event.
    pub fn handle(&mut self, event: &DockEvent) -> MenuStep {
        let own_surface = Surface::Popup(self.popup);

        match event {
            DockEvent::Expose { surface, .. } if *surface == own_surface => MenuStep::Redraw,
            DockEvent::Motion { surface, position } if *surface == own_surface => {
                self.set_hover(self.geometry.row_at(position.y))
            }
            DockEvent::Leave { surface } if *surface == own_surface => self.set_hover(None),
            DockEvent::ButtonPress {
                surface, position, ..
            } if *surface == own_surface => {
                if position.y < 0 || position.y >= self.geometry.height() {
                    debug!("Menu dismissed by press outside rows (y={})", position.y);
                    MenuStep::Close(None)
                } else {
                    let row = self.geometry.row_at(position.y);
                    debug!("Menu row {:?} selected", row);
                    MenuStep::Close(row)
                }
            }
            DockEvent::ButtonPress { .. } => {
                debug!("Menu dismissed by press outside popup");
                MenuStep::Close(None)
            }
            DockEvent::Expose {
                surface: Surface::Dock,
                ..
            }
            | DockEvent::SelectionRequest(_)
            | DockEvent::CloseRequested => MenuStep::Defer,
            _ => MenuStep::Idle,
        }
    }

    fn set_hover(&mut self, hover: Option<usize>) -> MenuStep {
        if hover == self.hover {
            return MenuStep::Idle;
        }
        self.hover = hover;
        MenuStep::Redraw
    }

    /// Snapshot used to paint the popup.
    pub fn view<'a>(&self, current: ColorFormat, style: &'a MenuConfig) -> MenuView<'a> {
        MenuView {
            size: Size::new(
                self.geometry.rect.width as u32,
                self.geometry.rect.height as u32,
            ),
            hover: self.hover,
            current,
            style,
        }
    }
}

/// Everything needed to paint the popup.
#[derive(Debug, Clone, Copy)]
pub struct MenuView<'a> {
    /// Popup size in pixels
    pub size: Size,
    /// Hovered row
    pub hover: Option<usize>,
    /// Format currently in use
    pub current: ColorFormat,
    /// Row metrics and font
    pub style: &'a MenuConfig,
}

impl MenuView<'_> {
    /// Rows top to bottom as `(index, label, highlight)`.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &'static str, ItemHighlight)> + '_ {
        ColorFormat::ALL.into_iter().enumerate().map(move |(index, format)| {
            (
                index,
                format.label(),
                item_highlight(index, self.hover, self.current),
            )
        })
    }
}
