//! Dock state and event dispatch.
//!
//! [`DockState`] owns everything that changes while the dock runs: the
//! swatches, the current color format, the clipboard buffer, and the swatch
//! currently held down. [`DockState::handle_event`] maps one backend event to
//! the matching operation; [`run`] pumps events until the window is closed.

pub mod layout;

pub use layout::{DockGeometry, Swatch, find_at, hit_test, layout};

use crate::backend::{Backend, BackendError};
use crate::clipboard::{CLIPBOARD_BUFFER_SIZE, ClipboardError, ClipboardOwner};
use crate::config::MenuConfig;
use crate::format::{ColorFormat, format_color_bounded};
use crate::input::{DockEvent, MouseButton, Surface};
use crate::menu;
use crate::palette::PALETTE;
use crate::util::Point;
use log::{debug, info, warn};

/// Whether the event loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Mutable application state of the dock.
#[derive(Debug)]
pub struct DockState {
    /// Swatches top to bottom
    pub swatches: Vec<Swatch>,
    /// Swatch size and dock window size
    pub geometry: DockGeometry,
    /// Format used for every copy; changed only through the menu
    pub current_format: ColorFormat,
    /// Clipboard buffer and selection ownership
    pub clipboard: ClipboardOwner,
    /// Swatch held down by the primary button, if any
    last_pressed: Option<usize>,
    /// Menu row metrics and font
    menu_style: MenuConfig,
}

impl DockState {
    /// Builds the swatches for `geometry` and starts in HTML hex.
    pub fn new(geometry: DockGeometry, menu_style: MenuConfig) -> Self {
        Self {
            swatches: layout(geometry.box_size, geometry.padding, &PALETTE),
            geometry,
            current_format: ColorFormat::default(),
            clipboard: ClipboardOwner::new(),
            last_pressed: None,
            menu_style,
        }
    }

    /// Index of the swatch currently held down.
    pub fn last_pressed(&self) -> Option<usize> {
        self.last_pressed
    }

    fn swatch_at(&self, position: Point) -> Option<usize> {
        find_at(position, &self.swatches, self.geometry.box_size)
    }

    /// Handles one event.
    ///
    /// # Errors
    /// Only display-connection failures are returned; a clipboard claim that
    /// another client wins is logged and otherwise ignored.
    pub fn handle_event<B: Backend + ?Sized>(
        &mut self,
        backend: &mut B,
        event: DockEvent,
    ) -> Result<Flow, BackendError> {
        match event {
            DockEvent::Expose {
                surface: Surface::Dock,
                last,
            } => {
                if last {
                    self.redraw_all(backend)?;
                }
            }
            DockEvent::ButtonPress {
                surface: Surface::Dock,
                button,
                position,
            } => match button {
                MouseButton::Left => self.on_primary_press(backend, position)?,
                MouseButton::Right => return self.on_secondary_press(backend, position),
                MouseButton::Middle | MouseButton::Other(_) => {}
            },
            DockEvent::ButtonRelease {
                surface: Surface::Dock,
                position,
                ..
            } => self.on_release(backend, position)?,
            DockEvent::Motion {
                surface: Surface::Dock,
                position,
            } => self.on_motion(backend, position)?,
            DockEvent::Leave {
                surface: Surface::Dock,
            } => self.release_pressed(backend)?,
            DockEvent::SelectionRequest(request) => {
                debug!(
                    "Selection request from {:#x} for {:?}",
                    request.requestor, request.target
                );
                self.clipboard.serve(&request, backend)?;
            }
            DockEvent::CloseRequested => {
                info!("Close requested by window manager");
                return Ok(Flow::Exit);
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn redraw_all<B: Backend + ?Sized>(&self, backend: &mut B) -> Result<(), BackendError> {
        for swatch in &self.swatches {
            backend.draw_swatch(swatch, self.geometry.box_size)?;
        }
        Ok(())
    }

    fn redraw<B: Backend + ?Sized>(&self, backend: &mut B, index: usize) -> Result<(), BackendError> {
        backend.draw_swatch(&self.swatches[index], self.geometry.box_size)
    }

    fn on_primary_press<B: Backend + ?Sized>(
        &mut self,
        backend: &mut B,
        position: Point,
    ) -> Result<(), BackendError> {
        let Some(index) = self.swatch_at(position) else {
            return Ok(());
        };

        // at most one swatch is pressed at a time
        self.release_pressed(backend)?;

        self.copy_swatch(backend, index)?;
        self.swatches[index].pressed = true;
        self.redraw(backend, index)?;
        self.last_pressed = Some(index);
        Ok(())
    }

    /// Any button released over the held swatch releases it.
    fn on_release<B: Backend + ?Sized>(
        &mut self,
        backend: &mut B,
        position: Point,
    ) -> Result<(), BackendError> {
        let hit = self.swatch_at(position);
        if hit.is_some() && hit == self.last_pressed {
            self.release_pressed(backend)?;
        }
        Ok(())
    }

    fn on_motion<B: Backend + ?Sized>(
        &mut self,
        backend: &mut B,
        position: Point,
    ) -> Result<(), BackendError> {
        if let Some(pressed) = self.last_pressed {
            if self.swatch_at(position) != Some(pressed) {
                debug!("Pointer dragged off swatch {}", pressed);
                self.release_pressed(backend)?;
            }
        }
        Ok(())
    }

    /// Clears the pressed state of the held swatch, if any, and repaints it.
    fn release_pressed<B: Backend + ?Sized>(&mut self, backend: &mut B) -> Result<(), BackendError> {
        if let Some(index) = self.last_pressed.take() {
            self.swatches[index].pressed = false;
            self.redraw(backend, index)?;
        }
        Ok(())
    }

    fn on_secondary_press<B: Backend + ?Sized>(
        &mut self,
        backend: &mut B,
        position: Point,
    ) -> Result<Flow, BackendError> {
        let Some(index) = self.swatch_at(position) else {
            return Ok(Flow::Continue);
        };

        let anchor = backend.to_screen(position)?;
        debug!("Opening format menu for swatch {} at {:?}", index, anchor);
        let outcome = menu::show(
            backend,
            anchor,
            self.current_format,
            self.geometry.size,
            &self.menu_style,
        )?;

        if let Some(format) = outcome.selected.and_then(ColorFormat::from_index) {
            info!("Color format changed to {}", format);
            self.current_format = format;
            self.copy_swatch(backend, index)?;
        }

        for event in outcome.deferred {
            if self.handle_event(backend, event)? == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Copies a swatch's color in the current format to the clipboard.
    fn copy_swatch<B: Backend + ?Sized>(&mut self, backend: &mut B, index: usize) -> Result<(), BackendError> {
        let swatch = &self.swatches[index];
        let text = format_color_bounded(
            swatch.color,
            self.current_format.index(),
            CLIPBOARD_BUFFER_SIZE,
        );
        debug!("Copying {} as {:?}", swatch.label, text);

        match self.clipboard.claim_and_set(&text, backend) {
            Ok(()) => Ok(()),
            Err(ClipboardError::OwnershipNotConfirmed) => {
                warn!("Failed to set clipboard owner; '{}' not copied", text);
                Ok(())
            }
            Err(ClipboardError::Backend(err)) => Err(err),
        }
    }
}

/// Pumps events from `backend` into `state` until the window is closed.
///
/// Teardown of display resources is left to the backend's `Drop`.
pub fn run<B: Backend + ?Sized>(backend: &mut B, state: &mut DockState) -> Result<(), BackendError> {
    info!(
        "Dock ready: {} swatches of {}px, format {}",
        state.swatches.len(),
        state.geometry.box_size,
        state.current_format
    );
    loop {
        let event = backend.next_event()?;
        if state.handle_event(backend, event)? == Flow::Exit {
            return Ok(());
        }
    }
}
