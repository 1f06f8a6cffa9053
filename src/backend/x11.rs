//! X11 backend built on x11rb.
//!
//! Owns the display connection, the dock window, its graphics context, and
//! any open menu popups. Drawing happens client side with cairo into an
//! image surface that is then pushed to the window with `PutImage`, so the
//! window needs a 24-bit TrueColor visual whose pixels are plain
//! `0x00RRGGBB` words.

use super::{Backend, BackendError};
use crate::clipboard::{SelectionPort, SelectionResponse};
use crate::config::{Config, DockConfig};
use crate::dock::{DockGeometry, Swatch};
use crate::draw::{render_menu, render_swatch};
use crate::input::{DockEvent, MouseButton, PopupId, SelectionRequest, SelectionTarget, Surface};
use crate::menu::MenuView;
use crate::palette::NORD3;
use crate::util::{Point, Rect, Size};
use log::{debug, info, warn};
use x11rb::connection::Connection;
use x11rb::protocol::Event;
use x11rb::protocol::xproto::{
    AtomEnum, ClientMessageEvent, Colormap, ColormapAlloc, ConfigureWindowAux,
    ConnectionExt as _, CreateGCAux, CreateWindowAux, EventMask, Gcontext, ImageFormat, PropMode,
    SELECTION_NOTIFY_EVENT, Screen, SelectionNotifyEvent, StackMode, VisualClass, Visualid,
    Window, WindowClass,
};
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;
use x11rb::{CURRENT_TIME, NONE};

// interned once at startup
x11rb::atom_manager! {
    pub Atoms: AtomsCookie {
        CLIPBOARD,
        UTF8_STRING,
        COMPOUND_TEXT,
        TARGETS,
        WM_PROTOCOLS,
        WM_DELETE_WINDOW,
        _MOTIF_WM_HINTS,
        _NET_WM_NAME,
        _NET_WM_STATE,
        _NET_WM_STATE_ABOVE,
    }
}

/// Depth of the visual every window is created with.
const DEPTH: u8 = 24;
/// Window title shown by window managers and pagers.
const WINDOW_TITLE: &str = "Arctic Nord";
/// `WM_CLASS` instance and class, each NUL terminated.
const WINDOW_CLASS: &[u8] = b"arctic_nord\0ArcticNordDock\0";
/// Motif hints: flags = decorations, decorations = none.
const MOTIF_NO_DECORATIONS: [u32; 5] = [2, 0, 0, 0, 0];
/// `_NET_WM_STATE` client message action.
const NET_WM_STATE_ADD: u32 = 1;
/// `_NET_WM_STATE` source indication: normal application.
const SOURCE_APPLICATION: u32 = 1;
/// Width of the popup border in pixels.
const POPUP_BORDER: u16 = 1;

// WM_SIZE_HINTS flags (ICCCM 4.1.2.3)
const US_POSITION: u32 = 1 << 0;
const P_POSITION: u32 = 1 << 2;
const P_SIZE: u32 = 1 << 3;
const P_MIN_SIZE: u32 = 1 << 4;
const P_MAX_SIZE: u32 = 1 << 5;
/// Number of 32-bit fields in a `WM_SIZE_HINTS` property.
const SIZE_HINTS_LEN: usize = 18;

/// `WM_NORMAL_HINTS` pinning the dock to `origin` at a fixed `size`.
///
/// Window managers honour the user/program position flags instead of
/// placing the window themselves; equal min and max sizes keep it from being
/// resized.
fn normal_hints(origin: Point, size: Size) -> [u32; SIZE_HINTS_LEN] {
    let mut hints = [0u32; SIZE_HINTS_LEN];
    hints[0] = US_POSITION | P_POSITION | P_SIZE | P_MIN_SIZE | P_MAX_SIZE;
    // x and y are signed on the wire
    hints[1] = origin.x as u32;
    hints[2] = origin.y as u32;
    hints[3] = size.width;
    hints[4] = size.height;
    hints[5] = size.width;
    hints[6] = size.height;
    hints[7] = size.width;
    hints[8] = size.height;
    hints
}

/// Atoms of the selection targets that are not predefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TargetAtoms {
    targets: u32,
    utf8_string: u32,
    compound_text: u32,
}

impl TargetAtoms {
    fn from_atoms(atoms: &Atoms) -> Self {
        Self {
            targets: atoms.TARGETS,
            utf8_string: atoms.UTF8_STRING,
            compound_text: atoms.COMPOUND_TEXT,
        }
    }

    fn atom_for(&self, target: SelectionTarget) -> u32 {
        match target {
            SelectionTarget::Targets => self.targets,
            SelectionTarget::String => AtomEnum::STRING.into(),
            SelectionTarget::Utf8String => self.utf8_string,
            SelectionTarget::CompoundText => self.compound_text,
            SelectionTarget::Other(atom) => atom,
        }
    }

    fn target_for(&self, atom: u32) -> SelectionTarget {
        if atom == self.targets {
            SelectionTarget::Targets
        } else if atom == u32::from(AtomEnum::STRING) {
            SelectionTarget::String
        } else if atom == self.utf8_string {
            SelectionTarget::Utf8String
        } else if atom == self.compound_text {
            SelectionTarget::CompoundText
        } else {
            SelectionTarget::Other(atom)
        }
    }
}

/// Property the answer to `request` is stored in, or `NONE` for a refusal.
///
/// Obsolete clients leave the property unset and expect the data on the
/// target atom.
fn reply_property(request: &SelectionRequest, response: &SelectionResponse<'_>) -> u32 {
    match response {
        SelectionResponse::Unsupported => NONE,
        _ if request.property == NONE => request.target_atom,
        _ => request.property,
    }
}

/// X11 implementation of [`Backend`].
pub struct X11Backend {
    conn: RustConnection,
    root: Window,
    screen: Size,
    visual: Visualid,
    colormap: Colormap,
    window: Window,
    gc: Gcontext,
    atoms: Atoms,
    geometry: DockGeometry,
    dock_config: DockConfig,
    popups: Vec<Window>,
}

impl X11Backend {
    /// Opens the display, creates the dock window, and maps it above other
    /// windows at the right screen edge.
    ///
    /// # Errors
    /// [`BackendError::DisplayUnavailable`] when no X server is reachable,
    /// [`BackendError::NoTrueColorVisual`] when the screen offers no 24-bit
    /// TrueColor visual, and connection errors for any failing request.
    pub fn connect(config: &Config) -> Result<Self, BackendError> {
        let (conn, screen_num) = x11rb::connect(None)?;
        let setup_screen = &conn.setup().roots[screen_num];
        let root = setup_screen.root;
        let screen = Size::new(
            setup_screen.width_in_pixels as u32,
            setup_screen.height_in_pixels as u32,
        );
        let visual = find_truecolor_visual(setup_screen).ok_or(BackendError::NoTrueColorVisual)?;
        info!(
            "Connected to X server: screen {} is {}x{}",
            screen_num, screen.width, screen.height
        );

        let atoms = Atoms::new(&conn)?.reply()?;

        let geometry = DockGeometry::from_screen(screen.height, &config.dock);
        let origin = geometry.origin_on_screen(screen);
        info!(
            "Dock geometry: {} swatches of {}px, window {}x{} at ({}, {})",
            crate::palette::PALETTE_LENGTH,
            geometry.box_size,
            geometry.size.width,
            geometry.size.height,
            origin.x,
            origin.y
        );

        let colormap = conn.generate_id()?;
        conn.create_colormap(ColormapAlloc::NONE, colormap, root, visual)?
            .check()?;

        let window = conn.generate_id()?;
        let aux = CreateWindowAux::new()
            .background_pixel(0)
            .border_pixel(0)
            .colormap(colormap)
            .event_mask(
                EventMask::EXPOSURE
                    | EventMask::BUTTON_PRESS
                    | EventMask::BUTTON_RELEASE
                    | EventMask::POINTER_MOTION
                    | EventMask::PROPERTY_CHANGE
                    | EventMask::LEAVE_WINDOW,
            );
        conn.create_window(
            DEPTH,
            window,
            root,
            origin.x as i16,
            origin.y as i16,
            geometry.size.width as u16,
            geometry.size.height as u16,
            0,
            WindowClass::INPUT_OUTPUT,
            visual,
            &aux,
        )?
        .check()?;

        let gc = conn.generate_id()?;
        conn.create_gc(gc, window, &CreateGCAux::new().graphics_exposures(0))?;

        let backend = Self {
            conn,
            root,
            screen,
            visual,
            colormap,
            window,
            gc,
            atoms,
            geometry,
            dock_config: config.dock.clone(),
            popups: Vec::new(),
        };
        backend.set_window_hints()?;
        backend.conn.map_window(window)?;
        backend.move_to_origin()?;
        backend.keep_above()?;
        backend.conn.flush()?;
        debug!("Dock window {:#x} mapped", window);

        Ok(backend)
    }

    /// Dock dimensions computed for this screen.
    pub fn geometry(&self) -> DockGeometry {
        self.geometry
    }

    fn set_window_hints(&self) -> Result<(), BackendError> {
        let atoms = &self.atoms;
        self.conn.change_property32(
            PropMode::REPLACE,
            self.window,
            atoms._MOTIF_WM_HINTS,
            atoms._MOTIF_WM_HINTS,
            &MOTIF_NO_DECORATIONS,
        )?;
        self.conn.change_property32(
            PropMode::REPLACE,
            self.window,
            atoms.WM_PROTOCOLS,
            AtomEnum::ATOM,
            &[atoms.WM_DELETE_WINDOW],
        )?;
        self.conn.change_property8(
            PropMode::REPLACE,
            self.window,
            atoms._NET_WM_NAME,
            atoms.UTF8_STRING,
            WINDOW_TITLE.as_bytes(),
        )?;
        self.conn.change_property8(
            PropMode::REPLACE,
            self.window,
            AtomEnum::WM_CLASS,
            AtomEnum::STRING,
            WINDOW_CLASS,
        )?;
        self.conn.change_property32(
            PropMode::REPLACE,
            self.window,
            atoms._NET_WM_STATE,
            AtomEnum::ATOM,
            &[atoms._NET_WM_STATE_ABOVE],
        )?;
        let origin = self.geometry.origin_on_screen(self.screen);
        self.conn.change_property32(
            PropMode::REPLACE,
            self.window,
            AtomEnum::WM_NORMAL_HINTS,
            AtomEnum::WM_SIZE_HINTS,
            &normal_hints(origin, self.geometry.size),
        )?;
        Ok(())
    }

    /// Moves the mapped dock back to the right screen edge; window managers
    /// often ignore the position given at creation.
    fn move_to_origin(&self) -> Result<(), BackendError> {
        let origin = self.geometry.origin_on_screen(self.screen);
        self.conn.configure_window(
            self.window,
            &ConfigureWindowAux::new().x(origin.x).y(origin.y),
        )?;
        Ok(())
    }

    /// Asks the window manager to keep the mapped dock above other windows.
    fn keep_above(&self) -> Result<(), BackendError> {
        let event = ClientMessageEvent::new(
            32,
            self.window,
            self.atoms._NET_WM_STATE,
            [
                NET_WM_STATE_ADD,
                self.atoms._NET_WM_STATE_ABOVE,
                0,
                SOURCE_APPLICATION,
                0,
            ],
        );
        self.conn.send_event(
            false,
            self.root,
            EventMask::SUBSTRUCTURE_REDIRECT | EventMask::SUBSTRUCTURE_NOTIFY,
            event,
        )?;
        Ok(())
    }

    fn surface_of(&self, window: Window) -> Surface {
        if window == self.window {
            Surface::Dock
        } else if self.popups.contains(&window) {
            Surface::Popup(PopupId(window))
        } else {
            Surface::Other
        }
    }

    fn translate(&self, event: Event) -> DockEvent {
        match event {
            Event::Expose(e) => DockEvent::Expose {
                surface: self.surface_of(e.window),
                last: e.count == 0,
            },
            Event::ButtonPress(e) => DockEvent::ButtonPress {
                surface: self.surface_of(e.event),
                button: button_from_detail(e.detail),
                position: Point::new(e.event_x as i32, e.event_y as i32),
            },
            Event::ButtonRelease(e) => DockEvent::ButtonRelease {
                surface: self.surface_of(e.event),
                button: button_from_detail(e.detail),
                position: Point::new(e.event_x as i32, e.event_y as i32),
            },
            Event::MotionNotify(e) => DockEvent::Motion {
                surface: self.surface_of(e.event),
                position: Point::new(e.event_x as i32, e.event_y as i32),
            },
            Event::LeaveNotify(e) => DockEvent::Leave {
                surface: self.surface_of(e.event),
            },
            Event::SelectionRequest(e) => DockEvent::SelectionRequest(SelectionRequest {
                requestor: e.requestor,
                selection: e.selection,
                target: TargetAtoms::from_atoms(&self.atoms).target_for(e.target),
                target_atom: e.target,
                property: e.property,
                time: e.time,
            }),
            Event::SelectionClear(e) => {
                debug!("Lost selection {} to another client", e.selection);
                DockEvent::Other
            }
            Event::ClientMessage(e)
                if e.format == 32
                    && e.type_ == self.atoms.WM_PROTOCOLS
                    && e.data.as_data32()[0] == self.atoms.WM_DELETE_WINDOW =>
            {
                DockEvent::CloseRequested
            }
            Event::Error(err) => {
                warn!("X11 error: {:?}", err);
                DockEvent::Other
            }
            _ => DockEvent::Other,
        }
    }

    /// Renders into a fresh image surface and uploads it to `window` at
    /// `origin`.
    fn paint<F>(&self, window: Window, origin: Point, size: Size, draw: F) -> Result<(), BackendError>
    where
        F: FnOnce(&cairo::Context) -> Result<(), cairo::Error>,
    {
        let width = size.width.max(1) as i32;
        let height = size.height.max(1) as i32;
        let mut surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        {
            let ctx = cairo::Context::new(&surface)?;
            ctx.translate(-(origin.x as f64), -(origin.y as f64));
            draw(&ctx)?;
        }
        surface.flush();

        let stride = surface.stride() as usize;
        let row_bytes = width as usize * 4;
        let data = surface.data()?;
        let pixels: Vec<u8> = if stride == row_bytes {
            data.to_vec()
        } else {
            data.chunks(stride)
                .flat_map(|row| row[..row_bytes].iter().copied())
                .collect()
        };

        self.conn.put_image(
            ImageFormat::Z_PIXMAP,
            window,
            self.gc,
            width as u16,
            height as u16,
            origin.x as i16,
            origin.y as i16,
            0,
            DEPTH,
            &pixels,
        )?;
        self.conn.flush()?;
        Ok(())
    }
}

/// First 24-bit TrueColor visual offered by `screen`.
fn find_truecolor_visual(screen: &Screen) -> Option<Visualid> {
    screen
        .allowed_depths
        .iter()
        .filter(|depth| depth.depth == DEPTH)
        .flat_map(|depth| depth.visuals.iter())
        .find(|visual| visual.class == VisualClass::TRUE_COLOR)
        .map(|visual| visual.visual_id)
}

fn button_from_detail(detail: u8) -> MouseButton {
    match detail {
        1 => MouseButton::Left,
        2 => MouseButton::Middle,
        3 => MouseButton::Right,
        other => MouseButton::Other(other),
    }
}

impl SelectionPort for X11Backend {
    fn claim_clipboard(&mut self) -> Result<bool, BackendError> {
        let clipboard = self.atoms.CLIPBOARD;
        self.conn
            .set_selection_owner(self.window, clipboard, CURRENT_TIME)?;
        let owner = self.conn.get_selection_owner(clipboard)?.reply()?.owner;
        Ok(owner == self.window)
    }

    fn send_selection_response(
        &mut self,
        request: &SelectionRequest,
        response: &SelectionResponse<'_>,
    ) -> Result<(), BackendError> {
        let property = reply_property(request, response);

        match response {
            SelectionResponse::Targets(targets) => {
                let target_atoms = TargetAtoms::from_atoms(&self.atoms);
                let atoms: Vec<u32> = targets.iter().map(|t| target_atoms.atom_for(*t)).collect();
                self.conn.change_property32(
                    PropMode::REPLACE,
                    request.requestor,
                    property,
                    AtomEnum::ATOM,
                    &atoms,
                )?;
            }
            SelectionResponse::Text(text) => {
                self.conn.change_property8(
                    PropMode::REPLACE,
                    request.requestor,
                    property,
                    request.target_atom,
                    text.as_bytes(),
                )?;
            }
            SelectionResponse::Unsupported => {}
        }

        let notify = SelectionNotifyEvent {
            response_type: SELECTION_NOTIFY_EVENT,
            sequence: 0,
            time: request.time,
            requestor: request.requestor,
            selection: request.selection,
            target: request.target_atom,
            property,
        };
        self.conn
            .send_event(false, request.requestor, EventMask::NO_EVENT, notify)?;
        self.conn.flush()?;
        Ok(())
    }
}

impl Backend for X11Backend {
    fn next_event(&mut self) -> Result<DockEvent, BackendError> {
        let event = self.conn.wait_for_event()?;
        Ok(self.translate(event))
    }

    fn screen_size(&self) -> Size {
        self.screen
    }

    fn to_screen(&mut self, local: Point) -> Result<Point, BackendError> {
        let reply = self
            .conn
            .translate_coordinates(self.window, self.root, local.x as i16, local.y as i16)?
            .reply()?;
        Ok(Point::new(reply.dst_x as i32, reply.dst_y as i32))
    }

    fn draw_swatch(&mut self, swatch: &Swatch, box_size: u32) -> Result<(), BackendError> {
        let config = &self.dock_config;
        self.paint(
            self.window,
            swatch.position,
            Size::new(box_size, box_size),
            |ctx| render_swatch(ctx, swatch, box_size, config),
        )
    }

    fn open_popup(&mut self, rect: Rect) -> Result<PopupId, BackendError> {
        let window = self.conn.generate_id()?;
        let aux = CreateWindowAux::new()
            .background_pixel(0)
            .border_pixel(NORD3)
            .colormap(self.colormap)
            .override_redirect(1)
            .event_mask(
                EventMask::EXPOSURE
                    | EventMask::BUTTON_PRESS
                    | EventMask::POINTER_MOTION
                    | EventMask::LEAVE_WINDOW,
            );
        self.conn
            .create_window(
                DEPTH,
                window,
                self.root,
                rect.x as i16,
                rect.y as i16,
                rect.width.max(1) as u16,
                rect.height.max(1) as u16,
                POPUP_BORDER,
                WindowClass::INPUT_OUTPUT,
                self.visual,
                &aux,
            )?
            .check()?;
        self.popups.push(window);

        self.conn.map_window(window)?;
        self.conn.configure_window(
            window,
            &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE),
        )?;
        self.conn.flush()?;
        Ok(PopupId(window))
    }

    fn draw_popup(&mut self, popup: PopupId, view: &MenuView<'_>) -> Result<(), BackendError> {
        self.paint(popup.0, Point::new(0, 0), view.size, |ctx| {
            render_menu(ctx, view)
        })
    }

    fn close_popup(&mut self, popup: PopupId) {
        let window = popup.0;
        self.popups.retain(|w| *w != window);
        let result = self
            .conn
            .destroy_window(window)
            .map(|_| ())
            .and_then(|()| self.conn.flush());
        if let Err(err) = result {
            warn!("Failed to destroy menu popup {:#x}: {}", window, err);
        }
    }
}

impl Drop for X11Backend {
    fn drop(&mut self) {
        for window in std::mem::take(&mut self.popups) {
            if let Err(err) = self.conn.destroy_window(window) {
                warn!("Failed to destroy menu popup {:#x}: {}", window, err);
            }
        }
        if let Err(err) = self.conn.free_gc(self.gc) {
            warn!("Failed to free graphics context: {}", err);
        }
        if let Err(err) = self.conn.destroy_window(self.window) {
            warn!("Failed to destroy dock window: {}", err);
        }
        if let Err(err) = self.conn.free_colormap(self.colormap) {
            warn!("Failed to free colormap: {}", err);
        }
        if let Err(err) = self.conn.flush() {
            warn!("Failed to flush X11 teardown requests: {}", err);
        }
        debug!("X11 resources released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATOMS: TargetAtoms = TargetAtoms {
        targets: 300,
        utf8_string: 301,
        compound_text: 302,
    };

    fn request(property: u32) -> SelectionRequest {
        SelectionRequest {
            requestor: 0x400001,
            selection: 299,
            target: SelectionTarget::Utf8String,
            target_atom: ATOMS.utf8_string,
            property,
            time: 0,
        }
    }

    #[test]
    fn answer_goes_to_requested_property() {
        let response = SelectionResponse::Text("#2E3440");
        assert_eq!(reply_property(&request(77), &response), 77);
    }

    #[test]
    fn obsolete_requestor_is_answered_on_target_atom() {
        let response = SelectionResponse::Text("#2E3440");
        assert_eq!(reply_property(&request(NONE), &response), ATOMS.utf8_string);
        let targets = SelectionResponse::Targets(&[]);
        assert_eq!(reply_property(&request(NONE), &targets), ATOMS.utf8_string);
    }

    #[test]
    fn refusal_has_no_property() {
        let response = SelectionResponse::Unsupported;
        assert_eq!(reply_property(&request(77), &response), NONE);
        assert_eq!(reply_property(&request(NONE), &response), NONE);
    }

    #[test]
    fn target_atoms_map_both_ways() {
        for target in crate::clipboard::SUPPORTED_TARGETS {
            assert_eq!(ATOMS.target_for(ATOMS.atom_for(target)), target);
        }
        assert_eq!(ATOMS.atom_for(SelectionTarget::String), 31);
        assert_eq!(ATOMS.target_for(999), SelectionTarget::Other(999));
        assert_eq!(ATOMS.atom_for(SelectionTarget::Other(999)), 999);
    }

    #[test]
    fn wheel_and_extra_buttons_stay_button_events() {
        assert_eq!(button_from_detail(1), MouseButton::Left);
        assert_eq!(button_from_detail(2), MouseButton::Middle);
        assert_eq!(button_from_detail(3), MouseButton::Right);
        assert_eq!(button_from_detail(4), MouseButton::Other(4));
        assert_eq!(button_from_detail(5), MouseButton::Other(5));
    }

    #[test]
    fn normal_hints_pin_position_and_size() {
        let hints = normal_hints(Point::new(1856, 65), Size::new(64, 949));
        assert_eq!(hints.len(), 18);
        assert_eq!(hints[0], US_POSITION | P_POSITION | P_SIZE | P_MIN_SIZE | P_MAX_SIZE);
        assert_eq!(hints[0] & 0b1, 1);
        assert_eq!(&hints[1..9], &[1856, 65, 64, 949, 64, 949, 64, 949]);
        assert!(hints[9..].iter().all(|field| *field == 0));
    }

    #[test]
    fn normal_hints_keep_negative_offsets() {
        let hints = normal_hints(Point::new(-10, -3), Size::new(64, 949));
        assert_eq!(hints[1] as i32, -10);
        assert_eq!(hints[2] as i32, -3);
    }
}
