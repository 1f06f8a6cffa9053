//! Backend-neutral input events consumed by the dock and the context menu.

use crate::util::Point;

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (copy)
    Left,
    /// Right mouse button (format menu)
    Right,
    /// Middle mouse button (currently unused)
    Middle,
    /// Any other button by X11 number, e.g. 4 and 5 for the scroll wheel
    Other(u8),
}

/// Identifier of a popup surface handed out by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PopupId(pub u32);

/// Which surface an event was delivered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// The dock window itself
    Dock,
    /// A popup created through `Backend::open_popup`
    Popup(PopupId),
    /// Any other window (e.g. the root window)
    Other,
}

/// Data types a foreign client may ask the selection owner for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTarget {
    /// Meta target: list of supported targets
    Targets,
    /// Latin-1 `STRING`
    String,
    /// `UTF8_STRING`
    Utf8String,
    /// `COMPOUND_TEXT`
    CompoundText,
    /// Anything else, carried as the raw atom value
    Other(u32),
}

/// A foreign client asking for the selection contents.
///
/// Atom fields are opaque transport values; only the backend interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRequest {
    /// Window of the client that wants the data
    pub requestor: u32,
    /// Selection atom (normally `CLIPBOARD`)
    pub selection: u32,
    /// Requested data type
    pub target: SelectionTarget,
    /// Raw atom of the requested target, echoed back in the notification
    pub target_atom: u32,
    /// Property on the requestor to store the answer in (0 = none)
    pub property: u32,
    /// Timestamp of the triggering request
    pub time: u32,
}

/// An event delivered by [`crate::backend::Backend::next_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockEvent {
    /// Part of a surface needs repainting; `last` marks the end of a series
    Expose { surface: Surface, last: bool },
    /// Pointer button pressed at a surface-local position
    ButtonPress {
        surface: Surface,
        button: MouseButton,
        position: Point,
    },
    /// Pointer button released at a surface-local position
    ButtonRelease {
        surface: Surface,
        button: MouseButton,
        position: Point,
    },
    /// Pointer moved to a surface-local position
    Motion { surface: Surface, position: Point },
    /// Pointer left a surface
    Leave { surface: Surface },
    /// A foreign client wants the selection contents
    SelectionRequest(SelectionRequest),
    /// The window manager asked the dock to close
    CloseRequested,
    /// Anything the dock does not care about
    Other,
}
