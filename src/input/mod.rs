//! Backend-neutral input events.
//!
//! Backends translate their native events into [`DockEvent`]s; the dock
//! dispatcher and the format menu only ever see these types.

pub mod events;

pub use events::{DockEvent, MouseButton, PopupId, SelectionRequest, SelectionTarget, Surface};
