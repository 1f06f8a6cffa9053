//! Errors raised by the windowing backend.

use thiserror::Error;

/// Errors that can occur while talking to the display server.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Unable to open display: {0}")]
    DisplayUnavailable(#[from] x11rb::errors::ConnectError),

    #[error("Failed to obtain a 24-bit TrueColor visual")]
    NoTrueColorVisual,

    #[error("X11 connection error: {0}")]
    Connection(#[from] x11rb::errors::ConnectionError),

    #[error("X11 request failed: {0}")]
    Reply(#[from] x11rb::errors::ReplyError),

    #[error("X11 resource allocation failed: {0}")]
    Allocation(#[from] x11rb::errors::ReplyOrIdError),

    #[error("Rendering failed: {0}")]
    Render(#[from] cairo::Error),

    #[error("Rendered image unavailable: {0}")]
    ImageData(#[from] cairo::BorrowError),
}
