//! CLIPBOARD selection ownership.
//!
//! X11 has no clipboard storage: the client that last claimed the `CLIPBOARD`
//! selection is asked for the data whenever someone pastes. [`ClipboardOwner`]
//! keeps the text in a fixed-capacity buffer, claims the selection when the
//! text changes, and answers the `SelectionRequest`s that follow. It never
//! asks anyone else for data.

use crate::backend::BackendError;
use crate::input::{SelectionRequest, SelectionTarget};
use crate::util::truncate_to_capacity;
use log::{debug, warn};
use thiserror::Error;

/// Buffer size in bytes, including the terminator slot.
pub const CLIPBOARD_BUFFER_SIZE: usize = 64;

/// Targets advertised in answer to a `TARGETS` request.
pub const SUPPORTED_TARGETS: [SelectionTarget; 4] = [
    SelectionTarget::Targets,
    SelectionTarget::String,
    SelectionTarget::Utf8String,
    SelectionTarget::CompoundText,
];

/// Transport half of the selection protocol.
pub trait SelectionPort {
    /// Claims the `CLIPBOARD` selection and reports whether a follow-up owner
    /// query confirmed it.
    fn claim_clipboard(&mut self) -> Result<bool, BackendError>;

    /// Stores `response` on the requestor and sends the matching notification.
    /// [`SelectionResponse::Unsupported`] is delivered as a refusal.
    fn send_selection_response(
        &mut self,
        request: &SelectionRequest,
        response: &SelectionResponse<'_>,
    ) -> Result<(), BackendError>;
}

/// Answer to a foreign selection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionResponse<'a> {
    /// List of supported targets
    Targets(&'static [SelectionTarget]),
    /// Current clipboard text, in the requested text target
    Text(&'a str),
    /// Target not supported; the requestor receives a refusal
    Unsupported,
}

/// Errors from clipboard operations.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Failed to set clipboard owner")]
    OwnershipNotConfirmed,

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Text buffer that never holds more than `CLIPBOARD_BUFFER_SIZE - 1` bytes.
#[derive(Debug, Default, Clone)]
pub struct ClipboardBuffer {
    text: String,
}

impl ClipboardBuffer {
    /// Replaces the contents, truncating to capacity.
    pub fn set(&mut self, text: &str) {
        self.text.clear();
        self.text
            .push_str(truncate_to_capacity(text, CLIPBOARD_BUFFER_SIZE));
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Owner side of the `CLIPBOARD` selection.
#[derive(Debug, Default)]
pub struct ClipboardOwner {
    buffer: ClipboardBuffer,
}

impl ClipboardOwner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently served to paste requests.
    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    /// Stores `text` and claims the selection.
    ///
    /// The buffer is updated even when ownership cannot be confirmed, so a
    /// later successful claim (or a requestor that still talks to us) sees the
    /// newest text.
    ///
    /// # Errors
    /// - [`ClipboardError::OwnershipNotConfirmed`] if another client still owns
    ///   the selection after the claim. Callers treat this as non-fatal.
    /// - [`ClipboardError::Backend`] if the display connection failed.
    pub fn claim_and_set<P: SelectionPort + ?Sized>(
        &mut self,
        text: &str,
        port: &mut P,
    ) -> Result<(), ClipboardError> {
        self.buffer.set(text);

        if !port.claim_clipboard()? {
            return Err(ClipboardError::OwnershipNotConfirmed);
        }

        debug!("Clipboard now holds {:?}", self.buffer.as_str());
        Ok(())
    }

    /// Decides how to answer a request for `target`.
    pub fn answer_request(&self, target: SelectionTarget) -> SelectionResponse<'_> {
        match target {
            SelectionTarget::Targets => SelectionResponse::Targets(&SUPPORTED_TARGETS),
            SelectionTarget::String
            | SelectionTarget::Utf8String
            | SelectionTarget::CompoundText => SelectionResponse::Text(self.buffer.as_str()),
            SelectionTarget::Other(atom) => {
                debug!("Refusing selection request for unsupported target atom {atom}");
                SelectionResponse::Unsupported
            }
        }
    }

    /// Answers `request` through `port`.
    pub fn serve<P: SelectionPort + ?Sized>(
        &self,
        request: &SelectionRequest,
        port: &mut P,
    ) -> Result<(), BackendError> {
        let response = self.answer_request(request.target);
        if let Err(err) = port.send_selection_response(request, &response) {
            warn!(
                "Failed to answer selection request from window {:#x}: {}",
                request.requestor, err
            );
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockPort {
        grant: bool,
        claims: usize,
        responses: Vec<(SelectionTarget, String)>,
    }

    impl SelectionPort for MockPort {
        fn claim_clipboard(&mut self) -> Result<bool, BackendError> {
            self.claims += 1;
            Ok(self.grant)
        }

        fn send_selection_response(
            &mut self,
            request: &SelectionRequest,
            response: &SelectionResponse<'_>,
        ) -> Result<(), BackendError> {
            self.responses
                .push((request.target, format!("{:?}", response)));
            Ok(())
        }
    }

    fn request(target: SelectionTarget) -> SelectionRequest {
        SelectionRequest {
            requestor: 0x400001,
            selection: 1,
            target,
            target_atom: 99,
            property: 7,
            time: 0,
        }
    }

    #[test]
    fn claim_and_set_stores_text_and_claims() {
        let mut owner = ClipboardOwner::new();
        let mut port = MockPort {
            grant: true,
            ..Default::default()
        };

        owner.claim_and_set("#2E3440", &mut port).unwrap();
        assert_eq!(owner.text(), "#2E3440");
        assert_eq!(port.claims, 1);
    }

    #[test]
    fn failed_claim_keeps_new_text() {
        let mut owner = ClipboardOwner::new();
        let mut port = MockPort::default();

        let err = owner.claim_and_set("0x5e81ac", &mut port).unwrap_err();
        assert!(matches!(err, ClipboardError::OwnershipNotConfirmed));
        assert_eq!(owner.text(), "0x5e81ac");
    }

    #[test]
    fn long_text_is_truncated_to_63_bytes() {
        let mut owner = ClipboardOwner::new();
        let mut port = MockPort {
            grant: true,
            ..Default::default()
        };
        let long = "x".repeat(200);

        owner.claim_and_set(&long, &mut port).unwrap();
        assert_eq!(owner.text().len(), CLIPBOARD_BUFFER_SIZE - 1);
        assert_eq!(owner.text(), &long[..63]);
    }

    #[test]
    fn targets_request_lists_text_types_and_itself() {
        let owner = ClipboardOwner::new();
        match owner.answer_request(SelectionTarget::Targets) {
            SelectionResponse::Targets(targets) => {
                assert_eq!(targets.len(), 4);
                assert!(targets.contains(&SelectionTarget::Targets));
                assert!(targets.contains(&SelectionTarget::String));
                assert!(targets.contains(&SelectionTarget::Utf8String));
                assert!(targets.contains(&SelectionTarget::CompoundText));
            }
            other => panic!("unexpected response {other:?}"),
        }
    }

    #[test]
    fn text_targets_return_buffer_contents() {
        let mut owner = ClipboardOwner::new();
        let mut port = MockPort {
            grant: true,
            ..Default::default()
        };
        owner.claim_and_set("hsl(220, 16%, 22%);", &mut port).unwrap();

        for target in [
            SelectionTarget::String,
            SelectionTarget::Utf8String,
            SelectionTarget::CompoundText,
        ] {
            assert_eq!(
                owner.answer_request(target),
                SelectionResponse::Text("hsl(220, 16%, 22%);")
            );
        }
    }

    #[test]
    fn unknown_target_is_refused() {
        let owner = ClipboardOwner::new();
        assert_eq!(
            owner.answer_request(SelectionTarget::Other(321)),
            SelectionResponse::Unsupported
        );
    }

    #[test]
    fn serve_forwards_response_to_port() {
        let owner = ClipboardOwner::new();
        let mut port = MockPort::default();

        owner
            .serve(&request(SelectionTarget::Other(5)), &mut port)
            .unwrap();
        assert_eq!(port.responses.len(), 1);
        assert_eq!(port.responses[0].1, "Unsupported");
    }
}
