//! Unified error type for Linkshelf.

use linkshelf_api::ApiError;
use linkshelf_gate::GateError;
use linkshelf_session::SessionError;
use linkshelf_store::StoreError;

use crate::pages::PageError;

/// Top-level error that wraps every layer's errors.
///
/// `#[from]` on each variant lets `?` lift a layer error into this one.
#[derive(Debug, thiserror::Error)]
pub enum LinkshelfError {
    /// Writing the credential store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session couldn't be resolved or established.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A gated page failed (session or loader).
    #[error(transparent)]
    Gate(#[from] GateError),

    /// An ungated page loader failed.
    #[error(transparent)]
    Page(#[from] PageError),
}

impl LinkshelfError {
    /// The backend's HTTP status, wherever in the stack it surfaced.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) | Self::Session(SessionError::Backend(e)) | Self::Page(PageError::Api(e)) => e.status(),
            Self::Gate(GateError::Session(SessionError::Backend(e))) => e.status(),
            _ => None,
        }
    }
}
