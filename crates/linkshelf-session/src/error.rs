//! Error types for the session layer.

use linkshelf_api::ApiError;
use linkshelf_store::StoreError;

/// Errors that can occur while resolving or establishing a session.
///
/// A missing token and a token the backend rejects with 401 are *not*
/// errors; both resolve to an anonymous session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The backend couldn't answer: it was unreachable, returned a
    /// non-401 failure, or sent a body we couldn't decode.
    #[error("identity backend failed: {0}")]
    Backend(#[source] ApiError),

    /// The backend refused the credentials at sign-in.
    #[error("sign-in rejected: {0}")]
    Rejected(String),

    /// The session couldn't be written to the credential store.
    #[error("credential store failed: {0}")]
    Store(#[from] StoreError),
}

impl From<ApiError> for SessionError {
    fn from(err: ApiError) -> Self {
        Self::Backend(err)
    }
}
