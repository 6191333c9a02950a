//! Error types for the gate.

use linkshelf_session::SessionError;

/// Errors that can occur while running a gate.
///
/// Neither variant is ever turned into a redirect: a broken backend or a
/// failing loader is an error page, not a "please sign in".
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The session couldn't be resolved.
    #[error("session resolution failed: {0}")]
    Session(#[from] SessionError),

    /// The wrapped page loader failed.
    #[error("page loader failed: {0}")]
    Loader(#[source] Box<dyn std::error::Error + Send + Sync>),
}
