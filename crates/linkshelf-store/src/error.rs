//! Error types for the credential store.

/// Errors that can occur while writing credentials.
///
/// Reads never fail: a missing header, a missing cookie or a corrupt cached
/// profile all read as "nothing stored".
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The profile couldn't be serialized for the local cache.
    #[error("profile encode failed: {0}")]
    Encode(#[source] serde_json::Error),
}
