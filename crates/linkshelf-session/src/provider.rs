//! The identity seam: who can tell us who a token belongs to.
//!
//! In production that's the backend's `GET /user` and `POST /login`; in
//! tests it's whatever canned answers the test needs. The resolver and the
//! sign-in helpers only ever see this trait.

use std::future::Future;
use std::sync::Arc;

use linkshelf_api::{ApiError, Credentials, HttpBackend, Identity, LoginResponse};

/// Vouches for tokens and exchanges credentials for them.
///
/// `Send + Sync + 'static` so one provider can be shared by every request
/// a server handles.
pub trait IdentityProvider: Send + Sync + 'static {
    /// Looks up the user (and the links they own) behind `token`.
    ///
    /// A token the backend doesn't accept must come back as an
    /// [`ApiError::Status`] with status 401.
    fn whoami(&self, token: &str) -> impl Future<Output = Result<Identity, ApiError>> + Send;

    /// Exchanges credentials for a token and profile.
    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send;
}

impl IdentityProvider for HttpBackend {
    fn whoami(&self, token: &str) -> impl Future<Output = Result<Identity, ApiError>> + Send {
        HttpBackend::whoami(self, token)
    }

    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send {
        HttpBackend::login(self, credentials)
    }
}

impl<P: IdentityProvider> IdentityProvider for Arc<P> {
    fn whoami(&self, token: &str) -> impl Future<Output = Result<Identity, ApiError>> + Send {
        P::whoami(self, token)
    }

    fn login(&self, credentials: &Credentials) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send {
        P::login(self, credentials)
    }
}
