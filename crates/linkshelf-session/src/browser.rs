//! The browser side of signing in and out.
//!
//! These write the credential store, so they only have an effect in a
//! [`Environment::Client`](linkshelf_store::Environment::Client); on the
//! server the store drops the writes.

use linkshelf_api::{ApiError, Credentials, User};
use linkshelf_store::CredentialStore;

use crate::{IdentityProvider, SessionError};

/// Where admins land after signing in.
pub const ADMIN_HOME: &str = "/admin";

/// Where everyone else lands after signing in.
pub const USER_HOME: &str = "/user";

/// Where signing out sends you.
pub const LOGIN_PATH: &str = "/login";

/// Outcome of a successful [`sign_in`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    pub user: User,
    /// Where to navigate next.
    pub destination: &'static str,
}

/// The landing page for `user` after signing in.
pub fn post_login_destination(user: &User) -> &'static str {
    if user.is_admin() { ADMIN_HOME } else { USER_HOME }
}

/// Signs in with `credentials` and stores the resulting session.
///
/// # Errors
/// - [`SessionError::Rejected`] if the backend refuses the credentials
///   (any 4xx), carrying the backend's message for display
/// - [`SessionError::Backend`] for transport or server failures
/// - [`SessionError::Store`] if the profile can't be cached
pub async fn sign_in<P: IdentityProvider>(
    provider: &P,
    store: &CredentialStore,
    credentials: &Credentials,
) -> Result<SignedIn, SessionError> {
    let response = match provider.login(credentials).await {
        Ok(response) => response,
        Err(ApiError::Status { status, message }) if (400..500).contains(&status) => {
            tracing::debug!(status, %message, "sign-in rejected");
            return Err(SessionError::Rejected(message));
        }
        Err(e) => return Err(SessionError::Backend(e)),
    };

    store.authenticate(&response.token, &response.user)?;

    let destination = post_login_destination(&response.user);
    tracing::info!(user_id = %response.user.id, destination, "signed in");
    Ok(SignedIn {
        user: response.user,
        destination,
    })
}

/// Forgets the stored session and returns where to navigate next.
pub fn sign_out(store: &CredentialStore) -> &'static str {
    store.clear();
    tracing::info!("signed out");
    LOGIN_PATH
}

/// Replaces the cached profile after the user edited it. Does nothing
/// (and returns `false`) when no profile is cached.
///
/// # Errors
/// Returns [`SessionError::Store`] if the profile can't be serialized.
pub fn refresh_profile(store: &CredentialStore, user: &User) -> Result<bool, SessionError> {
    Ok(store.update_profile(user)?)
}

/// The cached profile, if both halves of a session are stored.
///
/// Advisory only: no network call is made, so the token may already be
/// expired. Access decisions go through the resolver instead.
pub fn cached_user(store: &CredentialStore) -> Option<User> {
    store.session::<User>().map(|(_, user)| user)
}

/// Whether a session is stored locally. See [`cached_user`].
pub fn is_authenticated(store: &CredentialStore) -> bool {
    cached_user(store).is_some()
}
