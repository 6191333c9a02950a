//! The credential store: token cookie plus cached profile.
//!
//! Two pieces of state make up a stored session:
//!
//! - the **token**, an opaque bearer string kept in the `token` cookie so it
//!   travels with every request (and can be read during server rendering);
//! - the **profile**, a JSON snapshot of the user kept in local storage under
//!   `user` so client code can show a name without a network call.
//!
//! They are written and cleared together. A token without a profile (or the
//! reverse) doesn't count as a session; see [`CredentialStore::session`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{find_cookie, Cookie, Environment, StoreError};

/// Cookie name of the session token.
pub const TOKEN_KEY: &str = "token";

/// Local storage key of the cached profile.
pub const PROFILE_KEY: &str = "user";

/// Reads and writes credentials for one [`Environment`].
///
/// On the server every write is silently dropped: there is no response-side
/// cookie path, and a render must never fail because it tried to persist
/// something.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    env: Environment,
}

impl CredentialStore {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    // -- Cookies ----------------------------------------------------------

    /// Stores a cookie for one day. No-op on the server.
    pub fn set(&self, key: &str, value: &str) {
        match &self.env {
            Environment::Client(client) => client.cookies().set(Cookie::new(key, value)),
            Environment::Server(_) => {
                tracing::trace!(key, "dropping cookie write during server render");
            }
        }
    }

    /// Deletes a cookie. No-op on the server.
    pub fn remove(&self, key: &str) {
        match &self.env {
            Environment::Client(client) => client.cookies().remove(key),
            Environment::Server(_) => {
                tracing::trace!(key, "dropping cookie removal during server render");
            }
        }
    }

    /// Reads a cookie: from the jar in the browser, from the request's
    /// `Cookie` header on the server. Never fails; anything missing or
    /// malformed is `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        match &self.env {
            Environment::Client(client) => {
                client.cookies().get(key).filter(|value| !value.is_empty())
            }
            Environment::Server(server) => server
                .cookie_header()
                .and_then(|header| find_cookie(header, key))
                .map(str::to_string),
        }
    }

    /// The session token, if one is stored.
    pub fn token(&self) -> Option<String> {
        self.get(TOKEN_KEY)
    }

    // -- Profile cache ----------------------------------------------------

    /// Caches `profile` as JSON. No-op on the server.
    ///
    /// # Errors
    /// Returns [`StoreError::Encode`] if the profile can't be serialized.
    pub fn set_profile<P: Serialize>(&self, profile: &P) -> Result<(), StoreError> {
        let json = serde_json::to_string(profile).map_err(StoreError::Encode)?;
        match &self.env {
            Environment::Client(client) => client.local().set_item(PROFILE_KEY, json),
            Environment::Server(_) => {
                tracing::trace!("dropping profile write during server render");
            }
        }
        Ok(())
    }

    /// Reads the cached profile. A missing or undecodable entry is `None`;
    /// the server never has one.
    pub fn get_profile<P: DeserializeOwned>(&self) -> Option<P> {
        let Environment::Client(client) = &self.env else {
            return None;
        };
        let json = client.local().get_item(PROFILE_KEY)?;
        match serde_json::from_str(&json) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring undecodable cached profile");
                None
            }
        }
    }

    /// Drops the cached profile. No-op on the server.
    pub fn remove_profile(&self) {
        if let Environment::Client(client) = &self.env {
            client.local().remove_item(PROFILE_KEY);
        }
    }

    // -- Whole-session operations -----------------------------------------

    /// Stores a fresh session: token cookie and cached profile together.
    ///
    /// The profile is serialized before anything is written, so an encode
    /// failure leaves the store untouched.
    ///
    /// # Errors
    /// Returns [`StoreError::Encode`] if the profile can't be serialized.
    pub fn authenticate<P: Serialize>(&self, token: &str, profile: &P) -> Result<(), StoreError> {
        let json = serde_json::to_string(profile).map_err(StoreError::Encode)?;
        self.set(TOKEN_KEY, token);
        if let Environment::Client(client) = &self.env {
            client.local().set_item(PROFILE_KEY, json);
        }
        Ok(())
    }

    /// Forgets the session: token and profile together.
    pub fn clear(&self) {
        self.remove(TOKEN_KEY);
        self.remove_profile();
    }

    /// Replaces the cached profile after the user edited it, but only if a
    /// profile is already cached. Returns whether it was replaced.
    ///
    /// # Errors
    /// Returns [`StoreError::Encode`] if the profile can't be serialized.
    pub fn update_profile<P: Serialize>(&self, profile: &P) -> Result<bool, StoreError> {
        let Environment::Client(client) = &self.env else {
            return Ok(false);
        };
        if client.local().get_item(PROFILE_KEY).is_none() {
            return Ok(false);
        }
        self.set_profile(profile)?;
        Ok(true)
    }

    /// The stored session, only if *both* the token and a decodable profile
    /// are present.
    pub fn session<P: DeserializeOwned>(&self) -> Option<(String, P)> {
        let token = self.token()?;
        let profile = self.get_profile()?;
        Some((token, profile))
    }
}
