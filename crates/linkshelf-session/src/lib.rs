//! Session resolution for Linkshelf.
//!
//! Turns "whatever credentials this environment carries" into a verified
//! [`SessionContext`]:
//!
//! 1. **Identity**: asking the backend who a token belongs to
//!    ([`IdentityProvider`] trait, implemented by `HttpBackend`)
//! 2. **Resolution**: reading the token and deciding between signed in,
//!    anonymous, and "the backend is broken" ([`SessionResolver`])
//! 3. **Sign-in helpers**: the browser-side login/logout flow that writes
//!    the credential store ([`sign_in`], [`sign_out`], [`refresh_profile`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Access Gate (above)         ← needs a user to check a policy against
//!     ↕
//! Session layer (this crate)  ← token → verified user
//!     ↕
//! Credential Store + API      ← where the token lives, who can vouch for it
//! ```

#![allow(async_fn_in_trait)]

mod browser;
mod context;
mod error;
mod provider;
mod resolver;

pub use browser::{
    cached_user, is_authenticated, post_login_destination, refresh_profile,
    sign_in, sign_out, SignedIn, ADMIN_HOME, LOGIN_PATH, USER_HOME,
};
pub use context::SessionContext;
pub use error::SessionError;
pub use provider::IdentityProvider;
pub use resolver::SessionResolver;
