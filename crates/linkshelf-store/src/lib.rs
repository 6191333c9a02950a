//! Credential storage for Linkshelf.
//!
//! The same page can be produced in two places:
//!
//! - on the **server**, where the only trace of a session is the raw
//!   `Cookie` header of the incoming request and nothing can be persisted;
//! - in the **browser**, where there is a cookie jar and a local key/value
//!   store, but no request object.
//!
//! Instead of sniffing which one we're in, every caller passes an explicit
//! [`Environment`] into the [`CredentialStore`]. The store then reads and
//! writes the session token (cookie `token`) and the cached user profile
//! (local key `user`) the right way for that environment.
//!
//! # How it fits in the stack
//!
//! ```text
//! Gate / sign-in helpers (above)  ← need "who is this?"
//!     ↕
//! Session Resolver                ← turns a token into a verified user
//!     ↕
//! Credential Store (this crate)   ← finds the token, caches the profile
//! ```

mod cookie;
mod env;
mod error;
mod store;

pub use cookie::{find_cookie, Cookie, COOKIE_MAX_AGE};
pub use env::{
    ClientEnv, CookieJar, Environment, LocalStore, MemoryCookieJar,
    MemoryLocalStore, ServerEnv,
};
pub use error::StoreError;
pub use store::{CredentialStore, PROFILE_KEY, TOKEN_KEY};
