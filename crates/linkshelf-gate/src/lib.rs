//! Access gating for Linkshelf pages.
//!
//! A page that needs a signed-in user (or an admin) is wrapped in a
//! [`Gate`]. Running the gate resolves the session, checks it against a
//! [`Policy`], and then either redirects or runs the page's own loader:
//!
//! ```text
//! GateRequest ─→ SessionResolver ─→ Policy?
//!                                      ├─ no  → GateResult::Redirect (loader never runs)
//!                                      └─ yes → PageLoader::load → GateResult::Proceed
//! ```
//!
//! The result is a typed value; turning it into an HTTP response or a
//! client-side navigation is left to the caller.

#![allow(async_fn_in_trait)]

mod error;
mod gate;
mod loader;
mod policy;

pub use error::GateError;
pub use gate::{Gate, GateConfig, GateRequest, GateResult, GatedPage, Redirect, RedirectKind, DEFAULT_REDIRECT};
pub use loader::{loader_fn, FnLoader, LoadContext, NoLoader, PageLoader, RouteParams};
pub use policy::Policy;
