//! # Linkshelf
//!
//! The client core of a content directory: users browse categorized links,
//! signed-in users manage their own, admins manage everything.
//!
//! This crate ties the layers together:
//!
//! - [`linkshelf_store`] finds the session token (request cookie header on
//!   the server, cookie jar in the browser)
//! - [`linkshelf_session`] turns the token into a verified user
//! - [`linkshelf_gate`] decides whether a page may render for that user
//! - [`linkshelf_paginate`] grows list views one page at a time
//!
//! and adds the application pieces: [`Config`], the list-view
//! [`sources`], the [`pages`] loaders and a unified [`LinkshelfError`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use linkshelf::prelude::*;
//!
//! # async fn render(cookie_header: Option<&str>) -> Result<(), LinkshelfError> {
//! let config = Config::from_env();
//! let backend = config.backend()?;
//! let gate = pages::admin_links_gate(SessionResolver::new(backend.clone()), backend, config.page_limit);
//!
//! match gate.run(GateRequest::new(Environment::server(cookie_header))).await? {
//!     GateResult::Redirect(redirect) => println!("302 -> {}", redirect.location),
//!     GateResult::Proceed(page) => println!("{} links", page.page.map_or(0, |links| links.len())),
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
pub mod pages;
pub mod sources;

pub use config::Config;
pub use error::LinkshelfError;

pub use linkshelf_api as api;
pub use linkshelf_gate as gate;
pub use linkshelf_paginate as paginate;
pub use linkshelf_session as session;
pub use linkshelf_store as store;

/// Installs a `tracing` fmt subscriber filtered by `RUST_LOG`, defaulting
/// to `info`. Calling it more than once is harmless.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub mod prelude {
    pub use crate::pages::{self, CategoryView, HomeView, PageError};
    pub use crate::sources::{AllLinks, CategoryLinks};
    pub use crate::{init_tracing, Config, LinkshelfError};

    pub use linkshelf_api::{
        Category, Credentials, HttpBackend, Identity, Link, LinkId, Role, User,
    };
    pub use linkshelf_gate::{
        Gate, GateConfig, GateRequest, GateResult, GatedPage, PageLoader,
        Policy, Redirect, RedirectKind,
    };
    pub use linkshelf_paginate::{Collection, Feed, LoadOutcome, PageSource, Trigger};
    pub use linkshelf_session::{
        sign_in, sign_out, IdentityProvider, SessionContext, SessionResolver,
    };
    pub use linkshelf_store::{ClientEnv, CredentialStore, Environment};
}
