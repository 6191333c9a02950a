//! Skip/limit pagination for Linkshelf list views.
//!
//! Every list view in Linkshelf (links in a category, all links, the admin
//! link table) pages through the backend the same way: request `limit`
//! items starting at offset `skip`, append what comes back, and stop once a
//! page comes back short. This crate owns that contract once:
//!
//! - **Requests** ([`PageRequest`]): the `{ skip, limit }` body sent to the
//!   backend.
//! - **Sources** ([`PageSource`] trait, [`page_fn`]): "how do I fetch one
//!   page?", supplied by each view.
//! - **Collections** ([`Collection`]): the growable, append-only list a view
//!   renders.
//! - **Feeds** ([`Feed`]): a shareable handle for scroll-driven "load more"
//!   triggers that guarantees at most one fetch in flight.
//!
//! # How it fits in the stack
//!
//! ```text
//! Page loader (first render)  ── Collection::initial ──┐
//!                                                        ├─→ PageSource ─→ backend
//! Scroll signal (later)       ── Feed::trigger ─────────┘
//! ```

#![allow(async_fn_in_trait)]

mod collection;
mod feed;
mod source;

pub use collection::{Collection, LoadOutcome, PageRequest};
pub use feed::{Feed, Trigger};
pub use source::{page_fn, FnSource, PageSource};

/// Page size used by every list view unless configured otherwise.
pub const DEFAULT_PAGE_LIMIT: usize = 20;
