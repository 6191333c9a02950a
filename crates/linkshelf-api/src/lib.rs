//! Backend boundary for Linkshelf.
//!
//! Linkshelf's backend is a JSON REST API that it treats as a black box.
//! This crate is the only place that knows what goes over that wire:
//!
//! - **Types** ([`User`], [`Link`], [`Category`], [`Identity`], ...): the
//!   JSON bodies the backend sends and accepts.
//! - **Client** ([`HttpBackend`]): one method per endpoint, bearer auth where
//!   the endpoint needs it.
//! - **Claims** ([`decode_claims`]): reading the payload of activation and
//!   password-reset tokens. Decoding only; no signature checks.
//! - **Errors** ([`ApiError`]): split so callers can tell "the backend said
//!   401" apart from "the backend is down".

mod claims;
mod client;
mod error;
mod types;

pub use claims::{decode_claims, TokenClaims};
pub use client::HttpBackend;
pub use error::ApiError;
pub use types::{
    Category, CategoryId, CategoryPage, CategoryRef, CategorySummary,
    Credentials, Identity, Image, Link, LinkId, LoginResponse, Message,
    PasswordReset, PostedBy, ProfileUpdate, Registration, Role, User, UserId,
};

pub use linkshelf_paginate::PageRequest;
