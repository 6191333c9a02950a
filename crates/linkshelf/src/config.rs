//! Application configuration.
//!
//! Built either in code (builder methods over [`Config::default`]) or from
//! `LINKSHELF_*` environment variables with [`Config::from_env`].

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use linkshelf_api::HttpBackend;
use linkshelf_paginate::DEFAULT_PAGE_LIMIT;

use crate::LinkshelfError;

/// Where the backend lives and how list views page through it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the REST backend, including any path prefix.
    pub api_url: String,

    /// Display name of the site.
    pub app_name: String,

    /// Public origin of the site itself (used for links in emails).
    pub domain: String,

    pub production: bool,

    /// Items per page for every list view.
    pub page_limit: usize,

    /// Per-request timeout for backend calls.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000/api".to_string(),
            app_name: "Linkshelf".to_string(),
            domain: "http://localhost:3000".to_string(),
            production: false,
            page_limit: DEFAULT_PAGE_LIMIT,
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `LINKSHELF_API`, `LINKSHELF_APP_NAME`, `LINKSHELF_DOMAIN`,
    /// `LINKSHELF_PRODUCTION` and `LINKSHELF_PAGE_LIMIT`.
    ///
    /// Unset variables keep their defaults. Unparsable values are logged
    /// and also fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: lookup("LINKSHELF_API").unwrap_or(defaults.api_url),
            app_name: lookup("LINKSHELF_APP_NAME").unwrap_or(defaults.app_name),
            domain: lookup("LINKSHELF_DOMAIN").unwrap_or(defaults.domain),
            production: parse_or(&lookup, "LINKSHELF_PRODUCTION", defaults.production),
            page_limit: parse_or(&lookup, "LINKSHELF_PAGE_LIMIT", defaults.page_limit),
            request_timeout: defaults.request_timeout,
        }
    }

    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    pub fn production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    pub fn page_limit(mut self, limit: usize) -> Self {
        self.page_limit = limit;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builds a backend client for `api_url` with `request_timeout`.
    ///
    /// # Errors
    /// Returns [`LinkshelfError::Api`] if the URL is invalid or the HTTP
    /// client can't be constructed.
    pub fn backend(&self) -> Result<HttpBackend, LinkshelfError> {
        let client = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()
            .map_err(linkshelf_api::ApiError::Transport)?;
        Ok(HttpBackend::with_client(&self.api_url, client)?)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        tracing::warn!(key, value = %raw, error = %e, %default, "invalid config value, using default");
        default
    })
}
