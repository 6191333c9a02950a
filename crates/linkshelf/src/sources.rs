//! Page sources for the list views, all backed by [`HttpBackend`].

use linkshelf_api::{ApiError, HttpBackend, Link, PageRequest};
use linkshelf_paginate::PageSource;

/// Links in one category: `POST /category/{slug}`.
#[derive(Debug, Clone)]
pub struct CategoryLinks {
    backend: HttpBackend,
    slug: String,
}

impl CategoryLinks {
    pub fn new(backend: HttpBackend, slug: impl Into<String>) -> Self {
        Self {
            backend,
            slug: slug.into(),
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl PageSource<Link> for CategoryLinks {
    type Error = ApiError;

    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<Link>, ApiError> {
        tracing::debug!(slug = %self.slug, skip = request.skip, limit = request.limit, "fetching category links");
        let page = self.backend.category_page(&self.slug, request).await?;
        Ok(page.links)
    }
}

/// Every link: `POST /links`, optionally as an admin.
#[derive(Debug, Clone)]
pub struct AllLinks {
    backend: HttpBackend,
    token: Option<String>,
}

impl AllLinks {
    /// The public listing.
    pub fn public(backend: HttpBackend) -> Self {
        Self { backend, token: None }
    }

    /// The admin listing, authorized with `token`.
    pub fn admin(backend: HttpBackend, token: impl Into<String>) -> Self {
        Self {
            backend,
            token: Some(token.into()),
        }
    }
}

impl PageSource<Link> for AllLinks {
    type Error = ApiError;

    async fn fetch_page(&self, request: PageRequest) -> Result<Vec<Link>, ApiError> {
        tracing::debug!(
            admin = self.token.is_some(),
            skip = request.skip,
            limit = request.limit,
            "fetching links"
        );
        self.backend.links(self.token.as_deref(), request).await
    }
}
