//! Page loaders for the views that read from the backend.
//!
//! Public pages (home, category) are plain async functions returning a view
//! that can also record link clicks. Pages behind a sign-in are
//! [`PageLoader`]s meant to sit in a [`Gate`]; the `*_gate` constructors
//! wire them up with the right policy.

use linkshelf_api::{ApiError, Category, HttpBackend, Link, LinkId, PageRequest};
use linkshelf_gate::{Gate, GateConfig, LoadContext, NoLoader, PageLoader, Policy};
use linkshelf_paginate::Collection;
use linkshelf_session::{IdentityProvider, SessionResolver};

use crate::sources::{AllLinks, CategoryLinks};

/// Errors from the page loaders in this module.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The route didn't carry a parameter the page needs.
    #[error("missing route parameter `{0}`")]
    MissingParam(&'static str),

    #[error(transparent)]
    Api(#[from] ApiError),
}

// ---------------------------------------------------------------------------
// Public pages
// ---------------------------------------------------------------------------

/// The home page: every category and the most clicked links.
#[derive(Debug, Clone)]
pub struct HomeView {
    pub categories: Vec<Category>,
    pub popular: Vec<Link>,
}

impl HomeView {
    /// Counts a click on `id`, then refetches [`popular`](Self::popular)
    /// so the new count shows. On error the old list is kept.
    pub async fn record_click(&mut self, backend: &HttpBackend, id: &LinkId) -> Result<(), PageError> {
        backend.record_click(id).await?;
        self.popular = backend.popular().await?;
        Ok(())
    }
}

/// Loads the home page.
pub async fn home(backend: &HttpBackend) -> Result<HomeView, PageError> {
    let categories = backend.categories().await?;
    let popular = backend.popular().await?;
    tracing::debug!(count = categories.len(), popular = popular.len(), "home page loaded");
    Ok(HomeView { categories, popular })
}

/// A category page: the category, the first page of its links and its most
/// clicked links.
#[derive(Debug, Clone)]
pub struct CategoryView {
    pub category: Category,
    pub links: Collection<Link>,
    pub popular: Vec<Link>,
}

impl CategoryView {
    /// The source to load further pages of [`links`](Self::links) from.
    pub fn source(&self, backend: &HttpBackend) -> CategoryLinks {
        CategoryLinks::new(backend.clone(), self.category.slug.clone())
    }

    /// Counts a click on `id`, then refetches this category's
    /// [`popular`](Self::popular) links. The paged links are left alone.
    pub async fn record_click(&mut self, backend: &HttpBackend, id: &LinkId) -> Result<(), PageError> {
        backend.record_click(id).await?;
        self.popular = backend.popular_in(&self.category.slug).await?;
        Ok(())
    }
}

/// Loads a category page. The first request returns the category itself
/// alongside the links, so the collection is seeded from it directly.
pub async fn category(backend: &HttpBackend, slug: &str, limit: usize) -> Result<CategoryView, PageError> {
    let page = backend.category_page(slug, PageRequest::first(limit)).await?;
    let popular = backend.popular_in(&page.category.slug).await?;
    tracing::debug!(slug, fetched = page.links.len(), limit, popular = popular.len(), "category page loaded");
    Ok(CategoryView {
        category: page.category,
        links: Collection::from_first_page(page.links, limit),
        popular,
    })
}

// ---------------------------------------------------------------------------
// Gated pages
// ---------------------------------------------------------------------------

/// The admin link table: first page of every link, fetched with the
/// admin's token.
#[derive(Debug, Clone)]
pub struct AdminLinksPage {
    backend: HttpBackend,
    limit: usize,
}

impl AdminLinksPage {
    pub fn new(backend: HttpBackend, limit: usize) -> Self {
        Self { backend, limit }
    }
}

impl PageLoader for AdminLinksPage {
    type Page = Collection<Link>;
    type Error = PageError;

    async fn load(&self, ctx: LoadContext) -> Result<Collection<Link>, PageError> {
        let source = AllLinks::admin(self.backend.clone(), ctx.token);
        Ok(Collection::initial(self.limit, &source).await?)
    }
}

/// The link edit form: the link named by the `id` route parameter.
#[derive(Debug, Clone)]
pub struct LinkEditPage {
    backend: HttpBackend,
}

impl LinkEditPage {
    pub fn new(backend: HttpBackend) -> Self {
        Self { backend }
    }
}

impl PageLoader for LinkEditPage {
    type Page = Link;
    type Error = PageError;

    async fn load(&self, ctx: LoadContext) -> Result<Link, PageError> {
        let id = ctx.params.get("id").ok_or(PageError::MissingParam("id"))?;
        Ok(self.backend.link(&LinkId::from(id)).await?)
    }
}

/// `/admin/link/list`: admins only, with the first page of every link.
pub fn admin_links_gate<P: IdentityProvider>(
    resolver: SessionResolver<P>,
    backend: HttpBackend,
    limit: usize,
) -> Gate<P, AdminLinksPage> {
    let config = GateConfig::new(Policy::Admin).with_loader(AdminLinksPage::new(backend, limit));
    Gate::new(resolver, config)
}

/// `/user/link/{id}`: any signed-in user, with the link to edit.
pub fn link_edit_gate<P: IdentityProvider>(resolver: SessionResolver<P>, backend: HttpBackend) -> Gate<P, LinkEditPage> {
    let config = GateConfig::new(Policy::User).with_loader(LinkEditPage::new(backend));
    Gate::new(resolver, config)
}

/// `/user`: the signed-in user's dashboard. Their own links come from the
/// session itself, so no loader is needed.
pub fn user_dashboard_gate<P: IdentityProvider>(resolver: SessionResolver<P>) -> Gate<P, NoLoader> {
    Gate::new(resolver, GateConfig::new(Policy::User))
}

/// `/admin`: the admin dashboard.
pub fn admin_dashboard_gate<P: IdentityProvider>(resolver: SessionResolver<P>) -> Gate<P, NoLoader> {
    Gate::new(resolver, GateConfig::new(Policy::Admin))
}
