//! The page-specific half of a gated page.
//!
//! Once the gate has decided a request may proceed, it hands the verified
//! identity to the page's [`PageLoader`], which fetches whatever that page
//! needs (a link to edit, the admin link table, ...).

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::future::Future;

use linkshelf_api::User;
use linkshelf_store::Environment;

/// Path parameters of the route being rendered, e.g. `id` for
/// `/user/link/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Everything a loader may use, owned so the loader can move it into
/// whatever futures it builds.
#[derive(Debug, Clone)]
pub struct LoadContext {
    pub env: Environment,
    pub params: RouteParams,
    /// The verified user. Always present: loaders only run after the
    /// policy admitted the session.
    pub user: User,
    /// The bearer token the user was verified with.
    pub token: String,
}

/// Loads the data for one gated page.
///
/// # Example
///
/// ```rust
/// use linkshelf_gate::{LoadContext, PageLoader};
///
/// /// Greets the signed-in user by name.
/// struct Greeting;
///
/// impl PageLoader for Greeting {
///     type Page = String;
///     type Error = std::convert::Infallible;
///
///     async fn load(&self, ctx: LoadContext) -> Result<String, Self::Error> {
///         Ok(format!("Hello, {}", ctx.user.name))
///     }
/// }
/// ```
pub trait PageLoader: Send + Sync + 'static {
    /// The page data handed to the renderer.
    type Page: Send;

    /// Boxed into [`GateError::Loader`](crate::GateError::Loader) on failure.
    type Error: std::error::Error + Send + Sync + 'static;

    fn load(&self, ctx: LoadContext) -> impl Future<Output = Result<Self::Page, Self::Error>> + Send;
}

/// The empty loader slot: a gate that only checks access.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLoader;

impl PageLoader for NoLoader {
    type Page = ();
    type Error = Infallible;

    async fn load(&self, _ctx: LoadContext) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Adapts an async closure into a [`PageLoader`].
///
/// Created by [`loader_fn`].
#[derive(Clone, Copy)]
pub struct FnLoader<F>(F);

/// Wraps `f` so it can be used as a gate's loader.
pub fn loader_fn<F>(f: F) -> FnLoader<F> {
    FnLoader(f)
}

impl<F, Fut, T, E> PageLoader for FnLoader<F>
where
    F: Fn(LoadContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send,
    T: Send,
    E: std::error::Error + Send + Sync + 'static,
{
    type Page = T;
    type Error = E;

    fn load(&self, ctx: LoadContext) -> impl Future<Output = Result<T, E>> + Send {
        (self.0)(ctx)
    }
}
