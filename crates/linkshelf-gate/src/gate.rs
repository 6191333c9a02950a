//! The gate itself.

use linkshelf_api::{Link, User};
use linkshelf_session::{IdentityProvider, SessionResolver};
use linkshelf_store::Environment;

use crate::{GateError, LoadContext, NoLoader, PageLoader, Policy, RouteParams};

/// Where rejected requests are sent unless configured otherwise.
pub const DEFAULT_REDIRECT: &str = "/";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What a gate checks and what it runs once the check passes.
///
/// The loader slot is explicit: `None` means "access check only", and the
/// gate never looks for a loader on the page itself.
#[derive(Debug, Clone)]
pub struct GateConfig<L = NoLoader> {
    pub policy: Policy,
    /// Redirect target for sessions the policy rejects.
    pub redirect_to: String,
    pub loader: Option<L>,
}

impl GateConfig<NoLoader> {
    /// A config for `policy` with no loader, redirecting to `/`.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            redirect_to: DEFAULT_REDIRECT.to_string(),
            loader: None,
        }
    }
}

impl<L> GateConfig<L> {
    pub fn redirect_to(mut self, location: impl Into<String>) -> Self {
        self.redirect_to = location.into();
        self
    }

    /// Fills the loader slot.
    pub fn with_loader<M: PageLoader>(self, loader: M) -> GateConfig<M> {
        GateConfig {
            policy: self.policy,
            redirect_to: self.redirect_to,
            loader: Some(loader),
        }
    }
}

// ---------------------------------------------------------------------------
// Requests and results
// ---------------------------------------------------------------------------

/// One page render to gate.
#[derive(Debug, Clone)]
pub struct GateRequest {
    pub env: Environment,
    pub params: RouteParams,
}

impl GateRequest {
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            params: RouteParams::new(),
        }
    }

    /// Adds a route parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name, value);
        self
    }
}

/// How a redirect has to be carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// A `302 Found` response with a `Location` header (server render).
    Http,
    /// A client-side navigation (browser).
    Client,
}

/// A rejected request: send the user to `location`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub location: String,
    pub kind: RedirectKind,
}

impl Redirect {
    /// The redirect appropriate for `env`.
    pub fn for_env(env: &Environment, location: impl Into<String>) -> Self {
        let kind = if env.is_client() {
            RedirectKind::Client
        } else {
            RedirectKind::Http
        };
        Self {
            location: location.into(),
            kind,
        }
    }

    /// The HTTP status to answer with, for server redirects.
    pub fn status(&self) -> Option<u16> {
        match self.kind {
            RedirectKind::Http => Some(302),
            RedirectKind::Client => None,
        }
    }
}

/// What an admitted page receives: the verified session next to the
/// loader's data. The two live in separate fields so the loader can't
/// shadow `user` or `token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatedPage<T> {
    pub user: User,
    pub token: String,
    /// Links the user owns. Always empty behind [`Policy::Admin`].
    pub user_links: Vec<Link>,
    /// `None` when the gate has no loader.
    pub page: Option<T>,
}

/// The outcome of [`Gate::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateResult<T> {
    Proceed(GatedPage<T>),
    Redirect(Redirect),
}

impl<T> GateResult<T> {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }

    pub fn into_page(self) -> Option<GatedPage<T>> {
        match self {
            Self::Proceed(page) => Some(page),
            Self::Redirect(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// Guards one page: resolves the session, enforces a [`Policy`], and runs
/// the page's loader for admitted sessions.
///
/// Cheap to clone if the loader is.
pub struct Gate<P, L = NoLoader> {
    resolver: SessionResolver<P>,
    config: GateConfig<L>,
}

impl<P, L: Clone> Clone for Gate<P, L> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
            config: self.config.clone(),
        }
    }
}

impl<P: IdentityProvider, L: PageLoader> Gate<P, L> {
    pub fn new(resolver: SessionResolver<P>, config: GateConfig<L>) -> Self {
        Self { resolver, config }
    }

    pub fn config(&self) -> &GateConfig<L> {
        &self.config
    }

    /// Runs the gate for one request.
    ///
    /// Produces exactly one outcome: a redirect (the loader is not called)
    /// or the admitted page (the loader, if any, is called once).
    ///
    /// # Errors
    /// - [`GateError::Session`] if the session can't be resolved
    /// - [`GateError::Loader`] if the loader fails
    pub async fn run(&self, request: GateRequest) -> Result<GateResult<L::Page>, GateError> {
        let GateRequest { env, params } = request;
        let session = self.resolver.resolve(&env).await?;
        let policy = self.config.policy;

        let (Some(user), Some(token)) = (session.user.clone(), session.token.clone()) else {
            tracing::info!(%env, %policy, location = %self.config.redirect_to, "no session, redirecting");
            return Ok(GateResult::Redirect(Redirect::for_env(&env, &self.config.redirect_to)));
        };

        if !policy.admits(&session) {
            tracing::info!(
                %env, %policy, user_id = %user.id, role = %user.role,
                location = %self.config.redirect_to,
                "session not admitted, redirecting"
            );
            return Ok(GateResult::Redirect(Redirect::for_env(&env, &self.config.redirect_to)));
        }

        let user_links = match policy {
            Policy::User => session.links,
            Policy::Admin => Vec::new(),
        };

        let page = match &self.config.loader {
            Some(loader) => {
                let ctx = LoadContext {
                    env,
                    params,
                    user: user.clone(),
                    token: token.clone(),
                };
                let page = loader
                    .load(ctx)
                    .await
                    .map_err(|e| GateError::Loader(Box::new(e)))?;
                Some(page)
            }
            None => None,
        };

        tracing::debug!(%policy, user_id = %user.id, loaded = page.is_some(), "gate admitted session");
        Ok(GateResult::Proceed(GatedPage {
            user,
            token,
            user_links,
            page,
        }))
    }
}

#[cfg(test)]
mod tests {
    use linkshelf_store::ClientEnv;

    use super::*;

    #[test]
    fn test_redirect_for_server_is_http_302() {
        let redirect = Redirect::for_env(&Environment::server(None), "/");
        assert_eq!(redirect.kind, RedirectKind::Http);
        assert_eq!(redirect.status(), Some(302));
        assert_eq!(redirect.location, "/");
    }

    #[test]
    fn test_redirect_for_client_is_navigation() {
        let redirect = Redirect::for_env(&Environment::client(ClientEnv::in_memory()), "/login");
        assert_eq!(redirect.kind, RedirectKind::Client);
        assert_eq!(redirect.status(), None);
    }

    #[test]
    fn test_gate_config_defaults() {
        let config = GateConfig::new(Policy::Admin);
        assert_eq!(config.redirect_to, DEFAULT_REDIRECT);
        assert!(config.loader.is_none());

        let config = config.redirect_to("/login").with_loader(NoLoader);
        assert_eq!(config.redirect_to, "/login");
        assert!(config.loader.is_some());
    }
}
