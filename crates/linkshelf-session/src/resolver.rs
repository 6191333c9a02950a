//! Turning an environment's credentials into a [`SessionContext`].

use std::sync::Arc;

use linkshelf_store::{CredentialStore, Environment};

use crate::{IdentityProvider, SessionContext, SessionError};

/// Resolves the session for a request (or a browser navigation).
///
/// ```text
/// token cookie? ──no──→ anonymous
///      │yes
///      ▼
/// provider.whoami(token)
///      ├─ Ok(identity)  → signed in (user, token, owned links)
///      ├─ Err(401)      → anonymous
///      └─ Err(other)    → SessionError::Backend
/// ```
///
/// Cheap to clone; clones share the provider.
pub struct SessionResolver<P> {
    provider: Arc<P>,
}

impl<P> Clone for SessionResolver<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P: IdentityProvider> SessionResolver<P> {
    pub fn new(provider: P) -> Self {
        Self::from_arc(Arc::new(provider))
    }

    /// A resolver sharing an already shared provider.
    pub fn from_arc(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Resolves the session carried by `env`.
    ///
    /// Only a missing token or a 401 yields an anonymous session; every
    /// other backend failure is returned so the caller can show an error
    /// page instead of silently logging the user out.
    ///
    /// # Errors
    /// Returns [`SessionError::Backend`] if the backend is unreachable,
    /// answers with a non-401 failure, or sends an undecodable body.
    pub async fn resolve(&self, env: &Environment) -> Result<SessionContext, SessionError> {
        let store = CredentialStore::new(env.clone());
        let Some(token) = store.token() else {
            tracing::debug!(%env, "no session token, resolving anonymous");
            return Ok(SessionContext::anonymous());
        };

        match self.provider.whoami(&token).await {
            Ok(identity) => {
                let user_id = identity.user.id.clone();
                tracing::debug!(%env, %user_id, role = %identity.user.role, "session resolved");
                Ok(SessionContext::signed_in(identity.user, token, identity.links))
            }
            Err(e) if e.is_unauthorized() => {
                tracing::debug!(%env, error = %e, "session token rejected, resolving anonymous");
                Ok(SessionContext::anonymous())
            }
            Err(e) => {
                tracing::warn!(%env, error = %e, "session resolution failed");
                Err(SessionError::Backend(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use linkshelf_api::{ApiError, Credentials, Identity, Link, LinkId, LoginResponse, Role, User};
    use linkshelf_store::{ClientEnv, Cookie};

    use super::*;

    /// Answers `whoami` with a canned result and counts the calls.
    struct Canned {
        answer: Mutex<Option<Result<Identity, ApiError>>>,
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    impl Canned {
        fn new(answer: Result<Identity, ApiError>) -> Self {
            Self {
                answer: Mutex::new(Some(answer)),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn status(status: u16) -> Self {
            Self::new(Err(ApiError::Status {
                status,
                message: "nope".into(),
            }))
        }
    }

    impl IdentityProvider for Canned {
        async fn whoami(&self, token: &str) -> Result<Identity, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(token.to_string());
            self.answer.lock().unwrap().take().expect("whoami called more than once")
        }

        async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse, ApiError> {
            unreachable!("resolver never logs in")
        }
    }

    fn identity(role: Role) -> Identity {
        Identity {
            user: User {
                id: "u1".into(),
                name: "Ada".into(),
                role,
                ..User::default()
            },
            links: vec![Link {
                id: LinkId::from("l1"),
                title: "The Book".into(),
                ..Link::default()
            }],
        }
    }

    #[tokio::test]
    async fn test_resolve_without_cookie_header_is_anonymous_without_backend_call() {
        let resolver = SessionResolver::new(Canned::status(500));

        let ctx = resolver.resolve(&Environment::server(None)).await.unwrap();

        assert_eq!(ctx, SessionContext::anonymous());
        assert_eq!(resolver.provider().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolve_header_without_token_is_anonymous() {
        let resolver = SessionResolver::new(Canned::status(500));

        let ctx = resolver.resolve(&Environment::server(Some("theme=dark; lang=en"))).await.unwrap();

        assert!(!ctx.is_authenticated());
        assert_eq!(resolver.provider().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolve_server_token_returns_user_and_links() {
        let resolver = SessionResolver::new(Canned::new(Ok(identity(Role::Subscriber))));

        let ctx = resolver.resolve(&Environment::server(Some("a=1; token=XYZ; b=2"))).await.unwrap();

        assert!(ctx.is_authenticated());
        assert_eq!(ctx.token.as_deref(), Some("XYZ"));
        assert_eq!(ctx.user.unwrap().name, "Ada");
        assert_eq!(ctx.links.len(), 1);
        assert_eq!(*resolver.provider().seen.lock().unwrap(), vec!["XYZ".to_string()]);
    }

    #[tokio::test]
    async fn test_resolve_client_reads_token_from_jar() {
        let env = ClientEnv::in_memory();
        env.cookies().set(Cookie::new("token", "from-jar"));
        let resolver = SessionResolver::new(Canned::new(Ok(identity(Role::Admin))));

        let ctx = resolver.resolve(&Environment::client(env)).await.unwrap();

        assert!(ctx.is_admin());
        assert_eq!(ctx.token.as_deref(), Some("from-jar"));
    }

    #[tokio::test]
    async fn test_resolve_unauthorized_is_anonymous() {
        let resolver = SessionResolver::new(Canned::status(401));

        let ctx = resolver.resolve(&Environment::server(Some("token=expired"))).await.unwrap();

        assert_eq!(ctx, SessionContext::anonymous());
        assert_eq!(resolver.provider().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolve_server_error_propagates() {
        let resolver = SessionResolver::new(Canned::status(500));

        let err = resolver.resolve(&Environment::server(Some("token=abc"))).await.unwrap_err();

        assert!(matches!(err, SessionError::Backend(ApiError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_resolve_forbidden_is_an_error_not_anonymous() {
        let resolver = SessionResolver::new(Canned::status(403));

        let result = resolver.resolve(&Environment::server(Some("token=abc"))).await;

        assert!(matches!(result, Err(SessionError::Backend(_))));
    }

    #[tokio::test]
    async fn test_resolver_clones_share_provider() {
        let resolver = SessionResolver::new(Canned::new(Ok(identity(Role::Subscriber))));
        let clone = resolver.clone();

        clone.resolve(&Environment::server(Some("token=abc"))).await.unwrap();

        assert_eq!(resolver.provider().calls.load(Ordering::SeqCst), 1);
    }
}
