//! The environment a page is being produced in.
//!
//! Resolved once at the entry point (the request handler on the server, the
//! app shell in the browser) and then passed down explicitly. Nothing below
//! this point asks "am I in a browser?" on its own.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use crate::Cookie;

// ---------------------------------------------------------------------------
// Browser storage seams
// ---------------------------------------------------------------------------

/// The browser's cookie jar, as seen by client code.
///
/// `Send + Sync` because a browser tab's jar is shared by every component
/// on the page.
pub trait CookieJar: Send + Sync {
    /// Returns the value of a live (unexpired) cookie.
    fn get(&self, name: &str) -> Option<String>;

    /// Stores or replaces a cookie.
    fn set(&self, cookie: Cookie);

    /// Deletes a cookie. Deleting a missing cookie is fine.
    fn remove(&self, name: &str);
}

/// The browser's persistent key/value store (local storage).
pub trait LocalStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: String);
    fn remove_item(&self, key: &str);
}

/// An in-process [`CookieJar`] that honours `Max-Age`.
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: RwLock<HashMap<String, (Cookie, Instant)>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `Cookie` request header a browser would send with this jar,
    /// e.g. `a=1; token=abc`. Expired cookies are left out; names are
    /// sorted so the header is stable.
    pub fn request_header(&self) -> Option<String> {
        let cookies = self.cookies.read().unwrap_or_else(PoisonError::into_inner);
        let mut pairs: Vec<String> = cookies
            .values()
            .filter(|(cookie, set_at)| set_at.elapsed() < cookie.max_age)
            .map(|(cookie, _)| format!("{}={}", cookie.name, cookie.value))
            .collect();
        if pairs.is_empty() {
            return None;
        }
        pairs.sort();
        Some(pairs.join("; "))
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let cookies = self.cookies.read().unwrap_or_else(PoisonError::into_inner);
        let (cookie, set_at) = cookies.get(name)?;
        (set_at.elapsed() < cookie.max_age).then(|| cookie.value.clone())
    }

    fn set(&self, cookie: Cookie) {
        let mut cookies = self.cookies.write().unwrap_or_else(PoisonError::into_inner);
        cookies.insert(cookie.name.clone(), (cookie, Instant::now()));
    }

    fn remove(&self, name: &str) {
        let mut cookies = self.cookies.write().unwrap_or_else(PoisonError::into_inner);
        cookies.remove(name);
    }
}

/// An in-process [`LocalStore`].
#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryLocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        items.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: String) {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value);
    }

    fn remove_item(&self, key: &str) {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
    }
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// A server-side render: one incoming request, no persistent storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerEnv {
    cookie_header: Option<String>,
}

impl ServerEnv {
    /// Captures the raw `Cookie` header of the incoming request, if any.
    pub fn new(cookie_header: Option<impl Into<String>>) -> Self {
        Self {
            cookie_header: cookie_header.map(Into::into),
        }
    }

    pub fn cookie_header(&self) -> Option<&str> {
        self.cookie_header.as_deref()
    }
}

/// A browser session: a cookie jar and a local store, no request object.
///
/// Cheap to clone; clones share the same storage.
#[derive(Clone)]
pub struct ClientEnv {
    cookies: Arc<dyn CookieJar>,
    local: Arc<dyn LocalStore>,
}

impl ClientEnv {
    pub fn new(cookies: Arc<dyn CookieJar>, local: Arc<dyn LocalStore>) -> Self {
        Self { cookies, local }
    }

    /// A client backed by fresh in-memory storage.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryCookieJar::new()),
            Arc::new(MemoryLocalStore::new()),
        )
    }

    pub fn cookies(&self) -> &dyn CookieJar {
        self.cookies.as_ref()
    }

    pub fn local(&self) -> &dyn LocalStore {
        self.local.as_ref()
    }
}

impl fmt::Debug for ClientEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientEnv").finish_non_exhaustive()
    }
}

/// Where the current page is being produced.
#[derive(Debug, Clone)]
pub enum Environment {
    /// Server-side rendering of one request.
    Server(ServerEnv),

    /// Running in the browser.
    Client(ClientEnv),
}

impl Environment {
    /// A server environment for a request carrying `cookie_header`.
    pub fn server(cookie_header: Option<&str>) -> Self {
        Self::Server(ServerEnv::new(cookie_header))
    }

    pub fn client(env: ClientEnv) -> Self {
        Self::Client(env)
    }

    /// `true` when running in the browser.
    pub fn is_client(&self) -> bool {
        matches!(self, Self::Client(_))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Server(_) => write!(f, "server"),
            Self::Client(_) => write!(f, "client"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_memory_jar_set_then_get() {
        let jar = MemoryCookieJar::new();
        jar.set(Cookie::new("token", "abc"));
        assert_eq!(jar.get("token").as_deref(), Some("abc"));
    }

    #[test]
    fn test_memory_jar_expired_cookie_reads_as_missing() {
        let jar = MemoryCookieJar::new();
        jar.set(Cookie::new("token", "abc").with_max_age(Duration::ZERO));
        assert_eq!(jar.get("token"), None);
        assert_eq!(jar.request_header(), None);
    }

    #[test]
    fn test_memory_jar_remove() {
        let jar = MemoryCookieJar::new();
        jar.set(Cookie::new("token", "abc"));
        jar.remove("token");
        jar.remove("never-set");
        assert_eq!(jar.get("token"), None);
    }

    #[test]
    fn test_memory_jar_request_header_is_sorted() {
        let jar = MemoryCookieJar::new();
        jar.set(Cookie::new("token", "abc"));
        jar.set(Cookie::new("a", "1"));
        assert_eq!(jar.request_header().as_deref(), Some("a=1; token=abc"));
    }

    #[test]
    fn test_memory_local_store_round_trip() {
        let store = MemoryLocalStore::new();
        store.set_item("user", "{}".into());
        assert_eq!(store.get_item("user").as_deref(), Some("{}"));
        store.remove_item("user");
        assert_eq!(store.get_item("user"), None);
    }

    #[test]
    fn test_client_env_clones_share_storage() {
        let env = ClientEnv::in_memory();
        let other = env.clone();
        env.cookies().set(Cookie::new("token", "abc"));
        assert_eq!(other.cookies().get("token").as_deref(), Some("abc"));
    }

    #[test]
    fn test_environment_display_and_kind() {
        let server = Environment::server(Some("token=abc"));
        let client = Environment::client(ClientEnv::in_memory());
        assert_eq!(server.to_string(), "server");
        assert_eq!(client.to_string(), "client");
        assert!(!server.is_client());
        assert!(client.is_client());
    }
}
