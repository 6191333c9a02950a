//! The session cookie and raw `Cookie` header parsing.

use std::fmt;
use std::time::Duration;

/// How long a session cookie lives: one day.
pub const COOKIE_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// A cookie as written by the browser side of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub max_age: Duration,
    pub path: String,
}

impl Cookie {
    /// A site-wide cookie that expires after [`COOKIE_MAX_AGE`].
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age: COOKIE_MAX_AGE,
            path: "/".to_string(),
        }
    }

    /// Overrides the lifetime.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }
}

/// Renders the cookie the way it appears in a `Set-Cookie` header, e.g.
/// `token=abc; Max-Age=86400; Path=/`.
impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={}; Max-Age={}; Path={}",
            self.name,
            self.value,
            self.max_age.as_secs(),
            self.path
        )
    }
}

/// Finds `key` in a raw `Cookie` request header.
///
/// The header is split on `;`, each segment is trimmed, and the first
/// segment starting with `key=` wins. Everything after that first `=` is the
/// value. Returns `None` when the key is missing or its value is empty.
/// Malformed segments are skipped, so this never fails.
///
/// ```rust
/// use linkshelf_store::find_cookie;
///
/// assert_eq!(find_cookie("a=1; token=XYZ; b=2", "token"), Some("XYZ"));
/// assert_eq!(find_cookie("a=1; b=2", "token"), None);
/// ```
pub fn find_cookie<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|segment| segment.strip_prefix(key)?.strip_prefix('='))
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_cookie_middle_segment() {
        assert_eq!(find_cookie("a=1; token=XYZ; b=2", "token"), Some("XYZ"));
    }

    #[test]
    fn test_find_cookie_first_and_last_segment() {
        assert_eq!(find_cookie("token=first; b=2", "token"), Some("first"));
        assert_eq!(find_cookie("a=1;token=last", "token"), Some("last"));
    }

    #[test]
    fn test_find_cookie_missing_key_returns_none() {
        assert_eq!(find_cookie("a=1; b=2", "token"), None);
        assert_eq!(find_cookie("", "token"), None);
    }

    #[test]
    fn test_find_cookie_ignores_keys_sharing_a_prefix() {
        // "tokens=..." and "xtoken=..." must not be mistaken for "token".
        assert_eq!(find_cookie("tokens=nope; xtoken=nope", "token"), None);
        assert_eq!(find_cookie("tokens=nope; token=yes", "token"), Some("yes"));
    }

    #[test]
    fn test_find_cookie_malformed_segments_are_skipped() {
        assert_eq!(find_cookie(";;  ; token ; =x; junk", "token"), None);
        assert_eq!(find_cookie("garbage;;token=ok", "token"), Some("ok"));
    }

    #[test]
    fn test_find_cookie_empty_value_is_absent() {
        assert_eq!(find_cookie("token=; a=1", "token"), None);
    }

    #[test]
    fn test_find_cookie_keeps_text_after_first_equals() {
        // Base64 padding survives.
        assert_eq!(find_cookie("token=abc==", "token"), Some("abc=="));
    }

    #[test]
    fn test_cookie_display_renders_set_cookie_value() {
        let cookie = Cookie::new("token", "abc");
        assert_eq!(cookie.to_string(), "token=abc; Max-Age=86400; Path=/");
    }

    #[test]
    fn test_cookie_with_max_age_overrides_default() {
        let cookie = Cookie::new("token", "abc").with_max_age(Duration::from_secs(60));
        assert_eq!(cookie.max_age.as_secs(), 60);
    }
}
