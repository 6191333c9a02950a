use linkshelf_api::{Link, User};

/// Who is making this request, as far as the backend is concerned.
///
/// Computed fresh for every request and never persisted. `user` and
/// `token` are either both present or both absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub user: Option<User>,
    pub token: Option<String>,
    /// Links owned by the user, as reported by `GET /user`.
    pub links: Vec<Link>,
}

impl SessionContext {
    /// No user, no token, no links.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A verified session.
    pub fn signed_in(user: User, token: impl Into<String>, links: Vec<Link>) -> Self {
        Self {
            user: Some(user),
            token: Some(token.into()),
            links,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}
