use std::fmt;

use linkshelf_session::SessionContext;

/// Who may see a gated page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Any signed-in user.
    User,
    /// Signed-in users with the `admin` role.
    Admin,
}

impl Policy {
    /// Whether `session` satisfies this policy.
    pub fn admits(&self, session: &SessionContext) -> bool {
        match self {
            Self::User => session.is_authenticated(),
            Self::Admin => session.is_admin(),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}
