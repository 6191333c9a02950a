//! JSON bodies exchanged with the backend.
//!
//! The backend is a document store, so ids arrive as `_id` strings and
//! field names are camelCase. Fields the core doesn't depend on are
//! `#[serde(default)]` so a slimmer response still decodes.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Backend id of a user.
    UserId
);
string_id!(
    /// Backend id of a link.
    LinkId
);
string_id!(
    /// Backend id of a category.
    CategoryId
);

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// What a user is allowed to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages categories and every link.
    Admin,
    /// Submits and edits their own links.
    #[default]
    Subscriber,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Subscriber => write!(f, "subscriber"),
        }
    }
}

/// A user profile, as returned by `/login`, `/user` and profile updates.
///
/// This is also the snapshot the browser caches next to the token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: Role,
    /// Categories the user follows.
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Body of `GET /user`: the signed-in user plus the links they own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user: User,
    #[serde(default)]
    pub links: Vec<Link>,
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// A category's image, hosted by the backend's object store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub key: String,
}

/// A full category, as listed on the home page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "_id", default)]
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    /// Rich-text description (HTML).
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: Option<Image>,
}

/// The category fields embedded in a link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    #[serde(rename = "_id", default)]
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// A category reference: the backend sends bare ids in some places and
/// populated summaries in others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Id(CategoryId),
    Summary(CategorySummary),
}

impl CategoryRef {
    pub fn id(&self) -> &CategoryId {
        match self {
            Self::Id(id) => id,
            Self::Summary(summary) => &summary.id,
        }
    }
}

/// Body of `POST /category/{slug}`: the category and one page of its links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPage {
    pub category: Category,
    #[serde(default)]
    pub links: Vec<Link>,
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// Who submitted a link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedBy {
    #[serde(rename = "_id", default)]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
}

/// A submitted link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(rename = "_id")]
    pub id: LinkId,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub posted_by: Option<PostedBy>,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
    /// `free` or `paid`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// `video` or `book`.
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body of `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Body of a successful `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Body of `POST /register`. The backend emails an activation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub categories: Vec<CategoryId>,
}

/// Body of `PUT /user`. An empty password leaves the password unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub categories: Vec<CategoryId>,
}

/// Body of `PUT /reset-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReset {
    /// The token from the emailed reset link.
    pub reset_password_link: String,
    pub new_password: String,
}

/// The `{ "message": ... }` body most write endpoints answer with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}
