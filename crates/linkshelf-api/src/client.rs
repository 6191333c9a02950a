//! HTTP client for the Linkshelf backend.
//!
//! One method per endpoint the core uses. Every method funnels through
//! [`HttpBackend::send`], which maps the three ways a call can go wrong onto
//! [`ApiError`]: no response at all, a non-2xx status, or a body that
//! doesn't decode. Timeouts belong to the underlying `reqwest::Client`.

use reqwest::{Client, RequestBuilder, Url};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::{
    ApiError, Category, CategoryPage, Credentials, Identity, Link, LinkId,
    LoginResponse, Message, PageRequest, PasswordReset, ProfileUpdate,
    Registration, User,
};

/// Shape of the backend's error bodies.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// A client for one backend, rooted at its API base URL
/// (e.g. `https://api.example.com/api`).
///
/// Cheap to clone: `reqwest::Client` is reference counted internally.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base: Url,
    client: Client,
}

impl HttpBackend {
    /// Creates a client for `base` with a default `reqwest::Client`.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidBaseUrl`] if `base` isn't an absolute
    /// http(s) URL.
    pub fn new(base: &str) -> Result<Self, ApiError> {
        Self::with_client(base, Client::new())
    }

    /// Creates a client for `base` that sends through `client`.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidBaseUrl`] if `base` isn't an absolute
    /// http(s) URL.
    pub fn with_client(base: &str, client: Client) -> Result<Self, ApiError> {
        let base = Url::parse(base).map_err(|e| ApiError::InvalidBaseUrl(format!("{base}: {e}")))?;
        if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(base.to_string()));
        }
        Ok(Self { base, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    // -- Session ----------------------------------------------------------

    /// `GET /user`: who does this token belong to?
    pub async fn whoami(&self, token: &str) -> Result<Identity, ApiError> {
        let url = self.endpoint(&["user"])?;
        self.send(self.client.get(url).bearer_auth(token)).await
    }

    /// `POST /login`: exchanges credentials for a token and profile.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint(&["login"])?;
        self.send(self.client.post(url).json(credentials)).await
    }

    /// `POST /register`: starts registration; the backend emails an
    /// activation link.
    pub async fn register(&self, registration: &Registration) -> Result<Message, ApiError> {
        let url = self.endpoint(&["register"])?;
        self.send(self.client.post(url).json(registration)).await
    }

    /// `POST /register/activate`: completes registration with the token
    /// from the activation link.
    pub async fn activate(&self, token: &str) -> Result<Message, ApiError> {
        #[derive(Serialize)]
        struct Body<'a> {
            token: &'a str,
        }

        let url = self.endpoint(&["register", "activate"])?;
        self.send(self.client.post(url).json(&Body { token })).await
    }

    /// `PUT /forgot-password`: emails a password reset link.
    pub async fn forgot_password(&self, email: &str) -> Result<Message, ApiError> {
        #[derive(Serialize)]
        struct Body<'a> {
            email: &'a str,
        }

        let url = self.endpoint(&["forgot-password"])?;
        self.send(self.client.put(url).json(&Body { email })).await
    }

    /// `PUT /reset-password`: sets a new password using a reset token.
    pub async fn reset_password(&self, reset: &PasswordReset) -> Result<Message, ApiError> {
        let url = self.endpoint(&["reset-password"])?;
        self.send(self.client.put(url).json(reset)).await
    }

    /// `PUT /user`: updates the signed-in user's profile and returns it.
    pub async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<User, ApiError> {
        let url = self.endpoint(&["user"])?;
        self.send(self.client.put(url).bearer_auth(token).json(update)).await
    }

    // -- Directory --------------------------------------------------------

    /// `GET /categories`: every category, for the home page.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let url = self.endpoint(&["categories"])?;
        self.send(self.client.get(url)).await
    }

    /// `POST /category/{slug}`: a category and one page of its links.
    pub async fn category_page(&self, slug: &str, page: PageRequest) -> Result<CategoryPage, ApiError> {
        let url = self.endpoint(&["category", slug])?;
        self.send(self.client.post(url).json(&page)).await
    }

    /// `POST /links`: one page of every link. The admin view sends a
    /// bearer token.
    pub async fn links(&self, token: Option<&str>, page: PageRequest) -> Result<Vec<Link>, ApiError> {
        let url = self.endpoint(&["links"])?;
        let mut request = self.client.post(url).json(&page);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        self.send(request).await
    }

    /// `GET /link/{id}`: a single link, for the edit form.
    pub async fn link(&self, id: &LinkId) -> Result<Link, ApiError> {
        let url = self.endpoint(&["link", &id.0])?;
        self.send(self.client.get(url)).await
    }

    /// `GET /link/popular`: the most clicked links across the directory.
    pub async fn popular(&self) -> Result<Vec<Link>, ApiError> {
        let url = self.endpoint(&["link", "popular"])?;
        self.send(self.client.get(url)).await
    }

    /// `GET /link/popular/{slug}`: the most clicked links in one category.
    pub async fn popular_in(&self, slug: &str) -> Result<Vec<Link>, ApiError> {
        let url = self.endpoint(&["link", "popular", slug])?;
        self.send(self.client.get(url)).await
    }

    /// `PUT /click-count`: counts one visit to a link. The backend's reply
    /// is not needed and only has to be valid JSON.
    pub async fn record_click(&self, id: &LinkId) -> Result<(), ApiError> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            link_id: &'a str,
        }

        let url = self.endpoint(&["click-count"])?;
        let _: IgnoredAny = self.send(self.client.put(url).json(&Body { link_id: &id.0 })).await?;
        Ok(())
    }

    // -- Plumbing ---------------------------------------------------------

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(ApiError::Transport)?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.bytes().await.map_err(ApiError::Transport)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            tracing::debug!(%url, status = status.as_u16(), %message, "backend rejected request");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        tracing::trace!(%url, status = status.as_u16(), bytes = body.len(), "backend response");
        serde_json::from_slice(&body).map_err(ApiError::Decode)
    }
}
