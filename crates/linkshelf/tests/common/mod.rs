//! A fake Linkshelf backend on a random local port.
//!
//! Tokens it knows: `sub-token` (subscriber), `admin-token` (admin).
//! `broken` makes `GET /user` fail with a 500; anything else is a 401.
//! The `rust` category holds [`LINK_COUNT`] links; so does `POST /links`.
//! Link `l{i}` starts with `i` clicks; the popular lists are the top
//! [`POPULAR_COUNT`] by clicks.

#![allow(dead_code)]

use std::cmp::Reverse;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

pub const LINK_COUNT: usize = 45;
pub const POPULAR_COUNT: usize = 3;

type Reply = (StatusCode, Json<Value>);

#[derive(Clone)]
pub struct Fake {
    links: Arc<Vec<Value>>,
    whoami_calls: Arc<AtomicUsize>,
    list_calls: Arc<AtomicUsize>,
    clicks: Arc<Mutex<Vec<u64>>>,
}

impl Fake {
    pub fn whoami_calls(&self) -> usize {
        self.whoami_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn clicks(&self, i: usize) -> u64 {
        self.clicks.lock().unwrap()[i]
    }

    fn popular(&self) -> Value {
        let clicks = self.clicks.lock().unwrap();
        let mut order: Vec<usize> = (0..LINK_COUNT).collect();
        order.sort_by_key(|&i| Reverse(clicks[i]));
        order
            .into_iter()
            .take(POPULAR_COUNT)
            .map(|i| {
                let mut link = link(i);
                link["clicks"] = json!(clicks[i]);
                link
            })
            .collect()
    }
}

/// Starts the fake and returns its API base URL (`http://127.0.0.1:PORT/api`).
pub async fn start() -> (String, Fake) {
    let fake = Fake {
        links: Arc::new((0..LINK_COUNT).map(link).collect()),
        whoami_calls: Arc::new(AtomicUsize::new(0)),
        list_calls: Arc::new(AtomicUsize::new(0)),
        clicks: Arc::new(Mutex::new((0..LINK_COUNT as u64).collect())),
    };

    let app = Router::new()
        .route("/api/user", get(whoami).put(update_profile))
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/api/register/activate", post(activate))
        .route("/api/forgot-password", put(forgot_password))
        .route("/api/reset-password", put(reset_password))
        .route("/api/categories", get(categories))
        .route("/api/category/{slug}", post(category))
        .route("/api/links", post(links))
        .route("/api/link/{id}", get(single_link))
        .route("/api/link/popular", get(popular))
        .route("/api/link/popular/{slug}", get(popular_in))
        .route("/api/click-count", put(click_count))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api"), fake)
}

/// A base URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

pub fn link(i: usize) -> Value {
    json!({
        "_id": format!("l{i}"),
        "title": format!("Link {i}"),
        "url": format!("https://example.com/{i}"),
        "slug": format!("https://example.com/{i}"),
        "postedBy": { "_id": "u1", "name": "Ada" },
        "categories": [{ "_id": "c1", "name": "Rust", "slug": "rust" }],
        "type": "free",
        "medium": "video",
        "clicks": i,
    })
}

fn user(role: &str) -> Value {
    json!({
        "_id": format!("{role}-1"),
        "name": if role == "admin" { "Root" } else { "Ada" },
        "email": format!("{role}@example.com"),
        "role": role,
        "categories": ["c1"],
    })
}

fn error(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({ "error": message })))
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn page(all: &[Value], body: &Value) -> Vec<Value> {
    let skip = body["skip"].as_u64().unwrap_or(0) as usize;
    let limit = body["limit"].as_u64().unwrap_or(0) as usize;
    all.iter().skip(skip).take(limit).cloned().collect()
}

async fn whoami(State(fake): State<Fake>, headers: HeaderMap) -> Reply {
    fake.whoami_calls.fetch_add(1, Ordering::SeqCst);
    match bearer(&headers) {
        Some("sub-token") => (
            StatusCode::OK,
            Json(json!({ "user": user("subscriber"), "links": [link(0), link(1)] })),
        ),
        Some("admin-token") => (StatusCode::OK, Json(json!({ "user": user("admin"), "links": [] }))),
        Some("broken") => error(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable"),
        _ => error(StatusCode::UNAUTHORIZED, "jwt expired"),
    }
}

async fn update_profile(headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    if bearer(&headers) != Some("sub-token") {
        return error(StatusCode::UNAUTHORIZED, "jwt expired");
    }
    let mut updated = user("subscriber");
    updated["name"] = body["name"].clone();
    updated["categories"] = body["categories"].clone();
    (StatusCode::OK, Json(updated))
}

async fn login(Json(body): Json<Value>) -> Reply {
    let token = match (body["email"].as_str(), body["password"].as_str()) {
        (Some("subscriber@example.com"), Some("secret")) => "sub-token",
        (Some("admin@example.com"), Some("secret")) => "admin-token",
        _ => return error(StatusCode::BAD_REQUEST, "Email and password do not match"),
    };
    let role = if token == "admin-token" { "admin" } else { "subscriber" };
    (StatusCode::OK, Json(json!({ "token": token, "user": user(role) })))
}

async fn register(Json(body): Json<Value>) -> Reply {
    if body["email"] == "taken@example.com" {
        return error(StatusCode::BAD_REQUEST, "Email is taken");
    }
    let email = body["email"].as_str().unwrap_or_default();
    (
        StatusCode::OK,
        Json(json!({ "message": format!("Email has been sent to {email}, Follow the instructions to complete your registration") })),
    )
}

async fn activate(Json(body): Json<Value>) -> Reply {
    match body["token"].as_str() {
        Some("valid") => (StatusCode::OK, Json(json!({ "message": "Registration success. Please login." }))),
        _ => error(StatusCode::UNAUTHORIZED, "Expired link. Try again"),
    }
}

async fn forgot_password(Json(body): Json<Value>) -> Reply {
    let email = body["email"].as_str().unwrap_or_default();
    (StatusCode::OK, Json(json!({ "message": format!("Email has been sent to {email}") })))
}

async fn reset_password(Json(body): Json<Value>) -> Reply {
    if body["resetPasswordLink"].as_str() == Some("reset-token") && body["newPassword"].is_string() {
        (StatusCode::OK, Json(json!({ "message": "Great! Now you can login with your new password" })))
    } else {
        error(StatusCode::BAD_REQUEST, "Invalid token. Try again")
    }
}

async fn categories() -> Reply {
    (
        StatusCode::OK,
        Json(json!([
            { "_id": "c1", "name": "Rust", "slug": "rust", "content": "<p>Systems</p>",
              "image": { "url": "https://img.example.com/rust.png", "key": "category/rust.png" } },
            { "_id": "c2", "name": "Go", "slug": "go", "content": "" },
        ])),
    )
}

async fn category(State(fake): State<Fake>, Path(slug): Path<String>, Json(body): Json<Value>) -> Reply {
    fake.list_calls.fetch_add(1, Ordering::SeqCst);
    match slug.as_str() {
        "rust" => (
            StatusCode::OK,
            Json(json!({
                "category": { "_id": "c1", "name": "Rust", "slug": "rust", "content": "<p>Systems</p>" },
                "links": page(&fake.links, &body),
            })),
        ),
        "empty" => (
            StatusCode::OK,
            Json(json!({ "category": { "_id": "c3", "name": "Empty", "slug": "empty" }, "links": [] })),
        ),
        _ => error(StatusCode::BAD_REQUEST, "Could not load category"),
    }
}

async fn links(State(fake): State<Fake>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    fake.list_calls.fetch_add(1, Ordering::SeqCst);
    match bearer(&headers) {
        None | Some("admin-token") => (StatusCode::OK, Json(Value::Array(page(&fake.links, &body)))),
        Some(_) => error(StatusCode::FORBIDDEN, "Admin resource. Access denied"),
    }
}

async fn single_link(Path(id): Path<String>) -> (StatusCode, String) {
    match id.as_str() {
        "gone" => (StatusCode::NOT_FOUND, "not here".to_string()),
        "garbled" => (StatusCode::OK, r#"{"unexpected":true}"#.to_string()),
        _ => match id.strip_prefix('l').and_then(|n| n.parse::<usize>().ok()) {
            Some(n) if n < LINK_COUNT => (StatusCode::OK, link(n).to_string()),
            _ => (StatusCode::BAD_REQUEST, json!({ "error": "Error finding link" }).to_string()),
        },
    }
}

async fn popular(State(fake): State<Fake>) -> Reply {
    (StatusCode::OK, Json(fake.popular()))
}

async fn popular_in(State(fake): State<Fake>, Path(slug): Path<String>) -> Reply {
    match slug.as_str() {
        "rust" => (StatusCode::OK, Json(fake.popular())),
        _ => (StatusCode::OK, Json(json!([]))),
    }
}

async fn click_count(State(fake): State<Fake>, Json(body): Json<Value>) -> Reply {
    let index = body["linkId"]
        .as_str()
        .and_then(|id| id.strip_prefix('l'))
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|&n| n < LINK_COUNT);
    let Some(i) = index else {
        return error(StatusCode::BAD_REQUEST, "Could not update view count");
    };
    let mut clicks = fake.clicks.lock().unwrap();
    clicks[i] += 1;
    let mut updated = link(i);
    updated["clicks"] = json!(clicks[i]);
    (StatusCode::OK, Json(updated))
}
