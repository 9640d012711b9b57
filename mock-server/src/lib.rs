use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;

/// Minimal PNG signature plus an IHDR chunk header; enough to look like an image.
pub const AVATAR_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
];

/// Names served under `/images/`.
const IMAGES: &[&str] = &["avatar1.png", "avatar2.png"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub age: u32,
    pub loc: String,
    pub about_me: String,
    pub profile_pic_url: Option<String>,
}

/// Per-server counters, shared with tests.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    image_hits: Arc<AtomicUsize>,
}

impl AppState {
    pub fn image_hits(&self) -> usize {
        self.image_hits.load(Ordering::SeqCst)
    }
}

pub fn sample_users() -> Vec<User> {
    vec![
        User {
            user_id: 1,
            name: "Maya".to_string(),
            age: 27,
            loc: "Brooklyn, NY".to_string(),
            about_me: "Looking for someone to split dumplings with.".to_string(),
            profile_pic_url: Some("images/avatar1.png".to_string()),
        },
        User {
            user_id: 2,
            name: "Theo".to_string(),
            age: 31,
            loc: "Austin, TX".to_string(),
            about_me: "Climber, bad cook, good listener.".to_string(),
            profile_pic_url: None,
        },
    ]
}

pub fn app() -> Router {
    router(AppState::default())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/downapp/sample/main/sample.json", get(list_users))
        .route("/downapp/visitors", get(list_visitors))
        .route("/downapp/echo", post(echo))
        .route("/images/{name}", get(get_image))
        .route("/status/{code}", get(status))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, router: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, router).await
}

async fn list_users() -> Json<Vec<User>> {
    Json(sample_users())
}

async fn list_visitors() -> Json<Vec<User>> {
    Json(Vec::new())
}

async fn echo(Json(payload): Json<Value>) -> Json<Vec<Value>> {
    match payload {
        Value::Array(items) => Json(items),
        other => Json(vec![other]),
    }
}

async fn get_image(State(state): State<AppState>, Path(name): Path<String>) -> impl IntoResponse {
    state.image_hits.fetch_add(1, Ordering::SeqCst);
    if IMAGES.contains(&name.as_str()) {
        log::debug!("serving image {name}");
        Ok(([(header::CONTENT_TYPE, "image/png")], AVATAR_PNG))
    } else {
        Err(StatusCode::NOT_FOUND)
    }
}

async fn status(Path(code): Path<u16>) -> (StatusCode, Json<Vec<User>>) {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST);
    (status, Json(Vec::new()))
}
