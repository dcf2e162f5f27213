use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use calldesk_store::Store;

mod agents;
mod error;
mod summaries;
mod transcripts;

pub use error::ApiError;

// ── Config ──

pub struct ServeConfig {
    pub bind: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Origin allowed to call the API with credentials. `None` allows any
    /// origin without credentials.
    pub frontend_url: Option<String>,
}

pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

// ── App State ──

pub(crate) struct AppState {
    pub(crate) store: Store,
}

pub(crate) type SharedState = Arc<AppState>;

// ── Response Envelope ──

/// Every successful response: `{ success, message?, count?, data? }`.
#[derive(Serialize)]
pub(crate) struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T> Envelope<T> {
    pub(crate) fn data(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            count: None,
            data: Some(data),
        })
    }

    pub(crate) fn with_message(message: &'static str, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message),
            count: None,
            data: Some(data),
        })
    }
}

impl<T> Envelope<Vec<T>> {
    pub(crate) fn list(items: Vec<T>) -> Json<Self> {
        Json(Self {
            success: true,
            message: None,
            count: Some(items.len()),
            data: Some(items),
        })
    }
}

impl Envelope<()> {
    pub(crate) fn message(message: &'static str) -> Json<Self> {
        Json(Self {
            success: true,
            message: Some(message),
            count: None,
            data: None,
        })
    }
}

// ── Entrypoint ──

pub async fn serve(config: ServeConfig) -> anyhow::Result<()> {
    let store = Store::open(&config.data_dir)?;
    let app = router(store, config.frontend_url.as_deref());

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        data_dir = %config.data_dir.display(),
        "calldesk backend listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the router (for testing without binding to a port).
pub fn router(store: Store, frontend_url: Option<&str>) -> Router {
    let state = Arc::new(AppState { store });
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/transcripts",
            get(transcripts::list).post(transcripts::create),
        )
        .route(
            "/api/transcripts/{id}",
            get(transcripts::get_one).delete(transcripts::delete),
        )
        .route("/api/summaries", get(summaries::list))
        .route("/api/summaries/{call_id}", get(summaries::get_one))
        .route(
            "/api/summaries/{call_id}/regenerate",
            post(summaries::regenerate),
        )
        .route("/api/agents", get(agents::list).post(agents::create))
        .route("/api/agents/{id}", get(agents::get_one))
        .layer(cors_layer(frontend_url))
        .with_state(state)
}

fn cors_layer(frontend_url: Option<&str>) -> CorsLayer {
    let Some(url) = frontend_url else {
        return CorsLayer::permissive();
    };
    match url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]),
        Err(_) => {
            tracing::warn!(frontend_url = url, "invalid frontend origin, allowing any origin");
            CorsLayer::permissive()
        }
    }
}

// ── Health ──

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "message": "Backend is healthy",
        "timestamp": calldesk_core::now_rfc3339(),
    }))
}

// ── Tests ──
