use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

#[cfg(feature = "web-frontend")]
use axum::{
    body::Body,
    http::{header, HeaderValue},
};

use crate::config::Config;
#[cfg(feature = "web-frontend")]
use crate::constants::POLL_INTERVAL_MS;
use crate::scheduler::ReplayScheduler;
use crate::store::TableStore;

#[cfg(feature = "web-frontend")]
const INDEX_HTML: &str = include_str!("../app/index.html");

#[cfg(feature = "web-frontend")]
const STYLE_CSS: &str = include_str!("../app/style.css");

#[cfg(feature = "web-frontend")]
const MAIN_JS: &str = include_str!("../app/main.js");

/// Placeholder in index.html replaced with the runtime config blob
#[cfg(feature = "web-frontend")]
const CONFIG_PLACEHOLDER: &str = "<!--REPLAY_CONFIG-->";

// State for the API handlers
pub struct AppState {
    pub store: Arc<TableStore>,
    pub scheduler: ReplayScheduler,
    pub freshness_window_ms: i64,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let store = Arc::new(TableStore::new(config.table_count, &config.stream_url));
        let scheduler = ReplayScheduler::new(
            Arc::clone(&store),
            Duration::from_millis(config.replay_delay_ms),
            config.replay_url.clone(),
        );
        Self {
            store,
            scheduler,
            freshness_window_ms: config.freshness_window_ms,
        }
    }
}

/// Assemble the full router. Public so tests can run it against an isolated
/// store on an ephemeral port.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/tables", get(tables_handler))
        .route("/api/tables/{id}", get(table_handler))
        .route("/api/tables/{id}/trigger", post(trigger_handler))
        .route("/", get(index_handler))
        .route("/assets/{file}", get(assets_handler))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server and block until it exits
pub fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("Pool replay server");
    println!(
        "Tables: {}  Replay delay: {}ms",
        config.table_count, config.replay_delay_ms
    );
    println!("Listening on: http://[::]:{} (IPv4 + IPv6)", config.port);
    println!("Endpoints:");
    println!("  GET  /api/tables  - All tables, id order");
    println!("  GET  /api/tables/:id  - One table");
    println!("  POST /api/tables/:id/trigger  - Request replay generation");
    if cfg!(feature = "web-frontend") {
        println!("  GET  /  - Web frontend");
    }

    let port = config.port;
    let state = Arc::new(AppState::from_config(&config));

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let app = build_router(state);

        let listener = tokio::net::TcpListener::bind(format!("[::]:{}", port))
            .await
            .map_err(|e| format!("Failed to bind to port {}: {}", port, e))?;
        axum::serve(listener, app)
            .await
            .map_err(|e| format!("Server error: {}", e))?;

        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

fn not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Table not found" })),
    )
        .into_response()
}

/// Path params arrive as strings; anything that does not parse as a table id
/// gets the same 404 as an unknown id rather than a 400.
fn parse_table_id(raw: &str) -> Option<u32> {
    raw.parse().ok()
}

async fn tables_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.list())
}

async fn table_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match parse_table_id(&id).and_then(|id| state.store.get(id)) {
        Some(table) => Json(table).into_response(),
        None => not_found_response(),
    }
}

async fn trigger_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let Some(id) = parse_table_id(&id) else {
        return not_found_response();
    };

    // Fire-and-forget: the acknowledgement goes out before the delayed
    // completion; clients observe the flip via polling.
    match state.scheduler.schedule(id) {
        Ok(()) => Json(json!({
            "status": "processing",
            "message": "Replay generation started",
        }))
        .into_response(),
        Err(_) => not_found_response(),
    }
}

#[cfg(feature = "web-frontend")]
async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    let config_script = format!(
        "<script>window.__REPLAY_CONFIG__ = {};</script>",
        json!({
            "freshnessWindowMs": state.freshness_window_ms,
            "pollIntervalMs": POLL_INTERVAL_MS,
        })
    );
    let html = INDEX_HTML.replace(CONFIG_PLACEHOLDER, &config_script);

    let mut response = Response::new(Body::from(html));
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html"));
    response
}

#[cfg(not(feature = "web-frontend"))]
async fn index_handler(State(_state): State<Arc<AppState>>) -> Response {
    (
        StatusCode::NOT_FOUND,
        "Web frontend not available in this build",
    )
        .into_response()
}

#[cfg(feature = "web-frontend")]
async fn assets_handler(Path(file): Path<String>) -> Response {
    let (content, mime_type) = match file.as_str() {
        "style.css" => (STYLE_CSS, "text/css"),
        "main.js" => (MAIN_JS, "application/javascript"),
        _ => {
            return (StatusCode::NOT_FOUND, "Asset not found").into_response();
        }
    };

    let mut response = Response::new(Body::from(content));
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(mime_type));
    response
}

#[cfg(not(feature = "web-frontend"))]
async fn assets_handler(Path(_file): Path<String>) -> Response {
    (
        StatusCode::NOT_FOUND,
        "Web frontend not available in this build",
    )
        .into_response()
}
