//! Web router using Axum

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use ionsnav_core::MenuStore;
use ionsnav_menu::render::icons::placeholder_logo_svg;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::page::DemoPage;
use crate::sse;

/// Request query string as ordered pairs, repeated keys kept
type QueryPairs = Query<Vec<(String, String)>>;

/// Server options that are not part of the header configuration
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Directory holding the wasm bundle, served under `/pkg`
    pub pkg_dir: PathBuf,
    /// Demo page reloads itself when the menu or assets change
    pub live_reload: bool,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            pkg_dir: PathBuf::from("pkg"),
            live_reload: true,
        }
    }
}

#[derive(Clone)]
struct AppState {
    store: Arc<MenuStore>,
    live_reload: bool,
}

/// Create the web router
pub fn create_router(store: Arc<MenuStore>, options: ServeOptions) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        store,
        live_reload: options.live_reload,
    };

    Router::new()
        .route("/", get(page_handler))
        .route("/header", get(header_handler))
        .route("/assets/ionsnav.css", get(stylesheet_handler))
        .route("/assets/logo", get(logo_handler))
        .route("/api/menu", get(menu_handler))
        .route("/api/health", get(health_handler))
        .route("/api/events", get(sse_handler))
        .nest_service("/pkg", ServeDir::new(options.pkg_dir))
        .layer(cors)
        .with_state(state)
}

/// Demo page: the header on an otherwise empty document
async fn page_handler(State(state): State<AppState>, Query(params): QueryPairs) -> Html<String> {
    let store = &state.store;
    let page = DemoPage {
        brand: store.config().brand.clone(),
        header: store.render_header(params).into_string(),
        status: store.degraded_state().status(),
        live_reload: state.live_reload,
    };
    Html(page.render())
}

/// Header fragment for embedding into another page
async fn header_handler(State(state): State<AppState>, Query(params): QueryPairs) -> Html<String> {
    Html(state.store.render_header(params).into_string())
}

async fn stylesheet_handler(State(state): State<AppState>) -> Response {
    let css = state.store.assets().stylesheet.css;
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css).into_response()
}

/// Logo from disk, or the generated placeholder when none was found
async fn logo_handler(State(state): State<AppState>) -> Response {
    match state.store.assets().logo {
        Some(logo) => ([(header::CONTENT_TYPE, logo.content_type)], logo.bytes).into_response(),
        None => {
            let svg = placeholder_logo_svg(&state.store.config().initials());
            ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response()
        }
    }
}

async fn menu_handler(State(state): State<AppState>) -> Response {
    Json(state.store.tree()).into_response()
}

async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let store = &state.store;
    let report = store.last_report();
    let (warnings, errors, fatal) = report.error_count();

    let issues: Vec<_> = report
        .errors
        .iter()
        .map(|e| {
            serde_json::json!({
                "source": e.source,
                "severity": e.severity.as_str(),
                "message": e.message,
                "suggestion": e.suggestion,
            })
        })
        .collect();

    Json(serde_json::json!({
        "status": store.degraded_state().status(),
        "menu_items": store.tree().len(),
        "menu_loaded": report.menu_loaded,
        "stylesheet_inlined": report.stylesheet_inlined,
        "logo_placeholder": report.logo_placeholder,
        "warnings": warnings,
        "errors": errors,
        "fatal": fatal,
        "issues": issues,
    }))
}

/// SSE endpoint for live reload
async fn sse_handler(
    State(state): State<AppState>,
) -> axum::response::Sse<
    impl futures::stream::Stream<
        Item = Result<axum::response::sse::Event, std::convert::Infallible>,
    >,
> {
    sse::create_sse_stream(state.store.event_bus().clone())
}
