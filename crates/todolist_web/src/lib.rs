//! HTTP surface for session-scoped todo lists.
//!
//! # Responsibility
//! - Map routes onto `todolist_core` list operations.
//! - Carry all user state in an encrypted session cookie.
//!
//! # Invariants
//! - No state is shared between sessions; `AppState` holds only the cookie key.
//! - Handlers never panic on stale or malformed ids.

pub mod config;
pub mod error;
pub mod handlers;
pub mod session;
pub mod views;

use axum::extract::{FromRef, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use axum_extra::extract::cookie::Key;
use log::{info, warn};
use std::time::Instant;

pub use config::{ConfigError, ServerConfig};
pub use error::{WebError, WebResult};
pub use session::{Flash, Session, SESSION_COOKIE};

/// Shared router state.
#[derive(Clone)]
pub struct AppState {
    key: Key,
}

impl AppState {
    pub fn new(key: Key) -> Self {
        Self { key }
    }

    /// Builds state from server configuration.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.session_key()?))
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

/// Builds the application router with all routes and request logging.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(
            "/lists",
            get(handlers::lists_index).post(handlers::create_list),
        )
        .route("/lists/new", get(handlers::new_list_form))
        .route(
            "/lists/:list_id",
            get(handlers::show_list).post(handlers::update_list),
        )
        .route("/lists/:list_id/edit", get(handlers::edit_list_form))
        .route("/lists/:list_id/delete", post(handlers::delete_list))
        .route("/lists/:list_id/complete", post(handlers::complete_all))
        .route("/lists/:list_id/todos", post(handlers::add_todo))
        .route(
            "/lists/:list_id/todos/:todo_id",
            post(handlers::update_todo),
        )
        .route(
            "/lists/:list_id/todos/:todo_id/delete",
            post(handlers::delete_todo),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Logs one line per request with method, path, status and latency.
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let http_status = response.status();
    let elapsed_ms = started.elapsed().as_millis();
    if http_status.is_server_error() {
        warn!(
            "event=http_request module=web status=error method={method} path={path} http_status={} elapsed_ms={elapsed_ms}",
            http_status.as_u16()
        );
    } else {
        info!(
            "event=http_request module=web status=ok method={method} path={path} http_status={} elapsed_ms={elapsed_ms}",
            http_status.as_u16()
        );
    }
    response
}
