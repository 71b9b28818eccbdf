pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod validation;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::database::CategoryRepository;
use crate::middleware::{auth_gate, SharedAuthorizer};
use crate::services::CategoryService;

/// Per-router state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub categories: CategoryService,
    /// Present when backed by Postgres; used by the health check
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn new(repository: Arc<dyn CategoryRepository>, pool: Option<PgPool>) -> Self {
        Self {
            categories: CategoryService::new(repository),
            pool,
        }
    }
}

/// Routes wrapped by the auth gate. Every request, matched or not, passes
/// through `authorizer` first.
pub fn router(state: AppState, authorizer: SharedAuthorizer) -> Router {
    use handlers::category;

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/categories",
            get(category::list).post(category::create),
        )
        .route(
            "/api/categories/:id",
            get(category::get)
                .put(category::update)
                .delete(category::delete),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(from_fn_with_state(authorizer, auth_gate))
}

/// Full application: gated router plus the configured outer layers
pub fn app(state: AppState, authorizer: SharedAuthorizer, config: &AppConfig) -> Router {
    let mut app = router(state, authorizer);

    if config.security.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}
