#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use rootscale_store::{DimensionStore, JsonFileBackend};
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

mod config;
mod http;

pub use config::{validate_startup_config, ServerConfig};

pub const CRATE_NAME: &str = "rootscale-server";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DimensionStore>,
    pub config: ServerConfig,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    /// State backed by the JSON file named in `config`.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let backend = Arc::new(JsonFileBackend::new(config.dimensions_file.clone()));
        Self::with_store(Arc::new(DimensionStore::new(backend)), config)
    }

    #[must_use]
    pub fn with_store(store: Arc<DimensionStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(http::handlers::index_handler).post(http::handlers::index_handler),
        )
        .route("/save", post(http::handlers::save_handler))
        .route("/delete/:index", post(http::handlers::delete_handler))
        .route("/rename/:index", post(http::handlers::rename_handler))
        .route(
            "/update_group/:index",
            post(http::handlers::update_group_handler),
        )
        .route("/add_group", post(http::handlers::add_group_handler))
        .route("/reorder", post(http::handlers::reorder_handler))
        .route(
            "/reorder_groups",
            post(http::handlers::reorder_groups_handler),
        )
        .route("/healthz", get(http::handlers::healthz_handler))
        .route("/v1/version", get(http::handlers::version_handler))
        .layer(from_fn_with_state(
            state.clone(),
            http::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .with_state(state)
}
