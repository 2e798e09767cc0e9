//! Breast cancer prediction service
//!
//! Serves a pre-trained random forest over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  PREDICTION SERVER                       │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌────────────┐  ┌─────────────────────┐  │
//! │  │  HTTP     │  │  Input     │  │  Prediction         │  │
//! │  │  Surface  │─▶│  Validator │─▶│  Service            │  │
//! │  │  (Axum)   │  │            │  │  scaler → forest    │  │
//! │  └───────────┘  └────────────┘  └──────────┬──────────┘  │
//! │                                            ▼             │
//! │                                   ┌────────────────┐     │
//! │                                   │ Model artifacts│     │
//! │                                   │ (loaded once)  │     │
//! │                                   └────────────────┘     │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod service;
pub mod validation;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Largest request body accepted, in bytes
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use model::{ModelArtifacts, ModelHandle};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub model: ModelHandle,
    pub config: Config,
}

impl AppState {
    pub fn new(model: ModelHandle, config: Config) -> Self {
        Self { model, config }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    with_layers(routes(), state)
}

/// Endpoint table, without fallbacks or middleware
pub fn routes() -> Router<AppState> {
    use handlers::fallback::method_not_allowed;

    Router::new()
        .route("/", get(handlers::health::check).fallback(method_not_allowed))
        .route("/predict", post(handlers::predict::predict).fallback(method_not_allowed))
        .route("/model-info", get(handlers::model_info::describe).fallback(method_not_allowed))
}

/// Add the 404 fallback and the middleware stack, then bind the state
pub fn with_layers(router: Router<AppState>, state: AppState) -> Router {
    router
        .fallback(handlers::fallback::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::custom(handlers::fallback::handle_panic))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
