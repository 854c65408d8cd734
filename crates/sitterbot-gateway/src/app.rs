use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use sitterbot_bot::Dispatcher;

/// State shared by every handler.
pub struct AppState {
    pub dispatcher: Dispatcher,
}

/// Assemble the full Axum router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(crate::http::health::health_handler))
        .route("/sms", post(crate::http::sms::sms_handler))
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
