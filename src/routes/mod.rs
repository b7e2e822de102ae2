// src/routes/mod.rs
pub mod auth;
pub mod chat;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::{chat_handler, get_metrics_handler, health_handler, history_handler, public_chat_handler};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    let chat_routes = Router::new()
        .route("/message", post(chat_handler))
        .route("/public", post(public_chat_handler))
        .route("/history", get(history_handler));

    Router::new()
        .nest("/chat", chat_routes)
        .route("/admin/metrics", get(get_metrics_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}
