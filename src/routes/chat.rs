use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, HistoryResponse},
    routes::auth::{AdminAccess, Identity},
    services::{chat_service::validate_message, metrics_manager::MetricsData},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    Identity(identity): Identity,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload?;
    let message = validate_message(payload.message.as_ref())?;
    let response = state.chat.respond(Some(&identity), message).await;
    Ok(Json(ChatResponse { response }))
}

pub async fn public_chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload?;
    let message = validate_message(payload.message.as_ref())?;
    let response = state.chat.respond(None, message).await;
    Ok(Json(ChatResponse { response }))
}

pub async fn history_handler(
    State(state): State<SharedState>,
    Identity(identity): Identity,
) -> Result<Json<HistoryResponse>, AppError> {
    let history = state.chat.history(&identity).await?;
    Ok(Json(HistoryResponse { history }))
}

pub async fn get_metrics_handler(
    State(state): State<SharedState>,
    _admin: AdminAccess,
) -> Json<MetricsData> {
    Json(state.chat.metrics().get_metrics().await)
}

pub async fn health_handler(State(state): State<SharedState>) -> (StatusCode, &'static str) {
    match state.chat.health_check().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            tracing::warn!("history store unhealthy: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
        }
    }
}
