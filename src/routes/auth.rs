// src/routes/auth.rs
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, state::SharedState};

/// Identity resolved from `Authorization: Bearer <token>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(pub String);

impl FromRequestParts<SharedState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &SharedState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

        state
            .identity_for_token(token)
            .map(|id| Identity(id.to_string()))
            .ok_or_else(|| AppError::Unauthorized("Invalid token".to_string()))
    }
}

/// Guard for admin routes: `x-admin-key` must equal the configured key.
#[derive(Debug)]
pub struct AdminAccess;

impl FromRequestParts<SharedState> for AdminAccess {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &SharedState) -> Result<Self, Self::Rejection> {
        match (&state.config.admin_key, parts.headers.get("x-admin-key")) {
            (Some(expected), Some(val)) if val == expected.as_str() => Ok(AdminAccess),
            _ => Err(AppError::Unauthorized("Admin key required".to_string())),
        }
    }
}
