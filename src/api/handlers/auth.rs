use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use crate::api::AppState;
use crate::auth::password;
use crate::error::{AppError, AppResult};

#[derive(Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<&'static str> {
    // Pre-check for a friendly message; the unique index catches the race.
    if state
        .store
        .find_auth_user_by_email(&req.email)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Email already registered.".to_string()));
    }

    let password_hash = password::hash(&req.password)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

    state
        .store
        .insert_auth_user(&req.email, &password_hash)
        .await?;
    Ok("Registered Successfully")
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<&'static str> {
    let user = state
        .store
        .find_auth_user_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::AuthFailed("User not found".to_string()))?;

    if !password::verify(&req.password, &user.password_hash) {
        return Err(AppError::AuthFailed("Wrong password".to_string()));
    }

    Ok("Login Success")
}
