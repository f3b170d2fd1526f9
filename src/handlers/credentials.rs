use crate::AppState;
use crate::error::AppError;
use crate::services::Credential;
use crate::validation::validate_required;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StoreCredentialPayload {
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
}

pub async fn store_credential(
    State(state): State<AppState>,
    Json(payload): Json<StoreCredentialPayload>,
) -> Result<impl IntoResponse, AppError> {
    validate_required("username", &payload.username)
        .map_err(|e| AppError::MissingFields(e.to_string()))?;
    validate_required("email", &payload.email)
        .map_err(|e| AppError::MissingFields(e.to_string()))?;

    state
        .credentials
        .store(Credential {
            username: payload.username,
            password: payload.password,
            email: payload.email,
            name: payload.name,
            stored_at: Utc::now(),
        })
        .await;

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "success": true }))))
}

pub async fn list_credentials(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.credentials.all().await)
}
