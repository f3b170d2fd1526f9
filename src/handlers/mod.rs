pub mod checkout;
pub mod credentials;
pub mod transactions;

use crate::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

pub async fn health() -> impl IntoResponse {
    Json(HealthStatus {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Root status probe, kept for storefront clients that poll it.
pub async fn status() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "online" }))
}

/// Publishable half of the charge-gateway credentials, safe to hand to
/// browser clients.
pub async fn payment_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "publishable_key": state.publishable_key }))
}
