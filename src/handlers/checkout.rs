use crate::AppState;
use crate::error::AppError;
use crate::services::CheckoutRequest;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// Single checkout entry point; the `method` field selects the card or
/// crypto path. The response carries only the finalized transaction id
/// and status, never anything about notification delivery.
pub async fn checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state.checkout.checkout(payload).await?;

    Ok((StatusCode::CREATED, Json(outcome)))
}
