use crate::AppState;
use crate::domain::{PaymentMethod, Transaction};
use crate::error::AppError;
use crate::ledger::{LedgerAggregate, TransactionFilter};
use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tx = state
        .ledger
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Transaction {} not found", id)))?;

    Ok(Json(tx))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub method: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub transactions: Vec<Transaction>,
    pub aggregate: LedgerAggregate,
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let method = match params.method.as_deref() {
        None => None,
        Some("card") => Some(PaymentMethod::Card),
        Some("crypto") => Some(PaymentMethod::Crypto),
        Some(other) => {
            return Err(AppError::BadFormat(format!(
                "method must be 'card' or 'crypto', got '{other}'"
            )));
        }
    };

    let filter = TransactionFilter {
        method,
        from: params.from,
        to: params.to,
    };

    // The aggregate intentionally covers the whole ledger, not the
    // filtered slice.
    let transactions = state.ledger.list(&filter).await;
    let aggregate = state.ledger.aggregate().await;

    Ok(Json(ListResponse {
        transactions,
        aggregate,
    }))
}

pub async fn get_confirmation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if state.ledger.get(&id).await.is_none() {
        return Err(AppError::NotFound(format!("Transaction {} not found", id)));
    }

    let confirmation = state
        .confirmations
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No confirmation recorded for {}", id)))?;

    Ok(Json(confirmation))
}
