pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod ledger;
pub mod middleware;
pub mod providers;
pub mod services;
pub mod startup;
pub mod validation;

use crate::ledger::TransactionStore;
use crate::services::{CheckoutService, ConfirmationLog, CredentialStore};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub checkout: Arc<CheckoutService>,
    pub ledger: Arc<dyn TransactionStore>,
    pub confirmations: Arc<ConfirmationLog>,
    pub credentials: Arc<CredentialStore>,
    pub publishable_key: String,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::status))
        .route("/health", get(handlers::health))
        .route("/config/payment", get(handlers::payment_config))
        .route("/checkout", post(handlers::checkout::checkout))
        .route("/transactions", get(handlers::transactions::list_transactions))
        .route("/transactions/:id", get(handlers::transactions::get_transaction))
        .route(
            "/transactions/:id/confirmation",
            get(handlers::transactions::get_confirmation),
        )
        .route(
            "/credentials",
            post(handlers::credentials::store_credential)
                .get(handlers::credentials::list_credentials),
        )
        .layer(axum::middleware::from_fn(
            middleware::request_logger::request_logger_middleware,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
