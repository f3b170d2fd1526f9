#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use ticketbooth::ledger::{InMemoryLedger, TransactionStore};
use ticketbooth::providers::{
    AuthorizationHandle, ChargeAuthorizer, ChargeError, ChargeRequest, Notification, Notifier,
    NotifyError,
};
use ticketbooth::services::confirmation::ConfirmationDispatcher;
use ticketbooth::services::{CheckoutService, Confirmation, ConfirmationLog, CredentialStore};
use ticketbooth::{AppState, create_app};
use tower::ServiceExt;

#[derive(Clone)]
pub enum AuthorizerMode {
    Approve(String),
    Decline(String),
    Unavailable(String),
}

pub struct TestAuthorizer(pub AuthorizerMode);

#[async_trait]
impl ChargeAuthorizer for TestAuthorizer {
    async fn authorize(&self, _request: &ChargeRequest) -> Result<AuthorizationHandle, ChargeError> {
        match &self.0 {
            AuthorizerMode::Approve(handle) => Ok(AuthorizationHandle(handle.clone())),
            AuthorizerMode::Decline(reason) => Err(ChargeError::Declined {
                reason: reason.clone(),
            }),
            AuthorizerMode::Unavailable(msg) => Err(ChargeError::Unavailable(msg.clone())),
        }
    }
}

#[derive(Clone)]
pub enum NotifierMode {
    Deliver,
    Fail(String),
}

pub struct TestNotifier(pub NotifierMode);

#[async_trait]
impl Notifier for TestNotifier {
    async fn send(&self, _notification: &Notification) -> Result<(), NotifyError> {
        match &self.0 {
            NotifierMode::Deliver => Ok(()),
            NotifierMode::Fail(reason) => Err(NotifyError::Rejected(reason.clone())),
        }
    }
}

pub struct TestApp {
    pub app: Router,
    pub ledger: Arc<dyn TransactionStore>,
    pub confirmations: Arc<ConfirmationLog>,
}

pub fn test_app(authorizer: AuthorizerMode, notifier: NotifierMode) -> TestApp {
    let ledger: Arc<dyn TransactionStore> = Arc::new(InMemoryLedger::new());
    let confirmations = Arc::new(ConfirmationLog::new());

    let dispatcher = ConfirmationDispatcher::new(
        Arc::new(TestNotifier(notifier)),
        Arc::clone(&confirmations),
    );
    let checkout = Arc::new(CheckoutService::new(
        Arc::clone(&ledger),
        Arc::new(TestAuthorizer(authorizer)),
        dispatcher,
        HashMap::new(),
    ));

    let state = AppState {
        checkout,
        ledger: Arc::clone(&ledger),
        confirmations: Arc::clone(&confirmations),
        credentials: Arc::new(CredentialStore::new()),
        publishable_key: "pk_test_visible".to_string(),
    };

    TestApp {
        app: create_app(state),
        ledger,
        confirmations,
    }
}

pub async fn post_json(
    app: &Router,
    path: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

pub async fn get_json(app: &Router, path: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Well-formed two-ticket cart: subtotal 1000.00, total 1235.00.
pub fn card_payload() -> serde_json::Value {
    serde_json::json!({
        "method": "card",
        "customer": { "name": "Ada", "email": "ada@example.com" },
        "line_items": [
            { "description": "Final - Block A", "unit_price": "500.00", "quantity": 2 }
        ]
    })
}

pub fn crypto_payload(reference: &str, network: &str) -> serde_json::Value {
    serde_json::json!({
        "method": "crypto",
        "customer": { "name": "Ada", "email": "ada@example.com" },
        "line_items": [
            { "description": "Final - Block A", "unit_price": "500.00", "quantity": 2 }
        ],
        "claim": {
            "reference": reference,
            "network": network,
            "sender_address": "bc1qsender"
        }
    })
}

/// Dispatch runs on a spawned task; poll until it has recorded an
/// attempt or give up after a second.
pub async fn wait_for_attempt(log: &ConfirmationLog, id: &str) -> Confirmation {
    for _ in 0..100 {
        if let Some(confirmation) = log.get(id).await {
            if confirmation.attempted {
                return confirmation;
            }
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("no confirmation attempt recorded for {id}");
}
