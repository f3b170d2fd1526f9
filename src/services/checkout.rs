//! Checkout orchestration: cart pricing, authorization or claim
//! validation, ledger append, confirmation dispatch. The ledger append
//! is the durability point; everything after it is decoupled from the
//! client-visible result.

use crate::domain::{
    Amounts, CryptoClaim, Customer, LineItem, PaymentMethod, Transaction, TransactionStatus,
};
use crate::error::AppError;
use crate::ledger::TransactionStore;
use crate::providers::{ChargeAuthorizer, ChargeError, ChargeRequest};
use crate::services::confirmation::ConfirmationDispatcher;
use crate::validation::{ClaimError, validate_cart, validate_claim};
use bigdecimal::{BigDecimal, ToPrimitive, rounding::RoundingMode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub method: String,
    pub customer: Customer,
    pub line_items: Vec<LineItem>,
    pub currency: Option<String>,
    /// Required for crypto checkouts, ignored for card.
    pub claim: Option<CryptoClaim>,
}

/// What the client sees once the purchase is final. Notification
/// outcome is intentionally absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutOutcome {
    pub id: String,
    pub status: TransactionStatus,
}

pub struct CheckoutService {
    ledger: Arc<dyn TransactionStore>,
    authorizer: Arc<dyn ChargeAuthorizer>,
    dispatcher: ConfirmationDispatcher,
    receiving_addresses: HashMap<String, String>,
}

impl CheckoutService {
    pub fn new(
        ledger: Arc<dyn TransactionStore>,
        authorizer: Arc<dyn ChargeAuthorizer>,
        dispatcher: ConfirmationDispatcher,
        receiving_addresses: HashMap<String, String>,
    ) -> Self {
        Self {
            ledger,
            authorizer,
            dispatcher,
            receiving_addresses,
        }
    }

    /// Runs one checkout end to end. No transaction id exists until
    /// authorization or validation has succeeded, so rejected attempts
    /// leave nothing behind.
    pub async fn checkout(&self, request: CheckoutRequest) -> Result<CheckoutOutcome, AppError> {
        let method = match request.method.trim().to_ascii_lowercase().as_str() {
            "card" => PaymentMethod::Card,
            "crypto" => PaymentMethod::Crypto,
            other => return Err(AppError::UnsupportedMethod(other.to_string())),
        };

        validate_cart(&request.line_items).map_err(|e| AppError::InvalidCart(e.to_string()))?;

        let amounts = Amounts::from_line_items(&request.line_items);
        let currency = request
            .currency
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        let provider_reference = match method {
            PaymentMethod::Card => {
                self.authorize_card(&request.customer, &amounts, &currency)
                    .await?
            }
            PaymentMethod::Crypto => {
                let claim = request.claim.as_ref().ok_or_else(|| {
                    AppError::MissingFields("claim is required for crypto checkout".to_string())
                })?;
                let validated =
                    validate_claim(claim, &self.receiving_addresses).map_err(|e| match e {
                        ClaimError::MissingFields(msg) => AppError::MissingFields(msg),
                        ClaimError::BadFormat(msg) => AppError::BadFormat(msg),
                    })?;
                validated.reference
            }
        };

        // Durability point: after this append the purchase is final for
        // the client, independent of the notification outcome.
        let tx = Transaction::completed(
            method,
            request.customer,
            request.line_items,
            amounts,
            currency,
            provider_reference,
        );
        let outcome = CheckoutOutcome {
            id: tx.id.clone(),
            status: tx.status,
        };
        self.ledger.append(tx.clone()).await;

        info!(transaction_id = %outcome.id, method = ?method, "purchase recorded");

        // Handed off; the task owns its own success or failure record.
        let _ = self.dispatcher.dispatch(tx);

        Ok(outcome)
    }

    async fn authorize_card(
        &self,
        customer: &Customer,
        amounts: &Amounts,
        currency: &str,
    ) -> Result<String, AppError> {
        let charge = ChargeRequest {
            amount: to_minor_units(&amounts.total)?,
            currency: currency.to_ascii_lowercase(),
            description: "Ticket purchase".to_string(),
            receipt_email: customer.email.clone(),
            payer_name: customer.name.clone(),
        };

        let handle = self.authorizer.authorize(&charge).await.map_err(|e| match e {
            ChargeError::Declined { reason } => AppError::AuthorizationDeclined(reason),
            ChargeError::Unavailable(msg) => AppError::AuthorizationUnavailable(msg),
        })?;

        Ok(handle.0)
    }
}

fn to_minor_units(amount: &BigDecimal) -> Result<i64, AppError> {
    (amount * BigDecimal::from(100u32))
        .with_scale_round(0, RoundingMode::HalfUp)
        .to_i64()
        .ok_or_else(|| AppError::Internal("amount out of range".to_string()))
}
