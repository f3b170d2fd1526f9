//! Transaction domain entity.
//! Framework-agnostic representation of a completed ticket purchase.

use bigdecimal::{BigDecimal, rounding::RoundingMode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Crypto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Verified,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    /// Routing key for the confirmation notification.
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub unit_price: BigDecimal,
    pub quantity: u32,
}

/// Derived money breakdown for a cart. Never mutated independently:
/// `total == subtotal + fee + tax` holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amounts {
    pub subtotal: BigDecimal,
    pub fee: BigDecimal,
    pub tax: BigDecimal,
    pub total: BigDecimal,
}

impl Amounts {
    /// Folds line items into the full breakdown. Fee is 15% of the
    /// subtotal and tax 8.5%, both rounded half-up to two decimals.
    pub fn from_line_items(line_items: &[LineItem]) -> Self {
        let subtotal: BigDecimal = line_items
            .iter()
            .map(|item| &item.unit_price * BigDecimal::from(item.quantity))
            .sum();
        let subtotal = subtotal.with_scale_round(2, RoundingMode::HalfUp);

        let fee = (&subtotal * BigDecimal::from(15u32) / BigDecimal::from(100u32))
            .with_scale_round(2, RoundingMode::HalfUp);
        let tax = (&subtotal * BigDecimal::from(85u32) / BigDecimal::from(1000u32))
            .with_scale_round(2, RoundingMode::HalfUp);
        let total = &subtotal + &fee + &tax;

        Self {
            subtotal,
            fee,
            tax,
            total,
        }
    }
}

/// Domain entity representing a completed or pending purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub method: PaymentMethod,
    pub customer: Customer,
    pub line_items: Vec<LineItem>,
    pub amounts: Amounts,
    pub currency: String,
    pub status: TransactionStatus,
    /// Opaque handle from the charge gateway (card) or the
    /// user-submitted on-chain reference (crypto).
    pub provider_reference: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Builds a completed transaction with a fresh identifier. Called
    /// only after authorization or validation has succeeded, so no id
    /// is ever issued for a rejected payment.
    pub fn completed(
        method: PaymentMethod,
        customer: Customer,
        line_items: Vec<LineItem>,
        amounts: Amounts,
        currency: String,
        provider_reference: String,
    ) -> Self {
        Self {
            id: generate_transaction_id(),
            method,
            customer,
            line_items,
            amounts,
            currency,
            status: TransactionStatus::Completed,
            provider_reference,
            created_at: Utc::now(),
        }
    }
}

/// Millisecond timestamp plus a random suffix. Collision-free in
/// practice under concurrent checkouts without coordination.
fn generate_transaction_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("TXN-{}-{}", Utc::now().timestamp_millis(), &suffix[..12])
}
