//! Confirmation pipeline. Runs after the purchase is already final:
//! renders the receipt, attempts delivery once, and records the
//! outcome. A delivery failure is logged and recorded, never
//! propagated back to the checkout path.

use crate::domain::Transaction;
use crate::providers::{Notification, Notifier};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// One notification attempt tied to a transaction id. Informational
/// only; it never rolls back the transaction it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    pub attempted: bool,
    pub delivered: bool,
    pub error: Option<String>,
}

impl Confirmation {
    fn pending() -> Self {
        Self {
            attempted: false,
            delivered: false,
            error: None,
        }
    }

    fn delivered() -> Self {
        Self {
            attempted: true,
            delivered: true,
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            attempted: true,
            delivered: false,
            error: Some(error),
        }
    }
}

/// Outcome store keyed by transaction id, owned exclusively by the
/// dispatcher. Records are never deleted.
#[derive(Default)]
pub struct ConfirmationLog {
    inner: RwLock<HashMap<String, Confirmation>>,
}

impl ConfirmationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, transaction_id: &str) -> Option<Confirmation> {
        self.inner.read().await.get(transaction_id).cloned()
    }

    async fn record(&self, transaction_id: &str, confirmation: Confirmation) {
        self.inner
            .write()
            .await
            .insert(transaction_id.to_string(), confirmation);
    }
}

/// Renders the notification purely from the transaction. No I/O, no
/// clock reads; the same transaction always yields the same message.
pub fn render_notification(tx: &Transaction) -> Notification {
    let mut lines: Vec<String> = tx
        .line_items
        .iter()
        .map(|item| {
            format!(
                "{} x {} @ {} {}",
                item.quantity, item.description, item.unit_price, tx.currency
            )
        })
        .collect();

    lines.push(format!("Subtotal: {} {}", tx.amounts.subtotal, tx.currency));
    lines.push(format!("Service fee: {} {}", tx.amounts.fee, tx.currency));
    lines.push(format!("Tax: {} {}", tx.amounts.tax, tx.currency));
    lines.push(format!("Total: {} {}", tx.amounts.total, tx.currency));
    lines.push(format!("Payment reference: {}", tx.provider_reference));

    Notification {
        to_name: tx.customer.name.clone(),
        to_email: tx.customer.email.clone(),
        transaction_id: tx.id.clone(),
        total_amount: format!("{} {}", tx.amounts.total, tx.currency),
        order_details: lines.join("\n"),
    }
}

/// Hands completed transactions to the notifier off the request path.
#[derive(Clone)]
pub struct ConfirmationDispatcher {
    notifier: Arc<dyn Notifier>,
    log: Arc<ConfirmationLog>,
}

impl ConfirmationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>, log: Arc<ConfirmationLog>) -> Self {
        Self { notifier, log }
    }

    /// Fire-and-forget: the checkout response is already finalized
    /// when this is called, so the spawned task only ever writes to
    /// the confirmation log. Returns the task handle; callers on the
    /// request path drop it.
    pub fn dispatch(&self, tx: Transaction) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);
        let log = Arc::clone(&self.log);

        tokio::spawn(async move {
            log.record(&tx.id, Confirmation::pending()).await;

            let notification = render_notification(&tx);
            match notifier.send(&notification).await {
                Ok(()) => {
                    info!(transaction_id = %tx.id, "confirmation delivered");
                    log.record(&tx.id, Confirmation::delivered()).await;
                }
                Err(e) => {
                    // Swallowed here on purpose: the purchase is final.
                    error!(transaction_id = %tx.id, error = %e, "confirmation delivery failed");
                    log.record(&tx.id, Confirmation::failed(e.to_string())).await;
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amounts, Customer, LineItem, PaymentMethod, TransactionStatus};
    use crate::providers::NotifyError;
    use async_trait::async_trait;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    struct FailingNotifier;

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn send(&self, _notification: &Notification) -> Result<(), NotifyError> {
            Err(NotifyError::Rejected("mailbox on fire".to_string()))
        }
    }

    struct OkNotifier;

    #[async_trait]
    impl Notifier for OkNotifier {
        async fn send(&self, _notification: &Notification) -> Result<(), NotifyError> {
            Ok(())
        }
    }

    fn sample_tx() -> Transaction {
        let line_items = vec![LineItem {
            description: "Final - Block A".to_string(),
            unit_price: BigDecimal::from_str("500.00").unwrap(),
            quantity: 2,
        }];
        let amounts = Amounts::from_line_items(&line_items);
        Transaction::completed(
            PaymentMethod::Card,
            Customer {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            line_items,
            amounts,
            "USD".to_string(),
            "pi_abc123".to_string(),
        )
    }

    #[test]
    fn rendering_is_deterministic_and_complete() {
        let tx = sample_tx();
        let first = render_notification(&tx);
        let second = render_notification(&tx);

        assert_eq!(first, second);
        assert_eq!(first.to_email, "ada@example.com");
        assert_eq!(first.total_amount, "1235.00 USD");
        assert!(first.order_details.contains("2 x Final - Block A"));
        assert!(first.order_details.contains("Payment reference: pi_abc123"));
    }

    #[tokio::test]
    async fn successful_dispatch_records_delivery() {
        let log = Arc::new(ConfirmationLog::new());
        let dispatcher = ConfirmationDispatcher::new(Arc::new(OkNotifier), Arc::clone(&log));

        let tx = sample_tx();
        let id = tx.id.clone();
        dispatcher.dispatch(tx).await.unwrap();

        let confirmation = log.get(&id).await.unwrap();
        assert!(confirmation.attempted);
        assert!(confirmation.delivered);
        assert!(confirmation.error.is_none());
    }

    #[tokio::test]
    async fn failed_dispatch_records_error_without_panicking() {
        let log = Arc::new(ConfirmationLog::new());
        let dispatcher = ConfirmationDispatcher::new(Arc::new(FailingNotifier), Arc::clone(&log));

        let tx = sample_tx();
        let id = tx.id.clone();
        let status_before = tx.status;
        dispatcher.dispatch(tx).await.unwrap();

        let confirmation = log.get(&id).await.unwrap();
        assert!(confirmation.attempted);
        assert!(!confirmation.delivered);
        assert!(confirmation.error.unwrap().contains("mailbox on fire"));
        assert_eq!(status_before, TransactionStatus::Completed);
    }

    #[tokio::test]
    async fn unknown_transaction_has_no_confirmation() {
        let log = ConfirmationLog::new();
        assert!(log.get("TXN-0-nope").await.is_none());
    }
}
