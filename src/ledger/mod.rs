//! Append-only record of completed payments. The in-memory store is
//! process-lifetime by design; the trait is the seam where a durable
//! repository would slot in.

use crate::domain::{PaymentMethod, Transaction};
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub method: Option<PaymentMethod>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TransactionFilter {
    fn matches(&self, tx: &Transaction) -> bool {
        if let Some(method) = self.method {
            if tx.method != method {
                return false;
            }
        }
        if let Some(from) = self.from {
            if tx.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if tx.created_at > to {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerAggregate {
    pub count: u64,
    pub total_amount: BigDecimal,
}

/// Storage port for completed transactions. Appends are infallible for
/// well-formed transactions; durability is the store's concern.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn append(&self, tx: Transaction) -> String;
    async fn get(&self, id: &str) -> Option<Transaction>;
    async fn list(&self, filter: &TransactionFilter) -> Vec<Transaction>;
    async fn aggregate(&self) -> LedgerAggregate;
}

#[derive(Default)]
struct LedgerInner {
    // Insertion order preserved separately so `list` returns records
    // in append order.
    order: Vec<String>,
    by_id: HashMap<String, Transaction>,
}

/// Process-lifetime ledger. The write lock serializes appends; reads
/// of already-appended records proceed concurrently.
#[derive(Default)]
pub struct InMemoryLedger {
    inner: RwLock<LedgerInner>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryLedger {
    async fn append(&self, tx: Transaction) -> String {
        let id = tx.id.clone();
        let mut inner = self.inner.write().await;
        inner.order.push(id.clone());
        inner.by_id.insert(id.clone(), tx);
        id
    }

    async fn get(&self, id: &str) -> Option<Transaction> {
        self.inner.read().await.by_id.get(id).cloned()
    }

    async fn list(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .filter_map(|id| inner.by_id.get(id))
            .filter(|tx| filter.matches(tx))
            .cloned()
            .collect()
    }

    async fn aggregate(&self) -> LedgerAggregate {
        // Recomputed by folding over all records on each call; fine at
        // this scale, a running aggregate belongs to a durable store.
        let inner = self.inner.read().await;
        let total_amount = inner
            .by_id
            .values()
            .map(|tx| tx.amounts.total.clone())
            .sum();

        LedgerAggregate {
            count: inner.by_id.len() as u64,
            total_amount,
        }
    }
}
