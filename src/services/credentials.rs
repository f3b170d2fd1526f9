//! Trivial keyed record store for storefront accounts, keyed by
//! username. Last write for a username wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub email: String,
    pub name: String,
    pub stored_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct CredentialStore {
    inner: RwLock<HashMap<String, Credential>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn store(&self, credential: Credential) {
        self.inner
            .write()
            .await
            .insert(credential.username.clone(), credential);
    }

    pub async fn all(&self) -> Vec<Credential> {
        let mut records: Vec<Credential> = self.inner.read().await.values().cloned().collect();
        records.sort_by(|a, b| a.stored_at.cmp(&b.stored_at));
        records
    }
}
