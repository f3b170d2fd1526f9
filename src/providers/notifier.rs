use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

// Off the client's critical path, so the notifier gets a more generous
// timeout than the charge gateway.
const SEND_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("provider rejected the message: {0}")]
    Rejected(String),
    #[error("request failed: {0}")]
    Request(String),
}

/// Rendered confirmation message, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub to_name: String,
    pub to_email: String,
    pub transaction_id: String,
    pub total_amount: String,
    pub order_details: String,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Credentials for the transactional-email provider's template API.
#[derive(Debug, Clone)]
pub struct NotifierCredentials {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub access_token: String,
}

/// HTTP client for an EmailJS-style template-send endpoint.
#[derive(Clone)]
pub struct HttpNotifier {
    client: Client,
    send_url: String,
    credentials: NotifierCredentials,
}

impl HttpNotifier {
    pub fn new(send_url: String, credentials: NotifierCredentials) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(SEND_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            client,
            send_url,
            credentials,
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let payload = json!({
            "service_id": self.credentials.service_id,
            "template_id": self.credentials.template_id,
            "user_id": self.credentials.user_id,
            "accessToken": self.credentials.access_token,
            "template_params": {
                "to_name": notification.to_name,
                "to_email": notification.to_email,
                "transaction_id": notification.transaction_id,
                "total_amount": notification.total_amount,
                "order_details": notification.order_details,
            },
        });

        let response = self
            .client
            .post(&self.send_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected(format!("status {status}: {body}")));
        }

        Ok(())
    }
}
