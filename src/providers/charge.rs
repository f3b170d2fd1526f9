use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Bounds the client-critical-path call to the card network. Timeouts
/// are classified as `Unavailable`, never `Declined`.
const AUTHORIZE_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum ChargeError {
    /// Terminal for this attempt; carries the provider-supplied reason.
    #[error("declined: {reason}")]
    Declined { reason: String },
    /// Network or provider outage; the caller may retry.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ChargeRequest {
    /// Positive integer minor units (cents).
    pub amount: i64,
    pub currency: String,
    pub description: String,
    pub receipt_email: String,
    pub payer_name: String,
}

/// Opaque success token from the card-network integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationHandle(pub String);

#[async_trait]
pub trait ChargeAuthorizer: Send + Sync {
    async fn authorize(&self, request: &ChargeRequest) -> Result<AuthorizationHandle, ChargeError>;
}

#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: Option<GatewayErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorDetail {
    message: Option<String>,
}

/// HTTP client for a Stripe-style payment-intents gateway.
#[derive(Clone)]
pub struct HttpChargeGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpChargeGateway {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(AUTHORIZE_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChargeAuthorizer for HttpChargeGateway {
    async fn authorize(&self, request: &ChargeRequest) -> Result<AuthorizationHandle, ChargeError> {
        let response = self
            .client
            .post(self.intents_url())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| ChargeError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let intent = response
                .json::<PaymentIntentResponse>()
                .await
                .map_err(|e| ChargeError::Unavailable(format!("invalid response: {e}")))?;
            return Ok(AuthorizationHandle(intent.id));
        }

        if status.is_client_error() {
            let reason = response
                .json::<GatewayErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .and_then(|detail| detail.message)
                .unwrap_or_else(|| format!("gateway returned status {status}"));
            return Err(ChargeError::Declined { reason });
        }

        Err(ChargeError::Unavailable(format!(
            "gateway returned status {status}"
        )))
    }
}
