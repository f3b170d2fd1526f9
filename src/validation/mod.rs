use crate::domain::{CryptoClaim, LineItem, Network, ValidatedClaim};
use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

pub const DESCRIPTION_MAX_LEN: usize = 255;
pub const BITCOIN_REFERENCE_LEN: usize = 64;
pub const ETHEREUM_REFERENCE_LEN: usize = 66; // 0x + 64 hex digits
pub const SOLANA_REFERENCE_MIN_LEN: usize = 64;
pub const SOLANA_REFERENCE_MAX_LEN: usize = 88;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

/// Crypto claim rejection reasons. First failing rule wins; the
/// receiving-address mismatch is a logged warning, never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    #[error("missing fields: {0}")]
    MissingFields(String),
    #[error("bad format: {0}")]
    BadFormat(String),
}

pub fn sanitize_string(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_control())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn validate_required(field: &'static str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }

    Ok(())
}

pub fn validate_max_len(field: &'static str, value: &str, max_len: usize) -> ValidationResult {
    if value.len() > max_len {
        return Err(ValidationError::new(
            field,
            format!("must be at most {} characters", max_len),
        ));
    }

    Ok(())
}

/// Checks a cart before any money math or provider call happens.
pub fn validate_cart(line_items: &[LineItem]) -> ValidationResult {
    if line_items.is_empty() {
        return Err(ValidationError::new("line_items", "must not be empty"));
    }

    for item in line_items {
        validate_required("line_items.description", &item.description)?;
        validate_max_len("line_items.description", &item.description, DESCRIPTION_MAX_LEN)?;

        if item.quantity < 1 {
            return Err(ValidationError::new(
                "line_items.quantity",
                "must be at least 1",
            ));
        }

        if item.unit_price < BigDecimal::from(0) {
            return Err(ValidationError::new(
                "line_items.unit_price",
                "must not be negative",
            ));
        }
    }

    Ok(())
}

/// Syntactic and policy checks on a user-submitted on-chain payment
/// claim. Performs no chain lookup; a real chain-indexer integration
/// can replace this without changing callers.
pub fn validate_claim(
    claim: &CryptoClaim,
    receiving_addresses: &HashMap<String, String>,
) -> Result<ValidatedClaim, ClaimError> {
    let reference = sanitize_string(&claim.reference);
    let sender_address = sanitize_string(&claim.sender_address);

    if reference.is_empty() || sender_address.is_empty() {
        return Err(ClaimError::MissingFields(
            "reference and sender_address are required".to_string(),
        ));
    }

    let network = Network::parse(&claim.network);
    validate_reference_format(&network, &reference)?;

    if let Some(expected) = claim
        .expected_address
        .as_deref()
        .map(sanitize_string)
        .filter(|a| !a.is_empty())
    {
        match receiving_addresses.get(network.name()) {
            Some(canonical) if canonical != &expected => {
                tracing::warn!(
                    network = network.name(),
                    expected_address = %expected,
                    canonical_address = %canonical,
                    "claim names a receiving address that differs from the configured one"
                );
            }
            _ => {}
        }
    }

    Ok(ValidatedClaim {
        reference,
        network,
        sender_address,
    })
}

fn validate_reference_format(network: &Network, reference: &str) -> Result<(), ClaimError> {
    match network {
        Network::Bitcoin => {
            if reference.len() != BITCOIN_REFERENCE_LEN || !is_hex(reference) {
                return Err(ClaimError::BadFormat(format!(
                    "bitcoin reference must be {} hex characters",
                    BITCOIN_REFERENCE_LEN
                )));
            }
        }
        Network::Ethereum => {
            let digits = reference.strip_prefix("0x").unwrap_or("");
            if reference.len() != ETHEREUM_REFERENCE_LEN || !is_hex(digits) {
                return Err(ClaimError::BadFormat(
                    "ethereum reference must be 0x followed by 64 hex characters".to_string(),
                ));
            }
        }
        Network::Solana => {
            if reference.len() < SOLANA_REFERENCE_MIN_LEN
                || reference.len() > SOLANA_REFERENCE_MAX_LEN
                || !reference.chars().all(is_base58_char)
            {
                return Err(ClaimError::BadFormat(format!(
                    "solana reference must be {}-{} base58 characters",
                    SOLANA_REFERENCE_MIN_LEN, SOLANA_REFERENCE_MAX_LEN
                )));
            }
        }
        Network::Other(name) => {
            // No known pattern for this network. Accepted as-is, which
            // is an intentionally permissive policy; make it visible.
            tracing::warn!(
                network = %name,
                "no reference format known for network, accepting claim unchecked"
            );
        }
    }

    Ok(())
}

fn is_hex(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_hexdigit())
}

fn is_base58_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() && !matches!(ch, '0' | 'O' | 'I' | 'l')
}
