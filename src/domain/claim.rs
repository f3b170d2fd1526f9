//! User-submitted crypto payment claims. A claim is an unverified
//! assertion of an on-chain payment; it is folded into a Transaction
//! once validation succeeds and discarded otherwise.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Networks with a known reference format. Anything else parses to
/// `Other` and is accepted permissively by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    Bitcoin,
    Ethereum,
    Solana,
    Other(String),
}

impl Network {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "bitcoin" | "btc" => Network::Bitcoin,
            "ethereum" | "eth" => Network::Ethereum,
            "solana" | "sol" => Network::Solana,
            other => Network::Other(other.to_string()),
        }
    }

    /// Lowercase canonical name, used as the receiving-address map key.
    pub fn name(&self) -> &str {
        match self {
            Network::Bitcoin => "bitcoin",
            Network::Ethereum => "ethereum",
            Network::Solana => "solana",
            Network::Other(name) => name,
        }
    }
}

/// Transient checkout input, never persisted as its own entity.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CryptoClaim {
    pub reference: String,
    pub network: String,
    pub sender_address: String,
    pub claimed_amount: Option<BigDecimal>,
    pub expected_address: Option<String>,
}

/// A claim that passed syntactic and policy checks. Carries the parsed
/// network so downstream code never re-derives it from the raw string.
#[derive(Debug, Clone)]
pub struct ValidatedClaim {
    pub reference: String,
    pub network: Network,
    pub sender_address: String,
}
