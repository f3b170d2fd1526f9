use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: u16,
    pub charge_gateway_url: String,
    pub charge_api_key: String,
    pub publishable_key: String,
    pub notifier_url: String,
    pub notifier_service_id: String,
    pub notifier_template_id: String,
    pub notifier_user_id: String,
    pub notifier_access_token: String,
    /// Canonical receiving address per crypto network, lowercase network
    /// name as key. Networks absent from the map skip the address check.
    pub receiving_addresses: HashMap<String, String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok(); // Load .env file if present

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            charge_gateway_url: env::var("CHARGE_GATEWAY_URL")?,
            charge_api_key: env::var("CHARGE_API_KEY")?,
            publishable_key: env::var("CHARGE_PUBLISHABLE_KEY")?,
            notifier_url: env::var("NOTIFIER_URL")?,
            notifier_service_id: env::var("NOTIFIER_SERVICE_ID")?,
            notifier_template_id: env::var("NOTIFIER_TEMPLATE_ID")?,
            notifier_user_id: env::var("NOTIFIER_USER_ID")?,
            notifier_access_token: env::var("NOTIFIER_ACCESS_TOKEN")?,
            receiving_addresses: parse_receiving_addresses(
                &env::var("RECEIVING_ADDRESSES").unwrap_or_default(),
            )?,
        })
    }
}

/// Parses `RECEIVING_ADDRESSES` of the form
/// `bitcoin=bc1qxyz...,ethereum=0xabc...`. An empty value yields an
/// empty map, which disables the receiving-address check entirely.
fn parse_receiving_addresses(raw: &str) -> Result<HashMap<String, String>> {
    let mut addresses = HashMap::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (network, address) = entry.split_once('=').ok_or_else(|| {
            anyhow::anyhow!("RECEIVING_ADDRESSES entries must be network=address, got '{entry}'")
        })?;

        let network = network.trim().to_ascii_lowercase();
        let address = address.trim();
        if network.is_empty() || address.is_empty() {
            anyhow::bail!("RECEIVING_ADDRESSES entry '{entry}' has an empty side");
        }

        addresses.insert(network, address.to_string());
    }

    Ok(addresses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_empty_receiving_addresses() {
        let map = parse_receiving_addresses("").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn parses_receiving_addresses_list() {
        let map =
            parse_receiving_addresses("bitcoin=bc1qxyz, Ethereum=0xABC123 ,solana=9xQe").unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("bitcoin").unwrap(), "bc1qxyz");
        assert_eq!(map.get("ethereum").unwrap(), "0xABC123");
    }

    #[test]
    fn rejects_malformed_receiving_address_entry() {
        assert!(parse_receiving_addresses("bitcoin").is_err());
        assert!(parse_receiving_addresses("=bc1qxyz").is_err());
        assert!(parse_receiving_addresses("bitcoin=").is_err());
    }
}
