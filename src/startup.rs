use crate::config::Config;
use anyhow::{Context, Result};
use std::time::Duration;

pub struct ValidationReport {
    pub environment: bool,
    pub charge_gateway: bool,
    pub notifier: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.environment && self.charge_gateway && self.notifier
    }

    pub fn print(&self) {
        println!("\n=== Startup Validation Report ===");
        println!("Environment Variables: {}", status(self.environment));
        println!("Charge Gateway:        {}", status(self.charge_gateway));
        println!("Notifier:              {}", status(self.notifier));

        if !self.errors.is_empty() {
            println!("\nErrors:");
            for error in &self.errors {
                println!("  ❌ {}", error);
            }
        }

        println!(
            "\nOverall Status: {}",
            if self.is_valid() { "✅ PASS" } else { "❌ FAIL" }
        );
        println!("=================================\n");
    }
}

fn status(ok: bool) -> &'static str {
    if ok { "✅ OK" } else { "❌ FAIL" }
}

pub async fn validate_environment(config: &Config) -> Result<ValidationReport> {
    let mut report = ValidationReport {
        environment: true,
        charge_gateway: true,
        notifier: true,
        errors: Vec::new(),
    };

    if let Err(e) = validate_env_vars(config) {
        report.environment = false;
        report.errors.push(format!("Environment: {}", e));
    }

    if let Err(e) = validate_endpoint(&config.charge_gateway_url).await {
        report.charge_gateway = false;
        report.errors.push(format!("Charge gateway: {}", e));
    }

    if let Err(e) = validate_endpoint(&config.notifier_url).await {
        report.notifier = false;
        report.errors.push(format!("Notifier: {}", e));
    }

    Ok(report)
}

fn validate_env_vars(config: &Config) -> Result<()> {
    if config.charge_gateway_url.is_empty() {
        anyhow::bail!("CHARGE_GATEWAY_URL is empty");
    }
    if config.charge_api_key.is_empty() {
        anyhow::bail!("CHARGE_API_KEY is empty");
    }
    if config.notifier_url.is_empty() {
        anyhow::bail!("NOTIFIER_URL is empty");
    }
    if config.server_port == 0 {
        anyhow::bail!("SERVER_PORT must be greater than 0");
    }

    url::Url::parse(&config.charge_gateway_url)
        .context("CHARGE_GATEWAY_URL is not a valid URL")?;
    url::Url::parse(&config.notifier_url).context("NOTIFIER_URL is not a valid URL")?;

    Ok(())
}

async fn validate_endpoint(base_url: &str) -> Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let response = client
        .get(base_url)
        .send()
        .await
        .context("Failed to connect")?;

    // Any HTTP answer proves reachability; auth errors are expected
    // for unauthenticated probes against payment providers.
    if response.status().is_server_error() {
        anyhow::bail!("endpoint returned status: {}", response.status());
    }

    Ok(())
}
