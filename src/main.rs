use std::net::SocketAddr;
use std::sync::Arc;
use ticketbooth::ledger::{InMemoryLedger, TransactionStore};
use ticketbooth::providers::{HttpChargeGateway, HttpNotifier, notifier::NotifierCredentials};
use ticketbooth::services::{CheckoutService, ConfirmationLog, CredentialStore};
use ticketbooth::services::confirmation::ConfirmationDispatcher;
use ticketbooth::{AppState, config, create_app, startup};
use tokio::net::TcpListener;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::Config::from_env()?;

    // Setup logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let report = startup::validate_environment(&config).await?;
    report.print();
    if !report.is_valid() {
        tracing::warn!("startup validation failed, continuing anyway");
    }

    let ledger: Arc<dyn TransactionStore> = Arc::new(InMemoryLedger::new());
    let confirmations = Arc::new(ConfirmationLog::new());
    let credentials = Arc::new(CredentialStore::new());

    let gateway = HttpChargeGateway::new(
        config.charge_gateway_url.clone(),
        config.charge_api_key.clone(),
    );
    tracing::info!("charge gateway client initialized for {}", config.charge_gateway_url);

    let notifier = HttpNotifier::new(
        config.notifier_url.clone(),
        NotifierCredentials {
            service_id: config.notifier_service_id.clone(),
            template_id: config.notifier_template_id.clone(),
            user_id: config.notifier_user_id.clone(),
            access_token: config.notifier_access_token.clone(),
        },
    );

    let dispatcher = ConfirmationDispatcher::new(Arc::new(notifier), Arc::clone(&confirmations));
    let checkout = Arc::new(CheckoutService::new(
        Arc::clone(&ledger),
        Arc::new(gateway),
        dispatcher,
        config.receiving_addresses.clone(),
    ));

    let app_state = AppState {
        checkout,
        ledger,
        confirmations,
        credentials,
        publishable_key: config.publishable_key.clone(),
    };

    let app = create_app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
