use folio_contact_relay::{AppState, RelayConfig, SmtpMailer, router};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = RelayConfig::from_env();
    if config.credentials.is_none() {
        tracing::warn!("GMAIL_USER or GMAIL_APP_PASSWORD is not set; messages will be rejected");
    }

    let addr = config.bind_address();
    let app = router(AppState::new(config, Arc::new(SmtpMailer::new())));
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Contact relay listening on {}", addr);
    tracing::info!("  - POST /api/send-email");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,folio_contact_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
