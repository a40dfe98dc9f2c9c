use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use klario_chat::app_router;
use klario_chat::config::AppConfig;
use klario_chat::db;
use klario_chat::services::assistant::MockGenerator;
use klario_chat::services::crm::{CrmSink, LogCrmSink, WebhookCrmSink};
use klario_chat::services::session;
use klario_chat::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let crm: Box<dyn CrmSink> = if config.crm_webhook_url.is_empty() {
        tracing::info!("no CRM webhook configured, leads will only be logged");
        Box::new(LogCrmSink)
    } else {
        tracing::info!(url = %config.crm_webhook_url, "forwarding leads to CRM webhook");
        Box::new(WebhookCrmSink::new(config.crm_webhook_url.clone()))
    };

    let (activity_tx, _) = broadcast::channel(256);

    let state = Arc::new(AppState {
        sessions: Mutex::new(HashMap::new()),
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        crm,
        generator: Box::new(MockGenerator::new(2000)),
        activity_tx,
    });

    // Idle sessions are swept in the background; handlers also expire them
    // lazily on access.
    let sweeper_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            let dropped = session::sweep_expired(&sweeper_state);
            if dropped > 0 {
                tracing::debug!(dropped, "swept expired sessions");
            }
        }
    });

    let app = app_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
