mod model;
mod server;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::AppError,
    scheduler::reminder_dispatch::{self, ReminderDispatchJob},
    service::notification::{email::HttpMailer, realtime::NotificationHub},
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let http_client = startup::setup_reqwest_client()?;

    let hub = NotificationHub::new();
    let mailer = HttpMailer::new(
        http_client,
        config.mail_api_url.clone(),
        config.mail_api_key.clone(),
        config.mail_from.clone(),
    );

    let shutdown = CancellationToken::new();

    // Start reminder dispatch scheduler
    let job = ReminderDispatchJob::new(
        db.clone(),
        Arc::new(mailer),
        Arc::new(hub.clone()),
        config.dispatch_settings(),
        shutdown.clone(),
    );
    let mut scheduler = reminder_dispatch::start_scheduler(
        job,
        config.reminder_poll_interval,
        config.reminder_dispatch_on_startup,
    )
    .await?;

    let app = server::router::router().with_state(AppState::new(db, hub));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Starting server on {}", config.bind_addr);

    let server_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutdown signal received");
            server_shutdown.cancel();
        })
        .await?;

    shutdown.cancel();
    scheduler.shutdown().await?;

    tracing::info!("Server stopped");

    Ok(())
}
