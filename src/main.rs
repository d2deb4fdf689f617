use anyhow::Context;
use dotenvy::dotenv;
use sitekit::cli::init_db;
use sitekit::logging::init_tracing;
use sitekit::router::init_router;
use sitekit::state::AppState;
use sitekit::utils::email::{EmailQueue, spawn_email_worker};
use sitekit_config::{LogConfig, Settings};
use sitekit_db::init_db_pool;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Must precede Settings::from_env, which can log warnings.
    init_tracing(&LogConfig::from_env()).context("Failed to create logs directory")?;
    let settings = Settings::from_env();

    let db = init_db_pool(&settings.database)
        .await
        .context("Failed to connect to database")?;
    init_db(&db, &settings.app).await?;

    let (email_queue, email_jobs) = EmailQueue::new();
    let email_worker = spawn_email_worker(email_jobs, db.clone(), settings.email.clone());

    let address = settings.app.bind_address();
    let state = AppState::new(db, settings, email_queue);
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!(address = %address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // The router (and with it every queue handle) is gone; let pending emails drain.
    email_worker.await.ok();
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
