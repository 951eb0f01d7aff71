use folio_server::{AppState, Config, Recaptcha, router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,folio=debug,tower_http=debug")),
        )
        .init();

    let pool = folio::create_pool_with_config(config.database_url(), config.pool_size)?;
    if config.migrate {
        let report = folio::migrate::run_pool(&pool).await?;
        tracing::info!(applied = report.applied_migrations().len(), "migrations complete");
    }

    let recaptcha = Recaptcha::for_environment(config.environment, config.recaptcha_secret.clone());
    let app = router(AppState::new(pool, recaptcha), config.cors_origin()?);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        environment = ?config.environment,
        "Listening on http://localhost:{}",
        config.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
