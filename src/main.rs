use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use orders_api as api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = api::config::load_config().context("failed to load configuration")?;
    api::config::init_tracing(&cfg.log_level, cfg.log_json);

    let db = Arc::new(
        api::db::establish_connection(&cfg)
            .await
            .context("failed to connect to the database")?,
    );

    let services = api::services::AppServices::new(db.clone());
    let state = api::AppState {
        db,
        config: cfg.clone(),
        services,
    };

    let app = api::handlers::router(state);

    let addr: SocketAddr = cfg
        .server_addr()
        .parse()
        .with_context(|| format!("invalid listen address {}", cfg.server_addr()))?;
    info!(%addr, environment = %cfg.environment, "starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listen address")?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
