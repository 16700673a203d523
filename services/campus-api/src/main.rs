//! Campus API 服务入口

use std::net::SocketAddr;

use campus_api::{AppState, CacheAsideConfig, router};
use campus_bootstrap::{Infrastructure, init_runtime, shutdown_signal};
use campus_config::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 仅用于本地开发，缺失不是错误
    let _ = dotenvy::dotenv();

    let config = AppConfig::load("config")?;
    let metrics = init_runtime(&config);

    let infra = Infrastructure::from_config(config).await?;
    let config = infra.config();

    let cache_config = CacheAsideConfig::default().with_ttl(config.cache.ttl());
    let state =
        AppState::new(infra.store(), infra.cache(), cache_config).with_metrics(metrics);
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Starting campus-api");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    infra.close().await;
    info!("Server stopped");
    Ok(())
}
