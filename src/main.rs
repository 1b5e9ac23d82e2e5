use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;

use playground_exec::{config, server};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("playground_exec=info".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let sandbox_config = config::init_from_env()?;
    info!(
        "Sandbox config: scratch_root={}, run_timeout_ms={}, compile_timeout_ms={}",
        sandbox_config.scratch_root.display(),
        sandbox_config.run_timeout_ms,
        sandbox_config.compile_timeout_ms,
    );

    let port: u16 = std::env::var("APP_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let app = server::router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
