use std::net::SocketAddr;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;

use centerdesk_server::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // The fmt subscriber also picks up `log` records from the backend
    // modules through the log-compatibility bridge.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .init();

    let app_state = initialize_backend()?;
    let router = create_router(app_state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = TcpListener::bind(addr).await?;
    info!("Starting server on {}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}
