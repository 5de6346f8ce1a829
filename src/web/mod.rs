//! HTTP surface: router, handlers, templates and security headers.

pub mod handlers;
pub mod router;
pub mod security;
pub mod state;
pub mod templates;

use crate::config::ServerSettings;
use crate::utils::error::Result;
use crate::web::router::create_router;
use crate::web::state::AppState;
use tokio::net::TcpListener;
use tracing::info;

/// Serve the site until Ctrl-C.
pub async fn run(settings: &ServerSettings, state: AppState) -> Result<()> {
    let app = create_router(state, &settings.public_dir);

    let listener = TcpListener::bind(settings.bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down gracefully...");
}
