use std::sync::Arc;

use anyhow::Context;
use rescat_config::RescatConfig;
use rescat_db::service::RecordService;

use crate::cli::ServeArgs;

/// Handle `rescat serve`.
pub async fn handle(
    args: &ServeArgs,
    service: RecordService,
    config: &RescatConfig,
) -> anyhow::Result<()> {
    let bind = args.bind.as_deref().unwrap_or(&config.server.bind);
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;

    let app = rescat_server::router(Arc::new(service), &config.server);
    rescat_server::serve(listener, app, shutdown_signal())
        .await
        .context("server stopped unexpectedly")
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
