use anyhow::Context;

use crate::context::AppContext;

/// Handle `lexi serve`: run every background loop until Ctrl-C.
pub async fn handle(ctx: &AppContext) -> anyhow::Result<()> {
    let settings = ctx.engine.settings();
    tracing::info!(
        db = %ctx.config.database.path,
        window_from = settings.window.hour_from(),
        window_to = settings.window.hour_to(),
        dispatch_every = ?settings.dispatch_interval,
        "starting lexi"
    );

    let mut supervisor = ctx.engine.start();
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    tracing::info!("shutdown requested");
    supervisor.stop().await?;
    Ok(())
}
