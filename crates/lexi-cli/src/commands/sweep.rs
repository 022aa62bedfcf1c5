use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lexi sweep`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let swept = ctx.engine.sweeper().tick().await?;
    output(&serde_json::json!({ "swept": swept }), flags.format)
}
