use crate::cli::GlobalFlags;
use crate::cli::root_commands::TenantArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lexi quiz`. A sent prompt is already printed by the console gateway.
pub async fn handle(args: &TenantArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let outcome = ctx.engine.dispatcher().dispatch_tenant(args.tenant).await?;
    match outcome.reply() {
        Some(reply) => output(&reply, flags.format),
        None => Ok(()),
    }
}
