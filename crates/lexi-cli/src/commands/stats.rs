use serde::Serialize;

use lexi_core::entities::WordStats;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TenantArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StatsView {
    #[serde(flatten)]
    stats: WordStats,
    waiting: u64,
    pending_callbacks: u64,
}

/// Handle `lexi stats`.
pub async fn handle(args: &TenantArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let stats = ctx.db.word_stats(args.tenant, ctx.mastery_threshold()).await?;
    let pending_callbacks = ctx.db.count_callbacks(Some(args.tenant)).await?;
    output(
        &StatsView {
            waiting: stats.waiting(),
            stats,
            pending_callbacks,
        },
        flags.format,
    )
}
