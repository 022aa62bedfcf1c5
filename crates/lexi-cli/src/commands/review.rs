use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReviewCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lexi review`.
pub async fn handle(
    action: &ReviewCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ReviewCommands::List { tenant } => {
            let words = ctx.db.list_words_to_review(*tenant).await?;
            output(&words, flags.format)
        }
        ReviewCommands::Clear { tenant } => {
            let cleared = ctx.db.reset_review_flags(*tenant, chrono::Utc::now()).await?;
            output(&serde_json::json!({ "cleared": cleared }), flags.format)
        }
    }
}
