use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Serve => commands::serve::handle(ctx).await,
        Commands::Word { action } => commands::word::handle(&action, ctx, flags).await,
        Commands::Review { action } => commands::review::handle(&action, ctx, flags).await,
        Commands::Quiz(args) => commands::quiz::handle(&args, ctx, flags).await,
        Commands::Answer(args) => commands::answer::handle(&args, ctx, flags).await,
        Commands::Maintain(args) => commands::maintain::handle(&args, ctx, flags).await,
        Commands::Sweep => commands::sweep::handle(ctx, flags).await,
        Commands::Stats(args) => commands::stats::handle(&args, ctx, flags).await,
    }
}
