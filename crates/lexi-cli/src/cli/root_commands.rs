use clap::{Args, Subcommand};

use lexi_core::ids::TenantId;

use crate::cli::subcommands::{ReviewCommands, WordCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the sweeper, batch maintainer, and dispatch scheduler until Ctrl-C.
    Serve,
    /// Word administration.
    Word {
        #[command(subcommand)]
        action: WordCommands,
    },
    /// Standing review list.
    Review {
        #[command(subcommand)]
        action: ReviewCommands,
    },
    /// Send one quiz prompt now, ignoring the daily window.
    Quiz(TenantArgs),
    /// Feed an inbound action payload (`correct:<token>`) and print the reply.
    Answer(AnswerArgs),
    /// Run one learning-batch maintenance pass.
    Maintain(MaintainArgs),
    /// Remove expired quiz callbacks.
    Sweep,
    /// Vocabulary counters for a tenant.
    Stats(TenantArgs),
}

#[derive(Clone, Debug, Args)]
pub struct TenantArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub tenant: TenantId,
}

#[derive(Clone, Debug, Args)]
pub struct AnswerArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub tenant: TenantId,
    /// Button payload, e.g. `correct:0123456789abcdef0123456789abcdef`.
    pub payload: String,
}

#[derive(Clone, Debug, Args)]
pub struct MaintainArgs {
    /// Only this tenant; every configured or known tenant otherwise.
    #[arg(long, allow_negative_numbers = true)]
    pub tenant: Option<TenantId>,
}
