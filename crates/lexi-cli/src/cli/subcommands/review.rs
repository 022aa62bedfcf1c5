use clap::Subcommand;

use lexi_core::ids::TenantId;

/// Standing review list commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReviewCommands {
    /// Words flagged for review.
    List {
        #[arg(long, allow_negative_numbers = true)]
        tenant: TenantId,
    },
    /// Clear every review flag of a tenant.
    Clear {
        #[arg(long, allow_negative_numbers = true)]
        tenant: TenantId,
    },
}
