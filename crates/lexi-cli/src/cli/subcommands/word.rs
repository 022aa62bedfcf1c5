use std::path::PathBuf;

use clap::Subcommand;

use lexi_core::ids::TenantId;

/// Word administration commands.
#[derive(Clone, Debug, Subcommand)]
pub enum WordCommands {
    /// Add a word or update its translation.
    Add {
        #[arg(long, allow_negative_numbers = true)]
        tenant: TenantId,
        word: String,
        translation: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Show one word with its streak and review flag.
    Get {
        #[arg(long, allow_negative_numbers = true)]
        tenant: TenantId,
        word: String,
    },
    /// List words alphabetically.
    List {
        #[arg(long, allow_negative_numbers = true)]
        tenant: TenantId,
        #[arg(long, default_value_t = 50)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Delete a word and its batch membership.
    Delete {
        #[arg(long, allow_negative_numbers = true)]
        tenant: TenantId,
        word: String,
    },
    /// Import `word;translation[;description]` lines from a file.
    Import {
        #[arg(long, allow_negative_numbers = true)]
        tenant: TenantId,
        file: PathBuf,
    },
}
