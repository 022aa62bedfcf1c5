use anyhow::Context;
use serde::Serialize;

use lexi_core::entities::{NewWord, WordEntry};
use lexi_core::enums::MasteryStage;
use lexi_core::ids::TenantId;
use lexi_core::import::parse_word_list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::WordCommands;
use crate::context::AppContext;
use crate::output::output;

/// A word with its derived lifecycle stage.
#[derive(Debug, Serialize)]
struct WordView {
    #[serde(flatten)]
    entry: WordEntry,
    stage: MasteryStage,
}

async fn view(ctx: &AppContext, entry: WordEntry) -> anyhow::Result<WordView> {
    let batched = ctx.db.is_batched(entry.tenant_id, &entry.word).await?;
    let stage = entry.mastery().stage(batched, ctx.mastery_threshold());
    Ok(WordView { entry, stage })
}

/// Handle `lexi word`.
pub async fn handle(
    action: &WordCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let now = chrono::Utc::now();
    match action {
        WordCommands::Add {
            tenant,
            word,
            translation,
            description,
        } => {
            let new = NewWord::new(word, translation, description.as_deref())?;
            let entry = ctx.db.add_or_update_word(*tenant, &new, now).await?;
            output(&view(ctx, entry).await?, flags.format)
        }
        WordCommands::Get { tenant, word } => {
            let entry = find(ctx, *tenant, word).await?;
            output(&view(ctx, entry).await?, flags.format)
        }
        WordCommands::List {
            tenant,
            limit,
            offset,
        } => {
            let entries = ctx.db.list_words(*tenant, *limit, *offset).await?;
            let mut views = Vec::with_capacity(entries.len());
            for entry in entries {
                views.push(view(ctx, entry).await?);
            }
            output(&views, flags.format)
        }
        WordCommands::Delete { tenant, word } => {
            let deleted = ctx.db.delete_word(*tenant, word).await?;
            if !deleted {
                anyhow::bail!("word '{word}' not found for tenant {tenant}");
            }
            output(&serde_json::json!({ "deleted": word }), flags.format)
        }
        WordCommands::Import { tenant, file } => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let words = parse_word_list(&text)
                .with_context(|| format!("failed to parse {}", file.display()))?;
            let imported = ctx.db.import_words(*tenant, &words, now).await?;
            output(&serde_json::json!({ "imported": imported }), flags.format)
        }
    }
}

async fn find(ctx: &AppContext, tenant: TenantId, word: &str) -> anyhow::Result<WordEntry> {
    ctx.db
        .find_word(tenant, word)
        .await?
        .with_context(|| format!("word '{word}' not found for tenant {tenant}"))
}
