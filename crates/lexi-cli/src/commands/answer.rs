use serde::Serialize;

use lexi_core::responses::Reply;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnswerArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AnswerView {
    #[serde(flatten)]
    reply: Reply,
    text: String,
}

/// Handle `lexi answer`: the reply a chat user would see.
pub async fn handle(args: &AnswerArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let reply = ctx.engine.outcomes().handle(args.tenant, &args.payload).await;
    let text = reply.text();
    output(&AnswerView { reply, text }, flags.format)
}
