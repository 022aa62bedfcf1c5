use serde::Serialize;

use lexi_engine::BatchReport;
use lexi_engine::fanout::TenantResult;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MaintainArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct MaintainRow {
    tenant: i64,
    evicted: Option<u64>,
    added: Option<u64>,
    size: Option<u64>,
    error: Option<String>,
}

impl From<TenantResult<BatchReport>> for MaintainRow {
    fn from(r: TenantResult<BatchReport>) -> Self {
        match r.result {
            Ok(report) => Self {
                tenant: r.tenant.get(),
                evicted: Some(report.evicted),
                added: Some(report.added),
                size: Some(report.size),
                error: None,
            },
            Err(e) => Self {
                tenant: r.tenant.get(),
                evicted: None,
                added: None,
                size: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Handle `lexi maintain`.
pub async fn handle(
    args: &MaintainArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let maintainer = ctx.engine.maintainer();
    let results = match args.tenant {
        Some(tenant) => vec![TenantResult {
            tenant,
            result: maintainer.maintain_tenant(tenant).await,
        }],
        None => maintainer.tick().await?,
    };
    let rows: Vec<MaintainRow> = results.into_iter().map(MaintainRow::from).collect();
    output(&rows, flags.format)
}
