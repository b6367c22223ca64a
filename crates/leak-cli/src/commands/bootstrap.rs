use leak_core::namespace::Namespace;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct BootstrapResponse {
    reset: Vec<Namespace>,
}

/// Handle `leakwatch bootstrap`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.db.reset_directories().await?;
    output(
        &BootstrapResponse {
            reset: Namespace::ALL.to_vec(),
        },
        flags.format,
    )
}
