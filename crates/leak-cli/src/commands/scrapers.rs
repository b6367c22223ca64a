use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ScrapersResponse<'a> {
    count: usize,
    identifiers: Vec<&'a str>,
}

/// Handle `leakwatch scrapers`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(
        &ScrapersResponse {
            count: ctx.registry.len(),
            identifiers: ctx.registry.identifiers().collect(),
        },
        flags.format,
    )
}
