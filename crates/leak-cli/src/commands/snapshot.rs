use anyhow::Context;
use leak_core::errors::CoreError;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SnapshotArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `leakwatch snapshot`.
pub async fn handle(args: &SnapshotArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let posts = ctx
        .db
        .snapshot(args.namespace, &args.name)
        .await
        .with_context(|| format!("failed to read snapshot for '{}'", args.name))?
        .ok_or_else(|| CoreError::NotFound {
            namespace: args.namespace.to_string(),
            name: args.name.clone(),
        })?;
    output(&posts, flags.format)
}
