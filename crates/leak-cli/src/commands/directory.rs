use leak_core::responses::DirectoryReport;

use crate::cli::{DirectoryCommands, GlobalFlags};
use crate::context::AppContext;
use crate::output::output;

/// Handle `leakwatch directory`.
pub async fn handle(
    action: &DirectoryCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let report = match action {
        DirectoryCommands::Add { namespace, names } => {
            let added = ctx.db.add_to_directory(*namespace, names.as_slice()).await?;
            tracing::info!(%namespace, added = added.len(), "directory updated");
            DirectoryReport {
                namespace: *namespace,
                added,
                entities: ctx.db.directory(*namespace).await?,
            }
        }
        DirectoryCommands::List { namespace } => DirectoryReport {
            namespace: *namespace,
            added: Vec::new(),
            entities: ctx.db.directory(*namespace).await?,
        },
    };
    output(&report, flags.format)
}
