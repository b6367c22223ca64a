//! `leakwatch cycle`: one full ingestion pass.
//!
//! Stages run strictly in order, each awaited before the next starts:
//! reset directories, collect entity names, refresh snapshots, notify.

use leak_core::namespace::Namespace;
use leak_core::responses::{CycleReport, DirectoryReport};

use crate::cli::GlobalFlags;
use crate::commands::notify::notify_namespaces;
use crate::commands::refresh::{join, refresh_namespaces};
use crate::context::AppContext;
use crate::output::output;

/// Handle `leakwatch cycle`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (report, failed) = run_cycle(ctx).await?;
    output(&report, flags.format)?;
    if !failed.is_empty() {
        anyhow::bail!("cycle finished with unreadable namespaces: {}", join(&failed));
    }
    Ok(())
}

/// Run every stage and return the combined report plus any namespace whose
/// refresh or notify pass could not start.
///
/// Reset and collection failures end the cycle: refreshing against a
/// half-written directory would silently skip entities.
pub async fn run_cycle(ctx: &AppContext) -> anyhow::Result<(CycleReport, Vec<Namespace>)> {
    let mut report = CycleReport::default();

    ctx.db.reset_directories().await?;
    report.reset = Namespace::ALL.to_vec();

    for namespace in Namespace::ALL {
        let names = ctx
            .config
            .feeds_in(namespace)
            .map(|feed| feed.name.as_str())
            .collect::<Vec<_>>();
        let added = ctx.db.add_to_directory(namespace, names.as_slice()).await?;
        tracing::info!(%namespace, collected = added.len(), "collection complete");
        report.collected.push(DirectoryReport {
            namespace,
            added,
            entities: ctx.db.directory(namespace).await?,
        });
    }

    let (refreshed, mut failed) = refresh_namespaces(ctx, &Namespace::ALL).await;
    report.refreshed = refreshed;

    let (notified, notify_failed) = notify_namespaces(ctx, &ctx.config.notify.namespaces).await;
    report.notified = notified;
    for namespace in notify_failed {
        if !failed.contains(&namespace) {
            failed.push(namespace);
        }
    }

    Ok((report, failed))
}
