use leak_core::namespace::Namespace;
use leak_core::responses::RefreshReport;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::NamespaceArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::pipeline::RefreshOrchestrator;

/// Handle `leakwatch refresh`.
pub async fn handle(args: &NamespaceArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let namespaces = args
        .namespace
        .map_or_else(|| Namespace::ALL.to_vec(), |namespace| vec![namespace]);
    let (reports, failed) = refresh_namespaces(ctx, &namespaces).await;
    output(&reports, flags.format)?;
    if !failed.is_empty() {
        anyhow::bail!("refresh could not read the directory for: {}", join(&failed));
    }
    Ok(())
}

/// Refresh each namespace in turn. A namespace whose directory cannot be read
/// is logged and returned in the second list; the others still run.
pub async fn refresh_namespaces(
    ctx: &AppContext,
    namespaces: &[Namespace],
) -> (Vec<RefreshReport>, Vec<Namespace>) {
    let orchestrator = RefreshOrchestrator::new(&ctx.db, &ctx.registry)
        .with_concurrency(ctx.config.general.concurrency);

    let mut reports = Vec::with_capacity(namespaces.len());
    let mut failed = Vec::new();
    for &namespace in namespaces {
        match orchestrator.refresh_namespace(namespace).await {
            Ok(report) => reports.push(report),
            Err(error) => {
                tracing::error!(%namespace, %error, "refresh pass aborted");
                failed.push(namespace);
            }
        }
    }
    (reports, failed)
}

pub fn join(namespaces: &[Namespace]) -> String {
    namespaces
        .iter()
        .copied()
        .map(Namespace::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
