use leak_core::namespace::Namespace;
use leak_core::responses::NotifyReport;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::NamespaceArgs;
use crate::commands::refresh::join;
use crate::context::AppContext;
use crate::output::output;

/// Handle `leakwatch notify`.
pub async fn handle(args: &NamespaceArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let namespaces = args
        .namespace
        .map_or_else(|| ctx.config.notify.namespaces.clone(), |namespace| vec![namespace]);
    let (reports, failed) = notify_namespaces(ctx, &namespaces).await;
    output(&reports, flags.format)?;
    if !failed.is_empty() {
        anyhow::bail!("notify could not read snapshots for: {}", join(&failed));
    }
    Ok(())
}

/// Run the notifier over each namespace, stamped with the local clock.
pub async fn notify_namespaces(
    ctx: &AppContext,
    namespaces: &[Namespace],
) -> (Vec<NotifyReport>, Vec<Namespace>) {
    let now = chrono::Local::now().naive_local();

    let mut reports = Vec::with_capacity(namespaces.len());
    let mut failed = Vec::new();
    for &namespace in namespaces {
        match ctx.notifier.notify_namespace(&ctx.db, namespace, now).await {
            Ok(report) => reports.push(report),
            Err(error) => {
                tracing::error!(%namespace, %error, "notification pass aborted");
                failed.push(namespace);
            }
        }
    }
    (reports, failed)
}
