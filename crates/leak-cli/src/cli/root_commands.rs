use clap::{Args, Subcommand};
use leak_core::namespace::Namespace;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Reset both directory indexes to empty.
    Bootstrap,
    /// Directory index ingestion.
    Directory {
        #[command(subcommand)]
        action: DirectoryCommands,
    },
    /// Refresh stored snapshots from the registered scrapers.
    Refresh(NamespaceArgs),
    /// Send recently discovered posts to the webhook.
    Notify(NamespaceArgs),
    /// Print one entity's stored snapshot.
    Snapshot(SnapshotArgs),
    /// List registered scraper identifiers.
    Scrapers,
    /// Full ingestion cycle: bootstrap, collect, refresh, notify.
    Cycle,
    /// Print the JSON schema of a stored post.
    Schema,
}

/// Directory index commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DirectoryCommands {
    /// Append entity names to a namespace's directory.
    Add {
        namespace: Namespace,
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Show a namespace's directory.
    List { namespace: Namespace },
}

#[derive(Clone, Debug, Args)]
pub struct NamespaceArgs {
    /// Limit the run to one namespace (groups or leaks).
    #[arg(long, short = 'n')]
    pub namespace: Option<Namespace>,
}

#[derive(Clone, Debug, Args)]
pub struct SnapshotArgs {
    pub namespace: Namespace,
    /// Entity display name, exactly as stored.
    pub name: String,
}
