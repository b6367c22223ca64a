use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod pipeline;
mod write_lock;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("leakwatch error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    if let cli::Commands::Schema = &cli.command {
        return commands::schema::handle(&flags);
    }

    let config = bootstrap::load_config(&flags)?;
    context::warn_unconfigured(&config);

    let command = cli.command;
    let write_lock = if command_requires_write_lock(&command) && !config.store.is_in_memory() {
        Some(write_lock::acquire_for_store(&config.store.path).await?)
    } else {
        None
    };

    let ctx = context::AppContext::init(config)
        .await
        .context("failed to initialize leakwatch application context")?;

    let result = commands::dispatch::dispatch(command, &ctx, &flags).await;
    drop(write_lock);
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LEAKWATCH_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn command_requires_write_lock(command: &cli::Commands) -> bool {
    use crate::cli::DirectoryCommands;

    match command {
        cli::Commands::Bootstrap
        | cli::Commands::Refresh(_)
        | cli::Commands::Cycle => true,
        cli::Commands::Directory { action } => matches!(action, DirectoryCommands::Add { .. }),
        cli::Commands::Notify(_)
        | cli::Commands::Snapshot(_)
        | cli::Commands::Scrapers
        | cli::Commands::Schema => false,
    }
}
