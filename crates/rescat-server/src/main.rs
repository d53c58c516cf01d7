use anyhow::Context;
use clap::Parser;
use rescat_config::RescatConfig;
use rescat_db::service::RecordService;

mod cli;
mod commands;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("rescat error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = RescatConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(path) = &cli.database {
        config.database.path.clone_from(path);
    }
    if config.database.is_in_memory() {
        tracing::warn!("using an in-memory database; records are lost on exit");
    }

    let service = RecordService::new_local(&config.database.path, config.pagination)
        .await
        .with_context(|| format!("failed to open database '{}'", config.database.path))?;

    commands::dispatch(cli.command, service, config).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("RESCAT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
