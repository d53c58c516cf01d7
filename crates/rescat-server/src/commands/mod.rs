use rescat_config::RescatConfig;
use rescat_db::service::RecordService;

use crate::cli::Commands;

mod export;
mod import;
mod seed;
mod serve;

/// Route a parsed subcommand to its handler.
pub async fn dispatch(
    command: Commands,
    service: RecordService,
    config: RescatConfig,
) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => serve::handle(&args, service, &config).await,
        Commands::Import(args) => import::handle(&args, &service).await,
        Commands::Export(args) => export::handle(&args, &service).await,
        Commands::Seed => seed::handle(&service).await,
    }
}
