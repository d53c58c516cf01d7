use std::fs::File;
use std::io::BufReader;

use anyhow::Context;
use rescat_db::service::RecordService;

use crate::cli::ImportArgs;

/// Handle `rescat import <FILE>`.
pub async fn handle(args: &ImportArgs, service: &RecordService) -> anyhow::Result<()> {
    let file = File::open(&args.file)
        .with_context(|| format!("failed to open {}", args.file.display()))?;
    let report = service
        .import_csv(BufReader::new(file))
        .await
        .with_context(|| format!("failed to import {}", args.file.display()))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
