use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use rescat_core::query::RecordFilter;
use rescat_db::service::RecordService;

use crate::cli::ExportArgs;

/// Handle `rescat export`.
pub async fn handle(args: &ExportArgs, service: &RecordService) -> anyhow::Result<()> {
    let filter = RecordFilter {
        search: args.search.clone(),
        category: args.category.clone(),
        date_from: args.from,
        date_to: args.to,
    };

    let mut csv = Vec::new();
    let count = service.export_csv(&filter, &mut csv).await?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            writer.write_all(&csv)?;
            writer.flush()?;
            tracing::info!(count, path = %path.display(), "CSV export written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&csv)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
