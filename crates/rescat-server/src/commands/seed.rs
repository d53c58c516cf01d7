use anyhow::bail;
use rescat_db::service::RecordService;

/// Sample catalog shipped with the binary.
const SAMPLE_RECORDS: &str = include_str!("../../seeds/sample_records.csv");

/// Handle `rescat seed`.
pub async fn handle(service: &RecordService) -> anyhow::Result<()> {
    let existing = service.count_records().await?;
    if existing > 0 {
        bail!("catalog already holds {existing} records; seed only runs on an empty catalog");
    }

    let report = service.import_csv(SAMPLE_RECORDS.as_bytes()).await?;
    println!("Created {} research data entries", report.imported);
    Ok(())
}
