use crate::usecase::stats::SccReport;
use anyhow::Result;
use tokio::fs;

#[cfg(test)]
pub(crate) async fn read_report_file(path: &str) -> Result<SccReport> {
    let raw = fs::read_to_string(path).await?;
    let report: SccReport = serde_json::from_str(&raw)?;
    Ok(report)
}

pub async fn write_report_file(path: &str, report: &SccReport) -> Result<()> {
    let pretty = serde_json::to_string_pretty(report)?;
    fs::write(path, pretty).await?;
    Ok(())
}
