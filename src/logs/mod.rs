use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::core::Report;

#[derive(Debug, Serialize)]
struct RunLog {
    schema_version: &'static str,
    tool_version: String,
    command: String,
    started_at: String,
    finished_at: String,
    status: String,
    input: String,
    sections: usize,
    entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// What one invocation did, as recorded in its run log.
#[derive(Debug, Clone)]
pub struct RunRecord<'a> {
    pub command: &'a str,
    pub input: &'a str,
    pub started_at: OffsetDateTime,
    pub finished_at: OffsetDateTime,
    pub report: Option<&'a Report>,
    pub error: Option<String>,
}

pub fn logs_dir(home_dir: &Path) -> PathBuf {
    crate::config::config_dir(home_dir).join("logs")
}

pub fn write_run_log(home_dir: &Path, record: &RunRecord<'_>) -> Result<PathBuf> {
    let dir = logs_dir(home_dir);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

    let pid = std::process::id();
    let ts = record.finished_at.unix_timestamp_nanos();
    let file_name = format!("{}-{pid}-{ts}.json", record.command);
    let path = dir.join(file_name);

    let status = if record.error.is_some() { "error" } else { "ok" }.to_string();

    let log = RunLog {
        schema_version: "1.0",
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        command: record.command.to_string(),
        started_at: record
            .started_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string()),
        finished_at: record
            .finished_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| "unknown".to_string()),
        status,
        input: mask_home(record.input, home_dir),
        sections: record.report.map(Report::len).unwrap_or(0),
        entries: record.report.map(Report::entry_count).unwrap_or(0),
        error: record.error.clone(),
    };

    let buf = serde_json::to_vec_pretty(&log).context("failed to serialize run log (JSON)")?;
    std::fs::write(&path, buf)
        .with_context(|| format!("failed to write run log: {}", path.display()))?;
    Ok(path)
}

fn mask_home(path: &str, home_dir: &Path) -> String {
    let home = home_dir.display().to_string();
    match path.strip_prefix(&home) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}
