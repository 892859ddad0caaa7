//! Match report storage

use arena_core::{MatchReport, PlayCounter};
use std::io;
use std::path::{Path, PathBuf};

/// Destination for finished match reports
pub trait ReportWriter {
    /// Persist `report` under its batch id, returning where it went
    fn write(&self, report: &MatchReport) -> io::Result<PathBuf>;
}

/// Writes each report to `{dir}/{batch_id}.json`
#[derive(Debug, Clone)]
pub struct JsonReportWriter {
    dir: PathBuf,
}

impl JsonReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, batch_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", batch_id))
    }
}

impl ReportWriter for JsonReportWriter {
    fn write(&self, report: &MatchReport) -> io::Result<PathBuf> {
        let path = self.path_for(report.batch_id());
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }
}

/// Load a report from a JSON file
pub fn load_report(path: &Path) -> io::Result<MatchReport> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Save play counts so a later run can pick up where this one stopped
pub fn save_play_counts(path: &Path, counts: &PlayCounter) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(counts)?;
    std::fs::write(path, json)
}

pub fn load_play_counts(path: &Path) -> io::Result<PlayCounter> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
