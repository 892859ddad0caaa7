//! Reading the files an engine leaves behind for one seating

use arena_core::{MatchError, SeatErrorRecord, SeatOutcome, TrialGroupId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Per-seat ranks, written by the engine
pub const SUMMARY_FILE: &str = "summary.json";

/// Seat-indexed error records, written by the engine
pub const ERRORS_FILE: &str = "errors.json";

/// Seeds handed to the engine, written before it starts
pub const SEEDS_FILE: &str = "seeds.json";

#[derive(Debug, Deserialize)]
struct EngineSummary {
    #[serde(default)]
    rank: Option<Vec<u32>>,
}

/// Output location of one seating: `{logs_dir}/{batch_id}/{trial_group}`
pub fn seating_dir(logs_dir: &Path, batch_id: &str, trial_group: TrialGroupId) -> PathBuf {
    logs_dir.join(batch_id).join(trial_group.to_string())
}

/// Load the summary and error list of one seating.
///
/// A missing or unparsable file is a data-integrity failure. Missing fields
/// are left as `None` for the aggregator to reject.
pub async fn read_seat_outcome(
    dir: &Path,
    trial_group: TrialGroupId,
) -> Result<SeatOutcome, MatchError> {
    let summary: EngineSummary = read_json(&dir.join(SUMMARY_FILE), trial_group).await?;
    let errors: Vec<SeatErrorRecord> = read_json(&dir.join(ERRORS_FILE), trial_group).await?;

    Ok(SeatOutcome {
        ranks: summary.rank,
        errors,
    })
}

async fn read_json<T: DeserializeOwned>(
    path: &Path,
    trial_group: TrialGroupId,
) -> Result<T, MatchError> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|e| {
        MatchError::integrity(trial_group, format!("failed to read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&contents).map_err(|e| {
        MatchError::integrity(trial_group, format!("failed to parse {}: {}", path.display(), e))
    })
}

#[cfg(test)]
#[path = "artifacts_tests.rs"]
mod tests;
