//! Tournament configuration file (TOML)

use anyhow::{bail, Context, Result};
use arena_core::{
    FairnessSelector, ParticipantHandle, ParticipantId, ParticipantPool, SeedRange,
    SeedSequenceGenerator,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::process_engine::CommandEngine;
use crate::results::load_play_counts;
use crate::scheduler::SchedulerConfig;

/// Everything needed to run a batch of matches
#[derive(Debug, Clone, Deserialize)]
pub struct TournamentConfig {
    /// Prefix of every batch id in the run
    #[serde(default = "default_run_name")]
    pub run_name: String,
    /// Matches to play in the run
    #[serde(default = "default_matches")]
    pub matches: usize,
    #[serde(default = "default_trials_per_seating")]
    pub trials_per_seating: usize,
    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,
    /// Where finished reports are written
    #[serde(default = "default_matching_dir")]
    pub matching_dir: PathBuf,
    /// Play counts carried between runs (None = start from zero every run)
    pub counts_file: Option<PathBuf>,
    /// Seed for group selection (None = entropy)
    pub selector_seed: Option<u64>,
    /// Seed for trial seed generation (None = entropy)
    pub trial_seed: Option<u64>,
    pub seating_timeout_secs: Option<u64>,
    #[serde(default)]
    pub seed_range: SeedRange,
    pub engine: EngineConfig,
    /// Participant id -> handle passed to the engine
    pub participants: BTreeMap<String, String>,
}

/// External simulator invocation
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub program: PathBuf,
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_run_name() -> String {
    "run".to_string()
}

fn default_matches() -> usize {
    1
}

fn default_trials_per_seating() -> usize {
    100
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_matching_dir() -> PathBuf {
    PathBuf::from("matching")
}

impl TournamentConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.seed_range.validate()?;
        if self.trials_per_seating == 0 {
            bail!("trials_per_seating must be at least 1");
        }
        if self.run_name.is_empty() {
            bail!("run_name must not be empty");
        }
        self.pool()?;
        Ok(())
    }

    /// Participant pool with ids parsed from the table keys
    pub fn pool(&self) -> Result<ParticipantPool> {
        let entries = self
            .participants
            .iter()
            .map(|(key, handle)| {
                let id: u32 = key
                    .trim()
                    .parse()
                    .with_context(|| format!("Participant key {:?} is not an integer id", key))?;
                Ok((ParticipantId(id), ParticipantHandle::new(handle.clone())))
            })
            .collect::<Result<Vec<_>>>()?;

        let pool = ParticipantPool::new(entries.iter().cloned());
        if pool.len() != entries.len() {
            bail!("Participant ids must be unique");
        }
        Ok(pool)
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            trials_per_seating: self.trials_per_seating,
            logs_dir: self.logs_dir.clone(),
            seating_timeout: self.seating_timeout_secs.map(Duration::from_secs),
        }
    }

    /// Fresh selector, or one resumed from `counts_file` when it exists
    pub fn selector(&self, pool: &ParticipantPool) -> Result<FairnessSelector> {
        match &self.counts_file {
            Some(path) if path.exists() => {
                let saved = load_play_counts(path)
                    .with_context(|| format!("Failed to load play counts {}", path.display()))?;
                Ok(FairnessSelector::resume(pool, &saved, self.selector_seed)?)
            }
            _ => Ok(FairnessSelector::with_seed(pool, self.selector_seed)),
        }
    }

    pub fn seed_generator(&self) -> Result<SeedSequenceGenerator> {
        Ok(SeedSequenceGenerator::with_seed(self.seed_range, self.trial_seed)?)
    }

    pub fn engine(&self) -> CommandEngine {
        CommandEngine::new(self.engine.program.clone(), self.engine.args.clone())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
