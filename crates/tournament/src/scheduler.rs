//! Match scheduler: one fair group, four seatings, one report

use arena_core::{
    aggregate_results, duplicate_seatings, DuplicateSeating, EngineError, FairnessSelector,
    MatchError, MatchReport, ParticipantId, ParticipantPool, PlayCounter, SeedSequence,
    SeedSequenceGenerator, SimulationEngine, TrialRequest,
};
use futures::future::try_join_all;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::artifacts::{read_seat_outcome, seating_dir};

/// Configuration for a scheduler
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Seeds (trials) played by each seating
    pub trials_per_seating: usize,
    /// Root under which each seating gets `{batch_id}/{trial_group}`
    pub logs_dir: PathBuf,
    /// Upper bound on one engine invocation (None = no limit)
    pub seating_timeout: Option<Duration>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            trials_per_seating: 100,
            logs_dir: PathBuf::from("logs"),
            seating_timeout: None,
        }
    }
}

/// Batch identifier of match `index` out of `total` in a run
pub fn batch_id(run_name: &str, index: usize, total: usize) -> String {
    if total <= 1 {
        run_name.to_string()
    } else {
        format!("{}-{:03}", run_name, index)
    }
}

/// Runs duplicate matches against a simulation engine.
///
/// Selection and play-count updates go through one mutex, so several
/// `run_match` calls may be in flight without corrupting fairness state.
pub struct MatchScheduler<E> {
    config: SchedulerConfig,
    pool: ParticipantPool,
    engine: E,
    selector: Mutex<FairnessSelector>,
    seeds: Mutex<SeedSequenceGenerator>,
}

impl<E: SimulationEngine> MatchScheduler<E> {
    pub fn new(
        config: SchedulerConfig,
        pool: ParticipantPool,
        engine: E,
        selector: FairnessSelector,
        seeds: SeedSequenceGenerator,
    ) -> Self {
        Self {
            config,
            pool,
            engine,
            selector: Mutex::new(selector),
            seeds: Mutex::new(seeds),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Snapshot of the current play counts
    pub async fn play_counts(&self) -> PlayCounter {
        self.selector.lock().await.counter().clone()
    }

    /// Play one full match and return its report.
    ///
    /// Play counts are only credited once the report is complete; any
    /// failure leaves them untouched.
    pub async fn run_match(&self, batch_id: &str) -> Result<MatchReport, MatchError> {
        let group = self.selector.lock().await.select_group()?;
        info!(batch = batch_id, group = ?group, engine = self.engine.name(), "starting match");

        match self.play(batch_id, &group).await {
            Ok(report) => {
                self.selector.lock().await.record_played(&group)?;
                info!(
                    batch = batch_id,
                    errors = report.errors().len(),
                    "match complete"
                );
                Ok(report)
            }
            Err(e) => {
                error!(batch = batch_id, group = ?group, "match abandoned: {}", e);
                Err(e)
            }
        }
    }

    async fn play(&self, batch_id: &str, group: &[ParticipantId]) -> Result<MatchReport, MatchError> {
        let seeds = self
            .seeds
            .lock()
            .await
            .generate(self.config.trials_per_seating);
        let seatings = duplicate_seatings(group)?;

        // First failure drops the remaining seatings
        try_join_all(
            seatings
                .iter()
                .map(|seating| self.run_seating(batch_id, seating, seeds.clone())),
        )
        .await?;

        let mut outcomes = Vec::with_capacity(seatings.len());
        for seating in &seatings {
            let dir = seating_dir(&self.config.logs_dir, batch_id, seating.trial_group);
            outcomes.push(read_seat_outcome(&dir, seating.trial_group).await?);
        }

        aggregate_results(batch_id, seeds, &seatings, outcomes)
    }

    async fn run_seating(
        &self,
        batch_id: &str,
        seating: &DuplicateSeating,
        seeds: SeedSequence,
    ) -> Result<(), MatchError> {
        let request = TrialRequest {
            batch_id: batch_id.to_string(),
            rotation: seating.rotation,
            trial_group: seating.trial_group,
            handles: self.pool.handles_for(&seating.participants)?,
            seeds,
            output_dir: seating_dir(&self.config.logs_dir, batch_id, seating.trial_group),
        };

        info!(
            rotation = seating.rotation,
            trial_group = %seating.trial_group,
            "start games"
        );

        let result = match self.config.seating_timeout {
            Some(limit) => tokio::time::timeout(limit, self.engine.run_trials(request))
                .await
                .unwrap_or(Err(EngineError::Timeout(limit))),
            None => self.engine.run_trials(request).await,
        };

        result.map_err(|source| {
            warn!(
                rotation = seating.rotation,
                trial_group = %seating.trial_group,
                "seating failed: {}",
                source
            );
            MatchError::EngineInvocation {
                rotation: seating.rotation,
                trial_group: seating.trial_group,
                source,
            }
        })
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
