//! Error types for match scheduling.

use std::time::Duration;
use thiserror::Error;

use crate::types::{ParticipantId, TrialGroupId};

/// Errors raised by a simulation engine for a single seating.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine process could not be started
    #[error("Failed to spawn engine: {0}")]
    Spawn(#[source] std::io::Error),

    /// The engine ran but reported failure
    #[error("Engine exited unsuccessfully: {0}")]
    Exit(String),

    /// Preparing or collecting engine files failed
    #[error("Engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The seating did not finish within its time budget
    #[error("Engine timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Other(String),
}

impl EngineError {
    /// Creates a free-form engine error.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Errors that abort a match.
///
/// None of these leave fairness state modified: play counts are only
/// recorded after a complete report exists.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Not enough participants to seat a group
    #[error("Pool has {available} participants, at least {required} are needed")]
    PoolExhaustion { available: usize, required: usize },

    /// The engine failed or timed out on one seating
    #[error("Engine failed on seating {rotation} (trial group {trial_group}): {source}")]
    EngineInvocation {
        rotation: usize,
        trial_group: TrialGroupId,
        #[source]
        source: EngineError,
    },

    /// An engine artifact is missing, unreadable or lacks required fields
    #[error("Bad engine output for trial group {trial_group}: {detail}")]
    DataIntegrity {
        trial_group: TrialGroupId,
        detail: String,
    },

    /// Fewer or more outcomes than seatings were handed to the aggregator
    #[error("Expected {expected} seat outcomes, got {found}")]
    OutcomeCount { expected: usize, found: usize },

    #[error("Unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    #[error("Participant {0} appears more than once")]
    DuplicateParticipant(ParticipantId),

    #[error("Duplicate sets need a group of 4 participants, got {len}")]
    InvalidGroup { len: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MatchError {
    /// Creates a data-integrity error for a trial group.
    pub fn integrity(trial_group: TrialGroupId, detail: impl Into<String>) -> Self {
        Self::DataIntegrity {
            trial_group,
            detail: detail.into(),
        }
    }
}

pub type Result<T, E = MatchError> = std::result::Result<T, E>;
