//! Core data model shared by every stage of a duplicate match.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use crate::error::{MatchError, Result};

/// Number of participants seated in every match
pub const GROUP_SIZE: usize = 4;

/// Stable identifier of a competitor in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ParticipantId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Opaque description of how a participant plays (program path, bundle, config...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantHandle(String);

impl ParticipantHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantHandle {
    fn from(handle: &str) -> Self {
        Self::new(handle)
    }
}

/// Fixed mapping from participant to the resource that drives it.
///
/// Built once and never mutated. Iteration is in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantPool {
    entries: BTreeMap<ParticipantId, ParticipantHandle>,
}

impl ParticipantPool {
    pub fn new(entries: impl IntoIterator<Item = (ParticipantId, ParticipantHandle)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn handle(&self, id: ParticipantId) -> Option<&ParticipantHandle> {
        self.entries.get(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.entries.keys().copied()
    }

    /// Resolve an ordered list of participants to their handles, preserving order.
    pub fn handles_for(&self, ids: &[ParticipantId]) -> Result<Vec<ParticipantHandle>> {
        ids.iter()
            .map(|&id| {
                self.handle(id)
                    .cloned()
                    .ok_or(MatchError::UnknownParticipant(id))
            })
            .collect()
    }
}

/// One independent source of trial randomness.
///
/// Serialized as a `[nonce, key]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(u64, u64)", into = "(u64, u64)")]
pub struct Seed {
    pub nonce: u64,
    pub key: u64,
}

impl Seed {
    pub fn new(nonce: u64, key: u64) -> Self {
        Self { nonce, key }
    }
}

impl From<(u64, u64)> for Seed {
    fn from((nonce, key): (u64, u64)) -> Self {
        Self { nonce, key }
    }
}

impl From<Seed> for (u64, u64) {
    fn from(seed: Seed) -> Self {
        (seed.nonce, seed.key)
    }
}

/// Ordered seeds shared by every seating of a match.
///
/// A value object: seatings receive clones, never references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeedSequence(Vec<Seed>);

impl SeedSequence {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Seed> {
        self.0.iter()
    }
}

impl From<Vec<Seed>> for SeedSequence {
    fn from(seeds: Vec<Seed>) -> Self {
        Self(seeds)
    }
}

/// Unique tag scoping the artifacts of one seating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrialGroupId(Uuid);

impl TrialGroupId {
    /// Generates a fresh random (v4) identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrialGroupId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TrialGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One seat assignment of the selected group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSeating {
    /// How many places the group was rotated left (0 = selection order)
    pub rotation: usize,
    pub trial_group: TrialGroupId,
    /// Participants in seat order
    pub participants: Vec<ParticipantId>,
}

/// Engine-reported error, keyed by seat position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatErrorRecord {
    /// 0-based seat; `None` when the engine omitted it
    #[serde(default)]
    pub player_id: Option<usize>,
}

/// Raw result of one seating as read from the engine's artifacts.
///
/// Fields the aggregator requires are optional here so that missing data
/// can be reported instead of failing deep inside deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatOutcome {
    /// Final rank per seat (1 = best)
    pub ranks: Option<Vec<u32>>,
    pub errors: Vec<SeatErrorRecord>,
}

/// Per-seating entry of a [`MatchReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "log_id")]
    pub trial_group: TrialGroupId,
    #[serde(rename = "user_ids")]
    pub participants: Vec<ParticipantId>,
    /// Ranks exactly as the engine reported them, one per seat
    pub ranks: Vec<u32>,
}

/// Engine error remapped from seat position to participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    #[serde(rename = "duplication_index")]
    pub rotation: usize,
    #[serde(rename = "player_id")]
    pub seat: usize,
    #[serde(rename = "user_id")]
    pub participant: ParticipantId,
}
