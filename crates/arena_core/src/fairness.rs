//! Fairness-driven group selection and play-count tracking

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{MatchError, Result};
use crate::types::{ParticipantId, ParticipantPool, GROUP_SIZE};

/// Number of completed matches per participant.
///
/// Holds an entry for every participant of the pool it was built from, and
/// never gains or loses keys afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayCounter {
    counts: BTreeMap<ParticipantId, u32>,
}

impl PlayCounter {
    /// Every participant of the pool starts at zero
    pub fn for_pool(pool: &ParticipantPool) -> Self {
        Self {
            counts: pool.ids().map(|id| (id, 0)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, id: ParticipantId) -> Option<u32> {
        self.counts.get(&id).copied()
    }

    pub fn as_map(&self) -> &BTreeMap<ParticipantId, u32> {
        &self.counts
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticipantId, u32)> + '_ {
        self.counts.iter().map(|(&id, &count)| (id, count))
    }

    /// Least-played participant; ties go to the lowest id
    pub fn least_played(&self) -> Option<ParticipantId> {
        self.iter()
            .min_by_key(|&(id, count)| (count, id))
            .map(|(id, _)| id)
    }

    /// Sum of all counts (four per completed match)
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| c as u64).sum()
    }

    /// All-or-nothing: unknown or repeated ids leave every count untouched
    fn increment(&mut self, ids: &[ParticipantId]) -> Result<()> {
        let mut seen = BTreeSet::new();
        for &id in ids {
            if !self.counts.contains_key(&id) {
                return Err(MatchError::UnknownParticipant(id));
            }
            if !seen.insert(id) {
                return Err(MatchError::DuplicateParticipant(id));
            }
        }
        for id in ids {
            if let Some(count) = self.counts.get_mut(id) {
                *count += 1;
            }
        }
        Ok(())
    }
}

/// Picks the next group: the least-played participant plus three at random.
///
/// Only the anchor slot is fairness-driven; the complement is a uniform
/// draw without replacement from everyone else.
#[derive(Debug, Clone)]
pub struct FairnessSelector {
    counter: PlayCounter,
    rng: StdRng,
}

impl FairnessSelector {
    pub fn new(pool: &ParticipantPool, rng: StdRng) -> Self {
        Self {
            counter: PlayCounter::for_pool(pool),
            rng,
        }
    }

    /// Seeded selector, or an entropy-seeded one when `seed` is `None`
    pub fn with_seed(pool: &ParticipantPool, seed: Option<u64>) -> Self {
        Self::new(pool, rng_from(seed))
    }

    /// Continue from a saved counter, seeded like [`FairnessSelector::with_seed`]
    pub fn resume(pool: &ParticipantPool, saved: &PlayCounter, seed: Option<u64>) -> Result<Self> {
        Self::with_counts(pool, saved.as_map(), rng_from(seed))
    }

    /// Resume from previously saved counts.
    ///
    /// Participants missing from `counts` start at zero; ids outside the
    /// pool are rejected.
    pub fn with_counts(
        pool: &ParticipantPool,
        counts: &BTreeMap<ParticipantId, u32>,
        rng: StdRng,
    ) -> Result<Self> {
        if let Some(&unknown) = counts.keys().find(|id| !pool.contains(**id)) {
            return Err(MatchError::UnknownParticipant(unknown));
        }
        let mut selector = Self::new(pool, rng);
        for (id, count) in counts {
            selector.counter.counts.insert(*id, *count);
        }
        Ok(selector)
    }

    pub fn counter(&self) -> &PlayCounter {
        &self.counter
    }

    pub fn play_count(&self, id: ParticipantId) -> Option<u32> {
        self.counter.get(id)
    }

    /// Choose the next group. The anchor (least played) is always at index 0.
    pub fn select_group(&mut self) -> Result<Vec<ParticipantId>> {
        let available = self.counter.len();
        let anchor = match self.counter.least_played() {
            Some(anchor) if available >= GROUP_SIZE => anchor,
            _ => {
                return Err(MatchError::PoolExhaustion {
                    available,
                    required: GROUP_SIZE,
                })
            }
        };

        let mut candidates: Vec<ParticipantId> = self
            .counter
            .iter()
            .map(|(id, _)| id)
            .filter(|&id| id != anchor)
            .collect();

        let mut group = Vec::with_capacity(GROUP_SIZE);
        group.push(anchor);
        while group.len() < GROUP_SIZE {
            let pick = self.rng.gen_range(0..candidates.len());
            group.push(candidates.swap_remove(pick));
        }
        Ok(group)
    }

    /// Credit one completed match to each of `ids`.
    ///
    /// Call only once a full report exists for the match.
    pub fn record_played(&mut self, ids: &[ParticipantId]) -> Result<()> {
        self.counter.increment(ids)
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
#[path = "fairness_tests.rs"]
mod tests;
