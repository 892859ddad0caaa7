//! Duplicate seating generation.
//!
//! The selected group is played once per rotation. Seating `i` is the group
//! rotated left by `i`, so across the four seatings every participant sits
//! in every seat exactly once while the seeds stay the same.

use crate::error::{MatchError, Result};
use crate::types::{DuplicateSeating, ParticipantId, TrialGroupId, GROUP_SIZE};

/// Rotate `group` left by `shift` places.
pub fn rotate_left(group: &[ParticipantId], shift: usize) -> Vec<ParticipantId> {
    let mut rotated = group.to_vec();
    if !rotated.is_empty() {
        rotated.rotate_left(shift % group.len());
    }
    rotated
}

/// Build the four seatings of a match, each with a fresh trial group id.
pub fn duplicate_seatings(group: &[ParticipantId]) -> Result<Vec<DuplicateSeating>> {
    if group.len() != GROUP_SIZE {
        return Err(MatchError::InvalidGroup { len: group.len() });
    }

    Ok((0..GROUP_SIZE)
        .map(|rotation| DuplicateSeating {
            rotation,
            trial_group: TrialGroupId::new(),
            participants: rotate_left(group, rotation),
        })
        .collect())
}

#[cfg(test)]
#[path = "duplicate_tests.rs"]
mod tests;
