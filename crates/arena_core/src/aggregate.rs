//! Merging per-seating outcomes into a single match report

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};
use crate::types::{
    DuplicateSeating, ErrorRecord, MatchRecord, ParticipantId, SeatOutcome, SeedSequence,
    GROUP_SIZE,
};

/// Complete result of one duplicate match.
///
/// Only [`aggregate_results`] builds one, and only from a full set of valid
/// outcomes, so holding a report means every seating finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    batch_id: String,
    #[serde(rename = "seed_values")]
    seeds: SeedSequence,
    /// Selection order (rotation 0)
    #[serde(rename = "users")]
    participants: Vec<ParticipantId>,
    matches: Vec<MatchRecord>,
    errors: Vec<ErrorRecord>,
}

/// How one participant placed across the seatings of a match
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub participant: ParticipantId,
    /// `placements[r]` = number of seatings finished at rank `r + 1`
    pub placements: [u32; GROUP_SIZE],
    /// `None` when the engine reported no usable rank for this participant
    pub average_rank: Option<f64>,
}

impl MatchReport {
    pub fn batch_id(&self) -> &str {
        &self.batch_id
    }

    pub fn seeds(&self) -> &SeedSequence {
        &self.seeds
    }

    pub fn participants(&self) -> &[ParticipantId] {
        &self.participants
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn errors(&self) -> &[ErrorRecord] {
        &self.errors
    }

    /// Errors attributed to one participant, across all seatings
    pub fn errors_for(&self, participant: ParticipantId) -> impl Iterator<Item = &ErrorRecord> {
        self.errors
            .iter()
            .filter(move |e| e.participant == participant)
    }

    /// Per-participant placements, in selection order.
    ///
    /// Ranks outside `1..=4` and seats the engine did not rank are skipped.
    pub fn standings(&self) -> Vec<Standing> {
        self.participants
            .iter()
            .map(|&participant| {
                let mut placements = [0u32; GROUP_SIZE];
                let mut sum = 0u32;
                let mut counted = 0u32;

                for record in &self.matches {
                    let rank = record
                        .participants
                        .iter()
                        .position(|&p| p == participant)
                        .and_then(|seat| record.ranks.get(seat).copied());

                    if let Some(rank @ 1..=4) = rank {
                        placements[rank as usize - 1] += 1;
                        sum += rank;
                        counted += 1;
                    }
                }

                Standing {
                    participant,
                    placements,
                    average_rank: (counted > 0).then(|| sum as f64 / counted as f64),
                }
            })
            .collect()
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Match: {} ===\n\n", self.batch_id));
        report.push_str(&format!(
            "Seatings: {}, trials per seating: {}\n\n",
            self.matches.len(),
            self.seeds.len()
        ));

        report.push_str(&format!(
            "{:<12} {:>5} {:>5} {:>5} {:>5} {:>8} {:>7}\n",
            "Participant", "1st", "2nd", "3rd", "4th", "Avg", "Errors"
        ));
        report.push_str(&"-".repeat(54));
        report.push('\n');

        for standing in self.standings() {
            let avg = standing
                .average_rank
                .map(|a| format!("{:.2}", a))
                .unwrap_or_else(|| "-".to_string());
            report.push_str(&format!(
                "{:<12} {:>5} {:>5} {:>5} {:>5} {:>8} {:>7}\n",
                standing.participant.to_string(),
                standing.placements[0],
                standing.placements[1],
                standing.placements[2],
                standing.placements[3],
                avg,
                self.errors_for(standing.participant).count()
            ));
        }

        report
    }
}

/// Build the report for a match from its seatings and their outcomes.
///
/// `outcomes[i]` must belong to `seatings[i]`. Ranks are copied as reported;
/// each error's seat index is resolved against that seating's rotated order.
pub fn aggregate_results(
    batch_id: &str,
    seeds: SeedSequence,
    seatings: &[DuplicateSeating],
    outcomes: Vec<SeatOutcome>,
) -> Result<MatchReport> {
    if outcomes.len() != seatings.len() {
        return Err(MatchError::OutcomeCount {
            expected: seatings.len(),
            found: outcomes.len(),
        });
    }
    let participants = match seatings.first() {
        Some(first) => first.participants.clone(),
        None => return Err(MatchError::InvalidGroup { len: 0 }),
    };

    let mut matches = Vec::with_capacity(seatings.len());
    let mut errors = Vec::new();

    for (seating, outcome) in seatings.iter().zip(outcomes) {
        let ranks = outcome.ranks.ok_or_else(|| {
            MatchError::integrity(seating.trial_group, "summary has no rank list")
        })?;

        for (i, raw) in outcome.errors.iter().enumerate() {
            let seat = raw.player_id.ok_or_else(|| {
                MatchError::integrity(
                    seating.trial_group,
                    format!("error record {} has no player_id", i),
                )
            })?;
            let participant = seating.participants.get(seat).copied().ok_or_else(|| {
                MatchError::integrity(
                    seating.trial_group,
                    format!("error record {} names seat {} of {}", i, seat, seating.participants.len()),
                )
            })?;

            errors.push(ErrorRecord {
                rotation: seating.rotation,
                seat,
                participant,
            });
        }

        matches.push(MatchRecord {
            trial_group: seating.trial_group,
            participants: seating.participants.clone(),
            ranks,
        });
    }

    Ok(MatchReport {
        batch_id: batch_id.to_string(),
        seeds,
        participants,
        matches,
        errors,
    })
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
