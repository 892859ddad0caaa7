use super::*;
use crate::duplicate::duplicate_seatings;
use crate::types::{Seed, SeatErrorRecord};

const A: ParticipantId = ParticipantId(1);
const B: ParticipantId = ParticipantId(2);
const C: ParticipantId = ParticipantId(3);
const D: ParticipantId = ParticipantId(4);

fn seeds() -> SeedSequence {
    vec![Seed::new(11, 12), Seed::new(13, 14)].into()
}

fn ranked(ranks: [u32; 4]) -> SeatOutcome {
    SeatOutcome {
        ranks: Some(ranks.to_vec()),
        errors: Vec::new(),
    }
}

fn error_at(seat: usize) -> SeatErrorRecord {
    SeatErrorRecord {
        player_id: Some(seat),
    }
}

#[test]
fn test_report_keeps_seatings_and_ranks_verbatim() {
    let seatings = duplicate_seatings(&[A, B, C, D]).unwrap();
    let outcomes = vec![
        ranked([1, 2, 3, 4]),
        ranked([4, 3, 2, 1]),
        ranked([2, 2, 1, 4]),
        ranked([3, 1, 4, 2]),
    ];

    let report = aggregate_results("batch", seeds(), &seatings, outcomes).unwrap();

    assert_eq!(report.batch_id(), "batch");
    assert_eq!(report.seeds(), &seeds());
    assert_eq!(report.participants(), &[A, B, C, D]);
    assert_eq!(report.matches().len(), 4);
    assert_eq!(report.matches()[2].ranks, vec![2, 2, 1, 4]);
    for (record, seating) in report.matches().iter().zip(&seatings) {
        assert_eq!(record.trial_group, seating.trial_group);
        assert_eq!(record.participants, seating.participants);
    }
    assert!(report.errors().is_empty());
}

#[test]
fn test_error_seat_remaps_to_rotated_participant() {
    let seatings = duplicate_seatings(&[A, B, C, D]).unwrap();
    assert_eq!(seatings[1].participants, vec![B, C, D, A]);

    let mut outcomes = vec![ranked([1, 2, 3, 4]); 4];
    outcomes[1].errors.push(error_at(2));

    let report = aggregate_results("batch", seeds(), &seatings, outcomes).unwrap();

    assert_eq!(
        report.errors(),
        &[ErrorRecord {
            rotation: 1,
            seat: 2,
            participant: C,
        }]
    );
}

#[test]
fn test_errors_ordered_by_seating_then_engine_order() {
    let seatings = duplicate_seatings(&[A, B, C, D]).unwrap();
    let mut outcomes = vec![ranked([1, 2, 3, 4]); 4];
    outcomes[3].errors = vec![error_at(0), error_at(3)];
    outcomes[0].errors = vec![error_at(1)];
    outcomes[2].errors = vec![error_at(0)];

    let report = aggregate_results("batch", seeds(), &seatings, outcomes).unwrap();
    let flattened: Vec<_> = report
        .errors()
        .iter()
        .map(|e| (e.rotation, e.seat, e.participant))
        .collect();

    assert_eq!(
        flattened,
        vec![(0, 1, B), (2, 0, C), (3, 0, D), (3, 3, C)]
    );
    assert_eq!(report.errors_for(C).count(), 2);
}

#[test]
fn test_missing_ranks_is_integrity_failure() {
    let seatings = duplicate_seatings(&[A, B, C, D]).unwrap();
    let mut outcomes = vec![ranked([1, 2, 3, 4]); 4];
    outcomes[2].ranks = None;

    match aggregate_results("batch", seeds(), &seatings, outcomes) {
        Err(MatchError::DataIntegrity { trial_group, .. }) => {
            assert_eq!(trial_group, seatings[2].trial_group)
        }
        other => panic!("expected data integrity failure, got {:?}", other),
    }
}

#[test]
fn test_error_without_player_id_is_integrity_failure() {
    let seatings = duplicate_seatings(&[A, B, C, D]).unwrap();
    let mut outcomes = vec![ranked([1, 2, 3, 4]); 4];
    outcomes[0].errors.push(SeatErrorRecord { player_id: None });

    let result = aggregate_results("batch", seeds(), &seatings, outcomes);
    assert!(matches!(result, Err(MatchError::DataIntegrity { .. })));
}

#[test]
fn test_error_seat_out_of_range_is_integrity_failure() {
    let seatings = duplicate_seatings(&[A, B, C, D]).unwrap();
    let mut outcomes = vec![ranked([1, 2, 3, 4]); 4];
    outcomes[1].errors.push(error_at(4));

    let result = aggregate_results("batch", seeds(), &seatings, outcomes);
    assert!(matches!(result, Err(MatchError::DataIntegrity { .. })));
}

#[test]
fn test_outcome_count_must_match_seatings() {
    let seatings = duplicate_seatings(&[A, B, C, D]).unwrap();
    let outcomes = vec![ranked([1, 2, 3, 4]); 3];

    assert!(matches!(
        aggregate_results("batch", seeds(), &seatings, outcomes),
        Err(MatchError::OutcomeCount {
            expected: 4,
            found: 3
        })
    ));
}

#[test]
fn test_standings_follow_participants_across_rotations() {
    let seatings = duplicate_seatings(&[A, B, C, D]).unwrap();
    // A always wins: seat 0, 3, 2, 1 across the rotations
    let outcomes = vec![
        ranked([1, 2, 3, 4]),
        ranked([2, 3, 4, 1]),
        ranked([3, 4, 1, 2]),
        ranked([4, 1, 2, 3]),
    ];

    let report = aggregate_results("batch", seeds(), &seatings, outcomes).unwrap();
    let standings = report.standings();

    assert_eq!(standings[0].participant, A);
    assert_eq!(standings[0].placements, [4, 0, 0, 0]);
    assert_eq!(standings[0].average_rank, Some(1.0));
    assert_eq!(standings[3].participant, D);
    assert_eq!(standings[3].placements, [0, 0, 0, 4]);

    let text = report.generate_report();
    assert!(text.contains("=== Match: batch ==="));
    assert!(text.contains("1.00"));
}

#[test]
fn test_standings_skip_unranked_seats() {
    let seatings = duplicate_seatings(&[A, B, C, D]).unwrap();
    let outcomes = vec![SeatOutcome {
        ranks: Some(vec![]),
        errors: Vec::new(),
    }; 4];

    let report = aggregate_results("batch", seeds(), &seatings, outcomes).unwrap();

    assert!(report.standings().iter().all(|s| s.average_rank.is_none()));
}

#[test]
fn test_report_json_shape() {
    let seatings = duplicate_seatings(&[A, B, C, D]).unwrap();
    let mut outcomes = vec![ranked([1, 2, 3, 4]); 4];
    outcomes[1].errors.push(error_at(2));

    let report = aggregate_results("batch", seeds(), &seatings, outcomes).unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["seed_values"], serde_json::json!([[11, 12], [13, 14]]));
    assert_eq!(json["users"], serde_json::json!([1, 2, 3, 4]));
    assert_eq!(json["matches"][1]["user_ids"], serde_json::json!([2, 3, 4, 1]));
    assert_eq!(
        json["matches"][0]["log_id"],
        serde_json::json!(seatings[0].trial_group.to_string())
    );
    assert_eq!(
        json["errors"][0],
        serde_json::json!({"duplication_index": 1, "player_id": 2, "user_id": 3})
    );

    let back: MatchReport = serde_json::from_value(json).unwrap();
    assert_eq!(back, report);
}
