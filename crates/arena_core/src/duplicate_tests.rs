use super::*;
use std::collections::HashSet;

fn ids(raw: &[u32]) -> Vec<ParticipantId> {
    raw.iter().copied().map(ParticipantId).collect()
}

#[test]
fn test_rotations_are_left_cyclic() {
    let group = ids(&[10, 20, 30, 40]);
    let seatings = duplicate_seatings(&group).unwrap();

    assert_eq!(seatings.len(), 4);
    assert_eq!(seatings[0].participants, ids(&[10, 20, 30, 40]));
    assert_eq!(seatings[1].participants, ids(&[20, 30, 40, 10]));
    assert_eq!(seatings[2].participants, ids(&[30, 40, 10, 20]));
    assert_eq!(seatings[3].participants, ids(&[40, 10, 20, 30]));

    for (i, seating) in seatings.iter().enumerate() {
        assert_eq!(seating.rotation, i);
    }
}

#[test]
fn test_every_seating_has_same_participants() {
    let group = ids(&[3, 1, 4, 2]);
    let mut expected = group.clone();
    expected.sort();

    for seating in duplicate_seatings(&group).unwrap() {
        let mut seated = seating.participants.clone();
        seated.sort();
        assert_eq!(seated, expected);
    }
}

#[test]
fn test_each_participant_takes_every_seat_once() {
    let group = ids(&[1, 2, 3, 4]);
    let seatings = duplicate_seatings(&group).unwrap();

    for seat in 0..GROUP_SIZE {
        let occupants: HashSet<_> = seatings.iter().map(|s| s.participants[seat]).collect();
        assert_eq!(occupants.len(), GROUP_SIZE);
    }
}

#[test]
fn test_trial_groups_are_unique() {
    let seatings = duplicate_seatings(&ids(&[1, 2, 3, 4])).unwrap();
    let groups: HashSet<_> = seatings.iter().map(|s| s.trial_group).collect();
    assert_eq!(groups.len(), 4);
}

#[test]
fn test_wrong_group_size_rejected() {
    assert!(matches!(
        duplicate_seatings(&ids(&[1, 2, 3])),
        Err(MatchError::InvalidGroup { len: 3 })
    ));
    assert!(matches!(
        duplicate_seatings(&ids(&[1, 2, 3, 4, 5])),
        Err(MatchError::InvalidGroup { len: 5 })
    ));
}

#[test]
fn test_rotate_left_wraps() {
    let group = ids(&[1, 2, 3, 4]);
    assert_eq!(rotate_left(&group, 4), group);
    assert_eq!(rotate_left(&group, 6), ids(&[3, 4, 1, 2]));
    assert!(rotate_left(&[], 2).is_empty());
}
