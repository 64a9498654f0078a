// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::datetime;

use slotbook::Command;
use slotbook_domain::{Assignment, BookingStatus, CandidateId, DeclineRecord};

use crate::Persistence;
use crate::tests::{T0, apply_and_persist, seed};

fn open_and_offer(
    persistence: &mut Persistence,
    assignment_id: slotbook_domain::AssignmentId,
    candidate_id: CandidateId,
) {
    apply_and_persist(
        persistence,
        assignment_id,
        Command::OpenForMatching {
            expires_at: datetime!(2026-01-08 09:00 UTC),
            at: T0,
        },
    );
    apply_and_persist(
        persistence,
        assignment_id,
        Command::Offer {
            candidate_id,
            expires_at: datetime!(2026-01-08 09:00 UTC),
            at: T0,
        },
    );
}

#[test]
fn test_decline_records_both_edges_under_one_event() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (_, assignment_id, candidate_id) = seed(&mut persistence);
    open_and_offer(&mut persistence, assignment_id, candidate_id);

    apply_and_persist(
        &mut persistence,
        assignment_id,
        Command::Decline {
            candidate_id,
            reason: Some(String::from("unavailable in March")),
            renewed_expires_at: datetime!(2026-01-09 10:00 UTC),
            at: datetime!(2026-01-06 10:00 UTC),
        },
    );

    let history = persistence.get_status_history(assignment_id).unwrap();
    // open edge, then the decline pair
    assert_eq!(history.len(), 3);
    assert_eq!(history[1].previous_status, BookingStatus::Searching);
    assert_eq!(history[1].new_status, BookingStatus::Declined);
    assert_eq!(history[2].previous_status, BookingStatus::Declined);
    assert_eq!(history[2].new_status, BookingStatus::Searching);
    assert_eq!(history[1].audit_event_id, history[2].audit_event_id);
}

#[test]
fn test_decline_lands_in_log_atomically_with_status() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (_, assignment_id, candidate_id) = seed(&mut persistence);
    open_and_offer(&mut persistence, assignment_id, candidate_id);

    apply_and_persist(
        &mut persistence,
        assignment_id,
        Command::Decline {
            candidate_id,
            reason: Some(String::from("unavailable in March")),
            renewed_expires_at: datetime!(2026-01-09 10:00 UTC),
            at: datetime!(2026-01-06 10:00 UTC),
        },
    );

    let log: Vec<DeclineRecord> = persistence.get_decline_log(assignment_id).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].candidate_id, candidate_id);
    assert_eq!(log[0].reason.as_deref(), Some("unavailable in March"));
    assert_eq!(log[0].declined_at, datetime!(2026-01-06 10:00 UTC));

    assert!(
        persistence
            .has_declined(assignment_id, candidate_id)
            .unwrap()
    );
    assert!(
        !persistence
            .has_declined(assignment_id, CandidateId::new(999))
            .unwrap()
    );
}

#[test]
fn test_declined_slot_returns_to_searching_with_renewed_window() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (_, assignment_id, candidate_id) = seed(&mut persistence);
    open_and_offer(&mut persistence, assignment_id, candidate_id);

    apply_and_persist(
        &mut persistence,
        assignment_id,
        Command::Decline {
            candidate_id,
            reason: None,
            renewed_expires_at: datetime!(2026-01-09 10:00 UTC),
            at: datetime!(2026-01-06 10:00 UTC),
        },
    );

    let stored: Assignment = persistence.get_assignment(assignment_id).unwrap();
    assert_eq!(stored.status, BookingStatus::Searching);
    assert_eq!(stored.offered_candidate_id, None);
    assert_eq!(stored.candidate_id, None);
    assert_eq!(stored.expires_at, Some(datetime!(2026-01-09 10:00 UTC)));
}
