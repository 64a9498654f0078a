// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::datetime;

use slotbook::{Command, TransitionResult, apply};
use slotbook_audit::AuditEvent;
use slotbook_domain::{Assignment, BookingStatus};

use crate::tests::{T0, apply_and_persist, create_test_actor, create_test_cause, seed};
use crate::{Persistence, TransitionOutcome};

#[test]
fn test_open_for_matching_persists_status_window_and_audit() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (_, assignment_id, _) = seed(&mut persistence);

    apply_and_persist(
        &mut persistence,
        assignment_id,
        Command::OpenForMatching {
            expires_at: datetime!(2026-01-08 09:00 UTC),
            at: T0,
        },
    );

    let stored: Assignment = persistence.get_assignment(assignment_id).unwrap();
    assert_eq!(stored.status, BookingStatus::Searching);
    assert_eq!(stored.expires_at, Some(datetime!(2026-01-08 09:00 UTC)));

    let timeline = persistence.get_audit_timeline(assignment_id).unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].1.action.name, "OpenForMatching");

    let history = persistence.get_status_history(assignment_id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].previous_status, BookingStatus::Draft);
    assert_eq!(history[0].new_status, BookingStatus::Searching);
}

#[test]
fn test_accept_persists_binding_and_price() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (_, assignment_id, candidate_id) = seed(&mut persistence);

    apply_and_persist(
        &mut persistence,
        assignment_id,
        Command::OpenForMatching {
            expires_at: datetime!(2026-01-08 09:00 UTC),
            at: T0,
        },
    );
    apply_and_persist(
        &mut persistence,
        assignment_id,
        Command::Offer {
            candidate_id,
            expires_at: datetime!(2026-01-08 09:00 UTC),
            at: T0,
        },
    );
    apply_and_persist(
        &mut persistence,
        assignment_id,
        Command::Accept {
            candidate_id,
            price_cents: Some(650_000),
            at: datetime!(2026-01-06 10:00 UTC),
        },
    );

    let stored: Assignment = persistence.get_assignment(assignment_id).unwrap();
    assert_eq!(stored.status, BookingStatus::Accepted);
    assert_eq!(stored.candidate_id, Some(candidate_id));
    assert_eq!(stored.offered_candidate_id, None);
    assert_eq!(stored.computed_price_cents, Some(650_000));
    assert_eq!(stored.expires_at, None);
}

#[test]
fn test_audit_event_round_trips_through_storage() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (_, assignment_id, _) = seed(&mut persistence);

    let result: TransitionResult = apply_and_persist(
        &mut persistence,
        assignment_id,
        Command::OpenForMatching {
            expires_at: datetime!(2026-01-08 09:00 UTC),
            at: T0,
        },
    );
    let expected: AuditEvent = result.audit_event.unwrap();

    let timeline = persistence.get_audit_timeline(assignment_id).unwrap();
    let (event_id, _) = timeline[0];
    let retrieved: AuditEvent = persistence.get_audit_event(event_id).unwrap();
    assert_eq!(retrieved, expected);
}

#[test]
fn test_lost_race_rolls_back_untouched() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (_, assignment_id, candidate_id) = seed(&mut persistence);

    apply_and_persist(
        &mut persistence,
        assignment_id,
        Command::OpenForMatching {
            expires_at: datetime!(2026-01-08 09:00 UTC),
            at: T0,
        },
    );
    apply_and_persist(
        &mut persistence,
        assignment_id,
        Command::Offer {
            candidate_id,
            expires_at: datetime!(2026-01-08 09:00 UTC),
            at: T0,
        },
    );

    // Two writers compute an accept from the same searching snapshot.
    let snapshot: Assignment = persistence.get_assignment(assignment_id).unwrap();
    let first: TransitionResult = apply(
        &snapshot,
        Command::Accept {
            candidate_id,
            price_cents: None,
            at: datetime!(2026-01-06 10:00 UTC),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    let second: TransitionResult = apply(
        &snapshot,
        Command::Accept {
            candidate_id,
            price_cents: None,
            at: datetime!(2026-01-06 10:00 UTC),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let first_outcome = persistence
        .persist_transition(snapshot.status, &first, None)
        .unwrap();
    assert!(matches!(first_outcome, TransitionOutcome::Applied { .. }));

    let second_outcome = persistence
        .persist_transition(snapshot.status, &second, None)
        .unwrap();
    assert_eq!(second_outcome, TransitionOutcome::LostRace);

    // The loser left no trace: one audit event, one accept history row.
    let timeline = persistence.get_audit_timeline(assignment_id).unwrap();
    assert_eq!(timeline.len(), 3);
    let history = persistence.get_status_history(assignment_id).unwrap();
    assert_eq!(history.len(), 2);
}

#[test]
fn test_noop_transition_writes_nothing() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let (_, assignment_id, _) = seed(&mut persistence);

    apply_and_persist(
        &mut persistence,
        assignment_id,
        Command::OpenForMatching {
            expires_at: datetime!(2026-01-08 09:00 UTC),
            at: T0,
        },
    );

    // Retried open on an already-searching slot is a no-op.
    let assignment: Assignment = persistence.get_assignment(assignment_id).unwrap();
    let result: TransitionResult = apply(
        &assignment,
        Command::OpenForMatching {
            expires_at: datetime!(2026-01-09 09:00 UTC),
            at: T0,
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();
    assert!(result.is_noop());

    let outcome = persistence
        .persist_transition(assignment.status, &result, None)
        .unwrap();
    assert_eq!(outcome, TransitionOutcome::Noop);

    let timeline = persistence.get_audit_timeline(assignment_id).unwrap();
    assert_eq!(timeline.len(), 1);
    let stored: Assignment = persistence.get_assignment(assignment_id).unwrap();
    assert_eq!(stored.expires_at, Some(datetime!(2026-01-08 09:00 UTC)));
}
