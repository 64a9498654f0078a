// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the decline transition: authorization against the pending
//! offer, the automatic re-open self-loop, and race losers.

use crate::tests::helpers::{
    T0, accepted_assignment, create_test_actor, create_test_cause, searching_assignment,
};
use crate::{BookingError, BookingEventKind, Command, apply};
use slotbook_domain::{BookingStatus, CandidateId};
use time::Duration;

fn decline_command(candidate: i64, reason: Option<&str>) -> Command {
    Command::Decline {
        candidate_id: CandidateId::new(candidate),
        reason: reason.map(String::from),
        renewed_expires_at: T0 + Duration::hours(73),
        at: T0 + Duration::minutes(5),
    }
}

#[test]
fn test_decline_returns_slot_to_searching_with_fresh_window() {
    let assignment = searching_assignment(7);

    let result = apply(
        &assignment,
        decline_command(7, Some("too busy")),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.new_assignment.status, BookingStatus::Searching);
    assert_eq!(result.new_assignment.candidate_id, None);
    assert_eq!(result.new_assignment.offered_candidate_id, None);
    assert_eq!(
        result.new_assignment.expires_at,
        Some(T0 + Duration::hours(73))
    );
    assert_eq!(result.event, Some(BookingEventKind::AssignmentDeclined));
}

#[test]
fn test_decline_traverses_two_legal_edges() {
    let assignment = searching_assignment(7);

    let result = apply(
        &assignment,
        decline_command(7, None),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.edges.len(), 2);
    assert_eq!(result.edges[0].from, BookingStatus::Searching);
    assert_eq!(result.edges[0].to, BookingStatus::Declined);
    assert_eq!(result.edges[1].from, BookingStatus::Declined);
    assert_eq!(result.edges[1].to, BookingStatus::Searching);
    for edge in &result.edges {
        assert!(edge.from.validate_transition(edge.to).is_ok());
    }
}

#[test]
fn test_decline_by_candidate_without_offer_is_not_authorized() {
    let assignment = searching_assignment(7);

    let result = apply(
        &assignment,
        decline_command(8, None),
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(BookingError::NotAuthorized {
            assignment_id: 10,
            candidate_id: 8,
        })
    );
}

#[test]
fn test_decline_after_acceptance_sees_already_resolved() {
    let assignment = accepted_assignment(7);

    let result = apply(
        &assignment,
        decline_command(7, None),
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(BookingError::AlreadyResolved {
            assignment_id: 10,
            current_status: BookingStatus::Accepted,
        })
    );
}

#[test]
fn test_decline_reason_is_carried_into_audit_details() {
    let assignment = searching_assignment(7);

    let result = apply(
        &assignment,
        decline_command(7, Some("rate too low")),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let audit = result.audit_event.unwrap();
    assert_eq!(audit.action.name, "Decline");
    assert!(audit.action.details.unwrap().contains("rate too low"));
}
