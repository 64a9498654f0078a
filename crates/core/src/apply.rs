// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::BookingError;
use crate::event::BookingEventKind;
use crate::transition::{StatusEdge, TransitionResult};
use slotbook_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use slotbook_domain::{Assignment, BookingStatus, has_elapsed, validate_requirements};

/// Applies a command to an assignment, producing the new assignment, the
/// audit event, the traversed status edges, and the domain event to emit.
///
/// This is the only code path that may change an assignment's status. The
/// function is pure: it validates against the legal transition table and
/// computes the outcome; the caller persists the result with a conditional
/// write keyed on the assignment's prior status and discards the result if
/// the write loses the race.
///
/// Commands whose effect has already landed (a retried accept by the
/// already-bound candidate, a retried open on a searching slot) succeed as
/// no-ops without an audit event or domain event.
///
/// # Errors
///
/// Returns an error if:
/// - The requested transition is not a legal edge (`DomainViolation`)
/// - The slot was already resolved by another actor (`AlreadyResolved`)
/// - A decline is requested by a candidate who does not hold the offer
///   (`NotAuthorized`)
#[allow(clippy::too_many_lines)]
pub fn apply(
    assignment: &Assignment,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, BookingError> {
    match command {
        Command::OpenForMatching { expires_at, at } => {
            // Retried open: the slot is already searching.
            if assignment.status == BookingStatus::Searching {
                return Ok(noop(assignment));
            }

            assignment
                .status
                .validate_transition(BookingStatus::Searching)?;
            validate_requirements(&assignment.requirement)?;

            let before: StateSnapshot = StateSnapshot::of(assignment);
            let mut new_assignment: Assignment = assignment.clone();
            new_assignment.status = BookingStatus::Searching;
            new_assignment.expires_at = Some(expires_at);
            new_assignment.updated_at = at;
            let after: StateSnapshot = StateSnapshot::of(&new_assignment);

            let action: Action = Action::new(
                String::from("OpenForMatching"),
                Some(format!(
                    "Opened assignment {} for matching",
                    assignment.assignment_id
                )),
            );

            Ok(TransitionResult {
                audit_event: Some(audit(assignment, actor, cause, action, before, after)),
                edges: vec![StatusEdge::new(
                    assignment.status,
                    BookingStatus::Searching,
                )],
                event: None,
                new_assignment,
            })
        }
        Command::Offer {
            candidate_id,
            expires_at,
            at,
        } => {
            match assignment.status {
                BookingStatus::Searching => {}
                BookingStatus::Accepted => {
                    return Err(BookingError::AlreadyResolved {
                        assignment_id: assignment.assignment_id.value(),
                        current_status: assignment.status,
                    });
                }
                BookingStatus::Draft | BookingStatus::Declined | BookingStatus::Expired => {
                    return Err(BookingError::DomainViolation(
                        slotbook_domain::DomainError::InvalidStatusTransition {
                            from: assignment.status.as_str().to_string(),
                            to: BookingStatus::Searching.as_str().to_string(),
                            reason: String::from(
                                "offers may only be placed on slots open for matching",
                            ),
                        },
                    ));
                }
            }

            let before: StateSnapshot = StateSnapshot::of(assignment);
            let mut new_assignment: Assignment = assignment.clone();
            new_assignment.offered_candidate_id = Some(candidate_id);
            new_assignment.expires_at = Some(expires_at);
            new_assignment.updated_at = at;
            let after: StateSnapshot = StateSnapshot::of(&new_assignment);

            let action: Action = Action::new(
                String::from("Offer"),
                Some(format!(
                    "Offered assignment {} to candidate {candidate_id}",
                    assignment.assignment_id
                )),
            );

            // An offer stays within `searching`; it traverses no edge and
            // emits no domain event.
            Ok(TransitionResult {
                audit_event: Some(audit(assignment, actor, cause, action, before, after)),
                edges: Vec::new(),
                event: None,
                new_assignment,
            })
        }
        Command::Accept {
            candidate_id,
            price_cents,
            at,
        } => {
            if assignment.status == BookingStatus::Accepted {
                // Idempotent retry: the same candidate is already bound.
                if assignment.candidate_id == Some(candidate_id) {
                    return Ok(noop(assignment));
                }
                return Err(BookingError::AlreadyResolved {
                    assignment_id: assignment.assignment_id.value(),
                    current_status: assignment.status,
                });
            }

            assignment
                .status
                .validate_transition(BookingStatus::Accepted)?;

            let before: StateSnapshot = StateSnapshot::of(assignment);
            let mut new_assignment: Assignment = assignment.clone();
            new_assignment.status = BookingStatus::Accepted;
            new_assignment.candidate_id = Some(candidate_id);
            new_assignment.offered_candidate_id = None;
            new_assignment.computed_price_cents = price_cents;
            new_assignment.expires_at = None;
            new_assignment.updated_at = at;
            new_assignment.check_binding_invariant()?;
            let after: StateSnapshot = StateSnapshot::of(&new_assignment);

            let action: Action = Action::new(
                String::from("Accept"),
                Some(format!(
                    "Candidate {candidate_id} accepted assignment {}",
                    assignment.assignment_id
                )),
            );

            Ok(TransitionResult {
                audit_event: Some(audit(assignment, actor, cause, action, before, after)),
                edges: vec![StatusEdge::new(
                    BookingStatus::Searching,
                    BookingStatus::Accepted,
                )],
                event: Some(BookingEventKind::AssignmentAccepted),
                new_assignment,
            })
        }
        Command::Decline {
            candidate_id,
            reason,
            renewed_expires_at,
            at,
        } => {
            if assignment.status == BookingStatus::Accepted
                || assignment.status == BookingStatus::Expired
            {
                return Err(BookingError::AlreadyResolved {
                    assignment_id: assignment.assignment_id.value(),
                    current_status: assignment.status,
                });
            }

            assignment
                .status
                .validate_transition(BookingStatus::Declined)?;

            // Only the candidate who holds the offer may decline it.
            if assignment.offered_candidate_id != Some(candidate_id) {
                return Err(BookingError::NotAuthorized {
                    assignment_id: assignment.assignment_id.value(),
                    candidate_id: candidate_id.value(),
                });
            }

            let before: StateSnapshot = StateSnapshot::of(assignment);
            let mut new_assignment: Assignment = assignment.clone();
            // The decline self-loop: the slot records the refusal and
            // immediately returns to matching with a fresh window.
            new_assignment.status = BookingStatus::Searching;
            new_assignment.candidate_id = None;
            new_assignment.offered_candidate_id = None;
            new_assignment.expires_at = Some(renewed_expires_at);
            new_assignment.updated_at = at;
            let after: StateSnapshot = StateSnapshot::of(&new_assignment);

            let details: String = reason.map_or_else(
                || {
                    format!(
                        "Candidate {candidate_id} declined assignment {}",
                        assignment.assignment_id
                    )
                },
                |r| {
                    format!(
                        "Candidate {candidate_id} declined assignment {}: {r}",
                        assignment.assignment_id
                    )
                },
            );
            let action: Action = Action::new(String::from("Decline"), Some(details));

            Ok(TransitionResult {
                audit_event: Some(audit(assignment, actor, cause, action, before, after)),
                edges: vec![
                    StatusEdge::new(BookingStatus::Searching, BookingStatus::Declined),
                    StatusEdge::new(BookingStatus::Declined, BookingStatus::Searching),
                ],
                event: Some(BookingEventKind::AssignmentDeclined),
                new_assignment,
            })
        }
        Command::Expire { at } => {
            // A previous partial sweep may already have expired the slot.
            if assignment.status == BookingStatus::Expired {
                return Ok(noop(assignment));
            }

            if assignment.status == BookingStatus::Accepted {
                return Err(BookingError::AlreadyResolved {
                    assignment_id: assignment.assignment_id.value(),
                    current_status: assignment.status,
                });
            }

            assignment
                .status
                .validate_transition(BookingStatus::Expired)?;

            if !has_elapsed(assignment.expires_at, at) {
                return Err(BookingError::DomainViolation(
                    slotbook_domain::DomainError::InvalidStatusTransition {
                        from: assignment.status.as_str().to_string(),
                        to: BookingStatus::Expired.as_str().to_string(),
                        reason: String::from("search window has not elapsed"),
                    },
                ));
            }

            let before: StateSnapshot = StateSnapshot::of(assignment);
            let mut new_assignment: Assignment = assignment.clone();
            new_assignment.status = BookingStatus::Expired;
            new_assignment.offered_candidate_id = None;
            new_assignment.expires_at = None;
            new_assignment.updated_at = at;
            let after: StateSnapshot = StateSnapshot::of(&new_assignment);

            let action: Action = Action::new(
                String::from("Expire"),
                Some(format!(
                    "Search window elapsed for assignment {}",
                    assignment.assignment_id
                )),
            );

            Ok(TransitionResult {
                audit_event: Some(audit(assignment, actor, cause, action, before, after)),
                edges: vec![StatusEdge::new(
                    BookingStatus::Searching,
                    BookingStatus::Expired,
                )],
                event: Some(BookingEventKind::AssignmentExpired),
                new_assignment,
            })
        }
        Command::Reopen { expires_at, at } => {
            // Retried reopen: the slot is already back in matching.
            if assignment.status == BookingStatus::Searching {
                return Ok(noop(assignment));
            }

            // A draft slot is opened with OpenForMatching, which also
            // checks requirement completeness.
            if assignment.status == BookingStatus::Draft {
                return Err(BookingError::DomainViolation(
                    slotbook_domain::DomainError::InvalidStatusTransition {
                        from: assignment.status.as_str().to_string(),
                        to: BookingStatus::Searching.as_str().to_string(),
                        reason: String::from("draft slots are opened for matching, not re-opened"),
                    },
                ));
            }

            assignment
                .status
                .validate_transition(BookingStatus::Searching)?;

            let before: StateSnapshot = StateSnapshot::of(assignment);
            let mut new_assignment: Assignment = assignment.clone();
            new_assignment.status = BookingStatus::Searching;
            new_assignment.offered_candidate_id = None;
            new_assignment.expires_at = Some(expires_at);
            new_assignment.updated_at = at;
            let after: StateSnapshot = StateSnapshot::of(&new_assignment);

            let action: Action = Action::new(
                String::from("Reopen"),
                Some(format!(
                    "Re-opened assignment {} for matching",
                    assignment.assignment_id
                )),
            );

            Ok(TransitionResult {
                audit_event: Some(audit(assignment, actor, cause, action, before, after)),
                edges: vec![StatusEdge::new(
                    assignment.status,
                    BookingStatus::Searching,
                )],
                event: None,
                new_assignment,
            })
        }
    }
}

/// Builds the idempotent no-op result for a command whose effect already
/// landed.
fn noop(assignment: &Assignment) -> TransitionResult {
    TransitionResult {
        new_assignment: assignment.clone(),
        audit_event: None,
        edges: Vec::new(),
        event: None,
    }
}

/// Builds the audit event for a transition.
fn audit(
    assignment: &Assignment,
    actor: Actor,
    cause: Cause,
    action: Action,
    before: StateSnapshot,
    after: StateSnapshot,
) -> AuditEvent {
    AuditEvent::new(
        assignment.assignment_id.value(),
        actor,
        cause,
        action,
        before,
        after,
    )
}
