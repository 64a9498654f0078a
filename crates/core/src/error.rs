// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slotbook_domain::{BookingStatus, DomainError};

/// Errors that can occur during booking transitions.
///
/// The concurrency and authorization variants are kept distinct from
/// domain-rule violations all the way to the interface boundary: "this
/// mission is no longer available" and "you are not allowed to act on this
/// mission" must remain distinguishable to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// A domain rule was violated, including illegal (from, to) transition
    /// pairs. Never retried automatically.
    DomainViolation(DomainError),
    /// The optimistic-concurrency precondition failed: another actor
    /// resolved the slot first. Callers must re-fetch current state before
    /// deciding whether to retry with different parameters.
    AlreadyResolved {
        /// The assignment identifier.
        assignment_id: i64,
        /// The status the assignment was observed in.
        current_status: BookingStatus,
    },
    /// The requesting candidate does not hold the current offer.
    NotAuthorized {
        /// The assignment identifier.
        assignment_id: i64,
        /// The candidate who made the request.
        candidate_id: i64,
    },
    /// The underlying storage call failed for infrastructure reasons.
    /// Safe to retry with backoff; all booking operations are idempotent.
    Transient(String),
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::AlreadyResolved {
                assignment_id,
                current_status,
            } => {
                write!(
                    f,
                    "Assignment {assignment_id} was already resolved (current status: {current_status})"
                )
            }
            Self::NotAuthorized {
                assignment_id,
                candidate_id,
            } => {
                write!(
                    f,
                    "Candidate {candidate_id} does not hold the offer on assignment {assignment_id}"
                )
            }
            Self::Transient(msg) => write!(f, "Transient persistence error: {msg}"),
        }
    }
}

impl std::error::Error for BookingError {}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
