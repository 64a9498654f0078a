// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A booking status string is not a valid status.
    InvalidBookingStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// A requested booking status transition is not a legal edge.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// The rule that rejected the transition.
        reason: String,
    },
    /// A project status string is not a valid status.
    InvalidProjectStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// A seniority string is not a valid seniority level.
    InvalidSeniority(String),
    /// An assignment's requirement profile is not fully specified.
    IncompleteRequirements {
        /// The field that is missing or invalid.
        field: String,
        /// A description of what is wrong.
        reason: String,
    },
    /// A search window duration is not usable.
    InvalidSearchWindow {
        /// A description of what is wrong.
        reason: String,
    },
    /// The candidate previously declined this assignment and may not be
    /// offered it again.
    CandidatePreviouslyDeclined {
        /// The assignment identifier.
        assignment_id: i64,
        /// The candidate identifier.
        candidate_id: i64,
    },
    /// The candidate is flagged unavailable in the directory.
    CandidateUnavailable {
        /// The candidate identifier.
        candidate_id: i64,
    },
    /// An assignment violates the candidate-binding invariant
    /// (`candidate` is non-null iff status is `accepted`).
    BindingInvariantViolated {
        /// The assignment identifier.
        assignment_id: i64,
        /// The status the assignment was in.
        status: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBookingStatus { status } => {
                write!(f, "Invalid booking status: '{status}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition {from} -> {to}: {reason}")
            }
            Self::InvalidProjectStatus { status } => {
                write!(f, "Invalid project status: '{status}'")
            }
            Self::InvalidSeniority(msg) => write!(f, "Invalid seniority: {msg}"),
            Self::IncompleteRequirements { field, reason } => {
                write!(f, "Incomplete requirements for field '{field}': {reason}")
            }
            Self::InvalidSearchWindow { reason } => {
                write!(f, "Invalid search window: {reason}")
            }
            Self::CandidatePreviouslyDeclined {
                assignment_id,
                candidate_id,
            } => {
                write!(
                    f,
                    "Candidate {candidate_id} previously declined assignment {assignment_id}"
                )
            }
            Self::CandidateUnavailable { candidate_id } => {
                write!(f, "Candidate {candidate_id} is not available")
            }
            Self::BindingInvariantViolated {
                assignment_id,
                status,
            } => {
                write!(
                    f,
                    "Assignment {assignment_id} violates the candidate-binding invariant in status '{status}'"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
