// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the service boundary.
//!
//! The four core failure classes stay distinct all the way out: a domain
//! rule violation, a lost concurrency race, an authorization failure, and
//! a retryable infrastructure fault each map to their own variant, so the
//! server can give each its own status code.

use slotbook::BookingError;
use slotbook_domain::DomainError;
use slotbook_persistence::PersistenceError;
use thiserror::Error;

/// Request validation errors, caught before a command is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestValidationError {
    /// A required field was empty or missing.
    #[error("field '{field}' must not be empty")]
    EmptyField {
        /// The offending field.
        field: String,
    },
    /// A seniority value was not recognized.
    #[error("'{value}' is not a valid seniority level")]
    InvalidSeniority {
        /// The offending value.
        value: String,
    },
    /// A search-window length was not usable.
    #[error("search window of {hours} hours is not valid")]
    InvalidWindow {
        /// The offending window length, in hours.
        hours: i64,
    },
}

/// Service-level errors.
///
/// These are distinct from domain/core errors and represent the service
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated. Never retried automatically.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The slot was resolved by another actor first.
    AlreadyResolved {
        /// The assignment identifier.
        assignment_id: i64,
        /// The status the assignment now holds.
        current_status: String,
    },
    /// The requesting candidate does not hold the current offer.
    NotAuthorized {
        /// The assignment identifier.
        assignment_id: i64,
        /// The candidate who made the request.
        candidate_id: i64,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A retryable infrastructure fault.
    Transient {
        /// A description of the fault.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
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
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Transient { message } => write!(f, "Transient error: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<RequestValidationError> for ApiError {
    fn from(err: RequestValidationError) -> Self {
        let field: String = match &err {
            RequestValidationError::EmptyField { field } => field.clone(),
            RequestValidationError::InvalidSeniority { .. } => String::from("seniority"),
            RequestValidationError::InvalidWindow { .. } => String::from("window_hours"),
        };
        Self::InvalidInput {
            field,
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into a service error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidStatusTransition { from, to, reason } => ApiError::DomainRuleViolation {
            rule: String::from("legal_transition"),
            message: format!("transition {from} -> {to} is not allowed: {reason}"),
        },
        DomainError::CandidatePreviouslyDeclined {
            assignment_id,
            candidate_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("decline_blacklist"),
            message: format!(
                "candidate {candidate_id} previously declined assignment {assignment_id}"
            ),
        },
        DomainError::CandidateUnavailable { candidate_id } => ApiError::DomainRuleViolation {
            rule: String::from("candidate_availability"),
            message: format!("candidate {candidate_id} is not currently available"),
        },
        DomainError::IncompleteRequirements { field, reason } => {
            ApiError::InvalidInput { field, message: reason }
        }
        DomainError::InvalidSearchWindow { reason } => ApiError::InvalidInput {
            field: String::from("expires_at"),
            message: reason,
        },
        DomainError::InvalidSeniority(msg) => ApiError::InvalidInput {
            field: String::from("seniority"),
            message: msg,
        },
        DomainError::InvalidBookingStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("'{status}' is not a valid booking status"),
        },
        DomainError::InvalidProjectStatus { status } => ApiError::InvalidInput {
            field: String::from("staffing_status"),
            message: format!("'{status}' is not a valid project status"),
        },
        DomainError::BindingInvariantViolated {
            assignment_id,
            status,
        } => ApiError::Internal {
            message: format!(
                "candidate binding invariant violated on assignment {assignment_id} in status {status}"
            ),
        },
    }
}

/// Translates a core booking error into a service error.
#[must_use]
pub fn translate_booking_error(err: BookingError) -> ApiError {
    match err {
        BookingError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        BookingError::AlreadyResolved {
            assignment_id,
            current_status,
        } => ApiError::AlreadyResolved {
            assignment_id,
            current_status: current_status.as_str().to_string(),
        },
        BookingError::NotAuthorized {
            assignment_id,
            candidate_id,
        } => ApiError::NotAuthorized {
            assignment_id,
            candidate_id,
        },
        BookingError::Transient(message) => ApiError::Transient { message },
    }
}

/// Translates a persistence error into a service error.
///
/// Not-found surfaces as such; row corruption is internal; everything else
/// is a retryable infrastructure fault.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::AssignmentNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Assignment"),
            message: format!("assignment {id} does not exist"),
        },
        PersistenceError::ProjectNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Project"),
            message: format!("project {id} does not exist"),
        },
        PersistenceError::CandidateNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Candidate"),
            message: format!("candidate {id} does not exist"),
        },
        PersistenceError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("AuditEvent"),
            message: format!("audit event {id} does not exist"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::CorruptRow(message) | PersistenceError::SerializationError(message) => {
            ApiError::Internal { message }
        }
        other => ApiError::Transient {
            message: other.to_string(),
        },
    }
}
