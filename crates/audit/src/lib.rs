// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use slotbook_domain::{Assignment, BookingStatus};

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a booking transition:
/// a candidate session, an administrative tool, or the expiry sweeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g. "candidate", "admin", "sweeper").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// The actor recorded for sweeper-initiated transitions.
    #[must_use]
    pub fn sweeper() -> Self {
        Self::new(String::from("expiry-sweeper"), String::from("sweeper"))
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g. request ID, sweep ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g. "`Accept`", "`Decline`", "`Expire`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of one assignment's booking state at a point in time.
///
/// Captures the fields the booking lifecycle mutates: status, candidate
/// binding, pending offer, and expiry instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// The booking status at snapshot time.
    pub status: BookingStatus,
    /// The bound candidate, if any.
    pub candidate_id: Option<i64>,
    /// The pending offer, if any.
    pub offered_candidate_id: Option<i64>,
    /// The search-window expiry instant (RFC 3339), if any.
    pub expires_at: Option<String>,
}

impl StateSnapshot {
    /// Captures a snapshot of an assignment.
    #[must_use]
    pub fn of(assignment: &Assignment) -> Self {
        Self {
            status: assignment.status,
            candidate_id: assignment.candidate_id.map(|c| c.value()),
            offered_candidate_id: assignment.offered_candidate_id.map(|c| c.value()),
            expires_at: assignment
                .expires_at
                .and_then(|at| at.format(&time::format_description::well_known::Rfc3339).ok()),
        }
    }
}

/// An immutable audit event representing a booking transition.
///
/// Every successful status transition must produce exactly one audit event.
/// Audit events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The assignment state before the transition (before)
/// - The assignment state after the transition (after)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The assignment this transition applied to.
    pub assignment_id: i64,
    /// The actor who initiated this transition.
    pub actor: Actor,
    /// The cause or reason for this transition.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `assignment_id` - The assignment the transition applied to
    /// * `actor` - The actor who initiated the transition
    /// * `cause` - The reason for the transition
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new(
        assignment_id: i64,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            assignment_id,
            actor,
            cause,
            action,
            before,
            after,
        }
    }
}
