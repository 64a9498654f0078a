// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain events and the notifier boundary.
//!
//! Every successful booking transition emits exactly one domain event;
//! crossing into the fully-staffed aggregate additionally emits a
//! `ProjectFullyStaffed` event. Delivery to the messaging subsystem is
//! at-least-once and fire-and-forget: a failed delivery must never roll
//! back or block an already-committed transition, and consumers must
//! deduplicate by event id.

use serde::{Deserialize, Serialize};
use slotbook_domain::{AssignmentId, CandidateId, ProjectId};
use time::OffsetDateTime;

/// The kind of a booking domain event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingEventKind {
    /// A candidate accepted an assignment.
    AssignmentAccepted,
    /// The offered candidate declined an assignment.
    AssignmentDeclined,
    /// An assignment's search window elapsed.
    AssignmentExpired,
    /// A project's assignments are now all accepted.
    ProjectFullyStaffed,
}

impl BookingEventKind {
    /// Returns the string representation of the event kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AssignmentAccepted => "AssignmentAccepted",
            Self::AssignmentDeclined => "AssignmentDeclined",
            Self::AssignmentExpired => "AssignmentExpired",
            Self::ProjectFullyStaffed => "ProjectFullyStaffed",
        }
    }
}

impl std::fmt::Display for BookingEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The event envelope delivered to the notifier boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingEvent {
    /// Unique event identifier, used by consumers to deduplicate.
    pub event_id: String,
    /// The kind of event.
    #[serde(rename = "type")]
    pub kind: BookingEventKind,
    /// The project the event concerns.
    pub project_id: ProjectId,
    /// The assignment the event concerns. For `ProjectFullyStaffed` this is
    /// the assignment whose transition completed the staffing.
    pub assignment_id: AssignmentId,
    /// The candidate involved, when there is one.
    pub candidate_id: Option<CandidateId>,
    /// When the event was produced.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl BookingEvent {
    /// Creates a new event envelope.
    #[must_use]
    pub const fn new(
        event_id: String,
        kind: BookingEventKind,
        project_id: ProjectId,
        assignment_id: AssignmentId,
        candidate_id: Option<CandidateId>,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            event_id,
            kind,
            project_id,
            assignment_id,
            candidate_id,
            timestamp,
        }
    }
}

/// The external notifier boundary.
///
/// The booking service does not know or care how events are delivered
/// downstream. Implementations must not propagate delivery failures;
/// they log and drop them.
pub trait Notifier: Send + Sync {
    /// Delivers one event. Fire-and-forget.
    fn notify(&self, event: &BookingEvent);
}

/// A notifier that discards every event.
///
/// Useful when a caller has no messaging subsystem wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: &BookingEvent) {}
}
