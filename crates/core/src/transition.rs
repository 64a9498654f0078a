// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slotbook_audit::AuditEvent;
use slotbook_domain::{Assignment, BookingStatus};

use crate::event::BookingEventKind;

/// One traversed edge of the booking status graph.
///
/// Compound commands traverse more than one edge: a decline records
/// `searching → declined` followed by the automatic `declined → searching`
/// re-open. Every edge is persisted to the status history, so recorded
/// history only ever contains legal pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEdge {
    /// The status before the edge.
    pub from: BookingStatus,
    /// The status after the edge.
    pub to: BookingStatus,
}

impl StatusEdge {
    /// Creates a new status edge.
    #[must_use]
    pub const fn new(from: BookingStatus, to: BookingStatus) -> Self {
        Self { from, to }
    }
}

/// The result of applying a command to an assignment.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. An idempotent no-op (a retried command whose effect
/// already landed) yields the unchanged assignment with no audit event, no
/// edges, and no domain event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The assignment after the transition.
    pub new_assignment: Assignment,
    /// The audit event recording this transition, absent for no-ops.
    pub audit_event: Option<AuditEvent>,
    /// The status-graph edges traversed, in order.
    pub edges: Vec<StatusEdge>,
    /// The domain event to emit, if the transition produces one.
    pub event: Option<BookingEventKind>,
}

impl TransitionResult {
    /// Returns true if the command changed nothing.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.audit_event.is_none()
    }
}
