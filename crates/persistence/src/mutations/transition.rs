// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Atomic persistence of booking transitions.
//!
//! A transition lands as a single database transaction: one conditional
//! assignment update guarded by the expected status, one audit event, and
//! one history row per traversed edge. The conditional update carries the
//! optimistic concurrency contract; if the status changed underneath us,
//! zero rows match and the whole transaction rolls back with `LostRace`.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use slotbook::TransitionResult;
use slotbook_domain::{Assignment, BookingStatus, DeclineRecord};

use crate::data_models::{NewAuditEvent, NewDecline, NewStatusHistory, format_timestamp};
use crate::diesel_schema::{assignment_status_history, assignments, audit_events, decline_log};
use crate::error::PersistenceError;
use crate::sqlite;

/// Outcome of persisting a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The transition was written; carries the new audit event ID.
    Applied {
        /// The row ID of the recorded audit event.
        audit_event_id: i64,
    },
    /// The command changed nothing; no rows were written.
    Noop,
    /// The guarded update matched zero rows: another writer moved the
    /// assignment out of the expected status first.
    LostRace,
}

/// Persists a transition result atomically.
///
/// The assignment update is guarded by `expected_status` (the status the
/// transition was computed from). A decline record, when present, lands in
/// the same transaction as the status flip, so the decline log and the
/// status history can never disagree.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `expected_status` - The status the assignment must still hold
/// * `result` - The transition result to persist
/// * `decline` - The decline log entry, for decline transitions
///
/// # Errors
///
/// Returns an error if serialization or any database write fails. A lost
/// race is not an error; it is reported as `TransitionOutcome::LostRace`.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    expected_status: BookingStatus,
    result: &TransitionResult,
    decline: Option<&DeclineRecord>,
) -> Result<TransitionOutcome, PersistenceError> {
    let Some(audit_event) = result.audit_event.as_ref() else {
        return Ok(TransitionOutcome::Noop);
    };

    let assignment: &Assignment = &result.new_assignment;
    let updated_at: String = format_timestamp(assignment.updated_at)?;
    let expires_at: Option<String> = assignment
        .expires_at
        .map(format_timestamp)
        .transpose()?;

    conn.transaction::<TransitionOutcome, PersistenceError, _>(|conn| {
        let affected: usize = diesel::update(
            assignments::table
                .filter(assignments::assignment_id.eq(assignment.assignment_id.value()))
                .filter(assignments::status.eq(expected_status.as_str())),
        )
        .set((
            assignments::status.eq(assignment.status.as_str()),
            assignments::candidate_id.eq(assignment.candidate_id.map(|c| c.value())),
            assignments::offered_candidate_id
                .eq(assignment.offered_candidate_id.map(|c| c.value())),
            assignments::computed_price_cents.eq(assignment.computed_price_cents),
            assignments::updated_at.eq(&updated_at),
            assignments::expires_at.eq(expires_at.as_deref()),
        ))
        .execute(conn)?;

        if affected == 0 {
            debug!(
                assignment_id = assignment.assignment_id.value(),
                expected_status = expected_status.as_str(),
                "conditional update matched no rows"
            );
            return Ok(TransitionOutcome::LostRace);
        }

        let event_record: NewAuditEvent = NewAuditEvent::from_domain(audit_event, &updated_at)?;
        diesel::insert_into(audit_events::table)
            .values(&event_record)
            .execute(conn)?;
        let audit_event_id: i64 = sqlite::last_insert_rowid(conn)?;

        for edge in &result.edges {
            let history_record = NewStatusHistory {
                assignment_id: assignment.assignment_id.value(),
                audit_event_id,
                previous_status: edge.from.as_str().to_string(),
                new_status: edge.to.as_str().to_string(),
                transitioned_at: updated_at.clone(),
            };
            diesel::insert_into(assignment_status_history::table)
                .values(&history_record)
                .execute(conn)?;
        }

        if let Some(record) = decline {
            let decline_record = NewDecline {
                assignment_id: record.assignment_id.value(),
                candidate_id: record.candidate_id.value(),
                reason: record.reason.clone(),
                declined_at: format_timestamp(record.declined_at)?,
            };
            diesel::insert_into(decline_log::table)
                .values(&decline_record)
                .execute(conn)?;
        }

        Ok(TransitionOutcome::Applied { audit_event_id })
    })
}
