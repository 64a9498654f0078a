// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event retrieval.

use diesel::prelude::*;
use diesel::SqliteConnection;

use slotbook_audit::AuditEvent;
use slotbook_domain::AssignmentId;

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns `EventNotFound` if no row exists, or a serialization error if
/// a stored JSON column cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .first::<AuditEventRow>(conn)
        .optional()?
        .ok_or(PersistenceError::EventNotFound(event_id))?;

    let (_, event) = row.into_domain()?;
    Ok(event)
}

/// Retrieves the ordered audit timeline for an assignment.
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    assignment_id: AssignmentId,
) -> Result<Vec<(i64, AuditEvent)>, PersistenceError> {
    let rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::assignment_id.eq(assignment_id.value()))
        .order(audit_events::event_id.asc())
        .load::<AuditEventRow>(conn)?;

    rows.into_iter().map(AuditEventRow::into_domain).collect()
}
