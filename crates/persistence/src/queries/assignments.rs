// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment, decline log, and status history queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;

use slotbook_domain::{
    Assignment, AssignmentId, BookingStatus, CandidateId, DeclineRecord, ProjectId, has_elapsed,
};

use crate::data_models::{AssignmentRow, DeclineRow, StatusHistoryEntry, StatusHistoryRow};
use crate::diesel_schema::{assignment_status_history, assignments, decline_log};
use crate::error::PersistenceError;

/// Loads an assignment by ID.
///
/// # Errors
///
/// Returns `AssignmentNotFound` if no row exists, or `CorruptRow` if the
/// stored row fails domain parsing.
pub fn get_assignment(
    conn: &mut SqliteConnection,
    assignment_id: AssignmentId,
) -> Result<Assignment, PersistenceError> {
    let row: AssignmentRow = assignments::table
        .filter(assignments::assignment_id.eq(assignment_id.value()))
        .first::<AssignmentRow>(conn)
        .optional()?
        .ok_or(PersistenceError::AssignmentNotFound(assignment_id.value()))?;

    row.into_domain()
}

/// Loads all assignments belonging to a project, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails domain parsing.
pub fn list_assignments_for_project(
    conn: &mut SqliteConnection,
    project_id: ProjectId,
) -> Result<Vec<Assignment>, PersistenceError> {
    let rows: Vec<AssignmentRow> = assignments::table
        .filter(assignments::project_id.eq(project_id.value()))
        .order(assignments::assignment_id.asc())
        .load::<AssignmentRow>(conn)?;

    rows.into_iter().map(AssignmentRow::into_domain).collect()
}

/// Loads the statuses of all assignments belonging to a project.
///
/// This is the input to project staffing aggregation, so it deliberately
/// skips the full row conversion.
///
/// # Errors
///
/// Returns an error if the query fails or a stored status is invalid.
pub fn list_statuses_for_project(
    conn: &mut SqliteConnection,
    project_id: ProjectId,
) -> Result<Vec<BookingStatus>, PersistenceError> {
    let statuses: Vec<String> = assignments::table
        .filter(assignments::project_id.eq(project_id.value()))
        .select(assignments::status)
        .load::<String>(conn)?;

    statuses
        .iter()
        .map(|s| s.parse::<BookingStatus>().map_err(Into::into))
        .collect()
}

/// Loads every `searching` assignment whose search window has elapsed.
///
/// Expiry is evaluated against parsed timestamps rather than text
/// comparison, so rows with and without subsecond precision order
/// correctly.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails domain parsing.
pub fn list_expired_searching(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
) -> Result<Vec<Assignment>, PersistenceError> {
    let rows: Vec<AssignmentRow> = assignments::table
        .filter(assignments::status.eq(BookingStatus::Searching.as_str()))
        .filter(assignments::expires_at.is_not_null())
        .order(assignments::assignment_id.asc())
        .load::<AssignmentRow>(conn)?;

    let mut expired: Vec<Assignment> = Vec::new();
    for row in rows {
        let assignment: Assignment = row.into_domain()?;
        if has_elapsed(assignment.expires_at, now) {
            expired.push(assignment);
        }
    }
    Ok(expired)
}

/// Loads the append-only decline log for an assignment, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails parsing.
pub fn get_decline_log(
    conn: &mut SqliteConnection,
    assignment_id: AssignmentId,
) -> Result<Vec<DeclineRecord>, PersistenceError> {
    let rows: Vec<DeclineRow> = decline_log::table
        .filter(decline_log::assignment_id.eq(assignment_id.value()))
        .order(decline_log::decline_id.asc())
        .load::<DeclineRow>(conn)?;

    rows.into_iter().map(DeclineRow::into_domain).collect()
}

/// Checks whether a candidate has previously declined an assignment.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn has_declined(
    conn: &mut SqliteConnection,
    assignment_id: AssignmentId,
    candidate_id: CandidateId,
) -> Result<bool, PersistenceError> {
    let count: i64 = decline_log::table
        .filter(decline_log::assignment_id.eq(assignment_id.value()))
        .filter(decline_log::candidate_id.eq(candidate_id.value()))
        .count()
        .get_result(conn)?;

    Ok(count > 0)
}

/// Loads the ordered status history for an assignment.
///
/// # Errors
///
/// Returns an error if the query fails or a row fails parsing.
pub fn get_status_history(
    conn: &mut SqliteConnection,
    assignment_id: AssignmentId,
) -> Result<Vec<StatusHistoryEntry>, PersistenceError> {
    let rows: Vec<StatusHistoryRow> = assignment_status_history::table
        .filter(assignment_status_history::assignment_id.eq(assignment_id.value()))
        .order(assignment_status_history::history_id.asc())
        .load::<StatusHistoryRow>(conn)?;

    rows.into_iter().map(StatusHistoryRow::into_entry).collect()
}
