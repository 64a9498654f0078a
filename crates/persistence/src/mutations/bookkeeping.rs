// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project, assignment, and candidate bookkeeping mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;

use slotbook_domain::{AssignmentId, ProjectId, ProjectStatus};

use crate::data_models::{NewAssignment, NewCandidate, NewProject, format_timestamp};
use crate::diesel_schema::{assignments, candidates, projects};
use crate::error::PersistenceError;
use crate::sqlite;

/// Inserts a new project and returns its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_project(
    conn: &mut SqliteConnection,
    client_ref: &str,
    name: &str,
    created_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    let now: String = format_timestamp(created_at)?;
    let record = NewProject {
        client_ref: client_ref.to_string(),
        name: name.to_string(),
        staffing_status: ProjectStatus::NoResources.as_str().to_string(),
        started: 0,
        created_at: now.clone(),
        updated_at: now,
    };

    diesel::insert_into(projects::table)
        .values(&record)
        .execute(conn)?;
    sqlite::last_insert_rowid(conn)
}

/// Updates a project's cached staffing status.
///
/// The cached column must always equal what aggregation computes from
/// current assignment data; callers re-aggregate before calling this.
///
/// # Errors
///
/// Returns `ProjectNotFound` if the project does not exist.
pub fn set_project_staffing(
    conn: &mut SqliteConnection,
    project_id: ProjectId,
    status: ProjectStatus,
    updated_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::update(projects::table.filter(projects::project_id.eq(project_id.value())))
            .set((
                projects::staffing_status.eq(status.as_str()),
                projects::updated_at.eq(format_timestamp(updated_at)?),
            ))
            .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::ProjectNotFound(project_id.value()));
    }
    Ok(())
}

/// Flips a project's explicit `started` flag.
///
/// # Errors
///
/// Returns `ProjectNotFound` if the project does not exist.
pub fn set_project_started(
    conn: &mut SqliteConnection,
    project_id: ProjectId,
    started: bool,
    updated_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let affected: usize =
        diesel::update(projects::table.filter(projects::project_id.eq(project_id.value())))
            .set((
                projects::started.eq(i32::from(started)),
                projects::updated_at.eq(format_timestamp(updated_at)?),
            ))
            .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::ProjectNotFound(project_id.value()));
    }
    Ok(())
}

/// Inserts a new assignment and returns its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_assignment(
    conn: &mut SqliteConnection,
    record: &NewAssignment,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(assignments::table)
        .values(record)
        .execute(conn)?;
    sqlite::last_insert_rowid(conn)
}

/// Deletes an assignment row.
///
/// Status-based removal rules live in the service layer; this is the raw
/// delete.
///
/// # Errors
///
/// Returns `AssignmentNotFound` if no row was deleted.
pub fn delete_assignment(
    conn: &mut SqliteConnection,
    assignment_id: AssignmentId,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::delete(
        assignments::table.filter(assignments::assignment_id.eq(assignment_id.value())),
    )
    .execute(conn)?;

    if affected == 0 {
        return Err(PersistenceError::AssignmentNotFound(assignment_id.value()));
    }
    Ok(())
}

/// Inserts a candidate mirror row and returns its assigned ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_candidate(
    conn: &mut SqliteConnection,
    record: &NewCandidate,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(candidates::table)
        .values(record)
        .execute(conn)?;
    sqlite::last_insert_rowid(conn)
}
