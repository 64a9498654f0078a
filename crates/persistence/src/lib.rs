// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Slotbook booking engine.
//!
//! This crate stores projects, assignments, candidates, the append-only
//! decline log, status history, and audit events. It is built on Diesel
//! over `SQLite`.
//!
//! ## Concurrency
//!
//! Status transitions are written with a conditional update guarded by the
//! status the transition was computed from. A transition that loses the
//! race matches zero rows and rolls back untouched; the service layer
//! re-reads and decides whether the retry was idempotent or a genuine
//! conflict.
//!
//! ## Testing
//!
//! Tests run against unique shared in-memory `SQLite` databases, named by
//! an atomic counter so parallel tests never collide.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

use slotbook::TransitionResult;
use slotbook_audit::AuditEvent;
use slotbook_domain::{
    Assignment, AssignmentId, BookingStatus, Candidate, CandidateId, DeclineRecord, Project,
    ProjectId, ProjectStatus, RequirementProfile,
};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::StatusHistoryEntry;
pub use error::PersistenceError;
pub use mutations::TransitionOutcome;

use data_models::{NewAssignment, NewCandidate};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the booking tables.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = sqlite::open(&shared_memory_url, false)?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = sqlite::open(path_str, true)?;
        Ok(Self { conn })
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Persists a transition result atomically.
    ///
    /// The assignment update is guarded by `expected_status`; see
    /// [`TransitionOutcome`] for the three ways this can land.
    ///
    /// # Arguments
    ///
    /// * `expected_status` - The status the transition was computed from
    /// * `result` - The transition result to persist
    /// * `decline` - The decline log entry, for decline transitions
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails. A lost race is reported via
    /// the outcome, not as an error.
    pub fn persist_transition(
        &mut self,
        expected_status: BookingStatus,
        result: &TransitionResult,
        decline: Option<&DeclineRecord>,
    ) -> Result<TransitionOutcome, PersistenceError> {
        mutations::persist_transition(&mut self.conn, expected_status, result, decline)
    }

    // ========================================================================
    // Assignment Queries
    // ========================================================================

    /// Loads an assignment by ID.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentNotFound` if no such assignment exists.
    pub fn get_assignment(
        &mut self,
        assignment_id: AssignmentId,
    ) -> Result<Assignment, PersistenceError> {
        queries::assignments::get_assignment(&mut self.conn, assignment_id)
    }

    /// Loads all assignments belonging to a project, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_assignments_for_project(
        &mut self,
        project_id: ProjectId,
    ) -> Result<Vec<Assignment>, PersistenceError> {
        queries::assignments::list_assignments_for_project(&mut self.conn, project_id)
    }

    /// Loads the booking statuses of a project's assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_statuses_for_project(
        &mut self,
        project_id: ProjectId,
    ) -> Result<Vec<BookingStatus>, PersistenceError> {
        queries::assignments::list_statuses_for_project(&mut self.conn, project_id)
    }

    /// Loads every `searching` assignment whose search window has elapsed.
    ///
    /// # Arguments
    ///
    /// * `now` - The instant to evaluate expiry against
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_expired_searching(
        &mut self,
        now: OffsetDateTime,
    ) -> Result<Vec<Assignment>, PersistenceError> {
        queries::assignments::list_expired_searching(&mut self.conn, now)
    }

    /// Loads the append-only decline log for an assignment, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_decline_log(
        &mut self,
        assignment_id: AssignmentId,
    ) -> Result<Vec<DeclineRecord>, PersistenceError> {
        queries::assignments::get_decline_log(&mut self.conn, assignment_id)
    }

    /// Checks whether a candidate has previously declined an assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn has_declined(
        &mut self,
        assignment_id: AssignmentId,
        candidate_id: CandidateId,
    ) -> Result<bool, PersistenceError> {
        queries::assignments::has_declined(&mut self.conn, assignment_id, candidate_id)
    }

    /// Loads the ordered status history for an assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_status_history(
        &mut self,
        assignment_id: AssignmentId,
    ) -> Result<Vec<StatusHistoryEntry>, PersistenceError> {
        queries::assignments::get_status_history(&mut self.conn, assignment_id)
    }

    // ========================================================================
    // Project & Candidate Queries
    // ========================================================================

    /// Loads a project by ID.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if no such project exists.
    pub fn get_project(&mut self, project_id: ProjectId) -> Result<Project, PersistenceError> {
        queries::projects::get_project(&mut self.conn, project_id)
    }

    /// Lists all projects, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_projects(&mut self) -> Result<Vec<Project>, PersistenceError> {
        queries::projects::list_projects(&mut self.conn)
    }

    /// Loads a candidate by ID.
    ///
    /// # Errors
    ///
    /// Returns `CandidateNotFound` if no such candidate exists.
    pub fn get_candidate(
        &mut self,
        candidate_id: CandidateId,
    ) -> Result<Candidate, PersistenceError> {
        queries::candidates::get_candidate(&mut self.conn, candidate_id)
    }

    // ========================================================================
    // Audit Queries
    // ========================================================================

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the ordered audit timeline for an assignment.
    ///
    /// Returns `(event_id, event)` pairs, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if events cannot be retrieved or deserialized.
    pub fn get_audit_timeline(
        &mut self,
        assignment_id: AssignmentId,
    ) -> Result<Vec<(i64, AuditEvent)>, PersistenceError> {
        queries::audit::get_audit_timeline(&mut self.conn, assignment_id)
    }

    // ========================================================================
    // Bookkeeping Mutations
    // ========================================================================

    /// Creates a new project and returns its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_project(
        &mut self,
        client_ref: &str,
        name: &str,
        created_at: OffsetDateTime,
    ) -> Result<ProjectId, PersistenceError> {
        let id: i64 = mutations::insert_project(&mut self.conn, client_ref, name, created_at)?;
        Ok(ProjectId::new(id))
    }

    /// Creates a new draft assignment and returns its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (including when the project
    /// does not exist, via foreign key enforcement).
    pub fn create_assignment(
        &mut self,
        project_id: ProjectId,
        requirement: &RequirementProfile,
        created_at: OffsetDateTime,
    ) -> Result<AssignmentId, PersistenceError> {
        let record: NewAssignment = NewAssignment::draft(project_id, requirement, created_at)?;
        let id: i64 = mutations::insert_assignment(&mut self.conn, &record)?;
        Ok(AssignmentId::new(id))
    }

    /// Deletes an assignment row.
    ///
    /// # Errors
    ///
    /// Returns `AssignmentNotFound` if no row was deleted.
    pub fn remove_assignment(
        &mut self,
        assignment_id: AssignmentId,
    ) -> Result<(), PersistenceError> {
        mutations::delete_assignment(&mut self.conn, assignment_id)
    }

    /// Updates a project's cached staffing status.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if the project does not exist.
    pub fn set_project_staffing(
        &mut self,
        project_id: ProjectId,
        status: ProjectStatus,
        updated_at: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::set_project_staffing(&mut self.conn, project_id, status, updated_at)
    }

    /// Flips a project's explicit `started` flag.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if the project does not exist.
    pub fn set_project_started(
        &mut self,
        project_id: ProjectId,
        started: bool,
        updated_at: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::set_project_started(&mut self.conn, project_id, started, updated_at)
    }

    /// Mirrors a candidate from the directory service and returns its
    /// assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_candidate(
        &mut self,
        candidate: &Candidate,
    ) -> Result<CandidateId, PersistenceError> {
        let record: NewCandidate = NewCandidate::from_domain(candidate)?;
        let id: i64 = mutations::insert_candidate(&mut self.conn, &record)?;
        Ok(CandidateId::new(id))
    }
}
