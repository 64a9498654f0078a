// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and serializable mirrors for the booking tables.
//!
//! Audit actors, causes, actions, and snapshots are stored as JSON text
//! columns; list-valued requirement fields (languages, expertises) are
//! stored as JSON arrays. Timestamps are stored as RFC 3339 text in UTC.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use slotbook_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use slotbook_domain::{
    Assignment, AssignmentId, BookingStatus, Candidate, CandidateId, DeclineRecord, Project,
    ProjectId, ProjectStatus, RequirementProfile, Seniority,
};

use crate::diesel_schema::{
    assignment_status_history, assignments, audit_events, candidates, decline_log, projects,
};
use crate::error::PersistenceError;

/// Formats a timestamp as RFC 3339 text for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, PersistenceError> {
    at.format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

/// Parses RFC 3339 text from a timestamp column.
///
/// # Errors
///
/// Returns an error if the text is not a valid RFC 3339 timestamp.
pub fn parse_timestamp(text: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(text, &Rfc3339)
        .map_err(|e| PersistenceError::CorruptRow(format!("invalid timestamp '{text}': {e}")))
}

fn parse_string_list(json: &str) -> Result<Vec<String>, PersistenceError> {
    serde_json::from_str(json)
        .map_err(|e| PersistenceError::CorruptRow(format!("invalid string list '{json}': {e}")))
}

fn to_string_list(items: &[String]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(items)?)
}

/// Serializable representation of an `Actor`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

impl From<&Actor> for ActorData {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            actor_type: actor.actor_type.clone(),
        }
    }
}

impl From<ActorData> for Actor {
    fn from(data: ActorData) -> Self {
        Self::new(data.id, data.actor_type)
    }
}

/// Serializable representation of a `Cause`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

impl From<&Cause> for CauseData {
    fn from(cause: &Cause) -> Self {
        Self {
            id: cause.id.clone(),
            description: cause.description.clone(),
        }
    }
}

impl From<CauseData> for Cause {
    fn from(data: CauseData) -> Self {
        Self::new(data.id, data.description)
    }
}

/// Serializable representation of an `Action`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

impl From<&Action> for ActionData {
    fn from(action: &Action) -> Self {
        Self {
            name: action.name.clone(),
            details: action.details.clone(),
        }
    }
}

impl From<ActionData> for Action {
    fn from(data: ActionData) -> Self {
        Self::new(data.name, data.details)
    }
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotData {
    pub status: String,
    pub candidate_id: Option<i64>,
    pub offered_candidate_id: Option<i64>,
    pub expires_at: Option<String>,
}

impl From<&StateSnapshot> for SnapshotData {
    fn from(snapshot: &StateSnapshot) -> Self {
        Self {
            status: snapshot.status.as_str().to_string(),
            candidate_id: snapshot.candidate_id,
            offered_candidate_id: snapshot.offered_candidate_id,
            expires_at: snapshot.expires_at.clone(),
        }
    }
}

impl TryFrom<SnapshotData> for StateSnapshot {
    type Error = PersistenceError;

    fn try_from(data: SnapshotData) -> Result<Self, Self::Error> {
        Ok(Self {
            status: BookingStatus::from_str(&data.status)?,
            candidate_id: data.candidate_id,
            offered_candidate_id: data.offered_candidate_id,
            expires_at: data.expires_at,
        })
    }
}

/// A full assignment row.
#[derive(Debug, Clone, Queryable)]
pub struct AssignmentRow {
    pub assignment_id: i64,
    pub project_id: i64,
    pub role: String,
    pub seniority: String,
    pub languages: String,
    pub expertises: String,
    pub candidate_id: Option<i64>,
    pub offered_candidate_id: Option<i64>,
    pub computed_price_cents: Option<i64>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub expires_at: Option<String>,
}

impl AssignmentRow {
    /// Converts the row into a domain assignment.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRow` if a stored value fails domain parsing.
    pub fn into_domain(self) -> Result<Assignment, PersistenceError> {
        let requirement = RequirementProfile::new(
            self.role,
            Seniority::parse(&self.seniority)?,
            parse_string_list(&self.languages)?,
            parse_string_list(&self.expertises)?,
        );
        let expires_at = self
            .expires_at
            .as_deref()
            .map(parse_timestamp)
            .transpose()?;

        Ok(Assignment {
            assignment_id: AssignmentId::new(self.assignment_id),
            project_id: ProjectId::new(self.project_id),
            requirement,
            candidate_id: self.candidate_id.map(CandidateId::new),
            offered_candidate_id: self.offered_candidate_id.map(CandidateId::new),
            computed_price_cents: self.computed_price_cents,
            status: BookingStatus::from_str(&self.status)?,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
            expires_at,
        })
    }
}

/// Insertable assignment record.
#[derive(Debug, Insertable)]
#[diesel(table_name = assignments)]
pub struct NewAssignment {
    pub project_id: i64,
    pub role: String,
    pub seniority: String,
    pub languages: String,
    pub expertises: String,
    pub candidate_id: Option<i64>,
    pub offered_candidate_id: Option<i64>,
    pub computed_price_cents: Option<i64>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub expires_at: Option<String>,
}

impl NewAssignment {
    /// Builds an insertable record for a fresh draft slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the requirement lists cannot be serialized.
    pub fn draft(
        project_id: ProjectId,
        requirement: &RequirementProfile,
        created_at: OffsetDateTime,
    ) -> Result<Self, PersistenceError> {
        let now = format_timestamp(created_at)?;
        Ok(Self {
            project_id: project_id.value(),
            role: requirement.role.clone(),
            seniority: requirement.seniority.as_str().to_string(),
            languages: to_string_list(&requirement.languages)?,
            expertises: to_string_list(&requirement.expertises)?,
            candidate_id: None,
            offered_candidate_id: None,
            computed_price_cents: None,
            status: BookingStatus::Draft.as_str().to_string(),
            created_at: now.clone(),
            updated_at: now,
            expires_at: None,
        })
    }
}

/// A full project row.
#[derive(Debug, Clone, Queryable)]
pub struct ProjectRow {
    pub project_id: i64,
    pub client_ref: String,
    pub name: String,
    pub staffing_status: String,
    pub started: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl ProjectRow {
    /// Converts the row into a domain project.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRow` if a stored value fails domain parsing.
    pub fn into_domain(self) -> Result<Project, PersistenceError> {
        Ok(Project {
            project_id: ProjectId::new(self.project_id),
            client_ref: self.client_ref,
            name: self.name,
            staffing_status: ProjectStatus::from_str(&self.staffing_status)?,
            started: self.started != 0,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// Insertable project record.
#[derive(Debug, Insertable)]
#[diesel(table_name = projects)]
pub struct NewProject {
    pub client_ref: String,
    pub name: String,
    pub staffing_status: String,
    pub started: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// A full candidate row.
#[derive(Debug, Clone, Queryable)]
pub struct CandidateRow {
    pub candidate_id: i64,
    pub display_name: String,
    pub available: i32,
    pub seniority: String,
    pub languages: String,
    pub expertises: String,
    pub day_rate_cents: Option<i64>,
}

impl CandidateRow {
    /// Converts the row into a domain candidate.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRow` if a stored value fails domain parsing.
    pub fn into_domain(self) -> Result<Candidate, PersistenceError> {
        Ok(Candidate {
            candidate_id: CandidateId::new(self.candidate_id),
            display_name: self.display_name,
            available: self.available != 0,
            seniority: Seniority::parse(&self.seniority)?,
            languages: parse_string_list(&self.languages)?,
            expertises: parse_string_list(&self.expertises)?,
            day_rate_cents: self.day_rate_cents,
        })
    }
}

/// Insertable candidate record.
#[derive(Debug, Insertable)]
#[diesel(table_name = candidates)]
pub struct NewCandidate {
    pub display_name: String,
    pub available: i32,
    pub seniority: String,
    pub languages: String,
    pub expertises: String,
    pub day_rate_cents: Option<i64>,
}

impl NewCandidate {
    /// Builds an insertable record from a domain candidate, ignoring its
    /// identifier (the database assigns one).
    ///
    /// # Errors
    ///
    /// Returns an error if the list fields cannot be serialized.
    pub fn from_domain(candidate: &Candidate) -> Result<Self, PersistenceError> {
        Ok(Self {
            display_name: candidate.display_name.clone(),
            available: i32::from(candidate.available),
            seniority: candidate.seniority.as_str().to_string(),
            languages: to_string_list(&candidate.languages)?,
            expertises: to_string_list(&candidate.expertises)?,
            day_rate_cents: candidate.day_rate_cents,
        })
    }
}

/// A decline log row.
#[derive(Debug, Clone, Queryable)]
pub struct DeclineRow {
    pub decline_id: i64,
    pub assignment_id: i64,
    pub candidate_id: i64,
    pub reason: Option<String>,
    pub declined_at: String,
}

impl DeclineRow {
    /// Converts the row into a domain decline record.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRow` if the stored timestamp fails parsing.
    pub fn into_domain(self) -> Result<DeclineRecord, PersistenceError> {
        Ok(DeclineRecord {
            assignment_id: AssignmentId::new(self.assignment_id),
            candidate_id: CandidateId::new(self.candidate_id),
            reason: self.reason,
            declined_at: parse_timestamp(&self.declined_at)?,
        })
    }
}

/// Insertable decline log record.
#[derive(Debug, Insertable)]
#[diesel(table_name = decline_log)]
pub struct NewDecline {
    pub assignment_id: i64,
    pub candidate_id: i64,
    pub reason: Option<String>,
    pub declined_at: String,
}

/// One entry of an assignment's status history, as read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusHistoryEntry {
    /// The history row identifier.
    pub history_id: i64,
    /// The audit event this edge belongs to.
    pub audit_event_id: i64,
    /// The status before the edge.
    pub previous_status: BookingStatus,
    /// The status after the edge.
    pub new_status: BookingStatus,
    /// When the edge was traversed.
    pub transitioned_at: OffsetDateTime,
}

/// A status history row.
#[derive(Debug, Clone, Queryable)]
pub struct StatusHistoryRow {
    pub history_id: i64,
    pub assignment_id: i64,
    pub audit_event_id: i64,
    pub previous_status: String,
    pub new_status: String,
    pub transitioned_at: String,
}

impl StatusHistoryRow {
    /// Converts the row into a history entry.
    ///
    /// # Errors
    ///
    /// Returns `CorruptRow` if a stored status or timestamp fails parsing.
    pub fn into_entry(self) -> Result<StatusHistoryEntry, PersistenceError> {
        Ok(StatusHistoryEntry {
            history_id: self.history_id,
            audit_event_id: self.audit_event_id,
            previous_status: BookingStatus::from_str(&self.previous_status)?,
            new_status: BookingStatus::from_str(&self.new_status)?,
            transitioned_at: parse_timestamp(&self.transitioned_at)?,
        })
    }
}

/// Insertable status history record.
#[derive(Debug, Insertable)]
#[diesel(table_name = assignment_status_history)]
pub struct NewStatusHistory {
    pub assignment_id: i64,
    pub audit_event_id: i64,
    pub previous_status: String,
    pub new_status: String,
    pub transitioned_at: String,
}

/// An audit event row.
#[derive(Debug, Clone, Queryable)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub assignment_id: i64,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: String,
}

impl AuditEventRow {
    /// Reconstructs the audit event and its row identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if any JSON column fails to deserialize.
    pub fn into_domain(self) -> Result<(i64, AuditEvent), PersistenceError> {
        let actor: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause: CauseData = serde_json::from_str(&self.cause_json)?;
        let action: ActionData = serde_json::from_str(&self.action_json)?;
        let before: SnapshotData = serde_json::from_str(&self.before_snapshot_json)?;
        let after: SnapshotData = serde_json::from_str(&self.after_snapshot_json)?;

        let event = AuditEvent::new(
            self.assignment_id,
            actor.into(),
            cause.into(),
            action.into(),
            before.try_into()?,
            after.try_into()?,
        );
        Ok((self.event_id, event))
    }
}

/// Insertable audit event record.
#[derive(Debug, Insertable)]
#[diesel(table_name = audit_events)]
pub struct NewAuditEvent {
    pub assignment_id: i64,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: String,
}

impl NewAuditEvent {
    /// Serializes an audit event for insertion.
    ///
    /// # Errors
    ///
    /// Returns an error if any component cannot be serialized.
    pub fn from_domain(event: &AuditEvent, created_at: &str) -> Result<Self, PersistenceError> {
        Ok(Self {
            assignment_id: event.assignment_id,
            actor_json: serde_json::to_string(&ActorData::from(&event.actor))?,
            cause_json: serde_json::to_string(&CauseData::from(&event.cause))?,
            action_json: serde_json::to_string(&ActionData::from(&event.action))?,
            before_snapshot_json: serde_json::to_string(&SnapshotData::from(&event.before))?,
            after_snapshot_json: serde_json::to_string(&SnapshotData::from(&event.after))?,
            created_at: created_at.to_string(),
        })
    }
}
