// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_status::BookingStatus;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// An opaque project identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(i64);

impl ProjectId {
    /// Creates a new project identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque assignment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentId(i64);

impl AssignmentId {
    /// Creates a new assignment identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque candidate identifier.
///
/// Candidates are external reference data supplied by the directory
/// service; the booking engine never owns or mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(i64);

impl CandidateId {
    /// Creates a new candidate identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seniority level required by an assignment or held by a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    /// Entry level.
    Junior,
    /// A few years of experience.
    Intermediate,
    /// Autonomous on complex work.
    Senior,
    /// Reference-level expertise.
    Expert,
}

impl Seniority {
    /// Returns the string representation of the seniority level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Intermediate => "intermediate",
            Self::Senior => "senior",
            Self::Expert => "expert",
        }
    }

    /// Parses a seniority level from a string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidSeniority` if the string does not match
    /// a valid seniority level.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "junior" => Ok(Self::Junior),
            "intermediate" => Ok(Self::Intermediate),
            "senior" => Ok(Self::Senior),
            "expert" => Ok(Self::Expert),
            _ => Err(DomainError::InvalidSeniority(format!(
                "'{s}' is not one of junior, intermediate, senior, expert"
            ))),
        }
    }
}

impl FromStr for Seniority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Seniority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The role requirement carried by an assignment.
///
/// This is what the slot is searching for, independent of any candidate
/// binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementProfile {
    /// The role or profile reference (e.g. "backend developer").
    pub role: String,
    /// The required seniority level.
    pub seniority: Seniority,
    /// Required languages.
    pub languages: Vec<String>,
    /// Required expertise areas.
    pub expertises: Vec<String>,
}

impl RequirementProfile {
    /// Creates a new requirement profile.
    #[must_use]
    pub const fn new(
        role: String,
        seniority: Seniority,
        languages: Vec<String>,
        expertises: Vec<String>,
    ) -> Self {
        Self {
            role,
            seniority,
            languages,
            expertises,
        }
    }
}

/// One resource slot on one project.
///
/// An assignment binds a role requirement to at most one candidate. The
/// project owns its assignments; deleting a project cascades.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The unique assignment identifier.
    pub assignment_id: AssignmentId,
    /// The project this assignment belongs to.
    pub project_id: ProjectId,
    /// The role requirement for this slot.
    pub requirement: RequirementProfile,
    /// The bound candidate. Non-null iff status is `accepted`.
    pub candidate_id: Option<CandidateId>,
    /// The candidate currently entitled to accept or decline the slot.
    /// Non-null only while status is `searching`.
    pub offered_candidate_id: Option<CandidateId>,
    /// The computed price in cents, once a candidate and rate are known.
    pub computed_price_cents: Option<i64>,
    /// The booking status of this slot.
    pub status: BookingStatus,
    /// When the assignment was created.
    pub created_at: OffsetDateTime,
    /// When the assignment was last mutated.
    pub updated_at: OffsetDateTime,
    /// The search-window expiry instant, set while searching.
    pub expires_at: Option<OffsetDateTime>,
}

impl Assignment {
    /// Creates a new assignment in `draft` status.
    ///
    /// # Arguments
    ///
    /// * `assignment_id` - The unique assignment identifier
    /// * `project_id` - The owning project
    /// * `requirement` - The role requirement for the slot
    /// * `created_at` - The creation instant
    #[must_use]
    pub const fn new(
        assignment_id: AssignmentId,
        project_id: ProjectId,
        requirement: RequirementProfile,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            assignment_id,
            project_id,
            requirement,
            candidate_id: None,
            offered_candidate_id: None,
            computed_price_cents: None,
            status: BookingStatus::Draft,
            created_at,
            updated_at: created_at,
            expires_at: None,
        }
    }

    /// Checks the candidate-binding invariant.
    ///
    /// `candidate_id` must be non-null iff status is `accepted`, and an
    /// offer may only be pending while status is `searching`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BindingInvariantViolated` if the invariant
    /// does not hold.
    pub fn check_binding_invariant(&self) -> Result<(), DomainError> {
        let bound = self.candidate_id.is_some();
        let accepted = self.status == BookingStatus::Accepted;
        let offer_ok =
            self.offered_candidate_id.is_none() || self.status == BookingStatus::Searching;

        if bound == accepted && offer_ok {
            Ok(())
        } else {
            Err(DomainError::BindingInvariantViolated {
                assignment_id: self.assignment_id.value(),
                status: self.status.as_str().to_string(),
            })
        }
    }
}

/// A project owned by a client, aggregating resource slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// The unique project identifier.
    pub project_id: ProjectId,
    /// An opaque reference to the owning client.
    pub client_ref: String,
    /// The project name.
    pub name: String,
    /// The cached staffing status, recomputed after every assignment
    /// mutation. Must always equal what the aggregation function would
    /// compute from current assignment data.
    pub staffing_status: crate::aggregate::ProjectStatus,
    /// Whether the client explicitly started the project. Orthogonal to
    /// staffing; never derived.
    pub started: bool,
    /// When the project was created.
    pub created_at: OffsetDateTime,
    /// When the project was last mutated.
    pub updated_at: OffsetDateTime,
}

/// A candidate as seen by the booking engine.
///
/// Read-only reference data from the external directory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The unique candidate identifier.
    pub candidate_id: CandidateId,
    /// The candidate's display name.
    pub display_name: String,
    /// Whether the directory currently lists the candidate as available.
    pub available: bool,
    /// The candidate's seniority level.
    pub seniority: Seniority,
    /// Languages the candidate works in.
    pub languages: Vec<String>,
    /// The candidate's expertise areas.
    pub expertises: Vec<String>,
    /// The candidate's day rate in cents, when the directory supplies one.
    pub day_rate_cents: Option<i64>,
}

/// One entry in the append-only decline log.
///
/// Declines never destroy history; the log records who declined a slot and
/// when, so the matching layer can exclude prior decliners on re-offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclineRecord {
    /// The assignment that was declined.
    pub assignment_id: AssignmentId,
    /// The candidate who declined.
    pub candidate_id: CandidateId,
    /// The optional reason given by the candidate.
    pub reason: Option<String>,
    /// When the decline was recorded.
    pub declined_at: OffsetDateTime,
}
