// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service request and response data transfer objects.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Request to create a new project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateProjectRequest {
    /// An opaque reference to the owning client.
    pub client_ref: String,
    /// The project name.
    pub name: String,
}

/// Response for a successful project creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectResponse {
    /// The assigned project identifier.
    pub project_id: i64,
    /// The initial staffing status.
    pub staffing_status: String,
    /// A success message.
    pub message: String,
}

/// Request to add a resource slot to a project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddAssignmentRequest {
    /// The owning project.
    pub project_id: i64,
    /// The role or profile reference.
    pub role: String,
    /// The required seniority level.
    pub seniority: String,
    /// Required languages.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Required expertise areas.
    #[serde(default)]
    pub expertises: Vec<String>,
}

/// Response for a successful assignment creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddAssignmentResponse {
    /// The assigned assignment identifier.
    pub assignment_id: i64,
    /// The owning project.
    pub project_id: i64,
    /// The initial booking status (`draft`).
    pub status: String,
    /// The project staffing status after re-aggregation.
    pub staffing_status: String,
}

/// Response for a successful assignment removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveAssignmentResponse {
    /// The removed assignment identifier.
    pub assignment_id: i64,
    /// The owning project.
    pub project_id: i64,
    /// The project staffing status after re-aggregation.
    pub staffing_status: String,
}

/// Request to open a draft slot for matching.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OpenForMatchingRequest {
    /// Search-window length in hours; the default window applies when
    /// absent.
    pub window_hours: Option<i64>,
}

/// Request to place an offer on a searching slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OfferRequest {
    /// The candidate being offered the slot.
    pub candidate_id: i64,
    /// Search-window length in hours; the default window applies when
    /// absent.
    pub window_hours: Option<i64>,
}

/// Request to accept a slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AcceptRequest {
    /// The accepting candidate.
    pub candidate_id: i64,
}

/// Request to decline a slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeclineRequest {
    /// The declining candidate. Must hold the current offer.
    pub candidate_id: i64,
    /// The optional reason given by the candidate.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request to re-open an expired slot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReopenRequest {
    /// Search-window length in hours; the default window applies when
    /// absent.
    pub window_hours: Option<i64>,
}

/// Request to flip a project's explicit started flag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StartProjectRequest {
    /// The new value of the flag.
    pub started: bool,
}

/// One assignment, as returned by the read surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentInfo {
    /// The assignment identifier.
    pub assignment_id: i64,
    /// The owning project.
    pub project_id: i64,
    /// The role or profile reference.
    pub role: String,
    /// The required seniority level.
    pub seniority: String,
    /// Required languages.
    pub languages: Vec<String>,
    /// Required expertise areas.
    pub expertises: Vec<String>,
    /// The booking status.
    pub status: String,
    /// The bound candidate, if any.
    pub candidate_id: Option<i64>,
    /// The candidate currently holding the offer, if any.
    pub offered_candidate_id: Option<i64>,
    /// The computed price in cents, if known.
    pub computed_price_cents: Option<i64>,
    /// The search-window expiry instant, if set.
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
}

/// A project with its derived staffing figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// The project identifier.
    pub project_id: i64,
    /// An opaque reference to the owning client.
    pub client_ref: String,
    /// The project name.
    pub name: String,
    /// The cached staffing status.
    pub staffing_status: String,
    /// Staffing progress as a whole percentage (0-100).
    pub staffing_progress: u8,
    /// Whether the client explicitly started the project.
    pub started: bool,
}

/// A project together with its assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetailResponse {
    /// The project.
    pub project: ProjectInfo,
    /// Its assignments, oldest first.
    pub assignments: Vec<AssignmentInfo>,
}

/// One decline-log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclineInfo {
    /// The candidate who declined.
    pub candidate_id: i64,
    /// The optional reason given.
    pub reason: Option<String>,
    /// When the decline was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub declined_at: OffsetDateTime,
}

/// One status-history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryInfo {
    /// The status before the edge.
    pub previous_status: String,
    /// The status after the edge.
    pub new_status: String,
    /// When the edge was traversed.
    #[serde(with = "time::serde::rfc3339")]
    pub transitioned_at: OffsetDateTime,
}

/// Response for a successful booking transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionResponse {
    /// The assignment after the transition.
    pub assignment: AssignmentInfo,
    /// The project staffing status after re-aggregation.
    pub staffing_status: String,
    /// Whether the request was an idempotent retry that changed nothing.
    pub idempotent_retry: bool,
}
