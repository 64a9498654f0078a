// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Service functions for the booking surface.
//!
//! Each mutating function follows the same shape: load current state,
//! apply the pure transition, persist it behind the status-guarded update,
//! then re-aggregate the parent project and deliver events. A lost race is
//! resolved by re-reading: a retry whose effect already landed reports
//! idempotent success, everything else surfaces as `AlreadyResolved`.

use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

use slotbook::{
    BookingEvent, BookingEventKind, Command, Notifier, TransitionResult, apply,
};
use slotbook_audit::{Actor, Cause};
use slotbook_domain::{
    Assignment, AssignmentId, BookingStatus, Candidate, CandidateId, DEFAULT_SEARCH_WINDOW,
    DomainError, Project, ProjectId, ProjectStatus, RequirementProfile, Seniority, aggregate,
    expiry_instant, staffing_progress,
};
use slotbook_persistence::{Persistence, TransitionOutcome};

use crate::clock::Clock;
use crate::error::{
    ApiError, RequestValidationError, translate_booking_error, translate_domain_error,
    translate_persistence_error,
};
use crate::request_response::{
    AcceptRequest, AddAssignmentRequest, AddAssignmentResponse, AssignmentInfo,
    CreateProjectRequest, CreateProjectResponse, DeclineInfo, DeclineRequest, OfferRequest,
    OpenForMatchingRequest, ProjectDetailResponse, ProjectInfo, RemoveAssignmentResponse,
    ReopenRequest, StartProjectRequest, StatusHistoryInfo, TransitionResponse,
};

/// Generates a unique event identifier for the notifier envelope.
#[must_use]
pub fn new_event_id() -> String {
    format!("evt-{:016x}", rand::random::<u64>())
}

/// Resolves a requested window length into an expiry instant.
fn window_expiry(
    now: OffsetDateTime,
    window_hours: Option<i64>,
) -> Result<OffsetDateTime, ApiError> {
    let window: Duration = match window_hours {
        Some(hours) if hours <= 0 => {
            return Err(RequestValidationError::InvalidWindow { hours }.into());
        }
        Some(hours) => Duration::hours(hours),
        None => DEFAULT_SEARCH_WINDOW,
    };
    expiry_instant(now, window).map_err(translate_domain_error)
}

fn assignment_info(assignment: &Assignment) -> AssignmentInfo {
    AssignmentInfo {
        assignment_id: assignment.assignment_id.value(),
        project_id: assignment.project_id.value(),
        role: assignment.requirement.role.clone(),
        seniority: assignment.requirement.seniority.as_str().to_string(),
        languages: assignment.requirement.languages.clone(),
        expertises: assignment.requirement.expertises.clone(),
        status: assignment.status.as_str().to_string(),
        candidate_id: assignment.candidate_id.map(|c| c.value()),
        offered_candidate_id: assignment.offered_candidate_id.map(|c| c.value()),
        computed_price_cents: assignment.computed_price_cents,
        expires_at: assignment.expires_at,
    }
}

fn load_assignment(
    persistence: &mut Persistence,
    assignment_id: AssignmentId,
) -> Result<Assignment, ApiError> {
    persistence
        .get_assignment(assignment_id)
        .map_err(translate_persistence_error)
}

/// Recomputes and stores a project's staffing status.
///
/// Returns the freshly derived status. The cached column is overwritten
/// unconditionally; aggregation is idempotent so the last writer always
/// converges on the truth.
pub(crate) fn reaggregate(
    persistence: &mut Persistence,
    project_id: ProjectId,
    now: OffsetDateTime,
) -> Result<ProjectStatus, ApiError> {
    let statuses: Vec<BookingStatus> = persistence
        .list_statuses_for_project(project_id)
        .map_err(translate_persistence_error)?;
    let derived: ProjectStatus = aggregate(&statuses);
    persistence
        .set_project_staffing(project_id, derived, now)
        .map_err(translate_persistence_error)?;
    Ok(derived)
}

/// Delivers the events for a committed transition.
///
/// Delivery happens strictly after the database commit and is
/// fire-and-forget; the committed transition stands whatever the notifier
/// does. `ProjectFullyStaffed` fires only when the project crossed into
/// `fully_staffed` with this transition.
fn deliver_events(
    notifier: &dyn Notifier,
    result: &TransitionResult,
    previous_staffing: ProjectStatus,
    new_staffing: ProjectStatus,
    candidate_id: Option<CandidateId>,
    now: OffsetDateTime,
) {
    let assignment: &Assignment = &result.new_assignment;

    deliver_transition_event(notifier, result, candidate_id, now);

    if new_staffing == ProjectStatus::FullyStaffed
        && previous_staffing != ProjectStatus::FullyStaffed
    {
        let event = BookingEvent::new(
            new_event_id(),
            BookingEventKind::ProjectFullyStaffed,
            assignment.project_id,
            assignment.assignment_id,
            None,
            now,
        );
        info!(
            event_id = %event.event_id,
            project_id = assignment.project_id.value(),
            "project is now fully staffed"
        );
        notifier.notify(&event);
    }
}

/// Delivers the domain event carried by a single transition, if any.
pub(crate) fn deliver_transition_event(
    notifier: &dyn Notifier,
    result: &TransitionResult,
    candidate_id: Option<CandidateId>,
    now: OffsetDateTime,
) {
    let assignment: &Assignment = &result.new_assignment;
    if let Some(kind) = result.event {
        let event = BookingEvent::new(
            new_event_id(),
            kind,
            assignment.project_id,
            assignment.assignment_id,
            candidate_id,
            now,
        );
        info!(event_id = %event.event_id, kind = %kind, "delivering booking event");
        notifier.notify(&event);
    }
}

/// Persists a transition, re-aggregates, and delivers events.
///
/// Returns `Ok(Some(staffing))` when the write landed, `Ok(None)` when it
/// lost the race (callers re-read and decide), and the idempotent-retry
/// staffing when the transition was a no-op.
fn commit_transition(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    expected_status: BookingStatus,
    result: &TransitionResult,
    decline: Option<&slotbook_domain::DeclineRecord>,
    candidate_id: Option<CandidateId>,
    now: OffsetDateTime,
) -> Result<Option<ProjectStatus>, ApiError> {
    let project_id: ProjectId = result.new_assignment.project_id;
    let previous_staffing: ProjectStatus = persistence
        .get_project(project_id)
        .map_err(translate_persistence_error)?
        .staffing_status;

    let outcome: TransitionOutcome = persistence
        .persist_transition(expected_status, result, decline)
        .map_err(translate_persistence_error)?;

    match outcome {
        TransitionOutcome::Applied { .. } => {
            let new_staffing: ProjectStatus = reaggregate(persistence, project_id, now)?;
            deliver_events(
                notifier,
                result,
                previous_staffing,
                new_staffing,
                candidate_id,
                now,
            );
            Ok(Some(new_staffing))
        }
        TransitionOutcome::Noop => Ok(Some(previous_staffing)),
        TransitionOutcome::LostRace => Ok(None),
    }
}

fn already_resolved(assignment: &Assignment) -> ApiError {
    ApiError::AlreadyResolved {
        assignment_id: assignment.assignment_id.value(),
        current_status: assignment.status.as_str().to_string(),
    }
}

fn transition_response(
    assignment: &Assignment,
    staffing: ProjectStatus,
    idempotent_retry: bool,
) -> TransitionResponse {
    TransitionResponse {
        assignment: assignment_info(assignment),
        staffing_status: staffing.as_str().to_string(),
        idempotent_retry,
    }
}

fn candidate_actor(candidate_id: CandidateId) -> Actor {
    Actor::new(format!("candidate-{candidate_id}"), String::from("candidate"))
}

fn operator_actor() -> Actor {
    Actor::new(String::from("operator"), String::from("admin"))
}

// ============================================================================
// Project & requirement definition
// ============================================================================

/// Creates a new project.
///
/// # Errors
///
/// Returns an error if a field is empty or the insert fails.
pub fn create_project(
    persistence: &mut Persistence,
    request: &CreateProjectRequest,
    clock: &dyn Clock,
) -> Result<CreateProjectResponse, ApiError> {
    if request.client_ref.trim().is_empty() {
        return Err(RequestValidationError::EmptyField {
            field: String::from("client_ref"),
        }
        .into());
    }
    if request.name.trim().is_empty() {
        return Err(RequestValidationError::EmptyField {
            field: String::from("name"),
        }
        .into());
    }

    let project_id: ProjectId = persistence
        .create_project(&request.client_ref, &request.name, clock.now())
        .map_err(translate_persistence_error)?;

    info!(project_id = project_id.value(), "created project");
    Ok(CreateProjectResponse {
        project_id: project_id.value(),
        staffing_status: ProjectStatus::NoResources.as_str().to_string(),
        message: format!("Project '{}' created", request.name),
    })
}

/// Adds a draft resource slot to a project and re-aggregates it.
///
/// # Errors
///
/// Returns an error if the request is invalid, the project does not
/// exist, or the insert fails.
pub fn add_assignment(
    persistence: &mut Persistence,
    request: AddAssignmentRequest,
    clock: &dyn Clock,
) -> Result<AddAssignmentResponse, ApiError> {
    if request.role.trim().is_empty() {
        return Err(RequestValidationError::EmptyField {
            field: String::from("role"),
        }
        .into());
    }
    let seniority: Seniority =
        Seniority::parse(&request.seniority).map_err(|_| RequestValidationError::InvalidSeniority {
            value: request.seniority.clone(),
        })?;

    let project_id = ProjectId::new(request.project_id);
    // Surface a missing project as 404 rather than a foreign key failure.
    persistence
        .get_project(project_id)
        .map_err(translate_persistence_error)?;

    let requirement = RequirementProfile::new(
        request.role,
        seniority,
        request.languages,
        request.expertises,
    );
    let now: OffsetDateTime = clock.now();
    let assignment_id: AssignmentId = persistence
        .create_assignment(project_id, &requirement, now)
        .map_err(translate_persistence_error)?;
    let staffing: ProjectStatus = reaggregate(persistence, project_id, now)?;

    info!(
        assignment_id = assignment_id.value(),
        project_id = project_id.value(),
        "added assignment"
    );
    Ok(AddAssignmentResponse {
        assignment_id: assignment_id.value(),
        project_id: project_id.value(),
        status: BookingStatus::Draft.as_str().to_string(),
        staffing_status: staffing.as_str().to_string(),
    })
}

/// Removes a resource slot and re-aggregates its project.
///
/// An accepted slot cannot be removed; the booking must be released
/// through its own lifecycle first.
///
/// # Errors
///
/// Returns an error if the assignment does not exist, is accepted, or the
/// delete fails.
pub fn remove_assignment(
    persistence: &mut Persistence,
    assignment_id: AssignmentId,
    clock: &dyn Clock,
) -> Result<RemoveAssignmentResponse, ApiError> {
    let assignment: Assignment = load_assignment(persistence, assignment_id)?;
    if assignment.status == BookingStatus::Accepted {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("remove_unbooked_only"),
            message: format!(
                "assignment {assignment_id} is accepted and cannot be removed"
            ),
        });
    }

    let now: OffsetDateTime = clock.now();
    persistence
        .remove_assignment(assignment_id)
        .map_err(translate_persistence_error)?;
    // Removing the last unbooked slot can flip the cached status to
    // fully_staffed; `ProjectFullyStaffed` still only fires from a booking
    // transition, and a deletion has none.
    let staffing: ProjectStatus = reaggregate(persistence, assignment.project_id, now)?;

    info!(
        assignment_id = assignment_id.value(),
        project_id = assignment.project_id.value(),
        "removed assignment"
    );
    Ok(RemoveAssignmentResponse {
        assignment_id: assignment_id.value(),
        project_id: assignment.project_id.value(),
        staffing_status: staffing.as_str().to_string(),
    })
}

/// Flips a project's explicit started flag.
///
/// Starting a project is a client decision and deliberately independent of
/// staffing.
///
/// # Errors
///
/// Returns an error if the project does not exist.
pub fn start_project(
    persistence: &mut Persistence,
    project_id: ProjectId,
    request: &StartProjectRequest,
    clock: &dyn Clock,
) -> Result<ProjectInfo, ApiError> {
    persistence
        .set_project_started(project_id, request.started, clock.now())
        .map_err(translate_persistence_error)?;
    get_project_detail(persistence, project_id).map(|detail| detail.project)
}

// ============================================================================
// Booking transitions
// ============================================================================

/// Opens a draft slot for matching.
///
/// # Errors
///
/// Returns an error if the slot does not exist, its requirements are
/// incomplete, or the transition is illegal.
pub fn open_for_matching(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    assignment_id: AssignmentId,
    request: &OpenForMatchingRequest,
    cause: Cause,
    clock: &dyn Clock,
) -> Result<TransitionResponse, ApiError> {
    let now: OffsetDateTime = clock.now();
    let expires_at: OffsetDateTime = window_expiry(now, request.window_hours)?;
    let assignment: Assignment = load_assignment(persistence, assignment_id)?;

    let result: TransitionResult = apply(
        &assignment,
        Command::OpenForMatching { expires_at, at: now },
        operator_actor(),
        cause,
    )
    .map_err(translate_booking_error)?;

    if result.is_noop() {
        let staffing: ProjectStatus = current_staffing(persistence, assignment.project_id)?;
        return Ok(transition_response(&assignment, staffing, true));
    }

    match commit_transition(
        persistence,
        notifier,
        assignment.status,
        &result,
        None,
        None,
        now,
    )? {
        Some(staffing) => Ok(transition_response(&result.new_assignment, staffing, false)),
        None => {
            let current: Assignment = load_assignment(persistence, assignment_id)?;
            if current.status == BookingStatus::Searching {
                let staffing: ProjectStatus = current_staffing(persistence, current.project_id)?;
                return Ok(transition_response(&current, staffing, true));
            }
            Err(already_resolved(&current))
        }
    }
}

/// Places an offer on a searching slot.
///
/// The candidate must exist, be listed as available, and must not appear
/// in the slot's decline log.
///
/// # Errors
///
/// Returns an error if any precondition fails or the slot was resolved
/// first.
pub fn offer_assignment(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    assignment_id: AssignmentId,
    request: &OfferRequest,
    cause: Cause,
    clock: &dyn Clock,
) -> Result<TransitionResponse, ApiError> {
    let now: OffsetDateTime = clock.now();
    let expires_at: OffsetDateTime = window_expiry(now, request.window_hours)?;
    let candidate_id = CandidateId::new(request.candidate_id);
    let assignment: Assignment = load_assignment(persistence, assignment_id)?;

    let candidate: Candidate = persistence
        .get_candidate(candidate_id)
        .map_err(translate_persistence_error)?;
    if !candidate.available {
        return Err(translate_domain_error(DomainError::CandidateUnavailable {
            candidate_id: candidate_id.value(),
        }));
    }
    let declined: bool = persistence
        .has_declined(assignment_id, candidate_id)
        .map_err(translate_persistence_error)?;
    if declined {
        return Err(translate_domain_error(
            DomainError::CandidatePreviouslyDeclined {
                assignment_id: assignment_id.value(),
                candidate_id: candidate_id.value(),
            },
        ));
    }

    let result: TransitionResult = apply(
        &assignment,
        Command::Offer {
            candidate_id,
            expires_at,
            at: now,
        },
        operator_actor(),
        cause,
    )
    .map_err(translate_booking_error)?;

    match commit_transition(
        persistence,
        notifier,
        assignment.status,
        &result,
        None,
        Some(candidate_id),
        now,
    )? {
        Some(staffing) => Ok(transition_response(&result.new_assignment, staffing, false)),
        None => {
            let current: Assignment = load_assignment(persistence, assignment_id)?;
            Err(already_resolved(&current))
        }
    }
}

/// Accepts a searching slot, binding the candidate.
///
/// The price is computed from the candidate's day rate when the directory
/// supplies one. A retry by the already-bound candidate succeeds without
/// duplicate events; an accept racing against an offer held by a different
/// candidate, or arriving after the slot resolved, reports
/// `AlreadyResolved`. A slot with no pending offer can be accepted
/// directly.
///
/// # Errors
///
/// Returns an error if the slot was resolved first or the transition is
/// illegal.
pub fn accept_assignment(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    assignment_id: AssignmentId,
    request: &AcceptRequest,
    cause: Cause,
    clock: &dyn Clock,
) -> Result<TransitionResponse, ApiError> {
    let now: OffsetDateTime = clock.now();
    let candidate_id = CandidateId::new(request.candidate_id);
    let assignment: Assignment = load_assignment(persistence, assignment_id)?;

    // An accept racing against an offer held by someone else has already
    // lost to the holder; report the concurrency outcome so the caller
    // re-fetches instead of re-sending.
    if assignment.status == BookingStatus::Searching
        && assignment
            .offered_candidate_id
            .is_some_and(|holder| holder != candidate_id)
    {
        return Err(already_resolved(&assignment));
    }

    let candidate: Candidate = persistence
        .get_candidate(candidate_id)
        .map_err(translate_persistence_error)?;
    let result: TransitionResult = apply(
        &assignment,
        Command::Accept {
            candidate_id,
            price_cents: candidate.day_rate_cents,
            at: now,
        },
        candidate_actor(candidate_id),
        cause,
    )
    .map_err(translate_booking_error)?;

    if result.is_noop() {
        let staffing: ProjectStatus = current_staffing(persistence, assignment.project_id)?;
        return Ok(transition_response(&assignment, staffing, true));
    }

    match commit_transition(
        persistence,
        notifier,
        assignment.status,
        &result,
        None,
        Some(candidate_id),
        now,
    )? {
        Some(staffing) => Ok(transition_response(&result.new_assignment, staffing, false)),
        None => {
            // Lost the race: distinguish "my accept already landed" from
            // "someone else resolved the slot".
            let current: Assignment = load_assignment(persistence, assignment_id)?;
            if current.status == BookingStatus::Accepted
                && current.candidate_id == Some(candidate_id)
            {
                let staffing: ProjectStatus = current_staffing(persistence, current.project_id)?;
                return Ok(transition_response(&current, staffing, true));
            }
            Err(already_resolved(&current))
        }
    }
}

/// Declines a searching slot.
///
/// The decline lands in the append-only log atomically with the status
/// flip; the slot returns to matching with a fresh window. A retry after
/// the offer already moved on reports idempotent success.
///
/// # Errors
///
/// Returns an error if the candidate does not hold the offer or the slot
/// was resolved first.
pub fn decline_assignment(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    assignment_id: AssignmentId,
    request: DeclineRequest,
    cause: Cause,
    clock: &dyn Clock,
) -> Result<TransitionResponse, ApiError> {
    let now: OffsetDateTime = clock.now();
    let candidate_id = CandidateId::new(request.candidate_id);
    let assignment: Assignment = load_assignment(persistence, assignment_id)?;

    // Retried decline: the refusal is already on record and the offer has
    // moved on.
    let already_logged: bool = persistence
        .has_declined(assignment_id, candidate_id)
        .map_err(translate_persistence_error)?;
    if already_logged && assignment.offered_candidate_id != Some(candidate_id) {
        let staffing: ProjectStatus = current_staffing(persistence, assignment.project_id)?;
        return Ok(transition_response(&assignment, staffing, true));
    }

    let renewed_expires_at: OffsetDateTime = window_expiry(now, None)?;
    let result: TransitionResult = apply(
        &assignment,
        Command::Decline {
            candidate_id,
            reason: request.reason.clone(),
            renewed_expires_at,
            at: now,
        },
        candidate_actor(candidate_id),
        cause,
    )
    .map_err(translate_booking_error)?;

    let decline = slotbook_domain::DeclineRecord {
        assignment_id,
        candidate_id,
        reason: request.reason,
        declined_at: now,
    };

    match commit_transition(
        persistence,
        notifier,
        assignment.status,
        &result,
        Some(&decline),
        Some(candidate_id),
        now,
    )? {
        Some(staffing) => Ok(transition_response(&result.new_assignment, staffing, false)),
        None => {
            let current: Assignment = load_assignment(persistence, assignment_id)?;
            let logged: bool = persistence
                .has_declined(assignment_id, candidate_id)
                .map_err(translate_persistence_error)?;
            if logged {
                let staffing: ProjectStatus = current_staffing(persistence, current.project_id)?;
                return Ok(transition_response(&current, staffing, true));
            }
            Err(already_resolved(&current))
        }
    }
}

/// Re-opens an expired or declined slot for matching.
///
/// # Errors
///
/// Returns an error if the slot does not exist or the transition is
/// illegal.
pub fn reopen_assignment(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    assignment_id: AssignmentId,
    request: &ReopenRequest,
    cause: Cause,
    clock: &dyn Clock,
) -> Result<TransitionResponse, ApiError> {
    let now: OffsetDateTime = clock.now();
    let expires_at: OffsetDateTime = window_expiry(now, request.window_hours)?;
    let assignment: Assignment = load_assignment(persistence, assignment_id)?;

    let result: TransitionResult = apply(
        &assignment,
        Command::Reopen { expires_at, at: now },
        operator_actor(),
        cause,
    )
    .map_err(translate_booking_error)?;

    if result.is_noop() {
        let staffing: ProjectStatus = current_staffing(persistence, assignment.project_id)?;
        return Ok(transition_response(&assignment, staffing, true));
    }

    match commit_transition(
        persistence,
        notifier,
        assignment.status,
        &result,
        None,
        None,
        now,
    )? {
        Some(staffing) => Ok(transition_response(&result.new_assignment, staffing, false)),
        None => {
            let current: Assignment = load_assignment(persistence, assignment_id)?;
            if current.status == BookingStatus::Searching {
                let staffing: ProjectStatus = current_staffing(persistence, current.project_id)?;
                return Ok(transition_response(&current, staffing, true));
            }
            Err(already_resolved(&current))
        }
    }
}

// ============================================================================
// Read surface
// ============================================================================

fn current_staffing(
    persistence: &mut Persistence,
    project_id: ProjectId,
) -> Result<ProjectStatus, ApiError> {
    Ok(persistence
        .get_project(project_id)
        .map_err(translate_persistence_error)?
        .staffing_status)
}

/// Loads one assignment.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the assignment does not exist.
pub fn get_assignment(
    persistence: &mut Persistence,
    assignment_id: AssignmentId,
) -> Result<AssignmentInfo, ApiError> {
    load_assignment(persistence, assignment_id).map(|a| assignment_info(&a))
}

/// Lists every project with its derived progress.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn list_projects(persistence: &mut Persistence) -> Result<Vec<ProjectInfo>, ApiError> {
    let projects: Vec<Project> = persistence
        .list_projects()
        .map_err(translate_persistence_error)?;
    let mut infos: Vec<ProjectInfo> = Vec::with_capacity(projects.len());
    for project in projects {
        let statuses: Vec<BookingStatus> = persistence
            .list_statuses_for_project(project.project_id)
            .map_err(translate_persistence_error)?;
        infos.push(ProjectInfo {
            project_id: project.project_id.value(),
            client_ref: project.client_ref,
            name: project.name,
            staffing_status: project.staffing_status.as_str().to_string(),
            staffing_progress: staffing_progress(&statuses),
            started: project.started,
        });
    }
    Ok(infos)
}

/// Loads a project together with its assignments and derived progress.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the project does not exist.
pub fn get_project_detail(
    persistence: &mut Persistence,
    project_id: ProjectId,
) -> Result<ProjectDetailResponse, ApiError> {
    let project: Project = persistence
        .get_project(project_id)
        .map_err(translate_persistence_error)?;
    let assignments: Vec<Assignment> = persistence
        .list_assignments_for_project(project_id)
        .map_err(translate_persistence_error)?;
    let statuses: Vec<BookingStatus> = assignments.iter().map(|a| a.status).collect();

    Ok(ProjectDetailResponse {
        project: ProjectInfo {
            project_id: project.project_id.value(),
            client_ref: project.client_ref,
            name: project.name,
            staffing_status: project.staffing_status.as_str().to_string(),
            staffing_progress: staffing_progress(&statuses),
            started: project.started,
        },
        assignments: assignments.iter().map(assignment_info).collect(),
    })
}

/// Loads the decline log for an assignment, oldest first.
///
/// # Errors
///
/// Returns an error if the assignment does not exist or the query fails.
pub fn get_decline_log(
    persistence: &mut Persistence,
    assignment_id: AssignmentId,
) -> Result<Vec<DeclineInfo>, ApiError> {
    load_assignment(persistence, assignment_id)?;
    let log = persistence
        .get_decline_log(assignment_id)
        .map_err(translate_persistence_error)?;
    Ok(log
        .into_iter()
        .map(|record| DeclineInfo {
            candidate_id: record.candidate_id.value(),
            reason: record.reason,
            declined_at: record.declined_at,
        })
        .collect())
}

/// Loads the status history for an assignment, oldest first.
///
/// # Errors
///
/// Returns an error if the assignment does not exist or the query fails.
pub fn get_status_history(
    persistence: &mut Persistence,
    assignment_id: AssignmentId,
) -> Result<Vec<StatusHistoryInfo>, ApiError> {
    load_assignment(persistence, assignment_id)?;
    let history = persistence
        .get_status_history(assignment_id)
        .map_err(translate_persistence_error)?;
    Ok(history
        .into_iter()
        .map(|entry| StatusHistoryInfo {
            previous_status: entry.previous_status.as_str().to_string(),
            new_status: entry.new_status.as_str().to_string(),
            transitioned_at: entry.transitioned_at,
        })
        .collect())
}

/// Warn-logs and swallows a failure during best-effort bookkeeping. Used
/// by the sweeper, where one bad row must not stop the pass.
pub(crate) fn log_and_continue(context: &str, err: &ApiError) {
    warn!(context, error = %err, "continuing after failure");
}
