// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use slotbook::{BookingEvent, Notifier};
use slotbook_api::{
    AcceptRequest, AddAssignmentRequest, ApiError, CreateProjectRequest, CreateProjectResponse,
    DeclineRequest, OfferRequest, OpenForMatchingRequest, ProjectDetailResponse, ProjectInfo,
    ReopenRequest, StartProjectRequest, SystemClock, TransitionResponse, accept_assignment,
    add_assignment, create_project, decline_assignment, get_assignment, get_decline_log,
    get_project_detail, get_status_history, list_projects, offer_assignment, open_for_matching,
    remove_assignment, reopen_assignment, run_expiry_sweep, start_project,
};
use slotbook_audit::{AuditEvent, Cause};
use slotbook_domain::{AssignmentId, ProjectId};
use slotbook_persistence::Persistence;

/// Slotbook Server - HTTP server for the resource booking engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Seconds between expiry sweeper passes
    #[arg(short, long, default_value_t = 60)]
    sweep_interval: u64,
}

/// Application state shared across handlers.
///
/// The persistence layer is wrapped in a Mutex so handlers and the
/// background sweeper can share one connection safely.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for assignments, projects, and audit events.
    persistence: Arc<Mutex<Persistence>>,
}

/// A notifier that logs every delivered event as JSON.
///
/// Delivery is at-least-once and fire-and-forget; a serialization failure
/// is logged and dropped, never propagated.
#[derive(Debug, Clone, Copy, Default)]
struct LoggingNotifier;

impl Notifier for LoggingNotifier {
    fn notify(&self, event: &BookingEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => info!(event_id = %event.event_id, %payload, "booking event"),
            Err(err) => warn!(event_id = %event.event_id, error = %err, "undeliverable event"),
        }
    }
}

// ============================================================================
// API request/response wrappers
// ============================================================================

/// API request for opening a slot for matching.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct OpenApiRequest {
    /// The cause ID for this action (e.g. a request ID).
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// Search-window length in hours; defaults when absent.
    window_hours: Option<i64>,
}

/// API request for placing an offer.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct OfferApiRequest {
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The candidate being offered the slot.
    candidate_id: i64,
    /// Search-window length in hours; defaults when absent.
    window_hours: Option<i64>,
}

/// API request for accepting a slot.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AcceptApiRequest {
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The accepting candidate.
    candidate_id: i64,
}

/// API request for declining a slot.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct DeclineApiRequest {
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The declining candidate.
    candidate_id: i64,
    /// The optional reason given.
    #[serde(default)]
    reason: Option<String>,
}

/// API request for re-opening a slot.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ReopenApiRequest {
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// Search-window length in hours; defaults when absent.
    window_hours: Option<i64>,
}

/// Body for POST `/projects/{project_id}/assignments`; the project comes
/// from the path.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AddAssignmentBody {
    /// The role or profile reference.
    role: String,
    /// The required seniority level.
    seniority: String,
    /// Required languages.
    #[serde(default)]
    languages: Vec<String>,
    /// Required expertise areas.
    #[serde(default)]
    expertises: Vec<String>,
}

/// API response for one audit event.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuditEventResponse {
    /// The audit event ID.
    event_id: i64,
    /// The assignment the transition applied to.
    assignment_id: i64,
    /// The actor ID.
    actor_id: String,
    /// The actor type.
    actor_type: String,
    /// The cause ID.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    /// The action name.
    action_name: String,
    /// Optional action details.
    action_details: Option<String>,
    /// The booking status before the transition.
    before_status: String,
    /// The booking status after the transition.
    after_status: String,
}

/// Error payload returned to HTTP clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::AlreadyResolved { .. } => StatusCode::CONFLICT,
            ApiError::NotAuthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Transient { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => {
                error!(error = %err, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Converts an `AuditEvent` to its wire form.
fn audit_event_to_response(event_id: i64, event: &AuditEvent) -> AuditEventResponse {
    AuditEventResponse {
        event_id,
        assignment_id: event.assignment_id,
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action_name: event.action.name.clone(),
        action_details: event.action.details.clone(),
        before_status: event.before.status.as_str().to_string(),
        after_status: event.after.status.as_str().to_string(),
    }
}

// ============================================================================
// Handlers: projects
// ============================================================================

/// Handler for POST `/projects`.
async fn handle_create_project(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<Json<CreateProjectResponse>, HttpError> {
    info!(client_ref = %req.client_ref, name = %req.name, "Handling create_project request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateProjectResponse = create_project(&mut persistence, &req, &SystemClock)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/projects`.
async fn handle_list_projects(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<ProjectInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let projects: Vec<ProjectInfo> = list_projects(&mut persistence)?;
    drop(persistence);

    Ok(Json(projects))
}

/// Handler for GET `/projects/{project_id}`.
async fn handle_get_project(
    AxumState(app_state): AxumState<AppState>,
    Path(project_id): Path<i64>,
) -> Result<Json<ProjectDetailResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let detail: ProjectDetailResponse =
        get_project_detail(&mut persistence, ProjectId::new(project_id))?;
    drop(persistence);

    Ok(Json(detail))
}

/// Handler for POST `/projects/{project_id}/start`.
async fn handle_start_project(
    AxumState(app_state): AxumState<AppState>,
    Path(project_id): Path<i64>,
    Json(req): Json<StartProjectRequest>,
) -> Result<Json<ProjectInfo>, HttpError> {
    info!(project_id, started = req.started, "Handling start_project request");

    let mut persistence = app_state.persistence.lock().await;
    let project: ProjectInfo =
        start_project(&mut persistence, ProjectId::new(project_id), &req, &SystemClock)?;
    drop(persistence);

    Ok(Json(project))
}

/// Handler for POST `/projects/{project_id}/assignments`.
async fn handle_add_assignment(
    AxumState(app_state): AxumState<AppState>,
    Path(project_id): Path<i64>,
    Json(req): Json<AddAssignmentBody>,
) -> Result<Json<slotbook_api::AddAssignmentResponse>, HttpError> {
    info!(project_id, role = %req.role, "Handling add_assignment request");

    let request: AddAssignmentRequest = AddAssignmentRequest {
        project_id,
        role: req.role,
        seniority: req.seniority,
        languages: req.languages,
        expertises: req.expertises,
    };
    let mut persistence = app_state.persistence.lock().await;
    let response = add_assignment(&mut persistence, request, &SystemClock)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Handlers: assignments
// ============================================================================

/// Handler for GET `/assignments/{assignment_id}`.
async fn handle_get_assignment(
    AxumState(app_state): AxumState<AppState>,
    Path(assignment_id): Path<i64>,
) -> Result<Json<slotbook_api::AssignmentInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let assignment = get_assignment(&mut persistence, AssignmentId::new(assignment_id))?;
    drop(persistence);

    Ok(Json(assignment))
}

/// Handler for DELETE `/assignments/{assignment_id}`.
async fn handle_remove_assignment(
    AxumState(app_state): AxumState<AppState>,
    Path(assignment_id): Path<i64>,
) -> Result<Json<slotbook_api::RemoveAssignmentResponse>, HttpError> {
    info!(assignment_id, "Handling remove_assignment request");

    let mut persistence = app_state.persistence.lock().await;
    let response =
        remove_assignment(&mut persistence, AssignmentId::new(assignment_id), &SystemClock)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/assignments/{assignment_id}/open`.
async fn handle_open_for_matching(
    AxumState(app_state): AxumState<AppState>,
    Path(assignment_id): Path<i64>,
    Json(req): Json<OpenApiRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(assignment_id, cause_id = %req.cause_id, "Handling open_for_matching request");

    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionResponse = open_for_matching(
        &mut persistence,
        &LoggingNotifier,
        AssignmentId::new(assignment_id),
        &OpenForMatchingRequest {
            window_hours: req.window_hours,
        },
        cause,
        &SystemClock,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/assignments/{assignment_id}/offer`.
async fn handle_offer(
    AxumState(app_state): AxumState<AppState>,
    Path(assignment_id): Path<i64>,
    Json(req): Json<OfferApiRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(
        assignment_id,
        candidate_id = req.candidate_id,
        cause_id = %req.cause_id,
        "Handling offer request"
    );

    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionResponse = offer_assignment(
        &mut persistence,
        &LoggingNotifier,
        AssignmentId::new(assignment_id),
        &OfferRequest {
            candidate_id: req.candidate_id,
            window_hours: req.window_hours,
        },
        cause,
        &SystemClock,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/assignments/{assignment_id}/accept`.
async fn handle_accept(
    AxumState(app_state): AxumState<AppState>,
    Path(assignment_id): Path<i64>,
    Json(req): Json<AcceptApiRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(
        assignment_id,
        candidate_id = req.candidate_id,
        cause_id = %req.cause_id,
        "Handling accept request"
    );

    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionResponse = accept_assignment(
        &mut persistence,
        &LoggingNotifier,
        AssignmentId::new(assignment_id),
        &AcceptRequest {
            candidate_id: req.candidate_id,
        },
        cause,
        &SystemClock,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/assignments/{assignment_id}/decline`.
async fn handle_decline(
    AxumState(app_state): AxumState<AppState>,
    Path(assignment_id): Path<i64>,
    Json(req): Json<DeclineApiRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(
        assignment_id,
        candidate_id = req.candidate_id,
        cause_id = %req.cause_id,
        "Handling decline request"
    );

    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionResponse = decline_assignment(
        &mut persistence,
        &LoggingNotifier,
        AssignmentId::new(assignment_id),
        DeclineRequest {
            candidate_id: req.candidate_id,
            reason: req.reason,
        },
        cause,
        &SystemClock,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/assignments/{assignment_id}/reopen`.
async fn handle_reopen(
    AxumState(app_state): AxumState<AppState>,
    Path(assignment_id): Path<i64>,
    Json(req): Json<ReopenApiRequest>,
) -> Result<Json<TransitionResponse>, HttpError> {
    info!(assignment_id, cause_id = %req.cause_id, "Handling reopen request");

    let cause: Cause = Cause::new(req.cause_id, req.cause_description);
    let mut persistence = app_state.persistence.lock().await;
    let response: TransitionResponse = reopen_assignment(
        &mut persistence,
        &LoggingNotifier,
        AssignmentId::new(assignment_id),
        &ReopenRequest {
            window_hours: req.window_hours,
        },
        cause,
        &SystemClock,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/assignments/{assignment_id}/declines`.
async fn handle_get_declines(
    AxumState(app_state): AxumState<AppState>,
    Path(assignment_id): Path<i64>,
) -> Result<Json<Vec<slotbook_api::DeclineInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let log = get_decline_log(&mut persistence, AssignmentId::new(assignment_id))?;
    drop(persistence);

    Ok(Json(log))
}

/// Handler for GET `/assignments/{assignment_id}/history`.
async fn handle_get_history(
    AxumState(app_state): AxumState<AppState>,
    Path(assignment_id): Path<i64>,
) -> Result<Json<Vec<slotbook_api::StatusHistoryInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let history = get_status_history(&mut persistence, AssignmentId::new(assignment_id))?;
    drop(persistence);

    Ok(Json(history))
}

// ============================================================================
// Handlers: audit
// ============================================================================

/// Handler for GET `/audit/timeline/{assignment_id}`.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(assignment_id): Path<i64>,
) -> Result<Json<Vec<AuditEventResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let timeline = persistence
        .get_audit_timeline(AssignmentId::new(assignment_id))
        .map_err(|err| HttpError {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: err.to_string(),
        })?;
    drop(persistence);

    let responses: Vec<AuditEventResponse> = timeline
        .iter()
        .map(|(event_id, event)| audit_event_to_response(*event_id, event))
        .collect();
    Ok(Json(responses))
}

/// Handler for GET `/audit/event/{event_id}`.
async fn handle_get_audit_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<AuditEventResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let event: AuditEvent = persistence.get_audit_event(event_id).map_err(|err| HttpError {
        status: StatusCode::NOT_FOUND,
        message: err.to_string(),
    })?;
    drop(persistence);

    Ok(Json(audit_event_to_response(event_id, &event)))
}

// ============================================================================
// Wiring
// ============================================================================

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/projects", post(handle_create_project))
        .route("/projects", get(handle_list_projects))
        .route("/projects/{project_id}", get(handle_get_project))
        .route("/projects/{project_id}/start", post(handle_start_project))
        .route(
            "/projects/{project_id}/assignments",
            post(handle_add_assignment),
        )
        .route("/assignments/{assignment_id}", get(handle_get_assignment))
        .route(
            "/assignments/{assignment_id}",
            delete(handle_remove_assignment),
        )
        .route(
            "/assignments/{assignment_id}/open",
            post(handle_open_for_matching),
        )
        .route("/assignments/{assignment_id}/offer", post(handle_offer))
        .route("/assignments/{assignment_id}/accept", post(handle_accept))
        .route("/assignments/{assignment_id}/decline", post(handle_decline))
        .route("/assignments/{assignment_id}/reopen", post(handle_reopen))
        .route(
            "/assignments/{assignment_id}/declines",
            get(handle_get_declines),
        )
        .route(
            "/assignments/{assignment_id}/history",
            get(handle_get_history),
        )
        .route(
            "/audit/timeline/{assignment_id}",
            get(handle_get_audit_timeline),
        )
        .route("/audit/event/{event_id}", get(handle_get_audit_event))
        .with_state(app_state)
}

/// Runs the expiry sweeper on a fixed interval until the process exits.
async fn sweep_loop(app_state: AppState, interval_secs: u64) {
    static SWEEP_COUNTER: AtomicU64 = AtomicU64::new(1);
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let sweep_id: String = format!("sweep-{}", SWEEP_COUNTER.fetch_add(1, Ordering::Relaxed));
        let mut persistence = app_state.persistence.lock().await;
        let outcome = run_expiry_sweep(&mut persistence, &LoggingNotifier, &sweep_id, &SystemClock);
        drop(persistence);
        if let Err(err) = outcome {
            error!(sweep_id = %sweep_id, error = %err, "sweep pass failed");
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Slotbook Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Background expiry sweeper
    tokio::spawn(sweep_loop(app_state.clone(), args.sweep_interval));

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use slotbook_domain::{Candidate, CandidateId, Seniority};
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }

    /// Mirrors a candidate into the database, as the directory service
    /// would.
    async fn seed_candidate(app_state: &AppState) -> i64 {
        let candidate = Candidate {
            candidate_id: CandidateId::new(0),
            display_name: String::from("Avery Quinn"),
            available: true,
            seniority: Seniority::Senior,
            languages: vec![String::from("french")],
            expertises: vec![String::from("rust")],
            day_rate_cents: Some(65_000),
        };
        let mut persistence = app_state.persistence.lock().await;
        persistence.create_candidate(&candidate).unwrap().value()
    }

    async fn post_json<T: Serialize>(app: &Router, uri: &str, body: &T) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get_uri(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Creates a project with one draft assignment and returns both IDs.
    async fn seed_project(app: &Router) -> (i64, i64) {
        let response = post_json(
            app,
            "/projects",
            &serde_json::json!({
                "client_ref": "client-7",
                "name": "Atlas replatform",
            }),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let created: CreateProjectResponse = body_json(response).await;

        let response = post_json(
            app,
            &format!("/projects/{}/assignments", created.project_id),
            &AddAssignmentBody {
                role: String::from("backend developer"),
                seniority: String::from("senior"),
                languages: vec![String::from("french")],
                expertises: vec![String::from("rust")],
            },
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let added: slotbook_api::AddAssignmentResponse = body_json(response).await;

        (created.project_id, added.assignment_id)
    }

    fn open_request() -> OpenApiRequest {
        OpenApiRequest {
            cause_id: String::from("req-1"),
            cause_description: String::from("Open slot for matching"),
            window_hours: None,
        }
    }

    #[tokio::test]
    async fn test_create_project_returns_no_resources() {
        let app: Router = build_router(create_test_app_state());

        let response = post_json(
            &app,
            "/projects",
            &serde_json::json!({
                "client_ref": "client-7",
                "name": "Atlas replatform",
            }),
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::OK);
        let created: CreateProjectResponse = body_json(response).await;
        assert_eq!(created.staffing_status, "no_resources");
    }

    #[tokio::test]
    async fn test_create_project_with_blank_name_is_bad_request() {
        let app: Router = build_router(create_test_app_state());

        let response = post_json(
            &app,
            "/projects",
            &serde_json::json!({
                "client_ref": "client-7",
                "name": "  ",
            }),
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_full_booking_flow_over_http() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let candidate_id: i64 = seed_candidate(&app_state).await;
        let (project_id, assignment_id) = seed_project(&app).await;

        let response = post_json(
            &app,
            &format!("/assignments/{assignment_id}/open"),
            &open_request(),
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = post_json(
            &app,
            &format!("/assignments/{assignment_id}/offer"),
            &OfferApiRequest {
                cause_id: String::from("req-2"),
                cause_description: String::from("Offer slot"),
                candidate_id,
                window_hours: None,
            },
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = post_json(
            &app,
            &format!("/assignments/{assignment_id}/accept"),
            &AcceptApiRequest {
                cause_id: String::from("req-3"),
                cause_description: String::from("Candidate accepted"),
                candidate_id,
            },
        )
        .await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let accepted: TransitionResponse = body_json(response).await;
        assert_eq!(accepted.assignment.status, "accepted");
        assert_eq!(accepted.staffing_status, "fully_staffed");

        let response = get_uri(&app, &format!("/projects/{project_id}")).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let detail: ProjectDetailResponse = body_json(response).await;
        assert_eq!(detail.project.staffing_progress, 100);
    }

    #[tokio::test]
    async fn test_accept_against_anothers_offer_is_conflict() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let holder_id: i64 = seed_candidate(&app_state).await;
        let latecomer_id: i64 = seed_candidate(&app_state).await;
        let (_, assignment_id) = seed_project(&app).await;

        post_json(
            &app,
            &format!("/assignments/{assignment_id}/open"),
            &open_request(),
        )
        .await;
        post_json(
            &app,
            &format!("/assignments/{assignment_id}/offer"),
            &OfferApiRequest {
                cause_id: String::from("req-2"),
                cause_description: String::from("Offer slot"),
                candidate_id: holder_id,
                window_hours: None,
            },
        )
        .await;

        let response = post_json(
            &app,
            &format!("/assignments/{assignment_id}/accept"),
            &AcceptApiRequest {
                cause_id: String::from("req-3"),
                cause_description: String::from("Candidate accepted"),
                candidate_id: latecomer_id,
            },
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_decline_after_acceptance_is_conflict() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let candidate_id: i64 = seed_candidate(&app_state).await;
        let (_, assignment_id) = seed_project(&app).await;

        post_json(
            &app,
            &format!("/assignments/{assignment_id}/open"),
            &open_request(),
        )
        .await;
        post_json(
            &app,
            &format!("/assignments/{assignment_id}/offer"),
            &OfferApiRequest {
                cause_id: String::from("req-2"),
                cause_description: String::from("Offer slot"),
                candidate_id,
                window_hours: None,
            },
        )
        .await;
        post_json(
            &app,
            &format!("/assignments/{assignment_id}/accept"),
            &AcceptApiRequest {
                cause_id: String::from("req-3"),
                cause_description: String::from("Candidate accepted"),
                candidate_id,
            },
        )
        .await;

        let response = post_json(
            &app,
            &format!("/assignments/{assignment_id}/decline"),
            &DeclineApiRequest {
                cause_id: String::from("req-4"),
                cause_description: String::from("Late decline"),
                candidate_id,
                reason: None,
            },
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_reopen_draft_slot_is_unprocessable() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state);
        let (_, assignment_id) = seed_project(&app).await;

        let response = post_json(
            &app,
            &format!("/assignments/{assignment_id}/reopen"),
            &ReopenApiRequest {
                cause_id: String::from("req-2"),
                cause_description: String::from("Reopen slot"),
                window_hours: None,
            },
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missing_assignment_is_not_found() {
        let app: Router = build_router(create_test_app_state());

        let response = get_uri(&app, "/assignments/999").await;
        assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_seniority_is_bad_request() {
        let app: Router = build_router(create_test_app_state());
        let (project_id, _) = seed_project(&app).await;

        let response = post_json(
            &app,
            &format!("/projects/{project_id}/assignments"),
            &AddAssignmentBody {
                role: String::from("backend developer"),
                seniority: String::from("wizard"),
                languages: vec![],
                expertises: vec![],
            },
        )
        .await;

        assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_audit_timeline_reflects_transitions() {
        let app_state: AppState = create_test_app_state();
        let app: Router = build_router(app_state.clone());
        let candidate_id: i64 = seed_candidate(&app_state).await;
        let (_, assignment_id) = seed_project(&app).await;

        post_json(
            &app,
            &format!("/assignments/{assignment_id}/open"),
            &open_request(),
        )
        .await;
        post_json(
            &app,
            &format!("/assignments/{assignment_id}/offer"),
            &OfferApiRequest {
                cause_id: String::from("req-2"),
                cause_description: String::from("Offer slot"),
                candidate_id,
                window_hours: None,
            },
        )
        .await;

        let response = get_uri(&app, &format!("/audit/timeline/{assignment_id}")).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let timeline: Vec<AuditEventResponse> = body_json(response).await;
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].action_name, "OpenForMatching");
        assert_eq!(timeline[1].action_name, "Offer");

        let response = get_uri(&app, &format!("/audit/event/{}", timeline[1].event_id)).await;
        assert_eq!(response.status(), HttpStatusCode::OK);
        let event: AuditEventResponse = body_json(response).await;
        assert_eq!(event.before_status, "searching");
        assert_eq!(event.after_status, "searching");
    }

    #[tokio::test]
    async fn test_remove_assignment_over_http() {
        let app: Router = build_router(create_test_app_state());
        let (project_id, assignment_id) = seed_project(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/assignments/{assignment_id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), HttpStatusCode::OK);

        let response = get_uri(&app, &format!("/projects/{project_id}")).await;
        let detail: ProjectDetailResponse = body_json(response).await;
        assert!(detail.assignments.is_empty());
    }
}
