// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The service layer of the booking engine.
//!
//! This crate sits between callers (HTTP, CLI, the sweeper loop) and the
//! pure transition core. It validates requests, injects the clock, applies
//! transitions, persists them behind the status-guarded update, keeps each
//! project's cached staffing status in sync, and delivers events to the
//! notifier boundary after commit.

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

mod clock;
mod error;
mod request_response;
mod service;
mod sweeper;

#[cfg(test)]
mod tests;

pub use clock::{Clock, SystemClock};
pub use error::{ApiError, RequestValidationError};
pub use request_response::{
    AcceptRequest, AddAssignmentRequest, AddAssignmentResponse, AssignmentInfo,
    CreateProjectRequest, CreateProjectResponse, DeclineInfo, DeclineRequest, OfferRequest,
    OpenForMatchingRequest, ProjectDetailResponse, ProjectInfo, RemoveAssignmentResponse,
    ReopenRequest, StartProjectRequest, StatusHistoryInfo, TransitionResponse,
};
pub use service::{
    accept_assignment, add_assignment, create_project, decline_assignment, get_assignment,
    get_decline_log, get_project_detail, get_status_history, list_projects, new_event_id,
    offer_assignment,
    open_for_matching, remove_assignment, reopen_assignment, start_project,
};
pub use sweeper::{SweepReport, run_expiry_sweep};
