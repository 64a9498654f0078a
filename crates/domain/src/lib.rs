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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod aggregate;
mod booking_status;
mod error;
mod search_window;
mod types;
mod validation;

pub use aggregate::{ProjectStatus, aggregate, staffing_progress};
pub use booking_status::BookingStatus;
pub use error::DomainError;
pub use search_window::{DEFAULT_SEARCH_WINDOW, expiry_instant, has_elapsed};
pub use types::{
    Assignment, AssignmentId, Candidate, CandidateId, DeclineRecord, Project, ProjectId,
    RequirementProfile, Seniority,
};
pub use validation::validate_requirements;
