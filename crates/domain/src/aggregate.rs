// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project staffing status aggregation.
//!
//! The project status is **computed**, not authored. It is a pure function
//! of the multiset of the project's assignments' booking statuses, and the
//! cached column on the project row must always equal what this function
//! returns for current assignment data.
//!
//! Whether a project has been *started* by its client is a separate,
//! explicit dimension and is deliberately not part of this computation.

use crate::booking_status::BookingStatus;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Derived staffing status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// No assignments, or none of them accepted.
    #[default]
    NoResources,
    /// At least one assignment accepted, but not all.
    PartiallyStaffed,
    /// Every assignment accepted.
    FullyStaffed,
}

impl ProjectStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoResources => "no_resources",
            Self::PartiallyStaffed => "partially_staffed",
            Self::FullyStaffed => "fully_staffed",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProjectStatus` if the string is not a
    /// valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "no_resources" => Ok(Self::NoResources),
            "partially_staffed" => Ok(Self::PartiallyStaffed),
            "fully_staffed" => Ok(Self::FullyStaffed),
            _ => Err(DomainError::InvalidProjectStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Aggregates a project's assignment statuses into its staffing status.
///
/// Rules, in priority order:
/// 1. Empty set → `no_resources`
/// 2. All accepted → `fully_staffed`
/// 3. At least one accepted → `partially_staffed`
/// 4. None accepted → `no_resources`
///
/// Aggregation is idempotent: rerunning it over the same data always
/// converges to the same derived status.
#[must_use]
pub fn aggregate(statuses: &[BookingStatus]) -> ProjectStatus {
    if statuses.is_empty() {
        return ProjectStatus::NoResources;
    }

    let accepted = statuses
        .iter()
        .filter(|s| **s == BookingStatus::Accepted)
        .count();

    if accepted == statuses.len() {
        ProjectStatus::FullyStaffed
    } else if accepted > 0 {
        ProjectStatus::PartiallyStaffed
    } else {
        ProjectStatus::NoResources
    }
}

/// Derives the staffing progress percentage for a project.
///
/// This is a view over the same inputs as [`aggregate`], never recomputed
/// with different logic. An empty assignment set is 0% staffed.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn staffing_progress(statuses: &[BookingStatus]) -> u8 {
    if statuses.is_empty() {
        return 0;
    }

    let accepted = statuses
        .iter()
        .filter(|s| **s == BookingStatus::Accepted)
        .count();

    ((accepted * 100) / statuses.len()) as u8
}
