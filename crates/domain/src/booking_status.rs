// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking status tracking and transition logic.
//!
//! This module defines the five-value booking status enum governing an
//! assignment's lifecycle and the closed set of legal transitions between
//! statuses. All status changes must be validated here; no code path
//! outside the transition engine may write the status field directly.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Booking status states for an assignment.
///
/// Exactly one status applies to an assignment at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Requirements are being defined; the slot is not yet open for matching.
    Draft,
    /// The slot is open for matching, possibly with a pending offer.
    Searching,
    /// A candidate accepted the offer and is bound to the slot.
    Accepted,
    /// The offered candidate refused; the slot returns to matching.
    Declined,
    /// The search window elapsed without an acceptance.
    Expired,
}

impl BookingStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Searching => "searching",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Expired => "expired",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBookingStatus` if the string is not a
    /// valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "draft" => Ok(Self::Draft),
            "searching" => Ok(Self::Searching),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            "expired" => Ok(Self::Expired),
            _ => Err(DomainError::InvalidBookingStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal.
    ///
    /// Only `accepted` is terminal: a bound slot can only be reopened by the
    /// out-of-scope replace-resource flow. `declined` and `expired` both
    /// have a legal edge back to `searching`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Validates that a transition from this status to another is a legal
    /// edge.
    ///
    /// Legal edges:
    /// - draft → searching (open for matching)
    /// - searching → accepted (candidate accepts)
    /// - searching → declined (offered candidate refuses)
    /// - searching → expired (search window elapsed)
    /// - declined → searching (automatic re-open for matching)
    /// - expired → searching (re-open, automatic or administrative)
    ///
    /// A request targeting the current status is not a transition; callers
    /// treat it as an idempotent no-op before consulting this function.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` for any (from, to)
    /// pair outside the legal edge set.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        let valid = matches!(
            (self, new_status),
            (Self::Draft, Self::Searching)
                | (
                    Self::Searching,
                    Self::Accepted | Self::Declined | Self::Expired
                )
                | (Self::Declined | Self::Expired, Self::Searching)
        );

        if valid {
            Ok(())
        } else {
            let reason = if self.is_terminal() {
                "cannot transition from a terminal state"
            } else {
                "transition not permitted by booking lifecycle rules"
            };
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: reason.to_string(),
            })
        }
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
