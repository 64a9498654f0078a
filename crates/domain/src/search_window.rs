// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Search-window arithmetic.
//!
//! A `searching` assignment carries an expiry instant; once it passes, the
//! expiry sweeper transitions the slot to `expired`. Windows are plain UTC
//! instants, renewed whenever a slot re-enters matching (decline self-loop,
//! automatic reopen after expiry, administrative reopen).

use crate::error::DomainError;
use time::{Duration, OffsetDateTime};

/// The default search window applied when a slot enters matching and no
/// explicit window is supplied.
pub const DEFAULT_SEARCH_WINDOW: Duration = Duration::hours(72);

/// Computes the expiry instant for a window opening at `now`.
///
/// # Errors
///
/// Returns `DomainError::InvalidSearchWindow` if the window is zero or
/// negative.
pub fn expiry_instant(
    now: OffsetDateTime,
    window: Duration,
) -> Result<OffsetDateTime, DomainError> {
    if window <= Duration::ZERO {
        return Err(DomainError::InvalidSearchWindow {
            reason: format!("window must be positive, got {window}"),
        });
    }
    Ok(now + window)
}

/// Returns true if a search window with the given expiry instant has
/// elapsed at `now`.
///
/// An assignment with no expiry instant never elapses.
#[must_use]
pub fn has_elapsed(expires_at: Option<OffsetDateTime>, now: OffsetDateTime) -> bool {
    expires_at.is_some_and(|at| now >= at)
}
