// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slotbook_domain::CandidateId;
use time::OffsetDateTime;

/// A command represents caller or system intent as data only.
///
/// Commands are the only way to request a booking transition. Every command
/// carries its effective timestamp so the engine stays pure; the clock is
/// injected at the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a `draft` slot for matching.
    OpenForMatching {
        /// The search-window expiry instant.
        expires_at: OffsetDateTime,
        /// The effective timestamp of the command.
        at: OffsetDateTime,
    },
    /// Place a candidate into a `searching` slot as the party entitled to
    /// accept or decline it. Administrative; used by the matching layer.
    Offer {
        /// The candidate being offered the slot.
        candidate_id: CandidateId,
        /// The refreshed search-window expiry instant.
        expires_at: OffsetDateTime,
        /// The effective timestamp of the command.
        at: OffsetDateTime,
    },
    /// Accept a `searching` slot, binding the candidate.
    Accept {
        /// The accepting candidate.
        candidate_id: CandidateId,
        /// The computed price in cents, when a rate is known.
        price_cents: Option<i64>,
        /// The effective timestamp of the command.
        at: OffsetDateTime,
    },
    /// Decline a `searching` slot. The slot returns to `searching` with a
    /// renewed window; the decline is recorded in the append-only log.
    Decline {
        /// The declining candidate. Must hold the current offer.
        candidate_id: CandidateId,
        /// The optional reason given by the candidate.
        reason: Option<String>,
        /// The renewed search-window expiry instant.
        renewed_expires_at: OffsetDateTime,
        /// The effective timestamp of the command.
        at: OffsetDateTime,
    },
    /// Expire a `searching` slot whose window has elapsed.
    Expire {
        /// The effective timestamp of the command. Must be at or past the
        /// slot's expiry instant.
        at: OffsetDateTime,
    },
    /// Re-open an `expired` slot for matching with a fresh window.
    Reopen {
        /// The new search-window expiry instant.
        expires_at: OffsetDateTime,
        /// The effective timestamp of the command.
        at: OffsetDateTime,
    },
}
