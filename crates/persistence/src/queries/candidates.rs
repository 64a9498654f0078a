// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Candidate lookups.
//!
//! Candidates are reference data mirrored from the directory service; the
//! booking engine only ever reads them.

use diesel::prelude::*;
use diesel::SqliteConnection;

use slotbook_domain::{Candidate, CandidateId};

use crate::data_models::CandidateRow;
use crate::diesel_schema::candidates;
use crate::error::PersistenceError;

/// Loads a candidate by ID.
///
/// # Errors
///
/// Returns `CandidateNotFound` if no row exists, or `CorruptRow` if the
/// stored row fails domain parsing.
pub fn get_candidate(
    conn: &mut SqliteConnection,
    candidate_id: CandidateId,
) -> Result<Candidate, PersistenceError> {
    let row: CandidateRow = candidates::table
        .filter(candidates::candidate_id.eq(candidate_id.value()))
        .first::<CandidateRow>(conn)
        .optional()?
        .ok_or(PersistenceError::CandidateNotFound(candidate_id.value()))?;

    row.into_domain()
}
