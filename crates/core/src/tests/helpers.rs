// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slotbook_audit::{Actor, Cause};
use slotbook_domain::{
    Assignment, AssignmentId, BookingStatus, CandidateId, ProjectId, RequirementProfile, Seniority,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const T0: OffsetDateTime = datetime!(2026-01-05 09:00 UTC);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("cand-1"), String::from("candidate"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Candidate request"))
}

pub fn create_test_requirement() -> RequirementProfile {
    RequirementProfile::new(
        String::from("backend developer"),
        Seniority::Senior,
        vec![String::from("french")],
        vec![String::from("rust")],
    )
}

/// An assignment in `draft`, requirements complete.
pub fn draft_assignment() -> Assignment {
    Assignment::new(
        AssignmentId::new(10),
        ProjectId::new(3),
        create_test_requirement(),
        T0,
    )
}

/// An assignment in `searching` with a pending offer to the given
/// candidate and an expiry one hour after `T0`.
pub fn searching_assignment(offered: i64) -> Assignment {
    let mut assignment = draft_assignment();
    assignment.status = BookingStatus::Searching;
    assignment.offered_candidate_id = Some(CandidateId::new(offered));
    assignment.expires_at = Some(T0 + time::Duration::hours(1));
    assignment
}

/// An assignment in `accepted`, bound to the given candidate.
pub fn accepted_assignment(candidate: i64) -> Assignment {
    let mut assignment = draft_assignment();
    assignment.status = BookingStatus::Accepted;
    assignment.candidate_id = Some(CandidateId::new(candidate));
    assignment
}
