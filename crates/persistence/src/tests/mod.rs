// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod decline_tests;
mod transition_tests;

use time::OffsetDateTime;
use time::macros::datetime;

use slotbook::{Command, TransitionResult, apply};
use slotbook_audit::{Actor, Cause};
use slotbook_domain::{
    Assignment, AssignmentId, Candidate, CandidateId, ProjectId, RequirementProfile, Seniority,
};

use crate::{Persistence, TransitionOutcome};

pub const T0: OffsetDateTime = datetime!(2026-01-05 09:00 UTC);

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("candidate-42"), String::from("candidate"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test operation"))
}

pub fn create_test_requirement() -> RequirementProfile {
    RequirementProfile::new(
        String::from("backend developer"),
        Seniority::Senior,
        vec![String::from("french")],
        vec![String::from("rust")],
    )
}

pub fn create_test_candidate() -> Candidate {
    Candidate {
        candidate_id: CandidateId::new(0),
        display_name: String::from("Avery Quinn"),
        available: true,
        seniority: Seniority::Senior,
        languages: vec![String::from("french")],
        expertises: vec![String::from("rust")],
        day_rate_cents: Some(65_000),
    }
}

/// Seeds a project with one draft assignment and one candidate.
pub fn seed(persistence: &mut Persistence) -> (ProjectId, AssignmentId, CandidateId) {
    let project_id: ProjectId = persistence
        .create_project("client-7", "Atlas replatform", T0)
        .unwrap();
    let assignment_id: AssignmentId = persistence
        .create_assignment(project_id, &create_test_requirement(), T0)
        .unwrap();
    let candidate_id: CandidateId = persistence.create_candidate(&create_test_candidate()).unwrap();
    (project_id, assignment_id, candidate_id)
}

/// Applies a command to the stored assignment and persists the result.
///
/// Panics if the write loses the race; tests that exercise races call
/// `persist_transition` directly.
pub fn apply_and_persist(
    persistence: &mut Persistence,
    assignment_id: AssignmentId,
    command: Command,
) -> TransitionResult {
    let assignment: Assignment = persistence.get_assignment(assignment_id).unwrap();
    let result: TransitionResult = apply(
        &assignment,
        command.clone(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    let decline = match &command {
        Command::Decline {
            candidate_id,
            reason,
            at,
            ..
        } => Some(slotbook_domain::DeclineRecord {
            assignment_id,
            candidate_id: *candidate_id,
            reason: reason.clone(),
            declined_at: *at,
        }),
        _ => None,
    };

    let outcome: TransitionOutcome = persistence
        .persist_transition(assignment.status, &result, decline.as_ref())
        .unwrap();
    assert!(!matches!(outcome, TransitionOutcome::LostRace));
    result
}
