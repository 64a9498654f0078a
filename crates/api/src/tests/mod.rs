// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod sweep_tests;

use std::sync::Mutex;

use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use slotbook::{BookingEvent, BookingEventKind, Notifier};
use slotbook_audit::Cause;
use slotbook_domain::{AssignmentId, CandidateId, ProjectId, Seniority};
use slotbook_persistence::Persistence;

use crate::clock::Clock;
use crate::request_response::{AddAssignmentRequest, CreateProjectRequest, OpenForMatchingRequest};
use crate::service;

pub const T0: OffsetDateTime = datetime!(2026-02-10 09:00 UTC);

/// A clock pinned to a settable instant.
pub struct FixedClock {
    now: Mutex<OffsetDateTime>,
}

impl FixedClock {
    pub const fn at(now: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        *self.now.lock().unwrap()
    }
}

/// A notifier that records every delivered event.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<BookingEvent>>,
}

impl RecordingNotifier {
    pub fn kinds(&self) -> Vec<BookingEventKind> {
        self.events.lock().unwrap().iter().map(|e| e.kind).collect()
    }

    pub fn count_of(&self, kind: BookingEventKind) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.kind == kind)
            .count()
    }

    pub fn event_ids(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_id.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: &BookingEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test operation"))
}

pub fn test_candidate(display_name: &str) -> slotbook_domain::Candidate {
    slotbook_domain::Candidate {
        candidate_id: CandidateId::new(0),
        display_name: display_name.to_string(),
        available: true,
        seniority: Seniority::Senior,
        languages: vec![String::from("french")],
        expertises: vec![String::from("rust")],
        day_rate_cents: Some(65_000),
    }
}

/// Seeds a project with `slots` draft assignments and one candidate.
pub fn seed(
    persistence: &mut Persistence,
    clock: &FixedClock,
    slots: usize,
) -> (ProjectId, Vec<AssignmentId>, CandidateId) {
    let project = service::create_project(
        persistence,
        &CreateProjectRequest {
            client_ref: String::from("client-7"),
            name: String::from("Atlas replatform"),
        },
        clock,
    )
    .unwrap();
    let project_id = ProjectId::new(project.project_id);

    let mut assignment_ids: Vec<AssignmentId> = Vec::with_capacity(slots);
    for _ in 0..slots {
        let added = service::add_assignment(
            persistence,
            AddAssignmentRequest {
                project_id: project.project_id,
                role: String::from("backend developer"),
                seniority: String::from("senior"),
                languages: vec![String::from("french")],
                expertises: vec![String::from("rust")],
            },
            clock,
        )
        .unwrap();
        assignment_ids.push(AssignmentId::new(added.assignment_id));
    }

    let candidate_id: CandidateId = persistence
        .create_candidate(&test_candidate("Avery Quinn"))
        .unwrap();
    (project_id, assignment_ids, candidate_id)
}

/// Opens an assignment for matching with the default window.
pub fn open(
    persistence: &mut Persistence,
    notifier: &RecordingNotifier,
    assignment_id: AssignmentId,
    clock: &FixedClock,
) {
    service::open_for_matching(
        persistence,
        notifier,
        assignment_id,
        &OpenForMatchingRequest { window_hours: None },
        test_cause(),
        clock,
    )
    .unwrap();
}
