// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the expiry sweeper.

use time::Duration;

use slotbook::BookingEventKind;
use slotbook_domain::DEFAULT_SEARCH_WINDOW;
use slotbook_persistence::Persistence;

use crate::request_response::{AcceptRequest, OfferRequest};
use crate::service;
use crate::sweeper::run_expiry_sweep;
use crate::tests::{FixedClock, RecordingNotifier, T0, open, seed, test_cause};

#[test]
fn test_sweep_expires_overdue_slot_and_reopens_it() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let notifier = RecordingNotifier::default();
    let clock = FixedClock::at(T0);
    let (_, assignments, _) = seed(&mut persistence, &clock, 1);
    let assignment_id = assignments[0];

    open(&mut persistence, &notifier, assignment_id, &clock);
    clock.advance(DEFAULT_SEARCH_WINDOW + Duration::minutes(1));

    let report = run_expiry_sweep(&mut persistence, &notifier, "sweep-1", &clock).unwrap();
    assert_eq!(report.scanned, 1);
    assert_eq!(report.expired, 1);
    assert_eq!(report.reopened, 1);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.failed, 0);

    // The slot is immediately back in matching with a fresh window.
    let assignment = service::get_assignment(&mut persistence, assignment_id).unwrap();
    assert_eq!(assignment.status, "searching");
    assert_eq!(
        assignment.expires_at,
        Some(T0 + DEFAULT_SEARCH_WINDOW + Duration::minutes(1) + DEFAULT_SEARCH_WINDOW)
    );
    assert_eq!(notifier.kinds(), vec![BookingEventKind::AssignmentExpired]);

    let history = service::get_status_history(&mut persistence, assignment_id).unwrap();
    let edges: Vec<(&str, &str)> = history
        .iter()
        .map(|e| (e.previous_status.as_str(), e.new_status.as_str()))
        .collect();
    assert_eq!(
        edges,
        vec![
            ("draft", "searching"),
            ("searching", "expired"),
            ("expired", "searching"),
        ]
    );
}

#[test]
fn test_sweep_clears_pending_offer_on_expiry() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let notifier = RecordingNotifier::default();
    let clock = FixedClock::at(T0);
    let (_, assignments, candidate_id) = seed(&mut persistence, &clock, 1);
    let assignment_id = assignments[0];

    open(&mut persistence, &notifier, assignment_id, &clock);
    service::offer_assignment(
        &mut persistence,
        &notifier,
        assignment_id,
        &OfferRequest {
            candidate_id: candidate_id.value(),
            window_hours: Some(8),
        },
        test_cause(),
        &clock,
    )
    .unwrap();
    clock.advance(Duration::hours(9));

    let report = run_expiry_sweep(&mut persistence, &notifier, "sweep-1", &clock).unwrap();
    assert_eq!(report.expired, 1);

    let assignment = service::get_assignment(&mut persistence, assignment_id).unwrap();
    assert_eq!(assignment.offered_candidate_id, None);
    assert_eq!(assignment.candidate_id, None);
}

#[test]
fn test_sweep_leaves_live_windows_alone() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let notifier = RecordingNotifier::default();
    let clock = FixedClock::at(T0);
    let (_, assignments, _) = seed(&mut persistence, &clock, 1);

    open(&mut persistence, &notifier, assignments[0], &clock);
    clock.advance(Duration::hours(1));

    let report = run_expiry_sweep(&mut persistence, &notifier, "sweep-1", &clock).unwrap();
    assert_eq!(report.scanned, 0);
    assert_eq!(report.expired, 0);
    assert!(notifier.kinds().is_empty());
}

#[test]
fn test_sweep_ignores_accepted_slots() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let notifier = RecordingNotifier::default();
    let clock = FixedClock::at(T0);
    let (_, assignments, candidate_id) = seed(&mut persistence, &clock, 1);
    let assignment_id = assignments[0];

    open(&mut persistence, &notifier, assignment_id, &clock);
    service::offer_assignment(
        &mut persistence,
        &notifier,
        assignment_id,
        &OfferRequest {
            candidate_id: candidate_id.value(),
            window_hours: None,
        },
        test_cause(),
        &clock,
    )
    .unwrap();
    service::accept_assignment(
        &mut persistence,
        &notifier,
        assignment_id,
        &AcceptRequest {
            candidate_id: candidate_id.value(),
        },
        test_cause(),
        &clock,
    )
    .unwrap();
    clock.advance(DEFAULT_SEARCH_WINDOW * 2);

    let report = run_expiry_sweep(&mut persistence, &notifier, "sweep-1", &clock).unwrap();
    assert_eq!(report.scanned, 0);

    let assignment = service::get_assignment(&mut persistence, assignment_id).unwrap();
    assert_eq!(assignment.status, "accepted");
    assert_eq!(notifier.count_of(BookingEventKind::AssignmentExpired), 0);
}

#[test]
fn test_repeated_sweep_emits_single_expired_event() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let notifier = RecordingNotifier::default();
    let clock = FixedClock::at(T0);
    let (_, assignments, _) = seed(&mut persistence, &clock, 1);

    open(&mut persistence, &notifier, assignments[0], &clock);
    clock.advance(DEFAULT_SEARCH_WINDOW + Duration::minutes(1));

    run_expiry_sweep(&mut persistence, &notifier, "sweep-1", &clock).unwrap();
    // The reopened window has not elapsed, so the second pass finds
    // nothing.
    let second = run_expiry_sweep(&mut persistence, &notifier, "sweep-2", &clock).unwrap();

    assert_eq!(second.scanned, 0);
    assert_eq!(notifier.count_of(BookingEventKind::AssignmentExpired), 1);
}

#[test]
fn test_sweep_handles_multiple_overdue_slots() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let notifier = RecordingNotifier::default();
    let clock = FixedClock::at(T0);
    let (project_id, assignments, _) = seed(&mut persistence, &clock, 3);

    open(&mut persistence, &notifier, assignments[0], &clock);
    open(&mut persistence, &notifier, assignments[1], &clock);
    // The third slot stays in draft and is never scanned.
    clock.advance(DEFAULT_SEARCH_WINDOW + Duration::minutes(1));

    let report = run_expiry_sweep(&mut persistence, &notifier, "sweep-1", &clock).unwrap();
    assert_eq!(report.scanned, 2);
    assert_eq!(report.expired, 2);
    assert_eq!(report.reopened, 2);
    assert_eq!(notifier.count_of(BookingEventKind::AssignmentExpired), 2);

    let detail = service::get_project_detail(&mut persistence, project_id).unwrap();
    assert_eq!(detail.project.staffing_status, "no_resources");
}

#[test]
fn test_sweep_keeps_partial_staffing_current() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let notifier = RecordingNotifier::default();
    let clock = FixedClock::at(T0);
    let (project_id, assignments, candidate_id) = seed(&mut persistence, &clock, 2);

    open(&mut persistence, &notifier, assignments[0], &clock);
    service::offer_assignment(
        &mut persistence,
        &notifier,
        assignments[0],
        &OfferRequest {
            candidate_id: candidate_id.value(),
            window_hours: None,
        },
        test_cause(),
        &clock,
    )
    .unwrap();
    service::accept_assignment(
        &mut persistence,
        &notifier,
        assignments[0],
        &AcceptRequest {
            candidate_id: candidate_id.value(),
        },
        test_cause(),
        &clock,
    )
    .unwrap();
    open(&mut persistence, &notifier, assignments[1], &clock);
    clock.advance(DEFAULT_SEARCH_WINDOW + Duration::minutes(1));

    let report = run_expiry_sweep(&mut persistence, &notifier, "sweep-1", &clock).unwrap();
    assert_eq!(report.scanned, 1);
    assert_eq!(report.expired, 1);
    assert_eq!(report.failed, 0);

    // The end-of-pass re-aggregation sees the accepted slot and the
    // reopened one; staffing stays partial and no staffed event fires.
    let detail = service::get_project_detail(&mut persistence, project_id).unwrap();
    assert_eq!(detail.project.staffing_status, "partially_staffed");
    assert_eq!(notifier.count_of(BookingEventKind::AssignmentExpired), 1);
    assert_eq!(notifier.count_of(BookingEventKind::ProjectFullyStaffed), 0);
}

#[test]
fn test_sweep_event_ids_are_unique() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let notifier = RecordingNotifier::default();
    let clock = FixedClock::at(T0);
    let (_, assignments, _) = seed(&mut persistence, &clock, 2);

    open(&mut persistence, &notifier, assignments[0], &clock);
    open(&mut persistence, &notifier, assignments[1], &clock);
    clock.advance(DEFAULT_SEARCH_WINDOW + Duration::minutes(1));

    run_expiry_sweep(&mut persistence, &notifier, "sweep-1", &clock).unwrap();

    let ids = notifier.event_ids();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}
