// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The expiry sweeper.
//!
//! A sweep scans for `searching` slots whose window has elapsed, expires
//! each one through the same status-guarded transition path as every other
//! mutation, then immediately re-opens it with a fresh window. Touched
//! projects are re-aggregated once each after the pass, not once per slot.
//! Sweeps are safe to run concurrently with candidate traffic and with
//! each other: a slot that was accepted or declined between the scan and
//! the flip simply loses the race and is skipped.

use std::collections::BTreeSet;

use time::OffsetDateTime;
use tracing::{debug, info};

use slotbook::{Command, Notifier, TransitionResult, apply};
use slotbook_audit::{Actor, Cause};
use slotbook_domain::{
    Assignment, BookingStatus, DEFAULT_SEARCH_WINDOW, ProjectId, expiry_instant,
};
use slotbook_persistence::{Persistence, TransitionOutcome};

use crate::clock::Clock;
use crate::error::{ApiError, translate_booking_error, translate_persistence_error};
use crate::service;

/// The outcome of one sweep pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepReport {
    /// Slots whose window had elapsed at scan time.
    pub scanned: usize,
    /// Slots successfully expired.
    pub expired: usize,
    /// Expired slots successfully re-opened for matching.
    pub reopened: usize,
    /// Slots skipped because a concurrent transition resolved them first.
    pub skipped: usize,
    /// Slot flips or project re-aggregations that failed with an error.
    pub failed: usize,
}

/// Runs one expiry sweep.
///
/// Every overdue slot is expired and re-opened independently; a failure on
/// one slot is logged and counted without stopping the pass. Each distinct
/// project touched by the pass is re-aggregated exactly once, after all
/// its slots have been flipped.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `notifier` - The event delivery boundary
/// * `sweep_id` - A unique identifier for this pass, recorded as the audit
///   cause
/// * `clock` - The time source
///
/// # Errors
///
/// Returns an error only when the initial scan itself fails; per-slot
/// failures are reported in the `failed` counter.
pub fn run_expiry_sweep(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    sweep_id: &str,
    clock: &dyn Clock,
) -> Result<SweepReport, ApiError> {
    let now: OffsetDateTime = clock.now();
    let overdue: Vec<Assignment> = persistence
        .list_expired_searching(now)
        .map_err(translate_persistence_error)?;

    let mut report = SweepReport {
        scanned: overdue.len(),
        ..SweepReport::default()
    };
    let mut touched: BTreeSet<ProjectId> = BTreeSet::new();

    for assignment in overdue {
        match sweep_one(persistence, notifier, &assignment, sweep_id, now) {
            Ok(SlotOutcome::Expired { reopened }) => {
                report.expired += 1;
                if reopened {
                    report.reopened += 1;
                }
                touched.insert(assignment.project_id);
            }
            Ok(SlotOutcome::Skipped) => report.skipped += 1,
            Err(err) => {
                report.failed += 1;
                service::log_and_continue("expiry sweep", &err);
            }
        }
    }

    // A sweep only moves slots between non-accepted statuses, so it can
    // never carry a project into fully_staffed; plain re-aggregation
    // keeps the cached status current.
    for project_id in touched {
        if let Err(err) = service::reaggregate(persistence, project_id, now) {
            report.failed += 1;
            service::log_and_continue("sweep re-aggregation", &err);
        }
    }

    info!(
        sweep_id,
        scanned = report.scanned,
        expired = report.expired,
        reopened = report.reopened,
        skipped = report.skipped,
        failed = report.failed,
        "expiry sweep complete"
    );
    Ok(report)
}

enum SlotOutcome {
    Expired { reopened: bool },
    Skipped,
}

fn sweep_cause(sweep_id: &str) -> Cause {
    Cause::new(
        sweep_id.to_string(),
        String::from("Search window elapsed without acceptance"),
    )
}

fn sweep_one(
    persistence: &mut Persistence,
    notifier: &dyn Notifier,
    assignment: &Assignment,
    sweep_id: &str,
    now: OffsetDateTime,
) -> Result<SlotOutcome, ApiError> {
    let expired: TransitionResult = apply(
        assignment,
        Command::Expire { at: now },
        Actor::sweeper(),
        sweep_cause(sweep_id),
    )
    .map_err(translate_booking_error)?;

    if expired.is_noop() {
        return Ok(SlotOutcome::Skipped);
    }

    match persistence
        .persist_transition(assignment.status, &expired, None)
        .map_err(translate_persistence_error)?
    {
        TransitionOutcome::Applied { .. } => {}
        TransitionOutcome::Noop | TransitionOutcome::LostRace => {
            debug!(
                assignment_id = assignment.assignment_id.value(),
                "slot resolved before the sweep reached it"
            );
            return Ok(SlotOutcome::Skipped);
        }
    }
    service::deliver_transition_event(notifier, &expired, None, now);

    // Auto-reopen keeps the slot visible to matching instead of parking it
    // in a terminal state. A second sweeper racing here is harmless.
    let reopened: bool = reopen_expired(persistence, &expired, sweep_id, now)?;
    Ok(SlotOutcome::Expired { reopened })
}

fn reopen_expired(
    persistence: &mut Persistence,
    expired: &TransitionResult,
    sweep_id: &str,
    now: OffsetDateTime,
) -> Result<bool, ApiError> {
    let expires_at: OffsetDateTime =
        expiry_instant(now, DEFAULT_SEARCH_WINDOW).map_err(crate::error::translate_domain_error)?;
    let result: TransitionResult = apply(
        &expired.new_assignment,
        Command::Reopen { expires_at, at: now },
        Actor::sweeper(),
        sweep_cause(sweep_id),
    )
    .map_err(translate_booking_error)?;

    if result.is_noop() {
        return Ok(false);
    }

    match persistence
        .persist_transition(BookingStatus::Expired, &result, None)
        .map_err(translate_persistence_error)?
    {
        TransitionOutcome::Applied { .. } => Ok(true),
        TransitionOutcome::Noop | TransitionOutcome::LostRace => Ok(false),
    }
}
