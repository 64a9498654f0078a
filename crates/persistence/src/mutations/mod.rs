// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side mutations over the booking tables.

mod bookkeeping;
mod transition;

pub use bookkeeping::{
    delete_assignment, insert_assignment, insert_candidate, insert_project, set_project_staffing,
    set_project_started,
};
pub use transition::{TransitionOutcome, persist_transition};
