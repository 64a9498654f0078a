// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side queries over the booking tables.

pub mod assignments;
pub mod audit;
pub mod candidates;
pub mod projects;
