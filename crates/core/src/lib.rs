// Copyright (C) 2026 Slotbook Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod event;
mod transition;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use command::Command;
pub use error::BookingError;
pub use event::{BookingEvent, BookingEventKind, Notifier, NullNotifier};
pub use transition::{StatusEdge, TransitionResult};
