//! Auto-close scheduler abstraction.
//!
//! The session owns exactly one scheduler and drives it explicitly: every
//! poll creation arms it and every close cancels it. Implementations live in
//! the infrastructure layer.

use super::value_object::{PollDuration, PollGeneration};

/// Single-slot cancellable deferred close.
///
/// When the timer elapses the implementation must hand `generation` back to
/// the session (see `PollSession::expire`); it must never close the poll on
/// its own.
#[cfg_attr(test, mockall::automock)]
pub trait AutoCloseScheduler: Send {
    /// Arm the timer, replacing any timer that is still pending.
    fn arm(&mut self, generation: PollGeneration, duration: PollDuration);

    /// Cancel the pending timer, if any.
    fn cancel(&mut self);
}
