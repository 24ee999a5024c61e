//! Tokio-backed `AutoCloseScheduler`.
//!
//! Arming spawns a task that sleeps for the poll duration and then sends the
//! poll generation to the expiry worker. The scheduler keeps only the
//! `AbortHandle` of the pending task, so there is never more than one timer.

use tokio::{sync::mpsc, task::AbortHandle};

use crate::domain::{AutoCloseScheduler, PollDuration, PollGeneration};

/// Receiving end of the expiry channel, consumed by the expiry worker.
pub type ExpiryReceiver = mpsc::UnboundedReceiver<PollGeneration>;

pub struct TokioAutoCloseScheduler {
    expiry_tx: mpsc::UnboundedSender<PollGeneration>,
    pending: Option<AbortHandle>,
}

impl TokioAutoCloseScheduler {
    /// Create a scheduler and the receiver its expirations arrive on.
    pub fn new() -> (Self, ExpiryReceiver) {
        let (expiry_tx, expiry_rx) = mpsc::unbounded_channel();
        (
            Self {
                expiry_tx,
                pending: None,
            },
            expiry_rx,
        )
    }

    pub fn is_armed(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl AutoCloseScheduler for TokioAutoCloseScheduler {
    fn arm(&mut self, generation: PollGeneration, duration: PollDuration) {
        self.cancel();

        let expiry_tx = self.expiry_tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(duration.as_duration()).await;
            if expiry_tx.send(generation).is_err() {
                tracing::warn!("Expiry worker is gone, poll {} cannot auto-close", generation);
            }
        });
        self.pending = Some(handle.abort_handle());
        tracing::debug!(
            "Auto-close for poll {} armed ({}s)",
            generation,
            duration.as_secs()
        );
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
            tracing::debug!("Auto-close timer cancelled");
        }
    }
}

impl Drop for TokioAutoCloseScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
