//! Core RateLimitedGate implementation
//!
//! The gate admits at most `max_requests` sends per window and forwards
//! each admitted payload to its sender exactly once. The lock's critical
//! section is strictly the read-modify-write of the window record; waiting
//! and the network call both happen with the lock released, so one slow
//! send never serializes the others.

use std::future::Future;

use parking_lot::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::client::SignedDocument;
use crate::error::{CrptError, Result};
use crate::sender::{DocumentSender, SendOutcome};

use super::types::{Admission, RateLimit};
use super::window::FixedWindow;

/// Rate-limited gate in front of a [`DocumentSender`]
///
/// Each gate instance tracks its own window; construct multiple gates for
/// independent limits. The gate is `Sync` and intended to be shared across
/// tasks (for example behind an `Arc`).
#[derive(Debug)]
pub struct RateLimitedGate<S> {
    limit: RateLimit,
    window: Mutex<FixedWindow>,
    sender: S,
}

impl<S: DocumentSender> RateLimitedGate<S> {
    /// Create a gate enforcing `limit` in front of `sender`
    ///
    /// Fails with [`CrptError::Config`] when the limit has a zero request
    /// count or a zero window.
    pub fn new(limit: RateLimit, sender: S) -> Result<Self> {
        limit.validate()?;
        Ok(Self {
            limit,
            window: Mutex::new(FixedWindow::new(Instant::now())),
            sender,
        })
    }

    /// The limit this gate enforces
    pub fn limit(&self) -> RateLimit {
        self.limit
    }

    /// Submit a payload, suspending until the window admits one more send
    ///
    /// Forwards the payload to the sender exactly once and returns the
    /// sender's result. A send failure does not refund the consumed slot
    /// and is not retried here; capacity accounts for attempts, not
    /// successes.
    pub async fn submit(&self, payload: &SignedDocument) -> Result<SendOutcome> {
        self.submit_with_cancel(payload, std::future::pending())
            .await
    }

    /// Submit a payload, racing the wait for admission against `cancel`
    ///
    /// If `cancel` resolves before a slot is acquired the attempt is
    /// abandoned with [`CrptError::Cancelled`]: no send happens and no
    /// capacity is consumed. Once a slot is acquired the send runs to
    /// completion regardless of `cancel`.
    pub async fn submit_with_cancel<F>(
        &self,
        payload: &SignedDocument,
        cancel: F,
    ) -> Result<SendOutcome>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(cancel);

        // Waking only earns the right to re-check: other waiters may have
        // consumed the freed capacity first, so the decision repeats under
        // the lock until a slot is actually granted.
        loop {
            match self.acquire_slot() {
                Admission::Admitted => break,
                Admission::RetryIn(wait) => {
                    debug!(?wait, "window full, suspending");
                    tokio::select! {
                        _ = sleep(wait) => {}
                        _ = &mut cancel => {
                            debug!("submission cancelled before admission");
                            return Err(CrptError::Cancelled);
                        }
                    }
                }
            }
        }

        self.dispatch(payload).await
    }

    /// Submit a payload without waiting
    ///
    /// Fails immediately with [`CrptError::RateLimited`] when the current
    /// window is full, reporting how long until capacity frees up.
    pub async fn try_submit(&self, payload: &SignedDocument) -> Result<SendOutcome> {
        match self.acquire_slot() {
            Admission::Admitted => self.dispatch(payload).await,
            Admission::RetryIn(retry_after) => Err(CrptError::RateLimited { retry_after }),
        }
    }

    /// One locked accounting decision, O(1), no awaits
    fn acquire_slot(&self) -> Admission {
        let mut window = self.window.lock();
        window.try_admit(&self.limit, Instant::now())
    }

    /// Perform the send, outside the lock
    async fn dispatch(&self, payload: &SignedDocument) -> Result<SendOutcome> {
        match self.sender.send(payload).await {
            Ok(outcome) => {
                info!(status = outcome.status, "document submitted");
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, "document submission failed");
                Err(e)
            }
        }
    }

    #[cfg(test)]
    pub(super) fn window_count(&self) -> u32 {
        self.window.lock().count()
    }
}
