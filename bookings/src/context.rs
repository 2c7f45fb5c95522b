//! Per-request deadline and cancellation.
//!
//! Every store call takes a [`RequestContext`]. The store checks it before
//! starting work and installs it as a progress handler on the connection, so
//! a long-running statement is interrupted once the deadline passes or the
//! request is cancelled. An interrupted transaction is rolled back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Deadline applied when the configuration does not set one.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// A shareable flag that marks a request as cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel every context holding a clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check whether [`CancellationToken::cancel`] has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Deadline and cancellation state of one logical request.
///
/// # Examples
///
/// ```
/// use bookings::RequestContext;
/// use std::time::Duration;
///
/// let ctx = RequestContext::with_timeout(Duration::from_millis(500));
/// assert!(ctx.check().is_ok());
///
/// ctx.token().cancel();
/// assert!(ctx.check().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    deadline: Instant,
    timeout: Duration,
    token: CancellationToken,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }
}

impl RequestContext {
    /// Create a context that expires `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now() + timeout,
            timeout,
            token: CancellationToken::new(),
        }
    }

    /// Attach an existing cancellation token.
    #[must_use]
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// The cancellation token of this context.
    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// The timeout this context was created with.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Time left before the deadline, zero once expired.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Check whether the deadline has passed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Check whether the request should stop.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.token.is_cancelled() || self.is_expired()
    }

    /// Fail if the request was cancelled or its deadline passed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] or [`Error::Timeout`].
    pub fn check(&self) -> Result<()> {
        if self.token.is_cancelled() {
            return Err(Error::Cancelled);
        }
        if self.is_expired() {
            return Err(self.timeout_error());
        }
        Ok(())
    }

    /// The error reported when this context stops a request.
    #[must_use]
    pub fn interruption_error(&self) -> Error {
        if self.token.is_cancelled() {
            Error::Cancelled
        } else {
            self.timeout_error()
        }
    }

    fn timeout_error(&self) -> Error {
        Error::Timeout {
            millis: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_context_is_live() {
        let ctx = RequestContext::default();
        assert!(!ctx.is_done());
        assert!(ctx.check().is_ok());
        assert!(ctx.remaining() > Duration::from_secs(2));
    }

    #[test]
    fn test_zero_timeout_expires_immediately() {
        let ctx = RequestContext::with_timeout(Duration::ZERO);
        assert!(ctx.is_expired());
        assert!(matches!(ctx.check(), Err(Error::Timeout { millis: 0 })));
        assert_eq!(ctx.remaining(), Duration::ZERO);
    }

    #[test]
    fn test_cancel_propagates_to_clones() {
        let token = CancellationToken::new();
        let ctx = RequestContext::default().with_token(token.clone());
        let clone = ctx.clone();
        token.cancel();
        assert!(matches!(ctx.check(), Err(Error::Cancelled)));
        assert!(matches!(clone.interruption_error(), Error::Cancelled));
    }
}
