#![forbid(unsafe_code)]

//! Cancellation tokens and the latest-wins request slot.
//!
//! [`CancellationToken`] is a thread-safe, cloneable signal a request
//! handler polls to detect that its work has been superseded.
//! [`RequestSlot`] layers
//! the supersession rule on top: each new request begins a fresh
//! generation, cancelling the previous one's token, and only the response
//! carrying the current generation may be applied. Superseding a request
//! is a normal occurrence here, not an exceptional one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use web_time::{Duration, Instant};

#[derive(Debug)]
struct Shared {
    cancelled: AtomicBool,
    notify: (Mutex<()>, Condvar),
}

/// Cloneable observer side of a cancellation signal.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    shared: Arc<Shared>,
}

/// Control side that triggers cancellation.
///
/// Dropping the source does not cancel outstanding tokens; cancellation is
/// always an explicit [`cancel`](Self::cancel) call. This keeps scope exit
/// from silently aborting an in-flight request the caller still wants.
#[derive(Debug)]
pub struct CancellationSource {
    shared: Arc<Shared>,
}

impl CancellationSource {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                cancelled: AtomicBool::new(false),
                notify: (Mutex::new(()), Condvar::new()),
            }),
        }
    }

    /// A token observing this source.
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Signal cancellation and wake any blocked waiters.
    pub fn cancel(&self) {
        self.shared.cancelled.store(true, Ordering::Release);
        let (lock, cvar) = &self.shared.notify;
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        cvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancellationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CancellationToken {
    /// A token that can never be cancelled, for call sites without a
    /// supersession context.
    pub fn never() -> Self {
        CancellationSource::new().token()
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::Acquire)
    }

    /// Block until cancelled or the timeout elapses.
    ///
    /// Returns `true` if cancelled, `false` on timeout.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        if self.is_cancelled() {
            return true;
        }
        let (lock, cvar) = &self.shared.notify;
        let mut guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let start = Instant::now();
        loop {
            if self.is_cancelled() {
                return true;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            let (next, result) = cvar
                .wait_timeout(guard, duration - elapsed)
                .unwrap_or_else(|e| e.into_inner());
            guard = next;
            if self.is_cancelled() {
                return true;
            }
            if result.timed_out() {
                return false;
            }
        }
    }
}

/// Latest-wins register for in-flight requests.
///
/// Each component instance owns one slot. [`begin`](Self::begin) cancels
/// whatever was in flight and hands out a fresh generation plus its token;
/// [`is_current`](Self::is_current) gates response application so at most
/// one live generation's result ever lands.
#[derive(Debug, Default)]
pub struct RequestSlot {
    current: u64,
    in_flight: Option<CancellationSource>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding any previous one.
    pub fn begin(&mut self) -> (u64, CancellationToken) {
        if let Some(prev) = self.in_flight.take() {
            tracing::debug!(generation = self.current, "superseding in-flight request");
            prev.cancel();
        }
        self.current += 1;
        let source = CancellationSource::new();
        let token = source.token();
        self.in_flight = Some(source);
        (self.current, token)
    }

    /// Whether a response for `generation` is still the live one.
    pub fn is_current(&self, generation: u64) -> bool {
        self.in_flight.is_some() && generation == self.current
    }

    /// Mark the current generation complete. Returns `false` for stale
    /// generations, which callers discard silently.
    pub fn finish(&mut self, generation: u64) -> bool {
        if self.is_current(generation) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Cancel whatever is in flight. Used on teardown.
    pub fn cancel_in_flight(&mut self) {
        if let Some(source) = self.in_flight.take() {
            source.cancel();
        }
    }

    pub fn has_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The most recently issued generation number.
    pub fn generation(&self) -> u64 {
        self.current
    }
}

impl Drop for RequestSlot {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}
