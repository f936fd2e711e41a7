//! Rate limiting for outbound provider calls.
//!
//! # Responsibilities
//! - Cap calls at 30 per trailing 60-second window
//! - Keep at least 2 seconds between consecutive calls
//! - Delay callers instead of rejecting them
//!
//! # Design Decisions
//! - No global instance: the composition root constructs one limiter and
//!   hands an `Arc` to every action
//! - Window exhaustion re-checks in a loop, not by recursion
//! - State sits behind a `std::sync::Mutex` that is never held across an
//!   await, keeping the recorded timestamps consistent; callers racing
//!   between the check and the admission record can still transiently
//!   overshoot the window cap, which matches the host's one-call-at-a-time
//!   dispatch model
//! - `tokio::time` throughout, so tests run against a paused clock

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::{sleep, Instant};

const DEFAULT_MAX_REQUESTS: usize = 30;
const DEFAULT_WINDOW: Duration = Duration::from_secs(60);
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(2000);

/// Sliding-window limiter with minimum inter-call spacing.
///
/// [`acquire`](RateLimiter::acquire) never fails; under sustained load a
/// caller simply waits, with no cap on total wait time.
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    min_interval: Duration,
    state: Mutex<LimiterState>,
}

#[derive(Default)]
struct LimiterState {
    /// Admission timestamps within the trailing window, oldest first.
    requests: VecDeque<Instant>,
    last_request: Option<Instant>,
}

impl Default for RateLimiter {
    /// The provider's published limits: 30 requests/minute, 2-second spacing.
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW, DEFAULT_MIN_INTERVAL)
    }
}

impl RateLimiter {
    /// A `max_requests` of zero would admit nothing and is clamped to one;
    /// the limiter delays callers, it never locks them out entirely.
    pub fn new(max_requests: usize, window: Duration, min_interval: Duration) -> Self {
        Self {
            max_requests: max_requests.max(1),
            window,
            min_interval,
            state: Mutex::new(LimiterState::default()),
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until a call is permitted, then record its admission.
    pub async fn acquire(&self) {
        loop {
            let now = Instant::now();

            let window_wait = {
                let mut state = self.state.lock().expect("rate limiter mutex poisoned");
                while let Some(&oldest) = state.requests.front() {
                    if now.duration_since(oldest) >= self.window {
                        state.requests.pop_front();
                    } else {
                        break;
                    }
                }
                if state.requests.len() >= self.max_requests {
                    let oldest = *state.requests.front().expect("window is non-empty when full");
                    Some(self.window - now.duration_since(oldest))
                } else {
                    None
                }
            };

            if let Some(wait) = window_wait {
                tracing::warn!(wait_ms = wait.as_millis() as u64, "rate limit reached, waiting");
                sleep(wait).await;
                // The window may still be full after waking; re-evaluate.
                continue;
            }

            let spacing_wait = {
                let state = self.state.lock().expect("rate limiter mutex poisoned");
                state.last_request.and_then(|last| {
                    let elapsed = now.duration_since(last);
                    (elapsed < self.min_interval).then(|| self.min_interval - elapsed)
                })
            };

            if let Some(wait) = spacing_wait {
                tracing::debug!(wait_ms = wait.as_millis() as u64, "waiting for request interval");
                sleep(wait).await;
            }

            let mut state = self.state.lock().expect("rate limiter mutex poisoned");
            let admitted = Instant::now();
            state.requests.push_back(admitted);
            state.last_request = Some(admitted);
            return;
        }
    }
}
