//! Sliding-window limiter for feedback submissions.
//!
//! Each client key keeps the instants of its accepted submissions inside the
//! window; a submission is accepted while fewer than `max_requests` remain.
//! State lives in memory only and is lost on restart.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::config::RateLimitSettings;

/// Outcome of a limiter check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { limit: u32, remaining: u32 },
    Limited { retry_after: Duration },
}

impl RateDecision {
    /// Whole seconds to wait, never zero.
    pub fn retry_after_secs(retry_after: Duration) -> u64 {
        let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
        secs.max(1)
    }
}

#[derive(Debug)]
pub struct SubmitRateLimiter {
    settings: RateLimitSettings,
    hits: DashMap<String, VecDeque<Instant>>,
}

impl SubmitRateLimiter {
    pub fn new(settings: RateLimitSettings) -> Self {
        Self {
            settings,
            hits: DashMap::new(),
        }
    }

    pub fn settings(&self) -> RateLimitSettings {
        self.settings
    }

    /// Record an attempt for `key` at `now` if the window allows it.
    pub fn check(&self, key: &str, now: Instant) -> RateDecision {
        let window = self.settings.window;
        let limit = self.settings.max_requests;

        let mut log = self.hits.entry(key.to_string()).or_default();
        prune(&mut log, now, window);

        if log.len() >= limit as usize {
            let oldest = log.front().copied().unwrap_or(now);
            let retry_after = window.saturating_sub(now.saturating_duration_since(oldest));
            return RateDecision::Limited { retry_after };
        }

        log.push_back(now);
        RateDecision::Allowed {
            limit,
            remaining: limit.saturating_sub(log.len() as u32),
        }
    }

    /// Drop expired instants and forget clients with nothing left in the window.
    pub fn sweep(&self, now: Instant) -> usize {
        let window = self.settings.window;
        let before = self.hits.len();
        self.hits.retain(|_, log| {
            prune(log, now, window);
            !log.is_empty()
        });
        before.saturating_sub(self.hits.len())
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.hits.len()
    }
}

fn prune(log: &mut VecDeque<Instant>, now: Instant, window: Duration) {
    while let Some(&front) = log.front() {
        if now.saturating_duration_since(front) >= window {
            log.pop_front();
        } else {
            break;
        }
    }
}
