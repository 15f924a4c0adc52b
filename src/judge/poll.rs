//! Poll interval policy
//!
//! Fixed short intervals while a batch is young, then exponential backoff up
//! to a ceiling.

use std::time::Duration;

use crate::{
    config::JudgeConfig,
    constants::{
        DEFAULT_JUDGE_POLL_TIMEOUT_SECONDS, POLL_FAST_PHASE_MS, POLL_INITIAL_INTERVAL_MS,
        POLL_MAX_INTERVAL_MS,
    },
};

/// Timing parameters for polling one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Interval used until `fast_phase` has elapsed
    pub initial_interval: Duration,
    /// Elapsed wait after which the interval starts doubling
    pub fast_phase: Duration,
    /// Upper bound for a single interval
    pub max_interval: Duration,
    /// Total wait after which polling gives up
    pub max_wait: Duration,
}

impl PollPolicy {
    pub fn from_config(config: &JudgeConfig) -> Self {
        Self {
            max_wait: config.poll_timeout,
            ..Self::default()
        }
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    /// Fresh schedule starting at zero elapsed wait
    pub fn schedule(&self) -> PollSchedule {
        PollSchedule {
            interval: self.initial_interval,
            elapsed: Duration::ZERO,
            fast_phase: self.fast_phase,
            max_interval: self.max_interval,
        }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(POLL_INITIAL_INTERVAL_MS),
            fast_phase: Duration::from_millis(POLL_FAST_PHASE_MS),
            max_interval: Duration::from_millis(POLL_MAX_INTERVAL_MS),
            max_wait: Duration::from_secs(DEFAULT_JUDGE_POLL_TIMEOUT_SECONDS),
        }
    }
}

/// Sequence of sleeps between polls: 1s, 1s, 1s, 1s, 2s, 4s, 8s, 8s, ...
#[derive(Debug, Clone)]
pub struct PollSchedule {
    interval: Duration,
    elapsed: Duration,
    fast_phase: Duration,
    max_interval: Duration,
}

impl PollSchedule {
    /// Delay before the next poll
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.interval;
        self.elapsed += delay;

        if self.elapsed >= self.fast_phase {
            self.interval = (self.interval * 2).min(self.max_interval);
        }

        delay
    }

    /// Total sleep handed out so far
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
