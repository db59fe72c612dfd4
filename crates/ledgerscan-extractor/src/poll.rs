//! Polling schedule for run status checks
//!
//! The schedule yields the delay to sleep before each status check. It ends
//! when either the attempt limit is reached or the next delay would carry the
//! total past the ceiling (`poll_interval × max_poll_attempts`). With the
//! default fixed interval both limits coincide: 30 delays of 2 s.

use crate::config::ExtractorConfig;
use std::time::Duration;

/// Bounded polling schedule
#[derive(Debug, Clone, PartialEq)]
pub struct PollSchedule {
    interval: Duration,
    factor: f64,
    max_interval: Duration,
    max_attempts: u32,
}

impl PollSchedule {
    /// Fixed-interval schedule
    pub fn fixed(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            factor: 1.0,
            max_interval: interval,
            max_attempts,
        }
    }

    /// Build the schedule described by an extractor configuration
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self {
            interval: config.poll_interval(),
            factor: config.poll_backoff_factor,
            max_interval: config.max_poll_interval(),
            max_attempts: config.max_poll_attempts,
        }
    }

    /// Maximum number of status checks
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Total time the schedule may spend sleeping
    pub fn ceiling(&self) -> Duration {
        self.interval * self.max_attempts
    }

    /// Iterate over the delays, one per status check
    pub fn delays(&self) -> PollDelays {
        PollDelays {
            schedule: self.clone(),
            attempt: 0,
            elapsed: Duration::ZERO,
            current: self.interval,
        }
    }
}

/// Iterator over the delays of a [`PollSchedule`]
#[derive(Debug, Clone)]
pub struct PollDelays {
    schedule: PollSchedule,
    attempt: u32,
    elapsed: Duration,
    current: Duration,
}

impl Iterator for PollDelays {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.attempt >= self.schedule.max_attempts {
            return None;
        }

        let remaining = self.schedule.ceiling().saturating_sub(self.elapsed);
        let delay = self.current.min(self.schedule.max_interval).min(remaining);
        if delay.is_zero() {
            return None;
        }

        self.attempt += 1;
        self.elapsed += delay;
        if self.schedule.factor > 1.0 {
            // Overflowing products saturate at the cap
            self.current = Duration::try_from_secs_f64(
                self.current.as_secs_f64() * self.schedule.factor,
            )
            .map_or(self.schedule.max_interval, |next| {
                next.min(self.schedule.max_interval)
            });
        }
        Some(delay)
    }
}
