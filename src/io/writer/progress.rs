//! Periodic progress messages.
use std::time::{Duration, Instant};

use log::info;

/// Default time between two progress messages.
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(3);

pub struct Progress {
    interval: Duration,
    last: Instant,
    total: usize,
}

impl Progress {
    pub fn new(total: usize, interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
            total,
        }
    }

    /// Logs the number of remaining texts if the interval has elapsed since the last message.
    ///
    /// Returns `true` if a message was logged.
    pub fn tick(&mut self, current: usize) -> bool {
        if self.last.elapsed() < self.interval {
            return false;
        }

        info!(
            "Processing text {}, {} texts left.",
            current,
            self.total.saturating_sub(current)
        );
        self.last = Instant::now();
        true
    }
}
