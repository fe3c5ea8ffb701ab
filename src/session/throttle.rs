use std::time::{Duration, Instant};

/// Leading-edge throttle: lets one event through, then drops events until `interval` passes.
#[derive(Clone, Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    /// Throttle that opens at most once per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Minimum spacing between events.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true and arms the throttle if an event may pass at `now`.
    pub fn ready(&mut self, now: Instant) -> bool {
        let open = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if open {
            self.last = Some(now);
        }
        open
    }

    /// Let the next event through immediately.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/throttle.rs"]
mod tests;
