use crate::ports::clock::Clock as ClockTrait;
use chrono::{DateTime, Duration, Utc};
use std::sync::{Mutex, PoisonError};

/// Mock implementation of the Clock port
///
/// Returns a fixed instant until it is moved with `set` or `advance`.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock to the given instant
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl ClockTrait for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_returns_same_instant() {
        let instant = Utc::now();
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), instant);
    }

    #[test]
    fn test_fixed_clock_advance() {
        let instant = Utc::now();
        let clock = FixedClock::new(instant);
        clock.advance(Duration::days(2));
        assert_eq!(clock.now(), instant + Duration::days(2));
    }
}
