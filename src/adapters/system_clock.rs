use crate::ports::clock::Clock as ClockTrait;
use chrono::{DateTime, Utc};

/// Wall-clock implementation of the Clock port.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockTrait for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
