use tracing::info;

use crate::config::{MAX_SPEED, MIN_SPEED, SPEED_INCREMENT};

/// Tick rate in ticks per second, always within `MIN_SPEED..=MAX_SPEED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Speed(u32);

impl Speed {
    pub fn new(ticks_per_second: u32) -> Self {
        Speed(ticks_per_second.clamp(MIN_SPEED, MAX_SPEED))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns `true` if the speed changed.
    pub fn increase(&mut self) -> bool {
        let before = self.0;
        self.0 = (self.0 + SPEED_INCREMENT).min(MAX_SPEED);
        before != self.0
    }

    /// Returns `true` if the speed changed.
    pub fn decrease(&mut self) -> bool {
        let before = self.0;
        self.0 = self.0.saturating_sub(SPEED_INCREMENT).max(MIN_SPEED);
        before != self.0
    }
}

/// State that lives for the whole run and survives snake resets.
#[derive(Debug, Clone)]
pub struct Session {
    speed: Speed,
    record: usize,
}

impl Session {
    pub fn new(speed: Speed) -> Self {
        Session { speed, record: 1 }
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn speed_mut(&mut self) -> &mut Speed {
        &mut self.speed
    }

    pub fn record(&self) -> usize {
        self.record
    }

    pub fn observe_length(&mut self, length: usize) {
        if length > self.record {
            self.record = length;
            info!(record = length, "new record");
        }
    }

    pub fn status_line(&self) -> String {
        format!(
            "Snake | Speed: {} | Record: {} | F1/F2: speed | Esc: exit",
            self.speed.get(),
            self.record
        )
    }
}
