//! Fixed-period tick generator.
//!
//! Polled from the control loop with a monotonic microsecond clock.  Due
//! times advance by exactly one period per fire so the cadence does not
//! drift; after a stall longer than a period the schedule restarts from
//! the current time instead of firing a burst of late ticks.

pub struct TickTimer {
    period_us: u64,
    next_due_us: u64,
    fired: u64,
}

impl TickTimer {
    /// First tick fires one full period after `now_us`.
    pub fn new(period_ms: u64, now_us: u64) -> Self {
        let period_us = period_ms.saturating_mul(1000).max(1);
        Self {
            period_us,
            next_due_us: now_us.saturating_add(period_us),
            fired: 0,
        }
    }

    /// Returns `true` at most once per call when a tick is due.
    pub fn poll(&mut self, now_us: u64) -> bool {
        if now_us < self.next_due_us {
            return false;
        }
        self.next_due_us = self.next_due_us.saturating_add(self.period_us);
        if self.next_due_us <= now_us {
            self.next_due_us = now_us.saturating_add(self.period_us);
        }
        self.fired += 1;
        true
    }

    /// Microseconds until the next tick (0 if already due).
    pub fn remaining_us(&self, now_us: u64) -> u64 {
        self.next_due_us.saturating_sub(now_us)
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }
}
