//! Monotonic clock on the embassy time driver

use embassy_time::Instant;

use respiro_core::traits::Clock;
use respiro_core::Micros;

/// Microseconds since boot from the RP2040 timer
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Micros {
        Instant::now().as_micros()
    }
}
