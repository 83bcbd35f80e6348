//! Monotonic time source

use crate::Micros;

/// Monotonic microsecond clock
pub trait Clock {
    /// Current time since boot in microseconds
    ///
    /// Must never go backwards and must not block.
    fn now(&self) -> Micros;
}
