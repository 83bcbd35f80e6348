//! Collaborator bundle handed to the session on every call

use super::{AnalogInput, Buzzer, Clock, Display, LedStrip, StatusLed};

/// All hardware the session talks to
///
/// The session controller never stores hardware handles. Each call that
/// needs hardware borrows the board and reaches the individual
/// collaborators through these accessors, one at a time.
pub trait Board {
    type Clock: Clock;
    type Stick: AnalogInput;
    type Display: Display;
    type Buzzer: Buzzer;
    type Strip: LedStrip;
    type StatusLed: StatusLed;

    /// Monotonic clock
    fn clock(&mut self) -> &mut Self::Clock;

    /// Analog stick ADC
    fn stick(&mut self) -> &mut Self::Stick;

    /// Status text display
    fn display(&mut self) -> &mut Self::Display;

    /// Alert buzzer
    fn buzzer(&mut self) -> &mut Self::Buzzer;

    /// LED matrix strip
    fn strip(&mut self) -> &mut Self::Strip;

    /// RGB status LED
    fn status_led(&mut self) -> &mut Self::StatusLed;

    /// Shorthand for `self.clock().now()`
    fn now(&mut self) -> crate::Micros {
        self.clock().now()
    }
}
