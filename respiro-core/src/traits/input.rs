//! Button and analog stick inputs

use crate::input::ButtonId;

/// Digital button inputs
///
/// Buttons are wired with pull-ups, so a pressed button reads low.
/// Implementations hide the active level and report logical presses.
pub trait DigitalInput {
    /// Check if the button currently reads pressed
    fn is_pressed(&self, button: ButtonId) -> bool;
}

/// Analog input channels (12-bit ADC)
pub trait AnalogInput {
    /// Read one conversion from an ADC channel
    ///
    /// Returns a raw value in 0..=4095. Takes `&mut self` because ADC
    /// reads typically require mutable access to the converter.
    fn read(&mut self, channel: u8) -> u16;
}
