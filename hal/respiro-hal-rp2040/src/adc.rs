//! Analog stick on the RP2040 ADC
//!
//! RP2040 ADC inputs 0..=3 sit on GPIO26..=29. The stick uses inputs 0
//! (GPIO26) and 1 (GPIO27); the channel number passed to
//! [`AnalogInput::read`] is the ADC input number.

use embassy_rp::adc::{Adc, Blocking, Channel};

use respiro_core::input::stick::ADC_CENTER;
use respiro_core::traits::AnalogInput;

/// Number of ADC inputs wired to the stick
const STICK_CHANNELS: usize = 2;

/// Blocking two-channel stick reader
pub struct StickAdc<'d> {
    adc: Adc<'d, Blocking>,
    channels: [Channel<'d>; STICK_CHANNELS],
    /// Last good reading per channel, returned when a conversion fails
    last: [u16; STICK_CHANNELS],
    errors: u32,
}

impl<'d> StickAdc<'d> {
    /// Create a reader from the ADC and the GPIO26/GPIO27 channels
    pub fn new(adc: Adc<'d, Blocking>, adc0: Channel<'d>, adc1: Channel<'d>) -> Self {
        Self {
            adc,
            channels: [adc0, adc1],
            last: [ADC_CENTER; STICK_CHANNELS],
            errors: 0,
        }
    }

    /// Number of failed conversions
    pub fn error_count(&self) -> u32 {
        self.errors
    }
}

impl AnalogInput for StickAdc<'_> {
    fn read(&mut self, channel: u8) -> u16 {
        let index = channel as usize;
        let Some(input) = self.channels.get_mut(index) else {
            return ADC_CENTER;
        };

        match self.adc.blocking_read(input) {
            Ok(raw) => {
                self.last[index] = raw;
                raw
            }
            Err(_) => {
                self.errors = self.errors.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("ADC conversion failed on input {}", channel);
                self.last[index]
            }
        }
    }
}
