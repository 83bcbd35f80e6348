//! RGB status LED on three PWM outputs

use embedded_hal::pwm::SetDutyCycle;

use respiro_core::traits::StatusLed;

/// Full-scale status LED level
pub const LEVEL_MAX: u16 = 4095;

/// Common-cathode RGB LED, one PWM channel per color
pub struct RgbStatusLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    errors: u32,
}

impl<R, G, B> RgbStatusLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    /// Create the LED, switched off
    pub fn new(red: R, green: G, blue: B) -> Self {
        let mut led = Self {
            red,
            green,
            blue,
            errors: 0,
        };
        led.off();
        led
    }

    /// Number of failed duty cycle writes
    pub fn error_count(&self) -> u32 {
        self.errors
    }
}

/// Scale a 0..=4095 level onto the channel's duty range
fn apply<P: SetDutyCycle>(pwm: &mut P, level: u16) -> bool {
    pwm.set_duty_cycle_fraction(level.min(LEVEL_MAX), LEVEL_MAX)
        .is_ok()
}

impl<R, G, B> StatusLed for RgbStatusLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    fn set_levels(&mut self, red: u16, green: u16, blue: u16) {
        let ok = [
            apply(&mut self.red, red),
            apply(&mut self.green, green),
            apply(&mut self.blue, blue),
        ];
        let failed = ok.iter().filter(|ok| !**ok).count() as u32;
        self.errors = self.errors.wrapping_add(failed);
    }
}
