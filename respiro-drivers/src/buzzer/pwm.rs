//! Piezo buzzer on a PWM output
//!
//! The PWM slice frequency sets the pitch; the HAL configures it. The
//! driver only switches between 50% duty (sounding) and fully off.

use embedded_hal::pwm::SetDutyCycle;

use respiro_core::traits::Buzzer;

/// PWM-driven piezo buzzer
pub struct PwmBuzzer<P> {
    pwm: P,
    sounding: bool,
    errors: u32,
}

impl<P: SetDutyCycle> PwmBuzzer<P> {
    /// Create a silent buzzer
    pub fn new(mut pwm: P) -> Self {
        let errors = u32::from(pwm.set_duty_cycle_fully_off().is_err());
        Self {
            pwm,
            sounding: false,
            errors,
        }
    }

    /// Check if the buzzer is currently sounding
    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    /// Number of failed duty cycle writes
    pub fn error_count(&self) -> u32 {
        self.errors
    }

    fn record<E>(&mut self, result: Result<(), E>) {
        if result.is_err() {
            self.errors = self.errors.wrapping_add(1);
        }
    }
}

impl<P: SetDutyCycle> Buzzer for PwmBuzzer<P> {
    fn start_tone(&mut self, _duration_hint_ms: u32) {
        let result = self.pwm.set_duty_cycle_percent(50);
        self.record(result);
        self.sounding = true;
    }

    fn stop(&mut self) {
        let result = self.pwm.set_duty_cycle_fully_off();
        self.record(result);
        self.sounding = false;
    }
}
