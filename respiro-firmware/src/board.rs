//! Board wiring
//!
//! Binds the RP2040 peripherals to the collaborator traits the session
//! controller talks to.

use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, PIO0};
use embassy_rp::pwm::PwmOutput;

use respiro_core::traits::Board;
use respiro_drivers::buzzer::PwmBuzzer;
use respiro_drivers::display::Ssd1306;
use respiro_drivers::led::RgbStatusLed;
use respiro_hal_rp2040::{EmbassyClock, PioWs2812, StickAdc};

/// Display I2C bus
pub type DisplayBus = I2c<'static, I2C1, i2c::Blocking>;

/// Matrix strip on PIO0 state machine 0
pub type MatrixStrip = PioWs2812<'static, PIO0, 0>;

/// Status LED on PWM slices 5 and 6
pub type StatusRgb = RgbStatusLed<PwmOutput<'static>, PwmOutput<'static>, PwmOutput<'static>>;

/// Every output and sensor the session uses
pub struct DeviceBoard {
    pub clock: EmbassyClock,
    pub stick: StickAdc<'static>,
    pub display: Ssd1306<DisplayBus>,
    pub buzzer: PwmBuzzer<PwmOutput<'static>>,
    pub strip: MatrixStrip,
    pub status_led: StatusRgb,
}

impl Board for DeviceBoard {
    type Clock = EmbassyClock;
    type Stick = StickAdc<'static>;
    type Display = Ssd1306<DisplayBus>;
    type Buzzer = PwmBuzzer<PwmOutput<'static>>;
    type Strip = MatrixStrip;
    type StatusLed = StatusRgb;

    fn clock(&mut self) -> &mut Self::Clock {
        &mut self.clock
    }

    fn stick(&mut self) -> &mut Self::Stick {
        &mut self.stick
    }

    fn display(&mut self) -> &mut Self::Display {
        &mut self.display
    }

    fn buzzer(&mut self) -> &mut Self::Buzzer {
        &mut self.buzzer
    }

    fn strip(&mut self) -> &mut Self::Strip {
        &mut self.strip
    }

    fn status_led(&mut self) -> &mut Self::StatusLed {
        &mut self.status_led
    }
}
