//! Board pinout (BitDogLab-style RP2040 board)
//!
//! PWM slices on the RP2040 pair GPIOs: GPIO10/11 share slice 5 (A/B)
//! and GPIO12/13 share slice 6 (A/B). The buzzer and the green status
//! channel therefore run at the same PWM frequency.

use respiro_core::input::ButtonId;

/// Button A, adds wait time
pub const BUTTON_A: u8 = 5;
/// Button B, commits, acknowledges and retries
pub const BUTTON_B: u8 = 6;
/// Stick push switch
pub const STICK_BUTTON: u8 = 22;

/// Stick Y axis (ADC0)
pub const STICK_Y: u8 = 26;
/// Stick X axis (ADC1)
pub const STICK_X: u8 = 27;

/// WS2812 matrix data line
pub const MATRIX_DATA: u8 = 7;

/// Buzzer PWM (slice 5 A)
pub const BUZZER: u8 = 10;
/// Status LED green (slice 5 B)
pub const LED_GREEN: u8 = 11;
/// Status LED blue (slice 6 A)
pub const LED_BLUE: u8 = 12;
/// Status LED red (slice 6 B)
pub const LED_RED: u8 = 13;

/// Display I2C1 data
pub const DISPLAY_SDA: u8 = 14;
/// Display I2C1 clock
pub const DISPLAY_SCL: u8 = 15;
/// Display I2C bus speed
pub const DISPLAY_I2C_HZ: u32 = 400_000;

/// PWM counter top shared by buzzer and status LED (12-bit levels)
pub const PWM_TOP: u16 = 4095;

/// PWM clock divider for slices 5 and 6
///
/// 125 MHz / (15 * 4096) ≈ 2 kHz, audible on the piezo and flicker-free
/// on the LED.
pub const PWM_DIVIDER: u8 = 15;

/// GPIO a button is wired to
pub fn gpio_for_button(button: ButtonId) -> u8 {
    match button {
        ButtonId::Primary => BUTTON_A,
        ButtonId::Secondary => BUTTON_B,
        ButtonId::Stick => STICK_BUTTON,
    }
}
