//! RP2040-specific HAL for the break reminder firmware
//!
//! This crate binds the respiro-core collaborator traits to RP2040
//! peripherals through embassy-rp:
//!
//! - PIO-driven WS2812 LED strip for the 5x5 matrix
//! - Blocking ADC reads for the analog stick
//! - Monotonic microsecond clock on the embassy time driver
//! - Pull-up button inputs with falling-edge waits
//! - Board pinout

#![no_std]

pub mod adc;
pub mod buttons;
pub mod clock;
pub mod pins;
pub mod ws2812;

pub use adc::StickAdc;
pub use buttons::ButtonPins;
pub use clock::EmbassyClock;
pub use ws2812::PioWs2812;
