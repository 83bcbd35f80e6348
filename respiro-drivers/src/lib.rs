//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator
//! traits defined in respiro-core, written against `embedded-hal` 1.0 so
//! they run on any HAL that implements it:
//!
//! - SSD1306 status display over I2C (text via `embedded-graphics`)
//! - Piezo buzzer on a PWM channel
//! - RGB status LED on three PWM channels

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buzzer;
pub mod display;
pub mod led;
