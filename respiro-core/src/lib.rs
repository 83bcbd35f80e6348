//! Board-agnostic core logic for the break reminder firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware collaborator traits (clock, inputs, display, buzzer, LEDs)
//! - Button debouncing and analog stick mapping
//! - LED matrix frame buffer with serpentine strip addressing
//! - Reflex mini-game
//! - Session state machine (configure, work, alert, game, closing animation)
//! - Configuration types and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod game;
pub mod input;
pub mod matrix;
pub mod session;
pub mod traits;

/// Monotonic timestamp or duration in microseconds
pub type Micros = u64;

/// Microseconds per millisecond
pub const MICROS_PER_MS: Micros = 1_000;

/// Microseconds per second
pub const MICROS_PER_S: Micros = 1_000_000;
