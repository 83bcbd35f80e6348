//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations. All of them are synchronous:
//! the session runs in a single cooperative polling loop.

pub mod board;
pub mod buzzer;
pub mod clock;
pub mod display;
pub mod input;
pub mod led;

pub use board::Board;
pub use buzzer::Buzzer;
pub use clock::Clock;
pub use display::Display;
pub use input::{AnalogInput, DigitalInput};
pub use led::{LedStrip, StatusLed};
