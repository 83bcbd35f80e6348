//! Buzzer drivers

pub mod pwm;

pub use pwm::PwmBuzzer;
