//! LED drivers

pub mod status;

pub use status::RgbStatusLed;
