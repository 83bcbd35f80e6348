//! Device configuration
//!
//! Every tunable lives in [`DeviceConfig`]. The firmware embeds a
//! `device.toml` and reads it with [`parse_config`] at boot; values not
//! present in the file keep their defaults.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
