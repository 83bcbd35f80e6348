//! Device configuration
//!
//! The configuration is compiled into the firmware from device.toml. The
//! build script checks it first; this module parses and validates it
//! again on the device, since the build check only covers syntax and
//! ranges.

use defmt::*;
use static_cell::StaticCell;

use respiro_core::config::{parse_config, DeviceConfig};

/// Embedded configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

static DEVICE_CONFIG: StaticCell<DeviceConfig> = StaticCell::new();

/// Parse, validate and pin the embedded configuration
///
/// A configuration the core rejects is unrecoverable; the device halts.
pub fn load() -> &'static DeviceConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to parse device.toml: {:?}", e);
            panic!("invalid device configuration");
        }
    };

    if let Err(e) = config.validate() {
        error!("device.toml rejected: {:?}", e);
        panic!("invalid device configuration");
    }

    info!(
        "Timing: +{} ms per press, cap {} ms, debounce {} ms, tick {} ms",
        config.timing.wait_increment_ms,
        config.timing.max_wait_ms,
        config.timing.debounce_ms,
        config.timing.tick_ms
    );
    info!(
        "Game: {} hits in {} ms, {} guided steps",
        config.game.hits_target,
        config.game.time_budget_ms,
        config.animation.steps.len()
    );

    DEVICE_CONFIG.init(config)
}
