//! Configuration type definitions

use crate::game::{Position, ReflexConfig};
use crate::input::StickConfig;
use crate::session::AnimationConfig;
use crate::{Micros, MICROS_PER_MS};

/// Timing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Minimum time between accepted presses on one button
    pub debounce_ms: u32,
    /// Wait time added per primary button press while configuring
    pub wait_increment_ms: u32,
    /// Upper bound for the accumulated wait
    pub max_wait_ms: u32,
    /// Session polling period
    pub tick_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 200,
            wait_increment_ms: 5_000,
            max_wait_ms: 60 * 60 * 1_000,
            tick_ms: 100,
        }
    }
}

impl TimingConfig {
    /// Debounce window in microseconds
    pub fn debounce_us(&self) -> Micros {
        self.debounce_ms as Micros * MICROS_PER_MS
    }

    /// Wait increment in microseconds
    pub fn wait_increment_us(&self) -> Micros {
        self.wait_increment_ms as Micros * MICROS_PER_MS
    }

    /// Wait cap in microseconds
    pub fn max_wait_us(&self) -> Micros {
        self.max_wait_ms as Micros * MICROS_PER_MS
    }
}

/// Break alert parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertConfig {
    /// How long the buzzer sounds
    pub tone_ms: u32,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self { tone_ms: 2_000 }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceConfig {
    pub timing: TimingConfig,
    pub stick: StickConfig,
    pub game: ReflexConfig,
    pub alert: AlertConfig,
    pub animation: AnimationConfig,
}

/// Semantic configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Debounce window is zero
    ZeroDebounce,
    /// Tick period is zero
    ZeroTick,
    /// Wait increment is zero
    ZeroIncrement,
    /// Wait increment exceeds the wait cap
    IncrementAboveCap,
    /// Dead zone reaches past the ADC range
    DeadzoneTooWide,
    /// Stick center outside the ADC range
    CenterOutOfRange,
    /// Hit target is zero
    ZeroHitTarget,
    /// Round time budget is zero
    ZeroTimeBudget,
    /// Player start cell is off the matrix
    StartOffGrid(Position),
    /// Animation row interval is zero
    ZeroRowInterval,
}

impl DeviceConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the configuration for values the device cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timing = &self.timing;
        if timing.debounce_ms == 0 {
            return Err(ConfigError::ZeroDebounce);
        }
        if timing.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if timing.wait_increment_ms == 0 {
            return Err(ConfigError::ZeroIncrement);
        }
        if timing.wait_increment_ms > timing.max_wait_ms {
            return Err(ConfigError::IncrementAboveCap);
        }

        let stick = &self.stick;
        if stick.center > crate::input::stick::ADC_MAX {
            return Err(ConfigError::CenterOutOfRange);
        }
        if stick.deadzone >= stick.center
            || stick.center as u32 + stick.deadzone as u32 >= crate::input::stick::ADC_MAX as u32
        {
            return Err(ConfigError::DeadzoneTooWide);
        }

        let game = &self.game;
        if game.hits_target == 0 {
            return Err(ConfigError::ZeroHitTarget);
        }
        if game.time_budget_ms == 0 {
            return Err(ConfigError::ZeroTimeBudget);
        }
        if !game.start.on_grid() {
            return Err(ConfigError::StartOffGrid(game.start));
        }

        if self.animation.row_interval_ms == 0 {
            return Err(ConfigError::ZeroRowInterval);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DeviceConfig::new();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.timing.debounce_us(), 200_000);
        assert_eq!(config.timing.wait_increment_us(), 5_000_000);
        assert_eq!(config.timing.max_wait_us(), 3_600_000_000);
        assert_eq!(config.game.hits_target, 10);
        assert_eq!(config.game.time_budget_ms, 30_000);
        assert_eq!(config.alert.tone_ms, 2_000);
        assert_eq!(config.animation.steps.len(), 3);
    }

    #[test]
    fn test_rejects_zero_timing() {
        let mut config = DeviceConfig::new();
        config.timing.debounce_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDebounce));

        let mut config = DeviceConfig::new();
        config.timing.tick_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTick));

        let mut config = DeviceConfig::new();
        config.timing.wait_increment_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroIncrement));
    }

    #[test]
    fn test_rejects_increment_above_cap() {
        let mut config = DeviceConfig::new();
        config.timing.max_wait_ms = 1_000;
        assert_eq!(config.validate(), Err(ConfigError::IncrementAboveCap));
    }

    #[test]
    fn test_rejects_wide_deadzone() {
        let mut config = DeviceConfig::new();
        config.stick.deadzone = 2048;
        assert_eq!(config.validate(), Err(ConfigError::DeadzoneTooWide));

        let mut config = DeviceConfig::new();
        config.stick.center = 4000;
        assert_eq!(config.validate(), Err(ConfigError::DeadzoneTooWide));

        let mut config = DeviceConfig::new();
        config.stick.center = 5000;
        assert_eq!(config.validate(), Err(ConfigError::CenterOutOfRange));
    }

    #[test]
    fn test_rejects_bad_game() {
        let mut config = DeviceConfig::new();
        config.game.hits_target = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroHitTarget));

        let mut config = DeviceConfig::new();
        config.game.time_budget_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeBudget));

        let mut config = DeviceConfig::new();
        config.game.start = Position::new(2, 5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::StartOffGrid(Position::new(2, 5)))
        );
    }

    #[test]
    fn test_rejects_zero_row_interval() {
        let mut config = DeviceConfig::new();
        config.animation.row_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroRowInterval));
    }
}
