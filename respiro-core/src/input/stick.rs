//! Analog stick to discrete direction mapping
//!
//! Each axis is compared against a dead zone around the ADC midpoint:
//!
//! ```text
//!   0 ........ center-dz ..... center ..... center+dz ........ 4095
//!   |<-- -1 -->|<-------------- 0 -------------->|<-- +1 -->|
//! ```
//!
//! Polarity: raw values above `center + deadzone` map to +1 on a
//! non-inverted axis. Whether +1 means right/down or left/up on the
//! matrix depends on how the stick is mounted, so each axis carries an
//! `inverted` flag in its [`AxisConfig`] together with its ADC channel.

use crate::traits::AnalogInput;

/// Largest value a 12-bit conversion can return
pub const ADC_MAX: u16 = 4095;

/// Nominal midpoint of a 12-bit conversion
pub const ADC_CENTER: u16 = 2048;

/// One raw reading of both stick axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StickSample {
    /// Raw X axis conversion (0..=4095)
    pub x_raw: u16,
    /// Raw Y axis conversion (0..=4095)
    pub y_raw: u16,
}

impl StickSample {
    /// Create a sample from raw readings
    pub const fn new(x_raw: u16, y_raw: u16) -> Self {
        Self { x_raw, y_raw }
    }
}

/// Discrete stick direction, each component in {-1, 0, 1}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Direction {
    /// Column step (+1 = toward higher x)
    pub dx: i8,
    /// Row step (+1 = toward higher y)
    pub dy: i8,
}

impl Direction {
    /// Stick at rest
    pub const NONE: Direction = Direction { dx: 0, dy: 0 };

    /// Check if the stick is inside the dead zone on both axes
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// ADC wiring of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisConfig {
    /// ADC channel the axis is wired to
    pub channel: u8,
    /// Flip the sign of the axis component
    pub inverted: bool,
}

/// Stick calibration and wiring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StickConfig {
    /// Reading at rest
    pub center: u16,
    /// Half-width of the "no movement" band around `center`
    pub deadzone: u16,
    /// Horizontal axis wiring
    pub x: AxisConfig,
    /// Vertical axis wiring
    pub y: AxisConfig,
}

impl Default for StickConfig {
    fn default() -> Self {
        Self {
            center: ADC_CENTER,
            deadzone: 100,
            // X on ADC1 (GPIO27), raw increases to the right
            x: AxisConfig {
                channel: 1,
                inverted: false,
            },
            // Y on ADC0 (GPIO26), raw increases upward while matrix rows
            // increase downward
            y: AxisConfig {
                channel: 0,
                inverted: true,
            },
        }
    }
}

/// Map one raw axis value to -1, 0 or +1
pub fn axis_component(raw: u16, center: u16, deadzone: u16) -> i8 {
    let raw = raw as i32;
    let low = center as i32 - deadzone as i32;
    let high = center as i32 + deadzone as i32;

    if raw < low {
        -1
    } else if raw > high {
        1
    } else {
        0
    }
}

/// Map a sample to a direction with non-inverted polarity on both axes
pub fn direction(sample: StickSample, center: u16, deadzone: u16) -> Direction {
    Direction {
        dx: axis_component(sample.x_raw, center, deadzone),
        dy: axis_component(sample.y_raw, center, deadzone),
    }
}

/// Raw level for the status LED channel following one axis
///
/// Inside the dead zone the channel is off; outside it the level follows
/// the raw reading, so a full deflection either way lights the LED.
pub fn indicator_level(raw: u16, center: u16, deadzone: u16) -> u16 {
    if axis_component(raw, center, deadzone) == 0 {
        0
    } else {
        raw.min(ADC_MAX)
    }
}

/// Stick reader and direction mapper
#[derive(Debug, Clone)]
pub struct StickMapper {
    config: StickConfig,
}

impl StickMapper {
    /// Create a mapper for the given wiring and calibration
    pub fn new(config: StickConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &StickConfig {
        &self.config
    }

    /// Read both axes from the ADC
    ///
    /// Readings above the 12-bit range are clamped.
    pub fn sample<A: AnalogInput + ?Sized>(&self, adc: &mut A) -> StickSample {
        StickSample {
            x_raw: adc.read(self.config.x.channel).min(ADC_MAX),
            y_raw: adc.read(self.config.y.channel).min(ADC_MAX),
        }
    }

    /// Map a sample to a direction, applying per-axis polarity
    pub fn direction(&self, sample: StickSample) -> Direction {
        let raw = direction(sample, self.config.center, self.config.deadzone);
        Direction {
            dx: if self.config.x.inverted { -raw.dx } else { raw.dx },
            dy: if self.config.y.inverted { -raw.dy } else { raw.dy },
        }
    }

    /// Status LED levels for a sample as (red from X, blue from Y)
    pub fn indicator_levels(&self, sample: StickSample) -> (u16, u16) {
        let StickConfig {
            center, deadzone, ..
        } = self.config;
        (
            indicator_level(sample.x_raw, center, deadzone),
            indicator_level(sample.y_raw, center, deadzone),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct MockAdc {
        channels: [u16; 4],
    }

    impl AnalogInput for MockAdc {
        fn read(&mut self, channel: u8) -> u16 {
            self.channels[channel as usize]
        }
    }

    #[test]
    fn test_center_is_rest() {
        let sample = StickSample::new(ADC_CENTER, ADC_CENTER);
        assert_eq!(direction(sample, ADC_CENTER, 0), Direction::NONE);
        assert_eq!(direction(sample, ADC_CENTER, 100), Direction::NONE);
    }

    #[test]
    fn test_deadzone_edges() {
        let c = ADC_CENTER;
        assert_eq!(axis_component(c + 100, c, 100), 0);
        assert_eq!(axis_component(c + 101, c, 100), 1);
        assert_eq!(axis_component(c - 100, c, 100), 0);
        assert_eq!(axis_component(c - 101, c, 100), -1);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(axis_component(0, ADC_CENTER, 100), -1);
        assert_eq!(axis_component(ADC_MAX, ADC_CENTER, 100), 1);
        // Dead zone wider than the range never triggers
        assert_eq!(axis_component(0, ADC_CENTER, 3000), 0);
    }

    #[test]
    fn test_sample_uses_configured_channels() {
        let mut adc = MockAdc {
            channels: [100, 4000, 0, 0],
        };
        let mapper = StickMapper::new(StickConfig::default());
        let sample = mapper.sample(&mut adc);
        // Default wiring: X on ADC1, Y on ADC0
        assert_eq!(sample, StickSample::new(4000, 100));

        let swapped = StickMapper::new(StickConfig {
            x: AxisConfig {
                channel: 0,
                inverted: false,
            },
            y: AxisConfig {
                channel: 1,
                inverted: false,
            },
            ..StickConfig::default()
        });
        assert_eq!(swapped.sample(&mut adc), StickSample::new(100, 4000));
    }

    #[test]
    fn test_sample_clamps_out_of_range() {
        let mut adc = MockAdc {
            channels: [u16::MAX, u16::MAX, 0, 0],
        };
        let mapper = StickMapper::new(StickConfig::default());
        assert_eq!(mapper.sample(&mut adc), StickSample::new(ADC_MAX, ADC_MAX));
    }

    #[test]
    fn test_inverted_axis() {
        let mapper = StickMapper::new(StickConfig::default());
        // Pushing up raises the Y reading; rows count downward
        let up = mapper.direction(StickSample::new(ADC_CENTER, ADC_MAX));
        assert_eq!(up, Direction { dx: 0, dy: -1 });

        let right_down = mapper.direction(StickSample::new(ADC_MAX, 0));
        assert_eq!(right_down, Direction { dx: 1, dy: 1 });
    }

    #[test]
    fn test_indicator_levels() {
        let mapper = StickMapper::new(StickConfig::default());
        assert_eq!(
            mapper.indicator_levels(StickSample::new(ADC_CENTER, ADC_CENTER + 50)),
            (0, 0)
        );
        assert_eq!(
            mapper.indicator_levels(StickSample::new(4000, 10)),
            (4000, 10)
        );
    }

    proptest! {
        #[test]
        fn prop_mapping_symmetric(k in 0u16..=2047, deadzone in 0u16..2048) {
            let up = axis_component(ADC_CENTER + k, ADC_CENTER, deadzone);
            let down = axis_component(ADC_CENTER - k, ADC_CENTER, deadzone);
            prop_assert_eq!(up, -down);
        }

        #[test]
        fn prop_just_outside_deadzone_moves(deadzone in 0u16..2000) {
            let sample = StickSample::new(ADC_CENTER + deadzone + 1, ADC_CENTER);
            let dir = direction(sample, ADC_CENTER, deadzone);
            prop_assert_eq!(dir, Direction { dx: 1, dy: 0 });
        }
    }
}
