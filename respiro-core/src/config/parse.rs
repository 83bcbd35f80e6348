//! Minimal TOML reader for `device.toml`
//!
//! Handles only the subset the device file uses, without allocation:
//!
//! - `[section]` headers and `[step.<name>]` sub-sections
//! - `key = value` pairs with integers, booleans, quoted strings and
//!   three-integer color arrays (`[r, g, b]`)
//! - `#` comments, whole-line or trailing
//!
//! Unknown keys are ignored. The first `[step.*]` section replaces the
//! default guided steps; later ones append in file order.

use heapless::Vec;
use smart_leds::RGB8;

use super::types::DeviceConfig;
use crate::session::animation::{GuidedStep, MAX_GUIDED_STEPS};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Value has the wrong type or does not fit
    InvalidValue,
    /// More guided steps than fit
    TooManyItems,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Stick,
    Game,
    Alert,
    Animation,
    Step,
}

/// Parse configuration text on top of the defaults
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;
    let mut custom_steps = false;
    let mut current_step: Option<GuidedStep> = None;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            save_step(&mut config.animation.steps, &mut current_step)?;

            section = parse_section_header(&line[1..line.len() - 1])?;
            if section == Section::Step {
                if !custom_steps {
                    config.animation.steps.clear();
                    custom_steps = true;
                }
                let name = line[1..line.len() - 1].trim();
                let name = name.split_once('.').map_or("", |(_, n)| n.trim());
                current_step = Some(GuidedStep::new(name, 10));
            }
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config, &mut current_step)?;
        }
    }

    save_step(&mut config.animation.steps, &mut current_step)?;
    Ok(config)
}

/// Parse a section header like "timing" or "step.stretch"
fn parse_section_header(header: &str) -> Result<Section, ParseError> {
    let header = header.trim();

    if let Some((kind, name)) = header.split_once('.') {
        return match kind.trim() {
            "step" if !name.trim().is_empty() => Ok(Section::Step),
            _ => Err(ParseError::InvalidSection),
        };
    }

    match header {
        "timing" => Ok(Section::Timing),
        "stick" => Ok(Section::Stick),
        "game" => Ok(Section::Game),
        "alert" => Ok(Section::Alert),
        "animation" => Ok(Section::Animation),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove trailing comments outside quotes
    let value = match value.find('#') {
        Some(hash_pos) if value[..hash_pos].matches('"').count() % 2 == 0 => {
            value[..hash_pos].trim()
        }
        _ => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Parse an integer value, allowing `_` separators and `0x` prefixes
fn parse_int<T: TryFrom<u64>>(value: &str) -> Result<T, ParseError> {
    let mut digits: heapless::String<24> = heapless::String::new();
    for c in value.chars().filter(|c| *c != '_') {
        digits.push(c).map_err(|_| ParseError::InvalidValue)?;
    }

    let raw = match digits.strip_prefix("0x") {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse::<u64>(),
    }
    .map_err(|_| ParseError::InvalidValue)?;

    T::try_from(raw).map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a color array like "[128, 0, 0]"
fn parse_color(value: &str) -> Result<RGB8, ParseError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ParseError::InvalidValue)?;

    let mut parts = inner.split(',').map(str::trim);
    let mut next = || -> Result<u8, ParseError> {
        parse_int(parts.next().ok_or(ParseError::InvalidValue)?)
    };
    let color = RGB8::new(next()?, next()?, next()?);

    if parts.next().is_some() {
        return Err(ParseError::InvalidValue);
    }
    Ok(color)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DeviceConfig,
    current_step: &mut Option<GuidedStep>,
) -> Result<(), ParseError> {
    match section {
        Section::Timing => {
            let t = &mut config.timing;
            match key {
                "debounce_ms" => t.debounce_ms = parse_int(value)?,
                "wait_increment_ms" => t.wait_increment_ms = parse_int(value)?,
                "max_wait_ms" => t.max_wait_ms = parse_int(value)?,
                "tick_ms" => t.tick_ms = parse_int(value)?,
                _ => {}
            }
        }
        Section::Stick => {
            let s = &mut config.stick;
            match key {
                "center" => s.center = parse_int(value)?,
                "deadzone" => s.deadzone = parse_int(value)?,
                "x_channel" => s.x.channel = parse_int(value)?,
                "x_inverted" => s.x.inverted = parse_bool(value)?,
                "y_channel" => s.y.channel = parse_int(value)?,
                "y_inverted" => s.y.inverted = parse_bool(value)?,
                _ => {}
            }
        }
        Section::Game => {
            let g = &mut config.game;
            match key {
                "hits_target" => g.hits_target = parse_int(value)?,
                "time_budget_ms" => g.time_budget_ms = parse_int(value)?,
                "seed" => g.seed = parse_int(value)?,
                "start_x" => g.start.x = parse_int(value)?,
                "start_y" => g.start.y = parse_int(value)?,
                "target_color" => g.target_color = parse_color(value)?,
                "player_color" => g.player_color = parse_color(value)?,
                _ => {}
            }
        }
        Section::Alert => {
            if key == "tone_ms" {
                config.alert.tone_ms = parse_int(value)?;
            }
        }
        Section::Animation => {
            let a = &mut config.animation;
            match key {
                "row_interval_ms" => a.row_interval_ms = parse_int(value)?,
                "sweep_color" => a.sweep_color = parse_color(value)?,
                _ => {}
            }
        }
        Section::Step => {
            let step = current_step.as_mut().ok_or(ParseError::InvalidSection)?;
            match key {
                "label" => *step = GuidedStep::new(parse_string(value), step.seconds),
                "seconds" => step.seconds = parse_int(value)?,
                _ => {}
            }
        }
        Section::Root => {
            // No root-level keys
        }
    }

    Ok(())
}

/// Append the step being built, if any
fn save_step(
    steps: &mut Vec<GuidedStep, MAX_GUIDED_STEPS>,
    current_step: &mut Option<GuidedStep>,
) -> Result<(), ParseError> {
    if let Some(step) = current_step.take() {
        steps.push(step).map_err(|_| ParseError::TooManyItems)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("timing"), Ok(Section::Timing));
        assert_eq!(parse_section_header(" game "), Ok(Section::Game));
        assert_eq!(parse_section_header("step.eyes"), Ok(Section::Step));
        assert_eq!(
            parse_section_header("step."),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_section_header("stepper"),
            Err(ParseError::InvalidSection)
        );
        assert_eq!(
            parse_section_header("game.extra"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int::<u32>("3_600_000"), Ok(3_600_000));
        assert_eq!(parse_int::<u64>("0x5EED_CAFE"), Ok(0x5EED_CAFE));
        assert_eq!(parse_int::<u8>("256"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u16>("-1"), Err(ParseError::InvalidValue));
        assert_eq!(parse_int::<u16>("abc"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("[128, 0, 15]"), Ok(RGB8::new(128, 0, 15)));
        assert_eq!(parse_color("[1,2]"), Err(ParseError::InvalidValue));
        assert_eq!(parse_color("[1,2,3,4]"), Err(ParseError::InvalidValue));
        assert_eq!(parse_color("1,2,3"), Err(ParseError::InvalidValue));
        assert_eq!(parse_color("[300,0,0]"), Err(ParseError::InvalidValue));
    }

    #[test]
    fn test_parse_key_value_strips_comment() {
        assert_eq!(
            parse_key_value("tick_ms = 50 # faster"),
            Some(("tick_ms", "50"))
        );
        assert_eq!(
            parse_key_value(r#"label = "No # here""#),
            Some(("label", r#""No # here""#))
        );
        assert_eq!(parse_key_value("novalue ="), None);
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(parse_config(""), Ok(DeviceConfig::default()));
    }

    #[test]
    fn test_parse_full_config() {
        let text = r#"
# Break reminder settings
[timing]
debounce_ms = 250
wait_increment_ms = 1000
tick_ms = 50

[stick]
deadzone = 150
x_channel = 0
y_channel = 1
y_inverted = false

[game]
hits_target = 5
time_budget_ms = 20_000
seed = 0x1234
start_x = 0
start_y = 4
target_color = [64, 0, 0]

[alert]
tone_ms = 1500

[animation]
row_interval_ms = 300
sweep_color = [0, 0, 30]

[step.neck]
label = "Turn your neck"
seconds = 15

[step.water]
seconds = 5
"#;
        let config = parse_config(text).unwrap();
        assert_eq!(config.timing.debounce_ms, 250);
        assert_eq!(config.timing.wait_increment_ms, 1_000);
        assert_eq!(config.timing.max_wait_ms, 3_600_000);
        assert_eq!(config.timing.tick_ms, 50);

        assert_eq!(config.stick.center, 2048);
        assert_eq!(config.stick.deadzone, 150);
        assert_eq!(config.stick.x.channel, 0);
        assert_eq!(config.stick.y.channel, 1);
        assert!(!config.stick.y.inverted);

        assert_eq!(config.game.hits_target, 5);
        assert_eq!(config.game.time_budget_ms, 20_000);
        assert_eq!(config.game.seed, 0x1234);
        assert_eq!(config.game.start, Position::new(0, 4));
        assert_eq!(config.game.target_color, RGB8::new(64, 0, 0));

        assert_eq!(config.alert.tone_ms, 1_500);
        assert_eq!(config.animation.row_interval_ms, 300);
        assert_eq!(config.animation.sweep_color, RGB8::new(0, 0, 30));

        let steps = &config.animation.steps;
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].label.as_str(), "Turn your neck");
        assert_eq!(steps[0].seconds, 15);
        assert_eq!(steps[1].label.as_str(), "water");
        assert_eq!(steps[1].seconds, 5);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_too_many_steps() {
        let text = "[step.a]\n[step.b]\n[step.c]\n[step.d]\n[step.e]\n";
        assert_eq!(parse_config(text), Err(ParseError::TooManyItems));
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert_eq!(
            parse_config("[network]\nssid = \"x\"\n"),
            Err(ParseError::InvalidSection)
        );
    }

    #[test]
    fn test_bad_value_rejected() {
        assert_eq!(
            parse_config("[stick]\nx_inverted = yes\n"),
            Err(ParseError::InvalidValue)
        );
        assert_eq!(
            parse_config("[game]\nhits_target = 1000\n"),
            Err(ParseError::InvalidValue)
        );
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = parse_config("[timing]\nturbo = true\n").unwrap();
        assert_eq!(config, DeviceConfig::default());
    }
}
