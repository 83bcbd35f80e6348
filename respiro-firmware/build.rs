//! Build script for respiro-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates device.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Matrix edge length; start cells must fall inside it
const MATRIX_SIZE: i64 = 5;

/// Longest guided step label the firmware stores
const MAX_LABEL_LEN: usize = 16;

/// Most guided steps the firmware stores
const MAX_GUIDED_STEPS: usize = 4;

/// Top-level sections the firmware parser accepts
const KNOWN_SECTIONS: [&str; 6] = ["timing", "stick", "game", "alert", "animation", "step"];

/// Highest 12-bit ADC reading
const ADC_MAX: i64 = 4095;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate device.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a device.toml configuration file.         ║\n\
            ║  Please create one in the respiro-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    validate_sections(&config);
    validate_timing(&config);
    validate_stick(&config);
    validate_game(&config);
    validate_steps(&config);

    println!("cargo:warning=device.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Panic with a boxed list of errors for one section
fn report(title: &str, errors: &[String]) {
    if errors.is_empty() {
        return;
    }

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", e))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

/// Integer field of a section, if present
fn int_field(table: &toml::value::Table, key: &str) -> Option<i64> {
    match table.get(key) {
        Some(toml::Value::Integer(v)) => Some(*v),
        _ => None,
    }
}

/// Check that a present field is an integer within a range
fn check_range(
    errors: &mut Vec<String>,
    section: &str,
    table: &toml::value::Table,
    key: &str,
    min: i64,
    max: i64,
) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
        }
        Some(_) => errors.push(format!("[{}] {} must be an integer", section, key)),
    }
}

/// Check that a present color field is a three-byte array
fn check_color(errors: &mut Vec<String>, section: &str, table: &toml::value::Table, key: &str) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Array(parts)) => {
            let valid = parts.len() == 3
                && parts
                    .iter()
                    .all(|p| matches!(p, toml::Value::Integer(v) if (0..=255).contains(v)));
            if !valid {
                errors.push(format!("[{}] {} must be [r, g, b] with 0-255 parts", section, key));
            }
        }
        Some(_) => errors.push(format!("[{}] {} must be an array", section, key)),
    }
}

/// Reject sections the firmware parser does not know
fn validate_sections(config: &toml::Value) {
    let Some(table) = config.as_table() else {
        return;
    };

    let errors: Vec<String> = table
        .keys()
        .filter(|name| !KNOWN_SECTIONS.contains(&name.as_str()))
        .map(|name| format!("Unknown section [{}]", name))
        .collect();

    report("Invalid sections in device.toml", &errors);
}

/// Validate timing configuration
fn validate_timing(config: &toml::Value) {
    let timing = match config.get("timing") {
        Some(toml::Value::Table(t)) => t,
        _ => return,
    };

    let mut errors = Vec::new();

    check_range(&mut errors, "timing", timing, "debounce_ms", 1, 5_000);
    check_range(&mut errors, "timing", timing, "tick_ms", 1, 1_000);
    check_range(&mut errors, "timing", timing, "wait_increment_ms", 1, u32::MAX as i64);
    check_range(&mut errors, "timing", timing, "max_wait_ms", 1, u32::MAX as i64);

    // Defaults: 5 s increment, 1 h cap
    let increment = int_field(timing, "wait_increment_ms").unwrap_or(5_000);
    let cap = int_field(timing, "max_wait_ms").unwrap_or(3_600_000);
    if increment > cap {
        errors.push("[timing] wait_increment_ms exceeds max_wait_ms".to_string());
    }

    report("Invalid timing configuration", &errors);
}

/// Validate stick configuration
fn validate_stick(config: &toml::Value) {
    let stick = match config.get("stick") {
        Some(toml::Value::Table(t)) => t,
        _ => return,
    };

    let mut errors = Vec::new();

    check_range(&mut errors, "stick", stick, "center", 0, ADC_MAX);
    check_range(&mut errors, "stick", stick, "deadzone", 0, ADC_MAX);
    check_range(&mut errors, "stick", stick, "x_channel", 0, 1);
    check_range(&mut errors, "stick", stick, "y_channel", 0, 1);

    let center = int_field(stick, "center").unwrap_or(2048);
    let deadzone = int_field(stick, "deadzone").unwrap_or(100);
    if deadzone >= center || center + deadzone >= ADC_MAX {
        errors.push("[stick] deadzone reaches past the ADC range".to_string());
    }

    for key in ["x_inverted", "y_inverted"] {
        if let Some(value) = stick.get(key) {
            if !value.is_bool() {
                errors.push(format!("[stick] {} must be true or false", key));
            }
        }
    }

    report("Invalid stick configuration", &errors);
}

/// Validate game configuration
fn validate_game(config: &toml::Value) {
    let game = match config.get("game") {
        Some(toml::Value::Table(t)) => t,
        _ => return,
    };

    let mut errors = Vec::new();

    check_range(&mut errors, "game", game, "hits_target", 1, 255);
    check_range(&mut errors, "game", game, "time_budget_ms", 1, u32::MAX as i64);
    check_range(&mut errors, "game", game, "start_x", 0, MATRIX_SIZE - 1);
    check_range(&mut errors, "game", game, "start_y", 0, MATRIX_SIZE - 1);
    check_color(&mut errors, "game", game, "target_color");
    check_color(&mut errors, "game", game, "player_color");

    report("Invalid game configuration", &errors);
}

/// Validate guided step sections
fn validate_steps(config: &toml::Value) {
    if let Some(animation) = config.get("animation").and_then(|a| a.as_table()) {
        let mut errors = Vec::new();
        check_range(&mut errors, "animation", animation, "row_interval_ms", 1, 10_000);
        check_color(&mut errors, "animation", animation, "sweep_color");
        report("Invalid animation configuration", &errors);
    }

    let steps = match config.get("step") {
        Some(toml::Value::Table(t)) => t,
        Some(_) => {
            report("Invalid step configuration", &["[step] must hold [step.<name>] tables".to_string()]);
            return;
        }
        None => return,
    };

    let mut errors = Vec::new();

    if steps.len() > MAX_GUIDED_STEPS {
        errors.push(format!("At most {} [step.*] sections are supported", MAX_GUIDED_STEPS));
    }

    for (name, step) in steps {
        let step = match step {
            toml::Value::Table(t) => t,
            _ => {
                errors.push(format!("[step.{}] must be a table", name));
                continue;
            }
        };

        match step.get("label") {
            Some(toml::Value::String(label)) if label.len() > MAX_LABEL_LEN => {
                errors.push(format!("[step.{}] label longer than {} bytes", name, MAX_LABEL_LEN));
            }
            Some(toml::Value::String(_)) | None => {}
            Some(_) => errors.push(format!("[step.{}] label must be a string", name)),
        }

        let section = format!("step.{}", name);
        check_range(&mut errors, &section, step, "seconds", 1, u16::MAX as i64);
    }

    report("Invalid step configuration", &errors);
}
