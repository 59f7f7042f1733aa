//! Build script for tally-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates calculator.toml at compile time, first key by key, then as a
//!   typed `CalculatorConfig` through its own `validate()`

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tally_core::config::CalculatorConfig;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate calculator.toml at compile time
fn validate_config() {
    // Re-run if calculator.toml changes
    println!("cargo:rerun-if-changed=calculator.toml");

    let config_path = Path::new("calculator.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: calculator.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a calculator.toml configuration file.       ║\n\
            ║  Please create one in the tally-firmware directory.              ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read calculator.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in calculator.toml                   ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_debounce(&config, &mut errors);
    validate_scan(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_engine(&config, &mut errors);
    if errors.is_empty() {
        validate_typed(&config_content, &mut errors);
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in calculator.toml                 ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=calculator.toml validated successfully");
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

/// Only the known sections, each a table
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        if !["debounce", "scan", "display", "engine"].contains(&name.as_str()) {
            errors.push(format!("Unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

/// Check an optional integer key against an inclusive range
fn check_range(
    config: &toml::Value,
    section: &str,
    key: &str,
    min: i64,
    max: i64,
    errors: &mut Vec<String>,
) -> Option<i64> {
    match config.get(section).and_then(|s| s.get(key)) {
        None => None,
        Some(toml::Value::Integer(v)) if (min..=max).contains(v) => Some(*v),
        Some(toml::Value::Integer(_)) => {
            errors.push(format!("[{}] {} must be {}-{}", section, key, min, max));
            None
        }
        Some(_) => {
            errors.push(format!("[{}] {} must be an integer", section, key));
            None
        }
    }
}

/// Check an optional boolean key
fn check_bool(config: &toml::Value, section: &str, key: &str, errors: &mut Vec<String>) {
    if let Some(v) = config.get(section).and_then(|s| s.get(key)) {
        if !v.is_bool() {
            errors.push(format!("[{}] {} must be true or false", section, key));
        }
    }
}

/// Reject keys the firmware does not read
fn check_keys(config: &toml::Value, section: &str, known: &[&str], errors: &mut Vec<String>) {
    if let Some(table) = config.get(section).and_then(|s| s.as_table()) {
        for key in table.keys() {
            if !known.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", section, key));
            }
        }
    }
}

fn validate_debounce(config: &toml::Value, errors: &mut Vec<String>) {
    check_keys(
        config,
        "debounce",
        &["jitter_samples", "release_limit", "sample_interval_us"],
        errors,
    );
    check_range(config, "debounce", "jitter_samples", 1, 255, errors);
    check_range(config, "debounce", "release_limit", 2, 65_535, errors);
    check_range(config, "debounce", "sample_interval_us", 1, 100_000, errors);
}

fn validate_scan(config: &toml::Value, errors: &mut Vec<String>) {
    check_keys(
        config,
        "scan",
        &["row_settle_us", "idle_poll_ms", "active_low"],
        errors,
    );
    check_range(config, "scan", "row_settle_us", 0, 10_000, errors);
    check_range(config, "scan", "idle_poll_ms", 0, 1_000, errors);
    check_bool(config, "scan", "active_low", errors);
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    check_keys(
        config,
        "display",
        &["digit_hold_us", "active_low", "ready_blinks", "blink_ms"],
        errors,
    );
    check_range(config, "display", "digit_hold_us", 1, 20_000, errors);
    check_range(config, "display", "ready_blinks", 0, 255, errors);
    check_range(config, "display", "blink_ms", 1, 10_000, errors);
    check_bool(config, "display", "active_low", errors);
}

fn validate_engine(config: &toml::Value, errors: &mut Vec<String>) {
    check_keys(config, "engine", &["overflow"], errors);
    match config.get("engine").and_then(|s| s.get("overflow")) {
        None => {}
        Some(toml::Value::String(policy)) if ["wrap", "saturate"].contains(&policy.as_str()) => {}
        Some(_) => errors.push("[engine] overflow must be 'wrap' or 'saturate'".to_string()),
    }
}

/// Deserialize into the firmware's config type and run its checks
///
/// Catches cross-field rules (release_limit above jitter_samples) with the
/// same code the firmware runs at boot.
fn validate_typed(content: &str, errors: &mut Vec<String>) {
    let config: CalculatorConfig = match toml::from_str(content) {
        Ok(config) => config,
        Err(e) => {
            errors.push(format!("Does not match CalculatorConfig: {}", e.message()));
            return;
        }
    };

    if let Err(e) = config.validate() {
        errors.push(format!("Rejected by CalculatorConfig::validate: {:?}", e));
    }
}
