//! Minimal TOML reader for calculator configuration
//!
//! Handles only the subset the calculator's config file uses, not TOML
//! in general.
//!
//! Supported:
//! - `[debounce]`, `[scan]`, `[display]` and `[engine]` section headers
//! - `key = value` pairs with integer, boolean or basic string values
//! - Comments, whole-line or trailing (`# ...`)
//!
//! Keys missing from the file keep their defaults. The result is validated
//! before it is returned.

use super::types::{
    CalculatorConfig, ConfigError, DebounceConfig, DisplayConfig, EngineConfig, OverflowPolicy,
    ScanConfig,
};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header (line number)
    InvalidSection(usize),
    /// Line is not `key = value` (line number)
    InvalidLine(usize),
    /// Key not known in its section (line number)
    UnknownKey(usize),
    /// Value has the wrong type or is out of range (line number)
    InvalidValue(usize),
    /// Parsed values failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Debounce,
    Scan,
    Display,
    Engine,
}

/// Parse TOML text into a validated `CalculatorConfig`
pub fn parse_config(input: &str) -> Result<CalculatorConfig, ParseError> {
    let mut config = CalculatorConfig::default();
    let mut section = Section::Root;

    for (i, raw) in input.lines().enumerate() {
        let line_no = i + 1;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection(line_no))?;
            section = parse_section(name.trim()).ok_or(ParseError::InvalidSection(line_no))?;
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(ParseError::InvalidLine(line_no))?;
        let key = key.trim();
        let value = Value::parse(value.trim()).ok_or(ParseError::InvalidValue(line_no))?;

        let applied = match section {
            Section::Root => Err(KeyError::Unknown),
            Section::Debounce => apply_debounce(&mut config.debounce, key, value),
            Section::Scan => apply_scan(&mut config.scan, key, value),
            Section::Display => apply_display(&mut config.display, key, value),
            Section::Engine => apply_engine(&mut config.engine, key, value),
        };

        applied.map_err(|e| match e {
            KeyError::Unknown => ParseError::UnknownKey(line_no),
            KeyError::BadValue => ParseError::InvalidValue(line_no),
        })?;
    }

    config.validate()?;
    Ok(config)
}

fn parse_section(name: &str) -> Option<Section> {
    match name {
        "debounce" => Some(Section::Debounce),
        "scan" => Some(Section::Scan),
        "display" => Some(Section::Display),
        "engine" => Some(Section::Engine),
        _ => None,
    }
}

/// Drop a trailing comment, leaving `#` inside quotes alone
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Value<'a> {
    Integer(i64),
    Bool(bool),
    Str(&'a str),
}

impl<'a> Value<'a> {
    fn parse(text: &'a str) -> Option<Self> {
        match text {
            "true" => return Some(Value::Bool(true)),
            "false" => return Some(Value::Bool(false)),
            _ => {}
        }

        if let Some(inner) = text.strip_prefix('"') {
            return inner.strip_suffix('"').map(Value::Str);
        }

        // TOML allows underscores between digits
        let mut value: i64 = 0;
        let mut digits = 0;
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        for c in body.chars() {
            match c {
                '0'..='9' => {
                    value = value
                        .checked_mul(10)?
                        .checked_add(i64::from(c as u8 - b'0'))?;
                    digits += 1;
                }
                '_' if digits > 0 => {}
                _ => return None,
            }
        }
        if digits == 0 {
            return None;
        }
        Some(Value::Integer(if negative { -value } else { value }))
    }

    fn as_int<T: TryFrom<i64>>(self) -> Result<T, KeyError> {
        match self {
            Value::Integer(v) => T::try_from(v).map_err(|_| KeyError::BadValue),
            _ => Err(KeyError::BadValue),
        }
    }

    fn as_bool(self) -> Result<bool, KeyError> {
        match self {
            Value::Bool(b) => Ok(b),
            _ => Err(KeyError::BadValue),
        }
    }
}

enum KeyError {
    Unknown,
    BadValue,
}

fn apply_debounce(cfg: &mut DebounceConfig, key: &str, value: Value) -> Result<(), KeyError> {
    match key {
        "jitter_samples" => cfg.jitter_samples = value.as_int()?,
        "release_limit" => cfg.release_limit = value.as_int()?,
        "sample_interval_us" => cfg.sample_interval_us = value.as_int()?,
        _ => return Err(KeyError::Unknown),
    }
    Ok(())
}

fn apply_scan(cfg: &mut ScanConfig, key: &str, value: Value) -> Result<(), KeyError> {
    match key {
        "row_settle_us" => cfg.row_settle_us = value.as_int()?,
        "idle_poll_ms" => cfg.idle_poll_ms = value.as_int()?,
        "active_low" => cfg.active_low = value.as_bool()?,
        _ => return Err(KeyError::Unknown),
    }
    Ok(())
}

fn apply_display(cfg: &mut DisplayConfig, key: &str, value: Value) -> Result<(), KeyError> {
    match key {
        "digit_hold_us" => cfg.digit_hold_us = value.as_int()?,
        "active_low" => cfg.active_low = value.as_bool()?,
        "ready_blinks" => cfg.ready_blinks = value.as_int()?,
        "blink_ms" => cfg.blink_ms = value.as_int()?,
        _ => return Err(KeyError::Unknown),
    }
    Ok(())
}

fn apply_engine(cfg: &mut EngineConfig, key: &str, value: Value) -> Result<(), KeyError> {
    match (key, value) {
        ("overflow", Value::Str("wrap")) => cfg.overflow = OverflowPolicy::Wrap,
        ("overflow", Value::Str("saturate")) => cfg.overflow = OverflowPolicy::Saturate,
        ("overflow", _) => return Err(KeyError::BadValue),
        _ => return Err(KeyError::Unknown),
    }
    Ok(())
}
