//! Configuration type definitions
//!
//! These types describe the calculator's tunable timing and policy. The
//! firmware fills them from its embedded TOML file; every field has a
//! default that matches the reference hardware.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of agreeing reads that confirm a press or a release
pub const DEFAULT_JITTER_SAMPLES: u8 = 5;

/// Default ceiling on reads taken while a key is held
pub const DEFAULT_RELEASE_LIMIT: u16 = 200;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Jitter sample count must be at least 1
    JitterSamplesZero,
    /// Release limit must exceed the jitter sample count
    ReleaseLimitTooLow,
    /// Sample interval must be nonzero
    SampleIntervalZero,
    /// Digit hold time must be nonzero
    DigitHoldZero,
}

/// Keypad debounce filter parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DebounceConfig {
    /// Consecutive agreeing reads needed to confirm a press or a release
    pub jitter_samples: u8,
    /// Reads after a press before a held key is force-released
    pub release_limit: u16,
    /// Delay between debounce reads (µs)
    pub sample_interval_us: u32,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            jitter_samples: DEFAULT_JITTER_SAMPLES,
            release_limit: DEFAULT_RELEASE_LIMIT,
            sample_interval_us: 500,
        }
    }
}

impl DebounceConfig {
    /// Validate the filter parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jitter_samples == 0 {
            return Err(ConfigError::JitterSamplesZero);
        }
        if self.release_limit <= u16::from(self.jitter_samples) {
            return Err(ConfigError::ReleaseLimitTooLow);
        }
        if self.sample_interval_us == 0 {
            return Err(ConfigError::SampleIntervalZero);
        }
        Ok(())
    }
}

/// Keypad row scanning parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScanConfig {
    /// Settling time after selecting a row, before reading columns (µs)
    pub row_settle_us: u32,
    /// Pause after a full idle sweep of all rows (ms)
    pub idle_poll_ms: u32,
    /// Rows select low and pressed columns read low (true), or both high
    pub active_low: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            row_settle_us: 200,
            idle_poll_ms: 2,
            active_low: true,
        }
    }
}

/// Seven-segment display parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Time each digit stays lit during multiplexing (µs)
    pub digit_hold_us: u32,
    /// Segment, sign and select lines are active-low
    pub active_low: bool,
    /// Ready-indicator blinks at power-on and shutdown
    pub ready_blinks: u8,
    /// Ready-indicator blink half-period (ms)
    pub blink_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            digit_hold_us: 2000,
            active_low: true,
            ready_blinks: 3,
            blink_ms: 100,
        }
    }
}

impl DisplayConfig {
    /// Validate display timing
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.digit_hold_us == 0 {
            return Err(ConfigError::DigitHoldZero);
        }
        Ok(())
    }
}

/// What a result that does not fit the display turns into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OverflowPolicy {
    /// Keep the low-order digits (value modulo 10^MAX_DIGITS)
    #[default]
    Wrap,
    /// Clamp to the largest displayable magnitude (9999)
    Saturate,
}

/// Expression engine parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Overflow handling after compute
    pub overflow: OverflowPolicy,
}

/// Complete calculator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalculatorConfig {
    /// Debounce filter
    pub debounce: DebounceConfig,
    /// Row scanning
    pub scan: ScanConfig,
    /// Display multiplexing
    pub display: DisplayConfig,
    /// Engine policy
    pub engine: EngineConfig,
}

impl CalculatorConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.debounce.validate()?;
        self.display.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(CalculatorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_debounce_validation() {
        let mut cfg = DebounceConfig::default();
        cfg.jitter_samples = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::JitterSamplesZero));

        let mut cfg = DebounceConfig::default();
        cfg.release_limit = u16::from(cfg.jitter_samples);
        assert_eq!(cfg.validate(), Err(ConfigError::ReleaseLimitTooLow));

        let mut cfg = DebounceConfig::default();
        cfg.sample_interval_us = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::SampleIntervalZero));
    }

    #[test]
    fn test_display_validation() {
        let mut cfg = CalculatorConfig::default();
        cfg.display.digit_hold_us = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::DigitHoldZero));
    }
}
