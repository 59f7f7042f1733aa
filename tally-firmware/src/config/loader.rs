//! Boot-time configuration
//!
//! Parses the embedded TOML. A bad file never stops the calculator: the
//! problem is logged and the defaults are used instead.

use defmt::*;

use tally_core::config::{parse_config, CalculatorConfig, OverflowPolicy};

/// Parse `input`, falling back to defaults on error
pub fn load(input: &str) -> CalculatorConfig {
    let config = match parse_config(input) {
        Ok(config) => {
            info!("Loaded configuration ({} bytes)", input.len());
            config
        }
        Err(e) => {
            warn!("Invalid configuration: {}, using defaults", e);
            CalculatorConfig::default()
        }
    };

    debug!(
        "Debounce: jitter={} release_limit={} interval={}us",
        config.debounce.jitter_samples,
        config.debounce.release_limit,
        config.debounce.sample_interval_us
    );
    debug!(
        "Scan: settle={}us idle_poll={}ms active_low={}",
        config.scan.row_settle_us, config.scan.idle_poll_ms, config.scan.active_low
    );
    debug!(
        "Display: hold={}us active_low={} blinks={}x{}ms",
        config.display.digit_hold_us,
        config.display.active_low,
        config.display.ready_blinks,
        config.display.blink_ms
    );
    match config.engine.overflow {
        OverflowPolicy::Wrap => debug!("Engine: overflow wraps"),
        OverflowPolicy::Saturate => debug!("Engine: overflow saturates"),
    }

    config
}
