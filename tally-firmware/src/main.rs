//! Tally - Keypad Calculator Firmware
//!
//! Firmware for an RP2040 board with a 4x4 keypad matrix and a four-digit
//! multiplexed seven-segment display. Three tasks share the work:
//! - keypad: row scanning and debounce
//! - calculator: expression engine and session lifecycle
//! - display: digit multiplexing

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

mod board;
mod channels;
mod config;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit calculator.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../calculator.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tally firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load(EMBEDDED_CONFIG);

    // Pin map: see board.rs
    let keypad = board::keypad(
        [p.PIN_2.into(), p.PIN_3.into(), p.PIN_4.into(), p.PIN_5.into()],
        [p.PIN_6.into(), p.PIN_7.into(), p.PIN_8.into(), p.PIN_9.into()],
        config.scan.active_low,
    );
    let display = board::display(
        [
            p.PIN_10.into(),
            p.PIN_11.into(),
            p.PIN_12.into(),
            p.PIN_13.into(),
            p.PIN_14.into(),
            p.PIN_15.into(),
            p.PIN_16.into(),
            p.PIN_17.into(),
        ],
        p.PIN_18.into(),
        [p.PIN_19.into(), p.PIN_20.into(), p.PIN_21.into(), p.PIN_22.into()],
        config.display.active_low,
    );
    info!("Keypad and display ready");

    spawner.spawn(tasks::display_task(display, config.display)).unwrap();
    spawner.spawn(tasks::keypad_task(keypad, config.scan, config.debounce)).unwrap();
    spawner.spawn(tasks::calculator_task(config.engine, config.display)).unwrap();

    info!("All tasks spawned");
}
