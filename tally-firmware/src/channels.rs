//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicBool;

use tally_core::KeyEvent;
use tally_display::Frame;

/// Channel capacity for debounced key presses
const KEY_CHANNEL_SIZE: usize = 8;

/// One debounced press with the coordinate it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyPress {
    /// Scanned row
    pub row: u8,
    /// Column mask that was confirmed
    pub mask: u8,
    /// Decoded event
    pub event: KeyEvent,
}

/// Debounced presses from the keypad task, drained by the calculator task
pub static KEY_PRESSES: Channel<CriticalSectionRawMutex, KeyPress, KEY_CHANNEL_SIZE> =
    Channel::new();

/// Latest frame for the display refresh task
pub static FRAME: Signal<CriticalSectionRawMutex, Frame> = Signal::new();

/// Session ended; the keypad task only watches for the restart chord
pub static STANDBY: AtomicBool = AtomicBool::new(false);

/// Restart chord seen while in standby
pub static RESTART: Signal<CriticalSectionRawMutex, ()> = Signal::new();
