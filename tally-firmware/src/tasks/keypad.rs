//! Keypad scan task
//!
//! Walks rows 0-3, confirms each contact through the debounce filter and
//! sends one [`KeyPress`] per press. Scanning of further rows waits until
//! the pressed key is released (or force-released by the filter).
//!
//! Each row keeps its own filter. A row whose key was force-released stays
//! locked out across sweeps until the key is let go, so a long press types
//! once.
//!
//! In standby only row 0 is polled, looking for the restart chord.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_time::{Duration, Timer};

use tally_core::config::{DebounceConfig, ScanConfig};
use tally_core::input::decoder::COLUMN_MASK;
use tally_core::input::{decode, DebounceEvent, Debouncer};
use tally_hal::{KeypadScanner, MATRIX_ROWS};

use crate::board::Keypad;
use crate::channels::{KeyPress, KEY_PRESSES, RESTART, STANDBY};

/// Row polled in standby
const RESTART_ROW: u8 = 0;

/// Every column of the restart row held
const RESTART_MASK: u8 = COLUMN_MASK;

/// Keypad plus per-row debounce filters and timing
struct RowScanner {
    keypad: Keypad,
    filters: [Debouncer; MATRIX_ROWS],
    row: usize,
    settle: Duration,
    interval: Duration,
    max_reads: u16,
}

impl RowScanner {
    fn new(keypad: Keypad, scan: &ScanConfig, debounce: &DebounceConfig) -> Self {
        Self {
            keypad,
            filters: core::array::from_fn(|_| Debouncer::new(debounce)),
            row: 0,
            settle: Duration::from_micros(scan.row_settle_us as u64),
            interval: Duration::from_micros(debounce.sample_interval_us.max(1) as u64),
            max_reads: debounce.release_limit.max(1),
        }
    }

    /// Select `row` and return its confirmed column mask, if any
    ///
    /// Gives up as soon as the filter falls back to idle, or after
    /// `release_limit` reads of a mask that never settles. A locked-out row
    /// gets a single read per sweep, counting toward its unlock.
    async fn confirm(&mut self, row: u8) -> Option<u8> {
        self.row = usize::from(row) % MATRIX_ROWS;
        self.keypad.select_row(row);
        Timer::after(self.settle).await;

        let filter = &mut self.filters[self.row];
        if filter.is_locked() {
            filter.feed(self.keypad.read_columns());
            if filter.is_idle() {
                debug!("Row {} released after lockout", row);
            }
            return None;
        }
        filter.reset();

        for _ in 0..self.max_reads {
            match filter.feed(self.keypad.read_columns()) {
                Some(DebounceEvent::Pressed(mask)) => return Some(mask),
                Some(DebounceEvent::Released { .. }) => return None,
                None if filter.is_idle() => return None,
                None => {}
            }
            Timer::after(self.interval).await;
        }

        trace!("Row {} never settled", row);
        filter.reset();
        None
    }

    /// Wait for the confirmed key on the selected row to let go
    ///
    /// Returns true if the filter had to force the release.
    async fn await_release(&mut self) -> bool {
        let filter = &mut self.filters[self.row];
        while filter.is_held() {
            Timer::after(self.interval).await;
            if let Some(DebounceEvent::Released { mask, forced }) =
                filter.feed(self.keypad.read_columns())
            {
                if forced {
                    warn!("Key mask {:04b} stuck, forcing release", mask);
                }
                return forced;
            }
        }
        false
    }

    fn release(&mut self) {
        self.keypad.release();
    }
}

/// Keypad task - scans the matrix and feeds the calculator
#[embassy_executor::task]
pub async fn keypad_task(keypad: Keypad, scan: ScanConfig, debounce: DebounceConfig) {
    info!("Keypad task started");

    let mut scanner = RowScanner::new(keypad, &scan, &debounce);
    let idle = Duration::from_millis(scan.idle_poll_ms as u64);

    loop {
        if STANDBY.load(Ordering::Acquire) {
            poll_restart(&mut scanner).await;
            Timer::after(idle).await;
            continue;
        }

        let mut found = false;
        for row in 0..MATRIX_ROWS as u8 {
            let Some(mask) = scanner.confirm(row).await else {
                continue;
            };
            found = true;

            let event = decode(row, mask);
            debug!("Key row={} mask={:04b} -> {}", row, mask, event);
            KEY_PRESSES.send(KeyPress { row, mask, event }).await;

            scanner.await_release().await;
        }
        scanner.release();

        if !found {
            Timer::after(idle).await;
        }
    }
}

/// One standby poll of the restart row
async fn poll_restart(scanner: &mut RowScanner) {
    let pressed = scanner.confirm(RESTART_ROW).await;
    if pressed == Some(RESTART_MASK) {
        info!("Restart chord held");
        scanner.await_release().await;
        RESTART.signal(());
    } else if pressed.is_some() {
        scanner.await_release().await;
    }
    scanner.release();
}
