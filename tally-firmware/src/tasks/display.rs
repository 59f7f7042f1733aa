//! Display refresh task
//!
//! Multiplexes the latest frame: one digit is lit for `digit_hold_us`, then
//! the next. A newly signalled frame replaces the current one at once.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Timer};

use tally_core::config::DisplayConfig;
use tally_display::{Frame, SegmentDriver};

use crate::board::Display;
use crate::channels::FRAME;

/// Display task - keeps the digits refreshed
#[embassy_executor::task]
pub async fn display_task(mut display: Display, config: DisplayConfig) {
    info!("Display task started");

    let hold = Duration::from_micros(config.digit_hold_us.max(1) as u64);
    let digits = display.digits();
    let mut frame = Frame::blank();
    let mut position: u8 = 0;

    loop {
        display.drive(position, frame.pattern(usize::from(position)));

        match select(FRAME.wait(), Timer::after(hold)).await {
            Either::First(next) => {
                trace!("New frame");
                frame = next;
            }
            Either::Second(()) => {
                position = (position + 1) % digits;
            }
        }
    }
}
