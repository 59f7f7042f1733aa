//! Display and keypad self-test
//!
//! Lights everything, walks each segment line off in turn, counts through
//! the hex glyphs on one digit, then echoes key coordinates until the test
//! chord is pressed again.

use defmt::*;
use embassy_time::{Duration, Timer};

use tally_core::input::decoder::lowest_column;
use tally_core::input::{KeyEvent, TerminateKind, KEYPAD_COLUMNS};
use tally_display::{encode, Frame, SegmentPattern, SEGMENT_LINES};

use crate::channels::{FRAME, KEY_PRESSES};

/// Time each test pattern stays up
const STEP: Duration = Duration::from_millis(400);

/// Run the full sequence
pub async fn run() {
    show(Frame::all_lit()).await;

    for line in 0..SEGMENT_LINES as u8 {
        show(Frame::filled(SegmentPattern::ALL.without_segment(line))).await;
    }

    for code in 0..16u8 {
        show(Frame::single(0, encode(Some(code), false, false))).await;
    }

    echo().await;
}

async fn show(frame: Frame) {
    FRAME.signal(frame);
    Timer::after(STEP).await;
}

/// Show `row * 4 + lowest column` of every press
async fn echo() {
    debug!("Keypad echo");
    FRAME.signal(Frame::blank());

    loop {
        let press = KEY_PRESSES.receive().await;
        if press.event == KeyEvent::Terminate(TerminateKind::Test) {
            return;
        }

        let Some(column) = lowest_column(press.mask) else {
            continue;
        };
        let code = press.row * KEYPAD_COLUMNS + column;
        debug!("Echo row={} col={} -> {}", press.row, column, code);
        FRAME.signal(Frame::single(0, encode(Some(code), false, false)));
    }
}
