//! Reference board wiring
//!
//! | Function                       | GPIO    |
//! |--------------------------------|---------|
//! | Keypad rows 0-3                | 2-5     |
//! | Keypad columns 0-3             | 6-9     |
//! | Segments a-g, dp               | 10-17   |
//! | Sign indicator                 | 18      |
//! | Digit selects 0-3 (0 = right)  | 19-22   |

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;

use tally_display::{MultiplexedDisplay, DIGIT_COUNT, SEGMENT_LINES};
use tally_hal::{EhInput, EhOutput, MatrixKeypad, MATRIX_COLUMNS, MATRIX_ROWS};

/// Board output line
pub type OutputLine = EhOutput<Output<'static>>;

/// Board input line
pub type InputLine = EhInput<Input<'static>>;

/// Keypad matrix on board pins
pub type Keypad = MatrixKeypad<OutputLine, InputLine>;

/// Seven-segment display on board pins
pub type Display = MultiplexedDisplay<OutputLine>;

type Pin = Peri<'static, AnyPin>;

/// Level of an inactive line
fn idle_level(active_low: bool) -> Level {
    if active_low {
        Level::High
    } else {
        Level::Low
    }
}

fn output(pin: Pin, active_low: bool) -> OutputLine {
    let level = idle_level(active_low);
    EhOutput::new(Output::new(pin, level), level == Level::High)
}

/// Build the keypad scanner
///
/// Columns are pulled to their idle level so an open key reads inactive.
pub fn keypad(rows: [Pin; MATRIX_ROWS], columns: [Pin; MATRIX_COLUMNS], active_low: bool) -> Keypad {
    let pull = if active_low { Pull::Up } else { Pull::Down };
    MatrixKeypad::new(
        rows.map(|pin| output(pin, active_low)),
        columns.map(|pin| EhInput::new(Input::new(pin, pull))),
        active_low,
    )
}

/// Build the display driver with every digit dark
pub fn display(
    segments: [Pin; SEGMENT_LINES],
    sign: Pin,
    selects: [Pin; DIGIT_COUNT],
    active_low: bool,
) -> Display {
    MultiplexedDisplay::new(
        segments.map(|pin| output(pin, active_low)),
        output(sign, active_low),
        selects.map(|pin| output(pin, active_low)),
        active_low,
    )
}
