//! Multiplexed display driver
//!
//! Defines the interface the refresh loop drives, and its implementation
//! over GPIO lines.

use tally_hal::OutputPin;

use crate::frame::DIGIT_COUNT;
use crate::segments::SegmentPattern;

/// Segment lines per digit (a-g, dp)
pub const SEGMENT_LINES: usize = 8;

/// One-digit-at-a-time display access
///
/// Hold time is the caller's: a digit stays lit until the next call.
pub trait SegmentDriver {
    /// Light `pattern` on the digit at select position `select`
    ///
    /// An out-of-range position blanks the display.
    fn drive(&mut self, select: u8, pattern: SegmentPattern);

    /// Turn every digit off
    fn blank(&mut self);

    /// Number of select positions
    fn digits(&self) -> u8 {
        DIGIT_COUNT as u8
    }
}

/// Four seven-segment digits sharing segment and sign lines
///
/// With `active_low` set, a lit segment, the lit sign and the selected
/// digit are all driven low.
pub struct MultiplexedDisplay<P> {
    segments: [P; SEGMENT_LINES],
    sign: P,
    selects: [P; DIGIT_COUNT],
    active_low: bool,
}

impl<P: OutputPin> MultiplexedDisplay<P> {
    /// Create a driver with every digit off
    pub fn new(
        segments: [P; SEGMENT_LINES],
        sign: P,
        selects: [P; DIGIT_COUNT],
        active_low: bool,
    ) -> Self {
        let mut display = Self {
            segments,
            sign,
            selects,
            active_low,
        };
        display.blank();
        display
    }

    fn level(&self, on: bool) -> bool {
        on != self.active_low
    }

    fn deselect_all(&mut self) {
        let off = self.level(false);
        for pin in self.selects.iter_mut() {
            pin.set_state(off);
        }
    }
}

impl<P: OutputPin> SegmentDriver for MultiplexedDisplay<P> {
    fn drive(&mut self, select: u8, pattern: SegmentPattern) {
        // Switch the old digit off first so it never shows the new pattern
        self.deselect_all();

        let select = usize::from(select);
        if select >= DIGIT_COUNT {
            return;
        }

        let lines = pattern.segments();
        let active_low = self.active_low;
        for (i, pin) in self.segments.iter_mut().enumerate() {
            pin.set_state((lines & (1 << i) != 0) != active_low);
        }
        let sign = self.level(pattern.has_sign());
        self.sign.set_state(sign);

        let on = self.level(true);
        self.selects[select].set_state(on);
    }

    fn blank(&mut self) {
        self.deselect_all();
        let off = self.level(false);
        for pin in self.segments.iter_mut() {
            pin.set_state(off);
        }
        self.sign.set_state(off);
    }
}
